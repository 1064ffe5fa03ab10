// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{
    core::{manifest::Manifest, secrets::SecretProvider},
    error::Result,
};

/// What can be shown about a network. Holds no secrets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSummary {
    pub name: String,
    pub chain_id: u64,
    pub endpoint: String,
    pub can_sign: bool,
}

/// Lists every configured network, including the built-in `localhost`.
pub fn networks(manifest: &Manifest, secrets: impl SecretProvider) -> Result<Vec<NetworkSummary>> {
    let registry = manifest.registry(secrets)?;
    let summaries = registry
        .names()
        .map(|name| -> Result<NetworkSummary> {
            let profile = registry.resolve(name)?;
            Ok(NetworkSummary {
                endpoint: profile.display_endpoint(),
                can_sign: profile.can_sign(),
                chain_id: profile.chain_id,
                name: profile.name,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{manifest::FILENAME, secrets::StaticSecrets};
    use crate::utils::testing::DEV_PRIVATE_KEY;

    #[test]
    fn lists_networks_without_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(FILENAME),
            r#"
[networks.sepolia]
chain-id = 11155111
url = "https://eth-sepolia.example.com/v2/api-key"
accounts = ["SEPOLIA_KEY"]
"#,
        )
        .unwrap();
        let manifest = Manifest::discover(dir.path()).unwrap();
        let secrets = StaticSecrets::new().with("SEPOLIA_KEY", DEV_PRIVATE_KEY);

        let summaries = networks(&manifest, secrets).unwrap();
        assert_eq!(
            summaries,
            vec![
                NetworkSummary {
                    name: "localhost".to_string(),
                    chain_id: 1337,
                    endpoint: "http://127.0.0.1:8545".to_string(),
                    can_sign: false,
                },
                NetworkSummary {
                    name: "sepolia".to_string(),
                    chain_id: 11155111,
                    endpoint: "https://eth-sepolia.example.com".to_string(),
                    can_sign: true,
                },
            ]
        );
    }
}
