// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;

use crate::{
    core::{
        deployment::AlloyConnector,
        manifest::Manifest,
        publish::PublishedFiles,
        secrets::SecretProvider,
        workflow::{DeploymentPlan, Workflow},
    },
    error::Result,
};

/// Rewrites the output files for a contract that is already deployed.
pub fn publish(
    manifest: &Manifest,
    plan: &DeploymentPlan,
    address: Address,
    secrets: impl SecretProvider,
) -> Result<PublishedFiles> {
    let workflow = Workflow::builder()
        .registry(manifest.registry(secrets)?)
        .artifacts(manifest.artifact_store())
        .publisher(manifest.publisher())
        .connector(AlloyConnector)
        .build();
    let files = workflow.republish(plan, address)?;
    greyln!(
        "wrote {} and {}",
        files.address_file.display(),
        files.interface_file.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        core::secrets::StaticSecrets,
        utils::testing::{write_artifact, ARENA_BYTECODE, DEPLOYED_ADDRESS},
    };

    #[test]
    fn publishes_existing_deployment() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::discover(dir.path()).unwrap();
        write_artifact(
            &manifest.artifacts_dir(),
            "contracts/NFTArena.sol",
            "NFTArena",
            ARENA_BYTECODE,
        );
        let plan = DeploymentPlan {
            network: "localhost".to_string(),
            contract: "NFTArena".to_string(),
            constructor_args: Vec::new(),
        };

        let files = publish(&manifest, &plan, DEPLOYED_ADDRESS, StaticSecrets::new()).unwrap();
        assert_eq!(
            files.address_file,
            manifest.output_dir().join("NFTArena-address.json")
        );
        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(files.address_file).unwrap()).unwrap();
        assert_eq!(record["address"], "0x5FbDB2315678afecb367f032d93F642f64180aa3");
    }
}
