// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Named network profiles.

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    core::secrets::{SecretProvider, SigningKey},
    utils::color::Color,
};

/// Name of the network that is always available unless the manifest overrides it.
pub const LOCALHOST: &str = "localhost";

/// Chain id used by local development nodes.
pub const LOCALHOST_CHAIN_ID: u64 = 1337;

/// Endpoint of a local development node.
pub const LOCALHOST_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Secret consulted for the deployer key when a network does not list its own accounts.
pub const DEFAULT_ACCOUNT: &str = "PRIVATE_KEY";

/// Network configuration as written in the manifest.
///
/// `accounts` names secrets, it never holds key material.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub url: String,
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl NetworkConfig {
    pub fn localhost() -> Self {
        Self {
            chain_id: LOCALHOST_CHAIN_ID,
            url: LOCALHOST_ENDPOINT.to_string(),
            accounts: vec![DEFAULT_ACCOUNT.to_string()],
        }
    }
}

/// A resolved network, ready to be connected to.
#[derive(Clone, Debug)]
pub struct NetworkProfile {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: Url,
    /// Keys in account order; the first one deploys. Empty for read-only profiles.
    pub signing_keys: Vec<SigningKey>,
}

impl NetworkProfile {
    pub fn can_sign(&self) -> bool {
        !self.signing_keys.is_empty()
    }

    pub fn deployer_key(&self) -> Option<&SigningKey> {
        self.signing_keys.first()
    }

    /// Endpoint without credentials or path, safe to print.
    pub fn display_endpoint(&self) -> String {
        display_endpoint(&self.rpc_url)
    }
}

/// Registry of configured networks.
///
/// Resolution pulls signing keys from the injected [`SecretProvider`].
#[derive(Debug)]
pub struct NetworkRegistry<S> {
    networks: BTreeMap<String, (NetworkConfig, Url)>,
    secrets: S,
}

impl<S: SecretProvider> NetworkRegistry<S> {
    /// Builds the registry, validating every endpoint.
    ///
    /// The built-in [`LOCALHOST`] network is added unless `networks` defines it.
    pub fn new(
        networks: impl IntoIterator<Item = (String, NetworkConfig)>,
        secrets: S,
    ) -> Result<Self, NetworkError> {
        let mut validated = BTreeMap::new();
        validated.insert(LOCALHOST.to_string(), NetworkConfig::localhost());
        validated.extend(networks);

        let networks = validated
            .into_iter()
            .map(|(name, config)| {
                let url = parse_endpoint(&name, &config.url)?;
                Ok((name, (config, url)))
            })
            .collect::<Result<_, NetworkError>>()?;
        Ok(Self { networks, secrets })
    }

    /// Looks up a network by name and attaches its signing keys.
    pub fn resolve(&self, name: &str) -> Result<NetworkProfile, NetworkError> {
        let (config, url) =
            self.networks
                .get(name)
                .ok_or_else(|| NetworkError::UnknownNetwork {
                    name: name.to_string(),
                    known: self.names().collect::<Vec<_>>().join(", "),
                })?;

        let default_accounts = [DEFAULT_ACCOUNT.to_string()];
        let accounts = if config.accounts.is_empty() {
            &default_accounts[..]
        } else {
            &config.accounts[..]
        };
        let signing_keys = accounts
            .iter()
            .filter_map(|account| {
                let key = self.secrets.secret(account);
                if key.is_none() {
                    debug!(@grey, "account {account} is not set for network {name}");
                }
                key
            })
            .collect::<Vec<_>>();

        debug!(
            @grey,
            "resolved network {name} (chain id {}, {} signing key(s))",
            config.chain_id,
            signing_keys.len()
        );
        Ok(NetworkProfile {
            name: name.to_string(),
            chain_id: config.chain_id,
            rpc_url: url.clone(),
            signing_keys,
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.networks.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.networks.contains_key(name)
    }
}

fn parse_endpoint(name: &str, url: &str) -> Result<Url, NetworkError> {
    let invalid = |reason: String| NetworkError::InvalidUrl {
        name: name.to_string(),
        reason,
    };
    let url = Url::parse(url.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(format!("unsupported scheme {scheme}"))),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

/// Hosted endpoints usually carry an API key in the path, so only scheme, host and port are shown.
fn display_endpoint(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("unknown network {}, expected one of: {known}", .name.red())]
    UnknownNetwork { name: String, known: String },
    #[error("invalid url for network {name}: {reason}")]
    InvalidUrl { name: String, reason: String },
}
