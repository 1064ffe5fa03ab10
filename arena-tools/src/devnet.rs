// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Disposable local chain for integration tests.

use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::core::network::{NetworkConfig, DEFAULT_ACCOUNT, LOCALHOST_CHAIN_ID};

const FOUNDRY_IMAGE_NAME: &str = "ghcr.io/foundry-rs/foundry";
const FOUNDRY_IMAGE_TAG: &str = "stable";
const ANVIL_PORT: u16 = 8545;

/// Manage an anvil node running in a container.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts an anvil node in the background. It is shut down when this struct is dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(ANVIL_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"eth_chainId","params":[],"id":1}"#)
            .with_response_matcher_async(rpc_response_matcher);
        // The image entrypoint is a shell, so the command is a single string.
        let container = GenericImage::new(FOUNDRY_IMAGE_NAME, FOUNDRY_IMAGE_TAG)
            .with_exposed_port(ANVIL_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_cmd(vec![format!(
                "anvil --host 0.0.0.0 --port {ANVIL_PORT} --chain-id {LOCALHOST_CHAIN_ID}"
            )])
            .start()
            .await
            .wrap_err("failed to start anvil container")?;
        let port = container
            .get_host_port_ipv4(ANVIL_PORT)
            .await
            .wrap_err("failed to get anvil RPC port")?;
        Ok(Node {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    /// Get the anvil node RPC.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Network configuration pointing at this node, signing with [`DEFAULT_ACCOUNT`].
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            chain_id: LOCALHOST_CHAIN_ID,
            url: self.rpc.clone(),
            accounts: vec![DEFAULT_ACCOUNT.to_string()],
        }
    }
}

async fn rpc_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}
