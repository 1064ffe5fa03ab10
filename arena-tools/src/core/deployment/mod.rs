// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.
//!
//! A deployment is not idempotent: every successful submission creates a new contract at a new
//! address. Nothing here retries.

use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};

use crate::{
    core::{artifact::ArtifactBundle, network::NetworkProfile},
    error::ErrorKind,
    utils::{
        color::{Color, DebugColor},
        format_gas,
    },
};
pub use client::{
    AlloyConnector, ChainClient, Confirmation, Connector, CreationTransaction, GasEstimate,
    ProviderClient, Submission,
};

pub mod calldata;
pub mod client;

/// Default bound on the wait for a deployment receipt.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
pub struct DeploymentConfig {
    pub confirmation_timeout: Duration,
    /// Blocks that must include the transaction before it counts as confirmed.
    pub confirmations: u64,
    pub max_fee_per_gas_wei: Option<u128>,
    pub constructor_value: U256,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            confirmations: 1,
            max_fee_per_gas_wei: None,
            constructor_value: U256::ZERO,
        }
    }
}

/// What to deploy and where. Immutable once built.
#[derive(Clone, Debug)]
pub struct DeploymentRequest {
    contract_name: String,
    constructor_args: Vec<String>,
    target_network: NetworkProfile,
}

impl DeploymentRequest {
    pub fn new(
        contract_name: impl Into<String>,
        constructor_args: Vec<String>,
        target_network: NetworkProfile,
    ) -> Self {
        Self {
            contract_name: contract_name.into(),
            constructor_args,
            target_network,
        }
    }

    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    pub fn constructor_args(&self) -> &[String] {
        &self.constructor_args
    }

    pub fn target_network(&self) -> &NetworkProfile {
        &self.target_network
    }
}

/// A confirmed deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_address: Address,
    pub tx_hash: TxHash,
    pub transaction_confirmed: bool,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

/// Deploys a contract and waits for the deployment to be confirmed.
pub async fn deploy<C: ChainClient>(
    request: &DeploymentRequest,
    artifact: &ArtifactBundle,
    config: &DeploymentConfig,
    client: &C,
) -> Result<DeploymentResult, DeploymentError> {
    let submission = submit(request, artifact, config, client).await?;
    confirm(submission, config, client).await
}

/// Builds and sends the creation transaction without waiting for it.
pub async fn submit<C: ChainClient>(
    request: &DeploymentRequest,
    artifact: &ArtifactBundle,
    config: &DeploymentConfig,
    client: &C,
) -> Result<Submission<C::Handle>, DeploymentError> {
    let tx = prepare(request, artifact, config)?;
    check_chain_id(request.target_network(), client).await?;

    info!(
        @grey,
        "deploying {} to {} ({} bytes of creation code)",
        request.contract_name(),
        request.target_network().name,
        tx.code.len()
    );
    let submission = client.submit(tx).await?;
    info!(@grey, "deployment tx hash: {}", submission.tx_hash.debug_lavender());
    Ok(submission)
}

/// Waits for a submitted deployment, bounded by the configured timeout.
///
/// On timeout the transaction is left to the network; it may still be included later.
pub async fn confirm<C: ChainClient>(
    submission: Submission<C::Handle>,
    config: &DeploymentConfig,
    client: &C,
) -> Result<DeploymentResult, DeploymentError> {
    let tx_hash = submission.tx_hash;
    debug!(
        @grey,
        "waiting up to {:?} for {} confirmation(s)",
        config.confirmation_timeout,
        config.confirmations
    );
    let confirmation = tokio::time::timeout(
        config.confirmation_timeout,
        client.await_confirmation(submission.handle),
    )
    .await
    .map_err(|_| DeploymentError::ConfirmationTimeout {
        tx_hash,
        timeout: config.confirmation_timeout,
    })??;

    if !confirmation.status {
        return Err(DeploymentError::Reverted { tx_hash });
    }
    let contract_address = confirmation
        .contract_address
        .ok_or(DeploymentError::NoContractAddress { tx_hash })?;

    info!(@grey, "deployed code at address: {}", contract_address.debug_lavender());
    debug!(@grey, "gas used: {}", format_gas(confirmation.gas_used));
    Ok(DeploymentResult {
        contract_address,
        tx_hash,
        transaction_confirmed: true,
        gas_used: confirmation.gas_used,
        block_number: confirmation.block_number,
    })
}

/// Estimates the cost of a deployment without sending it.
pub async fn estimate<C: ChainClient>(
    request: &DeploymentRequest,
    artifact: &ArtifactBundle,
    config: &DeploymentConfig,
    client: &C,
) -> Result<GasEstimate, DeploymentError> {
    let tx = prepare(request, artifact, config)?;
    check_chain_id(request.target_network(), client).await?;
    client.estimate_gas(&tx).await
}

fn prepare(
    request: &DeploymentRequest,
    artifact: &ArtifactBundle,
    config: &DeploymentConfig,
) -> Result<CreationTransaction, DeploymentError> {
    let network = request.target_network();
    if !network.can_sign() {
        return Err(DeploymentError::MissingSigningKey {
            network: network.name.clone(),
        });
    }
    let code = calldata::creation_code(
        &artifact.bytecode,
        &artifact.abi,
        request.constructor_args(),
        config.constructor_value,
    )?;
    Ok(CreationTransaction {
        code,
        value: config.constructor_value,
        max_fee_per_gas_wei: config.max_fee_per_gas_wei,
    })
}

async fn check_chain_id(
    network: &NetworkProfile,
    client: &impl ChainClient,
) -> Result<(), DeploymentError> {
    let actual = client.chain_id().await?;
    if actual != network.chain_id {
        return Err(DeploymentError::ChainIdMismatch {
            network: network.name.clone(),
            expected: network.chain_id,
            actual,
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error(
        "network {} has no signing key, set the account's environment variable to deploy",
        .network.red()
    )]
    MissingSigningKey { network: String },
    #[error("signing key #{index} for network {network} is not a valid private key")]
    InvalidSigningKey { network: String, index: usize },
    #[error("network {network} is configured with chain id {expected} but the node reports {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
    #[error("deployment rejected: {0}")]
    Rejected(String),
    #[error(
        "deploy tx {} was not confirmed within {timeout:?}, it may still be included later",
        .tx_hash.debug_red()
    )]
    ConfirmationTimeout { tx_hash: TxHash, timeout: Duration },
    #[error("deploy tx {} failed to complete: {reason}", .tx_hash.debug_red())]
    FailedToComplete { tx_hash: TxHash, reason: String },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
}

impl DeploymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSigningKey { .. }
            | Self::InvalidSigningKey { .. }
            | Self::ChainIdMismatch { .. } => ErrorKind::Configuration,
            Self::ConfirmationTimeout { .. } => ErrorKind::ConfirmationTimeout,
            _ => ErrorKind::SubmissionError,
        }
    }
}
