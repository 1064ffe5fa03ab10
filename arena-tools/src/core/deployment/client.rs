// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Chain access used by the deployment orchestrator.
//!
//! The orchestrator only needs a handful of capabilities from a node: its chain id, a gas
//! estimate, and a way to submit a contract creation and later observe its receipt. These are
//! captured by [`ChainClient`]; transport and signing stay in `alloy`.

use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, B256, U256},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::{local::PrivateKeySigner, Signer},
};

use super::{DeploymentConfig, DeploymentError};
use crate::{
    core::network::NetworkProfile,
    utils::{color::DebugColor, decode0x},
};

/// A contract-creation transaction, ready to be signed and sent.
#[derive(Clone, Debug)]
pub struct CreationTransaction {
    /// Creation bytecode with the encoded constructor arguments appended.
    pub code: Bytes,
    pub value: U256,
    pub max_fee_per_gas_wei: Option<u128>,
}

/// A transaction accepted by the node, not yet confirmed.
#[derive(Debug)]
pub struct Submission<H> {
    pub tx_hash: TxHash,
    pub handle: H,
}

/// What the node reports once a submitted transaction is included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub contract_address: Option<Address>,
    /// `false` if the transaction was included but reverted.
    pub status: bool,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub gas_price: u128,
}

impl GasEstimate {
    pub fn fee(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.gas_price)
    }
}

/// Capability interface over a chain node.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Tracks a submitted transaction until it is confirmed.
    type Handle;

    async fn chain_id(&self) -> Result<u64, DeploymentError>;

    async fn estimate_gas(&self, tx: &CreationTransaction)
        -> Result<GasEstimate, DeploymentError>;

    /// Signs and sends the transaction. Fails with [`DeploymentError::Rejected`] if the node
    /// refuses it before inclusion.
    async fn submit(
        &self,
        tx: CreationTransaction,
    ) -> Result<Submission<Self::Handle>, DeploymentError>;

    /// Waits until the transaction is included. Callers bound this wait themselves.
    async fn await_confirmation(&self, handle: Self::Handle)
        -> Result<Confirmation, DeploymentError>;
}

/// Creates a [`ChainClient`] for a resolved network.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Client: ChainClient;

    async fn connect(
        &self,
        profile: &NetworkProfile,
        config: &DeploymentConfig,
    ) -> Result<Self::Client, DeploymentError>;
}

/// [`ChainClient`] backed by an alloy provider with a wallet.
#[derive(Debug)]
pub struct ProviderClient<P> {
    provider: P,
    sender: Address,
    confirmations: u64,
}

impl<P: Provider> ProviderClient<P> {
    pub fn new(provider: P, sender: Address, confirmations: u64) -> Self {
        Self {
            provider,
            sender,
            confirmations: confirmations.max(1),
        }
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    fn request(&self, tx: &CreationTransaction) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.sender)
            .with_value(tx.value)
            .with_deploy_code(tx.code.clone())
    }

    async fn gas_price(&self, tx: &CreationTransaction) -> Result<u128, DeploymentError> {
        match tx.max_fee_per_gas_wei {
            Some(wei) => Ok(wei),
            None => Ok(self.provider.get_gas_price().await?),
        }
    }
}

impl<P: Provider> ChainClient for ProviderClient<P> {
    type Handle = PendingTransactionBuilder<Ethereum>;

    async fn chain_id(&self) -> Result<u64, DeploymentError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn estimate_gas(
        &self,
        tx: &CreationTransaction,
    ) -> Result<GasEstimate, DeploymentError> {
        let gas = self
            .provider
            .estimate_gas(self.request(tx))
            .await
            .map_err(|err| DeploymentError::Rejected(err.to_string()))?;
        let gas_price = self.gas_price(tx).await?;
        Ok(GasEstimate { gas, gas_price })
    }

    async fn submit(
        &self,
        tx: CreationTransaction,
    ) -> Result<Submission<Self::Handle>, DeploymentError> {
        let mut request = self.request(&tx);
        let gas = self
            .provider
            .estimate_gas(request.clone())
            .await
            .map_err(|err| DeploymentError::Rejected(err.to_string()))?;
        request.gas = Some(gas);

        if let Some(max_fee_per_gas) = tx.max_fee_per_gas_wei {
            let fees = self.provider.estimate_eip1559_fees().await?;
            request.max_fee_per_gas = Some(max_fee_per_gas);
            request.max_priority_fee_per_gas =
                Some(fees.max_priority_fee_per_gas.min(max_fee_per_gas));
        }

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|err| DeploymentError::Rejected(err.to_string()))?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());
        Ok(Submission {
            tx_hash,
            handle: pending,
        })
    }

    async fn await_confirmation(
        &self,
        handle: Self::Handle,
    ) -> Result<Confirmation, DeploymentError> {
        let tx_hash = *handle.tx_hash();
        let receipt = handle
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|err| DeploymentError::FailedToComplete {
                tx_hash,
                reason: err.to_string(),
            })?;
        Ok(Confirmation {
            contract_address: receipt.contract_address,
            status: receipt.status(),
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        })
    }
}

/// Connects to a network over HTTP with the profile's signing keys.
///
/// The first key sends the deployment; any further keys are registered with the wallet.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlloyConnector;

impl Connector for AlloyConnector {
    type Client = ProviderClient<DynProvider>;

    async fn connect(
        &self,
        profile: &NetworkProfile,
        config: &DeploymentConfig,
    ) -> Result<Self::Client, DeploymentError> {
        let mut signers = profile
            .signing_keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                parse_signer(key.expose()).ok_or_else(|| DeploymentError::InvalidSigningKey {
                    network: profile.name.clone(),
                    index,
                })
            })
            .map(|signer| signer.map(|s| s.with_chain_id(Some(profile.chain_id))));

        let deployer = signers
            .next()
            .ok_or_else(|| DeploymentError::MissingSigningKey {
                network: profile.name.clone(),
            })??;
        let sender = deployer.address();
        let mut wallet = EthereumWallet::new(deployer);
        for signer in signers {
            wallet.register_signer(signer?);
        }

        debug!(
            @grey,
            "connecting to {} as {}",
            profile.display_endpoint(),
            sender.debug_lavender()
        );
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(profile.rpc_url.as_str())
            .await?
            .erased();
        Ok(ProviderClient::new(provider, sender, config.confirmations))
    }
}

fn parse_signer(key: &str) -> Option<PrivateKeySigner> {
    let bytes = decode0x(key).ok()?;
    if bytes.len() != 32 {
        return None;
    }
    PrivateKeySigner::from_bytes(&B256::from_slice(&bytes)).ok()
}
