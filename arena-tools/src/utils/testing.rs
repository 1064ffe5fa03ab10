// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Fixtures and in-memory chain doubles.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use alloy::{
    json_abi::JsonAbi,
    primitives::{address, b256, Address, TxHash},
};
use serde_json::json;

use crate::core::{
    artifact::ArtifactBundle,
    deployment::{
        ChainClient, Confirmation, Connector, CreationTransaction, DeploymentConfig,
        DeploymentError, GasEstimate, Submission,
    },
    network::NetworkProfile,
    secrets::SigningKey,
};

/// Well-known key of the first development account of local nodes.
pub const DEV_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const SUBSCRIPTION_ID: &str =
    "46028468953454012881341962962912460145529398899847134984409356391396909394706";
pub const VRF_COORDINATOR: &str = "0x9DdfaCa8183c41ad55329BdeeD9F6A8d53168B1B";
pub const KEY_HASH: &str = "0x787d74caea10b2b357790d5b5247c2f63d1d91572a9846f780606e4d953677ae";

/// Creation code that deploys a single `STOP` instruction and ignores its arguments.
pub const ARENA_BYTECODE: &str = "0x6001600c60003960016000f300";

pub const DEPLOYED_ADDRESS: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const DEPLOY_TX_HASH: TxHash =
    b256!("1111111111111111111111111111111111111111111111111111111111111111");

pub fn arena_constructor_args() -> Vec<String> {
    vec![
        SUBSCRIPTION_ID.to_string(),
        VRF_COORDINATOR.to_string(),
        KEY_HASH.to_string(),
    ]
}

pub fn arena_abi_json() -> serde_json::Value {
    json!([
        {
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                { "name": "subscriptionId", "type": "uint256", "internalType": "uint256" },
                { "name": "vrfCoordinator", "type": "address", "internalType": "address" },
                { "name": "keyHash", "type": "bytes32", "internalType": "bytes32" }
            ]
        },
        {
            "type": "function",
            "name": "enterArena",
            "stateMutability": "payable",
            "inputs": [{ "name": "tokenId", "type": "uint256", "internalType": "uint256" }],
            "outputs": []
        },
        {
            "type": "event",
            "name": "BattleResolved",
            "anonymous": false,
            "inputs": [
                { "name": "requestId", "type": "uint256", "indexed": true, "internalType": "uint256" },
                { "name": "winner", "type": "address", "indexed": true, "internalType": "address" }
            ]
        }
    ])
}

pub fn arena_abi() -> JsonAbi {
    serde_json::from_value(arena_abi_json()).expect("valid arena abi")
}

pub fn artifact_document(source_name: &str, contract_name: &str, bytecode: &str) -> serde_json::Value {
    json!({
        "_format": "hh-sol-artifact-1",
        "contractName": contract_name,
        "sourceName": source_name,
        "abi": arena_abi_json(),
        "bytecode": bytecode,
        "deployedBytecode": "0x00",
        "linkReferences": {},
        "deployedLinkReferences": {}
    })
}

/// Writes a hardhat artifact to `<root>/<source_name>/<contract_name>.json`.
pub fn write_artifact(
    root: &Path,
    source_name: &str,
    contract_name: &str,
    bytecode: &str,
) -> PathBuf {
    let dir = root.join(source_name);
    fs::create_dir_all(&dir).expect("create artifact directory");
    let path = dir.join(format!("{contract_name}.json"));
    let document = artifact_document(source_name, contract_name, bytecode);
    fs::write(
        &path,
        serde_json::to_string_pretty(&document).expect("serialize artifact"),
    )
    .expect("write artifact");
    path
}

pub fn arena_artifact() -> ArtifactBundle {
    ArtifactBundle {
        contract_name: "NFTArena".to_string(),
        source_name: "contracts/NFTArena.sol".to_string(),
        abi: arena_abi(),
        bytecode: crate::utils::decode0x(ARENA_BYTECODE)
            .expect("valid bytecode")
            .into(),
        document: artifact_document("contracts/NFTArena.sol", "NFTArena", ARENA_BYTECODE),
    }
}

pub fn profile(name: &str, chain_id: u64, can_sign: bool) -> NetworkProfile {
    NetworkProfile {
        name: name.to_string(),
        chain_id,
        rpc_url: "http://127.0.0.1:8545".parse().expect("valid url"),
        signing_keys: if can_sign {
            vec![SigningKey::new(DEV_PRIVATE_KEY)]
        } else {
            Vec::new()
        },
    }
}

#[derive(Clone, Debug)]
enum Behavior {
    Confirm(Confirmation),
    Reject(String),
    NeverConfirm,
}

/// In-memory [`ChainClient`] that records what it is asked to send.
#[derive(Clone, Debug)]
pub struct MockClient {
    chain_id: u64,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
    submitted: Arc<Mutex<Vec<CreationTransaction>>>,
}

impl MockClient {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            behavior: Behavior::Confirm(Confirmation {
                contract_address: Some(DEPLOYED_ADDRESS),
                status: true,
                gas_used: 1_250_000,
                block_number: Some(42),
            }),
            calls: Arc::default(),
            submitted: Arc::default(),
        }
    }

    pub fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.behavior = Behavior::Confirm(confirmation);
        self
    }

    pub fn rejecting(mut self, reason: &str) -> Self {
        self.behavior = Behavior::Reject(reason.to_string());
        self
    }

    pub fn never_confirming(mut self) -> Self {
        self.behavior = Behavior::NeverConfirm;
        self
    }

    /// Number of calls made to the node.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<CreationTransaction> {
        self.submitted.lock().expect("lock submitted").clone()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl ChainClient for MockClient {
    type Handle = TxHash;

    async fn chain_id(&self) -> Result<u64, DeploymentError> {
        self.record_call();
        Ok(self.chain_id)
    }

    async fn estimate_gas(
        &self,
        _tx: &CreationTransaction,
    ) -> Result<GasEstimate, DeploymentError> {
        self.record_call();
        Ok(GasEstimate {
            gas: 1_250_000,
            gas_price: 1_000_000_000,
        })
    }

    async fn submit(
        &self,
        tx: CreationTransaction,
    ) -> Result<Submission<Self::Handle>, DeploymentError> {
        self.record_call();
        if let Behavior::Reject(reason) = &self.behavior {
            return Err(DeploymentError::Rejected(reason.clone()));
        }
        self.submitted.lock().expect("lock submitted").push(tx);
        Ok(Submission {
            tx_hash: DEPLOY_TX_HASH,
            handle: DEPLOY_TX_HASH,
        })
    }

    async fn await_confirmation(
        &self,
        _handle: Self::Handle,
    ) -> Result<Confirmation, DeploymentError> {
        self.record_call();
        match &self.behavior {
            Behavior::Confirm(confirmation) => Ok(confirmation.clone()),
            Behavior::Reject(reason) => Err(DeploymentError::Rejected(reason.clone())),
            Behavior::NeverConfirm => std::future::pending().await,
        }
    }
}

/// [`Connector`] handing out clones of one [`MockClient`], counting connections.
#[derive(Clone, Debug)]
pub struct MockConnector {
    client: MockClient,
    connections: Arc<AtomicUsize>,
}

impl MockConnector {
    pub fn new(client: MockClient) -> Self {
        Self {
            client,
            connections: Arc::default(),
        }
    }

    pub fn client(&self) -> &MockClient {
        &self.client
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl Connector for MockConnector {
    type Client = MockClient;

    async fn connect(
        &self,
        _profile: &NetworkProfile,
        _config: &DeploymentConfig,
    ) -> Result<Self::Client, DeploymentError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(self.client.clone())
    }
}
