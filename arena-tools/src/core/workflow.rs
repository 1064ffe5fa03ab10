// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deploy a contract and publish its address, as a single sequential run.
//!
//! A run moves through `Configured → Submitted → Confirmed → Published` and stops there or at
//! the first failure. If publishing fails after a confirmed deployment, the contract exists
//! on-chain without a local record; [`Workflow::republish`] can write it afterwards.

use std::fmt;

use alloy::primitives::Address;
use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::ArtifactStore,
        deployment::{self, Connector, DeploymentConfig, DeploymentRequest, DeploymentResult},
        network::NetworkRegistry,
        publish::{PublishedFiles, Publisher},
        secrets::SecretProvider,
    },
    error::{Error, ErrorKind, Result},
    utils::color::DebugColor,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Configured,
    Submitted,
    Confirmed,
    Published,
    Failed(ErrorKind),
}

impl Stage {
    fn order(self) -> u8 {
        match self {
            Self::Configured => 0,
            Self::Submitted => 1,
            Self::Confirmed => 2,
            Self::Published | Self::Failed(_) => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Published | Self::Failed(_))
    }

    /// Stages only move forward; terminal stages never change.
    pub fn can_advance_to(self, next: Stage) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Failed(_) => true,
            next => next.order() == self.order() + 1,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured => f.write_str("Configured"),
            Self::Submitted => f.write_str("Submitted"),
            Self::Confirmed => f.write_str("Confirmed"),
            Self::Published => f.write_str("Published"),
            Self::Failed(kind) => write!(f, "Failed: {kind}"),
        }
    }
}

/// What a run deploys.
#[derive(Clone, Debug)]
pub struct DeploymentPlan {
    pub network: String,
    pub contract: String,
    pub constructor_args: Vec<String>,
}

/// Outcome of a successful run.
#[derive(Clone, Debug)]
pub struct WorkflowReport {
    pub network: String,
    pub contract: String,
    pub deployment: DeploymentResult,
    pub files: PublishedFiles,
}

#[derive(TypedBuilder)]
pub struct Workflow<S, C> {
    registry: NetworkRegistry<S>,
    artifacts: ArtifactStore,
    publisher: Publisher,
    connector: C,
    #[builder(default)]
    config: DeploymentConfig,
    #[builder(default = Stage::Configured, setter(skip))]
    stage: Stage,
}

impl<S: SecretProvider, C: Connector> Workflow<S, C> {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Runs the workflow once. A finished workflow cannot be run again.
    pub async fn run(&mut self, plan: &DeploymentPlan) -> Result<WorkflowReport> {
        if self.stage != Stage::Configured {
            return Err(Error::Finished(self.stage));
        }
        let result = self.execute(plan).await;
        if let Err(err) = &result {
            self.advance(Stage::Failed(err.kind()));
        }
        result
    }

    async fn execute(&mut self, plan: &DeploymentPlan) -> Result<WorkflowReport> {
        // Everything that can fail locally is checked before the first network call.
        let profile = self.registry.resolve(&plan.network)?;
        let artifact = self.artifacts.read(&plan.contract)?;
        let request = DeploymentRequest::new(
            artifact.contract_name.clone(),
            plan.constructor_args.clone(),
            profile,
        );

        let client = self
            .connector
            .connect(request.target_network(), &self.config)
            .await?;
        let submission = deployment::submit(&request, &artifact, &self.config, &client).await?;
        self.advance(Stage::Submitted);

        let result = deployment::confirm(submission, &self.config, &client).await?;
        self.advance(Stage::Confirmed);
        mintln!(
            "Contract deployed to: {}",
            result.contract_address.to_checksum(None)
        );

        let interface = self.publisher.interface_for(&artifact);
        let files = self
            .publisher
            .publish(&artifact.contract_name, result.contract_address, &interface)
            .map_err(|source| Error::Unrecorded {
                address: result.contract_address,
                source,
            })?;
        self.advance(Stage::Published);

        Ok(WorkflowReport {
            network: request.target_network().name.clone(),
            contract: artifact.qualified_name(),
            deployment: result,
            files,
        })
    }

    /// Writes the output files for a contract that is already deployed at `address`.
    ///
    /// Nothing is sent to the network and the stage is left unchanged.
    pub fn republish(&self, plan: &DeploymentPlan, address: Address) -> Result<PublishedFiles> {
        self.registry.resolve(&plan.network)?;
        let artifact = self.artifacts.read(&plan.contract)?;
        let interface = self.publisher.interface_for(&artifact);
        let files = self
            .publisher
            .publish(&artifact.contract_name, address, &interface)?;
        Ok(files)
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "invalid transition {} -> {next}",
            self.stage
        );
        debug!(@grey, "workflow: {} -> {}", self.stage, next.debug_lavender());
        self.stage = next;
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path, time::Duration};

    use super::*;
    use crate::{
        core::{
            network::NetworkConfig,
            publish::PublishFormat,
            secrets::StaticSecrets,
        },
        utils::testing::{
            arena_constructor_args, write_artifact, MockClient, MockConnector, ARENA_BYTECODE,
            DEPLOYED_ADDRESS, DEV_PRIVATE_KEY,
        },
    };

    fn workflow(
        root: &Path,
        client: MockClient,
        config: DeploymentConfig,
    ) -> Workflow<StaticSecrets, MockConnector> {
        let sepolia = NetworkConfig {
            chain_id: 11155111,
            url: "https://rpc.sepolia.example.com".to_string(),
            accounts: vec!["PRIVATE_KEY".to_string()],
        };
        let registry = NetworkRegistry::new(
            [("sepolia".to_string(), sepolia)],
            StaticSecrets::new().with("PRIVATE_KEY", DEV_PRIVATE_KEY),
        )
        .unwrap();
        Workflow::builder()
            .registry(registry)
            .artifacts(ArtifactStore::new(root.join("artifacts")))
            .publisher(Publisher::new(
                root.join("src/contract_data"),
                PublishFormat::Artifact,
            ))
            .connector(MockConnector::new(client))
            .config(config)
            .build()
    }

    fn plan(network: &str) -> DeploymentPlan {
        DeploymentPlan {
            network: network.to_string(),
            contract: "NFTArena".to_string(),
            constructor_args: arena_constructor_args(),
        }
    }

    fn build(root: &Path) {
        write_artifact(
            &root.join("artifacts"),
            "contracts/NFTArena.sol",
            "NFTArena",
            ARENA_BYTECODE,
        );
    }

    #[tokio::test]
    async fn deploys_and_publishes() {
        let dir = tempfile::tempdir().unwrap();
        build(dir.path());
        let mut workflow = workflow(
            dir.path(),
            MockClient::new(11155111),
            DeploymentConfig::default(),
        );

        let report = workflow.run(&plan("sepolia")).await.unwrap();
        assert_eq!(workflow.stage(), Stage::Published);
        assert_eq!(report.deployment.contract_address, DEPLOYED_ADDRESS);
        assert_eq!(report.contract, "contracts/NFTArena.sol:NFTArena");

        let output = dir.path().join("src/contract_data");
        let address: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join("NFTArena-address.json")).unwrap())
                .unwrap();
        assert_eq!(address["address"], DEPLOYED_ADDRESS.to_checksum(None));
        let interface: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join("NFTArena.json")).unwrap())
                .unwrap();
        assert_eq!(interface["contractName"], "NFTArena");
        assert_eq!(interface["abi"][0]["type"], "constructor");

        let err = workflow.run(&plan("sepolia")).await.unwrap_err();
        assert!(matches!(err, Error::Finished(Stage::Published)), "{err}");
        assert_eq!(workflow.connector.client().submitted().len(), 1);
    }

    #[tokio::test]
    async fn unknown_network_fails_before_connecting() {
        let dir = tempfile::tempdir().unwrap();
        build(dir.path());
        let mut workflow = workflow(
            dir.path(),
            MockClient::new(11155111),
            DeploymentConfig::default(),
        );

        let err = workflow.run(&plan("mainnet")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownNetwork);
        assert_eq!(workflow.stage(), Stage::Failed(ErrorKind::UnknownNetwork));
        assert_eq!(workflow.connector.connections(), 0);
        assert_eq!(workflow.connector.client().calls(), 0);
    }

    #[tokio::test]
    async fn missing_artifact_fails_before_connecting() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow(
            dir.path(),
            MockClient::new(11155111),
            DeploymentConfig::default(),
        );

        let err = workflow.run(&plan("sepolia")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactNotFound);
        assert_eq!(workflow.connector.connections(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_leaves_outputs_untouched() {
        let dir = tempfile::tempdir().unwrap();
        build(dir.path());
        let output = dir.path().join("src/contract_data");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("NFTArena-address.json"), "previous").unwrap();

        let config = DeploymentConfig {
            confirmation_timeout: Duration::from_secs(60),
            ..Default::default()
        };
        let mut workflow = workflow(dir.path(), MockClient::new(11155111).never_confirming(), config);

        let err = workflow.run(&plan("sepolia")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfirmationTimeout);
        assert_eq!(
            workflow.stage(),
            Stage::Failed(ErrorKind::ConfirmationTimeout)
        );
        assert_eq!(
            fs::read_to_string(output.join("NFTArena-address.json")).unwrap(),
            "previous"
        );
        assert!(!output.join("NFTArena.json").exists());
    }

    #[tokio::test]
    async fn publish_failure_after_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        build(dir.path());
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/contract_data"), "not a directory").unwrap();
        let mut workflow = workflow(
            dir.path(),
            MockClient::new(11155111),
            DeploymentConfig::default(),
        );

        let err = workflow.run(&plan("sepolia")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteError);
        assert!(
            matches!(err, Error::Unrecorded { address, .. } if address == DEPLOYED_ADDRESS),
            "{err}"
        );
        assert!(err
            .to_string()
            .contains("contract deployed to 0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert_eq!(workflow.stage(), Stage::Failed(ErrorKind::WriteError));
        assert_eq!(workflow.connector.client().submitted().len(), 1);
    }

    #[test]
    fn republish_writes_files_without_connecting() {
        let dir = tempfile::tempdir().unwrap();
        build(dir.path());
        let workflow = workflow(
            dir.path(),
            MockClient::new(11155111),
            DeploymentConfig::default(),
        );

        let files = workflow
            .republish(&plan("sepolia"), DEPLOYED_ADDRESS)
            .unwrap();
        assert!(files.address_file.ends_with("NFTArena-address.json"));
        assert!(files.interface_file.exists());
        assert_eq!(workflow.stage(), Stage::Configured);
        assert_eq!(workflow.connector.connections(), 0);

        let err = workflow
            .republish(&plan("mainnet"), DEPLOYED_ADDRESS)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownNetwork);
    }

    #[test]
    fn stages_only_move_forward() {
        use Stage::*;
        assert!(Configured.can_advance_to(Submitted));
        assert!(Submitted.can_advance_to(Confirmed));
        assert!(Confirmed.can_advance_to(Published));
        assert!(Configured.can_advance_to(Failed(ErrorKind::UnknownNetwork)));
        assert!(Submitted.can_advance_to(Failed(ErrorKind::ConfirmationTimeout)));

        assert!(!Configured.can_advance_to(Confirmed));
        assert!(!Confirmed.can_advance_to(Submitted));
        assert!(!Published.can_advance_to(Failed(ErrorKind::WriteError)));
        assert!(!Failed(ErrorKind::WriteError).can_advance_to(Configured));
        assert_eq!(
            Failed(ErrorKind::ConfirmationTimeout).to_string(),
            "Failed: ConfirmationTimeout"
        );
    }
}
