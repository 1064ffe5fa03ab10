// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{
    env,
    path::{Path, PathBuf},
};

use arena_tools::core::{
    manifest::{Manifest, ManifestError},
    network::LOCALHOST,
    publish::PublishFormat,
    workflow::DeploymentPlan,
};

use crate::constants::DEFAULT_CONTRACT;

#[derive(Debug, Default, clap::Args)]
pub struct PathArgs {
    /// Directory holding the hardhat build artifacts [default: artifacts]
    #[arg(long, value_name = "DIR")]
    artifacts: Option<PathBuf>,
    /// Directory the address and interface files are written to [default: src/contract_data]
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Publish only the ABI instead of the complete build artifact.
    #[arg(long)]
    abi_only: bool,
}

impl PathArgs {
    /// Loads the manifest and applies the overrides given on the command line.
    pub fn manifest(&self, config: Option<&Path>) -> Result<Manifest, ManifestError> {
        let cwd = env::current_dir()?;
        let mut manifest = match config {
            Some(path) => Manifest::load(path)?,
            None => Manifest::discover(&cwd)?,
        };
        // Paths given on the command line are relative to the working directory.
        if let Some(artifacts) = &self.artifacts {
            manifest.paths.artifacts = cwd.join(artifacts);
        }
        if let Some(output) = &self.output {
            manifest.paths.output = cwd.join(output);
        }
        if self.abi_only {
            manifest.publish.format = PublishFormat::Abi;
        }
        Ok(manifest)
    }
}

#[derive(Debug, Default, clap::Args)]
pub struct TargetArgs {
    /// Network to use, as named in the manifest [default: localhost]
    #[arg(short, long)]
    network: Option<String>,
    /// Contract name, or a fully qualified name such as `contracts/NFTArena.sol:NFTArena`
    /// [default: NFTArena]
    #[arg(long)]
    contract: Option<String>,
}

impl TargetArgs {
    pub fn plan(&self, manifest: &Manifest, constructor_args: &[String]) -> DeploymentPlan {
        let constructor_args = if constructor_args.is_empty() {
            manifest.deploy.constructor_args.clone()
        } else {
            constructor_args.to_vec()
        };
        DeploymentPlan {
            network: self
                .network
                .clone()
                .or_else(|| manifest.deploy.network.clone())
                .unwrap_or_else(|| LOCALHOST.to_string()),
            contract: self.contract(manifest),
            constructor_args,
        }
    }

    pub fn contract(&self, manifest: &Manifest) -> String {
        self.contract
            .clone()
            .or_else(|| manifest.deploy.contract.clone())
            .unwrap_or_else(|| DEFAULT_CONTRACT.to_string())
    }
}
