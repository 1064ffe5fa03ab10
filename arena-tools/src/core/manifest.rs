// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Arena.toml manifest definitions.
//!
//! The manifest is read once at start-up and turned into explicit configuration objects; no
//! component consults it afterwards.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::core::{
    artifact::ArtifactStore,
    deployment::DeploymentConfig,
    network::{NetworkConfig, NetworkError, NetworkRegistry},
    publish::{PublishFormat, Publisher},
    secrets::SecretProvider,
};

/// Filename for manifest files.
pub const FILENAME: &str = "Arena.toml";

pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_OUTPUT_DIR: &str = "src/contract_data";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    /// Directory the manifest was read from; relative paths are resolved against it.
    #[serde(skip)]
    pub root: PathBuf,
    #[serde(default)]
    pub paths: TomlPaths,
    #[serde(default)]
    pub publish: TomlPublish,
    #[serde(default)]
    pub deploy: TomlDeploy,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TomlPaths {
    #[serde(default = "default_artifacts")]
    pub artifacts: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for TomlPaths {
    fn default() -> Self {
        Self {
            artifacts: default_artifacts(),
            output: default_output(),
        }
    }
}

fn default_artifacts() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACTS_DIR)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TomlPublish {
    #[serde(default)]
    pub format: PublishFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TomlDeploy {
    pub contract: Option<String>,
    pub network: Option<String>,
    /// Kept as strings: uint256 values do not fit TOML integers.
    #[serde(default)]
    pub constructor_args: Vec<String>,
    pub confirmation_timeout_secs: Option<u64>,
    pub confirmations: Option<u64>,
}

impl Manifest {
    /// Loads a manifest. Fails with [`ManifestError::Missing`] if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ManifestError::Missing(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let mut manifest: Manifest = toml::from_str(&contents)?;
        manifest.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(@grey, "loaded manifest {}", path.display());
        Ok(manifest)
    }

    /// Loads `Arena.toml` from `dir`, or falls back to defaults rooted at `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let dir = dir.as_ref();
        match Self::load(dir.join(FILENAME)) {
            Err(ManifestError::Missing(_)) => {
                debug!(@grey, "no {FILENAME} in {}, using defaults", dir.display());
                Ok(Self {
                    root: dir.to_path_buf(),
                    ..Default::default()
                })
            }
            result => result,
        }
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join(&self.paths.artifacts)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.paths.output)
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(self.artifacts_dir())
    }

    pub fn publisher(&self) -> Publisher {
        Publisher::new(self.output_dir(), self.publish.format)
    }

    pub fn registry<S: SecretProvider>(
        &self,
        secrets: S,
    ) -> Result<NetworkRegistry<S>, NetworkError> {
        NetworkRegistry::new(self.networks.clone(), secrets)
    }

    /// Deployment settings from the `[deploy]` table, with defaults for anything unset.
    pub fn deployment_config(&self) -> DeploymentConfig {
        let defaults = DeploymentConfig::default();
        DeploymentConfig {
            confirmation_timeout: self
                .deploy
                .confirmation_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.confirmation_timeout),
            confirmations: self.deploy.confirmations.unwrap_or(defaults.confirmations),
            ..defaults
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("missing {}", .0.display())]
    Missing(PathBuf),
}
