// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Publish deployed contract details for the front-end.
//!
//! For a contract `Name` two documents are written to the output directory:
//! `Name-address.json` holding `{ "address": ... }` and `Name.json` holding the interface
//! description. Both are replaced atomically, so readers never observe a partial file.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::artifact::ArtifactBundle;

/// Which interface description to publish next to the address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PublishFormat {
    /// The complete build artifact (ABI, bytecode and link references).
    #[default]
    Artifact,
    /// Only the ABI.
    Abi,
}

#[derive(Debug, Serialize)]
struct AddressRecord {
    address: String,
}

/// Paths written by [`Publisher::publish`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishedFiles {
    pub address_file: PathBuf,
    pub interface_file: PathBuf,
}

#[derive(Clone, Debug)]
pub struct Publisher {
    output_dir: PathBuf,
    format: PublishFormat,
}

impl Publisher {
    pub fn new(output_dir: impl Into<PathBuf>, format: PublishFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The interface description of `artifact` in the configured format.
    pub fn interface_for(&self, artifact: &ArtifactBundle) -> serde_json::Value {
        match self.format {
            PublishFormat::Artifact => artifact.document.clone(),
            PublishFormat::Abi => artifact
                .document
                .get("abi")
                .cloned()
                .unwrap_or_else(|| serde_json::json!(artifact.abi)),
        }
    }

    /// Writes the address record and interface description for a contract.
    ///
    /// Existing files for the same contract are overwritten. Calling this again with the same
    /// inputs produces byte-identical files.
    pub fn publish(
        &self,
        contract_name: &str,
        address: Address,
        interface: &serde_json::Value,
    ) -> Result<PublishedFiles, PublishError> {
        let stem = file_stem(contract_name)?;
        fs::create_dir_all(&self.output_dir).map_err(|source| PublishError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        let record = AddressRecord {
            address: address.to_checksum(None),
        };
        let address_file = self.output_dir.join(format!("{stem}-address.json"));
        let interface_file = self.output_dir.join(format!("{stem}.json"));
        let staged_address = stage_json(&self.output_dir, &address_file, &record)?;
        let staged_interface = stage_json(&self.output_dir, &interface_file, interface)?;

        // The address record must never point at a missing or stale interface.
        persist(staged_interface, &interface_file)?;
        persist(staged_address, &address_file)?;

        debug!(@grey, "published {} and {}", address_file.display(), interface_file.display());
        Ok(PublishedFiles {
            address_file,
            interface_file,
        })
    }
}

/// Fully qualified names (`contracts/Foo.sol:Foo`) publish under the bare contract name.
fn file_stem(contract_name: &str) -> Result<&str, PublishError> {
    let stem = contract_name
        .rsplit_once(':')
        .map_or(contract_name, |(_, name)| name);
    if stem.is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(PublishError::InvalidName(contract_name.to_string()));
    }
    Ok(stem)
}

/// Writes `value` to a temporary file in `dir`, to be renamed over `path` by [`persist`].
fn stage_json(
    dir: &Path,
    path: &Path,
    value: &impl Serialize,
) -> Result<NamedTempFile, PublishError> {
    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    stage_file(dir, contents.as_bytes()).map_err(|source| PublishError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn stage_file(dir: &Path, contents: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    Ok(file)
}

fn persist(file: NamedTempFile, path: &Path) -> Result<(), PublishError> {
    file.persist(path).map_err(|err| PublishError::Write {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot publish files for contract name {0}")]
    InvalidName(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::artifact::ArtifactStore,
        utils::testing::{arena_artifact, write_artifact, ARENA_BYTECODE, DEPLOYED_ADDRESS},
    };

    #[test]
    fn creates_output_directory_and_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("src").join("contract_data");
        let publisher = Publisher::new(&output, PublishFormat::Artifact);
        let artifact = arena_artifact();

        let files = publisher
            .publish(
                "NFTArena",
                DEPLOYED_ADDRESS,
                &publisher.interface_for(&artifact),
            )
            .unwrap();
        assert_eq!(files.address_file, output.join("NFTArena-address.json"));
        assert_eq!(files.interface_file, output.join("NFTArena.json"));

        let address = fs::read_to_string(&files.address_file).unwrap();
        assert_eq!(
            address,
            "{\n  \"address\": \"0x5FbDB2315678afecb367f032d93F642f64180aa3\"\n}\n"
        );
        let interface: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files.interface_file).unwrap()).unwrap();
        assert_eq!(interface, artifact.document);
    }

    #[test]
    fn publishing_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = Publisher::new(dir.path(), PublishFormat::Artifact);
        let interface = publisher.interface_for(&arena_artifact());

        let first = publisher
            .publish("NFTArena", DEPLOYED_ADDRESS, &interface)
            .unwrap();
        let address = fs::read(&first.address_file).unwrap();
        let abi = fs::read(&first.interface_file).unwrap();

        let second = publisher
            .publish("NFTArena", DEPLOYED_ADDRESS, &interface)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read(&second.address_file).unwrap(), address);
        assert_eq!(fs::read(&second.interface_file).unwrap(), abi);
    }

    #[test]
    fn overwrites_previous_deployment() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("NFTArena-address.json"), "stale").unwrap();
        let publisher = Publisher::new(dir.path(), PublishFormat::Abi);
        let files = publisher
            .publish("NFTArena", DEPLOYED_ADDRESS, &serde_json::json!([]))
            .unwrap();
        let address = fs::read_to_string(files.address_file).unwrap();
        assert!(address.contains("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
    }

    #[test]
    fn abi_format_publishes_only_the_abi() {
        let publisher = Publisher::new("unused", PublishFormat::Abi);
        let artifact = arena_artifact();
        assert_eq!(publisher.interface_for(&artifact), artifact.document["abi"]);
    }

    #[test]
    fn qualified_names_use_contract_name() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = Publisher::new(dir.path(), PublishFormat::Artifact);
        let files = publisher
            .publish(
                "contracts/NFTArena.sol:NFTArena",
                DEPLOYED_ADDRESS,
                &serde_json::json!({}),
            )
            .unwrap();
        assert_eq!(files.interface_file, dir.path().join("NFTArena.json"));
        assert!(publisher
            .publish("../NFTArena", DEPLOYED_ADDRESS, &serde_json::json!({}))
            .is_err());
    }

    #[test]
    fn unwritable_output_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("contract_data");
        fs::write(&blocker, "not a directory").unwrap();
        let publisher = Publisher::new(&blocker, PublishFormat::Artifact);
        let err = publisher
            .publish("NFTArena", DEPLOYED_ADDRESS, &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, PublishError::Write { .. }), "{err}");
    }

    #[test]
    fn failed_interface_write_leaves_no_address_record() {
        let dir = tempfile::tempdir().unwrap();
        let interface_file = dir.path().join("NFTArena.json");
        fs::create_dir(&interface_file).unwrap();
        fs::write(interface_file.join("keep"), "").unwrap();

        let publisher = Publisher::new(dir.path(), PublishFormat::Artifact);
        let err = publisher
            .publish(
                "NFTArena",
                DEPLOYED_ADDRESS,
                &publisher.interface_for(&arena_artifact()),
            )
            .unwrap_err();
        assert!(
            matches!(err, PublishError::Write { ref path, .. } if *path == interface_file),
            "{err}"
        );
        assert!(!dir.path().join("NFTArena-address.json").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn failed_interface_write_keeps_previous_address_record() {
        let dir = tempfile::tempdir().unwrap();
        let address_file = dir.path().join("NFTArena-address.json");
        fs::write(&address_file, "previous").unwrap();
        fs::create_dir(dir.path().join("NFTArena.json")).unwrap();
        fs::write(dir.path().join("NFTArena.json").join("keep"), "").unwrap();

        let publisher = Publisher::new(dir.path(), PublishFormat::Abi);
        publisher
            .publish("NFTArena", DEPLOYED_ADDRESS, &serde_json::json!([]))
            .unwrap_err();
        assert_eq!(fs::read_to_string(&address_file).unwrap(), "previous");
    }

    #[test]
    fn published_artifact_keeps_build_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = dir.path().join("artifacts");
        write_artifact(&artifacts, "contracts/NFTArena.sol", "NFTArena", ARENA_BYTECODE);
        let written =
            fs::read_to_string(artifacts.join("contracts/NFTArena.sol/NFTArena.json")).unwrap();
        let artifact = ArtifactStore::new(&artifacts).read("NFTArena").unwrap();

        let publisher = Publisher::new(dir.path().join("out"), PublishFormat::Artifact);
        let files = publisher
            .publish(
                "NFTArena",
                DEPLOYED_ADDRESS,
                &publisher.interface_for(&artifact),
            )
            .unwrap();
        let published = fs::read_to_string(files.interface_file).unwrap();
        assert_eq!(published, format!("{written}\n"));

        let position = |key: &str| published.find(&format!("\"{key}\"")).unwrap();
        assert!(position("_format") < position("contractName"));
        assert!(position("contractName") < position("sourceName"));
        assert!(position("sourceName") < position("abi"));
        assert!(position("type") < position("inputs"));
    }
}
