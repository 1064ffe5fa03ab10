// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Read compiled contracts from a hardhat build output directory.
//!
//! Hardhat writes one artifact per contract to `<artifacts>/<sourceName>/<ContractName>.json`,
//! next to a `<ContractName>.dbg.json` debug file, and keeps compiler input/output under
//! `<artifacts>/build-info`. Only the contract artifacts are read here.

use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use regex::Regex;
use serde::Deserialize;

use crate::utils::decode0x;

/// Directory hardhat uses for compiler input/output, never holds contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

static CONTRACT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid contract name regex"));

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<source>[^:]+\.sol):(?P<name>[A-Za-z_$][A-Za-z0-9_$]*)$")
        .expect("valid qualified name regex")
});

/// Compiled output for a single contract.
#[derive(Clone, Debug)]
pub struct ArtifactBundle {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
    /// The artifact document exactly as the build step wrote it.
    pub document: serde_json::Value,
}

impl ArtifactBundle {
    /// `sourceName:ContractName`, unambiguous across the whole build.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    source_name: String,
    abi: JsonAbi,
    bytecode: String,
    #[serde(default)]
    link_references: BTreeMap<String, serde_json::Value>,
}

/// Read-only access to the artifacts produced by the build step.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads the artifact for a contract.
    ///
    /// `name` is either a bare contract name (`NFTArena`) or a fully qualified one
    /// (`contracts/NFTArena.sol:NFTArena`). A bare name must be defined by exactly one source.
    pub fn read(&self, name: &str) -> Result<ArtifactBundle, ArtifactError> {
        let path = self.locate(name)?;
        debug!(@grey, "reading artifact {}", path.display());
        load_artifact(&path, name)
    }

    fn locate(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        if let Some(caps) = QUALIFIED_NAME.captures(name) {
            let source = Path::new(&caps["source"]);
            // Source names are relative to the artifacts root and stay inside it.
            if !source
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
            {
                return Err(ArtifactError::InvalidName(name.to_string()));
            }
            let path = self
                .root
                .join(source)
                .join(format!("{}.json", &caps["name"]));
            return if path.is_file() {
                Ok(path)
            } else {
                Err(ArtifactError::NotFound(name.to_string()))
            };
        }
        if !CONTRACT_NAME.is_match(name) {
            return Err(ArtifactError::InvalidName(name.to_string()));
        }
        if !self.root.is_dir() {
            return Err(ArtifactError::NotFound(name.to_string()));
        }

        let pattern = format!(
            "{}/**/{name}.json",
            glob::Pattern::escape(&self.root.to_string_lossy())
        );
        let mut candidates = Vec::new();
        for path in glob::glob(&pattern)? {
            let path = path?;
            let in_build_info = path
                .strip_prefix(&self.root)
                .ok()
                .and_then(|relative| relative.components().next())
                .is_some_and(|first| first.as_os_str() == BUILD_INFO_DIR);
            if !in_build_info && path.is_file() {
                candidates.push(path);
            }
        }
        candidates.sort();

        match candidates.len() {
            0 => Err(ArtifactError::NotFound(name.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => {
                let sources = candidates
                    .iter()
                    .filter_map(|path| path.parent()?.strip_prefix(&self.root).ok())
                    .map(|source| format!("{}:{name}", source.display()))
                    .collect::<Vec<_>>();
                Err(ArtifactError::Ambiguous {
                    name: name.to_string(),
                    candidates: sources.join(", "),
                })
            }
        }
    }
}

fn load_artifact(path: &Path, name: &str) -> Result<ArtifactBundle, ArtifactError> {
    let contents = fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&contents)?;
    let artifact: HardhatArtifact = serde_json::from_value(document.clone())?;

    if !artifact.link_references.is_empty() || artifact.bytecode.contains("__") {
        let libraries = artifact
            .link_references
            .values()
            .filter_map(|libs| libs.as_object())
            .flat_map(|libs| libs.keys().cloned())
            .collect::<Vec<_>>();
        return Err(ArtifactError::UnlinkedLibraries {
            name: name.to_string(),
            libraries: libraries.join(", "),
        });
    }

    let bytecode = decode0x(&artifact.bytecode).map_err(|_| ArtifactError::InvalidBytecode {
        name: name.to_string(),
    })?;
    if bytecode.is_empty() {
        return Err(ArtifactError::EmptyBytecode(name.to_string()));
    }

    Ok(ArtifactBundle {
        contract_name: artifact.contract_name,
        source_name: artifact.source_name,
        abi: artifact.abi,
        bytecode: bytecode.into(),
        document,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("artifact search failed: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("artifact search failed: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("artifact for {0} not found, has the contract been compiled?")]
    NotFound(String),
    #[error("invalid contract name: {0}")]
    InvalidName(String),
    #[error("multiple artifacts named {name}, use a fully qualified name: {candidates}")]
    Ambiguous { name: String, candidates: String },
    #[error("{0} has no bytecode, abstract contracts and interfaces cannot be deployed")]
    EmptyBytecode(String),
    #[error("{name} has invalid bytecode")]
    InvalidBytecode { name: String },
    #[error("{name} must be linked against libraries before deployment: {libraries}")]
    UnlinkedLibraries { name: String, libraries: String },
}

impl ArtifactError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
