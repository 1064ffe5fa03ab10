// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;

use alloy::primitives::Address;

use crate::core::{
    artifact::ArtifactError, deployment::DeploymentError, manifest::ManifestError,
    network::NetworkError, publish::PublishError, workflow::Stage,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Manifest(#[from] ManifestError),
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Publish(#[from] PublishError),

    /// The contract is on-chain but its address record could not be written.
    #[error("contract deployed to {} but its files were not written: {source}", .address.to_checksum(None))]
    Unrecorded {
        address: Address,
        source: PublishError,
    },

    #[error("workflow already finished ({0})")]
    Finished(Stage),
}

impl Error {
    /// Coarse classification of the failure, used for the workflow's terminal state.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Manifest(_) | Self::Finished(_) => ErrorKind::Configuration,
            Self::Network(NetworkError::UnknownNetwork { .. }) => ErrorKind::UnknownNetwork,
            Self::Network(_) => ErrorKind::Configuration,
            Self::Artifact(err) if err.is_not_found() => ErrorKind::ArtifactNotFound,
            Self::Artifact(_) => ErrorKind::InvalidArtifact,
            Self::Deployment(err) => err.kind(),
            Self::Publish(_) | Self::Unrecorded { .. } => ErrorKind::WriteError,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    UnknownNetwork,
    ArtifactNotFound,
    InvalidArtifact,
    SubmissionError,
    ConfirmationTimeout,
    WriteError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "Configuration",
            Self::UnknownNetwork => "UnknownNetwork",
            Self::ArtifactNotFound => "ArtifactNotFound",
            Self::InvalidArtifact => "InvalidArtifact",
            Self::SubmissionError => "SubmissionError",
            Self::ConfirmationTimeout => "ConfirmationTimeout",
            Self::WriteError => "WriteError",
        };
        f.write_str(name)
    }
}
