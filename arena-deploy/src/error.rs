// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

use arena_tools::ErrorKind;

pub type ArenaDeployResult = Result<(), ArenaDeployError>;

#[derive(Debug)]
pub struct ArenaDeployError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl ArenaDeployError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for ArenaDeployError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for ArenaDeployError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for ArenaDeployError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<arena_tools::Error> for ArenaDeployError {
    fn from(err: arena_tools::Error) -> Self {
        let exit_code = exit_code(err.kind());
        Self {
            error: err.into(),
            exit_code,
        }
    }
}

impl From<arena_tools::core::manifest::ManifestError> for ArenaDeployError {
    fn from(err: arena_tools::core::manifest::ManifestError) -> Self {
        arena_tools::Error::from(err).into()
    }
}

/// A timed-out deployment may still be included later, so it gets its own code.
fn exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::Configuration
        | ErrorKind::UnknownNetwork
        | ErrorKind::ArtifactNotFound
        | ErrorKind::InvalidArtifact => ExitCode::from(2),
        ErrorKind::SubmissionError => ExitCode::FAILURE,
        ErrorKind::ConfirmationTimeout => ExitCode::from(3),
        ErrorKind::WriteError => ExitCode::from(4),
    }
}
