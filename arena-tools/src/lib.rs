// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying compiled contracts and publishing their addresses.

#[macro_use]
mod macros;

pub mod core;
pub mod error;
pub mod ops;

pub mod utils;

#[cfg(feature = "integration-tests")]
pub mod devnet;

pub use error::{Error, ErrorKind, Result};
