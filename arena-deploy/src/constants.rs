// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Contract deployed when neither the command line nor the manifest names one.
pub const DEFAULT_CONTRACT: &str = "NFTArena";
