// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use constructor::{constructor_signature, print_constructor};
pub use deploy::{deploy, estimate};
pub use networks::{networks, NetworkSummary};
pub use publish::publish;

mod constructor;
mod deploy;
mod networks;
mod publish;
