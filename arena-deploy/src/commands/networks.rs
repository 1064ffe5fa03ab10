// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use arena_tools::{core::secrets::EnvSecrets, ops};

use crate::{
    common_args::PathArgs,
    error::ArenaDeployResult,
    utils::print_field,
};

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: Args, config: Option<&Path>) -> ArenaDeployResult {
    let manifest = PathArgs::default().manifest(config)?;
    for network in ops::networks(&manifest, EnvSecrets)? {
        println!("{}", network.name);
        print_field("chain id", network.chain_id);
        print_field("endpoint", &network.endpoint);
        print_field("signing key", if network.can_sign { "set" } else { "not set" });
    }
    Ok(())
}
