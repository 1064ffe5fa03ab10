// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use alloy::primitives::Address;
use arena_tools::{core::secrets::EnvSecrets, ops};

use crate::{
    common_args::{PathArgs, TargetArgs},
    error::ArenaDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Address the contract is deployed at.
    #[arg(long)]
    address: Address,

    #[command(flatten)]
    target: TargetArgs,
    #[command(flatten)]
    paths: PathArgs,
}

pub fn exec(args: Args, config: Option<&Path>) -> ArenaDeployResult {
    let manifest = args.paths.manifest(config)?;
    let plan = args.target.plan(&manifest, &[]);
    ops::publish(&manifest, &plan, args.address, EnvSecrets)?;
    Ok(())
}
