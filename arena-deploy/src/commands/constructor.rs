// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use arena_tools::ops;

use crate::{
    common_args::{PathArgs, TargetArgs},
    error::ArenaDeployResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    target: TargetArgs,
    #[command(flatten)]
    paths: PathArgs,
}

pub fn exec(args: Args, config: Option<&Path>) -> ArenaDeployResult {
    let manifest = args.paths.manifest(config)?;
    ops::print_constructor(&manifest, &args.target.contract(&manifest))?;
    Ok(())
}
