// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::Path;

use crate::error::ArenaDeployResult;

mod constructor;
mod deploy;
mod networks;
mod publish;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the signature of a contract's constructor
    Constructor(constructor::Args),
    /// Deploy a contract and publish its address and interface
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List the configured networks
    #[clap(visible_alias = "n")]
    Networks(networks::Args),
    /// Write the address and interface files for an already deployed contract
    #[clap(visible_alias = "p")]
    Publish(publish::Args),
}

impl Default for Command {
    fn default() -> Self {
        Self::Deploy(deploy::Args::default())
    }
}

pub async fn exec(cmd: Command, config: Option<&Path>) -> ArenaDeployResult {
    match cmd {
        Command::Constructor(args) => constructor::exec(args, config),
        Command::Deploy(args) => deploy::exec(args, config).await,
        Command::Networks(args) => networks::exec(args, config),
        Command::Publish(args) => publish::exec(args, config),
    }
}
