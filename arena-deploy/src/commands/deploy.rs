// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::Path, time::Duration};

use alloy::primitives::{utils::parse_ether, U256};
use arena_tools::{core::secrets::EnvSecrets, ops};

use crate::{
    common_args::{PathArgs, TargetArgs},
    error::ArenaDeployResult,
    utils::convert_gwei_to_wei,
};

#[derive(Debug, Default, clap::Args)]
pub struct Args {
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// The constructor arguments [default: from the manifest]
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Vec<String>,
    /// The amount of Ether sent to the contract through the constructor.
    #[arg(long, value_parser = parse_ether, value_name = "ETH")]
    constructor_value: Option<U256>,
    /// Seconds to wait for the deployment to be confirmed [default: 300]
    #[arg(long, value_name = "SECS")]
    confirmation_timeout: Option<u64>,
    /// Blocks that must include the deployment before it counts as confirmed [default: 1]
    #[arg(long)]
    confirmations: Option<u64>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,

    #[command(flatten)]
    target: TargetArgs,
    #[command(flatten)]
    paths: PathArgs,
}

pub async fn exec(args: Args, config: Option<&Path>) -> ArenaDeployResult {
    let manifest = args.paths.manifest(config)?;
    let plan = args.target.plan(&manifest, &args.constructor_args);

    let mut deployment = manifest.deployment_config();
    if let Some(secs) = args.confirmation_timeout {
        deployment.confirmation_timeout = Duration::from_secs(secs);
    }
    if let Some(confirmations) = args.confirmations {
        deployment.confirmations = confirmations;
    }
    if let Some(value) = args.constructor_value {
        deployment.constructor_value = value;
    }
    if let Some(fee) = &args.max_fee_per_gas_gwei {
        deployment.max_fee_per_gas_wei = Some(convert_gwei_to_wei(fee)?);
    }

    if args.estimate_gas {
        ops::estimate(&manifest, &plan, deployment, EnvSecrets).await?;
    } else {
        ops::deploy(&manifest, &plan, deployment, EnvSecrets).await?;
    }
    Ok(())
}
