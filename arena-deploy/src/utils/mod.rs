// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt::Display;

use eyre::bail;

use style::{BOLD, DIM, ERROR};

mod style;

pub fn convert_gwei_to_wei(fee_str: &str) -> eyre::Result<u128> {
    let gwei = match fee_str.parse::<f64>() {
        Ok(fee) if fee >= 0.0 => fee,
        Ok(_) => bail!("max fee per gas must be non-negative"),
        Err(_) => bail!("invalid max fee per gas value: {}", fee_str),
    };
    if !gwei.is_finite() {
        bail!("invalid gwei value: must be finite");
    }

    let wei = gwei * 1e9;
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        bail!("--max-fee-per-gas-gwei is outside the valid range for wei");
    }
    Ok(wei as u128)
}

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}

/// Prints `label: value` with the label dimmed.
pub fn print_field(label: &str, value: impl Display) {
    println!("  {DIM}{label}:{DIM:#} {value}");
}
