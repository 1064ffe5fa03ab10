// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::json_abi::{Constructor, StateMutability};

use crate::{core::manifest::Manifest, error::Result};

/// Prints the constructor signature of a contract, if it has one.
pub fn print_constructor(manifest: &Manifest, contract: &str) -> Result<()> {
    let artifact = manifest.artifact_store().read(contract)?;
    match &artifact.abi.constructor {
        Some(constructor) => println!("{}", constructor_signature(constructor)),
        None => greyln!("{} has no constructor", artifact.qualified_name()),
    }
    Ok(())
}

/// Formats a constructor the way it is declared, e.g. `constructor(uint256 id) payable`.
pub fn constructor_signature(constructor: &Constructor) -> String {
    let inputs = constructor
        .inputs
        .iter()
        .map(|param| {
            if param.name.is_empty() {
                param.selector_type().into_owned()
            } else {
                format!("{} {}", param.selector_type(), param.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    match constructor.state_mutability {
        StateMutability::Payable => format!("constructor({inputs}) payable"),
        _ => format!("constructor({inputs})"),
    }
}
