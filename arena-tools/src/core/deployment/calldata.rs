// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Creation code assembly.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{JsonAbi, StateMutability},
    primitives::{Bytes, U256},
};

use super::DeploymentError::{self, InvalidConstructor};

/// Creation bytecode followed by the ABI-encoded constructor arguments.
pub fn creation_code(
    bytecode: &[u8],
    abi: &JsonAbi,
    constructor_args: &[String],
    constructor_value: U256,
) -> Result<Bytes, DeploymentError> {
    let encoded_args = encode_constructor_args(abi, constructor_args, constructor_value)?;
    let mut code = Vec::with_capacity(bytecode.len() + encoded_args.len());
    code.extend_from_slice(bytecode);
    code.extend(encoded_args);
    Ok(code.into())
}

/// Parses constructor arguments against the constructor's input types and ABI-encodes them.
pub fn encode_constructor_args(
    abi: &JsonAbi,
    constructor_args: &[String],
    constructor_value: U256,
) -> Result<Vec<u8>, DeploymentError> {
    let Some(constructor) = abi.constructor() else {
        if !constructor_args.is_empty() {
            return Err(InvalidConstructor(format!(
                "contract has no constructor but {} argument(s) were given",
                constructor_args.len()
            )));
        }
        if !constructor_value.is_zero() {
            return Err(InvalidConstructor(
                "attempting to send Ether to a contract without a payable constructor".to_string(),
            ));
        }
        return Ok(Vec::new());
    };

    if constructor.state_mutability != StateMutability::Payable && !constructor_value.is_zero() {
        return Err(InvalidConstructor(
            "attempting to send Ether to non-payable constructor".to_string(),
        ));
    }
    if constructor_args.len() != constructor.inputs.len() {
        let expected = constructor
            .inputs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(InvalidConstructor(format!(
            "mismatch number of constructor arguments (want ({expected}); got {})",
            constructor_args.len(),
        )));
    }

    let mut arg_values = Vec::<DynSolValue>::with_capacity(constructor_args.len());
    for (arg, param) in constructor_args.iter().zip(constructor.inputs.iter()) {
        let ty = param.resolve().map_err(|err| {
            InvalidConstructor(format!("could not resolve constructor arg {param}: {err}"))
        })?;
        let value = ty.coerce_str(arg.trim()).map_err(|err| {
            InvalidConstructor(format!("could not parse constructor arg {param}: {err}"))
        })?;
        arg_values.push(value);
    }

    constructor
        .abi_encode_input_raw(&arg_values)
        .map_err(|err| InvalidConstructor(err.to_string()))
}
