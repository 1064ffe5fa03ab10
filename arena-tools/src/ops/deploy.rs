// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use crate::{
    core::{
        deployment::{
            self, AlloyConnector, Connector, DeploymentConfig, DeploymentRequest, GasEstimate,
        },
        manifest::Manifest,
        secrets::SecretProvider,
        workflow::{DeploymentPlan, Workflow, WorkflowReport},
    },
    error::Result,
    utils::{color::DebugColor, format_fee, format_gas},
};

/// Deploys the planned contract and publishes its address and interface.
pub async fn deploy(
    manifest: &Manifest,
    plan: &DeploymentPlan,
    config: DeploymentConfig,
    secrets: impl SecretProvider,
) -> Result<WorkflowReport> {
    let mut workflow = Workflow::builder()
        .registry(manifest.registry(secrets)?)
        .artifacts(manifest.artifact_store())
        .publisher(manifest.publisher())
        .connector(AlloyConnector)
        .config(config)
        .build();
    let report = workflow.run(plan).await?;

    greyln!(
        "wrote {} and {}",
        report.files.address_file.display(),
        report.files.interface_file.display()
    );
    Ok(report)
}

/// Estimates the gas a deployment would use, without sending anything.
pub async fn estimate(
    manifest: &Manifest,
    plan: &DeploymentPlan,
    config: DeploymentConfig,
    secrets: impl SecretProvider,
) -> Result<GasEstimate> {
    let profile = manifest.registry(secrets)?.resolve(&plan.network)?;
    let artifact = manifest.artifact_store().read(&plan.contract)?;
    let request = DeploymentRequest::new(
        artifact.contract_name.clone(),
        plan.constructor_args.clone(),
        profile,
    );
    let client = AlloyConnector
        .connect(request.target_network(), &config)
        .await?;
    let estimate = deployment::estimate(&request, &artifact, &config, &client).await?;

    greyln!(
        "deployment of {} on {}: {} at {} wei per gas",
        artifact.qualified_name(),
        request.target_network().name,
        format_gas(estimate.gas),
        estimate.gas_price.debug_lavender()
    );
    greyln!("estimated fee: {}", format_fee(estimate.fee()));
    Ok(estimate)
}
