// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::info;

use metering_deploy::config::Config;
use metering_deploy::install::{default_crds, Deployer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting metering install");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: namespace={}, manifests={}",
        config.namespace,
        config.manifest_dir.display()
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let crds = default_crds(&config.manifest_dir);
    let deployer = Deployer::new(client, config, crds);

    deployer.install().await?;

    info!("Metering install finished");
    Ok(())
}
