// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Installer configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace the metering resources are installed into
    pub namespace: String,
    /// Directory holding the operator manifests (deployment, rbac, CRDs)
    pub manifest_dir: PathBuf,
    /// Path to the MeteringConfig manifest
    pub metering_cr: PathBuf,
    /// Optional image repository override for the operator deployment
    pub image_repo: Option<String>,
    /// Optional image tag override for the operator deployment
    pub image_tag: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let namespace = env::var("METERING_NAMESPACE")
            .context("METERING_NAMESPACE environment variable not set")?;
        let manifest_dir: PathBuf = env::var("INSTALLER_MANIFESTS_DIR")
            .context("INSTALLER_MANIFESTS_DIR environment variable not set")?
            .into();
        let metering_cr: PathBuf = env::var("METERING_CR_FILE")
            .context("METERING_CR_FILE environment variable not set")?
            .into();
        // Both must be set for the override to take effect
        let image_repo = env::var("METERING_OPERATOR_IMAGE_REPO").ok();
        let image_tag = env::var("METERING_OPERATOR_IMAGE_TAG").ok();

        Ok(Config {
            namespace,
            manifest_dir,
            metering_cr,
            image_repo,
            image_tag,
        })
    }
}
