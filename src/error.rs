// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode manifest {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to fetch {kind} {name}: {source}")]
    Fetch {
        kind: String,
        name: String,
        source: kube::Error,
    },

    #[error("Failed to create {kind} {name}: {source}")]
    Create {
        kind: String,
        name: String,
        source: kube::Error,
    },

    #[error("Failed to update {kind} {name}: {source}")]
    Update {
        kind: String,
        name: String,
        source: kube::Error,
    },
}

pub type Result<T> = std::result::Result<T, DeployError>;
