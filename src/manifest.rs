// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! YAML manifest decoding into typed Kubernetes objects

use crate::error::{DeployError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Decode a YAML manifest file into a typed resource.
/// Every install step decodes its manifest fresh; nothing is cached across calls.
pub fn decode_manifest<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| DeployError::ManifestRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_yaml::from_str(&contents).map_err(|e| DeployError::Decode {
        path: path.to_path_buf(),
        source: e,
    })
}
