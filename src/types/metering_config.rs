// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level configuration resource for a metering install.
///
/// The spec is an open-ended bag of values interpreted by the operator, not by
/// the installer; we only carry it verbatim between the manifest and the
/// cluster.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "metering.openshift.io", version = "v1", kind = "MeteringConfig")]
#[kube(namespaced)]
pub struct MeteringConfigSpec {
    #[serde(flatten)]
    pub values: BTreeMap<String, serde_json::Value>,
}
