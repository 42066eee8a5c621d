// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Operator manifest file names, resolved relative to the manifest directory
pub mod manifests {
    pub const DEPLOYMENT: &str = "metering-operator-deployment.yaml";
    pub const SERVICE_ACCOUNT: &str = "metering-operator-service-account.yaml";
    pub const ROLE: &str = "metering-operator-role.yaml";
    pub const ROLE_BINDING: &str = "metering-operator-rolebinding.yaml";
    pub const CLUSTER_ROLE: &str = "metering-operator-clusterrole.yaml";
    pub const CLUSTER_ROLE_BINDING: &str = "metering-operator-clusterrolebinding.yaml";
}

/// CRD manifest file names shipped alongside the operator manifests
pub mod crds {
    pub const METERING_CONFIG: &str = "meteringconfig.crd.yaml";
    pub const REPORT: &str = "report.crd.yaml";
    pub const REPORT_DATA_SOURCE: &str = "reportdatasource.crd.yaml";
    pub const REPORT_QUERY: &str = "reportquery.crd.yaml";
    pub const STORAGE_LOCATION: &str = "storagelocation.crd.yaml";
    pub const PRESTO_TABLE: &str = "prestotable.crd.yaml";
    pub const HIVE_TABLE: &str = "hivetable.crd.yaml";
}
