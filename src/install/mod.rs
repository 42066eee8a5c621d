// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ordered installation of the metering resources.
//!
//! The deployer runs each step to completion before starting the next and
//! aborts on the first failure. Nothing is rolled back: a re-run finds the
//! already-created resources and handles them per their mutability class, so
//! re-invoking the install is the recovery path.

use crate::config::Config;
use crate::constants::{crds, manifests};
use crate::error::Result;
use crate::manifest::decode_manifest;
use crate::reconcile::{
    apply_image_override, reconcile, rewrite_cluster_role, rewrite_cluster_role_binding,
    rewrite_role, rewrite_role_binding, Mutability, ReconcileOutcome,
};
use crate::types::MeteringConfig;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, ServiceAccount};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{api::ObjectMeta, Api, Client, ResourceExt};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// A CRD manifest to install, named for logging and error reporting
#[derive(Debug, Clone)]
pub struct CrdManifest {
    pub name: String,
    pub path: PathBuf,
}

impl CrdManifest {
    pub fn new(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
        }
    }
}

/// The CRD set shipped with the operator manifests
pub fn default_crds(manifest_dir: &Path) -> Vec<CrdManifest> {
    [
        ("meteringconfigs.metering.openshift.io", crds::METERING_CONFIG),
        ("reports.metering.openshift.io", crds::REPORT),
        ("reportdatasources.metering.openshift.io", crds::REPORT_DATA_SOURCE),
        ("reportqueries.metering.openshift.io", crds::REPORT_QUERY),
        ("storagelocations.metering.openshift.io", crds::STORAGE_LOCATION),
        ("prestotables.metering.openshift.io", crds::PRESTO_TABLE),
        ("hivetables.metering.openshift.io", crds::HIVE_TABLE),
    ]
    .into_iter()
    .map(|(name, file)| CrdManifest::new(name, manifest_dir.join(file)))
    .collect()
}

pub struct Deployer {
    client: Client,
    config: Config,
    crds: Vec<CrdManifest>,
}

impl Deployer {
    pub fn new(client: Client, config: Config, crds: Vec<CrdManifest>) -> Self {
        Self {
            client,
            config,
            crds,
        }
    }

    /// Run the full ordered install. The role must exist before its binding is
    /// created, and cluster-scoped resources come after their namespaced
    /// counterparts.
    #[instrument(skip(self), fields(namespace = %self.config.namespace))]
    pub async fn install(&self) -> Result<()> {
        self.install_namespace().await?;
        self.install_crds().await?;
        self.install_metering_config().await?;
        self.install_operator_deployment().await?;
        self.install_service_account().await?;
        self.install_role().await?;
        self.install_role_binding().await?;
        self.install_cluster_role().await?;
        self.install_cluster_role_binding().await?;
        Ok(())
    }

    pub async fn install_namespace(&self) -> Result<()> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let desired = Namespace {
            metadata: ObjectMeta {
                name: Some(self.config.namespace.clone()),
                ..Default::default()
            },
            ..Default::default()
        };

        let outcome = reconcile(
            &namespaces,
            &desired,
            Mutability::Replace(|d, live| live.spec = d.spec.clone()),
        )
        .await?;
        log_outcome(outcome, "namespace", &self.config.namespace);
        Ok(())
    }

    pub async fn install_crds(&self) -> Result<()> {
        for crd in &self.crds {
            self.install_crd(crd).await?;
        }
        Ok(())
    }

    async fn install_crd(&self, crd: &CrdManifest) -> Result<()> {
        let desired: CustomResourceDefinition = decode_manifest(&crd.path)?;
        let api: Api<CustomResourceDefinition> = Api::all(self.client.clone());

        let outcome = reconcile(
            &api,
            &desired,
            Mutability::Replace(|d, live| live.spec = d.spec.clone()),
        )
        .await?;
        log_outcome(outcome, "CRD", &crd.name);
        Ok(())
    }

    pub async fn install_metering_config(&self) -> Result<()> {
        let mut desired: MeteringConfig = decode_manifest(&self.config.metering_cr)?;
        desired.metadata.namespace = Some(self.config.namespace.clone());
        let api: Api<MeteringConfig> =
            Api::namespaced(self.client.clone(), &self.config.namespace);

        let outcome = reconcile(
            &api,
            &desired,
            Mutability::Replace(|d, live| live.spec = d.spec.clone()),
        )
        .await?;
        log_outcome(outcome, "MeteringConfig", &desired.name_any());
        Ok(())
    }

    pub async fn install_operator_deployment(&self) -> Result<()> {
        let path = self.config.manifest_dir.join(manifests::DEPLOYMENT);
        let mut desired: Deployment = decode_manifest(&path)?;

        if let (Some(repo), Some(tag)) = (&self.config.image_repo, &self.config.image_tag) {
            info!("Overriding the operator image with {}:{}", repo, tag);
            apply_image_override(&mut desired, repo, tag);
        }

        desired.metadata.namespace = Some(self.config.namespace.clone());
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), &self.config.namespace);

        let outcome = reconcile(
            &api,
            &desired,
            Mutability::Replace(|d, live| live.spec = d.spec.clone()),
        )
        .await?;
        log_outcome(outcome, "deployment", &desired.name_any());
        Ok(())
    }

    pub async fn install_service_account(&self) -> Result<()> {
        let path = self.config.manifest_dir.join(manifests::SERVICE_ACCOUNT);
        let mut desired: ServiceAccount = decode_manifest(&path)?;
        desired.metadata.namespace = Some(self.config.namespace.clone());
        let api: Api<ServiceAccount> =
            Api::namespaced(self.client.clone(), &self.config.namespace);

        let outcome = reconcile(&api, &desired, Mutability::CreateOnce).await?;
        log_outcome(outcome, "service account", &desired.name_any());
        Ok(())
    }

    pub async fn install_role(&self) -> Result<()> {
        let path = self.config.manifest_dir.join(manifests::ROLE);
        let desired = rewrite_role(decode_manifest(&path)?, &self.config.namespace);
        let api: Api<Role> = Api::namespaced(self.client.clone(), &self.config.namespace);

        let outcome = reconcile(&api, &desired, Mutability::CreateOnce).await?;
        log_outcome(outcome, "role", &desired.name_any());
        Ok(())
    }

    pub async fn install_role_binding(&self) -> Result<()> {
        let path = self.config.manifest_dir.join(manifests::ROLE_BINDING);
        let desired = rewrite_role_binding(decode_manifest(&path)?, &self.config.namespace);
        let api: Api<RoleBinding> =
            Api::namespaced(self.client.clone(), &self.config.namespace);

        let outcome = reconcile(&api, &desired, Mutability::CreateOnce).await?;
        log_outcome(outcome, "role binding", &desired.name_any());
        Ok(())
    }

    pub async fn install_cluster_role(&self) -> Result<()> {
        let path = self.config.manifest_dir.join(manifests::CLUSTER_ROLE);
        let desired = rewrite_cluster_role(decode_manifest(&path)?, &self.config.namespace);
        let api: Api<ClusterRole> = Api::all(self.client.clone());

        let outcome = reconcile(&api, &desired, Mutability::CreateOnce).await?;
        log_outcome(outcome, "cluster role", &desired.name_any());
        Ok(())
    }

    pub async fn install_cluster_role_binding(&self) -> Result<()> {
        let path = self.config.manifest_dir.join(manifests::CLUSTER_ROLE_BINDING);
        let desired =
            rewrite_cluster_role_binding(decode_manifest(&path)?, &self.config.namespace);
        let api: Api<ClusterRoleBinding> = Api::all(self.client.clone());

        let outcome = reconcile(&api, &desired, Mutability::CreateOnce).await?;
        log_outcome(outcome, "cluster role binding", &desired.name_any());
        Ok(())
    }
}

fn log_outcome(outcome: ReconcileOutcome, kind: &str, name: &str) {
    match outcome {
        ReconcileOutcome::Created => info!("Created the {} {}", kind, name),
        ReconcileOutcome::Updated => info!("Updated the {} {}", kind, name),
        ReconcileOutcome::Unchanged => info!("The {} {} already exists", kind, name),
    }
}
