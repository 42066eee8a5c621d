// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic get-or-create-or-update reconciliation of a single resource.

use crate::error::{DeployError, Result};
use kube::{api::PostParams, Api, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::debug;

pub mod identity;
pub mod image;

pub use identity::{
    rewrite_cluster_role, rewrite_cluster_role_binding, rewrite_role, rewrite_role_binding,
};
pub use image::apply_image_override;

/// What reconciling a single resource did to the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created,
    Updated,
    Unchanged,
}

/// How a resource that already exists in the cluster is handled.
pub enum Mutability<K> {
    /// Copy the desired object's mutable subset onto the fetched one and
    /// replace it. The fetched object's identity and resourceVersion survive.
    Replace(fn(desired: &K, live: &mut K)),
    /// Leave the existing object untouched. Used for identity and permission
    /// objects where a blind overwrite could clobber grants made after install.
    CreateOnce,
}

/// Bring one resource to its declared state.
///
/// A 404 on the initial get is the signal to create; any other get error is
/// surfaced as-is. Nothing here retries: transient control-plane failures are
/// the caller's problem, and re-running the whole install is the recovery path.
pub async fn reconcile<K>(
    api: &Api<K>,
    desired: &K,
    mutability: Mutability<K>,
) -> Result<ReconcileOutcome>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Serialize + Debug,
{
    let kind = K::kind(&());
    let name = desired.name_any();

    match api.get(&name).await {
        Ok(live) => match mutability {
            Mutability::CreateOnce => {
                debug!("{} {} already exists, leaving it untouched", kind, name);
                Ok(ReconcileOutcome::Unchanged)
            }
            Mutability::Replace(copy_mutable) => {
                let mut live = live;
                copy_mutable(desired, &mut live);
                api.replace(&name, &PostParams::default(), &live)
                    .await
                    .map_err(|e| DeployError::Update {
                        kind: kind.to_string(),
                        name: name.clone(),
                        source: e,
                    })?;
                Ok(ReconcileOutcome::Updated)
            }
        },
        Err(kube::Error::Api(err)) if err.code == 404 => {
            api.create(&PostParams::default(), desired)
                .await
                .map_err(|e| DeployError::Create {
                    kind: kind.to_string(),
                    name: name.clone(),
                    source: e,
                })?;
            Ok(ReconcileOutcome::Created)
        }
        Err(e) => Err(DeployError::Fetch {
            kind: kind.to_string(),
            name,
            source: e,
        }),
    }
}
