// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Identity rewriting for RBAC objects before they are compared or persisted.
//!
//! Role and binding names are prefixed with the target namespace so that
//! several installs sharing a cluster cannot collide on the cluster-scoped
//! objects. Each rewrite must be applied to the freshly decoded manifest
//! object; rewriting an already-rewritten object would stack prefixes.

use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding, Subject};
use kube::ResourceExt;

/// The effective name carried by namespaced-prefixed RBAC objects
pub fn prefixed_name(namespace: &str, name: &str) -> String {
    format!("{}-{}", namespace, name)
}

pub fn rewrite_role(mut role: Role, namespace: &str) -> Role {
    role.metadata.name = Some(prefixed_name(namespace, &role.name_any()));
    role.metadata.namespace = Some(namespace.to_string());
    role
}

/// Cluster-scoped, so only the name is rewritten; no namespace is ever set.
pub fn rewrite_cluster_role(mut role: ClusterRole, namespace: &str) -> ClusterRole {
    role.metadata.name = Some(prefixed_name(namespace, &role.name_any()));
    role
}

/// A binding always references the identically-renamed role, and every
/// subject is pinned to the target namespace; subject namespaces declared in
/// the manifest are never trusted.
pub fn rewrite_role_binding(mut binding: RoleBinding, namespace: &str) -> RoleBinding {
    let name = prefixed_name(namespace, &binding.name_any());
    binding.metadata.name = Some(name.clone());
    binding.metadata.namespace = Some(namespace.to_string());
    binding.role_ref.name = name;
    rewrite_subjects(binding.subjects.as_mut(), namespace);
    binding
}

pub fn rewrite_cluster_role_binding(
    mut binding: ClusterRoleBinding,
    namespace: &str,
) -> ClusterRoleBinding {
    let name = prefixed_name(namespace, &binding.name_any());
    binding.metadata.name = Some(name.clone());
    binding.role_ref.name = name;
    rewrite_subjects(binding.subjects.as_mut(), namespace);
    binding
}

fn rewrite_subjects(subjects: Option<&mut Vec<Subject>>, namespace: &str) {
    if let Some(subjects) = subjects {
        for subject in subjects {
            subject.namespace = Some(namespace.to_string());
        }
    }
}
