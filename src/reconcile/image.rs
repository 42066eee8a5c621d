// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Operator image override for the metering deployment

use k8s_openapi::api::apps::v1::Deployment;

/// Point every container in the deployment's pod template at `repo:tag`.
/// Callers only invoke this when both halves of the override are configured.
pub fn apply_image_override(deployment: &mut Deployment, repo: &str, tag: &str) {
    let image = format!("{}:{}", repo, tag);

    let containers = deployment
        .spec
        .as_mut()
        .and_then(|spec| spec.template.spec.as_mut())
        .map(|pod| &mut pod.containers);

    if let Some(containers) = containers {
        for container in containers.iter_mut() {
            container.image = Some(image.clone());
        }
    }
}
