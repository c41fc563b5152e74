// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kind to REST endpoint mapping backed by cached discovery

use crate::error::{KubiError, Result};
use crate::kubernetes::cache::CachedDiscovery;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;
use kube::{
    api::{ApiResource, DynamicObject},
    core::GroupVersionKind,
    discovery::Scope,
    Resource,
};
use std::future::Future;
use tracing::{debug, instrument};

/// Where and how a kind is served
#[derive(Debug, Clone, PartialEq)]
pub struct RestMapping {
    pub resource: ApiResource,
    pub scope: Scope,
    pub verbs: Vec<String>,
}

impl RestMapping {
    /// Collection path, e.g. `/apis/apps/v1/namespaces/default/deployments`.
    /// The namespace is dropped for cluster-scoped kinds.
    pub fn url_path(&self, namespace: Option<&str>) -> String {
        let namespace = match self.scope {
            Scope::Namespaced => namespace,
            Scope::Cluster => None,
        };
        DynamicObject::url_path(&self.resource, namespace)
    }

    pub fn is_namespaced(&self) -> bool {
        self.scope == Scope::Namespaced
    }

    pub fn supports(&self, verb: &str) -> bool {
        self.verbs.iter().any(|v| v == verb)
    }
}

pub trait RestMapper: Send + Sync {
    fn resolve(&self, gvk: &GroupVersionKind) -> impl Future<Output = Result<RestMapping>> + Send;
}

/// Mapper that defers all discovery to first use.
///
/// A miss answered from cached data invalidates the cache and is retried once,
/// so kinds registered after the cache was filled are still found.
pub struct DeferredDiscoveryRestMapper<C> {
    discovery: C,
}

impl<C: CachedDiscovery> DeferredDiscoveryRestMapper<C> {
    pub fn new(discovery: C) -> Self {
        Self { discovery }
    }

    pub fn discovery(&self) -> &C {
        &self.discovery
    }

    /// Forget everything learned from discovery so far
    pub async fn reset(&self) {
        self.discovery.invalidate().await;
    }

    /// Map a kind using the preferred version of its group
    #[instrument(skip(self))]
    pub async fn resolve_preferred(&self, group: &str, kind: &str) -> Result<RestMapping> {
        let version = match self.preferred_version(group).await? {
            Some(version) => version,
            None if !self.discovery.fresh() => {
                self.reset().await;
                self.preferred_version(group)
                    .await?
                    .ok_or_else(|| no_match(group, kind))?
            }
            None => return Err(no_match(group, kind)),
        };

        self.resolve(&GroupVersionKind::gvk(group, &version, kind)).await
    }

    async fn preferred_version(&self, group: &str) -> Result<Option<String>> {
        let groups = self.discovery.server_groups().await?;
        Ok(groups.into_iter().find(|g| g.name == group).and_then(|g| {
            g.preferred_version
                .or_else(|| g.versions.into_iter().next())
                .map(|v| v.version)
        }))
    }

    async fn lookup(&self, gvk: &GroupVersionKind) -> Result<Option<RestMapping>> {
        let groups = self.discovery.server_groups().await?;
        let served = groups.iter().any(|g| {
            g.name == gvk.group && g.versions.iter().any(|v| v.version == gvk.version)
        });
        if !served {
            return Ok(None);
        }

        let list = self
            .discovery
            .server_resources_for_group_version(&api_version(&gvk.group, &gvk.version))
            .await?;

        Ok(list
            .resources
            .iter()
            // subresources such as pods/log share the kind of their parent
            .find(|r| r.kind == gvk.kind && !r.name.contains('/'))
            .map(|r| mapping_for(gvk, r)))
    }
}

impl<C: CachedDiscovery> RestMapper for DeferredDiscoveryRestMapper<C> {
    #[instrument(skip(self), fields(group = %gvk.group, version = %gvk.version, kind = %gvk.kind))]
    async fn resolve(&self, gvk: &GroupVersionKind) -> Result<RestMapping> {
        if let Some(mapping) = self.lookup(gvk).await? {
            return Ok(mapping);
        }

        if !self.discovery.fresh() {
            debug!("No mapping in cached discovery, refreshing");
            self.reset().await;
            if let Some(mapping) = self.lookup(gvk).await? {
                return Ok(mapping);
            }
        }

        Err(no_match(&api_version(&gvk.group, &gvk.version), &gvk.kind))
    }
}

fn api_version(group: &str, version: &str) -> String {
    if group.is_empty() {
        version.to_string()
    } else {
        format!("{}/{}", group, version)
    }
}

fn mapping_for(gvk: &GroupVersionKind, resource: &APIResource) -> RestMapping {
    RestMapping {
        resource: ApiResource {
            group: gvk.group.clone(),
            version: gvk.version.clone(),
            api_version: api_version(&gvk.group, &gvk.version),
            kind: resource.kind.clone(),
            plural: resource.name.clone(),
        },
        scope: if resource.namespaced {
            Scope::Namespaced
        } else {
            Scope::Cluster
        },
        verbs: resource.verbs.clone(),
    }
}

fn no_match(api_version: &str, kind: &str) -> KubiError {
    KubiError::NoMatch {
        api_version: api_version.to_string(),
        kind: kind.to_string(),
    }
}
