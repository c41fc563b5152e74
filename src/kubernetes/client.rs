// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed and dynamic client construction

use crate::error::Result;
use crate::kubernetes::mapper::RestMapping;
use kube::{
    api::{ApiResource, DynamicObject},
    discovery::Scope,
    Api, Client, Config as KConfig,
};
use tracing::debug;

/// Create a client for the built-in resource kinds compiled into `k8s-openapi`.
///
/// No request is sent; an unreachable server only shows up on first use.
pub fn typed_client(config: &KConfig) -> Result<Client> {
    let client = Client::try_from(config.clone())?;
    debug!("Typed client created for {}", config.cluster_url);
    Ok(client)
}

/// Client for resources addressed by group/version/kind at runtime
#[derive(Clone)]
pub struct DynamicClient {
    client: Client,
}

impl DynamicClient {
    pub fn new(config: &KConfig) -> Result<Self> {
        let client = Client::try_from(config.clone())?;
        debug!("Dynamic client created for {}", config.cluster_url);
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one backed by a test service
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Api handle for a resolved mapping. The namespace is ignored for
    /// cluster-scoped kinds; `None` on a namespaced kind lists across all namespaces.
    pub fn api(&self, mapping: &RestMapping, namespace: Option<&str>) -> Api<DynamicObject> {
        match (&mapping.scope, namespace) {
            (Scope::Namespaced, Some(ns)) => {
                Api::namespaced_with(self.client.clone(), ns, &mapping.resource)
            }
            _ => Api::all_with(self.client.clone(), &mapping.resource),
        }
    }

    /// Api handle for a resource whose coordinates are already known
    pub fn api_for(&self, resource: &ApiResource, namespace: Option<&str>) -> Api<DynamicObject> {
        match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, resource),
            None => Api::all_with(self.client.clone(), resource),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
