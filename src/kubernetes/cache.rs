// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache in front of a discovery client

use crate::error::Result;
use crate::kubernetes::discovery::ServerDiscovery;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIGroup, APIResourceList};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Discovery source whose answers may be stale
pub trait CachedDiscovery: ServerDiscovery {
    /// True while the cached data was fetched and has not been served from cache yet
    fn fresh(&self) -> bool;

    /// Drop everything so the next call goes to the server again
    fn invalidate(&self) -> impl Future<Output = ()> + Send;
}

#[derive(Default)]
struct CacheState {
    groups: Option<Vec<APIGroup>>,
    resources: HashMap<String, APIResourceList>,
}

/// Caches discovery answers for the lifetime of the value. Failed lookups are not cached.
pub struct MemCacheDiscovery<D> {
    delegate: D,
    state: RwLock<CacheState>,
    fresh: AtomicBool,
}

impl<D: ServerDiscovery> MemCacheDiscovery<D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            state: RwLock::new(CacheState::default()),
            fresh: AtomicBool::new(false),
        }
    }
}

impl<D: ServerDiscovery> ServerDiscovery for MemCacheDiscovery<D> {
    async fn server_groups(&self) -> Result<Vec<APIGroup>> {
        let cached = self.state.read().await.groups.clone();
        if let Some(groups) = cached {
            self.fresh.store(false, Ordering::SeqCst);
            return Ok(groups);
        }

        let groups = self.delegate.server_groups().await?;
        self.state.write().await.groups = Some(groups.clone());
        self.fresh.store(true, Ordering::SeqCst);
        Ok(groups)
    }

    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList> {
        let cached = self.state.read().await.resources.get(group_version).cloned();
        if let Some(list) = cached {
            self.fresh.store(false, Ordering::SeqCst);
            return Ok(list);
        }

        let list = self
            .delegate
            .server_resources_for_group_version(group_version)
            .await?;
        self.state
            .write()
            .await
            .resources
            .insert(group_version.to_string(), list.clone());
        self.fresh.store(true, Ordering::SeqCst);
        Ok(list)
    }
}

impl<D: ServerDiscovery> CachedDiscovery for MemCacheDiscovery<D> {
    fn fresh(&self) -> bool {
        self.fresh.load(Ordering::SeqCst)
    }

    async fn invalidate(&self) {
        debug!("Invalidating discovery cache");
        *self.state.write().await = CacheState::default();
        self.fresh.store(false, Ordering::SeqCst);
    }
}
