// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client bundle assembled from one resolved connection configuration.
//!
//! Construction runs as an ordered pipeline; each stage consumes the previous
//! one, so a failure anywhere leaves nothing half-built behind.

use crate::config::EnvConfig;
use crate::error::Result;
use crate::kubernetes::{
    cluster_host, resolve, typed_client, DeferredDiscoveryRestMapper, DiscoveryClient,
    DynamicClient, MemCacheDiscovery,
};
use kube::{Client, Config as KConfig};
use tracing::{debug, info, instrument};

pub type CachedRestMapper = DeferredDiscoveryRestMapper<MemCacheDiscovery<DiscoveryClient>>;

/// Every client handle needed to talk to one cluster
pub struct ClientBundle {
    pub config: KConfig,
    /// Client for built-in resource kinds
    pub client: Client,
    pub dynamic_client: DynamicClient,
    pub discovery_client: DiscoveryClient,
    pub rest_mapper: CachedRestMapper,
}

impl ClientBundle {
    /// Build a bundle from the process environment
    pub async fn new() -> Result<Self> {
        Self::from_env_config(&EnvConfig::from_env()).await
    }

    #[instrument(skip(env_config))]
    pub async fn from_env_config(env_config: &EnvConfig) -> Result<Self> {
        let bundle = ConfigResolved::resolve(env_config)
            .await?
            .typed_client()?
            .dynamic_client()?
            .discovery_client()?
            .rest_mapper();

        info!(host = %bundle.host(), "Kubernetes client bundle ready");
        Ok(bundle)
    }

    /// API server address as configured, e.g. `https://10.0.0.1:443`
    pub fn host(&self) -> String {
        cluster_host(&self.config)
    }
}

struct ConfigResolved {
    config: KConfig,
}

struct TypedClientReady {
    config: KConfig,
    client: Client,
}

struct DynamicClientReady {
    config: KConfig,
    client: Client,
    dynamic_client: DynamicClient,
}

struct DiscoveryClientReady {
    config: KConfig,
    client: Client,
    dynamic_client: DynamicClient,
    discovery_client: DiscoveryClient,
}

impl ConfigResolved {
    async fn resolve(env_config: &EnvConfig) -> Result<Self> {
        let config = resolve(env_config).await?;
        Ok(Self { config })
    }

    fn typed_client(self) -> Result<TypedClientReady> {
        let client = typed_client(&self.config)?;
        Ok(TypedClientReady {
            config: self.config,
            client,
        })
    }
}

impl TypedClientReady {
    fn dynamic_client(self) -> Result<DynamicClientReady> {
        let dynamic_client = DynamicClient::new(&self.config)?;
        Ok(DynamicClientReady {
            config: self.config,
            client: self.client,
            dynamic_client,
        })
    }
}

impl DynamicClientReady {
    fn discovery_client(self) -> Result<DiscoveryClientReady> {
        let discovery_client = DiscoveryClient::new(&self.config)?;
        Ok(DiscoveryClientReady {
            config: self.config,
            client: self.client,
            dynamic_client: self.dynamic_client,
            discovery_client,
        })
    }
}

impl DiscoveryClientReady {
    /// Always succeeds; the cache starts empty and nothing is fetched yet
    fn rest_mapper(self) -> ClientBundle {
        let cache = MemCacheDiscovery::new(self.discovery_client.clone());
        debug!("REST mapper created over an empty discovery cache");

        ClientBundle {
            config: self.config,
            client: self.client,
            dynamic_client: self.dynamic_client,
            discovery_client: self.discovery_client,
            rest_mapper: DeferredDiscoveryRestMapper::new(cache),
        }
    }
}
