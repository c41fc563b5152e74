// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Discovery of the API groups, versions and resources a server offers

use crate::error::Result;
use futures::future::try_join;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    APIGroup, APIResourceList, GroupVersionForDiscovery,
};
use k8s_openapi::apimachinery::pkg::version::Info;
use kube::{Client, Config as KConfig};
use std::future::Future;
use tracing::{debug, instrument};

/// Read-only view of the server's discovery endpoints.
///
/// The legacy core API is reported as the group `""`.
pub trait ServerDiscovery: Send + Sync {
    fn server_groups(&self) -> impl Future<Output = Result<Vec<APIGroup>>> + Send;

    /// Resources served under `group_version` (`v1` or `<group>/<version>`)
    fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> impl Future<Output = Result<APIResourceList>> + Send;
}

/// Discovery client talking straight to the API server, without caching
#[derive(Clone)]
pub struct DiscoveryClient {
    client: Client,
}

impl DiscoveryClient {
    pub fn new(config: &KConfig) -> Result<Self> {
        let client = Client::try_from(config.clone())?;
        debug!("Discovery client created for {}", config.cluster_url);
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn server_version(&self) -> Result<Info> {
        Ok(self.client.apiserver_version().await?)
    }
}

impl ServerDiscovery for DiscoveryClient {
    #[instrument(skip(self))]
    async fn server_groups(&self) -> Result<Vec<APIGroup>> {
        let (core, named) = try_join(
            self.client.list_core_api_versions(),
            self.client.list_api_groups(),
        )
        .await?;

        let mut groups = Vec::with_capacity(named.groups.len() + 1);
        if !core.versions.is_empty() {
            groups.push(core_group(&core.versions));
        }
        groups.extend(named.groups);

        debug!("Discovered {} API groups", groups.len());
        Ok(groups)
    }

    #[instrument(skip(self))]
    async fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> Result<APIResourceList> {
        let list = if group_version.contains('/') {
            self.client.list_api_group_resources(group_version).await?
        } else {
            self.client.list_core_api_resources(group_version).await?
        };
        debug!(
            "Discovered {} resources in {}",
            list.resources.len(),
            group_version
        );
        Ok(list)
    }
}

fn core_group(versions: &[String]) -> APIGroup {
    let versions: Vec<_> = versions
        .iter()
        .map(|v| GroupVersionForDiscovery {
            group_version: v.clone(),
            version: v.clone(),
        })
        .collect();

    APIGroup {
        name: String::new(),
        preferred_version: versions.first().cloned(),
        versions,
        ..Default::default()
    }
}
