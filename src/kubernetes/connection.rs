// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Connection configuration resolution

use crate::config::{ConnectionSource, EnvConfig};
use crate::error::{KubiError, Result};
use crate::kubernetes::incluster;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config as KConfig;
use std::path::Path;
use tracing::{info, instrument};

/// Resolve how to reach the API server.
///
/// Exactly one path is taken: the kubeconfig file when `KUBECONFIG` is set,
/// the service account mount when `KUBERNETES_SERVICE_HOST` is set, otherwise
/// [`KubiError::NoAccess`]. Errors from either path are returned untouched.
#[instrument(skip(env_config))]
pub async fn resolve(env_config: &EnvConfig) -> Result<KConfig> {
    let config = match env_config.source() {
        Some(ConnectionSource::Kubeconfig(path)) => from_kubeconfig_file(&path).await?,
        Some(ConnectionSource::InCluster) => incluster::load(env_config).await?,
        None => return Err(KubiError::NoAccess),
    };

    info!(host = %cluster_host(&config), "Resolved connection configuration");
    Ok(config)
}

async fn from_kubeconfig_file(path: &Path) -> Result<KConfig> {
    info!("Loading kubeconfig from {}", path.display());

    let kubeconfig = Kubeconfig::read_from(path)?;
    let config = KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
    Ok(config)
}

/// Server address as written in the configuration, proxy path included.
///
/// Only the lone `/` that `http::Uri` renders for an empty path is dropped.
pub fn cluster_host(config: &KConfig) -> String {
    let url = &config.cluster_url;
    let rendered = url.to_string();
    if url.path() == "/" && url.query().is_none() {
        rendered.trim_end_matches('/').to_string()
    } else {
        rendered
    }
}
