// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::core::GroupVersionKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kubi::kubernetes::RestMapper;
use kubi::ClientBundle;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bundle = ClientBundle::new().await?;
    info!("Using Kubernetes API server at {}", bundle.host());

    let version = bundle.discovery_client.server_version().await?;
    info!("Server version: {}", version.git_version);

    let mapping = bundle
        .rest_mapper
        .resolve(&GroupVersionKind::gvk("apps", "v1", "Deployment"))
        .await?;
    info!(
        "apps/v1 Deployment is served at {}",
        mapping.url_path(Some(&bundle.config.default_namespace))
    );

    Ok(())
}
