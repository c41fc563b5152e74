// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Connection configuration from a pod's mounted service account.
//!
//! The standard mount is loaded by kube itself. A service account directory
//! elsewhere (fixtures in tests) goes through [`load_from_dir`], which builds
//! the same configuration from that directory.

use crate::config::EnvConfig;
use crate::constants::{env, in_cluster, service_account};
use crate::error::Result;
use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
use kube::Config as KConfig;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// Failures of the service account loader for a relocated mount
#[derive(Error, Debug)]
pub enum ServiceAccountError {
    #[error("failed to read an in-cluster environment variable: {0} is not set")]
    MissingEnvironmentVariable(&'static str),

    #[error("failed to parse cluster port {port:?}: {source}")]
    ParseClusterPort {
        port: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to read service account token {path:?}: {source}")]
    ReadToken {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("service account token {0:?} is empty")]
    EmptyToken(PathBuf),

    #[error("failed to read certificate bundle {path:?}: {source}")]
    ReadCertificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("certificate bundle {0:?} holds no certificates")]
    NoCertificates(PathBuf),

    #[error("failed to assemble service account kubeconfig: {0}")]
    Kubeconfig(#[source] serde_json::Error),

    #[error("failed to build in-cluster config: {0}")]
    Config(#[source] KubeconfigError),
}

/// Build the connection configuration for the current pod.
///
/// On the standard mount this is `kube::Config::incluster_env()`, whose errors
/// surface unchanged as [`KubiError::InCluster`](crate::KubiError::InCluster).
pub async fn load(env_config: &EnvConfig) -> Result<KConfig> {
    if env_config.service_account_dir == Path::new(service_account::DIR) {
        debug!("Using the pod's service account mount");
        return Ok(KConfig::incluster_env()?);
    }
    Ok(load_from_dir(env_config).await?)
}

/// Build the connection configuration from a service account directory.
///
/// The token is handed to the client as a file so rotated tokens are picked up.
#[instrument(skip(env_config), fields(dir = %env_config.service_account_dir.display()))]
pub async fn load_from_dir(env_config: &EnvConfig) -> Result<KConfig, ServiceAccountError> {
    let server = cluster_url(env_config)?;
    let dir = &env_config.service_account_dir;

    let token_path = dir.join(service_account::TOKEN_FILE);
    let token =
        std::fs::read_to_string(&token_path).map_err(|source| ServiceAccountError::ReadToken {
            path: token_path.clone(),
            source,
        })?;
    if token.trim().is_empty() {
        return Err(ServiceAccountError::EmptyToken(token_path));
    }

    let ca_path = dir.join(service_account::CA_FILE);
    std::fs::File::open(&ca_path).map_err(|source| ServiceAccountError::ReadCertificate {
        path: ca_path.clone(),
        source,
    })?;

    let namespace = read_namespace(dir);
    debug!(%server, ?namespace, "Using service account credentials");

    let kubeconfig = service_account_kubeconfig(&server, &token_path, &ca_path, namespace)
        .map_err(ServiceAccountError::Kubeconfig)?;

    let config = KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(ServiceAccountError::Config)?;

    // kube skips PEM blocks it cannot use, so a bogus ca.crt yields an empty bundle
    if config.root_cert.as_ref().map_or(true, Vec::is_empty) {
        return Err(ServiceAccountError::NoCertificates(ca_path));
    }
    Ok(config)
}

/// `https://<host>:<port>` from the service variables
pub fn cluster_url(env_config: &EnvConfig) -> Result<String, ServiceAccountError> {
    let host = env_config
        .service_host
        .as_deref()
        .ok_or(ServiceAccountError::MissingEnvironmentVariable(env::SERVICE_HOST))?;
    let port = env_config
        .service_port
        .as_deref()
        .ok_or(ServiceAccountError::MissingEnvironmentVariable(env::SERVICE_PORT))?;

    let port: u16 = port
        .trim()
        .parse()
        .map_err(|source| ServiceAccountError::ParseClusterPort {
            port: port.to_string(),
            source,
        })?;

    Ok(format!("https://{}:{}", bracket_ipv6(host), port))
}

fn bracket_ipv6(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

fn read_namespace(dir: &Path) -> Option<String> {
    std::fs::read_to_string(dir.join(service_account::NAMESPACE_FILE))
        .ok()
        .map(|ns| ns.trim().to_string())
        .filter(|ns| !ns.is_empty())
}

fn service_account_kubeconfig(
    server: &str,
    token_path: &Path,
    ca_path: &Path,
    namespace: Option<String>,
) -> Result<Kubeconfig, serde_json::Error> {
    let document = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Config",
        "clusters": [{
            "name": in_cluster::CLUSTER,
            "cluster": {
                "server": server,
                "certificate-authority": ca_path.to_string_lossy(),
            }
        }],
        "users": [{
            "name": in_cluster::USER,
            "user": { "tokenFile": token_path.to_string_lossy() }
        }],
        "contexts": [{
            "name": in_cluster::CLUSTER,
            "context": {
                "cluster": in_cluster::CLUSTER,
                "user": in_cluster::USER,
                "namespace": namespace,
            }
        }],
        "current-context": in_cluster::CLUSTER,
    });

    serde_json::from_value(document)
}
