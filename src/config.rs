// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env, service_account};
use std::ffi::OsString;
use std::path::PathBuf;

/// How the connection configuration will be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    /// Parse the kubeconfig file at this path
    Kubeconfig(PathBuf),
    /// Use the mounted service account of the current pod
    InCluster,
}

/// Cluster access inputs captured from the process environment
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub kubeconfig: Option<PathBuf>,
    pub service_host: Option<String>,
    pub service_port: Option<String>,
    /// Directory holding the service account token and CA bundle.
    /// Anything but the standard mount is only meant for tests.
    pub service_account_dir: PathBuf,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            service_host: None,
            service_port: None,
            service_account_dir: PathBuf::from(service_account::DIR),
        }
    }
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        Self {
            kubeconfig: lookup(env::KUBECONFIG).map(PathBuf::from),
            service_host: lookup(env::SERVICE_HOST).map(|v| v.to_string_lossy().into_owned()),
            service_port: lookup(env::SERVICE_PORT).map(|v| v.to_string_lossy().into_owned()),
            ..Self::default()
        }
    }

    pub fn with_service_account_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.service_account_dir = dir.into();
        self
    }

    /// Pick the connection source. Only presence of the variables matters here,
    /// an empty or bogus value still selects its path and fails later.
    pub fn source(&self) -> Option<ConnectionSource> {
        if let Some(path) = &self.kubeconfig {
            return Some(ConnectionSource::Kubeconfig(path.clone()));
        }
        if self.service_host.is_some() {
            return Some(ConnectionSource::InCluster);
        }
        None
    }
}
