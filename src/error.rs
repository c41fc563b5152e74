// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::incluster::ServiceAccountError;
use kube::config::{InClusterError, KubeconfigError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubiError {
    /// `KUBECONFIG` was set but the file could not be read or parsed
    #[error(transparent)]
    ConfigFile(#[from] KubeconfigError),

    /// The pod's service account mount is missing or malformed
    #[error(transparent)]
    InCluster(#[from] InClusterError),

    /// A relocated service account directory is missing or malformed
    #[error(transparent)]
    ServiceAccount(#[from] ServiceAccountError),

    #[error("without kubernetes access: neither KUBECONFIG nor KUBERNETES_SERVICE_HOST is set")]
    NoAccess,

    #[error(transparent)]
    Kube(#[from] kube::Error),

    #[error("no matches for kind \"{kind}\" in version \"{api_version}\"")]
    NoMatch { api_version: String, kind: String },
}

pub type Result<T, E = KubiError> = std::result::Result<T, E>;
