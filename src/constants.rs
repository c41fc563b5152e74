// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables consulted when resolving cluster access
pub mod env {
    /// Path to a kubeconfig file; takes precedence over everything else
    pub const KUBECONFIG: &str = "KUBECONFIG";
    /// Injected into every pod; its presence selects the in-cluster path
    pub const SERVICE_HOST: &str = "KUBERNETES_SERVICE_HOST";
    pub const SERVICE_PORT: &str = "KUBERNETES_SERVICE_PORT";
}

/// Service account mount used by the in-cluster path
pub mod service_account {
    pub const DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";
    pub const TOKEN_FILE: &str = "token";
    pub const CA_FILE: &str = "ca.crt";
    pub const NAMESPACE_FILE: &str = "namespace";
}

/// Names used for the kubeconfig synthesized from the service account mount
pub mod in_cluster {
    pub const CLUSTER: &str = "in-cluster";
    pub const USER: &str = "service-account";
}
