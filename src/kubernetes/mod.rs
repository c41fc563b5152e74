// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes connection resolution, client construction, discovery and REST mapping.

pub mod cache;
pub mod client;
pub mod connection;
pub mod discovery;
pub mod incluster;
pub mod mapper;

pub use cache::{CachedDiscovery, MemCacheDiscovery};
pub use client::{typed_client, DynamicClient};
pub use connection::{cluster_host, resolve};
pub use discovery::{DiscoveryClient, ServerDiscovery};
pub use incluster::ServiceAccountError;
pub use mapper::{DeferredDiscoveryRestMapper, RestMapper, RestMapping};
