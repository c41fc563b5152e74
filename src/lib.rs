// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod bundle;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;

#[cfg(test)]
mod test_utils;

pub use bundle::ClientBundle;
pub use error::{KubiError, Result};
