//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.
//! Filesystem state reaches the domain only through the [`PathProbe`] seam.

pub mod category;
pub mod classify;
pub mod config;
pub mod error;
pub mod path;
pub mod reconcile;
pub mod registry;
pub mod report;

pub use category::{CATEGORIES, categories_of};
pub use classify::{ADVANCED_SERVERS, HealthVerdict, PathProbe, classify, is_placeholder};
pub use config::{DoctorConfig, validate_config_key, validate_config_value};
pub use error::{ConfigError, ReconcileError, RegistryError};
pub use path::normalize;
pub use reconcile::{Reconciliation, reconcile};
pub use registry::{EntryDescriptor, Launch, LaunchKind, Registry};
pub use report::{EntryVerdict, aggregate};

/// Lowercase hex encoding of a byte slice.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
