//! # bootcfg-store
//!
//! Storage for a network boot service: machine **groups**, boot **profiles**
//! and raw **templates** (ignition and cloud-config).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Callers (boot/provisioning service, bootcfg CLI)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  dyn Store
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  FileStore / MemStore (store/)                              │
//! │  - GroupRegistry: immutable, built from StoreConfig         │
//! │  - profiles/<id>.json: validated on write and on read       │
//! │  - ignition/<name>, cloud/<name>: returned verbatim         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Dir (store/dir.rs): root-confined read/list/write          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The library never prints. It emits `tracing` events and leaves installing
//! a subscriber to the binary.
//!
//! ## Module Overview
//!
//! - [`model`]: `Group`, `Profile` and their validity predicates.
//! - [`store`]: the `Store` trait and its backends.
//! - [`config`]: `StoreConfig` and the `bootcfg.toml` loader.
//! - [`error`]: `StoreError`.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::{BootcfgConfig, StoreConfig};
pub use error::{Result, StoreError, ValidationError};
pub use model::{Group, NetBoot, Profile};
pub use store::file::{FileStore, ProfileScan};
pub use store::memory::MemStore;
pub use store::{Store, TemplateKind};
