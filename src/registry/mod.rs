//! Module catalog services
//!
//! This module provides the registry core: the deterministic key scheme that
//! addresses artifacts in the object store, the catalog query services
//! (list, search, versions, download), and the error taxonomy shared by the
//! HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │     │   Backend   │────▶│ ObjectStore │
//! │ (in-memory) │     │ (storage)   │     │ (capability)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        └───────┬───────────┘
//!                ▼
//!         ┌─────────────┐
//!         │ModuleService│
//!         │   (trait)   │
//!         └─────────────┘
//! ```
//!
//! Both service implementations are chosen at process start; the storage
//! backend answers version and download queries from the object store via
//! the [`keys`] scheme, while the in-memory catalog serves list/search over
//! an injected module index.
//!
//! # Modules
//!
//! - [`backend`]: object-store-backed service (versions, downloads, uploads)
//! - [`catalog`]: in-memory catalog (list, search, pagination)
//! - [`error`]: error types for registry operations
//! - [`keys`]: storage key construction and parsing
//! - [`service`]: the `ModuleService` capability trait
//! - [`types`]: catalog value types

pub mod backend;
pub mod catalog;
pub mod error;
pub mod keys;
pub mod service;
pub mod types;

pub use backend::StorageModuleService;
pub use catalog::InMemoryCatalog;
pub use error::{KeyError, RegistryError};
pub use service::ModuleService;
pub use types::{CatalogPage, ListQuery, Module, ModuleDescriptor, PageMeta, SearchQuery};
