//! Terraform-compatible module registry
//!
//! Serves the module registry protocol (discovery, list, search, versions,
//! download) over HTTP and provides a producer-side path for packaging a
//! module directory and pushing it to a registry.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │    http     │────▶│   registry   │────▶│   storage   │
//! │  (handlers) │     │  (services)  │     │ (ObjectStore)│
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            ▲
//!                            │ POST /upload
//!                     ┌──────────────┐
//!                     │   publish    │
//!                     │ (tar + push) │
//!                     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: module catalog services, key scheme, and error taxonomy
//! - [`storage`]: object-store capability and the in-memory reference store
//! - [`http`]: axum router and wire-level request handlers
//! - [`publish`]: producer-side archiving and upload client
//! - [`config`]: shared constants and server configuration

pub mod config;
pub mod http;
pub mod publish;
pub mod registry;
pub mod storage;
