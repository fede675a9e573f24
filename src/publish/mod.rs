//! Producer-side packaging and upload
//!
//! Bundles a module directory into a gzip-compressed tarball and pushes it
//! to a registry's upload endpoint. Packaging and upload are independent
//! steps; [`upload_dir`] composes them for the CLI.

pub mod archive;
pub mod error;
pub mod upload;

pub use archive::{ModuleArchive, package_dir};
pub use error::PublishError;
pub use upload::{upload_archive, upload_dir};
