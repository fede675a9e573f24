//! Registry service trait implemented by catalog backends

#[cfg(test)]
use mockall::automock;

use crate::registry::error::RegistryError;
use crate::registry::types::{CatalogPage, ListQuery, ModuleDescriptor, SearchQuery};

/// Capability interface for serving module catalog queries.
///
/// One implementation is selected at process start: the in-memory catalog
/// serves list/search over an injected module index, the storage-backed
/// service answers version and download queries from the object store.
/// Implementations must be safe for concurrent use; none of the operations
/// mutate shared state.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ModuleService: Send + Sync {
    /// Lists published modules, applying the catalog filter and pagination.
    async fn list(&self, query: &ListQuery) -> Result<CatalogPage, RegistryError>;

    /// Searches published modules by exact-match free text.
    async fn search(&self, query: &SearchQuery) -> Result<CatalogPage, RegistryError>;

    /// Enumerates the published versions of one module family.
    ///
    /// # Returns
    /// * `Ok(versions)` - May be empty; absence of versions is not an error
    /// * `Err(RegistryError::StorageUnavailable)` - If the backend listing fails
    async fn versions(&self, descriptor: &ModuleDescriptor) -> Result<Vec<String>, RegistryError>;

    /// Issues a time-limited signed URL for one module version.
    ///
    /// Existence is not checked upfront; a URL for an unpublished version
    /// simply fails on fetch.
    async fn download_url(
        &self,
        descriptor: &ModuleDescriptor,
        version: &str,
    ) -> Result<String, RegistryError>;

    /// Stores an uploaded artifact at the key derived for this version.
    async fn upload(
        &self,
        descriptor: &ModuleDescriptor,
        version: &str,
        content: Vec<u8>,
    ) -> Result<(), RegistryError>;
}
