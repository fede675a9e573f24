//! Object-store-backed registry service
//!
//! Answers version, download, and upload requests directly from the object
//! store via the key scheme. Catalog browsing (list/search) needs a module
//! index this backend does not have, so those operations report
//! `Unsupported` through the normal error channel.

use std::sync::Arc;

use tracing::debug;

use crate::config::SIGNED_URL_TTL;
use crate::registry::error::RegistryError;
use crate::registry::keys;
use crate::registry::service::ModuleService;
use crate::registry::types::{CatalogPage, ListQuery, ModuleDescriptor, SearchQuery};
use crate::storage::ObjectStore;

pub struct StorageModuleService {
    store: Arc<dyn ObjectStore>,
}

impl StorageModuleService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ModuleService for StorageModuleService {
    async fn list(&self, _query: &ListQuery) -> Result<CatalogPage, RegistryError> {
        Err(RegistryError::Unsupported("list"))
    }

    async fn search(&self, _query: &SearchQuery) -> Result<CatalogPage, RegistryError> {
        Err(RegistryError::Unsupported("search"))
    }

    async fn versions(&self, descriptor: &ModuleDescriptor) -> Result<Vec<String>, RegistryError> {
        let prefix = keys::descriptor_prefix(descriptor);
        let stored_keys = self.store.list_prefix(&prefix).await?;

        // Storage may hold unrelated objects under the prefix; keys that do
        // not parse as artifact keys are skipped, never surfaced.
        Ok(stored_keys
            .iter()
            .filter_map(|key| match keys::parse_version(key, descriptor) {
                Ok(version) => Some(version),
                Err(err) => {
                    debug!("skipping unparseable object key: {err}");
                    None
                }
            })
            .collect())
    }

    async fn download_url(
        &self,
        descriptor: &ModuleDescriptor,
        version: &str,
    ) -> Result<String, RegistryError> {
        let key = keys::build_key(descriptor, version);
        Ok(self.store.signed_get_url(&key, SIGNED_URL_TTL).await?)
    }

    async fn upload(
        &self,
        descriptor: &ModuleDescriptor,
        version: &str,
        content: Vec<u8>,
    ) -> Result<(), RegistryError> {
        let key = keys::build_key(descriptor, version);
        Ok(self.store.put(&key, content).await?)
    }
}
