//! In-memory module catalog
//!
//! Reference implementation of [`ModuleService`] over an injected,
//! read-only module index. List and search reproduce the registry
//! protocol's observable behavior exactly, including its disjunctive
//! filter semantics and the pagination metadata asymmetry between the two
//! operations. Do not "fix" either without checking wire compatibility.

use crate::config::PAGE_LIMIT_CAP;
use crate::registry::error::RegistryError;
use crate::registry::service::ModuleService;
use crate::registry::types::{
    CatalogPage, ListQuery, Module, ModuleDescriptor, PageMeta, SearchQuery,
};

/// In-memory catalog over a module list fixed at construction.
///
/// The index is never mutated after construction, so concurrent reads need
/// no synchronization. Download and upload are not supported by this
/// backend.
pub struct InMemoryCatalog {
    modules: Vec<Module>,
}

impl InMemoryCatalog {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    fn total(&self) -> i64 {
        self.modules.len() as i64
    }

    /// Takes `limit` items starting at `offset`, clamped to the available
    /// length. An out-of-range offset yields an empty page, not an error.
    fn page_slice(filtered: Vec<&Module>, offset: i64, limit: i64) -> Vec<Module> {
        let start = (offset.max(0) as usize).min(filtered.len());
        let end = (start + limit.max(0) as usize).min(filtered.len());
        filtered[start..end].iter().map(|m| (*m).clone()).collect()
    }
}

/// The catalog filter is disjunctive: a module passes if the provider
/// filter is set and matches, or the namespace filter is set and matches,
/// or neither filter is set.
fn matches_filters(module: &Module, provider: Option<&str>, namespace: Option<&str>) -> bool {
    provider.is_some_and(|p| module.provider == p)
        || namespace.is_some_and(|n| module.namespace == n)
        || (provider.is_none() && namespace.is_none())
}

#[async_trait::async_trait]
impl ModuleService for InMemoryCatalog {
    async fn list(&self, query: &ListQuery) -> Result<CatalogPage, RegistryError> {
        let total = self.total();
        let limit = query.limit.clamp(0, PAGE_LIMIT_CAP);
        let offset = query.offset.clamp(0, total);

        let filtered: Vec<&Module> = self
            .modules
            .iter()
            .filter(|m| matches_filters(m, query.provider.as_deref(), query.namespace.as_deref()))
            .collect();
        let modules = Self::page_slice(filtered, offset, limit);

        Ok(CatalogPage {
            meta: PageMeta {
                limit,
                current_offset: offset,
                next_offset: (offset + limit).clamp(0, total),
                prev_offset: Some((offset - limit).clamp(0, total)),
            },
            modules,
        })
    }

    async fn search(&self, query: &SearchQuery) -> Result<CatalogPage, RegistryError> {
        let total = self.total();
        let limit = query.limit.clamp(0, PAGE_LIMIT_CAP);
        let offset = query.offset.clamp(0, total);

        // Free-text matching is exact equality against each scalar field,
        // OR-ed with the provider and namespace filters.
        let q = query.q.as_str();
        let filtered: Vec<&Module> = self
            .modules
            .iter()
            .filter(|m| {
                m.id == q
                    || m.owner == q
                    || m.namespace == q
                    || m.name == q
                    || m.version == q
                    || m.provider == q
                    || m.description == q
                    || m.source == q
                    || query.provider.as_deref().is_some_and(|p| m.provider == p)
                    || query.namespace.as_deref().is_some_and(|n| m.namespace == n)
            })
            .collect();
        let modules = Self::page_slice(filtered, offset, limit);

        // Search never computes prev_offset.
        Ok(CatalogPage {
            meta: PageMeta {
                limit,
                current_offset: offset,
                next_offset: (offset + limit).clamp(0, total),
                prev_offset: None,
            },
            modules,
        })
    }

    async fn versions(&self, descriptor: &ModuleDescriptor) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .modules
            .iter()
            .filter(|m| {
                m.namespace == descriptor.namespace
                    && m.name == descriptor.name
                    && m.provider == descriptor.system
            })
            .map(|m| m.version.clone())
            .collect())
    }

    async fn download_url(
        &self,
        _descriptor: &ModuleDescriptor,
        _version: &str,
    ) -> Result<String, RegistryError> {
        Err(RegistryError::Unsupported("download_url"))
    }

    async fn upload(
        &self,
        _descriptor: &ModuleDescriptor,
        _version: &str,
        _content: Vec<u8>,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Unsupported("upload"))
    }
}
