//! Catalog value types shared across service implementations

use serde::{Deserialize, Serialize};

/// Identifies a module family independent of version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleDescriptor {
    pub namespace: String,
    pub name: String,
    pub system: String,
}

impl ModuleDescriptor {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        system: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            system: system.into(),
        }
    }
}

/// One published module version.
///
/// Created when a version is published and never mutated afterwards. The
/// `id` is conventionally `namespace/name/provider/version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub owner: String,
    pub namespace: String,
    pub name: String,
    pub version: String,
    pub provider: String,
    pub description: String,
    pub source: String,
    pub published_at: String,
}

/// Parameters for a catalog list request.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub limit: i64,
    pub offset: i64,
    pub provider: Option<String>,
    pub namespace: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: crate::config::DEFAULT_PAGE_LIMIT,
            offset: 0,
            provider: None,
            namespace: None,
        }
    }
}

/// Parameters for a catalog search request.
///
/// The free-text term is required; the HTTP boundary rejects requests
/// without one before the catalog is consulted.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub q: String,
    pub limit: i64,
    pub offset: i64,
    pub provider: Option<String>,
    pub namespace: Option<String>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            limit: crate::config::DEFAULT_PAGE_LIMIT,
            offset: 0,
            provider: None,
            namespace: None,
        }
    }
}

/// Pagination metadata for a catalog page.
///
/// `prev_offset` is `None` for search results: the search path never
/// computes one. The wire layer additionally omits zero-valued offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub limit: i64,
    pub current_offset: i64,
    pub next_offset: i64,
    pub prev_offset: Option<i64>,
}

/// One page of catalog results, in catalog iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub meta: PageMeta,
    pub modules: Vec<Module>,
}
