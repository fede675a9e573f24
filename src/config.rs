use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

// =============================================================================
// Protocol constants
// =============================================================================

/// Lifetime of signed download URLs (15 minutes)
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(900);

/// Page size used when the client does not ask for one
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Hard cap on the served page size, regardless of the requested limit
pub const PAGE_LIMIT_CAP: i64 = 10;

/// Largest limit the HTTP boundary accepts before rejecting the request
pub const MAX_REQUEST_LIMIT: i64 = 100;

/// Path advertised by the discovery document
pub const MODULES_V1_PATH: &str = "/v1/modules";

/// Server configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Base URL embedded in signed download URLs issued by the memory store
    pub public_base_url: String,
    /// Secret used to sign download URLs
    pub signing_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:1323".to_string(),
            public_base_url: "http://localhost:1323/artifacts".to_string(),
            signing_secret: "registry-dev-secret".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a JSON file, falling back to defaults for
    /// any field the file omits.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
