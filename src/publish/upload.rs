//! Uploads packaged modules to a registry over HTTP

use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::publish::archive::{ModuleArchive, package_dir};
use crate::publish::error::PublishError;
use crate::registry::types::ModuleDescriptor;

/// Content type of the pushed archive
const ARCHIVE_CONTENT_TYPE: &str = "application/gzip";

/// POSTs a packaged archive to the registry's upload endpoint.
///
/// Any non-2xx response is an error carrying the status and the response
/// body text as diagnostic context; the body is surfaced verbatim to the
/// invoking tool. No retries happen at this layer.
pub async fn upload_archive(
    archive: &ModuleArchive,
    base_url: &str,
    descriptor: &ModuleDescriptor,
    version: &str,
) -> Result<(), PublishError> {
    let url = format!(
        "{}/v1/modules/{}/{}/{}/{version}/upload",
        base_url.trim_end_matches('/'),
        descriptor.namespace,
        descriptor.name,
        descriptor.system,
    );
    debug!("uploading {:?} to {url}", archive.path());

    let bytes = tokio::fs::read(archive.path()).await?;
    let client = reqwest::Client::builder()
        .user_agent("module-registry")
        .build()?;
    let response = client
        .post(&url)
        .header(CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
        .body(bytes)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(PublishError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    info!("uploaded module {url}");
    Ok(())
}

/// Packages a directory and uploads the result, removing the temporary
/// archive afterwards.
pub async fn upload_dir(
    dir: &Path,
    base_url: &str,
    descriptor: &ModuleDescriptor,
    version: &str,
) -> Result<(), PublishError> {
    let archive = package_dir(dir)?;
    upload_archive(&archive, base_url, descriptor, version).await
}
