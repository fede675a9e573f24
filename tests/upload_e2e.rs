//! End-to-end packaging and upload against a live server

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use module_registry::http::router;
use module_registry::publish;
use module_registry::registry::{ModuleDescriptor, StorageModuleService};
use module_registry::storage::MemoryObjectStore;

/// Starts the registry on an ephemeral port and returns its base URL plus
/// a handle on the backing store.
async fn spawn_registry() -> (String, Arc<MemoryObjectStore>) {
    let store = Arc::new(MemoryObjectStore::new(
        "http://localhost:1323/artifacts",
        "test-secret",
    ));
    let app = router(Arc::new(StorageModuleService::new(store.clone())));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), store)
}

fn module_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.tf"), b"resource \"aws_vpc\" \"x\" {}").unwrap();
    fs::create_dir(dir.path().join("modules")).unwrap();
    fs::write(dir.path().join("modules/inner.tf"), b"variable \"y\" {}").unwrap();
    dir
}

#[tokio::test(flavor = "multi_thread")]
async fn uploaded_versions_are_enumerable_over_http() {
    let (base, _store) = spawn_registry().await;
    let dir = module_dir();
    let descriptor = ModuleDescriptor::new("hashicorp", "aws", "aws");

    for version in ["3.0.0", "3.0.1", "3.0.2"] {
        publish::upload_dir(dir.path(), &base, &descriptor, version)
            .await
            .unwrap();
    }

    let body = reqwest::get(format!("{base}/v1/modules/hashicorp/aws/aws/versions"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    let versions: Vec<&str> = json["modules"][0]["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version"].as_str().unwrap())
        .collect();
    assert_eq!(versions, vec!["3.0.0", "3.0.1", "3.0.2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn uploaded_artifact_is_stored_as_gzip_at_the_derived_key() {
    let (base, store) = spawn_registry().await;
    let dir = module_dir();
    let descriptor = ModuleDescriptor::new("acme", "network", "gcp");

    publish::upload_dir(dir.path(), &base, &descriptor, "1.0.0")
        .await
        .unwrap();

    let stored = store
        .object("modules/namespaces/acme/network/gcp/1.0.0/module.tar.gz")
        .expect("artifact stored under the derived key");
    assert!(stored.len() > 2);
    assert_eq!(&stored[..2], &[0x1f, 0x8b]);
}

#[tokio::test(flavor = "multi_thread")]
async fn download_resolution_follows_upload() {
    let (base, _store) = spawn_registry().await;
    let dir = module_dir();
    let descriptor = ModuleDescriptor::new("acme", "network", "gcp");

    publish::upload_dir(dir.path(), &base, &descriptor, "2.0.0")
        .await
        .unwrap();

    let response = reqwest::get(format!(
        "{base}/v1/modules/acme/network/gcp/2.0.0/download"
    ))
    .await
    .unwrap();

    assert_eq!(response.status().as_u16(), 204);
    let url = response
        .headers()
        .get("x-terraform-get")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(url.contains("modules/namespaces/acme/network/gcp/2.0.0/module.tar.gz"));
}
