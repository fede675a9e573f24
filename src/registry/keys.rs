//! Deterministic mapping between module coordinates and storage keys
//!
//! Every artifact lives at
//! `modules/namespaces/{namespace}/{name}/{system}/{version}/module.tar.gz`.
//! The mapping is injective for coordinates whose segments contain no `/`,
//! and every key built by [`build_key`] parses back via [`parse_version`].

use crate::registry::error::KeyError;
use crate::registry::types::ModuleDescriptor;

/// Common prefix of every artifact key in the object store
const KEY_PREFIX: &str = "modules/namespaces";

/// Fixed artifact filename terminating every key. Internal constant, not
/// part of the public contract.
const ARTIFACT_FILENAME: &str = "module.tar.gz";

/// Builds the storage key for one module version.
pub fn build_key(descriptor: &ModuleDescriptor, version: &str) -> String {
    format!(
        "{KEY_PREFIX}/{}/{}/{}/{version}/{ARTIFACT_FILENAME}",
        descriptor.namespace, descriptor.name, descriptor.system
    )
}

/// Builds the key prefix covering every version of a module family.
pub fn descriptor_prefix(descriptor: &ModuleDescriptor) -> String {
    format!(
        "{KEY_PREFIX}/{}/{}/{}/",
        descriptor.namespace, descriptor.name, descriptor.system
    )
}

/// Recovers the version segment from a storage key.
///
/// Fails with [`KeyError::Malformed`] when the key does not match the
/// descriptor prefix, the artifact filename suffix, or contains anything
/// other than a single version segment between them.
pub fn parse_version(key: &str, descriptor: &ModuleDescriptor) -> Result<String, KeyError> {
    let prefix = descriptor_prefix(descriptor);
    let version = key
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix(ARTIFACT_FILENAME))
        .and_then(|rest| rest.strip_suffix('/'))
        .ok_or_else(|| KeyError::Malformed(key.to_string()))?;

    if version.is_empty() || version.contains('/') {
        return Err(KeyError::Malformed(key.to_string()));
    }

    Ok(version.to_string())
}
