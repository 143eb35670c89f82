//! Raw pod-list snapshot documents.
//!
//! A snapshot is one JSON document in the pod-list shape served by the
//! cluster API: `{ "items": [ <pod descriptor>, ... ] }`. The items are kept
//! as raw JSON values here and decoded one by one during normalization, so
//! that a malformed descriptor can be reported with its position in the
//! list.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One parsed pod-list document.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PodList {
    pub items: Vec<serde_json::Value>,
}

/// A pod descriptor as it appears in the raw document.
///
/// Collections the API omits when empty (`command`, `env`, `volumeMounts`,
/// `resources.requests`) decode as empty; a descriptor missing an identity
/// or scalar field does not decode at all.
#[derive(Debug, serde::Deserialize)]
pub struct RawPod {
    pub metadata: Metadata,
    pub spec: PodSpec,
}

#[derive(Debug, serde::Deserialize)]
pub struct Metadata {
    pub name: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct PodSpec {
    pub containers: Vec<RawContainer>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContainer {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub env: Vec<RawEnvVar>,
    #[serde(default)]
    pub resources: RawResources,
    #[serde(default)]
    pub volume_mounts: Vec<RawVolumeMount>,
}

#[derive(Debug, serde::Deserialize)]
pub struct RawEnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct RawResources {
    /// Requested quantities by resource name (e.g. `cpu`, `memory`). Limits
    /// and other sub-fields are not part of the comparison surface.
    #[serde(default)]
    pub requests: BTreeMap<String, String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVolumeMount {
    pub name: String,
    pub mount_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read snapshot `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot `{path}` is not a valid pod list: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and parses a pod-list snapshot file.
///
/// # Errors
///
/// Returns [`LoadError::Read`] if the file cannot be read, and
/// [`LoadError::Parse`] if its content is not a pod-list document. There is
/// no partial parsing: an unreadable or invalid snapshot fails the whole
/// run.
pub fn load(path: impl AsRef<Path>) -> Result<PodList, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
