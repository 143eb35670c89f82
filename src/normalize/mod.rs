//! Normalization of raw snapshots into the comparison model.
//!
//! Normalization is the only lossy step of the pipeline. Management pods,
//! injected env vars, and injected volume mounts are dropped, generated pod
//! name suffixes are stripped, and container resources are projected down
//! to their requests. What remains is exactly the surface the differ
//! compares, so two snapshots of an untouched namespace normalize to equal
//! values.

mod error;
mod policy;

pub use error::{Error, Result};
pub use policy::Policy;

use std::collections::BTreeMap;

use crate::snapshot::{PodList, RawContainer, RawPod};

/// A pod reduced to its comparison surface.
///
/// Within one normalized snapshot pod names are unique; when suffix
/// stripping makes two raw pods collide, the later one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pod {
    pub name: String,
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub env: Vec<EnvVar>,
    /// Requested quantities by resource name. Limits are dropped during
    /// normalization and never compared.
    pub requests: BTreeMap<String, String>,
    pub volume_mounts: Vec<VolumeMount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
}

/// Normalizes a raw pod list under the given policy.
///
/// Pure: the input is not mutated and the output holds no references into
/// it. The returned pods are sorted by name.
///
/// # Errors
///
/// Returns [`Error::MalformedPod`] naming the offending item index if a
/// descriptor cannot be decoded (e.g. missing `metadata.name`). The run is
/// aborted on the first malformed item; a partial result over bad input
/// would misreport the namespace.
pub fn normalize(list: &PodList, policy: &Policy) -> Result<Vec<Pod>> {
    let mut pods = BTreeMap::new();
    for (index, item) in list.items.iter().enumerate() {
        let raw: RawPod = serde_json::from_value(item.clone())
            .map_err(|source| Error::MalformedPod { index, source })?;
        if policy.is_internal_pod(&raw.metadata.name) {
            log::debug!("dropping internal pod `{}`", raw.metadata.name);
            continue;
        }
        let name = policy.workload_name(&raw.metadata.name);
        let containers = raw
            .spec
            .containers
            .iter()
            .map(|container| normalize_container(container, policy))
            .collect();
        pods.insert(name.clone(), Pod { name, containers });
    }
    Ok(pods.into_values().collect())
}

fn normalize_container(raw: &RawContainer, policy: &Policy) -> Container {
    Container {
        name: raw.name.clone(),
        image: raw.image.clone(),
        command: raw.command.clone(),
        env: raw
            .env
            .iter()
            .filter(|var| !policy.is_internal_env(&var.name))
            .map(|var| EnvVar {
                name: var.name.clone(),
                value: var.value.clone(),
            })
            .collect(),
        requests: raw.resources.requests.clone(),
        volume_mounts: raw
            .volume_mounts
            .iter()
            .filter(|vol| !policy.is_internal_volume(&vol.name))
            .map(|vol| VolumeMount {
                name: vol.name.clone(),
                mount_path: vol.mount_path.clone(),
            })
            .collect(),
    }
}
