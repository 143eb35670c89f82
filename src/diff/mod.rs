//! Recursive comparison of two normalized snapshots.
//!
//! The same scheme applies at every level of the tree: entities are matched
//! by name, one-sided entities are tagged [`DiffStatus::Removed`] or
//! [`DiffStatus::Added`], and matched entities are compared field by field.
//! Container fields go through a declarative rule table, which fixes both
//! the comparison rule and the report order for each field.
//!
//! The leaf collections behave slightly differently from the upper levels:
//! once an env list or mount list is known to differ, every name in the
//! union is reported, equal entries included, so the reader sees the full
//! context of the change.
//!
//! The tree is a pure value. It holds no references into the input
//! snapshots and comparing the same inputs twice yields the same tree.

mod matcher;

pub use matcher::{Matched, Named, match_by_name};

use std::collections::BTreeMap;

use crate::normalize::{Container, EnvVar, Pod, VolumeMount};

/// How an entity fares between the two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffStatus<T> {
    /// Present only in the first snapshot.
    Removed,
    /// Present only in the second snapshot.
    Added,
    /// Present in both; the payload describes what changed, if anything.
    Matched(T),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodDiff {
    pub name: String,
    pub status: DiffStatus<Vec<ContainerDiff>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDiff {
    pub name: String,
    /// An empty field list means the container is identical on both sides.
    pub status: DiffStatus<Vec<FieldDiff>>,
}

/// One changed container field, named as it appears in the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: &'static str,
    pub change: FieldChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// A scalar field with its before and after values.
    Scalar(String, String),
    /// A list-valued field with its before and after values.
    List(Vec<String>, Vec<String>),
    /// The resource request maps of both sides.
    Requests(BTreeMap<String, String>, BTreeMap<String, String>),
    /// Per-variable comparison over the union of env var names.
    Env(Vec<EnvValueDiff>),
    /// Per-mount comparison over the union of volume mount names.
    Mounts(Vec<MountDiff>),
}

/// One env var across both snapshots. `None` means the variable does not
/// exist on that side; equal values are listed too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvValueDiff {
    pub name: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// One volume mount across both snapshots; matched mounts carry their
/// mount-path pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountDiff {
    pub name: String,
    pub status: DiffStatus<(String, String)>,
}

impl PodDiff {
    /// True when the pod exists on both sides and nothing in it changed.
    pub fn is_unchanged(&self) -> bool {
        match &self.status {
            DiffStatus::Matched(containers) => {
                containers.iter().all(ContainerDiff::is_unchanged)
            }
            _ => false,
        }
    }
}

impl ContainerDiff {
    pub fn is_unchanged(&self) -> bool {
        matches!(&self.status, DiffStatus::Matched(fields) if fields.is_empty())
    }
}

impl Named for Pod {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Container {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for EnvVar {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for VolumeMount {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Compares two normalized snapshots pod by pod.
///
/// There are no pod-level scalar fields; a pod present on both sides only
/// carries its container comparison.
pub fn diff_pods(before: &[Pod], after: &[Pod]) -> Vec<PodDiff> {
    match_by_name(before, after)
        .into_iter()
        .map(|(name, matched)| PodDiff {
            name: name.to_owned(),
            status: match matched {
                Matched::OnlyBefore(_) => DiffStatus::Removed,
                Matched::OnlyAfter(_) => DiffStatus::Added,
                Matched::Both(b, a) => {
                    DiffStatus::Matched(diff_containers(&b.containers, &a.containers))
                }
            },
        })
        .collect()
}

/// Compares the containers of one pod across both snapshots.
pub fn diff_containers(before: &[Container], after: &[Container]) -> Vec<ContainerDiff> {
    match_by_name(before, after)
        .into_iter()
        .map(|(name, matched)| ContainerDiff {
            name: name.to_owned(),
            status: match matched {
                Matched::OnlyBefore(_) => DiffStatus::Removed,
                Matched::OnlyAfter(_) => DiffStatus::Added,
                Matched::Both(b, a) => DiffStatus::Matched(diff_fields(b, a)),
            },
        })
        .collect()
}

type FieldRule = fn(&Container, &Container) -> Option<FieldChange>;

/// Comparison rules per container field. Table order is report order.
const FIELD_RULES: &[(&str, FieldRule)] = &[
    ("image", image_rule),
    ("command", command_rule),
    ("env", env_rule),
    ("resources", resources_rule),
    ("volumeMounts", mounts_rule),
];

fn diff_fields(before: &Container, after: &Container) -> Vec<FieldDiff> {
    FIELD_RULES
        .iter()
        .filter_map(|&(field, rule)| rule(before, after).map(|change| FieldDiff { field, change }))
        .collect()
}

fn image_rule(before: &Container, after: &Container) -> Option<FieldChange> {
    (before.image != after.image)
        .then(|| FieldChange::Scalar(before.image.clone(), after.image.clone()))
}

fn command_rule(before: &Container, after: &Container) -> Option<FieldChange> {
    (before.command != after.command)
        .then(|| FieldChange::List(before.command.clone(), after.command.clone()))
}

fn env_rule(before: &Container, after: &Container) -> Option<FieldChange> {
    (before.env != after.env).then(|| FieldChange::Env(diff_env(&before.env, &after.env)))
}

fn resources_rule(before: &Container, after: &Container) -> Option<FieldChange> {
    (before.requests != after.requests)
        .then(|| FieldChange::Requests(before.requests.clone(), after.requests.clone()))
}

fn mounts_rule(before: &Container, after: &Container) -> Option<FieldChange> {
    (before.volume_mounts != after.volume_mounts).then(|| {
        FieldChange::Mounts(diff_volume_mounts(&before.volume_mounts, &after.volume_mounts))
    })
}

/// Compares env vars over the union of their names. Every name is listed,
/// equal values included.
pub fn diff_env(before: &[EnvVar], after: &[EnvVar]) -> Vec<EnvValueDiff> {
    match_by_name(before, after)
        .into_iter()
        .map(|(name, matched)| {
            let (b, a) = match matched {
                Matched::Both(b, a) => (Some(b), Some(a)),
                Matched::OnlyBefore(b) => (Some(b), None),
                Matched::OnlyAfter(a) => (None, Some(a)),
            };
            EnvValueDiff {
                name: name.to_owned(),
                before: b.map(|var| var.value.clone()),
                after: a.map(|var| var.value.clone()),
            }
        })
        .collect()
}

/// Compares volume mounts over the union of their names. One-sided mounts
/// are tagged; matched mounts carry both mount paths.
pub fn diff_volume_mounts(before: &[VolumeMount], after: &[VolumeMount]) -> Vec<MountDiff> {
    match_by_name(before, after)
        .into_iter()
        .map(|(name, matched)| MountDiff {
            name: name.to_owned(),
            status: match matched {
                Matched::OnlyBefore(_) => DiffStatus::Removed,
                Matched::OnlyAfter(_) => DiffStatus::Added,
                Matched::Both(b, a) => {
                    DiffStatus::Matched((b.mount_path.clone(), a.mount_path.clone()))
                }
            },
        })
        .collect()
}
