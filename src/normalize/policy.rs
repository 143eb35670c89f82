//! Normalization policy: which parts of a raw snapshot are orchestrator
//! noise rather than user workload.

/// Rules for stripping system-injected noise from a raw snapshot.
///
/// The defaults describe the platform's own management workloads: the
/// deployment pods it runs for itself, the env vars and volumes it injects
/// into user containers, and the generated suffixes it appends to pod
/// names.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Pods whose raw name starts with this prefix are management pods and
    /// are dropped entirely.
    pub internal_pod_prefix: String,
    /// Env vars whose name starts with this prefix are injected and
    /// dropped.
    pub internal_env_prefix: String,
    /// Volume mounts with these exact names are injected and dropped.
    pub ignored_volumes: Vec<String>,
    /// Volume mounts whose name starts with this prefix carry the default
    /// service-account token and are dropped.
    pub token_volume_prefix: String,
    /// Number of trailing `-`-delimited segments stripped from pod names
    /// (replica and hash suffixes).
    pub name_suffix_segments: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            internal_pod_prefix: "axam-deployment-".to_owned(),
            internal_env_prefix: "AX_".to_owned(),
            ignored_volumes: [
                "bin-nothing",
                "artifacts-scratch",
                "static-bins",
                "docker-socket-file",
                "annotations",
                "applet",
            ]
            .map(String::from)
            .to_vec(),
            token_volume_prefix: "default-token-".to_owned(),
            name_suffix_segments: 2,
        }
    }
}

impl Policy {
    pub(crate) fn is_internal_pod(&self, raw_name: &str) -> bool {
        raw_name.starts_with(&self.internal_pod_prefix)
    }

    pub(crate) fn is_internal_env(&self, name: &str) -> bool {
        name.starts_with(&self.internal_env_prefix)
    }

    pub(crate) fn is_internal_volume(&self, name: &str) -> bool {
        self.ignored_volumes.iter().any(|vol| vol == name)
            || name.starts_with(&self.token_volume_prefix)
    }

    /// Strips the generated suffix segments from a raw pod name, so that
    /// logically identical pods share a name across snapshots.
    ///
    /// A name with no more segments than the configured suffix count strips
    /// to the empty string.
    pub(crate) fn workload_name(&self, raw_name: &str) -> String {
        let segments: Vec<&str> = raw_name.split('-').collect();
        let keep = segments.len().saturating_sub(self.name_suffix_segments);
        segments[..keep].join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_constants() {
        let policy = Policy::default();
        assert_eq!(policy.internal_pod_prefix, "axam-deployment-");
        assert_eq!(policy.internal_env_prefix, "AX_");
        assert_eq!(
            policy.ignored_volumes,
            vec![
                "bin-nothing",
                "artifacts-scratch",
                "static-bins",
                "docker-socket-file",
                "annotations",
                "applet",
            ]
        );
        assert_eq!(policy.token_volume_prefix, "default-token-");
        assert_eq!(policy.name_suffix_segments, 2);
    }

    #[test]
    fn strips_replica_and_hash_suffixes() {
        let policy = Policy::default();
        assert_eq!(policy.workload_name("web-7f9c8d6b5-x2kpq"), "web");
        assert_eq!(policy.workload_name("billing-api-64d98c-zl4x7"), "billing-api");
    }

    #[test]
    fn short_names_strip_to_empty() {
        let policy = Policy::default();
        assert_eq!(policy.workload_name("web-abc"), "");
        assert_eq!(policy.workload_name("web"), "");
    }

    #[test]
    fn internal_volume_matches_deny_list_and_token_prefix() {
        let policy = Policy::default();
        assert!(policy.is_internal_volume("docker-socket-file"));
        assert!(policy.is_internal_volume("default-token-x7rd2"));
        assert!(!policy.is_internal_volume("data"));
    }
}
