//! Fixed-width rendering of a diff tree.
//!
//! The layout mirrors the nesting of the tree: a header row, pods indented
//! two spaces, containers four, field names six, and env/mount entries
//! eight. Entities present on only one side print their status markers in
//! place of any nested detail.

use crate::diff::{ContainerDiff, DiffStatus, FieldChange, PodDiff};
use crate::error::ResultOkLogExt;

const REMOVED: &str = "<removed>";
const ADDED: &str = "<added>";

/// Renders the diff tree as an indented three-column table with the two
/// snapshot labels in the header row.
pub fn render(diff: &[PodDiff], before_label: &str, after_label: &str) -> String {
    let mut out = String::new();
    row(&mut out, 0, "applications", before_label, after_label);
    for pod in diff {
        let label = format!("pod:{}", pod.name);
        match &pod.status {
            DiffStatus::Removed => row(&mut out, 2, &label, REMOVED, ""),
            DiffStatus::Added => row(&mut out, 2, &label, "", ADDED),
            DiffStatus::Matched(containers) => {
                row(&mut out, 2, &label, "", "");
                for container in containers {
                    render_container(&mut out, container);
                }
            }
        }
    }
    out
}

fn render_container(out: &mut String, container: &ContainerDiff) {
    let label = format!("container:{}", container.name);
    match &container.status {
        DiffStatus::Removed => row(out, 4, &label, REMOVED, ""),
        DiffStatus::Added => row(out, 4, &label, "", ADDED),
        DiffStatus::Matched(fields) => {
            row(out, 4, &label, "", "");
            for field in fields {
                render_field(out, field.field, &field.change);
            }
        }
    }
}

fn render_field(out: &mut String, field: &str, change: &FieldChange) {
    match change {
        FieldChange::Scalar(before, after) => row(out, 6, field, before, after),
        FieldChange::List(before, after) => row(out, 6, field, &json(before), &json(after)),
        FieldChange::Requests(before, after) => {
            row(out, 6, field, &json(before), &json(after));
        }
        FieldChange::Env(vars) => {
            row(out, 6, field, "", "");
            for var in vars {
                row(
                    out,
                    8,
                    &var.name,
                    var.before.as_deref().unwrap_or(""),
                    var.after.as_deref().unwrap_or(""),
                );
            }
        }
        FieldChange::Mounts(mounts) => {
            row(out, 6, field, "", "");
            for mount in mounts {
                match &mount.status {
                    DiffStatus::Removed => row(out, 8, &mount.name, REMOVED, ""),
                    DiffStatus::Added => row(out, 8, &mount.name, "", ADDED),
                    DiffStatus::Matched((before, after)) => {
                        row(out, 8, &mount.name, before, after);
                    }
                }
            }
        }
    }
}

fn json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).ok_log().unwrap_or_default()
}

fn row(out: &mut String, indent: usize, label: &str, before: &str, after: &str) {
    let label = format!("{}{}", " ".repeat(indent), label);
    out.push_str(&format!("{label:<30} {before:<40} {after:<40}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{EnvValueDiff, FieldDiff, MountDiff};

    fn expect_row(indent: usize, label: &str, before: &str, after: &str) -> String {
        let label = format!("{}{}", " ".repeat(indent), label);
        format!("{label:<30} {before:<40} {after:<40}")
    }

    #[test]
    fn renders_header_and_unchanged_pod() {
        let diff = vec![PodDiff {
            name: "web".to_owned(),
            status: DiffStatus::Matched(vec![ContainerDiff {
                name: "api".to_owned(),
                status: DiffStatus::Matched(vec![]),
            }]),
        }];
        let text = render(&diff, "before.json", "after.json");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            expect_row(0, "applications", "before.json", "after.json")
        );
        assert_eq!(lines[1], expect_row(2, "pod:web", "", ""));
        assert_eq!(lines[2], expect_row(4, "container:api", "", ""));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn renders_status_markers_in_place_of_detail() {
        let diff = vec![
            PodDiff {
                name: "cache".to_owned(),
                status: DiffStatus::Removed,
            },
            PodDiff {
                name: "queue".to_owned(),
                status: DiffStatus::Added,
            },
        ];
        let text = render(&diff, "a.json", "b.json");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], expect_row(2, "pod:cache", "<removed>", ""));
        assert_eq!(lines[2], expect_row(2, "pod:queue", "", "<added>"));
    }

    #[test]
    fn renders_container_status_markers() {
        let diff = vec![PodDiff {
            name: "web".to_owned(),
            status: DiffStatus::Matched(vec![ContainerDiff {
                name: "sidecar".to_owned(),
                status: DiffStatus::Removed,
            }]),
        }];
        let text = render(&diff, "a.json", "b.json");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[2], expect_row(4, "container:sidecar", "<removed>", ""));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn renders_scalar_list_and_nested_fields() {
        let diff = vec![PodDiff {
            name: "web".to_owned(),
            status: DiffStatus::Matched(vec![ContainerDiff {
                name: "api".to_owned(),
                status: DiffStatus::Matched(vec![
                    FieldDiff {
                        field: "image",
                        change: FieldChange::Scalar("app:v1".to_owned(), "app:v2".to_owned()),
                    },
                    FieldDiff {
                        field: "command",
                        change: FieldChange::List(
                            vec!["/bin/app".to_owned()],
                            vec!["/bin/app".to_owned(), "--debug".to_owned()],
                        ),
                    },
                    FieldDiff {
                        field: "env",
                        change: FieldChange::Env(vec![EnvValueDiff {
                            name: "RETRIES".to_owned(),
                            before: None,
                            after: Some("3".to_owned()),
                        }]),
                    },
                    FieldDiff {
                        field: "volumeMounts",
                        change: FieldChange::Mounts(vec![MountDiff {
                            name: "data".to_owned(),
                            status: DiffStatus::Matched((
                                "/var/data".to_owned(),
                                "/mnt/data".to_owned(),
                            )),
                        }]),
                    },
                ]),
            }]),
        }];
        let text = render(&diff, "a.json", "b.json");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[3], expect_row(6, "image", "app:v1", "app:v2"));
        assert_eq!(
            lines[4],
            expect_row(6, "command", r#"["/bin/app"]"#, r#"["/bin/app","--debug"]"#)
        );
        assert_eq!(lines[5], expect_row(6, "env", "", ""));
        assert_eq!(lines[6], expect_row(8, "RETRIES", "", "3"));
        assert_eq!(lines[7], expect_row(6, "volumeMounts", "", ""));
        assert_eq!(lines[8], expect_row(8, "data", "/var/data", "/mnt/data"));
    }

    #[test]
    fn renders_request_maps_as_compact_json() {
        let before = std::collections::BTreeMap::from([("cpu".to_owned(), "100m".to_owned())]);
        let after = std::collections::BTreeMap::from([("cpu".to_owned(), "200m".to_owned())]);
        let diff = vec![PodDiff {
            name: "web".to_owned(),
            status: DiffStatus::Matched(vec![ContainerDiff {
                name: "api".to_owned(),
                status: DiffStatus::Matched(vec![FieldDiff {
                    field: "resources",
                    change: FieldChange::Requests(before, after),
                }]),
            }]),
        }];
        let text = render(&diff, "a.json", "b.json");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[3],
            expect_row(6, "resources", r#"{"cpu":"100m"}"#, r#"{"cpu":"200m"}"#)
        );
    }
}
