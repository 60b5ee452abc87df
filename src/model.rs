use std::fmt::{Display, Formatter};

use crate::menu::MenuAction;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    Pods,
    Deployments,
    StatefulSets,
    DaemonSets,
    Services,
}

impl ResourceKind {
    pub const ALL: [Self; 5] = [
        Self::Pods,
        Self::Deployments,
        Self::StatefulSets,
        Self::DaemonSets,
        Self::Services,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Pods => "Pods",
            Self::Deployments => "Deployments",
            Self::StatefulSets => "StatefulSets",
            Self::DaemonSets => "DaemonSets",
            Self::Services => "Services",
        }
    }

    /// Token carried in the `resource` parameter of the editor route.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Pods => "pod",
            Self::Deployments => "deployment",
            Self::StatefulSets => "statefulset",
            Self::DaemonSets => "daemonset",
            Self::Services => "service",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Pods => "/pods",
            Self::Deployments => "/deployments",
            Self::StatefulSets => "/statefulsets",
            Self::DaemonSets => "/daemonsets",
            Self::Services => "/services",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "po" | "pod" | "pods" => Some(Self::Pods),
            "deploy" | "deployment" | "deployments" | "dp" => Some(Self::Deployments),
            "sts" | "statefulset" | "statefulsets" | "stateful-set" | "stateful-sets" => {
                Some(Self::StatefulSets)
            }
            "ds" | "daemonset" | "daemonsets" | "daemon-set" | "daemon-sets" => {
                Some(Self::DaemonSets)
            }
            "svc" | "service" | "services" => Some(Self::Services),
            _ => None,
        }
    }

    pub fn headers(self) -> Vec<String> {
        let headers: &[&str] = match self {
            Self::Pods => &["Name", "Namespace", "Status", "Restarts", "IP", "Node", "Age"],
            Self::Deployments => &["Name", "Ready", "Age"],
            Self::StatefulSets => &["Name", "Ready", "Update Strategy", "Age"],
            Self::DaemonSets | Self::Services => &["Name", "Age"],
        };
        headers.iter().map(|header| header.to_string()).collect()
    }

    pub fn actions(self) -> &'static [MenuAction] {
        match self {
            Self::Pods => &[
                MenuAction::Definition,
                MenuAction::Shell,
                MenuAction::Delete,
                MenuAction::Edit,
                MenuAction::Describe,
            ],
            Self::Deployments => &[MenuAction::Edit, MenuAction::Scale, MenuAction::Delete],
            Self::StatefulSets | Self::DaemonSets | Self::Services => {
                &[MenuAction::Edit, MenuAction::Delete]
            }
        }
    }

    /// Only the pods view refreshes on a timer; the others refresh on demand.
    pub fn auto_refresh(self) -> bool {
        matches!(self, Self::Pods)
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.singular())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SummaryDetails {
    Pod {
        status: String,
        restarts: i32,
        ip: String,
        node: String,
    },
    Deployment {
        ready: String,
    },
    StatefulSet {
        replicas: i32,
        ready_replicas: i32,
        update_strategy: String,
    },
    DaemonSet,
    Service,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResourceSummary {
    pub name: String,
    pub namespace: String,
    pub age_seconds: u64,
    pub details: SummaryDetails,
}

impl ResourceSummary {
    pub fn kind(&self) -> ResourceKind {
        match self.details {
            SummaryDetails::Pod { .. } => ResourceKind::Pods,
            SummaryDetails::Deployment { .. } => ResourceKind::Deployments,
            SummaryDetails::StatefulSet { .. } => ResourceKind::StatefulSets,
            SummaryDetails::DaemonSet => ResourceKind::DaemonSets,
            SummaryDetails::Service => ResourceKind::Services,
        }
    }

    /// Cells in the order of [`ResourceKind::headers`].
    pub fn columns(&self) -> Vec<String> {
        let age = format_age(self.age_seconds);
        match &self.details {
            SummaryDetails::Pod {
                status,
                restarts,
                ip,
                node,
            } => vec![
                self.name.clone(),
                self.namespace.clone(),
                status.clone(),
                restarts.to_string(),
                dash_if_empty(ip),
                dash_if_empty(node),
                age,
            ],
            SummaryDetails::Deployment { ready } => vec![self.name.clone(), ready.clone(), age],
            SummaryDetails::StatefulSet {
                replicas,
                ready_replicas,
                update_strategy,
            } => vec![
                self.name.clone(),
                format!("{ready_replicas}/{replicas}"),
                update_strategy.clone(),
                age,
            ],
            SummaryDetails::DaemonSet | SummaryDetails::Service => vec![self.name.clone(), age],
        }
    }
}

pub fn format_age(seconds: u64) -> String {
    if seconds >= 86_400 {
        return format!("{}d", seconds / 86_400);
    }

    if seconds >= 3_600 {
        return format!("{}h", seconds / 3_600);
    }

    if seconds >= 60 {
        return format!("{}m", seconds / 60);
    }

    format!("{seconds}s")
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{ResourceKind, ResourceSummary, SummaryDetails, format_age};
    use crate::menu::MenuAction;

    #[test]
    fn format_age_picks_the_largest_whole_unit() {
        assert_eq!(format_age(0), "0s");
        assert_eq!(format_age(45), "45s");
        assert_eq!(format_age(59), "59s");
        assert_eq!(format_age(60), "1m");
        assert_eq!(format_age(125), "2m");
        assert_eq!(format_age(3_599), "59m");
        assert_eq!(format_age(3_600), "1h");
        assert_eq!(format_age(7_265), "2h");
        assert_eq!(format_age(86_399), "23h");
        assert_eq!(format_age(86_400), "1d");
        assert_eq!(format_age(90_000), "1d");
    }

    #[test]
    fn resource_aliases_map_to_expected_kinds() {
        assert_eq!(ResourceKind::from_token("po"), Some(ResourceKind::Pods));
        assert_eq!(
            ResourceKind::from_token("Deployments"),
            Some(ResourceKind::Deployments)
        );
        assert_eq!(
            ResourceKind::from_token("sts"),
            Some(ResourceKind::StatefulSets)
        );
        assert_eq!(
            ResourceKind::from_token("daemon-set"),
            Some(ResourceKind::DaemonSets)
        );
        assert_eq!(ResourceKind::from_token("svc"), Some(ResourceKind::Services));
        assert_eq!(ResourceKind::from_token("configmaps"), None);
    }

    #[test]
    fn singular_tokens_round_trip_through_from_token() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_token(kind.singular()), Some(kind));
        }
    }

    #[test]
    fn action_vocabulary_is_fixed_per_kind() {
        assert_eq!(
            ResourceKind::Pods.actions(),
            &[
                MenuAction::Definition,
                MenuAction::Shell,
                MenuAction::Delete,
                MenuAction::Edit,
                MenuAction::Describe,
            ]
        );
        assert_eq!(
            ResourceKind::Deployments.actions(),
            &[MenuAction::Edit, MenuAction::Scale, MenuAction::Delete]
        );
        for kind in [
            ResourceKind::Services,
            ResourceKind::StatefulSets,
            ResourceKind::DaemonSets,
        ] {
            assert_eq!(kind.actions(), &[MenuAction::Edit, MenuAction::Delete]);
        }
    }

    #[test]
    fn columns_line_up_with_headers() {
        let pod = ResourceSummary {
            name: "nginx-1".to_string(),
            namespace: "default".to_string(),
            age_seconds: 65,
            details: SummaryDetails::Pod {
                status: "Running".to_string(),
                restarts: 0,
                ip: String::new(),
                node: "worker-1".to_string(),
            },
        };
        let columns = pod.columns();
        assert_eq!(columns.len(), ResourceKind::Pods.headers().len());
        assert_eq!(columns[4], "-");
        assert_eq!(columns.last().map(String::as_str), Some("1m"));

        let sts = ResourceSummary {
            name: "db".to_string(),
            namespace: "data".to_string(),
            age_seconds: 7_265,
            details: SummaryDetails::StatefulSet {
                replicas: 3,
                ready_replicas: 2,
                update_strategy: "RollingUpdate".to_string(),
            },
        };
        assert_eq!(sts.kind(), ResourceKind::StatefulSets);
        assert_eq!(sts.columns(), vec!["db", "2/3", "RollingUpdate", "2h"]);
    }
}
