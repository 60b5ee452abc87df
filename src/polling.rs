use chrono::{DateTime, Local};
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend::BackendError;
use crate::model::{ResourceKind, ResourceSummary};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ViewId(pub u64);

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FetchTicket {
    pub view: ViewId,
    pub seq: u64,
    pub kind: ResourceKind,
    pub namespace: String,
}

#[derive(Debug, Clone, Default)]
pub struct FetchState {
    pub items: Vec<ResourceSummary>,
    pub loading: bool,
    pub last_refreshed: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    Stale,
    Detached,
}

/// Refresh state of one list view.
///
/// Only the most recently issued ticket may change the items, so a slow
/// response for an old namespace can never overwrite a newer one.
#[derive(Debug)]
pub struct PollingController {
    view: ViewId,
    kind: ResourceKind,
    interval: Option<Duration>,
    state: FetchState,
    issued: u64,
    pending: Option<String>,
    alive: bool,
}

impl PollingController {
    pub fn new(view: ViewId, kind: ResourceKind, interval: Option<Duration>) -> Self {
        Self {
            view,
            kind,
            interval,
            state: FetchState::default(),
            issued: 0,
            pending: None,
            alive: true,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn items(&self) -> &[ResourceSummary] {
        &self.state.items
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn in_flight(&self, namespace: &str) -> bool {
        self.pending.as_deref() == Some(namespace)
    }

    /// Issues a new request for `namespace`, superseding any outstanding one.
    pub fn request(&mut self, namespace: &str) -> Option<FetchTicket> {
        if !self.alive {
            return None;
        }

        self.issued += 1;
        self.state.loading = true;
        self.pending = Some(namespace.to_string());
        Some(FetchTicket {
            view: self.view,
            seq: self.issued,
            kind: self.kind,
            namespace: namespace.to_string(),
        })
    }

    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<ResourceSummary>, BackendError>,
    ) -> FetchOutcome {
        if !self.alive || ticket.view != self.view {
            debug!(
                "dropping {} result for detached view {:?}",
                ticket.kind.title(),
                ticket.view
            );
            return FetchOutcome::Detached;
        }

        if ticket.seq != self.issued {
            debug!(
                "dropping stale {} result #{} for {} (latest #{})",
                ticket.kind.title(),
                ticket.seq,
                ticket.namespace,
                self.issued
            );
            return FetchOutcome::Stale;
        }

        self.state.loading = false;
        self.pending = None;
        match result {
            Ok(items) => {
                self.state.items = items;
                self.state.last_refreshed = Some(Local::now());
                FetchOutcome::Applied
            }
            Err(error) => {
                warn!(
                    "failed to fetch {} in {}: {error}",
                    ticket.kind.title(),
                    ticket.namespace
                );
                FetchOutcome::Failed
            }
        }
    }

    pub fn unmount(&mut self) {
        self.alive = false;
        self.pending = None;
        self.state.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchOutcome, PollingController, ViewId};
    use crate::backend::BackendError;
    use crate::model::{ResourceKind, ResourceSummary, SummaryDetails};
    use std::time::Duration;

    fn service(name: &str, namespace: &str) -> ResourceSummary {
        ResourceSummary {
            name: name.to_string(),
            namespace: namespace.to_string(),
            age_seconds: 10,
            details: SummaryDetails::Service,
        }
    }

    #[test]
    fn request_sets_loading_and_success_clears_it() {
        let mut controller = PollingController::new(ViewId(1), ResourceKind::Services, None);
        assert!(!controller.loading());

        let ticket = controller.request("default").unwrap();
        assert!(controller.loading());

        let outcome = controller.resolve(&ticket, Ok(vec![service("web", "default")]));
        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(!controller.loading());
        assert_eq!(controller.items().len(), 1);
        assert!(controller.state().last_refreshed.is_some());
    }

    #[test]
    fn in_flight_tracks_the_latest_namespace() {
        let mut controller =
            PollingController::new(ViewId(1), ResourceKind::Pods, Some(Duration::from_secs(1)));
        let first = controller.request("default").unwrap();
        assert!(controller.in_flight("default"));

        let second = controller.request("kube-system").unwrap();
        assert!(!controller.in_flight("default"));
        assert!(controller.in_flight("kube-system"));

        controller.resolve(&first, Ok(Vec::new()));
        assert!(controller.in_flight("kube-system"));
        controller.resolve(
            &second,
            Err(BackendError::Transport("timed out".to_string())),
        );
        assert!(!controller.in_flight("kube-system"));
    }

    #[test]
    fn failure_clears_loading_and_keeps_items() {
        let mut controller = PollingController::new(ViewId(1), ResourceKind::Services, None);
        let first = controller.request("default").unwrap();
        controller.resolve(&first, Ok(vec![service("web", "default")]));

        let second = controller.request("default").unwrap();
        let outcome = controller.resolve(
            &second,
            Err(BackendError::Transport("connection refused".to_string())),
        );
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(!controller.loading());
        assert_eq!(controller.items(), &[service("web", "default")]);
    }

    #[test]
    fn latest_request_wins_when_an_older_one_resolves_last() {
        let mut controller = PollingController::new(ViewId(1), ResourceKind::Services, None);
        let first = controller.request("default").unwrap();
        let second = controller.request("kube-system").unwrap();

        let outcome = controller.resolve(&second, Ok(vec![service("dns", "kube-system")]));
        assert_eq!(outcome, FetchOutcome::Applied);

        let outcome = controller.resolve(&first, Ok(vec![service("web", "default")]));
        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(controller.items(), &[service("dns", "kube-system")]);
        assert!(!controller.loading());
    }

    #[test]
    fn rapid_namespace_changes_settle_on_the_last_namespace() {
        let namespaces = ["default", "kube-system", "monitoring", "apps", "payments"];

        // the newest request resolves at every possible position
        for newest_at in 0..namespaces.len() {
            let mut controller = PollingController::new(ViewId(7), ResourceKind::Services, None);
            let tickets = namespaces
                .iter()
                .map(|namespace| controller.request(namespace).unwrap())
                .collect::<Vec<_>>();
            let mut order = (0..tickets.len() - 1).collect::<Vec<_>>();
            order.insert(newest_at, tickets.len() - 1);

            for index in order {
                let ticket = &tickets[index];
                controller.resolve(ticket, Ok(vec![service("svc", &ticket.namespace)]));
            }

            assert_eq!(controller.items(), &[service("svc", "payments")]);
            assert!(!controller.loading());
        }
    }

    #[test]
    fn stale_result_keeps_loading_while_latest_is_outstanding() {
        let mut controller = PollingController::new(ViewId(1), ResourceKind::Pods, None);
        let first = controller.request("default").unwrap();
        let _second = controller.request("apps").unwrap();

        assert_eq!(
            controller.resolve(&first, Ok(Vec::new())),
            FetchOutcome::Stale
        );
        assert!(controller.loading());
    }

    #[test]
    fn unmounted_view_ignores_results_and_refuses_requests() {
        let mut controller = PollingController::new(ViewId(3), ResourceKind::Pods, None);
        let ticket = controller.request("default").unwrap();
        controller.unmount();

        assert_eq!(
            controller.resolve(&ticket, Ok(vec![service("web", "default")])),
            FetchOutcome::Detached
        );
        assert!(controller.items().is_empty());
        assert!(!controller.loading());
        assert!(controller.request("default").is_none());
    }

    #[test]
    fn tickets_from_another_view_are_detached() {
        let mut old = PollingController::new(ViewId(1), ResourceKind::Pods, None);
        let mut current = PollingController::new(ViewId(2), ResourceKind::Pods, None);
        let old_ticket = old.request("default").unwrap();
        let _ = current.request("default").unwrap();

        assert_eq!(
            current.resolve(&old_ticket, Ok(Vec::new())),
            FetchOutcome::Detached
        );
    }
}
