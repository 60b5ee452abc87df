use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::debug;

use crate::app::{AppCommand, YamlTarget};
use crate::backend::{BackendError, ResourceBackend};
use crate::model::{ResourceKind, ResourceSummary};
use crate::polling::{FetchTicket, ViewId};

/// Completion of a backend call, delivered back to the event loop.
#[derive(Debug)]
pub enum BackendEvent {
    Fetched {
        ticket: FetchTicket,
        result: Result<Vec<ResourceSummary>, BackendError>,
    },
    PollTick {
        view: ViewId,
    },
    Clusters(Result<Vec<String>, BackendError>),
    Namespaces(Result<Vec<String>, BackendError>),
    ClusterSwitched {
        cluster: String,
        result: Result<(), BackendError>,
    },
    YamlLoaded {
        kind: ResourceKind,
        name: String,
        namespace: String,
        target: YamlTarget,
        result: Result<String, BackendError>,
    },
    Deleted {
        view: ViewId,
        kind: ResourceKind,
        name: String,
        namespace: String,
        result: Result<(), BackendError>,
    },
    Scaled {
        view: ViewId,
        kind: ResourceKind,
        name: String,
        namespace: String,
        replicas: i32,
        result: Result<(), BackendError>,
    },
    DefinitionLoaded {
        name: String,
        namespace: String,
        result: Result<String, BackendError>,
    },
    Applied {
        kind: ResourceKind,
        name: String,
        namespace: String,
        result: Result<String, BackendError>,
    },
}

/// Runs [`AppCommand`]s against a backend without blocking the caller.
///
/// Every call is spawned on its own task and reports back through the channel.
pub struct Dispatcher<B: ResourceBackend> {
    backend: B,
    tx: mpsc::UnboundedSender<BackendEvent>,
    poller: Option<JoinHandle<()>>,
}

impl<B: ResourceBackend> Dispatcher<B> {
    pub fn new(backend: B, tx: mpsc::UnboundedSender<BackendEvent>) -> Self {
        Self {
            backend,
            tx,
            poller: None,
        }
    }

    pub fn execute(&mut self, command: AppCommand) {
        match command {
            AppCommand::None => {}
            AppCommand::Batch(commands) => {
                for command in commands {
                    self.execute(command);
                }
            }
            AppCommand::Fetch(ticket) => {
                self.spawn(move |backend| async move {
                    let result = backend.list(ticket.kind, &ticket.namespace).await;
                    BackendEvent::Fetched { ticket, result }
                });
            }
            AppCommand::StartPolling { view, every } => self.start_polling(view, every),
            AppCommand::StopPolling => self.stop_polling(),
            AppCommand::LoadClusters => {
                self.spawn(|backend| async move { BackendEvent::Clusters(backend.clusters().await) });
            }
            AppCommand::LoadNamespaces => {
                self.spawn(|backend| async move {
                    BackendEvent::Namespaces(backend.namespaces().await)
                });
            }
            AppCommand::SwitchCluster { cluster } => {
                self.spawn(move |backend| async move {
                    let result = backend.set_current_cluster(&cluster).await;
                    BackendEvent::ClusterSwitched { cluster, result }
                });
            }
            AppCommand::LoadYaml {
                kind,
                name,
                namespace,
                target,
            } => {
                self.spawn(move |backend| async move {
                    let result = backend.resource_yaml(kind, &name, &namespace).await;
                    BackendEvent::YamlLoaded {
                        kind,
                        name,
                        namespace,
                        target,
                        result,
                    }
                });
            }
            AppCommand::Delete {
                view,
                kind,
                name,
                namespace,
            } => {
                self.spawn(move |backend| async move {
                    let result = backend.delete(kind, &name, &namespace).await;
                    BackendEvent::Deleted {
                        view,
                        kind,
                        name,
                        namespace,
                        result,
                    }
                });
            }
            AppCommand::Scale {
                view,
                kind,
                name,
                namespace,
                replicas,
            } => {
                self.spawn(move |backend| async move {
                    let result = backend.scale(kind, &name, &namespace, replicas).await;
                    BackendEvent::Scaled {
                        view,
                        kind,
                        name,
                        namespace,
                        replicas,
                        result,
                    }
                });
            }
            AppCommand::LoadDefinition { name, namespace } => {
                self.spawn(move |backend| async move {
                    let result = backend.pod_definition(&name, &namespace).await;
                    BackendEvent::DefinitionLoaded {
                        name,
                        namespace,
                        result,
                    }
                });
            }
            AppCommand::ApplyYaml {
                kind,
                name,
                namespace,
                text,
            } => {
                self.spawn(move |backend| async move {
                    let result = backend.apply_yaml(kind, &text).await;
                    BackendEvent::Applied {
                        kind,
                        name,
                        namespace,
                        result,
                    }
                });
            }
        }
    }

    fn spawn<F, Fut>(&self, call: F)
    where
        F: FnOnce(B) -> Fut,
        Fut: Future<Output = BackendEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let task = call(self.backend.clone());
        tokio::spawn(async move {
            let event = task.await;
            if tx.send(event).is_err() {
                debug!("event loop closed before a backend call completed");
            }
        });
    }

    fn start_polling(&mut self, view: ViewId, every: Duration) {
        self.stop_polling();
        let tx = self.tx.clone();
        self.poller = Some(tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // first tick fires immediately; the mount already fetched
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(BackendEvent::PollTick { view }).is_err() {
                    break;
                }
            }
        }));
        debug!("polling {view:?} every {}ms", every.as_millis());
    }

    fn stop_polling(&mut self) {
        if let Some(task) = self.poller.take() {
            task.abort();
        }
    }
}

impl<B: ResourceBackend> Drop for Dispatcher<B> {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
