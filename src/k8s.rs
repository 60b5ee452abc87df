use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, Time};
use k8s_openapi::jiff::Timestamp;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config, Resource, ResourceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::backend::{BackendError, ResourceBackend};
use crate::model::{ResourceKind, ResourceSummary, SummaryDetails};

const FIELD_MANAGER: &str = "kubeglance";
const LIST_PAGE_SIZE: u32 = 500;

/// Backend command layer on top of a kube client.
///
/// Clones share the active target, so switching the cluster from one clone is
/// observed by every in-flight call made afterwards.
#[derive(Clone)]
pub struct KubeGateway {
    target: Arc<RwLock<KubeTarget>>,
}

struct KubeTarget {
    client: Client,
    context: String,
    default_namespace: String,
}

impl KubeGateway {
    pub async fn new(context: Option<String>) -> Result<Self> {
        let target = KubeTarget::connect(context).await?;
        Ok(Self {
            target: Arc::new(RwLock::new(target)),
        })
    }

    pub async fn context(&self) -> String {
        self.target.read().await.context.clone()
    }

    pub async fn default_namespace(&self) -> String {
        self.target.read().await.default_namespace.clone()
    }

    async fn client(&self) -> Client {
        self.target.read().await.client.clone()
    }

    async fn namespaced<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <K as Resource>::DynamicType: Default,
    {
        Api::namespaced(self.client().await, namespace)
    }
}

impl KubeTarget {
    async fn connect(context: Option<String>) -> Result<Self> {
        let kubeconfig = Kubeconfig::read().ok();

        let config = if let Some(kubeconfig_value) = kubeconfig.clone() {
            let options = KubeConfigOptions {
                context: context.clone(),
                cluster: None,
                user: None,
            };
            Config::from_custom_kubeconfig(kubeconfig_value, &options)
                .await
                .context("failed to infer Kubernetes configuration")?
        } else {
            if context.is_some() {
                anyhow::bail!(
                    "kubeconfig not found; context switching is unavailable in this environment"
                );
            }
            Config::infer()
                .await
                .context("failed to infer Kubernetes configuration")?
        };

        let default_namespace = config.default_namespace.clone();
        let client = Client::try_from(config).context("failed to initialize Kubernetes client")?;
        let context = context
            .or_else(|| {
                kubeconfig
                    .as_ref()
                    .and_then(|cfg| cfg.current_context.clone())
            })
            .unwrap_or_else(|| "in-cluster".to_string());

        Ok(Self {
            client,
            context,
            default_namespace,
        })
    }
}

#[async_trait]
impl ResourceBackend for KubeGateway {
    async fn clusters(&self) -> Result<Vec<String>, BackendError> {
        let kubeconfig = Kubeconfig::read().map_err(|error| BackendError::Config(error.to_string()))?;
        Ok(kubeconfig
            .contexts
            .into_iter()
            .map(|context| context.name)
            .collect())
    }

    async fn namespaces(&self) -> Result<Vec<String>, BackendError> {
        let api: Api<Namespace> = Api::all(self.client().await);
        let namespaces = list_all(&api).await?;
        Ok(namespaces
            .into_iter()
            .filter_map(|namespace| namespace.metadata.name)
            .collect())
    }

    async fn set_current_cluster(&self, cluster: &str) -> Result<(), BackendError> {
        let target = KubeTarget::connect(Some(cluster.to_string()))
            .await
            .map_err(|error| BackendError::Config(format!("{error:#}")))?;
        *self.target.write().await = target;
        info!("switched to context {cluster}");
        Ok(())
    }

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<ResourceSummary>, BackendError> {
        let now = Timestamp::now();
        let mut rows = match kind {
            ResourceKind::Pods => list_summaries::<Pod>(
                self.namespaced(namespace).await,
                namespace,
                now,
                pod_summary,
            )
            .await?,
            ResourceKind::Deployments => list_summaries::<Deployment>(
                self.namespaced(namespace).await,
                namespace,
                now,
                deployment_summary,
            )
            .await?,
            ResourceKind::StatefulSets => list_summaries::<StatefulSet>(
                self.namespaced(namespace).await,
                namespace,
                now,
                stateful_set_summary,
            )
            .await?,
            ResourceKind::DaemonSets => list_summaries::<DaemonSet>(
                self.namespaced(namespace).await,
                namespace,
                now,
                |_: &DaemonSet| SummaryDetails::DaemonSet,
            )
            .await?,
            ResourceKind::Services => list_summaries::<Service>(
                self.namespaced(namespace).await,
                namespace,
                now,
                |_: &Service| SummaryDetails::Service,
            )
            .await?,
        };

        rows.sort_by(|left, right| left.name.cmp(&right.name));
        debug!("listed {} {} in {namespace}", rows.len(), kind.title());
        Ok(rows)
    }

    async fn resource_yaml(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
    ) -> Result<String, BackendError> {
        match kind {
            ResourceKind::Pods => get_yaml::<Pod>(self.namespaced(namespace).await, name).await,
            ResourceKind::Deployments => {
                get_yaml::<Deployment>(self.namespaced(namespace).await, name).await
            }
            ResourceKind::StatefulSets => {
                get_yaml::<StatefulSet>(self.namespaced(namespace).await, name).await
            }
            ResourceKind::DaemonSets => {
                get_yaml::<DaemonSet>(self.namespaced(namespace).await, name).await
            }
            ResourceKind::Services => {
                get_yaml::<Service>(self.namespaced(namespace).await, name).await
            }
        }
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
    ) -> Result<(), BackendError> {
        let params = DeleteParams::default();
        match kind {
            ResourceKind::Pods => {
                let api: Api<Pod> = self.namespaced(namespace).await;
                let _ = api.delete(name, &params).await?;
            }
            ResourceKind::Deployments => {
                let api: Api<Deployment> = self.namespaced(namespace).await;
                let _ = api.delete(name, &params).await?;
            }
            ResourceKind::StatefulSets => {
                let api: Api<StatefulSet> = self.namespaced(namespace).await;
                let _ = api.delete(name, &params).await?;
            }
            ResourceKind::DaemonSets => {
                let api: Api<DaemonSet> = self.namespaced(namespace).await;
                let _ = api.delete(name, &params).await?;
            }
            ResourceKind::Services => {
                let api: Api<Service> = self.namespaced(namespace).await;
                let _ = api.delete(name, &params).await?;
            }
        }

        info!("deleted {kind} {namespace}/{name}");
        Ok(())
    }

    async fn scale(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
        replicas: i32,
    ) -> Result<(), BackendError> {
        let patch = serde_json::json!({ "spec": { "replicas": replicas } });
        let params = PatchParams::default();

        match kind {
            ResourceKind::Deployments => {
                let api: Api<Deployment> = self.namespaced(namespace).await;
                let _ = api.patch(name, &params, &Patch::Merge(&patch)).await?;
            }
            ResourceKind::StatefulSets => {
                let api: Api<StatefulSet> = self.namespaced(namespace).await;
                let _ = api.patch(name, &params, &Patch::Merge(&patch)).await?;
            }
            _ => {
                return Err(BackendError::Unsupported {
                    action: "scale",
                    kind,
                });
            }
        }

        info!("scaled {kind} {namespace}/{name} to {replicas}");
        Ok(())
    }

    async fn apply_yaml(&self, kind: ResourceKind, yaml: &str) -> Result<String, BackendError> {
        let manifest = parse_manifest(kind, yaml)?;
        let params = PatchParams::apply(FIELD_MANAGER).force();
        let patch = Patch::Apply(&manifest.body);
        let (name, namespace) = (manifest.name.as_str(), manifest.namespace.as_str());

        match kind {
            ResourceKind::Pods => {
                let api: Api<Pod> = self.namespaced(namespace).await;
                let _ = api.patch(name, &params, &patch).await?;
            }
            ResourceKind::Deployments => {
                let api: Api<Deployment> = self.namespaced(namespace).await;
                let _ = api.patch(name, &params, &patch).await?;
            }
            ResourceKind::StatefulSets => {
                let api: Api<StatefulSet> = self.namespaced(namespace).await;
                let _ = api.patch(name, &params, &patch).await?;
            }
            ResourceKind::DaemonSets => {
                let api: Api<DaemonSet> = self.namespaced(namespace).await;
                let _ = api.patch(name, &params, &patch).await?;
            }
            ResourceKind::Services => {
                let api: Api<Service> = self.namespaced(namespace).await;
                let _ = api.patch(name, &params, &patch).await?;
            }
        }

        Ok(format!(
            "Successfully applied changes to {kind} {name} in namespace {namespace}"
        ))
    }

    async fn pod_definition(&self, name: &str, namespace: &str) -> Result<String, BackendError> {
        get_yaml::<Pod>(self.namespaced(namespace).await, name).await
    }
}

async fn list_summaries<K>(
    api: Api<K>,
    namespace: &str,
    now: Timestamp,
    details: impl Fn(&K) -> SummaryDetails,
) -> Result<Vec<ResourceSummary>, BackendError>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    let objects = list_all(&api).await?;
    Ok(objects
        .iter()
        .map(|object| ResourceSummary {
            name: object.name_any(),
            namespace: object
                .namespace()
                .unwrap_or_else(|| namespace.to_string()),
            age_seconds: age_seconds(object.meta().creation_timestamp.as_ref(), now),
            details: details(object),
        })
        .collect())
}

async fn get_yaml<K>(api: Api<K>, name: &str) -> Result<String, BackendError>
where
    K: Resource + Clone + DeserializeOwned + Serialize + Debug,
{
    let object = api.get(name).await?;
    Ok(serde_yaml::to_string(&object)?)
}

#[derive(Debug)]
struct Manifest {
    name: String,
    namespace: String,
    body: Value,
}

fn parse_manifest(kind: ResourceKind, yaml: &str) -> Result<Manifest, BackendError> {
    let mut body: Value = serde_yaml::from_str(yaml)?;
    let title = capitalize(kind.singular());

    let name = body["metadata"]["name"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BackendError::InvalidManifest(format!("{title} name not found")))?;
    let namespace = body["metadata"]["namespace"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BackendError::InvalidManifest("Namespace not found".to_string()))?;

    if let Some(declared) = body["kind"].as_str()
        && ResourceKind::from_token(declared) != Some(kind)
    {
        return Err(BackendError::InvalidManifest(format!(
            "manifest kind {declared} does not match {kind}"
        )));
    }

    // server-side apply rejects bodies that carry managedFields
    if let Some(metadata) = body.get_mut("metadata").and_then(Value::as_object_mut) {
        metadata.remove("managedFields");
    }

    Ok(Manifest {
        name,
        namespace,
        body,
    })
}

fn pod_summary(pod: &Pod) -> SummaryDetails {
    let status = pod.status.as_ref();
    SummaryDetails::Pod {
        status: status
            .and_then(|value| value.phase.clone())
            .unwrap_or_default(),
        restarts: status
            .and_then(|value| value.container_statuses.as_ref())
            .and_then(|containers| containers.first())
            .map(|container| container.restart_count)
            .unwrap_or(0),
        ip: status
            .and_then(|value| value.pod_ip.clone())
            .unwrap_or_default(),
        node: pod
            .spec
            .as_ref()
            .and_then(|spec| spec.node_name.clone())
            .unwrap_or_default(),
    }
}

fn deployment_summary(deployment: &Deployment) -> SummaryDetails {
    let ready = deployment
        .status
        .as_ref()
        .and_then(|status| status.ready_replicas)
        .unwrap_or(0);
    let replicas = deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.replicas)
        .unwrap_or(0);

    SummaryDetails::Deployment {
        ready: format!("{ready}/{replicas}"),
    }
}

fn stateful_set_summary(stateful_set: &StatefulSet) -> SummaryDetails {
    let spec = stateful_set.spec.as_ref();
    SummaryDetails::StatefulSet {
        replicas: spec.and_then(|spec| spec.replicas).unwrap_or(0),
        ready_replicas: stateful_set
            .status
            .as_ref()
            .and_then(|status| status.ready_replicas)
            .unwrap_or(0),
        update_strategy: spec
            .and_then(|spec| spec.update_strategy.as_ref())
            .and_then(|strategy| strategy.type_.clone())
            .unwrap_or_else(|| "RollingUpdate".to_string()),
    }
}

fn age_seconds(created: Option<&Time>, now: Timestamp) -> u64 {
    created
        .map(|time| (now.as_second() - time.0.as_second()).max(0) as u64)
        .unwrap_or(0)
}

async fn list_all<K>(api: &Api<K>) -> Result<Vec<K>, BackendError>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = api.list(&page_params(token.as_deref())).await?;
        token = continue_token(&page.metadata);
        items.extend(page.items);
        if token.is_none() {
            return Ok(items);
        }
        debug!("listed {} objects so far, fetching next page", items.len());
    }
}

fn page_params(token: Option<&str>) -> ListParams {
    let params = ListParams::default().limit(LIST_PAGE_SIZE);
    match token {
        Some(token) => params.continue_token(token),
        None => params,
    }
}

fn continue_token(meta: &ListMeta) -> Option<String> {
    meta.continue_.clone().filter(|token| !token.is_empty())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
