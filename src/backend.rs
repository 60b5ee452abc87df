use async_trait::async_trait;

use crate::model::{ResourceKind, ResourceSummary};

/// The display string is always the raw detail reported by the transport, so
/// user-facing messages stay the same regardless of the variant.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum BackendError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidManifest(String),

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Transport(String),

    #[error("{action} is not supported for {kind}")]
    Unsupported {
        action: &'static str,
        kind: ResourceKind,
    },
}

impl From<kube::Error> for BackendError {
    fn from(error: kube::Error) -> Self {
        let detail = error.to_string();
        match &error {
            kube::Error::Api(response) if response.code == 404 => Self::NotFound(detail),
            kube::Error::Api(response) if response.code == 401 || response.code == 403 => {
                Self::Forbidden(detail)
            }
            kube::Error::Api(response) if response.code == 422 => Self::InvalidManifest(detail),
            _ => Self::Transport(detail),
        }
    }
}

impl From<serde_yaml::Error> for BackendError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::InvalidManifest(error.to_string())
    }
}

/// Every call is a single round trip without retries.
#[async_trait]
pub trait ResourceBackend: Clone + Send + Sync + 'static {
    async fn clusters(&self) -> Result<Vec<String>, BackendError>;

    async fn namespaces(&self) -> Result<Vec<String>, BackendError>;

    async fn set_current_cluster(&self, cluster: &str) -> Result<(), BackendError>;

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<ResourceSummary>, BackendError>;

    async fn resource_yaml(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
    ) -> Result<String, BackendError>;

    async fn delete(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
    ) -> Result<(), BackendError>;

    async fn scale(
        &self,
        kind: ResourceKind,
        name: &str,
        namespace: &str,
        replicas: i32,
    ) -> Result<(), BackendError>;

    async fn apply_yaml(&self, kind: ResourceKind, yaml: &str) -> Result<String, BackendError>;

    async fn pod_definition(&self, name: &str, namespace: &str) -> Result<String, BackendError>;
}

#[cfg(test)]
pub mod testing {
    use super::{BackendError, ResourceBackend};
    use crate::model::{ResourceKind, ResourceSummary};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, MutexGuard};

    #[derive(Debug, Clone, Eq, PartialEq)]
    pub enum Call {
        Clusters,
        Namespaces,
        SetCurrentCluster(String),
        List(ResourceKind, String),
        ResourceYaml(ResourceKind, String, String),
        Delete(ResourceKind, String, String),
        Scale(ResourceKind, String, String, i32),
        ApplyYaml(ResourceKind, String),
        PodDefinition(String, String),
    }

    #[derive(Debug, Default)]
    struct FakeState {
        calls: Vec<Call>,
        clusters: Vec<String>,
        namespaces: Vec<String>,
        lists: HashMap<(ResourceKind, String), Vec<ResourceSummary>>,
        yaml: HashMap<(ResourceKind, String), String>,
        fail_with: Option<BackendError>,
        apply_error: Option<BackendError>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct FakeBackend {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeBackend {
        fn state(&self) -> MutexGuard<'_, FakeState> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        pub fn with_clusters(self, clusters: &[&str]) -> Self {
            self.state().clusters = clusters.iter().map(|c| c.to_string()).collect();
            self
        }

        pub fn with_namespaces(self, namespaces: &[&str]) -> Self {
            self.state().namespaces = namespaces.iter().map(|n| n.to_string()).collect();
            self
        }

        pub fn set_list(&self, kind: ResourceKind, namespace: &str, items: Vec<ResourceSummary>) {
            self.state()
                .lists
                .insert((kind, namespace.to_string()), items);
        }

        pub fn set_yaml(&self, kind: ResourceKind, name: &str, yaml: &str) {
            self.state()
                .yaml
                .insert((kind, name.to_string()), yaml.to_string());
        }

        /// Makes every call except `apply_yaml` fail with `error`.
        pub fn fail_with(&self, error: BackendError) {
            self.state().fail_with = Some(error);
        }

        pub fn fail_apply_with(&self, error: BackendError) {
            self.state().apply_error = Some(error);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.state().calls.clone()
        }

        fn record(&self, call: Call) -> Result<(), BackendError> {
            let mut state = self.state();
            state.calls.push(call);
            match &state.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ResourceBackend for FakeBackend {
        async fn clusters(&self) -> Result<Vec<String>, BackendError> {
            self.record(Call::Clusters)?;
            Ok(self.state().clusters.clone())
        }

        async fn namespaces(&self) -> Result<Vec<String>, BackendError> {
            self.record(Call::Namespaces)?;
            Ok(self.state().namespaces.clone())
        }

        async fn set_current_cluster(&self, cluster: &str) -> Result<(), BackendError> {
            self.record(Call::SetCurrentCluster(cluster.to_string()))
        }

        async fn list(
            &self,
            kind: ResourceKind,
            namespace: &str,
        ) -> Result<Vec<ResourceSummary>, BackendError> {
            self.record(Call::List(kind, namespace.to_string()))?;
            Ok(self
                .state()
                .lists
                .get(&(kind, namespace.to_string()))
                .cloned()
                .unwrap_or_default())
        }

        async fn resource_yaml(
            &self,
            kind: ResourceKind,
            name: &str,
            namespace: &str,
        ) -> Result<String, BackendError> {
            self.record(Call::ResourceYaml(
                kind,
                name.to_string(),
                namespace.to_string(),
            ))?;
            self.state()
                .yaml
                .get(&(kind, name.to_string()))
                .cloned()
                .ok_or_else(|| BackendError::NotFound(format!("{kind} \"{name}\" not found")))
        }

        async fn delete(
            &self,
            kind: ResourceKind,
            name: &str,
            namespace: &str,
        ) -> Result<(), BackendError> {
            self.record(Call::Delete(kind, name.to_string(), namespace.to_string()))
        }

        async fn scale(
            &self,
            kind: ResourceKind,
            name: &str,
            namespace: &str,
            replicas: i32,
        ) -> Result<(), BackendError> {
            self.record(Call::Scale(
                kind,
                name.to_string(),
                namespace.to_string(),
                replicas,
            ))
        }

        async fn apply_yaml(
            &self,
            kind: ResourceKind,
            yaml: &str,
        ) -> Result<String, BackendError> {
            let mut state = self.state();
            state.calls.push(Call::ApplyYaml(kind, yaml.to_string()));
            match &state.apply_error {
                Some(error) => Err(error.clone()),
                None => Ok(format!("Successfully applied changes to {kind}")),
            }
        }

        async fn pod_definition(
            &self,
            name: &str,
            namespace: &str,
        ) -> Result<String, BackendError> {
            self.record(Call::PodDefinition(name.to_string(), namespace.to_string()))?;
            Ok(format!("kind: Pod\nmetadata:\n  name: {name}\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BackendError;

    #[test]
    fn yaml_errors_are_invalid_manifests() {
        let error = serde_yaml::from_str::<serde_json::Value>("a: [1, 2")
            .map_err(BackendError::from)
            .unwrap_err();
        assert!(matches!(error, BackendError::InvalidManifest(_)));
    }

    #[test]
    fn display_is_the_raw_detail() {
        let error = BackendError::Transport("invalid syntax".to_string());
        assert_eq!(error.to_string(), "invalid syntax");
    }
}
