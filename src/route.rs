use anyhow::{Result, anyhow, bail};
use std::fmt::{Display, Formatter};

use crate::model::ResourceKind;

pub const EDITOR_PATH: &str = "/yaml-editor";

/// Parameters of the editor route. `yaml` stays percent-encoded until the
/// editor loads it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EditorParams {
    pub kind: ResourceKind,
    pub name: String,
    pub namespace: String,
    pub yaml: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Route {
    Dashboard,
    Resources(ResourceKind),
    Settings,
    YamlEditor(EditorParams),
}

impl Route {
    /// Entries reachable from the sidebar and the number keys, in order.
    pub fn navigable() -> Vec<Route> {
        let mut routes = vec![Route::Dashboard];
        routes.extend(ResourceKind::ALL.into_iter().map(Route::Resources));
        routes.push(Route::Settings);
        routes
    }

    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" | "/dashboard" => Ok(Route::Dashboard),
            "/settings" => Ok(Route::Settings),
            EDITOR_PATH => parse_editor_query(query.unwrap_or_default()).map(Route::YamlEditor),
            other => {
                let token = other.trim_start_matches('/');
                ResourceKind::from_token(token)
                    .map(Route::Resources)
                    .ok_or_else(|| anyhow!("unknown route: {input}"))
            }
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Resources(kind) => kind.path().to_string(),
            Route::Settings => "/settings".to_string(),
            Route::YamlEditor(params) => {
                let mut path = format!(
                    "{EDITOR_PATH}?resource={}&name={}&namespace={}",
                    params.kind.singular(),
                    urlencoding::encode(&params.name),
                    urlencoding::encode(&params.namespace),
                );
                if let Some(yaml) = &params.yaml {
                    path.push_str("&yaml=");
                    path.push_str(yaml);
                }
                path
            }
        }
    }

    pub fn title(&self) -> String {
        match self {
            Route::Dashboard => "Dashboard".to_string(),
            Route::Resources(kind) => kind.title().to_string(),
            Route::Settings => "Settings".to_string(),
            Route::YamlEditor(params) => format!(
                "Editing YAML for {}: {} in namespace: {}",
                params.kind, params.name, params.namespace
            ),
        }
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            Route::Resources(kind) => Some(*kind),
            Route::YamlEditor(params) => Some(params.kind),
            Route::Dashboard | Route::Settings => None,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

fn parse_editor_query(query: &str) -> Result<EditorParams> {
    let mut kind = None;
    let mut name = None;
    let mut namespace = None;
    let mut yaml = None;

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "resource" => {
                kind = Some(
                    ResourceKind::from_token(value)
                        .ok_or_else(|| anyhow!("unknown resource in editor route: {value}"))?,
                );
            }
            "pod" => {
                kind.get_or_insert(ResourceKind::Pods);
                name = Some(decode_param(value)?);
            }
            "name" => name = Some(decode_param(value)?),
            "namespace" => namespace = Some(decode_param(value)?),
            "yaml" if !value.is_empty() => yaml = Some(value.to_string()),
            _ => {}
        }
    }

    let Some(kind) = kind else {
        bail!("editor route needs a resource parameter");
    };
    let Some(name) = name.filter(|name| !name.is_empty()) else {
        bail!("editor route needs a name parameter");
    };
    let Some(namespace) = namespace.filter(|namespace| !namespace.is_empty()) else {
        bail!("editor route needs a namespace parameter");
    };

    Ok(EditorParams {
        kind,
        name,
        namespace,
        yaml,
    })
}

fn decode_param(value: &str) -> Result<String> {
    Ok(urlencoding::decode(value)?.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{EditorParams, Route};
    use crate::model::ResourceKind;
    use crate::yaml::{decode_yaml, encode_yaml};

    #[test]
    fn parses_list_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Dashboard);
        assert_eq!(
            Route::parse("/pods").unwrap(),
            Route::Resources(ResourceKind::Pods)
        );
        assert_eq!(
            Route::parse("/statefulsets/").unwrap(),
            Route::Resources(ResourceKind::StatefulSets)
        );
        assert_eq!(
            Route::parse("svc").unwrap(),
            Route::Resources(ResourceKind::Services)
        );
        assert_eq!(Route::parse("/settings").unwrap(), Route::Settings);
        assert!(Route::parse("/configmaps").is_err());
    }

    #[test]
    fn editor_route_carries_the_encoded_document() {
        let yaml = "kind: Deployment\nmetadata:\n  name: web\n";
        let route = Route::YamlEditor(EditorParams {
            kind: ResourceKind::Deployments,
            name: "web".to_string(),
            namespace: "default".to_string(),
            yaml: Some(encode_yaml(yaml)),
        });

        let path = route.to_path();
        assert!(path.starts_with("/yaml-editor?resource=deployment&name=web&namespace=default&yaml="));

        let parsed = Route::parse(&path).unwrap();
        assert_eq!(parsed, route);
        let Route::YamlEditor(params) = parsed else {
            panic!("expected editor route");
        };
        assert_eq!(decode_yaml(params.yaml.as_deref().unwrap()).unwrap(), yaml);
    }

    #[test]
    fn legacy_pod_parameter_selects_a_pod() {
        let route = Route::parse("/yaml-editor?pod=nginx-1&namespace=default").unwrap();
        assert_eq!(
            route,
            Route::YamlEditor(EditorParams {
                kind: ResourceKind::Pods,
                name: "nginx-1".to_string(),
                namespace: "default".to_string(),
                yaml: None,
            })
        );
    }

    #[test]
    fn editor_route_requires_its_parameters() {
        assert!(Route::parse("/yaml-editor").is_err());
        assert!(Route::parse("/yaml-editor?resource=pod&namespace=default").is_err());
        assert!(Route::parse("/yaml-editor?resource=pod&name=web").is_err());
        assert!(Route::parse("/yaml-editor?resource=secret&name=a&namespace=b").is_err());
    }

    #[test]
    fn navigable_routes_cover_every_list() {
        let routes = Route::navigable();
        assert_eq!(routes.first(), Some(&Route::Dashboard));
        assert_eq!(routes.last(), Some(&Route::Settings));
        assert_eq!(routes.len(), ResourceKind::ALL.len() + 2);
        assert_eq!(
            Route::Resources(ResourceKind::DaemonSets).title(),
            "DaemonSets"
        );
    }
}
