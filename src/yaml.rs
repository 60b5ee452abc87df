use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{info, warn};

use crate::backend::BackendError;
use crate::model::ResourceKind;
use crate::notification::Notification;

/// Manifest text opened in the editor, with the object it was loaded for.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct YamlDocument {
    pub kind: ResourceKind,
    pub name: String,
    pub namespace: String,
    pub text: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LoadOutcome {
    Ready(YamlDocument),
    NeedsFetch {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },
}

pub fn encode_yaml(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

pub fn decode_yaml(encoded: &str) -> Result<String> {
    urlencoding::decode(encoded)
        .map(|text| text.into_owned())
        .context("yaml parameter is not valid UTF-8 after percent-decoding")
}

/// Resolves the document for the editor route.
///
/// An inline payload is decoded and used as is; without one (or with one that
/// fails to decode) the caller has to fetch the manifest.
pub fn load(
    kind: ResourceKind,
    name: &str,
    namespace: &str,
    inline: Option<&str>,
) -> LoadOutcome {
    if let Some(encoded) = inline {
        match decode_yaml(encoded) {
            Ok(text) => {
                return LoadOutcome::Ready(YamlDocument {
                    kind,
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                    text,
                });
            }
            Err(error) => warn!("discarding inline yaml for {kind} {name}: {error:#}"),
        }
    }

    LoadOutcome::NeedsFetch {
        kind,
        name: name.to_string(),
        namespace: namespace.to_string(),
    }
}

pub fn apply_notification(result: Result<String, BackendError>, now: Instant) -> Notification {
    match result {
        Ok(message) => {
            info!("{message}");
            Notification::success(message, now)
        }
        Err(error) => {
            warn!("failed to apply yaml: {error}");
            Notification::error(format!("Failed to apply YAML: {error}"), now)
        }
    }
}
