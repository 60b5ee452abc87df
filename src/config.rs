use crate::cli::CliArgs;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ROUTE: &str = "/pods";
pub const DEFAULT_POLL_MS: u64 = 1_000;
pub const MIN_POLL_MS: u64 = 250;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Deserialize, Default, Eq, PartialEq)]
struct KubeglanceConfigFile {
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    route: Option<String>,
    #[serde(default, alias = "poll_interval_ms")]
    poll_ms: Option<u64>,
    #[serde(default)]
    log_dir: Option<PathBuf>,
}

/// Startup settings after merging the config file with the command line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Settings {
    pub source: Option<PathBuf>,
    pub namespace: Option<String>,
    pub context: Option<String>,
    pub route: String,
    pub poll_interval: Duration,
    pub log_filter: String,
    pub log_dir: PathBuf,
}

impl Settings {
    pub fn load(args: &CliArgs) -> Result<Self> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        let env_override = std::env::var("KUBEGLANCE_CONFIG").ok();
        let path = discover_config_path(env_override.as_deref(), Path::new("."), home.as_deref());

        let file = match &path {
            Some(path) => read_config_file(path)?,
            None => KubeglanceConfigFile::default(),
        };
        Ok(Self::merge(args, file, path, home.as_deref()))
    }

    fn merge(
        args: &CliArgs,
        file: KubeglanceConfigFile,
        source: Option<PathBuf>,
        home: Option<&Path>,
    ) -> Self {
        let poll_ms = args
            .poll_ms
            .or(file.poll_ms)
            .unwrap_or(DEFAULT_POLL_MS)
            .max(MIN_POLL_MS);
        let log_dir = args
            .log_dir
            .clone()
            .or(file.log_dir)
            .unwrap_or_else(|| default_log_dir(home));

        Self {
            source,
            namespace: args.namespace.clone().or(file.namespace),
            context: args.context.clone(),
            route: args
                .route
                .clone()
                .or(file.route)
                .unwrap_or_else(|| DEFAULT_ROUTE.to_string()),
            poll_interval: Duration::from_millis(poll_ms),
            log_filter: args
                .log_filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_dir,
        }
    }
}

fn read_config_file(path: &Path) -> Result<KubeglanceConfigFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(KubeglanceConfigFile::default());
    }
    serde_yaml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}

fn discover_config_path(
    env_override: Option<&str>,
    cwd: &Path,
    home: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = env_override
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }

    let cwd_candidates = ["kubeglance.yaml", "kubeglance.yml", ".kubeglance.yaml"];
    for candidate in cwd_candidates {
        let candidate = cwd.join(candidate);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    let candidate = home?.join(".config/kubeglance/config.yaml");
    candidate.exists().then_some(candidate)
}

fn default_log_dir(home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) => home.join(".kubeglance").join("logs"),
        None => PathBuf::from("logs"),
    }
}
