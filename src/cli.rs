use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "kubeglance",
    version,
    about = "Browse and edit Kubernetes workloads from the terminal."
)]
pub struct CliArgs {
    /// Start in a specific namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// kubeconfig context to connect with
    #[arg(long)]
    pub context: Option<String>,

    /// Initial route, for example /pods or /yaml-editor?resource=pod&name=web&namespace=default
    #[arg(long)]
    pub route: Option<String>,

    /// Pods auto-refresh interval in milliseconds
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// tracing filter (for example: info,debug,trace)
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Directory for the log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn parses_short_namespace_and_route() {
        let args = CliArgs::try_parse_from([
            "kubeglance",
            "-n",
            "kube-system",
            "--route",
            "/services",
            "--poll-ms",
            "2000",
        ])
        .unwrap();
        assert_eq!(args.namespace.as_deref(), Some("kube-system"));
        assert_eq!(args.route.as_deref(), Some("/services"));
        assert_eq!(args.poll_ms, Some(2000));
        assert!(args.context.is_none());
    }
}
