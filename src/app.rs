use crate::dispatch::BackendEvent;
use crate::editor::TextBuffer;
use crate::input::Action;
use crate::menu::{MenuAction, MenuOutcome};
use crate::model::ResourceKind;
use crate::notification::Notification;
use crate::polling::{FetchOutcome, FetchTicket, ViewId};
use crate::route::{EditorParams, Route};
use crate::view::ResourceView;
use crate::yaml::{self, LoadOutcome};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputMode {
    Normal,
    Menu,
    ClusterPicker,
    NamespacePicker,
    Prompt,
    Editor,
}

/// Where a fetched manifest goes once it arrives. `Navigate` only applies
/// while the list it was requested from is still mounted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum YamlTarget {
    Navigate { from: ViewId },
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    None,
    Batch(Vec<AppCommand>),
    Fetch(FetchTicket),
    StartPolling {
        view: ViewId,
        every: Duration,
    },
    StopPolling,
    LoadClusters,
    LoadNamespaces,
    SwitchCluster {
        cluster: String,
    },
    LoadYaml {
        kind: ResourceKind,
        name: String,
        namespace: String,
        target: YamlTarget,
    },
    Delete {
        view: ViewId,
        kind: ResourceKind,
        name: String,
        namespace: String,
    },
    Scale {
        view: ViewId,
        kind: ResourceKind,
        name: String,
        namespace: String,
        replicas: i32,
    },
    LoadDefinition {
        name: String,
        namespace: String,
    },
    ApplyYaml {
        kind: ResourceKind,
        name: String,
        namespace: String,
        text: String,
    },
}

impl AppCommand {
    fn batch(mut commands: Vec<AppCommand>) -> Self {
        commands.retain(|command| *command != AppCommand::None);
        match commands.len() {
            0 => AppCommand::None,
            1 => commands.remove(0),
            _ => AppCommand::Batch(commands),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum PromptKind {
    Route,
    Replicas {
        view: ViewId,
        kind: ResourceKind,
        name: String,
        namespace: String,
    },
}

#[derive(Debug, Clone)]
struct PromptState {
    kind: PromptKind,
    input: String,
}

#[derive(Debug, Clone, Default)]
pub struct Picker {
    items: Vec<String>,
    selected: usize,
    loading: bool,
}

impl Picker {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    fn set_items(&mut self, items: Vec<String>, current: &str) {
        self.selected = items.iter().position(|item| item == current).unwrap_or(0);
        self.items = items;
        self.loading = false;
    }

    fn move_by(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    fn current(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }
}

/// Editor route state. `buffer` is empty while the manifest is still loading.
#[derive(Debug)]
pub struct EditorSession {
    pub kind: ResourceKind,
    pub name: String,
    pub namespace: String,
    pub buffer: Option<TextBuffer>,
    pub saving: bool,
}

impl EditorSession {
    fn is_for(&self, kind: ResourceKind, name: &str, namespace: &str) -> bool {
        self.kind == kind && self.name == name && self.namespace == namespace
    }
}

pub struct App {
    running: bool,
    mode: InputMode,
    route: Route,
    cluster: String,
    namespace: String,
    clusters: Picker,
    namespaces: Picker,
    view: Option<ResourceView>,
    next_view: u64,
    poll_interval: Duration,
    editor: Option<EditorSession>,
    prompt: Option<PromptState>,
    notification: Option<Notification>,
    status: String,
    show_help: bool,
    page_size: usize,
}

impl App {
    pub fn new(cluster: String, namespace: String, poll_interval: Duration) -> Self {
        Self {
            running: true,
            mode: InputMode::Normal,
            route: Route::Dashboard,
            cluster,
            namespace,
            clusters: Picker::default(),
            namespaces: Picker::default(),
            view: None,
            next_view: 0,
            poll_interval,
            editor: None,
            prompt: None,
            notification: None,
            status: "Ready".to_string(),
            show_help: false,
            page_size: 10,
        }
    }

    pub fn start(&mut self, route: Route) -> AppCommand {
        let mount = self.navigate(route);
        AppCommand::batch(vec![AppCommand::LoadClusters, AppCommand::LoadNamespaces, mount])
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn clusters(&self) -> &Picker {
        &self.clusters
    }

    pub fn namespaces(&self) -> &Picker {
        &self.namespaces
    }

    pub fn view(&self) -> Option<&ResourceView> {
        self.view.as_ref()
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn prompt_label(&self) -> Option<String> {
        self.prompt.as_ref().map(|prompt| match &prompt.kind {
            PromptKind::Route => ":".to_string(),
            PromptKind::Replicas { kind, name, .. } => format!("replicas for {kind} {name}: "),
        })
    }

    pub fn prompt_input(&self) -> Option<&str> {
        self.prompt.as_ref().map(|prompt| prompt.input.as_str())
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn set_table_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    pub fn set_editor_height(&mut self, rows: usize) {
        if let Some(buffer) = self.editor.as_mut().and_then(|editor| editor.buffer.as_mut()) {
            buffer.ensure_visible(rows);
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn tick(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.is_expired(now))
        {
            self.notification = None;
        }
    }

    /// Tears down the mounted view and enters `route`.
    pub fn navigate(&mut self, route: Route) -> AppCommand {
        let mut commands = Vec::new();
        if let Some(mut view) = self.view.take() {
            if view.controller.interval().is_some() {
                commands.push(AppCommand::StopPolling);
            }
            view.unmount();
            debug!("unmounted {:?}", view.controller.view());
        }
        self.editor = None;
        self.prompt = None;
        self.mode = InputMode::Normal;
        self.route = route.clone();
        info!("route={}", route.to_path());

        match route {
            Route::Resources(kind) => {
                self.next_view += 1;
                let id = ViewId(self.next_view);
                let interval = kind.auto_refresh().then_some(self.poll_interval);
                let mut view = ResourceView::mount(id, kind, interval);
                if let Some(ticket) = view.controller.request(&self.namespace) {
                    commands.push(AppCommand::Fetch(ticket));
                }
                if let Some(every) = interval {
                    commands.push(AppCommand::StartPolling { view: id, every });
                }
                self.view = Some(view);
                self.status = format!("{} in {}", kind.title(), self.namespace);
            }
            Route::YamlEditor(params) => {
                commands.push(self.open_editor(params));
                self.mode = InputMode::Editor;
            }
            Route::Dashboard | Route::Settings => {
                self.status = route_status(&self.route);
            }
        }

        AppCommand::batch(commands)
    }

    fn open_editor(&mut self, params: EditorParams) -> AppCommand {
        let EditorParams {
            kind,
            name,
            namespace,
            yaml,
        } = params;

        match yaml::load(kind, &name, &namespace, yaml.as_deref()) {
            LoadOutcome::Ready(document) => {
                self.status = format!("Editing {kind} {namespace}/{name}");
                self.editor = Some(EditorSession {
                    kind,
                    name,
                    namespace,
                    buffer: Some(TextBuffer::from_text(&document.text)),
                    saving: false,
                });
                AppCommand::None
            }
            LoadOutcome::NeedsFetch {
                kind,
                name,
                namespace,
            } => {
                self.status = format!("Loading YAML for {kind} {namespace}/{name}…");
                self.editor = Some(EditorSession {
                    kind,
                    name: name.clone(),
                    namespace: namespace.clone(),
                    buffer: None,
                    saving: false,
                });
                AppCommand::LoadYaml {
                    kind,
                    name,
                    namespace,
                    target: YamlTarget::Editor,
                }
            }
        }
    }

    fn is_mounted(&self, view: ViewId) -> bool {
        self.view
            .as_ref()
            .is_some_and(|mounted| mounted.controller.view() == view)
    }

    fn refresh_view(&mut self) -> AppCommand {
        let Some(view) = self.view.as_mut() else {
            return AppCommand::None;
        };
        view.controller
            .request(&self.namespace)
            .map_or(AppCommand::None, AppCommand::Fetch)
    }

    fn set_namespace(&mut self, namespace: String) -> AppCommand {
        if namespace == self.namespace {
            return AppCommand::None;
        }
        info!("namespace={namespace}");
        self.namespace = namespace;
        self.status = format!("Namespace set to {}", self.namespace);
        self.refresh_view()
    }

    pub fn apply_action(&mut self, action: Action) -> AppCommand {
        if self.show_help && !matches!(action, Action::ToggleHelp) {
            self.show_help = false;
            if matches!(action, Action::Cancel) {
                return AppCommand::None;
            }
        }

        match self.mode {
            InputMode::Normal => self.apply_normal_action(action),
            InputMode::Menu => self.apply_menu_action(action),
            InputMode::ClusterPicker | InputMode::NamespacePicker => {
                self.apply_picker_action(action)
            }
            InputMode::Prompt => self.apply_prompt_action(action),
            InputMode::Editor => self.apply_editor_action(action),
        }
    }

    fn apply_normal_action(&mut self, action: Action) -> AppCommand {
        let page = self.page_size as isize;
        match action {
            Action::Quit => {
                self.running = false;
                self.status = "Exit requested".to_string();
                AppCommand::None
            }
            Action::NextRoute => self.navigate_by_offset(1),
            Action::PrevRoute => self.navigate_by_offset(-1),
            Action::GoTo(index) => match Route::navigable().into_iter().nth(index as usize) {
                Some(route) => self.navigate(route),
                None => AppCommand::None,
            },
            Action::Down => self.with_view(|view| view.move_selection(1)),
            Action::Up => self.with_view(|view| view.move_selection(-1)),
            Action::PageDown => self.with_view(|view| view.move_selection(page)),
            Action::PageUp => self.with_view(|view| view.move_selection(-page)),
            Action::Top => self.with_view(ResourceView::select_first),
            Action::Bottom => self.with_view(ResourceView::select_last),
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                AppCommand::None
            }
            Action::Refresh => {
                let command = self.refresh_view();
                if command != AppCommand::None {
                    self.status = "Refreshing…".to_string();
                }
                command
            }
            Action::OpenMenu => {
                if self.view.as_mut().is_some_and(ResourceView::open_menu) {
                    self.mode = InputMode::Menu;
                } else {
                    self.status = "Nothing selected".to_string();
                }
                AppCommand::None
            }
            Action::OpenClusterPicker => {
                self.mode = InputMode::ClusterPicker;
                self.clusters.loading = true;
                AppCommand::LoadClusters
            }
            Action::OpenNamespacePicker => {
                self.mode = InputMode::NamespacePicker;
                self.namespaces.loading = true;
                AppCommand::LoadNamespaces
            }
            Action::StartPrompt => {
                self.prompt = Some(PromptState {
                    kind: PromptKind::Route,
                    input: String::new(),
                });
                self.mode = InputMode::Prompt;
                AppCommand::None
            }
            Action::DismissNotification => {
                self.dismiss_notification();
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn with_view(&mut self, apply: impl FnOnce(&mut ResourceView)) -> AppCommand {
        if let Some(view) = self.view.as_mut() {
            apply(view);
        }
        AppCommand::None
    }

    fn navigate_by_offset(&mut self, offset: isize) -> AppCommand {
        let routes = Route::navigable();
        let current = match &self.route {
            Route::YamlEditor(params) => Route::Resources(params.kind),
            other => other.clone(),
        };
        let index = routes
            .iter()
            .position(|route| *route == current)
            .unwrap_or(0) as isize;
        let next = (index + offset).rem_euclid(routes.len() as isize) as usize;
        self.navigate(routes[next].clone())
    }

    fn apply_menu_action(&mut self, action: Action) -> AppCommand {
        let Some(view) = self.view.as_mut() else {
            self.mode = InputMode::Normal;
            return AppCommand::None;
        };

        match action {
            Action::Down => view.menu.move_highlight(1),
            Action::Up => view.menu.move_highlight(-1),
            Action::Top => {
                let highlighted = view.menu.highlighted() as isize;
                view.menu.move_highlight(-highlighted);
            }
            Action::Bottom => {
                let remaining = view.menu.actions().len() as isize
                    - 1
                    - view.menu.highlighted() as isize;
                view.menu.move_highlight(remaining);
            }
            Action::Submit => {
                let outcome = view.menu.invoke_highlighted();
                self.mode = InputMode::Normal;
                return self.handle_menu_outcome(outcome);
            }
            Action::Cancel => {
                view.menu.close();
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
        AppCommand::None
    }

    /// Runs `action` against the row the menu was opened on.
    pub fn invoke_menu_action(&mut self, action: MenuAction) -> AppCommand {
        let Some(view) = self.view.as_mut() else {
            return AppCommand::None;
        };
        let outcome = view.menu.invoke(action);
        self.mode = InputMode::Normal;
        self.handle_menu_outcome(outcome)
    }

    fn handle_menu_outcome(&mut self, outcome: MenuOutcome) -> AppCommand {
        let Some(origin) = self.view.as_ref().map(|view| view.controller.view()) else {
            return AppCommand::None;
        };
        match outcome {
            MenuOutcome::Edit {
                kind,
                name,
                namespace,
            } => {
                self.status = format!("Loading YAML for {kind} {namespace}/{name}…");
                AppCommand::LoadYaml {
                    kind,
                    name,
                    namespace,
                    target: YamlTarget::Navigate { from: origin },
                }
            }
            MenuOutcome::Delete {
                kind,
                name,
                namespace,
            } => {
                self.status = format!("Deleting {kind} {namespace}/{name}…");
                AppCommand::Delete {
                    view: origin,
                    kind,
                    name,
                    namespace,
                }
            }
            MenuOutcome::Scale {
                kind,
                name,
                namespace,
            } => {
                self.prompt = Some(PromptState {
                    kind: PromptKind::Replicas {
                        view: origin,
                        kind,
                        name,
                        namespace,
                    },
                    input: String::new(),
                });
                self.mode = InputMode::Prompt;
                AppCommand::None
            }
            MenuOutcome::Definition { name, namespace } => {
                self.status = format!("Loading definition for pod {namespace}/{name}…");
                AppCommand::LoadDefinition { name, namespace }
            }
            MenuOutcome::NotWired { action, name } => {
                self.status = format!("{} for {name} is not available yet", action.label());
                AppCommand::None
            }
            MenuOutcome::Ignored => AppCommand::None,
        }
    }

    fn apply_picker_action(&mut self, action: Action) -> AppCommand {
        let cluster_mode = self.mode == InputMode::ClusterPicker;
        let picker = if cluster_mode {
            &mut self.clusters
        } else {
            &mut self.namespaces
        };
        let page = self.page_size as isize;

        match action {
            Action::Down => picker.move_by(1),
            Action::Up => picker.move_by(-1),
            Action::PageDown => picker.move_by(page),
            Action::PageUp => picker.move_by(-page),
            Action::Top => picker.selected = 0,
            Action::Bottom => picker.selected = picker.items.len().saturating_sub(1),
            Action::Cancel => self.mode = InputMode::Normal,
            Action::Submit => {
                let choice = picker.current().map(str::to_string);
                self.mode = InputMode::Normal;
                let Some(choice) = choice else {
                    return AppCommand::None;
                };
                return if cluster_mode {
                    self.switch_cluster(choice)
                } else {
                    self.set_namespace(choice)
                };
            }
            _ => {}
        }
        AppCommand::None
    }

    fn switch_cluster(&mut self, cluster: String) -> AppCommand {
        if cluster == self.cluster {
            return AppCommand::None;
        }
        self.status = format!("Switching to {cluster}…");
        AppCommand::SwitchCluster { cluster }
    }

    fn apply_prompt_action(&mut self, action: Action) -> AppCommand {
        let Some(prompt) = self.prompt.as_mut() else {
            self.mode = InputMode::Normal;
            return AppCommand::None;
        };

        match action {
            Action::InputChar(ch) => prompt.input.push(ch),
            Action::Paste(text) => {
                prompt
                    .input
                    .push_str(text.lines().next().unwrap_or_default());
            }
            Action::Backspace => {
                prompt.input.pop();
            }
            Action::Delete => prompt.input.clear(),
            Action::Cancel => {
                self.prompt = None;
                self.mode = InputMode::Normal;
            }
            Action::Submit => {
                let prompt = self.prompt.take();
                self.mode = InputMode::Normal;
                if let Some(PromptState { kind, input }) = prompt {
                    return self.submit_prompt(kind, input.trim());
                }
            }
            _ => {}
        }
        AppCommand::None
    }

    fn submit_prompt(&mut self, kind: PromptKind, input: &str) -> AppCommand {
        match kind {
            PromptKind::Route => self.run_prompt_command(input),
            PromptKind::Replicas {
                view,
                kind,
                name,
                namespace,
            } => match input.parse::<i32>() {
                Ok(replicas) if replicas >= 0 => {
                    self.status = format!("Scaling {kind} {namespace}/{name} to {replicas}…");
                    AppCommand::Scale {
                        view,
                        kind,
                        name,
                        namespace,
                        replicas,
                    }
                }
                _ => {
                    self.status = format!("Invalid replica count: {input}");
                    AppCommand::None
                }
            },
        }
    }

    fn run_prompt_command(&mut self, input: &str) -> AppCommand {
        if input.is_empty() {
            return AppCommand::None;
        }

        let mut parts = input.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let arg = parts.next();
        match (head, arg) {
            ("q" | "quit", None) => {
                self.running = false;
                AppCommand::None
            }
            ("ns" | "namespace", Some(namespace)) => self.set_namespace(namespace.to_string()),
            ("ns" | "namespace", None) => {
                self.mode = InputMode::NamespacePicker;
                self.namespaces.loading = true;
                AppCommand::LoadNamespaces
            }
            ("ctx" | "cluster" | "context", Some(cluster)) => {
                self.switch_cluster(cluster.to_string())
            }
            ("ctx" | "cluster" | "context", None) => {
                self.mode = InputMode::ClusterPicker;
                self.clusters.loading = true;
                AppCommand::LoadClusters
            }
            _ => match Route::parse(input) {
                Ok(route) => self.navigate(route),
                Err(error) => {
                    self.status = format!("{error:#}");
                    AppCommand::None
                }
            },
        }
    }

    fn apply_editor_action(&mut self, action: Action) -> AppCommand {
        let Some(editor) = self.editor.as_mut() else {
            self.mode = InputMode::Normal;
            return AppCommand::None;
        };

        if let Action::Cancel = action {
            let kind = editor.kind;
            return self.navigate(Route::Resources(kind));
        }
        if let Action::DismissNotification = action {
            self.notification = None;
            return AppCommand::None;
        }

        let page = self.page_size;
        let Some(buffer) = editor.buffer.as_mut() else {
            return AppCommand::None;
        };
        match action {
            Action::Save => {
                editor.saving = true;
                self.status = format!("Applying {} {}…", editor.kind, editor.name);
                return AppCommand::ApplyYaml {
                    kind: editor.kind,
                    name: editor.name.clone(),
                    namespace: editor.namespace.clone(),
                    text: buffer.text(),
                };
            }
            Action::InputChar(ch) => buffer.insert_char(ch),
            Action::Paste(text) => buffer.insert_str(&text.replace("\r\n", "\n")),
            Action::Newline => buffer.newline(),
            Action::Backspace => buffer.backspace(),
            Action::Delete => buffer.delete(),
            Action::CursorLeft => buffer.move_left(),
            Action::CursorRight => buffer.move_right(),
            Action::Up => buffer.move_up(1),
            Action::Down => buffer.move_down(1),
            Action::PageUp => buffer.move_up(page),
            Action::PageDown => buffer.move_down(page),
            Action::Home => buffer.home(),
            Action::End => buffer.end(),
            _ => {}
        }
        AppCommand::None
    }

    pub fn handle_event(&mut self, event: BackendEvent) -> AppCommand {
        match event {
            BackendEvent::Fetched { ticket, result } => {
                let Some(view) = self.view.as_mut() else {
                    debug!("no mounted view for {:?}", ticket.view);
                    return AppCommand::None;
                };
                let error = result.as_ref().err().map(ToString::to_string);
                match view.controller.resolve(&ticket, result) {
                    FetchOutcome::Applied => view.clamp_selection(),
                    FetchOutcome::Failed => {
                        self.status = format!(
                            "Failed to load {}: {}",
                            ticket.kind.title(),
                            error.unwrap_or_default()
                        );
                    }
                    FetchOutcome::Stale | FetchOutcome::Detached => {}
                }
                AppCommand::None
            }
            BackendEvent::PollTick { view } => {
                let Some(mounted) = self.view.as_ref().filter(|_| self.is_mounted(view)) else {
                    return AppCommand::None;
                };
                // keep the outstanding ticket until it resolves
                if mounted.controller.in_flight(&self.namespace) {
                    debug!("skipping poll tick for {view:?}, previous fetch still running");
                    return AppCommand::None;
                }
                self.refresh_view()
            }
            BackendEvent::Clusters(result) => {
                match result {
                    Ok(clusters) => self.clusters.set_items(clusters, &self.cluster),
                    Err(error) => {
                        self.clusters.loading = false;
                        warn!("failed to load clusters: {error}");
                        self.status = format!("Failed to load clusters: {error}");
                    }
                }
                AppCommand::None
            }
            BackendEvent::Namespaces(result) => {
                match result {
                    Ok(namespaces) => self.namespaces.set_items(namespaces, &self.namespace),
                    Err(error) => {
                        self.namespaces.loading = false;
                        warn!("failed to load namespaces: {error}");
                        self.status = format!("Failed to load namespaces: {error}");
                    }
                }
                AppCommand::None
            }
            BackendEvent::ClusterSwitched { cluster, result } => match result {
                Ok(()) => {
                    info!("cluster={cluster}");
                    self.status = format!("Switched to {cluster}");
                    self.notification = Some(Notification::info(
                        format!("Switched to cluster {cluster}"),
                        Instant::now(),
                    ));
                    self.cluster = cluster;
                    let refresh = self.refresh_view();
                    AppCommand::batch(vec![AppCommand::LoadNamespaces, refresh])
                }
                Err(error) => {
                    warn!("failed to switch cluster to {cluster}: {error}");
                    self.status = format!("Failed to switch to {cluster}: {error}");
                    AppCommand::None
                }
            },
            BackendEvent::YamlLoaded {
                kind,
                name,
                namespace,
                target,
                result,
            } => self.on_yaml_loaded(kind, name, namespace, target, result),
            BackendEvent::Deleted {
                view,
                kind,
                name,
                namespace,
                result,
            } => match result {
                Ok(()) if !self.is_mounted(view) => {
                    info!("deleted {kind} {namespace}/{name} after leaving its list");
                    AppCommand::None
                }
                Ok(()) => {
                    self.status = format!("Deleted {kind} {namespace}/{name}");
                    self.refresh_view()
                }
                Err(error) => {
                    warn!("failed to delete {kind} {namespace}/{name}: {error}");
                    self.status = format!("Delete failed for {kind} {name}: {error}");
                    AppCommand::None
                }
            },
            BackendEvent::Scaled {
                view,
                kind,
                name,
                namespace,
                replicas,
                result,
            } => match result {
                Ok(()) if !self.is_mounted(view) => {
                    info!("scaled {kind} {namespace}/{name} to {replicas} after leaving its list");
                    AppCommand::None
                }
                Ok(()) => {
                    self.status = format!("Scaled {kind} {namespace}/{name} to {replicas}");
                    self.refresh_view()
                }
                Err(error) => {
                    warn!("failed to scale {kind} {namespace}/{name}: {error}");
                    self.status = format!("Scale failed for {kind} {name}: {error}");
                    AppCommand::None
                }
            },
            BackendEvent::DefinitionLoaded {
                name,
                namespace,
                result,
            } => {
                match result {
                    Ok(definition) => {
                        debug!("pod definition {namespace}/{name}:\n{definition}");
                        self.status = format!("Loaded definition for pod {namespace}/{name}");
                    }
                    Err(error) => {
                        warn!("failed to load pod definition {namespace}/{name}: {error}");
                        self.status = format!("Failed to load definition for {name}: {error}");
                    }
                }
                AppCommand::None
            }
            BackendEvent::Applied {
                kind,
                name,
                namespace,
                result,
            } => {
                let succeeded = result.is_ok();
                if let Some(editor) = self
                    .editor
                    .as_mut()
                    .filter(|editor| editor.is_for(kind, &name, &namespace))
                {
                    editor.saving = false;
                    if succeeded && let Some(buffer) = editor.buffer.as_mut() {
                        buffer.mark_clean();
                    }
                }
                let notification = yaml::apply_notification(result, Instant::now());
                self.status = notification.message.clone();
                self.notification = Some(notification);
                AppCommand::None
            }
        }
    }

    fn on_yaml_loaded(
        &mut self,
        kind: ResourceKind,
        name: String,
        namespace: String,
        target: YamlTarget,
        result: Result<String, crate::backend::BackendError>,
    ) -> AppCommand {
        let yaml = match result {
            Ok(yaml) => yaml,
            Err(error) => {
                warn!("failed to get {kind} yaml {namespace}/{name}: {error}");
                self.status = format!("Failed to get {kind} YAML: {error}");
                return AppCommand::None;
            }
        };

        match target {
            YamlTarget::Navigate { from } if !self.is_mounted(from) => {
                debug!("left the list before {kind} {name} yaml arrived");
                AppCommand::None
            }
            YamlTarget::Navigate { .. } => self.navigate(Route::YamlEditor(EditorParams {
                kind,
                name,
                namespace,
                yaml: Some(yaml::encode_yaml(&yaml)),
            })),
            YamlTarget::Editor => {
                match self.editor.as_mut() {
                    Some(editor) if editor.is_for(kind, &name, &namespace) => {
                        editor.buffer = Some(TextBuffer::from_text(&yaml));
                        self.status = format!("Editing {kind} {namespace}/{name}");
                    }
                    _ => debug!("editor closed before {kind} {name} yaml arrived"),
                }
                AppCommand::None
            }
        }
    }
}

fn route_status(route: &Route) -> String {
    match route {
        Route::Dashboard => "Dashboard".to_string(),
        Route::Settings => "Settings".to_string(),
        other => other.title(),
    }
}
