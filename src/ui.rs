use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use crate::app::{App, InputMode, Picker};
use crate::menu::MenuAction;
use crate::model::ResourceKind;
use crate::notification::Severity;
use crate::route::Route;
use crate::view::ResourceView;

const BG: Color = Color::Rgb(9, 15, 25);
const PANEL: Color = Color::Rgb(16, 27, 44);
const ACCENT: Color = Color::Rgb(52, 211, 153);
const MUTED: Color = Color::Rgb(140, 156, 178);
const WARN: Color = Color::Rgb(251, 191, 36);
const ERROR: Color = Color::Rgb(248, 113, 113);
const PL_A: Color = Color::Rgb(17, 94, 89);
const PL_B: Color = Color::Rgb(30, 64, 175);
const PL_C: Color = Color::Rgb(55, 48, 163);
const SIDEBAR_WIDTH: u16 = 24;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, root[0], app);
    render_body(frame, root[1], app);
    render_footer(frame, root[2], app);

    match app.mode() {
        InputMode::ClusterPicker => {
            render_picker(frame, "Clusters", app.clusters(), app.cluster());
        }
        InputMode::NamespacePicker => {
            render_picker(frame, "Namespaces", app.namespaces(), app.namespace());
        }
        _ => {}
    }

    render_notification(frame, root[1], app);

    if app.show_help() {
        render_help_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    push_powerline_segment(&mut spans, " 󱃾 kubeglance ", Color::Black, ACCENT, PL_A);
    push_powerline_segment(
        &mut spans,
        format!(" 󰒋 {} ", compact_text(app.cluster(), 28)),
        Color::White,
        PL_A,
        PL_B,
    );
    push_powerline_segment(
        &mut spans,
        format!(" 󰅩 {} ", compact_text(app.namespace(), 24)),
        Color::White,
        PL_B,
        PL_C,
    );
    push_powerline_segment(
        &mut spans,
        format!(" {} ", compact_text(&app.route().title(), 48)),
        Color::White,
        PL_C,
        BG,
    );
    let left = Line::from(spans);

    let right = refresh_label(app);
    let right_width = right.chars().count() as u16;
    if right_width == 0 || right_width + 20 >= area.width {
        frame.render_widget(
            Paragraph::new(left).style(Style::default().bg(BG).fg(Color::White)),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right_width)])
        .split(area);
    frame.render_widget(
        Paragraph::new(left).style(Style::default().bg(BG).fg(Color::White)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(right)
            .style(Style::default().bg(BG).fg(MUTED))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn refresh_label(app: &App) -> String {
    let Some(view) = app.view() else {
        return String::new();
    };
    let state = view.controller.state();
    let last = state
        .last_refreshed
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let polling = view
        .controller
        .interval()
        .map(|every| format!(" every {}ms", every.as_millis()))
        .unwrap_or_default();
    if state.loading {
        format!("󰑓 loading… last {last}{polling} ")
    } else {
        format!("󰄬 last {last}{polling} ")
    }
}

fn render_body(frame: &mut Frame, area: Rect, app: &mut App) {
    let (sidebar, main) = if area.width > SIDEBAR_WIDTH * 3 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    if let Some(sidebar) = sidebar {
        render_sidebar(frame, sidebar, app);
    }

    app.set_table_page_size(table_rows_visible(main));
    match app.route().clone() {
        Route::Dashboard => render_dashboard(frame, main, app),
        Route::Resources(_) => {
            if let Some(view) = app.view() {
                render_resources(frame, main, view, app.namespace(), app.mode());
            }
        }
        Route::Settings => render_settings(frame, main, app),
        Route::YamlEditor(_) => {
            app.set_editor_height(main.height.saturating_sub(2) as usize);
            render_editor(frame, main, app);
        }
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let current = match app.route() {
        Route::YamlEditor(params) => Route::Resources(params.kind),
        other => other.clone(),
    };

    let mut lines = Vec::new();
    let mut last_group = "";
    for (index, route) in Route::navigable().into_iter().enumerate() {
        let group = route_group(&route);
        if group != last_group && !group.is_empty() {
            lines.push(Line::from(Span::styled(
                group.to_string(),
                Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
            )));
            last_group = group;
        }

        let label = format!(" {index} {} {}", route_icon(&route), route.title());
        let style = if route == current {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .style(Style::default().bg(PANEL)),
    );
    frame.render_widget(sidebar, area);
}

fn route_group(route: &Route) -> &'static str {
    match route {
        Route::Resources(ResourceKind::Services) => "Network",
        Route::Resources(_) => "Workloads",
        _ => "",
    }
}

fn route_icon(route: &Route) -> &'static str {
    match route {
        Route::Dashboard => "󰕮",
        Route::Resources(ResourceKind::Pods) => "󰋊",
        Route::Resources(ResourceKind::Deployments) => "󰹑",
        Route::Resources(ResourceKind::StatefulSets) => "󰆼",
        Route::Resources(ResourceKind::DaemonSets) => "󰒓",
        Route::Resources(ResourceKind::Services) => "󰖟",
        Route::Settings => "󰒓",
        Route::YamlEditor(_) => "󰈮",
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            "kubeglance",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Cluster    {}", app.cluster())),
        Line::from(format!("Namespace  {}", app.namespace())),
        Line::from(format!(
            "Pods refresh every {}ms",
            app.poll_interval().as_millis()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "1-5 open a resource list  c cluster  n namespace  : route  ? help",
            Style::default().fg(MUTED),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(panel("Dashboard", true)),
        area,
    );
}

fn render_settings(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(format!("Current cluster     {}", app.cluster())),
        Line::from(format!("Current namespace   {}", app.namespace())),
        Line::from(format!(
            "Pods refresh        {}ms",
            app.poll_interval().as_millis()
        )),
        Line::from(""),
        Line::from(Span::styled("Clusters", Style::default().fg(ACCENT))),
    ];
    if app.clusters().items().is_empty() {
        lines.push(Line::from(Span::styled("  -", Style::default().fg(MUTED))));
    }
    for cluster in app.clusters().items() {
        let marker = if cluster == app.cluster() { "●" } else { " " };
        lines.push(Line::from(format!("  {marker} {cluster}")));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(panel("Settings", true)),
        area,
    );
}

fn render_resources(
    frame: &mut Frame,
    area: Rect,
    view: &ResourceView,
    namespace: &str,
    mode: InputMode,
) {
    let kind = view.kind();
    let headers = kind.headers();
    let rows = view.rows();

    let header_row = Row::new(headers.iter().map(|header| {
        Cell::from(header.clone()).style(Style::default().add_modifier(Modifier::BOLD))
    }))
    .height(1)
    .style(Style::default().fg(ACCENT));

    let body = rows.iter().map(|row| {
        Row::new(
            row.columns()
                .into_iter()
                .map(|column| Cell::from(column).style(Style::default().fg(Color::White))),
        )
    });

    let loading = if view.controller.loading() {
        " 󰑓"
    } else {
        ""
    };
    let title = format!("{} in {} ({}){loading}", kind.title(), namespace, rows.len());
    let table = Table::new(body, column_constraints(headers.len()))
        .header(header_row)
        .block(panel(title, mode == InputMode::Normal))
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::Rgb(24, 36, 58))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("󰜴 ");

    let mut state = TableState::default();
    state.select(view.selected_index());
    frame.render_stateful_widget(table, area, &mut state);

    if rows.is_empty() {
        let message = if view.controller.loading() {
            "Loading…"
        } else {
            "No resources found"
        };
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: 1.min(area.height.saturating_sub(3)),
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(MUTED)),
            inner,
        );
    }

    if view.menu.is_open() {
        let anchor = view.menu.selection().map_or(0, |selection| selection.anchor);
        let anchor_y = area.y + 2 + anchor.saturating_sub(state.offset()) as u16;
        render_menu(frame, area, anchor_y, view);
    }
}

fn render_menu(frame: &mut Frame, area: Rect, anchor_y: u16, view: &ResourceView) {
    let actions = view.menu.actions();
    let width = 22u16.min(area.width);
    let height = (actions.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(width + 2);
    let max_y = area.y + area.height.saturating_sub(height);
    let y = (anchor_y + 1).min(max_y);
    let popup = Rect {
        x,
        y,
        width,
        height,
    };

    let lines = actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let label = format!(" {} {}", menu_icon(*action), action.label());
            let mut style = if action.wired() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(MUTED)
            };
            if index == view.menu.highlighted() {
                style = style.bg(ACCENT).fg(Color::Black).add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(label, style))
        })
        .collect::<Vec<_>>();

    let title = view
        .menu
        .selection()
        .map(|selection| {
            compact_text(&selection.resource.name, (width as usize).saturating_sub(4))
        })
        .unwrap_or_default();
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(panel(title, true)), popup);
}

fn menu_icon(action: MenuAction) -> &'static str {
    match action {
        MenuAction::Definition => "󰈙",
        MenuAction::Shell => "",
        MenuAction::Delete => "󰆴",
        MenuAction::Edit => "󰏫",
        MenuAction::Describe => "󰋽",
        MenuAction::Scale => "󰁌",
    }
}

fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = app.editor() else {
        return;
    };

    let mut title = app.route().title();
    if editor.buffer.as_ref().is_some_and(|buffer| buffer.is_dirty()) {
        title.push_str(" *");
    }
    if editor.saving {
        title.push_str("  applying…");
    }
    let block = panel(title, true);
    let inner = block.inner(area);

    let Some(buffer) = editor.buffer.as_ref() else {
        frame.render_widget(
            Paragraph::new("Loading YAML…")
                .style(Style::default().fg(MUTED))
                .block(block),
            area,
        );
        return;
    };

    let gutter = buffer.lines().len().to_string().len() as u16 + 1;
    let lines = buffer
        .lines()
        .iter()
        .enumerate()
        .skip(buffer.scroll())
        .take(inner.height as usize)
        .map(|(index, line)| {
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", index + 1, width = gutter as usize - 1),
                Style::default().fg(MUTED),
            )];
            spans.extend(highlight_yaml_line(line).spans);
            Line::from(spans)
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);

    let (row, col) = buffer.cursor();
    let y = inner.y + row.saturating_sub(buffer.scroll()) as u16;
    let x = inner.x + gutter + col as u16;
    if y < inner.y + inner.height && x < inner.x + inner.width {
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn render_picker(frame: &mut Frame, title: &str, picker: &Picker, current: &str) {
    let area = centered_rect(40, 50, frame.area());
    frame.render_widget(Clear, area);

    let lines = if picker.loading() && picker.items().is_empty() {
        vec![Line::from(Span::styled(
            "Loading…",
            Style::default().fg(MUTED),
        ))]
    } else {
        let visible = area.height.saturating_sub(2).max(1) as usize;
        let start = picker.selected().saturating_sub(visible.saturating_sub(1));
        picker
            .items()
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(index, item)| {
                let marker = if item == current { "●" } else { " " };
                let style = if index == picker.selected() {
                    Style::default()
                        .fg(Color::Black)
                        .bg(ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(format!(" {marker} {item}"), style))
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(panel(title, true)), area);
}

fn render_notification(frame: &mut Frame, area: Rect, app: &App) {
    let Some(notification) = app.notification() else {
        return;
    };

    let (icon, color) = match notification.severity {
        Severity::Success => ("󰄬", ACCENT),
        Severity::Error => ("󰅚", ERROR),
        Severity::Info => ("󰋽", WARN),
    };
    let width = (notification.message.chars().count() as u16 + 8)
        .min(area.width.saturating_sub(2))
        .max(20.min(area.width));
    let text_width = width.saturating_sub(4).max(1) as usize;
    let height = (visual_line_count(&notification.message, text_width) as u16 + 2)
        .min(area.height);
    let toast = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };

    frame.render_widget(Clear, toast);
    frame.render_widget(
        Paragraph::new(notification.message.clone())
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .title(format!(" {icon} "))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(PANEL)),
            ),
        toast,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if let (Some(label), Some(input)) = (app.prompt_label(), app.prompt_input()) {
        push_powerline_segment(&mut spans, " 󰘳 cmd ", Color::Black, ACCENT, PL_B);
        push_powerline_segment(
            &mut spans,
            format!(" {label}{input} "),
            Color::White,
            PL_B,
            BG,
        );
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(BG)),
            area,
        );
        return;
    }

    let status = app.status();
    push_powerline_segment(
        &mut spans,
        format!(" {} ", mode_label(app.mode())),
        Color::White,
        PL_A,
        PL_B,
    );
    let status_width = area.width.saturating_sub(24).min(120) as usize;
    push_powerline_segment(
        &mut spans,
        format!(
            " {} {} ",
            footer_status_icon(status),
            compact_text(status, status_width.max(24))
        ),
        Color::White,
        PL_B,
        BG,
    );

    let hint = key_hint(app.mode());
    let left_width = spans_width(&spans) as u16;
    let hint_width = hint.chars().count() as u16;
    if left_width + hint_width + 2 > area.width {
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(BG)),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(hint_width)])
        .split(area);
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(BG)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(hint)
            .style(Style::default().bg(BG).fg(MUTED))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn mode_label(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Normal => "󰘳 nrm",
        InputMode::Menu => "󰍜 menu",
        InputMode::ClusterPicker => "󰒋 ctx",
        InputMode::NamespacePicker => "󰅩 ns",
        InputMode::Prompt => "󰘳 cmd",
        InputMode::Editor => "󰏫 edit",
    }
}

fn key_hint(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Normal => "enter menu  r refresh  ? help ",
        InputMode::Menu => "enter run  esc close ",
        InputMode::ClusterPicker | InputMode::NamespacePicker => "enter select  esc close ",
        InputMode::Prompt => "enter run  esc cancel ",
        InputMode::Editor => "ctrl+s apply  ctrl+x dismiss  esc back ",
    }
}

fn footer_status_icon(status_text: &str) -> &'static str {
    let status = status_text.to_ascii_lowercase();
    let has_failure = [
        "failed",
        "error",
        "invalid",
        "refused",
        "forbidden",
        "not found",
    ]
    .iter()
    .any(|needle| status.contains(needle));
    if has_failure { "󰅚" } else { "󰄬" }
}

fn highlight_yaml_line(line: &str) -> Line<'static> {
    let indent_len = line
        .as_bytes()
        .iter()
        .take_while(|byte| **byte == b' ' || **byte == b'\t')
        .count();
    let indent = &line[..indent_len];
    let trimmed = &line[indent_len..];

    let mut spans = vec![Span::raw(indent.to_string())];
    if trimmed.is_empty() {
        return Line::from(spans);
    }

    if let Some(comment) = trimmed.strip_prefix('#') {
        spans.push(Span::styled(
            format!("#{comment}"),
            Style::default().fg(MUTED),
        ));
        return Line::from(spans);
    }

    if let Some(rest) = trimmed.strip_prefix("- ") {
        spans.push(Span::styled("- ", Style::default().fg(ACCENT)));
        spans.extend(highlight_yaml_content(rest));
        return Line::from(spans);
    }

    spans.extend(highlight_yaml_content(trimmed));
    Line::from(spans)
}

fn highlight_yaml_content(content: &str) -> Vec<Span<'static>> {
    let Some((key, value)) = split_yaml_key_value(content) else {
        return vec![Span::styled(
            content.to_string(),
            Style::default().fg(Color::White),
        )];
    };

    let mut spans = vec![
        Span::styled(
            key.to_string(),
            Style::default().fg(Color::Rgb(103, 232, 249)),
        ),
        Span::styled(":", Style::default().fg(MUTED)),
    ];
    if value.is_empty() {
        return spans;
    }

    // keep the raw spacing so the cursor column lines up with the text
    let padding = value.len() - value.trim_start().len();
    spans.push(Span::raw(value[..padding].to_string()));
    spans.push(Span::styled(
        value.trim_start().to_string(),
        Style::default().fg(yaml_value_color(value.trim())),
    ));
    spans
}

fn split_yaml_key_value(content: &str) -> Option<(&str, &str)> {
    let (key, value) = content.split_once(':')?;
    if key.is_empty() || key.contains(' ') || !(value.is_empty() || value.starts_with(' ')) {
        return None;
    }
    Some((key, value))
}

fn yaml_value_color(value: &str) -> Color {
    if value.starts_with('"') || value.starts_with('\'') {
        Color::Rgb(125, 211, 252)
    } else if matches!(value, "true" | "false" | "null" | "~") {
        WARN
    } else if value.parse::<f64>().is_ok() {
        Color::Rgb(251, 146, 60)
    } else if value.starts_with('{') || value.starts_with('[') || value.starts_with('#') {
        MUTED
    } else {
        Color::Rgb(147, 197, 253)
    }
}

fn push_powerline_segment(
    spans: &mut Vec<Span<'static>>,
    content: impl Into<String>,
    fg: Color,
    bg: Color,
    next_bg: Color,
) {
    spans.push(Span::styled(
        content.into(),
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("", Style::default().fg(bg).bg(next_bg)));
}

fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|span| span.content.chars().count()).sum()
}

fn panel<'a>(title: impl Into<Line<'a>>, focused: bool) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(MUTED)
        })
        .style(Style::default().bg(PANEL))
}

fn render_help_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(format!(
            "kubeglance help  mode:{}  route:{}",
            mode_label(app.mode()),
            app.route().to_path()
        )),
        Line::from(""),
    ];
    lines.extend(help_lines().into_iter().map(Line::from));

    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("Help", true))
        .style(Style::default().fg(Color::White));
    frame.render_widget(modal, area);
}

fn help_lines() -> Vec<&'static str> {
    vec![
        "Navigate: 0-6 sidebar entry  h/l or ←/→ previous/next  : route prompt",
        "Lists: j/k move  g/G top/bottom  r refresh  enter or m action menu",
        "Menu: enter run  esc close  (pods: definition shell delete edit describe)",
        "Selectors: c cluster  n namespace  :ns NAME  :cluster NAME",
        "Editor: ctrl+s apply  ctrl+x dismiss notification  esc back to list",
        "Notifications close after 6 seconds or with x",
        "Routes: / /pods /deployments /statefulsets /daemonsets /services /settings",
        "q quit",
    ]
}

fn table_rows_visible(area: Rect) -> usize {
    area.height.saturating_sub(3).max(1) as usize
}

fn visual_line_count(text: &str, width: usize) -> usize {
    text.lines()
        .map(|line| line.chars().count().max(1).div_ceil(width.max(1)))
        .sum::<usize>()
        .max(1)
}

fn compact_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    if max_chars <= 1 {
        return "…".to_string();
    }

    let mut out = value
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    out.push('…');
    out
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn column_constraints(columns: usize) -> Vec<Constraint> {
    if columns == 0 {
        return vec![Constraint::Percentage(100)];
    }

    let width = (100 / columns as u16).max(1);
    (0..columns)
        .map(|_| Constraint::Percentage(width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{compact_text, highlight_yaml_line, visual_line_count};

    fn rendered(line: &str) -> String {
        highlight_yaml_line(line)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn yaml_highlighting_keeps_the_text() {
        for line in [
            "  replicas:   3",
            "metadata:",
            "  - name: web",
            "# comment",
            "image: nginx:1.27",
            "",
        ] {
            assert_eq!(rendered(line), line);
        }
    }

    #[test]
    fn compact_text_truncates_with_ellipsis() {
        assert_eq!(compact_text("kube-system", 20), "kube-system");
        assert_eq!(compact_text("kube-system", 5), "kube…");
    }

    #[test]
    fn wrapped_messages_count_visual_lines() {
        assert_eq!(visual_line_count("Failed to apply YAML: invalid syntax", 10), 4);
        assert_eq!(visual_line_count("", 10), 1);
    }
}
