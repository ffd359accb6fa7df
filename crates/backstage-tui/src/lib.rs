// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use backstage_app::{
    AppCommand, AppEvent, AppState, EntityKind, FieldKind, FormSnapshot, Liveness, ModalMode,
    NoticeLevel, ScreenCommand, ScreenEvent, ScreenSnapshot, SortDirection,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// The catalog as the UI sees it: one snapshot per tab and a command sink.
pub trait AppRuntime {
    fn load_snapshot(&mut self, kind: EntityKind) -> Result<ScreenSnapshot>;
    fn apply(&mut self, kind: EntityKind, command: ScreenCommand<i64>)
    -> Result<Vec<ScreenEvent>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub status_timeout: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            status_timeout: DEFAULT_STATUS_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Browse,
    Search,
    Form,
    View,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    snapshot: Option<ScreenSnapshot>,
    selected_row: usize,
    pending_row_id: Option<i64>,
    searching: bool,
    form_cursor: usize,
    help_visible: bool,
    status_token: u64,
    status_level: Option<NoticeLevel>,
    status_timeout: Duration,
}

impl ViewData {
    fn new(options: UiOptions) -> Self {
        Self {
            status_timeout: options.status_timeout,
            ..Self::default()
        }
    }

    fn form(&self) -> Option<&FormSnapshot> {
        self.snapshot.as_ref().and_then(|snapshot| snapshot.form.as_ref())
    }

    fn input_mode(&self) -> InputMode {
        match self.form().map(|form| form.mode) {
            Some(ModalMode::View) => InputMode::View,
            Some(ModalMode::Create | ModalMode::Edit) => InputMode::Form,
            Some(ModalMode::Closed) | None if self.searching => InputMode::Search,
            Some(ModalMode::Closed) | None => InputMode::Browse,
        }
    }

    fn selected_id(&self) -> Option<i64> {
        self.snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.rows.get(self.selected_row))
            .map(|row| row.id)
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error:#}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
                view_data.status_level = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64, after: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(after);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    level: Option<NoticeLevel>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_level = level;
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token, view_data.status_timeout);
}

/// Returns true when the app should quit.
fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match view_data.input_mode() {
        InputMode::Form => {
            handle_form_key(state, runtime, view_data, internal_tx, key);
            false
        }
        InputMode::View => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('q')
            ) {
                apply_screen_command(state, runtime, view_data, internal_tx, ScreenCommand::Close);
            }
            false
        }
        InputMode::Search => {
            handle_search_key(state, runtime, view_data, internal_tx, key);
            false
        }
        InputMode::Browse => handle_browse_key(state, runtime, view_data, internal_tx, key),
    }
}

fn handle_browse_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => {
            dispatch_and_refresh(state, runtime, view_data, internal_tx, AppCommand::NextTab);
        }
        KeyCode::BackTab => {
            dispatch_and_refresh(state, runtime, view_data, internal_tx, AppCommand::PrevTab);
        }
        KeyCode::Char(digit @ '1'..='5') => {
            let index = usize::from(digit as u8 - b'1');
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::SelectTab(EntityKind::ALL[index]),
            );
        }
        KeyCode::Char('j') | KeyCode::Down => move_selection(view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_selection(view_data, -1),
        KeyCode::Char('g') | KeyCode::Home => view_data.selected_row = 0,
        KeyCode::Char('G') | KeyCode::End => move_selection(view_data, isize::MAX),
        KeyCode::Char('/') => view_data.searching = true,
        KeyCode::Char('s') => {
            apply_screen_command(
                state,
                runtime,
                view_data,
                internal_tx,
                ScreenCommand::CycleStatus,
            );
        }
        KeyCode::Char('o') => {
            apply_screen_command(
                state,
                runtime,
                view_data,
                internal_tx,
                ScreenCommand::ToggleSort,
            );
        }
        KeyCode::Char('a') => {
            apply_screen_command(
                state,
                runtime,
                view_data,
                internal_tx,
                ScreenCommand::OpenCreate,
            );
        }
        KeyCode::Char('e') => {
            with_selected(state, runtime, view_data, internal_tx, ScreenCommand::OpenEdit);
        }
        KeyCode::Enter | KeyCode::Char('v') => {
            with_selected(state, runtime, view_data, internal_tx, ScreenCommand::OpenView);
        }
        KeyCode::Char('d') => {
            with_selected(state, runtime, view_data, internal_tx, ScreenCommand::Delete);
        }
        KeyCode::Char('r') => {
            with_selected(state, runtime, view_data, internal_tx, ScreenCommand::Restore);
        }
        KeyCode::Char('?') => view_data.help_visible = true,
        _ => {}
    }
    false
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let current = view_data
        .snapshot
        .as_ref()
        .map(|snapshot| snapshot.query.search.clone())
        .unwrap_or_default();
    let next = match key.code {
        KeyCode::Enter => {
            view_data.searching = false;
            return;
        }
        KeyCode::Esc => {
            view_data.searching = false;
            String::new()
        }
        KeyCode::Backspace => {
            let mut term = current;
            term.pop();
            term
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut term = current;
            term.push(ch);
            term
        }
        _ => return,
    };
    view_data.selected_row = 0;
    apply_screen_command(
        state,
        runtime,
        view_data,
        internal_tx,
        ScreenCommand::Search(next),
    );
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(form) = view_data.form() else {
        return;
    };
    let field_count = form.fields.len();
    let Some(field) = form.fields.get(view_data.form_cursor) else {
        view_data.form_cursor = 0;
        return;
    };
    let name = field.name.to_owned();
    let mut value = field.value.clone();

    match key.code {
        KeyCode::Esc => {
            apply_screen_command(state, runtime, view_data, internal_tx, ScreenCommand::Close);
            return;
        }
        KeyCode::Enter => {
            apply_screen_command(state, runtime, view_data, internal_tx, ScreenCommand::Save);
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            view_data.form_cursor = (view_data.form_cursor + 1) % field_count;
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            view_data.form_cursor = (view_data.form_cursor + field_count - 1) % field_count;
            return;
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => value.clear(),
        KeyCode::Backspace => {
            value.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(ch),
        _ => return,
    }

    apply_screen_command(
        state,
        runtime,
        view_data,
        internal_tx,
        ScreenCommand::UpdateField { field: name, value },
    );
}

fn with_selected<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: fn(i64) -> ScreenCommand<i64>,
) {
    match view_data.selected_id() {
        Some(id) => apply_screen_command(state, runtime, view_data, internal_tx, command(id)),
        None => emit_status(state, view_data, internal_tx, None, "no hay filas"),
    }
}

fn move_selection(view_data: &mut ViewData, delta: isize) {
    let len = view_data
        .snapshot
        .as_ref()
        .map_or(0, |snapshot| snapshot.rows.len());
    if len == 0 {
        view_data.selected_row = 0;
        return;
    }
    let last = len - 1;
    view_data.selected_row = view_data.selected_row.saturating_add_signed(delta).min(last);
}

fn apply_screen_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: ScreenCommand<i64>,
) {
    let kind = state.active_tab;
    match runtime.apply(kind, command) {
        Ok(events) => handle_screen_events(state, view_data, internal_tx, &events),
        Err(error) => {
            tracing::warn!(%kind, error = %format!("{error:#}"), "screen command failed");
            emit_status(state, view_data, internal_tx, None, format!("{error:#}"));
        }
    }
    if let Err(error) = refresh_view_data(state, runtime, view_data) {
        emit_status(
            state,
            view_data,
            internal_tx,
            None,
            format!("load failed: {error:#}"),
        );
    }
}

fn handle_screen_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: &[ScreenEvent],
) {
    for event in events {
        match event {
            ScreenEvent::Notice(notice) => emit_status(
                state,
                view_data,
                internal_tx,
                Some(notice.level),
                notice.message.clone(),
            ),
            ScreenEvent::ValidationFailed(errors) => emit_status(
                state,
                view_data,
                internal_tx,
                None,
                format!("revise el formulario: {errors}"),
            ),
            ScreenEvent::QueryChanged(query) => {
                let status = format!(
                    "estado: {} | orden: {}",
                    query.status.label(),
                    query.direction.label()
                );
                if state.status_line.as_deref() != Some(status.as_str()) && !view_data.searching {
                    emit_status(state, view_data, internal_tx, None, status);
                }
            }
            ScreenEvent::ModalChanged(ModalMode::Create | ModalMode::Edit) => {
                view_data.form_cursor = 0;
            }
            ScreenEvent::RecordAdded(id) => view_data.pending_row_id = Some(*id),
            ScreenEvent::ModalChanged(_)
            | ScreenEvent::FieldUpdated { .. }
            | ScreenEvent::RecordUpdated(_)
            | ScreenEvent::RecordDeactivated(_)
            | ScreenEvent::RecordRestored(_) => {}
        }
    }
}

fn dispatch_and_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    let tab_changed = events
        .iter()
        .any(|event| matches!(event, AppEvent::TabChanged(_)));
    if tab_changed {
        view_data.searching = false;
        if let Err(error) = refresh_view_data(state, runtime, view_data) {
            emit_status(
                state,
                view_data,
                internal_tx,
                None,
                format!("load failed: {error:#}"),
            );
        }
    }
}

fn refresh_view_data<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    let snapshot = runtime
        .load_snapshot(state.active_tab)
        .with_context(|| format!("load {} snapshot", state.active_tab))?;

    let same_tab = view_data
        .snapshot
        .as_ref()
        .is_some_and(|previous| previous.kind == snapshot.kind);
    if !same_tab {
        view_data.selected_row = 0;
        view_data.form_cursor = 0;
    }
    if let Some(id) = view_data.pending_row_id.take()
        && let Some(index) = snapshot.rows.iter().position(|row| row.id == id)
    {
        view_data.selected_row = index;
    }
    view_data.selected_row = view_data
        .selected_row
        .min(snapshot.rows.len().saturating_sub(1));
    let field_count = snapshot.form.as_ref().map_or(0, |form| form.fields.len());
    view_data.form_cursor = view_data.form_cursor.min(field_count.saturating_sub(1));
    view_data.snapshot = Some(snapshot);
    Ok(())
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = EntityKind::ALL
        .iter()
        .position(|kind| *kind == state.active_tab)
        .unwrap_or(0);
    let tab_titles = EntityKind::ALL
        .iter()
        .enumerate()
        .map(|(index, kind)| format!("{} {}", index + 1, kind.title()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("backstage").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_table(frame, layout[1], state, view_data);

    let status_color = match view_data.status_level {
        Some(NoticeLevel::Success) => Color::Green,
        Some(NoticeLevel::Info) => Color::Cyan,
        None => Color::Yellow,
    };
    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if let Some(form) = view_data.form() {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);
        let title = form_title(form, view_data.snapshot.as_ref());
        let body = Paragraph::new(render_form_text(form, view_data.form_cursor))
            .wrap(Wrap { trim: false })
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(body, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("ayuda").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let Some(snapshot) = &view_data.snapshot else {
        let empty = Paragraph::new(String::new()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.active_tab.title()),
        );
        frame.render_widget(empty, area);
        return;
    };

    let widths = vec![Constraint::Min(6); snapshot.columns.len().max(1)];
    let header = Row::new(snapshot.columns.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = snapshot.rows.iter().enumerate().map(|(index, row)| {
        let mut style = Style::default();
        if row.liveness == Liveness::Inactive {
            style = style
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT);
        }
        if index == view_data.selected_row {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }
        Row::new(row.cells.iter().map(|cell| Cell::from(cell.as_str()))).style(style)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(snapshot, view_data.input_mode()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn table_title(snapshot: &ScreenSnapshot, mode: InputMode) -> String {
    let arrow = match snapshot.query.direction {
        SortDirection::Asc => "↑",
        SortDirection::Desc => "↓",
    };
    let cursor = if mode == InputMode::Search { "_" } else { "" };
    let mut title = format!(
        "{} | {}/{} | estado: {} | orden: {} {arrow}",
        snapshot.title,
        snapshot.rows.len(),
        snapshot.total,
        snapshot.query.status.label(),
        snapshot.sort_label,
    );
    if !snapshot.query.search.is_empty() || mode == InputMode::Search {
        title.push_str(&format!(
            " | {}: {}{cursor}",
            snapshot.search_label.to_lowercase(),
            snapshot.query.search
        ));
    }
    title
}

fn form_title(form: &FormSnapshot, snapshot: Option<&ScreenSnapshot>) -> String {
    let kind = snapshot.map_or("", |snapshot| snapshot.title);
    let verb = match form.mode {
        ModalMode::Create => "nuevo",
        ModalMode::Edit => "editar",
        ModalMode::View => "ver",
        ModalMode::Closed => "",
    };
    match form.target {
        Some(id) => format!("{kind} | {verb} #{id}"),
        None => format!("{kind} | {verb}"),
    }
}

fn render_form_text(form: &FormSnapshot, cursor: usize) -> String {
    let editable = form.mode != ModalMode::View;
    let mut lines = Vec::with_capacity(form.fields.len() * 2 + 4);
    for (index, field) in form.fields.iter().enumerate() {
        let marker = if editable && index == cursor { ">" } else { " " };
        let required = if field.required { "*" } else { "" };
        let caret = if editable && index == cursor { "_" } else { "" };
        lines.push(format!(
            "{marker} {}{required}: {}{caret}",
            field.label, field.value
        ));
        if field.kind == FieldKind::Photo
            && let Some(url) = &form.preview_url
        {
            lines.push(format!("    vista previa: {url}"));
        }
        if let Some(error) = &field.error {
            lines.push(format!("    ! {error}"));
        }
    }
    lines.push(String::new());
    lines.push(format!("Estado: {}", form.liveness.as_str()));
    lines.push(String::new());
    if editable {
        lines.push("tab/flechas campo | enter guardar | ctrl+u limpiar | esc cerrar".to_owned());
    } else {
        lines.push("esc cerrar".to_owned());
    }
    lines.join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let (mode, hints) = match view_data.input_mode() {
        InputMode::Browse => (
            "LISTA",
            "tab/1-5 pestaña | j/k mover | / buscar | s estado | o orden | a nuevo | e editar | enter ver | d eliminar | r restaurar | ? ayuda | q salir",
        ),
        InputMode::Search => ("BUSCAR", "escriba para filtrar | enter aceptar | esc limpiar"),
        InputMode::Form => ("FORMULARIO", "enter guardar | esc cerrar"),
        InputMode::View => ("DETALLE", "esc cerrar"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "lista: tab/shift+tab o 1-5 cambiar pestaña | j/k g/G mover\n\
lista: / buscar | s filtro de estado (todos, activos, inactivos) | o invertir orden\n\
lista: a nuevo | e editar | enter/v ver | d eliminar | r restaurar\n\
buscar: escriba para filtrar | backspace borrar | enter aceptar | esc limpiar\n\
formulario: tab/shift+tab o flechas campo | enter guardar | ctrl+u limpiar campo | esc cerrar\n\
global: ? ayuda | q salir | ctrl+q/ctrl+c salir"
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
