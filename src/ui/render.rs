use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands::COMMANDS;
use super::theme;
use super::util::columns;

/// One key binding as shown in help. `screen: None` applies everywhere;
/// `hint` puts it on the status bar too.
struct KeyBinding {
    screen: Option<Screen>,
    keys: &'static str,
    action: &'static str,
    hint: bool,
}

const fn bind(
    screen: Option<Screen>,
    keys: &'static str,
    action: &'static str,
    hint: bool,
) -> KeyBinding {
    KeyBinding {
        screen,
        keys,
        action,
        hint,
    }
}

const KEYMAP: &[KeyBinding] = &[
    bind(None, "1 2 3", "Register, Ledger, Dashboard", false),
    bind(None, "Tab S-Tab", "Next / previous screen", false),
    bind(None, ":", "Command", false),
    bind(None, "/", "Search the ledger", false),
    bind(None, "?", "This help", true),
    bind(None, "C-q", "Quit", false),
    bind(Some(Screen::Register), "j k", "Move between fields", false),
    bind(Some(Screen::Register), "Enter", "Edit field", true),
    bind(Some(Screen::Register), "+ -", "Pick faculty or category", true),
    bind(Some(Screen::Register), "s", "Record claim", true),
    bind(Some(Screen::Register), "g G", "First / last field", false),
    bind(Some(Screen::Ledger), "j k", "Move", false),
    bind(Some(Screen::Ledger), "C-d C-u", "Half page", false),
    bind(Some(Screen::Ledger), "g G", "Newest / oldest", false),
    bind(Some(Screen::Ledger), "Enter", "Show claim details", true),
    bind(Some(Screen::Ledger), "/", "Search", true),
    bind(Some(Screen::Ledger), "Esc", "Clear search", false),
    bind(Some(Screen::Ledger), ":stamp", "Placement sheet", true),
    bind(Some(Screen::Dashboard), "H L", "Previous / next year", true),
    bind(Some(Screen::Dashboard), "n", "Fiscal, academic, calendar", true),
    bind(Some(Screen::Dashboard), ":target", "Set budget target", true),
];

fn bindings_for(screen: Option<Screen>) -> impl Iterator<Item = &'static KeyBinding> {
    KEYMAP.iter().filter(move |b| b.screen == screen)
}

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [header, body, status, prompt] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(f.area());

    render_header(f, header, app);
    match app.screen {
        Screen::Register => super::screens::register::render(f, body, app),
        Screen::Ledger => super::screens::ledger::render(f, body, app),
        Screen::Dashboard => super::screens::dashboard::render(f, body, app),
    }
    render_status(f, status, app);
    render_prompt(f, prompt, app);

    if app.show_help {
        render_help(f, app.screen);
    }
}

/// Left spans, then `right` pushed against the far edge.
fn spread<'a>(mut left: Vec<Span<'a>>, right: Span<'a>, width: u16) -> Line<'a> {
    let used: usize = left.iter().map(|s| columns(&s.content)).sum::<usize>()
        + columns(&right.content);
    left.push(Span::raw(" ".repeat((width as usize).saturating_sub(used))));
    left.push(right);
    Line::from(left)
}

// ── Header ──

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut left = vec![Span::styled(" ClaimReg ", theme::selected_style())];
    for (i, screen) in Screen::all().iter().enumerate() {
        left.push(Span::styled(
            format!("  {} {screen}", i + 1),
            theme::tab_style(*screen == app.screen),
        ));
    }
    let today = Span::styled(format!("{} ", app.today_label()), theme::dim_style());
    let line = spread(left, today, area.width);
    f.render_widget(Paragraph::new(line).style(theme::header_style()), area);
}

// ── Status bar ──

fn status_hints(screen: Screen) -> String {
    bindings_for(Some(screen))
        .chain(bindings_for(None))
        .filter(|b| b.hint)
        .map(|b| format!("{} {}", b.keys, b.action.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" · ")
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let left = vec![
        Span::styled(format!(" {} ", app.input_mode), theme::mode_badge(app.input_mode)),
        Span::raw(format!(
            " next {} · {} claims",
            app.next_number,
            app.records.len()
        )),
    ];
    let hints = Span::raw(format!("{} ", status_hints(app.screen)));
    let line = spread(left, hints, area.width);
    f.render_widget(Paragraph::new(line).style(theme::status_bar_style()), area);
}

// ── Prompt ──

/// The bottom line and, while typing, where the cursor sits in it.
fn prompt_line(app: &App) -> (Line<'_>, Option<u16>) {
    let typed = |sigil: &str, text: &str| (columns(sigil) + columns(text)) as u16;
    match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", theme::key_style()),
                Span::raw(app.command_input.as_str()),
            ]),
            Some(typed(":", &app.command_input)),
        ),
        InputMode::Search => {
            let mut spans = vec![
                Span::styled("/", theme::section_style()),
                Span::raw(app.search()),
            ];
            if !app.search().is_empty() {
                let how = if app.ledger_filter().is_regex() {
                    "regex"
                } else {
                    "text"
                };
                spans.push(Span::styled(
                    format!("  {} matching, {how}", app.visible_records().len()),
                    theme::dim_style(),
                ));
            }
            (Line::from(spans), Some(typed("/", app.search())))
        }
        InputMode::Editing => {
            let label = format!("{}> ", app.selected_field().label());
            let cursor = typed(&label, &app.command_input);
            (
                Line::from(vec![
                    Span::styled(label, theme::amount_style()),
                    Span::raw(app.command_input.as_str()),
                ]),
                Some(cursor),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(app.confirm_message.as_str(), theme::section_style()),
                Span::styled(" [y/N]", theme::over_budget_style()),
            ]),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => (
            Line::from(Span::styled(" : command  / search  ? help", theme::dim_style())),
            None,
        ),
        InputMode::Normal => (Line::from(app.status_message.as_str()), None),
    }
}

fn render_prompt(f: &mut Frame, area: Rect, app: &App) {
    let (line, cursor) = prompt_line(app);
    f.render_widget(Paragraph::new(line).style(theme::command_bar_style()), area);
    if let Some(col) = cursor {
        f.set_cursor_position((area.x + col.min(area.width.saturating_sub(1)), area.y));
    }
}

// ── Help ──

/// Colon commands with their aliases, one entry per action.
fn command_entries() -> Vec<(String, &'static str)> {
    let mut by_action: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for (name, cmd) in COMMANDS.iter() {
        by_action.entry(cmd.description).or_default().push(*name);
    }
    let mut entries: Vec<(String, &'static str)> = by_action
        .into_iter()
        .map(|(action, mut names)| {
            // Longest name first, aliases after
            names.sort_by_key(|n| (std::cmp::Reverse(n.len()), *n));
            let names: Vec<String> = names.iter().map(|n| format!(":{n}")).collect();
            (names.join(" "), action)
        })
        .collect();
    entries.sort();
    entries
}

fn help_row(keys: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<16}"), theme::key_style()),
        Span::styled(action.to_string(), theme::normal_style()),
    ])
}

fn help_lines(screen: Screen) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(" {screen} keys"),
        theme::section_style(),
    ))];
    lines.extend(bindings_for(Some(screen)).map(|b| help_row(b.keys, b.action)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Everywhere", theme::section_style())));
    lines.extend(bindings_for(None).map(|b| help_row(b.keys, b.action)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Commands", theme::section_style())));
    lines.extend(
        command_entries()
            .iter()
            .map(|(names, action)| help_row(names, action)),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" any key closes", theme::dim_style())));
    lines
}

fn render_help(f: &mut Frame, screen: Screen) {
    let lines = help_lines(screen);
    let area = f.area();
    let width = 78.min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::key_style())
                .title(Span::styled(" Help ", theme::section_style()))
                .style(theme::header_style()),
        ),
        popup,
    );
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
