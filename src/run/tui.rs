use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::register::register_claim;
use crate::store::FlatFileStore;
use crate::thai::format_amount;
use crate::ui::app::{App, FormField, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{cycle_index, move_cursor, Motion};

pub(crate) fn as_tui(store: &mut FlatFileStore, config: &Config) -> Result<()> {
    let mut app = App::new(config.clone(), Box::new(SystemClock));
    app.refresh_all(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut FlatFileStore,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Search => handle_search_input(key, app),
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut FlatFileStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.clear_search();
            app.screen = Screen::Ledger;
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            handle_motion(app, Motion::Down(app.visible_rows / 2));
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            handle_motion(app, Motion::Up(app.visible_rows / 2));
        }
        KeyCode::Char('j') | KeyCode::Down => handle_motion(app, Motion::Down(1)),
        KeyCode::Char('k') | KeyCode::Up => handle_motion(app, Motion::Up(1)),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Register),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Ledger),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Dashboard),
        KeyCode::Tab => step_screen(app, store, 1),
        KeyCode::BackTab => step_screen(app, store, -1),
        KeyCode::Enter => handle_enter(app),
        KeyCode::Esc => handle_escape(app),
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Register => {
            app.cycle_choice(1);
        }
        KeyCode::Char('-') if app.screen == Screen::Register => app.cycle_choice(-1),
        KeyCode::Char('s') if app.screen == Screen::Register => commands::request_submit(app),
        KeyCode::Char('g') => handle_motion(app, Motion::Top),
        KeyCode::Char('G') => handle_motion(app, Motion::Bottom),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('n') if app.screen == Screen::Dashboard => {
            commands::handle_command("kind", app, store)?;
        }
        KeyCode::Char('H') if app.screen == Screen::Dashboard => {
            let year = app.year - 1;
            app.set_year(year, store);
        }
        KeyCode::Char('L') if app.screen == Screen::Dashboard => {
            let year = app.year + 1;
            app.set_year(year, store);
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut FlatFileStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.clear_search();
            app.clamp_ledger_cursor();
        }
        KeyCode::Backspace => {
            app.pop_search();
            app.ledger_index = 0;
            app.ledger_scroll = 0;
        }
        KeyCode::Char(c) => {
            app.push_search(c);
            app.ledger_index = 0;
            app.ledger_scroll = 0;
        }
        _ => {}
    }
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let field = app.selected_field();
            let value = app.command_input.trim().to_string();
            app.set_value(field, value);
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            handle_motion(app, Motion::Down(1));
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut FlatFileStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            match app.pending_action.take() {
                Some(PendingAction::Submit) => submit_form(app, store)?,
                Some(PendingAction::Reset) => commands::confirm_reset(app, store),
                None => {}
            }
        }
        _ => {
            app.pending_action = None;
            app.confirm_message.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

/// Record the form; validation errors stay on the status bar.
fn submit_form(app: &mut App, store: &mut FlatFileStore) -> Result<()> {
    let registered = app
        .claim_form()
        .and_then(|form| register_claim(store, app.clock.as_ref(), &app.form_defaults(), &form));

    let record = match registered {
        Ok(record) => record,
        Err(e) => {
            warn!("Claim not recorded: {e:#}");
            app.set_status(format!("{e:#}"));
            return Ok(());
        }
    };

    let summary = format!(
        "Recorded {} ({} baht)",
        record.document_number,
        format_amount(record.amount)
    );
    app.last_registered = Some(record);
    app.clear_form();
    app.refresh_all(store);

    if app.config.stamp.template.is_some() {
        app.screen = Screen::Register;
        commands::handle_command("stamp", app, store)?;
        let stamped = app.status_message.clone();
        app.set_status(format!("{summary}. {stamped}"));
    } else {
        app.set_status(summary);
    }
    Ok(())
}

// ── Navigation ────────────────────────────────────────────────

fn switch_screen(app: &mut App, store: &FlatFileStore, screen: Screen) {
    app.screen = screen;
    app.refresh_all(store);
}

fn step_screen(app: &mut App, store: &FlatFileStore, delta: i32) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
    let next = cycle_index(idx, screens.len(), delta);
    switch_screen(app, store, screens[next]);
}

/// Register moves the form focus; Ledger moves the scrolled row cursor.
fn handle_motion(app: &mut App, motion: Motion) {
    match app.screen {
        Screen::Register => {
            let len = FormField::all().len();
            let mut scroll = 0;
            move_cursor(&mut app.form_index, &mut scroll, len, len, motion);
        }
        Screen::Ledger => {
            let len = app.visible_records().len();
            move_cursor(
                &mut app.ledger_index,
                &mut app.ledger_scroll,
                len,
                app.visible_rows,
                motion,
            );
        }
        Screen::Dashboard => {}
    }
}

fn handle_enter(app: &mut App) {
    match app.screen {
        Screen::Register => {
            let field = app.selected_field();
            if field.is_choice() {
                app.set_status(format!("Use +/- to choose {}", field.label()));
            } else {
                app.command_input = app.value(field).to_string();
                app.input_mode = InputMode::Editing;
            }
        }
        Screen::Ledger => {
            if let Some(rec) = app.selected_record() {
                let msg = format!(
                    "{} | {} | {} | {}",
                    rec.document_number, rec.project_name, rec.project_leader, rec.amount_in_words
                );
                app.set_status(msg);
            }
        }
        Screen::Dashboard => {}
    }
}

fn handle_escape(app: &mut App) {
    if app.screen == Screen::Ledger && !app.search().is_empty() {
        app.clear_search();
        app.clamp_ledger_cursor();
        app.set_status("Search cleared");
    } else {
        app.status_message.clear();
    }
}
