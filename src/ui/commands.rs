use log::warn;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::register::parse_amount;
use crate::run::shellexpand;
use crate::stamp::{self, StampLayout};
use crate::store::{ClaimStore, FlatFileStore};
use crate::thai::format_amount;
use crate::years::YearKind;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut FlatFileStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("r", "Go to Register", cmd_register, r);
    register_command!("register", "Go to Register", cmd_register, r);
    register_command!("l", "Go to Ledger", cmd_ledger, r);
    register_command!("ledger", "Go to Ledger", cmd_ledger, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "kind",
        "Dashboard year kind (e.g. :kind academic)",
        cmd_kind,
        r
    );
    register_command!("year", "Dashboard year (e.g. :year 2569)", cmd_year, r);
    register_command!("y", "Dashboard year (e.g. :year 2569)", cmd_year, r);
    register_command!(
        "target",
        "Set budget target for the shown year (e.g. :target 500000)",
        cmd_target,
        r
    );
    register_command!("submit", "Record the claim in the form", cmd_submit, r);
    register_command!("clear", "Clear the form", cmd_clear, r);
    register_command!(
        "search",
        "Filter the ledger (e.g. :search ค่าเดินทาง)",
        cmd_search,
        r
    );
    register_command!(
        "s",
        "Filter the ledger (e.g. :search ค่าเดินทาง)",
        cmd_search,
        r
    );
    register_command!(
        "export",
        "Copy the ledger CSV (e.g. :export ~/claims.csv)",
        cmd_export,
        r
    );
    register_command!(
        "stamp",
        "Write the placement sheet for the selected claim",
        cmd_stamp,
        r
    );
    register_command!(
        "reset",
        "Delete all claims, targets and cached font",
        cmd_reset,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut FlatFileStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1)
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_register(_args: &str, app: &mut App, _store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.screen = Screen::Register;
    Ok(())
}

fn cmd_ledger(_args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.screen = Screen::Ledger;
    app.refresh_all(store);
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_all(store);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_kind(args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    let kind = if args.is_empty() {
        app.kind.next()
    } else {
        match YearKind::parse(args) {
            Some(k) => k,
            None => {
                app.set_status("Usage: :kind <fiscal|calendar|academic>");
                return Ok(());
            }
        }
    };
    app.set_kind(kind, store);
    app.screen = Screen::Dashboard;
    app.set_status(format!("{} {}", kind.label(), app.year));
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    match args.parse::<i32>() {
        Ok(year) if year > 0 => {
            app.set_year(year, store);
            app.screen = Screen::Dashboard;
            app.set_status(format!("{} {year}", app.kind.label()));
        }
        _ => app.set_status("Usage: :year <Buddhist Era year>, e.g. :year 2569"),
    }
    Ok(())
}

fn cmd_target(args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :target <amount>");
        return Ok(());
    }
    let amount = match parse_amount(args) {
        Ok(a) => a,
        Err(e) => {
            app.set_status(format!("{e}"));
            return Ok(());
        }
    };
    if let Err(e) = store.upsert_target(app.kind, app.year, amount) {
        warn!("Target not saved: {e:#}");
        app.set_status(format!("{e:#}"));
        return Ok(());
    }
    app.refresh_dashboard(store);
    app.screen = Screen::Dashboard;
    app.set_status(format!(
        "Target for {} {} set to {}",
        app.kind.label(),
        app.year,
        format_amount(amount)
    ));
    Ok(())
}

fn cmd_submit(_args: &str, app: &mut App, _store: &mut FlatFileStore) -> anyhow::Result<()> {
    request_submit(app);
    Ok(())
}

/// Ask for confirmation before recording the form.
pub(crate) fn request_submit(app: &mut App) {
    match app.claim_form() {
        Ok(form) => {
            app.confirm_message = format!(
                "Record {} for {} baht?",
                app.next_number,
                format_amount(form.amount)
            );
            app.pending_action = Some(PendingAction::Submit);
            app.input_mode = InputMode::Confirm;
        }
        Err(e) => app.set_status(format!("{e:#}")),
    }
}

fn cmd_clear(_args: &str, app: &mut App, _store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.clear_form();
    app.screen = Screen::Register;
    app.set_status("Form cleared");
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, _store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.set_search(args);
    app.screen = Screen::Ledger;
    app.ledger_index = 0;
    app.ledger_scroll = 0;
    if args.is_empty() {
        app.set_status("Search cleared");
    } else {
        app.set_status(format!("Searching: {args}"));
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        PathBuf::from(crate::run::export_file_name(app.clock.buddhist_year()))
    } else {
        PathBuf::from(shellexpand(args))
    };
    match store.export_ledger(&path) {
        Ok(bytes) => app.set_status(format!("Exported ledger to {} ({bytes} bytes)", path.display())),
        Err(e) => app.set_status(format!("{e:#}")),
    }
    Ok(())
}

fn cmd_stamp(args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    let record = match app.screen {
        Screen::Ledger => app.selected_record().cloned(),
        _ => app.last_registered.clone(),
    };
    let Some(record) = record else {
        app.set_status("Select a claim in the Ledger first");
        return Ok(());
    };
    let out = if args.is_empty() {
        PathBuf::from(stamp::sheet_file_name(&record))
    } else {
        PathBuf::from(shellexpand(args))
    };

    let result = (|| -> anyhow::Result<(usize, bool)> {
        let template = app.config.stamp.template.clone().ok_or_else(|| {
            anyhow::anyhow!("No document template configured (set [stamp] template)")
        })?;
        let layout = StampLayout::resolve(app.config.stamp.layout.as_deref())?;
        let font = stamp::resolve_font(&app.config.stamp, store.font_cache_path());
        let thai = font.is_thai();
        let sheet = stamp::write_stamp_sheet(&record, &layout, &template, font, &out)?;
        Ok((sheet.items.len(), thai))
    })();

    match result {
        Ok((items, true)) => app.set_status(format!("Wrote {} ({items} fields)", out.display())),
        Ok((items, false)) => app.set_status(format!(
            "Wrote {} ({items} fields) without a Thai font",
            out.display()
        )),
        Err(e) => app.set_status(format!("{e:#}")),
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, store: &mut FlatFileStore) -> anyhow::Result<()> {
    app.confirm_message = format!(
        "Delete ALL {} claims and every target in {}?",
        app.records.len(),
        store.data_dir().display()
    );
    app.pending_action = Some(PendingAction::Reset);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

/// Carry out a confirmed `:reset`.
pub(crate) fn confirm_reset(app: &mut App, store: &mut FlatFileStore) {
    let wiped = store.wipe();
    // Whatever was removed before a failure is gone, so reload either way
    app.refresh_all(store);
    match wiped {
        Ok(()) => {
            app.last_registered = None;
            app.clear_search();
            app.set_status("All claims, targets and cached font deleted");
        }
        Err(e) => {
            warn!("Reset incomplete: {e:#}");
            app.set_status(format!("{e:#}"));
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
