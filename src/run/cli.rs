use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::models::{ClaimRecord, BUDGET_CATEGORIES, FACULTIES};
use crate::numbering::next_from_store;
use crate::register::{parse_amount, register_claim, ClaimForm};
use crate::report::{summarize, LedgerFilter};
use crate::stamp::{self, StampLayout};
use crate::store::{ClaimStore, FlatFileStore};
use crate::thai::format_amount;
use crate::years::YearKind;

pub(crate) fn as_cli(args: &[String], store: &mut FlatFileStore, config: &Config) -> Result<()> {
    let clock = SystemClock;
    match args[1].as_str() {
        "next" | "n" => cli_next(store, &clock),
        "add" | "a" => cli_add(&args[2..], store, config, &clock),
        "list" | "ls" => cli_list(&args[2..], store),
        "summary" | "s" => cli_summary(&args[2..], store, &clock),
        "target" | "t" => cli_target(&args[2..], store, &clock),
        "export" => cli_export(&args[2..], store, &clock),
        "stamp" => cli_stamp(&args[2..], store, config),
        "layout" => cli_layout(config),
        "reset" => cli_reset(&args[2..], store),
        "catalog" => {
            print_catalog();
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("claimreg {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("claimreg: research office budget-claim register");
    println!();
    println!("Usage: claimreg [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  next                            Show the next document number");
    println!("  add --subject <s> --faculty <f> --category <c> --amount <n>");
    println!("      [--budget <n>] [--project <s>] [--leader <s>] [--to <s>]");
    println!("      [--signer <s>] [--attachment <s>] [--payee <s>] [--bank <s>]");
    println!("      [--position <s>] [--stamp <out.json>]");
    println!("                                  Record a claim and issue its number");
    println!("  list [--kind <k> --year <y>] [--match <pattern>]");
    println!("                                  List recorded claims");
    println!("  summary [kind] [year]           Totals against the budget target");
    println!("  target <kind> <year> [amount]   Show or set a budget target");
    println!("  export [path]                   Copy the ledger CSV");
    println!("  stamp <doc-no> [out.json] [--template <file>]");
    println!("                                  Write the placement sheet for a claim");
    println!("  layout                          Print the stamp layout in use (TOML)");
    println!("  reset --yes                     Delete ledger, targets and cached font");
    println!("  catalog                         List faculties and budget categories");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
    println!();
    println!("Year kinds: fiscal, calendar, academic (years are Buddhist Era)");
}

/// Value following `--name`, if present.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
        } else if arg.starts_with("--") {
            skip = true;
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_kind(s: &str) -> Result<YearKind> {
    YearKind::parse(s)
        .ok_or_else(|| anyhow::anyhow!("Unknown year kind '{s}' (use fiscal, calendar or academic)"))
}

fn parse_year(s: &str) -> Result<i32> {
    s.trim()
        .parse::<i32>()
        .with_context(|| format!("Invalid year: '{s}'"))
}

fn cli_next(store: &FlatFileStore, clock: &dyn Clock) -> Result<()> {
    println!("{}", next_from_store(store, clock));
    Ok(())
}

fn cli_add(
    args: &[String],
    store: &mut FlatFileStore,
    config: &Config,
    clock: &dyn Clock,
) -> Result<()> {
    let text = |name: &str| flag(args, name).unwrap_or_default().to_string();
    let form = ClaimForm {
        subject: text("--subject"),
        project_name: text("--project"),
        project_leader: text("--leader"),
        faculty: text("--faculty"),
        budget_category: text("--category"),
        approved_budget: parse_amount(flag(args, "--budget").unwrap_or_default())?,
        amount: parse_amount(flag(args, "--amount").unwrap_or_default())?,
        recipient: text("--to"),
        signer: text("--signer"),
        attachment: text("--attachment"),
        payee: text("--payee"),
        bank_detail: text("--bank"),
        position: text("--position"),
    };

    let record = register_claim(store, clock, &config.form_defaults(), &form)?;
    println!(
        "Recorded {}  {} baht  ({})",
        record.document_number,
        format_amount(record.amount),
        record.amount_in_words
    );

    if let Some(out) = flag(args, "--stamp") {
        write_sheet(&record, config, store, None, Path::new(&shellexpand(out)))?;
    }
    Ok(())
}

fn cli_list(args: &[String], store: &FlatFileStore) -> Result<()> {
    let mut filter = LedgerFilter::new();
    match (flag(args, "--kind"), flag(args, "--year")) {
        (Some(kind), Some(year)) => {
            filter = filter.in_bucket(parse_kind(kind)?, parse_year(year)?);
        }
        (None, Some(year)) => {
            filter = filter.in_bucket(YearKind::Fiscal, parse_year(year)?);
        }
        (Some(_), None) => anyhow::bail!("--kind needs --year"),
        (None, None) => {}
    }
    if let Some(pattern) = flag(args, "--match") {
        filter = filter.matching(pattern);
    }

    let records = store.read_all();
    if records.is_empty() {
        println!("No claims recorded in {}", store.ledger_path().display());
        return Ok(());
    }
    let rows = filter.apply(&records);
    if rows.is_empty() {
        println!("No claims");
        return Ok(());
    }

    println!(
        "{:<10} {:<11} {:>14}  {:<28} Subject",
        "Doc No", "Date", "Amount", "Faculty"
    );
    println!("{}", "─".repeat(90));
    for r in &rows {
        println!(
            "{:<10} {:<11} {:>14}  {:<28} {}",
            r.document_number,
            format!("{}/{}/{}", r.day, r.month, r.year),
            format_amount(r.amount),
            crate::ui::util::truncate(&r.faculty, 28),
            r.subject
        );
    }
    let total = rows.iter().map(|r| r.amount).sum::<rust_decimal::Decimal>();
    println!("{}", "─".repeat(90));
    println!("{} claim(s), {} baht", rows.len(), format_amount(total));
    Ok(())
}

fn cli_summary(args: &[String], store: &FlatFileStore, clock: &dyn Clock) -> Result<()> {
    let pos = positionals(args);
    let kind = match pos.first() {
        Some(k) => parse_kind(k)?,
        None => YearKind::Fiscal,
    };
    let year = match pos.get(1) {
        Some(y) => parse_year(y)?,
        None => clock.today_buckets().get(kind),
    };

    let summary = summarize(&store.read_all(), kind, year);
    println!("{} {year}", kind.label());
    println!("{}", "─".repeat(50));
    println!("  Claims:     {}", summary.record_count);
    println!("  Spent:      {}", format_amount(summary.total_spent));

    match store.get_target(kind, year) {
        Some(target) => {
            let status = summary.against(target);
            println!("  Target:     {}", format_amount(status.target));
            println!("  Remaining:  {}", format_amount(status.remaining));
            println!("  Used:       {}", status.percent_label());
        }
        None => println!("  Target:     (not set, use `claimreg target {kind} {year} <amount>`)"),
    }

    if !summary.by_category.is_empty() {
        println!();
        println!("By category:");
        for (name, amount) in &summary.by_category {
            println!("  {:<36} {:>14}", name, format_amount(*amount));
        }
    }
    if !summary.by_faculty.is_empty() {
        println!();
        println!("By faculty:");
        for (name, amount) in &summary.by_faculty {
            println!("  {:<36} {:>14}", name, format_amount(*amount));
        }
    }
    Ok(())
}

fn cli_target(args: &[String], store: &mut FlatFileStore, clock: &dyn Clock) -> Result<()> {
    let Some(kind) = args.first() else {
        anyhow::bail!("Usage: claimreg target <kind> [year] [amount]");
    };
    let kind = parse_kind(kind)?;
    let year = match args.get(1) {
        Some(y) => parse_year(y)?,
        None => clock.today_buckets().get(kind),
    };

    match args.get(2) {
        Some(amount) => {
            let amount = parse_amount(amount)?;
            store.upsert_target(kind, year, amount)?;
            println!("{} {year} target set to {}", kind.label(), format_amount(amount));
        }
        None => match store.get_target(kind, year) {
            Some(amount) => println!("{} {year}: {}", kind.label(), format_amount(amount)),
            None => println!("{} {year}: not set", kind.label()),
        },
    }
    Ok(())
}

fn cli_export(args: &[String], store: &FlatFileStore, clock: &dyn Clock) -> Result<()> {
    let dest = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| PathBuf::from(export_file_name(clock.buddhist_year())));
    let bytes = store.export_ledger(&dest)?;
    println!("Exported ledger to {} ({bytes} bytes)", dest.display());
    Ok(())
}

/// Default export name, e.g. `เบิกจ่าย_2568.csv`.
pub(crate) fn export_file_name(buddhist_year: i32) -> String {
    format!("เบิกจ่าย_{buddhist_year}.csv")
}

fn cli_stamp(args: &[String], store: &FlatFileStore, config: &Config) -> Result<()> {
    let pos = positionals(args);
    let Some(doc) = pos.first() else {
        anyhow::bail!("Usage: claimreg stamp <doc-no> [out.json] [--template <file>]");
    };
    let records = store.read_all();
    // Numbers restart every year; the latest row wins
    let record = records
        .iter()
        .rev()
        .find(|r| r.document_number == *doc)
        .ok_or_else(|| anyhow::anyhow!("No claim numbered {doc}"))?;

    let out = pos
        .get(1)
        .map(|p| PathBuf::from(shellexpand(p)))
        .unwrap_or_else(|| PathBuf::from(stamp::sheet_file_name(record)));
    let template = flag(args, "--template").map(|t| PathBuf::from(shellexpand(t)));
    write_sheet(record, config, store, template, &out)
}

fn write_sheet(
    record: &ClaimRecord,
    config: &Config,
    store: &FlatFileStore,
    template: Option<PathBuf>,
    out: &Path,
) -> Result<()> {
    let template = template
        .or_else(|| config.stamp.template.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No document template configured (set [stamp] template); claim {} is recorded",
                record.document_number
            )
        })?;
    let layout = StampLayout::resolve(config.stamp.layout.as_deref())?;
    let font = stamp::resolve_font(&config.stamp, store.font_cache_path());
    if !font.is_thai() {
        eprintln!("Warning: no Thai font found, Thai text will not render");
    }
    let sheet = stamp::write_stamp_sheet(record, &layout, &template, font, out)?;
    println!(
        "Wrote {} ({} fields) for {}",
        out.display(),
        sheet.items.len(),
        sheet.document_number
    );
    Ok(())
}

/// Dump the active layout so it can be copied and edited as an override.
fn cli_layout(config: &Config) -> Result<()> {
    let layout = StampLayout::resolve(config.stamp.layout.as_deref())?;
    print!("{}", layout.to_toml()?);
    Ok(())
}

fn cli_reset(args: &[String], store: &mut FlatFileStore) -> Result<()> {
    if !args.iter().any(|a| a == "--yes") {
        anyhow::bail!(
            "This deletes every claim and target in {}. Re-run with --yes to confirm",
            store.data_dir().display()
        );
    }
    store.wipe()?;
    println!("All data deleted");
    Ok(())
}

fn print_catalog() {
    println!("Budget categories:");
    for c in BUDGET_CATEGORIES {
        println!("  {c}");
    }
    println!();
    println!("Faculties:");
    for f in FACULTIES {
        println!("  {f}");
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
