#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::clock::FixedClock;
use crate::config::StoreConfig;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn temp_store(dir: &Path) -> FlatFileStore {
    FlatFileStore::open(dir, &StoreConfig::default()).unwrap()
}

fn add_args(subject: &str, amount: &str) -> Vec<String> {
    args(&[
        "--subject",
        subject,
        "--faculty",
        "คณะวิทยาศาสตร์",
        "--category",
        "02",
        "--amount",
        amount,
        "--budget",
        "100,000",
    ])
}

// ── argument helpers ──────────────────────────────────────────

#[test]
fn test_flag_lookup() {
    let a = args(&["--kind", "fiscal", "--year", "2569"]);
    assert_eq!(flag(&a, "--year"), Some("2569"));
    assert_eq!(flag(&a, "--match"), None);
    // A trailing flag has no value
    assert_eq!(flag(&args(&["--year"]), "--year"), None);
}

#[test]
fn test_positionals_skip_flag_values() {
    let a = args(&["0203/004", "--template", "memo.pdf", "out.json"]);
    assert_eq!(positionals(&a), vec!["0203/004", "out.json"]);
}

#[test]
fn test_parse_kind_and_year() {
    assert_eq!(parse_kind("academic").unwrap(), YearKind::Academic);
    assert!(parse_kind("monthly").is_err());
    assert_eq!(parse_year(" 2569 ").unwrap(), 2569);
    assert!(parse_year("๒๕๖๙").is_err());
}

#[test]
fn test_export_file_name() {
    assert_eq!(export_file_name(2568), "เบิกจ่าย_2568.csv");
}

#[test]
fn test_shellexpand_plain_path() {
    assert_eq!(shellexpand("/tmp/x.csv"), "/tmp/x.csv");
    assert_eq!(shellexpand("x.csv"), "x.csv");
}

// ── commands ──────────────────────────────────────────────────

#[test]
fn test_add_records_claims_in_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    let config = Config::default();

    cli_add(&add_args("งวด 1", "1,000"), &mut store, &config, &clock).unwrap();
    cli_add(&add_args("งวด 2", "2500.75"), &mut store, &config, &clock).unwrap();

    let records = store.read_all();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].document_number, "0203/001");
    assert_eq!(records[1].document_number, "0203/002");
    assert_eq!(records[1].amount, dec!(2500.75));
    assert_eq!(records[1].approved_budget, dec!(100000));
    assert_eq!(records[1].budget_category, "02 ค่าใช้สอย");
}

#[test]
fn test_add_rejects_bad_amount_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    assert!(cli_add(&add_args("x", "ten"), &mut store, &Config::default(), &clock).is_err());
    assert!(!store.ledger_path().exists());
}

#[test]
fn test_add_with_stamp_but_no_template_keeps_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    let mut a = add_args("งวด 1", "10");
    a.extend(args(&["--stamp", "out.json"]));

    let err = cli_add(&a, &mut store, &Config::default(), &clock).unwrap_err();
    assert!(err.to_string().contains("No document template"));
    assert_eq!(store.read_all().len(), 1);
}

#[test]
fn test_stamp_writes_sheet_for_recorded_claim() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    let template = dir.path().join("memo.pdf");
    fs_write(&template);
    let config = Config::default();
    cli_add(&add_args("งวด 1", "10"), &mut store, &config, &clock).unwrap();

    let out = dir.path().join("sheet.json");
    let a = args(&[
        "0203/001",
        out.to_str().unwrap(),
        "--template",
        template.to_str().unwrap(),
    ]);
    cli_stamp(&a, &store, &config).unwrap();
    assert!(out.exists());

    let missing = args(&["0203/009", "--template", template.to_str().unwrap()]);
    assert!(cli_stamp(&missing, &store, &config).is_err());
}

#[test]
fn test_target_set_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    cli_target(&args(&["fiscal", "2569", "500,000"]), &mut store, &clock).unwrap();
    assert_eq!(store.get_target(YearKind::Fiscal, 2569), Some(dec!(500000)));

    // Year defaults to today's bucket: September 2568 is fiscal 2569
    cli_target(&args(&["fiscal"]), &mut store, &clock).unwrap();
    assert!(cli_target(&args(&["fiscal", "2569", "-1"]), &mut store, &clock).is_err());
    assert!(cli_target(&args(&[]), &mut store, &clock).is_err());
}

#[test]
fn test_list_and_summary_run_on_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    cli_list(&args(&[]), &store).unwrap();
    cli_summary(&args(&["academic"]), &store, &clock).unwrap();
    assert!(cli_list(&args(&["--kind", "fiscal"]), &store).is_err());
}

#[test]
fn test_export_missing_ledger_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    let dest = dir.path().join("out.csv");
    assert!(cli_export(&args(&[dest.to_str().unwrap()]), &store, &clock).is_err());
}

#[test]
fn test_reset_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(dir.path());
    let clock = FixedClock::at(2025, 9, 3);
    cli_add(&add_args("งวด 1", "10"), &mut store, &Config::default(), &clock).unwrap();

    assert!(cli_reset(&args(&[]), &mut store).is_err());
    assert_eq!(store.read_all().len(), 1);
    cli_reset(&args(&["--yes"]), &mut store).unwrap();
    assert!(store.read_all().is_empty());
}

#[test]
fn test_unknown_command() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = temp_store(dir.path());
    let err = as_cli(&args(&["claimreg", "frobnicate"]), &mut store, &Config::default());
    assert!(err.is_err());
}

fn fs_write(path: &Path) {
    std::fs::write(path, b"%PDF-1.4").unwrap();
}

#[test]
fn test_layout_prints_builtin_and_rejects_missing_override() {
    cli_layout(&Config::default()).unwrap();

    let mut config = Config::default();
    config.stamp.layout = Some(PathBuf::from("/nonexistent/layout.toml"));
    assert!(cli_layout(&config).is_err());
}
