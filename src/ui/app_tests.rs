#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::clock::FixedClock;
use crate::config::Config;
use crate::models::{ClaimRecord, BUDGET_CATEGORIES, FACULTIES};
use crate::store::{ClaimStore, MemoryStore};
use crate::years::YearKind;

fn app_at(year: i32, month: u32, day: u32) -> App {
    App::new(Config::default(), Box::new(FixedClock::at(year, month, day)))
}

fn record(doc: &str, month: u32, year: i32, subject: &str) -> ClaimRecord {
    ClaimRecord {
        document_number: doc.into(),
        month,
        year,
        subject: subject.into(),
        faculty: "คณะวิทยาศาสตร์".into(),
        budget_category: "02 ค่าใช้สอย".into(),
        amount: dec!(1000),
        ..ClaimRecord::default()
    }
}

fn store_with(records: Vec<ClaimRecord>) -> MemoryStore {
    MemoryStore {
        records,
        ..MemoryStore::default()
    }
}

fn focus(app: &mut App, field: FormField) {
    app.form_index = FormField::all().iter().position(|f| *f == field).unwrap();
}

// ── form ──────────────────────────────────────────────────────

#[test]
fn test_new_form_has_default_signer_and_recipient() {
    let app = app_at(2025, 9, 3);
    let defaults = Config::default().form_defaults();
    assert_eq!(app.value(FormField::Signer), defaults.signer);
    assert_eq!(app.value(FormField::Recipient), defaults.recipient);
    assert_eq!(app.value(FormField::Subject), "");
    assert_eq!(app.form_values.len(), FormField::all().len());
}

#[test]
fn test_clear_form_resets_typed_values() {
    let mut app = app_at(2025, 9, 3);
    app.set_value(FormField::Subject, "ขอเบิกค่าวัสดุ");
    app.set_value(FormField::Signer, "someone else");
    app.form_index = 4;
    app.clear_form();
    assert_eq!(app.value(FormField::Subject), "");
    assert_eq!(app.value(FormField::Signer), Config::default().form_defaults().signer);
    assert_eq!(app.form_index, 0);
}

#[test]
fn test_cycle_choice_faculty_wraps() {
    let mut app = app_at(2025, 9, 3);
    focus(&mut app, FormField::Faculty);

    app.cycle_choice(1);
    assert_eq!(app.value(FormField::Faculty), FACULTIES[0]);
    app.cycle_choice(-1);
    assert_eq!(app.value(FormField::Faculty), FACULTIES[FACULTIES.len() - 1]);
}

#[test]
fn test_cycle_choice_category_from_code() {
    let mut app = app_at(2025, 9, 3);
    focus(&mut app, FormField::Category);
    app.set_value(FormField::Category, "02");

    app.cycle_choice(1);
    assert_eq!(app.value(FormField::Category), BUDGET_CATEGORIES[2].display());
}

#[test]
fn test_cycle_choice_ignores_text_fields() {
    let mut app = app_at(2025, 9, 3);
    app.set_value(FormField::Subject, "typed");
    app.cycle_choice(1);
    assert_eq!(app.value(FormField::Subject), "typed");
}

#[test]
fn test_claim_form_parses_amounts() {
    let mut app = app_at(2025, 9, 3);
    app.set_value(FormField::Subject, "ค่าเดินทาง");
    app.set_value(FormField::Amount, "12,500.50");
    app.set_value(FormField::ApprovedBudget, "");

    let form = app.claim_form().unwrap();
    assert_eq!(form.subject, "ค่าเดินทาง");
    assert_eq!(form.amount, dec!(12500.50));
    assert_eq!(form.approved_budget, dec!(0));
}

#[test]
fn test_claim_form_rejects_bad_amount() {
    let mut app = app_at(2025, 9, 3);
    app.set_value(FormField::Amount, "twelve");
    assert!(app.claim_form().is_err());
}

#[test]
fn test_today_label_is_thai_date() {
    let app = app_at(2025, 9, 3);
    assert_eq!(app.today_label(), "3 กันยายน 2568");
}

// ── refresh ───────────────────────────────────────────────────

#[test]
fn test_refresh_all_computes_next_number() {
    let mut app = app_at(2025, 9, 3);
    let store = store_with(vec![
        record("0203/001", 8, 2568, "a"),
        record("0203/002", 9, 2568, "b"),
    ]);
    app.refresh_all(&store);
    assert_eq!(app.next_number, "0203/003");
    assert_eq!(app.records.len(), 2);
}

#[test]
fn test_refresh_all_on_empty_store() {
    let mut app = app_at(2025, 9, 3);
    app.refresh_all(&MemoryStore::default());
    assert_eq!(app.next_number, "0203/001");
    assert_eq!(app.summary.record_count, 0);
}

#[test]
fn test_refresh_all_new_year_restarts() {
    let mut app = app_at(2026, 1, 2);
    let store = store_with(vec![record("0203/245", 12, 2568, "a")]);
    app.refresh_all(&store);
    assert_eq!(app.next_number, "0203/001");
}

#[test]
fn test_dashboard_starts_on_todays_fiscal_year() {
    // September 2568 already belongs to fiscal 2569
    let app = app_at(2025, 9, 3);
    assert_eq!(app.kind, YearKind::Fiscal);
    assert_eq!(app.year, 2569);
}

#[test]
fn test_set_kind_and_year_refresh_summary() {
    let mut app = app_at(2025, 9, 3);
    let mut store = store_with(vec![
        record("0203/001", 3, 2568, "a"),
        record("0203/002", 9, 2568, "b"),
    ]);
    store.upsert_target(YearKind::Calendar, 2568, dec!(5000)).unwrap();
    app.refresh_all(&store);
    assert_eq!(app.summary.record_count, 1);

    app.set_kind(YearKind::Calendar, &store);
    assert_eq!(app.year, 2568);
    assert_eq!(app.summary.record_count, 2);
    assert_eq!(app.target, Some(dec!(5000)));

    app.set_year(2567, &store);
    assert_eq!(app.summary.record_count, 0);
    assert_eq!(app.target, None);
}

// ── ledger ────────────────────────────────────────────────────

#[test]
fn test_visible_records_newest_first() {
    let mut app = app_at(2025, 9, 3);
    let store = store_with(vec![
        record("0203/001", 9, 2568, "a"),
        record("0203/002", 9, 2568, "b"),
    ]);
    app.refresh_all(&store);
    let docs: Vec<&str> = app
        .visible_records()
        .iter()
        .map(|r| r.document_number.as_str())
        .collect();
    assert_eq!(docs, vec!["0203/002", "0203/001"]);
    assert_eq!(app.selected_record().unwrap().document_number, "0203/002");
}

#[test]
fn test_search_narrows_ledger_and_clamps_cursor() {
    let mut app = app_at(2025, 9, 3);
    let store = store_with(vec![
        record("0203/001", 9, 2568, "ค่าเดินทางไปประชุม"),
        record("0203/002", 9, 2568, "ค่าวัสดุวิทยาศาสตร์"),
        record("0203/003", 9, 2568, "ค่าเดินทางภาคสนาม"),
    ]);
    app.refresh_all(&store);
    app.ledger_index = 2;

    app.set_search("เดินทาง");
    app.clamp_ledger_cursor();
    assert_eq!(app.visible_records().len(), 2);
    assert_eq!(app.ledger_index, 1);
    assert_eq!(app.selected_record().unwrap().document_number, "0203/001");
}

#[test]
fn test_search_edits_rebuild_filter() {
    let mut app = app_at(2025, 9, 3);
    let store = store_with(vec![
        record("0203/001", 9, 2568, "ค่าเดินทาง (ภาคเหนือ)"),
        record("0203/002", 9, 2568, "ค่าวัสดุ"),
    ]);
    app.refresh_all(&store);

    // An unbalanced group falls back to plain text until it closes
    app.set_search("(ภาค");
    assert!(!app.ledger_filter().is_regex());
    assert_eq!(app.visible_records().len(), 1);
    app.push_search(')');
    assert!(app.ledger_filter().is_regex());
    assert_eq!(app.visible_records().len(), 1);

    app.pop_search();
    assert_eq!(app.search(), "(ภาค");
    assert!(!app.ledger_filter().is_regex());

    app.clear_search();
    assert!(!app.ledger_filter().is_regex());
    assert_eq!(app.visible_records().len(), 2);
}

#[test]
fn test_selected_record_none_when_empty() {
    let app = app_at(2025, 9, 3);
    assert!(app.selected_record().is_none());
}
