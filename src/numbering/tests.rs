#![allow(clippy::unwrap_used)]

use super::*;
use crate::clock::FixedClock;
use crate::store::MemoryStore;

fn row(doc: &str, year: i32) -> ClaimRecord {
    ClaimRecord {
        document_number: doc.into(),
        day: 1,
        month: 3,
        year,
        ..ClaimRecord::default()
    }
}

// ── next_document_number ──────────────────────────────────────

#[test]
fn test_empty_ledger_gets_seed() {
    assert_eq!(next_document_number(&[], 2568), "0203/001");
}

#[test]
fn test_increments_last_number_same_year() {
    let ledger = vec![row("0203/006", 2568), row("0203/007", 2568)];
    assert_eq!(next_document_number(&ledger, 2568), "0203/008");
}

#[test]
fn test_resets_on_year_rollover() {
    let ledger = vec![row("0203/041", 2568), row("0203/042", 2568)];
    assert_eq!(next_document_number(&ledger, 2569), "0203/001");
}

#[test]
fn test_uses_last_row_not_highest_number() {
    // Sequence follows insertion order even if an older row has a larger suffix
    let ledger = vec![row("0203/090", 2568), row("0203/003", 2568)];
    assert_eq!(next_document_number(&ledger, 2568), "0203/004");
}

#[test]
fn test_no_reset_when_ledger_already_has_current_year() {
    let ledger = vec![row("0203/010", 2569), row("0203/011", 2569)];
    assert_eq!(next_document_number(&ledger, 2569), "0203/012");
}

#[test]
fn test_grows_past_three_digits() {
    let ledger = vec![row("0203/999", 2568)];
    assert_eq!(next_document_number(&ledger, 2568), "0203/1000");
}

#[test]
fn test_malformed_suffix_falls_back_to_seed() {
    let ledger = vec![row("0203/abc", 2568)];
    assert_eq!(next_document_number(&ledger, 2568), "0203/001");
}

#[test]
fn test_exhausted_sequence_falls_back_to_seed() {
    let ledger = vec![row("0203/4294967295", 2568)];
    assert_eq!(next_document_number(&ledger, 2568), "0203/001");
}

#[test]
fn test_missing_document_number_falls_back_to_seed() {
    let ledger = vec![row("", 2568)];
    assert_eq!(next_document_number(&ledger, 2568), "0203/001");
}

#[test]
fn test_unreadable_year_falls_back_to_seed() {
    let ledger = vec![row("0203/005", 2568), row("0203/006", 0)];
    assert_eq!(next_document_number(&ledger, 2568), "0203/001");
}

// ── sequence_of ───────────────────────────────────────────────

#[test]
fn test_sequence_of() {
    assert_eq!(sequence_of("0203/007").unwrap(), 7);
    assert_eq!(sequence_of("0203/ 12").unwrap(), 12);
    assert_eq!(sequence_of("15").unwrap(), 15);
    assert!(sequence_of("0203/").is_err());
    assert!(sequence_of("0203/x1").is_err());
}

#[test]
fn test_format_document_number() {
    assert_eq!(format_document_number(1), "0203/001");
    assert_eq!(format_document_number(42), "0203/042");
    assert_eq!(seed_document_number(), "0203/001");
}

// ── next_from_store ───────────────────────────────────────────

#[test]
fn test_next_from_store_uses_clock_year() {
    let mut store = MemoryStore::default();
    store.records.push(row("0203/002", 2568));
    // 2025 CE = 2568 BE
    assert_eq!(
        next_from_store(&store, &FixedClock::at(2025, 11, 1)),
        "0203/003"
    );
    assert_eq!(
        next_from_store(&store, &FixedClock::at(2026, 1, 2)),
        "0203/001"
    );
}
