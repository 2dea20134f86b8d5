#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::clock::FixedClock;
use crate::store::MemoryStore;

fn form() -> ClaimForm {
    ClaimForm {
        subject: "ขอเบิกเงินงวดที่ 1".into(),
        project_name: "โครงการศึกษาลำน้ำอิง".into(),
        project_leader: "ผศ.ดร.สมชาย ใจดี".into(),
        faculty: "คณะวิทยาศาสตร์".into(),
        budget_category: "02".into(),
        approved_budget: dec!(300000),
        amount: dec!(1500.50),
        ..ClaimForm::default()
    }
}

#[test]
fn test_register_first_and_second_claim() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let defaults = FormDefaults::default();

    let first = register_claim(&mut store, &clock, &defaults, &form()).unwrap();
    assert_eq!(first.document_number, "0203/001");
    assert_eq!((first.day, first.month, first.year), (3, 9, 2568));
    assert_eq!(first.created_at, "2025-09-03 10:30:00");

    let second = register_claim(&mut store, &clock, &defaults, &form()).unwrap();
    assert_eq!(second.document_number, "0203/002");
    assert_eq!(store.records.len(), 2);
}

#[test]
fn test_register_fills_derived_fields() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let rec = register_claim(&mut store, &clock, &FormDefaults::default(), &form()).unwrap();

    assert_eq!(rec.budget_category, "02 ค่าใช้สอย");
    assert_eq!(rec.signer, "ผู้อำนวยการ");
    assert_eq!(
        rec.recipient,
        "รองอธิการบดีฝ่ายวิชาการและวิจัย,ผู้อำนวยการสำนักการเงิน"
    );
    assert_eq!(rec.amount_in_words, "หนึ่งพันห้าร้อยบาทห้าสิบสตางค์");
    assert!(rec.sequence.is_empty());
    assert!(rec.coordinator.is_empty());
    assert_eq!(store.records[0], rec);
}

#[test]
fn test_register_keeps_explicit_signer_and_recipient() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.signer = " รองผู้อำนวยการ ".into();
    f.recipient = "คณบดี".into();
    let rec = register_claim(&mut store, &clock, &FormDefaults::default(), &f).unwrap();
    assert_eq!(rec.signer, "รองผู้อำนวยการ");
    assert_eq!(rec.recipient, "คณบดี");
}

#[test]
fn test_register_uses_configured_defaults() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let defaults = FormDefaults {
        signer: "รักษาการผู้อำนวยการ".into(),
        recipient: "อธิการบดี".into(),
    };
    let rec = register_claim(&mut store, &clock, &defaults, &form()).unwrap();
    assert_eq!(rec.signer, "รักษาการผู้อำนวยการ");
    assert_eq!(rec.recipient, "อธิการบดี");
}

#[test]
fn test_register_resets_after_new_year() {
    let mut store = MemoryStore::default();
    let defaults = FormDefaults::default();
    let december = FixedClock::at(2025, 12, 30);
    register_claim(&mut store, &december, &defaults, &form()).unwrap();
    let last = register_claim(&mut store, &december, &defaults, &form()).unwrap();
    assert_eq!(last.document_number, "0203/002");

    let january = FixedClock::at(2026, 1, 2);
    let rec = register_claim(&mut store, &january, &defaults, &form()).unwrap();
    assert_eq!(rec.document_number, "0203/001");
    assert_eq!(rec.year, 2569);
}

#[test]
fn test_register_rejects_blank_subject() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.subject = "   ".into();
    assert!(register_claim(&mut store, &clock, &FormDefaults::default(), &f).is_err());
    assert!(store.records.is_empty());
}

#[test]
fn test_register_rejects_unknown_faculty() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.faculty = "คณะดาราศาสตร์".into();
    let err = register_claim(&mut store, &clock, &FormDefaults::default(), &f).unwrap_err();
    assert!(err.to_string().contains("Unknown faculty"));
    assert!(store.records.is_empty());
}

#[test]
fn test_register_rejects_unknown_category() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.budget_category = "42".into();
    assert!(register_claim(&mut store, &clock, &FormDefaults::default(), &f).is_err());
    assert!(store.records.is_empty());
}

#[test]
fn test_register_rejects_negative_amounts() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.amount = dec!(-1);
    assert!(register_claim(&mut store, &clock, &FormDefaults::default(), &f).is_err());
    let mut f = form();
    f.approved_budget = dec!(-0.01);
    assert!(register_claim(&mut store, &clock, &FormDefaults::default(), &f).is_err());
    assert!(store.records.is_empty());
}

#[test]
fn test_register_rejects_amount_too_large_for_words() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.amount = dec!(100000000000000000000);
    let err = register_claim(&mut store, &clock, &FormDefaults::default(), &f).unwrap_err();
    assert!(err.to_string().contains("too large"), "{err}");
    assert!(store.records.is_empty());
}

#[test]
fn test_register_accepts_zero_amount() {
    let mut store = MemoryStore::default();
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.amount = Decimal::ZERO;
    let rec = register_claim(&mut store, &clock, &FormDefaults::default(), &f).unwrap();
    assert_eq!(rec.amount_in_words, "ศูนย์บาทถ้วน");
}

#[test]
fn test_category_accepts_label() {
    let clock = FixedClock::at(2025, 9, 3);
    let mut f = form();
    f.budget_category = "ค่าเดินทาง".into();
    let rec = build_record(&clock, &FormDefaults::default(), &f).unwrap();
    assert_eq!(rec.budget_category, "06 ค่าเดินทาง");
    assert!(rec.document_number.is_empty());
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("1,500.50").unwrap(), dec!(1500.50));
    assert_eq!(parse_amount(" ฿ 20000 ").unwrap(), dec!(20000));
    assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
}

#[test]
fn test_parse_amount_rejects_garbage_and_negatives() {
    assert!(parse_amount("abc").is_err());
    assert!(parse_amount("-5").is_err());
}
