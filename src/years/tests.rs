use super::*;

// ── classify ──────────────────────────────────────────────────

#[test]
fn test_classify_matches_cutover_rules_for_every_month() {
    for year in [2560, 2567, 2568, 2569] {
        for month in 1..=12u32 {
            let b = classify(year, month);
            let fiscal = year + if month >= 8 { 1 } else { 0 };
            let academic = year - if month >= 6 { 0 } else { 1 };
            assert_eq!(b.fiscal_year, fiscal, "fiscal {year}/{month}");
            assert_eq!(b.academic_year, academic, "academic {year}/{month}");
            assert_eq!(b.calendar_year, year, "calendar {year}/{month}");
        }
    }
}

#[test]
fn test_classify_september_claim() {
    let b = classify(2568, 9);
    assert_eq!(b.fiscal_year, 2569);
    assert_eq!(b.academic_year, 2568);
    assert_eq!(b.calendar_year, 2568);
}

#[test]
fn test_classify_boundaries() {
    assert_eq!(classify(2568, 7).fiscal_year, 2568);
    assert_eq!(classify(2568, 8).fiscal_year, 2569);
    assert_eq!(classify(2568, 5).academic_year, 2567);
    assert_eq!(classify(2568, 6).academic_year, 2568);
}

#[test]
fn test_buckets_get_by_kind() {
    let b = classify(2568, 1);
    assert_eq!(b.get(YearKind::Fiscal), 2568);
    assert_eq!(b.get(YearKind::Academic), 2567);
    assert_eq!(b.get(YearKind::Calendar), 2568);
}

#[test]
fn test_be_year() {
    assert_eq!(be_year(2025), 2568);
    assert_eq!(be_year(2026), 2569);
}

// ── YearKind ──────────────────────────────────────────────────

#[test]
fn test_year_kind_parse() {
    assert_eq!(YearKind::parse("fiscal"), Some(YearKind::Fiscal));
    assert_eq!(YearKind::parse("FISCAL"), Some(YearKind::Fiscal));
    assert_eq!(YearKind::parse("solar"), Some(YearKind::Calendar));
    assert_eq!(YearKind::parse(" academic "), Some(YearKind::Academic));
    assert_eq!(YearKind::parse("ปีการศึกษา"), Some(YearKind::Academic));
    assert_eq!(YearKind::parse("monthly"), None);
}

#[test]
fn test_year_kind_roundtrip_through_as_str() {
    for kind in YearKind::all() {
        assert_eq!(YearKind::parse(kind.as_str()), Some(*kind));
        assert_eq!(YearKind::parse(kind.label()), Some(*kind));
    }
}

#[test]
fn test_year_kind_next_cycles() {
    let mut k = YearKind::Fiscal;
    for _ in 0..3 {
        k = k.next();
    }
    assert_eq!(k, YearKind::Fiscal);
}
