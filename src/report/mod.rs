mod filter;

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::ClaimRecord;
use crate::years::YearKind;

pub(crate) use filter::LedgerFilter;

/// Claimed totals for one year bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Summary {
    pub(crate) kind: Option<YearKind>,
    pub(crate) year: i32,
    pub(crate) record_count: usize,
    pub(crate) total_spent: Decimal,
    /// (category, total), largest first.
    pub(crate) by_category: Vec<(String, Decimal)>,
    /// (faculty, total), largest first.
    pub(crate) by_faculty: Vec<(String, Decimal)>,
}

/// Spending measured against a budget ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BudgetStatus {
    pub(crate) target: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) percent_used: Decimal,
}

impl Summary {
    /// Usage saturates at `Decimal::MAX` when the ratio does not fit.
    pub(crate) fn against(&self, target: Decimal) -> BudgetStatus {
        let percent_used = if target > Decimal::ZERO {
            self.total_spent
                .checked_div(target)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        };
        BudgetStatus {
            target,
            spent: self.total_spent,
            remaining: target.saturating_sub(self.total_spent),
            percent_used,
        }
    }
}

impl BudgetStatus {
    /// `12.5%`, or `n/a` once usage has saturated.
    pub(crate) fn percent_label(&self) -> String {
        if self.percent_used == Decimal::MAX {
            "n/a".to_string()
        } else {
            format!("{:.1}%", self.percent_used)
        }
    }
}

/// Sum the records whose `kind` bucket equals `year`.
pub(crate) fn summarize(records: &[ClaimRecord], kind: YearKind, year: i32) -> Summary {
    let mut total_spent = Decimal::ZERO;
    let mut record_count = 0;
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut by_faculty: BTreeMap<&str, Decimal> = BTreeMap::new();

    for rec in records.iter().filter(|r| r.bucket_year(kind) == year) {
        record_count += 1;
        total_spent = total_spent.saturating_add(rec.amount);
        let cat = by_category.entry(rec.budget_category.as_str()).or_default();
        *cat = cat.saturating_add(rec.amount);
        let fac = by_faculty.entry(rec.faculty.as_str()).or_default();
        *fac = fac.saturating_add(rec.amount);
    }

    Summary {
        kind: Some(kind),
        year,
        record_count,
        total_spent,
        by_category: ranked(by_category),
        by_faculty: ranked(by_faculty),
    }
}

fn ranked(groups: BTreeMap<&str, Decimal>) -> Vec<(String, Decimal)> {
    let mut rows: Vec<(String, Decimal)> = groups
        .into_iter()
        .map(|(name, amt)| (name.to_string(), amt))
        .collect();
    // Stable sort keeps name order among equal totals
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Distinct bucket years present in the ledger, newest first.
pub(crate) fn available_years(records: &[ClaimRecord], kind: YearKind) -> Vec<i32> {
    let mut years: Vec<i32> = records
        .iter()
        .filter(|r| r.year > 0)
        .map(|r| r.bucket_year(kind))
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}
