use rust_decimal::Decimal;

use crate::years::YearKind;

/// Budget ceiling for one (kind, year) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTarget {
    pub kind: YearKind,
    /// Buddhist Era year of the bucket.
    pub year: i32,
    pub amount: Decimal,
}

impl BudgetTarget {
    pub fn new(kind: YearKind, year: i32, amount: Decimal) -> Self {
        Self { kind, year, amount }
    }

    pub fn key(&self) -> (YearKind, i32) {
        (self.kind, self.year)
    }
}
