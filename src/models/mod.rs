mod catalog;
mod claim;
mod target;

pub use catalog::{find_faculty, BudgetCategory, BUDGET_CATEGORIES, FACULTIES};
pub use claim::{ClaimRecord, Column};
pub use target::BudgetTarget;
