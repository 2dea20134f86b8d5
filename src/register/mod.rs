use anyhow::{Context, Result};
use chrono::Datelike;
use log::info;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::clock::Clock;
use crate::config::FormDefaults;
use crate::models::{find_faculty, BudgetCategory, ClaimRecord};
use crate::numbering::next_from_store;
use crate::store::ClaimStore;
use crate::thai::baht_text;
use crate::years::be_year;

/// Timestamp written to the `บันทึกเมื่อ` column.
pub(crate) const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What the clerk types in; everything else on the record is derived.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClaimForm {
    pub(crate) subject: String,
    pub(crate) project_name: String,
    pub(crate) project_leader: String,
    pub(crate) faculty: String,
    pub(crate) budget_category: String,
    pub(crate) approved_budget: Decimal,
    pub(crate) amount: Decimal,
    pub(crate) recipient: String,
    pub(crate) signer: String,
    pub(crate) attachment: String,
    pub(crate) payee: String,
    pub(crate) bank_detail: String,
    pub(crate) position: String,
}

/// Validate `form`, number it and append it to the ledger.
///
/// The number is taken from a fresh read of the store right before the
/// append. Nothing is written when validation fails.
pub(crate) fn register_claim<S: ClaimStore + ?Sized>(
    store: &mut S,
    clock: &dyn Clock,
    defaults: &FormDefaults,
    form: &ClaimForm,
) -> Result<ClaimRecord> {
    let mut record = build_record(clock, defaults, form)?;
    record.document_number = next_from_store(store, clock);
    store
        .append(&record)
        .with_context(|| format!("Failed to record claim {}", record.document_number))?;
    info!(
        "Registered {} ({} baht, {})",
        record.document_number, record.amount, record.faculty
    );
    Ok(record)
}

/// Everything but the document number, checked against the catalogs.
pub(crate) fn build_record(
    clock: &dyn Clock,
    defaults: &FormDefaults,
    form: &ClaimForm,
) -> Result<ClaimRecord> {
    let subject = form.subject.trim();
    if subject.is_empty() {
        anyhow::bail!("Subject is required");
    }
    let faculty = find_faculty(&form.faculty)
        .ok_or_else(|| anyhow::anyhow!("Unknown faculty: '{}'", form.faculty.trim()))?;
    let category = BudgetCategory::find(&form.budget_category).ok_or_else(|| {
        anyhow::anyhow!("Unknown budget category: '{}'", form.budget_category.trim())
    })?;
    if form.amount < Decimal::ZERO {
        anyhow::bail!("Claimed amount cannot be negative: {}", form.amount);
    }
    if form.approved_budget < Decimal::ZERO {
        anyhow::bail!("Approved budget cannot be negative: {}", form.approved_budget);
    }
    let amount_in_words = baht_text(form.amount)
        .with_context(|| format!("Claimed amount is too large: {}", form.amount))?;

    let now = clock.now();
    let or_default = |value: &str, fallback: &str| {
        let value = value.trim();
        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };

    Ok(ClaimRecord {
        day: now.day(),
        month: now.month(),
        year: be_year(now.year()),
        signer: or_default(&form.signer, &defaults.signer),
        recipient: or_default(&form.recipient, &defaults.recipient),
        subject: subject.to_string(),
        faculty: faculty.to_string(),
        project_leader: form.project_leader.trim().to_string(),
        approved_budget: form.approved_budget,
        amount: form.amount,
        project_name: form.project_name.trim().to_string(),
        budget_category: category.display(),
        created_at: now.format(CREATED_AT_FORMAT).to_string(),
        attachment: form.attachment.trim().to_string(),
        amount_in_words,
        payee: form.payee.trim().to_string(),
        bank_detail: form.bank_detail.trim().to_string(),
        position: form.position.trim().to_string(),
        ..ClaimRecord::default()
    })
}

/// Parse a typed-in amount: thousands separators, a baht sign and blanks
/// are allowed; negatives are not.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.replace([',', '฿', ' '], "");
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let amount = Decimal::from_str(&cleaned)
        .with_context(|| format!("Failed to parse '{}' as an amount", s.trim()))?;
    if amount < Decimal::ZERO {
        anyhow::bail!("Amount cannot be negative: {amount}");
    }
    Ok(amount)
}

#[cfg(test)]
mod tests;
