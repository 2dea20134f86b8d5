mod layout;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StampConfig;
use crate::models::ClaimRecord;
use crate::thai::{baht_text, format_amount, thai_date};

pub(crate) use layout::{Align, PageSize, StampField, StampLayout};

/// Font used when no Thai font file can be found. Thai glyphs don't render in it.
pub(crate) const LATIN_FALLBACK: &str = "Helvetica";

/// One piece of text positioned on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PlacedText {
    pub(crate) field: StampField,
    pub(crate) text: String,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) size: f32,
    pub(crate) align: Align,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum FontChoice {
    Thai { path: PathBuf },
    Latin { name: String },
}

impl FontChoice {
    pub(crate) fn is_thai(&self) -> bool {
        matches!(self, FontChoice::Thai { .. })
    }
}

/// Everything the PDF backend needs to render one claim over its template.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct StampSheet {
    pub(crate) document_number: String,
    pub(crate) template: PathBuf,
    pub(crate) font: FontChoice,
    pub(crate) page: PageSize,
    pub(crate) items: Vec<PlacedText>,
}

/// Text the record shows for `field`.
pub(crate) fn field_text(record: &ClaimRecord, field: StampField) -> String {
    match field {
        StampField::DocumentNumber => record.document_number.clone(),
        StampField::Date => thai_date(record.day, record.month, record.year),
        StampField::Signer => record.signer.clone(),
        StampField::Recipient => record.recipient.clone(),
        StampField::Subject => record.subject.clone(),
        StampField::Faculty => record.faculty.clone(),
        StampField::ProjectLeader => record.project_leader.clone(),
        StampField::ProjectName => record.project_name.clone(),
        StampField::BudgetCategory => record.budget_category.clone(),
        StampField::ApprovedBudget => format_amount(record.approved_budget),
        StampField::Amount => format_amount(record.amount),
        StampField::AmountInWords => {
            if record.amount_in_words.is_empty() {
                baht_text(record.amount).unwrap_or_default()
            } else {
                record.amount_in_words.clone()
            }
        }
        StampField::Attachment => record.attachment.clone(),
        StampField::Payee => record.payee.clone(),
        StampField::BankDetail => record.bank_detail.clone(),
        StampField::Position => record.position.clone(),
    }
}

/// Resolve each placement's text; blank values are left off the page.
pub(crate) fn plan(record: &ClaimRecord, layout: &StampLayout) -> Vec<PlacedText> {
    layout
        .fields
        .iter()
        .filter_map(|p| {
            let text = field_text(record, p.field);
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(PlacedText {
                field: p.field,
                text: text.to_string(),
                x: p.x,
                y: p.y,
                size: p.size,
                align: p.align,
            })
        })
        .collect()
}

/// Configured Thai font, else the cached one, else the Latin fallback.
pub(crate) fn resolve_font(config: &StampConfig, cached_font: &Path) -> FontChoice {
    let candidates = config.thai_font.iter().map(PathBuf::as_path).chain([cached_font]);
    for path in candidates {
        if path.is_file() {
            return FontChoice::Thai {
                path: path.to_path_buf(),
            };
        }
    }
    warn!("No Thai font found, falling back to {LATIN_FALLBACK}; Thai text will not render");
    FontChoice::Latin {
        name: LATIN_FALLBACK.to_string(),
    }
}

/// Default output name, e.g. `0203_001.json`.
pub(crate) fn sheet_file_name(record: &ClaimRecord) -> String {
    let stem = record.document_number.replace(['/', '\\'], "_");
    if stem.is_empty() {
        "stamp.json".to_string()
    } else {
        format!("{stem}.json")
    }
}

/// Lay `record` out and write the sheet as JSON to `out`.
///
/// Fails if the template is missing; the ledger is left as it is.
pub(crate) fn write_stamp_sheet(
    record: &ClaimRecord,
    layout: &StampLayout,
    template: &Path,
    font: FontChoice,
    out: &Path,
) -> Result<StampSheet> {
    if !template.is_file() {
        anyhow::bail!(
            "Document template not found: {} (claim {} is still recorded)",
            template.display(),
            record.document_number
        );
    }
    let sheet = StampSheet {
        document_number: record.document_number.clone(),
        template: template.to_path_buf(),
        font,
        page: layout.page,
        items: plan(record, layout),
    };
    let json = serde_json::to_string_pretty(&sheet).context("Failed to encode stamp sheet")?;
    fs::write(out, json)
        .with_context(|| format!("Failed to write stamp sheet: {}", out.display()))?;
    info!(
        "Wrote stamp sheet for {} to {} ({} items)",
        sheet.document_number,
        out.display(),
        sheet.items.len()
    );
    Ok(sheet)
}
