use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::years::{classify, YearBuckets, YearKind};

/// One disbursement request, as stored in a ledger row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimRecord {
    /// Free-text running label, kept for compatibility with old sheets.
    pub sequence: String,
    /// Format: "0203/NNN"
    pub document_number: String,
    pub day: u32,
    pub month: u32,
    /// Buddhist Era year.
    pub year: i32,
    pub signer: String,
    pub recipient: String,
    pub subject: String,
    pub faculty: String,
    pub project_leader: String,
    pub coordinator: String,
    pub approved_budget: Decimal,
    pub amount: Decimal,
    pub project_name: String,
    /// Budget category as "code label", e.g. "02 ค่าใช้สอย".
    pub budget_category: String,
    pub created_at: String,
    pub attachment: String,
    pub amount_in_words: String,
    pub payee: String,
    pub bank_detail: String,
    pub position: String,
}

impl ClaimRecord {
    pub fn buckets(&self) -> YearBuckets {
        classify(self.year, self.month)
    }

    pub fn bucket_year(&self, kind: YearKind) -> i32 {
        self.buckets().get(kind)
    }

    /// Render one column as it is written to the ledger file.
    pub fn field(&self, column: Column) -> String {
        match column {
            Column::Sequence => self.sequence.clone(),
            Column::DocumentNumber => self.document_number.clone(),
            Column::Day => self.day.to_string(),
            Column::Month => self.month.to_string(),
            Column::Year => self.year.to_string(),
            Column::Signer => self.signer.clone(),
            Column::Recipient => self.recipient.clone(),
            Column::Subject => self.subject.clone(),
            Column::Faculty => self.faculty.clone(),
            Column::ProjectLeader => self.project_leader.clone(),
            Column::Coordinator => self.coordinator.clone(),
            Column::ApprovedBudget => format!("{:.2}", self.approved_budget),
            Column::Amount => format!("{:.2}", self.amount),
            Column::ProjectName => self.project_name.clone(),
            Column::BudgetCategory => self.budget_category.clone(),
            Column::CreatedAt => self.created_at.clone(),
            Column::Attachment => self.attachment.clone(),
            Column::AmountInWords => self.amount_in_words.clone(),
            Column::Payee => self.payee.clone(),
            Column::BankDetail => self.bank_detail.clone(),
            Column::Position => self.position.clone(),
        }
    }

    /// Set one column from its raw cell text.
    /// Unparseable numbers become zero; returns false when that happened.
    pub fn set_field(&mut self, column: Column, raw: &str) -> bool {
        let value = raw.trim();
        match column {
            Column::Sequence => self.sequence = value.to_string(),
            Column::DocumentNumber => self.document_number = value.to_string(),
            Column::Day => return set_parsed(&mut self.day, parse_int(value)),
            Column::Month => return set_parsed(&mut self.month, parse_int(value)),
            Column::Year => return set_parsed(&mut self.year, parse_int(value)),
            Column::Signer => self.signer = value.to_string(),
            Column::Recipient => self.recipient = value.to_string(),
            Column::Subject => self.subject = value.to_string(),
            Column::Faculty => self.faculty = value.to_string(),
            Column::ProjectLeader => self.project_leader = value.to_string(),
            Column::Coordinator => self.coordinator = value.to_string(),
            Column::ApprovedBudget => {
                return set_parsed(&mut self.approved_budget, parse_amount(value))
            }
            Column::Amount => return set_parsed(&mut self.amount, parse_amount(value)),
            Column::ProjectName => self.project_name = value.to_string(),
            Column::BudgetCategory => self.budget_category = value.to_string(),
            Column::CreatedAt => self.created_at = value.to_string(),
            Column::Attachment => self.attachment = value.to_string(),
            Column::AmountInWords => self.amount_in_words = value.to_string(),
            Column::Payee => self.payee = value.to_string(),
            Column::BankDetail => self.bank_detail = value.to_string(),
            Column::Position => self.position = value.to_string(),
        }
        true
    }
}

fn set_parsed<T: Default>(slot: &mut T, parsed: Option<Option<T>>) -> bool {
    match parsed {
        // Empty cell: optional column not filled in
        None => {
            *slot = T::default();
            true
        }
        Some(Some(v)) => {
            *slot = v;
            true
        }
        Some(None) => {
            *slot = T::default();
            false
        }
    }
}

/// `None` for an empty cell, `Some(None)` for garbage.
/// Spreadsheet round trips turn `2568` into `2568.0`, so decimals are truncated.
fn parse_int<T: TryFrom<i64>>(s: &str) -> Option<Option<T>> {
    if s.is_empty() {
        return None;
    }
    let whole = s.parse::<i64>().ok().or_else(|| {
        Decimal::from_str(s)
            .ok()
            .and_then(|d| d.trunc().to_i64())
    });
    Some(whole.and_then(|n| T::try_from(n).ok()))
}

fn parse_amount(s: &str) -> Option<Option<Decimal>> {
    if s.is_empty() {
        return None;
    }
    Some(Decimal::from_str(&s.replace(',', "")).ok())
}

/// Ledger columns in the order the current schema writes them.
/// Header names match the sheets the office already keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Sequence,
    DocumentNumber,
    Day,
    Month,
    Year,
    Signer,
    Recipient,
    Subject,
    Faculty,
    ProjectLeader,
    Coordinator,
    ApprovedBudget,
    Amount,
    ProjectName,
    BudgetCategory,
    CreatedAt,
    Attachment,
    AmountInWords,
    Payee,
    BankDetail,
    Position,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Self::Sequence => "NO",
            Self::DocumentNumber => "เลขที่ออก",
            Self::Day => "วัน",
            Self::Month => "เดือน",
            Self::Year => "ปี",
            Self::Signer => "ผู้ลงนาม",
            Self::Recipient => "ถึง",
            Self::Subject => "เรื่อง",
            Self::Faculty => "คณะ",
            Self::ProjectLeader => "หัวหน้าโครงการวิจัย",
            Self::Coordinator => "ผู้ประสาน",
            Self::ApprovedBudget => "เงินที่อนุมัติ",
            Self::Amount => "จำนวนเงิน",
            Self::ProjectName => "ชื่อโครงการ",
            Self::BudgetCategory => "รหัสหมวด",
            Self::CreatedAt => "บันทึกเมื่อ",
            Self::Attachment => "สิ่งที่ส่งมาด้วย",
            Self::AmountInWords => "จำนวนเงินตัวอักษร",
            Self::Payee => "ผู้รับเงิน",
            Self::BankDetail => "ธนาคาร",
            Self::Position => "ตำแหน่ง",
        }
    }

    pub fn from_header(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('\u{feff}');
        Self::all().iter().copied().find(|c| c.header() == name)
    }

    pub fn all() -> &'static [Column] {
        &[
            Self::Sequence,
            Self::DocumentNumber,
            Self::Day,
            Self::Month,
            Self::Year,
            Self::Signer,
            Self::Recipient,
            Self::Subject,
            Self::Faculty,
            Self::ProjectLeader,
            Self::Coordinator,
            Self::ApprovedBudget,
            Self::Amount,
            Self::ProjectName,
            Self::BudgetCategory,
            Self::CreatedAt,
            Self::Attachment,
            Self::AmountInWords,
            Self::Payee,
            Self::BankDetail,
            Self::Position,
        ]
    }
}
