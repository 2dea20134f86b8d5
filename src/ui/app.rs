use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;

use crate::clock::Clock;
use crate::config::{Config, FormDefaults};
use crate::models::{BudgetCategory, ClaimRecord, BUDGET_CATEGORIES, FACULTIES};
use crate::numbering::next_document_number;
use crate::register::{parse_amount, ClaimForm};
use crate::report::{available_years, summarize, LedgerFilter, Summary};
use crate::store::ClaimStore;
use crate::thai::thai_date;
use crate::ui::util::cycle_index;
use crate::years::YearKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Register,
    Ledger,
    Dashboard,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Register, Self::Ledger, Self::Dashboard]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register => write!(f, "Register"),
            Self::Ledger => write!(f, "Ledger"),
            Self::Dashboard => write!(f, "Dashboard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    Submit,
    Reset,
}

/// Input boxes of the claim form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Subject,
    ProjectName,
    ProjectLeader,
    Faculty,
    Category,
    ApprovedBudget,
    Amount,
    Recipient,
    Signer,
    Attachment,
    Payee,
    BankDetail,
    Position,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Subject,
            Self::ProjectName,
            Self::ProjectLeader,
            Self::Faculty,
            Self::Category,
            Self::ApprovedBudget,
            Self::Amount,
            Self::Recipient,
            Self::Signer,
            Self::Attachment,
            Self::Payee,
            Self::BankDetail,
            Self::Position,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Subject => "เรื่อง",
            Self::ProjectName => "ชื่อโครงการวิจัย",
            Self::ProjectLeader => "หัวหน้าโครงการ",
            Self::Faculty => "คณะ / หน่วยงาน",
            Self::Category => "หมวดงบประมาณ",
            Self::ApprovedBudget => "งบประมาณทั้งโครงการ",
            Self::Amount => "จำนวนเงินที่เบิก",
            Self::Recipient => "เรียน",
            Self::Signer => "ผู้ลงนาม",
            Self::Attachment => "สิ่งที่ส่งมาด้วย",
            Self::Payee => "ผู้รับเงิน",
            Self::BankDetail => "ธนาคาร",
            Self::Position => "ตำแหน่ง",
        }
    }

    /// Picked from a fixed list with +/- rather than typed.
    pub(crate) fn is_choice(&self) -> bool {
        matches!(self, Self::Faculty | Self::Category)
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    search_input: String,
    /// Compiled from `search_input`; rebuilt only when it changes.
    search_filter: LedgerFilter,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) config: Config,

    // Register
    pub(crate) form_values: Vec<String>,
    pub(crate) form_index: usize,
    pub(crate) next_number: String,
    pub(crate) last_registered: Option<ClaimRecord>,

    // Ledger
    pub(crate) records: Vec<ClaimRecord>,
    pub(crate) ledger_index: usize,
    pub(crate) ledger_scroll: usize,

    // Dashboard
    pub(crate) kind: YearKind,
    pub(crate) year: i32,
    pub(crate) summary: Summary,
    pub(crate) target: Option<Decimal>,
    pub(crate) years: Vec<i32>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: Config, clock: Box<dyn Clock>) -> Self {
        let kind = YearKind::Fiscal;
        let year = clock.today_buckets().get(kind);
        let mut app = Self {
            running: true,
            screen: Screen::Register,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            search_filter: LedgerFilter::new(),
            status_message: String::new(),
            show_help: false,
            clock,
            config,

            form_values: Vec::new(),
            form_index: 0,
            next_number: String::new(),
            last_registered: None,

            records: Vec::new(),
            ledger_index: 0,
            ledger_scroll: 0,

            kind,
            year,
            summary: Summary::default(),
            target: None,
            years: Vec::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.clear_form();
        app
    }

    pub(crate) fn form_defaults(&self) -> FormDefaults {
        self.config.form_defaults()
    }

    /// Blank form with the configured recipient and signer filled in.
    pub(crate) fn clear_form(&mut self) {
        let defaults = self.form_defaults();
        self.form_values = vec![String::new(); FormField::all().len()];
        self.form_values[FormField::Recipient.index()] = defaults.recipient;
        self.form_values[FormField::Signer.index()] = defaults.signer;
        self.form_index = 0;
    }

    pub(crate) fn selected_field(&self) -> FormField {
        FormField::all()
            .get(self.form_index)
            .copied()
            .unwrap_or(FormField::Subject)
    }

    pub(crate) fn value(&self, field: FormField) -> &str {
        self.form_values
            .get(field.index())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub(crate) fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        if let Some(slot) = self.form_values.get_mut(field.index()) {
            *slot = value.into();
        }
    }

    /// Step a choice field through its catalog.
    pub(crate) fn cycle_choice(&mut self, delta: i32) {
        let field = self.selected_field();
        let current = self.value(field).to_string();
        match field {
            FormField::Faculty => {
                let start = FACULTIES.iter().position(|f| *f == current);
                let next = match start {
                    Some(i) => cycle_index(i, FACULTIES.len(), delta),
                    None if delta < 0 => FACULTIES.len() - 1,
                    None => 0,
                };
                self.set_value(field, FACULTIES[next]);
            }
            FormField::Category => {
                let start = BudgetCategory::find(&current)
                    .and_then(|c| BUDGET_CATEGORIES.iter().position(|b| b == c));
                let next = match start {
                    Some(i) => cycle_index(i, BUDGET_CATEGORIES.len(), delta),
                    None if delta < 0 => BUDGET_CATEGORIES.len() - 1,
                    None => 0,
                };
                self.set_value(field, BUDGET_CATEGORIES[next].display());
            }
            _ => {}
        }
    }

    /// The form as typed, with amounts parsed.
    pub(crate) fn claim_form(&self) -> Result<ClaimForm> {
        Ok(ClaimForm {
            subject: self.value(FormField::Subject).to_string(),
            project_name: self.value(FormField::ProjectName).to_string(),
            project_leader: self.value(FormField::ProjectLeader).to_string(),
            faculty: self.value(FormField::Faculty).to_string(),
            budget_category: self.value(FormField::Category).to_string(),
            approved_budget: parse_amount(self.value(FormField::ApprovedBudget))?,
            amount: parse_amount(self.value(FormField::Amount))?,
            recipient: self.value(FormField::Recipient).to_string(),
            signer: self.value(FormField::Signer).to_string(),
            attachment: self.value(FormField::Attachment).to_string(),
            payee: self.value(FormField::Payee).to_string(),
            bank_detail: self.value(FormField::BankDetail).to_string(),
            position: self.value(FormField::Position).to_string(),
        })
    }

    pub(crate) fn today_label(&self) -> String {
        let now = self.clock.now();
        thai_date(now.day(), now.month(), self.clock.buddhist_year())
    }

    /// Re-read the ledger and recompute everything derived from it.
    pub(crate) fn refresh_all<S: ClaimStore + ?Sized>(&mut self, store: &S) {
        self.records = store.read_all();
        self.next_number = next_document_number(&self.records, self.clock.buddhist_year());
        self.clamp_ledger_cursor();
        self.refresh_dashboard(store);
    }

    /// Recompute the summary for the selected bucket without re-reading the ledger.
    pub(crate) fn refresh_dashboard<S: ClaimStore + ?Sized>(&mut self, store: &S) {
        self.summary = summarize(&self.records, self.kind, self.year);
        self.target = store.get_target(self.kind, self.year);
        self.years = available_years(&self.records, self.kind);
    }

    // ── Search ──

    pub(crate) fn search(&self) -> &str {
        &self.search_input
    }

    pub(crate) fn set_search(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
        self.search_filter = LedgerFilter::new().matching(&self.search_input);
    }

    pub(crate) fn push_search(&mut self, c: char) {
        let mut text = std::mem::take(&mut self.search_input);
        text.push(c);
        self.set_search(text);
    }

    pub(crate) fn pop_search(&mut self) {
        let mut text = std::mem::take(&mut self.search_input);
        text.pop();
        self.set_search(text);
    }

    pub(crate) fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    pub(crate) fn ledger_filter(&self) -> &LedgerFilter {
        &self.search_filter
    }

    /// Ledger rows shown on the Ledger screen, newest first.
    pub(crate) fn visible_records(&self) -> Vec<&ClaimRecord> {
        let mut rows = self.ledger_filter().apply(&self.records);
        rows.reverse();
        rows
    }

    pub(crate) fn selected_record(&self) -> Option<&ClaimRecord> {
        self.visible_records().get(self.ledger_index).copied()
    }

    pub(crate) fn clamp_ledger_cursor(&mut self) {
        let len = self.visible_records().len();
        if self.ledger_index >= len {
            self.ledger_index = len.saturating_sub(1);
        }
        if self.ledger_scroll > self.ledger_index {
            self.ledger_scroll = self.ledger_index;
        }
    }

    /// Change the dashboard bucket kind, keeping today's year for it.
    pub(crate) fn set_kind<S: ClaimStore + ?Sized>(&mut self, kind: YearKind, store: &S) {
        self.kind = kind;
        self.year = self.clock.today_buckets().get(kind);
        self.refresh_dashboard(store);
    }

    pub(crate) fn set_year<S: ClaimStore + ?Sized>(&mut self, year: i32, store: &S) {
        self.year = year;
        self.refresh_dashboard(store);
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
