use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in coordinate table for the disbursement memo.
const DEFAULT_LAYOUT: &str = include_str!("../../assets/default_layout.toml");

/// A claim value that can be placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum StampField {
    DocumentNumber,
    Date,
    Signer,
    Recipient,
    Subject,
    Faculty,
    ProjectLeader,
    ProjectName,
    BudgetCategory,
    ApprovedBudget,
    Amount,
    AmountInWords,
    Attachment,
    Payee,
    BankDetail,
    Position,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FieldPlacement {
    pub(crate) field: StampField,
    pub(crate) x: f32,
    pub(crate) y: f32,
    #[serde(default = "default_size")]
    pub(crate) size: f32,
    #[serde(default)]
    pub(crate) align: Align,
}

/// Page size in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct PageSize {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl PageSize {
    pub(crate) const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StampLayout {
    #[serde(default)]
    pub(crate) page: PageSize,
    pub(crate) fields: Vec<FieldPlacement>,
}

fn default_size() -> f32 {
    14.0
}

impl StampLayout {
    pub(crate) fn builtin() -> Result<Self> {
        Self::from_toml(DEFAULT_LAYOUT).context("Built-in stamp layout is invalid")
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stamp layout: {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Invalid stamp layout: {}", path.display()))
    }

    /// The override at `path` if given, else the built-in table.
    pub(crate) fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        let layout: StampLayout = toml::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub(crate) fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Every placement must land on the page.
    fn validate(&self) -> Result<()> {
        if self.page.width <= 0.0 || self.page.height <= 0.0 {
            anyhow::bail!("Page size must be positive");
        }
        for p in &self.fields {
            if !(0.0..=self.page.width).contains(&p.x) || !(0.0..=self.page.height).contains(&p.y) {
                anyhow::bail!("{:?} at ({}, {}) is off the page", p.field, p.x, p.y);
            }
            if p.size <= 0.0 {
                anyhow::bail!("{:?} has a non-positive font size", p.field);
            }
        }
        Ok(())
    }
}
