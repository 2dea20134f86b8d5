use regex::{Regex, RegexBuilder};

use crate::models::ClaimRecord;
use crate::years::YearKind;

/// Narrows the ledger by year bucket and a search pattern.
///
/// The pattern is tried as a case-insensitive regex; if it doesn't compile it
/// is matched as a plain substring instead.
#[derive(Debug, Default)]
pub(crate) struct LedgerFilter {
    bucket: Option<(YearKind, i32)>,
    pattern: Option<Pattern>,
}

#[derive(Debug)]
enum Pattern {
    Regex(Regex),
    Text(String),
}

impl LedgerFilter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_bucket(mut self, kind: YearKind, year: i32) -> Self {
        self.bucket = Some((kind, year));
        self
    }

    pub(crate) fn matching(mut self, pattern: &str) -> Self {
        let pattern = pattern.trim();
        self.pattern = if pattern.is_empty() {
            None
        } else {
            Some(
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(re) => Pattern::Regex(re),
                    Err(_) => Pattern::Text(pattern.to_lowercase()),
                },
            )
        };
        self
    }

    pub(crate) fn is_regex(&self) -> bool {
        matches!(self.pattern, Some(Pattern::Regex(_)))
    }

    pub(crate) fn matches(&self, record: &ClaimRecord) -> bool {
        if let Some((kind, year)) = self.bucket {
            if record.bucket_year(kind) != year {
                return false;
            }
        }
        let Some(pattern) = &self.pattern else {
            return true;
        };
        let haystacks = [
            &record.document_number,
            &record.subject,
            &record.project_name,
            &record.project_leader,
            &record.faculty,
            &record.payee,
        ];
        match pattern {
            Pattern::Regex(re) => haystacks.iter().any(|h| re.is_match(h)),
            Pattern::Text(needle) => haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(needle.as_str())),
        }
    }

    /// Matching records, in ledger order.
    pub(crate) fn apply<'a>(&self, records: &'a [ClaimRecord]) -> Vec<&'a ClaimRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
