use anyhow::{Context, Result};
use log::{debug, warn};

use crate::clock::Clock;
use crate::models::ClaimRecord;
use crate::store::ClaimStore;

/// Office prefix of every document number.
pub(crate) const DOC_PREFIX: &str = "0203";

pub(crate) fn seed_document_number() -> String {
    format_document_number(1)
}

pub(crate) fn format_document_number(sequence: u32) -> String {
    format!("{DOC_PREFIX}/{sequence:03}")
}

/// Numeric suffix after the last `/` of a document number.
pub(crate) fn sequence_of(document_number: &str) -> Result<u32> {
    let suffix = document_number.rsplit('/').next().unwrap_or_default().trim();
    suffix
        .parse::<u32>()
        .with_context(|| format!("Document number '{document_number}' has no numeric suffix"))
}

/// Next document number for a ledger snapshot.
///
/// Starts again at `0203/001` for an empty ledger and whenever `current_year`
/// (Buddhist Era) is past every year in the ledger. A ledger that can't be
/// read this way also yields the first number; numbering stays available even
/// over a damaged file.
pub(crate) fn next_document_number(ledger: &[ClaimRecord], current_year: i32) -> String {
    match following_sequence(ledger, current_year) {
        Ok(Some(seq)) => format_document_number(seq),
        Ok(None) => seed_document_number(),
        Err(e) => {
            warn!("Falling back to first document number: {e:#}");
            seed_document_number()
        }
    }
}

/// Convenience wrapper reading a fresh snapshot from the store.
pub(crate) fn next_from_store<S: ClaimStore + ?Sized>(store: &S, clock: &dyn Clock) -> String {
    next_document_number(&store.read_all(), clock.buddhist_year())
}

fn following_sequence(ledger: &[ClaimRecord], current_year: i32) -> Result<Option<u32>> {
    let Some(last) = ledger.last() else {
        return Ok(None);
    };
    if last.year <= 0 {
        anyhow::bail!(
            "Last ledger row ({}) has no readable year",
            last.document_number
        );
    }

    let max_year = ledger.iter().map(|r| r.year).max().unwrap_or(last.year);
    if current_year > max_year {
        debug!("Year rolled over from {max_year} to {current_year}, restarting numbering");
        return Ok(None);
    }

    let seq = sequence_of(&last.document_number)?;
    let next = seq
        .checked_add(1)
        .with_context(|| format!("Sequence after {} is out of range", last.document_number))?;
    Ok(Some(next))
}

#[cfg(test)]
mod tests;
