mod flat_file;
#[cfg(test)]
mod memory;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::ClaimRecord;
use crate::years::YearKind;

pub(crate) use flat_file::FlatFileStore;
#[cfg(test)]
pub(crate) use memory::MemoryStore;

/// Persistence for the claim ledger and budget targets.
///
/// Reads never fail: a missing or damaged store reads as empty, so callers
/// must always cope with a first-run ledger.
pub(crate) trait ClaimStore {
    /// Add one record after every existing one.
    fn append(&mut self, record: &ClaimRecord) -> Result<()>;

    /// All records in insertion order.
    fn read_all(&self) -> Vec<ClaimRecord>;

    fn get_target(&self, kind: YearKind, year: i32) -> Option<Decimal>;

    /// Replace the target for (kind, year), or add it.
    fn upsert_target(&mut self, kind: YearKind, year: i32, amount: Decimal) -> Result<()>;

    /// Delete all persisted data, ledger and targets alike.
    fn wipe(&mut self) -> Result<()>;
}
