use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::ClaimStore;
use crate::models::ClaimRecord;
use crate::years::YearKind;

/// In-memory store for exercising the pure logic without a filesystem.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) records: Vec<ClaimRecord>,
    pub(crate) targets: BTreeMap<(YearKind, i32), Decimal>,
}

impl ClaimStore for MemoryStore {
    fn append(&mut self, record: &ClaimRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Vec<ClaimRecord> {
        self.records.clone()
    }

    fn get_target(&self, kind: YearKind, year: i32) -> Option<Decimal> {
        self.targets.get(&(kind, year)).copied()
    }

    fn upsert_target(&mut self, kind: YearKind, year: i32, amount: Decimal) -> Result<()> {
        self.targets.insert((kind, year), amount);
        Ok(())
    }

    fn wipe(&mut self) -> Result<()> {
        self.records.clear();
        self.targets.clear();
        Ok(())
    }
}
