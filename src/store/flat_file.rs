use anyhow::{Context, Result};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::ClaimStore;
use crate::config::StoreConfig;
use crate::models::{BudgetTarget, ClaimRecord, Column};
use crate::years::YearKind;

/// UTF-8 byte-order mark; spreadsheet tools need it to open Thai text correctly.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Ledger and budget targets kept as two CSV files in one data directory.
pub(crate) struct FlatFileStore {
    dir: PathBuf,
    ledger_path: PathBuf,
    targets_path: PathBuf,
    font_cache_path: PathBuf,
}

/// Raw ledger contents, cell for cell, before any interpretation.
struct LedgerTable {
    header: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TargetRow {
    kind: String,
    year: String,
    amount: String,
}

impl FlatFileStore {
    pub(crate) fn open(dir: &Path, config: &StoreConfig) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        let store = Self {
            dir: dir.to_path_buf(),
            ledger_path: dir.join(&config.ledger_file),
            targets_path: dir.join(&config.targets_file),
            font_cache_path: dir.join(&config.font_cache_file),
        };
        debug!(
            "Ledger at {}, targets at {}",
            store.ledger_path.display(),
            store.targets_path.display()
        );
        Ok(store)
    }

    pub(crate) fn data_dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Where a downloaded Thai font would be cached; removed by `wipe`.
    pub(crate) fn font_cache_path(&self) -> &Path {
        &self.font_cache_path
    }

    /// Copy the raw ledger file, byte for byte, to `dest`.
    pub(crate) fn export_ledger(&self, dest: &Path) -> Result<u64> {
        if !self.ledger_path.exists() {
            anyhow::bail!("No claims recorded yet, nothing to export");
        }
        let bytes = fs::copy(&self.ledger_path, dest)
            .with_context(|| format!("Failed to export ledger to {}", dest.display()))?;
        info!("Exported ledger to {} ({bytes} bytes)", dest.display());
        Ok(bytes)
    }

    fn load_raw(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.ledger_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read ledger: {}", self.ledger_path.display())),
        }
    }

    fn try_read_records(&self) -> Result<Vec<ClaimRecord>> {
        let Some(raw) = self.load_raw()? else {
            return Ok(Vec::new());
        };
        Ok(parse_table(&raw)?
            .map(|table| table.records())
            .unwrap_or_default())
    }

    fn read_targets(&self) -> Vec<BudgetTarget> {
        self.try_read_targets().unwrap_or_else(|e| {
            warn!("Reading budget targets failed, treating them as unset: {e:#}");
            Vec::new()
        })
    }

    fn try_read_targets(&self) -> Result<Vec<BudgetTarget>> {
        let raw = match fs::read(&self.targets_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read targets: {}", self.targets_path.display())
                })
            }
        };
        let body = raw.strip_prefix(BOM).unwrap_or(&raw[..]);
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body);

        let mut targets = Vec::new();
        for (i, result) in rdr.deserialize::<TargetRow>().enumerate() {
            let row = result.with_context(|| format!("Failed to read target line {}", i + 2))?;
            match row.parse() {
                Some(t) => targets.push(t),
                None => warn!("Skipping unreadable budget target on line {}: {row:?}", i + 2),
            }
        }
        Ok(targets)
    }

    fn write_targets(&self, targets: &[BudgetTarget]) -> Result<()> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            for t in targets {
                wtr.serialize(TargetRow::from_target(t))
                    .context("Failed to encode budget target")?;
            }
            wtr.flush().context("Failed to encode budget targets")?;
        }
        if targets.is_empty() {
            buf = b"kind,year,amount\n".to_vec();
        }
        replace_file(&self.targets_path, &buf)
    }
}

impl ClaimStore for FlatFileStore {
    fn append(&mut self, record: &ClaimRecord) -> Result<()> {
        let raw = self.load_raw()?;
        let table = match raw.as_deref() {
            Some(bytes) => parse_table(bytes).context("Ledger file is unreadable; refusing to append")?,
            None => None,
        };

        let Some(table) = table else {
            let header: Vec<String> = Column::all().iter().map(|c| c.header().to_string()).collect();
            let row = row_for(&header, record);
            let mut out = BOM.to_vec();
            out.extend(encode_rows(&[header, row])?);
            fs::write(&self.ledger_path, out).with_context(|| {
                format!("Failed to create ledger: {}", self.ledger_path.display())
            })?;
            info!(
                "Started ledger {} with {}",
                self.ledger_path.display(),
                record.document_number
            );
            return Ok(());
        };

        let union = table.union_header();
        if union.len() == table.header.len() {
            let mut out = Vec::new();
            // A crash mid-write can leave the last row without its terminator
            if raw.as_deref().is_some_and(|b| !b.ends_with(b"\n")) {
                warn!("Ledger did not end with a newline; repairing before append");
                out.push(b'\n');
            }
            out.extend(encode_rows(&[row_for(&table.header, record)])?);
            let mut file = OpenOptions::new()
                .append(true)
                .open(&self.ledger_path)
                .with_context(|| format!("Failed to open ledger: {}", self.ledger_path.display()))?;
            file.write_all(&out)
                .with_context(|| format!("Failed to append to ledger: {}", self.ledger_path.display()))?;
        } else {
            info!(
                "Ledger schema grew by {} column(s); rewriting {}",
                union.len() - table.header.len(),
                self.ledger_path.display()
            );
            let mut rows: Vec<Vec<String>> = Vec::with_capacity(table.rows.len() + 2);
            rows.push(union.clone());
            for row in &table.rows {
                let mut cells: Vec<String> = row.iter().map(String::from).collect();
                if cells.len() < union.len() {
                    cells.resize(union.len(), String::new());
                }
                rows.push(cells);
            }
            rows.push(row_for(&union, record));
            let mut out = BOM.to_vec();
            out.extend(encode_rows(&rows)?);
            replace_file(&self.ledger_path, &out)?;
        }
        info!("Appended {} to ledger", record.document_number);
        Ok(())
    }

    fn read_all(&self) -> Vec<ClaimRecord> {
        self.try_read_records().unwrap_or_else(|e| {
            warn!("Reading ledger failed, treating it as empty: {e:#}");
            Vec::new()
        })
    }

    fn get_target(&self, kind: YearKind, year: i32) -> Option<Decimal> {
        self.read_targets()
            .iter()
            .rev()
            .find(|t| t.key() == (kind, year))
            .map(|t| t.amount)
    }

    fn upsert_target(&mut self, kind: YearKind, year: i32, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            anyhow::bail!("Budget target cannot be negative: {amount}");
        }
        let mut targets = self.read_targets();
        targets.retain(|t| t.key() != (kind, year));
        targets.push(BudgetTarget::new(kind, year, amount));
        self.write_targets(&targets)?;
        info!("Budget target {kind} {year} set to {amount}");
        Ok(())
    }

    fn wipe(&mut self) -> Result<()> {
        for path in [&self.ledger_path, &self.targets_path, &self.font_cache_path] {
            match fs::remove_file(path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove {}", path.display()))
                }
            }
        }
        info!("Wiped all data in {}", self.dir.display());
        Ok(())
    }
}

impl TargetRow {
    fn parse(&self) -> Option<BudgetTarget> {
        let kind = YearKind::parse(&self.kind)?;
        let year = self.year.parse().ok()?;
        let amount = Decimal::from_str(&self.amount.replace(',', "")).ok()?;
        Some(BudgetTarget::new(kind, year, amount))
    }

    fn from_target(t: &BudgetTarget) -> Self {
        Self {
            kind: t.kind.as_str().to_string(),
            year: t.year.to_string(),
            amount: t.amount.to_string(),
        }
    }
}

impl LedgerTable {
    fn records(&self) -> Vec<ClaimRecord> {
        let columns: Vec<Option<Column>> =
            self.header.iter().map(|h| Column::from_header(h)).collect();
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut rec = ClaimRecord::default();
                for (cell, column) in row.iter().zip(&columns) {
                    if let Some(col) = column {
                        if !rec.set_field(*col, cell) {
                            warn!(
                                "Ledger line {}: unreadable {} '{}'",
                                i + 2,
                                col.header(),
                                cell
                            );
                        }
                    }
                }
                rec
            })
            .collect()
    }

    /// Existing header followed by any current-schema columns it lacks.
    fn union_header(&self) -> Vec<String> {
        let mut header = self.header.clone();
        for col in Column::all() {
            if !header.iter().any(|h| Column::from_header(h) == Some(*col)) {
                header.push(col.header().to_string());
            }
        }
        header
    }
}

fn parse_table(raw: &[u8]) -> Result<Option<LedgerTable>> {
    let body = raw.strip_prefix(BOM).unwrap_or(raw);
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(body);

    let header: Vec<String> = rdr
        .headers()
        .context("Failed to read ledger header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read ledger line {}", i + 2))?;
        rows.push(record);
    }
    Ok(Some(LedgerTable { header, rows }))
}

/// Cells for `record` laid out under `header`; unknown columns stay empty.
fn row_for(header: &[String], record: &ClaimRecord) -> Vec<String> {
    header
        .iter()
        .map(|h| {
            Column::from_header(h)
                .map(|c| record.field(c))
                .unwrap_or_default()
        })
        .collect()
}

fn encode_rows(rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut buf);
        for row in rows {
            wtr.write_record(row).context("Failed to encode ledger row")?;
        }
        wtr.flush().context("Failed to encode ledger rows")?;
    }
    Ok(buf)
}

/// Write through a sibling temp file so a crash leaves the old file intact.
fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    fs::write(&tmp, contents).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "flat_file_tests.rs"]
mod tests;
