//! CSV/JSON persistence layer.
//!
//! RULE: Only store.rs touches the filesystem for output.
//! The engine hands finished records to the store; nothing else writes files.

use crate::{
    clock::partition_parts,
    customer::CustomerProfile,
    error::{GenError, GenResult},
    summary::RunSummary,
    transaction::TransactionRecord,
    types::Day,
};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const SUMMARY_FILE: &str = "run_summary.json";

pub const TRANSACTION_COLUMNS: [&str; 10] = [
    "tran_id",
    "tran_date",
    "account_number",
    "amount",
    "dc_indicator",
    "category",
    "remark",
    "channel",
    "is_salary",
    "balance",
];

pub const CUSTOMER_COLUMNS: [&str; 9] = [
    "customer_id",
    "account_number",
    "salary_day",
    "salary_amount",
    "has_rent",
    "rent_amount",
    "has_emi",
    "emi_amount",
    "avg_monthly_utilities",
];

pub struct OutputStore {
    raw_dir: PathBuf,
}

impl OutputStore {
    /// Create the raw-data root if it does not exist yet.
    pub fn open(raw_dir: impl Into<PathBuf>) -> GenResult<Self> {
        let raw_dir = raw_dir.into();
        fs::create_dir_all(&raw_dir).map_err(|e| GenError::io(&raw_dir, e))?;
        Ok(Self { raw_dir })
    }

    /// `<raw_dir>/<YYYY>/<MM>/<DD>/transactions.csv`
    pub fn day_path(&self, day: Day) -> PathBuf {
        let [y, m, d] = partition_parts(day);
        self.raw_dir.join(y).join(m).join(d).join(TRANSACTIONS_FILE)
    }

    // ── Customers ──────────────────────────────────────────────

    pub fn write_customers(path: &Path, customers: &[CustomerProfile]) -> GenResult<()> {
        write_csv(path, &CUSTOMER_COLUMNS, customers)?;
        log::debug!("store: wrote {} customers to {}", customers.len(), path.display());
        Ok(())
    }

    pub fn read_customers(path: &Path) -> GenResult<Vec<CustomerProfile>> {
        read_csv(path)
    }

    // ── Daily transactions ─────────────────────────────────────

    /// Write one day's partition. An empty batch still gets a header row.
    pub fn write_day(&self, day: Day, rows: &[TransactionRecord]) -> GenResult<PathBuf> {
        let path = self.day_path(day);
        write_csv(&path, &TRANSACTION_COLUMNS, rows)?;
        Ok(path)
    }

    pub fn read_day(&self, day: Day) -> GenResult<Vec<TransactionRecord>> {
        read_csv(&self.day_path(day))
    }

    // ── Run summary ────────────────────────────────────────────

    pub fn write_summary(&self, summary: &RunSummary) -> GenResult<PathBuf> {
        let path = self.raw_dir.join(SUMMARY_FILE);
        let file = File::create(&path).map_err(|e| GenError::io(&path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), summary)?;
        Ok(path)
    }
}

fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> GenResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| GenError::io(path, e))?;
    // Header written by hand so empty batches still produce one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| GenError::io(path, e))?;
    Ok(())
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> GenResult<Vec<T>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}
