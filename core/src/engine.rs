//! The generation engine: roster first, then one partition per day.
//!
//! EXECUTION ORDER (fixed):
//!   1. Customer roster  (customer stream, written once)
//!   2. For each day in the range:
//!        a. simulate every customer in roster order (transaction stream for that day)
//!        b. split the batch by account, first appearance first
//!           (carry mode: later-dated rows are held back until their own day)
//!        c. compute running balances per account
//!        d. write `<raw_dir>/<YYYY>/<MM>/<DD>/transactions.csv`
//!   3. Run summary
//!
//! RULES:
//!   - All randomness flows through the RngBank.
//!   - Only the store writes files.
//!   - Any error aborts the run; nothing is rolled back.

use crate::{
    balance::compute_balance,
    clock::SimCalendar,
    config::GenConfig,
    customer::{generate_customers, CustomerProfile},
    error::GenResult,
    rng::{RngBank, Stream},
    store::OutputStore,
    summary::RunSummary,
    transaction::{simulate_day, TransactionRecord},
    types::{AccountNumber, Day},
};
use std::collections::HashMap;

pub struct GenEngine {
    pub config:       GenConfig,
    pub rng_bank:     RngBank,
    pub store:        OutputStore,
    customers:        Vec<CustomerProfile>,
    closing_balances: HashMap<AccountNumber, f64>,
    /// Carry mode only: rows dated after the batch that produced them.
    pending:          HashMap<AccountNumber, Vec<TransactionRecord>>,
}

impl GenEngine {
    /// Validate the config, open the output root and draw the roster.
    pub fn build(config: GenConfig) -> GenResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(config.seed);
        let store = OutputStore::open(&config.data.raw_dir)?;
        let mut rng = rng_bank.for_stream(Stream::Customer);
        let customers = generate_customers(config.data.n_customers, &mut rng);
        Ok(Self {
            config,
            rng_bank,
            store,
            customers,
            closing_balances: HashMap::new(),
            pending: HashMap::new(),
        })
    }

    pub fn customers(&self) -> &[CustomerProfile] {
        &self.customers
    }

    /// Run the whole pipeline top to bottom.
    pub fn run(&mut self) -> GenResult<RunSummary> {
        let data = &self.config.data;
        log::info!(
            "run: seed={} customers={} range={}..={} ({} days) raw_dir={}",
            self.config.seed,
            data.n_customers,
            data.start_date,
            data.end_date,
            self.config.day_count(),
            data.raw_dir.display()
        );

        OutputStore::write_customers(&data.customers_file, &self.customers)?;

        let mut summary = RunSummary::new(
            self.config.seed,
            data.start_date,
            data.end_date,
            data.n_customers,
            data.carry_balances,
        );

        for day in SimCalendar::new(data.start_date, data.end_date) {
            let rows = self.run_day(day)?;
            summary.record_day(&rows);
        }

        let unposted: usize = self.pending.values().map(Vec::len).sum();
        if unposted > 0 {
            log::debug!(
                "run: {unposted} carried rows dated after {} not written",
                self.config.data.end_date
            );
        }

        let path = self.store.write_summary(&summary)?;
        log::info!(
            "run: wrote {} rows over {} days, summary at {}",
            summary.total_rows,
            summary.days_written,
            path.display()
        );
        Ok(summary)
    }

    /// Generate and persist a single day.
    pub fn run_day(&mut self, day: Day) -> GenResult<Vec<TransactionRecord>> {
        let rows = self.generate_day(day);
        let path = self.store.write_day(day, &rows)?;
        log::debug!("day={day}: {} rows -> {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Simulate every customer for `day` and compute balances, without writing.
    ///
    /// With `carry_balances`, each row is posted in the partition of its own
    /// `tran_date`: rows dated later than `day` wait in `pending` until that
    /// day's batch, so balances form one date-ordered running total per account.
    pub fn generate_day(&mut self, day: Day) -> Vec<TransactionRecord> {
        let carry = self.config.data.carry_balances;
        let mut rng = self.rng_bank.for_stream_on(Stream::Transaction, day);
        let mut batch = Vec::new();
        for profile in &self.customers {
            if carry {
                batch.extend(take_due(&mut self.pending, &profile.account_number, day));
            }
            for row in simulate_day(&profile.account_number, day, &mut rng, profile) {
                if carry && row.tran_date > day {
                    self.pending.entry(row.account_number.clone()).or_default().push(row);
                } else {
                    batch.push(row);
                }
            }
        }

        let mut out = Vec::with_capacity(batch.len());
        for (account, mut rows) in split_by_account(batch) {
            let opening = if carry {
                self.closing_balances.get(&account).copied().unwrap_or(0.0)
            } else {
                0.0
            };
            let closing = compute_balance(&mut rows, opening);
            if carry {
                self.closing_balances.insert(account, closing);
            }
            out.extend(rows);
        }
        out
    }
}

/// Remove and return an account's pending rows dated on or before `day`.
fn take_due(
    pending: &mut HashMap<AccountNumber, Vec<TransactionRecord>>,
    account: &str,
    day: Day,
) -> Vec<TransactionRecord> {
    let Some(rows) = pending.get_mut(account) else {
        return Vec::new();
    };
    let (due, later): (Vec<_>, Vec<_>) = rows.drain(..).partition(|r| r.tran_date <= day);
    *rows = later;
    due
}

/// Group rows by account, accounts ordered by first appearance.
pub fn split_by_account(
    rows: Vec<TransactionRecord>,
) -> Vec<(AccountNumber, Vec<TransactionRecord>)> {
    let mut index: HashMap<AccountNumber, usize> = HashMap::new();
    let mut groups: Vec<(AccountNumber, Vec<TransactionRecord>)> = Vec::new();
    for row in rows {
        match index.get(&row.account_number) {
            Some(&i) => groups[i].1.push(row),
            None => {
                index.insert(row.account_number.clone(), groups.len());
                groups.push((row.account_number.clone(), vec![row]));
            }
        }
    }
    groups
}
