//! Run summary written as JSON next to the partitions.

use crate::{
    transaction::{Category, TransactionRecord},
    types::Day,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub start_date: Day,
    pub end_date: Day,
    pub n_customers: usize,
    pub carry_balances: bool,
    pub days_written: usize,
    pub total_rows: usize,
    pub rows_by_category: BTreeMap<Category, usize>,
}

impl RunSummary {
    pub fn new(
        seed: u64,
        start_date: Day,
        end_date: Day,
        n_customers: usize,
        carry_balances: bool,
    ) -> Self {
        Self {
            seed,
            start_date,
            end_date,
            n_customers,
            carry_balances,
            days_written: 0,
            total_rows: 0,
            rows_by_category: BTreeMap::new(),
        }
    }

    /// Fold one written day into the totals.
    pub fn record_day(&mut self, rows: &[TransactionRecord]) {
        self.days_written += 1;
        self.total_rows += rows.len();
        for row in rows {
            *self.rows_by_category.entry(row.category).or_insert(0) += 1;
        }
    }

    pub fn avg_rows_per_day(&self) -> f64 {
        if self.days_written == 0 {
            0.0
        } else {
            self.total_rows as f64 / self.days_written as f64
        }
    }
}
