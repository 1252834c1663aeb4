//! Per-account running balance over one day's batch.

use crate::transaction::{DcIndicator, TransactionRecord};
use std::cmp::Ordering;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Posting order: date ascending, then credits before debits.
/// Ties keep generation order.
pub fn posting_order(a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
    a.tran_date
        .cmp(&b.tran_date)
        .then_with(|| dc_rank(a.dc_indicator).cmp(&dc_rank(b.dc_indicator)))
}

fn dc_rank(dc: DcIndicator) -> u8 {
    match dc {
        DcIndicator::Credit => 0,
        DcIndicator::Debit => 1,
    }
}

/// Sort one account's rows into posting order and fill in `balance`.
///
/// The running total is kept unrounded; each stored balance is the
/// running total rounded to cents. Returns the closing running total.
pub fn compute_balance(rows: &mut [TransactionRecord], opening_balance: f64) -> f64 {
    rows.sort_by(posting_order);
    let mut running = opening_balance;
    for row in rows.iter_mut() {
        running += row.signed_amount();
        row.balance = round2(running);
    }
    running
}
