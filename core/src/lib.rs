//! txgen-core: deterministic synthetic retail-banking transaction data.
//!
//! A run draws a customer roster, simulates each customer day by day,
//! computes per-account running balances and writes one CSV partition
//! per day under `<raw_dir>/<YYYY>/<MM>/<DD>/`.

pub mod balance;
pub mod clock;
pub mod config;
pub mod customer;
pub mod engine;
pub mod error;
pub mod rng;
pub mod store;
pub mod summary;
pub mod transaction;
pub mod types;
