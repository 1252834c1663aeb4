//! Daily transaction simulation for a single customer.

use crate::{
    balance::round2,
    clock::offset_within_month,
    customer::CustomerProfile,
    rng::StreamRng,
    types::{flag, AccountNumber, Day},
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const RENT_OFFSET_DAYS: (u32, u32) = (2, 5);
pub const EMI_OFFSET_DAYS: (u32, u32) = (5, 12);

pub const UTILITY_PROBABILITY: f64 = 0.9;
pub const UTILITY_WINDOW: (u32, u32) = (10, 25);
pub const UTILITY_STD_DEV: f64 = 300.0;
pub const UTILITY_FLOOR: f64 = 200.0;

pub const MAX_DISCRETIONARY_PER_DAY: u32 = 2;
pub const DISCRETIONARY_MEAN: f64 = 1500.0;
pub const DISCRETIONARY_STD_DEV: f64 = 800.0;
pub const DISCRETIONARY_FLOOR: f64 = 100.0;

pub const DISCRETIONARY_CATEGORIES: [Category; 7] = [
    Category::Grocery,
    Category::Dining,
    Category::Fuel,
    Category::QrPayment,
    Category::OnlineShop,
    Category::CashWithdrawal,
    Category::Transfer,
];

pub const MERCHANTS: [&str; 9] = [
    "BhatBhateni",
    "Daraz",
    "Ncell",
    "Ntc",
    "QFX",
    "ShellFuel",
    "HimalGrocers",
    "QuickMart",
    "eSewaMerchant",
];

pub const UTILITY_REMARKS: [&str; 3] = ["NEA Bill", "KUKL Water", "ISP Payment"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Salary,
    Rent,
    Utilities,
    Grocery,
    Dining,
    Fuel,
    Transfer,
    Emi,
    QrPayment,
    OnlineShop,
    CashWithdrawal,
    Fees,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Self::Salary,
        Self::Rent,
        Self::Utilities,
        Self::Grocery,
        Self::Dining,
        Self::Fuel,
        Self::Transfer,
        Self::Emi,
        Self::QrPayment,
        Self::OnlineShop,
        Self::CashWithdrawal,
        Self::Fees,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "SALARY",
            Self::Rent => "RENT",
            Self::Utilities => "UTILITIES",
            Self::Grocery => "GROCERY",
            Self::Dining => "DINING",
            Self::Fuel => "FUEL",
            Self::Transfer => "TRANSFER",
            Self::Emi => "EMI",
            Self::QrPayment => "QR_PAYMENT",
            Self::OnlineShop => "ONLINE_SHOP",
            Self::CashWithdrawal => "CASH_WITHDRAWAL",
            Self::Fees => "FEES",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Credit (`C`) or debit (`D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DcIndicator {
    #[serde(rename = "C")]
    Credit,
    #[serde(rename = "D")]
    Debit,
}

impl DcIndicator {
    /// Signed effect of `amount` on the balance.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            Self::Credit => amount,
            Self::Debit => -amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "ATM")]
    Atm,
    #[serde(rename = "POS")]
    Pos,
    #[serde(rename = "QR")]
    Qr,
    Online,
    Branch,
}

impl Channel {
    pub const ALL: [Channel; 5] = [Self::Atm, Self::Pos, Self::Qr, Self::Online, Self::Branch];
}

/// One row of a daily `transactions.csv`. Field order is column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub tran_id: Uuid,
    pub tran_date: Day,
    pub account_number: AccountNumber,
    pub amount: f64,
    pub dc_indicator: DcIndicator,
    pub category: Category,
    pub remark: String,
    pub channel: Channel,
    #[serde(with = "flag")]
    pub is_salary: bool,
    /// Filled in by `balance::compute_balance`.
    pub balance: f64,
}

impl TransactionRecord {
    #[allow(clippy::too_many_arguments)]
    fn new(
        rng: &mut StreamRng,
        account: &str,
        tran_date: Day,
        amount: f64,
        dc_indicator: DcIndicator,
        category: Category,
        remark: String,
        channel: Channel,
    ) -> Self {
        Self {
            tran_id: rng.uuid(),
            tran_date,
            account_number: account.to_string(),
            amount,
            dc_indicator,
            category,
            remark,
            channel,
            is_salary: category == Category::Salary,
            balance: 0.0,
        }
    }

    pub fn signed_amount(&self) -> f64 {
        self.dc_indicator.signed(self.amount)
    }
}

/// Generate one customer's transactions for `day`.
///
/// Rent and EMI are anchored on the salary day: each is dated a few days
/// after payday and dropped when that date would fall into the next month.
/// Those rows carry their own (later) `tran_date` but belong to the
/// anchor day's batch.
pub fn simulate_day(
    account: &str,
    day: Day,
    rng: &mut StreamRng,
    profile: &CustomerProfile,
) -> Vec<TransactionRecord> {
    let mut rows = Vec::new();
    let is_payday = day.day() == profile.salary_day;

    if is_payday {
        rows.push(TransactionRecord::new(
            rng,
            account,
            day,
            f64::from(profile.salary_amount),
            DcIndicator::Credit,
            Category::Salary,
            format!("Salary credit {}", day.format("%b %Y")),
            Channel::Online,
        ));
    }

    if is_payday && profile.has_rent {
        let offset = rng.range_inclusive(RENT_OFFSET_DAYS.0, RENT_OFFSET_DAYS.1);
        if let Some(rent_day) = offset_within_month(day, offset) {
            rows.push(TransactionRecord::new(
                rng,
                account,
                rent_day,
                f64::from(profile.rent_amount),
                DcIndicator::Debit,
                Category::Rent,
                "Monthly rent".into(),
                Channel::Online,
            ));
        }
    }

    if is_payday && profile.has_emi {
        let offset = rng.range_inclusive(EMI_OFFSET_DAYS.0, EMI_OFFSET_DAYS.1);
        if let Some(emi_day) = offset_within_month(day, offset) {
            rows.push(TransactionRecord::new(
                rng,
                account,
                emi_day,
                f64::from(profile.emi_amount),
                DcIndicator::Debit,
                Category::Emi,
                "Loan EMI".into(),
                Channel::Online,
            ));
        }
    }

    // Rolled on every day, inside the window or not.
    let utility_roll = rng.chance(UTILITY_PROBABILITY);
    if utility_roll && (UTILITY_WINDOW.0..=UTILITY_WINDOW.1).contains(&day.day()) {
        let amount = rng
            .normal(f64::from(profile.avg_monthly_utilities), UTILITY_STD_DEV)
            .max(UTILITY_FLOOR);
        let remark = rng.pick(&UTILITY_REMARKS).to_string();
        rows.push(TransactionRecord::new(
            rng,
            account,
            day,
            round2(amount),
            DcIndicator::Debit,
            Category::Utilities,
            remark,
            Channel::Online,
        ));
    }

    for _ in 0..rng.range_inclusive(0, MAX_DISCRETIONARY_PER_DAY) {
        let category = *rng.pick(&DISCRETIONARY_CATEGORIES);
        let amount = round2(
            rng.normal(DISCRETIONARY_MEAN, DISCRETIONARY_STD_DEV)
                .max(DISCRETIONARY_FLOOR),
        );
        let dc_indicator = if category == Category::Transfer && rng.chance(0.5) {
            DcIndicator::Credit
        } else {
            DcIndicator::Debit
        };
        let remark = rng.pick(&MERCHANTS).to_string();
        let channel = *rng.pick(&Channel::ALL);
        rows.push(TransactionRecord::new(
            rng,
            account,
            day,
            amount,
            dc_indicator,
            category,
            remark,
            channel,
        ));
    }

    rows
}
