use crate::{
    rng::StreamRng,
    types::{flag, AccountNumber, CustomerId},
};
use serde::{Deserialize, Serialize};

pub const ACCOUNT_PREFIX: &str = "0012";
pub const ACCOUNT_SEQ_WIDTH: usize = 7;
/// Largest roster whose sequence numbers fit the fixed account width.
pub const MAX_CUSTOMERS: usize = 9_999_999;

pub const SALARY_DAY_MAX: u32 = 28;
pub const SALARY_RANGE: (u32, u32) = (15_000, 200_000);
pub const RENT_PROBABILITY: f64 = 0.55;
pub const RENT_RANGE: (u32, u32) = (4_000, 35_000);
pub const EMI_PROBABILITY: f64 = 0.35;
pub const EMI_RANGE: (u32, u32) = (3_000, 20_000);
pub const UTILITIES_RANGE: (u32, u32) = (800, 5_000);

/// One row of the customer roster. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: CustomerId,
    pub account_number: AccountNumber,
    pub salary_day: u32,
    pub salary_amount: u32,
    #[serde(with = "flag")]
    pub has_rent: bool,
    pub rent_amount: u32,
    #[serde(with = "flag")]
    pub has_emi: bool,
    pub emi_amount: u32,
    pub avg_monthly_utilities: u32,
}

/// `0012` followed by the zero-padded sequence number.
pub fn account_number(seq: CustomerId) -> AccountNumber {
    format!("{ACCOUNT_PREFIX}{seq:0width$}", width = ACCOUNT_SEQ_WIDTH)
}

/// Generate `n` customers with ids `1..=n`.
pub fn generate_customers(n: usize, rng: &mut StreamRng) -> Vec<CustomerProfile> {
    let mut customers = Vec::with_capacity(n);
    for i in 1..=n as CustomerId {
        customers.push(generate_profile(i, rng));
    }
    log::info!("customer: generated {} profiles", customers.len());
    customers
}

fn generate_profile(customer_id: CustomerId, rng: &mut StreamRng) -> CustomerProfile {
    let salary_day = rng.range_inclusive(1, SALARY_DAY_MAX);
    let salary_amount = draw_amount(rng, SALARY_RANGE);

    let has_rent = rng.chance(RENT_PROBABILITY);
    let rent_amount = if has_rent { draw_amount(rng, RENT_RANGE) } else { 0 };

    let has_emi = rng.chance(EMI_PROBABILITY);
    let emi_amount = if has_emi { draw_amount(rng, EMI_RANGE) } else { 0 };

    let avg_monthly_utilities = draw_amount(rng, UTILITIES_RANGE);

    CustomerProfile {
        customer_id,
        account_number: account_number(customer_id),
        salary_day,
        salary_amount,
        has_rent,
        rent_amount,
        has_emi,
        emi_amount,
        avg_monthly_utilities,
    }
}

/// Uniform integer in the half-open range [low, high).
fn draw_amount(rng: &mut StreamRng, (low, high): (u32, u32)) -> u32 {
    rng.range_inclusive(low, high - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, Stream};

    #[test]
    fn account_numbers_are_prefixed_and_padded() {
        assert_eq!(account_number(1), "00120000001");
        assert_eq!(account_number(1234567), "00121234567");
    }

    #[test]
    fn absent_rent_and_emi_have_zero_amounts() {
        let mut rng = RngBank::new(5).for_stream(Stream::Customer);
        for c in generate_customers(300, &mut rng) {
            assert_eq!(c.has_rent, c.rent_amount > 0, "customer {}", c.customer_id);
            assert_eq!(c.has_emi, c.emi_amount > 0, "customer {}", c.customer_id);
        }
    }
}
