//! Run configuration, loaded from YAML.
//!
//! ```yaml
//! seed: 42
//! data:
//!   raw_dir: data/raw
//!   n_customers: 500
//!   start_date: 2023-01-01
//!   end_date: 2023-03-31
//! ```

use crate::{
    customer::MAX_CUSTOMERS,
    error::{GenError, GenResult},
    types::Day,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CUSTOMERS_FILE: &str = "data/customers.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenConfig {
    pub seed: u64,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    pub raw_dir: PathBuf,
    pub n_customers: usize,
    pub start_date: Day,
    pub end_date: Day,
    #[serde(default = "default_customers_file")]
    pub customers_file: PathBuf,
    /// Open each day with the previous day's closing balance instead of zero.
    #[serde(default)]
    pub carry_balances: bool,
}

fn default_customers_file() -> PathBuf {
    PathBuf::from(DEFAULT_CUSTOMERS_FILE)
}

impl GenConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let config = Self::from_yaml(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> GenResult<Self> {
        let config: GenConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.data.n_customers == 0 {
            return Err(GenError::invalid("data.n_customers must be at least 1"));
        }
        if self.data.n_customers > MAX_CUSTOMERS {
            return Err(GenError::invalid(format!(
                "data.n_customers {} exceeds the account number range (max {MAX_CUSTOMERS})",
                self.data.n_customers
            )));
        }
        if self.data.start_date > self.data.end_date {
            return Err(GenError::invalid(format!(
                "data.start_date {} is after data.end_date {}",
                self.data.start_date, self.data.end_date
            )));
        }
        Ok(())
    }

    /// Number of calendar days covered, inclusive of both ends.
    pub fn day_count(&self) -> u64 {
        (self.data.end_date - self.data.start_date).num_days() as u64 + 1
    }

    /// Small in-code config for tests: 50 customers over January 2023.
    pub fn default_test(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            seed: 42,
            data: DataConfig {
                raw_dir: root.join("raw"),
                n_customers: 50,
                start_date: Day::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
                end_date: Day::from_ymd_opt(2023, 1, 31).unwrap_or_default(),
                customers_file: root.join("customers.csv"),
                carry_balances: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
seed: 42
data:
  raw_dir: data/raw
  n_customers: 500
  start_date: 2023-01-01
  end_date: 2023-03-31
";

    #[test]
    fn parses_required_fields_and_defaults() {
        let cfg = GenConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.data.raw_dir, PathBuf::from("data/raw"));
        assert_eq!(cfg.data.n_customers, 500);
        assert_eq!(cfg.data.start_date, Day::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(cfg.data.end_date, Day::from_ymd_opt(2023, 3, 31).unwrap());
        assert_eq!(cfg.data.customers_file, PathBuf::from(DEFAULT_CUSTOMERS_FILE));
        assert!(!cfg.data.carry_balances);
        assert_eq!(cfg.day_count(), 90);
    }

    #[test]
    fn missing_seed_is_fatal() {
        let yaml = SAMPLE.replace("seed: 42\n", "");
        assert!(matches!(GenConfig::from_yaml(&yaml), Err(GenError::Config(_))));
    }

    #[test]
    fn malformed_date_is_fatal() {
        let yaml = SAMPLE.replace("2023-01-01", "01/01/2023");
        assert!(matches!(GenConfig::from_yaml(&yaml), Err(GenError::Config(_))));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let yaml = SAMPLE.replace("2023-03-31", "2022-12-31");
        assert!(matches!(
            GenConfig::from_yaml(&yaml),
            Err(GenError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn zero_customers_is_rejected() {
        let yaml = SAMPLE.replace("n_customers: 500", "n_customers: 0");
        assert!(matches!(
            GenConfig::from_yaml(&yaml),
            Err(GenError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn roster_larger_than_account_range_is_rejected() {
        let yaml = SAMPLE.replace("n_customers: 500", "n_customers: 10000000");
        assert!(matches!(
            GenConfig::from_yaml(&yaml),
            Err(GenError::InvalidConfig { .. })
        ));
        let yaml = SAMPLE.replace("n_customers: 500", "n_customers: 9999999");
        assert!(GenConfig::from_yaml(&yaml).is_ok());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GenConfig::load("does/not/exist.yml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yml"));
    }
}
