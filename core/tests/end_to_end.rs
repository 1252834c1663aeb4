//! Full pipeline from a YAML file on disk to partitioned CSVs.

use std::fs;
use std::path::Path;
use txgen_core::{
    config::GenConfig,
    engine::GenEngine,
    store::{OutputStore, TRANSACTION_COLUMNS},
    transaction::Category,
    types::Day,
};

fn write_config(root: &Path, seed: u64, n: usize, start: &str, end: &str) -> std::path::PathBuf {
    let yaml = format!(
        "seed: {seed}\n\
         data:\n  \
           raw_dir: {raw}\n  \
           n_customers: {n}\n  \
           start_date: {start}\n  \
           end_date: {end}\n  \
           customers_file: {customers}\n",
        raw = root.join("raw").display(),
        customers = root.join("data/customers.csv").display(),
    );
    let path = root.join("config.yml");
    fs::write(&path, yaml).unwrap();
    path
}

fn run_from_file(root: &Path, seed: u64, n: usize, start: &str, end: &str) -> GenEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = GenConfig::load(write_config(root, seed, n, start, end)).unwrap();
    let mut engine = GenEngine::build(config).unwrap();
    engine.run().unwrap();
    engine
}

#[test]
fn single_customer_single_day_scenario() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = run_from_file(tmp.path(), 42, 1, "2023-01-01", "2023-01-01");

    let customers = OutputStore::read_customers(&tmp.path().join("data/customers.csv")).unwrap();
    assert_eq!(customers.len(), 1);
    let profile = &customers[0];
    assert_eq!(profile.account_number, "00120000001");

    let day = Day::from_ymd_opt(2023, 1, 1).unwrap();
    let path = tmp.path().join("raw/2023/01/01/transactions.csv");
    assert!(path.exists());

    let rows = engine.store.read_day(day).unwrap();
    let salary_rows = rows.iter().filter(|r| r.category == Category::Salary).count();
    if profile.salary_day == 1 {
        assert_eq!(salary_rows, 1);
    } else {
        assert_eq!(salary_rows, 0);
    }
    assert!(rows.iter().all(|r| r.account_number == profile.account_number));

    // Same seed, fresh directory: identical bytes.
    let again = tempfile::tempdir().unwrap();
    run_from_file(again.path(), 42, 1, "2023-01-01", "2023-01-01");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        fs::read_to_string(again.path().join("raw/2023/01/01/transactions.csv")).unwrap()
    );
}

#[test]
fn every_day_gets_a_partition_with_the_fixed_header() {
    let tmp = tempfile::tempdir().unwrap();
    run_from_file(tmp.path(), 5, 10, "2023-01-30", "2023-02-02");

    for rel in ["2023/01/30", "2023/01/31", "2023/02/01", "2023/02/02"] {
        let path = tmp.path().join("raw").join(rel).join("transactions.csv");
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, TRANSACTION_COLUMNS);

        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        for record in rdr.records() {
            let record = record.unwrap();
            assert!(names.contains(&&record[5]), "unknown category {}", &record[5]);
            assert!(matches!(&record[4], "C" | "D"));
            assert!(matches!(&record[8], "0" | "1"));
        }
    }
}

#[test]
fn summary_matches_written_partitions() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = run_from_file(tmp.path(), 9, 15, "2023-01-01", "2023-01-07");

    let json = fs::read_to_string(tmp.path().join("raw/run_summary.json")).unwrap();
    let summary: txgen_core::summary::RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(summary.days_written, 7);
    assert_eq!(summary.n_customers, 15);

    let mut total = 0;
    for d in 1..=7 {
        total += engine
            .store
            .read_day(Day::from_ymd_opt(2023, 1, d).unwrap())
            .unwrap()
            .len();
    }
    assert_eq!(summary.total_rows, total);
    assert_eq!(summary.rows_by_category.values().sum::<usize>(), total);
}

#[test]
fn missing_config_field_fails_before_any_output() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config.yml");
    fs::write(&path, "seed: 1\ndata:\n  raw_dir: raw\n  n_customers: 3\n").unwrap();
    assert!(GenConfig::load(&path).is_err());
    assert!(!tmp.path().join("raw").exists());
}
