//! End-to-end tests of the `finboard` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn finboard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finboard").unwrap();
    cmd.env("FINBOARD_DATA_DIR", dir.path())
        .env_remove("FINBOARD_PROFILE")
        .env_remove("FINBOARD_LOG");
    cmd
}

fn add_january(dir: &TempDir) {
    for args in [
        ["3500", "Salary", "income", "Salary", "2025-01-05"],
        ["1200", "Rent", "expense", "Housing", "2025-01-10"],
        ["350", "Groceries", "expense", "Food", "2025-01-12"],
    ] {
        finboard(dir)
            .args(["txn", "add", args[0], args[1]])
            .args(["--type", args[2], "--category", args[3], "--date", args[4]])
            .assert()
            .success();
    }
}

#[test]
fn test_init_creates_profile() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'default' ready"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data/default/transactions.json").exists());
}

#[test]
fn test_add_transaction_prints_month_balance() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["transaction", "add", "3500", "Salary", "--type", "income"])
        .args(["--category", "Salary", "--date", "2025-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created transaction:"))
        .stdout(predicate::str::contains(
            "January 2025: income R$3,500.00, expenses R$0.00, balance R$3,500.00",
        ));
}

#[test]
fn test_dashboard_for_month() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);

    finboard(&dir)
        .args(["report", "dashboard", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard: January 2025"))
        .stdout(predicate::str::contains("R$1,950.00"))
        .stdout(predicate::str::contains("Housing"))
        .stdout(predicate::str::contains("77.4%"))
        .stdout(predicate::str::contains("22.6%"));
}

#[test]
fn test_dashboard_for_empty_month() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);

    finboard(&dir)
        .args(["report", "dashboard", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records for this month."));
}

#[test]
fn test_dashboard_json() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);

    let output = finboard(&dir)
        .args(["report", "dashboard", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["has_records"], true);
    assert_eq!(report["categories"].as_array().unwrap().len(), 2);
}

#[test]
fn test_list_filters_by_type() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);

    finboard(&dir)
        .args(["txn", "list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Groceries").not())
        .stdout(predicate::str::contains("1 transaction(s)"));

    finboard(&dir)
        .args(["txn", "list", "--month", "2025-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn test_months_report() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["report", "months"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No months with records yet."));

    add_january(&dir);
    finboard(&dir)
        .args(["report", "months"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jan/2025"));
}

#[test]
fn test_cards() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["card", "add", "Nubank", "--limit", "5000", "--due", "10", "--closing", "3"])
        .args(["--used", "2300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added card: Nubank"))
        .stdout(predicate::str::contains("R$2,700.00"));

    finboard(&dir)
        .args(["card", "add", "nubank", "--limit", "100", "--due", "1", "--closing", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    finboard(&dir)
        .args(["card", "edit", "nubank", "--used", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$4,900.00"));

    finboard(&dir)
        .args(["card", "add", "Inter", "--limit", "1000", "--due", "32", "--closing", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid due day"));
}

#[test]
fn test_payables() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["pay", "add", "150", "Water", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to be paid in 2025-01: Water R$150.00"));

    finboard(&dir)
        .args(["pay", "add", "80", "Power", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending this month: R$230.00"));

    finboard(&dir)
        .args(["payable", "list", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending total: R$230.00"));
}

#[test]
fn test_payable_defaults_to_latest_month() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);

    finboard(&dir)
        .args(["pay", "add", "99", "Internet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to be paid in 2025-01"));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);

    finboard(&dir)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,date,type,description,category,amount,payment_method,status,installments",
        ))
        .stdout(predicate::str::contains(",2025-01-10,expense,Rent,Housing,1200.00,"));
}

#[test]
fn test_export_json_to_file() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);
    let out = dir.path().join("export.json");

    finboard(&dir)
        .args(["export", "json", "--pretty", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["metadata"]["transaction_count"], 3);
    assert_eq!(value["months"][0]["balance"], 1950.0);
}

#[test]
fn test_profiles_are_isolated() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["--profile", "alice", "txn", "add", "10", "Coffee", "--date", "2025-01-02"])
        .assert()
        .success();

    finboard(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));

    finboard(&dir)
        .env("FINBOARD_PROFILE", "alice")
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"));
}

#[test]
fn test_audit_log() {
    let dir = TempDir::new().unwrap();
    add_january(&dir);

    finboard(&dir)
        .args(["audit", "--entity", "transaction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Transaction"))
        .stdout(predicate::str::contains("Showing 3 of 3 entries"));
}

#[test]
fn test_invalid_input() {
    let dir = TempDir::new().unwrap();
    finboard(&dir)
        .args(["txn", "add", "abc", "Lunch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount format"));

    finboard(&dir)
        .args(["txn", "list", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));

    finboard(&dir)
        .args(["txn", "show", "ffffffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));

    finboard(&dir)
        .args(["--profile", "../etc", "txn", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid profile name"));
}
