use std::fs;

use assert_cmd::Command;
use chrono::Datelike;
use predicates::prelude::*;
use tempfile::TempDir;

fn expense(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_CLI_DATA_DIR", dir.path())
        .env_remove("EXPENSE_CLI_FILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn interactive_add_then_report() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .write_stdin("1\n10.00\ngroceries\nfood\n1\n5.50\nsnack\nfood\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added successfully!"))
        .stdout(predicate::str::contains("Exiting Expense Tracker."));

    assert!(dir.path().join("data").join("expenses.json").exists());

    // A second session sees the persisted records
    let today = chrono::Local::now().date_naive();
    expense(&dir)
        .write_stdin(format!("2\n{}\n{}\n3\n", today.month(), today.year()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Expenses: $15.50"))
        .stdout(predicate::str::contains("- food: $15.50"));
}

#[test]
fn interactive_recovers_from_bad_input() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .write_stdin("x\n1\nnot-a-number\n2\n\nmisc\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please try again."))
        .stdout(predicate::str::contains("is not a valid amount"))
        .stdout(predicate::str::contains("Expense added successfully!"));
}

#[test]
fn subcommands_add_and_report() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "10", "-c", "food", "--date", "2024-03-02"])
        .assert()
        .success();
    expense(&dir)
        .args(["add", "5.50", "-c", "food", "-d", "snack", "--date", "2024-03-20"])
        .assert()
        .success();
    expense(&dir)
        .args(["add", "20", "-c", "transport", "--date", "2024-04-01"])
        .assert()
        .success();

    expense(&dir)
        .args(["report", "--month", "3", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Report for 3/2024:"))
        .stdout(predicate::str::contains("Total Expenses: $15.50"))
        .stdout(predicate::str::contains("- food: $15.50"))
        .stdout(predicate::str::contains("transport").not());

    expense(&dir)
        .args(["report", "-m", "1", "-y", "1990"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found for this month."));
}

#[test]
fn add_rejects_negative_amount() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["add", "-3", "-c", "food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    assert!(!dir.path().join("data").join("expenses.json").exists());
}

#[test]
fn report_rejects_invalid_month() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .args(["report", "-m", "13", "-y", "2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month must be between 1 and 12"));
}

#[test]
fn corrupt_file_is_reported_not_discarded() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("expenses.json"), "{ broken").unwrap();

    expense(&dir)
        .args(["report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Persistence error"));

    // Declining in the shell leaves the file alone
    expense(&dir).write_stdin("no\n").assert().failure();
    assert_eq!(
        fs::read_to_string(data.join("expenses.json")).unwrap(),
        "{ broken"
    );
}

#[test]
fn file_flag_overrides_data_path() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.json");

    expense(&dir)
        .args(["--file", custom.to_str().unwrap(), "add", "1.25", "-c", "misc"])
        .assert()
        .success();

    assert!(custom.exists());
    assert!(!dir.path().join("data").join("expenses.json").exists());

    expense(&dir)
        .args(["list", "--file", custom.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1.25"));
}

#[test]
fn export_writes_csv() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.csv");

    expense(&dir)
        .args(["add", "7", "-c", "books", "-d", "novel", "--date", "2024-06-01"])
        .assert()
        .success();
    expense(&dir)
        .args(["export", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 expenses"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains(",2024-06-01,books,novel,7.00"));
}

#[test]
fn config_prints_paths() {
    let dir = TempDir::new().unwrap();

    expense(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("expenses.json"))
        .stdout(predicate::str::contains("Currency symbol: $"))
        .stdout(predicate::str::contains("Created default settings file."));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").is_dir());

    // An existing settings file is left alone
    fs::write(dir.path().join("config.json"), r#"{"currency_symbol": "€"}"#).unwrap();
    expense(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol: €"))
        .stdout(predicate::str::contains("Created default settings file.").not());
    assert_eq!(
        fs::read_to_string(dir.path().join("config.json")).unwrap(),
        r#"{"currency_symbol": "€"}"#
    );
}
