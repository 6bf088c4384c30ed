//! End-to-end tests for commands that need no OCR or PDF tools.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn wasl() -> Command {
    Command::cargo_bin("wasl").unwrap()
}

#[test]
fn extract_reads_text_file() {
    let dir = tempdir().unwrap();
    let page = dir.path().join("page.txt");
    std::fs::write(&page, "فاتورة\nالمكرم: سالم العتيبي\nMob.No: 0551234567\n").unwrap();

    wasl()
        .arg("extract")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("سالم العتيبي"))
        .stdout(predicate::str::contains("0551234567"))
        .stdout(predicate::str::contains("https://wa.me/966551234567?text="));
}

#[test]
fn extract_reads_stdin_and_drops_business_number() {
    wasl()
        .args(["extract", "-"])
        .write_stdin("مركز الخدمة هاتف 0566522351")
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded"))
        .stdout(predicate::str::contains("Name:  مركز الخدمة هاتف"))
        .stdout(predicate::str::contains("wa.me").not());
}

#[test]
fn extract_json_output() {
    let output = wasl()
        .args(["extract", "--format", "json"])
        .write_stdin("اسم العميل: نورة القحطاني جوال 0559876543")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "نورة القحطاني");
    assert_eq!(value["phone"], "0559876543");
    assert_eq!(value["phone_rule"], "label_then_phone");
    assert_eq!(value["excluded"], false);

    let confidence = value["phone_confidence"].as_f64().unwrap();
    assert!((confidence - 0.95).abs() < 1e-6);

    assert_eq!(value["phone_candidates"][0]["value"], "0559876543");
    assert_eq!(value["name_candidates"][0]["value"], "نورة القحطاني");
    assert_eq!(value["name_candidates"][0]["rule"], "name_label");
    assert!(value["name_candidates"].as_array().unwrap().len() >= 2);
}

#[test]
fn extract_without_match_reports_unknown() {
    wasl()
        .arg("extract")
        .write_stdin("Invoice 2024 total 350 SAR")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:  unknown"));
}

#[test]
fn config_init_get_set() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");
    let config = config.to_str().unwrap();

    wasl()
        .args(["--config", config, "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    wasl()
        .args(["--config", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    wasl()
        .args(["--config", config, "config", "set", "messaging.country_code", "971"])
        .assert()
        .success();

    wasl()
        .args(["--config", config, "config", "get", "messaging.country_code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"971\""));

    wasl()
        .args(["--config", config, "config", "set", "ocr.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn extract_uses_configured_country_code() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    wasl()
        .args(["--config", config, "config", "set", "messaging.country_code", "971"])
        .assert()
        .success();

    wasl()
        .args(["--config", config, "extract"])
        .write_stdin("جوال 0551234567")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://wa.me/971551234567?text="));
}

#[test]
fn batch_on_empty_folder_reports_no_results() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("links.csv");

    wasl()
        .arg("batch")
        .arg("--input")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--no-open")
        .assert()
        .success()
        .stdout(predicate::str::contains("No results"));

    assert!(!output.exists());
}

#[test]
fn batch_on_missing_folder_fails() {
    let dir = tempdir().unwrap();

    wasl()
        .arg("batch")
        .arg("--input")
        .arg(dir.path().join("missing"))
        .arg("--no-open")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input folder not found"));
}

#[test]
fn process_missing_file_fails() {
    wasl()
        .args(["process", "/nonexistent/invoice.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}
