use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = r#"{
    "ExpenseDocuments": [{
        "SummaryFields": [
            { "Type": { "Text": "VENDOR_NAME" },
              "ValueDetection": { "Text": "Farmacia Central S.A.", "Confidence": 98.0 } },
            { "Type": { "Text": "OTHER" },
              "LabelDetection": { "Text": "Fecha" },
              "ValueDetection": { "Text": "15/03/2024", "Confidence": 95.0 } },
            { "Type": { "Text": "TOTAL" },
              "LabelDetection": { "Text": "Total" },
              "ValueDetection": { "Text": "12,50", "Confidence": 65.0 } }
        ],
        "LineItemGroups": [{
            "LineItems": [{
                "LineItemExpenseFields": [
                    { "Type": { "Text": "ITEM" }, "ValueDetection": { "Text": "Jarabe", "Confidence": 97.0 } },
                    { "Type": { "Text": "PRICE" }, "ValueDetection": { "Text": "12,50", "Confidence": 96.0 } }
                ]
            }]
        }]
    }]
}"#;

const RAW: &str = r#"{
    "summary_fields": [
        { "type_code": "MERCHANT_NAME", "value_text": "Acme Inc." },
        { "type_code": "TOTAL", "value_text": "$1,234.56" }
    ],
    "line_item_groups": []
}"#;

/// Command with the config directory pointed at an empty temp dir.
fn bites(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bites").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn normalize_analyze_expense_json() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "receipt.json", RECEIPT);

    bites(&home)
        .args(["normalize", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""vendor_name":"Farmacia Central""#))
        .stdout(predicate::str::contains(r#""transaction_date":"2024-03-15T00:00:00Z""#))
        .stdout(predicate::str::contains(r#""description":"Jarabe""#))
        // 65% is under the default threshold
        .stdout(predicate::str::contains("total_amount").not());
}

#[test]
fn normalize_with_preset_and_confidence_override() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "receipt.json", RECEIPT);

    bites(&home)
        .args(["normalize", &input, "--preset", "low-confidence"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""total_amount":12.5"#));

    bites(&home)
        .args(["normalize", &input, "--min-confidence", "0.99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vendor_name").not());
}

#[test]
fn normalize_csv_date_matches_json() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "receipt.json", RECEIPT);

    bites(&home)
        .args(["normalize", &input, "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Farmacia Central,2024-03-15T00:00:00Z,,Jarabe,"))
        .stdout(predicate::str::contains("+00:00").not());
}

#[test]
fn normalize_raw_document_as_csv() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "raw.json", RAW);

    bites(&home)
        .args(["normalize", &input, "--raw", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "vendor_name,transaction_date,total_amount,description",
        ))
        .stdout(predicate::str::contains("Acme,,1234.56,"));
}

#[test]
fn normalize_writes_output_file() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "raw.json", RAW);
    let output = home.path().join("out.txt");

    bites(&home)
        .args(["normalize", &input, "--raw", "-f", "text", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("Vendor: Acme"));
    assert!(content.contains("Total: 1234.56"));
}

#[test]
fn normalize_validate_reports_issues() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "raw.json", RAW);

    bites(&home)
        .args(["normalize", &input, "--raw", "--validate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Validation issues:"))
        .stderr(predicate::str::contains("Missing transaction date"));
}

#[test]
fn normalize_errors() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "receipt.json", RECEIPT);
    let broken = write(home.path(), "broken.json", "{ not json");

    bites(&home)
        .args(["normalize", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    bites(&home)
        .args(["normalize", &input, "--preset", "klingon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown preset"));

    bites(&home)
        .args(["normalize", &input, "--min-confidence", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("minimum confidence"));

    bites(&home)
        .args(["normalize", &broken])
        .assert()
        .failure();
}

#[test]
fn normalize_uses_config_file() {
    let home = TempDir::new().unwrap();
    let input = write(home.path(), "receipt.json", RECEIPT);
    let config = write(
        home.path(),
        "config.json",
        r#"{ "preset": "low-confidence", "output": { "pretty": true } }"#,
    );

    bites(&home)
        .args(["-c", &config, "normalize", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""total_amount": 12.5"#));
}

#[test]
fn batch_with_summary() {
    let home = TempDir::new().unwrap();
    let inputs = home.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    write(&inputs, "a.json", RECEIPT);
    write(&inputs, "b.json", RECEIPT);
    write(&inputs, "c.json", "{ broken");
    let out = home.path().join("out");
    let pattern = format!("{}/*.json", inputs.display());

    bites(&home)
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());
    assert!(!out.join("c.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.json,success,Farmacia Central"));
    assert!(summary.contains("c.json,error"));
}

#[test]
fn batch_stops_on_first_error() {
    let home = TempDir::new().unwrap();
    let inputs = home.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    write(&inputs, "bad.json", "nope");
    let pattern = format!("{}/*.json", inputs.display());

    bites(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn batch_without_matches() {
    let home = TempDir::new().unwrap();
    let pattern = format!("{}/*.json", home.path().display());

    bites(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_presets_and_init() {
    let home = TempDir::new().unwrap();

    bites(&home)
        .args(["config", "presets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spanish-optimized"))
        .stdout(predicate::str::contains("european"));

    let path = home.path().join("bites.json");
    bites(&home)
        .args(["config", "init", "--preset", "european", "-o"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains(r#""preset": "european""#));

    bites(&home)
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    bites(&home)
        .args(["-c", &path.to_string_lossy(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""date_order": "day_first""#));
}

#[test]
fn parse_path_command() {
    let home = TempDir::new().unwrap();

    bites(&home)
        .args(["parse-path", "s3://bills/2024/03/ticket.jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bucket: bills"))
        .stdout(predicate::str::contains("2024/03/ticket.jpg"));

    bites(&home)
        .args(["parse-path", "gs://bills/ticket.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme"));

    bites(&home)
        .args(["parse-path", "s3://bills"])
        .assert()
        .failure();
}
