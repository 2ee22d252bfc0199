//! Integration tests for the `zen-export` binary.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A `zen-export` command whose settings live in `base`
fn zen_cmd(base: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("zen-export");
    cmd.env("ZEN_EXPORT_DATA_DIR", base).env_remove("RUST_LOG");
    cmd
}

fn write_payload(dir: &Path, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    let temp_dir = TempDir::new().unwrap();
    zen_cmd(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("brand"));
}

#[test]
fn test_export_csv_exact_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_payload(
        temp_dir.path(),
        "orders.json",
        r#"[{"id": "A1", "status": "pending", "total": "100"}]"#,
    );
    let out_dir = temp_dir.path().join("out");

    zen_cmd(temp_dir.path())
        .arg("export")
        .arg(&input)
        .args(["--format", "csv", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("orders.csv"));

    let csv = fs::read_to_string(out_dir.join("orders.csv")).unwrap();
    assert_eq!(csv.trim_end(), "\"id\",\"status\",\"total\"\n\"A1\",\"pending\",\"100\"");
}

#[test]
fn test_export_document_uses_default_dir_and_name() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_payload(
        temp_dir.path(),
        "stock.json",
        r#"{"metadata": {"title": "Inventaire"}, "records": [{"sku": "P1", "status": "outofstock"}]}"#,
    );

    zen_cmd(temp_dir.path())
        .arg("export")
        .arg(&input)
        .args(["--format", "pdf", "--name", "inventaire-octobre", "--date", "2026-10-16"])
        .assert()
        .success();

    let pdf = fs::read(temp_dir.path().join("exports").join("inventaire-octobre.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("(Rupture de stock) Tj"));
    assert!(text.contains("(Inventaire) Tj"));
}

#[test]
fn test_export_json_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let payload = r#"{"zeta": [{"b": 1, "a": 2}], "alpha": []}"#;
    let input = write_payload(temp_dir.path(), "raw.json", payload);

    zen_cmd(temp_dir.path())
        .arg("export")
        .arg(&input)
        .args(["-f", "json"])
        .assert()
        .success();

    let written = fs::read_to_string(temp_dir.path().join("exports").join("raw.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    let original: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(parsed, original);
    assert!(written.find("\"zeta\"").unwrap() < written.find("\"alpha\"").unwrap());
}

#[test]
fn test_export_malformed_input_fails_without_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_payload(temp_dir.path(), "bad.json", r#""just a string""#);

    zen_cmd(temp_dir.path())
        .arg("export")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed input"));

    assert!(!temp_dir.path().join("exports").join("bad.csv").exists());
}

#[test]
fn test_unknown_format_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_payload(temp_dir.path(), "orders.json", "[]");

    zen_cmd(temp_dir.path())
        .arg("export")
        .arg(&input)
        .args(["--format", "xlsx"])
        .assert()
        .failure();
}

#[test]
fn test_brand_set_is_used_by_next_export() {
    let temp_dir = TempDir::new().unwrap();

    zen_cmd(temp_dir.path())
        .args(["brand", "set", "--app-name", "Boutique Awa", "--currency", "EUR"])
        .assert()
        .success();

    zen_cmd(temp_dir.path())
        .args(["brand", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boutique Awa"))
        .stdout(predicate::str::contains("monogram \"B\""));

    let input = write_payload(temp_dir.path(), "sales.json", r#"[{"product": "Savon", "total": 1500}]"#);
    zen_cmd(temp_dir.path())
        .arg("export")
        .arg(&input)
        .args(["--format", "document"])
        .assert()
        .success();

    let pdf = fs::read(temp_dir.path().join("exports").join("sales.pdf")).unwrap();
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("(Boutique Awa - Page 1 sur 1) Tj"));
    assert!(text.contains("(B) Tj"));
}

#[test]
fn test_preview_prints_labels() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_payload(
        temp_dir.path(),
        "orders.json",
        r#"[{"id": "A1", "status": "onhold", "total": 9999}]"#,
    );

    zen_cmd(temp_dir.path())
        .arg("preview")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("En attente de validation"))
        .stdout(predicate::str::contains("9 999 CFA"));
}

#[test]
fn test_qr_wifi() {
    let temp_dir = TempDir::new().unwrap();
    zen_cmd(temp_dir.path())
        .args(["qr", "wifi", "Zen Shop", "--password", "secret;1"])
        .assert()
        .success()
        .stdout("WIFI:T:WPA;S:Zen Shop;P:secret\\;1;;\n");
}

#[test]
fn test_config_shows_paths() {
    let temp_dir = TempDir::new().unwrap();
    zen_cmd(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.json"))
        .stdout(predicate::str::contains("Zen Commerce"))
        .stdout(predicate::str::contains("XOF (CFA)"));
}
