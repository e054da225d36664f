use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn run_registrar(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_registrar"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("binary runs")
}

#[test]
fn init_creates_the_registry_database() {
    let tmp = tempdir().unwrap();
    let output = run_registrar(tmp.path(), &["init"]);
    assert!(output.status.success());
    assert!(tmp.path().join(".registrar/data/registry.db").exists());

    // Second run preserves the existing database.
    let output = run_registrar(tmp.path(), &["init"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already initialized"));
}

#[test]
fn fields_catalog_lists_every_index_and_marks_identifiers() {
    let tmp = tempdir().unwrap();
    assert!(run_registrar(tmp.path(), &["init"]).status.success());

    let output = run_registrar(tmp.path(), &["fields"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for label in ["Name", "Postal code", "Complement"] {
        assert!(stdout.contains(label), "missing {}", label);
    }
    assert!(stdout.contains("not editable"));
}

#[test]
fn commands_outside_a_registry_fail_with_guidance() {
    let tmp = tempdir().unwrap();
    let output = run_registrar(tmp.path(), &["list"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("registrar init"));
}

#[test]
fn list_on_an_empty_registry_reports_no_records() {
    let tmp = tempdir().unwrap();
    assert!(run_registrar(tmp.path(), &["init"]).status.success());

    let output = run_registrar(tmp.path(), &["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No records found"));
}

#[test]
fn delete_of_a_missing_record_distinguishes_not_found() {
    let tmp = tempdir().unwrap();
    assert!(run_registrar(tmp.path(), &["init"]).status.success());

    let output = run_registrar(tmp.path(), &["delete", "--id", "99", "--yes"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not found"));
}
