use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::str::contains;
use strapx::SessionConfig;
use tempfile::TempDir;

const SESSION: &str = r#"{
    "max_dim": 800,
    "guitar_image_path": "images/guitar.png",
    "marker_size": 20,
    "B1_init_pixel_coords": [100, 200],
    "COM_init_pixel_coords": [200, 300],
    "B2_init_pixel_coords": [300, 200],
    "init_real_to_pixel_dist_ratio": 1.0,
    "init_strap_length": 500.0
}"#;

fn cmd() -> Command {
    Command::cargo_bin("strapx").unwrap()
}

fn session_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, SESSION).unwrap();
    path
}

fn stored_strap_length(path: &Path) -> f64 {
    SessionConfig::load(path).unwrap().strap_length
}

#[test]
fn reports_equilibrium_angle() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(session_file(&dir))
        .assert()
        .success()
        .stdout(contains("0.00 degrees clockwise"));
}

#[test]
fn short_strap_is_reported_with_both_lengths() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(session_file(&dir))
        .args(["--strap-length", "150"])
        .assert()
        .code(3)
        .stdout(contains("strap length of 150.0000"))
        .stdout(contains("buttons of 200.0000"));
}

#[test]
fn json_output() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(session_file(&dir))
        .arg("--json")
        .assert()
        .success()
        .stdout(contains("\"rotation_degrees\""))
        .stdout(contains("\"left_strap_seg_len\""));
}

#[test]
fn json_output_tags_failures() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(session_file(&dir))
        .args(["--json", "--ratio", "10"])
        .assert()
        .code(3)
        .stdout(contains("precondition_violation"));
}

#[test]
fn rejects_invalid_overrides() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(session_file(&dir))
        .args(["--strap-length", "-1"])
        .assert()
        .code(1)
        .stderr(contains("init_strap_length"));
}

#[test]
fn rejects_negative_ratio_through_validation() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(session_file(&dir))
        .args(["--ratio", "-0.5"])
        .assert()
        .code(1)
        .stderr(contains("init_real_to_pixel_dist_ratio"));
}

#[test]
fn usage_errors_keep_their_own_exit_status() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(session_file(&dir))
        .arg("--no-such-flag")
        .assert()
        .code(2);
}

#[test]
fn interactive_session_edits_and_saves() {
    let dir = TempDir::new().unwrap();
    let path = session_file(&dir);
    cmd()
        .arg(&path)
        .arg("--interactive")
        .write_stdin("s\nabc\n600\nh\nd\nd\nw\n")
        .assert()
        .success()
        .stdout(contains("can't be converted to a number"))
        .stdout(contains("Strap length is now 600.0000"))
        .stdout(contains("Equilibrium angle is"))
        .stdout(contains("Button distance entry aborted"))
        .stdout(contains("have been overwritten"));

    assert_eq!(stored_strap_length(&path), 600.0);
    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("images/guitar.png"));
}

#[test]
fn missing_config_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(contains("absent.json"));
}
