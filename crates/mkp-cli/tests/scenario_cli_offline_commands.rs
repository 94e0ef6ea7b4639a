use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// `mkp order options` and `mkp window` need no backend and no config.
fn mkp() -> Command {
    let mut cmd = Command::cargo_bin("mkp").expect("mkp binary builds");
    cmd.env_remove("MKP_API_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn order_options_from_shipped() {
    mkp()
        .args(["order", "options", "--current", "shipped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("current=shipped"))
        .stdout(predicate::str::contains(
            "option=confirmed code=1 selected=false enabled=false refusal=not_permitted",
        ))
        .stdout(predicate::str::contains(
            "option=shipped code=3 selected=true enabled=false refusal=no_op",
        ))
        .stdout(predicate::str::contains(
            "option=in_transit code=4 selected=false enabled=true refusal=-",
        ))
        .stdout(predicate::str::contains(
            "option=cancelled code=6 selected=false enabled=true refusal=-",
        ));
}

#[test]
fn order_options_from_delivered_are_all_disabled() {
    mkp()
        .args(["order", "options", "--current", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled=true").not())
        .stdout(predicate::str::contains(
            "option=cancelled code=6 selected=false enabled=false refusal=from_terminal",
        ));
}

#[test]
fn order_options_rejects_unknown_status() {
    mkp()
        .args(["order", "options", "--current", "lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --current"));
}

#[test]
fn window_phase_at_boundaries() {
    let opens = "2026-06-01T10:00:00Z";
    let closes = "2026-06-01T12:00:00Z";

    mkp()
        .args(["window", "--opens", opens, "--closes", closes, "--at", opens])
        .assert()
        .success()
        .stdout(predicate::str::contains("phase=open"))
        .stdout(predicate::str::contains("accepts_bids=true"))
        .stdout(predicate::str::contains("remaining_secs=7200"));

    mkp()
        .args(["window", "--opens", opens, "--closes", closes, "--at", closes])
        .assert()
        .success()
        .stdout(predicate::str::contains("phase=closed"))
        .stdout(predicate::str::contains("remaining_secs=-"));

    mkp()
        .args([
            "window",
            "--opens",
            opens,
            "--closes",
            closes,
            "--at",
            "2026-06-01T09:59:59Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("phase=upcoming"));
}

#[test]
fn window_rejects_inverted_dates() {
    mkp()
        .args([
            "window",
            "--opens",
            "2026-06-01T12:00:00Z",
            "--closes",
            "2026-06-01T10:00:00Z",
        ])
        .assert()
        .failure();
}

#[test]
fn config_hash_prints_hash_and_canonical_json() {
    let base = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("base.yaml");

    mkp()
        .arg("config-hash")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"config_hash=[0-9a-f]{64}").unwrap())
        .stdout(predicate::str::contains(r#""timeout_secs":30"#));
}
