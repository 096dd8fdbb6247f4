// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn spendwise() -> Command {
    let mut cmd = Command::cargo_bin("spendwise").expect("binary exists");
    for key in [
        "SPENDWISE_DB",
        "SPENDWISE_USER",
        "SPENDWISE_SMTP_HOST",
        "SPENDWISE_SMTP_USER",
        "SPENDWISE_SMTP_PASSWORD",
        "SPENDWISE_SMTP_FROM",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn help_works_even_with_broken_mail_settings() {
    spendwise()
        .env("SPENDWISE_SMTP_HOST", "smtp.example.com")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("expense"));
}

#[test]
fn broken_mail_settings_stop_real_commands() {
    let dir = tempdir().unwrap();
    spendwise()
        .env("SPENDWISE_DB", dir.path().join("ledger.sqlite"))
        .env("SPENDWISE_SMTP_HOST", "smtp.example.com")
        .arg("init")
        .assert()
        .failure()
        .stderr(contains("Invalid startup configuration"));
}

#[test]
fn init_creates_the_database() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");
    spendwise()
        .env("SPENDWISE_DB", &db)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized"));
    assert!(db.exists());
}
