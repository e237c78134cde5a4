#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh, isolated `EVERCARE_HOME` for one test.
pub fn test_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// The CLI in script mode, rooted at `home`, with colour disabled.
pub fn script_cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("evercare_booking_cli").expect("binary built");
    cmd.env("EVERCARE_CLI_SCRIPT", "1")
        .env("EVERCARE_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

pub fn cardiology_script(email: &str) -> String {
    format!(
        "open cardiology\n\
         set name Ann Lee\n\
         set phone 0300-1234567\n\
         set email {email}\n\
         set healthConcerns \"Chest pain on exertion\"\n\
         select doctor \"Dr. Priya Sharma (Electrophysiology)\"\n\
         set appointmentTime 2024-05-02T10:30\n\
         submit\n\
         exit\n"
    )
}
