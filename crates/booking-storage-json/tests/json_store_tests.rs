use std::collections::BTreeMap;

use booking_core::{AppointmentStore, CoreError, SubmissionSink, DEFAULT_LIST_LIMIT};
use booking_domain::{AppointmentSubmission, Department, SpecialtyType};
use booking_storage_json::JsonAppointmentStore;
use chrono::Utc;
use tempfile::tempdir;

fn submission(name: &str) -> AppointmentSubmission {
    let department = Department::new("dermatology", "Dermatology", SpecialtyType::Medical);
    let mut fields = BTreeMap::new();
    fields.insert("name".to_string(), name.to_string());
    fields.insert("doctor".to_string(), "dr-arjun".to_string());
    AppointmentSubmission::new(&department, fields, Utc::now())
}

#[test]
fn created_records_survive_a_new_store_instance() {
    let dir = tempdir().expect("tempdir");
    let store = JsonAppointmentStore::new(dir.path().join("data")).expect("store");

    let first = store.create(submission("Ann")).expect("create");
    let second = store.create(submission("Bo")).expect("create");
    assert_eq!((first.id, second.id), (1, 2));

    let reopened = JsonAppointmentStore::new(dir.path().join("data")).expect("reopen");
    let loaded = reopened.get(2).expect("get");
    assert_eq!(loaded.submission.field("name"), Some("Bo"));
    assert_eq!(loaded.submission.reference, second.submission.reference);
    assert_eq!(reopened.create(submission("Cy")).expect("create").id, 3);
}

#[test]
fn list_honours_skip_and_limit() {
    let dir = tempdir().expect("tempdir");
    let store = JsonAppointmentStore::new(dir.path().to_path_buf()).expect("store");
    for name in ["a", "b", "c", "d"] {
        store.create(submission(name)).expect("create");
    }

    let page = store.list(1, 2).expect("list");
    let ids: Vec<u64> = page.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(store.list(0, DEFAULT_LIST_LIMIT).expect("list").len(), 4);
    assert!(store.list(10, 5).expect("list").is_empty());
}

#[test]
fn empty_store_lists_nothing_and_reports_missing_id() {
    let dir = tempdir().expect("tempdir");
    let store = JsonAppointmentStore::new(dir.path().to_path_buf()).expect("store");

    assert!(store.list(0, DEFAULT_LIST_LIMIT).expect("list").is_empty());
    assert!(matches!(store.get(1), Err(CoreError::AppointmentNotFound(1))));
    assert!(!store.store_path().exists());
}

#[test]
fn sink_submission_returns_receipt_with_store_id() {
    let dir = tempdir().expect("tempdir");
    let store = JsonAppointmentStore::new(dir.path().to_path_buf()).expect("store");
    let payload = submission("Ann");

    let receipt = store.submit(&payload).expect("submit");

    assert_eq!(receipt.id, 1);
    assert_eq!(receipt.reference, payload.reference);
    let json = std::fs::read_to_string(store.store_path()).expect("read");
    assert!(json.contains("\"department_slug\": \"dermatology\""));
    assert!(json.contains("\"doctor\": \"dr-arjun\""));
}

#[test]
fn previous_file_is_backed_up_before_overwrite() {
    let dir = tempdir().expect("tempdir");
    let store = JsonAppointmentStore::with_retention(dir.path().to_path_buf(), 2).expect("store");

    store.create(submission("first")).expect("create");
    assert!(store.list_backups().expect("backups").is_empty());

    store.create(submission("second")).expect("create");
    let backups = store.list_backups().expect("backups");
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("appointments_"));
    assert!(store.backups_dir().join(&backups[0]).exists());
}

#[test]
fn corrupt_store_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let store = JsonAppointmentStore::new(dir.path().to_path_buf()).expect("store");
    std::fs::write(store.store_path(), "not json").expect("write");

    assert!(matches!(store.list(0, 10), Err(CoreError::Serde(_))));
}
