//! booking-storage-json
//!
//! File-backed [`AppointmentStore`]: every record lives in one
//! `appointments.json` document under the data directory, and the previous
//! version is copied into `backups/` before each write.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use booking_core::{AppointmentStore, CoreError, SubmissionSink};
use booking_domain::{AppointmentSubmission, StoredAppointment, SubmissionReceipt};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const STORE_FILE: &str = "appointments.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_PREFIX: &str = "appointments";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    next_id: u64,
    appointments: Vec<StoredAppointment>,
}

impl StoreDocument {
    fn allocate_id(&mut self) -> u64 {
        let floor = self.appointments.iter().map(|a| a.id).max().unwrap_or(0);
        let id = self.next_id.max(floor + 1).max(1);
        self.next_id = id + 1;
        id
    }
}

pub struct JsonAppointmentStore {
    data_dir: PathBuf,
    retention: usize,
    write_lock: Mutex<()>,
}

impl JsonAppointmentStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(data_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(data_dir: PathBuf, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(data_dir.join(BACKUP_DIR))?;
        Ok(Self {
            data_dir,
            retention: retention.max(1),
            write_lock: Mutex::new(()),
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.data_dir.join(BACKUP_DIR)
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>, CoreError> {
        let dir = self.backups_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort_by_key(|name| Reverse(parse_backup_timestamp(name)));
        Ok(names)
    }

    fn load(&self) -> Result<StoreDocument, CoreError> {
        let path = self.store_path();
        if !path.exists() {
            return Ok(StoreDocument::default());
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn persist(&self, document: &StoreDocument) -> Result<(), CoreError> {
        let path = self.store_path();
        self.backup_existing_file(&path)?;
        let json = serde_json::to_string_pretty(document)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn backup_existing_file(&self, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let name = format!("{BACKUP_PREFIX}_{timestamp}.{BACKUP_EXTENSION}");
        fs::copy(path, self.backups_dir().join(&name))?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for name in self.list_backups()?.into_iter().skip(self.retention) {
            debug!(backup = %name, "pruning appointment backup");
            let _ = fs::remove_file(self.backups_dir().join(name));
        }
        Ok(())
    }
}

impl AppointmentStore for JsonAppointmentStore {
    fn create(&self, submission: AppointmentSubmission) -> Result<StoredAppointment, CoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CoreError::Storage("appointment store lock poisoned".into()))?;
        let mut document = self.load()?;
        let stored = StoredAppointment {
            id: document.allocate_id(),
            submission,
        };
        document.appointments.push(stored.clone());
        self.persist(&document)?;
        info!(
            id = stored.id,
            department = %stored.submission.department_slug,
            path = %self.store_path().display(),
            "appointment stored"
        );
        Ok(stored)
    }

    fn list(&self, skip: usize, limit: usize) -> Result<Vec<StoredAppointment>, CoreError> {
        let document = self.load()?;
        Ok(document
            .appointments
            .into_iter()
            .skip(skip)
            .take(limit)
            .collect())
    }

    fn get(&self, id: u64) -> Result<StoredAppointment, CoreError> {
        self.load()?
            .appointments
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(CoreError::AppointmentNotFound(id))
    }
}

impl SubmissionSink for JsonAppointmentStore {
    fn submit(&self, submission: &AppointmentSubmission) -> Result<SubmissionReceipt, CoreError> {
        let stored = self.create(submission.clone())?;
        Ok(stored.receipt(Utc::now()))
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{BACKUP_EXTENSION}"))?;
    let mut segments = stem.rsplit('_');
    let time = segments.next()?;
    let date = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 4) {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
