use std::sync::Mutex;

use booking_domain::{AppointmentSubmission, StoredAppointment, SubmissionReceipt};
use chrono::Utc;
use tracing::info;

use crate::CoreError;

/// Default page size for [`AppointmentStore::list`].
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Destination for validated appointment requests.
///
/// Called synchronously from the submit turn. An `Err` is surfaced to the
/// user as an error banner and the draft is kept for another attempt.
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, submission: &AppointmentSubmission) -> Result<SubmissionReceipt, CoreError>;
}

/// Logs the payload and drops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardingSink;

impl SubmissionSink for DiscardingSink {
    fn submit(&self, submission: &AppointmentSubmission) -> Result<SubmissionReceipt, CoreError> {
        info!(
            reference = %submission.reference,
            department = %submission.department_slug,
            fields = ?submission.fields,
            "appointment request discarded"
        );
        Ok(SubmissionReceipt {
            id: 0,
            reference: submission.reference,
            received_at: Utc::now(),
        })
    }
}

/// Read/write access to persisted appointment requests.
pub trait AppointmentStore: Send + Sync {
    /// Persists the submission, assigning the next id.
    fn create(&self, submission: AppointmentSubmission) -> Result<StoredAppointment, CoreError>;
    /// Returns at most `limit` records after skipping `skip`, oldest first.
    fn list(&self, skip: usize, limit: usize) -> Result<Vec<StoredAppointment>, CoreError>;
    fn get(&self, id: u64) -> Result<StoredAppointment, CoreError>;
}

/// Process-local store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryAppointmentStore {
    records: Mutex<Vec<StoredAppointment>>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AppointmentStore for MemoryAppointmentStore {
    fn create(&self, submission: AppointmentSubmission) -> Result<StoredAppointment, CoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| CoreError::Storage("appointment store lock poisoned".into()))?;
        let id = records.last().map(|record| record.id + 1).unwrap_or(1);
        let stored = StoredAppointment { id, submission };
        records.push(stored.clone());
        Ok(stored)
    }

    fn list(&self, skip: usize, limit: usize) -> Result<Vec<StoredAppointment>, CoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| CoreError::Storage("appointment store lock poisoned".into()))?;
        Ok(records.iter().skip(skip).take(limit).cloned().collect())
    }

    fn get(&self, id: u64) -> Result<StoredAppointment, CoreError> {
        let records = self
            .records
            .lock()
            .map_err(|_| CoreError::Storage("appointment store lock poisoned".into()))?;
        records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(CoreError::AppointmentNotFound(id))
    }
}

impl SubmissionSink for MemoryAppointmentStore {
    fn submit(&self, submission: &AppointmentSubmission) -> Result<SubmissionReceipt, CoreError> {
        let stored = self.create(submission.clone())?;
        Ok(stored.receipt(Utc::now()))
    }
}
