use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Department, SpecialtyType};

/// Validated snapshot of a draft, handed to a submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSubmission {
    pub reference: Uuid,
    pub department_slug: String,
    pub department_name: String,
    pub specialty: SpecialtyType,
    pub fields: BTreeMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}

impl AppointmentSubmission {
    pub fn new(
        department: &Department,
        fields: BTreeMap<String, String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            reference: Uuid::new_v4(),
            department_slug: department.slug.clone(),
            department_name: department.name.clone(),
            specialty: department.specialty,
            fields,
            submitted_at,
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Acknowledgement returned by a sink for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: u64,
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
}

/// A submission persisted by an appointment store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAppointment {
    pub id: u64,
    #[serde(flatten)]
    pub submission: AppointmentSubmission,
}

impl StoredAppointment {
    pub fn receipt(&self, received_at: DateTime<Utc>) -> SubmissionReceipt {
        SubmissionReceipt {
            id: self.id,
            reference: self.submission.reference,
            received_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stored_appointment_flattens_submission() {
        let department = Department::new("cardiology", "Cardiology Clinic", SpecialtyType::Medical);
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), "Ann".to_string());
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let stored = StoredAppointment {
            id: 7,
            submission: AppointmentSubmission::new(&department, fields, at),
        };

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["department_slug"], "cardiology");
        assert_eq!(value["specialty"], "medical");
        assert_eq!(value["fields"]["name"], "Ann");

        let back: StoredAppointment = serde_json::from_value(value).unwrap();
        assert_eq!(back, stored);
    }
}
