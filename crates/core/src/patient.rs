//! Patient records and intake validation.
//!
//! [`NewPatient`] is the unvalidated shape submitted at the front desk. [`NewPatient::into_patient`]
//! turns it into a [`Patient`], the record the queue and history carry around.

use crate::clock::Clock;
use crate::constants::{DATE_FORMAT, MAX_PATIENT_AGE, TIME_FORMAT};
use crate::priority::Priority;
use crate::{TriageError, TriageResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use triage_types::{IdentityKey, NonEmptyText};

/// A registered patient.
///
/// Two records are equal when their identity keys are equal; the other fields are payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub national_id: IdentityKey,
    pub name: NonEmptyText,
    pub age: u32,
    pub contact: NonEmptyText,
    /// Priority label as recorded at intake. A blank label is rejected by the queue.
    pub priority_label: String,
    #[serde(default)]
    pub symptoms: String,
    pub registered_at: NaiveDateTime,
}

impl Patient {
    /// Resolved priority band. Unknown labels resolve to `Normal`.
    pub fn priority(&self) -> Priority {
        Priority::from_label(&self.priority_label)
    }

    pub fn rank(&self) -> u8 {
        self.priority().rank()
    }

    pub fn has_priority_label(&self) -> bool {
        !self.priority_label.trim().is_empty()
    }

    pub fn registered_date(&self) -> String {
        self.registered_at.format(DATE_FORMAT).to_string()
    }

    pub fn registered_time(&self) -> String {
        self.registered_at.format(TIME_FORMAT).to_string()
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.national_id == other.national_id
    }
}

impl Eq for Patient {}

/// A patient as logged when called into service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub patient: Patient,
    pub served_at: NaiveDateTime,
}

impl HistoryEntry {
    pub fn new(patient: Patient, served_at: NaiveDateTime) -> Self {
        Self { patient, served_at }
    }

    pub fn served_date(&self) -> String {
        self.served_at.format(DATE_FORMAT).to_string()
    }

    pub fn served_time(&self) -> String {
        self.served_at.format(TIME_FORMAT).to_string()
    }
}

/// Intake form as submitted, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub national_id: String,
    pub age: u32,
    pub contact: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
}

impl NewPatient {
    /// Validates the form and stamps the registration time.
    ///
    /// A missing or blank priority becomes `normal`; a recognised one is stored under its
    /// canonical label. Unrecognised labels are kept verbatim and rank as `normal`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` naming the first field that fails:
    /// - `name`, `national_id` or `contact` blank,
    /// - `national_id` not a well-formed identity key,
    /// - `age` zero or above the accepted maximum.
    pub fn into_patient(self, clock: &dyn Clock) -> TriageResult<Patient> {
        let name = NonEmptyText::new(&self.name)
            .map_err(|e| TriageError::InvalidInput(format!("name: {e}")))?;
        let national_id = IdentityKey::parse(&self.national_id)
            .map_err(|e| TriageError::InvalidInput(format!("national_id: {e}")))?;
        if self.age == 0 || self.age > MAX_PATIENT_AGE {
            return Err(TriageError::InvalidInput(format!(
                "age: must be between 1 and {MAX_PATIENT_AGE}"
            )));
        }
        let contact = NonEmptyText::new(&self.contact)
            .map_err(|e| TriageError::InvalidInput(format!("contact: {e}")))?;

        let priority_label = match self.priority.as_deref().map(str::trim) {
            None | Some("") => Priority::Normal.as_str().to_string(),
            Some(label) => canonical_label(label),
        };

        Ok(Patient {
            national_id,
            name,
            age: self.age,
            contact,
            priority_label,
            symptoms: self.symptoms.unwrap_or_default().trim().to_string(),
            registered_at: clock.now(),
        })
    }
}

fn canonical_label(label: &str) -> String {
    let priority = Priority::from_label(label);
    if priority == Priority::Normal && !label.eq_ignore_ascii_case(Priority::Normal.as_str()) {
        label.to_string()
    } else {
        priority.as_str().to_string()
    }
}
