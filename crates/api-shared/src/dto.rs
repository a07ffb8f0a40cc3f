//! Request and response bodies for the REST API.
//!
//! Every type derives `utoipa::ToSchema` so it shows up in the generated OpenAPI document.
//! Conversions from core types live here too, keeping `triage-core` free of API concerns.

use serde::{Deserialize, Serialize};
use triage_core::stats::{PriorityCounts, SymptomCount};
use triage_core::{HistoryEntry, HistoryStats, NewPatient, Patient, QueueStatus};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub message: String,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A patient as shown on the queue screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub national_id: String,
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub priority: String,
    pub symptoms: String,
    pub registered_date: String,
    pub registered_time: String,
}

impl From<&Patient> for PatientRes {
    fn from(p: &Patient) -> Self {
        Self {
            national_id: p.national_id.to_string(),
            name: p.name.to_string(),
            age: p.age,
            contact: p.contact.to_string(),
            priority: p.priority_label.clone(),
            symptoms: p.symptoms.clone(),
            registered_date: p.registered_date(),
            registered_time: p.registered_time(),
        }
    }
}

/// Intake form. `priority` defaults to `normal`, `symptoms` to empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    pub name: String,
    pub national_id: String,
    pub age: u32,
    pub contact: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub symptoms: Option<String>,
}

impl From<CreatePatientReq> for NewPatient {
    fn from(req: CreatePatientReq) -> Self {
        NewPatient {
            name: req.name,
            national_id: req.national_id,
            age: req.age,
            contact: req.contact,
            priority: req.priority,
            symptoms: req.symptoms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatePatientRes {
    pub success: bool,
    pub patient: PatientRes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueueRes {
    pub current: Option<PatientRes>,
    pub previous: Option<PatientRes>,
    pub queue: Vec<PatientRes>,
    pub queue_total: usize,
    pub history_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CallNextRes {
    pub success: bool,
    pub patient: PatientRes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UndoRes {
    pub success: bool,
    pub current: Option<PatientRes>,
    pub previous: Option<PatientRes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemovePatientRes {
    pub success: bool,
    /// `false` when nobody with that identifier was waiting.
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResetRes {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntryRes {
    pub patient: PatientRes,
    pub served_date: String,
    pub served_time: String,
}

impl From<&HistoryEntry> for HistoryEntryRes {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            patient: PatientRes::from(&entry.patient),
            served_date: entry.served_date(),
            served_time: entry.served_time(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryRes {
    /// Most recent call first.
    pub history: Vec<HistoryEntryRes>,
    pub queue_total: usize,
    pub history_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriorityCountsRes {
    pub emergency: usize,
    pub urgent: usize,
    pub normal: usize,
}

impl From<PriorityCounts> for PriorityCountsRes {
    fn from(c: PriorityCounts) -> Self {
        Self {
            emergency: c.emergency,
            urgent: c.urgent,
            normal: c.normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SymptomCountRes {
    pub symptom: String,
    pub count: usize,
}

impl From<SymptomCount> for SymptomCountRes {
    fn from(s: SymptomCount) -> Self {
        Self {
            symptom: s.symptom,
            count: s.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsRes {
    pub priority_counts: PriorityCountsRes,
    pub top_symptoms: Vec<SymptomCountRes>,
}

impl From<HistoryStats> for StatsRes {
    fn from(stats: HistoryStats) -> Self {
        Self {
            priority_counts: stats.priority_counts.into(),
            top_symptoms: stats.top_symptoms.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusRes {
    pub current: Option<PatientRes>,
    pub queue_total: usize,
    pub history_total: usize,
}

impl From<QueueStatus> for StatusRes {
    fn from(status: QueueStatus) -> Self {
        Self {
            current: status.current.as_ref().map(PatientRes::from),
            queue_total: status.queue_total,
            history_total: status.history_total,
        }
    }
}
