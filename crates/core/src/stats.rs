//! Summary statistics over the call history.

use crate::patient::HistoryEntry;
use crate::priority::Priority;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Calls per priority band.
///
/// Only the three bands are reported. A record whose label is not recognised was queued with
/// normal rank, so it is counted under `normal` rather than under its own label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub emergency: usize,
    pub urgent: usize,
    pub normal: usize,
}

impl PriorityCounts {
    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::Emergency => self.emergency += 1,
            Priority::Urgent => self.urgent += 1,
            Priority::Normal => self.normal += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.emergency + self.urgent + self.normal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCount {
    pub symptom: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub priority_counts: PriorityCounts,
    pub top_symptoms: Vec<SymptomCount>,
}

impl HistoryStats {
    /// Aggregates `entries` into per-priority counts and the `top_n` most frequent symptoms.
    ///
    /// Symptoms are compared as whole trimmed strings; blanks are skipped. Equal counts keep
    /// the order in which each symptom first appears in `entries`.
    pub fn from_history(entries: &[HistoryEntry], top_n: usize) -> Self {
        let mut priority_counts = PriorityCounts::default();
        let mut symptoms: Vec<SymptomCount> = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for entry in entries {
            priority_counts.bump(entry.patient.priority());

            let symptom = entry.patient.symptoms.trim();
            if symptom.is_empty() {
                continue;
            }
            match seen.get(symptom) {
                Some(&idx) => symptoms[idx].count += 1,
                None => {
                    seen.insert(symptom, symptoms.len());
                    symptoms.push(SymptomCount {
                        symptom: symptom.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // Stable sort keeps first-appearance order among ties.
        symptoms.sort_by(|a, b| b.count.cmp(&a.count));
        symptoms.truncate(top_n);

        Self {
            priority_counts,
            top_symptoms: symptoms,
        }
    }
}
