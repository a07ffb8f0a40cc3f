//! Priority labels and their ranks.

use crate::constants::{EMERGENCY_LABEL, NORMAL_LABEL, URGENT_LABEL};
use serde::{Deserialize, Serialize};

/// Triage priority band.
///
/// Variants are declared lowest first so the derived `Ord` agrees with [`Priority::rank`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
    Emergency,
}

impl Priority {
    /// Integer rank; higher is served sooner.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Emergency => 3,
            Priority::Urgent => 2,
            Priority::Normal => 1,
        }
    }

    /// Maps a free-text label onto a band.
    ///
    /// Total: anything unrecognised, including the empty string, is `Normal`. Matching is
    /// case-insensitive and also accepts the Portuguese labels used at the front desk.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "emergency" | "emergência" | "emergencia" => Priority::Emergency,
            "urgent" | "urgente" => Priority::Urgent,
            _ => Priority::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Emergency => EMERGENCY_LABEL,
            Priority::Urgent => URGENT_LABEL,
            Priority::Normal => NORMAL_LABEL,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of a raw label. Shorthand for `Priority::from_label(label).rank()`.
pub fn rank_of(label: &str) -> u8 {
    Priority::from_label(label).rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_ordered() {
        assert_eq!(rank_of("emergency"), 3);
        assert_eq!(rank_of("urgent"), 2);
        assert_eq!(rank_of("normal"), 1);
        assert!(Priority::Emergency > Priority::Urgent);
        assert!(Priority::Urgent > Priority::Normal);
    }

    #[test]
    fn accepts_portuguese_and_mixed_case_labels() {
        assert_eq!(Priority::from_label("Emergência"), Priority::Emergency);
        assert_eq!(Priority::from_label("emergencia"), Priority::Emergency);
        assert_eq!(Priority::from_label(" URGENTE "), Priority::Urgent);
    }

    #[test]
    fn unknown_labels_default_to_normal() {
        assert_eq!(Priority::from_label("critical"), Priority::Normal);
        assert_eq!(Priority::from_label(""), Priority::Normal);
        assert_eq!(rank_of("???"), 1);
    }

    #[test]
    fn display_uses_canonical_label() {
        assert_eq!(Priority::Urgent.to_string(), "urgent");
    }
}
