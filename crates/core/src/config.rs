//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the REST state. Values
//! arrive here as `Option<String>` so that parsing can be tested without touching process-wide
//! environment variables.

use crate::constants::{DEFAULT_CLINIC_NAME, DEFAULT_CSV_FILENAME, DEFAULT_TOP_SYMPTOMS_LIMIT};
use crate::{TriageError, TriageResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    clinic_name: String,
    top_symptoms_limit: usize,
    csv_filename: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the clinic name is blank, the symptom limit is
    /// zero, or the CSV filename is not a plain `*.csv` file name.
    pub fn new(
        clinic_name: String,
        top_symptoms_limit: usize,
        csv_filename: String,
    ) -> TriageResult<Self> {
        if clinic_name.trim().is_empty() {
            return Err(TriageError::InvalidInput(
                "clinic_name cannot be empty".into(),
            ));
        }
        if top_symptoms_limit == 0 {
            return Err(TriageError::InvalidInput(
                "top_symptoms_limit must be at least 1".into(),
            ));
        }
        validate_csv_filename(&csv_filename)?;

        Ok(Self {
            clinic_name: clinic_name.trim().to_string(),
            top_symptoms_limit,
            csv_filename,
        })
    }

    /// Build a configuration from raw environment values, falling back to defaults for
    /// missing or blank ones.
    pub fn from_env_values(
        clinic_name: Option<String>,
        top_symptoms_limit: Option<String>,
        csv_filename: Option<String>,
    ) -> TriageResult<Self> {
        Self::new(
            non_blank(clinic_name).unwrap_or_else(|| DEFAULT_CLINIC_NAME.into()),
            top_symptoms_limit_from_env_value(top_symptoms_limit)?,
            non_blank(csv_filename).unwrap_or_else(|| DEFAULT_CSV_FILENAME.into()),
        )
    }

    pub fn clinic_name(&self) -> &str {
        &self.clinic_name
    }

    pub fn top_symptoms_limit(&self) -> usize {
        self.top_symptoms_limit
    }

    pub fn csv_filename(&self) -> &str {
        &self.csv_filename
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            clinic_name: DEFAULT_CLINIC_NAME.into(),
            top_symptoms_limit: DEFAULT_TOP_SYMPTOMS_LIMIT,
            csv_filename: DEFAULT_CSV_FILENAME.into(),
        }
    }
}

/// Parse the statistics symptom limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default limit.
pub fn top_symptoms_limit_from_env_value(value: Option<String>) -> TriageResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_TOP_SYMPTOMS_LIMIT),
        Some(v) => v.parse::<usize>().map_err(|e| {
            TriageError::InvalidInput(format!("TRIAGE_TOP_SYMPTOMS is not a number: {e}"))
        }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The filename ends up in a `Content-Disposition` header, so keep it to a plain name.
fn validate_csv_filename(name: &str) -> TriageResult<()> {
    let ok = name.len() > ".csv".len()
        && name.ends_with(".csv")
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'));

    if ok {
        Ok(())
    } else {
        Err(TriageError::InvalidInput(format!(
            "csv_filename must be a plain name ending in .csv, got {name:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let cfg = CoreConfig::from_env_values(None, None, Some("  ".into())).expect("config");
        assert_eq!(cfg, CoreConfig::default());
    }

    #[test]
    fn parses_explicit_values() {
        let cfg = CoreConfig::from_env_values(
            Some(" Clinica Central ".into()),
            Some("5".into()),
            Some("calls.csv".into()),
        )
        .expect("config");
        assert_eq!(cfg.clinic_name(), "Clinica Central");
        assert_eq!(cfg.top_symptoms_limit(), 5);
        assert_eq!(cfg.csv_filename(), "calls.csv");
    }

    #[test]
    fn rejects_non_numeric_limit() {
        let err = top_symptoms_limit_from_env_value(Some("ten".into())).expect_err("not a number");
        assert!(matches!(err, TriageError::InvalidInput(_)));
    }

    #[test]
    fn rejects_zero_limit() {
        let err = CoreConfig::from_env_values(None, Some("0".into()), None).expect_err("zero");
        assert!(matches!(err, TriageError::InvalidInput(msg) if msg.contains("top_symptoms")));
    }

    #[test]
    fn rejects_unsafe_csv_filename() {
        for name in ["report.txt", ".csv", "a b.csv", "x\".csv", "../h.csv/"] {
            assert!(
                CoreConfig::new("Clinic".into(), 10, name.into()).is_err(),
                "{name} should be rejected"
            );
        }
    }
}
