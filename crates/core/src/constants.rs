//! Constants used throughout the triage core crate.
//!
//! Labels, formats and defaults live here so the REST layer, the CSV export and the statistics
//! view all agree on them.

/// Canonical label for the highest priority band.
pub const EMERGENCY_LABEL: &str = "emergency";

/// Canonical label for the middle priority band.
pub const URGENT_LABEL: &str = "urgent";

/// Canonical label for the default priority band.
pub const NORMAL_LABEL: &str = "normal";

/// Default REST bind address when `TRIAGE_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default clinic name shown in health responses.
pub const DEFAULT_CLINIC_NAME: &str = "Triage";

/// Default number of symptom strings reported by the statistics view.
pub const DEFAULT_TOP_SYMPTOMS_LIMIT: usize = 10;

/// Default filename offered for the history CSV download.
pub const DEFAULT_CSV_FILENAME: &str = "historico.csv";

/// Column headers of the history CSV export, in order.
pub const CSV_HEADERS: [&str; 5] = ["name", "contact", "priority", "served_date", "served_time"];

/// Date format used for display and export.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Time-of-day format used for display and export.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Oldest age accepted at intake.
pub const MAX_PATIENT_AGE: u32 = 150;
