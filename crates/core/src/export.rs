//! CSV export of the call history.

use crate::constants::CSV_HEADERS;
use crate::patient::HistoryEntry;
use crate::{TriageError, TriageResult};
use csv::WriterBuilder;

/// Renders history entries as CSV, one row per entry in the order given.
///
/// Pass [`QueueService::history_snapshot`](crate::service::QueueService::history_snapshot) to
/// get the most-recent-first download. The header row is always written, so an empty history
/// yields just the header.
///
/// # Errors
///
/// Returns a `TriageError` if the CSV writer fails; this does not happen for in-memory output
/// in practice.
pub fn history_to_csv(entries: &[HistoryEntry]) -> TriageResult<String> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADERS)?;
    for entry in entries {
        let patient = &entry.patient;
        wtr.write_record([
            patient.name.as_str(),
            patient.contact.as_str(),
            patient.priority_label.as_str(),
            entry.served_date().as_str(),
            entry.served_time().as_str(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| TriageError::CsvFlush(e.into_error()))?;
    String::from_utf8(bytes).map_err(TriageError::CsvEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, patient};

    #[test]
    fn empty_history_is_header_only() {
        let csv = history_to_csv(&[]).expect("export");
        assert_eq!(csv.trim_end(), "name,contact,priority,served_date,served_time");
    }

    #[test]
    fn writes_one_row_per_entry_in_given_order() {
        let entries = vec![
            HistoryEntry::new(patient("B", "urgent"), at(11, 30)),
            HistoryEntry::new(patient("A", "normal"), at(11, 5)),
        ];
        let csv = history_to_csv(&entries).expect("export");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Patient B,contact-B,urgent,02/03/2026,11:30:00");
        assert!(lines[2].starts_with("Patient A,contact-A,normal,"));
    }

    #[test]
    fn quotes_fields_containing_commas() {
        let mut p = patient("Q", "normal");
        p.name = triage_types::NonEmptyText::new("Silva, Maria").expect("name");
        let csv = history_to_csv(&[HistoryEntry::new(p, at(8, 0))]).expect("export");
        assert!(csv.contains("\"Silva, Maria\""));
    }
}
