//! Call history as an append-only stack.
//!
//! Entries are stored in call order: the oldest call at the head, the most recent at the tail.
//! Only the tail can be removed, and only to undo the latest call.

use crate::ordered_list::OrderedList;
use crate::patient::HistoryEntry;

#[derive(Debug, Default, Clone)]
pub struct HistoryStack {
    entries: OrderedList<HistoryEntry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.add_last(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.remove_last()
    }

    /// Most recent call.
    pub fn peek_top(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// The call made just before the most recent one.
    pub fn peek_second_from_top(&self) -> Option<&HistoryEntry> {
        self.entries.back_prev()
    }

    /// Most-recent-first copy, the order used for display and export.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Oldest-first iterator.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, patient};

    fn entry(id: &str, minute: u32) -> HistoryEntry {
        HistoryEntry::new(patient(id, "normal"), at(10, minute))
    }

    fn ids(entries: &[HistoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.patient.national_id.as_str()).collect()
    }

    #[test]
    fn history_is_reverse_call_order() {
        let mut stack = HistoryStack::new();
        stack.push(entry("A", 1));
        stack.push(entry("B", 2));
        stack.push(entry("C", 3));

        assert_eq!(ids(&stack.history()), vec!["C", "B", "A"]);
        let oldest_first: Vec<&str> = stack
            .iter()
            .map(|e| e.patient.national_id.as_str())
            .collect();
        assert_eq!(oldest_first, vec!["A", "B", "C"]);
    }

    #[test]
    fn peeks_read_the_top_two() {
        let mut stack = HistoryStack::new();
        assert!(stack.peek_top().is_none());
        assert!(stack.peek_second_from_top().is_none());

        stack.push(entry("A", 1));
        assert_eq!(
            stack.peek_top().map(|e| e.patient.national_id.as_str()),
            Some("A")
        );
        assert!(stack.peek_second_from_top().is_none());

        stack.push(entry("B", 2));
        assert_eq!(
            stack
                .peek_second_from_top()
                .map(|e| e.patient.national_id.as_str()),
            Some("A")
        );
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn pop_removes_most_recent_only() {
        let mut stack = HistoryStack::new();
        assert!(stack.pop().is_none());
        stack.push(entry("A", 1));
        stack.push(entry("B", 2));

        let popped = stack.pop().expect("non-empty");
        assert_eq!(popped.patient.national_id.as_str(), "B");
        assert_eq!(popped.served_at, at(10, 2));
        assert_eq!(ids(&stack.history()), vec!["A"]);
    }
}
