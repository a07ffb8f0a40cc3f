//! Waiting queue ordered by priority rank.
//!
//! Entries are kept in non-increasing rank order from head to tail. Within a rank band,
//! arrival order is preserved: a new entry always goes after every existing entry whose rank is
//! greater than or equal to its own.

use crate::ordered_list::OrderedList;
use crate::patient::Patient;
use crate::{TriageError, TriageResult};
use triage_types::IdentityKey;

#[derive(Debug, Default, Clone)]
pub struct PriorityQueue {
    entries: OrderedList<Patient>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a patient at its rank-ordered position.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the patient's priority label is blank. The queue is
    /// left untouched.
    pub fn enqueue(&mut self, patient: Patient) -> TriageResult<()> {
        if !patient.has_priority_label() {
            return Err(TriageError::InvalidInput(
                "patient must have a priority label".into(),
            ));
        }

        let rank = patient.rank();
        let tail_rank = self.entries.back().map(Patient::rank);
        let head_rank = self.entries.front().map(Patient::rank);

        match (head_rank, tail_rank) {
            (None, _) | (_, None) => self.entries.add_last(patient),
            (_, Some(tail)) if rank <= tail => self.entries.add_last(patient),
            (Some(head), _) if rank > head => self.entries.add_first(patient),
            _ => self
                .entries
                .insert_before_first(|queued| queued.rank() < rank, patient),
        }

        Ok(())
    }

    /// Removes and returns the patient at the head.
    pub fn dequeue(&mut self) -> Option<Patient> {
        self.entries.remove_first()
    }

    pub fn front(&self) -> Option<&Patient> {
        self.entries.front()
    }

    /// Puts a patient back at the head without consulting its rank.
    ///
    /// Only used to reverse a call, so the same patient is the next one called.
    pub(crate) fn push_front(&mut self, patient: Patient) {
        self.entries.add_first(patient);
    }

    /// Removes a waiting patient by identity key.
    pub fn remove_by_key(&mut self, key: &IdentityKey) -> Option<Patient> {
        self.entries.remove_by(|p| &p.national_id == key)
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.entries.iter().any(|p| &p.national_id == key)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Patient> + '_ {
        self.entries.iter()
    }

    /// Head-to-tail copy of the queue.
    pub fn snapshot(&self) -> Vec<Patient> {
        self.entries.to_vec()
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
    use crate::test_support::patient;

    fn ids(queue: &PriorityQueue) -> Vec<String> {
        queue.iter().map(|p| p.national_id.to_string()).collect()
    }

    #[test]
    fn orders_by_priority_band() {
        let mut queue = PriorityQueue::new();
        queue.enqueue(patient("A", "normal")).expect("enqueue");
        queue.enqueue(patient("B", "emergency")).expect("enqueue");
        queue.enqueue(patient("C", "urgent")).expect("enqueue");
        assert_eq!(ids(&queue), vec!["B", "C", "A"]);
    }

    #[test]
    fn preserves_arrival_order_within_a_band() {
        let mut queue = PriorityQueue::new();
        for (id, label) in [
            ("N1", "normal"),
            ("U1", "urgent"),
            ("E1", "emergency"),
            ("U2", "urgent"),
            ("N2", "normal"),
            ("E2", "emergency"),
            ("U3", "urgent"),
        ] {
            queue.enqueue(patient(id, label)).expect("enqueue");
        }
        assert_eq!(ids(&queue), vec!["E1", "E2", "U1", "U2", "U3", "N1", "N2"]);
    }

    #[test]
    fn stays_sorted_for_every_prefix() {
        let labels = [
            "urgent", "normal", "emergency", "normal", "urgent", "urgent", "emergency", "normal",
            "bogus", "emergency", "urgent",
        ];
        let mut queue = PriorityQueue::new();
        for (i, label) in labels.iter().enumerate() {
            queue
                .enqueue(patient(&format!("P{i}"), label))
                .expect("enqueue");

            let snapshot = queue.snapshot();
            for pair in snapshot.windows(2) {
                assert!(pair[0].rank() >= pair[1].rank(), "queue out of order");
                if pair[0].rank() == pair[1].rank() {
                    assert!(
                        pair[0].registered_at <= pair[1].registered_at,
                        "FIFO broken within a band"
                    );
                }
            }
        }
        assert_eq!(queue.len(), labels.len());
    }

    #[test]
    fn unknown_label_ranks_as_normal() {
        let mut queue = PriorityQueue::new();
        queue.enqueue(patient("N", "normal")).expect("enqueue");
        queue.enqueue(patient("X", "whatever")).expect("enqueue");
        queue.enqueue(patient("U", "urgent")).expect("enqueue");
        assert_eq!(ids(&queue), vec!["U", "N", "X"]);
    }

    #[test]
    fn rejects_blank_priority_without_mutation() {
        let mut queue = PriorityQueue::new();
        queue.enqueue(patient("A", "urgent")).expect("enqueue");
        let err = queue
            .enqueue(patient("B", "  "))
            .expect_err("blank label rejected");
        assert!(matches!(err, TriageError::InvalidInput(_)));
        assert_eq!(ids(&queue), vec!["A"]);
    }

    #[test]
    fn dequeue_takes_head_and_empty_queue_yields_none() {
        let mut queue = PriorityQueue::new();
        assert!(queue.dequeue().is_none());
        queue.enqueue(patient("A", "normal")).expect("enqueue");
        queue.enqueue(patient("B", "urgent")).expect("enqueue");
        assert_eq!(queue.front().map(|p| p.national_id.as_str()), Some("B"));
        assert_eq!(
            queue.dequeue().map(|p| p.national_id.to_string()),
            Some("B".to_string())
        );
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn remove_by_key_handles_present_and_absent_keys() {
        let mut queue = PriorityQueue::new();
        queue.enqueue(patient("A", "normal")).expect("enqueue");
        queue.enqueue(patient("B", "normal")).expect("enqueue");
        queue.enqueue(patient("C", "normal")).expect("enqueue");

        let key = IdentityKey::parse("B").expect("key");
        assert!(queue.contains_key(&key));
        assert!(queue.remove_by_key(&key).is_some());
        assert!(!queue.contains_key(&key));
        assert!(queue.remove_by_key(&key).is_none());
        assert_eq!(ids(&queue), vec!["A", "C"]);
    }

    #[test]
    fn push_front_ignores_rank() {
        let mut queue = PriorityQueue::new();
        queue.enqueue(patient("E", "emergency")).expect("enqueue");
        queue.push_front(patient("N", "normal"));
        assert_eq!(ids(&queue), vec!["N", "E"]);
    }
}
