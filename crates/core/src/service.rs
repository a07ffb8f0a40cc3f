//! Queue service: the waiting queue, the call history and the session slots.
//!
//! The service owns all triage state. It is not internally synchronised; callers that share it
//! between tasks must serialise access (the REST layer keeps it behind a mutex).

use crate::clock::{Clock, SystemClock};
use crate::history::HistoryStack;
use crate::patient::{HistoryEntry, NewPatient, Patient};
use crate::priority_queue::PriorityQueue;
use crate::{TriageError, TriageResult};
use std::sync::Arc;
use triage_types::IdentityKey;

/// Totals and the patient currently being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStatus {
    pub current: Option<Patient>,
    pub queue_total: usize,
    pub history_total: usize,
}

pub struct QueueService {
    queue: PriorityQueue,
    history: HistoryStack,
    current: Option<Patient>,
    previous: Option<Patient>,
    clock: Arc<dyn Clock>,
}

impl QueueService {
    /// Creates an empty service reading timestamps from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            queue: PriorityQueue::new(),
            history: HistoryStack::new(),
            current: None,
            previous: None,
            clock,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Validates an intake form and enqueues the resulting patient.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the form fails validation or the identity key is
    /// already waiting in the queue.
    pub fn register(&mut self, form: NewPatient) -> TriageResult<Patient> {
        let patient = form.into_patient(self.clock.as_ref())?;
        self.enqueue(patient.clone())?;
        Ok(patient)
    }

    /// Adds a patient to the waiting queue at its priority position.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the priority label is blank, or a patient with the
    /// same identity key is already waiting or sits in the current or previous slot. Nothing is
    /// mutated on error.
    pub fn enqueue(&mut self, patient: Patient) -> TriageResult<()> {
        if self.queue.contains_key(&patient.national_id) {
            return Err(TriageError::InvalidInput(format!(
                "patient {} is already waiting",
                patient.national_id
            )));
        }
        if self.in_session(&patient.national_id) {
            return Err(TriageError::InvalidInput(format!(
                "patient {} was just called",
                patient.national_id
            )));
        }

        let key = patient.national_id.clone();
        let priority = patient.priority();
        self.queue.enqueue(patient)?;
        tracing::info!(national_id = %key, %priority, "patient enqueued");
        Ok(())
    }

    /// Calls the highest-priority waiting patient into service.
    ///
    /// The called patient becomes *current*, the old *current* becomes *previous*, and the call
    /// is logged to history with the clock's time.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::EmptyQueue` if nobody is waiting. Nothing is mutated on error.
    pub fn call_next(&mut self) -> TriageResult<Patient> {
        let next = self.queue.dequeue().ok_or(TriageError::EmptyQueue)?;
        let served_at = self.clock.now();

        self.history.push(HistoryEntry::new(next.clone(), served_at));
        self.previous = self.current.replace(next.clone());

        tracing::info!(national_id = %next.national_id, "patient called");
        Ok(next)
    }

    /// Reverts the most recent call.
    ///
    /// The current patient goes back to the front of the queue, ahead of any higher-ranked
    /// patients, and its history entry is dropped. *Current* becomes the old *previous*, and
    /// *previous* is recomputed from the call before the new top of history.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::NoPreviousCall` if neither slot is set. Nothing is mutated on error.
    pub fn undo_last_call(&mut self) -> TriageResult<()> {
        if self.current.is_none() && self.previous.is_none() {
            return Err(TriageError::NoPreviousCall);
        }

        if let Some(current) = self.current.take() {
            let undone = self.history.pop();
            if undone.as_ref().map(|e| &e.patient) != Some(&current) {
                tracing::warn!(
                    national_id = %current.national_id,
                    "history top did not match the current patient"
                );
            }
            if self.queue.remove_by_key(&current.national_id).is_some() {
                tracing::warn!(
                    national_id = %current.national_id,
                    "dropped a later registration of the undone patient"
                );
            }
            tracing::info!(national_id = %current.national_id, "call undone");
            self.queue.push_front(current);
        }

        self.current = self.previous.take();
        self.previous = if self.history.len() < 2 {
            None
        } else {
            self.history
                .peek_second_from_top()
                .map(|entry| entry.patient.clone())
        };

        Ok(())
    }

    fn in_session(&self, key: &IdentityKey) -> bool {
        [self.current.as_ref(), self.previous.as_ref()]
            .into_iter()
            .flatten()
            .any(|p| &p.national_id == key)
    }

    /// Removes a waiting patient. Returns whether anyone was removed; absent keys are a no-op.
    pub fn remove_patient(&mut self, key: &IdentityKey) -> bool {
        match self.queue.remove_by_key(key) {
            Some(_) => {
                tracing::info!(national_id = %key, "patient removed from queue");
                true
            }
            None => {
                tracing::debug!(national_id = %key, "remove requested for absent patient");
                false
            }
        }
    }

    /// Clears queue, history and both session slots in place.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.history.clear();
        self.current = None;
        self.previous = None;
        tracing::info!("queue and history reset");
    }

    pub fn current_patient(&self) -> Option<&Patient> {
        self.current.as_ref()
    }

    pub fn previous_patient(&self) -> Option<&Patient> {
        self.previous.as_ref()
    }

    /// Waiting patients, head to tail.
    pub fn queue_snapshot(&self) -> Vec<Patient> {
        self.queue.snapshot()
    }

    /// Calls made, most recent first.
    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.history.history()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            current: self.current.clone(),
            queue_total: self.queue.len(),
            history_total: self.history.len(),
        }
    }
}

impl Default for QueueService {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl std::fmt::Debug for QueueService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueService")
            .field("queue", &self.queue)
            .field("history", &self.history)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}
