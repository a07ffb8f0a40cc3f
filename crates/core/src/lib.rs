//! # Triage Core
//!
//! Core business logic for the triage patient queue.
//!
//! This crate contains the in-memory data structures and the service that drives them:
//! - [`ordered_list::OrderedList`]: generic doubly-linked sequence
//! - [`priority_queue::PriorityQueue`]: waiting queue ordered by priority rank, FIFO within a rank
//! - [`history::HistoryStack`]: call log with undo of the most recent call
//! - [`service::QueueService`]: call-next / undo orchestration with *current* and *previous* slots
//! - [`export`] and [`stats`]: read-only views over the call history
//!
//! **No API concerns**: HTTP servers, request shapes and authentication belong in `api-rest` and
//! `api-shared`.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod history;
pub mod ordered_list;
pub mod patient;
pub mod priority;
pub mod priority_queue;
pub mod service;
pub mod stats;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use constants::DEFAULT_REST_ADDR;
pub use error::{TriageError, TriageResult};
pub use patient::{HistoryEntry, NewPatient, Patient};
pub use priority::Priority;
pub use service::{QueueService, QueueStatus};
pub use stats::HistoryStats;
pub use triage_types::{IdentityKey, NonEmptyText, TextError};
