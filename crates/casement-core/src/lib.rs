//! Casement core - scheduling and event plumbing for the Casement GUI toolkit.
//!
//! This crate holds the pieces of Casement that know nothing about controls
//! or pixels: the single-threaded tick scheduler that backs cursor blink,
//! hover-delay timers, and tween animations; the input event queue that
//! serializes host events onto the one GUI thread; and the shared logging
//! and error types.
//!
//! # Threading Model
//!
//! Casement runs one GUI root per thread. Nothing in this crate spawns
//! threads: the scheduler is polled once per tick by the owner, and the
//! queue exists so that *other* threads (a windowing callback, a worker)
//! can hand events to the GUI thread without touching the control tree.

pub mod error;
pub mod logging;
pub mod queue;
pub mod scheduler;

pub use error::{CoreError, CoreResult, SchedulerError};
pub use queue::{EventQueue, QueueSender};
pub use scheduler::{ScheduleKind, TaskId, TickScheduler};
