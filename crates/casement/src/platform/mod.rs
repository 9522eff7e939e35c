//! Host platform glue.
//!
//! Conversion from winit input events into Casement's raw events, plus the
//! clipboard primitive. Nothing in the core depends on this module; a host
//! with its own event source can construct
//! [`RawPointerEvent`](crate::RawPointerEvent)s directly.

pub mod clipboard;
pub mod winit;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use winit::PointerTracker;
