//! Test doubles for the playback controller
//!
//! Compiled into the library so integration tests and downstream shells can
//! drive the controller without a real video backend.

pub mod backend;
pub mod fixtures;

pub use backend::{BackendCall, BackendProbe, RecordingBackend, RecordingFactory};
