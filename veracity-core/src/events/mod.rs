//! Event system for the embedding scoring job.
//!
//! Synchronous, in-process only. The engine itself never performs I/O; a
//! handler that wants to persist or forward events does so on its own
//! responsibility.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::QualityEventHandler;
pub use types::*;
