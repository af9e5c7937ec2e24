//! Structured logging for permcheck.
//!
//! Console output (text or JSON) plus optional daily-rotated NDJSON files.

pub mod logger;

pub use logger::{init_logger, LogOptions};
