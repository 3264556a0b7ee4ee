//! Record types.
//!
//! - [`Record`] - Extracted bytes with stream offset and delimiter flag
//! - [`ReadOutcome`] - A record, or end-of-stream

mod data;
mod outcome;

pub use data::Record;
pub use outcome::ReadOutcome;
