//! Record reading engine.
//!
//! - [`LineReader`] - Descriptor registry with `read_record()`/`read_line()`/`release()`
//! - [`Records`] - Iterator over the records of one descriptor

mod engine;
mod iter;

pub use engine::{BufferStats, LineReader};
pub use iter::Records;
