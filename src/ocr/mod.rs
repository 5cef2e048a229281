//! OCR text handling.
//!
//! Recognition itself happens outside this tool. This module reads the
//! recognized text and rebuilds reward records from it.

pub mod extract;
pub mod input;
pub mod record;

pub use extract::parse_lines;
pub use input::read_batch;
pub use record::Record;
