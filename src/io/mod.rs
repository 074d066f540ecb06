//! Audio I/O modules
//!
//! Audio decoding using Symphonia, the immutable [`Signal`](signal::Signal)
//! handed to the pipeline, and JSON output of note lists.

pub mod decoder;
pub mod output;
pub mod signal;
