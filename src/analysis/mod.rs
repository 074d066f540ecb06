//! Result types and candidate selection
//!
//! - Pitch candidates, warnings and metadata
//! - Loudness ranking, truncation and pitch ordering

pub mod result;
pub mod selection;
