//! Audio preprocessing modules
//!
//! This module contains utilities for preparing decoded audio for analysis:
//! - Channel mixing (multichannel to mono)
//! - Sample-rate conversion (for an explicit sample-rate override)

pub mod channel_mixer;
pub mod resample;
