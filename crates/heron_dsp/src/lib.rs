//! Heron DSP - Digital Signal Processing Module
//!
//! This crate provides the audio processing pipeline for Heron, including:
//! - 3-band equalizer (bass/mid/treble) built from RBJ BiQuad filters
//! - Master, per-band and per-channel gain staging with hard clamps
//! - Volume-percent and balance control laws
//! - Grow-only scratch workspace for allocation-free steady-state blocks
//! - Snapshot-based shared configuration for cross-thread consistency
//!
//! # Architecture
//!
//! `DspPipeline` is the only entry point the surrounding system calls: the
//! transport delivers raw PCM blocks to `process()`, the control surface
//! mutates a `SharedConfig`, and each block is processed against one
//! consistent configuration snapshot.

mod biquad;
mod config;
mod eq;
mod error;
mod gain;
mod pipeline;
mod presets;

pub use biquad::{Biquad, FilterKind};
pub use config::{DspConfig, SharedConfig};
pub use eq::{EqualizerBank, BASS_CUTOFF_HZ, MID_CENTER_HZ, TREBLE_CUTOFF_HZ};
pub use error::DspError;
pub use gain::{
    balance_to_channel_db, clamp_gain_db, db_to_linear, volume_percent_to_db, MAX_GAIN_DB,
    MIN_GAIN_DB,
};
pub use pipeline::{DspPipeline, DEFAULT_SCRATCH_BYTES};
pub use presets::{EqPreset, PRESETS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_exports() {
        // Verify all public types are accessible
        let _config = DspConfig::default();
        let _pipeline = DspPipeline::new();
        let _bank = EqualizerBank::new(48000);
    }
}
