//! DSP Configuration
//!
//! `DspConfig` is the block of knobs the control surface mutates and the
//! processing path reads. Gain fields are stored as the caller set them and
//! are clamped at the point of consumption, so values outside [-20, +20] dB
//! may transiently live here.
//!
//! The control context and the audio-delivery context run concurrently, so
//! the shared instance lives behind [`SharedConfig`]: writers mutate under
//! the lock, the processing path clones one consistent snapshot per block
//! and never observes a half-applied update.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::gain;
use crate::presets::EqPreset;

/// Equalizer and gain-staging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DspConfig {
    /// Whether the DSP path is active; when false, blocks pass through
    /// untouched
    pub enabled: bool,

    /// Master gain (dB)
    pub master_gain_db: f32,

    /// Bass band gain (dB), weight for content below ~250 Hz
    pub bass_gain_db: f32,

    /// Mid band gain (dB), weight for content around 1 kHz
    pub mid_gain_db: f32,

    /// Treble band gain (dB), weight for content above ~4 kHz
    pub treble_gain_db: f32,

    /// Apply `left_gain_db`/`right_gain_db` independently per channel
    pub separate_channels: bool,

    /// Left channel gain (dB), only used when `separate_channels` is set
    pub left_gain_db: f32,

    /// Right channel gain (dB), only used when `separate_channels` is set
    pub right_gain_db: f32,
}

impl Default for DspConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            master_gain_db: 0.0,
            bass_gain_db: 0.0,
            mid_gain_db: 0.0,
            treble_gain_db: 0.0,
            separate_channels: false,
            left_gain_db: 0.0,
            right_gain_db: 0.0,
        }
    }
}

impl DspConfig {
    /// Set the master gain from a volume percentage (0-100)
    pub fn set_volume_percent(&mut self, percent: u8) {
        self.master_gain_db = gain::volume_percent_to_db(percent);
    }

    /// Set the three band gains at once (dB)
    pub fn set_band_gains(&mut self, bass_db: f32, mid_db: f32, treble_db: f32) {
        self.bass_gain_db = bass_db;
        self.mid_gain_db = mid_db;
        self.treble_gain_db = treble_db;
    }

    /// Set the channel balance (-1.0 = full left, 0.0 = centered,
    /// 1.0 = full right).
    ///
    /// The balance law returns positive attenuation per channel; it is
    /// stored negated as per-channel gain and enables independent channel
    /// gains.
    pub fn set_balance(&mut self, balance: f32) {
        let (left_atten_db, right_atten_db) = gain::balance_to_channel_db(balance);
        self.separate_channels = true;
        self.left_gain_db = -left_atten_db;
        self.right_gain_db = -right_atten_db;
    }

    /// Apply an EQ preset's band gains
    pub fn apply_preset(&mut self, preset: &EqPreset) {
        self.set_band_gains(preset.bass_db, preset.mid_db, preset.treble_db);
    }
}

/// Thread-safe handle to a shared [`DspConfig`].
///
/// Clones are cheap and refer to the same instance. The audio-delivery
/// context takes one `snapshot()` per block; configuration-change contexts
/// go through `update()`.
#[derive(Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<DspConfig>>,
}

impl SharedConfig {
    pub fn new(config: DspConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Clone a consistent snapshot of the current configuration
    pub fn snapshot(&self) -> DspConfig {
        self.inner.read().clone()
    }

    /// Mutate the configuration under the write lock
    pub fn update<F: FnOnce(&mut DspConfig)>(&self, f: F) {
        f(&mut self.inner.write());
    }
}
