//! Message Types for Thread Communication
//!
//! Commands flow from control contexts (shell, remote control) -> Engine
//! Events flow from Engine -> whoever is listening (indicators, shell)

use serde::{Deserialize, Serialize};

use heron_dsp::DspConfig;

/// Commands sent from control contexts to the audio engine
#[derive(Debug, Clone)]
pub enum Command {
    /// Set master volume as a percentage (0-100)
    SetVolume(u8),

    /// Select a built-in EQ preset by index into [`heron_dsp::PRESETS`]
    SetEqPreset(usize),

    /// Advance to the next built-in EQ preset (wraps around)
    NextEqPreset,

    /// Set the three band gains directly (dB)
    SetEqGains { bass_db: f32, mid_db: f32, treble_db: f32 },

    /// Set channel balance (-1.0 = full left, 0.0 = centered, 1.0 = full right)
    SetBalance(f32),

    /// Enable or bypass the DSP path
    SetDspEnabled(bool),

    /// Toggle the DSP path on/off
    ToggleDsp,

    /// Restore the default configuration
    ResetDsp,

    /// The transport renegotiated its sample rate
    SetSampleRate(u32),

    /// Shut the engine down; subsequent blocks are dropped
    Shutdown,
}

/// Events emitted by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    /// Configuration changed; carries the full new state
    ConfigChanged(DspConfig),

    /// A preset was applied
    PresetChanged { index: usize, name: String },

    /// Sample rate changed (pipeline and hardware output updated together)
    SampleRateChanged(u32),

    /// Engine shut down
    ShutDown,

    /// Error occurred
    Error { message: String },
}

impl Event {
    /// Create an error event from any error type
    pub fn error<E: std::fmt::Display>(err: E) -> Self {
        Event::Error {
            message: err.to_string(),
        }
    }
}
