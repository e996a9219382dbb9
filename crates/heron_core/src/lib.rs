//! Heron Core - Audio Engine
//!
//! This crate wires the DSP pipeline into the surrounding system:
//! - `AudioEngine`, the composition root owning pipeline, config and output
//! - Command/event message types for the control surface
//! - The hardware-output collaborator trait
//! - Stream configuration negotiated with the transport
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Control context (shell / remote commands)           │
//! │    Controller ──Command──▶                           │
//! └──────────────────────────│───────────────────────────┘
//!                            ▼ crossbeam-channel
//! ┌──────────────────────────────────────────────────────┐
//! │  Audio-delivery context (transport callback)         │
//! │    on_block ─▶ DspPipeline ─▶ AudioOutput            │
//! │        (one config snapshot per block)               │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod engine;
mod error;
mod message;
mod output;

pub use config::StreamConfig;
pub use engine::{AudioEngine, Controller};
pub use error::{EngineError, EngineResult};
pub use message::{Command, Event};
pub use output::{AudioOutput, CaptureOutput};

// Re-export DSP types for convenience
pub use heron_dsp::{DspConfig, DspError, DspPipeline, EqPreset, SharedConfig, PRESETS};
