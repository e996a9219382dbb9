//! Engine Error Types

use thiserror::Error;

/// Errors that can occur in the audio engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("DSP error: {0}")]
    Dsp(#[from] heron_dsp::DspError),

    #[error("stream configuration error: {0}")]
    Config(String),

    #[error("hardware output error: {0}")]
    Output(String),

    #[error("unknown EQ preset index: {0}")]
    UnknownPreset(usize),

    #[error("channel disconnected - peer dropped")]
    ChannelDisconnected,

    #[error("engine has been shut down")]
    ShutDown,
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
