//! DSP Error Types

use thiserror::Error;

/// Errors that can occur during DSP operations
#[derive(Error, Debug)]
pub enum DspError {
    #[error("pipeline not initialized")]
    NotInitialized,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    #[error("out of memory: failed to reserve {0} bytes for the scratch buffer")]
    OutOfMemory(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DspError::InvalidSampleRate(0);
        assert!(err.to_string().contains('0'));

        let err = DspError::OutOfMemory(4096);
        assert!(err.to_string().contains("4096"));
    }
}
