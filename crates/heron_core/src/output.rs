//! Hardware Output Boundary
//!
//! The actual converter driver (I2S, DAC clocking, register programming)
//! lives outside this repo. The engine only needs a narrow seam: accept a
//! processed block, and track sample-rate changes so the output clock and
//! the filter designs stay consistent.

use crate::error::EngineResult;

/// Interface to the hardware output collaborator.
///
/// `write` receives processed little-endian 16-bit interleaved stereo PCM
/// and is called once per block from the audio-delivery context.
pub trait AudioOutput: Send {
    /// Queue one processed block for playback
    fn write(&mut self, block: &[u8]) -> EngineResult<()>;

    /// Reclock the output path for a new sample rate
    fn set_sample_rate(&mut self, sample_rate_hz: u32) -> EngineResult<()>;
}

/// In-memory output used by tests and by hosts that pull blocks themselves
#[derive(Debug, Default)]
pub struct CaptureOutput {
    pub blocks: Vec<Vec<u8>>,
    pub sample_rate_hz: Option<u32>,
}

impl AudioOutput for CaptureOutput {
    fn write(&mut self, block: &[u8]) -> EngineResult<()> {
        self.blocks.push(block.to_vec());
        Ok(())
    }

    fn set_sample_rate(&mut self, sample_rate_hz: u32) -> EngineResult<()> {
        self.sample_rate_hz = Some(sample_rate_hz);
        Ok(())
    }
}
