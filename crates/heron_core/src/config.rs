//! Stream Configuration

use serde::{Deserialize, Serialize};

/// Audio stream configuration negotiated with the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Sample rate in Hz (e.g., 44100, 48000)
    pub sample_rate: u32,

    /// Number of audio channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Block size in frames the transport typically delivers
    pub block_size: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        // A2DP streams almost always arrive as 44.1 kHz stereo
        Self {
            sample_rate: 44100,
            channels: 2,
            block_size: 1024,
        }
    }
}

impl StreamConfig {
    /// Latency of one block in milliseconds
    pub fn latency_ms(&self) -> f32 {
        (self.block_size as f32 / self.sample_rate as f32) * 1000.0
    }

    /// Bytes in one block of 16-bit PCM
    pub fn bytes_per_block(&self) -> usize {
        2 * self.channels as usize * self.block_size as usize
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate < 8000 || self.sample_rate > 192_000 {
            return Err(format!("Invalid sample rate: {}", self.sample_rate));
        }
        if self.channels == 0 || self.channels > 2 {
            return Err(format!("Invalid channel count: {}", self.channels));
        }
        if self.block_size < 32 || self.block_size > 8192 {
            return Err(format!("Invalid block size: {}", self.block_size));
        }
        Ok(())
    }
}
