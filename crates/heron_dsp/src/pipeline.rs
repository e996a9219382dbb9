//! DSP Pipeline
//!
//! The public-facing orchestrator for the processing subsystem. The
//! transport collaborator hands `process()` a raw interleaved 16-bit PCM
//! block; the pipeline copies it into its scratch workspace, runs every
//! sample pair through the equalizer bank and the gain stages, and returns
//! a processed block of identical byte length for the hardware output.
//!
//! # Real-time behavior
//!
//! `process()` performs only in-memory arithmetic on the steady-state path.
//! The scratch buffer grows when a block is larger than anything seen
//! before and never shrinks, so a stream of similar-sized blocks settles
//! into a zero-allocation loop after the first call.

use tracing::{debug, info};

use crate::config::DspConfig;
use crate::eq::EqualizerBank;
use crate::error::DspError;
use crate::gain;

/// Initial scratch capacity allocated at `init()` (bytes)
pub const DEFAULT_SCRATCH_BYTES: usize = 4096;

/// Grow-only byte workspace for block processing.
///
/// Capacity only ever increases across the pipeline's lifetime, bounding
/// reallocation frequency on a steady-state stream.
struct ScratchBuffer {
    data: Vec<u8>,
}

impl ScratchBuffer {
    /// Allocate a buffer with at least `bytes` of capacity
    fn with_capacity(bytes: usize) -> Result<Self, DspError> {
        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| DspError::OutOfMemory(bytes))?;
        Ok(Self { data })
    }

    /// Copy `input` into the workspace, growing capacity if needed.
    ///
    /// On allocation failure the previous buffer is left intact, so the
    /// pipeline stays usable (and deinitializable) and the call can be
    /// retried.
    fn load(&mut self, input: &[u8]) -> Result<(), DspError> {
        self.data.clear();
        if input.len() > self.data.capacity() {
            self.data
                .try_reserve_exact(input.len())
                .map_err(|_| DspError::OutOfMemory(input.len()))?;
            debug!(bytes = input.len(), "scratch buffer grown");
        }
        self.data.extend_from_slice(input);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.capacity()
    }
}

/// Everything the pipeline owns between `init()` and `deinit()`
struct PipelineState {
    sample_rate_hz: u32,
    bank: EqualizerBank,
    scratch: ScratchBuffer,
}

/// The audio processing subsystem: one equalizer bank, one scratch
/// workspace, driven by the configuration snapshot passed to each call.
///
/// All methods other than `init()` return [`DspError::NotInitialized`]
/// until `init()` has succeeded; `deinit()` releases the workspace and is
/// idempotent.
pub struct DspPipeline {
    state: Option<PipelineState>,
}

impl DspPipeline {
    /// Create a pipeline in the not-initialized state
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Initialize for the given sample rate.
    ///
    /// Designs the filter bank and allocates the scratch workspace at its
    /// default capacity. On failure no partial state is retained as ready.
    pub fn init(&mut self, sample_rate_hz: u32) -> Result<(), DspError> {
        if sample_rate_hz == 0 {
            return Err(DspError::InvalidSampleRate(sample_rate_hz));
        }

        let scratch = ScratchBuffer::with_capacity(DEFAULT_SCRATCH_BYTES)?;
        self.state = Some(PipelineState {
            sample_rate_hz,
            bank: EqualizerBank::new(sample_rate_hz),
            scratch,
        });

        info!(sample_rate_hz, "DSP pipeline initialized");
        Ok(())
    }

    /// Whether `init()` has succeeded and `deinit()` has not been called
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Current sample rate, if initialized
    pub fn sample_rate(&self) -> Option<u32> {
        self.state.as_ref().map(|s| s.sample_rate_hz)
    }

    /// Current scratch capacity in bytes, if initialized. Grow-only.
    pub fn scratch_capacity(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.scratch.capacity())
    }

    /// Process one PCM block.
    ///
    /// `input` is little-endian signed 16-bit PCM, interleaved stereo
    /// (even sample index = left, odd = right). The returned slice borrows
    /// the pipeline's workspace and always has the same length as `input`.
    /// A trailing odd byte is copied through unprocessed; an unmatched
    /// trailing left sample is still processed.
    ///
    /// When `config.enabled` is false the block passes through untouched.
    pub fn process(&mut self, input: &[u8], config: &DspConfig) -> Result<&[u8], DspError> {
        let state = self.state.as_mut().ok_or(DspError::NotInitialized)?;
        if input.is_empty() {
            return Err(DspError::InvalidArgument("empty input block"));
        }

        state.scratch.load(input)?;
        if !config.enabled {
            return Ok(&state.scratch.data);
        }

        // Every gain is clamped at the point of consumption; stored config
        // values are not assumed to be in range.
        let master_lin = gain::db_to_linear(gain::clamp_gain_db(config.master_gain_db));
        let bass_lin = gain::db_to_linear(gain::clamp_gain_db(config.bass_gain_db));
        let mid_lin = gain::db_to_linear(gain::clamp_gain_db(config.mid_gain_db));
        let treble_lin = gain::db_to_linear(gain::clamp_gain_db(config.treble_gain_db));
        let (left_lin, right_lin) = if config.separate_channels {
            (
                gain::db_to_linear(gain::clamp_gain_db(config.left_gain_db)),
                gain::db_to_linear(gain::clamp_gain_db(config.right_gain_db)),
            )
        } else {
            (1.0, 1.0)
        };

        // chunks_exact leaves a trailing odd byte untouched by construction
        for (i, sample) in state.scratch.data.chunks_exact_mut(2).enumerate() {
            let x = i16::from_le_bytes([sample[0], sample[1]]) as f32 / 32768.0;

            let y = if i % 2 == 0 {
                state.bank.process_left_sample(x, bass_lin, mid_lin, treble_lin) * left_lin
            } else {
                state.bank.process_right_sample(x, bass_lin, mid_lin, treble_lin) * right_lin
            };

            let y = (y * master_lin).clamp(-1.0, 1.0);
            sample.copy_from_slice(&(((y * 32767.0).round()) as i16).to_le_bytes());
        }

        Ok(&state.scratch.data)
    }

    /// Change the sample rate, redesigning the filter bank.
    ///
    /// Resets all filter history (audible but intentional discontinuity).
    pub fn set_sample_rate(&mut self, sample_rate_hz: u32) -> Result<(), DspError> {
        if sample_rate_hz == 0 {
            return Err(DspError::InvalidSampleRate(sample_rate_hz));
        }
        let state = self.state.as_mut().ok_or(DspError::NotInitialized)?;

        state.sample_rate_hz = sample_rate_hz;
        state.bank.configure(sample_rate_hz);
        info!(sample_rate_hz, "DSP sample rate changed, filters redesigned");
        Ok(())
    }

    /// Release the scratch workspace. Safe to call repeatedly.
    pub fn deinit(&mut self) {
        if self.state.take().is_some() {
            info!("DSP pipeline deinitialized");
        }
    }
}

impl Default for DspPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn init_pipeline(rate: u32) -> DspPipeline {
        let mut p = DspPipeline::new();
        p.init(rate).unwrap();
        p
    }

    /// Encode an f32 signal in [-1, 1] as interleaved stereo LE i16 bytes
    fn encode_stereo(samples: &[(f32, f32)]) -> Vec<u8> {
        let mut out = Vec::with_capacity(samples.len() * 4);
        for &(l, r) in samples {
            out.extend_from_slice(&((l * 32767.0) as i16).to_le_bytes());
            out.extend_from_slice(&((r * 32767.0) as i16).to_le_bytes());
        }
        out
    }

    fn decode_peaks(block: &[u8]) -> (f32, f32) {
        let mut peak_l = 0.0_f32;
        let mut peak_r = 0.0_f32;
        for (i, s) in block.chunks_exact(2).enumerate() {
            let v = (i16::from_le_bytes([s[0], s[1]]) as f32 / 32768.0).abs();
            if i % 2 == 0 {
                peak_l = peak_l.max(v);
            } else {
                peak_r = peak_r.max(v);
            }
        }
        (peak_l, peak_r)
    }

    fn sine_block(freq: f32, rate: u32, frames: usize) -> Vec<u8> {
        let samples: Vec<(f32, f32)> = (0..frames)
            .map(|i| {
                let x = (2.0 * PI * freq * i as f32 / rate as f32).sin() * 0.5;
                (x, x)
            })
            .collect();
        encode_stereo(&samples)
    }

    #[test]
    fn test_process_before_init_fails() {
        let mut p = DspPipeline::new();
        let err = p.process(&[0u8; 16], &DspConfig::default()).unwrap_err();
        assert!(matches!(err, DspError::NotInitialized));
    }

    #[test]
    fn test_process_after_deinit_fails() {
        let mut p = init_pipeline(44100);
        p.deinit();
        let err = p.process(&[0u8; 16], &DspConfig::default()).unwrap_err();
        assert!(matches!(err, DspError::NotInitialized));
    }

    #[test]
    fn test_deinit_idempotent() {
        let mut p = init_pipeline(44100);
        p.deinit();
        p.deinit();
        assert!(!p.is_initialized());
    }

    #[test]
    fn test_init_rejects_zero_rate() {
        let mut p = DspPipeline::new();
        assert!(matches!(p.init(0), Err(DspError::InvalidSampleRate(0))));
        assert!(!p.is_initialized());
    }

    #[test]
    fn test_empty_input_rejected() {
        let mut p = init_pipeline(44100);
        let err = p.process(&[], &DspConfig::default()).unwrap_err();
        assert!(matches!(err, DspError::InvalidArgument(_)));
    }

    #[test]
    fn test_silence_in_silence_out() {
        let mut p = init_pipeline(44100);

        // Zero input through a linear filter is zero output regardless of
        // any gain or EQ settings
        let mut config = DspConfig::default();
        config.master_gain_db = 20.0;
        config.set_band_gains(10.0, -5.0, 10.0);
        config.set_balance(-1.0);

        let silence = vec![0u8; 1024];
        let out = p.process(&silence, &config).unwrap();
        assert_eq!(out.len(), 1024);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_output_length_equals_input_length() {
        let mut p = init_pipeline(44100);
        let config = DspConfig::default();
        for len in [2usize, 3, 4, 7, 64, 1024, 4097] {
            let block = vec![0u8; len];
            let out = p.process(&block, &config).unwrap();
            assert_eq!(out.len(), len);
        }
    }

    #[test]
    fn test_odd_trailing_byte_untouched() {
        let mut p = init_pipeline(44100);
        let config = DspConfig::default();

        let mut block = vec![0u8; 9];
        block[8] = 0xA5;
        let out = p.process(&block, &config).unwrap();
        assert_eq!(out[8], 0xA5);
    }

    #[test]
    fn test_bypass_passes_block_through() {
        let mut p = init_pipeline(44100);

        let mut config = DspConfig::default();
        config.enabled = false;
        config.master_gain_db = 20.0; // must have no effect while bypassed

        let block = sine_block(1000.0, 44100, 256);
        let out = p.process(&block, &config).unwrap();
        assert_eq!(out, &block[..]);
    }

    #[test]
    fn test_scratch_capacity_grow_only() {
        let mut p = init_pipeline(44100);
        let config = DspConfig::default();

        assert!(p.scratch_capacity().unwrap() >= DEFAULT_SCRATCH_BYTES);

        p.process(&vec![0u8; 8192], &config).unwrap();
        let grown = p.scratch_capacity().unwrap();
        assert!(grown >= 8192);

        // A smaller block must not shrink the workspace
        p.process(&vec![0u8; 128], &config).unwrap();
        assert_eq!(p.scratch_capacity().unwrap(), grown);

        p.process(&vec![0u8; 8192], &config).unwrap();
        assert_eq!(p.scratch_capacity().unwrap(), grown);
    }

    #[test]
    fn test_master_attenuation_scales_output() {
        let rate = 44100;
        let block = sine_block(1000.0, rate, 22050);

        let run = |master_db: f32| -> f32 {
            let mut p = init_pipeline(rate);
            let mut config = DspConfig::default();
            config.master_gain_db = master_db;
            let out = p.process(&block, &config).unwrap();
            // Skip the filter transient at the head of the block
            decode_peaks(&out[8820 * 4..]).0
        };

        let unity = run(0.0);
        let attenuated = run(-20.0);
        let ratio = attenuated / unity;
        // -20 dB is a factor of 10
        assert!((ratio - 0.1).abs() < 0.01, "ratio {}", ratio);
    }

    #[test]
    fn test_master_gain_clamped_at_consumption() {
        let rate = 44100;
        let block = sine_block(1000.0, rate, 22050);

        let run = |master_db: f32| -> f32 {
            let mut p = init_pipeline(rate);
            let mut config = DspConfig::default();
            config.master_gain_db = master_db;
            let out = p.process(&block, &config).unwrap();
            decode_peaks(&out[8820 * 4..]).0
        };

        // Values beyond -20 dB clamp to it, so the output is identical
        let at_bound = run(-20.0);
        let beyond = run(-60.0);
        assert!((at_bound - beyond).abs() < 1e-4);
    }

    #[test]
    fn test_balance_attenuates_one_channel() {
        let rate = 44100;
        let block = sine_block(1000.0, rate, 22050);

        let mut p = init_pipeline(rate);
        let mut config = DspConfig::default();
        config.set_balance(1.0); // full right: left pulled down 10 dB

        let out = p.process(&block, &config).unwrap();
        let (peak_l, peak_r) = decode_peaks(&out[8820 * 4..]);

        let ratio = peak_l / peak_r;
        let expected = 10.0_f32.powf(-10.0 / 20.0); // ~0.316
        assert!(
            (ratio - expected).abs() < 0.02,
            "left/right ratio {} vs expected {}",
            ratio,
            expected
        );
    }

    #[test]
    fn test_per_channel_gain_ignored_when_disabled() {
        let rate = 44100;
        let block = sine_block(1000.0, rate, 4096);

        let mut p = init_pipeline(rate);
        let mut config = DspConfig::default();
        config.left_gain_db = -20.0;
        config.right_gain_db = -20.0;
        config.separate_channels = false;

        let out_with_flag_off = p.process(&block, &config).unwrap().to_vec();

        let mut p2 = init_pipeline(rate);
        let out_default = p2.process(&block, &DspConfig::default()).unwrap();

        assert_eq!(out_with_flag_off, out_default);
    }

    #[test]
    fn test_unmatched_trailing_left_sample_processed() {
        let mut p = init_pipeline(44100);
        let mut config = DspConfig::default();
        config.master_gain_db = -20.0;

        // Three samples: L R L. The final left sample has no partner but
        // must still be gain-staged.
        let mut block = Vec::new();
        for _ in 0..3 {
            block.extend_from_slice(&16384_i16.to_le_bytes());
        }

        let out = p.process(&block, &config).unwrap();
        let last = i16::from_le_bytes([out[4], out[5]]);
        assert!(
            (last.unsigned_abs() as usize) < 16384 / 4,
            "trailing left sample should be attenuated, got {}",
            last
        );
    }

    #[test]
    fn test_set_sample_rate_requires_init() {
        let mut p = DspPipeline::new();
        assert!(matches!(
            p.set_sample_rate(48000),
            Err(DspError::NotInitialized)
        ));
    }

    #[test]
    fn test_set_sample_rate_rejects_zero() {
        let mut p = init_pipeline(44100);
        assert!(matches!(
            p.set_sample_rate(0),
            Err(DspError::InvalidSampleRate(0))
        ));
        // Prior rate is retained
        assert_eq!(p.sample_rate(), Some(44100));
    }

    #[test]
    fn test_set_sample_rate_updates_rate() {
        let mut p = init_pipeline(44100);
        p.set_sample_rate(48000).unwrap();
        assert_eq!(p.sample_rate(), Some(48000));

        // Still processes cleanly after the redesign
        let out = p.process(&vec![0u8; 256], &DspConfig::default()).unwrap();
        assert!(out.iter().all(|&b| b == 0));
    }
}
