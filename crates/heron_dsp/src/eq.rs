//! 3-Band Equalizer Bank
//!
//! Six BiQuad filters (3 bands x 2 channels) implementing additive-band
//! equalization: every band filter sees the raw input sample, the weighted
//! band outputs are summed per channel. This is NOT a crossover - the three
//! responses overlap and do not sum exactly to unity, so the flat 0 dB
//! preset is only an approximation of pass-through (tests bound the
//! deviation, they do not assert equality).

use crate::biquad::{Biquad, FilterKind};

/// Bass band: low-pass cutoff (Hz)
pub const BASS_CUTOFF_HZ: f32 = 250.0;

/// Mid band: band-pass center (Hz)
pub const MID_CENTER_HZ: f32 = 1000.0;

/// Treble band: high-pass cutoff (Hz)
pub const TREBLE_CUTOFF_HZ: f32 = 4000.0;

/// Butterworth Q for the bass/treble edges
const EDGE_Q: f32 = 0.707;

/// Q for the mid band-pass
const MID_Q: f32 = 1.0;

/// Three band filters for one channel
#[derive(Debug, Clone, Copy)]
struct ChannelBank {
    bass: Biquad,
    mid: Biquad,
    treble: Biquad,
}

impl ChannelBank {
    fn new(sample_rate_hz: u32) -> Self {
        Self {
            bass: Biquad::new(FilterKind::Lowpass, BASS_CUTOFF_HZ, EDGE_Q, 0.0, sample_rate_hz),
            mid: Biquad::new(FilterKind::Bandpass, MID_CENTER_HZ, MID_Q, 0.0, sample_rate_hz),
            treble: Biquad::new(
                FilterKind::Highpass,
                TREBLE_CUTOFF_HZ,
                EDGE_Q,
                0.0,
                sample_rate_hz,
            ),
        }
    }

    fn configure(&mut self, sample_rate_hz: u32) {
        self.bass
            .design(FilterKind::Lowpass, BASS_CUTOFF_HZ, EDGE_Q, 0.0, sample_rate_hz);
        self.mid
            .design(FilterKind::Bandpass, MID_CENTER_HZ, MID_Q, 0.0, sample_rate_hz);
        self.treble
            .design(FilterKind::Highpass, TREBLE_CUTOFF_HZ, EDGE_Q, 0.0, sample_rate_hz);
    }

    /// Run the three band filters on the same raw input (not cascaded) and
    /// sum the weighted outputs.
    #[inline]
    fn process(&mut self, x: f32, bass_lin: f32, mid_lin: f32, treble_lin: f32) -> f32 {
        self.bass.process_sample(x) * bass_lin
            + self.mid.process_sample(x) * mid_lin
            + self.treble.process_sample(x) * treble_lin
    }
}

/// The stereo equalizer bank
///
/// Holds the filter state for both channels and the sample rate the filters
/// were last designed for. Designed for real-time use: no allocations in
/// `process_stereo_sample()`.
pub struct EqualizerBank {
    left: ChannelBank,
    right: ChannelBank,
    sample_rate_hz: u32,
}

impl EqualizerBank {
    /// Create a bank designed for the given sample rate
    pub fn new(sample_rate_hz: u32) -> Self {
        Self {
            left: ChannelBank::new(sample_rate_hz),
            right: ChannelBank::new(sample_rate_hz),
            sample_rate_hz,
        }
    }

    /// Redesign all six filters for a new sample rate.
    ///
    /// Fully resets filter history - an audible but intentional
    /// discontinuity at reconfiguration points, which are rare relative to
    /// block processing.
    pub fn configure(&mut self, sample_rate_hz: u32) {
        self.left.configure(sample_rate_hz);
        self.right.configure(sample_rate_hz);
        self.sample_rate_hz = sample_rate_hz;
    }

    /// Sample rate the filters were last designed for
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Process one stereo sample pair.
    ///
    /// Band gains are linear weights applied to each band's output before
    /// summation.
    ///
    /// # Real-time Safety
    /// No allocations, no syscalls. Safe to call from the audio delivery
    /// path.
    #[inline]
    pub fn process_stereo_sample(
        &mut self,
        left_in: f32,
        right_in: f32,
        bass_lin: f32,
        mid_lin: f32,
        treble_lin: f32,
    ) -> (f32, f32) {
        (
            self.process_left_sample(left_in, bass_lin, mid_lin, treble_lin),
            self.process_right_sample(right_in, bass_lin, mid_lin, treble_lin),
        )
    }

    /// Process a single left-channel sample. A block may end on an
    /// unmatched left sample; its absent partner must not advance the
    /// right channel's filter history.
    #[inline]
    pub fn process_left_sample(
        &mut self,
        x: f32,
        bass_lin: f32,
        mid_lin: f32,
        treble_lin: f32,
    ) -> f32 {
        self.left.process(x, bass_lin, mid_lin, treble_lin)
    }

    /// Process a single right-channel sample
    #[inline]
    pub fn process_right_sample(
        &mut self,
        x: f32,
        bass_lin: f32,
        mid_lin: f32,
        treble_lin: f32,
    ) -> f32 {
        self.right.process(x, bass_lin, mid_lin, treble_lin)
    }
}
