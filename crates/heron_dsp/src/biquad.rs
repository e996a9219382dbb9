//! BiQuad Filter
//!
//! A single second-order IIR section in Direct Form 1, designed from the
//! RBJ (Robert Bristow-Johnson) Audio EQ Cookbook formulas.
//!
//! Coefficients are stored normalized (implicit `a0 = 1`) next to the four
//! history cells they were designed with. `design()` replaces coefficients
//! and clears history in the same call: feeding stale history through new
//! coefficients is worse than the brief transient of starting from zero
//! state. That click is an intentional, documented tradeoff - redesigns
//! happen at sample-rate changes, which are rare relative to block
//! processing.

use std::f32::consts::PI;

/// Response shape of a [`Biquad`] section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Bandpass,
    Highpass,
}

/// Second-order IIR filter: five normalized coefficients plus rolling
/// input/output history.
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    // Direct Form 1 delay line: x[n-1], x[n-2], y[n-1], y[n-2]
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Identity filter (passes input through unchanged, zero history)
    pub fn identity() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Create a filter designed for the given parameters
    pub fn new(kind: FilterKind, freq_hz: f32, q: f32, gain_db: f32, sample_rate_hz: u32) -> Self {
        let mut filter = Self::identity();
        filter.design(kind, freq_hz, q, gain_db, sample_rate_hz);
        filter
    }

    /// Recompute coefficients and reset history.
    ///
    /// # Contract
    /// `q` and `sample_rate_hz` must be positive (both are divisors).
    /// Violations are programming errors, not runtime conditions, so they
    /// are debug-asserted rather than returned.
    pub fn design(
        &mut self,
        kind: FilterKind,
        freq_hz: f32,
        q: f32,
        gain_db: f32,
        sample_rate_hz: u32,
    ) {
        debug_assert!(q > 0.0, "Q must be positive");
        debug_assert!(sample_rate_hz > 0, "sample rate must be positive");

        let omega = 2.0 * PI * freq_hz / sample_rate_hz as f32;
        let sn = omega.sin();
        let cs = omega.cos();
        let alpha = sn / (2.0 * q);
        let a = 10.0_f32.powf(gain_db / 40.0);

        let (b0, b1, b2) = match kind {
            FilterKind::Lowpass => ((1.0 - cs) / 2.0, 1.0 - cs, (1.0 - cs) / 2.0),
            // Constant 0 dB peak gain, scaled by A
            FilterKind::Bandpass => (alpha * a, 0.0, -alpha * a),
            FilterKind::Highpass => ((1.0 + cs) / 2.0, -(1.0 + cs), (1.0 + cs) / 2.0),
        };
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cs;
        let a2 = 1.0 - alpha;

        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;

        // History and coefficients are replaced together, never separately.
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Run one sample through the filter.
    ///
    /// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
    ///
    /// # Real-time Safety
    /// No allocations, no branches, O(1) time. Assumes finite inputs.
    #[inline]
    pub fn process_sample(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        y
    }
}
