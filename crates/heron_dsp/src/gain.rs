//! Gain Laws
//!
//! Pure numeric conversions between the control-surface units (volume
//! percent, balance position, decibels) and the linear gains the processing
//! path multiplies by. No state, no allocation.

/// Maximum boost applied to any gain stage (dB)
pub const MAX_GAIN_DB: f32 = 20.0;

/// Maximum attenuation applied to any gain stage (dB)
pub const MIN_GAIN_DB: f32 = -20.0;

/// Convert decibels to linear amplitude
///
/// Formula: amplitude = 10^(dB/20)
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Clamp a gain value into the representable range [-20, +20] dB.
///
/// Stored configuration is never assumed pre-clamped: this is applied at
/// every point of consumption, immediately before conversion to linear.
#[inline]
pub fn clamp_gain_db(db: f32) -> f32 {
    db.clamp(MIN_GAIN_DB, MAX_GAIN_DB)
}

/// Map a volume percentage (0-100) onto the master gain curve.
///
/// Piecewise: the lower half is a steeper ramp so quiet settings stay
/// usable, the upper half a gentler one up to the +20 dB ceiling.
/// - 0%   -> -40 dB (near mute)
/// - 50%  ->   0 dB (unity)
/// - 100% -> +20 dB
pub fn volume_percent_to_db(percent: u8) -> f32 {
    let percent = percent.min(100) as f32;
    if percent < 50.0 {
        -40.0 + percent * 0.8
    } else {
        (percent - 50.0) * 0.4
    }
}

/// Map a balance position in [-1, 1] to per-channel attenuation in dB.
///
/// Returns `(left_atten_db, right_atten_db)` as POSITIVE dB of attenuation;
/// the consumer subtracts these from the channel gains. Shifting toward one
/// side only attenuates the opposite channel (up to 10 dB at full
/// deflection) and never boosts anything:
/// - balance  0  -> (0, 0)
/// - balance -1  -> (0, 10)   shift left, pull the right channel down
/// - balance +1  -> (10, 0)   shift right, pull the left channel down
pub fn balance_to_channel_db(balance: f32) -> (f32, f32) {
    let balance = balance.clamp(-1.0, 1.0);
    if balance < 0.0 {
        (0.0, balance * -10.0)
    } else if balance > 0.0 {
        (balance * 10.0, 0.0)
    } else {
        (0.0, 0.0)
    }
}
