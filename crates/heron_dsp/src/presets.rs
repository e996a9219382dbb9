//! Built-in EQ Presets

/// Named EQ preset with band gains in dB
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqPreset {
    pub name: &'static str,
    pub bass_db: f32,
    pub mid_db: f32,
    pub treble_db: f32,
}

/// List of built-in presets
pub const PRESETS: &[EqPreset] = &[
    EqPreset { name: "Flat", bass_db: 0.0, mid_db: 0.0, treble_db: 0.0 },
    EqPreset { name: "Bass Boost", bass_db: 10.0, mid_db: 0.0, treble_db: -2.0 },
    EqPreset { name: "Mid Boost", bass_db: -2.0, mid_db: 8.0, treble_db: -2.0 },
    EqPreset { name: "Treble Boost", bass_db: -2.0, mid_db: 0.0, treble_db: 10.0 },
    EqPreset { name: "Vocal", bass_db: -3.0, mid_db: 6.0, treble_db: 3.0 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_preset_is_flat() {
        let flat = &PRESETS[0];
        assert_eq!(flat.name, "Flat");
        assert_eq!((flat.bass_db, flat.mid_db, flat.treble_db), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_preset_gains_within_clamp_range() {
        use crate::gain::{MAX_GAIN_DB, MIN_GAIN_DB};
        for preset in PRESETS {
            for db in [preset.bass_db, preset.mid_db, preset.treble_db] {
                assert!(db >= MIN_GAIN_DB && db <= MAX_GAIN_DB, "{}", preset.name);
            }
        }
    }
}
