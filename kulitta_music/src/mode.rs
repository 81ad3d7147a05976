// Modes and their scale tables.
//
// A mode fixes which pitch classes, counted in semitones above the key, make
// up the scale. Chord degrees (`alphabet.rs`) index into this table to find a
// chord root, and scale-degree modulations (`modulation.rs`) use the major and
// minor tables to move the key.
//
// Major is Ionian and Minor is Aeolian. Chromatic has all twelve pitch classes.
// Custom carries its own list of offsets.

use serde::{Deserialize, Serialize};

pub(crate) const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
pub(crate) const MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];
const DORIAN: [u8; 7] = [0, 2, 3, 5, 7, 9, 10];
const PHRYGIAN: [u8; 7] = [0, 1, 3, 5, 7, 8, 10];
const LYDIAN: [u8; 7] = [0, 2, 4, 6, 7, 9, 11];
const MIXOLYDIAN: [u8; 7] = [0, 2, 4, 5, 7, 9, 10];
const LOCRIAN: [u8; 7] = [0, 1, 3, 5, 6, 8, 10];
const CHROMATIC: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// The tonal mode of a music parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Major,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Minor,
    Locrian,
    Chromatic,
    /// Arbitrary semitone offsets from the key, lowest first.
    Custom(Vec<u8>),
}

impl Mode {
    /// Semitone offsets from the key for each scale degree.
    pub fn scale(&self) -> &[u8] {
        match self {
            Mode::Major => &MAJOR,
            Mode::Dorian => &DORIAN,
            Mode::Phrygian => &PHRYGIAN,
            Mode::Lydian => &LYDIAN,
            Mode::Mixolydian => &MIXOLYDIAN,
            Mode::Minor => &MINOR,
            Mode::Locrian => &LOCRIAN,
            Mode::Chromatic => &CHROMATIC,
            Mode::Custom(offsets) => offsets.as_slice(),
        }
    }

    /// The 12 pitch classes in this mode, relative to the key.
    pub fn pitch_classes(&self) -> [bool; 12] {
        let mut pcs = [false; 12];
        for &offset in self.scale() {
            pcs[(offset % 12) as usize] = true;
        }
        pcs
    }

    /// Pitch class of scale degree `degree` (0-based) in `key`, if the scale
    /// has that many degrees.
    pub fn degree_pitch_class(&self, key: u8, degree: usize) -> Option<u8> {
        self.scale()
            .get(degree)
            .map(|&offset| (key % 12 + offset % 12) % 12)
    }

    /// Parse a mode by name. Accepts `ionian`/`aeolian` as aliases.
    /// Custom modes cannot be named; build them directly.
    pub fn from_name(name: &str) -> Option<Mode> {
        let mode = match name.to_lowercase().as_str() {
            "major" | "ionian" => Mode::Major,
            "dorian" => Mode::Dorian,
            "phrygian" => Mode::Phrygian,
            "lydian" => Mode::Lydian,
            "mixolydian" => Mode::Mixolydian,
            "minor" | "aeolian" => Mode::Minor,
            "locrian" => Mode::Locrian,
            "chromatic" => Mode::Chromatic,
            _ => return None,
        };
        Some(mode)
    }
}

/// Name of a pitch class, spelled with the common accidentals.
pub fn pitch_name(pc: u8) -> &'static str {
    match pc % 12 {
        0 => "C",
        1 => "C#",
        2 => "D",
        3 => "Eb",
        4 => "E",
        5 => "F",
        6 => "F#",
        7 => "G",
        8 => "Ab",
        9 => "A",
        10 => "Bb",
        _ => "B",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major_pitches() {
        let pcs = Mode::Major.pitch_classes();
        for pc in [0, 2, 4, 5, 7, 9, 11] {
            assert!(pcs[pc], "pc {pc} should be in C major");
        }
        assert!(!pcs[1]);
        assert!(!pcs[6]);
    }

    #[test]
    fn test_degree_pitch_class() {
        // G major: V is D.
        assert_eq!(Mode::Major.degree_pitch_class(7, 4), Some(2));
        // A minor: III is C.
        assert_eq!(Mode::Minor.degree_pitch_class(9, 2), Some(0));
        assert_eq!(Mode::Custom(vec![0, 7]).degree_pitch_class(0, 2), None);
    }

    #[test]
    fn test_chromatic_has_every_pitch_class() {
        assert!(Mode::Chromatic.pitch_classes().iter().all(|&b| b));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Mode::from_name("Ionian"), Some(Mode::Major));
        assert_eq!(Mode::from_name("aeolian"), Some(Mode::Minor));
        assert_eq!(Mode::from_name("lydian"), Some(Mode::Lydian));
        assert_eq!(Mode::from_name("hypodorian"), None);
    }

    #[test]
    fn test_mode_json_names() {
        assert_eq!(serde_json::to_string(&Mode::Mixolydian).unwrap(), "\"mixolydian\"");
        let custom: Mode = serde_json::from_str(r#"{"custom": [0, 3, 7]}"#).unwrap();
        assert_eq!(custom.scale(), &[0, 3, 7]);
    }

    #[test]
    fn test_pitch_name() {
        assert_eq!(pitch_name(0), "C");
        assert_eq!(pitch_name(10), "Bb");
        assert_eq!(pitch_name(14), "D");
    }
}
