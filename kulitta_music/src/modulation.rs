// Scale-degree modulations.
//
// `M2..M7` move the key to the second through seventh degree of the current
// scale. From a major key the degree is measured on the major scale and the
// new mode is the one that degree's triad has in major (ii is minor, IV is
// major, and so on). Any other mode is treated as minor: the minor scale and
// the minor table are used instead.

use crate::mode::{MAJOR, MINOR, Mode};
use crate::param::MusicParam;
use serde::{Deserialize, Serialize};
use std::fmt;

static MAJOR_DEGREE_MODES: [Mode; 7] = [
    Mode::Major,
    Mode::Minor,
    Mode::Minor,
    Mode::Major,
    Mode::Major,
    Mode::Minor,
    Mode::Minor,
];

static MINOR_DEGREE_MODES: [Mode; 7] = [
    Mode::Minor,
    Mode::Minor,
    Mode::Major,
    Mode::Minor,
    Mode::Minor,
    Mode::Major,
    Mode::Major,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MType {
    M2,
    M3,
    M4,
    M5,
    M6,
    M7,
}

impl MType {
    /// 0-based scale degree the modulation moves to.
    pub fn degree(self) -> usize {
        match self {
            MType::M2 => 1,
            MType::M3 => 2,
            MType::M4 => 3,
            MType::M5 => 4,
            MType::M6 => 5,
            MType::M7 => 6,
        }
    }

    /// The parameter with key and mode moved; duration and onset are kept.
    pub fn apply(self, p: &MusicParam) -> MusicParam {
        let i = self.degree();
        let (scale, modes) = if p.is_major() {
            (&MAJOR, &MAJOR_DEGREE_MODES)
        } else {
            (&MINOR, &MINOR_DEGREE_MODES)
        };
        MusicParam {
            mode: modes[i].clone(),
            key: (p.key % 12 + scale[i]) % 12,
            ..p.clone()
        }
    }
}

impl fmt::Display for MType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.degree() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_of_c_major() {
        let g = MType::M5.apply(&MusicParam::default());
        assert_eq!(g.key, 7);
        assert_eq!(g.mode, Mode::Major);
    }

    #[test]
    fn test_supertonic_of_c_major_is_d_minor() {
        let d = MType::M2.apply(&MusicParam::default());
        assert_eq!(d.key, 2);
        assert_eq!(d.mode, Mode::Minor);
    }

    #[test]
    fn test_submediant_of_a_minor_is_f_major() {
        let a_minor = MusicParam::new(1.0, Mode::Minor, 9);
        let f = MType::M6.apply(&a_minor);
        assert_eq!(f.key, 5);
        assert_eq!(f.mode, Mode::Major);
    }

    #[test]
    fn test_other_modes_use_minor_tables() {
        let dorian = MusicParam::new(1.0, Mode::Dorian, 0);
        let out = MType::M3.apply(&dorian);
        assert_eq!(out.key, 3);
        assert_eq!(out.mode, Mode::Major);
    }

    #[test]
    fn test_modulation_keeps_timing() {
        let p = MusicParam {
            onset: 0.5,
            ..MusicParam::new(0.25, Mode::Major, 4)
        };
        let out = MType::M4.apply(&p);
        assert_eq!(out.dur, 0.25);
        assert_eq!(out.onset, 0.5);
        assert_eq!(out.key, 9);
    }

    #[test]
    fn test_display() {
        assert_eq!(MType::M5.to_string(), "M5");
    }
}
