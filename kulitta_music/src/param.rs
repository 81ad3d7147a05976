// The music parameter carried by every symbol.
//
// `MusicParam` holds a symbol's duration and its tonal context (mode and key),
// plus its onset within the enclosing sentence and that sentence's total
// duration. Durations are relative: 1.0 is one 4/4 measure.

use crate::mode::Mode;
use serde::{Deserialize, Serialize};

/// Relative duration. `WN` (a whole note) is one measure.
pub type Dur = f64;

pub const WN: Dur = 1.0;
pub const HN: Dur = 0.5;
pub const QN: Dur = 0.25;
pub const EN: Dur = 0.125;
pub const SN: Dur = 0.0625;
pub const TN: Dur = 0.03125;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicParam {
    pub dur: Dur,
    pub mode: Mode,
    /// Pitch class of the tonic, 0 = C.
    pub key: u8,
    pub onset: Dur,
    pub seq_dur: Dur,
}

impl MusicParam {
    pub fn new(dur: Dur, mode: Mode, key: u8) -> Self {
        MusicParam {
            dur,
            mode,
            key: key % 12,
            onset: 0.0,
            seq_dur: dur,
        }
    }

    pub fn is_major(&self) -> bool {
        self.mode == Mode::Major
    }

    pub fn is_minor(&self) -> bool {
        self.mode == Mode::Minor
    }

    pub fn with_dur(&self, dur: Dur) -> Self {
        MusicParam {
            dur,
            ..self.clone()
        }
    }
}

/// One measure in C major.
impl Default for MusicParam {
    fn default() -> Self {
        MusicParam::new(WN, Mode::Major, 0)
    }
}
