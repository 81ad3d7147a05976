// Resolution of expanded output into concrete chords.
//
// Expansion leaves each chord wrapped in the modulations that enclosed it.
// `resolve` folds those into the chord's key and mode, outermost first, so a
// modulation nested inside another is taken relative to the outer one's key.
// It then lays the chords end to end: each onset is the sum of the durations
// before it, and every chord's `seq_dur` is the total length.

use crate::alphabet::ScaleDegree;
use crate::modulation::MType;
use crate::param::{Dur, MusicParam};
use kulitta_ptgg::Expanded;
use serde::{Deserialize, Serialize};

/// A chord symbol in its final tonal context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord<S> {
    pub symbol: S,
    pub param: MusicParam,
}

impl<S: ScaleDegree> Chord<S> {
    /// Pitch class of the chord root, or `None` for a rootless symbol or a
    /// degree the mode does not have.
    pub fn root_pitch_class(&self) -> Option<u8> {
        let degree = self.symbol.degree()?;
        self.param.mode.degree_pitch_class(self.param.key, degree)
    }
}

pub fn resolve<S: Clone>(expanded: &[Expanded<S, MusicParam, MType>]) -> Vec<Chord<S>> {
    let mut chords: Vec<Chord<S>> = expanded
        .iter()
        .map(|e| {
            let (symbol, param) = e.leaf();
            let param = e
                .modulations()
                .into_iter()
                .fold(param.clone(), |p, m| m.apply(&p));
            Chord {
                symbol: symbol.clone(),
                param,
            }
        })
        .collect();

    let mut onset: Dur = 0.0;
    for chord in &mut chords {
        chord.param.onset = onset;
        onset += chord.param.dur;
    }
    for chord in &mut chords {
        chord.param.seq_dur = onset;
    }
    chords
}

/// Total duration of a resolved progression.
pub fn total_duration<S>(chords: &[Chord<S>]) -> Dur {
    chords.iter().map(|c| c.param.dur).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::CType;
    use crate::mode::Mode;

    type E = Expanded<CType, MusicParam, MType>;

    fn at(dur: Dur) -> MusicParam {
        MusicParam::default().with_dur(dur)
    }

    #[test]
    fn test_onsets_are_contiguous() {
        let chords = resolve(&[
            E::nt(CType::I, at(0.5)),
            E::nt(CType::IV, at(0.25)),
            E::nt(CType::V, at(0.25)),
        ]);
        let onsets: Vec<Dur> = chords.iter().map(|c| c.param.onset).collect();
        assert_eq!(onsets, vec![0.0, 0.5, 0.75]);
        assert!(chords.iter().all(|c| c.param.seq_dur == 1.0));
        assert_eq!(total_duration(&chords), 1.0);
    }

    #[test]
    fn test_modulations_apply_outermost_first() {
        // M5 of C major is G major; M2 of G major is A minor.
        let chord = E::modulate(MType::M5, E::modulate(MType::M2, E::nt(CType::I, at(1.0))));
        let resolved = resolve(&[chord]);
        assert_eq!(resolved[0].param.key, 9);
        assert_eq!(resolved[0].param.mode, Mode::Minor);
    }

    #[test]
    fn test_root_pitch_class() {
        let chords = resolve(&[
            E::nt(CType::V, at(0.5)),
            E::modulate(MType::M5, E::nt(CType::V, at(0.5))),
            E::nt(CType::X, at(0.5)),
        ]);
        assert_eq!(chords[0].root_pitch_class(), Some(7));
        assert_eq!(chords[1].root_pitch_class(), Some(2));
        assert_eq!(chords[2].root_pitch_class(), None);
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve::<CType>(&[]).is_empty());
    }
}
