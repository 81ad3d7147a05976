// Base symbol alphabets.
//
// Two alphabets ship with the crate:
// - `CType`, Roman-numeral chord degrees `I..VII`, plus `X` for a chord with
//   no scale degree (a placeholder the grammars never rewrite)
// - `RTerm`, the functional regions of the TSD grammar: tonic, subdominant
//   and dominant
//
// Both map onto a 0-based scale degree through `ScaleDegree`, which is what
// `resolve.rs` needs to turn a chord symbol into a root pitch class.

use crate::MusicTerm;
use crate::param::MusicParam;
use kulitta_ptgg::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbol that names a degree of the current scale.
pub trait ScaleDegree {
    /// 0-based degree, or `None` if the symbol has no root.
    fn degree(&self) -> Option<usize>;
}

/// Roman-numeral chord degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CType {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    X,
}

impl CType {
    pub const DEGREES: [CType; 7] = [
        CType::I,
        CType::II,
        CType::III,
        CType::IV,
        CType::V,
        CType::VI,
        CType::VII,
    ];

    /// A single chord of this degree.
    pub fn nt(self, p: MusicParam) -> MusicTerm<CType> {
        Term::nt(self, p)
    }

    pub fn name(self) -> &'static str {
        match self {
            CType::I => "I",
            CType::II => "II",
            CType::III => "III",
            CType::IV => "IV",
            CType::V => "V",
            CType::VI => "VI",
            CType::VII => "VII",
            CType::X => "X",
        }
    }
}

impl ScaleDegree for CType {
    fn degree(&self) -> Option<usize> {
        CType::DEGREES.iter().position(|c| c == self)
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Functional region symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RTerm {
    /// Tonic.
    T,
    /// Subdominant.
    S,
    /// Dominant.
    D,
}

impl RTerm {
    pub fn nt(self, p: MusicParam) -> MusicTerm<RTerm> {
        Term::nt(self, p)
    }

    pub fn name(self) -> &'static str {
        match self {
            RTerm::T => "T",
            RTerm::S => "S",
            RTerm::D => "D",
        }
    }
}

impl ScaleDegree for RTerm {
    /// Each region sounds as its primary triad: I, IV or V.
    fn degree(&self) -> Option<usize> {
        Some(match self {
            RTerm::T => 0,
            RTerm::S => 3,
            RTerm::D => 4,
        })
    }
}

impl fmt::Display for RTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
