// Stock rule tables.
//
// `tsd_rules` is the tonic/subdominant/dominant grammar over `RTerm`. A tonic
// region either stays, splits in two, or is split into a tonic and dominant
// half in either order; dominants may be prepared by a subdominant.
//
// `roman_rules` works directly on chord degrees (`CType`) and exercises the
// whole term language: proportional splits, a modulation to the dominant,
// and a `let` that states a half-length phrase twice.
//
// Every splitting rule is guarded by a minimum duration. Once a chord is too
// short to split, the rule rewrites it to itself instead, so the weights and
// bucket layout stay fixed however deep generation goes.

use crate::alphabet::{CType, RTerm};
use crate::modifiers::h;
use crate::modulation::MType;
use crate::param::{Dur, MusicParam};
use crate::{MusicRule, MusicRules, MusicTerm};
use kulitta_ptgg::{GrammarError, Rule, Term};

/// A rule that only fires while `p.dur >= factor * min_dur`.
fn splitting<S, F>(
    symbol: S,
    probability: f64,
    min_dur: Dur,
    factor: f64,
    production: F,
) -> Result<MusicRule<S>, GrammarError>
where
    S: Clone + std::fmt::Debug + Send + Sync + 'static,
    F: Fn(&MusicParam) -> Vec<MusicTerm<S>> + Send + Sync + 'static,
{
    let rule = Rule::new(symbol, probability, production)?;
    Ok(rule.guarded(move |p: &MusicParam| p.dur >= factor * min_dur))
}

/// The TSD grammar. Chords shorter than `2 * min_dur` stop splitting.
pub fn tsd_rules(min_dur: Dur) -> Result<MusicRules<RTerm>, GrammarError> {
    use RTerm::{D, S, T};
    let rules = vec![
        Rule::new(T, 0.25, |p: &MusicParam| vec![T.nt(p.clone())])?,
        splitting(T, 0.25, min_dur, 2.0, |p| vec![T.nt(h(p)), T.nt(h(p))])?,
        splitting(T, 0.25, min_dur, 2.0, |p| vec![T.nt(h(p)), D.nt(h(p))])?,
        splitting(T, 0.25, min_dur, 2.0, |p| vec![D.nt(h(p)), T.nt(h(p))])?,
        Rule::new(D, 0.33, |p: &MusicParam| vec![D.nt(p.clone())])?,
        splitting(D, 0.33, min_dur, 2.0, |p| vec![D.nt(h(p)), D.nt(h(p))])?,
        splitting(D, 0.34, min_dur, 2.0, |p| vec![S.nt(h(p)), D.nt(h(p))])?,
        Rule::new(S, 0.5, |p: &MusicParam| vec![S.nt(p.clone())])?,
        splitting(S, 0.5, min_dur, 2.0, |p| vec![S.nt(h(p)), S.nt(h(p))])?,
    ];
    Ok(rules.into())
}

/// Roman-numeral grammar on chord degrees.
pub fn roman_rules(min_dur: Dur) -> Result<MusicRules<CType>, GrammarError> {
    use CType::{I, II, IV, V};
    let rules = vec![
        // Three quarters tonic, one quarter dominant.
        splitting(I, 0.3, min_dur, 4.0, |p| {
            vec![I.nt(p.with_dur(p.dur * 0.75)), V.nt(p.with_dur(p.dur * 0.25))]
        })?,
        splitting(I, 0.3, min_dur, 2.0, |p| vec![I.nt(h(p)), I.nt(h(p))])?,
        // Tonicize the dominant for the first half.
        splitting(I, 0.2, min_dur, 2.0, |p| {
            vec![Term::modulate(MType::M5, I.nt(h(p))), I.nt(h(p))]
        })?,
        // State a half-length phrase and repeat it.
        splitting(I, 0.2, min_dur, 2.0, |p| {
            vec![Term::let_in(
                "x",
                I.nt(h(p)),
                Term::seq(vec![Term::var("x"), Term::var("x")]),
            )]
        })?,
        splitting(V, 0.4, min_dur, 2.0, |p| vec![IV.nt(h(p)), V.nt(h(p))])?,
        splitting(V, 0.3, min_dur, 2.0, |p| vec![II.nt(h(p)), V.nt(h(p))])?,
        Rule::new(V, 0.3, |p: &MusicParam| vec![V.nt(p.clone())])?,
        Rule::new(IV, 0.5, |p: &MusicParam| vec![IV.nt(p.clone())])?,
        splitting(IV, 0.5, min_dur, 2.0, |p| vec![IV.nt(h(p)), II.nt(h(p))])?,
    ];
    Ok(rules.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kulitta_ptgg::{CycleDraws, produce};

    fn leaf_durs<S: std::fmt::Debug>(sentence: &[MusicTerm<S>]) -> Vec<Dur> {
        sentence
            .iter()
            .map(|t| match t {
                Term::NonTerminal { param, .. } => param.dur,
                other => panic!("expected a leaf, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_stock_tables_are_normalized() {
        assert!(tsd_rules(0.125).unwrap().unnormalized(1e-9).is_empty());
        assert!(roman_rules(0.125).unwrap().unnormalized(1e-9).is_empty());
    }

    #[test]
    fn test_tsd_split_halves_duration() {
        let rules = tsd_rules(0.125).unwrap();
        // 0.3 lands in the second tonic bucket: T -> [T, T].
        let mut draws = CycleDraws::new(vec![0.3]);
        let out = produce(&rules, &mut draws, &[RTerm::T.nt(MusicParam::default())]);
        assert_eq!(leaf_durs(&out), vec![0.5, 0.5]);
    }

    #[test]
    fn test_guard_stops_short_chords_splitting() {
        let rules = tsd_rules(0.25).unwrap();
        let short = MusicParam::default().with_dur(0.25);
        let mut draws = CycleDraws::new(vec![0.3]);
        let out = produce(&rules, &mut draws, &[RTerm::T.nt(short.clone())]);
        assert_eq!(out, vec![RTerm::T.nt(short)]);
    }

    #[test]
    fn test_roman_three_one_split() {
        let rules = roman_rules(0.125).unwrap();
        let mut draws = CycleDraws::new(vec![0.1]);
        let out = produce(&rules, &mut draws, &[CType::I.nt(MusicParam::default())]);
        assert_eq!(leaf_durs(&out), vec![0.75, 0.25]);
        assert!(matches!(&out[1], Term::NonTerminal { symbol: CType::V, .. }));
    }

    #[test]
    fn test_roman_modulating_and_repeating_rules() {
        let rules = roman_rules(0.125).unwrap();
        let start = [CType::I.nt(MusicParam::default())];

        let mut draws = CycleDraws::new(vec![0.7]);
        let out = produce(&rules, &mut draws, &start);
        assert!(matches!(&out[0], Term::Modulation { modulation: MType::M5, .. }));

        let mut draws = CycleDraws::new(vec![0.9]);
        let out = produce(&rules, &mut draws, &start);
        assert!(matches!(&out[..], [Term::Let { .. }]));
    }

    #[test]
    fn test_x_is_terminal() {
        let rules = roman_rules(0.125).unwrap();
        assert!(rules.matching(&CType::X).is_empty());
    }
}
