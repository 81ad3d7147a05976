// Parameter modifiers used on rule right-hand sides.
//
// `h`, `q` and `e` scale the duration by 1/2, 1/4 and 1/8. `q2`, `q3` and
// `q4` move the onset to the second, third or fourth quarter of the current
// span. Onset shifts read the duration, so in the composites the onset is
// moved before the duration shrinks.

use crate::param::MusicParam;

fn scale_dur(p: &MusicParam, factor: f64) -> MusicParam {
    p.with_dur(p.dur * factor)
}

fn shift_onset(p: &MusicParam, quarters: f64) -> MusicParam {
    MusicParam {
        onset: p.onset + p.dur * quarters / 4.0,
        ..p.clone()
    }
}

/// Half the duration.
pub fn h(p: &MusicParam) -> MusicParam {
    scale_dur(p, 0.5)
}

/// Quarter the duration.
pub fn q(p: &MusicParam) -> MusicParam {
    scale_dur(p, 0.25)
}

/// An eighth of the duration.
pub fn e(p: &MusicParam) -> MusicParam {
    scale_dur(p, 0.125)
}

pub fn q2(p: &MusicParam) -> MusicParam {
    shift_onset(p, 1.0)
}

pub fn q3(p: &MusicParam) -> MusicParam {
    shift_onset(p, 2.0)
}

pub fn q4(p: &MusicParam) -> MusicParam {
    shift_onset(p, 3.0)
}

/// Second half: onset at the midpoint, half the duration.
pub fn ho(p: &MusicParam) -> MusicParam {
    h(&q3(p))
}

pub fn qo2(p: &MusicParam) -> MusicParam {
    q(&q2(p))
}

pub fn qo3(p: &MusicParam) -> MusicParam {
    q(&q3(p))
}

pub fn qo4(p: &MusicParam) -> MusicParam {
    q(&q4(p))
}
