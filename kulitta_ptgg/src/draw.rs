// Injected randomness.
//
// Rule selection consumes numbers in [0, 1) from a `Draw`. Callers pass one in
// explicitly; there is no global generator and no clock-seeded default. Three
// sources ship with the engine:
// - `KulittaRng` (from `kulitta_prng`), the seeded PRNG
// - `CycleDraws`, a fixed sequence replayed in a loop, for tests and demos
// - `DrawFn`, any `FnMut() -> f64` closure

use kulitta_prng::KulittaRng;

/// A source of draws in [0, 1).
pub trait Draw {
    fn draw(&mut self) -> f64;
}

impl<D: Draw + ?Sized> Draw for &mut D {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

impl Draw for KulittaRng {
    fn draw(&mut self) -> f64 {
        self.next_f64()
    }
}

/// Adapts a closure into a draw source.
pub struct DrawFn<F>(pub F);

impl<F: FnMut() -> f64> Draw for DrawFn<F> {
    fn draw(&mut self) -> f64 {
        (self.0)()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct CycleDraws {
    draws: Vec<f64>,
    next: usize,
}

impl CycleDraws {
    /// Panics if `draws` is empty.
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "CycleDraws needs at least one draw");
        CycleDraws { draws, next: 0 }
    }

    /// Total number of draws handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}

impl Draw for CycleDraws {
    fn draw(&mut self) -> f64 {
        let value = self.draws[self.next % self.draws.len()];
        self.next += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around() {
        let mut draws = CycleDraws::new(vec![0.1, 0.6]);
        let seen: Vec<f64> = (0..5).map(|_| draws.draw()).collect();
        assert_eq!(seen, vec![0.1, 0.6, 0.1, 0.6, 0.1]);
        assert_eq!(draws.issued(), 5);
    }

    #[test]
    #[should_panic(expected = "at least one draw")]
    fn cycle_rejects_empty() {
        CycleDraws::new(vec![]);
    }

    #[test]
    fn closure_source() {
        let mut n = 0.0;
        let mut draws = DrawFn(move || {
            n += 0.25;
            n
        });
        assert_eq!(draws.draw(), 0.25);
        assert_eq!(draws.draw(), 0.5);
    }

    #[test]
    fn rng_source_matches_next_f64() {
        let mut a = KulittaRng::new(3);
        let mut b = KulittaRng::new(3);
        assert_eq!(a.draw(), b.next_f64());
    }

    #[test]
    fn borrowed_source_advances_owner() {
        fn first<D: Draw>(mut source: D) -> f64 {
            source.draw()
        }

        let mut draws = CycleDraws::new(vec![0.1, 0.2, 0.3]);
        assert_eq!(first(&mut draws), 0.1);
        assert_eq!(draws.draw(), 0.2);
    }
}
