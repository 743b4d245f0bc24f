//! Improving-move bookkeeping shared by the parallel improvers.

/// Smallest cost decrease accepted as an improvement.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// A move identified by two tour positions and its cost change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Move {
    pub a: usize,
    pub b: usize,
    pub delta: f64,
}

impl Move {
    /// Total order used by reductions: lower delta wins, then lower positions.
    ///
    /// Makes the parallel outcome independent of worker scheduling.
    pub fn better(self, other: Move) -> Move {
        let other_wins = other.delta < self.delta
            || (other.delta == self.delta && (other.a, other.b) < (self.a, self.b));
        if other_wins {
            other
        } else {
            self
        }
    }
}

/// Scans `b` for a fixed `a`, keeping the best move with `delta < -ε`.
pub(crate) fn best_for_row(
    a: usize,
    bs: impl Iterator<Item = usize>,
    delta: impl Fn(usize, usize) -> f64,
) -> Option<Move> {
    let mut best: Option<Move> = None;
    for b in bs {
        let d = delta(a, b);
        if d < -IMPROVEMENT_EPSILON && best.is_none_or(|m| d < m.delta) {
            best = Some(Move { a, b, delta: d });
        }
    }
    best
}
