pub use crate::config::*;
use crate::Table;

use rand::Rng;

/// A finite sequence of preview samples, shown before the committed draw
/// to pace a "slot machine" style reveal.
///
/// Each frame is an independent uniform re-sample from the same pool. The
/// sequence is purely cosmetic: it shares no state with [crate::draw] and
/// the row it ends on has no bearing on the recorded winner. A headless
/// caller skips it entirely by never constructing one (or by asking for
/// zero frames).
///
/// ```
/// use raffle_engine::{SpinSequence, Table};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let pool = Table {
///     columns: vec!["FULL NAME".to_string()],
///     rows: vec![vec!["Anna".to_string()], vec!["Bob".to_string()]],
/// };
/// let rng = StdRng::seed_from_u64(42);
/// let frames: Vec<_> = SpinSequence::new(&pool, rng, 10)?.collect();
/// assert_eq!(frames.len(), 10);
/// # Ok::<(), raffle_engine::RaffleErrors>(())
/// ```
pub struct SpinSequence<'a, R: Rng> {
    pool: &'a Table,
    rng: R,
    remaining: usize,
}

impl<'a, R: Rng> SpinSequence<'a, R> {
    /// Builds a sequence of `frames` preview samples over `pool`.
    ///
    /// Fails with [RaffleErrors::EmptyPool] on an empty pool, mirroring
    /// the draw itself. The sequence is restartable: building a new one
    /// starts a fresh, independent run of samples.
    pub fn new(pool: &'a Table, rng: R, frames: usize) -> Result<SpinSequence<'a, R>, RaffleErrors> {
        if pool.is_empty() {
            return Err(RaffleErrors::EmptyPool);
        }
        Ok(SpinSequence {
            pool,
            rng,
            remaining: frames,
        })
    }
}

impl<'a, R: Rng> Iterator for SpinSequence<'a, R> {
    type Item = &'a [String];

    fn next(&mut self) -> Option<&'a [String]> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.rng.gen_range(0..self.pool.len());
        Some(self.pool.rows[idx].as_slice())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
