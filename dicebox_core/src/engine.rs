use rand::Rng;
use thiserror::Error;

use crate::tally::{FaceCounts, RollBatch, FACES};

pub const DEFAULT_MIN: i64 = 1;
pub const DEFAULT_MAX: i64 = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RollError {
    #[error("count must be positive")]
    InvalidCount,
}

/// One uniform draw from `[min, max]`.
///
/// Callers pass user-supplied bounds straight through; an inverted range
/// falls back to the default `[1, 6]` instead of erroring.
pub fn roll_one_with<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    let (min, max) = if min <= max {
        (min, max)
    } else {
        (DEFAULT_MIN, DEFAULT_MAX)
    };
    rng.gen_range(min..=max)
}

pub fn roll_one(min: i64, max: i64) -> i64 {
    roll_one_with(&mut rand::thread_rng(), min, max)
}

/// `count` independent draws from [1,6], tallied per face.
pub fn roll_many_with<R: Rng>(rng: &mut R, count: i64) -> Result<RollBatch, RollError> {
    if count <= 0 {
        return Err(RollError::InvalidCount);
    }
    let mut faces = FaceCounts::new();
    for _ in 0..count {
        faces.record(rng.gen_range(1..=FACES as u8));
    }
    Ok(RollBatch {
        count: count as u64,
        faces,
    })
}

pub fn roll_many(count: i64) -> Result<RollBatch, RollError> {
    roll_many_with(&mut rand::thread_rng(), count)
}

/// Stateful wrapper for an interactive session: same draws as the free
/// functions plus a running counter of rolls performed locally. The counter
/// is never persisted and is not authoritative.
#[derive(Debug, Default)]
pub struct RollEngine {
    rolls_performed: u64,
}

impl RollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roll_one(&mut self, min: i64, max: i64) -> i64 {
        self.rolls_performed += 1;
        roll_one(min, max)
    }

    pub fn roll_many(&mut self, count: i64) -> Result<RollBatch, RollError> {
        let batch = roll_many(count)?;
        self.rolls_performed += batch.count;
        Ok(batch)
    }

    pub fn rolls_performed(&self) -> u64 {
        self.rolls_performed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn roll_one_deterministic_for_seed() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(roll_one_with(&mut rng1, 1, 6), roll_one_with(&mut rng2, 1, 6));
        }
    }

    #[test]
    fn roll_one_inverted_range_uses_default() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = roll_one_with(&mut rng, 10, 2);
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn engine_counts_every_roll() {
        let mut engine = RollEngine::new();
        engine.roll_one(1, 6);
        engine.roll_many(5).unwrap();
        assert_eq!(engine.rolls_performed(), 6);
    }

    #[test]
    fn engine_rejects_bad_count_without_counting() {
        let mut engine = RollEngine::new();
        assert_eq!(engine.roll_many(0), Err(RollError::InvalidCount));
        assert_eq!(engine.rolls_performed(), 0);
    }
}
