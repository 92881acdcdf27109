use serde::{Deserialize, Serialize};

/// Number of die faces. The whole crate works over the fixed 1..=6 domain.
pub const FACES: usize = 6;

/// Per-face occurrence counts for a batch of rolls.
///
/// Index 0 holds the count for face 1, and so on. All constructors keep the
/// six buckets present, so callers never have to handle a missing face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceCounts([u64; FACES]);

impl FaceCounts {
    pub fn new() -> Self {
        Self([0; FACES])
    }

    pub fn from_array(counts: [u64; FACES]) -> Self {
        Self(counts)
    }

    pub fn as_array(&self) -> [u64; FACES] {
        self.0
    }

    /// Count for a face in 1..=6.
    pub fn get(&self, face: u8) -> u64 {
        debug_assert!((1..=FACES as u8).contains(&face));
        self.0[(face - 1) as usize]
    }

    /// Record one occurrence of a face in 1..=6.
    pub fn record(&mut self, face: u8) {
        debug_assert!((1..=FACES as u8).contains(&face));
        self.0[(face - 1) as usize] += 1;
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// The face with the highest count. Ties resolve to the lowest face
    /// number, so the result is deterministic for a given tally.
    pub fn most_frequent(&self) -> u8 {
        let mut best = 1u8;
        for face in 2..=FACES as u8 {
            if self.get(face) > self.get(best) {
                best = face;
            }
        }
        best
    }

    /// Iterate `(face, count)` pairs in ascending face order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u8 + 1, count))
    }

    pub fn add(&mut self, other: &FaceCounts) {
        for i in 0..FACES {
            self.0[i] += other.0[i];
        }
    }
}

/// Outcome of one multi-roll request: how many dice were thrown and how
/// often each face came up. Invariant: `faces.total() == count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollBatch {
    pub count: u64,
    pub faces: FaceCounts,
}
