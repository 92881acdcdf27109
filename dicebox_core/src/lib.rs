pub mod engine;
pub mod tally;

pub use crate::engine::{
    roll_many, roll_many_with, roll_one, roll_one_with, RollEngine, RollError, DEFAULT_MAX,
    DEFAULT_MIN,
};
pub use crate::tally::{FaceCounts, RollBatch, FACES};
