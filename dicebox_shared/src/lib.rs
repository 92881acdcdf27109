use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `GET /random`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RandomResponse {
    pub number: i64,
}

/// Body of `GET /roll/{count}`: the six face counts keyed by face number
/// ("1".."6") plus the representative `final` face.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RollResponse {
    #[serde(flatten)]
    pub faces: BTreeMap<String, u64>,
    #[serde(rename = "final")]
    pub final_face: u8,
}

impl RollResponse {
    pub fn from_tally(counts: [u64; 6], final_face: u8) -> Self {
        Self {
            faces: face_map(counts),
            final_face,
        }
    }

    /// Count for a face in 1..=6, zero when the key is absent.
    pub fn face(&self, face: u8) -> u64 {
        self.faces
            .get(&face.to_string())
            .copied()
            .unwrap_or_default()
    }
}

/// Body of `GET /stats`: summed per-face totals across all stored batches.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub totals: BTreeMap<String, u64>,
}

impl StatsResponse {
    pub fn from_tally(counts: [u64; 6]) -> Self {
        Self {
            totals: face_map(counts),
        }
    }

    pub fn face(&self, face: u8) -> u64 {
        self.totals
            .get(&face.to_string())
            .copied()
            .unwrap_or_default()
    }
}

/// Error body for non-2xx responses.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

fn face_map(counts: [u64; 6]) -> BTreeMap<String, u64> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ((i + 1).to_string(), count))
        .collect()
}
