//! Hash-derived placement — maps (sequence, method) to a candidate room.
//!
//! The candidate for the `sequence`-th guest of a method with weight `w` is
//! `(sequence + w · PLACEMENT_PRIME) mod capacity`. The prime multiplier
//! keeps the per-method streams offset from each other while sequential
//! sequence numbers still sweep the whole slot range.
//!
//! The method→weight mapping is a constant table owned by
//! [`PlacementTable`], not module-wide state; custom tables can be built
//! for testing.

use crate::error::HotelError;
use crate::guest::TravelMethod;
use serde::{Deserialize, Serialize};

/// Prime multiplier applied to the method weight before mixing.
pub const PLACEMENT_PRIME: u64 = 31;

/// Default per-method weights: walk=1, car=2, boat=3, plane=4.
const DEFAULT_WEIGHTS: [u32; TravelMethod::COUNT] = [1, 2, 3, 4];

/// Per-method placement weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementTable {
    weights: [u32; TravelMethod::COUNT],
}

impl Default for PlacementTable {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
        }
    }
}

impl PlacementTable {
    /// Table with custom weights, indexed in [`TravelMethod::ALL`] order.
    pub fn with_weights(weights: [u32; TravelMethod::COUNT]) -> Self {
        Self { weights }
    }

    /// Placement weight for a method.
    pub fn weight(&self, method: TravelMethod) -> u32 {
        self.weights[method.index()]
    }

    /// Candidate room for the `sequence`-th guest of `method`.
    ///
    /// Deterministic in (sequence, method, capacity). Fails with
    /// [`HotelError::ZeroCapacity`] when the hotel has no rooms yet.
    pub fn room_for(
        &self,
        sequence: u64,
        method: TravelMethod,
        capacity: usize,
    ) -> Result<usize, HotelError> {
        if capacity == 0 {
            return Err(HotelError::ZeroCapacity);
        }
        let mixed =
            sequence as u128 + self.weight(method) as u128 * PLACEMENT_PRIME as u128;
        Ok((mixed % capacity as u128) as usize)
    }
}
