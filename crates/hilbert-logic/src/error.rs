//! Recoverable engine error kinds.
//!
//! Occupied-slot and empty-slot no-ops are deliberately *not* errors; the
//! single-slot operations on [`crate::registry::Hotel`] report those as
//! boolean failure. Everything here is local and recoverable — nothing in
//! the engine is fatal to the process.

use crate::guest::TravelMethod;
use thiserror::Error;

/// Failures surfaced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HotelError {
    /// Placement requested before the hotel has any rooms. Callers must
    /// size the hotel (first check-in batch) before hashing guests.
    #[error("placement requires a non-zero capacity")]
    ZeroCapacity,

    /// Room index outside `[0, capacity)`.
    #[error("room {room} is out of range (capacity {capacity})")]
    InvalidIndex { room: usize, capacity: usize },

    /// A batch carried a negative guest count. The batch is rejected whole;
    /// no state was mutated.
    #[error("negative guest count {count} for travel method '{}'", .method.label())]
    NegativeCount { method: TravelMethod, count: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            HotelError::ZeroCapacity.to_string(),
            "placement requires a non-zero capacity"
        );
        assert_eq!(
            HotelError::InvalidIndex {
                room: 9,
                capacity: 4
            }
            .to_string(),
            "room 9 is out of range (capacity 4)"
        );
        assert_eq!(
            HotelError::NegativeCount {
                method: TravelMethod::Car,
                count: -3
            }
            .to_string(),
            "negative guest count -3 for travel method 'car'"
        );
    }
}
