//! Guest data model — travel methods, occupants, and check-in batches.
//!
//! Plain data with serde derives. Everything an embedding layer needs to
//! render or export hotel state lives here.

use serde::{Deserialize, Serialize};

/// How a guest arrived at the hotel — the closed classification used for
/// placement weighting and per-method bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelMethod {
    Walk,
    Car,
    Boat,
    Plane,
}

impl TravelMethod {
    /// All methods, in the fixed seating order used by batch check-in.
    pub const ALL: [TravelMethod; 4] = [
        TravelMethod::Walk,
        TravelMethod::Car,
        TravelMethod::Boat,
        TravelMethod::Plane,
    ];

    /// Number of travel methods.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable position of this method in [`TravelMethod::ALL`].
    /// Used to index per-method counters and weight tables.
    pub fn index(self) -> usize {
        match self {
            TravelMethod::Walk => 0,
            TravelMethod::Car => 1,
            TravelMethod::Boat => 2,
            TravelMethod::Plane => 3,
        }
    }

    /// Lowercase label for tabular output.
    pub fn label(self) -> &'static str {
        match self {
            TravelMethod::Walk => "walk",
            TravelMethod::Car => "car",
            TravelMethod::Boat => "boat",
            TravelMethod::Plane => "plane",
        }
    }
}

/// A seated guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    /// Travel method the guest checked in with.
    pub method: TravelMethod,
    /// Position of this guest within its method's admission stream.
    /// Feeds the placement hash; not unique after checkouts.
    pub sequence: u64,
    /// Registry-wide admission ticket. Strictly increasing across all
    /// guests; full rehashes re-seat occupants in ticket order.
    pub admitted: u64,
}

/// Requested guest counts for one batch check-in, keyed by travel method.
///
/// Counts are signed because they arrive from an untrusted caller (parsed
/// user input, typically). [`crate::registry::Hotel::check_in`] rejects a
/// batch containing any negative count before mutating anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestBatch {
    counts: [i64; TravelMethod::COUNT],
}

impl GuestBatch {
    /// An empty batch (all counts zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style count assignment.
    pub fn with(mut self, method: TravelMethod, count: i64) -> Self {
        self.counts[method.index()] = count;
        self
    }

    /// Set the count for one method.
    pub fn set(&mut self, method: TravelMethod, count: i64) {
        self.counts[method.index()] = count;
    }

    /// Requested count for one method.
    pub fn count(&self, method: TravelMethod) -> i64 {
        self.counts[method.index()]
    }

    /// Total guests requested across all methods.
    pub fn total(&self) -> i64 {
        self.counts.iter().fold(0i64, |acc, &c| acc.saturating_add(c))
    }

    /// First negative count in fixed method order, if any.
    pub fn first_negative(&self) -> Option<(TravelMethod, i64)> {
        TravelMethod::ALL
            .into_iter()
            .map(|m| (m, self.count(m)))
            .find(|&(_, c)| c < 0)
    }
}

/// One row of a hotel snapshot: a room index and whatever occupies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetail {
    /// Room index in `[0, capacity)`.
    pub room: usize,
    /// The seated guest, or `None` for an empty room.
    pub occupant: Option<Occupant>,
}

impl RoomDetail {
    /// Label for tabular output: the guest's travel method, or `"none"`.
    pub fn guest_label(&self) -> &'static str {
        match self.occupant {
            Some(occupant) => occupant.method.label(),
            None => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_index_matches_all_order() {
        for (i, method) in TravelMethod::ALL.into_iter().enumerate() {
            assert_eq!(method.index(), i);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(TravelMethod::Walk.label(), "walk");
        assert_eq!(TravelMethod::Plane.label(), "plane");
    }

    #[test]
    fn test_batch_total() {
        let batch = GuestBatch::new()
            .with(TravelMethod::Walk, 2)
            .with(TravelMethod::Car, 1);
        assert_eq!(batch.total(), 3);
        assert_eq!(batch.count(TravelMethod::Boat), 0);
    }

    #[test]
    fn test_batch_first_negative() {
        let batch = GuestBatch::new()
            .with(TravelMethod::Car, -5)
            .with(TravelMethod::Plane, -1);
        // Fixed method order: car comes before plane
        assert_eq!(batch.first_negative(), Some((TravelMethod::Car, -5)));

        let ok = GuestBatch::new().with(TravelMethod::Walk, 4);
        assert_eq!(ok.first_negative(), None);
    }

    #[test]
    fn test_room_detail_label() {
        let empty = RoomDetail {
            room: 0,
            occupant: None,
        };
        assert_eq!(empty.guest_label(), "none");

        let seated = RoomDetail {
            room: 1,
            occupant: Some(Occupant {
                method: TravelMethod::Boat,
                sequence: 0,
                admitted: 0,
            }),
        };
        assert_eq!(seated.guest_label(), "boat");
    }
}
