//! The hotel registry — slot table, occupancy bookkeeping, check-in/out.
//!
//! A [`Hotel`] owns the ordered room table plus the counters that drive
//! placement: guests-per-method (sequence source) and a registry-wide
//! admission clock (rehash ordering). Batch check-in takes a fast path
//! straight into free rooms when the batch fits, and otherwise grows the
//! table and re-hashes everyone.
//!
//! All operations are synchronous, in-process, and single-threaded; an
//! embedding host must serialize access to the one `Hotel` instance.

use crate::capacity;
use crate::error::HotelError;
use crate::guest::{GuestBatch, Occupant, RoomDetail, TravelMethod};
use crate::placement::PlacementTable;
use crate::probing::{self, Probe, COLLISION_LIMIT};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Outcome data from one batch check-in.
///
/// The original front end printed total and available rooms after every
/// batch; the engine returns the numbers as data instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInReport {
    /// Guests seated by this batch.
    pub seated: usize,
    /// Capacity before the batch was processed.
    pub capacity_before: usize,
    /// Capacity after (differs when the batch forced growth).
    pub capacity_after: usize,
    /// Whether existing occupants were re-hashed into a larger table.
    pub rehashed: bool,
}

/// The single hotel instance: room table plus occupancy bookkeeping.
///
/// A hotel built with capacity 0 is *uninitialized*: the first non-empty
/// batch sizes the table. Capacity never shrinks afterwards.
#[derive(Debug, Clone)]
pub struct Hotel {
    rooms: Vec<Option<Occupant>>,
    occupied: usize,
    /// Guests assigned per method, minus checkouts. Sequence source.
    method_counts: [u64; TravelMethod::COUNT],
    /// Monotonic admission ticket source; never reset, not even by rehash.
    admission_clock: u64,
    table: PlacementTable,
}

impl Hotel {
    /// Hotel with `capacity` empty rooms (0 = uninitialized) and the
    /// default placement weights.
    pub fn new(capacity: usize) -> Self {
        Self::with_table(capacity, PlacementTable::default())
    }

    /// Hotel with a custom placement table.
    pub fn with_table(capacity: usize, table: PlacementTable) -> Self {
        Self {
            rooms: vec![None; capacity],
            occupied: 0,
            method_counts: [0; TravelMethod::COUNT],
            admission_clock: 0,
            table,
        }
    }

    // ── Read-only accessors ─────────────────────────────────────────────

    /// Total rooms.
    pub fn capacity(&self) -> usize {
        self.rooms.len()
    }

    /// Occupied rooms.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Free rooms.
    pub fn available_count(&self) -> usize {
        self.rooms.len() - self.occupied
    }

    /// Indices of free rooms, ascending.
    pub fn available_rooms(&self) -> Vec<usize> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(room, _)| room)
            .collect()
    }

    /// True until the first sizing batch arrives.
    pub fn is_uninitialized(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Guests currently counted against a method (assignments minus
    /// checkouts); also the next sequence number for that method.
    pub fn method_count(&self, method: TravelMethod) -> u64 {
        self.method_counts[method.index()]
    }

    /// The placement weight table in use.
    pub fn placement_table(&self) -> &PlacementTable {
        &self.table
    }

    /// One room's state, or `InvalidIndex` when out of range.
    pub fn detail(&self, room: usize) -> Result<RoomDetail, HotelError> {
        match self.rooms.get(room) {
            Some(&occupant) => Ok(RoomDetail { room, occupant }),
            None => Err(HotelError::InvalidIndex {
                room,
                capacity: self.rooms.len(),
            }),
        }
    }

    /// Every room in index order, for rendering or export.
    pub fn snapshot(&self) -> Vec<RoomDetail> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(room, &occupant)| RoomDetail { room, occupant })
            .collect()
    }

    // ── Batch check-in ──────────────────────────────────────────────────

    /// Seat a batch of guests, growing the hotel if they do not fit.
    ///
    /// All-or-nothing: a batch with any negative count is rejected before
    /// any state changes. A zero-total batch is a successful no-op.
    ///
    /// When the batch fits in the free rooms, guests are seated directly
    /// into them in ascending index order (methods in the fixed
    /// [`TravelMethod::ALL`] order), bypassing the placement hash. When it
    /// does not fit, the table grows by the bulk expansion factor, every
    /// current occupant is re-hashed in admission order, and the new
    /// guests are then hashed in behind them.
    pub fn check_in(&mut self, batch: &GuestBatch) -> Result<CheckInReport, HotelError> {
        if let Some((method, count)) = batch.first_negative() {
            return Err(HotelError::NegativeCount { method, count });
        }
        let total = batch.total() as usize;
        let capacity_before = self.rooms.len();
        if total == 0 {
            return Ok(CheckInReport {
                seated: 0,
                capacity_before,
                capacity_after: capacity_before,
                rehashed: false,
            });
        }

        if self.rooms.is_empty() {
            // First batch sizes the hotel.
            self.rooms = vec![None; total];
            info!("hotel sized to {} rooms by first batch", total);
        }

        let mut rehashed = false;
        if total <= self.available_count() {
            let mut free_rooms = self.available_rooms().into_iter();
            for method in TravelMethod::ALL {
                for _ in 0..batch.count(method) {
                    if let Some(room) = free_rooms.next() {
                        self.seat_direct(room, method);
                    }
                }
            }
        } else {
            self.ensure_capacity_for(total);
            rehashed = true;
            for method in TravelMethod::ALL {
                for _ in 0..batch.count(method) {
                    let ticket = self.next_ticket();
                    self.seat_hashed(method, ticket);
                }
            }
        }

        Ok(CheckInReport {
            seated: total,
            capacity_before,
            capacity_after: self.rooms.len(),
            rehashed,
        })
    }

    // ── Single-slot operations ──────────────────────────────────────────

    /// Seat one guest at a specific room. False when the room is out of
    /// range or already occupied.
    pub fn check_in_at(&mut self, room: usize, method: TravelMethod) -> bool {
        if room >= self.rooms.len() || self.rooms[room].is_some() {
            return false;
        }
        self.seat_direct(room, method);
        true
    }

    /// Free one room. False when the room is out of range or already
    /// empty.
    pub fn check_out_at(&mut self, room: usize) -> bool {
        if room >= self.rooms.len() {
            return false;
        }
        match self.rooms[room].take() {
            Some(occupant) => {
                self.occupied -= 1;
                let idx = occupant.method.index();
                self.method_counts[idx] = self.method_counts[idx].saturating_sub(1);
                true
            }
            None => false,
        }
    }

    // ── Growth ──────────────────────────────────────────────────────────

    /// Grow the table if `incoming` more guests would not fit, re-hashing
    /// every current occupant into the larger table.
    ///
    /// Occupants are re-seated in admission order; method counters are
    /// reset and rebuilt by the re-seating pass, so per-method relative
    /// order (and, absent checkouts, the sequence numbers themselves) is
    /// preserved. No occupant is ever lost.
    pub fn ensure_capacity_for(&mut self, incoming: usize) {
        if self.occupied + incoming <= self.rooms.len() {
            return;
        }
        let new_capacity = capacity::grown_capacity(incoming, self.rooms.len());
        self.rehash_into(new_capacity);
    }

    /// Append `extra` empty rooms, leaving every occupant in place. Used
    /// by the probe-exhaustion path; no rehash.
    pub fn grow_by(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        let new_capacity = self.rooms.len() + extra;
        self.rooms.resize(new_capacity, None);
        debug!("hotel grew incrementally to {} rooms", new_capacity);
    }

    fn rehash_into(&mut self, new_capacity: usize) {
        let mut residents: Vec<Occupant> = self.rooms.iter().flatten().copied().collect();
        residents.sort_by_key(|occupant| occupant.admitted);

        self.rooms = vec![None; new_capacity];
        self.occupied = 0;
        self.method_counts = [0; TravelMethod::COUNT];
        for occupant in residents {
            self.seat_hashed(occupant.method, occupant.admitted);
        }
        info!(
            "hotel expanded to {} rooms ({} occupants re-seated)",
            new_capacity, self.occupied
        );
    }

    // ── Seating internals ───────────────────────────────────────────────

    fn next_ticket(&mut self) -> u64 {
        let ticket = self.admission_clock;
        self.admission_clock += 1;
        ticket
    }

    fn seat_direct(&mut self, room: usize, method: TravelMethod) {
        let sequence = self.method_counts[method.index()];
        let admitted = self.next_ticket();
        self.rooms[room] = Some(Occupant {
            method,
            sequence,
            admitted,
        });
        self.method_counts[method.index()] += 1;
        self.occupied += 1;
    }

    fn seat_hashed(&mut self, method: TravelMethod, admitted: u64) {
        let sequence = self.method_counts[method.index()];
        let room = self.find_room(sequence, method);
        self.rooms[room] = Some(Occupant {
            method,
            sequence,
            admitted,
        });
        self.method_counts[method.index()] += 1;
        self.occupied += 1;
    }

    /// Hashed candidate for a guest. The table is never empty here: every
    /// seating path grows or sizes the hotel first.
    fn start_room(&self, sequence: u64, method: TravelMethod) -> usize {
        self.table
            .room_for(sequence, method, self.rooms.len())
            .unwrap_or(0)
    }

    /// Find a free room for the guest: hash, probe, and on exhaustion grow
    /// by one room and retry from scratch. After [`COLLISION_LIMIT`]
    /// grow-retry rounds, fall back to a linear scan from the candidate —
    /// growth guarantees a free room exists, so seating always terminates.
    fn find_room(&mut self, sequence: u64, method: TravelMethod) -> usize {
        let mut grow_rounds = 0;
        loop {
            let start = self.start_room(sequence, method);
            let outcome = probing::probe_slot(start, self.rooms.len(), |room| {
                self.rooms[room].is_none()
            });
            match outcome {
                Probe::Free(room) => return room,
                Probe::Exhausted if grow_rounds < COLLISION_LIMIT => {
                    self.grow_by(1);
                    grow_rounds += 1;
                }
                Probe::Exhausted => {
                    debug!(
                        "probe budget exhausted for sequence {} ({}); linear scan",
                        sequence,
                        method.label()
                    );
                    return self.first_free_from(start);
                }
            }
        }
    }

    fn first_free_from(&self, start: usize) -> usize {
        let capacity = self.rooms.len();
        (0..capacity)
            .map(|step| (start + step) % capacity)
            .find(|&room| self.rooms[room].is_none())
            .unwrap_or(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(walk: i64, car: i64, boat: i64, plane: i64) -> GuestBatch {
        GuestBatch::new()
            .with(TravelMethod::Walk, walk)
            .with(TravelMethod::Car, car)
            .with(TravelMethod::Boat, boat)
            .with(TravelMethod::Plane, plane)
    }

    fn assert_occupancy_consistent(hotel: &Hotel) {
        let seated = hotel
            .snapshot()
            .iter()
            .filter(|detail| detail.occupant.is_some())
            .count();
        assert_eq!(seated, hotel.occupied());
        assert_eq!(hotel.available_count(), hotel.capacity() - hotel.occupied());
    }

    #[test]
    fn test_first_batch_sizes_uninitialized_hotel() {
        let mut hotel = Hotel::new(0);
        assert!(hotel.is_uninitialized());

        let report = hotel.check_in(&batch(2, 1, 0, 0)).unwrap();
        assert_eq!(report.seated, 3);
        assert_eq!(report.capacity_before, 0);
        assert_eq!(report.capacity_after, 3);
        assert!(!report.rehashed);

        assert_eq!(hotel.capacity(), 3);
        assert_eq!(hotel.occupied(), 3);
        assert_eq!(hotel.available_count(), 0);
        assert_occupancy_consistent(&hotel);
    }

    #[test]
    fn test_fast_path_fills_free_rooms_in_order() {
        let mut hotel = Hotel::new(5);
        hotel.check_in(&batch(2, 1, 0, 0)).unwrap();

        // walk, walk, car into rooms 0, 1, 2
        let r0 = hotel.detail(0).unwrap().occupant.unwrap();
        let r1 = hotel.detail(1).unwrap().occupant.unwrap();
        let r2 = hotel.detail(2).unwrap().occupant.unwrap();
        assert_eq!((r0.method, r0.sequence), (TravelMethod::Walk, 0));
        assert_eq!((r1.method, r1.sequence), (TravelMethod::Walk, 1));
        assert_eq!((r2.method, r2.sequence), (TravelMethod::Car, 0));
        assert_eq!(hotel.available_rooms(), vec![3, 4]);
    }

    #[test]
    fn test_fitting_batch_reduces_available_by_total() {
        let mut hotel = Hotel::new(10);
        let before = hotel.available_count();
        hotel.check_in(&batch(1, 2, 1, 0)).unwrap();
        assert_eq!(hotel.available_count(), before - 4);
        for detail in hotel.snapshot().into_iter().take(4) {
            assert!(detail.occupant.is_some());
        }
    }

    #[test]
    fn test_negative_count_rejected_without_mutation() {
        let mut hotel = Hotel::new(4);
        hotel.check_in(&batch(1, 0, 0, 0)).unwrap();
        let before = hotel.snapshot();

        let err = hotel.check_in(&batch(2, -1, 0, 0)).unwrap_err();
        assert_eq!(
            err,
            HotelError::NegativeCount {
                method: TravelMethod::Car,
                count: -1
            }
        );
        assert_eq!(hotel.snapshot(), before);
        assert_eq!(hotel.method_count(TravelMethod::Walk), 1);
    }

    #[test]
    fn test_zero_total_batch_is_noop() {
        let mut hotel = Hotel::new(0);
        let report = hotel.check_in(&batch(0, 0, 0, 0)).unwrap();
        assert_eq!(report.seated, 0);
        assert!(hotel.is_uninitialized());
    }

    #[test]
    fn test_overflow_batch_grows_and_rehashes() {
        // Scenario from the worked example: 3-room hotel, full, 5 more walk
        // guests arrive. Factor ceil((5+3)/3)+1 = 4, so capacity 12.
        let mut hotel = Hotel::new(0);
        hotel.check_in(&batch(2, 1, 0, 0)).unwrap();
        assert_eq!(hotel.available_count(), 0);

        let report = hotel.check_in(&batch(5, 0, 0, 0)).unwrap();
        assert!(report.rehashed);
        assert_eq!(report.capacity_before, 3);
        assert_eq!(report.capacity_after, 12);

        assert_eq!(hotel.capacity(), 12);
        assert_eq!(hotel.occupied(), 8);
        assert_eq!(hotel.available_count(), 4);
        assert_eq!(hotel.method_count(TravelMethod::Walk), 7);
        assert_eq!(hotel.method_count(TravelMethod::Car), 1);
        assert_occupancy_consistent(&hotel);
    }

    #[test]
    fn test_rehash_preserves_admission_and_sequence_order() {
        let mut hotel = Hotel::new(0);
        hotel.check_in(&batch(2, 1, 0, 0)).unwrap();
        hotel.check_in(&batch(5, 0, 0, 0)).unwrap();

        let mut occupants: Vec<Occupant> = hotel
            .snapshot()
            .into_iter()
            .filter_map(|detail| detail.occupant)
            .collect();
        occupants.sort_by_key(|occupant| occupant.admitted);

        // Relative order per method survives the rehash, and with no
        // checkouts the sequence numbers are rebuilt identically.
        let walk_sequences: Vec<u64> = occupants
            .iter()
            .filter(|o| o.method == TravelMethod::Walk)
            .map(|o| o.sequence)
            .collect();
        assert_eq!(walk_sequences, vec![0, 1, 2, 3, 4, 5, 6]);

        let tickets: Vec<u64> = occupants.iter().map(|o| o.admitted).collect();
        assert_eq!(tickets, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_growth_preserves_occupant_count() {
        let mut hotel = Hotel::new(0);
        hotel.check_in(&batch(3, 2, 1, 1)).unwrap();
        let before = hotel.occupied();

        hotel.ensure_capacity_for(10);
        assert_eq!(hotel.occupied(), before);
        assert!(hotel.capacity() > 7);
        assert_occupancy_consistent(&hotel);

        let capacity = hotel.capacity();
        hotel.grow_by(4);
        assert_eq!(hotel.capacity(), capacity + 4);
        assert_eq!(hotel.occupied(), before);
        assert_occupancy_consistent(&hotel);
    }

    #[test]
    fn test_ensure_capacity_noop_when_batch_fits() {
        let mut hotel = Hotel::new(10);
        hotel.check_in(&batch(2, 0, 0, 0)).unwrap();
        hotel.ensure_capacity_for(8);
        assert_eq!(hotel.capacity(), 10);
    }

    #[test]
    fn test_grow_by_keeps_occupants_in_place() {
        let mut hotel = Hotel::new(3);
        hotel.check_in(&batch(2, 0, 0, 0)).unwrap();
        let before = hotel.snapshot();

        hotel.grow_by(2);
        let after = hotel.snapshot();
        assert_eq!(&after[..3], &before[..]);
        assert!(after[3].occupant.is_none());
        assert!(after[4].occupant.is_none());
    }

    #[test]
    fn test_check_out_then_detail_reports_empty() {
        let mut hotel = Hotel::new(3);
        hotel.check_in(&batch(3, 0, 0, 0)).unwrap();

        assert!(hotel.check_out_at(1));
        assert_eq!(hotel.detail(1).unwrap().occupant, None);
        assert_eq!(hotel.occupied(), 2);

        // Second checkout on the same room is a no-op
        assert!(!hotel.check_out_at(1));
        assert_eq!(hotel.occupied(), 2);
    }

    #[test]
    fn test_check_out_decrements_method_count() {
        let mut hotel = Hotel::new(3);
        hotel.check_in(&batch(0, 2, 0, 0)).unwrap();
        assert_eq!(hotel.method_count(TravelMethod::Car), 2);

        hotel.check_out_at(0);
        assert_eq!(hotel.method_count(TravelMethod::Car), 1);
    }

    #[test]
    fn test_check_in_at_occupied_or_out_of_range_fails() {
        let mut hotel = Hotel::new(2);
        assert!(hotel.check_in_at(0, TravelMethod::Boat));
        assert!(!hotel.check_in_at(0, TravelMethod::Walk));
        assert!(!hotel.check_in_at(5, TravelMethod::Walk));
        assert!(!hotel.check_out_at(5));
    }

    #[test]
    fn test_reseat_after_checkout_continues_sequence() {
        let mut hotel = Hotel::new(0);
        hotel.check_in(&batch(2, 1, 0, 0)).unwrap();

        assert!(hotel.check_out_at(1));
        assert!(hotel.check_in_at(1, TravelMethod::Car));

        let occupant = hotel.detail(1).unwrap().occupant.unwrap();
        assert_eq!(occupant.method, TravelMethod::Car);
        // Car counter was 1, so the new guest continues at sequence 1
        assert_eq!(occupant.sequence, 1);
        assert_eq!(hotel.method_count(TravelMethod::Car), 2);
    }

    #[test]
    fn test_detail_out_of_range() {
        let hotel = Hotel::new(4);
        assert_eq!(
            hotel.detail(4),
            Err(HotelError::InvalidIndex {
                room: 4,
                capacity: 4
            })
        );
    }

    #[test]
    fn test_snapshot_covers_every_room_in_order() {
        let mut hotel = Hotel::new(6);
        hotel.check_in(&batch(1, 1, 0, 0)).unwrap();
        let snapshot = hotel.snapshot();
        assert_eq!(snapshot.len(), 6);
        for (i, detail) in snapshot.iter().enumerate() {
            assert_eq!(detail.room, i);
        }
    }

    #[test]
    fn test_flat_weights_force_probing() {
        // Equal weights collapse every method onto the same candidate
        // stream, so hashed seating must probe (and possibly grow).
        let mut hotel = Hotel::with_table(0, PlacementTable::with_weights([1, 1, 1, 1]));
        hotel.check_in(&batch(2, 2, 0, 0)).unwrap();
        hotel.check_in(&batch(3, 3, 2, 2)).unwrap();

        assert_eq!(hotel.occupied(), 14);
        assert_occupancy_consistent(&hotel);
        // Everyone is retrievable despite the collision-heavy table
        let seated = hotel
            .snapshot()
            .into_iter()
            .filter(|detail| detail.occupant.is_some())
            .count();
        assert_eq!(seated, 14);
    }

    #[test]
    fn test_repeated_growth_never_loses_guests() {
        let mut hotel = Hotel::new(0);
        let mut expected = 0usize;
        for round in 0..6i64 {
            let n = round + 1;
            hotel.check_in(&batch(n, n, 0, n)).unwrap();
            expected += (3 * n) as usize;
            assert_eq!(hotel.occupied(), expected);
            assert_occupancy_consistent(&hotel);
        }
    }
}
