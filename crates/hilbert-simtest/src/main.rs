//! Hilbert Headless Validation Harness
//!
//! Drives the room-allocation engine through scripted scenarios and
//! randomized sweeps entirely in-process — no console menu, no files, no
//! rendering. Stands in for the interactive front end the engine is
//! designed to sit under.
//!
//! Usage:
//!   cargo run -p hilbert-simtest
//!   cargo run -p hilbert-simtest -- --verbose

use hilbert_logic::capacity;
use hilbert_logic::error::HotelError;
use hilbert_logic::guest::{GuestBatch, RoomDetail, TravelMethod};
use hilbert_logic::placement::PlacementTable;
use hilbert_logic::probing::{self, Probe, COLLISION_LIMIT};
use hilbert_logic::registry::Hotel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// ── Scripted scenario data (the shape an embedding layer would feed) ────

const SCENARIO_JSON: &str = r#"[
    { "walk": 2, "car": 1, "boat": 0, "plane": 0 },
    { "walk": 5, "car": 0, "boat": 0, "plane": 0 }
]"#;

#[derive(Debug, Deserialize)]
struct ScenarioStep {
    walk: i64,
    car: i64,
    boat: i64,
    plane: i64,
}

impl ScenarioStep {
    fn to_batch(&self) -> GuestBatch {
        batch(self.walk, self.car, self.boat, self.plane)
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.into(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Hilbert Allocation Harness ===\n");

    let mut results = Vec::new();

    // 1. Placement determinism and spread
    results.extend(validate_placement(verbose));

    // 2. Probe budget behavior
    results.extend(validate_probing(verbose));

    // 3. Growth arithmetic
    results.extend(validate_growth_math(verbose));

    // 4. Scripted check-in scenarios
    results.extend(validate_scenarios(verbose));

    // 5. Randomized invariant sweep
    results.extend(validate_random_sweep(verbose));

    // 6. Snapshot export shape
    results.extend(validate_snapshot_export(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Placement ────────────────────────────────────────────────────────

fn validate_placement(verbose: bool) -> Vec<TestResult> {
    println!("--- Placement ---");
    let mut results = Vec::new();
    let table = PlacementTable::default();

    let mut deterministic = true;
    let mut in_range = true;
    for capacity in 1..64usize {
        for sequence in 0..128u64 {
            for method in TravelMethod::ALL {
                let a = table.room_for(sequence, method, capacity);
                let b = table.room_for(sequence, method, capacity);
                if a != b {
                    deterministic = false;
                }
                if let Ok(room) = a {
                    if room >= capacity {
                        in_range = false;
                    }
                }
            }
        }
    }
    results.push(TestResult::new(
        "placement_deterministic",
        deterministic,
        "identical candidates across repeated calls".into(),
    ));
    results.push(TestResult::new(
        "placement_in_range",
        in_range,
        "every candidate below capacity".into(),
    ));

    let zero = table.room_for(0, TravelMethod::Walk, 0);
    results.push(TestResult::new(
        "placement_zero_capacity",
        zero == Err(HotelError::ZeroCapacity),
        format!("capacity 0 yields {:?}", zero),
    ));

    // Sequential sequences must not pile onto a few slots
    let capacity = 32usize;
    let mut seen = std::collections::HashSet::new();
    for sequence in 0..capacity as u64 {
        if let Ok(room) = table.room_for(sequence, TravelMethod::Boat, capacity) {
            seen.insert(room);
        }
    }
    results.push(TestResult::new(
        "placement_spread",
        seen.len() == capacity,
        format!("{} distinct slots from {} sequential guests", seen.len(), capacity),
    ));

    if verbose {
        println!("  spread sample: {} slots", seen.len());
    }
    results
}

// ── 2. Probing ──────────────────────────────────────────────────────────

fn validate_probing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Probing ---");
    let mut results = Vec::new();

    let free_start = probing::probe_slot(4, 9, |_| true);
    results.push(TestResult::new(
        "probe_free_start",
        free_start == Probe::Free(4),
        format!("free start resolved to {:?}", free_start),
    ));

    let mut inspected = 0u32;
    let exhausted = probing::probe_slot(0, 16, |_| {
        inspected += 1;
        false
    });
    results.push(TestResult::new(
        "probe_bounded",
        exhausted == Probe::Exhausted && inspected == COLLISION_LIMIT,
        format!("gave up after {} collisions", inspected),
    ));

    // Quadratic offsets: start, +1, +4
    let occupied = [3usize, 4];
    let resolved = probing::probe_slot(3, 12, |room| !occupied.contains(&room));
    results.push(TestResult::new(
        "probe_quadratic_offsets",
        resolved == Probe::Free(7),
        format!("collided twice then resolved to {:?}", resolved),
    ));

    results
}

// ── 3. Growth math ──────────────────────────────────────────────────────

fn validate_growth_math(verbose: bool) -> Vec<TestResult> {
    println!("--- Growth math ---");
    let mut results = Vec::new();

    let worked_example = capacity::expansion_factor(5, 3) == 4
        && capacity::grown_capacity(5, 3) == 12;
    results.push(TestResult::new(
        "growth_worked_example",
        worked_example,
        "5 guests into a full 3-room hotel quadruples it".into(),
    ));

    let mut always_fits = true;
    for cap in 1..50usize {
        for incoming in 1..80usize {
            let grown = capacity::grown_capacity(incoming, cap);
            if grown < cap + incoming || grown <= cap {
                always_fits = false;
            }
        }
    }
    results.push(TestResult::new(
        "growth_always_fits",
        always_fits,
        "grown capacity covers current plus incoming".into(),
    ));

    results.push(TestResult::new(
        "growth_first_batch",
        capacity::grown_capacity(9, 0) == 9,
        "capacity 0 sized by first batch".into(),
    ));

    if verbose {
        println!("  factor(5,3) = {}", capacity::expansion_factor(5, 3));
    }
    results
}

// ── 4. Scripted scenarios ───────────────────────────────────────────────

fn batch(walk: i64, car: i64, boat: i64, plane: i64) -> GuestBatch {
    GuestBatch::new()
        .with(TravelMethod::Walk, walk)
        .with(TravelMethod::Car, car)
        .with(TravelMethod::Boat, boat)
        .with(TravelMethod::Plane, plane)
}

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Scripted scenarios ---");
    let mut results = Vec::new();

    let steps: Vec<ScenarioStep> = match serde_json::from_str(SCENARIO_JSON) {
        Ok(steps) => steps,
        Err(e) => {
            results.push(TestResult::new(
                "scenario_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };
    if steps.len() < 2 {
        results.push(TestResult::new(
            "scenario_parse",
            false,
            format!("expected 2 scenario steps, found {}", steps.len()),
        ));
        return results;
    }

    // Sizing batch on an uninitialized hotel
    let mut hotel = Hotel::new(0);
    let report = hotel.check_in(&steps[0].to_batch());
    let sized = report.is_ok()
        && hotel.capacity() == 3
        && hotel.occupied() == 3
        && hotel.available_count() == 0;
    results.push(TestResult::new(
        "scenario_first_batch_sizes",
        sized,
        format!(
            "capacity {} occupied {} available {}",
            hotel.capacity(),
            hotel.occupied(),
            hotel.available_count()
        ),
    ));

    // Overflow batch grows by the bulk factor and rehashes
    let report = hotel.check_in(&steps[1].to_batch());
    let grown = matches!(report, Ok(r) if r.rehashed)
        && hotel.capacity() == 12
        && hotel.occupied() == 8
        && hotel.available_count() == 4;
    results.push(TestResult::new(
        "scenario_overflow_grows",
        grown,
        format!(
            "capacity {} occupied {} available {}",
            hotel.capacity(),
            hotel.occupied(),
            hotel.available_count()
        ),
    ));

    // Checkout then targeted check-in continues the method sequence
    let checked_out = hotel.check_out_at(1);
    let reseated = hotel.check_in_at(1, TravelMethod::Car);
    let continued = match hotel.detail(1) {
        Ok(RoomDetail {
            occupant: Some(occupant),
            ..
        }) => occupant.method == TravelMethod::Car && occupant.sequence == 1,
        _ => false,
    };
    results.push(TestResult::new(
        "scenario_checkout_reseat",
        checked_out && reseated && continued,
        "car sequence continued after checkout".into(),
    ));

    // Double checkout is a boolean no-op
    let first = hotel.check_out_at(0);
    let second = hotel.check_out_at(0);
    results.push(TestResult::new(
        "scenario_double_checkout",
        first && !second,
        format!("first {:?}, second {:?}", first, second),
    ));

    // Negative batch rejected without mutation
    let before = hotel.snapshot();
    let rejected = hotel.check_in(&batch(1, -2, 0, 0));
    results.push(TestResult::new(
        "scenario_negative_rejected",
        rejected.is_err() && hotel.snapshot() == before,
        format!("{:?}", rejected),
    ));

    if verbose {
        println!("  final capacity {}", hotel.capacity());
    }
    results
}

// ── 5. Randomized sweep ─────────────────────────────────────────────────

fn validate_random_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(0xB0A7);

    let mut hotel = Hotel::new(0);
    let mut ok = true;
    let mut detail = String::new();
    let rounds = 300;

    for round in 0..rounds {
        let incoming = GuestBatch::new()
            .with(TravelMethod::Walk, rng.gen_range(0..6))
            .with(TravelMethod::Car, rng.gen_range(0..6))
            .with(TravelMethod::Boat, rng.gen_range(0..4))
            .with(TravelMethod::Plane, rng.gen_range(0..4));
        if hotel.check_in(&incoming).is_err() {
            ok = false;
            detail = format!("round {}: non-negative batch rejected", round);
            break;
        }

        // Random checkouts, including some misses on empty rooms
        if hotel.capacity() > 0 {
            for _ in 0..rng.gen_range(0..5usize) {
                let room = rng.gen_range(0..hotel.capacity());
                hotel.check_out_at(room);
            }
        }

        let seated = hotel
            .snapshot()
            .iter()
            .filter(|d| d.occupant.is_some())
            .count();
        if seated != hotel.occupied()
            || hotel.occupied() + hotel.available_count() != hotel.capacity()
            || hotel.available_rooms().len() != hotel.available_count()
        {
            ok = false;
            detail = format!("round {}: occupancy bookkeeping diverged", round);
            break;
        }
    }
    if ok {
        detail = format!(
            "{} rounds, final capacity {} occupied {}",
            rounds,
            hotel.capacity(),
            hotel.occupied()
        );
    }
    results.push(TestResult::new("random_sweep_invariants", ok, detail));

    if verbose {
        println!(
            "  final: capacity {} occupied {}",
            hotel.capacity(),
            hotel.occupied()
        );
    }
    results
}

// ── 6. Snapshot export ──────────────────────────────────────────────────

fn validate_snapshot_export(verbose: bool) -> Vec<TestResult> {
    println!("--- Snapshot export ---");
    let mut results = Vec::new();

    let mut hotel = Hotel::new(0);
    let _ = hotel.check_in(&batch(2, 1, 1, 0));
    let snapshot = hotel.snapshot();

    let round_trip = serde_json::to_string(&snapshot)
        .ok()
        .and_then(|json| serde_json::from_str::<Vec<RoomDetail>>(&json).ok())
        .map(|parsed| parsed == snapshot)
        .unwrap_or(false);
    results.push(TestResult::new(
        "snapshot_json_round_trip",
        round_trip,
        format!("{} rooms serialized", snapshot.len()),
    ));

    let ordered = snapshot
        .iter()
        .enumerate()
        .all(|(i, d)| d.room == i);
    results.push(TestResult::new(
        "snapshot_index_order",
        ordered,
        "rows emitted in room order".into(),
    ));

    if verbose {
        for d in &snapshot {
            println!("  room {} -> {}", d.room, d.guest_label());
        }
    }
    results
}
