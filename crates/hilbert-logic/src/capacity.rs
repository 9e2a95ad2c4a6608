//! Growth arithmetic for the room table.
//!
//! Pure math; the registry applies these numbers when a batch does not fit.
//! Capacity only ever grows during the process lifetime — there is no
//! shrink path anywhere in the engine.

/// Bulk expansion factor when `incoming` guests do not fit:
/// `ceil((incoming + capacity) / capacity) + 1`.
///
/// Callers guarantee `capacity > 0`; the zero case is handled by
/// [`grown_capacity`].
pub fn expansion_factor(incoming: usize, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (incoming + capacity).div_ceil(capacity) + 1
}

/// New capacity able to absorb `incoming` more guests.
///
/// Capacity 0 is the uninitialized hotel: the first batch sizes the table
/// to exactly the batch total.
pub fn grown_capacity(incoming: usize, capacity: usize) -> usize {
    if capacity == 0 {
        incoming
    } else {
        capacity * expansion_factor(incoming, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_matches_worked_example() {
        // 5 incoming into a full 3-room hotel: ceil(8/3) + 1 = 4
        assert_eq!(expansion_factor(5, 3), 4);
        assert_eq!(grown_capacity(5, 3), 12);
    }

    #[test]
    fn test_factor_is_at_least_three() {
        // ceil((i + c) / c) >= 2 for i >= 1, so the factor is >= 3
        for capacity in 1..20 {
            for incoming in 1..50 {
                assert!(expansion_factor(incoming, capacity) >= 3);
            }
        }
    }

    #[test]
    fn test_grown_capacity_fits_incoming() {
        for capacity in 1..20 {
            for incoming in 1..50 {
                let grown = grown_capacity(incoming, capacity);
                assert!(grown >= capacity + incoming);
                assert!(grown > capacity);
            }
        }
    }

    #[test]
    fn test_first_batch_sizes_hotel() {
        assert_eq!(grown_capacity(7, 0), 7);
        assert_eq!(grown_capacity(0, 0), 0);
    }

    #[test]
    fn test_exact_fit_boundary() {
        // incoming equal to capacity: ceil(2c/c) + 1 = 3
        assert_eq!(expansion_factor(4, 4), 3);
        assert_eq!(grown_capacity(4, 4), 12);
    }
}
