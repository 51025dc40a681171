//! Sample-size driven selection of the break count.

/// Maps a sample count to the number of breaks its legend should carry.
///
/// The thresholds are hand-tuned rather than derived from a formula; small
/// samples get few classes so that every class keeps a visible share of the
/// data, and the count saturates at ten, past which a legend stops being
/// readable. Total and monotonically non-decreasing; never fails.
///
/// # Examples
///
/// ```
/// use choroscale::breaks::optimal_break_count;
///
/// assert_eq!(optimal_break_count(0), 1);
/// assert_eq!(optimal_break_count(17), 5);
/// assert_eq!(optimal_break_count(1_000_000), 10);
/// ```
pub fn optimal_break_count(sample_count: u64) -> usize {
    match sample_count {
        0..=1 => 1,
        2..=5 => 2,
        6..=9 => 3,
        10..=16 => 4,
        17..=25 => 5,
        26..=30 => 6,
        31..=42 => 7,
        43..=56 => 8,
        57..=81 => 9,
        _ => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        let expected = [
            (0, 1),
            (1, 1),
            (2, 2),
            (5, 2),
            (6, 3),
            (9, 3),
            (10, 4),
            (16, 4),
            (17, 5),
            (25, 5),
            (26, 6),
            (30, 6),
            (31, 7),
            (42, 7),
            (43, 8),
            (56, 8),
            (57, 9),
            (81, 9),
            (82, 10),
            (u64::MAX, 10),
        ];
        for (count, breaks) in expected {
            assert_eq!(optimal_break_count(count), breaks, "count = {count}");
        }
    }

    #[test]
    fn monotone_and_bounded() {
        let mut previous = 0;
        for count in 0..500 {
            let breaks = optimal_break_count(count);
            assert!((1..=10).contains(&breaks));
            assert!(breaks >= previous, "regressed at count = {count}");
            previous = breaks;
        }
    }
}
