//! Quantile-based break computation with boundary protection.
//!
//! Breaks are cut where the data sits, not at equal intervals: interior
//! boundaries come from percentiles of the sorted sample, get rounded to
//! legible numbers, and are then repaired until exactly the requested number
//! of contiguous ranges covers the absolute domain. Rounding may collapse
//! neighboring boundaries; a single bounded retry at one extra digit of
//! precision recovers them. The first and last range act as buffers between
//! the observed data and the resolved domain bounds, which are pinned last
//! and never rounded.

use super::rounding::{round_legend_value, round_to_decimals};
use super::{BreakRange, Domain};

/// Unique boundaries below this count trigger the precision retry.
const MIN_UNIQUE_BOUNDARIES: usize = 4;

/// Computes `target_count` contiguous ranges over `domain` from a numeric
/// sample.
///
/// The sample does not need to be sorted. All-equal samples collapse to a
/// single degenerate range at that value, and an empty sample yields no
/// ranges; callers that cannot tolerate either are expected to have routed
/// such inputs to the fallback path already. The result can fall short of
/// `target_count` only when rounding leaves too few distinct boundaries to
/// split further.
///
/// # Examples
///
/// ```
/// use choroscale::breaks::{quantile_breaks, Domain};
///
/// let sample: Vec<f64> = (0..100).map(f64::from).collect();
/// let ranges = quantile_breaks(&sample, 7, Domain::new(0.0, 100.0));
///
/// assert_eq!(ranges.len(), 7);
/// assert_eq!(ranges[0].min, 0.0);
/// assert_eq!(ranges[6].max, 100.0);
/// ```
pub fn quantile_breaks(sample: &[f64], target_count: usize, domain: Domain) -> Vec<BreakRange> {
    if sample.is_empty() || target_count == 0 {
        return Vec::new();
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let lowest = sorted[0];
    let highest = sorted[sorted.len() - 1];
    if lowest == highest {
        return vec![BreakRange::new(lowest, lowest)];
    }
    if target_count == 1 {
        return vec![BreakRange::new(domain.floor, domain.ceiling)];
    }

    let cuts = if sorted.len() < target_count {
        equal_width_cuts(target_count, domain)
    } else {
        percentile_cuts(&sorted, target_count)
    };

    let mut boundaries = rounded_boundaries(&cuts, domain, false);
    if boundaries.len() < MIN_UNIQUE_BOUNDARIES {
        boundaries = rounded_boundaries(&cuts, domain, true);
    }

    let mut ranges = ranges_from_boundaries(&boundaries, domain);
    enforce_target_count(&mut ranges, target_count);
    pin_domain_bounds(&mut ranges, domain);
    ranges
}

/// Interior cut points at percentiles `i / (target_count - 1)`,
/// `i = 1..=target_count - 2`, taken nearest-rank from the sorted sample.
fn percentile_cuts(sorted: &[f64], target_count: usize) -> Vec<f64> {
    let len = sorted.len();
    let denominator = (target_count - 1) as f64;
    (1..target_count - 1)
        .map(|i| {
            let fraction = i as f64 / denominator;
            let index = ((fraction * len as f64).floor() as usize).min(len - 1);
            sorted[index]
        })
        .collect()
}

/// Equal-width interior cuts used when the sample is smaller than the
/// target count. Partitions the domain directly, so no bisection is needed
/// afterwards.
fn equal_width_cuts(target_count: usize, domain: Domain) -> Vec<f64> {
    let width = domain.range() / target_count as f64;
    (1..target_count)
        .map(|i| domain.floor + width * i as f64)
        .collect()
}

/// Rounds interior cuts by domain magnitude, brackets them with the
/// untouched domain bounds, sorts, and de-duplicates.
fn rounded_boundaries(cuts: &[f64], domain: Domain, extra_digit: bool) -> Vec<f64> {
    let span = domain.range();
    let mut boundaries = Vec::with_capacity(cuts.len() + 2);
    boundaries.push(domain.floor);
    boundaries.extend(cuts.iter().map(|&cut| round_interior(cut, span, extra_digit)));
    boundaries.push(domain.ceiling);
    boundaries.sort_by(|a, b| a.total_cmp(b));
    boundaries.dedup();
    boundaries
}

/// Rounding schedule for interior boundaries: tight domains keep a decimal,
/// mid-size domains round to whole numbers, and wide domains use legend
/// rounding. `extra_digit` is the bounded retry step, one digit finer at
/// every tier.
fn round_interior(value: f64, domain_span: f64, extra_digit: bool) -> f64 {
    if domain_span <= 10.0 {
        round_to_decimals(value, if extra_digit { 2 } else { 1 })
    } else if domain_span <= 100.0 {
        if extra_digit {
            round_to_decimals(value, 1)
        } else {
            value.round()
        }
    } else if extra_digit {
        value.round()
    } else {
        round_legend_value(value)
    }
}

fn ranges_from_boundaries(boundaries: &[f64], domain: Domain) -> Vec<BreakRange> {
    if boundaries.len() < 2 {
        return vec![BreakRange::new(domain.floor, domain.ceiling)];
    }
    boundaries
        .windows(2)
        .map(|pair| BreakRange::new(pair[0], pair[1]))
        .collect()
}

/// Repairs the range count: surplus ranges are truncated from the tail,
/// missing ones are recovered by bisecting the widest interior range at its
/// legend-rounded midpoint. The first and last range buffer the domain
/// bounds and are only bisected when no interior range exists at all
/// (fewer than 3 ranges), since the initial boundary set always produces
/// one range fewer than requested.
fn enforce_target_count(ranges: &mut Vec<BreakRange>, target_count: usize) {
    ranges.truncate(target_count);
    while ranges.len() < target_count {
        let Some(index) = widest_splittable(ranges) else {
            break;
        };
        let range = ranges[index];
        let midpoint = round_legend_value((range.min + range.max) / 2.0);
        ranges[index] = BreakRange::new(range.min, midpoint);
        ranges.insert(index + 1, BreakRange::new(midpoint, range.max));
    }
}

/// Index of the widest range whose legend-rounded midpoint falls strictly
/// inside it, preferring interior ranges and the earliest on ties. `None`
/// when nothing can be split further.
fn widest_splittable(ranges: &[BreakRange]) -> Option<usize> {
    let (start, end) = if ranges.len() >= 3 {
        (1, ranges.len() - 1)
    } else {
        (0, ranges.len())
    };

    let mut widest: Option<(usize, f64)> = None;
    for index in start..end {
        let range = &ranges[index];
        let midpoint = round_legend_value((range.min + range.max) / 2.0);
        if midpoint <= range.min || midpoint >= range.max {
            continue;
        }
        if widest.map_or(true, |(_, width)| range.width() > width) {
            widest = Some((index, range.width()));
        }
    }
    widest.map(|(index, _)| index)
}

fn pin_domain_bounds(ranges: &mut [BreakRange], domain: Domain) {
    if let Some(first) = ranges.first_mut() {
        first.min = domain.floor;
    }
    if let Some(last) = ranges.last_mut() {
        last.max = domain.ceiling;
    }
}
