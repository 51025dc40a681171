//! Magnitude-aware rounding for break boundaries and legend values.
//!
//! Two policies that look alike but differ in their thresholds and top-end
//! unit. They are kept as two separately named functions on purpose:
//! unifying them would silently change numeric output, and legend rounding
//! additionally serves as the midpoint resolver when a range is bisected
//! during break-count enforcement.

/// Rounds a break boundary to the unit matching its magnitude.
///
/// Values under 10 round to whole numbers, then each decade steps the unit
/// up by one order, capping at a 10,000 unit. Non-finite input passes
/// through unchanged.
pub fn round_break_value(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    if magnitude < 10.0 {
        value.round()
    } else if magnitude < 100.0 {
        round_to_unit(value, 10.0)
    } else if magnitude < 1_000.0 {
        round_to_unit(value, 100.0)
    } else if magnitude < 10_000.0 {
        round_to_unit(value, 1_000.0)
    } else {
        round_to_unit(value, 10_000.0)
    }
}

/// Rounds a value for legend display.
///
/// Coarser than break rounding at the low end (whole numbers up to 100
/// inclusive) and finer at the top (5,000 unit instead of 10,000).
/// Non-finite input passes through unchanged.
pub fn round_legend_value(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    if magnitude <= 100.0 {
        value.round()
    } else if magnitude < 1_000.0 {
        round_to_unit(value, 10.0)
    } else if magnitude < 10_000.0 {
        round_to_unit(value, 100.0)
    } else if magnitude < 100_000.0 {
        round_to_unit(value, 1_000.0)
    } else {
        round_to_unit(value, 5_000.0)
    }
}

/// Rounds to a fixed number of decimal places.
pub(crate) fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn round_to_unit(value: f64, unit: f64) -> f64 {
    (value / unit).round() * unit
}
