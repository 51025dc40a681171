//! Single-value rendering under a display format.

use serde::{Deserialize, Serialize};

/// Presentation descriptor for a field's values.
///
/// The multiplier is applied before rounding (for fields stored at a
/// different scale than they are displayed); decimals count digits after the
/// point; prefix and suffix wrap the rendered number verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFormat {
    /// Text placed before the number (`"$"`).
    pub prefix: String,
    /// Text placed after the number (`"%"`, `" yrs"`).
    pub suffix: String,
    /// Digits after the decimal point.
    pub decimals: u8,
    /// Scale factor applied before rounding.
    pub multiplier: f64,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            decimals: 2,
            multiplier: 1.0,
        }
    }
}

impl ValueFormat {
    /// Plain number with the given decimal count.
    pub fn plain(decimals: u8) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }

    /// Dollar-prefixed whole numbers.
    pub fn currency() -> Self {
        Self {
            prefix: "$".to_string(),
            decimals: 0,
            ..Self::default()
        }
    }

    /// Percent-suffixed numbers with one decimal.
    pub fn percent() -> Self {
        Self {
            suffix: "%".to_string(),
            decimals: 1,
            ..Self::default()
        }
    }

    /// Suffixed numbers with the given decimal count.
    pub fn suffixed(suffix: &str, decimals: u8) -> Self {
        Self {
            suffix: suffix.to_string(),
            decimals,
            ..Self::default()
        }
    }

    /// Returns the format with a different prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the format with a different multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

/// Renders one value under a format.
///
/// Applies the multiplier, rounds to the format's decimals, inserts
/// thousands separators, and wraps with prefix/suffix. Non-finite values are
/// coerced to their plain string form with no affixes rather than raising;
/// negative zero renders as plain zero.
///
/// # Examples
///
/// ```
/// use choroscale::format::{format_value, ValueFormat};
///
/// let dollars = ValueFormat::currency();
/// assert_eq!(format_value(1_234_567.0, &dollars), "$1,234,567");
///
/// let percent = ValueFormat::percent();
/// assert_eq!(format_value(4.25, &percent), "4.2%");
/// ```
pub fn format_value(value: f64, format: &ValueFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scaled = value * format.multiplier;
    let mut rendered = format!("{scaled:.precision$}", precision = format.decimals as usize);
    if rendered.starts_with('-') && rendered[1..].chars().all(|c| c == '0' || c == '.') {
        rendered.remove(0);
    }

    format!(
        "{}{}{}",
        format.prefix,
        group_thousands(&rendered),
        format.suffix
    )
}

/// Inserts `,` separators into the integer part of an already-rendered
/// number.
fn group_thousands(rendered: &str) -> String {
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(unsigned.len() + integer.len() / 3 + 1);
    grouped.push_str(sign);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_with_separators() {
        assert_eq!(format_value(1_234_567.0, &ValueFormat::currency()), "$1,234,567");
        assert_eq!(format_value(35_000.0, &ValueFormat::currency()), "$35,000");
        assert_eq!(format_value(950.0, &ValueFormat::currency()), "$950");
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(format_value(4.25, &ValueFormat::percent()), "4.2%");
        assert_eq!(format_value(12.35, &ValueFormat::percent()), "12.3%");
        assert_eq!(format_value(100.0, &ValueFormat::percent()), "100.0%");
    }

    #[test]
    fn plain_decimals() {
        assert_eq!(format_value(0.4567, &ValueFormat::plain(2)), "0.46");
        assert_eq!(format_value(1234.5, &ValueFormat::plain(0)), "1,234"); // ties to even
        assert_eq!(format_value(1235.5, &ValueFormat::plain(0)), "1,236");
    }

    #[test]
    fn suffix_and_multiplier() {
        let density = ValueFormat::suffixed("/sq mi", 0);
        assert_eq!(format_value(1_205.7, &density), "1,206/sq mi");

        let share = ValueFormat::percent().with_multiplier(100.0);
        assert_eq!(format_value(0.042, &share), "4.2%");
    }

    #[test]
    fn negative_values_keep_sign_inside_prefix() {
        assert_eq!(format_value(-2.5, &ValueFormat::percent()), "-2.5%");
        assert_eq!(
            format_value(-1_234_567.0, &ValueFormat::plain(0)),
            "-1,234,567"
        );
    }

    #[test]
    fn negative_zero_normalizes() {
        assert_eq!(format_value(-0.2, &ValueFormat::plain(0)), "0");
        assert_eq!(format_value(-0.004, &ValueFormat::percent()), "0.0%");
    }

    #[test]
    fn non_finite_coerces_to_string() {
        assert_eq!(format_value(f64::NAN, &ValueFormat::currency()), "NaN");
        assert_eq!(format_value(f64::INFINITY, &ValueFormat::plain(0)), "inf");
        assert_eq!(format_value(f64::NEG_INFINITY, &ValueFormat::plain(0)), "-inf");
    }
}
