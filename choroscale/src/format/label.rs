//! Legend label rendering for break ranges.

use super::{format_value, ValueFormat};

/// Renders the legend label for the range at `index` of `total`.
///
/// A single-class legend shows the value itself (or `"A - B"` when the range
/// has width). In multi-class legends the first class reads
/// `"Less than {max}"`, the last `"{min} or more"`, and everything between
/// `"{min} - {max}"`; the open-ended ends absorb the buffer between the
/// observed data and the absolute domain bounds.
///
/// # Examples
///
/// ```
/// use choroscale::format::{range_label, ValueFormat};
///
/// let dollars = ValueFormat::currency();
/// assert_eq!(range_label(0.0, 35_000.0, 0, 5, &dollars), "Less than $35,000");
/// assert_eq!(range_label(200_000.0, 450_000.0, 4, 5, &dollars), "$200,000 or more");
/// assert_eq!(range_label(35_000.0, 50_000.0, 1, 5, &dollars), "$35,000 - $50,000");
/// ```
pub fn range_label(min: f64, max: f64, index: usize, total: usize, format: &ValueFormat) -> String {
    if total <= 1 {
        if min == max {
            return format_value(min, format);
        }
        return format!("{} - {}", format_value(min, format), format_value(max, format));
    }
    if index == 0 {
        format!("Less than {}", format_value(max, format))
    } else if index + 1 >= total {
        format!("{} or more", format_value(min, format))
    } else {
        format!("{} - {}", format_value(min, format), format_value(max, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_class_shapes() {
        let format = ValueFormat::plain(0);
        assert_eq!(range_label(0.0, 20.0, 0, 5, &format), "Less than 20");
        assert_eq!(range_label(20.0, 40.0, 1, 5, &format), "20 - 40");
        assert_eq!(range_label(40.0, 60.0, 2, 5, &format), "40 - 60");
        assert_eq!(range_label(60.0, 80.0, 3, 5, &format), "60 - 80");
        assert_eq!(range_label(80.0, 100.0, 4, 5, &format), "80 or more");
    }

    #[test]
    fn single_class_shows_the_value() {
        let format = ValueFormat::plain(0);
        assert_eq!(range_label(10.0, 10.0, 0, 1, &format), "10");
        assert_eq!(range_label(10.0, 30.0, 0, 1, &format), "10 - 30");
    }

    #[test]
    fn two_classes_have_no_middle() {
        let format = ValueFormat::percent();
        assert_eq!(range_label(0.0, 50.0, 0, 2, &format), "Less than 50.0%");
        assert_eq!(range_label(50.0, 100.0, 1, 2, &format), "50.0% or more");
    }

    #[test]
    fn formats_flow_through() {
        let dollars = ValueFormat::currency();
        assert_eq!(
            range_label(35_000.0, 50_000.0, 2, 7, &dollars),
            "$35,000 - $50,000"
        );
    }
}
