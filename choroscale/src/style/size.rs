//! Point-size interpolation across break indices.

use serde::{Deserialize, Serialize};

/// Linear size ramp for graduated point symbols.
///
/// Sizes are display units (pixels for most renderers). The ramp is linear
/// in the class index and rounds to whole units; a single-class legend sits
/// at the midpoint rather than the minimum so lone symbol sets stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeScale {
    min_size: u32,
    max_size: u32,
}

impl Default for SizeScale {
    fn default() -> Self {
        Self {
            min_size: 8,
            max_size: 32,
        }
    }
}

impl SizeScale {
    /// Creates a ramp between the given sizes; the order of the arguments
    /// does not matter.
    pub fn new(min_size: u32, max_size: u32) -> Self {
        if min_size <= max_size {
            Self { min_size, max_size }
        } else {
            Self {
                min_size: max_size,
                max_size: min_size,
            }
        }
    }

    /// Smallest symbol size on the ramp.
    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    /// Largest symbol size on the ramp.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Symbol size for the class at `index` of `total_breaks`.
    pub fn size_for(&self, index: usize, total_breaks: usize) -> u32 {
        let proportion = if total_breaks <= 1 {
            0.5
        } else {
            index.min(total_breaks - 1) as f64 / (total_breaks - 1) as f64
        };
        let span = (self.max_size - self.min_size) as f64;
        (self.min_size as f64 + proportion * span).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints() {
        let scale = SizeScale::default();
        assert_eq!(scale.size_for(0, 5), 8);
        assert_eq!(scale.size_for(4, 5), 32);
    }

    #[test]
    fn interior_sizes_interpolate_and_round() {
        let scale = SizeScale::new(8, 32);
        // 8 + (1/4) * 24 = 14, 8 + (2/4) * 24 = 20, 8 + (3/4) * 24 = 26.
        assert_eq!(scale.size_for(1, 5), 14);
        assert_eq!(scale.size_for(2, 5), 20);
        assert_eq!(scale.size_for(3, 5), 26);
        // Thirds do not divide evenly and must round.
        assert_eq!(scale.size_for(1, 4), 16);
    }

    #[test]
    fn single_class_sits_at_the_midpoint() {
        assert_eq!(SizeScale::new(10, 30).size_for(0, 1), 20);
    }

    #[test]
    fn index_clamps_to_the_ramp() {
        let scale = SizeScale::default();
        assert_eq!(scale.size_for(99, 5), scale.size_for(4, 5));
    }

    #[test]
    fn reversed_arguments_normalize() {
        assert_eq!(SizeScale::new(32, 8), SizeScale::new(8, 32));
    }

    #[test]
    fn sizes_are_monotone_in_index() {
        let scale = SizeScale::new(6, 40);
        for total in 2..=10 {
            let mut previous = 0;
            for index in 0..total {
                let size = scale.size_for(index, total);
                assert!(size >= previous);
                previous = size;
            }
        }
    }
}
