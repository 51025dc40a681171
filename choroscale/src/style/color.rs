//! Fixed, named color tables for marker and fill styling.

use serde::{Deserialize, Serialize};

/// An RGBA color ready for hand-off to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel, 0-255.
    pub red: u8,
    /// Green channel, 0-255.
    pub green: u8,
    /// Blue channel, 0-255.
    pub blue: u8,
    /// Opacity, 0.0-1.0.
    pub alpha: f32,
}

impl Rgba {
    /// Creates a color from its channels.
    pub const fn new(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// CSS `rgba(...)` rendering.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }

    /// `#RRGGBB` rendering; the alpha channel is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// One named entry of a fixed palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteColor {
    /// Human-readable color name.
    pub name: &'static str,
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Opacity this entry is always drawn with.
    pub alpha: f32,
}

impl PaletteColor {
    /// The entry as a renderable color.
    pub const fn rgba(&self) -> Rgba {
        Rgba::new(self.red, self.green, self.blue, self.alpha)
    }
}

const MARKER_ALPHA: f32 = 0.8;

const fn marker(name: &'static str, red: u8, green: u8, blue: u8) -> PaletteColor {
    PaletteColor {
        name,
        red,
        green,
        blue,
        alpha: MARKER_ALPHA,
    }
}

/// The full ten-color marker ramp, cold to hot.
pub const MARKER_COLORS: [PaletteColor; 10] = [
    marker("deep blue", 13, 71, 161),
    marker("blue", 25, 118, 210),
    marker("light blue", 100, 181, 246),
    marker("teal", 0, 137, 123),
    marker("green", 67, 160, 71),
    marker("light green", 156, 204, 101),
    marker("yellow", 253, 216, 53),
    marker("orange", 251, 140, 0),
    marker("red", 229, 57, 53),
    marker("dark red", 183, 28, 28),
];

/// Curated marker sequence per break count (indices into [`MARKER_COLORS`]).
///
/// Low counts pick perceptually spread colors rather than a prefix of the
/// ramp, so a three-class map still reads blue/yellow/red instead of three
/// blues.
static MARKER_SEQUENCES: [&[usize]; 10] = [
    &[4],
    &[1, 8],
    &[1, 6, 8],
    &[1, 4, 7, 8],
    &[0, 3, 6, 7, 9],
    &[0, 2, 4, 6, 7, 8],
    &[0, 1, 3, 5, 6, 7, 9],
    &[0, 1, 2, 4, 5, 6, 7, 8],
    &[0, 1, 2, 3, 4, 5, 6, 7, 9],
    &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
];

/// The seven-color fill table with banded alphas, paired with the fallback
/// scheme. Alphas step up with the class rank so darker fills also read
/// more opaque.
pub const FILL_COLORS: [PaletteColor; 7] = [
    PaletteColor {
        name: "pale yellow",
        red: 255,
        green: 255,
        blue: 204,
        alpha: 0.45,
    },
    PaletteColor {
        name: "light gold",
        red: 255,
        green: 237,
        blue: 160,
        alpha: 0.45,
    },
    PaletteColor {
        name: "gold",
        red: 254,
        green: 217,
        blue: 118,
        alpha: 0.55,
    },
    PaletteColor {
        name: "orange",
        red: 254,
        green: 178,
        blue: 76,
        alpha: 0.55,
    },
    PaletteColor {
        name: "dark orange",
        red: 253,
        green: 141,
        blue: 60,
        alpha: 0.55,
    },
    PaletteColor {
        name: "red orange",
        red: 252,
        green: 78,
        blue: 42,
        alpha: 0.7,
    },
    PaletteColor {
        name: "dark red",
        red: 227,
        green: 26,
        blue: 28,
        alpha: 0.7,
    },
];

/// The marker palette entry for the class at `index` of `total_breaks`.
///
/// The total is clamped to `[1, 10]` and the index to `[0, total - 1]`, so
/// every call lands on a real entry.
pub fn marker_entry(index: usize, total_breaks: usize) -> &'static PaletteColor {
    let total = total_breaks.clamp(1, MARKER_COLORS.len());
    let sequence = MARKER_SEQUENCES[total - 1];
    let position = index.min(total - 1);
    &MARKER_COLORS[sequence[position]]
}

/// The marker color for the class at `index` of `total_breaks`.
pub fn marker_color(index: usize, total_breaks: usize) -> Rgba {
    marker_entry(index, total_breaks).rgba()
}

/// The fill palette entry for the class at `index`.
pub fn fill_entry(index: usize) -> &'static PaletteColor {
    // The fill table is keyed by 1-based slot, capped at the table length.
    let slot = (index + 1).min(FILL_COLORS.len());
    &FILL_COLORS[slot - 1]
}

/// The fill color for the class at `index`.
pub fn fill_color(index: usize) -> Rgba {
    fill_entry(index).rgba()
}
