//! Visual encodings: fixed color palettes and point-size ramps.
//!
//! Two independent color tables serve two styling targets. The marker
//! palette drives data-driven classes (curated sequences for one through ten
//! classes, constant alpha); the fill palette is the seven-class banded table
//! paired with the fallback scheme. The tables are not interchangeable:
//! marker entries share one alpha, fill entries carry banded alphas.
//!
//! All tables are compile-time constants; nothing here allocates beyond the
//! strings a renderer asks for.

pub mod color;
pub mod size;

pub use color::{fill_color, fill_entry, marker_color, marker_entry, PaletteColor, Rgba};
pub use size::SizeScale;
