//! Field semantics and display formatting.
//!
//! Three small layers, leaves first:
//!
//! - [`semantics`] infers what a field *means* (currency, percent, age, ...)
//!   from nothing but its name, including the abbreviation families common in
//!   demographic datasets (`medhinc_cy`, `unemprt_cy`, `popdens_cy`).
//! - [`value`] renders one number under a [`ValueFormat`]: multiplier,
//!   decimals, thousands separators, prefix/suffix.
//! - [`label`] turns a break range plus its position into the legend string
//!   ("Less than $35,000", "$35,000 - $50,000", "$200,000 or more").
//!
//! Detection never fails. An unrecognized name gets the plain default
//! format, and a non-numeric value reaching the renderer is coerced to its
//! string form instead of raising.

pub mod label;
pub mod semantics;
pub mod value;

pub use label::range_label;
pub use semantics::{detect_format, detect_semantics, FallbackFamily, FieldSemantics};
pub use value::{format_value, ValueFormat};
