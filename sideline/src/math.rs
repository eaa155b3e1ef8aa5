//! Field geometry: coordinate types, the field rectangle, and positioning rules.

pub use sideline_base::math::*;
