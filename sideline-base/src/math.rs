//! Mathematical utilities and decisions.

use euclid::{Point2D, Vector2D};

mod axis;
pub use axis::*;
mod field;
pub use field::*;
mod rect;
pub use rect::*;

/// Unit-of-measure marker for positions on the field plane, in meters.
///
/// The origin is one corner of the field; [`Axis::X`] runs along its length and
/// [`Axis::Y`] across its width.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Field {}

/// Coordinates on the field plane, in meters.
pub type FieldCoordinate = f64;

/// Positions on the field plane (camera and subject positions), in meters.
pub type FieldPoint = Point2D<FieldCoordinate, Field>;

/// Displacements on the field plane, in meters.
pub type FieldVector = Vector2D<FieldCoordinate, Field>;

/// Sort exactly two items; swap them if `a > b`.
#[inline]
#[doc(hidden)]
pub fn sort_two<T: PartialOrd>(a: &mut T, b: &mut T) {
    if *a > *b {
        core::mem::swap(a, b);
    }
}
