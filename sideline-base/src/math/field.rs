//! Dimensions of the field and the positioning rules that derive from them.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{FieldCoordinate, FieldPoint, FieldRect, FieldVector};

/// Length of the field along [`Axis::X`](crate::math::Axis::X), in meters.
pub const FIELD_LENGTH_M: FieldCoordinate = 91.4;

/// Width of the field along [`Axis::Y`](crate::math::Axis::Y), in meters.
pub const FIELD_WIDTH_M: FieldCoordinate = 55.0;

/// How far outside the field the camera may be placed, in meters.
pub const CAMERA_MARGIN_M: FieldCoordinate = 2.0;

/// Camera-to-subject displacements shorter than this, in meters, are considered to have
/// no direction.
pub const MIN_VIEW_VECTOR_LENGTH_M: FieldCoordinate = 1e-3;

/// Euclidean distance between two points, in meters.
#[inline]
pub fn distance(a: FieldPoint, b: FieldPoint) -> FieldCoordinate {
    (a - b).length()
}

/// Moves a subject position onto the field, clamping each coordinate independently.
///
/// This is idempotent: clamping an already clamped position changes nothing.
///
/// ```
/// # extern crate sideline_base as sideline;
/// use sideline::math::{clamp_field_position, FieldPoint};
///
/// assert_eq!(
///     clamp_field_position(FieldPoint::new(-4.0, 60.0)),
///     FieldPoint::new(0.0, 55.0),
/// );
/// ```
#[inline]
pub fn clamp_field_position(position: FieldPoint) -> FieldPoint {
    FieldRect::FIELD.clamp_point(position)
}

/// Moves a camera position into the area it may occupy: the field plus
/// [`CAMERA_MARGIN_M`] beyond each edge.
#[inline]
pub fn clamp_camera_position(position: FieldPoint) -> FieldPoint {
    FieldRect::FIELD.expand(CAMERA_MARGIN_M).clamp_point(position)
}

/// Direction the camera faces when aimed at the subject, as an angle in radians
/// counterclockwise from [`Axis::X`](crate::math::Axis::X).
///
/// If the camera and subject are (nearly) in the same place, so that no direction
/// is defined, the camera is taken to face the center of the field instead.
/// "Nearly" means the length of the displacement is below [`MIN_VIEW_VECTOR_LENGTH_M`];
/// the components are not tested separately, so a displacement of (0.0009, 0.0009)
/// still gives a direction.
#[inline]
pub fn view_angle(camera: FieldPoint, subject: FieldPoint) -> f64 {
    let view_vector = subject - camera;
    if view_vector.length() >= MIN_VIEW_VECTOR_LENGTH_M {
        direction_angle(view_vector)
    } else {
        log::trace!("camera and subject coincide at {camera:?}; facing field center");
        direction_angle(FieldRect::FIELD.center() - camera)
    }
}

/// Exact `atan2`; `euclid`'s `angle_from_x_axis()` is an approximation.
#[inline]
fn direction_angle(v: FieldVector) -> f64 {
    v.y.atan2(v.x)
}
