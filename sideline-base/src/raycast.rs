//! Casting rays from the camera to the edge of the field.
//!
//! The planner needs to know what lies behind the subject: the far boundary of the field,
//! where spectators and stands form the background of the photograph. These functions
//! intersect a viewing ray with the field rectangle to find that boundary.

use crate::math::{FieldCoordinate, FieldPoint, FieldRect, distance};

// -------------------------------------------------------------------------------------------------

mod ray;
pub use ray::{Crossing, Ray};


// -------------------------------------------------------------------------------------------------

/// Direction components with magnitude smaller than this are treated as exactly parallel
/// to the corresponding axis.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Distance, in meters, at which [`project_ray_to_field()`] places its result when the ray
/// does not cross the field ahead of its origin.
pub const DEFAULT_FALLBACK_DISTANCE_M: FieldCoordinate = 80.0;

/// Casts a ray from `origin` at `angle` radians (counterclockwise from the X axis) and
/// returns the point where it leaves the field.
///
/// If the ray never crosses the field ahead of its origin (for example, because the origin
/// is outside the field and the ray points away from it), the result is instead the point
/// `fallback_distance` meters along the ray, so that there is always something to draw.
///
/// ```
/// # extern crate sideline_base as sideline;
/// use sideline::raycast::{project_ray_to_field, DEFAULT_FALLBACK_DISTANCE_M};
/// use sideline::euclid::point2;
///
/// let edge = project_ray_to_field(point2(10.0, 27.5), 0.0, DEFAULT_FALLBACK_DISTANCE_M);
/// assert_eq!(edge, point2(91.4, 27.5));
/// ```
#[inline]
pub fn project_ray_to_field(
    origin: FieldPoint,
    angle: f64,
    fallback_distance: FieldCoordinate,
) -> FieldPoint {
    project_ray_to_rect(Ray::from_angle(origin, angle), FieldRect::FIELD, fallback_distance)
}

/// Generalization of [`project_ray_to_field()`] to any ray and rectangle.
#[allow(clippy::missing_inline_in_public_items)]
pub fn project_ray_to_rect(
    ray: Ray,
    rect: FieldRect,
    fallback_distance: FieldCoordinate,
) -> FieldPoint {
    match ray.crossing(rect).and_then(Crossing::forward_t) {
        Some(t) => ray.at(t),
        None => {
            log::trace!("{ray:?} does not cross {rect:?}; using fallback distance");
            ray.at(fallback_distance)
        }
    }
}

/// The place where the camera's line of sight meets the field boundary.
///
/// Produced by [`distance_to_view_boundary()`].
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBoundary {
    /// Point on (or, in the fallback case, beyond) the field boundary.
    pub point: FieldPoint,
    /// Distance from the camera to [`Self::point`], in meters.
    pub distance: FieldCoordinate,
}

/// Finds where the camera's line of sight at `view_angle` leaves the field, and how far
/// away that is. This is where the background of the shot lies.
#[inline]
pub fn distance_to_view_boundary(camera: FieldPoint, view_angle: f64) -> ViewBoundary {
    view_boundary_with_fallback(camera, view_angle, DEFAULT_FALLBACK_DISTANCE_M)
}

/// As [`distance_to_view_boundary()`], with a chosen fallback distance for lines of sight
/// that miss the field.
#[inline]
pub fn view_boundary_with_fallback(
    camera: FieldPoint,
    view_angle: f64,
    fallback_distance: FieldCoordinate,
) -> ViewBoundary {
    let point = project_ray_to_field(camera, view_angle, fallback_distance);
    ViewBoundary {
        point,
        distance: distance(camera, point),
    }
}

/// The visible wedge of the field: the camera position and the two points where the
/// edges of the horizontal field of view meet the field boundary.
///
/// Produced by [`fov_cone()`].
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FovCone {
    /// The camera position.
    pub apex: FieldPoint,
    /// End of the edge ray at `view_angle - horizontal_fov / 2`.
    pub left: FieldPoint,
    /// End of the edge ray at `view_angle + horizontal_fov / 2`.
    pub right: FieldPoint,
}

impl FovCone {
    /// The cone as a triangle, in drawing order.
    #[inline]
    pub fn vertices(&self) -> [FieldPoint; 3] {
        [self.left, self.apex, self.right]
    }
}

/// Computes the visible wedge of the field for a camera at `camera` facing `view_angle`
/// with a lens of the given horizontal field of view (both in radians).
#[inline]
pub fn fov_cone(camera: FieldPoint, view_angle: f64, horizontal_fov: f64) -> FovCone {
    fov_cone_with_fallback(camera, view_angle, horizontal_fov, DEFAULT_FALLBACK_DISTANCE_M)
}

/// As [`fov_cone()`], with a chosen fallback distance for edge rays that miss the field.
#[inline]
pub fn fov_cone_with_fallback(
    camera: FieldPoint,
    view_angle: f64,
    horizontal_fov: f64,
    fallback_distance: FieldCoordinate,
) -> FovCone {
    let half = horizontal_fov / 2.0;
    FovCone {
        apex: camera,
        left: project_ray_to_field(camera, view_angle - half, fallback_distance),
        right: project_ray_to_field(camera, view_angle + half, fallback_distance),
    }
}
