/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

use crate::math::{Axis, FieldCoordinate, FieldPoint, FieldRect, FieldVector, sort_two};

use super::PARALLEL_EPSILON;

/// A ray on the field plane; a half-infinite line segment.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Ray {
    /// The sole endpoint of the ray.
    pub origin: FieldPoint,

    /// The direction in which the ray extends infinitely.
    ///
    /// Distances along the ray, such as [`Crossing::t_exit`], are measured in multiples of
    /// this vector; rays made by [`Ray::from_angle()`] have a unit-length direction, so
    /// their `t` values are meters.
    pub direction: FieldVector,
}

impl Ray {
    /// Constructs a [`Ray`] from convertible types (e.g. tuples or 2-element arrays).
    /// Other than the use of [`Into`], this is equivalent to a struct literal.
    ///
    /// ```
    /// # extern crate sideline_base as sideline;
    /// use sideline::euclid::{point2, vec2};
    /// use sideline::raycast::Ray;
    ///
    /// assert_eq!(
    ///     Ray::new([1., 2.], [3., 4.]),
    ///     Ray {
    ///         origin: point2(1., 2.),
    ///         direction: vec2(3., 4.),
    ///     }
    /// );
    /// ```
    #[allow(clippy::missing_inline_in_public_items)] // is generic already
    pub fn new(origin: impl Into<FieldPoint>, direction: impl Into<FieldVector>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// Constructs a ray with a unit-length direction at `angle` radians counterclockwise
    /// from [`Axis::X`].
    #[inline]
    pub fn from_angle(origin: FieldPoint, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            origin,
            direction: FieldVector::new(cos, sin),
        }
    }

    /// Returns the point `t` direction-lengths along the ray.
    #[inline]
    pub fn at(self, t: FieldCoordinate) -> FieldPoint {
        self.origin + self.direction * t
    }

    /// Computes the parameter interval over which the line containing this ray lies within
    /// `rect`, using the slab method.
    ///
    /// Returns [`None`] if the line misses the rectangle or the ray has a NaN component.
    /// The interval may begin or end behind the origin (negative `t`).
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn crossing(self, rect: FieldRect) -> Option<Crossing> {
        let mut t_enter = FieldCoordinate::NEG_INFINITY;
        let mut t_exit = FieldCoordinate::INFINITY;
        for axis in Axis::ALL {
            let (slab_enter, slab_exit) = slab_interval(
                self.origin[axis],
                self.direction[axis],
                rect.lower_bounds()[axis],
                rect.upper_bounds()[axis],
            );
            // max() and min() would discard a NaN bound.
            if slab_enter.is_nan() || slab_exit.is_nan() {
                return None;
            }
            t_enter = t_enter.max(slab_enter);
            t_exit = t_exit.min(slab_exit);
        }

        if t_enter <= t_exit {
            Some(Crossing { t_enter, t_exit })
        } else {
            None
        }
    }
}

/// Parametric interval `[t_enter, t_exit]` over which a [`Ray`]'s line is inside a
/// rectangle. Produced by [`Ray::crossing()`].
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    /// Parameter at which the line enters the rectangle.
    pub t_enter: FieldCoordinate,
    /// Parameter at which the line leaves the rectangle.
    pub t_exit: FieldCoordinate,
}

impl Crossing {
    /// The parameter of the boundary point to report for a ray leaving its origin:
    /// the exit if it is ahead of the origin, else the entry.
    ///
    /// Returns [`None`] if that parameter is not finite and positive, meaning the
    /// rectangle is entirely behind the ray.
    #[inline]
    pub fn forward_t(self) -> Option<FieldCoordinate> {
        let t = if self.t_exit > 0.0 {
            self.t_exit
        } else {
            self.t_enter
        };
        (t.is_finite() && t > 0.0).then_some(t)
    }
}

/// Entry and exit parameters of a ray against the pair of lines `lower` and `upper` on
/// one axis. Near-zero direction components are treated as exactly parallel, in which
/// case the slab contains either the whole line or none of it.
fn slab_interval(
    origin: FieldCoordinate,
    direction: FieldCoordinate,
    lower: FieldCoordinate,
    upper: FieldCoordinate,
) -> (FieldCoordinate, FieldCoordinate) {
    if direction.abs() < PARALLEL_EPSILON {
        if lower <= origin && origin <= upper {
            (FieldCoordinate::NEG_INFINITY, FieldCoordinate::INFINITY)
        } else {
            (FieldCoordinate::INFINITY, FieldCoordinate::NEG_INFINITY)
        }
    } else {
        let mut t1 = (lower - origin) / direction;
        let mut t2 = (upper - origin) / direction;
        sort_two(&mut t1, &mut t2);
        (t1, t2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::point2;
    use rstest::rstest;

    #[test]
    fn from_angle_is_unit_length() {
        for angle in [0.0, 0.5, 1.0, 2.0, -3.0, 10.0] {
            let ray = Ray::from_angle(point2(1., 1.), angle);
            assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn at() {
        let ray = Ray::new([1., 2.], [3., -1.]);
        assert_eq!(ray.at(0.0), point2(1., 2.));
        assert_eq!(ray.at(2.0), point2(7., 0.));
    }

    #[test]
    fn slab_parallel_inside_and_outside() {
        assert_eq!(
            slab_interval(5.0, 0.00001, 0.0, 10.0),
            (f64::NEG_INFINITY, f64::INFINITY)
        );
        assert_eq!(
            slab_interval(-5.0, -0.00001, 0.0, 10.0),
            (f64::INFINITY, f64::NEG_INFINITY)
        );
    }

    #[test]
    fn slab_negative_direction_is_sorted() {
        assert_eq!(slab_interval(5.0, -1.0, 0.0, 10.0), (-5.0, 5.0));
    }

    #[test]
    fn crossing_miss() {
        let ray = Ray::new([-5., -5.], [-1., 0.]);
        assert_eq!(ray.crossing(FieldRect::FIELD), None);
    }

    #[test]
    fn crossing_hit() {
        let ray = Ray::new([10., 5.], [1., 0.]);
        assert_eq!(
            ray.crossing(FieldRect::FIELD),
            Some(Crossing {
                t_enter: -10.0,
                t_exit: 81.4,
            })
        );
    }

    #[rstest]
    #[case::origin_x([f64::NAN, 5.], [1., 0.])]
    #[case::origin_y([10., f64::NAN], [1., 0.])]
    #[case::origin_parallel_axis([10., f64::NAN], [0., 1.])]
    #[case::direction_x([10., 5.], [f64::NAN, 1.])]
    #[case::direction_both([10., 5.], [f64::NAN, f64::NAN])]
    fn crossing_nan_is_miss(#[case] origin: [f64; 2], #[case] direction: [f64; 2]) {
        let ray = Ray::new(origin, direction);
        assert_eq!(ray.crossing(FieldRect::FIELD), None);
    }

    #[test]
    fn forward_t_prefers_exit() {
        let c = Crossing {
            t_enter: 2.0,
            t_exit: 5.0,
        };
        assert_eq!(c.forward_t(), Some(5.0));
        let behind = Crossing {
            t_enter: -5.0,
            t_exit: -2.0,
        };
        assert_eq!(behind.forward_t(), None);
        let unbounded = Crossing {
            t_enter: f64::NEG_INFINITY,
            t_exit: f64::INFINITY,
        };
        assert_eq!(unbounded.forward_t(), None);
    }
}
