use core::fmt;

use euclid::Point2D;

use crate::math::{
    Axis, FIELD_LENGTH_M, FIELD_WIDTH_M, FieldCoordinate, FieldPoint, FieldVector,
};

/// Axis-aligned rectangle on the field plane, with continuous coordinates in meters.
///
/// The boundary is considered part of the rectangle.
#[derive(Copy, Clone, PartialEq)]
pub struct FieldRect {
    // The upper >= lower checks on construction reject NaNs.
    lower_bounds: FieldPoint,
    upper_bounds: FieldPoint,
}

impl FieldRect {
    /// The playing field itself: [0, [`FIELD_LENGTH_M`]] × [0, [`FIELD_WIDTH_M`]].
    pub const FIELD: FieldRect = FieldRect {
        lower_bounds: Point2D::new(0., 0.),
        upper_bounds: Point2D::new(FIELD_LENGTH_M, FIELD_WIDTH_M),
    };

    /// Constructs a [`FieldRect`] from most-negative and most-positive corner points.
    ///
    /// Returns an error if the points are not in the proper order or if they are NaN.
    #[inline]
    pub fn try_from_lower_upper(
        lower_bounds: impl Into<FieldPoint>,
        upper_bounds: impl Into<FieldPoint>,
    ) -> Result<Self, InvertedRect> {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        if lower_bounds.x <= upper_bounds.x && lower_bounds.y <= upper_bounds.y {
            Ok(Self {
                lower_bounds,
                upper_bounds,
            })
        } else {
            Err(InvertedRect {
                lower_bounds,
                upper_bounds,
            })
        }
    }

    /// The most negative corner of the rectangle.
    #[inline]
    pub const fn lower_bounds(&self) -> FieldPoint {
        self.lower_bounds
    }

    /// The most positive corner of the rectangle.
    #[inline]
    pub const fn upper_bounds(&self) -> FieldPoint {
        self.upper_bounds
    }

    /// The center of the rectangle.
    ///
    /// ```
    /// # extern crate sideline_base as sideline;
    /// use sideline::math::{FieldPoint, FieldRect};
    ///
    /// assert_eq!(FieldRect::FIELD.center(), FieldPoint::new(45.7, 27.5));
    /// ```
    #[inline]
    pub fn center(&self) -> FieldPoint {
        self.lower_bounds.lerp(self.upper_bounds, 0.5)
    }

    /// Returns whether this rectangle, including the boundary, contains the point.
    #[inline]
    pub fn contains(&self, point: FieldPoint) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            self.lower_bounds[axis] <= point[axis] && point[axis] <= self.upper_bounds[axis]
        })
    }

    /// Moves the point, along each axis independently, to the nearest point within
    /// this rectangle. Points already inside are returned unchanged.
    ///
    /// NaN coordinates are replaced with the lower bound, so the result is always
    /// a point inside the rectangle.
    #[inline]
    #[must_use]
    pub fn clamp_point(&self, mut point: FieldPoint) -> FieldPoint {
        for axis in Axis::ALL {
            point[axis] = point[axis]
                .max(self.lower_bounds[axis])
                .min(self.upper_bounds[axis]);
        }
        point
    }

    /// Enlarges the rectangle by moving each edge outward by the specified distance
    /// (or inward if negative).
    ///
    /// If this would result in a negative or NaN size, produces a zero size rectangle
    /// located at the center point of `self`.
    ///
    /// ```
    /// # extern crate sideline_base as sideline;
    /// use sideline::math::{FieldPoint, FieldRect};
    ///
    /// let penalty_area = FieldRect::try_from_lower_upper([0.0, 13.8], [16.5, 41.2]).unwrap();
    /// let expanded = penalty_area.expand(1.0);
    /// assert_eq!(expanded.lower_bounds(), FieldPoint::new(-1.0, 12.8));
    /// assert_eq!(expanded.upper_bounds(), FieldPoint::new(17.5, 42.2));
    /// ```
    #[must_use]
    #[inline]
    pub fn expand(self, distance: FieldCoordinate) -> Self {
        let distance_vec = FieldVector::splat(distance);
        match Self::try_from_lower_upper(
            self.lower_bounds - distance_vec,
            self.upper_bounds + distance_vec,
        ) {
            Ok(rect) => rect,
            Err(_) => {
                let center = self.center();
                Self {
                    lower_bounds: center,
                    upper_bounds: center,
                }
            }
        }
    }
}

impl fmt::Debug for FieldRect {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FieldRect {
            lower_bounds: l,
            upper_bounds: u,
        } = *self;
        f.debug_tuple("FieldRect")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .finish()
    }
}

/// [`FieldRect`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for FieldRect {}

/// Error when a [`FieldRect`] cannot be constructed because its corners are misordered
/// or NaN.
#[derive(Clone, Copy, Debug, displaydoc::Display, PartialEq)]
#[displaydoc("invalid rectangle points that are misordered or NaN: lower {lower_bounds:?} upper {upper_bounds:?}")]
pub struct InvertedRect {
    lower_bounds: FieldPoint,
    upper_bounds: FieldPoint,
}

impl core::error::Error for InvertedRect {}
