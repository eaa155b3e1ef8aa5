//! The lenses the planner knows about, and the settings each of them allows.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::stops::aperture_stops_in_range;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

/// Range of f-numbers a lens can be set to at some focal length.
///
/// `min` is the widest aperture (smallest f-number) and `max` the narrowest.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApertureRange {
    /// Widest aperture (smallest f-number).
    pub min: f64,
    /// Narrowest aperture (largest f-number).
    pub max: f64,
}

impl ApertureRange {
    /// Clamps an f-number into this range. NaN becomes [`min`](Self::min).
    #[inline]
    pub fn clamp(self, f_number: f64) -> f64 {
        if f_number.is_nan() {
            self.min
        } else {
            f_number.max(self.min).min(self.max)
        }
    }

    /// Whether the f-number is within this range (inclusive).
    #[inline]
    pub fn contains(self, f_number: f64) -> bool {
        (self.min..=self.max).contains(&f_number)
    }
}

/// How a lens's aperture range depends on focal length.
#[allow(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ApertureSchedule {
    /// The same range at every focal length.
    Constant(ApertureRange),
    /// The widest aperture narrows linearly from the shortest focal length to the longest,
    /// as on most variable-aperture zooms. The narrowest aperture does not change.
    Variable {
        /// Widest f-number at the shortest focal length.
        widest_at_min_focal: f64,
        /// Widest f-number at the longest focal length.
        widest_at_max_focal: f64,
        /// Narrowest f-number at every focal length.
        narrowest: f64,
    },
}

impl ApertureSchedule {
    /// Returns the aperture range at `focal_length_mm`, for a lens whose zoom range is
    /// `min_focal_mm..=max_focal_mm`.
    ///
    /// The focal length is clamped into the zoom range, and interpolated widest
    /// f-numbers are rounded to two decimal places.
    pub fn range_at(
        self,
        focal_length_mm: f64,
        min_focal_mm: f64,
        max_focal_mm: f64,
    ) -> ApertureRange {
        match self {
            ApertureSchedule::Constant(range) => range,
            ApertureSchedule::Variable {
                widest_at_min_focal,
                widest_at_max_focal,
                narrowest,
            } => {
                let span = max_focal_mm - min_focal_mm;
                let t = if span > 0.0 {
                    (clamp_focal(focal_length_mm, min_focal_mm, max_focal_mm) - min_focal_mm)
                        / span
                } else {
                    0.0
                };
                let widest = widest_at_min_focal + (widest_at_max_focal - widest_at_min_focal) * t;
                ApertureRange {
                    min: (widest * 100.0).round() / 100.0,
                    max: narrowest,
                }
            }
        }
    }
}

fn clamp_focal(focal_length_mm: f64, min_focal_mm: f64, max_focal_mm: f64) -> f64 {
    if focal_length_mm.is_nan() {
        min_focal_mm
    } else {
        focal_length_mm.max(min_focal_mm).min(max_focal_mm)
    }
}

// -------------------------------------------------------------------------------------------------

/// Identifies one of the [`LENSES`].
///
/// The [`Display`](fmt::Display) and [`FromStr`] forms are short ids such as `"ef-70-200"`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[non_exhaustive]
pub enum LensId {
    /// EF 70–200mm f/2.8L IS II
    #[cfg_attr(feature = "serde", serde(rename = "ef-70-200"))]
    Ef70_200,
    /// EF 100–400mm f/4.5–5.6L IS II
    #[cfg_attr(feature = "serde", serde(rename = "ef-100-400"))]
    Ef100_400,
    /// RF 200–800mm f/6.3–9
    #[cfg_attr(feature = "serde", serde(rename = "rf-200-800"))]
    Rf200_800,
}

impl LensId {
    /// The short identifier of this lens, such as `"ef-70-200"`.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            LensId::Ef70_200 => "ef-70-200",
            LensId::Ef100_400 => "ef-100-400",
            LensId::Rf200_800 => "rf-200-800",
        }
    }

    /// The full description of this lens.
    #[inline]
    pub fn profile(self) -> &'static LensProfile {
        match self {
            LensId::Ef70_200 => &LENSES[0],
            LensId::Ef100_400 => &LENSES[1],
            LensId::Rf200_800 => &LENSES[2],
        }
    }
}

impl fmt::Display for LensId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LensId {
    type Err = UnknownLens;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lens_by_id(s).map(|profile| profile.id).ok_or(UnknownLens)
    }
}

/// Error from parsing a [`LensId`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("not the id of a known lens")]
#[non_exhaustive]
pub struct UnknownLens;

impl core::error::Error for UnknownLens {}

// -------------------------------------------------------------------------------------------------

/// Description of a zoom lens.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensProfile {
    #[allow(missing_docs)]
    pub id: LensId,
    /// Human-readable name.
    pub name: &'static str,
    /// Shortest focal length, in millimeters.
    pub min_focal_mm: f64,
    /// Longest focal length, in millimeters.
    pub max_focal_mm: f64,
    /// Focal lengths marked on the zoom ring, ascending.
    pub supported_focals_mm: &'static [f64],
    /// Aperture range as a function of focal length.
    pub aperture: ApertureSchedule,
}

/// The lenses the planner offers.
pub static LENSES: [LensProfile; 3] = [
    LensProfile {
        id: LensId::Ef70_200,
        name: "EF 70–200mm f/2.8L IS II",
        min_focal_mm: 70.0,
        max_focal_mm: 200.0,
        supported_focals_mm: &[70.0, 100.0, 135.0, 200.0],
        aperture: ApertureSchedule::Constant(ApertureRange {
            min: 2.8,
            max: 22.0,
        }),
    },
    LensProfile {
        id: LensId::Ef100_400,
        name: "EF 100–400mm f/4.5–5.6L IS II",
        min_focal_mm: 100.0,
        max_focal_mm: 400.0,
        supported_focals_mm: &[100.0, 135.0, 200.0, 300.0, 400.0],
        aperture: ApertureSchedule::Variable {
            widest_at_min_focal: 4.5,
            widest_at_max_focal: 5.6,
            narrowest: 32.0,
        },
    },
    LensProfile {
        id: LensId::Rf200_800,
        name: "RF 200–800mm f/6.3–9",
        min_focal_mm: 200.0,
        max_focal_mm: 800.0,
        supported_focals_mm: &[200.0, 300.0, 400.0, 600.0, 800.0],
        aperture: ApertureSchedule::Variable {
            widest_at_min_focal: 6.3,
            widest_at_max_focal: 9.0,
            narrowest: 40.0,
        },
    },
];

/// Looks up a lens by its short id (e.g. `"ef-100-400"`).
///
/// ```
/// use sideline::lens::{lens_by_id, LensId};
///
/// assert_eq!(lens_by_id("ef-100-400").map(|lens| lens.id), Some(LensId::Ef100_400));
/// assert!(lens_by_id("ef-50").is_none());
/// ```
#[inline]
pub fn lens_by_id(id: &str) -> Option<&'static LensProfile> {
    LENSES.iter().find(|lens| lens.id.as_str() == id)
}

impl LensProfile {
    /// Aperture range at the given focal length, which is clamped into the zoom range.
    ///
    /// ```
    /// use sideline::lens::LensId;
    ///
    /// let lens = LensId::Ef100_400.profile();
    /// assert_eq!(lens.aperture_range_at(250.0).min, 5.05);
    /// ```
    #[inline]
    pub fn aperture_range_at(&self, focal_length_mm: f64) -> ApertureRange {
        self.aperture
            .range_at(focal_length_mm, self.min_focal_mm, self.max_focal_mm)
    }

    /// Clamps a focal length into this lens's zoom range. NaN becomes the shortest focal
    /// length.
    #[inline]
    pub fn clamp_focal_length(&self, focal_length_mm: f64) -> f64 {
        clamp_focal(focal_length_mm, self.min_focal_mm, self.max_focal_mm)
    }

    /// Clamps an f-number into the range this lens allows at the given focal length.
    #[inline]
    pub fn clamp_aperture(&self, focal_length_mm: f64, f_number: f64) -> f64 {
        self.aperture_range_at(focal_length_mm).clamp(f_number)
    }

    /// Adjusts a focal length and f-number so that both are possible on this lens,
    /// such as when switching to it from another lens.
    ///
    /// Returns `(focal_length_mm, f_number)`.
    #[inline]
    pub fn fit_settings(&self, focal_length_mm: f64, f_number: f64) -> (f64, f64) {
        let focal_length_mm = self.clamp_focal_length(focal_length_mm);
        (focal_length_mm, self.clamp_aperture(focal_length_mm, f_number))
    }

    /// The f-numbers selectable at the given focal length; see
    /// [`aperture_stops_in_range()`].
    #[inline]
    pub fn aperture_stops_at(&self, focal_length_mm: f64) -> Vec<f64> {
        let range = self.aperture_range_at(focal_length_mm);
        aperture_stops_in_range(range.min, range.max)
    }
}
