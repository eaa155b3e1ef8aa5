//! Configuration of the planner's calculations.

use core::fmt;

use sideline_base::math::sort_two;
use sideline_base::raycast::DEFAULT_FALLBACK_DISTANCE_M;

use crate::exposure::{BALANCE_DEADBAND_STOPS, MAX_ISO, MIN_ISO};
use crate::optics::{MAX_BLUR_PX, SENSOR_COC_MM, Sensor};

/// Tunable parameters of the planner’s calculations which are not camera settings.
///
/// These do not describe the scene or the camera; they control how the results are
/// judged and drawn, such as how much exposure error still counts as balanced, or how big
/// the preview image is.
///
/// When deserialized (with the `"serde"` feature), missing fields take their default
/// values. Use [`PlannerOptions::repair()`] on options from untrusted sources.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct PlannerOptions {
    /// Lowest ISO that auto ISO may choose.
    pub min_iso: f64,

    /// Highest ISO that auto ISO may choose.
    pub max_iso: f64,

    /// Exposure differences of at most this many stops are reported as
    /// [`Balanced`](crate::exposure::ExposureBalance::Balanced).
    pub balance_deadband_stops: f64,

    /// Largest background blur radius drawn in the preview, in pixels.
    pub max_blur_px: f64,

    /// Blur circles smaller than this, in millimeters on the sensor, are drawn sharp.
    pub sensor_coc_mm: f64,

    /// Distance, in meters, at which a view ray that misses the field is considered
    /// to end.
    pub fallback_distance_m: f64,

    /// How far behind the field boundary the background is assumed to stand, in meters.
    pub background_margin_m: f64,

    /// Width of the preview image, in pixels.
    pub preview_width_px: f64,
}

impl PlannerOptions {
    /// The options used when nothing else is specified.
    pub const DEFAULT: Self = Self {
        min_iso: MIN_ISO,
        max_iso: MAX_ISO,
        balance_deadband_stops: BALANCE_DEADBAND_STOPS,
        max_blur_px: MAX_BLUR_PX,
        sensor_coc_mm: SENSOR_COC_MM,
        fallback_distance_m: DEFAULT_FALLBACK_DISTANCE_M,
        background_margin_m: 5.0,
        preview_width_px: 420.0,
    };

    /// Constrain fields to valid/practical values.
    ///
    /// * ISO bounds are put in order and limited to [`MIN_ISO`]..=[`MAX_ISO`].
    /// * Other values which are NaN, negative, or (where zero would be meaningless) zero
    ///   are replaced with their defaults.
    #[must_use]
    pub fn repair(mut self) -> Self {
        let original = self.clone();
        let d = Self::DEFAULT;

        let mut min_iso = finite_or(self.min_iso, d.min_iso).clamp(MIN_ISO, MAX_ISO);
        let mut max_iso = finite_or(self.max_iso, d.max_iso).clamp(MIN_ISO, MAX_ISO);
        sort_two(&mut min_iso, &mut max_iso);
        self.min_iso = min_iso;
        self.max_iso = max_iso;

        self.balance_deadband_stops =
            non_negative_or(self.balance_deadband_stops, d.balance_deadband_stops);
        self.max_blur_px = non_negative_or(self.max_blur_px, d.max_blur_px);
        self.sensor_coc_mm = non_negative_or(self.sensor_coc_mm, d.sensor_coc_mm);
        self.fallback_distance_m = positive_or(self.fallback_distance_m, d.fallback_distance_m);
        self.background_margin_m = non_negative_or(self.background_margin_m, d.background_margin_m);
        self.preview_width_px = positive_or(self.preview_width_px, d.preview_width_px);

        if self != original {
            log::debug!("repaired planner options {original:?} to {self:?}");
        }
        self
    }

    /// Preview pixels per millimeter of sensor width.
    #[inline]
    pub fn px_per_mm(&self) -> f64 {
        self.preview_width_px / Sensor::FULL_FRAME.width_mm
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

fn non_negative_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

impl fmt::Debug for PlannerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            min_iso,
            max_iso,
            balance_deadband_stops,
            max_blur_px,
            sensor_coc_mm,
            fallback_distance_m,
            background_margin_m,
            preview_width_px,
        } = self;
        // ISO bounds are shown as one range, the way they are chosen in the settings UI.
        f.debug_struct("PlannerOptions")
            .field("iso", &(*min_iso..=*max_iso))
            .field("balance_deadband_stops", balance_deadband_stops)
            .field("max_blur_px", max_blur_px)
            .field("sensor_coc_mm", sensor_coc_mm)
            .field("fallback_distance_m", fallback_distance_m)
            .field("background_margin_m", background_margin_m)
            .field("preview_width_px", preview_width_px)
            .finish()
    }
}

impl Default for PlannerOptions {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
