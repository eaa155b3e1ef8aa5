//! Parameters for drawing a simulated photograph of the planned shot.
//!
//! The preview does not render anything itself; it turns the planner's numbers into
//! visual adjustments (brightness, a tinted overlay, the size of the subject, and the
//! blur of the background) for whatever draws the preview.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

/// Brightness change per stop of exposure difference.
const BRIGHTNESS_PER_STOP: f64 = 0.35;
/// Limits of [`brightness_factor()`].
const BRIGHTNESS_RANGE: (f64, f64) = (0.4, 1.65);
/// Overlay opacity per stop of exposure difference.
const OVERLAY_ALPHA_PER_STOP: f64 = 0.12;
/// Limit of [`Overlay::alpha`].
const MAX_OVERLAY_ALPHA: f64 = 0.5;
/// Limits of [`figure_height_percent()`]. The lower limit keeps a distant subject visible.
const FIGURE_HEIGHT_RANGE: (f64, f64) = (6.0, 100.0);

/// Multiplier for the brightness of the preview image: `1 + 0.35 · stops`, limited to
/// 0.4..=1.65.
///
/// `stops` is as returned by
/// [`exposure_difference_stops()`](crate::exposure::exposure_difference_stops); NaN is
/// treated as zero.
#[inline]
pub fn brightness_factor(stops: f64) -> f64 {
    if stops.is_nan() {
        return 1.0;
    }
    (1.0 + stops * BRIGHTNESS_PER_STOP).clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1)
}

/// Color of the [`Overlay`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_enums)]
pub enum OverlayTint {
    /// White, washing out an overexposed image.
    Light,
    /// Black, darkening an underexposed image.
    Dark,
}

impl OverlayTint {
    /// The tint as an sRGB color.
    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            OverlayTint::Light => [255, 255, 255],
            OverlayTint::Dark => [0, 0, 0],
        }
    }
}

/// A translucent color laid over the preview image to exaggerate exposure errors.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overlay {
    #[allow(missing_docs)]
    pub tint: OverlayTint,
    /// Opacity, from 0 (invisible) to 0.5.
    pub alpha: f64,
}

impl Overlay {
    /// Computes the overlay for an exposure difference in stops: light for zero or
    /// overexposure, dark for underexposure, with opacity `0.12 · |stops|` up to 0.5.
    #[inline]
    pub fn for_difference(stops: f64) -> Self {
        let alpha = if stops.is_nan() {
            0.0
        } else {
            (stops.abs() * OVERLAY_ALPHA_PER_STOP).min(MAX_OVERLAY_ALPHA)
        };
        Overlay {
            tint: if stops < 0.0 {
                OverlayTint::Dark
            } else {
                OverlayTint::Light
            },
            alpha,
        }
    }
}

/// Height of the subject figure in the preview, as a percentage of the frame height:
/// the [`frame_fill_percent()`](crate::optics::frame_fill_percent) limited to 6..=100.
#[inline]
pub fn figure_height_percent(frame_fill_percent: f64) -> f64 {
    if frame_fill_percent.is_nan() {
        return FIGURE_HEIGHT_RANGE.0;
    }
    frame_fill_percent.clamp(FIGURE_HEIGHT_RANGE.0, FIGURE_HEIGHT_RANGE.1)
}

/// All the visual adjustments for one preview image.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviewStyle {
    /// See [`brightness_factor()`].
    pub brightness: f64,
    #[allow(missing_docs)]
    pub overlay: Overlay,
    /// See [`figure_height_percent()`].
    pub figure_height_percent: f64,
    /// Blur radius for the background image, in pixels; see
    /// [`background_blur_px()`](crate::optics::background_blur_px).
    pub background_blur_px: f64,
}

impl PreviewStyle {
    /// Computes the style from an exposure difference in stops, a frame fill percentage,
    /// and an already computed background blur.
    #[inline]
    pub fn new(difference_stops: f64, frame_fill_percent: f64, background_blur_px: f64) -> Self {
        PreviewStyle {
            brightness: brightness_factor(difference_stops),
            overlay: Overlay::for_difference(difference_stops),
            figure_height_percent: figure_height_percent(frame_fill_percent),
            background_blur_px,
        }
    }
}
