//! Lens and sensor geometry: field of view, how much of the frame the subject fills,
//! and how blurred the background is.
//!
//! These are thin-lens approximations suitable for planning, not a physically exact
//! optical simulation.

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

// -------------------------------------------------------------------------------------------------

/// Focal lengths below this (including zero, negative, and NaN values) are treated as
/// this value, so that angles stay finite.
pub const MIN_FOCAL_LENGTH_MM: f64 = 1e-3;

/// F-numbers below this (including zero, negative, and NaN values) are treated as
/// this value, so that blur stays finite.
pub const MIN_F_NUMBER: f64 = 1e-3;

/// Upper limit of [`frame_fill_percent()`]: the subject may be reported as up to four times
/// the frame height, to show how badly a shot is over-framed.
pub const MAX_FRAME_FILL_PERCENT: f64 = 400.0;

/// Circle of confusion which the sensor cannot distinguish from a point, in millimeters.
/// Defocus smaller than this is not rendered as blur.
pub const SENSOR_COC_MM: f64 = 0.03;

/// Upper limit of [`background_blur_px()`], in pixels.
pub const MAX_BLUR_PX: f64 = 18.0;

/// Closest focus distance considered by the defocus model, in meters.
pub const MIN_FOCUS_DISTANCE_M: f64 = 0.1;

/// Minimum distance of the background behind the focus plane, in meters.
///
/// Measured from the focus distance after it has been raised to [`MIN_FOCUS_DISTANCE_M`].
pub const MIN_BACKGROUND_SEPARATION_M: f64 = 0.1;

// -------------------------------------------------------------------------------------------------

/// Physical dimensions of an image sensor, in millimeters.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sensor {
    /// Width of the sensor (the long side, in landscape orientation).
    pub width_mm: f64,
    /// Height of the sensor.
    pub height_mm: f64,
}

impl Sensor {
    /// A 36 × 24 mm “full-frame” sensor. This is the only sensor the planner models.
    pub const FULL_FRAME: Sensor = Sensor {
        width_mm: 36.0,
        height_mm: 24.0,
    };

    /// Horizontal angle of view, in radians, at the given focal length.
    #[inline]
    pub fn horizontal_fov(self, focal_length_mm: f64) -> f64 {
        angle_of_view(self.width_mm, focal_length_mm)
    }

    /// Vertical angle of view, in radians, at the given focal length.
    #[inline]
    pub fn vertical_fov(self, focal_length_mm: f64) -> f64 {
        angle_of_view(self.height_mm, focal_length_mm)
    }
}

fn angle_of_view(extent_mm: f64, focal_length_mm: f64) -> f64 {
    2.0 * (extent_mm / (2.0 * guard_focal_length(focal_length_mm))).atan()
}

fn guard_focal_length(focal_length_mm: f64) -> f64 {
    if focal_length_mm >= MIN_FOCAL_LENGTH_MM {
        focal_length_mm
    } else {
        log::trace!("focal length {focal_length_mm} mm out of range; using {MIN_FOCAL_LENGTH_MM}");
        MIN_FOCAL_LENGTH_MM
    }
}

/// Horizontal angle of view of a full-frame camera, in radians:
/// `2 · atan(36 / (2 · focal_length_mm))`.
///
/// Focal lengths below [`MIN_FOCAL_LENGTH_MM`] are treated as that value.
///
/// ```
/// use sideline::optics::horizontal_fov;
///
/// // A “normal” 50 mm lens sees about 40° horizontally.
/// assert_eq!(horizontal_fov(50.0).to_degrees().round(), 40.0);
/// ```
#[inline]
pub fn horizontal_fov(focal_length_mm: f64) -> f64 {
    Sensor::FULL_FRAME.horizontal_fov(focal_length_mm)
}

/// Vertical angle of view of a full-frame camera, in radians:
/// `2 · atan(24 / (2 · focal_length_mm))`.
///
/// Focal lengths below [`MIN_FOCAL_LENGTH_MM`] are treated as that value.
#[inline]
pub fn vertical_fov(focal_length_mm: f64) -> f64 {
    Sensor::FULL_FRAME.vertical_fov(focal_length_mm)
}

/// Percentage of the frame height that a subject `subject_height_m` tall fills, when
/// standing `distance_m` from a camera with the given focal length.
///
/// * At zero distance the answer is defined to be exactly 100.
/// * The result is limited to the range 0 to [`MAX_FRAME_FILL_PERCENT`].
///
/// ```
/// use sideline::optics::frame_fill_percent;
///
/// // A 1.8 m player at 20 m through a 400 mm lens overfills the 1.2 m tall view.
/// assert!((frame_fill_percent(20.0, 1.8, 400.0) - 150.0).abs() < 1e-9);
/// ```
#[inline]
pub fn frame_fill_percent(distance_m: f64, subject_height_m: f64, focal_length_mm: f64) -> f64 {
    if distance_m == 0.0 {
        return 100.0;
    }
    let scene_height_m = 2.0 * distance_m * (vertical_fov(focal_length_mm) / 2.0).tan();
    (subject_height_m / scene_height_m * 100.0)
        .max(0.0)
        .min(MAX_FRAME_FILL_PERCENT)
}

// -------------------------------------------------------------------------------------------------

/// Thin-lens defocus of a background behind an in-focus subject.
///
/// Distances are clamped when computing so that the background always lies strictly
/// behind the focus plane: the focus distance is at least [`MIN_FOCUS_DISTANCE_M`] and the
/// background is at least [`MIN_BACKGROUND_SEPARATION_M`] beyond it.
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Defocus {
    /// Focal length of the lens, in millimeters.
    pub focal_length_mm: f64,
    /// Aperture f-number.
    pub f_number: f64,
    /// Distance from the camera to the focus plane (the subject), in meters.
    pub focus_distance_m: f64,
    /// Distance from the camera to the background, in meters.
    pub background_distance_m: f64,
}

impl Defocus {
    /// Diameter of the blur circle that a point on the background produces on the
    /// sensor, in millimeters:
    /// `f² · |background − focus| / (N · background · max(1, focus − f))`.
    pub fn circle_of_confusion_mm(&self) -> f64 {
        let focus_m = self.focus_distance_m.max(MIN_FOCUS_DISTANCE_M);
        let focus_mm = focus_m * 1000.0;
        let background_mm = self
            .background_distance_m
            .max(focus_m + MIN_BACKGROUND_SEPARATION_M)
            * 1000.0;
        let f = guard_focal_length(self.focal_length_mm);
        let n = if self.f_number >= MIN_F_NUMBER {
            self.f_number
        } else {
            MIN_F_NUMBER
        };

        let denominator = (focus_mm - f).max(1.0);
        f * f * (background_mm - focus_mm).abs() / (n * background_mm * denominator)
    }

    /// Blur radius to draw, in pixels, for a rendering at `px_per_mm` pixels per
    /// millimeter of sensor.
    ///
    /// The part of the circle of confusion below `coc_floor_mm` is discarded, and the
    /// result is clamped to the range 0 to `max_blur_px`.
    pub fn blur_px(&self, px_per_mm: f64, coc_floor_mm: f64, max_blur_px: f64) -> f64 {
        let visible_coc_mm = (self.circle_of_confusion_mm() - coc_floor_mm).max(0.0);
        (visible_coc_mm * px_per_mm).max(0.0).min(max_blur_px)
    }
}

/// Blur radius, in pixels, of a background `background_distance_m` away when focused at
/// `focus_distance_m`, for a preview drawn at `px_per_mm` pixels per millimeter of sensor.
///
/// Uses the standard [`SENSOR_COC_MM`] floor and [`MAX_BLUR_PX`] ceiling; see [`Defocus`]
/// for the model.
#[inline]
pub fn background_blur_px(
    focal_length_mm: f64,
    f_number: f64,
    focus_distance_m: f64,
    background_distance_m: f64,
    px_per_mm: f64,
) -> f64 {
    Defocus {
        focal_length_mm,
        f_number,
        focus_distance_m,
        background_distance_m,
    }
    .blur_px(px_per_mm, SENSOR_COC_MM, MAX_BLUR_PX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng as _, SeedableRng as _};
    use rstest::rstest;

    #[rstest]
    fn horizontal_wider_than_vertical(
        #[values(0.5, 14.0, 24.0, 50.0, 70.0, 200.0, 400.0, 800.0, 5000.0)] focal: f64,
    ) {
        assert!(horizontal_fov(focal) > vertical_fov(focal));
    }

    #[test]
    fn fov_known_values() {
        // 2·atan(18/50) and 2·atan(12/50)
        assert!((horizontal_fov(50.0) - 0.691_111_161_2).abs() < 1e-9);
        assert!((vertical_fov(50.0) - 0.471_089_961_4).abs() < 1e-9);
    }

    #[test]
    fn fov_narrows_with_focal_length() {
        assert!(horizontal_fov(70.0) > horizontal_fov(200.0));
        assert!(vertical_fov(200.0) > vertical_fov(800.0));
    }

    #[rstest]
    fn fov_guarded_against_bad_focal_length(
        #[values(0.0, -0.0, -50.0, f64::NAN, f64::NEG_INFINITY)] focal: f64,
    ) {
        let h = horizontal_fov(focal);
        let v = vertical_fov(focal);
        assert!(h.is_finite() && v.is_finite(), "{focal} -> {h}, {v}");
        assert_eq!(h, horizontal_fov(MIN_FOCAL_LENGTH_MM));
        assert!(h < core::f64::consts::PI);
    }

    #[test]
    fn sensor_methods_match_free_functions() {
        assert_eq!(Sensor::FULL_FRAME.horizontal_fov(135.0), horizontal_fov(135.0));
        assert_eq!(Sensor::FULL_FRAME.vertical_fov(135.0), vertical_fov(135.0));
    }

    #[test]
    fn frame_fill_zero_distance_is_exactly_100() {
        assert_eq!(frame_fill_percent(0.0, 1.8, 200.0), 100.0);
        assert_eq!(frame_fill_percent(-0.0, 0.5, 70.0), 100.0);
    }

    #[test]
    fn frame_fill_grows_as_distance_shrinks() {
        let far = frame_fill_percent(60.0, 1.8, 400.0);
        let close = frame_fill_percent(20.0, 1.8, 400.0);
        assert!(close > far, "{close} <= {far}");
    }

    #[test]
    fn frame_fill_strictly_decreasing_while_uncapped() {
        // At 200 mm a 1.8 m subject fills exactly 400% at 3.75 m.
        let mut previous = f64::INFINITY;
        for step in 1..=200 {
            let d = 4.0 + f64::from(step) * 0.5;
            let fill = frame_fill_percent(d, 1.8, 200.0);
            assert!(fill < previous, "not decreasing at {d}");
            previous = fill;
        }
    }

    #[test]
    fn frame_fill_is_capped() {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..1000 {
            let d = rng.random_range(1e-9..1.0);
            let fill = frame_fill_percent(d, 2.2, rng.random_range(70.0..800.0));
            assert!(fill <= MAX_FRAME_FILL_PERCENT, "{d} -> {fill}");
        }
        assert_eq!(frame_fill_percent(0.01, 1.8, 800.0), MAX_FRAME_FILL_PERCENT);
    }

    #[test]
    fn frame_fill_never_negative() {
        assert_eq!(frame_fill_percent(10.0, -1.0, 200.0), 0.0);
        assert_eq!(frame_fill_percent(f64::NAN, 1.8, 200.0), 0.0);
    }

    #[test]
    fn blur_known_value() {
        // f = 200 mm, N = 2.8, focus 30 m, background 60 m:
        // 200² · 30000 / (2.8 · 60000 · 29800) = 0.23969…
        let coc = Defocus {
            focal_length_mm: 200.0,
            f_number: 2.8,
            focus_distance_m: 30.0,
            background_distance_m: 60.0,
        }
        .circle_of_confusion_mm();
        assert!((coc - 0.239_693_2).abs() < 1e-6, "{coc}");
        let px = background_blur_px(200.0, 2.8, 30.0, 60.0, 10.0);
        assert!((px - (coc - SENSOR_COC_MM) * 10.0).abs() < 1e-9, "{px}");
    }

    #[test]
    fn blur_below_sensor_coc_is_zero() {
        assert_eq!(background_blur_px(200.0, 2.8, 30.0, 30.0, 11.0), 0.0);
        assert_eq!(background_blur_px(70.0, 22.0, 30.0, 40.0, 11.0), 0.0);
    }

    #[test]
    fn blur_is_capped() {
        assert_eq!(background_blur_px(400.0, 2.8, 20.0, 80.0, 420.0 / 36.0), MAX_BLUR_PX);
    }

    #[test]
    fn blur_decreases_when_stopping_down() {
        let wide = background_blur_px(200.0, 2.8, 30.0, 60.0, 1.0);
        let narrow = background_blur_px(200.0, 8.0, 30.0, 60.0, 1.0);
        assert!(wide > narrow && narrow > 0.0, "{wide} {narrow}");
    }

    #[test]
    fn blur_clamps_distances() {
        // Focus closer than 0.1 m and background in front of focus are both clamped,
        // so these behave like focus 0.1 m, background 0.2 m.
        let clamped = Defocus {
            focal_length_mm: 50.0,
            f_number: 2.0,
            focus_distance_m: 0.0,
            background_distance_m: -5.0,
        };
        let explicit = Defocus {
            focal_length_mm: 50.0,
            f_number: 2.0,
            focus_distance_m: 0.1,
            background_distance_m: 0.2,
        };
        assert_eq!(
            clamped.circle_of_confusion_mm(),
            explicit.circle_of_confusion_mm()
        );
    }

    #[test]
    fn background_separation_follows_clamped_focus() {
        // Focus 0.02 m becomes 0.1 m, which pushes the background from 0.15 m to 0.2 m.
        let defocus = Defocus {
            focal_length_mm: 50.0,
            f_number: 2.0,
            focus_distance_m: 0.02,
            background_distance_m: 0.15,
        };
        // 50² · 100 / (2 · 200 · 50)
        assert!((defocus.circle_of_confusion_mm() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn blur_always_in_range() {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(99);
        for _ in 0..5000 {
            let px = background_blur_px(
                rng.random_range(-10.0..1000.0),
                rng.random_range(-1.0..64.0),
                rng.random_range(-5.0..120.0),
                rng.random_range(-5.0..200.0),
                rng.random_range(-1.0..50.0),
            );
            assert!((0.0..=MAX_BLUR_PX).contains(&px), "{px}");
        }
    }
}
