//! Exposure calculations: which ISO a scene calls for, and how far the chosen settings
//! are from it.
//!
//! Scene brightness is expressed as an exposure value at ISO 100 (EV100). An exposure of
//! aperture `N` and shutter time `t` is correct at ISO 100 when `log2(N² / t) == EV100`;
//! every doubling of ISO allows one stop less light.

use sideline_base::math::sort_two;

use crate::stops::ISO_STOPS;
use crate::{InvalidParameter, Parameter};

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

/// Lowest ISO sensitivity the planner will choose or accept.
pub const MIN_ISO: f64 = 100.0;

/// Highest ISO sensitivity the planner will choose.
pub const MAX_ISO: f64 = 51200.0;

/// Exposure differences within this many stops of zero are considered balanced.
pub const BALANCE_DEADBAND_STOPS: f64 = 0.25;

/// Returns the ISO sensitivity that correctly exposes a scene of brightness `ev100` at the
/// given aperture f-number and shutter time (in seconds):
/// `100 · 2^(log2(aperture² / shutter) − ev100)`.
///
/// The result is continuous, and not rounded or clamped to any range of ISO settings;
/// see [`auto_iso()`] for that.
///
/// ```
/// use sideline::exposure::recommended_iso;
///
/// // Bright sunlight at f/8, 1/1000 s.
/// let iso = recommended_iso(15.0, 8.0, 1.0 / 1000.0);
/// assert!((iso - 195.3125).abs() < 1e-9);
/// ```
#[inline]
pub fn recommended_iso(ev100: f64, aperture: f64, shutter_seconds: f64) -> f64 {
    let settings_ev = (aperture * aperture / shutter_seconds).log2();
    100.0 * (settings_ev - ev100).exp2()
}

/// Result of [`auto_iso()`].
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoIso {
    /// The chosen ISO setting; always an entry of [`ISO_STOPS`].
    pub iso: f64,
    /// The [`recommended_iso()`] before clamping and snapping.
    pub raw: f64,
}

/// Chooses the ISO setting a camera in auto-ISO mode would use, limited to
/// [`MIN_ISO`]..=[`MAX_ISO`].
///
/// ```
/// use sideline::exposure::auto_iso;
///
/// let auto = auto_iso(15.0, 8.0, 1.0 / 1000.0);
/// assert_eq!(auto.iso, 200.0);
/// ```
#[inline]
pub fn auto_iso(ev100: f64, aperture: f64, shutter_seconds: f64) -> AutoIso {
    auto_iso_within(ev100, aperture, shutter_seconds, MIN_ISO, MAX_ISO)
}

/// Chooses the ISO setting a camera in auto-ISO mode would use, limited to the given
/// bounds (in either order).
///
/// The [`recommended_iso()`] is clamped to the bounds and then snapped to the nearest
/// entry of [`ISO_STOPS`] that lies within them; when two entries are equally near, the
/// lower one is chosen. If no entry lies within the bounds, the nearest entry overall is
/// chosen instead. NaN bounds are ignored.
pub fn auto_iso_within(
    ev100: f64,
    aperture: f64,
    shutter_seconds: f64,
    mut min: f64,
    mut max: f64,
) -> AutoIso {
    sort_two(&mut min, &mut max);
    let raw = recommended_iso(ev100, aperture, shutter_seconds);
    let target = raw.max(min).min(max);

    let in_bounds = |stop: f64| (min.is_nan() || stop >= min) && (max.is_nan() || stop <= max);
    let iso = nearest_iso_stop(target, in_bounds)
        .or_else(|| nearest_iso_stop(target, |_| true))
        .unwrap_or(MIN_ISO);
    AutoIso { iso, raw }
}

/// Nearest entry of [`ISO_STOPS`] accepted by `filter`, preferring the lower on ties.
fn nearest_iso_stop(target: f64, filter: impl Fn(f64) -> bool) -> Option<f64> {
    let mut best: Option<f64> = None;
    for stop in ISO_STOPS.into_iter().filter(|&stop| filter(stop)) {
        match best {
            Some(b) if (b - target).abs() <= (stop - target).abs() => {}
            _ => best = Some(stop),
        }
    }
    best
}

/// Returns how many stops brighter than correct the given settings expose a scene of
/// brightness `ev100`: `log2(iso / recommended_iso)`.
///
/// Positive values mean overexposure, negative values underexposure.
///
/// ```
/// use sideline::exposure::exposure_difference_stops;
///
/// // Average stadium lights, f/2.8, 1/1000 s, ISO 1600: very slightly over.
/// let stops = exposure_difference_stops(9.0, 2.8, 1.0 / 1000.0, 1600.0);
/// assert!((stops - 0.063).abs() < 1e-3);
/// ```
#[inline]
pub fn exposure_difference_stops(
    ev100: f64,
    aperture: f64,
    shutter_seconds: f64,
    iso: f64,
) -> f64 {
    (iso / recommended_iso(ev100, aperture, shutter_seconds)).log2()
}

/// Whether an exposure is brighter or darker than correct.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, displaydoc::Display, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_enums)]
pub enum ExposureBalance {
    /// Over
    Over,
    /// Under
    Under,
    /// Balanced
    Balanced,
}

impl ExposureBalance {
    /// Classifies a difference in stops as returned by [`exposure_difference_stops()`],
    /// using a deadband of [`BALANCE_DEADBAND_STOPS`].
    ///
    /// ```
    /// use sideline::exposure::ExposureBalance;
    ///
    /// assert_eq!(ExposureBalance::classify(0.2), ExposureBalance::Balanced);
    /// assert_eq!(ExposureBalance::classify(-1.0), ExposureBalance::Under);
    /// ```
    #[inline]
    pub fn classify(stops: f64) -> Self {
        Self::classify_with_deadband(stops, BALANCE_DEADBAND_STOPS)
    }

    /// Classifies a difference in stops; differences of at most `deadband` in either
    /// direction are [`Balanced`](Self::Balanced).
    #[inline]
    pub fn classify_with_deadband(stops: f64, deadband: f64) -> Self {
        if stops > deadband {
            Self::Over
        } else if stops < -deadband {
            Self::Under
        } else {
            Self::Balanced
        }
    }
}

/// How the ISO setting is chosen.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[allow(clippy::exhaustive_enums)]
pub enum ExposureMode {
    /// The camera picks the ISO with [`auto_iso()`]; any manually set ISO is ignored.
    #[default]
    Auto,
    /// The photographer's ISO setting is used.
    Manual,
}

/// Aperture, shutter and ISO as set on the camera.
///
/// Constructed with [`ExposureSetting::new()`], which checks that the values are usable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposureSetting {
    aperture: f64,
    shutter_seconds: f64,
    iso: f64,
    mode: ExposureMode,
}

impl ExposureSetting {
    /// f/2.8, 1/1000 s, ISO 1600, auto ISO.
    pub const DEFAULT: Self = Self {
        aperture: 2.8,
        shutter_seconds: 1.0 / 1000.0,
        iso: 1600.0,
        mode: ExposureMode::Auto,
    };

    /// Returns an error if `aperture` or `shutter_seconds` is not positive, or `iso` is
    /// below [`MIN_ISO`].
    ///
    /// The ISO is checked even in [`ExposureMode::Auto`], where it is not used, so that
    /// switching to manual mode always has a valid value to switch to.
    #[inline]
    pub fn new(
        aperture: f64,
        shutter_seconds: f64,
        iso: f64,
        mode: ExposureMode,
    ) -> Result<Self, InvalidParameter> {
        Ok(Self {
            aperture: Parameter::Aperture.check(aperture)?,
            shutter_seconds: Parameter::Shutter.check(shutter_seconds)?,
            iso: Parameter::Iso.check(iso)?,
            mode,
        })
    }

    /// Aperture f-number.
    #[inline]
    pub fn aperture(&self) -> f64 {
        self.aperture
    }

    /// Shutter time in seconds.
    #[inline]
    pub fn shutter_seconds(&self) -> f64 {
        self.shutter_seconds
    }

    /// The manually set ISO (which is not necessarily the [`active_iso()`](Self::active_iso)).
    #[inline]
    pub fn iso(&self) -> f64 {
        self.iso
    }

    /// How the ISO is chosen.
    #[inline]
    pub fn mode(&self) -> ExposureMode {
        self.mode
    }

    /// Returns a copy with the aperture replaced, or an error if it is not positive.
    #[inline]
    pub fn with_aperture(self, aperture: f64) -> Result<Self, InvalidParameter> {
        Ok(Self {
            aperture: Parameter::Aperture.check(aperture)?,
            ..self
        })
    }

    /// Returns a copy with the mode replaced.
    #[inline]
    #[must_use]
    pub fn with_mode(self, mode: ExposureMode) -> Self {
        Self { mode, ..self }
    }

    /// The ISO the camera will actually use in a scene of brightness `ev100`.
    #[inline]
    pub fn active_iso(&self, ev100: f64) -> f64 {
        self.active_iso_within(ev100, MIN_ISO, MAX_ISO)
    }

    /// As [`active_iso()`](Self::active_iso), with auto ISO limited to the given bounds.
    #[inline]
    pub fn active_iso_within(&self, ev100: f64, min_iso: f64, max_iso: f64) -> f64 {
        match self.mode {
            ExposureMode::Auto => {
                auto_iso_within(ev100, self.aperture, self.shutter_seconds, min_iso, max_iso).iso
            }
            ExposureMode::Manual => self.iso,
        }
    }

    /// The [`exposure_difference_stops()`] at the [`active_iso()`](Self::active_iso).
    #[inline]
    pub fn difference_stops(&self, ev100: f64) -> f64 {
        exposure_difference_stops(
            ev100,
            self.aperture,
            self.shutter_seconds,
            self.active_iso(ev100),
        )
    }
}

impl Default for ExposureSetting {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use exhaust::Exhaust as _;
    use pretty_assertions::assert_eq;
    use rand::{Rng as _, SeedableRng as _};
    use rstest::rstest;

    #[test]
    fn recommended_iso_at_base_exposure() {
        // f/1, 1 s is EV 0.
        assert_eq!(recommended_iso(0.0, 1.0, 1.0), 100.0);
        // Each EV of extra light halves the ISO.
        assert!((recommended_iso(1.0, 1.0, 1.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn recommended_iso_bright_daylight() {
        // The sunny-16 rule would say ISO 100 at f/16, 1/100; the formula is exact.
        let f4 = recommended_iso(15.0, 4.0, 1.0 / 1000.0);
        assert!((f4 - 48.828_125).abs() < 1e-9, "{f4}");
        let f8 = recommended_iso(15.0, 8.0, 1.0 / 1000.0);
        assert!((f8 - 195.312_5).abs() < 1e-9, "{f8}");
    }

    #[test]
    fn auto_iso_snaps_and_clamps() {
        assert_eq!(auto_iso(15.0, 8.0, 1.0 / 1000.0).iso, 200.0);
        assert_eq!(auto_iso(15.0, 4.0, 1.0 / 1000.0).iso, MIN_ISO);
        // Dim light, small aperture: wants far more than the camera has.
        let dark = auto_iso(6.0, 11.0, 1.0 / 4000.0);
        assert!(dark.raw > MAX_ISO);
        assert_eq!(dark.iso, MAX_ISO);
    }

    #[test]
    fn auto_iso_reports_raw() {
        let auto = auto_iso(9.0, 2.8, 1.0 / 1000.0);
        assert_eq!(auto.raw, recommended_iso(9.0, 2.8, 1.0 / 1000.0));
        // 7840 / 512 · 100 = 1531.25 → nearest stop 1600
        assert_eq!(auto.iso, 1600.0);
    }

    #[test]
    fn auto_iso_tie_prefers_lower_stop() {
        // Bounds that admit no stop force snapping 112.5, midway between 100 and 125.
        let auto = auto_iso_within(15.0, 4.0, 1.0 / 1000.0, 112.5, 112.5);
        assert_eq!(auto.iso, 100.0);
    }

    #[rstest]
    #[case(200.0, 800.0, 200.0)]
    #[case(800.0, 200.0, 200.0)]
    #[case(130.0, 150.0, 125.0)]
    fn auto_iso_custom_bounds_on_bright_scene(
        #[case] min: f64,
        #[case] max: f64,
        #[case] expected: f64,
    ) {
        // raw is about 48.8, below every bound
        let auto = auto_iso_within(15.0, 4.0, 1.0 / 1000.0, min, max);
        assert_eq!(auto.iso, expected);
    }

    #[test]
    fn auto_iso_within_bounds_property() {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(1234);
        for _ in 0..5000 {
            let ev = rng.random_range(-2.0..20.0);
            let aperture = rng.random_range(1.0..40.0);
            let shutter = rng.random_range(1.0 / 8000.0..1.0);
            let min = ISO_STOPS[rng.random_range(0..ISO_STOPS.len())];
            let max = ISO_STOPS[rng.random_range(0..ISO_STOPS.len())];
            let auto = auto_iso_within(ev, aperture, shutter, min, max);
            assert!(ISO_STOPS.contains(&auto.iso), "{auto:?}");
            assert!(
                auto.iso >= min.min(max) && auto.iso <= max.max(min),
                "{auto:?} outside {min}..{max}"
            );
        }
    }

    #[rstest]
    fn auto_iso_degenerate_inputs_are_still_stops(
        #[values(0.0, -1.0, f64::NAN)] aperture: f64,
        #[values(0.0, 1.0 / 1000.0)] shutter: f64,
    ) {
        let auto = auto_iso(10.0, aperture, shutter);
        assert!(ISO_STOPS.contains(&auto.iso), "{auto:?}");
    }

    #[test]
    fn difference_is_positive_when_iso_too_high() {
        assert!(exposure_difference_stops(10.0, 2.8, 1.0 / 1000.0, 12800.0) > 0.0);
        assert!(exposure_difference_stops(10.0, 2.8, 1.0 / 1000.0, 100.0) < 0.0);
    }

    #[test]
    fn difference_at_recommended_iso_is_zero() {
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(5);
        for _ in 0..1000 {
            let ev = rng.random_range(-2.0..20.0);
            let aperture = rng.random_range(1.0..40.0);
            let shutter = rng.random_range(1.0 / 8000.0..30.0);
            let iso = recommended_iso(ev, aperture, shutter);
            let stops = exposure_difference_stops(ev, aperture, shutter, iso);
            assert!(stops.abs() < 1e-9, "{stops}");
        }
    }

    #[test]
    fn difference_doubling_iso_is_one_stop() {
        let a = exposure_difference_stops(9.0, 4.0, 1.0 / 500.0, 800.0);
        let b = exposure_difference_stops(9.0, 4.0, 1.0 / 500.0, 1600.0);
        assert!((b - a - 1.0).abs() < 1e-12);
    }

    #[rstest]
    #[case(1.0, ExposureBalance::Over)]
    #[case(0.26, ExposureBalance::Over)]
    #[case(0.25, ExposureBalance::Balanced)]
    #[case(0.0, ExposureBalance::Balanced)]
    #[case(-0.25, ExposureBalance::Balanced)]
    #[case(-0.26, ExposureBalance::Under)]
    #[case(f64::NEG_INFINITY, ExposureBalance::Under)]
    fn balance(#[case] stops: f64, #[case] expected: ExposureBalance) {
        assert_eq!(ExposureBalance::classify(stops), expected);
    }

    #[test]
    fn balance_labels() {
        let labels: alloc::vec::Vec<_> = ExposureBalance::exhaust().map(|b| b.to_string()).collect();
        assert_eq!(labels, ["Over", "Under", "Balanced"]);
    }

    #[test]
    fn setting_validation() {
        assert!(ExposureSetting::new(2.8, 1.0 / 1000.0, 1600.0, ExposureMode::Auto).is_ok());
        assert_eq!(
            ExposureSetting::new(0.0, 1.0 / 1000.0, 1600.0, ExposureMode::Auto)
                .unwrap_err()
                .parameter(),
            Parameter::Aperture
        );
        assert_eq!(
            ExposureSetting::new(2.8, -1.0, 1600.0, ExposureMode::Manual)
                .unwrap_err()
                .parameter(),
            Parameter::Shutter
        );
        assert_eq!(
            ExposureSetting::new(2.8, 1.0 / 1000.0, 50.0, ExposureMode::Manual)
                .unwrap_err()
                .parameter(),
            Parameter::Iso
        );
    }

    #[test]
    fn default_setting_is_valid() {
        let d = ExposureSetting::default();
        assert_eq!(
            ExposureSetting::new(d.aperture(), d.shutter_seconds(), d.iso(), d.mode()),
            Ok(d)
        );
    }

    #[test]
    fn active_iso_by_mode() {
        let auto = ExposureSetting::new(8.0, 1.0 / 1000.0, 6400.0, ExposureMode::Auto).unwrap();
        assert_eq!(auto.active_iso(15.0), 200.0);
        let manual = auto.with_mode(ExposureMode::Manual);
        assert_eq!(manual.active_iso(15.0), 6400.0);
        assert!((manual.difference_stops(15.0) - (6400.0 / 195.3125_f64).log2()).abs() < 1e-9);
    }
}
