//! Tables of the standard settings a camera offers, and snapping to them.

use alloc::vec::Vec;
use core::fmt;

use sideline_base::math::sort_two;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::Float as _;

/// ISO sensitivities in third-stop steps, ascending.
pub const ISO_STOPS: [f64; 28] = [
    100.0, 125.0, 160.0, 200.0, 250.0, 320.0, 400.0, 500.0, 640.0, 800.0, 1000.0, 1250.0, 1600.0,
    2000.0, 2500.0, 3200.0, 4000.0, 5000.0, 6400.0, 8000.0, 10000.0, 12500.0, 16000.0, 20000.0,
    25600.0, 32000.0, 40000.0, 51200.0,
];

/// Shutter times in seconds, in third-stop steps, ascending (fastest first).
///
/// The range covers what is useful for action: from 1/8000 s down to 1/30 s.
pub const SHUTTER_STOPS: [f64; 25] = [
    1.0 / 8000.0,
    1.0 / 6400.0,
    1.0 / 5000.0,
    1.0 / 4000.0,
    1.0 / 3200.0,
    1.0 / 2500.0,
    1.0 / 2000.0,
    1.0 / 1600.0,
    1.0 / 1250.0,
    1.0 / 1000.0,
    1.0 / 800.0,
    1.0 / 640.0,
    1.0 / 500.0,
    1.0 / 400.0,
    1.0 / 320.0,
    1.0 / 250.0,
    1.0 / 200.0,
    1.0 / 160.0,
    1.0 / 125.0,
    1.0 / 100.0,
    1.0 / 80.0,
    1.0 / 60.0,
    1.0 / 50.0,
    1.0 / 40.0,
    1.0 / 30.0,
];

/// Aperture f-numbers in the conventional third-stop sequence, ascending (widest first).
pub const APERTURE_STOPS: [f64; 32] = [
    1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3, 7.1, 8.0, 9.0,
    10.0, 11.0, 13.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 29.0, 32.0, 36.0, 40.0,
];

/// Tolerance for including table entries at the ends of [`aperture_stops_in_range()`].
const RANGE_EPSILON: f64 = 1e-6;

/// Values closer than this are considered the same aperture stop.
const SAME_STOP_TOLERANCE: f64 = 1e-3;

/// Returns the index of the entry of `values` closest to `target`.
///
/// When two entries are equally close, the lower index wins. If `values` is empty or
/// `target` is NaN, returns 0.
///
/// ```
/// use sideline::stops::{find_closest_index, ISO_STOPS};
///
/// assert_eq!(ISO_STOPS[find_closest_index(&ISO_STOPS, 1500.0)], 1600.0);
/// // 112.5 is exactly between 100 and 125.
/// assert_eq!(ISO_STOPS[find_closest_index(&ISO_STOPS, 112.5)], 100.0);
/// ```
pub fn find_closest_index(values: &[f64], target: f64) -> usize {
    let mut best_index = 0;
    let mut best_difference = f64::INFINITY;
    for (index, &value) in values.iter().enumerate() {
        let difference = (value - target).abs();
        if difference < best_difference {
            best_index = index;
            best_difference = difference;
        }
    }
    best_index
}

/// Returns the entry of `values` closest to `target`, preferring the lower entry on ties,
/// or [`None`] if `values` is empty.
#[inline]
pub fn nearest_stop(values: &[f64], target: f64) -> Option<f64> {
    values.get(find_closest_index(values, target)).copied()
}

/// Returns the aperture f-numbers selectable between `min` and `max` (in either order).
///
/// The result contains every [`APERTURE_STOPS`] entry within the range, plus `min` and
/// `max` themselves when they are not already (within 0.001) a table entry, so that a
/// lens whose widest aperture is e.g. f/4.78 can still be set to it. The result is
/// strictly ascending. Non-finite bounds are left out.
///
/// ```
/// use sideline::stops::aperture_stops_in_range;
///
/// assert_eq!(
///     aperture_stops_in_range(4.78, 8.0),
///     vec![4.78, 5.0, 5.6, 6.3, 7.1, 8.0],
/// );
/// ```
pub fn aperture_stops_in_range(mut min: f64, mut max: f64) -> Vec<f64> {
    sort_two(&mut min, &mut max);

    let mut stops: Vec<f64> = APERTURE_STOPS
        .iter()
        .copied()
        .filter(|&stop| stop >= min - RANGE_EPSILON && stop <= max + RANGE_EPSILON)
        .collect();
    for bound in [min, max] {
        if bound.is_finite()
            && !stops
                .iter()
                .any(|&stop| (stop - bound).abs() < SAME_STOP_TOLERANCE)
        {
            stops.push(bound);
        }
    }

    stops.sort_by(f64::total_cmp);
    stops.dedup_by(|later, earlier| (*later - *earlier).abs() < SAME_STOP_TOLERANCE);
    stops
}

/// A shutter time, formatted the way cameras display it.
///
/// ```
/// use sideline::stops::ShutterSpeed;
///
/// assert_eq!(ShutterSpeed(1.0 / 1000.0).to_string(), "1/1000");
/// assert_eq!(ShutterSpeed(2.0).to_string(), "2 s");
/// ```
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShutterSpeed(pub f64);

impl ShutterSpeed {
    /// The shutter time in seconds.
    #[inline]
    pub const fn seconds(self) -> f64 {
        self.0
    }

    /// Returns the entry of [`SHUTTER_STOPS`] closest to this time.
    #[inline]
    #[must_use]
    pub fn nearest_stop(self) -> Self {
        Self(SHUTTER_STOPS[find_closest_index(&SHUTTER_STOPS, self.0)])
    }
}

impl fmt::Display for ShutterSpeed {
    /// Fractions of a second are shown as `1/N`; longer (or nonsensical) times are shown
    /// in seconds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0;
        if seconds > 0.0 && seconds < 1.0 {
            write!(f, "1/{}", (1.0 / seconds).round())
        } else {
            write!(f, "{seconds} s")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use alloc::vec;
    use itertools::Itertools as _;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn assert_strictly_ascending(values: &[f64]) {
        for (a, b) in values.iter().tuple_windows() {
            assert!(a < b, "{a} >= {b} in {values:?}");
        }
    }

    #[test]
    fn tables_are_ascending() {
        assert_strictly_ascending(&ISO_STOPS);
        assert_strictly_ascending(&SHUTTER_STOPS);
        assert_strictly_ascending(&APERTURE_STOPS);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(100.0, 0)]
    #[case(112.5, 0)]
    #[case(112.6, 1)]
    #[case(1700.0, 12)]
    #[case(1e9, 27)]
    #[case(f64::NAN, 0)]
    fn closest_iso(#[case] target: f64, #[case] expected: usize) {
        assert_eq!(find_closest_index(&ISO_STOPS, target), expected);
    }

    #[test]
    fn closest_in_empty_table() {
        assert_eq!(find_closest_index(&[], 5.0), 0);
        assert_eq!(nearest_stop(&[], 5.0), None);
    }

    #[test]
    fn nearest_aperture() {
        assert_eq!(nearest_stop(&APERTURE_STOPS, 4.78), Some(5.0));
        assert_eq!(nearest_stop(&APERTURE_STOPS, 30.0), Some(29.0));
    }

    #[test]
    fn range_of_table_entries() {
        assert_eq!(
            aperture_stops_in_range(2.8, 4.0),
            vec![2.8, 3.2, 3.5, 4.0]
        );
    }

    #[test]
    fn range_includes_off_table_bounds() {
        assert_eq!(
            aperture_stops_in_range(6.3, 40.0).first().copied(),
            Some(6.3)
        );
        let stops = aperture_stops_in_range(7.65, 40.0);
        assert_eq!(stops[..3], [7.65, 8.0, 9.0]);
        assert_eq!(stops.last().copied(), Some(40.0));
    }

    #[test]
    fn range_bound_near_entry_is_not_duplicated() {
        assert_eq!(aperture_stops_in_range(2.7996, 3.2), vec![2.8, 3.2]);
    }

    #[test]
    fn range_swapped_bounds() {
        assert_eq!(aperture_stops_in_range(4.0, 2.8), aperture_stops_in_range(2.8, 4.0));
    }

    #[test]
    fn range_single_point() {
        assert_eq!(aperture_stops_in_range(4.78, 4.78), vec![4.78]);
    }

    #[test]
    fn range_outside_table() {
        assert_eq!(aperture_stops_in_range(50.0, 64.0), vec![50.0, 64.0]);
    }

    #[test]
    fn range_properties() {
        use rand::{Rng as _, SeedableRng as _};
        let mut rng = rand_xoshiro::Xoshiro256PlusPlus::seed_from_u64(0);
        for _ in 0..2000 {
            let min = rng.random_range(0.9..12.0);
            let max = min + rng.random_range(0.0..35.0);
            let stops = aperture_stops_in_range(min, max);
            assert_strictly_ascending(&stops);
            for bound in [min, max] {
                assert!(
                    stops.iter().any(|&s| (s - bound).abs() < 1e-3),
                    "{bound} missing from {stops:?}"
                );
            }
            assert!(stops.iter().all(|&s| s >= min - 1e-3 && s <= max + 1e-3));
        }
    }

    #[rstest]
    #[case(1.0 / 8000.0, "1/8000")]
    #[case(1.0 / 1000.0, "1/1000")]
    #[case(1.0 / 30.0, "1/30")]
    #[case(0.3, "1/3")]
    #[case(1.0, "1 s")]
    #[case(2.5, "2.5 s")]
    fn shutter_display(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(ShutterSpeed(seconds).to_string(), expected);
    }

    #[test]
    fn shutter_nearest_stop() {
        assert_eq!(ShutterSpeed(0.0011).nearest_stop(), ShutterSpeed(1.0 / 1000.0));
        assert_eq!(ShutterSpeed(5.0).nearest_stop(), ShutterSpeed(1.0 / 30.0));
    }
}
