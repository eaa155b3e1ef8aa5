#![no_main]
use libfuzzer_sys::fuzz_target;

use pretty_assertions::assert_eq;

use sideline::stops::aperture_stops_in_range;

fuzz_target!(|input: (f64, f64)| {
    let (min, max) = input;
    let stops = aperture_stops_in_range(min, max);
    for pair in stops.windows(2) {
        assert!(pair[0] < pair[1], "not ascending: {stops:?}");
    }
    assert_eq!(stops, aperture_stops_in_range(max, min));
});
