#![no_main]
use libfuzzer_sys::fuzz_target;

use sideline::math::FieldRect;
use sideline::raycast::{Ray, project_ray_to_field, project_ray_to_rect};

fuzz_target!(|input: ([f64; 2], f64, f64)| {
    let (origin, angle, fallback) = input;
    if !(origin.iter().all(|c| c.is_finite() && c.abs() < 1e6)
        && angle.is_finite()
        && fallback.is_finite()
        && fallback.abs() < 1e6)
    {
        return;
    }

    let point = project_ray_to_field(origin.into(), angle, fallback);
    assert!(point.x.is_finite() && point.y.is_finite(), "{point:?}");

    let ray = Ray::from_angle(origin.into(), angle);
    if FieldRect::FIELD.expand(-1e-3).contains(origin.into()) {
        // From strictly inside, the ray always ends on the boundary.
        let on_edge = project_ray_to_rect(ray, FieldRect::FIELD, fallback);
        let rect = FieldRect::FIELD;
        let lower = rect.lower_bounds();
        let upper = rect.upper_bounds();
        let edge_distance = (on_edge.x - lower.x)
            .abs()
            .min((on_edge.x - upper.x).abs())
            .min((on_edge.y - lower.y).abs())
            .min((on_edge.y - upper.y).abs());
        assert!(edge_distance < 1e-6, "{on_edge:?} not on boundary");
    }
});
