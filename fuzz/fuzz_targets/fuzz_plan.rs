#![no_main]
use libfuzzer_sys::fuzz_target;

use sideline::exposure::{ExposureMode, ExposureSetting};
use sideline::lens::LensId;
use sideline::lighting::LIGHTING_PRESETS;
use sideline::optics::{Defocus, MAX_BLUR_PX, SENSOR_COC_MM};
use sideline::options::PlannerOptions;
use sideline::plan::ShotPlan;
use sideline::stops::ISO_STOPS;

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    camera: [f64; 2],
    subject: [f64; 2],
    lens: LensId,
    focal_length_mm: f64,
    aperture: f64,
    shutter_seconds: f64,
    iso: f64,
    mode: ExposureMode,
    preset: u8,
    subject_height_m: f64,
    defocus: Defocus,
}

fuzz_target!(|input: Input| {
    let blur = input.defocus.blur_px(11.0, SENSOR_COC_MM, MAX_BLUR_PX);
    assert!((0.0..=MAX_BLUR_PX).contains(&blur), "{blur}");

    let Ok(exposure) = ExposureSetting::new(
        input.aperture,
        input.shutter_seconds,
        input.iso,
        input.mode,
    ) else {
        return;
    };
    let lighting = &LIGHTING_PRESETS[usize::from(input.preset) % LIGHTING_PRESETS.len()];
    let Ok(plan) = ShotPlan::new(
        input.camera.into(),
        input.subject.into(),
        input.lens,
        input.focal_length_mm,
        exposure,
        lighting,
    )
    .and_then(|plan| plan.with_subject_height(input.subject_height_m)) else {
        return;
    };

    let report = plan.evaluate(&PlannerOptions::default());
    assert!(ISO_STOPS.contains(&report.auto_iso.iso), "{report:?}");
    assert!((0.0..=400.0).contains(&report.frame_fill_percent), "{report:?}");
    assert!((0.0..=MAX_BLUR_PX).contains(&report.background_blur_px), "{report:?}");
    assert!(report.view_boundary.distance.is_finite(), "{report:?}");
});
