//! Evaluating a complete shot: all the planner's calculations for one set of inputs.

use sideline_base::math::{
    FIELD_LENGTH_M, FIELD_WIDTH_M, FieldPoint, clamp_camera_position, clamp_field_position,
    distance, view_angle,
};
use sideline_base::raycast::{
    FovCone, ViewBoundary, fov_cone_with_fallback, view_boundary_with_fallback,
};

use crate::exposure::{
    AutoIso, ExposureBalance, ExposureSetting, auto_iso_within, exposure_difference_stops,
};
use crate::lens::LensId;
use crate::lighting::{LightingPreset, default_preset};
use crate::optics::{Defocus, frame_fill_percent, horizontal_fov, vertical_fov};
use crate::options::PlannerOptions;
use crate::preview::PreviewStyle;
use crate::{InvalidParameter, Parameter};

/// Height of the subject when not otherwise specified, in meters.
pub const DEFAULT_SUBJECT_HEIGHT_M: f64 = 1.8;

/// Shortest subject height the planner accepts, in meters.
pub const MIN_SUBJECT_HEIGHT_M: f64 = 1.4;

/// Tallest subject height the planner accepts, in meters.
pub const MAX_SUBJECT_HEIGHT_M: f64 = 2.2;

/// Distance, in meters, by which the background is always behind the subject.
const MIN_BACKGROUND_BEHIND_SUBJECT_M: f64 = 0.1;

/// Limits a subject height to [`MIN_SUBJECT_HEIGHT_M`]..=[`MAX_SUBJECT_HEIGHT_M`].
/// NaN becomes [`DEFAULT_SUBJECT_HEIGHT_M`].
#[inline]
pub fn clamp_subject_height(height_m: f64) -> f64 {
    if height_m.is_nan() {
        DEFAULT_SUBJECT_HEIGHT_M
    } else {
        height_m.clamp(MIN_SUBJECT_HEIGHT_M, MAX_SUBJECT_HEIGHT_M)
    }
}

/// Everything the photographer has decided about one shot.
///
/// Values are adjusted on construction the way the planner's controls limit them: the
/// camera stays within 2 m of the field, the subject on the field, the focal length
/// within the lens's zoom range, and the aperture within what the lens allows at that
/// focal length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotPlan {
    camera: FieldPoint,
    subject: FieldPoint,
    subject_height_m: f64,
    lens: LensId,
    focal_length_mm: f64,
    exposure: ExposureSetting,
    lighting: &'static LightingPreset,
}

impl ShotPlan {
    /// Returns an error if the focal length is not positive and finite.
    ///
    /// The subject height is [`DEFAULT_SUBJECT_HEIGHT_M`]; use
    /// [`with_subject_height()`](Self::with_subject_height) to change it.
    pub fn new(
        camera: FieldPoint,
        subject: FieldPoint,
        lens: LensId,
        focal_length_mm: f64,
        exposure: ExposureSetting,
        lighting: &'static LightingPreset,
    ) -> Result<Self, InvalidParameter> {
        let profile = lens.profile();
        let (focal_length_mm, aperture) = profile.fit_settings(
            Parameter::FocalLength.check(focal_length_mm)?,
            exposure.aperture(),
        );
        Ok(Self {
            camera: clamp_camera_position(camera),
            subject: clamp_field_position(subject),
            subject_height_m: DEFAULT_SUBJECT_HEIGHT_M,
            lens,
            focal_length_mm,
            exposure: exposure.with_aperture(aperture)?,
            lighting,
        })
    }

    /// Returns a copy with the subject height replaced.
    ///
    /// Returns an error if the height is not positive and finite; otherwise it is limited
    /// with [`clamp_subject_height()`].
    #[inline]
    pub fn with_subject_height(self, height_m: f64) -> Result<Self, InvalidParameter> {
        Ok(Self {
            subject_height_m: clamp_subject_height(Parameter::SubjectHeight.check(height_m)?),
            ..self
        })
    }

    /// Camera position.
    #[inline]
    pub fn camera(&self) -> FieldPoint {
        self.camera
    }

    /// Subject position.
    #[inline]
    pub fn subject(&self) -> FieldPoint {
        self.subject
    }

    /// Subject height in meters.
    #[inline]
    pub fn subject_height_m(&self) -> f64 {
        self.subject_height_m
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn lens(&self) -> LensId {
        self.lens
    }

    /// Focal length in millimeters.
    #[inline]
    pub fn focal_length_mm(&self) -> f64 {
        self.focal_length_mm
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn exposure(&self) -> ExposureSetting {
        self.exposure
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn lighting(&self) -> &'static LightingPreset {
        self.lighting
    }

    /// Performs every calculation for this shot.
    pub fn evaluate(&self, options: &PlannerOptions) -> ShotReport {
        let &Self {
            camera,
            subject,
            subject_height_m,
            lens: _,
            focal_length_mm,
            exposure,
            lighting,
        } = self;
        let ev100 = lighting.ev100;
        let aperture = exposure.aperture();
        let shutter = exposure.shutter_seconds();

        let subject_distance_m = distance(camera, subject);
        let view_angle = view_angle(camera, subject);
        let horizontal_fov = horizontal_fov(focal_length_mm);
        let frame_fill_percent =
            frame_fill_percent(subject_distance_m, subject_height_m, focal_length_mm);

        let view_boundary =
            view_boundary_with_fallback(camera, view_angle, options.fallback_distance_m);
        let fov_cone = fov_cone_with_fallback(
            camera,
            view_angle,
            horizontal_fov,
            options.fallback_distance_m,
        );
        let background_distance_m = (subject_distance_m + MIN_BACKGROUND_BEHIND_SUBJECT_M)
            .max(view_boundary.distance + options.background_margin_m);

        let auto_iso = auto_iso_within(ev100, aperture, shutter, options.min_iso, options.max_iso);
        let active_iso = exposure.active_iso_within(ev100, options.min_iso, options.max_iso);
        let exposure_difference_stops =
            exposure_difference_stops(ev100, aperture, shutter, active_iso);

        let background_blur_px = Defocus {
            focal_length_mm,
            f_number: aperture,
            focus_distance_m: subject_distance_m,
            background_distance_m,
        }
        .blur_px(
            options.px_per_mm(),
            options.sensor_coc_mm,
            options.max_blur_px,
        );

        ShotReport {
            subject_distance_m,
            view_angle,
            horizontal_fov,
            vertical_fov: vertical_fov(focal_length_mm),
            frame_fill_percent,
            view_boundary,
            fov_cone,
            background_distance_m,
            auto_iso,
            active_iso,
            exposure_difference_stops,
            balance: ExposureBalance::classify_with_deadband(
                exposure_difference_stops,
                options.balance_deadband_stops,
            ),
            background_blur_px,
            preview: PreviewStyle::new(
                exposure_difference_stops,
                frame_fill_percent,
                background_blur_px,
            ),
        }
    }
}

impl Default for ShotPlan {
    /// The planner's starting state: the camera behind the middle of the near sideline,
    /// looking at a subject in the center of the field through a 70–200 mm lens at 200 mm,
    /// under average stadium lights.
    #[inline]
    fn default() -> Self {
        Self {
            camera: FieldPoint::new(FIELD_LENGTH_M / 2.0, -3.0),
            subject: FieldPoint::new(FIELD_LENGTH_M / 2.0, FIELD_WIDTH_M / 2.0),
            subject_height_m: DEFAULT_SUBJECT_HEIGHT_M,
            lens: LensId::Ef70_200,
            focal_length_mm: 200.0,
            exposure: ExposureSetting::DEFAULT,
            lighting: default_preset(),
        }
    }
}

/// Results of [`ShotPlan::evaluate()`].
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotReport {
    /// Distance from camera to subject, in meters.
    pub subject_distance_m: f64,
    /// Direction the camera faces, in radians counterclockwise from the X axis.
    pub view_angle: f64,
    /// Horizontal angle of view, in radians.
    pub horizontal_fov: f64,
    /// Vertical angle of view, in radians.
    pub vertical_fov: f64,
    /// Percentage of the frame height the subject fills.
    pub frame_fill_percent: f64,
    /// Where the line of sight through the subject leaves the field.
    pub view_boundary: ViewBoundary,
    /// The visible wedge of the field.
    pub fov_cone: FovCone,
    /// Distance from the camera to the background behind the subject, in meters.
    pub background_distance_m: f64,
    /// The ISO auto-ISO mode would choose, whether or not it is in use.
    pub auto_iso: AutoIso,
    /// The ISO in use.
    pub active_iso: f64,
    /// Over- (positive) or under- (negative) exposure, in stops.
    pub exposure_difference_stops: f64,
    /// Classification of [`exposure_difference_stops`](Self::exposure_difference_stops).
    pub balance: ExposureBalance,
    /// Background blur in the preview, in pixels.
    pub background_blur_px: f64,
    /// How to draw the preview.
    pub preview: PreviewStyle,
}
