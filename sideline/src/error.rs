use core::fmt;

use crate::exposure::MIN_ISO;

/// Identifies a numeric input to the planner which may be out of range.
///
/// The [`Display`](fmt::Display) form is a lowercase phrase suitable for error messages.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, displaydoc::Display, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Parameter {
    /// focal length
    FocalLength,
    /// aperture f-number
    Aperture,
    /// shutter time
    Shutter,
    /// ISO sensitivity
    Iso,
    /// subject height
    SubjectHeight,
}

impl Parameter {
    /// The smallest acceptable value, and whether that value itself is acceptable.
    const fn lower_limit(self) -> (f64, bool) {
        match self {
            Parameter::Iso => (MIN_ISO, true),
            Parameter::FocalLength
            | Parameter::Aperture
            | Parameter::Shutter
            | Parameter::SubjectHeight => (0.0, false),
        }
    }

    /// Returns `value` if it is finite and not below this parameter's lower limit.
    ///
    /// ```
    /// use sideline::{InvalidParameter, Parameter};
    ///
    /// assert_eq!(Parameter::Aperture.check(2.8), Ok(2.8));
    /// assert_eq!(
    ///     Parameter::Aperture.check(0.0).unwrap_err().to_string(),
    ///     "aperture f-number must be greater than 0, but was 0"
    /// );
    /// ```
    #[inline]
    pub fn check(self, value: f64) -> Result<f64, InvalidParameter> {
        let (limit, inclusive) = self.lower_limit();
        let in_range = if inclusive {
            value >= limit
        } else {
            value > limit
        };
        if in_range && value.is_finite() {
            Ok(value)
        } else {
            Err(InvalidParameter {
                parameter: self,
                value,
            })
        }
    }
}

/// Error from a validating constructor when a numeric input is out of range
/// (non-positive focal length, aperture or shutter time, or ISO below 100),
/// or not finite.
///
/// The pure calculation functions never return this; they tolerate such inputs with
/// documented fallback values. It is used where a value is to be stored for later use,
/// such as [`ExposureSetting::new()`](crate::exposure::ExposureSetting::new) and
/// [`ShotPlan::new()`](crate::plan::ShotPlan::new).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidParameter {
    parameter: Parameter,
    value: f64,
}

impl InvalidParameter {
    /// Which parameter was out of range.
    #[inline]
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    /// The rejected value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &Self { parameter, value } = self;
        let (limit, inclusive) = parameter.lower_limit();
        if value.is_nan() || (value.is_infinite() && value > 0.0) {
            write!(f, "{parameter} must be finite, but was {value}")
        } else if inclusive {
            write!(f, "{parameter} must be at least {limit}, but was {value}")
        } else {
            write!(f, "{parameter} must be greater than {limit}, but was {value}")
        }
    }
}

impl core::error::Error for InvalidParameter {}
