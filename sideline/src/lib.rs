//! Sideline is the calculation engine of a shot planner for field sports photography.
//!
//! Given where the photographer and the subject stand on the field, which lens and
//! settings are in use, and how bright the scene is, it answers the questions a
//! photographer asks before the game starts:
//!
//! * How much of the frame will the subject fill? ([`optics::frame_fill_percent()`])
//! * What will be visible behind them, and how blurred? ([`raycast`],
//!   [`optics::background_blur_px()`])
//! * What ISO does this light call for, and how far off are the current settings?
//!   ([`exposure`])
//!
//! Every function is pure: there is no state, no I/O, and no initialization.
//! [`plan::ShotPlan`] gathers all the inputs for one frame and evaluates everything at once.
//!
//! ## Package features
//!
//! * `"std"` (enabled by default):
//!   Uses the standard library's float functions. Without it, the crate is `no_std`
//!   compatible and uses `libm` (through `num-traits`) instead.
//! * `"serde"`:
//!   Implements `serde::Serialize` and `serde::Deserialize` for settings and
//!   configuration types such as [`options::PlannerOptions`].
//! * `"arbitrary"`:
//!   Implements `arbitrary::Arbitrary` for input types, for fuzzing.

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
// Lenience for tests.
#![cfg_attr(test, allow(clippy::float_cmp))]

extern crate alloc;
#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

pub mod math;
pub mod raycast {
    //! Casting rays from the camera to the edge of the field.
    pub use sideline_base::raycast::*;
}

mod error;
pub use error::{InvalidParameter, Parameter};

pub mod exposure;
pub mod lens;
pub mod lighting;
pub mod optics;
pub mod options;
pub mod plan;
pub mod preview;
pub mod stops;

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;
