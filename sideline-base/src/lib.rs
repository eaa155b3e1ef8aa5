//! This library is an internal component of [`sideline`],
//! which defines the field geometry and ray casting used by the shot planner.
//! Do not depend on this library; use only [`sideline`] instead.
//!
//! [`sideline`]: https://crates.io/crates/sideline/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
#![warn(clippy::missing_inline_in_public_items)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

/// Do not use this module directly; its contents are re-exported from `sideline`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `sideline`.
pub mod raycast;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
