//! Animation support for the tab strip.
//!
//! This module provides easing functions and the transform transition used to
//! slide the active indicator from the previously active item to the new one.
//!
//! # Example
//!
//! ```
//! use horizon_tabstrip::animation::{ease, Easing};
//!
//! let eased = ease(Easing::Standard, 0.5);
//! assert!(eased > 0.5);
//! ```

mod easing;
mod transition;

pub use easing::{Easing, ease};
pub use transition::{IndicatorTransform, Transition, TransitionSpec};
