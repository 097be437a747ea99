//! Transform transitions for the active indicator.
//!
//! The indicator never moves between elements. Instead, the newly active
//! item's indicator is given a transform that makes it overlap the old one,
//! and that transform is then transitioned back to identity.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::easing::{Easing, ease};

/// A translate-then-scale transform along the strip axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorTransform {
    /// Offset along the axis, in layout units.
    pub translate: f32,
    /// Scale factor along the axis, about the element's center.
    pub scale: f32,
}

impl IndicatorTransform {
    /// No displacement, no scaling.
    pub const IDENTITY: Self = Self {
        translate: 0.0,
        scale: 1.0,
    };

    /// Create a transform.
    pub const fn new(translate: f32, scale: f32) -> Self {
        Self { translate, scale }
    }

    /// Check whether this transform leaves the element in place.
    pub fn is_identity(&self) -> bool {
        self.translate == 0.0 && self.scale == 1.0
    }

    /// Linear interpolation between two transforms.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            translate: self.translate + (other.translate - self.translate) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

impl Default for IndicatorTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Declarative transition timing, as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Length of the transition.
    pub duration: Duration,
    /// Timing curve.
    pub easing: Easing,
}

/// A running transition between two transforms on the strip's clock.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Easing function for the transition.
    easing: Easing,
    /// Duration of the transition.
    duration: Duration,
    /// When the transition started (if running).
    start_time: Option<Duration>,
    /// Transform at progress 0.
    from: IndicatorTransform,
    /// Transform at progress 1.
    to: IndicatorTransform,
}

impl Transition {
    /// Create an idle transition.
    pub fn new(spec: TransitionSpec) -> Self {
        Self {
            easing: spec.easing,
            duration: spec.duration,
            start_time: None,
            from: IndicatorTransform::IDENTITY,
            to: IndicatorTransform::IDENTITY,
        }
    }

    /// Timing of this transition.
    pub fn spec(&self) -> TransitionSpec {
        TransitionSpec {
            duration: self.duration,
            easing: self.easing,
        }
    }

    /// Start transitioning at `now`.
    pub fn start(&mut self, now: Duration, from: IndicatorTransform, to: IndicatorTransform) {
        self.from = from;
        self.to = to;
        self.start_time = Some(now);
    }

    /// Stop the transition immediately.
    pub fn stop(&mut self) {
        self.start_time = None;
    }

    /// Check if a transition has been started and not stopped.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Raw (un-eased) progress at `now`, or `None` when not started.
    pub fn progress(&self, now: Duration) -> Option<f32> {
        let start = self.start_time?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_sub(start);
        Some((elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0))
    }

    /// Check if the transition has reached its end at `now`.
    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now).is_some_and(|p| p >= 1.0)
    }

    /// The transform at `now`.
    ///
    /// Before start this is the target; after the end it stays at the target.
    pub fn sample(&self, now: Duration) -> IndicatorTransform {
        match self.progress(now) {
            Some(raw) => self.from.lerp(&self.to, ease(self.easing, raw)),
            None => self.to,
        }
    }
}
