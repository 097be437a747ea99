//! The active indicator animation.
//!
//! When the selection moves from one item to another, the new item's
//! indicator is displaced so it covers the old one, then transitioned back
//! into place:
//!
//! ```text
//! Idle -> Scheduled -(tick)-> Delayed -(delay)-> Running -(duration)-> Settled
//! ```
//!
//! Any new selection change cancels whatever stage is in flight and starts
//! over from `Scheduled`.

use horizon_tabstrip_core::TimerId;
use horizon_tabstrip_core::logging::targets;

use super::{StripTick, TabStrip};
use crate::animation::{IndicatorTransform, Transition, TransitionSpec};
use crate::surface::{ElementId, IndicatorStyle, StripSurface};

/// Stage of the indicator animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorPhase {
    /// Nothing has been animated yet, or the last animation was cancelled.
    Idle,
    /// Displaced, waiting for the next flush.
    Scheduled {
        indicator: ElementId,
        from: IndicatorTransform,
    },
    /// Displaced, waiting out the start delay.
    Delayed {
        indicator: ElementId,
        from: IndicatorTransform,
    },
    /// Transitioning back to identity.
    Running {
        indicator: ElementId,
        from: IndicatorTransform,
    },
    /// Back in place.
    Settled { indicator: ElementId },
}

#[derive(Debug)]
pub(crate) struct IndicatorAnimator {
    phase: IndicatorPhase,
    timer: Option<TimerId>,
    transition: Transition,
}

impl IndicatorAnimator {
    pub(crate) fn new(spec: TransitionSpec) -> Self {
        Self {
            phase: IndicatorPhase::Idle,
            timer: None,
            transition: Transition::new(spec),
        }
    }

    pub(crate) fn timer(&self) -> Option<TimerId> {
        self.timer
    }
}

impl<S: StripSurface> TabStrip<S> {
    /// Current stage of the indicator animation.
    pub fn indicator_phase(&self) -> IndicatorPhase {
        self.indicator.phase
    }

    /// Transform the animated indicator shows right now.
    pub fn indicator_transform(&self) -> IndicatorTransform {
        match self.indicator.phase {
            IndicatorPhase::Scheduled { from, .. } | IndicatorPhase::Delayed { from, .. } => from,
            IndicatorPhase::Running { .. } => self.indicator.transition.sample(self.timers.now()),
            IndicatorPhase::Idle | IndicatorPhase::Settled { .. } => IndicatorTransform::IDENTITY,
        }
    }

    /// Animate the indicator from the item named `old` to the one named `new`.
    ///
    /// Skipped when either name is absent or unknown. The new item is also
    /// scrolled into view when the strip overflows.
    #[tracing::instrument(skip(self), target = "horizon_tabstrip::indicator", level = "trace")]
    pub fn animate_indicator(&mut self, old: Option<&str>, new: Option<&str>) {
        let old_tab = old
            .and_then(|name| self.ledger.find_by_name(name))
            .map(|tab| tab.indicator);
        let new_tab = new
            .and_then(|name| self.ledger.find_by_name(name))
            .map(|tab| (tab.element, tab.indicator));

        if let (Some(old_indicator), Some((_, new_indicator))) = (old_tab, new_tab) {
            self.cancel_indicator();

            // Measure both at rest.
            self.surface.set_indicator_style(old_indicator, IndicatorStyle::SETTLED);
            self.surface.set_indicator_style(new_indicator, IndicatorStyle::SETTLED);

            let old_rect = self.surface.bounding_rect(old_indicator);
            let new_rect = self.surface.bounding_rect(new_indicator);
            if let (Some(old_rect), Some(new_rect)) = (old_rect, new_rect) {
                let axis = self.state.orientation;
                let new_extent = axis.rect_extent(&new_rect);
                let scale = if new_extent != 0.0 {
                    axis.rect_extent(&old_rect) / new_extent
                } else {
                    1.0
                };
                let from = IndicatorTransform::new(axis.start(&old_rect) - axis.start(&new_rect), scale);

                self.surface
                    .set_indicator_style(new_indicator, IndicatorStyle::displaced(from));
                self.indicator.phase = IndicatorPhase::Scheduled {
                    indicator: new_indicator,
                    from,
                };
                self.ticks.register(StripTick::Animate);
                tracing::debug!(
                    target: targets::INDICATOR,
                    translate = from.translate,
                    scale = from.scale,
                    "indicator displaced"
                );
            }
        }

        if let (Some((element, _)), true) = (new_tab, self.state.scrollable) {
            self.scroll_to_element(element);
        }
    }

    /// Drop any in-flight indicator stage.
    pub(crate) fn cancel_indicator(&mut self) {
        if let Some(timer) = self.indicator.timer.take() {
            let _ = self.timers.stop(timer);
        }
        self.indicator.transition.stop();
        if !matches!(self.indicator.phase, IndicatorPhase::Settled { .. }) {
            self.indicator.phase = IndicatorPhase::Idle;
        }
    }

    pub(super) fn schedule_indicator_transition(&mut self) {
        if let IndicatorPhase::Scheduled { indicator, from } = self.indicator.phase {
            let delay = self.config.timings.indicator_delay();
            self.indicator.timer = Some(self.timers.start_one_shot(delay));
            self.indicator.phase = IndicatorPhase::Delayed { indicator, from };
        }
    }

    pub(super) fn indicator_timer_fired(&mut self) {
        self.indicator.timer = None;
        match self.indicator.phase {
            IndicatorPhase::Delayed { indicator, from } => {
                let spec = self.indicator.transition.spec();
                self.surface
                    .set_indicator_style(indicator, IndicatorStyle::returning(spec));
                self.indicator
                    .transition
                    .start(self.timers.now(), from, IndicatorTransform::IDENTITY);
                self.indicator.timer = Some(self.timers.start_one_shot(spec.duration));
                self.indicator.phase = IndicatorPhase::Running { indicator, from };
                tracing::trace!(target: targets::INDICATOR, ?indicator, "indicator transition started");
            }
            IndicatorPhase::Running { indicator, .. } => {
                self.indicator.transition.stop();
                self.indicator.phase = IndicatorPhase::Settled { indicator };
                tracing::trace!(target: targets::INDICATOR, ?indicator, "indicator settled");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::Easing;
    use crate::config::{Platform, StripConfig, Timings};
    use crate::geometry::{Orientation, Size};
    use crate::strip::TabDescriptor;
    use crate::surface::{VirtualItem, VirtualSurface};

    fn setup(extents: &[f32]) -> (TabStrip<VirtualSurface>, Vec<VirtualItem>) {
        setup_with(StripConfig::default(), extents)
    }

    fn setup_with(config: StripConfig, extents: &[f32]) -> (TabStrip<VirtualSurface>, Vec<VirtualItem>) {
        let mut surface = VirtualSurface::new(Orientation::Horizontal, Size::new(400.0, 48.0));
        let items: Vec<VirtualItem> = extents.iter().map(|e| surface.push_item(*e)).collect();
        let mut strip = TabStrip::new(config, Platform::desktop(), surface);
        for (i, item) in items.iter().enumerate() {
            strip.register(TabDescriptor::new(format!("t{i}"), item.element, item.indicator));
        }
        strip.set_value(Some("t0"));
        strip.advance(Duration::ZERO);
        (strip, items)
    }

    #[test]
    fn test_scale_follows_extent_ratio() {
        let (mut strip, items) = setup(&[80.0, 40.0]);
        strip.select("t1");

        let from = IndicatorTransform::new(-80.0, 2.0);
        assert_eq!(
            strip.indicator_phase(),
            IndicatorPhase::Scheduled {
                indicator: items[1].indicator,
                from,
            }
        );
        assert_eq!(strip.surface().indicator_style(items[1].indicator).transform, from);
    }

    #[test]
    fn test_zero_extent_uses_neutral_scale() {
        let (mut strip, _) = setup(&[40.0, 0.0]);
        strip.select("t1");
        assert_eq!(strip.indicator_transform().scale, 1.0);
    }

    #[test]
    fn test_unknown_name_skips_animation() {
        let (mut strip, _) = setup(&[40.0, 40.0]);
        strip.select("missing");
        assert_eq!(strip.current(), Some("missing"));
        assert_eq!(strip.indicator_phase(), IndicatorPhase::Idle);
    }

    #[test]
    fn test_reentry_cancels_pending_stage() {
        let (mut strip, items) = setup(&[40.0, 40.0, 40.0]);
        strip.select("t1");
        strip.advance(Duration::from_millis(30));
        assert!(matches!(strip.indicator_phase(), IndicatorPhase::Delayed { .. }));

        strip.select("t2");
        strip.advance(Duration::from_millis(60));
        // The first delay would have expired at 70ms.
        assert!(matches!(
            strip.indicator_phase(),
            IndicatorPhase::Delayed { indicator, .. } if indicator == items[2].indicator
        ));

        strip.advance(Duration::from_millis(10));
        assert!(matches!(strip.indicator_phase(), IndicatorPhase::Running { .. }));
    }

    #[test]
    fn test_transition_runs_to_settled() {
        let (mut strip, items) = setup(&[40.0, 40.0]);
        strip.select("t1");
        strip.advance(Duration::from_millis(70));

        let style = strip.surface().indicator_style(items[1].indicator);
        assert!(style.transform.is_identity());
        assert_eq!(
            style.transition.map(|spec| spec.duration),
            Some(Duration::from_millis(250))
        );

        strip.advance(Duration::from_millis(125));
        let halfway = strip.indicator_transform().translate;
        assert!(halfway < 0.0 && halfway > -40.0);

        strip.advance(Duration::from_millis(125));
        assert_eq!(
            strip.indicator_phase(),
            IndicatorPhase::Settled {
                indicator: items[1].indicator
            }
        );
        assert!(strip.indicator_transform().is_identity());
    }

    #[test]
    fn test_configured_easing_drives_transform() {
        let timings = Timings {
            indicator_easing: Easing::Linear,
            ..Timings::default()
        };
        let (mut strip, _) = setup_with(StripConfig::default().with_timings(timings), &[40.0, 40.0]);
        strip.select("t1");
        strip.advance(Duration::from_millis(70 + 125));
        assert_eq!(strip.indicator_transform(), IndicatorTransform::new(-20.0, 1.0));
    }
}
