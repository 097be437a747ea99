//! Overflow and justify detection.

use horizon_tabstrip_core::logging::targets;

use super::{StripTick, TabStrip};
use crate::geometry::Size;
use crate::surface::StripSurface;

impl<S: StripSurface> TabStrip<S> {
    /// Report a new container size.
    ///
    /// Requests made before the next flush collapse into one recomputation
    /// using the most recent size.
    pub fn recompute(&mut self, size: Size) {
        self.pending_size = Some(size);
        self.ticks.register(StripTick::Recalculate);
    }

    /// Schedule a recomputation against the surface's own container size.
    pub(crate) fn recalculate(&mut self) {
        self.ticks.register(StripTick::Recalculate);
    }

    pub(super) fn run_recalculate(&mut self) {
        let size = self
            .pending_size
            .take()
            .or_else(|| self.surface.container_size());
        if let Some(size) = size {
            self.update_container(size);
        }
    }

    #[tracing::instrument(skip(self), target = "horizon_tabstrip::geometry", level = "trace")]
    fn update_container(&mut self, size: Size) {
        if self.surface.content_rect().is_none() {
            return;
        }
        let axis = self.state.orientation;
        let Some(scroll_extent) = self.surface.scroll_extent(axis) else {
            return;
        };

        let container = axis.extent(size);
        let children: f32 = self.surface.child_extents(axis).iter().sum();
        let content = scroll_extent.min(children);
        // An empty strip can still report a one-unit scroll extent.
        let scrollable = container > 0.0 && content > container;

        if self.state.scrollable != scrollable {
            tracing::debug!(target: targets::GEOMETRY, scrollable, container, content, "scrollable changed");
            self.state.scrollable = scrollable;
        }

        // A resize next to a scroll can leave arrows stale without a scroll event.
        if scrollable {
            self.ticks.register(StripTick::UpdateArrows);
        }

        let justify = container < self.config.breakpoint;
        if self.state.justify != justify {
            tracing::debug!(target: targets::GEOMETRY, justify, "justify changed");
            self.state.justify = justify;
        }
    }

    /// Show arrows on touch platforms too.
    pub fn set_mobile_arrows(&mut self, mobile_arrows: bool) {
        self.config.mobile_arrows = mobile_arrows;
        let enabled = self.platform.desktop || mobile_arrows;
        if enabled != self.arrows_enabled {
            self.arrows_enabled = enabled;
            if !enabled {
                self.stop_animation();
            }
            self.recalculate();
        }
    }

    /// Place arrows outside the content region.
    pub fn set_outside_arrows(&mut self, outside_arrows: bool) {
        if self.config.outside_arrows != outside_arrows {
            self.config.outside_arrows = outside_arrows;
            self.recalculate();
        }
    }
}
