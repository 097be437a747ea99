//! Focus tracking with a debounced focus loss.

use horizon_tabstrip_core::logging::targets;

use super::TabStrip;
use crate::surface::{ElementId, StripSurface};

impl<S: StripSurface> TabStrip<S> {
    /// Focus moved to `target` inside the strip.
    ///
    /// Cancels a pending focus loss. Only registered items count as giving
    /// the strip focus; other focusable content inside it does not.
    pub fn on_focus_in(&mut self, target: Option<ElementId>) {
        if let Some(timer) = self.focus_timer.take() {
            let _ = self.timers.stop(timer);
        }
        if !self.state.has_focus && target.is_some_and(|el| self.ledger.contains_element(el)) {
            tracing::debug!(target: targets::FOCUS, ?target, "focus entered");
            self.state.has_focus = true;
        }
        self.focus_in.emit(target);
    }

    /// Focus left an element inside the strip.
    ///
    /// Focus is considered lost only if it does not come back before the
    /// debounce expires.
    pub fn on_focus_out(&mut self) {
        if let Some(timer) = self.focus_timer.take() {
            let _ = self.timers.stop(timer);
        }
        let debounce = self.config.timings.focus_debounce();
        self.focus_timer = Some(self.timers.start_one_shot(debounce));
        self.focus_out.emit(());
    }

    pub(super) fn focus_lost(&mut self) {
        if self.state.has_focus {
            tracing::debug!(target: targets::FOCUS, "focus left");
        }
        self.state.has_focus = false;
    }
}
