//! Keyboard traversal across items.

use horizon_tabstrip_core::logging::targets;

use super::TabStrip;
use crate::surface::{ElementId, StripSurface};

/// Keys the strip reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Jump to the first item.
    Home,
    /// Jump to the last item.
    End,
    /// Previous item, or next in right-to-left.
    ArrowLeft,
    /// Previous item.
    ArrowUp,
    /// Next item, or previous in right-to-left.
    ArrowRight,
    /// Next item.
    ArrowDown,
    /// Any other key, by legacy key code.
    Other(u32),
}

impl Key {
    /// Map a legacy DOM key code.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            35 => Key::End,
            36 => Key::Home,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            other => Key::Other(other),
        }
    }
}

impl<S: StripSurface> TabStrip<S> {
    /// Handle a key pressed while `from` has focus.
    ///
    /// Returns `true` when the key was consumed and the host should suppress
    /// its default behavior. Moving past either end is consumed but does
    /// nothing.
    #[tracing::instrument(skip(self), target = "horizon_tabstrip::keyboard", level = "trace")]
    pub fn on_key(&mut self, key: Key, from: ElementId) -> bool {
        let tabs: Vec<ElementId> = self
            .surface
            .children()
            .into_iter()
            .filter(|el| *el == from || self.surface.is_focusable_tab(*el))
            .collect();
        let (Some(&first), Some(&last)) = (tabs.first(), tabs.last()) else {
            return false;
        };

        let (prev, next) = if self.state.orientation.is_horizontal() {
            (Key::ArrowLeft, Key::ArrowRight)
        } else {
            (Key::ArrowUp, Key::ArrowDown)
        };

        let target = match key {
            Key::Home => Some(first),
            Key::End => Some(last),
            key if key == prev || key == next => {
                let step: isize = if key == prev { -1 } else { 1 };
                let rtl: isize = if self.is_rtl() { -1 } else { 1 };
                let origin = tabs
                    .iter()
                    .position(|el| *el == from)
                    .map_or(-1, |pos| pos as isize);
                let index = origin + step * rtl;
                usize::try_from(index).ok().and_then(|i| tabs.get(i).copied())
            }
            _ => return false,
        };

        if let Some(target) = target {
            tracing::debug!(target: targets::KEYBOARD, ?key, ?target, "keyboard move");
            self.scroll_to_element(target);
            self.surface.focus(target, true);
        }
        true
    }
}
