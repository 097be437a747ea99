//! Scroll position, arrow visibility and the stepped scroll animation.

use horizon_tabstrip_core::TimerId;
use horizon_tabstrip_core::logging::targets;

use super::TabStrip;
use crate::config::Platform;
use crate::geometry::Orientation;
use crate::surface::{ElementId, StripSurface};

/// Offset used as "as far as it goes" by the start/end scrolls.
const FAR_OFFSET: f32 = f32::MAX;

/// How the scroll position is read and written, chosen once per strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScrollAccess {
    /// Raw offset along the axis.
    Direct(Orientation),
    /// Horizontal right-to-left with negative raw offsets: the position is
    /// the magnitude, written back negated.
    Mirrored,
}

impl ScrollAccess {
    pub(crate) fn select(orientation: Orientation, platform: &Platform) -> Self {
        let rtl = orientation.is_horizontal() && platform.rtl;
        if rtl && !platform.rtl_has_scroll_bug {
            Self::Mirrored
        } else {
            Self::Direct(orientation)
        }
    }

    fn get<S: StripSurface>(self, surface: &S) -> f32 {
        match self {
            Self::Direct(axis) => surface.raw_scroll(axis),
            Self::Mirrored => surface.raw_scroll(Orientation::Horizontal).abs(),
        }
    }

    fn set<S: StripSurface>(self, surface: &mut S, position: f32) {
        match self {
            Self::Direct(axis) => surface.set_raw_scroll(axis, position),
            Self::Mirrored => {
                let raw = if position == 0.0 { 0.0 } else { -position };
                surface.set_raw_scroll(Orientation::Horizontal, raw);
            }
        }
    }

    fn is_mirrored(self) -> bool {
        matches!(self, Self::Mirrored)
    }
}

/// The repeating timer driving a scroll toward `target`.
#[derive(Debug, Default)]
pub(crate) struct ScrollAnimation {
    pub(crate) timer: Option<TimerId>,
    target: f32,
}

impl<S: StripSurface> TabStrip<S> {
    pub(super) fn is_rtl(&self) -> bool {
        self.state.orientation.is_horizontal() && self.platform.rtl
    }

    /// Refresh arrow visibility from the current scroll position.
    ///
    /// Does nothing when arrows are not available on this platform.
    pub fn update_arrows(&mut self) {
        if !self.arrows_enabled {
            return;
        }
        let axis = self.state.orientation;
        let (Some(rect), Some(extent)) = (self.surface.content_rect(), self.surface.scroll_extent(axis))
        else {
            return;
        };

        let raw = self.surface.raw_scroll(axis);
        let position = if axis.is_vertical() { raw } else { raw.abs() };
        let visible = axis.rect_extent(&rect);

        let (left, right) = if self.is_rtl() {
            ((position + visible).ceil() < extent - 1.0, position > 0.0)
        } else {
            (position > 0.0, (position + visible).ceil() < extent)
        };

        tracing::trace!(target: targets::SCROLL, position, left, right, "arrows updated");
        self.state.left_arrow = left;
        self.state.right_arrow = right;
    }

    /// Scroll just enough to bring `element` fully into view.
    pub fn scroll_to_element(&mut self, element: ElementId) {
        let axis = self.state.orientation;
        let (Some(content), Some(target)) = (self.surface.content_rect(), self.surface.bounding_rect(element))
        else {
            return;
        };

        let mut offset = axis.start(&target) - axis.start(&content);
        let raw = self.surface.raw_scroll(axis);
        if offset < 0.0 {
            self.surface.set_raw_scroll(axis, raw + offset.floor());
        } else {
            offset += axis.rect_extent(&target) - axis.rect_extent(&content);
            if offset > 0.0 {
                self.surface.set_raw_scroll(axis, raw + offset.ceil());
            }
        }
        tracing::trace!(target: targets::SCROLL, ?element, offset, "scrolled to element");
        self.update_arrows();
    }

    /// Step the scroll position toward `target` until it gets there.
    pub fn animate_to(&mut self, target: f32) {
        self.stop_animation();
        self.scroll.target = target;
        let tick = self.config.timings.scroll_tick();
        self.scroll.timer = Some(self.timers.start_repeating(tick));
        tracing::trace!(target: targets::SCROLL, target, "scroll animation started");
    }

    /// Scroll toward the first item.
    pub fn scroll_to_start(&mut self) {
        let target = if self.scroll_access.is_mirrored() { FAR_OFFSET } else { 0.0 };
        self.animate_to(target);
    }

    /// Scroll toward the last item.
    pub fn scroll_to_end(&mut self) {
        let target = if self.scroll_access.is_mirrored() { 0.0 } else { FAR_OFFSET };
        self.animate_to(target);
    }

    /// Stop a running scroll animation.
    pub fn stop_animation(&mut self) {
        if let Some(timer) = self.scroll.timer.take() {
            let _ = self.timers.stop(timer);
            tracing::trace!(target: targets::SCROLL, "scroll animation stopped");
        }
    }

    /// Check whether a scroll animation is running.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.timer.is_some()
    }

    pub(super) fn scroll_step(&mut self) {
        if self.scroll_towards(self.scroll.target) {
            self.stop_animation();
        }
    }

    /// Move one step toward `target`. Returns `true` once there.
    fn scroll_towards(&mut self, target: f32) -> bool {
        let step = self.config.timings.scroll_step;
        let mut position = self.scroll_access.get(&self.surface);
        let direction = if target < position { -1.0 } else { 1.0 };
        position += direction * step;

        let mut done = false;
        if position < 0.0 {
            done = true;
            position = 0.0;
        } else if (direction < 0.0 && position <= target) || (direction > 0.0 && position >= target) {
            done = true;
            position = target;
        }

        self.scroll_access.set(&mut self.surface, position);
        self.update_arrows();
        done
    }

    /// Press-and-hold on the start arrow.
    pub fn press_start_arrow(&mut self) {
        if self.arrows_enabled {
            self.scroll_to_start();
        }
    }

    /// Press-and-hold on the end arrow.
    pub fn press_end_arrow(&mut self) {
        if self.arrows_enabled {
            self.scroll_to_end();
        }
    }

    /// Release, leave or touch end on either arrow.
    pub fn release_arrow(&mut self) {
        if self.arrows_enabled {
            self.stop_animation();
        }
    }

    /// The host scrolled the content region natively.
    pub fn on_scroll(&mut self) {
        self.update_arrows();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::StripConfig;
    use crate::geometry::Size;
    use crate::strip::TabDescriptor;
    use crate::surface::{VirtualItem, VirtualSurface};

    fn setup(platform: Platform) -> (TabStrip<VirtualSurface>, Vec<VirtualItem>) {
        let mut surface = VirtualSurface::new(Orientation::Horizontal, Size::new(100.0, 48.0))
            .with_rtl(platform.rtl, platform.rtl_has_scroll_bug);
        let items: Vec<VirtualItem> = (0..3).map(|_| surface.push_item(100.0)).collect();
        let mut strip = TabStrip::new(StripConfig::default(), platform, surface);
        for (i, item) in items.iter().enumerate() {
            strip.register(TabDescriptor::new(format!("t{i}"), item.element, item.indicator));
        }
        strip.advance(Duration::ZERO);
        (strip, items)
    }

    #[test]
    fn test_access_selection() {
        let rtl = Platform::desktop().with_rtl(true);
        assert_eq!(ScrollAccess::select(Orientation::Horizontal, &rtl), ScrollAccess::Mirrored);
        assert_eq!(
            ScrollAccess::select(Orientation::Vertical, &rtl),
            ScrollAccess::Direct(Orientation::Vertical)
        );
        assert_eq!(
            ScrollAccess::select(Orientation::Horizontal, &rtl.with_rtl_scroll_bug(true)),
            ScrollAccess::Direct(Orientation::Horizontal)
        );
    }

    #[test]
    fn test_update_arrows_is_idempotent() {
        let (mut strip, _) = setup(Platform::desktop());
        strip.surface_mut().set_raw_scroll(Orientation::Horizontal, 60.0);
        strip.update_arrows();
        let once = strip.state().clone();
        strip.update_arrows();
        assert_eq!(strip.state(), &once);
        assert!(once.left_arrow && once.right_arrow);
    }

    #[test]
    fn test_scroll_to_element_after_window() {
        let (mut strip, items) = setup(Platform::desktop());
        strip.scroll_to_element(items[2].element);
        assert_eq!(strip.surface().scroll_offset(), 200.0);
        assert!(strip.state().left_arrow);
        assert!(!strip.state().right_arrow);
    }

    #[test]
    fn test_scroll_to_element_before_window() {
        let (mut strip, items) = setup(Platform::desktop());
        strip.surface_mut().set_raw_scroll(Orientation::Horizontal, 150.0);
        strip.scroll_to_element(items[0].element);
        assert_eq!(strip.surface().scroll_offset(), 0.0);
    }

    #[test]
    fn test_visible_element_does_not_move() {
        let (mut strip, items) = setup(Platform::desktop());
        strip.surface_mut().set_raw_scroll(Orientation::Horizontal, 100.0);
        strip.scroll_to_element(items[1].element);
        assert_eq!(strip.surface().scroll_offset(), 100.0);
    }

    #[test]
    fn test_animate_to_snaps_on_final_step() {
        let (mut strip, _) = setup(Platform::desktop());
        strip.animate_to(12.0);
        strip.advance(Duration::from_millis(5));
        assert_eq!(strip.surface().scroll_offset(), 5.0);
        strip.advance(Duration::from_millis(10));
        assert_eq!(strip.surface().scroll_offset(), 12.0);
        assert!(!strip.is_scrolling());
    }

    #[test]
    fn test_new_animation_replaces_running_one() {
        let (mut strip, _) = setup(Platform::desktop());
        strip.animate_to(100.0);
        strip.advance(Duration::from_millis(10));
        strip.animate_to(0.0);
        strip.advance(Duration::from_millis(50));
        assert_eq!(strip.surface().scroll_offset(), 0.0);
        assert!(!strip.is_scrolling());
    }

    #[test]
    fn test_end_arrow_holds_until_release() {
        let (mut strip, _) = setup(Platform::desktop());
        strip.press_end_arrow();
        strip.advance(Duration::from_millis(500));
        assert_eq!(strip.surface().scroll_offset(), 200.0);
        assert!(strip.is_scrolling());

        strip.release_arrow();
        assert!(!strip.is_scrolling());
    }

    #[test]
    fn test_rtl_start_scrolls_toward_far_end() {
        let (mut strip, _) = setup(Platform::desktop().with_rtl(true));
        assert!(strip.state().left_arrow);
        assert!(!strip.state().right_arrow);

        strip.press_start_arrow();
        strip.advance(Duration::from_millis(500));
        assert_eq!(strip.surface().scroll_offset(), 200.0);
        assert!(!strip.state().left_arrow);
        assert!(strip.state().right_arrow);

        strip.press_end_arrow();
        strip.advance(Duration::from_millis(500));
        assert_eq!(strip.surface().scroll_offset(), 0.0);
        assert!(!strip.is_scrolling());
    }

    #[test]
    fn test_unusable_scroll_step_still_arrives() {
        let mut surface = VirtualSurface::new(Orientation::Horizontal, Size::new(100.0, 48.0));
        let item = surface.push_item(300.0);
        let mut timings = crate::config::Timings::default();
        timings.scroll_step = 0.0;
        let config = StripConfig::default().with_timings(timings);
        let mut strip = TabStrip::new(config, Platform::desktop(), surface);
        strip.register(TabDescriptor::new("wide", item.element, item.indicator));
        strip.advance(Duration::ZERO);

        strip.animate_to(12.0);
        strip.advance(Duration::from_millis(15));
        assert_eq!(strip.surface().scroll_offset(), 12.0);
        assert!(!strip.is_scrolling());
    }

    #[test]
    fn test_mirrored_start_offset_is_positive_zero() {
        let (mut strip, _) = setup(Platform::desktop().with_rtl(true));
        strip.press_start_arrow();
        strip.advance(Duration::from_millis(500));
        strip.press_end_arrow();
        strip.advance(Duration::from_millis(500));

        let raw = strip.surface().raw_scroll(Orientation::Horizontal);
        assert_eq!(raw, 0.0);
        assert!(raw.is_sign_positive());
        assert!(strip.surface().scroll_offset().is_sign_positive());
    }

    #[test]
    fn test_arrows_disabled_on_touch() {
        let (mut strip, _) = setup(Platform::mobile());
        strip.press_end_arrow();
        assert!(!strip.is_scrolling());
        strip.surface_mut().set_raw_scroll(Orientation::Horizontal, 50.0);
        strip.on_scroll();
        assert!(strip.state().left_arrow);
        assert!(!strip.state().right_arrow);
    }
}
