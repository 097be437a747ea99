//! In-memory sequential layout implementing [`StripSurface`].
//!
//! Items are laid out back to back along the strip axis, starting at the
//! leading edge (the right edge for horizontal right-to-left). The content
//! region is the whole container; arrows overlay it.
//!
//! Scroll offsets are stored as a logical distance from the leading edge and
//! converted to the raw value a platform would report:
//!
//! | layout                | raw range   | raw at leading edge |
//! |-----------------------|-------------|---------------------|
//! | left-to-right / column | `0..=max`   | `0`                 |
//! | right-to-left         | `-max..=0`  | `0`                 |
//! | right-to-left, quirk  | `0..=max`   | `max`               |

use std::collections::HashMap;

use super::{ElementId, IndicatorStyle, StripSurface};
use crate::geometry::{Orientation, Point, Rect, Size};

/// Thickness of an indicator across the strip axis.
const INDICATOR_THICKNESS: f32 = 2.0;

/// Element handles of one item pushed into a [`VirtualSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualItem {
    /// The item's root element.
    pub element: ElementId,
    /// The item's indicator element.
    pub indicator: ElementId,
}

#[derive(Debug, Clone)]
struct ItemSlot {
    handles: VirtualItem,
    extent: f32,
    focusable: bool,
}

/// A headless surface with a simple back-to-back layout.
#[derive(Debug, Clone)]
pub struct VirtualSurface {
    orientation: Orientation,
    origin: Point,
    container: Size,
    rtl: bool,
    rtl_scroll_bug: bool,
    mounted: bool,
    items: Vec<ItemSlot>,
    /// Distance scrolled away from the leading edge.
    logical_scroll: f32,
    styles: HashMap<ElementId, IndicatorStyle>,
    focused: Option<ElementId>,
    next_id: u64,
}

impl VirtualSurface {
    /// Create a mounted surface of the given container size.
    pub fn new(orientation: Orientation, container: Size) -> Self {
        Self {
            orientation,
            origin: Point::ZERO,
            container,
            rtl: false,
            rtl_scroll_bug: false,
            mounted: true,
            items: Vec::new(),
            logical_scroll: 0.0,
            styles: HashMap::new(),
            focused: None,
            next_id: 1,
        }
    }

    /// Place the content region at `origin` in viewport coordinates.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Lay items out right-to-left. Only affects horizontal surfaces.
    pub fn with_rtl(mut self, rtl: bool, scroll_bug: bool) -> Self {
        self.rtl = rtl;
        self.rtl_scroll_bug = scroll_bug;
        self
    }

    fn is_rtl(&self) -> bool {
        self.rtl && self.orientation.is_horizontal()
    }

    fn alloc_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an item of `extent` along the axis.
    pub fn push_item(&mut self, extent: f32) -> VirtualItem {
        let handles = VirtualItem {
            element: self.alloc_id(),
            indicator: self.alloc_id(),
        };
        self.items.push(ItemSlot {
            handles,
            extent,
            focusable: true,
        });
        self.clamp_scroll();
        handles
    }

    /// Remove the item whose root is `element`.
    pub fn remove_item(&mut self, element: ElementId) -> bool {
        let Some(pos) = self.position_of(element) else {
            return false;
        };
        let slot = self.items.remove(pos);
        self.styles.remove(&slot.handles.indicator);
        if self.focused == Some(element) {
            self.focused = None;
        }
        self.clamp_scroll();
        true
    }

    /// Change an item's extent.
    pub fn set_item_extent(&mut self, element: ElementId, extent: f32) {
        if let Some(pos) = self.position_of(element) {
            self.items[pos].extent = extent;
            self.clamp_scroll();
        }
    }

    /// Mark an item as (not) focusable.
    pub fn set_focusable(&mut self, element: ElementId, focusable: bool) {
        if let Some(pos) = self.position_of(element) {
            self.items[pos].focusable = focusable;
        }
    }

    /// Resize the container.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
        self.clamp_scroll();
    }

    /// Simulate the content region being attached or detached.
    pub fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    /// Style last written to an indicator.
    pub fn indicator_style(&self, indicator: ElementId) -> IndicatorStyle {
        self.styles.get(&indicator).copied().unwrap_or_default()
    }

    /// The element holding keyboard focus.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Distance scrolled away from the leading edge.
    pub fn scroll_offset(&self) -> f32 {
        self.logical_scroll
    }

    /// Largest logical scroll offset.
    pub fn max_scroll(&self) -> f32 {
        (self.total_extent() - self.container_extent()).max(0.0)
    }

    /// Item handles in layout order.
    pub fn items(&self) -> Vec<VirtualItem> {
        self.items.iter().map(|slot| slot.handles).collect()
    }

    fn container_extent(&self) -> f32 {
        self.orientation.extent(self.container)
    }

    fn total_extent(&self) -> f32 {
        self.items.iter().map(|slot| slot.extent).sum()
    }

    fn clamp_scroll(&mut self) {
        self.logical_scroll = self.logical_scroll.clamp(0.0, self.max_scroll());
    }

    fn position_of(&self, element: ElementId) -> Option<usize> {
        self.items
            .iter()
            .position(|slot| slot.handles.element == element)
    }

    fn to_raw(&self, logical: f32) -> f32 {
        if !self.is_rtl() {
            logical
        } else if self.rtl_scroll_bug {
            self.max_scroll() - logical
        } else {
            negate(logical)
        }
    }

    fn from_raw(&self, raw: f32) -> f32 {
        if !self.is_rtl() {
            raw
        } else if self.rtl_scroll_bug {
            self.max_scroll() - raw
        } else {
            negate(raw)
        }
    }

    fn item_rect(&self, index: usize) -> Rect {
        let before: f32 = self.items[..index].iter().map(|slot| slot.extent).sum();
        let extent = self.items[index].extent;

        match self.orientation {
            Orientation::Horizontal => {
                let left = if self.is_rtl() {
                    self.origin.x + self.container.width - (before + extent) + self.logical_scroll
                } else {
                    self.origin.x + before - self.logical_scroll
                };
                Rect::new(left, self.origin.y, extent, self.container.height)
            }
            Orientation::Vertical => Rect::new(
                self.origin.x,
                self.origin.y + before - self.logical_scroll,
                self.container.width,
                extent,
            ),
        }
    }

    fn indicator_rect(&self, index: usize) -> Rect {
        let item = self.item_rect(index);
        let transform = self
            .indicator_style(self.items[index].handles.indicator)
            .transform;

        match self.orientation {
            Orientation::Horizontal => {
                let width = item.width() * transform.scale;
                let left = item.left() + (item.width() - width) / 2.0 + transform.translate;
                Rect::new(left, item.bottom() - INDICATOR_THICKNESS, width, INDICATOR_THICKNESS)
            }
            Orientation::Vertical => {
                let height = item.height() * transform.scale;
                let top = item.top() + (item.height() - height) / 2.0 + transform.translate;
                Rect::new(item.right() - INDICATOR_THICKNESS, top, INDICATOR_THICKNESS, height)
            }
        }
    }
}

impl StripSurface for VirtualSurface {
    fn container_size(&self) -> Option<Size> {
        self.mounted.then_some(self.container)
    }

    fn content_rect(&self) -> Option<Rect> {
        self.mounted.then(|| {
            Rect::new(
                self.origin.x,
                self.origin.y,
                self.container.width,
                self.container.height,
            )
        })
    }

    fn scroll_extent(&self, axis: Orientation) -> Option<f32> {
        if !self.mounted {
            return None;
        }
        let container = axis.extent(self.container);
        if axis == self.orientation {
            Some(self.total_extent().max(container))
        } else {
            Some(container)
        }
    }

    fn child_extents(&self, axis: Orientation) -> Vec<f32> {
        if !self.mounted {
            return Vec::new();
        }
        if axis == self.orientation {
            self.items.iter().map(|slot| slot.extent).collect()
        } else {
            let cross = axis.extent(self.container);
            self.items.iter().map(|_| cross).collect()
        }
    }

    fn raw_scroll(&self, axis: Orientation) -> f32 {
        if axis == self.orientation {
            self.to_raw(self.logical_scroll)
        } else {
            0.0
        }
    }

    fn set_raw_scroll(&mut self, axis: Orientation, value: f32) {
        if !self.mounted || axis != self.orientation {
            return;
        }
        self.logical_scroll = self.from_raw(value).clamp(0.0, self.max_scroll());
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        if !self.mounted {
            return None;
        }
        self.items.iter().enumerate().find_map(|(index, slot)| {
            if slot.handles.element == element {
                Some(self.item_rect(index))
            } else if slot.handles.indicator == element {
                Some(self.indicator_rect(index))
            } else {
                None
            }
        })
    }

    fn set_indicator_style(&mut self, element: ElementId, style: IndicatorStyle) {
        self.styles.insert(element, style);
    }

    fn children(&self) -> Vec<ElementId> {
        if !self.mounted {
            return Vec::new();
        }
        self.items.iter().map(|slot| slot.handles.element).collect()
    }

    fn is_focusable_tab(&self, element: ElementId) -> bool {
        self.items
            .iter()
            .any(|slot| slot.handles.element == element && slot.focusable)
    }

    fn focus(&mut self, element: ElementId, _prevent_scroll: bool) {
        if self.position_of(element).is_some() {
            self.focused = Some(element);
        }
    }
}

/// Negation that never yields `-0.0`.
fn negate(value: f32) -> f32 {
    if value == 0.0 { 0.0 } else { -value }
}
