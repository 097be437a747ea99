//! The rendering collaborator.
//!
//! The strip never lays anything out itself. It reads geometry from, and
//! writes scroll offsets, indicator styles and focus to, a [`StripSurface`].
//! A real host backs this with its layout engine; [`VirtualSurface`] is a
//! self-contained sequential layout for tests and headless use.
//!
//! Every method tolerates an unmounted surface or an unknown element by
//! returning `None` (or doing nothing), which the strip treats as "nothing to
//! measure this cycle".

mod virtual_surface;

pub use virtual_surface::{VirtualItem, VirtualSurface};

use crate::animation::{IndicatorTransform, TransitionSpec};
use crate::geometry::{Orientation, Rect, Size};

/// Opaque handle to a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a host-side element identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw identifier.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Transform state written to an indicator element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorStyle {
    /// Current transform target.
    pub transform: IndicatorTransform,
    /// How the element should animate toward `transform`; `None` jumps.
    pub transition: Option<TransitionSpec>,
}

impl IndicatorStyle {
    /// No transform and no transition: the element's laid-out position.
    pub const SETTLED: Self = Self {
        transform: IndicatorTransform::IDENTITY,
        transition: None,
    };

    /// Jump to `transform` without animating.
    pub const fn displaced(transform: IndicatorTransform) -> Self {
        Self {
            transform,
            transition: None,
        }
    }

    /// Animate back to the laid-out position.
    pub const fn returning(spec: TransitionSpec) -> Self {
        Self {
            transform: IndicatorTransform::IDENTITY,
            transition: Some(spec),
        }
    }
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self::SETTLED
    }
}

/// Geometry, scroll and focus access to the strip's rendered output.
pub trait StripSurface {
    /// Outer size of the strip, or `None` before first layout.
    fn container_size(&self) -> Option<Size>;

    /// Bounding box of the scrolling content region, or `None` when it is not
    /// mounted.
    fn content_rect(&self) -> Option<Rect>;

    /// Scrollable extent of the content region along `axis`.
    fn scroll_extent(&self, axis: Orientation) -> Option<f32>;

    /// Laid-out extent of each direct child of the content region along
    /// `axis`, in document order.
    fn child_extents(&self, axis: Orientation) -> Vec<f32>;

    /// Raw scroll offset of the content region along `axis`, exactly as the
    /// platform reports it (possibly negative for right-to-left).
    fn raw_scroll(&self, axis: Orientation) -> f32;

    /// Write a raw scroll offset. The surface clamps to its valid range.
    fn set_raw_scroll(&mut self, axis: Orientation, value: f32);

    /// Bounding box of an element, including any applied transform.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Replace the transform/transition of an indicator element.
    fn set_indicator_style(&mut self, element: ElementId, style: IndicatorStyle);

    /// Direct children of the content region, in document order.
    fn children(&self) -> Vec<ElementId>;

    /// Whether `element` is a focusable item.
    fn is_focusable_tab(&self, element: ElementId) -> bool;

    /// Move keyboard focus to `element`.
    fn focus(&mut self, element: ElementId, prevent_scroll: bool);
}
