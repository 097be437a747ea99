//! Presentation attributes derived from configuration and state.

use super::TabStrip;
use crate::config::Alignment;
use crate::geometry::Orientation;
use crate::surface::StripSurface;

/// Accessibility role of the strip's root.
pub const TABLIST_ROLE: &str = "tablist";

/// Edge of an item the indicator sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPlacement {
    /// Above a horizontal item.
    Top,
    /// Below a horizontal item.
    Bottom,
    /// Left of a vertical item.
    Left,
    /// Right of a vertical item.
    Right,
}

impl IndicatorPlacement {
    fn resolve(orientation: Orientation, switched: bool) -> Self {
        match (orientation, switched) {
            (Orientation::Horizontal, false) => Self::Bottom,
            (Orientation::Horizontal, true) => Self::Top,
            (Orientation::Vertical, false) => Self::Right,
            (Orientation::Vertical, true) => Self::Left,
        }
    }
}

/// Where the scroll arrows are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowPlacement {
    /// Overlaid on the content region.
    Inside,
    /// Next to the content region.
    Outside,
}

/// Attributes every item reads to render itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabProps {
    /// Class added to the active item.
    pub active_class: Option<String>,
    /// Text color of the active item.
    pub active_color: Option<String>,
    /// Background color of the active item.
    pub active_bg_color: Option<String>,
    /// Edge the indicator sits on.
    pub indicator_placement: IndicatorPlacement,
    /// Indicator color.
    pub indicator_color: Option<String>,
    /// Indicator spans the label rather than the whole item.
    pub narrow_indicator: bool,
    /// Icon and label share one line.
    pub inline_label: bool,
    /// Labels keep their casing.
    pub no_caps: bool,
}

/// Snapshot of how the strip itself should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripLayout {
    /// Always [`TABLIST_ROLE`].
    pub role: &'static str,
    /// Main axis of the strip.
    pub orientation: Orientation,
    /// Content overflows the container.
    pub scrollable: bool,
    /// See [`TabStrip::content_alignment`].
    pub content_alignment: Alignment,
    /// Extra class for the content region.
    pub content_class: Option<String>,
    /// Compact item sizing.
    pub dense: bool,
    /// Items keep their natural size instead of growing.
    pub shrink: bool,
    /// The strip fills its parent's cross axis.
    pub stretch: bool,
    /// Native touch scrolling on the content region.
    pub touch_scroll: bool,
    /// Arrows are rendered at all.
    pub arrows_visible: bool,
    /// Where visible arrows go.
    pub arrow_placement: ArrowPlacement,
    /// Nothing more to reveal toward the start.
    pub start_arrow_faded: bool,
    /// Nothing more to reveal toward the end.
    pub end_arrow_faded: bool,
    /// Icon name of the start arrow.
    pub start_icon: String,
    /// Icon name of the end arrow.
    pub end_icon: String,
}

impl<S: StripSurface> TabStrip<S> {
    /// Attributes shared by every item.
    pub fn tab_props(&self) -> TabProps {
        let config = &self.config;
        TabProps {
            active_class: config.active_class.clone(),
            active_color: config.active_color.clone(),
            active_bg_color: config.active_bg_color.clone(),
            indicator_placement: IndicatorPlacement::resolve(
                self.state.orientation,
                config.switch_indicator,
            ),
            indicator_color: config.indicator_color.clone(),
            narrow_indicator: config.narrow_indicator,
            inline_label: config.inline_label,
            no_caps: config.no_caps,
        }
    }

    /// Alignment of items in the content region.
    ///
    /// Overflowing content always packs at the start.
    pub fn content_alignment(&self) -> Alignment {
        if self.state.scrollable {
            Alignment::Left
        } else if self.state.justify {
            Alignment::Justify
        } else {
            self.config.align
        }
    }

    /// How the strip should be rendered right now.
    pub fn layout(&self) -> StripLayout {
        let config = &self.config;
        let vertical = self.state.orientation.is_vertical();
        let (start_default, end_default) = if vertical { ("up", "down") } else { ("left", "right") };

        StripLayout {
            role: TABLIST_ROLE,
            orientation: self.state.orientation,
            scrollable: self.state.scrollable,
            content_alignment: self.content_alignment(),
            content_class: config.content_class.clone(),
            dense: config.dense,
            shrink: config.shrink,
            stretch: config.stretch,
            touch_scroll: self.platform.mobile,
            arrows_visible: self.arrows_enabled && self.state.scrollable,
            arrow_placement: if self.arrows_enabled && config.outside_arrows {
                ArrowPlacement::Outside
            } else {
                ArrowPlacement::Inside
            },
            start_arrow_faded: !self.state.left_arrow,
            end_arrow_faded: !self.state.right_arrow,
            start_icon: config.left_icon.clone().unwrap_or_else(|| start_default.to_string()),
            end_icon: config.right_icon.clone().unwrap_or_else(|| end_default.to_string()),
        }
    }
}
