//! Strip configuration and platform environment.
//!
//! [`StripConfig`] carries everything a host can set on a strip; it can be
//! built in code with the `with_*` builders or loaded from TOML:
//!
//! ```
//! use horizon_tabstrip::animation::Easing;
//! use horizon_tabstrip::{Alignment, Orientation, StripConfig};
//!
//! let config = StripConfig::from_toml_str(r#"
//! orientation = "vertical"
//! align = "justify"
//! breakpoint = 480
//! narrow_indicator = true
//!
//! [timings]
//! indicator_delay_ms = 90
//! indicator_easing = "ease-out"
//! "#).unwrap();
//!
//! assert_eq!(config.orientation, Orientation::Vertical);
//! assert_eq!(config.align, Alignment::Justify);
//! assert_eq!(config.timings.indicator_delay_ms, 90);
//! assert_eq!(config.timings.scroll_tick_ms, 5);
//! assert_eq!(config.timings.indicator_easing, Easing::EaseOut);
//! ```
//!
//! [`Platform`] describes the environment the strip runs in. It is resolved
//! once per strip and never re-read ambiently.

use std::time::Duration;

use horizon_tabstrip_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::animation::{Easing, TransitionSpec};
use crate::error::{StripError, StripResult};
use crate::geometry::Orientation;

/// Alignment of items inside a strip that does not overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Pack items at the start.
    Left,
    /// Center items.
    #[default]
    Center,
    /// Pack items at the end.
    Right,
    /// Spread items to fill the available extent.
    Justify,
}

/// Delays and step sizes of the strip's deferred work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Cadence of the stepped scroll animation.
    pub scroll_tick_ms: u64,
    /// Distance moved per scroll animation step.
    pub scroll_step: f32,
    /// Delay between the indicator being displaced and its transition starting.
    pub indicator_delay_ms: u64,
    /// Length of the indicator transition.
    pub indicator_duration_ms: u64,
    /// Curve of the indicator transition.
    pub indicator_easing: Easing,
    /// Debounce before focus is considered lost.
    pub focus_debounce_ms: u64,
    /// Debounce before route reconciliation runs.
    pub route_debounce_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            scroll_tick_ms: 5,
            scroll_step: 5.0,
            indicator_delay_ms: 70,
            indicator_duration_ms: 250,
            indicator_easing: Easing::Standard,
            focus_debounce_ms: 30,
            route_debounce_ms: 0,
        }
    }
}

impl Timings {
    /// Cadence of the stepped scroll animation.
    pub fn scroll_tick(&self) -> Duration {
        Duration::from_millis(self.scroll_tick_ms)
    }

    /// Delay before the indicator transition starts.
    pub fn indicator_delay(&self) -> Duration {
        Duration::from_millis(self.indicator_delay_ms)
    }

    /// Indicator transition timing.
    pub fn indicator_transition(&self) -> TransitionSpec {
        TransitionSpec {
            duration: Duration::from_millis(self.indicator_duration_ms),
            easing: self.indicator_easing,
        }
    }

    /// Debounce before focus is considered lost.
    pub fn focus_debounce(&self) -> Duration {
        Duration::from_millis(self.focus_debounce_ms)
    }

    /// Debounce before route reconciliation runs.
    pub fn route_debounce(&self) -> Duration {
        Duration::from_millis(self.route_debounce_ms)
    }
}

/// Host-facing configuration of a strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Row or column layout. Fixed for the lifetime of a strip.
    pub orientation: Orientation,
    /// Alignment used when the strip does not overflow.
    pub align: Alignment,
    /// Container extents below this switch the strip to justified layout.
    pub breakpoint: f32,
    /// Let the strip shrink inside a flex parent.
    pub shrink: bool,
    /// Stretch the strip along the cross axis.
    pub stretch: bool,
    /// Compact item layout.
    pub dense: bool,
    /// Style class applied to the active item.
    pub active_class: Option<String>,
    /// Text color of the active item.
    pub active_color: Option<String>,
    /// Background color of the active item.
    pub active_bg_color: Option<String>,
    /// Color of the indicator.
    pub indicator_color: Option<String>,
    /// Put the indicator on the opposite edge.
    pub switch_indicator: bool,
    /// Indicator spans the label instead of the whole item.
    pub narrow_indicator: bool,
    /// Icon and label on one line.
    pub inline_label: bool,
    /// Keep label casing as written.
    pub no_caps: bool,
    /// Place arrows outside the content region.
    pub outside_arrows: bool,
    /// Show arrows on touch platforms too.
    pub mobile_arrows: bool,
    /// Icon name for the start arrow.
    pub left_icon: Option<String>,
    /// Icon name for the end arrow.
    pub right_icon: Option<String>,
    /// Extra style class for the content region.
    pub content_class: Option<String>,
    /// Deferred work timings.
    pub timings: Timings,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            align: Alignment::Center,
            breakpoint: 600.0,
            shrink: false,
            stretch: false,
            dense: false,
            active_class: None,
            active_color: None,
            active_bg_color: None,
            indicator_color: None,
            switch_indicator: false,
            narrow_indicator: false,
            inline_label: false,
            no_caps: false,
            outside_arrows: false,
            mobile_arrows: false,
            left_icon: None,
            right_icon: None,
            content_class: None,
            timings: Timings::default(),
        }
    }
}

impl StripConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> StripResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that numeric settings are usable.
    pub fn validate(&self) -> StripResult<()> {
        if !self.breakpoint.is_finite() || self.breakpoint < 0.0 {
            return Err(StripError::InvalidBreakpoint(self.breakpoint));
        }
        let step = self.timings.scroll_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(StripError::InvalidScrollStep(step));
        }
        if self.timings.scroll_tick_ms == 0 {
            return Err(StripError::InvalidTiming {
                name: "scroll_tick_ms",
            });
        }
        Ok(())
    }

    /// Replace unusable numeric settings with their defaults.
    ///
    /// Used by [`TabStrip::new`](crate::TabStrip::new), which cannot fail.
    pub fn sanitized(mut self) -> Self {
        if let Err(error) = self.validate() {
            tracing::warn!(target: targets::CONFIG, %error, "repairing strip configuration");
            let defaults = Self::default();
            if !self.breakpoint.is_finite() || self.breakpoint < 0.0 {
                self.breakpoint = defaults.breakpoint;
            }
            let step = self.timings.scroll_step;
            if !step.is_finite() || step <= 0.0 {
                self.timings.scroll_step = defaults.timings.scroll_step;
            }
            if self.timings.scroll_tick_ms == 0 {
                self.timings.scroll_tick_ms = defaults.timings.scroll_tick_ms;
            }
        }
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the justify breakpoint.
    pub fn with_breakpoint(mut self, breakpoint: f32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Show arrows on touch platforms too.
    pub fn with_mobile_arrows(mut self, mobile_arrows: bool) -> Self {
        self.mobile_arrows = mobile_arrows;
        self
    }

    /// Put the indicator on the opposite edge.
    pub fn with_switch_indicator(mut self, switch_indicator: bool) -> Self {
        self.switch_indicator = switch_indicator;
        self
    }

    /// Replace the timings.
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }
}

/// The environment a strip runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    /// The surrounding layout is right-to-left.
    pub rtl: bool,
    /// Horizontal right-to-left scroll offsets are reported as positive
    /// values counting down from the maximum, instead of negative values.
    pub rtl_has_scroll_bug: bool,
    /// Pointer-driven desktop platform.
    pub desktop: bool,
    /// Touch-driven mobile platform.
    pub mobile: bool,
}

impl Platform {
    /// A left-to-right desktop environment.
    pub const fn desktop() -> Self {
        Self {
            rtl: false,
            rtl_has_scroll_bug: false,
            desktop: true,
            mobile: false,
        }
    }

    /// A left-to-right touch environment.
    pub const fn mobile() -> Self {
        Self {
            rtl: false,
            rtl_has_scroll_bug: false,
            desktop: false,
            mobile: true,
        }
    }

    /// Switch to right-to-left.
    pub const fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Set the right-to-left scroll offset quirk.
    pub const fn with_rtl_scroll_bug(mut self, bug: bool) -> Self {
        self.rtl_has_scroll_bug = bug;
        self
    }
}
