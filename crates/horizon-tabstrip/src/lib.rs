//! Horizon Tabstrip - a headless tab strip controller.
//!
//! The controller keeps a scrolling row (or column) of selectable items
//! consistent: which item is active, whether the content overflows, which
//! scroll arrows apply, where the active indicator is animating from, and
//! which route-aware item matches the current location.
//!
//! Rendering stays with the host. The strip talks to it through two traits:
//!
//! - [`StripSurface`] for geometry, scroll offsets, indicator styles and focus;
//! - [`Navigator`] for the current location and per-destination predicates.
//!
//! In-memory implementations of both ([`VirtualSurface`] and
//! [`MemoryRouter`]) are included for tests and headless use.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use horizon_tabstrip::{
//!     MemoryRouter, Orientation, Platform, Size, StripConfig, TabDescriptor, TabStrip,
//!     VirtualSurface,
//! };
//!
//! let router = Arc::new(MemoryRouter::with_routes(["/", "/inbox", "/sent"]));
//! let mut surface = VirtualSurface::new(Orientation::Horizontal, Size::new(400.0, 48.0));
//! let inbox = surface.push_item(120.0);
//! let sent = surface.push_item(120.0);
//!
//! let mut strip = TabStrip::new(StripConfig::default(), Platform::desktop(), surface)
//!     .with_navigator(router.clone());
//! strip.register(TabDescriptor::new("inbox", inbox.element, inbox.indicator).with_route("/inbox", false));
//! strip.register(TabDescriptor::new("sent", sent.element, sent.indicator).with_route("/sent", false));
//!
//! router.push("/sent");
//! strip.advance(Duration::ZERO);
//! assert_eq!(strip.current(), Some("sent"));
//! ```
//!
//! # Logging
//!
//! All diagnostics go through `tracing`, under the targets listed in
//! [`logging::targets`]. No subscriber is installed by this crate.

pub mod animation;
mod config;
mod error;
mod geometry;
pub mod navigation;
mod strip;
pub mod surface;

pub use horizon_tabstrip_core::logging;
pub use horizon_tabstrip_core::{ConnectionId, Signal};

pub use config::{Alignment, Platform, StripConfig, Timings};
pub use error::{StripError, StripResult};
pub use geometry::{Orientation, Point, Rect, Size};
pub use navigation::{Location, MemoryRouter, Navigator, ResolvedRoute, RouteTarget, WatchToken};
pub use strip::{
    ArrowPlacement, IndicatorPhase, IndicatorPlacement, Key, RouteCandidate, RouteDecision,
    SelectOptions, StripLayout, StripState, TABLIST_ROLE, TabDescriptor, TabHandle, TabProps,
    TabRoute, TabStrip, resolve_route_winner,
};
pub use surface::{ElementId, IndicatorStyle, StripSurface, VirtualItem, VirtualSurface};
