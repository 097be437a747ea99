//! The tab strip controller.
//!
//! [`TabStrip`] owns the selection state of a scrolling row (or column) of
//! items. It never lays anything out: geometry comes from a
//! [`StripSurface`], location data from an optional [`Navigator`].
//!
//! # Deferred work
//!
//! Nothing happens behind the host's back. Three kinds of deferred work are
//! queued and run only when the host pumps the strip:
//!
//! - coalesced ticks (geometry recompute, arrow refresh, indicator
//!   scheduling) run on [`TabStrip::flush`];
//! - one-shot timers (indicator delay, focus debounce, route debounce) and
//!   the repeating scroll stepper fire from [`TabStrip::advance`];
//! - location changes posted by the navigator are drained on every flush.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_tabstrip::{
//!     Orientation, Platform, Size, StripConfig, TabDescriptor, TabStrip, VirtualItem,
//!     VirtualSurface,
//! };
//!
//! let mut surface = VirtualSurface::new(Orientation::Horizontal, Size::new(100.0, 48.0));
//! let items: Vec<VirtualItem> = (0..3).map(|_| surface.push_item(100.0)).collect();
//!
//! let mut strip = TabStrip::new(StripConfig::default(), Platform::desktop(), surface);
//! for (item, name) in items.iter().zip(["a", "b", "c"]) {
//!     strip.register(TabDescriptor::new(name, item.element, item.indicator));
//! }
//! strip.recompute(Size::new(100.0, 48.0));
//! strip.flush();
//! assert!(strip.state().scrollable);
//!
//! strip.press_end_arrow();
//! strip.advance(Duration::from_millis(500));
//! assert!(!strip.state().right_arrow);
//! ```

mod focus;
mod indicator;
mod keyboard;
mod ledger;
mod overflow;
mod props;
mod route;
mod scroll;

pub use indicator::IndicatorPhase;
pub use keyboard::Key;
pub use ledger::{TabDescriptor, TabHandle, TabRoute};
pub use props::{ArrowPlacement, IndicatorPlacement, StripLayout, TABLIST_ROLE, TabProps};
pub use route::{RouteCandidate, RouteDecision, resolve_route_winner};

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use horizon_tabstrip_core::logging::targets;
use horizon_tabstrip_core::{Signal, TickQueue, TimerId, TimerManager};

use crate::config::{Platform, StripConfig};
use crate::geometry::{Orientation, Size};
use crate::navigation::{Navigator, WatchToken};
use crate::surface::{ElementId, StripSurface};

use indicator::IndicatorAnimator;
use ledger::Ledger;
use scroll::{ScrollAccess, ScrollAnimation};

/// Observable state of a strip.
#[derive(Debug, Clone, PartialEq)]
pub struct StripState {
    /// Selection value of the active item.
    pub current: Option<String>,
    /// Content overflows the container.
    pub scrollable: bool,
    /// The start arrow can scroll.
    pub left_arrow: bool,
    /// The end arrow can scroll.
    pub right_arrow: bool,
    /// The container is narrower than the breakpoint.
    pub justify: bool,
    /// Keyboard focus is on one of the items.
    pub has_focus: bool,
    /// Location changes do not trigger reconciliation.
    pub avoid_route_watcher: bool,
    /// Layout axis. Fixed at construction.
    pub orientation: Orientation,
}

impl StripState {
    fn new(orientation: Orientation) -> Self {
        Self {
            current: None,
            scrollable: false,
            left_arrow: true,
            right_arrow: false,
            justify: false,
            has_focus: false,
            avoid_route_watcher: false,
            orientation,
        }
    }
}

/// How a selection change is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Update internal state even when a listener is connected to
    /// [`TabStrip::model_changed`].
    pub explicit: bool,
    /// Do not emit [`TabStrip::model_changed`].
    pub silent: bool,
    /// Record whether the value came from route resolution.
    pub from_route: Option<bool>,
}

/// Coalesced units of work, run on the next flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StripTick {
    Recalculate,
    UpdateArrows,
    Animate,
}

/// Work armed on the shared one-shot timeout slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeoutTask {
    ReconcileRoute,
    RevealActive,
}

/// Messages posted into the strip from collaborator callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StripMessage {
    LocationChanged,
}

/// A headless tab strip controller.
pub struct TabStrip<S: StripSurface> {
    config: StripConfig,
    platform: Platform,
    surface: S,
    navigator: Option<Arc<dyn Navigator>>,

    state: StripState,
    ledger: Ledger,

    scroll_access: ScrollAccess,
    arrows_enabled: bool,
    scroll: ScrollAnimation,
    indicator: IndicatorAnimator,

    timers: TimerManager,
    ticks: TickQueue<StripTick>,
    focus_timer: Option<TimerId>,
    pending_timeout: Option<(TimerId, TimeoutTask)>,
    pending_size: Option<Size>,

    inbox_tx: Sender<StripMessage>,
    inbox_rx: Receiver<StripMessage>,
    watch: Option<WatchToken>,
    had_route_watcher: bool,
    from_route: bool,
    destroyed: bool,

    // ========================================================================
    // Signals
    // ========================================================================
    /// Emitted with the requested value whenever the selection would change,
    /// before the internal state is updated.
    pub model_changed: Signal<Option<String>>,
    /// Emitted when focus enters the strip.
    pub focus_in: Signal<Option<ElementId>>,
    /// Emitted when focus leaves the strip.
    pub focus_out: Signal<()>,
}

impl<S: StripSurface> TabStrip<S> {
    /// Create a strip over `surface`.
    ///
    /// The platform is captured once; right-to-left handling and arrow
    /// availability are derived from it here and never re-read. Unusable
    /// numbers in `config` fall back to their defaults.
    pub fn new(config: StripConfig, platform: Platform, surface: S) -> Self {
        let config = config.sanitized();
        let orientation = config.orientation;
        let scroll_access = ScrollAccess::select(orientation, &platform);
        let arrows_enabled = platform.desktop || config.mobile_arrows;
        let indicator = IndicatorAnimator::new(config.timings.indicator_transition());
        let (inbox_tx, inbox_rx) = crossbeam_channel::unbounded();

        let mut strip = Self {
            config,
            platform,
            surface,
            navigator: None,
            state: StripState::new(orientation),
            ledger: Ledger::new(),
            scroll_access,
            arrows_enabled,
            scroll: ScrollAnimation::default(),
            indicator,
            timers: TimerManager::new(),
            ticks: TickQueue::new(),
            focus_timer: None,
            pending_timeout: None,
            pending_size: None,
            inbox_tx,
            inbox_rx,
            watch: None,
            had_route_watcher: false,
            from_route: false,
            destroyed: false,
            model_changed: Signal::new(),
            focus_in: Signal::new(),
            focus_out: Signal::new(),
        };
        strip.recalculate();
        strip
    }

    /// Attach a navigator for route-aware items.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Start with `value` selected.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.state.current = Some(value.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current state.
    pub fn state(&self) -> &StripState {
        &self.state
    }

    /// Selection value of the active item.
    pub fn current(&self) -> Option<&str> {
        self.state.current.as_deref()
    }

    /// Configuration the strip was built with.
    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Platform the strip was built for.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Arrows are available on this platform.
    pub fn arrows_enabled(&self) -> bool {
        self.arrows_enabled
    }

    /// Reading of the strip's clock.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Registered items in registration order.
    pub fn tabs(&self) -> impl Iterator<Item = (TabHandle, &TabDescriptor)> + '_ {
        self.ledger.iter()
    }

    /// Number of registered items.
    pub fn tab_count(&self) -> usize {
        self.ledger.len()
    }

    /// Look up a registered item.
    pub fn tab(&self, handle: TabHandle) -> Option<&TabDescriptor> {
        self.ledger.get(handle)
    }

    /// Check whether the strip has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register an item. Keep the returned handle to unregister it.
    #[tracing::instrument(skip(self), target = "horizon_tabstrip::ledger", level = "trace")]
    pub fn register(&mut self, descriptor: TabDescriptor) -> TabHandle {
        let handle = self.ledger.push(descriptor);
        self.recalculate();

        if self.ledger.has_route_items() {
            self.watch_route();
            self.verify_route_model();
        } else {
            self.arm_timeout(TimeoutTask::RevealActive, Duration::ZERO);
        }
        handle
    }

    /// Remove an item by the handle [`register`](Self::register) returned.
    ///
    /// Returns `false` for a handle that is no longer registered.
    #[tracing::instrument(skip(self), target = "horizon_tabstrip::ledger", level = "trace")]
    pub fn unregister(&mut self, handle: TabHandle) -> bool {
        let Some(removed) = self.ledger.remove(handle) else {
            return false;
        };
        tracing::debug!(target: targets::LEDGER, name = %removed.name, "item unregistered");
        self.recalculate();

        if self.watch.is_some() {
            if !self.ledger.has_route_items() {
                self.unwatch_route();
            }
            self.verify_route_model();
        }
        true
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Change the selection.
    ///
    /// Nothing happens when `name` is already selected, apart from recording
    /// `from_route`. Otherwise [`model_changed`](Self::model_changed) is
    /// emitted (unless `silent`) and the state follows only when `explicit`
    /// or when no listener is connected, leaving a connected host in charge
    /// of confirming the value through [`set_value`](Self::set_value).
    pub fn set_active(&mut self, name: Option<&str>, options: SelectOptions) {
        self.update_model(name.map(str::to_string), options);
    }

    /// Handle a user selecting an item.
    pub fn select(&mut self, name: &str) {
        self.update_model(Some(name.to_string()), SelectOptions::default());
    }

    /// Push a value from the host. No notification is emitted.
    pub fn set_value(&mut self, name: Option<&str>) {
        self.update_model(
            name.map(str::to_string),
            SelectOptions {
                explicit: true,
                silent: true,
                from_route: None,
            },
        );
    }

    pub(crate) fn update_model(&mut self, name: Option<String>, options: SelectOptions) {
        if self.state.current != name {
            if !options.silent {
                self.model_changed.emit(name.clone());
            }
            if options.explicit || !self.model_changed.has_connections() {
                tracing::debug!(
                    target: targets::INDICATOR,
                    from = ?self.state.current,
                    to = ?name,
                    "selection changed"
                );
                let old = self.state.current.take();
                self.animate_indicator(old.as_deref(), name.as_deref());
                self.state.current = name;
            }
        }

        if let Some(from_route) = options.from_route {
            self.from_route = from_route;
        }
    }

    /// Suppress or allow route reconciliation on location changes.
    pub fn set_avoid_route_watcher(&mut self, avoid: bool) {
        self.state.avoid_route_watcher = avoid;
    }

    // ========================================================================
    // Event pump
    // ========================================================================

    /// Move the clock forward by `delta`, firing due timers in order.
    ///
    /// Pending ticks and messages are flushed before the first timer, after
    /// each one, and at the end.
    pub fn advance(&mut self, delta: Duration) {
        if self.destroyed {
            return;
        }
        let deadline = self.timers.now() + delta;
        self.flush();
        while let Some(id) = self.timers.fire_next(deadline) {
            self.dispatch_timer(id);
            self.flush();
        }
        let _ = self.timers.advance_to(deadline);
        self.flush();
    }

    /// Time until the next timer is due, or `None` when the strip is idle.
    ///
    /// Hosts can sleep this long before the next [`advance`](Self::advance).
    pub fn time_until_next_timer(&mut self) -> Option<Duration> {
        if self.destroyed {
            return None;
        }
        self.timers.time_until_next()
    }

    /// Run pending ticks and drain posted messages without moving the clock.
    pub fn flush(&mut self) {
        if self.destroyed {
            return;
        }
        loop {
            while let Ok(message) = self.inbox_rx.try_recv() {
                self.handle_message(message);
            }
            match self.ticks.take_next() {
                Some(tick) => self.run_tick(tick),
                None if self.inbox_rx.is_empty() => break,
                None => {}
            }
        }
    }

    fn handle_message(&mut self, message: StripMessage) {
        match message {
            StripMessage::LocationChanged => {
                if self.watch.is_some() {
                    self.verify_route_model();
                }
            }
        }
    }

    fn run_tick(&mut self, tick: StripTick) {
        match tick {
            StripTick::Recalculate => self.run_recalculate(),
            StripTick::UpdateArrows => self.update_arrows(),
            StripTick::Animate => self.schedule_indicator_transition(),
        }
    }

    fn dispatch_timer(&mut self, id: TimerId) {
        if self.scroll.timer == Some(id) {
            self.scroll_step();
        } else if self.focus_timer == Some(id) {
            self.focus_timer = None;
            self.focus_lost();
        } else if self.indicator.timer() == Some(id) {
            self.indicator_timer_fired();
        } else {
            match self.pending_timeout {
                Some((timer, task)) if timer == id => {
                    self.pending_timeout = None;
                    self.run_timeout(task);
                }
                _ => {}
            }
        }
    }

    /// Arm the shared timeout slot, replacing whatever was pending on it.
    pub(crate) fn arm_timeout(&mut self, task: TimeoutTask, delay: Duration) {
        if let Some((timer, _)) = self.pending_timeout.take() {
            let _ = self.timers.stop(timer);
        }
        let timer = self.timers.start_one_shot(delay);
        self.pending_timeout = Some((timer, task));
    }

    fn run_timeout(&mut self, task: TimeoutTask) {
        match task {
            TimeoutTask::ReconcileRoute => self.update_active_route(),
            TimeoutTask::RevealActive => {
                if self.state.scrollable {
                    let element = self
                        .state
                        .current
                        .as_deref()
                        .and_then(|name| self.ledger.find_by_name(name))
                        .map(|item| item.element);
                    if let Some(element) = element {
                        self.scroll_to_element(element);
                    }
                }
            }
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    fn cleanup(&mut self) {
        self.cancel_indicator();
        self.stop_animation();
        self.unwatch_route();
        if let Some(timer) = self.focus_timer.take() {
            let _ = self.timers.stop(timer);
        }
        if let Some((timer, _)) = self.pending_timeout.take() {
            let _ = self.timers.stop(timer);
        }
        self.ticks.clear();
        self.pending_size = None;
        while self.inbox_rx.try_recv().is_ok() {}
    }

    /// Deactivate the strip while keeping its state.
    ///
    /// Every pending timer and tick is cancelled and the route watcher is
    /// detached; [`resume`](Self::resume) restores the watcher.
    pub fn suspend(&mut self) {
        if self.destroyed {
            return;
        }
        self.had_route_watcher = self.watch.is_some();
        self.cleanup();
        tracing::debug!(target: targets::LEDGER, had_route_watcher = self.had_route_watcher, "strip suspended");
    }

    /// Reactivate a suspended strip.
    pub fn resume(&mut self) {
        if self.destroyed {
            return;
        }
        if self.had_route_watcher {
            self.watch_route();
        }
        self.recalculate();
    }

    /// Cancel all deferred work and detach from the navigator.
    ///
    /// Safe to call more than once; also runs on drop.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.cleanup();
        self.timers.clear();
        self.destroyed = true;
        tracing::debug!(target: targets::LEDGER, "strip destroyed");
    }
}

impl<S: StripSurface> Drop for TabStrip<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<S: StripSurface> std::fmt::Debug for TabStrip<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabStrip")
            .field("state", &self.state)
            .field("tabs", &self.ledger.len())
            .field("now", &self.timers.now())
            .field("timers", &self.timers.active_count())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(TabStrip<crate::surface::VirtualSurface>: Send);
