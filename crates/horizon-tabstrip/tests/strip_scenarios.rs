//! End-to-end scenarios for the tab strip over the in-memory surface and router.
//!
//! Set `RUST_LOG=horizon_tabstrip=trace` to see the controller's decisions.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use horizon_tabstrip::animation::IndicatorTransform;
use horizon_tabstrip::{
    IndicatorPhase, Key, MemoryRouter, Orientation, Platform, SelectOptions, Size, StripConfig,
    StripSurface, TabDescriptor, TabHandle, TabStrip, VirtualItem, VirtualSurface,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Fixture {
    strip: TabStrip<VirtualSurface>,
    items: Vec<VirtualItem>,
    handles: Vec<TabHandle>,
}

fn setup(extents: &[f32], container: f32, platform: Platform) -> Fixture {
    init_tracing();
    let mut surface = VirtualSurface::new(Orientation::Horizontal, Size::new(container, 48.0))
        .with_rtl(platform.rtl, platform.rtl_has_scroll_bug);
    let items: Vec<VirtualItem> = extents.iter().map(|e| surface.push_item(*e)).collect();
    let mut strip = TabStrip::new(StripConfig::default(), platform, surface);
    let handles = items
        .iter()
        .enumerate()
        .map(|(i, item)| strip.register(TabDescriptor::new(format!("t{i}"), item.element, item.indicator)))
        .collect();
    strip.recompute(Size::new(container, 48.0));
    strip.advance(Duration::ZERO);
    Fixture {
        strip,
        items,
        handles,
    }
}

// ============================================================================
// Overflow and scrolling
// ============================================================================

#[test]
fn overflowing_strip_scrolls_back_to_start() {
    let Fixture { mut strip, .. } = setup(&[100.0, 100.0, 100.0], 100.0, Platform::desktop());
    assert!(strip.state().scrollable);

    strip.surface_mut().set_raw_scroll(Orientation::Horizontal, 200.0);
    strip.on_scroll();
    assert!(strip.state().left_arrow);

    strip.scroll_to_start();
    strip.advance(Duration::from_millis(400));
    assert_eq!(strip.surface().scroll_offset(), 0.0);
    assert!(!strip.state().left_arrow);
    assert!(strip.state().right_arrow);
    assert!(!strip.is_scrolling());
}

#[test]
fn growing_container_stops_overflow() {
    let Fixture { mut strip, .. } = setup(&[100.0, 100.0, 100.0], 100.0, Platform::desktop());
    strip.surface_mut().set_container_size(Size::new(400.0, 48.0));
    strip.recompute(Size::new(400.0, 48.0));
    strip.flush();
    assert!(!strip.state().scrollable);
    assert!(!strip.layout().arrows_visible);
}

#[test]
fn rtl_scroll_quirk_reads_raw_offsets() {
    let platform = Platform::desktop().with_rtl(true).with_rtl_scroll_bug(true);
    let Fixture { mut strip, .. } = setup(&[100.0, 100.0, 100.0], 100.0, platform);

    // Raw offsets count down from the maximum, so "start" is raw zero.
    strip.scroll_to_start();
    strip.advance(Duration::from_millis(400));
    assert_eq!(strip.surface().raw_scroll(Orientation::Horizontal), 0.0);
    assert_eq!(strip.surface().scroll_offset(), 200.0);
}

// ============================================================================
// Selection and indicator
// ============================================================================

#[test]
fn indicator_slides_from_previous_item() {
    let Fixture {
        mut strip, items, ..
    } = setup(&[40.0, 40.0, 40.0], 400.0, Platform::desktop());
    strip.set_value(Some("t0"));
    strip.select("t1");

    let from = IndicatorTransform::new(-40.0, 1.0);
    assert_eq!(strip.surface().indicator_style(items[1].indicator).transform, from);

    strip.advance(Duration::from_millis(69));
    assert!(matches!(strip.indicator_phase(), IndicatorPhase::Delayed { .. }));
    assert_eq!(strip.surface().indicator_style(items[1].indicator).transition, None);

    strip.advance(Duration::from_millis(1));
    let style = strip.surface().indicator_style(items[1].indicator);
    assert!(style.transform.is_identity());
    assert_eq!(style.transition.map(|t| t.duration), Some(Duration::from_millis(250)));

    strip.advance(Duration::from_millis(250));
    assert_eq!(
        strip.indicator_phase(),
        IndicatorPhase::Settled {
            indicator: items[1].indicator
        }
    );
}

#[test]
fn reselecting_current_item_changes_nothing() {
    let Fixture { mut strip, .. } = setup(&[40.0, 40.0], 400.0, Platform::desktop());
    strip.set_value(Some("t0"));
    strip.flush();

    let notified = Arc::new(Mutex::new(0));
    let counter = notified.clone();
    strip.model_changed.connect(move |_| *counter.lock() += 1);

    strip.set_active(
        Some("t0"),
        SelectOptions {
            explicit: true,
            ..SelectOptions::default()
        },
    );
    assert_eq!(*notified.lock(), 0);
    assert_eq!(strip.indicator_phase(), IndicatorPhase::Idle);
}

#[test]
fn selecting_offscreen_item_scrolls_it_into_view() {
    let Fixture {
        mut strip, items, ..
    } = setup(&[100.0, 100.0, 100.0], 100.0, Platform::desktop());
    strip.set_value(Some("t0"));
    strip.select("t2");
    assert_eq!(strip.surface().scroll_offset(), 200.0);
    let rect = strip.surface().bounding_rect(items[2].element);
    assert_eq!(rect.map(|r| r.left()), Some(0.0));
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn registration_order_is_preserved() {
    let Fixture {
        mut strip,
        items,
        handles,
    } = setup(&[40.0, 40.0, 40.0], 400.0, Platform::desktop());

    strip.unregister(handles[1]);
    let again = strip.register(TabDescriptor::new("t1", items[1].element, items[1].indicator));

    let order: Vec<TabHandle> = strip.tabs().map(|(handle, _)| handle).collect();
    assert_eq!(order, vec![handles[0], handles[2], again]);
    let names: Vec<&str> = strip.tabs().map(|(_, tab)| tab.name.as_str()).collect();
    assert_eq!(names, vec!["t0", "t2", "t1"]);
}

// ============================================================================
// Routing
// ============================================================================

fn routed(router: &Arc<MemoryRouter>) -> (TabStrip<VirtualSurface>, Vec<VirtualItem>) {
    init_tracing();
    let mut surface = VirtualSurface::new(Orientation::Horizontal, Size::new(400.0, 48.0));
    let items: Vec<VirtualItem> = (0..3).map(|_| surface.push_item(100.0)).collect();
    let strip = TabStrip::new(StripConfig::default(), Platform::desktop(), surface)
        .with_navigator(router.clone());
    (strip, items)
}

#[test]
fn exact_hash_match_wins_over_earlier_prefix_match() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/:section", "/docs"]));
    router.push("/docs#x");
    let (mut strip, items) = routed(&router);

    strip.register(TabDescriptor::new("section", items[0].element, items[0].indicator).with_route("/docs", false));
    strip.register(TabDescriptor::new("anchor", items[1].element, items[1].indicator).with_route("/docs#x", true));
    strip.advance(Duration::ZERO);

    assert_eq!(strip.current(), Some("anchor"));
}

#[test]
fn location_changes_follow_most_specific_item() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/users", "/users/:id"]));
    let (mut strip, items) = routed(&router);

    strip.register(TabDescriptor::new("home", items[0].element, items[0].indicator).with_route("/", false));
    strip.register(TabDescriptor::new("users", items[1].element, items[1].indicator).with_route("/users", false));
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("home"));

    router.push("/users/42");
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("users"));

    router.push("/");
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("home"));
}

#[test]
fn unregistering_sole_route_match_clears_selection() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/inbox"]));
    router.push("/inbox");
    let (mut strip, items) = routed(&router);

    let inbox = strip.register(TabDescriptor::new("inbox", items[0].element, items[0].indicator).with_route("/inbox", false));
    strip.register(TabDescriptor::new("plain", items[1].element, items[1].indicator));
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("inbox"));
    assert!(strip.has_route_watcher());

    strip.unregister(inbox);
    assert!(!strip.has_route_watcher());
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), None);
}

#[test]
fn watcher_is_attached_once_and_survives_suspend() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/a", "/b"]));
    let (mut strip, items) = routed(&router);

    strip.register(TabDescriptor::new("a", items[0].element, items[0].indicator).with_route("/a", false));
    strip.register(TabDescriptor::new("b", items[1].element, items[1].indicator).with_route("/b", false));
    assert_eq!(router.location_changed.connection_count(), 1);

    strip.suspend();
    assert_eq!(router.location_changed.connection_count(), 0);
    strip.resume();
    assert_eq!(router.location_changed.connection_count(), 1);

    drop(strip);
    assert_eq!(router.location_changed.connection_count(), 0);
}

#[test]
fn avoided_route_watcher_ignores_navigation() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/a", "/b"]));
    router.push("/a");
    let (mut strip, items) = routed(&router);

    strip.register(TabDescriptor::new("a", items[0].element, items[0].indicator).with_route("/a", false));
    strip.register(TabDescriptor::new("b", items[1].element, items[1].indicator).with_route("/b", false));
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("a"));

    strip.set_avoid_route_watcher(true);
    router.push("/b");
    strip.advance(Duration::from_millis(10));
    assert_eq!(strip.current(), Some("a"));
}

#[test]
fn repeated_resolution_is_stable() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/a", "/a/:id"]));
    router.push("/a/1");
    let (mut strip, items) = routed(&router);

    strip.register(TabDescriptor::new("a", items[0].element, items[0].indicator).with_route("/a", false));
    strip.register(TabDescriptor::new("a1", items[1].element, items[1].indicator).with_route("/a/1", false));
    strip.advance(Duration::ZERO);
    let first = strip.current().map(str::to_string);

    for path in ["/a/1#top", "/a/1"] {
        router.push(path);
        strip.advance(Duration::ZERO);
        assert_eq!(strip.current().map(str::to_string), first);
    }
    assert_eq!(first.as_deref(), Some("a1"));
}

#[test]
fn unrelated_navigation_leaves_user_animation_running() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/reports", "/settings"]));
    let (mut strip, items) = routed(&router);

    strip.register(TabDescriptor::new("p0", items[0].element, items[0].indicator));
    strip.register(TabDescriptor::new("p1", items[1].element, items[1].indicator));
    strip.register(TabDescriptor::new("reports", items[2].element, items[2].indicator).with_route("/reports", false));
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), None);

    strip.set_value(Some("p0"));
    strip.select("p1");
    strip.advance(Duration::from_millis(70));
    assert!(matches!(
        strip.indicator_phase(),
        IndicatorPhase::Running { indicator, .. } if indicator == items[1].indicator
    ));

    router.push("/settings");
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("p1"));
    assert!(matches!(
        strip.indicator_phase(),
        IndicatorPhase::Running { indicator, .. } if indicator == items[1].indicator
    ));

    strip.advance(Duration::from_millis(250));
    assert_eq!(
        strip.indicator_phase(),
        IndicatorPhase::Settled {
            indicator: items[1].indicator
        }
    );
}

#[test]
fn route_selection_reclaims_indicator_after_user_click() {
    let router = Arc::new(MemoryRouter::with_routes(["/", "/a"]));
    router.push("/a");
    let (mut strip, items) = routed(&router);

    strip.register(TabDescriptor::new("a", items[0].element, items[0].indicator).with_route("/a", false));
    strip.register(TabDescriptor::new("plain", items[1].element, items[1].indicator));
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("a"));

    strip.select("plain");
    strip.advance(Duration::from_millis(70));
    assert!(matches!(
        strip.indicator_phase(),
        IndicatorPhase::Running { indicator, .. } if indicator == items[1].indicator
    ));

    // The previous selection came from the route, so the route wins again.
    router.push("/a#zzz");
    strip.advance(Duration::ZERO);
    assert_eq!(strip.current(), Some("a"));
    assert!(matches!(
        strip.indicator_phase(),
        IndicatorPhase::Delayed { indicator, .. } if indicator == items[0].indicator
    ));

    strip.advance(Duration::from_millis(320));
    assert_eq!(
        strip.indicator_phase(),
        IndicatorPhase::Settled {
            indicator: items[0].indicator
        }
    );
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn home_and_end_reach_the_edges() {
    let Fixture {
        mut strip, items, ..
    } = setup(&[60.0; 5], 100.0, Platform::desktop());

    assert!(strip.on_key(Key::End, items[0].element));
    assert_eq!(strip.surface().focused(), Some(items[4].element));
    assert_eq!(strip.surface().scroll_offset(), strip.surface().max_scroll());

    assert!(strip.on_key(Key::Home, items[4].element));
    assert_eq!(strip.surface().focused(), Some(items[0].element));
    assert_eq!(strip.surface().scroll_offset(), 0.0);
}

#[test]
fn rtl_inverts_arrow_keys() {
    let Fixture {
        mut strip, items, ..
    } = setup(&[60.0; 5], 100.0, Platform::desktop().with_rtl(true));

    assert!(strip.on_key(Key::ArrowLeft, items[0].element));
    assert_eq!(strip.surface().focused(), Some(items[1].element));

    assert!(strip.on_key(Key::ArrowRight, items[1].element));
    assert_eq!(strip.surface().focused(), Some(items[0].element));
}

#[test]
fn unrelated_keys_are_not_consumed() {
    let Fixture {
        mut strip, items, ..
    } = setup(&[60.0; 5], 100.0, Platform::desktop());
    assert!(!strip.on_key(Key::ArrowDown, items[0].element));
    assert!(!strip.on_key(Key::from_key_code(13), items[0].element));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn toml_configured_vertical_strip() {
    init_tracing();
    let config = StripConfig::from_toml_str(
        r#"
        orientation = "vertical"
        breakpoint = 50
        switch_indicator = true

        [timings]
        scroll_step = 20
        "#,
    )
    .unwrap();

    let mut surface = VirtualSurface::new(Orientation::Vertical, Size::new(48.0, 100.0));
    let items: Vec<VirtualItem> = (0..4).map(|_| surface.push_item(50.0)).collect();
    let mut strip = TabStrip::new(config, Platform::desktop(), surface);
    for (i, item) in items.iter().enumerate() {
        strip.register(TabDescriptor::new(format!("t{i}"), item.element, item.indicator));
    }
    strip.advance(Duration::ZERO);

    assert!(strip.state().scrollable);
    assert!(!strip.state().justify);
    assert_eq!(strip.layout().start_icon, "up");

    strip.press_end_arrow();
    strip.advance(Duration::from_millis(25));
    assert_eq!(strip.surface().scroll_offset(), 100.0);
    strip.release_arrow();
    assert!(!strip.state().right_arrow);
}
