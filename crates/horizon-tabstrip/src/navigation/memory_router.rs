//! An in-memory [`Navigator`] with a flat route table.
//!
//! Routes are path patterns such as `/users` and `/users/:id`. A target's
//! matched count is the number of patterns that match a leading run of its
//! segments, which mirrors how nested route records stack up.

use parking_lot::RwLock;

use horizon_tabstrip_core::Signal;
use horizon_tabstrip_core::logging::targets;

use super::{Location, Navigator, ResolvedRoute, RouteTarget, WatchToken};

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Literal(String),
    Param,
}

#[derive(Debug, Clone)]
struct RoutePattern {
    segments: Vec<PatternSegment>,
}

impl RoutePattern {
    fn parse(pattern: &str) -> Self {
        let segments = segments(pattern)
            .map(|segment| {
                if segment.starts_with(':') {
                    PatternSegment::Param
                } else {
                    PatternSegment::Literal(segment.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    /// Whether this pattern matches the first segments of `path`.
    fn matches_prefix(&self, path: &[&str]) -> bool {
        self.segments.len() <= path.len()
            && self
                .segments
                .iter()
                .zip(path)
                .all(|(pattern, segment)| match pattern {
                    PatternSegment::Literal(literal) => literal == segment,
                    PatternSegment::Param => true,
                })
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// A navigator holding its location in memory.
pub struct MemoryRouter {
    routes: RwLock<Vec<RoutePattern>>,
    location: RwLock<Location>,
    /// Emitted after the full location changes.
    pub location_changed: Signal<Location>,
}

impl MemoryRouter {
    /// Create a router at `/` with no routes.
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
            location: RwLock::new(Location::parse("/")),
            location_changed: Signal::new(),
        }
    }

    /// Create a router with the given route patterns.
    pub fn with_routes<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Self {
        let router = Self::new();
        for pattern in patterns {
            router.add_route(pattern);
        }
        router
    }

    /// Register a route pattern.
    pub fn add_route(&self, pattern: &str) {
        self.routes.write().push(RoutePattern::parse(pattern));
    }

    /// Navigate to `address` (`path#hash`).
    ///
    /// Watchers are notified only when the full location actually changes.
    pub fn push(&self, address: &str) {
        let next = Location::parse(address);
        {
            let mut location = self.location.write();
            if location.full_path() == next.full_path() {
                return;
            }
            *location = next.clone();
        }
        tracing::debug!(target: targets::ROUTE, location = %next.full_path(), "navigated");
        self.location_changed.emit(next);
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRouter")
            .field("routes", &self.routes.read().len())
            .field("location", &*self.location.read())
            .field("watchers", &self.location_changed.connection_count())
            .finish()
    }
}

impl Navigator for MemoryRouter {
    fn location(&self) -> Location {
        self.location.read().clone()
    }

    fn resolve(&self, target: &RouteTarget) -> ResolvedRoute {
        let path: Vec<&str> = segments(&target.path).collect();
        let matched = self
            .routes
            .read()
            .iter()
            .filter(|route| route.matches_prefix(&path))
            .count();
        ResolvedRoute {
            matched,
            href: format!("{}{}", target.path, target.hash),
            hash: target.hash.clone(),
        }
    }

    fn is_active(&self, target: &RouteTarget) -> bool {
        let location = self.location.read();
        let current: Vec<&str> = segments(&location.path).collect();
        let wanted: Vec<&str> = segments(&target.path).collect();
        current.starts_with(&wanted)
    }

    fn is_exact_active(&self, target: &RouteTarget) -> bool {
        let location = self.location.read();
        segments(&location.path).eq(segments(&target.path))
    }

    fn watch(&self, callback: Box<dyn Fn() + Send + Sync>) -> WatchToken {
        self.location_changed.connect(move |_| callback())
    }

    fn unwatch(&self, token: WatchToken) -> bool {
        self.location_changed.disconnect(token)
    }
}

static_assertions::assert_impl_all!(MemoryRouter: Send, Sync);
