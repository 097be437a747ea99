//! The navigation collaborator.
//!
//! Route-aware items declare a [`RouteTarget`]. The strip asks a
//! [`Navigator`] whether each target is active, how specific its match is,
//! and subscribes to location changes while at least one route-aware item is
//! registered.

mod memory_router;

pub use memory_router::MemoryRouter;

use horizon_tabstrip_core::ConnectionId;

/// Subscription handle returned by [`Navigator::watch`].
pub type WatchToken = ConnectionId;

/// Split `path#hash` into its parts. The hash keeps its leading `#`.
fn split_hash(address: &str) -> (&str, &str) {
    match address.find('#') {
        Some(pos) => address.split_at(pos),
        None => (address, ""),
    }
}

/// The navigator's current location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Path without the fragment, e.g. `/users/7`.
    pub path: String,
    /// Fragment including its leading `#`, or empty.
    pub hash: String,
}

impl Location {
    /// Parse `path#hash`.
    pub fn parse(address: &str) -> Self {
        let (path, hash) = split_hash(address);
        Self {
            path: path.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Path and fragment joined.
    pub fn full_path(&self) -> String {
        format!("{}{}", self.path, self.hash)
    }
}

/// Destination declared by a route-aware item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTarget {
    /// Destination path.
    pub path: String,
    /// Destination fragment including its leading `#`, or empty.
    pub hash: String,
}

impl RouteTarget {
    /// Parse `path#hash`.
    pub fn parse(address: &str) -> Self {
        let (path, hash) = split_hash(address);
        Self {
            path: path.to_string(),
            hash: hash.to_string(),
        }
    }
}

impl From<&str> for RouteTarget {
    fn from(address: &str) -> Self {
        Self::parse(address)
    }
}

/// A [`RouteTarget`] resolved against the route table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Number of route records the target path matches, outermost first.
    pub matched: usize,
    /// Full resolved address, fragment included.
    pub href: String,
    /// Fragment of the resolved address, including its leading `#`.
    pub hash: String,
}

impl ResolvedRoute {
    /// Length of the resolved address without its fragment.
    pub fn href_len_without_hash(&self) -> usize {
        self.href.len().saturating_sub(self.hash.len())
    }
}

/// Location access and change notification.
pub trait Navigator: Send + Sync {
    /// The current location.
    fn location(&self) -> Location;

    /// Resolve a target against the route table.
    fn resolve(&self, target: &RouteTarget) -> ResolvedRoute;

    /// Whether the current location is at or below `target`.
    fn is_active(&self, target: &RouteTarget) -> bool;

    /// Whether the current location is exactly `target`, ignoring fragments.
    fn is_exact_active(&self, target: &RouteTarget) -> bool;

    /// Call `callback` whenever the full location changes.
    fn watch(&self, callback: Box<dyn Fn() + Send + Sync>) -> WatchToken;

    /// Drop a subscription. Returns `false` if it was already gone.
    fn unwatch(&self, token: WatchToken) -> bool;
}
