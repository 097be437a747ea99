//! Ordered registry of the strip's items.

use slotmap::{SlotMap, new_key_type};

use crate::navigation::RouteTarget;
use crate::surface::ElementId;

new_key_type! {
    /// Identity token returned by [`TabStrip::register`](super::TabStrip::register).
    ///
    /// Items are always removed through this token, never by name, since a
    /// name may be reused by a remounted item while the old one is still
    /// registered.
    pub struct TabHandle;
}

/// Navigation destination of a route-aware item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRoute {
    /// Where the item links to.
    pub to: RouteTarget,
    /// Match the location exactly instead of by prefix.
    pub exact: bool,
}

/// What an item supplies when it mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    /// Selection value of the item. Empty means "no value".
    pub name: String,
    /// The item's root element.
    pub element: ElementId,
    /// The item's indicator element.
    pub indicator: ElementId,
    /// Destination, for route-aware items.
    pub route: Option<TabRoute>,
}

impl TabDescriptor {
    /// Describe a plain item.
    pub fn new(name: impl Into<String>, element: ElementId, indicator: ElementId) -> Self {
        Self {
            name: name.into(),
            element,
            indicator,
            route: None,
        }
    }

    /// Make the item route-aware.
    pub fn with_route(mut self, to: impl Into<RouteTarget>, exact: bool) -> Self {
        self.route = Some(TabRoute {
            to: to.into(),
            exact,
        });
        self
    }

    /// Check whether the item follows the navigator.
    pub fn is_route_aware(&self) -> bool {
        self.route.is_some()
    }
}

/// Items in registration order.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    items: SlotMap<TabHandle, TabDescriptor>,
    order: Vec<TabHandle>,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, descriptor: TabDescriptor) -> TabHandle {
        let handle = self.items.insert(descriptor);
        self.order.push(handle);
        handle
    }

    pub(crate) fn remove(&mut self, handle: TabHandle) -> Option<TabDescriptor> {
        let descriptor = self.items.remove(handle)?;
        self.order.retain(|h| *h != handle);
        Some(descriptor)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn get(&self, handle: TabHandle) -> Option<&TabDescriptor> {
        self.items.get(handle)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (TabHandle, &TabDescriptor)> + '_ {
        self.order
            .iter()
            .filter_map(|handle| self.items.get(*handle).map(|item| (*handle, item)))
    }

    /// First item carrying `name`. An empty name never matches.
    pub(crate) fn find_by_name(&self, name: &str) -> Option<&TabDescriptor> {
        if name.is_empty() {
            return None;
        }
        self.iter().map(|(_, item)| item).find(|item| item.name == name)
    }

    pub(crate) fn contains_element(&self, element: ElementId) -> bool {
        self.iter().any(|(_, item)| item.element == element)
    }

    pub(crate) fn route_items(&self) -> impl Iterator<Item = (&TabDescriptor, &TabRoute)> + '_ {
        self.iter()
            .filter_map(|(_, item)| item.route.as_ref().map(|route| (item, route)))
    }

    pub(crate) fn has_route_items(&self) -> bool {
        self.route_items().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(name: &str, id: u64) -> TabDescriptor {
        TabDescriptor::new(name, ElementId::new(id), ElementId::new(id + 100))
    }

    #[test]
    fn test_order_follows_registration() {
        let mut ledger = Ledger::new();
        let a = ledger.push(tab("a", 1));
        let b = ledger.push(tab("b", 2));
        let c = ledger.push(tab("c", 3));

        ledger.remove(b);
        let d = ledger.push(tab("d", 4));

        let order: Vec<TabHandle> = ledger.iter().map(|(h, _)| h).collect();
        assert_eq!(order, vec![a, c, d]);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_remove_by_identity_with_duplicate_names() {
        let mut ledger = Ledger::new();
        let first = ledger.push(tab("dup", 1));
        let second = ledger.push(tab("dup", 2));

        assert_eq!(ledger.find_by_name("dup").unwrap().element, ElementId::new(1));
        ledger.remove(first);
        assert_eq!(ledger.find_by_name("dup").unwrap().element, ElementId::new(2));
        assert!(ledger.remove(first).is_none());
        assert!(ledger.get(second).is_some());
    }

    #[test]
    fn test_empty_name_never_matches() {
        let mut ledger = Ledger::new();
        ledger.push(tab("", 1));
        assert!(ledger.find_by_name("").is_none());
    }

    #[test]
    fn test_route_items() {
        let mut ledger = Ledger::new();
        ledger.push(tab("plain", 1));
        assert!(!ledger.has_route_items());

        ledger.push(tab("linked", 2).with_route("/docs", false));
        assert!(ledger.has_route_items());
        assert_eq!(ledger.route_items().count(), 1);
        assert!(ledger.contains_element(ElementId::new(2)));
        assert!(!ledger.contains_element(ElementId::new(102)));
    }
}
