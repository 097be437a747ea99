//! Route match resolution and the location watcher.

use horizon_tabstrip_core::logging::targets;

use super::{SelectOptions, StripMessage, TabStrip, TimeoutTask};
use crate::surface::StripSurface;

/// One route-aware item, as seen by a single resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCandidate {
    /// The item's selection value.
    pub name: String,
    /// The item matches exactly rather than by prefix.
    pub exact: bool,
    /// The navigator's predicate for the item's matching mode.
    pub active: bool,
    /// Number of route records the destination matches.
    pub matched: usize,
    /// Length of the resolved address without its fragment.
    pub href_len: usize,
    /// Fragment of the destination, including `#`, or empty.
    pub hash: String,
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    /// The best matching item, if any.
    pub winner: Option<String>,
    /// Whether the winner (or "no selection") should be applied.
    pub apply: bool,
}

#[derive(Debug, Default)]
struct Best {
    matched: usize,
    href_len: usize,
    exact: bool,
}

/// Pick the item that best matches the current location.
///
/// Candidates are visited in registration order. An exact item whose hash
/// equals `location_hash` wins immediately; otherwise more matched records
/// win, then the longer address. When the currently selected item was set
/// by a previous pass (`from_route`), or is seen going inactive, the result
/// is applied even when nothing matched.
pub fn resolve_route_winner(
    candidates: &[RouteCandidate],
    location_hash: &str,
    current: Option<&str>,
    from_route: bool,
) -> RouteDecision {
    let mut winner: Option<&str> = None;
    let mut was_active = from_route;
    let mut probe_armed = !from_route;
    let mut best = Best::default();

    let mut probe = |candidate: &RouteCandidate, was_active: &mut bool| {
        if probe_armed && current == Some(candidate.name.as_str()) {
            *was_active = true;
            probe_armed = false;
        }
    };

    for candidate in candidates {
        if !candidate.active || (best.exact && !candidate.exact) {
            probe(candidate, &mut was_active);
            continue;
        }

        // The navigator's predicates never look at the fragment.
        if candidate.exact {
            if candidate.hash == location_hash {
                winner = Some(candidate.name.as_str());
                break;
            } else if !location_hash.is_empty() && !candidate.hash.is_empty() {
                probe(candidate, &mut was_active);
                continue;
            }
        }

        let better = if candidate.matched == best.matched {
            candidate.href_len > best.href_len
        } else {
            candidate.matched > best.matched
        };
        if better {
            winner = Some(candidate.name.as_str());
            best = Best {
                matched: candidate.matched,
                href_len: candidate.href_len,
                exact: candidate.exact,
            };
            continue;
        }

        probe(candidate, &mut was_active);
    }

    RouteDecision {
        winner: winner.map(str::to_string),
        apply: was_active || winner.is_some(),
    }
}

impl<S: StripSurface> TabStrip<S> {
    /// Subscribe to location changes, once.
    pub(super) fn watch_route(&mut self) {
        if self.watch.is_some() || self.destroyed {
            return;
        }
        let Some(navigator) = self.navigator.clone() else {
            return;
        };
        let inbox = self.inbox_tx.clone();
        let token = navigator.watch(Box::new(move || {
            let _ = inbox.send(StripMessage::LocationChanged);
        }));
        self.watch = Some(token);
        tracing::debug!(target: targets::ROUTE, "route watcher attached");
    }

    pub(super) fn unwatch_route(&mut self) {
        if let Some(token) = self.watch.take() {
            if let Some(navigator) = &self.navigator {
                navigator.unwatch(token);
            }
            tracing::debug!(target: targets::ROUTE, "route watcher detached");
        }
    }

    /// Check whether the location watcher is attached.
    pub fn has_route_watcher(&self) -> bool {
        self.watch.is_some()
    }

    /// Schedule a reconciliation pass unless route watching is suppressed.
    pub(super) fn verify_route_model(&mut self) {
        if !self.state.avoid_route_watcher {
            let delay = self.config.timings.route_debounce();
            self.arm_timeout(TimeoutTask::ReconcileRoute, delay);
        }
    }

    /// Run a resolution pass against the navigator and apply its outcome.
    pub(super) fn update_active_route(&mut self) {
        let Some(navigator) = self.navigator.clone() else {
            return;
        };

        let candidates: Vec<RouteCandidate> = self
            .ledger
            .route_items()
            .map(|(item, route)| {
                let active = if route.exact {
                    navigator.is_exact_active(&route.to)
                } else {
                    navigator.is_active(&route.to)
                };
                let resolved = navigator.resolve(&route.to);
                RouteCandidate {
                    name: item.name.clone(),
                    exact: route.exact,
                    active,
                    matched: resolved.matched,
                    href_len: resolved.href_len_without_hash(),
                    hash: resolved.hash,
                }
            })
            .collect();

        let location = navigator.location();
        let decision = resolve_route_winner(
            &candidates,
            &location.hash,
            self.state.current.as_deref(),
            self.from_route,
        );
        tracing::debug!(
            target: targets::ROUTE,
            location = %location.full_path(),
            winner = ?decision.winner,
            apply = decision.apply,
            "route resolved"
        );

        if decision.apply {
            self.update_model(
                decision.winner,
                SelectOptions {
                    explicit: true,
                    silent: false,
                    from_route: Some(true),
                },
            );
        }
    }
}
