//! Unidirectional A* search loop and the public result types.

use serde::Serialize;
use tracing::{debug, trace};

use crate::frontier::Frontier;
use crate::ledger::{EntryId, EntryState, Ledger};
use crate::waypoint::Waypoint;

/// A found route: the waypoint sequence source-first, and its total cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<W> {
    pub waypoints: Vec<W>,
    pub cost: f64,
}

/// Counters for a single query, in the spirit of a profiling report.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SearchStats {
    /// Frontier pops (nodes settled). Both sides combined for bidirectional.
    pub expansions: u64,
    /// Neighbor edges examined.
    pub relaxations: u64,
    /// Open entries re-prioritized in place.
    pub decrease_keys: u64,
    /// Closed entries re-opened (only with an inconsistent heuristic or
    /// negative edge weights).
    pub reopened: u64,
    /// High-water mark of frontier size.
    pub frontier_peak: u64,
}

/// Optional bounds on a query. The default imposes none.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryLimits {
    /// Abort with [`SearchOutcome::LimitReached`] once this many expansions
    /// have been performed.
    pub max_expansions: Option<u64>,
}

/// How a query ended. "No path exists" is an outcome, not an error.
#[derive(Debug, Clone)]
pub enum SearchOutcome<W> {
    /// A route was found.
    Found(Route<W>),
    /// The frontier drained without reaching the target.
    Unreachable,
    /// The expansion budget ran out first; reachability is unknown.
    LimitReached,
}

impl<W> SearchOutcome<W> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn into_route(self) -> Option<Route<W>> {
        match self {
            SearchOutcome::Found(route) => Some(route),
            SearchOutcome::Unreachable | SearchOutcome::LimitReached => None,
        }
    }
}

/// Find a least-cost route from `source` to `target`.
///
/// Returns `None` if the target is unreachable. With an admissible,
/// consistent [`Waypoint::heuristic`] the returned cost is optimal.
pub fn path<W: Waypoint>(source: &W, target: &W) -> Option<Route<W>> {
    path_with(source, target, &QueryLimits::default()).0.into_route()
}

/// [`path`] with explicit limits, also reporting query statistics.
pub fn path_with<W: Waypoint>(
    source: &W,
    target: &W,
    limits: &QueryLimits,
) -> (SearchOutcome<W>, SearchStats) {
    let mut ledger: Ledger<W> = Ledger::new();
    let mut frontier = Frontier::new();
    let mut stats = SearchStats::default();

    let src = ledger.intern(source);
    {
        let entry = ledger.entry_mut(src);
        entry.cost = 0.0;
        entry.rank = source.heuristic(target);
    }
    frontier.push(&mut ledger, src);
    stats.frontier_peak = 1;

    loop {
        let Some(current) = frontier.pop_min(&mut ledger) else {
            debug!(expansions = stats.expansions, "frontier exhausted, target unreachable");
            return (SearchOutcome::Unreachable, stats);
        };
        if let Some(cap) = limits.max_expansions {
            if stats.expansions >= cap {
                debug!(cap, "expansion budget exhausted");
                return (SearchOutcome::LimitReached, stats);
            }
        }
        stats.expansions += 1;

        if ledger.entry(current).waypoint == *target {
            let cost = ledger.entry(current).cost;
            let waypoints = ledger.walk_back(current);
            debug!(
                cost,
                expansions = stats.expansions,
                decrease_keys = stats.decrease_keys,
                frontier_peak = stats.frontier_peak,
                "route found"
            );
            return (SearchOutcome::Found(Route { waypoints, cost }), stats);
        }

        expand(&mut ledger, &mut frontier, current, target, &mut stats);
        stats.frontier_peak = stats.frontier_peak.max(frontier.len() as u64);
    }
}

/// Relax all neighbors of a just-settled entry into the ledger/frontier.
///
/// Shared by the unidirectional loop and each side of the bidirectional
/// search; `goal` is whichever endpoint this side estimates toward.
pub(crate) fn expand<W: Waypoint>(
    ledger: &mut Ledger<W>,
    frontier: &mut Frontier,
    current: EntryId,
    goal: &W,
    stats: &mut SearchStats,
) {
    let current_wp = ledger.entry(current).waypoint.clone();
    let current_cost = ledger.entry(current).cost;
    trace!(cost = current_cost, "settled waypoint");

    for neighbor in current_wp.neighbors() {
        stats.relaxations += 1;
        let tentative = current_cost + current_wp.edge_cost(&neighbor);
        let id = ledger.intern(&neighbor);
        match ledger.entry(id).state {
            EntryState::Unseen => {
                let rank = tentative + neighbor.heuristic(goal);
                let entry = ledger.entry_mut(id);
                entry.cost = tentative;
                entry.rank = rank;
                entry.parent = Some(current);
                frontier.push(ledger, id);
            }
            EntryState::Open if tentative < ledger.entry(id).cost => {
                let rank = tentative + neighbor.heuristic(goal);
                let entry = ledger.entry_mut(id);
                entry.cost = tentative;
                entry.rank = rank;
                entry.parent = Some(current);
                frontier.decrease_key(ledger, id);
                stats.decrease_keys += 1;
            }
            EntryState::Closed if tentative < ledger.entry(id).cost => {
                // Only reachable with an inconsistent heuristic or a
                // negative edge weight. Reopen instead of silently keeping
                // the worse cost, so the ledger never holds a finalized
                // entry that a live frontier entry undercuts.
                let rank = tentative + neighbor.heuristic(goal);
                let entry = ledger.entry_mut(id);
                entry.cost = tentative;
                entry.rank = rank;
                entry.parent = Some(current);
                frontier.push(ledger, id);
                stats.reopened += 1;
            }
            EntryState::Open | EntryState::Closed => {}
        }
    }
}
