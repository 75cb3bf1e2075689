//! Bidirectional search: two independent A* frontiers stitched at a
//! meeting point.
//!
//! Forward and reverse sides share nothing: each owns its ledger and
//! frontier, and the loop alternates one expansion per side. "Bidirectional"
//! is a statement about the two frontiers, not about threads. The reverse
//! side reuses the caller's neighbor and cost functions unchanged, so the
//! graph must be effectively undirected (or the caller must supply symmetric
//! semantics).

use tracing::{debug, trace};

use crate::frontier::Frontier;
use crate::ledger::{EntryId, EntryState, Ledger};
use crate::search::{expand, QueryLimits, Route, SearchOutcome, SearchStats};
use crate::waypoint::Waypoint;

/// Termination policy for the bidirectional loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopRule {
    /// Stop at the first waypoint the forward search settles that the
    /// reverse search has already queued or settled. Cheap, but a known
    /// approximation: on graphs with very uneven edge costs the stitched
    /// route can be suboptimal.
    #[default]
    FirstMeet,
    /// Track the best candidate meeting cost and keep expanding until no
    /// open entry on either side can beat it. With an admissible heuristic
    /// the result is provably optimal.
    BestBound,
}

/// Configuration for [`path_bidir_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BidirConfig {
    pub limits: QueryLimits,
    pub stop_rule: StopRule,
}

/// Find a route by searching from both endpoints at once.
///
/// Same contract as [`crate::path`], using the default
/// [`StopRule::FirstMeet`] policy.
pub fn path_bidir<W: Waypoint>(source: &W, target: &W) -> Option<Route<W>> {
    path_bidir_with(source, target, &BidirConfig::default())
        .0
        .into_route()
}

/// [`path_bidir`] with explicit configuration, also reporting statistics.
pub fn path_bidir_with<W: Waypoint>(
    source: &W,
    target: &W,
    config: &BidirConfig,
) -> (SearchOutcome<W>, SearchStats) {
    let mut fwd: Ledger<W> = Ledger::new();
    let mut fwd_frontier = Frontier::new();
    let mut rev: Ledger<W> = Ledger::new();
    let mut rev_frontier = Frontier::new();
    let mut stats = SearchStats::default();

    let fwd_src = fwd.intern(source);
    {
        let entry = fwd.entry_mut(fwd_src);
        entry.cost = 0.0;
        entry.rank = source.heuristic(target);
    }
    fwd_frontier.push(&mut fwd, fwd_src);

    let rev_src = rev.intern(target);
    {
        let entry = rev.entry_mut(rev_src);
        entry.cost = 0.0;
        entry.rank = target.heuristic(source);
    }
    rev_frontier.push(&mut rev, rev_src);
    stats.frontier_peak = 2;

    // Best candidate meeting point so far (BestBound only).
    let mut best: Option<(f64, EntryId, EntryId)> = None;

    loop {
        match config.stop_rule {
            StopRule::FirstMeet => {
                // A drained side proves its endpoint's component is fully
                // explored without a meeting, hence no path at all.
                if fwd_frontier.is_empty() || rev_frontier.is_empty() {
                    debug!(expansions = stats.expansions, "one frontier drained, no meeting");
                    return (SearchOutcome::Unreachable, stats);
                }
            }
            StopRule::BestBound => {
                // Any unfound route still needs an open entry on each side,
                // so a drained side or a beaten bound settles the query.
                let fwd_min = fwd_frontier.min_rank(&fwd);
                let rev_min = rev_frontier.min_rank(&rev);
                let settled = match (fwd_min, rev_min) {
                    (Some(f), Some(r)) => {
                        matches!(best, Some((mu, _, _)) if mu <= f.max(r))
                    }
                    _ => true,
                };
                if settled {
                    return match best {
                        Some((_, f_id, r_id)) => {
                            let route = stitch(&fwd, f_id, &rev, r_id);
                            debug!(cost = route.cost, expansions = stats.expansions, "bound met");
                            (SearchOutcome::Found(route), stats)
                        }
                        None => {
                            debug!(expansions = stats.expansions, "both frontiers drained");
                            (SearchOutcome::Unreachable, stats)
                        }
                    };
                }
            }
        }

        if let Some(cap) = config.limits.max_expansions {
            if stats.expansions >= cap {
                debug!(cap, "expansion budget exhausted");
                return (SearchOutcome::LimitReached, stats);
            }
        }

        // One step per side per round.
        let fwd_cur = fwd_frontier.pop_min(&mut fwd);
        if fwd_cur.is_some() {
            stats.expansions += 1;
        }
        let rev_cur = rev_frontier.pop_min(&mut rev);
        if rev_cur.is_some() {
            stats.expansions += 1;
        }

        match config.stop_rule {
            StopRule::FirstMeet => {
                // Meeting check on the forward side only: has the reverse
                // search already reached or queued this waypoint? The
                // reverse entry may still be open with a non-final cost;
                // returning immediately is the accepted trade-off.
                let f_id = fwd_cur.expect("frontier checked non-empty");
                if let Some(r_id) = rev.lookup(&fwd.entry(f_id).waypoint) {
                    if rev.entry(r_id).state != EntryState::Unseen {
                        let route = stitch(&fwd, f_id, &rev, r_id);
                        debug!(cost = route.cost, expansions = stats.expansions, "first meeting");
                        return (SearchOutcome::Found(route), stats);
                    }
                }
            }
            StopRule::BestBound => {
                if let Some(f_id) = fwd_cur {
                    note_meeting(&fwd, f_id, &rev, &mut best, false);
                }
                if let Some(r_id) = rev_cur {
                    note_meeting(&rev, r_id, &fwd, &mut best, true);
                }
            }
        }

        if let Some(f_id) = fwd_cur {
            expand(&mut fwd, &mut fwd_frontier, f_id, target, &mut stats);
        }
        if let Some(r_id) = rev_cur {
            expand(&mut rev, &mut rev_frontier, r_id, source, &mut stats);
        }
        stats.frontier_peak = stats
            .frontier_peak
            .max((fwd_frontier.len() + rev_frontier.len()) as u64);
    }
}

/// Record a candidate meeting point if the just-settled entry is known to
/// the other side and improves on the best total seen so far.
fn note_meeting<W: Waypoint>(
    own: &Ledger<W>,
    settled: EntryId,
    other: &Ledger<W>,
    best: &mut Option<(f64, EntryId, EntryId)>,
    settled_is_reverse: bool,
) {
    let Some(other_id) = other.lookup(&own.entry(settled).waypoint) else {
        return;
    };
    if other.entry(other_id).state == EntryState::Unseen {
        return;
    }
    let total = own.entry(settled).cost + other.entry(other_id).cost;
    if best.map_or(true, |(mu, _, _)| total < mu) {
        let (f_id, r_id) = if settled_is_reverse {
            (other_id, settled)
        } else {
            (settled, other_id)
        };
        trace!(total, "candidate meeting point");
        *best = Some((total, f_id, r_id));
    }
}

/// Concatenate the two parent chains at the meeting point:
/// source ... meeting ... target, with the meeting waypoint appearing once.
///
/// Cost is recomputed from the final ledger entries, so a candidate recorded
/// before a later cost improvement still stitches to the cheaper total.
fn stitch<W: Waypoint>(fwd: &Ledger<W>, f_id: EntryId, rev: &Ledger<W>, r_id: EntryId) -> Route<W> {
    let mut waypoints = fwd.walk_back(f_id);
    let mut suffix = rev.walk_back(r_id);
    suffix.reverse();
    waypoints.extend(suffix.into_iter().skip(1));
    Route {
        waypoints,
        cost: fwd.entry(f_id).cost + rev.entry(r_id).cost,
    }
}
