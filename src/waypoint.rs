//! The graph capability consumed by every search.

use std::hash::Hash;

/// A position in a caller-supplied weighted graph.
///
/// Implementing this trait is the only requirement for running
/// [`path`](crate::path) or [`path_bidir`](crate::path_bidir) over a graph.
/// The search never sees the graph itself, only waypoints and the three
/// operations below.
///
/// Two waypoints that compare equal are treated as the same graph position;
/// equality and hashing are used to key the per-search ledger.
///
/// # Contract
///
/// - `edge_cost` is only ever invoked on pairs where the second waypoint was
///   returned by `neighbors` on the first. Non-adjacent queries are a caller
///   bug; the search does not guard against them and any panic propagates
///   unchanged.
/// - All costs and estimates must be non-negative and finite.
/// - For the optimality guarantees of [`path`](crate::path) to hold,
///   `heuristic` must be admissible (never overestimate the true remaining
///   cost) and consistent (satisfy the triangle inequality across edges).
///   Violations are not detected at runtime; the search stays well-formed
///   but may return a suboptimal route.
/// - [`path_bidir`](crate::path_bidir) runs the reverse search with the same
///   neighbor and cost functions, so the graph must be effectively
///   undirected (or the caller must supply symmetric semantics).
pub trait Waypoint: Clone + Eq + Hash {
    /// The directly reachable neighbors of this waypoint.
    fn neighbors(&self) -> Vec<Self>;

    /// Exact cost of moving to an adjacent waypoint.
    fn edge_cost(&self, to: &Self) -> f64;

    /// Estimated remaining cost to an arbitrary target waypoint.
    fn heuristic(&self, target: &Self) -> f64;
}
