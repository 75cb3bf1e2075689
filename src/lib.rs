//! Best-first shortest-path search over caller-supplied weighted graphs.
//!
//! Callers bring their own node type, implement [`Waypoint`] on it, and get
//! A* ([`path`]) plus a bidirectional variant ([`path_bidir`]). The engine
//! keeps all bookkeeping in per-call structures — an arena-backed node
//! ledger and an indexed binary-heap frontier with decrease-key — so every
//! query is independent and calls over unrelated endpoint pairs can run in
//! parallel.
//!
//! ```
//! use wayfinder::{path, grid::GridWorld};
//!
//! let world = GridWorld::parse(".F...T.").unwrap();
//! let route = path(&world.start(), &world.goal()).unwrap();
//! assert_eq!(route.cost, 4.0);
//! assert_eq!(route.waypoints.len(), 5);
//! ```
//!
//! Optimality holds when [`Waypoint::heuristic`] is admissible and
//! consistent; see the trait docs for the full contract. The bidirectional
//! default stop rule is the classic first-touch approximation, with an
//! exact alternative behind [`StopRule::BestBound`].

mod bidir;
mod frontier;
mod ledger;
mod search;
mod waypoint;

pub mod grid;

pub use bidir::{path_bidir, path_bidir_with, BidirConfig, StopRule};
pub use search::{path, path_with, QueryLimits, Route, SearchOutcome, SearchStats};
pub use waypoint::Waypoint;
