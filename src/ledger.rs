//! Per-search bookkeeping: one entry per waypoint ever discovered.
//!
//! Entries live in a flat arena and are addressed by index, so parent links
//! are plain integers: the predecessor tree cannot form reference cycles and
//! is freed wholesale when the ledger is dropped at the end of the call.

use rustc_hash::FxHashMap;

use crate::waypoint::Waypoint;

/// Index of an entry in the ledger arena.
pub(crate) type EntryId = usize;

/// Sentinel for an entry that is not resident in the frontier.
pub(crate) const NO_SLOT: usize = usize::MAX;

/// Lifecycle of a ledger entry. Transitions are monotone in the
/// unidirectional search: unseen → open → closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryState {
    Unseen,
    Open,
    Closed,
}

#[derive(Debug)]
pub(crate) struct Entry<W> {
    pub waypoint: W,
    /// Best known path cost from the search origin. Only ever revised down.
    pub cost: f64,
    /// `cost + heuristic`; the frontier sort key. Stale once closed.
    pub rank: f64,
    /// Predecessor on the best known path, as an arena index.
    pub parent: Option<EntryId>,
    pub state: EntryState,
    /// Position in the frontier's heap array, maintained by the frontier.
    pub heap_slot: usize,
}

/// Arena of search entries plus a waypoint → entry index.
///
/// Created fresh for every search invocation; nothing survives the call.
#[derive(Debug)]
pub(crate) struct Ledger<W> {
    entries: Vec<Entry<W>>,
    index: FxHashMap<W, EntryId>,
}

impl<W: Waypoint> Ledger<W> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Look up the entry for a waypoint, lazily creating an unseen entry
    /// with infinite cost on first discovery.
    pub fn intern(&mut self, waypoint: &W) -> EntryId {
        if let Some(&id) = self.index.get(waypoint) {
            return id;
        }
        let id = self.entries.len();
        self.entries.push(Entry {
            waypoint: waypoint.clone(),
            cost: f64::INFINITY,
            rank: f64::INFINITY,
            parent: None,
            state: EntryState::Unseen,
            heap_slot: NO_SLOT,
        });
        self.index.insert(waypoint.clone(), id);
        id
    }

    /// Entry for a waypoint, if it was ever discovered.
    pub fn lookup(&self, waypoint: &W) -> Option<EntryId> {
        self.index.get(waypoint).copied()
    }

    pub fn entry(&self, id: EntryId) -> &Entry<W> {
        &self.entries[id]
    }

    pub fn entry_mut(&mut self, id: EntryId) -> &mut Entry<W> {
        &mut self.entries[id]
    }

    /// Follow parent links from `id` back to the search origin and return
    /// the waypoints in origin-first order.
    pub fn walk_back(&self, id: EntryId) -> Vec<W> {
        let mut waypoints = Vec::new();
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            waypoints.push(self.entries[c].waypoint.clone());
            cursor = self.entries[c].parent;
        }
        waypoints.reverse();
        waypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Cell(u32);

    impl Waypoint for Cell {
        fn neighbors(&self) -> Vec<Self> {
            Vec::new()
        }
        fn edge_cost(&self, _to: &Self) -> f64 {
            0.0
        }
        fn heuristic(&self, _target: &Self) -> f64 {
            0.0
        }
    }

    #[test]
    fn intern_is_idempotent_per_waypoint() {
        let mut ledger: Ledger<Cell> = Ledger::new();
        let a = ledger.intern(&Cell(7));
        let b = ledger.intern(&Cell(8));
        assert_ne!(a, b);
        assert_eq!(ledger.intern(&Cell(7)), a);
        assert_eq!(ledger.lookup(&Cell(8)), Some(b));
        assert_eq!(ledger.lookup(&Cell(9)), None);
    }

    #[test]
    fn new_entries_start_unseen_with_infinite_cost() {
        let mut ledger: Ledger<Cell> = Ledger::new();
        let id = ledger.intern(&Cell(1));
        let entry = ledger.entry(id);
        assert_eq!(entry.state, EntryState::Unseen);
        assert!(entry.cost.is_infinite());
        assert!(entry.parent.is_none());
        assert_eq!(entry.heap_slot, NO_SLOT);
    }

    #[test]
    fn walk_back_returns_origin_first_chain() {
        let mut ledger: Ledger<Cell> = Ledger::new();
        let a = ledger.intern(&Cell(1));
        let b = ledger.intern(&Cell(2));
        let c = ledger.intern(&Cell(3));
        ledger.entry_mut(b).parent = Some(a);
        ledger.entry_mut(c).parent = Some(b);

        assert_eq!(ledger.walk_back(c), vec![Cell(1), Cell(2), Cell(3)]);
        assert_eq!(ledger.walk_back(a), vec![Cell(1)]);
    }
}
