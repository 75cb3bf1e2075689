//! Min-priority frontier over open ledger entries.
//!
//! An explicit binary-heap array of entry indices, ordered by rank. Each
//! resident entry's `heap_slot` is updated on every sift swap, so
//! `decrease_key` and `remove` find their position in O(1) and restore heap
//! order in O(log n) without a linear scan.

use crate::ledger::{EntryId, EntryState, Ledger, NO_SLOT};
use crate::waypoint::Waypoint;

/// Min-heap of frontier-resident entries.
///
/// Ties between equal ranks break in heap order: unspecified but
/// deterministic for a fixed sequence of operations.
#[derive(Debug)]
pub(crate) struct Frontier {
    slots: Vec<EntryId>,
}

impl Frontier {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Rank of the current minimum entry, if any.
    pub fn min_rank<W: Waypoint>(&self, ledger: &Ledger<W>) -> Option<f64> {
        self.slots.first().map(|&id| ledger.entry(id).rank)
    }

    /// Insert an entry and mark it open. O(log n).
    pub fn push<W: Waypoint>(&mut self, ledger: &mut Ledger<W>, id: EntryId) {
        let slot = self.slots.len();
        self.slots.push(id);
        let entry = ledger.entry_mut(id);
        entry.state = EntryState::Open;
        entry.heap_slot = slot;
        self.sift_up(ledger, slot);
    }

    /// Remove and return the minimum-rank entry, marking it closed. O(log n).
    pub fn pop_min<W: Waypoint>(&mut self, ledger: &mut Ledger<W>) -> Option<EntryId> {
        if self.slots.is_empty() {
            return None;
        }
        let id = self.slots.swap_remove(0);
        if let Some(&moved) = self.slots.first() {
            ledger.entry_mut(moved).heap_slot = 0;
            self.sift_down(ledger, 0);
        }
        let entry = ledger.entry_mut(id);
        entry.state = EntryState::Closed;
        entry.heap_slot = NO_SLOT;
        Some(id)
    }

    /// Restore heap order after a resident entry's rank was lowered. O(log n).
    pub fn decrease_key<W: Waypoint>(&mut self, ledger: &mut Ledger<W>, id: EntryId) {
        let slot = ledger.entry(id).heap_slot;
        debug_assert!(slot < self.slots.len() && self.slots[slot] == id);
        self.sift_up(ledger, slot);
    }

    /// Remove an arbitrary resident entry, marking it unseen again: the
    /// entry was invalidated rather than finalized and may be rediscovered
    /// later. O(log n).
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remove<W: Waypoint>(&mut self, ledger: &mut Ledger<W>, id: EntryId) {
        let slot = ledger.entry(id).heap_slot;
        debug_assert!(slot < self.slots.len() && self.slots[slot] == id);
        self.slots.swap_remove(slot);
        if slot < self.slots.len() {
            let filler = self.slots[slot];
            ledger.entry_mut(filler).heap_slot = slot;
            // The filler came from the bottom; it may violate either bound.
            self.sift_down(ledger, slot);
            self.sift_up(ledger, ledger.entry(filler).heap_slot);
        }
        let entry = ledger.entry_mut(id);
        entry.state = EntryState::Unseen;
        entry.heap_slot = NO_SLOT;
    }

    fn sift_up<W: Waypoint>(&mut self, ledger: &mut Ledger<W>, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if ledger.entry(self.slots[slot]).rank >= ledger.entry(self.slots[parent]).rank {
                break;
            }
            self.slots.swap(slot, parent);
            ledger.entry_mut(self.slots[slot]).heap_slot = slot;
            ledger.entry_mut(self.slots[parent]).heap_slot = parent;
            slot = parent;
        }
    }

    fn sift_down<W: Waypoint>(&mut self, ledger: &mut Ledger<W>, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.slots.len() {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < self.slots.len()
                && ledger.entry(self.slots[right]).rank < ledger.entry(self.slots[left]).rank
            {
                smallest = right;
            }
            if ledger.entry(self.slots[smallest]).rank >= ledger.entry(self.slots[slot]).rank {
                break;
            }
            self.slots.swap(slot, smallest);
            ledger.entry_mut(self.slots[slot]).heap_slot = slot;
            ledger.entry_mut(self.slots[smallest]).heap_slot = smallest;
            slot = smallest;
        }
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

    fn push_with_rank(ledger: &mut Ledger<Cell>, frontier: &mut Frontier, key: u32, rank: f64) -> EntryId {
        let id = ledger.intern(&Cell(key));
        ledger.entry_mut(id).rank = rank;
        frontier.push(ledger, id);
        id
    }

    fn assert_slots_consistent(ledger: &Ledger<Cell>, frontier: &Frontier) {
        for (slot, &id) in frontier.slots.iter().enumerate() {
            assert_eq!(ledger.entry(id).heap_slot, slot, "stale heap_slot for entry {id}");
        }
    }

    #[test]
    fn pop_min_yields_entries_in_rank_order() {
        let mut ledger = Ledger::new();
        let mut frontier = Frontier::new();
        for (key, rank) in [(0, 5.0), (1, 1.0), (2, 9.0), (3, 3.0), (4, 7.0)] {
            push_with_rank(&mut ledger, &mut frontier, key, rank);
        }
        assert_slots_consistent(&ledger, &frontier);

        let mut ranks = Vec::new();
        while let Some(id) = frontier.pop_min(&mut ledger) {
            assert_eq!(ledger.entry(id).state, EntryState::Closed);
            ranks.push(ledger.entry(id).rank);
            assert_slots_consistent(&ledger, &frontier);
        }
        assert_eq!(ranks, vec![1.0, 3.0, 5.0, 7.0, 9.0]);
        assert!(frontier.pop_min(&mut ledger).is_none());
    }

    #[test]
    fn decrease_key_reorders_resident_entry() {
        let mut ledger = Ledger::new();
        let mut frontier = Frontier::new();
        push_with_rank(&mut ledger, &mut frontier, 0, 2.0);
        let id = push_with_rank(&mut ledger, &mut frontier, 1, 8.0);
        push_with_rank(&mut ledger, &mut frontier, 2, 4.0);

        ledger.entry_mut(id).rank = 1.0;
        frontier.decrease_key(&mut ledger, id);
        assert_slots_consistent(&ledger, &frontier);

        assert_eq!(frontier.pop_min(&mut ledger), Some(id));
    }

    #[test]
    fn min_rank_tracks_heap_top() {
        let mut ledger = Ledger::new();
        let mut frontier = Frontier::new();
        assert_eq!(frontier.min_rank(&ledger), None);

        push_with_rank(&mut ledger, &mut frontier, 0, 6.0);
        push_with_rank(&mut ledger, &mut frontier, 1, 2.0);
        assert_eq!(frontier.min_rank(&ledger), Some(2.0));

        frontier.pop_min(&mut ledger);
        assert_eq!(frontier.min_rank(&ledger), Some(6.0));
    }

    #[test]
    fn remove_keeps_heap_valid_and_resets_entry() {
        let mut ledger = Ledger::new();
        let mut frontier = Frontier::new();
        let mut ids = Vec::new();
        for (key, rank) in [(0, 4.0), (1, 2.0), (2, 6.0), (3, 1.0), (4, 5.0), (5, 3.0)] {
            ids.push(push_with_rank(&mut ledger, &mut frontier, key, rank));
        }

        frontier.remove(&mut ledger, ids[2]);
        assert_slots_consistent(&ledger, &frontier);
        assert_eq!(ledger.entry(ids[2]).state, EntryState::Unseen);
        assert_eq!(ledger.entry(ids[2]).heap_slot, NO_SLOT);

        let mut ranks = Vec::new();
        while let Some(id) = frontier.pop_min(&mut ledger) {
            ranks.push(ledger.entry(id).rank);
        }
        assert_eq!(ranks, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn removed_entry_can_be_reinserted() {
        let mut ledger = Ledger::new();
        let mut frontier = Frontier::new();
        let id = push_with_rank(&mut ledger, &mut frontier, 0, 9.0);
        push_with_rank(&mut ledger, &mut frontier, 1, 5.0);

        frontier.remove(&mut ledger, id);
        ledger.entry_mut(id).rank = 1.0;
        frontier.push(&mut ledger, id);
        assert_slots_consistent(&ledger, &frontier);

        assert_eq!(frontier.pop_min(&mut ledger), Some(id));
    }
}
