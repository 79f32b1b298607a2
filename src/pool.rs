/// Live order pool
///
/// Tracks order ids that have been added and not yet cancelled. Ids sit in a
/// dense vector so a uniform pick is a single index draw; a side map from id
/// to slot lets removal by value swap-remove in O(1).

use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct LiveOrderPool {
    ids: Vec<u64>,
    slots: HashMap<u64, usize>,
}

impl LiveOrderPool {
    pub fn new() -> Self {
        LiveOrderPool {
            ids: Vec::new(),
            slots: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LiveOrderPool {
            ids: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Insert an id; returns false if it was already live
    pub fn insert(&mut self, order_id: u64) -> bool {
        if self.slots.contains_key(&order_id) {
            return false;
        }
        self.slots.insert(order_id, self.ids.len());
        self.ids.push(order_id);
        true
    }

    /// Remove an id; returns false if it was not live
    pub fn remove(&mut self, order_id: u64) -> bool {
        let slot = match self.slots.remove(&order_id) {
            Some(slot) => slot,
            None => return false,
        };

        self.ids.swap_remove(slot);
        // The former last element now occupies `slot`
        if let Some(&moved) = self.ids.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    /// Pick a uniformly random live id without removing it
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u64> {
        if self.ids.is_empty() {
            return None;
        }
        Some(self.ids[rng.gen_range(0..self.ids.len())])
    }

    /// Pick a uniformly random live id and remove it
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u64> {
        let order_id = self.choose(rng)?;
        self.remove(order_id);
        Some(order_id)
    }

    pub fn contains(&self, order_id: u64) -> bool {
        self.slots.contains_key(&order_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
