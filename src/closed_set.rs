//! The A* closed set: membership keyed by identity, recording the
//! best `f` at closure so the main loop can decide whether a
//! rediscovered state should reopen it (spec §4.5).

use rustc_hash::FxHashMap;

use crate::state::Identity;

#[derive(Default)]
pub struct ClosedSet {
    best_f: FxHashMap<Identity, f64>,
}

impl ClosedSet {
    pub fn new() -> Self {
        ClosedSet::default()
    }

    pub fn insert(&mut self, identity: Identity, f: f64) {
        self.best_f.insert(identity, f);
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.best_f.contains_key(&identity)
    }

    pub fn f_of(&self, identity: Identity) -> Option<f64> {
        self.best_f.get(&identity).copied()
    }

    pub fn remove(&mut self, identity: Identity) {
        self.best_f.remove(&identity);
    }
}
