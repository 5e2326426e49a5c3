//! Reconstructed search paths (spec §3 `Path`, §4.6 reconstruction).

use crate::state::SearchState;

/// Ordered sequence of states from start to a chosen goal, start
/// first, goal last.
pub type Path = Vec<SearchState>;

/// Walks `parent` indices from `goal_idx` back to the root and
/// returns the chain in forward (start-first) order.
pub fn reconstruct(arena: &[SearchState], goal_idx: usize) -> Path {
    let mut chain = Vec::new();
    let mut current = Some(goal_idx);
    while let Some(idx) = current {
        let node = arena[idx];
        current = node.parent;
        chain.push(node);
    }
    chain.reverse();
    chain
}
