//! Destination selection (spec §4.7): scores each `FINISH` cell by
//! distance plus an opponent-occupancy penalty, and the `is_pilot_ahead`
//! predicate used to decide whether opponents can be relaxed away in
//! collision tests for this turn.

use crate::geometry::Vector;
use crate::terrain::Circuit;

/// Large enough that any occupied finish cell always scores worse
/// than any unoccupied one, regardless of grid size.
const OCCUPANCY_PENALTY: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    pub cell: Vector,
    pub score: f64,
}

/// Picks the lowest-scoring `FINISH` cell; ties broken by lower `y`
/// then lower `x` (spec's "any deterministic total order").
pub fn pick(circuit: &Circuit, my_pos: Vector, opp1: Vector, opp2: Vector) -> Option<Destination> {
    circuit
        .finish_cells
        .iter()
        .map(|&cell| {
            let penalty = if cell == opp1 || cell == opp2 {
                OCCUPANCY_PENALTY
            } else {
                0.0
            };
            Destination {
                cell,
                score: (cell - my_pos).norm() + penalty,
            }
        })
        .min_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap()
                .then_with(|| a.cell.y.cmp(&b.cell.y))
                .then_with(|| a.cell.x.cmp(&b.cell.x))
        })
}

/// True iff `my_pos` is strictly closer to `goal` than both opponents.
/// When true, this turn's collision tests may treat the opponents as
/// absent — integer kinematics bound how far they could intrude in a
/// single step, and being strictly ahead means they cannot.
pub fn is_pilot_ahead(my_pos: Vector, opp1: Vector, opp2: Vector, goal: Vector) -> bool {
    let mine = (goal - my_pos).norm();
    let theirs1 = (goal - opp1).norm();
    let theirs2 = (goal - opp2).norm();
    mine < theirs1 && mine < theirs2
}
