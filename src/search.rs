//! The A* main loop (spec §4.5): pop, goal-test, expand, relax, push,
//! with closed-set reopening and a fixed tie-break.

use tracing::{debug, trace};

use crate::closed_set::ClosedSet;
use crate::error::PilotError;
use crate::fuel::FuelModel;
use crate::geometry::Vector;
use crate::open_set::OpenSet;
use crate::path::{reconstruct, Path};
use crate::state::SearchState;
use crate::successors::expand;
use crate::terrain::Circuit;

fn heuristic(p: Vector, goal: Vector) -> f64 {
    (goal - p).norm()
}

/// Runs A* from `start_pos`/`start_vel` to `goal`. `opponents` is
/// `None` to relax them out of the collision test (spec §4.8 step 3
/// and the pilot-ahead case); `Some` treats them as impassable.
pub fn run(
    start_pos: Vector,
    start_vel: Vector,
    start_fuel: i32,
    goal: Vector,
    circuit: &Circuit,
    opponents: Option<(Vector, Vector)>,
    v_max: i32,
    fuel_model: &dyn FuelModel,
) -> Result<Path, PilotError> {
    let mut arena: Vec<SearchState> = Vec::new();
    let mut open = OpenSet::new();
    let mut closed = ClosedSet::new();

    let start = SearchState {
        pos: start_pos,
        vel: start_vel,
        g: 0.0,
        h: heuristic(start_pos, goal),
        fuel: start_fuel,
        parent: None,
        turbo: false,
    };
    arena.push(start);
    open.push(&arena[0], 0);

    while let Some(cur_idx) = open.pop_min() {
        let cur = arena[cur_idx];
        trace!(x = cur.pos.x, y = cur.pos.y, f = cur.f(), "expanding state");

        if cur.pos == goal {
            debug!(nodes_expanded = arena.len(), "goal reached");
            return Ok(reconstruct(&arena, cur_idx));
        }

        closed.insert(cur.identity(), cur.f());

        let successors = expand(&cur, circuit, opponents, v_max, goal, fuel_model, heuristic);
        for mut succ in successors {
            succ.parent = Some(cur_idx);
            let identity = succ.identity();
            let f = succ.f();

            if let Some(closed_f) = closed.f_of(identity) {
                if closed_f <= f {
                    continue;
                }
                // Reopen: a cheaper path to an already-closed state
                // was found (the admissible-but-inconsistent heuristic
                // case spec §4.5 calls out).
                closed.remove(identity);
            }

            if let Some(open_f) = open.f_of(identity) {
                if open_f <= f {
                    continue;
                }
            }

            let idx = arena.len();
            arena.push(succ);
            open.push(&arena[idx], idx);
        }
    }

    Err(PilotError::NoPath)
}
