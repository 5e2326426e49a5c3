//! Successor expansion under movement, collision, fuel, and speed
//! rules (spec §4.2).

use crate::fuel::FuelModel;
use crate::geometry::{out_of_bounds, Vector};
use crate::state::SearchState;
use crate::terrain::{collision, in_sand, Circuit};

/// The nine accelerations `a in {-1,0,1}^2`, in a fixed, deterministic
/// order so expansion order (and therefore FIFO tie-breaks downstream)
/// is itself deterministic.
pub const ACCELERATIONS: [Vector; 9] = [
    Vector { x: -1, y: -1 },
    Vector { x: -1, y: 0 },
    Vector { x: -1, y: 1 },
    Vector { x: 0, y: -1 },
    Vector { x: 0, y: 0 },
    Vector { x: 0, y: 1 },
    Vector { x: 1, y: -1 },
    Vector { x: 1, y: 0 },
    Vector { x: 1, y: 1 },
];

/// Straight-line displacement plus a strictly-positive sand surcharge
/// when departing a `Sand` cell (spec §4.2 `step_cost`). The surcharge
/// must exceed 1 so sand is avoided whenever a dry alternative of the
/// same length exists.
pub const SAND_STEP_SURCHARGE: f64 = 1.5;

pub fn step_cost(from: Vector, to: Vector, from_in_sand: bool) -> f64 {
    let base = (to - from).norm();
    if from_in_sand {
        base + SAND_STEP_SURCHARGE
    } else {
        base
    }
}

/// Expands the legal successors of `state`, per spec §4.2's six-step
/// rule. `opponents` is `None` when collision checks should ignore
/// them (the §4.8 relaxation fallback, or when the pilot is ahead).
pub fn expand(
    state: &SearchState,
    circuit: &Circuit,
    opponents: Option<(Vector, Vector)>,
    v_max: i32,
    goal: Vector,
    fuel_model: &dyn FuelModel,
    heuristic: impl Fn(Vector, Vector) -> f64,
) -> Vec<SearchState> {
    let mut successors = Vec::new();
    let from_sand = in_sand(state.pos, circuit);

    for &acc in ACCELERATIONS.iter() {
        // Step 4: under sand, movement is inertial only.
        if from_sand && acc != Vector::ZERO {
            continue;
        }

        // Step 1: velocity bound.
        let new_vel = state.vel + acc;
        if new_vel.x.abs() > v_max || new_vel.y.abs() > v_max {
            continue;
        }

        // Step 2: bounds.
        let new_pos = state.pos + new_vel;
        if out_of_bounds(new_pos, circuit) {
            continue;
        }

        // Step 3: collision (walls, and opponents unless relaxed).
        if collision(state.pos, new_pos, circuit, opponents) {
            continue;
        }

        // Step 5: fuel.
        let delta_fuel = fuel_model.gas(acc, new_vel, from_sand);
        let new_fuel = state.fuel - delta_fuel;
        if new_fuel < 0 {
            continue;
        }

        // Step 6: assemble the successor.
        let g = state.g + step_cost(state.pos, new_pos, from_sand);
        let h = heuristic(new_pos, goal);
        successors.push(SearchState {
            pos: new_pos,
            vel: new_vel,
            g,
            h,
            fuel: new_fuel,
            parent: None, // filled in by the caller with the arena index
            turbo: false,
        });
    }

    successors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::DefaultFuelModel;

    fn heuristic(p: Vector, goal: Vector) -> f64 {
        (goal - p).norm()
    }

    #[test]
    fn straight_corridor_has_forward_successor() {
        let circuit = Circuit::parse("1...=").unwrap();
        let start = SearchState {
            pos: Vector::new(0, 0),
            vel: Vector::ZERO,
            g: 0.0,
            h: 0.0,
            fuel: 100,
            parent: None,
            turbo: false,
        };
        let succs = expand(&start, &circuit, None, 1, Vector::new(4, 0), &DefaultFuelModel, heuristic);
        assert!(succs.iter().any(|s| s.pos == Vector::new(1, 0) && s.vel == Vector::new(1, 0)));
    }

    #[test]
    fn sand_forces_zero_acceleration() {
        let circuit = Circuit::parse("1.~.=").unwrap();
        let state = SearchState {
            pos: Vector::new(2, 0),
            vel: Vector::new(1, 0),
            g: 0.0,
            h: 0.0,
            fuel: 100,
            parent: None,
            turbo: false,
        };
        let succs = expand(&state, &circuit, None, 3, Vector::new(4, 0), &DefaultFuelModel, heuristic);
        assert_eq!(succs.len(), 1);
        assert_eq!(succs[0].vel, Vector::new(1, 0));
        assert_eq!(succs[0].pos, Vector::new(3, 0));
    }

    #[test]
    fn fuel_exhaustion_rejects_all_accelerating_moves() {
        let circuit = Circuit::parse("1...=").unwrap();
        let state = SearchState {
            pos: Vector::new(0, 0),
            vel: Vector::ZERO,
            g: 0.0,
            h: 0.0,
            fuel: 0,
            parent: None,
            turbo: false,
        };
        let succs = expand(&state, &circuit, None, 1, Vector::new(4, 0), &DefaultFuelModel, heuristic);
        // Only the zero-acceleration coast is free; every other branch costs fuel.
        assert_eq!(succs.len(), 1);
        assert_eq!(succs[0].vel, Vector::ZERO);
    }

    #[test]
    fn opponent_on_path_blocks_that_successor() {
        let circuit = Circuit::parse("1...=").unwrap();
        let start = SearchState {
            pos: Vector::new(0, 0),
            vel: Vector::ZERO,
            g: 0.0,
            h: 0.0,
            fuel: 100,
            parent: None,
            turbo: false,
        };
        let opp = Vector::new(1, 0);
        let succs = expand(
            &start,
            &circuit,
            Some((opp, Vector::new(-1, -1))),
            1,
            Vector::new(4, 0),
            &DefaultFuelModel,
            heuristic,
        );
        assert!(!succs.iter().any(|s| s.pos == opp));
    }

    #[test]
    fn out_of_bounds_successor_rejected() {
        let circuit = Circuit::parse("1.\n..").unwrap();
        let start = SearchState {
            pos: Vector::new(0, 0),
            vel: Vector::new(-1, 0),
            g: 0.0,
            h: 0.0,
            fuel: 100,
            parent: None,
            turbo: false,
        };
        let succs = expand(&start, &circuit, None, 1, Vector::new(1, 1), &DefaultFuelModel, heuristic);
        assert!(succs.iter().all(|s| s.pos.x >= 0 && s.pos.y >= 0));
    }
}
