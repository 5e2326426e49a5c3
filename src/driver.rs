//! The per-turn entry point (spec §4.8): picks a destination, runs
//! A*, and converts the reconstructed path into a single acceleration.

use tracing::{info, warn};

use crate::destination::{is_pilot_ahead, pick};
use crate::error::PilotError;
use crate::fuel::{DefaultFuelModel, FuelModel};
use crate::geometry::Vector;
use crate::observation::Observation;
use crate::search;
use crate::terrain::collision;

/// Clamps each component of `v` into `{-1, 0, 1}`. Defensive only: a
/// correctly-reconstructed path already satisfies this.
fn clamp_acceleration(v: Vector) -> (i8, i8) {
    (v.x.clamp(-1, 1) as i8, v.y.clamp(-1, 1) as i8)
}

pub struct TurnDriver {
    fuel_model: Box<dyn FuelModel>,
}

impl Default for TurnDriver {
    fn default() -> Self {
        TurnDriver::new(Box::new(DefaultFuelModel))
    }
}

impl TurnDriver {
    pub fn new(fuel_model: Box<dyn FuelModel>) -> Self {
        TurnDriver { fuel_model }
    }

    /// Produces one turn's acceleration. Never panics and never
    /// propagates a `PilotError` to the caller: observation validation
    /// failures and unrecoverable search failures are logged and
    /// collapsed into the zero-acceleration sentinel (spec §7).
    pub fn decide(&self, observation: &Observation) -> (i8, i8) {
        match self.try_decide(observation) {
            Ok(acc) => acc,
            Err(err) => {
                warn!(error = %err, "turn driver falling back to zero acceleration");
                (0, 0)
            }
        }
    }

    fn try_decide(&self, observation: &Observation) -> Result<(i8, i8), PilotError> {
        observation.validate()?;

        let destination = pick(&observation.circuit, observation.my_pos, observation.opp1, observation.opp2)
            .ok_or_else(|| PilotError::InvalidObservation("circuit has no FINISH cells".into()))?;
        let goal = destination.cell;

        if observation.my_pos == goal {
            return Ok((0, 0));
        }

        let ahead = is_pilot_ahead(observation.my_pos, observation.opp1, observation.opp2, goal);
        let opponents = if ahead {
            None
        } else {
            Some((observation.opp1, observation.opp2))
        };

        let path_result = search::run(
            observation.my_pos,
            observation.my_vel,
            observation.fuel,
            goal,
            &observation.circuit,
            opponents,
            observation.v_max,
            self.fuel_model.as_ref(),
        );

        let path = match path_result {
            Ok(path) => path,
            Err(PilotError::NoPath) if opponents.is_some() => {
                // Step 3: relax opponents and retry — they may be
                // boxing in the only legal successor.
                info!("no path with opponents blocking, retrying with opponents relaxed");
                search::run(
                    observation.my_pos,
                    observation.my_vel,
                    observation.fuel,
                    goal,
                    &observation.circuit,
                    None,
                    observation.v_max,
                    self.fuel_model.as_ref(),
                )
                .map_err(|_| PilotError::NoLegalMove)?
            }
            Err(e) => return Err(e),
        };

        if path.len() < 2 {
            return Ok((0, 0));
        }

        let emit = clamp_acceleration(path[1].vel - path[0].vel);

        // Step 5: defensive re-check. If following the emitted
        // acceleration would collide with an opponent right now (their
        // position may have moved between observation and act), fall
        // back to zero rather than trust a stale plan.
        let next_pos = observation.my_pos + path[1].vel;
        if collision(
            observation.my_pos,
            next_pos,
            &observation.circuit,
            Some((observation.opp1, observation.opp2)),
        ) {
            warn!("emitted acceleration would collide under current conditions, emitting zero");
            return Ok((0, 0));
        }

        Ok(emit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Circuit;

    fn obs(circuit: &str, my_pos: Vector, my_vel: Vector, fuel: i32, opp1: Vector, opp2: Vector, v_max: i32) -> Observation {
        Observation {
            circuit: Circuit::parse(circuit).unwrap(),
            my_pos,
            my_vel,
            fuel,
            opp1,
            opp2,
            v_max,
        }
    }

    #[test]
    fn straight_corridor_emits_forward_acceleration() {
        let driver = TurnDriver::default();
        let observation = obs("1...=", Vector::new(0, 0), Vector::ZERO, 100, Vector::new(-1, -1), Vector::new(-1, -1), 3);
        assert_eq!(driver.decide(&observation), (1, 0));
    }

    #[test]
    fn single_turn_emits_first_turn_acceleration() {
        let driver = TurnDriver::default();
        let observation = obs(
            "1.#\n.##\n.=#",
            Vector::new(0, 0),
            Vector::ZERO,
            100,
            Vector::new(-1, -1),
            Vector::new(-1, -1),
            1,
        );
        assert_eq!(driver.decide(&observation), (0, 1));
    }

    #[test]
    fn start_on_finish_emits_zero() {
        let driver = TurnDriver::default();
        let observation = obs("=...1", Vector::new(0, 0), Vector::ZERO, 100, Vector::new(-1, -1), Vector::new(-1, -1), 1);
        assert_eq!(driver.decide(&observation), (0, 0));
    }

    #[test]
    fn fuel_tight_then_one_unit_short_fails_to_no_path() {
        // `gas()` charges the kinetic surcharge on every step, coasting
        // included, so the cheapest plan across "1...=" is the ramp
        // 0->1->1->1->1: step one costs base 1 + kinetic 1 = 2 fuel,
        // and each of the three coasting steps after it costs kinetic
        // 1 fuel apiece (2 + 1 + 1 + 1 = 5). Any other acceleration
        // profile costs strictly more, since kinetic cost scales with
        // the square of the speed.
        let driver = TurnDriver::default();
        let tight = obs("1...=", Vector::new(0, 0), Vector::ZERO, 5, Vector::new(-1, -1), Vector::new(-1, -1), 3);
        let (ax, _ay) = driver.decide(&tight);
        assert_eq!(ax, 1, "just-enough fuel should still produce forward motion");

        let short = obs("1...=", Vector::new(0, 0), Vector::ZERO, 4, Vector::new(-1, -1), Vector::new(-1, -1), 3);
        assert_eq!(driver.decide(&short), (0, 0));
    }

    #[test]
    fn opponent_on_one_finish_cell_steers_to_the_other() {
        let driver = TurnDriver::default();
        let observation = obs(
            "1.=\n..=",
            Vector::new(0, 0),
            Vector::ZERO,
            100,
            Vector::new(2, 0),
            Vector::new(-1, -1),
            1,
        );
        // destination picker should steer away from the opponent's cell
        let (ax, ay) = driver.decide(&observation);
        assert!(ax != 0 || ay != 0);
    }

    #[test]
    fn emitted_components_are_always_in_range() {
        let driver = TurnDriver::default();
        let observation = obs("1...=", Vector::new(0, 0), Vector::ZERO, 100, Vector::new(-1, -1), Vector::new(-1, -1), 1);
        let (ax, ay) = driver.decide(&observation);
        assert!((-1..=1).contains(&ax));
        assert!((-1..=1).contains(&ay));
    }
}
