//! The per-turn observation record (spec §6) and its validation.

use crate::error::PilotError;
use crate::geometry::{out_of_bounds, Vector};
use crate::terrain::Circuit;

/// Everything the pilot is given on a single turn. Opponent positions
/// are not required to be on-grid (a racer that hasn't yet entered the
/// circuit, or has finished and left it, is modeled as "off-grid").
#[derive(Debug, Clone)]
pub struct Observation {
    pub circuit: Circuit,
    pub my_pos: Vector,
    pub my_vel: Vector,
    pub fuel: i32,
    pub opp1: Vector,
    pub opp2: Vector,
    pub v_max: i32,
}

impl Observation {
    /// Rejects the §7 `INVALID_OBSERVATION` cases: degenerate grid
    /// dimensions, an off-grid pilot, or a non-positive `v_max`.
    pub fn validate(&self) -> Result<(), PilotError> {
        if self.circuit.width == 0 || self.circuit.height == 0 {
            return Err(PilotError::InvalidObservation("circuit has zero extent".into()));
        }
        if out_of_bounds(self.my_pos, &self.circuit) {
            return Err(PilotError::InvalidObservation(format!(
                "pilot position {:?} is off-grid",
                self.my_pos
            )));
        }
        if self.v_max <= 0 {
            return Err(PilotError::InvalidObservation(format!(
                "v_max must be positive, got {}",
                self.v_max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_observation() -> Observation {
        Observation {
            circuit: Circuit::parse("1...=").unwrap(),
            my_pos: Vector::new(0, 0),
            my_vel: Vector::ZERO,
            fuel: 100,
            opp1: Vector::new(-1, -1),
            opp2: Vector::new(-1, -1),
            v_max: 3,
        }
    }

    #[test]
    fn valid_observation_passes() {
        assert!(base_observation().validate().is_ok());
    }

    #[test]
    fn off_grid_pilot_is_invalid() {
        let mut obs = base_observation();
        obs.my_pos = Vector::new(99, 99);
        assert!(matches!(obs.validate(), Err(PilotError::InvalidObservation(_))));
    }

    #[test]
    fn non_positive_v_max_is_invalid() {
        let mut obs = base_observation();
        obs.v_max = 0;
        assert!(matches!(obs.validate(), Err(PilotError::InvalidObservation(_))));
    }
}
