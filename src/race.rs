//! Demo harness: generates a circuit and three pilots, drives each
//! one's turn through [`TurnDriver`], and applies the host's integer
//! kinematics (spec §1 — "the host game engine updates position and
//! velocity... deducts fuel... decides the winner"). This plays the
//! role the teacher's `simulation.rs`/`Simulation` struct plays around
//! its pathfinding algorithms: a runnable, visualizable harness around
//! the library, not part of the core decision engine itself.

use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::Config;
use crate::driver::TurnDriver;
use crate::fuel::{DefaultFuelModel, FuelModel};
use crate::geometry::{out_of_bounds, Vector};
use crate::observation::Observation;
use crate::stats::{Outcome, RaceStats};
use crate::terrain::{in_sand, Circuit, TerrainCell};

/// Off-grid sentinel used for a pilot that has already finished or
/// crashed, so it no longer participates in collision tests.
const RETIRED: Vector = Vector { x: -1, y: -1 };

pub struct RaceEnvironment {
    pub circuit: Circuit,
    pub starts: [Vector; 3],
}

impl RaceEnvironment {
    /// Builds a circuit with a start column on the left, a finish
    /// column on the right, and `num_walls`/`num_sand` cells scattered
    /// across the interior.
    pub fn generate(config: &Config, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };

        let width = config.grid_size.max(4);
        let height = config.grid_size.max(4);
        let mut cells = vec![TerrainCell::Track; width * height];

        let finish_x = width - 1;
        for y in 0..height {
            cells[y * width + finish_x] = TerrainCell::Finish;
        }

        let row_for = |slot: usize| (slot + 1) * height / 4;
        let starts = [
            Vector::new(0, row_for(0) as i32),
            Vector::new(0, row_for(1) as i32),
            Vector::new(0, row_for(2) as i32),
        ];
        for (i, &start) in starts.iter().enumerate() {
            cells[start.y as usize * width + start.x as usize] = TerrainCell::Start((i + 1) as u8);
        }

        let is_reserved = |x: usize, y: usize| {
            x == finish_x || starts.iter().any(|s| s.x as usize == x && s.y as usize == y)
        };

        let interior_max = (finish_x).max(2);
        let mut placed_walls = 0;
        let mut attempts = 0;
        while placed_walls < config.num_walls && attempts < config.num_walls * 4 {
            let x = rng.gen_range(1..interior_max);
            let y = rng.gen_range(0..height);
            attempts += 1;
            if is_reserved(x, y) || cells[y * width + x] != TerrainCell::Track {
                continue;
            }
            cells[y * width + x] = TerrainCell::Wall;
            placed_walls += 1;
        }

        let mut placed_sand = 0;
        attempts = 0;
        while placed_sand < config.num_sand && attempts < config.num_sand * 4 {
            let x = rng.gen_range(1..interior_max);
            let y = rng.gen_range(0..height);
            attempts += 1;
            if is_reserved(x, y) || cells[y * width + x] != TerrainCell::Track {
                continue;
            }
            cells[y * width + x] = TerrainCell::Sand;
            placed_sand += 1;
        }

        RaceEnvironment {
            circuit: Circuit::new(width, height, cells),
            starts,
        }
    }
}

struct Pilot {
    pos: Vector,
    vel: Vector,
    fuel: i32,
    finished: bool,
    crashed: bool,
    out_of_fuel: bool,
}

impl Pilot {
    fn retired(&self) -> bool {
        self.finished || self.crashed || self.out_of_fuel
    }

    fn public_pos(&self) -> Vector {
        if self.retired() {
            RETIRED
        } else {
            self.pos
        }
    }
}

pub struct Race {
    circuit: Circuit,
    pilots: Vec<Pilot>,
    v_max: i32,
    driver: TurnDriver,
    fuel_model: DefaultFuelModel,
}

impl Race {
    pub fn new(config: &Config, seed: Option<u64>) -> Self {
        let env = RaceEnvironment::generate(config, seed);
        let pilots = env
            .starts
            .iter()
            .map(|&pos| Pilot {
                pos,
                vel: Vector::ZERO,
                fuel: config.fuel,
                finished: false,
                crashed: false,
                out_of_fuel: false,
            })
            .collect();
        Race {
            circuit: env.circuit,
            pilots,
            v_max: config.v_max,
            driver: TurnDriver::default(),
            fuel_model: DefaultFuelModel,
        }
    }

    fn observation_for(&self, idx: usize) -> Observation {
        let others: Vec<Vector> = self
            .pilots
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, p)| p.public_pos())
            .collect();
        Observation {
            circuit: self.circuit.clone(),
            my_pos: self.pilots[idx].pos,
            my_vel: self.pilots[idx].vel,
            fuel: self.pilots[idx].fuel,
            opp1: others.first().copied().unwrap_or(RETIRED),
            opp2: others.get(1).copied().unwrap_or(RETIRED),
            v_max: self.v_max,
        }
    }

    /// Applies one emitted acceleration under the host's integer
    /// kinematics: clamps into the velocity bound, moves, charges
    /// fuel, and resolves wall/off-grid collisions as a crash.
    fn apply_turn(&mut self, idx: usize, acc: (i8, i8)) {
        let from_sand = in_sand(self.pilots[idx].pos, &self.circuit);
        let acc_vec = Vector::new(acc.0 as i32, acc.1 as i32);
        let mut new_vel = self.pilots[idx].vel + acc_vec;
        new_vel.x = new_vel.x.clamp(-self.v_max, self.v_max);
        new_vel.y = new_vel.y.clamp(-self.v_max, self.v_max);
        let new_pos = self.pilots[idx].pos + new_vel;

        if out_of_bounds(new_pos, &self.circuit)
            || matches!(self.circuit.get(new_pos), Some(TerrainCell::Wall) | None)
        {
            self.pilots[idx].crashed = true;
            self.pilots[idx].vel = Vector::ZERO;
            return;
        }

        let cost = self.fuel_model.gas(acc_vec, new_vel, from_sand);
        self.pilots[idx].fuel -= cost;
        if self.pilots[idx].fuel < 0 {
            self.pilots[idx].fuel = 0;
            self.pilots[idx].out_of_fuel = true;
            return;
        }

        self.pilots[idx].pos = new_pos;
        self.pilots[idx].vel = new_vel;
        if matches!(self.circuit.get(new_pos), Some(TerrainCell::Finish)) {
            self.pilots[idx].finished = true;
        }
    }

    pub fn run(&mut self, visualize: bool, delay_ms: u64) -> RaceStats {
        let max_turns = self.circuit.width * self.circuit.height * 4;
        let mut zero_acceleration_turns = 0;
        let mut turn = 0;

        while turn < max_turns && !self.pilots[0].retired() {
            for idx in 0..self.pilots.len() {
                if self.pilots[idx].retired() {
                    continue;
                }
                let observation = self.observation_for(idx);
                let acc = self.driver.decide(&observation);
                if idx == 0 && acc == (0, 0) {
                    zero_acceleration_turns += 1;
                }
                self.apply_turn(idx, acc);
            }

            if visualize {
                self.print(turn);
                std::thread::sleep(std::time::Duration::from_millis(delay_ms));
            }

            turn += 1;
        }

        let outcome = if self.pilots[0].finished {
            Outcome::Won
        } else if self.pilots[0].crashed {
            Outcome::Crashed
        } else if self.pilots[0].out_of_fuel {
            Outcome::OutOfFuel
        } else {
            Outcome::TimedOut
        };

        info!(turns = turn, ?outcome, "race finished");

        RaceStats {
            turns_taken: turn,
            fuel_remaining: self.pilots[0].fuel,
            outcome,
            zero_acceleration_turns,
        }
    }

    fn print(&self, turn: usize) {
        print!("\x1B[2J\x1B[1;1H");
        println!("=== CIRCUIT PILOT RACE === turn {turn}");
        for y in 0..self.circuit.height {
            let mut line = String::with_capacity(self.circuit.width);
            for x in 0..self.circuit.width {
                let pos = Vector::new(x as i32, y as i32);
                let marker = self
                    .pilots
                    .iter()
                    .enumerate()
                    .find(|(_, p)| !p.retired() && p.pos == pos)
                    .map(|(i, _)| char::from(b'1' + i as u8));
                let ch = marker.unwrap_or_else(|| match self.circuit.get(pos) {
                    Some(TerrainCell::Track) => '.',
                    Some(TerrainCell::Wall) => '#',
                    Some(TerrainCell::Sand) => '~',
                    Some(TerrainCell::Finish) => '=',
                    Some(TerrainCell::Start(_)) => '.',
                    None => '#',
                });
                line.push(ch);
            }
            println!("{line}");
        }
        for (i, pilot) in self.pilots.iter().enumerate() {
            println!(
                "pilot {}: pos=({},{}) fuel={} {}",
                i + 1,
                pilot.pos.x,
                pilot.pos.y,
                pilot.fuel,
                if pilot.retired() { "(retired)" } else { "" }
            );
        }
    }
}
