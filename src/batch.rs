//! Batch mode: run many races back to back and write a CSV summary,
//! grounded on the teacher's `BatchSimulation`/`flush_results_to_csv`
//! pattern (`std::fs::OpenOptions` + `writeln!`, no CSV crate).

use std::fs::File;
use std::io::{self, Write};

use crate::config::Config;
use crate::race::Race;
use crate::stats::{AggregateStats, RaceStats};

pub struct BatchRunner {
    config: Config,
}

impl BatchRunner {
    pub fn new(config: Config) -> Self {
        BatchRunner { config }
    }

    /// Runs `config.num_races` races, writes one CSV row per race, and
    /// returns the aggregate across all of them.
    pub fn run(&self) -> io::Result<AggregateStats> {
        let mut file = File::create(&self.config.output_file)?;
        writeln!(file, "race_id,outcome,turns_taken,fuel_remaining,zero_acceleration_turns")?;

        let mut aggregate = AggregateStats::default();
        for race_id in 0..self.config.num_races {
            let seed = self.config.seed.map(|s| s.wrapping_add(race_id as u64));
            let mut race = Race::new(&self.config, seed);
            let stats = race.run(false, 0);
            Self::write_row(&mut file, race_id, &stats)?;
            aggregate.record(&stats);

            if !self.config.quiet {
                println!("race {race_id}: {} in {} turns", stats.outcome, stats.turns_taken);
            }
        }

        Ok(aggregate)
    }

    fn write_row(file: &mut File, race_id: usize, stats: &RaceStats) -> io::Result<()> {
        writeln!(
            file,
            "{},{},{},{},{}",
            race_id, stats.outcome, stats.turns_taken, stats.fuel_remaining, stats.zero_acceleration_turns
        )
    }
}
