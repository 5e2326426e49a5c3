//! CLI configuration for the demo binary.

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Drives the circuit pilot decision engine over generated races", long_about = None)]
pub struct Config {
    /// Width and height of the generated circuit.
    #[arg(long, default_value_t = 20)]
    pub grid_size: usize,

    /// Number of wall cells scattered across the circuit.
    #[arg(long, default_value_t = 40)]
    pub num_walls: usize,

    /// Number of sand cells scattered across the circuit.
    #[arg(long, default_value_t = 15)]
    pub num_sand: usize,

    /// Maximum speed magnitude on either axis.
    #[arg(long, default_value_t = 3)]
    pub v_max: i32,

    /// Starting fuel for every pilot.
    #[arg(long, default_value_t = 500)]
    pub fuel: i32,

    /// Delay between printed turns, in milliseconds.
    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Disable the per-turn terminal visualization.
    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    /// Run `num_races` races back to back and write a CSV summary
    /// instead of a single visualized race.
    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    /// Number of races to run in batch mode.
    #[arg(long, default_value_t = 20)]
    pub num_races: usize,

    /// CSV output path for batch mode.
    #[arg(long, default_value = "race_results.csv")]
    pub output_file: String,

    /// Suppress progress output (batch mode only prints the summary).
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Fix the RNG seed for reproducible circuits/opponent placement.
    #[arg(long)]
    pub seed: Option<u64>,
}
