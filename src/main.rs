use clap::Parser;

use circuit_pilot::batch::BatchRunner;
use circuit_pilot::config::Config;
use circuit_pilot::race::Race;

fn main() {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if !config.quiet {
        println!("Starting circuit pilot race...");
        println!("Grid size: {}x{}", config.grid_size, config.grid_size);
        println!("Walls: {}, Sand: {}", config.num_walls, config.num_sand);
        println!("v_max: {}, fuel: {}", config.v_max, config.fuel);
    }

    if config.batch_mode {
        if !config.quiet {
            println!("Running {} races in batch mode -> {}", config.num_races, config.output_file);
        }
        let runner = BatchRunner::new(config.clone());
        match runner.run() {
            Ok(aggregate) => {
                println!("\n=== BATCH RESULTS ===");
                println!("{aggregate}");
            }
            Err(e) => {
                eprintln!("Batch run failed: {e}");
                std::process::exit(1);
            }
        }
    } else {
        let visualize = !config.no_visualization;
        if visualize && !config.quiet {
            println!("Visualization enabled with {}ms delay", config.delay_ms);
            println!("Press Ctrl+C to stop the race");
        }

        let mut race = Race::new(&config, config.seed);
        let stats = race.run(visualize, config.delay_ms);

        println!("\n=== FINAL RESULTS ===");
        println!("{stats}");
    }
}
