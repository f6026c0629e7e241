//! CLI frontend for the Wayfarer travel engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wf",
    about = "Wayfarer — deterministic world generation and travel simulation",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a world and print it as JSON
    Generate {
        /// World seed (number or name)
        #[arg(short, long, default_value = "42")]
        seed: String,

        /// Zone count override
        #[arg(long)]
        zones: Option<usize>,

        /// Minor location count override
        #[arg(long)]
        locations: Option<usize>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List a generated world's locations
    Locations {
        /// World seed (number or name)
        #[arg(short, long, default_value = "42")]
        seed: String,
    },

    /// Plan a route between two locations
    Route {
        /// World seed (number or name)
        #[arg(short, long, default_value = "42")]
        seed: String,

        /// Start location (name or id like L3)
        from: String,

        /// Destination location (name or id like L12)
        to: String,

        /// Prefer safety over speed
        #[arg(long)]
        safest: bool,
    },

    /// Travel a route, simulating events along the way
    Journey {
        /// World seed (number or name)
        #[arg(short, long, default_value = "42")]
        seed: String,

        /// Start location (name or id like L3)
        from: String,

        /// Destination location (name or id like L12)
        to: String,

        /// Game minutes per simulation tick
        #[arg(long, default_value_t = 30.0)]
        tick_minutes: f64,

        /// Player level, used to scale encounters
        #[arg(long, default_value_t = 3)]
        level: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Generate {
            seed,
            zones,
            locations,
            output,
        } => commands::generate::run(&seed, zones, locations, output.as_deref()),
        Commands::Locations { seed } => commands::locations::run(&seed),
        Commands::Route {
            seed,
            from,
            to,
            safest,
        } => commands::route::run(&seed, &from, &to, safest),
        Commands::Journey {
            seed,
            from,
            to,
            tick_minutes,
            level,
        } => commands::journey::run(&seed, &from, &to, tick_minutes, level),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        process::exit(1);
    }
}
