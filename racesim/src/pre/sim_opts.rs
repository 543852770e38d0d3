use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    author = "Alexander Heilmeier <alexander.heilmeier@tum.de>",
    name = "RS-TB",
    about = "A turn-based race simulator written in Rust"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug logging
    #[clap(short, long)]
    pub debug: bool,

    /// Let the autopilot drive instead of reading actions from the terminal
    #[clap(short, long)]
    pub auto: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set number of autopilot races (only relevant with --auto)
    #[clap(short, long, default_value = "1")]
    pub no_sim_runs: u32,

    /// Set path to the race parameter file (OPTIONAL: if not set, uses the built-in catalog)
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set catalog index of the vehicle (OPTIONAL: asked for in interactive mode)
    #[clap(short, long)]
    pub vehicle: Option<usize>,

    /// Set seed for the AI competitors, autopilot run i uses seed + i (OPTIONAL: random)
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Set wall-clock interval between two clock ticks in seconds (OPTIONAL: from parameters)
    #[clap(short, long)]
    pub tick_interval: Option<f64>,

    /// Set path of the CSV file the final standings are written to (OPTIONAL)
    #[clap(short, long)]
    pub csv_path: Option<PathBuf>,
}
