use std::path::PathBuf;

use clap::Parser;

/// Convert a ZEUS MHD frame into a POLARIS spherical grid
#[derive(Parser, Debug)]
#[command(
    name = "zeus2polaris",
    about = "Convert a ZEUS MHD frame into a POLARIS spherical grid",
    version,
    author
)]
pub struct Cli {
    /// Time frame number (prompted for if omitted)
    #[arg(value_name = "FRAME")]
    pub frame: Option<u32>,

    /// Grid encoding, either 'binary' or 'ascii'
    #[arg(short, long, value_name = "FORMAT", default_value = "ascii")]
    pub format: String,

    /// Directory containing the ZEUS output
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Output path without extension [default: polaris_grid/lmd2.4-1k-Slw_<FRAME>]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of ghost cells on either side of every axis
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub ghosts: usize,

    /// Dust mass density as a fraction of the gas mass density
    #[arg(long, value_name = "RATIO", default_value_t = 0.01)]
    pub dust_to_gas: f64,

    /// Replace the gas density of every cell with a constant
    #[arg(long, value_name = "RHO")]
    pub constant_density: Option<f64>,

    /// Also write the magnetic field components
    #[arg(long)]
    pub magnetic: bool,

    /// Also write the velocity components
    #[arg(long)]
    pub velocity: bool,

    /// Print the header of an existing grid file instead of converting
    #[arg(long, value_name = "FILE", conflicts_with = "frame")]
    pub inspect: Option<PathBuf>,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging and the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
