//! Command line tool converting one ZEUS frame into a POLARIS grid

// standard library
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

// zpolaris modules
use zpolaris::polaris::{read_header, Encoding, Quantity};
use zpolaris::zeus::{Frame, GhostMargin};
use zpolaris::{convert_frame, default_output, ConversionConfig, Error, Result};

// external crates
use log::{error, info};

mod cli;

fn main() -> ExitCode {
    let cli = cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("{e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.chain());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let encoding = cli.format.parse::<Encoding>()?;

    if let Some(path) = &cli.inspect {
        return inspect(path, encoding);
    }

    let frame = match cli.frame {
        Some(number) => Frame::new(number),
        None => prompt_frame()?,
    };

    let config = ConversionConfig {
        frame,
        input_dir: cli.input_dir,
        output: cli.output.unwrap_or_else(|| default_output(frame)),
        encoding,
        margin: GhostMargin(cli.ghosts),
        dust_to_gas: cli.dust_to_gas,
        constant_density: cli.constant_density,
        include_velocity: cli.velocity,
        include_magnetic: cli.magnetic,
        disable_progress: cli.quiet,
        ..ConversionConfig::new(frame)
    };

    let path = convert_frame(&config)?;
    info!("Grid written to {}", path.display());
    Ok(())
}

/// Ask for the frame number on stdin
fn prompt_frame() -> Result<Frame> {
    print!("Please enter the time frame number: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let line = line.trim();
    line.parse::<u32>()
        .map(Frame::new)
        .map_err(|_| Error::InvalidFrame(line.to_string()))
}

/// Print the header of an existing grid
///
/// The file extension decides the encoding when it is one of the POLARIS
/// conventions, otherwise `--format` does.
fn inspect(path: &Path, fallback: Encoding) -> Result<()> {
    let encoding = match path.extension().and_then(|e| e.to_str()) {
        Some("dat") => Encoding::Binary,
        Some("txt") => Encoding::Ascii,
        _ => fallback,
    };

    let (header, record) = read_header(path, encoding)?;
    println!("{} ({encoding})", path.display());
    println!("  grid id: {}", header.grid_id);
    for id in &header.quantity_ids {
        match Quantity::try_from(*id) {
            Ok(quantity) => println!("  quantity: {quantity}"),
            Err(_) => println!("  quantity: unknown ({id})"),
        }
    }
    println!("  radius: [{}, {}]", record.r_min, record.r_max);
    println!(
        "  cells: {} x {} x {} (r x phi x theta)",
        record.n_r, record.n_ph, record.n_th
    );
    Ok(())
}

/// Log to stderr for the binary and every zpolaris crate
fn init_logging(verbose: u8, quiet: bool) -> core::result::Result<(), log::SetLoggerError> {
    stderrlog::new()
        .module(module_path!())
        .module("zpolaris")
        .module("zpolaris_zeus")
        .module("zpolaris_polaris")
        .quiet(quiet)
        .verbosity(verbose as usize + 2)
        .show_module_names(false)
        .init()
}
