use clap::Parser;
use env_logger::Env;
use log::{debug, error};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Print aggregate throughput from a benchmark results CSV
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file (no header row, 13 columns)
    csv_path: PathBuf,
}

fn run<W: Write>(csv_path: &Path, out: &mut W) -> Result<(), Box<dyn Error>> {
    let records = bench::load(csv_path)?;
    report::write_report(&records, out)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    debug!("args: {:?}", args);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&args.csv_path, &mut out) {
        error!("report failed: {}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
