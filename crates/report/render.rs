use crate::frame::Sample;
use log::debug;
use std::io::{self, Write};

pub const ALGOS: [&str; 3] = ["AES", "Twofish", "Blowfish"];
pub const MODES: [&str; 2] = ["ECB", "CBC"];
pub const OPS: [&str; 2] = ["encrypt", "decrypt"];

const HEADER: &str = "Throughput (approx):";

/// Fixed-point formatting. NaN prints as `nan`, infinities as `inf`/`-inf`.
pub fn format_num(x: f64, decimals: usize) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.*}", decimals, x)
    }
}

/// Write one line per (algo, mode, op, label) combination that has a sample.
///
/// # Arguments
/// * `out` - destination of the report
/// * `samples` - rows already narrowed to the largest `runs`
/// * `labels` - size tags in the order they should be listed
pub fn render<W: Write>(out: &mut W, samples: &[Sample], labels: &[String]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", HEADER)?;
    for algo in ALGOS {
        for mode in MODES {
            for op in OPS {
                for label in labels {
                    let sample = match samples.iter().find(|s| s.matches(algo, mode, op, label)) {
                        Some(s) => s,
                        None => {
                            debug!("no sample for {} {} {} {}", algo, mode, op, label);
                            continue;
                        }
                    };
                    // truncated, not rounded
                    let runs = sample.runs.unwrap_or_default() as i64;
                    writeln!(
                        out,
                        "{} {} {} {} x{} → ~{} MB/s",
                        algo,
                        mode,
                        op.to_uppercase(),
                        label,
                        runs,
                        format_num(sample.megabytes_per_second(), 2)
                    )?;
                }
            }
        }
    }
    Ok(())
}
