use bench::Record;
use log::info;
use polars::prelude::PolarsError;
use std::io::{self, Write};

pub mod frame;
pub mod render;

pub use frame::{Sample, ThroughputFrame};
pub use render::{format_num, render, ALGOS, MODES, OPS};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("data frame: {0}")]
    Frame(#[from] PolarsError),

    #[error("write report: {0}")]
    Io(#[from] io::Error),
}

/// Filter `records` down to the largest `runs` group and write the throughput report.
pub fn write_report<W: Write>(records: &[Record], out: &mut W) -> Result<(), ReportError> {
    let frame = ThroughputFrame::from_records(records)?;
    let max_runs = frame.max_runs()?;
    info!("max runs: {:?}", max_runs);

    let filtered = frame.filter_by_max_runs(max_runs)?;
    info!("{} of {} rows kept", filtered.height(), frame.height());

    let labels = filtered.distinct_labels()?;
    let samples = filtered.samples()?;
    render(out, &samples, &labels)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(content: &str) -> String {
        let records = bench::parse(content.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_report(&records, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_row() {
        let out = report("1,AES,ECB,1MB,encrypt,100,1048576,-,-,-,-,-,10.0\n");
        assert_eq!(
            out,
            "\nThroughput (approx):\nAES ECB ENCRYPT 1MB x100 → ~10.00 MB/s\n"
        );
    }

    #[test]
    fn test_only_max_runs_reported() {
        let content = "\
1,AES,ECB,1MB,encrypt,10,1048576,-,-,-,-,-,1.0
2,AES,ECB,1MB,encrypt,50,1048576,-,-,-,-,-,5.0
3,AES,ECB,4MB,encrypt,50,4194304,-,-,-,-,-,8.0
4,AES,ECB,16MB,encrypt,20,16777216,-,-,-,-,-,2.0
";
        let out = report(content);
        let lines: Vec<&str> = out.lines().skip(2).collect();
        assert_eq!(
            lines,
            vec![
                "AES ECB ENCRYPT 1MB x50 → ~10.00 MB/s",
                "AES ECB ENCRYPT 4MB x50 → ~25.00 MB/s",
            ]
        );
        assert!(!out.contains("16MB"));
    }

    #[test]
    fn test_fixed_nesting_order() {
        // rows deliberately out of report order
        let content = "\
1,Blowfish,CBC,4MB,decrypt,2,1048576,-,-,-,-,-,1.0
2,AES,CBC,1MB,encrypt,2,1048576,-,-,-,-,-,1.0
3,Twofish,ECB,4MB,encrypt,2,1048576,-,-,-,-,-,1.0
4,AES,ECB,4MB,decrypt,2,1048576,-,-,-,-,-,1.0
5,AES,ECB,1MB,decrypt,2,1048576,-,-,-,-,-,1.0
6,AES,ECB,4MB,encrypt,2,1048576,-,-,-,-,-,1.0
";
        let out = report(content);
        let lines: Vec<&str> = out.lines().skip(2).collect();
        assert_eq!(
            lines,
            vec![
                "AES ECB ENCRYPT 4MB x2 → ~2.00 MB/s",
                "AES ECB DECRYPT 4MB x2 → ~2.00 MB/s",
                "AES ECB DECRYPT 1MB x2 → ~2.00 MB/s",
                "AES CBC ENCRYPT 1MB x2 → ~2.00 MB/s",
                "Twofish ECB ENCRYPT 4MB x2 → ~2.00 MB/s",
                "Blowfish CBC DECRYPT 4MB x2 → ~2.00 MB/s",
            ]
        );
    }

    #[test]
    fn test_empty_input_prints_header_only() {
        assert_eq!(report(""), "\nThroughput (approx):\n");
    }

    #[test]
    fn test_all_runs_missing_prints_header_only() {
        let content = "\
1,AES,ECB,1MB,encrypt,n/a,1048576,-,-,-,-,-,10.0
2,AES,ECB,1MB,decrypt,-,1048576,-,-,-,-,-,10.0
";
        assert_eq!(report(content), "\nThroughput (approx):\n");
    }

    #[test]
    fn test_idempotent() {
        let content = "\
1,AES,ECB,1MB,encrypt,100,1048576,-,-,-,-,-,10.0
2,Twofish,CBC,1MB,decrypt,100,1048576,-,-,-,-,-,40.0
";
        assert_eq!(report(content), report(content));
    }
}
