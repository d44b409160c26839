use bench::Record;
use polars::prelude::*;
use std::collections::HashSet;

/// A benchmark row as it comes back out of the data frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub algo: String,
    pub mode: String,
    pub label: Option<String>,
    pub op: String,
    pub runs: Option<f64>,
    pub size_bytes: Option<f64>,
    pub wall_ms: Option<f64>,
}

impl Sample {
    pub fn total_bytes(&self) -> f64 {
        self.size_bytes.unwrap_or(f64::NAN) * self.runs.unwrap_or(f64::NAN)
    }

    /// Megabytes divided by `wall_ms` as-is; the milliseconds are not converted to seconds.
    pub fn megabytes_per_second(&self) -> f64 {
        (self.total_bytes() / (1024.0 * 1024.0)) / self.wall_ms.unwrap_or(f64::NAN)
    }

    pub fn matches(&self, algo: &str, mode: &str, op: &str, label: &str) -> bool {
        self.algo == algo
            && self.mode == mode
            && self.op == op
            && self.label.as_deref() == Some(label)
    }
}

/// Columns of the loaded table the report works with. Missing numbers are nulls.
pub struct ThroughputFrame {
    df: DataFrame,
}

impl ThroughputFrame {
    pub fn new(df: DataFrame) -> Self {
        ThroughputFrame { df }
    }

    pub fn from_records(records: &[Record]) -> PolarsResult<Self> {
        let df = df!(
            "algo" => records.iter().map(|r| r.algo.as_str()).collect::<Vec<_>>(),
            "mode" => records.iter().map(|r| r.mode.as_str()).collect::<Vec<_>>(),
            "label" => records.iter().map(|r| r.label()).collect::<Vec<Option<&str>>>(),
            "op" => records.iter().map(|r| r.op.as_str()).collect::<Vec<_>>(),
            "runs" => records.iter().map(|r| r.runs).collect::<Vec<Option<f64>>>(),
            "sizeBytes" => records.iter().map(|r| r.size_bytes).collect::<Vec<Option<f64>>>(),
            "wallMs" => records.iter().map(|r| r.wall_ms).collect::<Vec<Option<f64>>>(),
        )?;
        Ok(ThroughputFrame::new(df))
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Largest `runs` value, ignoring nulls. `None` when there is no numeric value at all.
    pub fn max_runs(&self) -> PolarsResult<Option<f64>> {
        Ok(self.df.column("runs")?.f64()?.max())
    }

    pub fn filter_by_max_runs(&self, max_runs: Option<f64>) -> PolarsResult<Self> {
        let df = match max_runs {
            Some(max) => self
                .df
                .clone()
                .lazy()
                .filter(col("runs").eq(lit(max)))
                .collect()?,
            None => self.df.head(Some(0)),
        };
        Ok(ThroughputFrame::new(df))
    }

    /// Labels in the order they first appear, without duplicates.
    pub fn distinct_labels(&self) -> PolarsResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();
        for label in self.df.column("label")?.str()?.into_iter().flatten() {
            if seen.insert(label) {
                labels.push(label.to_string());
            }
        }
        Ok(labels)
    }

    pub fn samples(&self) -> PolarsResult<Vec<Sample>> {
        let algo = self.df.column("algo")?.str()?;
        let mode = self.df.column("mode")?.str()?;
        let label = self.df.column("label")?.str()?;
        let op = self.df.column("op")?.str()?;
        let runs = self.df.column("runs")?.f64()?;
        let size_bytes = self.df.column("sizeBytes")?.f64()?;
        let wall_ms = self.df.column("wallMs")?.f64()?;

        let samples = (0..self.df.height())
            .map(|i| Sample {
                algo: algo.get(i).unwrap_or_default().to_string(),
                mode: mode.get(i).unwrap_or_default().to_string(),
                label: label.get(i).map(str::to_string),
                op: op.get(i).unwrap_or_default().to_string(),
                runs: runs.get(i),
                size_bytes: size_bytes.get(i),
                wall_ms: wall_ms.get(i),
            })
            .collect();
        Ok(samples)
    }
}
