pub mod record;

pub use record::{coerce_numeric, load, parse, BenchError, Record, COLUMNS};
