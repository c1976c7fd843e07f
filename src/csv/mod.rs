pub mod exporter;
pub mod sink;

pub use exporter::{ConversionStats, CsvExporter};
pub use sink::{CsvSink, WinnerSinks, CSV_HEADER};
