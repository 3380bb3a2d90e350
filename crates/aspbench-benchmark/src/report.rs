//! CSV result files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::result::{RunResult, HEADER};

/// Streaming CSV writer.
///
/// The header is written on creation and every row is flushed as soon as it
/// is written, so an interrupted sweep leaves a file of whole rows.
///
/// # Example
///
/// ```
/// use aspbench_benchmark::CsvReport;
///
/// let mut buffer = Vec::new();
/// CsvReport::new(&mut buffer).unwrap();
/// assert_eq!(
///     String::from_utf8(buffer).unwrap(),
///     "Problem,Dialect,System,Problem variant,Problem size,Rep,Time,Solutions,Output\n"
/// );
/// ```
#[derive(Debug)]
pub struct CsvReport<W: Write> {
    writer: W,
    rows: usize,
}

impl<W: Write> CsvReport<W> {
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{HEADER}")?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_row(&mut self, row: &RunResult) -> io::Result<()> {
        writeln!(self.writer, "{}", row.to_csv_row())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvReport<BufWriter<File>> {
    /// Creates (or truncates) a result file.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
