//! Record sinks

use crate::error::{Error, Result};
use crate::types::OutputRecord;
use async_trait::async_trait;
use std::io::{BufWriter, Stdout, Write};

/// Consumer of output records
///
/// Records arrive one at a time, in fetch order per parameter.
#[async_trait]
pub trait RecordSink: Send {
    /// Accept one record
    async fn emit(&mut self, record: OutputRecord) -> Result<()>;

    /// Flush anything buffered; called once after the last record
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes each record as one JSON line
pub struct JsonLinesSink<W: Write + Send> {
    writer: BufWriter<W>,
    records: usize,
}

impl JsonLinesSink<Stdout> {
    /// Write to stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Write to any writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            records: 0,
        }
    }

    /// Number of records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and return the inner writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::output(format!("Failed to flush output: {e}")))
    }
}

#[async_trait]
impl<W: Write + Send> RecordSink for JsonLinesSink<W> {
    async fn emit(&mut self, record: OutputRecord) -> Result<()> {
        let line = record.to_json_line()?;
        writeln!(self.writer, "{line}")?;
        self.records += 1;
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct CollectSink {
    /// Records in arrival order
    pub records: Vec<OutputRecord>,
    /// Whether `finish` was called
    pub finished: bool,
}

impl CollectSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Response bodies in arrival order
    pub fn responses(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.response.as_str()).collect()
    }
}

#[async_trait]
impl RecordSink for CollectSink {
    async fn emit(&mut self, record: OutputRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    async fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
