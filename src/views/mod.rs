//! Screens of the roster dashboard
//!
//! Every screen is a pure function from a snapshot (or its classified form)
//! to one or more titled record batches. Rendering to a terminal table, CSV
//! or JSON is separate and works for any screen.

pub mod clusters;
pub mod dashboard;
pub mod employees;
pub mod heatmaps;
pub mod projection;

use std::io::Write;

use arrow::datatypes::FieldRef;
use arrow::json::ArrayWriter;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::Result;

/// A titled table
#[derive(Debug, Clone)]
pub struct View {
    pub title: String,
    pub batch: RecordBatch,
}

impl View {
    #[must_use]
    pub fn new(title: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            title: title.into(),
            batch,
        }
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }
}

/// How views are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Boxed text tables
    #[default]
    Table,
    /// CSV, one block per view
    Csv,
    /// One JSON object mapping view titles to row arrays
    Json,
}

/// Write `views` to `out` in `format`
pub fn render<W: Write>(views: &[View], format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for view in views {
                writeln!(out, "{}", view.title)?;
                if view.num_rows() == 0 {
                    writeln!(out, "(no rows)")?;
                } else {
                    writeln!(out, "{}", pretty_format_batches(std::slice::from_ref(&view.batch))?)?;
                }
                writeln!(out)?;
            }
        }
        OutputFormat::Csv => {
            for (idx, view) in views.iter().enumerate() {
                if idx > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "# {}", view.title)?;
                let mut writer = arrow::csv::WriterBuilder::new()
                    .with_header(true)
                    .build(&mut *out);
                writer.write(&view.batch)?;
            }
        }
        OutputFormat::Json => {
            let mut document = serde_json::Map::new();
            for view in views {
                document.insert(view.title.clone(), batch_to_json(&view.batch)?);
            }
            serde_json::to_writer_pretty(&mut *out, &serde_json::Value::Object(document))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Rows of a batch as a JSON array of objects
pub fn batch_to_json(batch: &RecordBatch) -> Result<serde_json::Value> {
    let mut writer = ArrayWriter::new(Vec::new());
    writer.write_batches(&[batch])?;
    writer.finish()?;
    let buffer = writer.into_inner();
    if buffer.is_empty() {
        return Ok(serde_json::Value::Array(Vec::new()));
    }
    Ok(serde_json::from_slice(&buffer)?)
}

/// Encode serde rows as a record batch with a schema traced from `T`
pub(crate) fn rows_to_batch<'de, T>(rows: &[T]) -> Result<RecordBatch>
where
    T: Serialize + Deserialize<'de>,
{
    let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}
