// WHY: CSV collaborator producing/consuming record sequences for the core
// The keyed-vs-table result shape follows ExportKind alone

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::reader::WriteMode;

/// How a CSV file is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReadLayout {
    /// Lines are rows; a name selects the row whose first cell matches
    Rows,
    /// Lines are columns; a name selects the column whose header matches
    Columns,
    /// Named columns zipped into row tuples in the requested name order
    #[default]
    Slice,
}

/// How records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Rows,
    /// Each input record becomes a column; short columns are padded with ""
    Columns,
}

/// Result shape for named row/column lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportKind {
    #[default]
    Keyed,
    Table,
}

/// Records read from a tabular resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Records {
    /// Name to selected line, in request order
    Keyed(Vec<(String, Vec<String>)>),
    Table(Vec<Vec<String>>),
}

impl Records {
    pub fn is_empty(&self) -> bool {
        match self {
            Records::Keyed(entries) => entries.is_empty(),
            Records::Table(rows) => rows.is_empty(),
        }
    }
}

/// Options for `read_csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvReadOptions {
    /// Row/column names to select; empty selects the whole table
    pub names: Vec<String>,
    pub layout: ReadLayout,
    /// Offset into each selected line, skipping the name cell by default
    pub begin: usize,
    pub export: ExportKind,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            layout: ReadLayout::Slice,
            begin: 1,
            export: ExportKind::Keyed,
        }
    }
}

/// Read a headerless CSV file into records
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> Result<Records> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    debug!(rows = rows.len(), "Read CSV {}", path.display());

    let records = select(rows, options);
    if records.is_empty() {
        warn!(names = ?options.names, "No records selected from {}", path.display());
    }
    Ok(records)
}

fn select(rows: Vec<Vec<String>>, options: &CsvReadOptions) -> Records {
    if options.names.is_empty() {
        return match options.layout {
            ReadLayout::Columns => Records::Table(transpose(&rows)),
            ReadLayout::Rows | ReadLayout::Slice => Records::Table(rows),
        };
    }

    match options.layout {
        ReadLayout::Rows => pick_named(&rows, options),
        ReadLayout::Columns => pick_named(&transpose(&rows), options),
        ReadLayout::Slice => {
            let column_options = CsvReadOptions {
                export: ExportKind::Table,
                ..options.clone()
            };
            let columns = match pick_named(&transpose(&rows), &column_options) {
                Records::Table(columns) => columns,
                Records::Keyed(_) => Vec::new(),
            };
            Records::Table(zip_columns(&columns))
        }
    }
}

fn pick_named(lines: &[Vec<String>], options: &CsvReadOptions) -> Records {
    let mut keyed = Vec::new();
    let mut table = Vec::new();

    for name in &options.names {
        let Some(line) = lines
            .iter()
            .find(|line| line.first().is_some_and(|head| head.trim() == name))
        else {
            warn!(name = name.as_str(), "name not found in table");
            continue;
        };
        let values = line.get(options.begin..).map(<[String]>::to_vec).unwrap_or_default();
        match options.export {
            ExportKind::Keyed => keyed.push((name.clone(), values)),
            ExportKind::Table => table.push(values),
        }
    }

    match options.export {
        ExportKind::Keyed => Records::Keyed(keyed),
        ExportKind::Table => Records::Table(table),
    }
}

/// Rows of the selected columns, truncated to the shortest column
fn zip_columns(columns: &[Vec<String>]) -> Vec<Vec<String>> {
    let height = columns.iter().map(Vec::len).min().unwrap_or(0);
    (0..height)
        .map(|i| columns.iter().map(|column| column[i].clone()).collect())
        .collect()
}

/// Swap rows and columns, padding short lines with ""
fn transpose<S: AsRef<str>>(lines: &[Vec<S>]) -> Vec<Vec<String>> {
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|j| {
            lines
                .iter()
                .map(|line| line.get(j).map(|cell| cell.as_ref().to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Write records as CSV
pub fn write_csv<P, S>(records: &[Vec<S>], path: P, mode: WriteMode, orientation: Orientation) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let file = match mode {
        WriteMode::Truncate => OpenOptions::new().write(true).create(true).truncate(true).open(path)?,
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
    };
    let mut writer = WriterBuilder::new().flexible(true).from_writer(file);

    match orientation {
        Orientation::Rows => {
            for record in records {
                let fields: Vec<&str> = record.iter().map(|cell| cell.as_ref()).collect();
                writer.write_record(&fields)?;
            }
        }
        Orientation::Columns => {
            for row in transpose(records) {
                writer.write_record(&row)?;
            }
        }
    }
    writer.flush()?;

    debug!(records = records.len(), ?orientation, "Wrote CSV {}", path.display());
    Ok(())
}
