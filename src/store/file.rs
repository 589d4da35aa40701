//! Worksheet files on disk
//!
//! A worksheet file is either CSV (header row plus text rows) or Parquet
//! (one all-text column per header cell). Every store operation reads the
//! whole file, applies the change in memory and rewrites the file only if
//! something changed. Writes go to a sibling temporary file that replaces
//! the existing file on success.

use std::fs::{self, File};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{Result, RosterError};
use crate::models::Employee;
use crate::schema::SheetRow;
use crate::store::{EmployeeStore, Worksheet};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// On-disk layout of a worksheet file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Parquet,
}

impl SheetFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(RosterError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Read a worksheet file; every column is read as text
pub fn read_worksheet(path: &Path, format: SheetFormat) -> Result<Worksheet> {
    let start = Instant::now();
    log_operation_start("Reading worksheet", path);

    let sheet = match format {
        SheetFormat::Csv => read_csv(path)?,
        SheetFormat::Parquet => read_parquet(path)?,
    };

    log_operation_complete("loaded", path, sheet.row_count(), Some(start.elapsed()));
    Ok(sheet)
}

fn read_csv(path: &Path) -> Result<Worksheet> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        log_warning("Worksheet file is empty", Some(path));
        return Ok(Worksheet::default());
    }

    // Only the header is taken from the file; all cells stay text so that
    // identifiers keep their leading zeros.
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(0))?;
    let schema = Arc::new(Schema::new(
        inferred
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    if schema.fields().is_empty() {
        return Ok(Worksheet::default());
    }

    file.seek(SeekFrom::Start(0))?;
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_truncated_rows(true)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<RecordBatch>, _>>()?;
    Worksheet::from_batches(&schema, &batches)
}

fn read_parquet(path: &Path) -> Result<Worksheet> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = Arc::clone(builder.schema());
    let reader = builder.build()?;
    let batches = reader.collect::<std::result::Result<Vec<RecordBatch>, _>>()?;
    Worksheet::from_batches(&schema, &batches)
}

/// Write a worksheet file, replacing any existing file at `path`
pub fn write_worksheet(path: &Path, format: SheetFormat, sheet: &Worksheet) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing worksheet", path);

    let batch = sheet.to_record_batch()?;
    write_batch(path, format, &batch)?;

    log_operation_complete("wrote", path, sheet.row_count(), Some(start.elapsed()));
    Ok(())
}

/// Write one record batch in `format`, atomically replacing `path`
pub(crate) fn write_batch(path: &Path, format: SheetFormat, batch: &RecordBatch) -> Result<()> {
    let staging = staging_path(path);
    let written = match format {
        SheetFormat::Csv => write_csv(&staging, batch),
        SheetFormat::Parquet => write_parquet(&staging, batch),
    };
    if let Err(err) = written {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }
    fs::rename(&staging, path)?;
    Ok(())
}

fn write_csv(path: &Path, batch: &RecordBatch) -> Result<()> {
    // Encode in memory so every write error surfaces before the rename
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buffer);
        writer.write(batch)?;
    }
    let mut file = File::create(path)?;
    file.write_all(&buffer)?;
    file.sync_all()?;
    Ok(())
}

fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    let file = writer.into_inner()?;
    file.sync_all()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Employee store over a worksheet file
#[derive(Debug, Clone)]
pub struct SheetFileStore {
    path: PathBuf,
    format: SheetFormat,
}

impl SheetFileStore {
    /// Open an existing worksheet file
    ///
    /// Fails if the file does not exist or its header lacks an employee
    /// column.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = SheetFormat::from_path(&path)?;
        if !path.is_file() {
            return Err(RosterError::store("worksheet file not found").with_path(&path));
        }
        let store = Self { path, format };
        let sheet = store.load()?;
        if !sheet.header().is_empty() {
            sheet
                .validate_header::<Employee>()
                .map_err(|err| RosterError::store(err.to_string()).with_path(&store.path))?;
        }
        Ok(store)
    }

    /// Create a worksheet file holding only the employee header
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = SheetFormat::from_path(&path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        write_worksheet(&path, format, &Worksheet::for_records::<Employee>())?;
        Ok(Self { path, format })
    }

    /// Open the worksheet file, creating it if it does not exist
    pub fn open_or_create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> SheetFormat {
        self.format
    }

    /// Current content of the worksheet file
    pub fn load(&self) -> Result<Worksheet> {
        read_worksheet(&self.path, self.format)
    }

    fn save(&self, sheet: &Worksheet) -> Result<()> {
        write_worksheet(&self.path, self.format, sheet)
    }

    /// Load, apply `change`, and save if it reports a modification
    fn modify(&self, change: impl FnOnce(&mut Worksheet) -> bool) -> Result<bool> {
        let mut sheet = self.load()?;
        if !change(&mut sheet) {
            return Ok(false);
        }
        self.save(&sheet)?;
        Ok(true)
    }
}

impl EmployeeStore for SheetFileStore {
    fn list_employees(&mut self) -> Result<Vec<Employee>> {
        Ok(self.load()?.records())
    }

    fn append_employee(&mut self, employee: &Employee) -> Result<bool> {
        log::debug!("Appending employee {} to {}", employee.key(), self.path.display());
        self.modify(|sheet| {
            sheet.append_record(employee);
            true
        })
    }

    fn update_employee(&mut self, identifier: &str, employee: &Employee) -> Result<bool> {
        let updated = self.modify(|sheet| sheet.update_record(identifier, employee))?;
        if !updated {
            log::info!("No employee with identifier {identifier} in {}", self.path.display());
        }
        Ok(updated)
    }

    fn delete_employee(&mut self, identifier: &str) -> Result<bool> {
        let deleted = self.modify(|sheet| sheet.delete_record::<Employee>(identifier))?;
        if !deleted {
            log::info!("No employee with identifier {identifier} in {}", self.path.display());
        }
        Ok(deleted)
    }
}
