//! Export of screen tables to files
//!
//! The file extension picks the format: `.csv`, `.parquet` or `.json`.

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::error::{Result, RosterError};
use crate::store::SheetFormat;
use crate::store::file::write_batch;
use crate::utils::logging::{log_operation_complete, log_operation_start};
use crate::views::{View, batch_to_json};

/// Default file name of the retirement recap download
pub const RECAP_FILE_NAME: &str = "proyeksi_pensiun.csv";

/// Default file name of the roster download
pub const ROSTER_FILE_NAME: &str = "data_pegawai.csv";

/// Default file name of the classified roster download
pub const CLUSTERS_FILE_NAME: &str = "hasil_cluster.csv";

/// Output file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Sheet(SheetFormat),
    Json,
}

impl ExportFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            return Ok(Self::Json);
        }
        SheetFormat::from_path(path)
            .map(Self::Sheet)
            .map_err(|_| RosterError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Write the rows of `view` to `path`
pub fn export_view(view: &View, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start(&format!("Exporting '{}' to", view.title), path);

    match ExportFormat::from_path(path)? {
        ExportFormat::Sheet(format) => write_batch(path, format, &view.batch)?,
        ExportFormat::Json => {
            let rows = batch_to_json(&view.batch)?;
            fs::write(path, serde_json::to_vec_pretty(&rows)?)?;
        }
    }

    log_operation_complete("exported", path, view.num_rows(), Some(start.elapsed()));
    Ok(())
}
