use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::consts::CSV_HEADER;
use crate::error::{Result, SpeckleError};
use crate::frame::FrameMetrics;

/// Outcome of [`ensure_dir`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    AlreadyExists,
}

/// Create `path` and any missing parents. An existing folder is left alone.
pub fn ensure_dir(path: &Path) -> Result<DirStatus> {
    if path.is_dir() {
        info!(path = %path.display(), "Folder already exists");
        return Ok(DirStatus::AlreadyExists);
    }

    fs::create_dir_all(path).map_err(|source| SpeckleError::DirCreate {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Folder created");
    Ok(DirStatus::Created)
}

/// Writes one experiment's results table.
pub struct ResultWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    rows_written: usize,
}

impl ResultWriter {
    /// Create (or truncate) the CSV file and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let open_err = |source| SpeckleError::CsvOpen {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(open_err)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{CSV_HEADER}").map_err(open_err)?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows_written: 0,
        })
    }

    /// Append the row for one frame.
    pub fn write_row(&mut self, metrics: &FrameMetrics) -> Result<()> {
        writeln!(self.writer, "{}", format_row(metrics))?;
        self.rows_written += 1;
        debug!(frame = metrics.frame_index, "Row written");
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and close the file, returning its path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

/// Render one CSV row. The error columns are always empty; the distance
/// columns are empty when no displacement was computed.
pub fn format_row(metrics: &FrameMetrics) -> String {
    let m = &metrics.matched;
    let (dist_x, dist_y) = match metrics.displacement {
        Some(d) => (d.x_mm.to_string(), d.y_mm.to_string()),
        None => (String::new(), String::new()),
    };

    format!(
        "{},{},{},{},{},,,,,{}",
        m.shift_x, m.shift_y, m.confidence, dist_x, dist_y, metrics.mig
    )
}
