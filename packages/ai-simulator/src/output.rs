//! JSON-lines writer for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::metrics::GameMetrics;

pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl OutputWriter {
    pub fn new(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(metrics)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(self.path)
    }
}
