//! Zip packaging for exported files.

use super::{ExportError, ExportFile};
use log::info;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Generated files plus the archive name they ship under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    archive_name: String,
    files: Vec<ExportFile>,
}

impl ExportBundle {
    pub(crate) fn new(archive_name: String, files: Vec<ExportFile>) -> Self {
        Self {
            archive_name,
            files,
        }
    }

    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    pub fn files(&self) -> &[ExportFile] {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|file| file.name == name)
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.name.as_str()).collect()
    }

    /// Encodes every file into one zip archive.
    ///
    /// Entry timestamps are pinned to the zip epoch so equal bundles encode to
    /// equal bytes.
    pub fn to_zip(&self) -> Result<Vec<u8>, ExportError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for file in &self.files {
            writer.start_file(file.name.as_str(), options)?;
            writer.write_all(file.contents.as_bytes())?;
        }
        Ok(writer.finish()?.into_inner())
    }

    /// Writes the archive as `<dir>/<archive_name>` and returns that path.
    ///
    /// The archive is staged as `<archive_name>.part` and renamed into place,
    /// so a failed write never leaves a truncated archive behind.
    pub fn write_archive(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let bytes = self.to_zip()?;
        let path = dir.as_ref().join(&self.archive_name);
        let staged = dir.as_ref().join(format!("{}.part", self.archive_name));
        if let Err(err) =
            std::fs::write(&staged, &bytes).and_then(|()| std::fs::rename(&staged, &path))
        {
            let _ = std::fs::remove_file(&staged);
            return Err(err.into());
        }
        info!(
            "event=export_write module=export status=ok bytes={} files={}",
            bytes.len(),
            self.files.len()
        );
        Ok(path)
    }
}
