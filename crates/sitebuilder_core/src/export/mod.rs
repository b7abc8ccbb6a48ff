//! Static site export.
//!
//! # Responsibility
//! - Transform a project snapshot into static files (HTML per page, one
//!   stylesheet, one JSON snapshot).
//! - Package those files into a single downloadable zip archive.
//!
//! # Invariants
//! - Exporting the same snapshot twice yields byte-identical files and archive.
//! - File order is `index.html`, other pages in list order, `styles.css`,
//!   `project.json`.

pub mod archive;
pub mod css;
pub mod html;

use crate::model::project::Project;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub use archive::ExportBundle;
pub use css::{stylesheet, STYLESHEET_FILE_NAME};
pub use html::{page_file_name, render_page, render_section_html, INDEX_FILE_NAME};

pub const PROJECT_JSON_FILE_NAME: &str = "project.json";
const FALLBACK_ARCHIVE_STEM: &str = "website";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Single failure signal for export.
#[derive(Debug)]
pub enum ExportError {
    /// Project snapshot could not be serialized.
    Json(serde_json::Error),
    /// Archive could not be assembled.
    Zip(zip::result::ZipError),
    /// Archive could not be written.
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "failed to serialize project snapshot: {err}"),
            Self::Zip(err) => write!(f, "failed to build archive: {err}"),
            Self::Io(err) => write!(f, "failed to write archive: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Zip(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(value: zip::result::ZipError) -> Self {
        Self::Zip(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub contents: String,
}

impl ExportFile {
    fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Transforms `project` into its static file set.
///
/// # Errors
/// - Returns `ExportError::Json` when the snapshot cannot be serialized.
pub fn export_project(project: &Project) -> Result<ExportBundle, ExportError> {
    let started_at = Instant::now();
    match build_bundle(project) {
        Ok(bundle) => {
            info!(
                "event=export_build module=export status=ok project_id={} files={} duration_ms={}",
                project.id,
                bundle.files().len(),
                started_at.elapsed().as_millis()
            );
            Ok(bundle)
        }
        Err(err) => {
            error!(
                "event=export_build module=export status=error project_id={} error={err}",
                project.id
            );
            Err(err)
        }
    }
}

fn build_bundle(project: &Project) -> Result<ExportBundle, ExportError> {
    let mut files = Vec::with_capacity(project.pages.len() + 2);
    for page in &project.pages {
        files.push(ExportFile::new(
            page_file_name(project, page),
            render_page(project, page),
        ));
    }
    files.push(ExportFile::new(STYLESHEET_FILE_NAME, stylesheet()));
    files.push(ExportFile::new(
        PROJECT_JSON_FILE_NAME,
        serde_json::to_string_pretty(project)?,
    ));

    Ok(ExportBundle::new(archive_name(&project.name), files))
}

/// Archive file name derived from the project's display name.
///
/// Whitespace runs become `-`, the result is lower-cased and gets a `.zip`
/// suffix. An empty name yields `website.zip`.
pub fn archive_name(project_name: &str) -> String {
    let slug = WHITESPACE_RE.replace_all(project_name, "-").to_lowercase();
    if slug.is_empty() {
        format!("{FALLBACK_ARCHIVE_STEM}.zip")
    } else {
        format!("{slug}.zip")
    }
}

#[cfg(test)]
mod tests {
    use super::archive_name;

    #[test]
    fn archive_name_collapses_whitespace_and_lowercases() {
        assert_eq!(archive_name("My  Cool\tSite"), "my-cool-site.zip");
        assert_eq!(archive_name("Portfolio"), "portfolio.zip");
        assert_eq!(archive_name(""), "website.zip");
    }
}
