//! Core engine for the visual site builder.
//! This crate owns the project document, its mutation rules, persistence,
//! autosave scheduling and the static site export.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod storage;
pub mod store;

pub use config::BuilderConfig;
pub use export::{export_project, ExportBundle, ExportError, ExportFile};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id::{generate_id, PageId, ProjectId, SectionId};
pub use model::project::{Page, Project, Theme};
pub use model::section::{
    ButtonData, ImageData, Section, SectionData, SectionPatch, SectionType, TextData,
};
pub use scheduler::{DebouncedTask, Debouncer};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, ProjectStorage, SqliteKeyValueStore, StorageError,
};
pub use store::{DocumentStore, StoreEvent, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
