//! Document model for site projects.
//!
//! # Responsibility
//! - Define the canonical project -> pages -> sections document shape.
//! - Keep the persisted JSON field names stable (`updatedAt`, `type`, `data`).
//!
//! # Invariants
//! - A decoded `Project` always has at least one page.
//! - A `Section`'s data shape always matches its type tag.

pub mod id;
pub mod project;
pub mod section;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as Unix epoch milliseconds.
///
/// Falls back to `0` if the system clock reports a time before the epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
