//! Entity identifier generation.

use uuid::Uuid;

/// Opaque project identifier.
pub type ProjectId = String;
/// Opaque page identifier, unique within one project.
pub type PageId = String;
/// Opaque section identifier, unique within one page.
pub type SectionId = String;

/// Generates a new random identifier.
///
/// The value is a lowercase hyphenated UUID v4 string
/// (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`, `y` in `8..=b`). Never blocks and
/// never fails.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
