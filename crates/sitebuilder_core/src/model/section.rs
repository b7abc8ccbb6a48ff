//! Section content blocks.
//!
//! # Responsibility
//! - Define the closed set of section types and their data records.
//! - Apply partial updates without ever changing a section's type.
//!
//! # Invariants
//! - `SectionData` variant is the single source of truth for the type tag.
//! - Decoding rejects a `data` record that does not match its `type`.
//! - `SectionPatch` fields that do not belong to the section type are ignored.

use crate::model::id::{generate_id, SectionId};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_TEXT_HEADING: &str = "New Heading";
pub const DEFAULT_TEXT_BODY: &str = "Your content here";
pub const DEFAULT_IMAGE_SRC: &str =
    "https://images.pexels.com/photos/1054218/pexels-photo-1054218.jpeg?auto=compress&cs=tinysrgb&w=800";
pub const DEFAULT_IMAGE_ALT: &str = "Sample image";
pub const DEFAULT_BUTTON_LABEL: &str = "Click Me";
pub const DEFAULT_BUTTON_HREF: &str = "#";

/// Closed set of section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    /// Heading plus paragraph.
    Text,
    /// Single image with alt text.
    Image,
    /// Link rendered as a button.
    Button,
}

impl SectionType {
    pub const ALL: [SectionType; 3] = [Self::Text, Self::Image, Self::Button];

    /// Wire name, also used in CSS class names and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
        }
    }
}

impl Display for SectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextData {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonData {
    pub label: String,
    pub href: String,
}

/// Type-specific section payload.
///
/// Serialized untagged: the tag lives next to it on [`Section`] as `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    Text(TextData),
    Image(ImageData),
    Button(ButtonData),
}

impl SectionData {
    /// Placeholder content used when a new section is added.
    pub fn placeholder(kind: SectionType) -> Self {
        match kind {
            SectionType::Text => Self::Text(TextData {
                heading: DEFAULT_TEXT_HEADING.to_string(),
                body: DEFAULT_TEXT_BODY.to_string(),
            }),
            SectionType::Image => Self::Image(ImageData {
                src: DEFAULT_IMAGE_SRC.to_string(),
                alt: DEFAULT_IMAGE_ALT.to_string(),
            }),
            SectionType::Button => Self::Button(ButtonData {
                label: DEFAULT_BUTTON_LABEL.to_string(),
                href: DEFAULT_BUTTON_HREF.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> SectionType {
        match self {
            Self::Text(_) => SectionType::Text,
            Self::Image(_) => SectionType::Image,
            Self::Button(_) => SectionType::Button,
        }
    }

    /// Shallow-merges `patch` into this record.
    ///
    /// Only fields owned by the current variant are applied. Returns whether
    /// any field value changed.
    pub fn apply(&mut self, patch: &SectionPatch) -> bool {
        match self {
            Self::Text(data) => {
                let heading = assign(&mut data.heading, patch.heading.as_ref());
                let body = assign(&mut data.body, patch.body.as_ref());
                heading || body
            }
            Self::Image(data) => {
                let src = assign(&mut data.src, patch.src.as_ref());
                let alt = assign(&mut data.alt, patch.alt.as_ref());
                src || alt
            }
            Self::Button(data) => {
                let label = assign(&mut data.label, patch.label.as_ref());
                let href = assign(&mut data.href, patch.href.as_ref());
                label || href
            }
        }
    }

    fn decode(kind: SectionType, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            SectionType::Text => Self::Text(serde_json::from_value(value)?),
            SectionType::Image => Self::Image(serde_json::from_value(value)?),
            SectionType::Button => Self::Button(serde_json::from_value(value)?),
        })
    }
}

fn assign(slot: &mut String, value: Option<&String>) -> bool {
    match value {
        Some(value) if slot != value => {
            slot.clone_from(value);
            true
        }
        _ => false,
    }
}

/// Partial update for a section's data record.
///
/// Every field is optional; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub label: Option<String>,
    pub href: Option<String>,
}

impl SectionPatch {
    pub fn heading(mut self, value: impl Into<String>) -> Self {
        self.heading = Some(value.into());
        self
    }

    pub fn body(mut self, value: impl Into<String>) -> Self {
        self.body = Some(value.into());
        self
    }

    pub fn src(mut self, value: impl Into<String>) -> Self {
        self.src = Some(value.into());
        self
    }

    pub fn alt(mut self, value: impl Into<String>) -> Self {
        self.alt = Some(value.into());
        self
    }

    pub fn label(mut self, value: impl Into<String>) -> Self {
        self.label = Some(value.into());
        self
    }

    pub fn href(mut self, value: impl Into<String>) -> Self {
        self.href = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Decode-time validation error for sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionValidationError {
    /// Section id is blank.
    EmptyId,
    /// `data` does not have the fields required by `type`.
    DataShapeMismatch { kind: SectionType, message: String },
}

impl Display for SectionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "section id must not be empty"),
            Self::DataShapeMismatch { kind, message } => {
                write!(f, "section data does not match type `{kind}`: {message}")
            }
        }
    }
}

impl Error for SectionValidationError {}

/// One content block on a page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SectionRecord")]
pub struct Section {
    pub id: SectionId,
    pub data: SectionData,
}

impl Section {
    /// Creates a section of `kind` with placeholder data and a fresh id.
    pub fn new(kind: SectionType) -> Self {
        Self::with_data(SectionData::placeholder(kind))
    }

    pub fn with_data(data: SectionData) -> Self {
        Self {
            id: generate_id(),
            data,
        }
    }

    pub fn kind(&self) -> SectionType {
        self.data.kind()
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Section", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.kind())?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

#[derive(Deserialize)]
struct SectionRecord {
    id: SectionId,
    #[serde(rename = "type")]
    kind: SectionType,
    data: serde_json::Value,
}

impl TryFrom<SectionRecord> for Section {
    type Error = SectionValidationError;

    fn try_from(record: SectionRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(SectionValidationError::EmptyId);
        }
        let data = SectionData::decode(record.kind, record.data).map_err(|err| {
            SectionValidationError::DataShapeMismatch {
                kind: record.kind,
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            id: record.id,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_matches_requested_kind() {
        for kind in SectionType::ALL {
            assert_eq!(SectionData::placeholder(kind).kind(), kind);
        }
    }

    #[test]
    fn apply_ignores_fields_of_other_kinds() {
        let mut data = SectionData::placeholder(SectionType::Button);
        let changed = data.apply(&SectionPatch::default().heading("nope").href("/about"));

        assert!(changed);
        assert_eq!(
            data,
            SectionData::Button(ButtonData {
                label: DEFAULT_BUTTON_LABEL.to_string(),
                href: "/about".to_string(),
            })
        );
    }

    #[test]
    fn apply_reports_unchanged_values() {
        let mut data = SectionData::placeholder(SectionType::Text);
        assert!(!data.apply(&SectionPatch::default().heading(DEFAULT_TEXT_HEADING)));
        assert!(!data.apply(&SectionPatch::default()));
    }

    #[test]
    fn decode_rejects_mismatched_shape() {
        let value = serde_json::json!({
            "id": "s1",
            "type": "image",
            "data": { "heading": "h", "body": "b" }
        });

        let err = serde_json::from_value::<Section>(value).unwrap_err();
        assert!(
            err.to_string().contains("does not match type `image`"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let patch: SectionPatch = serde_json::from_str(r#"{"heading":"X"}"#).unwrap();
        assert_eq!(patch, SectionPatch::default().heading("X"));
        assert!(!patch.is_empty());
    }
}
