//! Project and page records.
//!
//! # Responsibility
//! - Define the root `Project` aggregate and its ordered `Page` list.
//! - Build the default documents used at bootstrap and as page substitutes.
//!
//! # Invariants
//! - The first page is the home page.
//! - Section order inside a page is render order.
//! - Decoding rejects a project with zero pages.

use crate::model::id::{generate_id, PageId, ProjectId, SectionId};
use crate::model::now_millis;
use crate::model::section::{Section, SectionData, TextData};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_PROJECT_NAME: &str = "My Website";
pub const HOME_PAGE_NAME: &str = "Home";
pub const HOME_PAGE_PATH: &str = "/";
pub const NEW_PAGE_NAME: &str = "New Page";
pub const NEW_PAGE_PATH: &str = "/new-page";
pub const WELCOME_HEADING: &str = "Welcome to Your Website";
pub const WELCOME_BODY: &str = "Start building your amazing website!";

/// Site-wide color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Wire name, also used as the exported `<body>` class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// One page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    /// Route path. Only the home page's `/` carries meaning; not unique.
    pub path: String,
    pub sections: Vec<Section>,
    /// Unix epoch milliseconds of the last mutation touching this page.
    pub updated_at: i64,
}

impl Page {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            path: path.into(),
            sections: Vec::new(),
            updated_at: now_millis(),
        }
    }

    /// Empty home page, used when the last page is deleted.
    pub fn home() -> Self {
        Self::new(HOME_PAGE_NAME, HOME_PAGE_PATH)
    }

    /// Page appended by "add page"; the path is never de-duplicated.
    pub fn untitled() -> Self {
        Self::new(NEW_PAGE_NAME, NEW_PAGE_PATH)
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|section| section.id == section_id)
    }

    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|section| section.id.clone()).collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

/// Root document: name, theme and all pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub theme: Theme,
    pub pages: Vec<Page>,
}

impl Project {
    /// Bootstrap document: one "Home" page at `/` with a welcome text section.
    pub fn starter() -> Self {
        let mut home = Page::home();
        home.sections.push(Section::with_data(SectionData::Text(TextData {
            heading: WELCOME_HEADING.to_string(),
            body: WELCOME_BODY.to_string(),
        })));

        Self {
            id: generate_id(),
            name: DEFAULT_PROJECT_NAME.to_string(),
            theme: Theme::default(),
            pages: vec![home],
        }
    }

    /// First page; always present on a well-formed project.
    pub fn home_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.id == page_id)
    }

    pub fn page_ids(&self) -> Vec<PageId> {
        self.pages.iter().map(|page| page.id.clone()).collect()
    }
}

/// Decode-time validation error for projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// The page list is empty.
    NoPages,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPages => write!(f, "project must contain at least one page"),
        }
    }
}

impl Error for ProjectValidationError {}

#[derive(Deserialize)]
struct ProjectRecord {
    id: ProjectId,
    name: String,
    theme: Theme,
    pages: Vec<Page>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ProjectValidationError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        if record.pages.is_empty() {
            return Err(ProjectValidationError::NoPages);
        }
        Ok(Self {
            id: record.id,
            name: record.name,
            theme: record.theme,
            pages: record.pages,
        })
    }
}
