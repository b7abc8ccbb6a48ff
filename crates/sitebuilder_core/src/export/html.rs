//! Page and section HTML generation.
//!
//! # Invariants
//! - Output depends only on the project snapshot; no clocks, no randomness.
//! - User text, URLs and names are interpolated verbatim (no escaping).
//! - The first page is written as `index.html`, others as `<page-id>.html`.

use crate::export::css::STYLESHEET_FILE_NAME;
use crate::model::project::{Page, Project};
use crate::model::section::{Section, SectionData};

pub const INDEX_FILE_NAME: &str = "index.html";
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://picsum.photos/800/300";
pub const PLACEHOLDER_IMAGE_ALT: &str = "Image";
pub const FALLBACK_BUTTON_HREF: &str = "#";

const INDENT: &str = "  ";

struct Markup {
    depth: usize,
    buffer: String,
}

impl Markup {
    fn new() -> Self {
        Self {
            depth: 0,
            buffer: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn blank(&mut self) {
        self.buffer.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Output file name for `page` within `project`.
///
/// The home page maps to `index.html` regardless of its id.
pub fn page_file_name(project: &Project, page: &Page) -> String {
    let is_home = project
        .home_page()
        .is_some_and(|home| home.id == page.id);
    if is_home {
        INDEX_FILE_NAME.to_string()
    } else {
        format!("{}.html", page.id)
    }
}

/// Renders one self-contained HTML document for `page`.
pub fn render_page(project: &Project, page: &Page) -> String {
    let mut out = Markup::new();
    out.line("<!DOCTYPE html>");
    out.line(r#"<html lang="en">"#);
    out.open("<head>");
    out.line(r#"<meta charset="UTF-8">"#);
    out.line(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#);
    out.line(&format!("<title>{} - {}</title>", page.name, project.name));
    out.line(&format!(
        r#"<link rel="stylesheet" href="{STYLESHEET_FILE_NAME}">"#
    ));
    out.close("</head>");

    out.line(&format!(r#"<body class="{}">"#, project.theme.as_str()));
    out.depth += 1;
    render_navigation(&mut out, project, page);
    out.blank();
    out.open(r#"<main class="container">"#);
    for section in &page.sections {
        render_section(&mut out, section);
    }
    out.close("</main>");
    out.close("</body>");
    out.line("</html>");
    out.finish()
}

/// Renders a single section's markup, as it appears inside `<main>`.
pub fn render_section_html(section: &Section) -> String {
    let mut out = Markup::new();
    render_section(&mut out, section);
    out.finish()
}

fn render_navigation(out: &mut Markup, project: &Project, current: &Page) {
    out.open(r#"<nav class="navigation">"#);
    out.open(r#"<div class="nav-container">"#);
    out.line(&format!(r#"<h1 class="site-title">{}</h1>"#, project.name));
    out.open(r#"<div class="nav-links">"#);
    for page in &project.pages {
        let class = if page.id == current.id { "active" } else { "" };
        out.line(&format!(
            r#"<a href="{}" class="{class}">{}</a>"#,
            page_file_name(project, page),
            page.name
        ));
    }
    out.close("</div>");
    out.close("</div>");
    out.close("</nav>");
}

fn render_section(out: &mut Markup, section: &Section) {
    out.open(&format!(r#"<section class="{}-section">"#, section.kind()));
    match &section.data {
        SectionData::Text(data) => {
            out.line(&format!("<h2>{}</h2>", data.heading));
            out.line(&format!("<p>{}</p>", data.body));
        }
        SectionData::Image(data) => {
            out.line(&format!(
                r#"<img src="{}" alt="{}" />"#,
                or_fallback(&data.src, PLACEHOLDER_IMAGE_SRC),
                or_fallback(&data.alt, PLACEHOLDER_IMAGE_ALT)
            ));
        }
        SectionData::Button(data) => {
            out.line(&format!(
                r#"<a href="{}" class="button">{}</a>"#,
                or_fallback(&data.href, FALLBACK_BUTTON_HREF),
                data.label
            ));
        }
    }
    out.close("</section>");
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
