//! Shared stylesheet for exported sites.
//!
//! One file serves both themes: dark overrides hang off the `body.dark` class.

pub const STYLESHEET_FILE_NAME: &str = "styles.css";

const STYLESHEET: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
  line-height: 1.6;
  min-height: 100vh;
}

body.light {
  background-color: #f9fafb;
  color: #1f2937;
}

body.dark {
  background-color: #111827;
  color: #f9fafb;
}

.navigation {
  background-color: white;
  border-bottom: 1px solid #e5e7eb;
  padding: 1rem 0;
  position: sticky;
  top: 0;
  z-index: 100;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

.dark .navigation {
  background-color: #1f2937;
  border-bottom-color: #374151;
}

.nav-container {
  max-width: 1200px;
  margin: 0 auto;
  padding: 0 1.5rem;
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.site-title {
  font-size: 1.5rem;
  font-weight: 700;
}

.nav-links {
  display: flex;
  gap: 1rem;
}

.nav-links a {
  padding: 0.5rem 1rem;
  text-decoration: none;
  color: #4b5563;
  font-weight: 500;
  border-radius: 0.5rem;
  transition: all 0.2s;
}

.dark .nav-links a {
  color: #d1d5db;
}

.nav-links a:hover,
.nav-links a.active {
  background-color: #3b82f6;
  color: white;
}

.container {
  max-width: 1000px;
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

section {
  margin-bottom: 2rem;
}

.text-section {
  padding: 2rem;
  background-color: white;
  border-radius: 0.75rem;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

.dark .text-section {
  background-color: #1f2937;
}

.text-section h2 {
  font-size: 2rem;
  font-weight: 700;
  margin-bottom: 1rem;
  color: #1f2937;
}

.dark .text-section h2 {
  color: white;
}

.text-section p {
  font-size: 1.125rem;
  color: #4b5563;
  line-height: 1.75;
}

.dark .text-section p {
  color: #d1d5db;
}

.image-section {
  padding: 1rem;
  background-color: white;
  border-radius: 0.75rem;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

.dark .image-section {
  background-color: #1f2937;
}

.image-section img {
  width: 100%;
  height: auto;
  max-height: 500px;
  object-fit: cover;
  border-radius: 0.5rem;
}

.button-section {
  padding: 2rem;
  background-color: white;
  border-radius: 0.75rem;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
  display: flex;
  justify-content: center;
}

.dark .button-section {
  background-color: #1f2937;
}

.button {
  display: inline-block;
  padding: 0.75rem 2rem;
  background-color: #3b82f6;
  color: white;
  text-decoration: none;
  font-weight: 600;
  border-radius: 0.5rem;
  transition: background-color 0.2s;
  box-shadow: 0 4px 6px rgba(59, 130, 246, 0.3);
}

.button:hover {
  background-color: #2563eb;
}

@media (max-width: 768px) {
  .nav-container {
    flex-direction: column;
    gap: 1rem;
  }

  .nav-links {
    flex-wrap: wrap;
    justify-content: center;
  }

  .text-section h2 {
    font-size: 1.5rem;
  }

  .text-section p {
    font-size: 1rem;
  }
}"#;

/// Returns the stylesheet shared by every exported page.
pub fn stylesheet() -> &'static str {
    STYLESHEET
}

#[cfg(test)]
mod tests {
    use super::stylesheet;
    use crate::model::section::SectionType;

    #[test]
    fn covers_both_themes_and_every_section_type() {
        let css = stylesheet();
        assert!(css.contains("body.light"));
        assert!(css.contains("body.dark"));
        for kind in SectionType::ALL {
            assert!(css.contains(&format!(".{kind}-section")), "missing {kind}");
        }
        assert_eq!(css.matches("@media").count(), 1);
    }
}
