//! Sidebar sections and page references.

use serde::{Deserialize, Serialize};

/// Sidebar entry pointing at a page.
///
/// The label is what the sidebar and prev/next links show; it may differ
/// from the page title (e.g. "Overview" for the "Agent Overview" page).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    /// Display label.
    pub label: String,
    /// Page slug.
    pub slug: String,
}

impl PageRef {
    pub fn new(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            slug: slug.into(),
        }
    }
}

/// Named group of pages, rendered as a collapsible sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Display title (e.g. "Getting Started").
    pub title: String,
    /// URL query key derived from the title (e.g. "getting-started").
    pub key: String,
    /// Icon name, a presentation hint only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Pages in sidebar order.
    pub items: Vec<PageRef>,
}

impl Section {
    /// Create a section, deriving its key from the title.
    pub fn new(title: impl Into<String>, icon: Option<String>, items: Vec<PageRef>) -> Self {
        let title = title.into();
        Self {
            key: section_key(&title),
            title,
            icon,
            items,
        }
    }

    /// Check whether this section lists `slug`.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.items.iter().any(|item| item.slug == slug)
    }
}

/// Derive the URL query key for a section title.
///
/// Lowercases the title and replaces every run of whitespace with a single
/// hyphen. Total: any input produces a key.
///
/// # Example
///
/// ```
/// assert_eq!(rd_content::section_key("App Interface"), "app-interface");
/// ```
#[must_use]
pub fn section_key(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                key.push('-');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            key.extend(ch.to_lowercase());
        }
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key_known_titles() {
        let cases = [
            ("Getting Started", "getting-started"),
            ("Agents", "agents"),
            ("Pipelines", "pipelines"),
            ("Skills", "skills"),
            ("Sessions", "sessions"),
            ("App Interface", "app-interface"),
            ("Configuration", "configuration"),
        ];

        for (title, expected) in cases {
            assert_eq!(section_key(title), expected, "title: {title}");
        }
    }

    #[test]
    fn test_section_key_collapses_whitespace_runs() {
        assert_eq!(section_key("App \t  Interface"), "app-interface");
    }

    #[test]
    fn test_section_key_replaces_edge_whitespace() {
        assert_eq!(section_key(" Agents "), "-agents-");
    }

    #[test]
    fn test_section_key_keeps_punctuation() {
        assert_eq!(section_key("Built-in Skills"), "built-in-skills");
        assert_eq!(section_key("Q&A"), "q&a");
    }

    #[test]
    fn test_section_key_empty() {
        assert_eq!(section_key(""), "");
    }

    #[test]
    fn test_section_key_unicode_lowercase() {
        assert_eq!(section_key("ÜBER Uns"), "über-uns");
    }

    #[test]
    fn test_section_new_derives_key() {
        let section = Section::new(
            "Getting Started",
            Some("play".to_owned()),
            vec![PageRef::new("Introduction", "introduction")],
        );

        assert_eq!(section.key, "getting-started");
        assert!(section.contains("introduction"));
        assert!(!section.contains("installation"));
    }
}
