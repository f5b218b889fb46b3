//! User templates with a single `{placeholder}`.
//!
//! The same template drives both the search query and the extraction
//! instruction. Only the placeholder's position matters; its name is kept
//! for display.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TemplateError;

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// A validated template containing exactly one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
    span: Range<usize>,
}

impl Template {
    /// Validate `text`.
    ///
    /// Fails if there is no placeholder, or more than one.
    pub fn parse(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        let spans: Vec<Range<usize>> = RE_PLACEHOLDER.find_iter(&text).map(|m| m.range()).collect();

        match spans.as_slice() {
            [] => Err(TemplateError::MissingPlaceholder { template: text }),
            [span] => Ok(Self {
                span: span.clone(),
                text,
            }),
            _ => Err(TemplateError::MultiplePlaceholders {
                count: spans.len(),
                template: text,
            }),
        }
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Name inside the braces, e.g. `Company` for `{Company}`.
    pub fn placeholder(&self) -> &str {
        &self.text[self.span.start + 1..self.span.end - 1]
    }

    /// Byte range of the placeholder token, braces included.
    pub fn placeholder_span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Replace the placeholder with `entity`, verbatim.
    pub fn render(&self, entity: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + entity.len());
        out.push_str(&self.text[..self.span.start]);
        out.push_str(entity);
        out.push_str(&self.text[self.span.end..]);
        out
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Search query for one entity.
pub fn build_query(template: &Template, entity: &str) -> String {
    template.render(entity)
}
