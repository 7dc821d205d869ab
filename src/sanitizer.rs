// WHY: markup stripping at three thoroughness levels
// Tag removal is non-greedy and unaware of nesting; attributes containing '>' are not special-cased

use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::ValuePolicy;
use crate::error::Result;
use crate::sentence_segmenter::normalization::normalize_paragraphs;

/// How aggressively markup is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SanitizeLevel {
    /// Strip `<...>` tags only
    #[default]
    Normal,
    /// Also unwrap CDATA and comments, flatten via the markup converter, drop character references
    Deeper,
    /// Also unwrap CDATA and comments, no converter
    NoPackage,
}

impl SanitizeLevel {
    pub const NAMES: &[&str] = &["Normal", "Deeper", "NoPackage"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Normal" => Some(SanitizeLevel::Normal),
            "Deeper" => Some(SanitizeLevel::Deeper),
            "NoPackage" => Some(SanitizeLevel::NoPackage),
            _ => None,
        }
    }

    /// Parse a level name; unknown names follow `policy` with `Normal` as the fallback
    pub fn resolve(name: &str, policy: ValuePolicy) -> Result<Self> {
        match Self::from_name(name) {
            Some(level) => Ok(level),
            None => policy.reject_or("sanitize level", name, Self::NAMES, SanitizeLevel::Normal),
        }
    }

    fn unwraps_wrappers(self) -> bool {
        matches!(self, SanitizeLevel::Deeper | SanitizeLevel::NoPackage)
    }
}

impl fmt::Display for SanitizeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SanitizeLevel::Normal => "Normal",
            SanitizeLevel::Deeper => "Deeper",
            SanitizeLevel::NoPackage => "NoPackage",
        };
        f.write_str(name)
    }
}

/// Converts residual structured markup into plain text
pub trait MarkupConverter: Send + Sync {
    fn to_plain_text(&self, markup: &str) -> String;
}

/// Built-in converter: drops images and table rows, keeps link text, decodes character
/// references and reflows paragraphs
pub struct PlainTextConverter {
    image: Regex,
    link: Regex,
}

impl PlainTextConverter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            image: Regex::new(r"!\[[^\]]*\]\([^)]*\)")?,
            link: Regex::new(r"\[([^\]]*)\]\([^)]*\)")?,
        })
    }

    fn rewrite_links(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for caps in self.link.captures_iter(text) {
            let (Some(whole), Some(label)) = (caps.get_match(), caps.get_group(1)) else {
                continue;
            };
            result.push_str(&text[last..whole.start()]);
            result.push_str(&text[label.range()]);
            last = whole.end();
        }
        result.push_str(&text[last..]);
        result
    }
}

impl MarkupConverter for PlainTextConverter {
    fn to_plain_text(&self, markup: &str) -> String {
        let without_images = remove_matches(&self.image, markup);
        let with_link_text = self.rewrite_links(&without_images);
        let without_tables: String = with_link_text
            .lines()
            .filter(|line| !line.trim_start().starts_with('|'))
            .collect::<Vec<_>>()
            .join("\n");
        // Decoded `&nbsp;` is U+00A0, which the reflow treats as whitespace
        let decoded = html_escape::decode_html_entities(&without_tables);
        normalize_paragraphs(&decoded)
    }
}

/// Markup stripper with compiled patterns and an injectable converter
pub struct Sanitizer {
    tag: Regex,
    cdata: Regex,
    comment: Regex,
    char_ref: Regex,
    converter: Box<dyn MarkupConverter>,
}

impl Sanitizer {
    /// Sanitizer using `PlainTextConverter` for the `Deeper` level
    pub fn new() -> Result<Self> {
        Self::with_converter(Box::new(PlainTextConverter::new()?))
    }

    pub fn with_converter(converter: Box<dyn MarkupConverter>) -> Result<Self> {
        Ok(Self {
            tag: Regex::new(r"<[^<>]*>")?,
            cdata: Regex::new(r"<!\SCDATA\S|\]\]>")?,
            comment: Regex::new(r"<!--|-->")?,
            char_ref: Regex::new(r"&#?\w+;")?,
            converter,
        })
    }

    /// Strip markup from `text` at the given level; the result is trimmed
    pub fn sanitize(&self, text: &str, level: SanitizeLevel) -> String {
        let mut current = text.to_string();

        // Wrappers go first so their enclosed content is not eaten as part of a tag
        if level.unwraps_wrappers() {
            current = remove_matches(&self.cdata, &current);
            current = remove_matches(&self.comment, &current);
        }

        current = remove_matches(&self.tag, &current);

        if level == SanitizeLevel::Deeper {
            current = self.converter.to_plain_text(&current);
            current = remove_matches(&self.char_ref, &current);
        }

        debug!(%level, input = text.len(), output = current.len(), "Sanitized text");
        current.trim().to_string()
    }

    /// Sanitize with a level given by name, resolved through `policy`
    pub fn sanitize_by_name(&self, text: &str, level: &str, policy: ValuePolicy) -> Result<String> {
        let level = SanitizeLevel::resolve(level, policy)?;
        Ok(self.sanitize(text, level))
    }
}

/// Sanitize with a freshly built default `Sanitizer`
pub fn sanitize(text: &str, level: SanitizeLevel) -> Result<String> {
    Ok(Sanitizer::new()?.sanitize(text, level))
}

fn remove_matches(pattern: &Regex, text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for m in pattern.find_iter(text) {
        result.push_str(&text[last..m.start()]);
        last = m.end();
    }
    result.push_str(&text[last..]);
    result
}
