//! Rule table building blocks.
//!
//! A rule pairs a keyword [`Predicate`] with a [`ResponseTemplate`]. Rules
//! live in an ordered list; the first rule whose predicate holds answers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::ResponseTemplate;
use crate::error::ClassifierError;

// ============================================================================
// Predicate
// ============================================================================

/// Keyword predicate evaluated against normalized (trimmed, lower-cased) text.
///
/// Serialized externally tagged, so a rule file spells
/// `order AND (status OR #)` as:
///
/// ```toml
/// predicate = { all = [{ contains = "order" }, { any = [{ contains = "status" }, { contains = "#" }] }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Substring containment
    Contains(String),
    /// At least one child holds (false when empty)
    Any(Vec<Predicate>),
    /// Every child holds (true when empty)
    All(Vec<Predicate>),
    /// Child does not hold
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn contains(keyword: impl Into<String>) -> Self {
        Self::Contains(keyword.into().to_lowercase())
    }

    /// Matches when any of the keywords is contained.
    pub fn any_keyword(keywords: &[&str]) -> Self {
        Self::Any(keywords.iter().map(|k| Self::contains(*k)).collect())
    }

    /// Matches when every keyword is contained.
    pub fn all_keywords(keywords: &[&str]) -> Self {
        Self::All(keywords.iter().map(|k| Self::contains(*k)).collect())
    }

    pub fn all(children: impl IntoIterator<Item = Predicate>) -> Self {
        Self::All(children.into_iter().collect())
    }

    pub fn any(children: impl IntoIterator<Item = Predicate>) -> Self {
        Self::Any(children.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Predicate) -> Self {
        Self::Not(Box::new(child))
    }

    /// Evaluate against already-normalized text.
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Self::Contains(keyword) => normalized.contains(keyword.as_str()),
            Self::Any(children) => children.iter().any(|c| c.matches(normalized)),
            Self::All(children) => children.iter().all(|c| c.matches(normalized)),
            Self::Not(child) => !child.matches(normalized),
        }
    }

    /// Lower-case every keyword in place.
    pub(crate) fn lowercase_keywords(&mut self) {
        match self {
            Self::Contains(keyword) => *keyword = keyword.to_lowercase(),
            Self::Any(children) | Self::All(children) => {
                children.iter_mut().for_each(Predicate::lowercase_keywords)
            }
            Self::Not(child) => child.lowercase_keywords(),
        }
    }

    /// Whether any `Contains` leaf has an empty keyword.
    pub(crate) fn has_empty_keyword(&self) -> bool {
        match self {
            Self::Contains(keyword) => keyword.is_empty(),
            Self::Any(children) | Self::All(children) => {
                children.iter().any(Predicate::has_empty_keyword)
            }
            Self::Not(child) => child.has_empty_keyword(),
        }
    }

    /// Flatten the keywords referenced by this predicate, in order.
    pub fn keywords(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_keywords(&mut out);
        out
    }

    fn collect_keywords<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Contains(keyword) => out.push(keyword.as_str()),
            Self::Any(children) | Self::All(children) => {
                for child in children {
                    child.collect_keywords(out);
                }
            }
            Self::Not(child) => child.collect_keywords(out),
        }
    }
}

// ============================================================================
// Intent Rule
// ============================================================================

/// One entry of the ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    /// Unique rule id
    pub id: String,
    pub predicate: Predicate,
    pub response: ResponseTemplate,
}

impl IntentRule {
    pub fn new(id: impl Into<String>, predicate: Predicate, response: ResponseTemplate) -> Self {
        Self {
            id: id.into(),
            predicate,
            response,
        }
    }

    /// Evaluate the rule predicate against normalized text.
    pub fn matches(&self, normalized: &str) -> bool {
        self.predicate.matches(normalized)
    }
}

// ============================================================================
// Rule File
// ============================================================================

/// On-disk rule table. `rules` array order is priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFile {
    pub fallback: ResponseTemplate,
    #[serde(default)]
    pub rules: Vec<IntentRule>,
}

impl RuleFile {
    /// Load a rule table from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(ClassifierError::ReadFile)?;
        Self::from_toml(&content)
    }

    /// Parse a rule table from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ClassifierError> {
        Ok(toml::from_str(content)?)
    }
}
