//! Types for the intent classifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Intent assigned when no rule matches.
pub const UNKNOWN_INTENT: &str = "unknown";

// ============================================================================
// Response Template
// ============================================================================

/// Canned reply attached to a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTemplate {
    /// Intent name reported to the caller
    pub intent: String,
    /// Fixed reply text
    pub message: String,
    /// Follow-up suggestions, in display order
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ResponseTemplate {
    pub fn new(intent: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Attach follow-up suggestions.
    pub fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self
    }
}

// ============================================================================
// Classification Result
// ============================================================================

/// Result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: String,
    pub message: String,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Id of the rule that fired, `None` when the fallback answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl ClassificationResult {
    /// Build a result from a response template.
    pub fn from_template(
        template: &ResponseTemplate,
        rule_id: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            intent: template.intent.clone(),
            message: template.message.clone(),
            suggestions: template.suggestions.clone(),
            timestamp,
            rule_id: rule_id.map(str::to_string),
        }
    }

    /// Whether the fallback produced this result.
    pub fn is_fallback(&self) -> bool {
        self.rule_id.is_none()
    }
}

// ============================================================================
// Ruleset Selection
// ============================================================================

/// Built-in rule tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesetKind {
    /// Order status, shipping, returns
    #[default]
    Orders,
    /// Certification guidance
    Certifications,
}

impl RulesetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Certifications => "certifications",
        }
    }
}

impl fmt::Display for RulesetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RulesetKind {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "orders" | "order_support" => Ok(Self::Orders),
            "certifications" | "certification_guidance" => Ok(Self::Certifications),
            other => Err(ClassifierError::UnknownRuleset(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ruleset_parse() {
        assert_eq!("orders".parse::<RulesetKind>().unwrap(), RulesetKind::Orders);
        assert_eq!(
            " Certifications ".parse::<RulesetKind>().unwrap(),
            RulesetKind::Certifications
        );
        assert!("weather".parse::<RulesetKind>().is_err());
    }

    #[test]
    fn test_result_from_template() {
        let template = ResponseTemplate::new("greeting", "Hi there").with_suggestions(&["Help"]);
        let now = Utc::now();
        let result = ClassificationResult::from_template(&template, Some("greeting"), now);

        assert_eq!(result.intent, "greeting");
        assert_eq!(result.suggestions, vec!["Help".to_string()]);
        assert!(!result.is_fallback());
    }
}
