//! Rule engine: ordered first-match-wins evaluation.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use super::catalog;
use super::rules::{IntentRule, RuleFile};
use super::types::{ClassificationResult, ResponseTemplate, RulesetKind};
use crate::error::ClassifierError;

/// Normalize an utterance: trim surrounding whitespace, lower-case.
pub fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase()
}

// ============================================================================
// Rule Engine
// ============================================================================

/// Immutable, ordered rule table plus fallback answer.
///
/// Rules are checked in order against the normalized utterance and the first
/// match answers. Classification is total: when nothing matches the fallback
/// template answers.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<IntentRule>,
    fallback: ResponseTemplate,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::order_support()
    }
}

impl RuleEngine {
    /// Build an engine from an ordered rule list.
    ///
    /// Keywords are lower-cased. Fails on duplicate ids, empty intents or
    /// empty keywords.
    pub fn new(
        mut rules: Vec<IntentRule>,
        fallback: ResponseTemplate,
    ) -> Result<Self, ClassifierError> {
        if fallback.intent.trim().is_empty() {
            return Err(ClassifierError::EmptyIntent("fallback".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &mut rules {
            if !seen.insert(rule.id.clone()) {
                return Err(ClassifierError::DuplicateRule(rule.id.clone()));
            }
            if rule.response.intent.trim().is_empty() {
                return Err(ClassifierError::EmptyIntent(rule.id.clone()));
            }
            if rule.predicate.has_empty_keyword() {
                return Err(ClassifierError::EmptyKeyword(rule.id.clone()));
            }
            rule.predicate.lowercase_keywords();
        }

        Ok(Self { rules, fallback })
    }

    /// The built-in order-support engine.
    pub fn order_support() -> Self {
        Self {
            rules: catalog::order_support_rules(),
            fallback: catalog::order_support_fallback(),
        }
    }

    /// The built-in certification-guidance engine.
    pub fn certification_guidance() -> Self {
        Self {
            rules: catalog::certification_guidance_rules(),
            fallback: catalog::certification_guidance_fallback(),
        }
    }

    /// Engine for a built-in ruleset.
    pub fn from_ruleset(kind: RulesetKind) -> Self {
        match kind {
            RulesetKind::Orders => Self::order_support(),
            RulesetKind::Certifications => Self::certification_guidance(),
        }
    }

    /// Engine from a parsed rule file.
    pub fn from_rule_file(file: RuleFile) -> Result<Self, ClassifierError> {
        Self::new(file.rules, file.fallback)
    }

    /// Engine from a TOML rule file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        Self::from_rule_file(RuleFile::from_file(path)?)
    }

    /// Classify an utterance, stamping the result with the current time.
    pub fn classify(&self, utterance: &str) -> ClassificationResult {
        self.classify_at(utterance, Utc::now())
    }

    /// Classify an utterance with a caller-supplied timestamp.
    pub fn classify_at(&self, utterance: &str, timestamp: DateTime<Utc>) -> ClassificationResult {
        match self.matched_rule(utterance) {
            Some((_, rule)) => {
                ClassificationResult::from_template(&rule.response, Some(&rule.id), timestamp)
            }
            None => ClassificationResult::from_template(&self.fallback, None, timestamp),
        }
    }

    /// The winning rule and its priority index, if any rule matches.
    pub fn matched_rule(&self, utterance: &str) -> Option<(usize, &IntentRule)> {
        let normalized = normalize(utterance);
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(&normalized))
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &ResponseTemplate {
        &self.fallback
    }

    /// Every intent this engine can produce, in priority order, fallback last.
    pub fn intents(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.rules.len() + 1);
        for intent in self
            .rules
            .iter()
            .map(|r| r.response.intent.as_str())
            .chain(std::iter::once(self.fallback.intent.as_str()))
        {
            if !out.contains(&intent) {
                out.push(intent);
            }
        }
        out
    }
}

// ============================================================================
// Default Engine
// ============================================================================

static DEFAULT_ENGINE: LazyLock<RuleEngine> = LazyLock::new(RuleEngine::order_support);

/// Classify an utterance with the built-in order-support rules.
pub fn classify(utterance: &str) -> ClassificationResult {
    DEFAULT_ENGINE.classify(utterance)
}
