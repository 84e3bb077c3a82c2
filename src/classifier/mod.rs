//! Intent classification and response dispatch.
//!
//! This module provides:
//! - Keyword predicates and ordered intent rules
//! - A first-match-wins rule engine with a fallback answer
//! - Built-in order-support and certification-guidance rule tables
//! - TOML rule files for custom tables

pub mod catalog;
pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{classify, normalize, RuleEngine};
pub use rules::{IntentRule, Predicate, RuleFile};
pub use types::{ClassificationResult, ResponseTemplate, RulesetKind, UNKNOWN_INTENT};
