//! Output formatting for CLI commands.
//!
//! This module handles formatting output as either JSON or human-readable text.

use anyhow::Result;
use serde::Serialize;
use supportbot::{ClassificationResult, IntentRule, RuleEngine};

/// Classification output with optional explanation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyOutput<'a> {
    #[serde(flatten)]
    pub result: &'a ClassificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

/// Why a result was chosen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub normalized: String,
    pub priority: Option<usize>,
    pub rule_id: Option<String>,
    pub keywords: Vec<String>,
}

impl Explanation {
    pub fn new(normalized: String, matched: Option<(usize, &IntentRule)>) -> Self {
        match matched {
            Some((priority, rule)) => Self {
                normalized,
                priority: Some(priority),
                rule_id: Some(rule.id.clone()),
                keywords: rule
                    .predicate
                    .keywords()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
            None => Self {
                normalized,
                priority: None,
                rule_id: None,
                keywords: Vec::new(),
            },
        }
    }
}

/// Print a classification result.
pub fn print_classification(output: &ClassifyOutput<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
        return Ok(());
    }

    let result = output.result;
    println!("Intent: {}", result.intent);
    println!("{}", result.message);
    if !result.suggestions.is_empty() {
        println!("\nSuggestions:");
        for s in &result.suggestions {
            println!("  - {}", s);
        }
    }

    if let Some(explanation) = &output.explanation {
        println!("\nNormalized: \"{}\"", explanation.normalized);
        match (&explanation.rule_id, explanation.priority) {
            (Some(id), Some(priority)) => {
                println!("Matched rule #{} ({})", priority + 1, id);
                println!("Rule keywords: {}", explanation.keywords.join(", "));
            }
            _ => println!("No rule matched; fallback answer used"),
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct RuleRow<'a> {
    priority: usize,
    id: &'a str,
    intent: &'a str,
    keywords: Vec<&'a str>,
}

/// Print the rule table in priority order.
pub fn print_rules(engine: &RuleEngine, json: bool) -> Result<()> {
    let rows: Vec<RuleRow<'_>> = engine
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| RuleRow {
            priority: i + 1,
            id: &rule.id,
            intent: &rule.response.intent,
            keywords: rule.predicate.keywords(),
        })
        .collect();

    if json {
        let value = serde_json::json!({
            "rules": rows,
            "fallback": engine.fallback().intent,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} rules (first match wins)\n", rows.len());
    for row in &rows {
        println!("{:>2}. {:<30} {}", row.priority, row.id, row.keywords.join(", "));
    }
    println!("\nFallback intent: {}", engine.fallback().intent);
    Ok(())
}
