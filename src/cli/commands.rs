//! CLI command handlers.

use anyhow::{Context, Result};
use supportbot::{auth, normalize, Config, RuleEngine, RulesetKind};

use super::output::{self, ClassifyOutput, Explanation};

/// Choose the rule engine for an offline command.
///
/// A rule file argument wins over a ruleset argument, which wins over the
/// configured classifier.
pub fn select_engine(
    config: &Config,
    ruleset: Option<RulesetKind>,
    rules_file: Option<String>,
) -> Result<RuleEngine> {
    if let Some(path) = rules_file {
        return RuleEngine::from_file(&path)
            .with_context(|| format!("failed to load rule file {}", path));
    }
    if let Some(kind) = ruleset {
        return Ok(RuleEngine::from_ruleset(kind));
    }
    Ok(supportbot::build_engine(&config.classifier)?)
}

/// Run the classify command.
pub fn run_classify(engine: &RuleEngine, text: &str, explain: bool, json_output: bool) -> Result<()> {
    let result = engine.classify(text);
    let explanation = explain.then(|| Explanation::new(normalize(text), engine.matched_rule(text)));

    output::print_classification(
        &ClassifyOutput {
            result: &result,
            explanation,
        },
        json_output,
    )
}

/// Run the rules command.
pub fn run_rules(engine: &RuleEngine, json_output: bool) -> Result<()> {
    output::print_rules(engine, json_output)
}

/// Run the hash-password command.
pub fn run_hash_password(config: &Config, password: &str) -> Result<()> {
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }
    let hash = auth::password::hash_password_with_cost(password, config.auth.password_cost)?;
    println!("{}", hash);
    Ok(())
}
