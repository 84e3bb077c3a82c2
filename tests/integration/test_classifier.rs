//! Classifier behaviour through the public API.

use chrono::Utc;
use std::io::Write;

use supportbot::{classify, RuleEngine, RuleFile, UNKNOWN_INTENT};

#[test]
fn test_order_and_status_always_order_status() {
    for text in [
        "order status",
        "What's the STATUS of my Order?",
        "  statusorder  ",
        "I placed an order, status?",
    ] {
        assert_eq!(classify(text).intent, "order_status", "input: {text:?}");
    }
}

#[test]
fn test_hash_without_status_is_order_status() {
    assert_eq!(classify("order #42").intent, "order_status");
    assert_eq!(classify("details for order #42").intent, "order_status");
}

#[test]
fn test_documented_examples() {
    assert_eq!(classify("Hello, how are you?").intent, "greeting");
    assert_eq!(classify("").intent, UNKNOWN_INTENT);
    assert_eq!(
        classify("I want a refund for order #12345").intent,
        "order_status"
    );
}

#[test]
fn test_case_insensitive_help() {
    let engine = RuleEngine::order_support();
    let ts = Utc::now();
    let a = engine.classify_at("HELP", ts);
    let b = engine.classify_at("help", ts);
    let c = engine.classify_at("Help me", ts);
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(a.intent, "help");
}

#[test]
fn test_idempotent() {
    let engine = RuleEngine::order_support();
    let ts = Utc::now();
    for text in ["track my parcel", "zzz", "hey", "return policy"] {
        assert_eq!(engine.classify_at(text, ts), engine.classify_at(text, ts));
        assert_eq!(classify(text).intent, classify(text).intent);
    }
}

#[test]
fn test_shipped_rule_file_matches_builtin() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/rules/order_support.toml");
    let from_file = RuleEngine::from_file(path).unwrap();
    let builtin = RuleEngine::order_support();

    assert_eq!(from_file.intents(), builtin.intents());

    let ts = Utc::now();
    for text in [
        "",
        "Where is my order #7?",
        "order details please",
        "When is the delivery?",
        "refund",
        "hey there",
        "What can you do",
        "the weather is nice",
        "I want a refund for order #12345",
    ] {
        assert_eq!(
            from_file.classify_at(text, ts),
            builtin.classify_at(text, ts),
            "input: {text:?}"
        );
    }
}

#[test]
fn test_custom_rule_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[fallback]
intent = "unknown"
message = "No idea."

[[rules]]
id = "cancel"
predicate = {{ all = [{{ contains = "cancel" }}, {{ not = {{ contains = "don't" }} }}] }}

[rules.response]
intent = "cancel_order"
message = "Cancelling."
"#
    )
    .unwrap();

    let engine = RuleEngine::from_file(file.path()).unwrap();
    assert_eq!(engine.classify("Please CANCEL it").intent, "cancel_order");
    assert_eq!(engine.classify("don't cancel").intent, "unknown");
    assert_eq!(engine.classify("Please cancel").rule_id.as_deref(), Some("cancel"));
}

#[test]
fn test_duplicate_ids_in_file_rejected() {
    let toml = r#"
[fallback]
intent = "unknown"
message = "?"

[[rules]]
id = "a"
predicate = { contains = "x" }
[rules.response]
intent = "a"
message = "A"

[[rules]]
id = "a"
predicate = { contains = "y" }
[rules.response]
intent = "a"
message = "A again"
"#;
    let file = RuleFile::from_toml(toml).unwrap();
    assert!(RuleEngine::from_rule_file(file).is_err());
}
