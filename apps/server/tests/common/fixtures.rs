//! Test fixtures and factory functions.

use std::collections::HashMap;

use serde_json::json;
use wordquiz_core::Vocabulary;

/// The two-word vocabulary used by most tests.
pub fn animals() -> Vocabulary {
    Vocabulary::from_pairs([("cat", "кот"), ("dog", "собака")])
}

/// Synonyms known to the fixed lookup.
pub fn synonyms() -> HashMap<String, Vec<String>> {
    let mut table = HashMap::new();
    table.insert(
        "собака".to_string(),
        vec!["пёс".to_string(), "псина".to_string()],
    );
    table
}

pub fn login_request(user_id: &str, password: &str) -> serde_json::Value {
    json!({ "user_id": user_id, "password": password })
}

pub fn mode_request(mode: &str) -> serde_json::Value {
    json!({ "mode": mode })
}

pub fn answer_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

/// Correct answer for a rendered `"<shown> — ?"` prompt.
pub fn answer_for(prompt: &str) -> String {
    let shown = prompt.trim_end_matches(" — ?");
    let vocabulary = animals();
    if let Some(translation) = vocabulary.get(shown) {
        return translation.to_string();
    }
    vocabulary
        .entries()
        .iter()
        .find(|e| e.translation == shown)
        .map(|e| e.term.clone())
        .unwrap_or_else(|| panic!("unknown prompt {:?}", prompt))
}
