//! Structured query intent and normalization of raw intent suggestions.
//!
//! An intent service answers with loosely-typed JSON shaped like
//! `{"targets": [...], "colors": [...], "pairs": [{"object": .., "color": ..}]}`.
//! [`normalize_suggestion`] turns that into a [`QueryIntent`], tolerating
//! missing fields and non-string entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::keywords::{extract_keywords, is_stopword};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An object keyword that must appear with a specific color, e.g. "red car".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectColorPair {
    pub object: String,
    pub color: String,
}

impl ObjectColorPair {
    pub fn new(object: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            color: color.into(),
        }
    }

    /// Human-readable form, color first: `"red car"`.
    pub fn describe(&self) -> String {
        format!("{} {}", self.color, self.object)
    }
}

/// Which matching algorithm an intent selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every pair must be satisfied within a frame.
    Conjunctive,
    /// Any target and any color, each optional, on a single detection.
    Disjunctive,
}

/// The structured form of one user query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryIntent {
    #[serde(default)]
    pub targets: BTreeSet<String>,
    #[serde(default)]
    pub colors: BTreeSet<String>,
    #[serde(default)]
    pub pairs: Vec<ObjectColorPair>,
}

impl QueryIntent {
    /// Keyword-only intent, as produced by the fallback path.
    pub fn from_keywords(targets: BTreeSet<String>) -> Self {
        Self {
            targets,
            ..Self::default()
        }
    }

    /// Fallback interpretation of raw text.
    pub fn from_text(text: &str) -> Self {
        Self::from_keywords(extract_keywords(text))
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.insert(target.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.insert(color.into());
        self
    }

    pub fn with_pair(mut self, object: impl Into<String>, color: impl Into<String>) -> Self {
        self.pairs.push(ObjectColorPair::new(object, color));
        self
    }

    /// True when there is nothing to search for.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty() && self.colors.is_empty() && self.pairs.is_empty()
    }

    /// Non-empty `pairs` select conjunctive mode and override targets/colors.
    pub fn mode(&self) -> MatchMode {
        if self.pairs.is_empty() {
            MatchMode::Disjunctive
        } else {
            MatchMode::Conjunctive
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Trim and lowercase a JSON value; non-strings become the empty string.
fn normalize_term(value: &Value) -> String {
    value.as_str().unwrap_or("").trim().to_lowercase()
}

fn string_array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Normalize a raw intent-service response.
///
/// - Targets and colors are trimmed, lowercased, de-duplicated, and empty
///   entries dropped. Stopwords are removed from targets only.
/// - Each pair needs a non-empty object and color; invalid entries are
///   dropped individually. Repeated pairs collapse, keeping first order.
/// - Fields that are absent or not arrays are treated as empty.
///
/// Returns [`CoreError::MalformedSuggestion`] when the response is not a JSON
/// object. An object without usable content yields an empty intent.
pub fn normalize_suggestion(value: &Value) -> Result<QueryIntent, CoreError> {
    if !value.is_object() {
        return Err(CoreError::MalformedSuggestion(format!(
            "expected a JSON object, got {}",
            json_kind(value)
        )));
    }

    let targets = string_array(value, "targets")
        .iter()
        .map(normalize_term)
        .filter(|t| !t.is_empty() && !is_stopword(t))
        .collect();

    let colors = string_array(value, "colors")
        .iter()
        .map(normalize_term)
        .filter(|c| !c.is_empty())
        .collect();

    let mut pairs: Vec<ObjectColorPair> = Vec::new();
    for entry in string_array(value, "pairs") {
        let object = entry.get("object").map(normalize_term).unwrap_or_default();
        let color = entry.get("color").map(normalize_term).unwrap_or_default();
        if object.is_empty() || color.is_empty() {
            continue;
        }
        let pair = ObjectColorPair { object, color };
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }

    Ok(QueryIntent {
        targets,
        colors,
        pairs,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
