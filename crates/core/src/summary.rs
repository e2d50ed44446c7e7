//! Result assembly: [`FrameMatch`] records and the summary sentence.
//!
//! Pure formatting. Nothing here filters or reorders matches.

use serde::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::intent::{MatchMode, QueryIntent};
use crate::matching::FrameHit;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Reply when a query yields no keywords at all.
pub const UNCLEAR_QUERY_MESSAGE: &str =
    "I'm not sure what to look for. Could you be more specific about the objects or colors?";

/// Notice emitted when the intent service failed and keywords were used instead.
pub const FALLBACK_NOTICE: &str =
    "I had trouble interpreting that request, so I'm falling back to keyword search.";

// ---------------------------------------------------------------------------
// FrameMatch
// ---------------------------------------------------------------------------

/// A frame returned to the caller together with the detections that matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMatch {
    pub frame_index: u64,
    pub timestamp: f64,
    /// `M:SS`, e.g. `"2:05"`.
    pub timestamp_formatted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub objects: Vec<Detection>,
}

/// Format seconds as `M:SS` (minutes unpadded, seconds zero-padded, floored).
///
/// Negative or non-finite input formats as `0:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{secs:02}")
}

/// Convert evaluator hits into owned [`FrameMatch`] records, order preserved.
pub fn assemble(hits: Vec<FrameHit<'_>>) -> Vec<FrameMatch> {
    hits.into_iter()
        .map(|hit| FrameMatch {
            frame_index: hit.frame.frame_index,
            timestamp: hit.frame.timestamp,
            timestamp_formatted: format_timestamp(hit.frame.timestamp),
            image: hit.frame.image.clone(),
            objects: hit.objects.into_iter().cloned().collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary sentence
// ---------------------------------------------------------------------------

/// Describe a match set in one sentence.
pub fn summarize(matches: &[FrameMatch], intent: &QueryIntent) -> String {
    let mode = intent.mode();

    if matches.is_empty() {
        return match mode {
            MatchMode::Conjunctive => format!(
                "I couldn't find any frames with {}.",
                quoted_pairs(intent)
            ),
            MatchMode::Disjunctive => {
                let terms: Vec<&str> = intent
                    .targets
                    .iter()
                    .chain(intent.colors.iter())
                    .map(String::as_str)
                    .collect();
                if terms.is_empty() {
                    UNCLEAR_QUERY_MESSAGE.to_string()
                } else {
                    format!("I couldn't find any frames matching: {}.", terms.join(", "))
                }
            }
        };
    }

    let count = matches.len();
    let (noun, verb) = if count == 1 {
        ("frame", "is")
    } else {
        ("frames", "are")
    };

    match mode {
        MatchMode::Conjunctive => format!(
            "Found {count} {noun} where {} {verb} visible.",
            quoted_pairs(intent)
        ),
        MatchMode::Disjunctive => {
            let labels = distinct(
                matches
                    .iter()
                    .flat_map(|m| &m.objects)
                    .map(|d| d.label.to_lowercase()),
            );
            let colors = distinct(
                matches
                    .iter()
                    .flat_map(|m| &m.objects)
                    .filter_map(Detection::normalized_color),
            );

            let mut sentence = format!(
                "Found {count} {noun} where {} {verb} visible",
                labels.join(", ")
            );
            if !colors.is_empty() {
                sentence.push_str(&format!(" (colors: {})", colors.join(", ")));
            }
            sentence.push('.');
            sentence
        }
    }
}

fn quoted_pairs(intent: &QueryIntent) -> String {
    intent
        .pairs
        .iter()
        .map(|p| format!("\"{}\"", p.describe()))
        .collect::<Vec<_>>()
        .join(" and ")
}

/// De-duplicate while keeping first-seen order.
fn distinct(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
