//! Predicate evaluation of a [`QueryIntent`] against a detection corpus.
//!
//! Two mutually exclusive modes:
//!
//! - **Conjunctive** (`pairs` non-empty): a frame is kept when every pair has
//!   at least one qualifying detection. Pairs are checked independently, so
//!   different pairs may be satisfied by different detections. The reported
//!   objects are every qualifying detection that satisfies *any* pair.
//! - **Disjunctive** (`pairs` empty): a detection matches when it hits any
//!   target (or targets are empty) and any color (or colors are empty). With
//!   neither targets nor colors nothing matches.
//!
//! Detections below the confidence threshold never take part. Output keeps
//! corpus order and per-frame object order.

use crate::detection::{Detection, FrameRecord};
use crate::intent::{MatchMode, ObjectColorPair, QueryIntent};
use crate::summary::{assemble, FrameMatch};

/// Minimum detection confidence for a detection to be matchable.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// A retained frame with the subset of its detections that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameHit<'a> {
    pub frame: &'a FrameRecord,
    pub objects: Vec<&'a Detection>,
}

/// Evaluate `intent` over `frames`, keeping only frames with matches.
pub fn evaluate<'a>(
    intent: &QueryIntent,
    frames: &'a [FrameRecord],
    threshold: f64,
) -> Vec<FrameHit<'a>> {
    match intent.mode() {
        MatchMode::Conjunctive => frames
            .iter()
            .filter_map(|frame| match_pairs(&intent.pairs, frame, threshold))
            .collect(),
        MatchMode::Disjunctive => {
            if intent.targets.is_empty() && intent.colors.is_empty() {
                return Vec::new();
            }
            frames
                .iter()
                .filter_map(|frame| match_keywords(intent, frame, threshold))
                .collect()
        }
    }
}

/// Evaluate and assemble in one step using the default threshold.
pub fn match_frames(intent: &QueryIntent, frames: &[FrameRecord]) -> Vec<FrameMatch> {
    assemble(evaluate(intent, frames, DEFAULT_CONFIDENCE_THRESHOLD))
}

fn qualifies(detection: &Detection, threshold: f64) -> bool {
    detection.confidence >= threshold
}

fn satisfies_pair(detection: &Detection, pair: &ObjectColorPair) -> bool {
    detection.label_contains(&pair.object) && detection.has_color(&pair.color)
}

fn match_pairs<'a>(
    pairs: &[ObjectColorPair],
    frame: &'a FrameRecord,
    threshold: f64,
) -> Option<FrameHit<'a>> {
    let qualifying: Vec<&Detection> = frame
        .objects
        .iter()
        .filter(|d| qualifies(d, threshold))
        .collect();

    let all_satisfied = pairs
        .iter()
        .all(|pair| qualifying.iter().any(|d| satisfies_pair(d, pair)));
    if !all_satisfied {
        return None;
    }

    let objects: Vec<&Detection> = qualifying
        .into_iter()
        .filter(|d| pairs.iter().any(|pair| satisfies_pair(d, pair)))
        .collect();

    Some(FrameHit { frame, objects })
}

fn match_keywords<'a>(
    intent: &QueryIntent,
    frame: &'a FrameRecord,
    threshold: f64,
) -> Option<FrameHit<'a>> {
    let objects: Vec<&Detection> = frame
        .objects
        .iter()
        .filter(|d| qualifies(d, threshold))
        .filter(|d| {
            let target_ok =
                intent.targets.is_empty() || intent.targets.iter().any(|t| d.label_contains(t));
            let color_ok =
                intent.colors.is_empty() || intent.colors.iter().any(|c| d.has_color(c));
            target_ok && color_ok
        })
        .collect();

    if objects.is_empty() {
        None
    } else {
        Some(FrameHit { frame, objects })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
