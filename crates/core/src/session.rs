//! A loaded video's detection corpus plus its matching threshold.
//!
//! The session is passed explicitly to whatever evaluates queries. It is
//! never mutated in place: a new upload builds a new [`Session`].

use crate::detection::{detection_count, validate_frames, FrameRecord};
use crate::error::CoreError;
use crate::intent::QueryIntent;
use crate::matching::{evaluate, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::summary::{assemble, FrameMatch};

#[derive(Debug, Clone)]
pub struct Session {
    frames: Vec<FrameRecord>,
    confidence_threshold: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::empty(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl Session {
    /// A session with no video loaded.
    pub fn empty(confidence_threshold: f64) -> Self {
        Self {
            frames: Vec::new(),
            confidence_threshold,
        }
    }

    /// Build a session from a detector corpus, validating it first.
    pub fn load(frames: Vec<FrameRecord>, confidence_threshold: f64) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(CoreError::Validation(format!(
                "Confidence threshold must be within [0, 1], got {confidence_threshold}"
            )));
        }
        validate_frames(&frames)?;
        Ok(Self {
            frames,
            confidence_threshold,
        })
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn detection_count(&self) -> usize {
        detection_count(&self.frames)
    }

    /// Match `intent` against this session's corpus.
    pub fn find(&self, intent: &QueryIntent) -> Vec<FrameMatch> {
        assemble(evaluate(intent, &self.frames, self.confidence_threshold))
    }
}
