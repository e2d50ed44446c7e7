//! Per-frame detection records produced by the external detector.
//!
//! A corpus is an ordered `Vec<FrameRecord>`; insertion order is temporal
//! order. Records are immutable once received.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// A single detected object inside a sampled frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detector class label, e.g. `"car"` or `"traffic light"`.
    #[serde(rename = "class")]
    pub label: String,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    /// Bounding box as `[x1, y1, x2, y2]` in pixels.
    #[serde(default)]
    pub bbox: [f64; 4],
    /// Dominant color name, e.g. `"red"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Dominant color as `[r, g, b]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_rgb: Option<[u8; 3]>,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox: [0.0; 4],
            color: None,
            color_rgb: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_bbox(mut self, bbox: [f64; 4]) -> Self {
        self.bbox = bbox;
        self
    }

    /// Whether the lowercased label contains `keyword` as a substring.
    ///
    /// Plain containment, so `"cat"` also matches `"category"`.
    pub fn label_contains(&self, keyword: &str) -> bool {
        self.label
            .to_lowercase()
            .contains(&keyword.trim().to_lowercase())
    }

    /// Whether the detection's color equals `keyword` (trimmed, case-insensitive).
    ///
    /// A detection without a color never matches.
    pub fn has_color(&self, keyword: &str) -> bool {
        match &self.color {
            Some(color) => color.trim().to_lowercase() == keyword.trim().to_lowercase(),
            None => false,
        }
    }

    /// Normalized color name, if any.
    pub fn normalized_color(&self) -> Option<String> {
        self.color
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
    }
}

// ---------------------------------------------------------------------------
// FrameRecord
// ---------------------------------------------------------------------------

/// One sampled video frame and its detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame_index: u64,
    /// Seconds from the start of the video.
    pub timestamp: f64,
    /// Base64-encoded JPEG of the frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub objects: Vec<Detection>,
}

impl FrameRecord {
    pub fn new(frame_index: u64, timestamp: f64) -> Self {
        Self {
            frame_index,
            timestamp,
            image: None,
            objects: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_object(mut self, detection: Detection) -> Self {
        self.objects.push(detection);
        self
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a corpus received from the detection provider.
///
/// Timestamps must be finite and non-negative; confidences must lie in
/// `[0, 1]`.
pub fn validate_frames(frames: &[FrameRecord]) -> Result<(), CoreError> {
    for frame in frames {
        if !frame.timestamp.is_finite() || frame.timestamp < 0.0 {
            return Err(CoreError::Validation(format!(
                "Frame {} has invalid timestamp {}",
                frame.frame_index, frame.timestamp
            )));
        }
        for detection in &frame.objects {
            if !(0.0..=1.0).contains(&detection.confidence) {
                return Err(CoreError::Validation(format!(
                    "Detection '{}' in frame {} has confidence {} outside [0, 1]",
                    detection.label, frame.frame_index, detection.confidence
                )));
            }
        }
    }
    Ok(())
}

/// Total number of detections across a corpus.
pub fn detection_count(frames: &[FrameRecord]) -> usize {
    frames.iter().map(|f| f.objects.len()).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
