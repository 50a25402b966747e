use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{FrameDuration, LoopCount, Rgb8},
        error::{SeqgifError, SeqgifResult},
    },
    overlay::render::IndicatorStyle,
};

/// What to do with an input that passed the readability check but fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeFailurePolicy {
    /// Drop the frame and keep going.
    #[default]
    Skip,
    /// Fail the whole sequence.
    Abort,
}

/// A per-image duration as submitted: a number, or the text of a form field.
///
/// Any other JSON value is kept as-is so a bad entry only loses its own duration instead of
/// rejecting the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Millis(u32),
    Text(String),
    Other(serde_json::Value),
}

impl DurationField {
    /// Milliseconds, if the entry is a usable duration.
    ///
    /// Fractional values round to the nearest millisecond. Negative, non-finite and
    /// non-numeric entries give `None`.
    pub fn millis(&self) -> Option<u32> {
        match self {
            Self::Millis(ms) => Some(*ms),
            Self::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(round_millis))
            }
            Self::Other(value) => value.as_f64().and_then(round_millis),
        }
    }
}

fn round_millis(ms: f64) -> Option<u32> {
    let ms = ms.round();
    (ms.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&ms)).then_some(ms as u32)
}

impl From<u32> for DurationField {
    fn from(ms: u32) -> Self {
        Self::Millis(ms)
    }
}

impl From<String> for DurationField {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Parallel arrays of image paths and durations plus sequence options.
///
/// `image_path[i]` pairs with `duration[i]`. Field names match the upload form fields so
/// a submitted form serializes straight into this struct.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceRequest {
    pub image_path: Vec<PathBuf>,
    pub duration: Vec<DurationField>,
    /// Draw the sequence indicator on every frame.
    pub add_indicator: bool,
    /// `0` loops forever.
    pub loop_count: u16,
    pub on_decode_failure: DecodeFailurePolicy,
    /// Transparent pixels are flattened over this color.
    pub background: Option<Rgb8>,
    pub indicator_style: IndicatorStyle,
}

/// An input that survived filtering, with its position in the submitted arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidInput {
    pub index: usize,
    pub path: PathBuf,
    pub duration: FrameDuration,
}

impl SequenceRequest {
    pub fn from_json_str(s: &str) -> SeqgifResult<Self> {
        serde_json::from_str(s).map_err(|e| SeqgifError::serde(format!("parse request: {e}")))
    }

    pub fn from_json_file(path: &Path) -> SeqgifResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read request '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn loop_count(&self) -> LoopCount {
        LoopCount::from_wire(self.loop_count)
    }

    pub fn background(&self) -> Rgb8 {
        self.background.unwrap_or(Rgb8::WHITE)
    }

    /// Duration paired with `image_path[index]`. Missing or unparseable entries get the
    /// default duration.
    pub fn duration_at(&self, index: usize) -> FrameDuration {
        self.duration
            .get(index)
            .and_then(DurationField::millis)
            .map(FrameDuration::from_millis)
            .unwrap_or_default()
    }

    /// Keep the readable paths, each with the duration at the same index.
    pub fn validate(&self) -> SeqgifResult<Vec<ValidInput>> {
        if self.image_path.is_empty() {
            return Err(SeqgifError::validation("No images specified!"));
        }

        let mut out = Vec::with_capacity(self.image_path.len());
        for (index, path) in self.image_path.iter().enumerate() {
            if !is_readable(path) {
                tracing::warn!(index, path = %path.display(), "dropping unreadable image path");
                continue;
            }
            out.push(ValidInput {
                index,
                path: path.clone(),
                duration: self.duration_at(index),
            });
        }

        if out.is_empty() {
            return Err(SeqgifError::validation("No valid images specified!"));
        }
        Ok(out)
    }
}

fn is_readable(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_file() && std::fs::File::open(path).is_ok()
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/request.rs"]
mod tests;
