use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::geometry::offsets_from_rows;
use crate::model::{OffsetSample, StyleRef};

/// Produces raw pen offsets for a batch of text lines.
///
/// Implementations return one sequence per input line. Sequences may be padded
/// with `(0, 0, 0)` samples to a common length; callers strip that padding.
pub trait SequenceGenerator: Send + Sync {
    fn generate(
        &self,
        lines: &[String],
        biases: Option<&[f32]>,
        styles: Option<&[StyleRef]>,
    ) -> Result<Vec<Vec<OffsetSample>>, Error>;
}

#[derive(Deserialize)]
struct Recording {
    sequences: Vec<RecordedLine>,
}

#[derive(Deserialize)]
struct RecordedLine {
    text: String,
    offsets: Vec<Vec<f32>>,
}

/// Replays offset sequences recorded from an earlier generator run, keyed by
/// line text. Biases and styles are ignored.
#[derive(Debug)]
pub struct ReplayGenerator {
    by_text: HashMap<String, Vec<OffsetSample>>,
}

impl ReplayGenerator {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
                std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
            ),
            _ => Error::Io(e),
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let recording: Recording = serde_json::from_str(json)
            .map_err(|e| Error::Generator(format!("unreadable stroke recording: {e}")))?;
        let mut by_text = HashMap::with_capacity(recording.sequences.len());
        for line in recording.sequences {
            let offsets = offsets_from_rows(&line.offsets)?;
            by_text.insert(line.text, offsets);
        }
        log::debug!("Loaded {} recorded stroke sequences", by_text.len());
        Ok(Self { by_text })
    }

    pub fn from_sequences<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<OffsetSample>)>,
    {
        Self {
            by_text: sequences.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }
}

impl SequenceGenerator for ReplayGenerator {
    fn generate(
        &self,
        lines: &[String],
        _biases: Option<&[f32]>,
        _styles: Option<&[StyleRef]>,
    ) -> Result<Vec<Vec<OffsetSample>>, Error> {
        let mut batch = lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                if text.is_empty() {
                    return Ok(Vec::new());
                }
                self.by_text.get(text).cloned().ok_or_else(|| {
                    Error::Generator(format!("no recorded strokes for line {i}: {text:?}"))
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let longest = batch.iter().map(Vec::len).max().unwrap_or(0);
        for seq in &mut batch {
            seq.resize(longest, OffsetSample::new(0.0, 0.0, false));
        }
        Ok(batch)
    }
}
