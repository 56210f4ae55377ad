#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use penline::serialize::StrokePath;
use penline::{
    Canvas, Color, Error, Jitter, OffsetSample, ReplayGenerator, RuleLine, SequenceGenerator,
    StyleRef,
};

pub const TOL: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Rule(RuleLine),
    Path(StrokePath),
}

/// Canvas that keeps every call in order.
#[derive(Default)]
pub struct RecordingCanvas {
    pub events: Vec<Event>,
}

impl RecordingCanvas {
    pub fn paths(&self) -> Vec<&StrokePath> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Path(p) => Some(p),
                Event::Rule(_) => None,
            })
            .collect()
    }

    pub fn rules(&self) -> Vec<&RuleLine> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Rule(r) => Some(r),
                Event::Path(_) => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn add_rule_line(&mut self, line: &RuleLine, _width: f32, _color: Color) -> Result<(), Error> {
        self.events.push(Event::Rule(*line));
        Ok(())
    }

    fn add_path(&mut self, path: &StrokePath) -> Result<(), Error> {
        self.events.push(Event::Path(path.clone()));
        Ok(())
    }

    fn finish(&self) -> Result<Vec<u8>, Error> {
        Ok(Vec::new())
    }
}

/// Always returns the same jitter.
pub struct FixedJitter(pub u32);

impl Jitter for FixedJitter {
    fn horizontal_mm(&mut self) -> u32 {
        self.0
    }
}

/// A wavy pen trace made of `strokes` pen-down segments of `points` samples.
pub fn wavy_offsets(strokes: usize, points: usize) -> Vec<OffsetSample> {
    let mut out = Vec::with_capacity(strokes * points);
    for s in 0..strokes {
        for p in 0..points {
            let t = (s * points + p) as f32;
            let dx = 0.8 + 0.2 * (t * 0.7).cos();
            let dy = (t * 0.9).sin() * 1.5;
            out.push(OffsetSample::new(dx, dy, p == points - 1));
        }
    }
    out
}

/// Replay generator knowing a distinct trace for each of `texts`.
pub fn replay_for(texts: &[&str]) -> ReplayGenerator {
    ReplayGenerator::from_sequences(
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), wavy_offsets(3 + i, 12))),
    )
}

/// Wraps a generator and counts how often it is invoked.
pub struct CountingGenerator<G> {
    pub inner: G,
    calls: AtomicUsize,
}

impl<G> CountingGenerator<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<G: SequenceGenerator> SequenceGenerator for CountingGenerator<G> {
    fn generate(
        &self,
        lines: &[String],
        biases: Option<&[f32]>,
        styles: Option<&[StyleRef]>,
    ) -> Result<Vec<Vec<OffsetSample>>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate(lines, biases, styles)
    }
}

/// Output directory: tests/output/<name>
pub fn output_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output");
    std::fs::create_dir_all(&dir).ok();
    dir.join(name)
}

pub fn init_logging() {
    let _ = env_logger::try_init();
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Inflated page content stream of a single-page PDF written by `PdfCanvas`.
pub fn pdf_content(bytes: &[u8]) -> String {
    let start = find(bytes, b"stream\n").expect("no content stream") + b"stream\n".len();
    let len = find(&bytes[start..], b"\nendstream").expect("unterminated content stream");
    let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&bytes[start..start + len])
        .expect("content stream is not zlib data");
    String::from_utf8(raw).expect("content stream is not text")
}

/// Numeric operands of every `op` in a content stream, in order.
pub fn pdf_operands(content: &str, op: &str) -> Vec<Vec<f32>> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| **t == op)
        .map(|(i, _)| {
            let mut operands: Vec<f32> = tokens[..i]
                .iter()
                .rev()
                .map_while(|t| t.parse::<f32>().ok())
                .collect();
            operands.reverse();
            operands
        })
        .collect()
}

pub fn pdf_op_count(content: &str, op: &str) -> usize {
    content.split_whitespace().filter(|t| *t == op).count()
}
