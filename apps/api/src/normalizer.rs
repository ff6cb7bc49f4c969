//! Response Normalizer — pulls a single JSON value out of free-form model text.
//!
//! Generative models wrap structured output in prose or markdown fences even when a
//! response schema is supplied. This is a single best-effort pass: strip fences, slice
//! out the outermost structure, parse. Callers only ever see a parsed value or a
//! `NormalizeError`; none of the slicing heuristics leak past this module.

use std::ops::Range;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("The model returned an empty response")]
    EmptyResponse,

    /// `raw` is the untouched model output, kept for diagnostics.
    #[error("Model output could not be parsed as JSON: {reason}")]
    MalformedJson { raw: String, reason: String },
}

/// Outcome of scanning the cleaned text for JSON delimiters.
#[derive(Debug, PartialEq)]
enum Structure {
    /// Byte range of the selected `{...}` or `[...]` slice.
    Slice(Range<usize>),
    /// No delimiters at all; the text may still be a bare scalar.
    Bare,
    /// Delimiters present but no usable open/close pair.
    Unbalanced,
}

/// Extracts a JSON value from model output.
///
/// `None`, empty and whitespace-only input fail with `EmptyResponse`. Everything else
/// either parses or fails with `MalformedJson` carrying the original text.
pub fn sanitize_json(text: Option<&str>) -> Result<Value, NormalizeError> {
    let raw = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            error!("Model returned empty or missing content");
            return Err(NormalizeError::EmptyResponse);
        }
    };

    let cleaned = strip_code_fences(raw);

    let candidate = match locate_structure(&cleaned) {
        Structure::Slice(range) => &cleaned[range],
        Structure::Bare => cleaned.as_str(),
        Structure::Unbalanced => return Err(malformed(raw, "no JSON structure found")),
    };

    serde_json::from_str(candidate).map_err(|e| malformed(raw, &e.to_string()))
}

/// Like [`sanitize_json`], then deserializes into `T`.
/// A value that parses but does not fit `T` is reported as `MalformedJson` too.
pub fn normalize_as<T: DeserializeOwned>(text: Option<&str>) -> Result<T, NormalizeError> {
    let value = sanitize_json(text)?;
    serde_json::from_value(value).map_err(|e| {
        malformed(
            text.unwrap_or_default(),
            &format!("unexpected shape: {e}"),
        )
    })
}

fn malformed(raw: &str, reason: &str) -> NormalizeError {
    error!(raw_content = %raw, reason, "AI parsing error");
    NormalizeError::MalformedJson {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Removes ```json and ``` markers wherever they appear, then trims.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Picks the outer structure: whichever of the brace pair and bracket pair starts first.
fn locate_structure(text: &str) -> Structure {
    let object = delimited(text, '{', '}');
    let array = delimited(text, '[', ']');

    match (object, array) {
        (Some(object), Some(array)) if array.start < object.start => Structure::Slice(array),
        (Some(object), _) => Structure::Slice(object),
        (None, Some(array)) => Structure::Slice(array),
        (None, None) if text.contains(&['{', '}', '[', ']'][..]) => Structure::Unbalanced,
        (None, None) => Structure::Bare,
    }
}

/// First `open` through last `close`, inclusive.
fn delimited(text: &str, open: char, close: char) -> Option<Range<usize>> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| start..end + close.len_utf8())
}
