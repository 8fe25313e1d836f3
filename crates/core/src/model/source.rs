//! Raw question source format.
//!
//! One source file is `{ "questions": [ ... ] }` where every field of a
//! record may be missing or malformed; loading never fails on a bad record,
//! normalization happens in the pool builder.

use serde::Deserialize;

/// One static source file worth of raw question records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFile {
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}

/// A raw question record as authored, before id synthesis and normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    /// Authoring hint (`"radio"` or `"check"`); the engine infers the real
    /// answer mode from the correct-option count instead.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub options: Vec<RawOption>,
}

/// A raw option record; the display text may live under `text`, `label` or
/// `value` depending on the source's vintage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOption {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "isCorrect")]
    pub is_correct: bool,
}

impl RawOption {
    /// Display text with the `text` -> `label` -> `value` fallback chain,
    /// defaulting to the empty string.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.text
            .as_deref()
            .or(self.label.as_deref())
            .or(self.value.as_deref())
            .unwrap_or("")
    }
}
