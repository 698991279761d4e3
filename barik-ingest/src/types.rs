use serde::{Deserialize, Serialize};

/// One positioned glyph run as returned by the page-text provider.
///
/// `y` grows upwards (PDF user space), so the top of the page has the
/// largest `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Fragments sharing one baseline, ordered left to right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub fragments: Vec<TextFragment>,
}

impl Row {
    /// Fragment texts joined with single spaces, trimmed.
    pub fn line(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}
