use serde::Serialize;

use crate::browse::{BrowseState, Preview};
use crate::color::Color;
use crate::pipeline::select::SelectError;

/// A printable summary of one preview: the background and each sample
/// line's foreground with its contrast ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewReport {
    pub category: String,
    pub palette: String,
    pub state: BrowseState,
    pub background: String,
    pub lines: Vec<LineReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReport {
    pub text: String,
    pub foreground: String,
    pub contrast: f32,
}

impl PreviewReport {
    pub fn new(state: BrowseState, preview: &Preview, text: &str) -> Result<Self, SelectError> {
        let foregrounds = preview.foregrounds.clone()?;
        let lines = (0..preview.text_count)
            .zip(foregrounds.iter().cycle())
            .map(|(_, color)| LineReport {
                text: text.to_string(),
                foreground: color.to_hex(),
                contrast: Color::contrast_ratio(color, &preview.background),
            })
            .collect();
        Ok(Self {
            category: preview.category.clone(),
            palette: preview.palette.clone(),
            state,
            background: preview.background.to_hex(),
            lines,
        })
    }

    /// Plain-text rendering, one sample line per row.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("category = {}\n", self.category));
        out.push_str(&format!("palette = {}\n", self.palette));
        out.push_str(&format!("background = {}\n", self.background));
        for (i, line) in self.lines.iter().enumerate() {
            out.push_str(&format!(
                "line {} = {} {:.2}:1 {}\n",
                i + 1,
                line.foreground,
                line.contrast,
                line.text
            ));
        }
        out
    }
}
