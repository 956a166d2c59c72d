//! Render options for the board view

use serde::{Deserialize, Serialize};

/// Board rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Gap around each cell, as a fraction of the viewport size per axis
    pub padding_ratio: f64,
    /// Margin around the whole board, as a fraction of the viewport size
    pub border_ratio: f64,
    /// Cell outline colour
    pub stroke_style: String,
    /// Fill colour of engaged holds
    pub active_fill_style: String,
    /// Label colour
    pub text_style: String,
    /// Label font family
    pub font_family: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            padding_ratio: 0.02,
            border_ratio: 0.07,
            stroke_style: "#222".to_string(),
            active_fill_style: "rgba(255,160,60,0.85)".to_string(),
            text_style: "#111".to_string(),
            font_family: "Courier New".to_string(),
        }
    }
}

impl RenderConfig {
    /// Shrink cell gaps as the board gets denser: `0.2 / board_size`.
    /// An empty board keeps the current padding.
    pub fn fit_padding_to(&mut self, board_size: usize) {
        if board_size > 0 {
            self.padding_ratio = 0.2 / board_size as f64;
        }
    }

    pub fn font(&self, px: f64) -> String {
        format!("{px}px {}", self.font_family)
    }
}
