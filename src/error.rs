//! Error types for plan loading and browser wiring

use thiserror::Error;

/// Trainer error type
#[derive(Error, Debug)]
pub enum Error {
    /// Plan JSON could not be decoded
    #[error("Invalid plan: {0}")]
    PlanDecode(#[from] serde_json::Error),

    /// A step references a hold the board does not have
    #[error("Step {step:?} uses hold {index} but the board has {board_size} holds")]
    HoldOutOfRange {
        step: String,
        index: usize,
        board_size: usize,
    },

    /// Missing or mistyped DOM element, or a failed browser call
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type for trainer operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
