//! Hangboard Trainer core crate.
//!
//! A hangboard is described as a few lines of text, one token per hold. The
//! crate parses that into a board of normalized cells, expands a workout plan
//! (rests, sets of timed reps) into a flat list of steps, and plays the steps
//! back against a countdown while highlighting the holds in use. The browser
//! front end lives in [`web`]; everything else runs natively too.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod logging;
pub mod plan;
pub mod sequencer;
pub mod timer;
pub mod trainer;
pub mod web;

pub use config::RenderConfig;
pub use error::{Error, Result};
pub use grid::{Board, Cell};
pub use layout::{LayoutRenderer, Surface, Viewport};
pub use plan::{ExpandedStep, Plan, PlanStep};
pub use sequencer::{ActiveSet, SequencerEvent, StepSequencer};
pub use timer::{Clock, CountdownTimer, ManualClock, Tick, TimeBreakdown};
pub use trainer::Trainer;
pub use web::{load_plan_json, set_board_image, start_trainer, toggle_playback};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init("info");
}
