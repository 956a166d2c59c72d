//! Orchestration root: one board, one sequencer, one renderer.
//!
//! The browser glue owns a single `Trainer` and forwards editor input, the
//! play button and interval ticks to it. Everything here runs natively as
//! well, with a [`crate::timer::ManualClock`] standing in for the browser's.

use tracing::{info, warn};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::grid::Board;
use crate::layout::{LayoutRenderer, Surface, Viewport};
use crate::plan::Plan;
use crate::sequencer::{SequencerEvent, StepSequencer};
use crate::timer::{Clock, TimeBreakdown};

pub struct Trainer<C: Clock> {
    board: Board,
    grid_text: String,
    plan_name: Option<String>,
    sequencer: StepSequencer<C>,
    renderer: LayoutRenderer,
}

impl<C: Clock> Trainer<C> {
    pub fn new(clock: C, config: RenderConfig) -> Self {
        Self {
            board: Board::default(),
            grid_text: String::new(),
            plan_name: None,
            sequencer: StepSequencer::new(clock),
            renderer: LayoutRenderer::new(config),
        }
    }

    /// Replace the board from editor text. The running plan keeps going; its
    /// holds are matched against the new board from the next step on.
    pub fn set_grid_text(&mut self, text: &str) {
        self.board = Board::parse(text);
        self.grid_text = text.to_string();
        self.renderer.config_mut().fit_padding_to(self.board.size());
        self.sequencer.set_board_size(self.board.size());
    }

    /// Install a plan: its board replaces the current one and playback resets
    /// to the first step.
    pub fn load_plan(&mut self, plan: &Plan) {
        self.set_grid_text(&plan.hangboard);
        if let Err(err) = plan.validate(self.board.size()) {
            warn!(plan = %plan.name, "{err}");
        }
        self.sequencer.load_plan(plan);
        self.plan_name = Some(plan.name.clone());
        info!(plan = %plan.name, holds = self.board.size(), "trainer ready");
    }

    pub fn load_plan_json(&mut self, json: &str) -> Result<()> {
        let plan = Plan::from_json(json)?;
        self.load_plan(&plan);
        Ok(())
    }

    /// Play/pause button.
    pub fn toggle(&mut self) -> SequencerEvent {
        self.sequencer.start()
    }

    /// One tick of the host loop. `Some` means the active holds changed.
    pub fn tick(&mut self) -> Option<SequencerEvent> {
        self.sequencer.tick()
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, viewport: Viewport) {
        self.renderer
            .draw(surface, &self.board, self.sequencer.active_set(), viewport);
    }

    /// Countdown text for the running (or paused) step.
    pub fn timer_text(&self) -> String {
        TimeBreakdown::from_remaining(self.sequencer.remaining_ms()).to_string()
    }

    pub fn step_list(&self) -> String {
        self.sequencer.step_list()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid_text(&self) -> &str {
        &self.grid_text
    }

    pub fn plan_name(&self) -> Option<&str> {
        self.plan_name.as_deref()
    }

    pub fn sequencer(&self) -> &StepSequencer<C> {
        &self.sequencer
    }

    pub fn render_config(&self) -> &RenderConfig {
        self.renderer.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CellStyle;
    use crate::layout::tests::{Op, RecordingSurface};
    use crate::timer::ManualClock;

    const PLAN: &str = r#"{
        "name": "Mini",
        "hangboard": "vv vv\n= =",
        "steps": [
            { "type": "set", "name": "Edges", "quantity": 1, "reps": 2,
              "holds": [2, 3], "duration": 5, "rep_rest": 2, "set_rest": 60 }
        ]
    }"#;

    fn trainer() -> (ManualClock, Trainer<ManualClock>) {
        let clock = ManualClock::new(0.0);
        let mut trainer = Trainer::new(clock.clone(), RenderConfig::default());
        trainer.load_plan_json(PLAN).unwrap();
        (clock, trainer)
    }

    fn active_styles(trainer: &Trainer<ManualClock>) -> Vec<CellStyle> {
        let mut surface = RecordingSurface::default();
        trainer.draw(&mut surface, Viewport::new(400.0, 200.0));
        surface
            .ops
            .into_iter()
            .filter_map(|op| match op {
                Op::Rect(_, _, style) => Some(style),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn loading_a_plan_sets_board_and_padding() {
        let (_clock, trainer) = trainer();
        assert_eq!(trainer.board().size(), 4);
        assert_eq!(trainer.render_config().padding_ratio, 0.05);
        assert_eq!(trainer.sequencer().steps().len(), 3);
        assert_eq!(trainer.plan_name(), Some("Mini"));
        assert_eq!(trainer.timer_text(), "00:00:00:000");
    }

    #[test]
    fn playing_highlights_holds_and_counts_down() {
        let (clock, mut trainer) = trainer();
        assert_eq!(trainer.toggle(), SequencerEvent::Entered { index: 0 });
        assert_eq!(
            active_styles(&trainer),
            [CellStyle::Idle, CellStyle::Idle, CellStyle::Active, CellStyle::Active]
        );
        clock.advance(1500.0);
        assert_eq!(trainer.tick(), None);
        assert_eq!(trainer.timer_text(), "00:00:03:500");

        clock.advance(3500.0);
        assert_eq!(trainer.tick(), Some(SequencerEvent::Entered { index: 1 }));
        assert!(active_styles(&trainer).iter().all(|s| *s == CellStyle::Idle));
        assert_eq!(trainer.step_list(), "  Rep 1 (5s)\n> Rest (2s)\n  Rep 2 (5s)\n");
    }

    #[test]
    fn editing_the_grid_rescales_padding() {
        let (_clock, mut trainer) = trainer();
        trainer.set_grid_text("a b c d e f g h");
        assert_eq!(trainer.board().size(), 8);
        assert_eq!(trainer.render_config().padding_ratio, 0.025);
        assert_eq!(trainer.grid_text(), "a b c d e f g h");
    }

    #[test]
    fn bad_json_leaves_trainer_untouched() {
        let (_clock, mut trainer) = trainer();
        assert!(trainer.load_plan_json("{ not json").is_err());
        assert_eq!(trainer.plan_name(), Some("Mini"));
        assert_eq!(trainer.board().size(), 4);
    }
}
