//! Timed playback of an expanded plan.
//!
//! States: idle, playing, paused. `start` toggles between playing and paused;
//! the owner's tick loop calls [`StepSequencer::tick`], which advances to the
//! next step whenever the countdown completes. After the last step the
//! sequencer rewinds to the first step and goes idle.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use tracing::{debug, info, warn};

use crate::plan::{ExpandedStep, Plan};
use crate::timer::{Clock, CountdownTimer, Tick};

/// Holds currently engaged (highlighted) on the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSet(BTreeSet<usize>);

impl ActiveSet {
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    /// Replace the set with `holds`, dropping indices the board doesn't have.
    fn publish(&mut self, holds: &BTreeSet<usize>, board_size: usize) {
        self.0.clear();
        for &hold in holds {
            if hold < board_size {
                self.0.insert(hold);
            } else {
                warn!(hold, board_size, "ignoring hold outside the board");
            }
        }
    }
}

impl FromIterator<usize> for ActiveSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What a sequencer transition did, for the owner to redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequencerEvent {
    /// Step `index` became active and its countdown is running.
    Entered { index: usize },
    Paused { index: usize, remaining_ms: f64 },
    /// Ran past the last step; rewound to the start and stopped.
    Finished,
}

pub struct StepSequencer<C: Clock> {
    steps: Vec<ExpandedStep>,
    /// Index of the next step `play` will enter.
    active_step: usize,
    playing: bool,
    paused: bool,
    paused_remaining: f64,
    timer: CountdownTimer<C>,
    active: ActiveSet,
    board_size: usize,
}

impl<C: Clock> StepSequencer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            steps: Vec::new(),
            active_step: 0,
            playing: false,
            paused: false,
            paused_remaining: 0.0,
            timer: CountdownTimer::new(clock),
            active: ActiveSet::default(),
            board_size: 0,
        }
    }

    /// Replace the step list and reset to idle.
    pub fn load(&mut self, steps: Vec<ExpandedStep>) {
        self.timer.stop();
        self.steps = steps;
        self.active_step = 0;
        self.playing = false;
        self.paused = false;
        self.paused_remaining = 0.0;
        self.active.clear();
        info!(steps = self.steps.len(), "plan loaded");
    }

    pub fn load_plan(&mut self, plan: &Plan) {
        self.load(plan.expand());
    }

    /// Number of cells on the board that holds are published against.
    pub fn set_board_size(&mut self, board_size: usize) {
        self.board_size = board_size;
    }

    /// Play/pause toggle.
    pub fn start(&mut self) -> SequencerEvent {
        if self.playing {
            self.paused_remaining = self.timer.stop();
            self.paused = true;
            self.playing = false;
            // Re-enter the interrupted step on resume.
            self.active_step = self.active_step.saturating_sub(1);
            debug!(
                step = self.active_step,
                remaining_ms = self.paused_remaining,
                "paused"
            );
            return SequencerEvent::Paused {
                index: self.active_step,
                remaining_ms: self.paused_remaining,
            };
        }
        self.playing = true;
        self.play()
    }

    /// Enter the step at `active_step`, or rewind and stop when there is none.
    pub fn play(&mut self) -> SequencerEvent {
        let Some(step) = self.steps.get(self.active_step) else {
            self.active_step = 0;
            self.playing = false;
            self.paused = false;
            self.active.clear();
            info!("plan finished");
            return SequencerEvent::Finished;
        };
        self.active.publish(&step.holds, self.board_size);
        let duration_ms = if self.paused {
            self.paused_remaining
        } else {
            step.duration_ms()
        };
        self.timer.start(duration_ms);
        debug!(step = self.active_step, name = %step.name, duration_ms, "step entered");
        self.paused = false;
        let index = self.active_step;
        self.active_step += 1;
        SequencerEvent::Entered { index }
    }

    /// Called when the current step's countdown completes.
    pub fn advance(&mut self) -> SequencerEvent {
        self.play()
    }

    /// Drive the countdown; returns the transition when a step ends.
    pub fn tick(&mut self) -> Option<SequencerEvent> {
        match self.timer.tick() {
            Tick::Completed => Some(self.advance()),
            Tick::Idle | Tick::Running { .. } => None,
        }
    }

    pub fn steps(&self) -> &[ExpandedStep] {
        &self.steps
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    /// Index of the step whose countdown is running, if any.
    pub fn current_step(&self) -> Option<usize> {
        if self.playing {
            self.active_step.checked_sub(1)
        } else {
            None
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn active_set(&self) -> &ActiveSet {
        &self.active
    }

    /// Time left in the running step; while paused, the time captured at the
    /// pause.
    pub fn remaining_ms(&self) -> f64 {
        if self.paused {
            self.paused_remaining
        } else {
            self.timer.remaining()
        }
    }

    /// One line per step, the running step marked with `>`.
    pub fn step_list(&self) -> String {
        let current = self.current_step();
        let mut out = String::new();
        for (i, step) in self.steps.iter().enumerate() {
            let marker = if Some(i) == current { '>' } else { ' ' };
            let _ = writeln!(out, "{marker} {} ({}s)", step.name, step.duration);
        }
        out
    }
}
