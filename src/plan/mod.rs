//! Declarative workout plans and their expansion into timed steps.
//!
//! A plan is data (usually JSON):
//!
//! ```json
//! { "name": "Repeaters", "hangboard": "vv vv\n= =",
//!   "steps": [ { "type": "rest", "name": "Warm up", "duration": 30 },
//!              { "type": "set", "name": "Half crimp", "quantity": 3, "reps": 4,
//!                "holds": [0, 1], "duration": 7, "rep_rest": 3, "set_rest": 120 } ] }
//! ```
//!
//! The sequencer never sees the nested form; [`Plan::expand`] flattens it once
//! at load time. Durations are whole seconds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod builtin;

pub use builtin::default_plan;

/// One entry of a plan as written by the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlanStep {
    Rest {
        #[serde(default)]
        name: String,
        duration: u32,
    },
    Set {
        #[serde(default)]
        name: String,
        reps: u32,
        #[serde(default)]
        holds: BTreeSet<usize>,
        rep_rest: u32,
        set_rest: u32,
        duration: u32,
        quantity: u32,
    },
}

impl PlanStep {
    pub fn name(&self) -> &str {
        match self {
            PlanStep::Rest { name, .. } | PlanStep::Set { name, .. } => name,
        }
    }

    /// Append this step's flat expansion to `out`.
    fn expand_into(&self, out: &mut Vec<ExpandedStep>) {
        match self {
            PlanStep::Rest { name, duration } => {
                out.push(ExpandedStep::rest(name.clone(), *duration));
            }
            PlanStep::Set {
                reps,
                holds,
                rep_rest,
                set_rest,
                duration,
                quantity,
                ..
            } => {
                if *reps == 0 || *quantity == 0 {
                    return;
                }
                for set in 1..=*quantity {
                    for rep in 1..=*reps {
                        out.push(ExpandedStep {
                            name: format!("Rep {rep}"),
                            duration: *duration,
                            holds: holds.clone(),
                        });
                        if rep < *reps {
                            out.push(ExpandedStep::rest("Rest".to_string(), *rep_rest));
                        }
                    }
                    if set < *quantity {
                        out.push(ExpandedStep::rest(format!("Set {set} - rest"), *set_rest));
                    }
                }
            }
        }
    }
}

/// A single timed step the sequencer plays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpandedStep {
    pub name: String,
    /// Seconds.
    pub duration: u32,
    pub holds: BTreeSet<usize>,
}

impl ExpandedStep {
    fn rest(name: String, duration: u32) -> Self {
        Self {
            name,
            duration,
            holds: BTreeSet::new(),
        }
    }

    pub fn duration_ms(&self) -> f64 {
        f64::from(self.duration) * 1000.0
    }
}

/// Complete plan: the board it is meant for plus its steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    /// Grid description, see [`crate::grid::Board::parse`].
    pub hangboard: String,
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

impl Plan {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flatten the plan into the ordered list of timed steps.
    pub fn expand(&self) -> Vec<ExpandedStep> {
        let mut out = Vec::new();
        for step in &self.steps {
            step.expand_into(&mut out);
        }
        out
    }

    /// Reject plans whose sets reference holds past the end of a board with
    /// `board_size` cells.
    pub fn validate(&self, board_size: usize) -> Result<()> {
        for step in &self.steps {
            if let PlanStep::Set { name, holds, .. } = step {
                if let Some(&index) = holds.iter().find(|&&i| i >= board_size) {
                    return Err(Error::HoldOutOfRange {
                        step: name.clone(),
                        index,
                        board_size,
                    });
                }
            }
        }
        Ok(())
    }

    /// Total playing time of the expanded plan, in seconds.
    pub fn total_duration(&self) -> u64 {
        self.expand().iter().map(|s| u64::from(s.duration)).sum()
    }
}
