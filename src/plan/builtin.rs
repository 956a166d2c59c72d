// Built-in plan loaded when the page opens.
// A short repeater session on a three-row board.
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::{Plan, PlanStep};

const DEFAULT_BOARD: &str = "vv vv vv\n= == == =\nooo   ooo";

fn build_default_plan() -> Plan {
    Plan {
        name: "Repeaters".to_string(),
        hangboard: DEFAULT_BOARD.to_string(),
        steps: vec![
            PlanStep::Rest {
                name: "Get ready".to_string(),
                duration: 10,
            },
            PlanStep::Set {
                name: "Jugs".to_string(),
                reps: 4,
                holds: BTreeSet::from([0, 2]),
                rep_rest: 3,
                set_rest: 60,
                duration: 7,
                quantity: 3,
            },
            PlanStep::Rest {
                name: "Switch holds".to_string(),
                duration: 120,
            },
            PlanStep::Set {
                name: "Half crimp".to_string(),
                reps: 6,
                holds: BTreeSet::from([4, 5]),
                rep_rest: 3,
                set_rest: 90,
                duration: 7,
                quantity: 2,
            },
        ],
    }
}

pub fn default_plan() -> &'static Plan {
    static PLAN: OnceLock<Plan> = OnceLock::new();
    PLAN.get_or_init(build_default_plan)
}
