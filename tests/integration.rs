// Integration tests (native) for the `hangboard-trainer` crate.
// A manual clock replaces performance.now() so whole workouts run instantly.

use hangboard_trainer::{Board, ManualClock, Plan, PlanStep, RenderConfig, SequencerEvent, Trainer};

fn run_to_end(clock: &ManualClock, trainer: &mut Trainer<ManualClock>) -> (Vec<usize>, f64) {
    let mut entered = Vec::new();
    let mut elapsed = 0.0;
    loop {
        clock.advance(5.0);
        elapsed += 5.0;
        match trainer.tick() {
            Some(SequencerEvent::Entered { index }) => entered.push(index),
            Some(SequencerEvent::Finished) => return (entered, elapsed),
            Some(other) => panic!("unexpected {other:?}"),
            None => {}
        }
        assert!(elapsed < 24.0 * 3_600_000.0, "workout never finished");
    }
}

#[test]
fn example_board_has_four_half_cells() {
    let board = Board::parse("vv vv\n= =");
    assert_eq!(board.size(), 4);
    for cell in board.cells() {
        assert!((cell.width - 0.5).abs() < 1e-12);
        assert!((cell.height - 0.5).abs() < 1e-12);
    }
}

#[test]
fn built_in_plan_plays_through_and_rewinds() {
    let clock = ManualClock::new(0.0);
    let mut trainer = Trainer::new(clock.clone(), RenderConfig::default());
    let plan = hangboard_trainer::plan::default_plan();
    trainer.load_plan(plan);

    let steps = plan.expand().len();
    assert_eq!(trainer.toggle(), SequencerEvent::Entered { index: 0 });
    let (entered, elapsed) = run_to_end(&clock, &mut trainer);

    assert_eq!(entered, (1..steps).collect::<Vec<_>>());
    let nominal = plan.total_duration() as f64 * 1000.0;
    // Coarse ticking may only make steps late, never early.
    assert!(elapsed >= nominal);
    assert!(elapsed <= nominal + 5.0 * steps as f64);

    assert_eq!(trainer.sequencer().active_step(), 0);
    assert!(!trainer.sequencer().is_playing());
    clock.advance(60_000.0);
    assert_eq!(trainer.tick(), None);
}

#[test]
fn pause_shifts_the_finish_by_the_paused_time() {
    let plan = Plan {
        name: "Single hang".into(),
        hangboard: "vv vv".into(),
        steps: vec![PlanStep::Set {
            name: "Hang".into(),
            reps: 1,
            holds: [0, 1].into_iter().collect(),
            rep_rest: 0,
            set_rest: 0,
            duration: 10,
            quantity: 1,
        }],
    };
    let clock = ManualClock::new(0.0);
    let mut trainer = Trainer::new(clock.clone(), RenderConfig::default());
    trainer.load_plan(&plan);

    trainer.toggle();
    clock.advance(3000.0);
    assert!(matches!(
        trainer.toggle(),
        SequencerEvent::Paused { index: 0, .. }
    ));
    assert_eq!(trainer.timer_text(), "00:00:07:000");

    clock.advance(45_000.0);
    assert_eq!(trainer.tick(), None);
    assert_eq!(trainer.toggle(), SequencerEvent::Entered { index: 0 });

    clock.advance(6999.0);
    assert_eq!(trainer.tick(), None);
    clock.advance(1.0);
    assert_eq!(trainer.tick(), Some(SequencerEvent::Finished));
}

#[test]
fn json_plan_drives_the_trainer() {
    let json = r#"{
        "name": "Max hangs",
        "hangboard": "o o\n== ==",
        "steps": [
            { "type": "rest", "name": "Warm up", "duration": 1 },
            { "type": "set", "name": "Edge", "quantity": 2, "reps": 1,
              "holds": [2, 3], "duration": 2, "rep_rest": 0, "set_rest": 1 }
        ]
    }"#;
    let clock = ManualClock::new(0.0);
    let mut trainer = Trainer::new(clock.clone(), RenderConfig::default());
    trainer.load_plan_json(json).unwrap();

    let names: Vec<&str> = trainer
        .sequencer()
        .steps()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, ["Warm up", "Rep 1", "Set 1 - rest", "Rep 1"]);

    trainer.toggle();
    assert!(trainer.sequencer().active_set().is_empty());
    clock.advance(1000.0);
    assert_eq!(trainer.tick(), Some(SequencerEvent::Entered { index: 1 }));
    let active: Vec<usize> = trainer.sequencer().active_set().iter().collect();
    assert_eq!(active, [2, 3]);
}
