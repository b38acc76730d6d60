//! End-to-end goal lifecycle tests through the public engine API.
//!
//! Each test plays the host: it commits production into a
//! [`ProductionTable`] and then advances the engine, exactly as a real
//! host does after its simulate and commit hooks.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc,
    clippy::panic
)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use goalpost_core::{
    CallbackError, ClockError, GoalCallbacks, GoalEngine, GoalError, GoalRegistry,
    GoalTemplateCatalog, NewGoal, ProductionTable, TurnClock, TurnError,
};
use goalpost_types::{GoalOutcome, GoalStatus, GoalTemplate};
use rust_decimal_macros::dec;

fn credits_goal(target: rust_decimal::Decimal, turns: i64) -> NewGoal {
    NewGoal::new("credits", target, turns, "Test goal")
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn target_exceeded_completes_on_first_turn() {
    let mut engine = GoalEngine::default();
    let goal = engine
        .create_goal(credits_goal(dec!(50), 3), GoalCallbacks::none())
        .unwrap();

    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(60));
    let summary = engine.advance(&production).unwrap();

    assert_eq!(engine.registry().active().len(), 0);
    assert_eq!(engine.registry().completed().len(), 1);
    assert_eq!(engine.registry().completed()[0].id, goal.id);
    assert_eq!(summary.transitions.len(), 1);
    assert_eq!(summary.transitions[0].outcome, GoalOutcome::Completed);
}

#[test]
fn one_turn_goal_without_production_fails() {
    let mut engine = GoalEngine::default();
    let goal = engine
        .create_goal(credits_goal(dec!(1000), 1), GoalCallbacks::none())
        .unwrap();

    engine.advance(&ProductionTable::new()).unwrap();

    assert!(engine.registry().active().is_empty());
    assert_eq!(engine.registry().failed()[0].id, goal.id);
    assert_eq!(engine.registry().failed()[0].status, GoalStatus::Failed);
}

#[test]
fn two_turn_goal_stays_active_then_fails() {
    let mut engine = GoalEngine::default();
    engine
        .create_goal(credits_goal(dec!(100), 2), GoalCallbacks::none())
        .unwrap();
    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(40));

    engine.advance(&production).unwrap();
    assert_eq!(engine.registry().active().len(), 1);
    assert_eq!(engine.registry().active()[0].turns_remaining, 1);

    production.set_delta("credits", dec!(99));
    let summary = engine.advance(&production).unwrap();
    assert!(engine.registry().active().is_empty());
    assert_eq!(engine.registry().failed().len(), 1);
    assert_eq!(summary.transitions[0].outcome, GoalOutcome::Failed);
    assert_eq!(summary.transitions[0].turn, 3);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn each_advance_decrements_every_active_goal_by_one() {
    let mut engine = GoalEngine::default();
    engine
        .create_goal(credits_goal(dec!(100), 10), GoalCallbacks::none())
        .unwrap();
    engine
        .create_goal(NewGoal::new("pop", dec!(20), 6, "pop"), GoalCallbacks::none())
        .unwrap();
    let production = ProductionTable::new();

    for expected_turn in 2..=5_u64 {
        let before: Vec<i64> = engine
            .registry()
            .active()
            .iter()
            .map(|g| g.turns_remaining)
            .collect();
        let summary = engine.advance(&production).unwrap();
        assert_eq!(summary.turn, expected_turn);
        let after: Vec<i64> = engine
            .registry()
            .active()
            .iter()
            .map(|g| g.turns_remaining)
            .collect();
        let expected: Vec<i64> = before.iter().map(|r| r.saturating_sub(1)).collect();
        assert_eq!(after, expected);
    }
}

#[test]
fn completion_wins_over_simultaneous_expiry() {
    let mut engine = GoalEngine::default();
    engine
        .create_goal(credits_goal(dec!(50), 1), GoalCallbacks::none())
        .unwrap();
    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(50));

    engine.advance(&production).unwrap();

    assert_eq!(engine.registry().completed().len(), 1);
    assert!(engine.registry().failed().is_empty());
}

#[test]
fn resolved_goals_are_never_touched_again() {
    let mut engine = GoalEngine::default();
    let done = engine
        .create_goal(credits_goal(dec!(10), 2), GoalCallbacks::none())
        .unwrap();
    let lost = engine
        .create_goal(NewGoal::new("pop", dec!(10), 1, "pop"), GoalCallbacks::none())
        .unwrap();
    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(10));
    engine.advance(&production).unwrap();

    let completed_snapshot = engine.registry().completed().to_vec();
    let failed_snapshot = engine.registry().failed().to_vec();

    production.set_delta("pop", dec!(1000));
    for _ in 0..3 {
        let summary = engine.advance(&production).unwrap();
        assert!(summary.transitions.is_empty());
    }

    assert_eq!(engine.registry().completed(), completed_snapshot.as_slice());
    assert_eq!(engine.registry().failed(), failed_snapshot.as_slice());
    assert!(engine.registry().active().is_empty());
    assert_eq!(engine.registry().get(done.id).unwrap().status, GoalStatus::Completed);
    assert_eq!(engine.registry().get(lost.id).unwrap().status, GoalStatus::Failed);
}

#[test]
fn every_goal_lives_in_exactly_one_partition() {
    let mut engine = GoalEngine::default();
    let mut ids = Vec::new();
    for (target, turns) in [(dec!(10), 1), (dec!(1000), 1), (dec!(1000), 5), (dec!(5), 3)] {
        ids.push(
            engine
                .create_goal(credits_goal(target, turns), GoalCallbacks::none())
                .unwrap()
                .id,
        );
    }
    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(20));
    engine.advance(&production).unwrap();

    let registry = engine.registry();
    for id in ids {
        let hits = [registry.active(), registry.completed(), registry.failed()]
            .iter()
            .filter(|partition| partition.iter().any(|g| g.id == id))
            .count();
        assert_eq!(hits, 1);
    }
    let counts = engine.counts();
    assert_eq!((counts.active, counts.completed, counts.failed), (1, 2, 1));
}

#[test]
fn clear_all_empties_every_partition() {
    let mut engine = GoalEngine::default();
    engine
        .create_goal(credits_goal(dec!(10), 1), GoalCallbacks::none())
        .unwrap();
    engine
        .create_goal(credits_goal(dec!(1000), 1), GoalCallbacks::none())
        .unwrap();
    engine
        .create_goal(credits_goal(dec!(1000), 9), GoalCallbacks::none())
        .unwrap();
    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(10));
    engine.advance(&production).unwrap();

    engine.clear_all();

    assert!(engine.registry().active().is_empty());
    assert!(engine.registry().completed().is_empty());
    assert!(engine.registry().failed().is_empty());
    assert_eq!(engine.current_turn(), 2);
}

#[test]
fn exhausted_budget_is_not_clamped_before_evaluation() {
    let mut engine = GoalEngine::default();
    let zero = engine
        .create_goal(credits_goal(dec!(10), 0), GoalCallbacks::none())
        .unwrap();
    let negative = engine
        .create_goal(credits_goal(dec!(10), -1), GoalCallbacks::none())
        .unwrap();

    engine.advance(&ProductionTable::new()).unwrap();

    let failed = engine.registry().failed();
    assert_eq!(failed.len(), 2);
    assert_eq!(engine.registry().get(zero.id).unwrap().turns_remaining, -1);
    assert_eq!(engine.registry().get(negative.id).unwrap().turns_remaining, -2);
}

#[test]
fn engine_built_from_parts_uses_its_clock_and_catalog() {
    let mut templates = BTreeMap::new();
    templates.insert(
        "oreRush".to_owned(),
        GoalTemplate {
            resource_key: "ore".into(),
            target_amount: dec!(8),
            turns_limit: 2,
            description: "Reach 8 ore per turn within 2 turns".to_owned(),
        },
    );
    let mut engine = GoalEngine::from_parts(
        TurnClock::new(40),
        GoalRegistry::with_validation(true),
        GoalTemplateCatalog::from_templates(templates),
    );

    let goal = engine
        .accept_template("oreRush", GoalCallbacks::none())
        .unwrap();
    assert_eq!(goal.start_turn, 40);
    assert!(matches!(
        engine.create_goal(credits_goal(dec!(5), 0), GoalCallbacks::none()),
        Err(GoalError::InvalidGoal { .. })
    ));

    let production: ProductionTable = [("ore", dec!(8))].into_iter().collect();
    let summary = engine.advance(&production).unwrap();
    assert_eq!(summary.turn, 41);
    assert_eq!(engine.registry().completed()[0].resolved_turn, Some(41));
}

#[test]
fn turn_counter_never_moves_behind_tracked_goals() {
    let mut engine = GoalEngine::default();
    for _ in 0..4 {
        engine.advance(&ProductionTable::new()).unwrap();
    }
    let goal = engine
        .create_goal(credits_goal(dec!(100), 3), GoalCallbacks::none())
        .unwrap();

    assert!(matches!(
        engine.restore_turn(1),
        Err(ClockError::Rewind { from: 5, to: 1 })
    ));
    assert!(goal.start_turn <= engine.current_turn());

    engine.new_campaign();
    assert_eq!(engine.current_turn(), 1);
    assert!(engine.registry().active().is_empty());
}

// =============================================================================
// Callbacks
// =============================================================================

#[test]
fn callbacks_run_in_registry_order_before_advance_returns() {
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let mut engine = GoalEngine::default();

    for (name, target) in [("a", dec!(5)), ("b", dec!(500)), ("c", dec!(6))] {
        let on_success = Rc::clone(&log);
        let on_failure = Rc::clone(&log);
        engine
            .create_goal(
                NewGoal::new("credits", target, 1, name),
                GoalCallbacks::none()
                    .on_success(move |goal| {
                        on_success.borrow_mut().push(format!("achieved {}", goal.description));
                        Ok(())
                    })
                    .on_failure(move |goal| {
                        on_failure.borrow_mut().push(format!("failed {}", goal.description));
                        Ok(())
                    }),
            )
            .unwrap();
    }

    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(10));
    let summary = engine.advance(&production).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["achieved a".to_owned(), "failed b".to_owned(), "achieved c".to_owned()]
    );
    let rendered: Vec<String> = summary.transitions.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["Goal achieved: a", "Goal failed: b", "Goal achieved: c"]);
}

#[test]
fn callback_error_propagates_out_of_advance() {
    let mut engine = GoalEngine::default();
    let goal = engine
        .create_goal(
            credits_goal(dec!(1000), 1),
            GoalCallbacks::none().on_failure(|_| Err(CallbackError::new("toast queue full"))),
        )
        .unwrap();

    let err = engine.advance(&ProductionTable::new()).unwrap_err();

    match err {
        TurnError::Goal {
            source:
                GoalError::Callback {
                    goal_id,
                    outcome,
                    source,
                },
        } => {
            assert_eq!(goal_id, goal.id);
            assert_eq!(outcome, GoalOutcome::Failed);
            assert_eq!(source.message, "toast queue full");
        }
        other => panic!("unexpected error: {other}"),
    }
    // The transition itself stays committed and the clock has moved.
    assert_eq!(engine.registry().failed()[0].id, goal.id);
    assert_eq!(engine.current_turn(), 2);
}

#[test]
fn panicking_callback_does_not_lose_goals() {
    let mut engine = GoalEngine::default();
    engine
        .create_goal(
            credits_goal(dec!(10), 3),
            GoalCallbacks::none().on_success(|_| panic!("notification layer crashed")),
        )
        .unwrap();
    let second = engine
        .create_goal(credits_goal(dec!(20), 3), GoalCallbacks::none())
        .unwrap();
    let third = engine
        .create_goal(credits_goal(dec!(500), 3), GoalCallbacks::none())
        .unwrap();
    let mut production = ProductionTable::new();
    production.set_delta("credits", dec!(50));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| engine.advance(&production)));
    assert!(outcome.is_err());

    let counts = engine.counts();
    assert_eq!((counts.active, counts.completed, counts.failed), (2, 1, 0));
    let active: Vec<_> = engine.registry().active().iter().map(|g| g.id).collect();
    assert_eq!(active, vec![second.id, third.id]);

    // The goals left behind are picked up on the next turn.
    let summary = engine.advance(&production).unwrap();
    assert_eq!(summary.transitions.len(), 1);
    assert_eq!(summary.transitions[0].goal.id, second.id);
    assert_eq!(engine.registry().active()[0].id, third.id);
}
