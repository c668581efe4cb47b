//! Property-based tests for the engine, scheduler and rain scoring.
//!
//! Invariants checked:
//! - the player buffer is always a prefix of the sequence
//! - append games hold `round` moves, regenerate games a permutation
//! - cancelled tasks never fire and due tasks fire in order
//! - the rain score readout is never negative

use proptest::prelude::*;
use sequence_games::core::{
    Alphabet, EngineConfig, GrowthPolicy, MismatchPolicy, MoveId, RoundState, Timing,
};
use sequence_games::effects::Effect;
use sequence_games::games::RainGame;
use sequence_games::rules::SequenceEngine;
use sequence_games::schedule::PlaybackScheduler;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// One host action against the engine.
#[derive(Clone, Debug)]
enum Step {
    Submit(u16),
    Advance(u64),
    Replay,
    Restart,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        // Index 3 is outside the alphabet.
        4 => (0u16..4).prop_map(Step::Submit),
        3 => (0u64..3000).prop_map(Step::Advance),
        1 => Just(Step::Replay),
        1 => Just(Step::Restart),
    ]
}

fn arb_growth() -> impl Strategy<Value = GrowthPolicy> {
    prop_oneof![Just(GrowthPolicy::Append), Just(GrowthPolicy::Regenerate)]
}

fn arb_mismatch() -> impl Strategy<Value = MismatchPolicy> {
    prop_oneof![Just(MismatchPolicy::EndRound), Just(MismatchPolicy::ResetBuffer)]
}

fn config(growth: GrowthPolicy, mismatch: MismatchPolicy, auto_present: bool) -> EngineConfig {
    let alphabet = Alphabet::new(["a", "b", "c"]).unwrap();
    let config = EngineConfig::new(alphabet)
        .with_growth(growth)
        .with_mismatch(mismatch)
        .with_timing(Timing {
            start_delay_ms: 300,
            step_interval_ms: 500,
            highlight_ms: 250,
            round_pause_ms: 700,
            victory_delay_ms: 400,
        })
        .with_max_rounds(6);
    if auto_present {
        config
    } else {
        config.manual_presentation()
    }
}

fn open_and_play(engine: &mut SequenceEngine) {
    for _ in 0..200 {
        if engine.state() == RoundState::AwaitingInput {
            break;
        }
        engine.advance(100);
    }
    let sequence: Vec<MoveId> = engine.sequence().iter().copied().collect();
    for mv in sequence {
        engine.submit_move(mv);
    }
}

// =============================================================================
// Engine invariants
// =============================================================================

proptest! {
    /// The buffer never outgrows the sequence and always matches its prefix.
    #[test]
    fn prop_buffer_is_prefix(
        seed in any::<u64>(),
        growth in arb_growth(),
        mismatch in arb_mismatch(),
        auto_present in any::<bool>(),
        steps in prop::collection::vec(arb_step(), 1..80)
    ) {
        let mut engine = SequenceEngine::new(config(growth, mismatch, auto_present), seed).unwrap();
        engine.start_game();

        for step in steps {
            match step {
                Step::Submit(i) => {
                    engine.submit_move(MoveId::new(i));
                }
                Step::Advance(ms) => engine.advance(ms),
                Step::Replay => {
                    engine.request_replay();
                }
                Step::Restart => engine.start_game(),
            }

            let sequence = engine.sequence();
            let buffer = engine.buffer();
            prop_assert!(buffer.len() <= sequence.len());
            for (i, mv) in buffer.iter().enumerate() {
                prop_assert_eq!(*mv, sequence[i]);
            }
            prop_assert!(engine.round() >= 1 && engine.round() <= 6);
        }
    }

    /// Input outside `AwaitingInput` never changes the engine or emits effects.
    #[test]
    fn prop_ignored_input_is_silent(
        seed in any::<u64>(),
        steps in prop::collection::vec(arb_step(), 1..60),
        mv in 0u16..3
    ) {
        let config = config(GrowthPolicy::Append, MismatchPolicy::EndRound, true);
        let mut engine = SequenceEngine::new(config, seed).unwrap();
        engine.start_game();

        for step in steps {
            match step {
                Step::Submit(i) => {
                    engine.submit_move(MoveId::new(i));
                }
                Step::Advance(ms) => engine.advance(ms),
                Step::Replay | Step::Restart => {}
            }
            if engine.state() != RoundState::AwaitingInput {
                engine.drain_effects();
                let before = engine.snapshot();
                engine.submit_move(MoveId::new(mv));
                prop_assert_eq!(engine.snapshot(), before);
                prop_assert!(engine.effects().is_empty());
            }
        }
    }

    /// Append games hold exactly `round` moves; regenerate games a permutation.
    #[test]
    fn prop_sequence_shape(seed in any::<u64>(), growth in arb_growth(), rounds in 1u32..6) {
        let config = config(growth, MismatchPolicy::EndRound, true);
        let mut engine = SequenceEngine::new(config, seed).unwrap();
        engine.start_game();
        for _ in 1..rounds {
            open_and_play(&mut engine);
        }
        engine.advance(1000);

        prop_assert_eq!(engine.round(), rounds);
        match growth {
            GrowthPolicy::Append => prop_assert_eq!(engine.sequence().len(), rounds as usize),
            GrowthPolicy::Regenerate => {
                let mut seq: Vec<MoveId> = engine.sequence().iter().copied().collect();
                seq.sort();
                prop_assert_eq!(seq, vec![MoveId::new(0), MoveId::new(1), MoveId::new(2)]);
            }
        }
    }

    /// Same seed and same inputs give the same game.
    #[test]
    fn prop_deterministic(seed in any::<u64>(), steps in prop::collection::vec(arb_step(), 1..40)) {
        let run = || {
            let mut engine = SequenceEngine::new(
                config(GrowthPolicy::Append, MismatchPolicy::ResetBuffer, true),
                seed,
            )
            .unwrap();
            engine.start_game();
            for step in &steps {
                match *step {
                    Step::Submit(i) => {
                        engine.submit_move(MoveId::new(i));
                    }
                    Step::Advance(ms) => engine.advance(ms),
                    Step::Replay => {
                        engine.request_replay();
                    }
                    Step::Restart => engine.start_game(),
                }
            }
            (engine.snapshot(), engine.drain_effects())
        };
        prop_assert_eq!(run(), run());
    }
}

// =============================================================================
// Scheduler invariants
// =============================================================================

proptest! {
    /// Tasks fire in due order, ties in insertion order, cancelled ones never.
    #[test]
    fn prop_scheduler_order(
        dues in prop::collection::vec(0u64..1000, 1..40),
        cancel_mask in prop::collection::vec(any::<bool>(), 40),
        horizon in 0u64..1200
    ) {
        let mut scheduler = PlaybackScheduler::new();
        let mut kept = Vec::new();
        for (i, &due) in dues.iter().enumerate() {
            let id = scheduler.schedule_at(due, i);
            if cancel_mask[i] {
                prop_assert_eq!(scheduler.cancel(id), Some(i));
            } else {
                kept.push((due, i));
            }
        }

        let mut fired = Vec::new();
        while let Some(entry) = scheduler.pop_due(horizon) {
            fired.push((entry.due_ms, entry.task));
        }
        scheduler.settle(horizon);

        kept.sort();
        let expected: Vec<(u64, usize)> = kept.into_iter().filter(|(d, _)| *d <= horizon).collect();
        prop_assert_eq!(fired, expected);
        prop_assert_eq!(scheduler.now(), horizon);
    }
}

// =============================================================================
// Rain scoring
// =============================================================================

proptest! {
    /// The published score is never negative, whatever the timing of hits.
    #[test]
    fn prop_rain_score_non_negative(
        seed in any::<u64>(),
        gaps in prop::collection::vec(0u64..2500, 1..60)
    ) {
        let mut game = RainGame::new(seed).unwrap();
        game.start();
        for gap in gaps {
            game.advance(gap);
            game.hit();
            prop_assert!(game.score() >= 0);
        }
        for effect in game.drain_effects() {
            if let Effect::Score(score) = effect {
                prop_assert!(score >= 0);
            }
            if let Effect::WaterLevel(level) = effect {
                prop_assert!((0.0..=1.0).contains(&level));
            }
        }
    }
}
