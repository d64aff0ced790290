//! Property tests for dealing and for arbitrary pick sequences.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use card_memory::host::{SceneHost, SimHost};
use card_memory::round::Prompt;
use card_memory::{
    CardName, FaceState, GameRng, GridBuilder, GridLayout, PointerOutcome, RoundConfig, RoundController, RoundPhase,
    RoundState,
};

fn run(round: &mut RoundController<SimHost>, ms: u32) {
    for _ in 0..ms / 50 {
        round.tick(50);
    }
}

fn start(seed: u64, lives: u32) -> RoundController<SimHost> {
    let config = RoundConfig::default().with_seed(seed).with_lives(lives);
    let mut round = RoundController::new(SimHost::new(), config).unwrap();
    let title = round.hud().object(Prompt::Title).unwrap();
    let point = round.host().position(title).unwrap();
    round.pointer_down(point);
    run(&mut round, 3_400);
    round
}

fn name_counts(state: &RoundState) -> FxHashMap<CardName, usize> {
    let mut counts = FxHashMap::default();
    for card in state.cards().iter() {
        *counts.entry(card.name().clone()).or_default() += 1;
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deal_has_two_of_each_name(seed in any::<u64>(), pool in 1usize..10) {
        let names: Vec<CardName> = (0..pool).map(|i| CardName::new(format!("card-{i}"))).collect();
        let layout = GridLayout::default();
        let dealt = GridBuilder::new(&names, layout).layout(&mut GameRng::new(seed));

        prop_assert_eq!(dealt.len(), pool * 2);
        for name in &names {
            prop_assert_eq!(dealt.iter().filter(|(n, _)| n == name).count(), 2);
        }
        for (index, (_, slot)) in dealt.iter().enumerate() {
            prop_assert_eq!(*slot, layout.slot(index));
        }
    }

    #[test]
    fn prop_picks_keep_round_invariants(
        seed in any::<u64>(),
        lives in 1u32..6,
        picks in prop::collection::vec((0usize..12, 0usize..12), 1..20),
    ) {
        let mut round = start(seed, lives);

        for (first, second) in picks {
            if round.phase().is_terminal() {
                break;
            }
            prop_assert!(round.state().input_enabled());
            let cards = round.state().cards().clone();
            let a = &cards[first % cards.len()];
            let b = &cards[second % cards.len()];
            let lives_before = round.state().lives();

            prop_assert_eq!(round.pointer_down(a.slot()), PointerOutcome::Revealing(a.id()));
            run(&mut round, 500);

            let outcome = round.pointer_down(b.slot());
            run(&mut round, 1_000);

            let state = round.state();
            if a.id() == b.id() {
                // Same card twice: ignored, the card stays opened.
                prop_assert_eq!(outcome, PointerOutcome::Ignored(a.id()));
                prop_assert_eq!(state.lives(), lives_before);
                prop_assert_eq!(state.opened(), Some(a.id()));
                // Turn it back over through a real pair so the loop can continue.
                let twin = cards.iter().find(|c| c.id() != a.id() && c.name() == a.name()).unwrap();
                prop_assert_eq!(round.pointer_down(twin.slot()), PointerOutcome::Resolving(twin.id()));
                run(&mut round, 1_000);
                prop_assert_eq!(round.state().lives(), lives_before);
            } else if a.name() == b.name() {
                prop_assert_eq!(outcome, PointerOutcome::Resolving(b.id()));
                prop_assert_eq!(state.lives(), lives_before);
                prop_assert!(state.card(a.id()).is_none());
                prop_assert!(state.card(b.id()).is_none());
            } else {
                prop_assert_eq!(outcome, PointerOutcome::Resolving(b.id()));
                prop_assert_eq!(state.lives(), lives_before - 1);
                prop_assert_eq!(state.card(a.id()).unwrap().face_state(), FaceState::FaceDown);
                prop_assert_eq!(state.card(b.id()).unwrap().face_state(), FaceState::FaceDown);
            }

            let state = round.state();
            prop_assert!(state.lives() <= state.initial_lives());
            prop_assert!(name_counts(state).values().all(|&n| n == 2));
            prop_assert_eq!(state.cards().len() % 2, 0);
            match state.phase() {
                RoundPhase::Lost => prop_assert_eq!(state.lives(), 0),
                RoundPhase::Won => prop_assert!(state.cards().is_empty()),
                RoundPhase::AwaitingFirstPick => prop_assert_eq!(state.opened(), None),
                other => prop_assert!(false, "unexpected phase {:?}", other),
            }
            if state.cards().is_empty() {
                break;
            }
        }

        round.teardown();
        prop_assert_eq!(round.host().listener_count(), 0);
        prop_assert_eq!(round.host().active_animation_count(), 0);
    }
}
