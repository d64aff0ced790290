//! Resource lifecycle integration tests.
//!
//! Whatever a round is doing when it is torn down, the host must end up with
//! no listeners, no animations, and no looped sounds from it, and stale
//! completions must not reach the rebuilt round.

use card_memory::assets::sounds;
use card_memory::host::{AudioHost, Cursor, SceneHost, SimHost};
use card_memory::round::Prompt;
use card_memory::{Point, PointerOutcome, RoundConfig, RoundController, RoundPhase};

fn run(round: &mut RoundController<SimHost>, ms: u32) {
    for _ in 0..ms / 50 {
        round.tick(50);
    }
}

fn dismiss_title(round: &mut RoundController<SimHost>) {
    let title = round.hud().object(Prompt::Title).unwrap();
    let point = round.host().position(title).unwrap();
    assert_eq!(round.pointer_down(point), PointerOutcome::TitleDismissed);
}

fn assert_released(round: &RoundController<SimHost>) {
    assert!(round.resources().is_empty());
    assert_eq!(round.host().listener_count(), 0);
    assert_eq!(round.host().active_animation_count(), 0);
    assert_eq!(round.host().object_count(), 0);
    assert!(!round.host().is_playing(sounds::THEME_SONG));
    assert_eq!(round.pending_steps(), 0);
}

#[test]
fn test_teardown_on_title_screen() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();

    let report = round.teardown();
    assert_eq!(report.listeners_released, 1);
    assert_eq!(report.animations_cancelled, 1);
    assert_eq!(report.objects_destroyed, 3);
    assert_released(&round);
}

#[test]
fn test_teardown_during_deal() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();
    dismiss_title(&mut round);
    run(&mut round, 1_500);
    assert_eq!(round.phase(), RoundPhase::Idle);

    let report = round.teardown();
    assert_eq!(report.listeners_released, 3);
    assert_eq!(report.sounds_stopped, 1);
    assert!(report.animations_cancelled >= 12);
    assert_released(&round);

    // The admission gate and card slides are gone with it.
    run(&mut round, 5_000);
    assert!(!round.state().input_enabled());
}

#[test]
fn test_teardown_mid_flip() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();
    dismiss_title(&mut round);
    run(&mut round, 3_400);
    let card = round.state().cards()[0].clone();
    round.pointer_down(card.slot());
    run(&mut round, 200);
    round.host_mut().set_cursor(Cursor::Pointer);

    round.teardown();
    assert_released(&round);
    assert_eq!(round.host().cursor(), Cursor::Default);

    // The flip continuation was dropped: nothing opens.
    run(&mut round, 1_000);
    assert_eq!(round.state().opened(), None);
}

#[test]
fn test_teardown_is_reentrant() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();
    dismiss_title(&mut round);
    run(&mut round, 4_000);

    assert!(!round.teardown().is_noop());
    assert!(round.teardown().is_noop());
    assert!(round.teardown().is_noop());
    assert_released(&round);
}

#[test]
fn test_restart_mid_round_leaves_only_title() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();
    dismiss_title(&mut round);
    run(&mut round, 3_400);
    let card = round.state().cards()[0].clone();
    round.pointer_down(card.slot());

    round.restart();
    assert_eq!(round.phase(), RoundPhase::Title);
    assert_eq!(round.host().listener_count(), 1);
    assert_eq!(round.host().active_animation_count(), 1);
    assert_eq!(round.host().object_count(), 3);

    // Late events from the old round never reach the new one.
    run(&mut round, 2_000);
    assert_eq!(round.phase(), RoundPhase::Title);
    assert_eq!(round.state().opened(), None);
}

#[test]
fn test_pointer_dropped_after_teardown() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();
    round.teardown();

    assert_eq!(round.pointer_down(Point::new(274.5, 240.0)), PointerOutcome::Dropped);
    round.pointer_move(Point::new(274.5, 240.0));
    assert_eq!(round.host().cursor(), Cursor::Default);
}

#[test]
fn test_matched_cards_exit_and_are_destroyed() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default().with_seed(9)).unwrap();
    dismiss_title(&mut round);
    run(&mut round, 3_400);

    let cards = round.state().cards().clone();
    let first = &cards[0];
    let twin = cards
        .iter()
        .find(|c| c.id() != first.id() && c.name() == first.name())
        .unwrap();
    let objects = round.host().object_count();

    round.pointer_down(first.slot());
    run(&mut round, 500);
    round.pointer_down(twin.slot());
    run(&mut round, 500);
    assert_eq!(round.state().cards().len(), 10);
    assert!(round.host().exists(first.object()));

    run(&mut round, 500);
    assert!(!round.host().exists(first.object()));
    assert!(!round.host().exists(twin.object()));
    assert_eq!(round.host().object_count(), objects - 2);
}
