//! Round controller integration tests.
//!
//! These drive complete rounds through the simulated host: title screen,
//! deal, picks, match and mismatch resolution, outcomes, and restarts.

use card_memory::assets::sounds;
use card_memory::host::{AudioHost, CameraFade, Cursor, Property, SceneHost, SimHost};
use card_memory::round::{Prompt, RESTART_FADE_PER_CARD_MS, VOLUME_ICON_POSITION};
use card_memory::{
    CardId, CardName, FaceState, Point, PointerOutcome, RoundConfig, RoundController, RoundError, RoundPhase,
};

/// Run the host loop in 50 ms frames.
fn run(round: &mut RoundController<SimHost>, ms: u32) {
    for _ in 0..ms / 50 {
        round.tick(50);
    }
}

/// Build a controller, dismiss the title, and wait for the admission gate.
fn start(config: RoundConfig) -> RoundController<SimHost> {
    let mut round = RoundController::new(SimHost::new(), config).unwrap();
    let title = round.hud().object(Prompt::Title).unwrap();
    let point = round.host().position(title).unwrap();

    assert_eq!(round.pointer_down(point), PointerOutcome::TitleDismissed);
    run(&mut round, 1_000);
    assert_eq!(round.phase(), RoundPhase::Idle);
    run(&mut round, 2_400);
    assert!(round.state().input_enabled());
    round
}

fn slot(round: &RoundController<SimHost>, id: CardId) -> Point {
    round.state().card(id).unwrap().slot()
}

/// Live cards grouped into pairs by name.
fn pairs(round: &RoundController<SimHost>) -> Vec<(CardId, CardId)> {
    let cards = round.state().cards();
    let mut names: Vec<&CardName> = cards.iter().map(|c| c.name()).collect();
    names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    names.dedup();

    names
        .into_iter()
        .map(|name| {
            let mut same = cards.iter().filter(|c| c.name() == name).map(|c| c.id());
            (same.next().unwrap(), same.next().unwrap())
        })
        .collect()
}

/// Two live cards with different names.
fn mismatched(round: &RoundController<SimHost>) -> (CardId, CardId) {
    let pairs = pairs(round);
    (pairs[0].0, pairs[1].0)
}

/// Pick two cards and wait until the round accepts picks again.
fn play(round: &mut RoundController<SimHost>, first: CardId, second: CardId) {
    let a = slot(round, first);
    let b = slot(round, second);

    assert_eq!(round.pointer_down(a), PointerOutcome::Revealing(first));
    run(round, 500);
    assert_eq!(round.phase(), RoundPhase::AwaitingSecondPick);
    assert_eq!(round.pointer_down(b), PointerOutcome::Resolving(second));
    run(round, 1_000);
}

#[test]
fn test_all_pairs_in_order_wins() {
    let mut round = start(RoundConfig::default().with_seed(11));

    for (a, b) in pairs(&round) {
        play(&mut round, a, b);
    }

    assert_eq!(round.phase(), RoundPhase::Won);
    assert!(round.state().cards().is_empty());
    assert_eq!(round.state().lives(), 10);
    assert!(!round.state().input_enabled());
    assert_eq!(round.host().play_count(sounds::CARD_MATCH), 6);
    assert_eq!(round.host().play_count(sounds::VICTORY), 1);

    run(&mut round, 1_000);
    // Victory prompt dropped to the centre; matched cards are gone.
    let victory = round.hud().object(Prompt::Victory).unwrap();
    assert_eq!(round.host().property(victory, Property::Y), Some(240.0));
    assert!(round.host().find_named("card-0").is_none());
}

#[test]
fn test_mismatches_until_loss() {
    let mut round = start(RoundConfig::default().with_seed(5));
    let (a, b) = mismatched(&round);

    for expected in (0..10).rev() {
        play(&mut round, a, b);
        assert_eq!(round.state().lives(), expected);
    }

    assert_eq!(round.phase(), RoundPhase::Lost);
    assert_eq!(round.state().cards().len(), 12);
    assert!(round.hud().hearts().is_empty());
    assert_eq!(round.host().shakes().len(), 10);
    assert_eq!(round.host().play_count(sounds::CARD_MISMATCH), 10);

    // The pending flip-back must not reopen input after the loss.
    run(&mut round, 2_000);
    assert!(!round.state().input_enabled());
    assert_eq!(round.state().opened(), None);
    assert_eq!(round.state().card(a).unwrap().face_state(), FaceState::FaceDown);
}

#[test]
fn test_mismatch_turns_both_back() {
    let mut round = start(RoundConfig::default());
    let (a, b) = mismatched(&round);

    round.pointer_down(slot(&round, a));
    run(&mut round, 500);
    round.pointer_down(slot(&round, b));
    run(&mut round, 500);

    // Compared: one life gone, both cards on their way back.
    assert_eq!(round.state().lives(), 9);
    assert_eq!(round.state().opened(), Some(a));
    assert!(!round.state().input_enabled());

    run(&mut round, 500);
    assert_eq!(round.state().opened(), None);
    assert!(round.state().input_enabled());
    assert_eq!(round.phase(), RoundPhase::AwaitingFirstPick);
    for id in [a, b] {
        assert_eq!(round.state().card(id).unwrap().face_state(), FaceState::FaceDown);
    }
}

#[test]
fn test_pick_opened_card_again_is_noop() {
    let mut round = start(RoundConfig::default());
    let (a, _) = mismatched(&round);

    round.pointer_down(slot(&round, a));
    run(&mut round, 500);
    let before = round.snapshot();

    assert_eq!(round.pointer_down(slot(&round, a)), PointerOutcome::Ignored(a));
    assert_eq!(round.snapshot(), before);
    assert!(round.state().input_enabled());
}

#[test]
fn test_pick_while_disabled_is_dropped() {
    let mut round = start(RoundConfig::default());
    let (a, b) = mismatched(&round);

    round.pointer_down(slot(&round, a));
    let before = round.snapshot();
    let flips = round.host().play_count(sounds::CARD_FLIP);

    assert_eq!(round.pointer_down(slot(&round, b)), PointerOutcome::Dropped);
    assert_eq!(round.snapshot(), before);
    assert_eq!(round.host().play_count(sounds::CARD_FLIP), flips);
}

#[test]
fn test_picks_dropped_before_gate_opens() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();
    let title = round.hud().object(Prompt::Title).unwrap();
    let point = round.host().position(title).unwrap();
    round.pointer_down(point);
    run(&mut round, 3_000);

    assert_eq!(round.phase(), RoundPhase::Idle);
    let card = round.state().cards()[0].id();
    let before = round.snapshot();
    assert_eq!(round.pointer_down(slot(&round, card)), PointerOutcome::Dropped);
    assert_eq!(round.snapshot(), before);
}

#[test]
fn test_click_on_empty_space_keeps_input() {
    let mut round = start(RoundConfig::default());

    assert_eq!(round.pointer_down(Point::new(5.0, 470.0)), PointerOutcome::Missed);
    assert!(round.state().input_enabled());
}

#[test]
fn test_restart_after_loss_returns_to_title() {
    let mut round = start(RoundConfig::default().with_lives(1));
    let (a, b) = mismatched(&round);
    play(&mut round, a, b);
    assert_eq!(round.phase(), RoundPhase::Lost);

    let prompt = round.hud().object(Prompt::GameOver).unwrap();
    let point = round.host().position(prompt).unwrap();
    let whooshes = round.host().play_count(sounds::WHOOSH);
    assert_eq!(round.pointer_down(point), PointerOutcome::PromptDismissed);
    assert_eq!(round.host().play_count(sounds::WHOOSH), whooshes);

    run(&mut round, 1_000);
    let fade = RESTART_FADE_PER_CARD_MS * 12;
    assert_eq!(round.host().fades().last(), Some(&(CameraFade::Out, fade)));

    run(&mut round, fade);
    assert_eq!(round.phase(), RoundPhase::Title);
    assert_eq!(round.state().lives(), 1);
    assert!(round.state().cards().is_empty());
    assert_eq!(round.host().listener_count(), 1);
    assert_eq!(round.host().active_animation_count(), 1);
    assert!(!round.host().is_playing(sounds::THEME_SONG));
    assert_eq!(round.pending_steps(), 0);
}

#[test]
fn test_restart_after_win_returns_to_title() {
    let mut round = start(RoundConfig::default().with_seed(21));
    for (a, b) in pairs(&round) {
        play(&mut round, a, b);
    }
    assert_eq!(round.phase(), RoundPhase::Won);
    run(&mut round, 1_000);

    let prompt = round.hud().object(Prompt::Victory).unwrap();
    let point = round.host().position(prompt).unwrap();
    let whooshes = round.host().play_count(sounds::WHOOSH);
    assert_eq!(round.pointer_down(point), PointerOutcome::PromptDismissed);
    assert_eq!(round.host().play_count(sounds::WHOOSH), whooshes + 1);

    // No cards left, so the restart fade is instant.
    run(&mut round, 1_000);
    assert_eq!(round.host().fades().last(), Some(&(CameraFade::Out, 0)));

    round.tick(50);
    assert_eq!(round.phase(), RoundPhase::Title);
    assert_eq!(round.state().lives(), 10);
    assert_eq!(round.pending_steps(), 0);
    assert_eq!(round.host().listener_count(), 1);
    assert_eq!(round.host().active_animation_count(), 1);
}

#[test]
fn test_second_round_deals_new_layout() {
    let mut round = start(RoundConfig::default().with_seed(3));
    let first: Vec<_> = round.state().cards().iter().map(|c| c.name().clone()).collect();

    round.restart();
    let title = round.hud().object(Prompt::Title).unwrap();
    let point = round.host().position(title).unwrap();
    round.pointer_down(point);
    run(&mut round, 1_000);

    let second: Vec<_> = round.state().cards().iter().map(|c| c.name().clone()).collect();
    assert_eq!(round.rounds_started(), 2);
    assert_eq!(second.len(), 12);
    assert_ne!(first, second);
}

#[test]
fn test_theme_song_started_once() {
    let mut round = start(RoundConfig::default());
    assert!(round.host().is_playing(sounds::THEME_SONG));

    round.teardown();
    assert!(!round.host().is_playing(sounds::THEME_SONG));
    assert_eq!(round.host().play_count(sounds::THEME_SONG), 1);
}

#[test]
fn test_volume_toggle() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();

    assert_eq!(round.pointer_down(VOLUME_ICON_POSITION), PointerOutcome::VolumeToggled);
    assert_eq!(round.host().volume(), 0.0);
    assert_eq!(round.phase(), RoundPhase::Title);

    assert_eq!(round.pointer_down(VOLUME_ICON_POSITION), PointerOutcome::VolumeToggled);
    assert_eq!(round.host().volume(), 1.0);
}

#[test]
fn test_hover_sets_cursor() {
    let mut round = RoundController::new(SimHost::new(), RoundConfig::default()).unwrap();
    let title = round.hud().object(Prompt::Title).unwrap();
    let point = round.host().position(title).unwrap();

    round.pointer_move(point);
    assert_eq!(round.host().cursor(), Cursor::Pointer);
    assert_eq!(
        round.host().object(title).and_then(|o| o.text_color()),
        Some(Prompt::Title.hover_color())
    );

    round.pointer_move(Point::new(5.0, 5.0));
    assert_eq!(round.host().cursor(), Cursor::Default);
    assert_eq!(
        round.host().object(title).and_then(|o| o.text_color()),
        Some(Prompt::Title.color())
    );
}

#[test]
fn test_hover_over_card_only_while_accepting() {
    let mut round = start(RoundConfig::default());
    let card = round.state().cards()[0].id();
    let point = slot(&round, card);

    round.pointer_move(point);
    assert_eq!(round.host().cursor(), Cursor::Pointer);

    round.pointer_down(point);
    round.pointer_move(point);
    assert_eq!(round.host().cursor(), Cursor::Default);
}

#[test]
fn test_debug_shortcuts_guarded() {
    let mut round = start(RoundConfig::default());
    assert_eq!(round.force_win(), Err(RoundError::ShortcutsDisabled));

    let mut round = RoundController::new(SimHost::new(), RoundConfig::default().with_debug_shortcuts()).unwrap();
    assert_eq!(round.force_lose(), Err(RoundError::NotAcceptingPicks));
    assert_eq!(round.phase(), RoundPhase::Title);
}

#[test]
fn test_force_win() {
    let mut round = start(RoundConfig::default().with_debug_shortcuts());

    round.force_win().unwrap();
    assert_eq!(round.phase(), RoundPhase::Won);
    assert!(round.state().cards().is_empty());
    assert_eq!(round.state().lives(), 10);

    run(&mut round, 1_000);
    assert!(round.host().find_named("card-1").is_none());
    assert_eq!(round.force_win(), Err(RoundError::NotAcceptingPicks));
}

#[test]
fn test_force_lose_with_opened_card() {
    let mut round = start(RoundConfig::default().with_debug_shortcuts());
    let (a, _) = mismatched(&round);
    round.pointer_down(slot(&round, a));
    run(&mut round, 500);

    round.force_lose().unwrap();
    assert_eq!(round.phase(), RoundPhase::Lost);
    assert_eq!(round.state().lives(), 0);
    assert!(round.hud().hearts().is_empty());

    run(&mut round, 1_000);
    assert_eq!(round.state().opened(), None);
    assert!(!round.state().input_enabled());
    assert_eq!(round.state().card(a).unwrap().face_state(), FaceState::FaceDown);
}
