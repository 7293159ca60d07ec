// Integration tests (native) for the `lil-kids` crate.
// These drive the public state machines the way the browser glue does, with a
// seeded rng and virtual timestamps, so they run under `cargo test` on the host.

use rand::SeedableRng;
use rand::rngs::StdRng;

use lil_kids::audio::{AudioBackend, Narration, SoundBoard};
use lil_kids::catalog::PackId;
use lil_kids::games::fruit::{CATCH_GOAL, CatchOutcome, SPAWN_INTERVAL_MS};
use lil_kids::games::memory::{FLIP_BACK_MS, Face, MemoryGame, TapOutcome};
use lil_kids::games::slots::DropOutcome;
use lil_kids::games::{GameKind, GameSession, PlayArea, Shape};
use lil_kids::router::{LOADER_DELAY_MS, Router, Screen, Section};
use lil_kids::settings::{MemoryStore, MusicSetting, UNLOCK_KEY, UnlockGate};
use lil_kids::viewer::{Swipe, ViewerState};

const AREA: PlayArea = PlayArea {
    width: 360.0,
    height: 640.0,
};

/// Backend that never has audio, so every clip falls back to speech.
#[derive(Default)]
struct Mute {
    spoken: Vec<String>,
}

impl AudioBackend for Mute {
    type Clip = ();
    fn load(&mut self, src: &str) -> Result<(), String> {
        Err(format!("{src} missing"))
    }
    fn play(&mut self, _: &(), _: &str) -> Result<(), String> {
        Ok(())
    }
    fn pause(&mut self, _: &()) {}
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }
}

// Walking a whole pack forward lands back on the first item.
#[test]
fn viewer_wraps_around_each_pack() {
    for pack in PackId::ALL {
        let mut v = ViewerState::enter(pack);
        let first = v.item().name;
        for _ in 0..pack.items().len() {
            v.swipe(Swipe::Next);
        }
        assert_eq!(v.item().name, first, "{}", pack.name());
    }
}

// Letters are spoken lowercase when alone; longer text is untouched.
#[test]
fn narration_normalizes_single_letters_only() {
    let mut board = SoundBoard::new(Mute::default());
    let mut v = ViewerState::enter(PackId::Letters);
    board.narrate(&Narration::for_item(v.pack(), v.item()));
    v.next();
    board.narrate(&Narration::for_item(v.pack(), v.item()));
    board.speak("AB");
    assert_eq!(board.backend().spoken, vec!["a", "b", "AB"]);
}

// A missing animal clip speaks the animal's name instead and is not cached.
#[test]
fn missing_animal_sound_falls_back_to_speech() {
    let mut board = SoundBoard::new(Mute::default());
    let v = ViewerState::enter(PackId::Animals);
    board.narrate(&Narration::for_item(v.pack(), v.item()));
    assert_eq!(board.backend().spoken, vec!["Dog"]);
    assert_eq!(board.cached_clips(), 0);
}

// Colors get the "This is" prefix.
#[test]
fn colors_are_introduced() {
    let mut board = SoundBoard::new(Mute::default());
    let v = ViewerState::enter(PackId::Colors);
    board.narrate(&Narration::for_item(v.pack(), v.item()));
    assert_eq!(board.backend().spoken, vec!["This is Red"]);
}

// The loader shows for its delay, and leaving early cancels the reveal.
#[test]
fn router_reveals_after_loader_delay_unless_cancelled() {
    let mut r = Router::new();
    r.enter_section(Section::Games, 100.0);
    assert!(r.loading());
    assert_eq!(r.advance(100.0 + LOADER_DELAY_MS - 1.0), None);
    assert_eq!(r.advance(100.0 + LOADER_DELAY_MS), Some(Section::Games));
    assert_eq!(r.screen(), Screen::Section(Section::Games));

    r.enter_section(Section::Draw, 1_000.0);
    r.return_to_menu();
    assert_eq!(r.advance(5_000.0), None);
    assert_eq!(r.screen(), Screen::Menu);
}

// Purchasing persists the unlock for the next gate built on the same store.
#[test]
fn purchase_unlocks_games_persistently() {
    let mut gate = UnlockGate::new(MemoryStore::default());
    assert!(!gate.is_unlocked());
    gate.purchase();
    assert!(gate.is_unlocked());
    assert_eq!(gate.store().raw(UNLOCK_KEY), Some("true"));

    let reopened = UnlockGate::new(gate.store().clone());
    assert!(reopened.is_unlocked());
}

// Storage that refuses access reads as locked and music off.
#[test]
fn disabled_storage_defaults_everything_off() {
    let mut store = MemoryStore::default();
    store.disabled = true;
    let mut music = MusicSetting::new(store.clone());
    music.set(true);
    assert!(!music.enabled());
    assert!(!UnlockGate::new(store).is_unlocked());
}

// Full memory game: every mismatch flips back after the delay, every pair matches once.
#[test]
fn memory_game_plays_to_completion() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = MemoryGame::new(&mut rng);
    assert_eq!(game.cards().len(), 12);
    let mut now = 0.0;
    // Solve by looking up each card's twin, with one deliberate miss first.
    let twin_of = |g: &MemoryGame, i: usize| {
        (0..g.cards().len())
            .find(|&j| j != i && g.cards()[j].shape == g.cards()[i].shape)
            .unwrap()
    };
    let miss = (1..12)
        .find(|&j| game.cards()[j].shape != game.cards()[0].shape)
        .unwrap();
    assert_eq!(game.tap(0, now), TapOutcome::Revealed);
    assert_eq!(game.tap(miss, now), TapOutcome::Mismatched);
    assert_eq!(game.tap(twin_of(&game, 0), now), TapOutcome::Ignored);
    now += FLIP_BACK_MS;
    assert!(game.advance(now));
    assert!(game.cards().iter().all(|c| c.face == Face::Hidden));

    let mut last = TapOutcome::Ignored;
    for i in 0..12 {
        if game.cards()[i].face != Face::Hidden {
            continue;
        }
        let j = twin_of(&game, i);
        game.tap(i, now);
        last = game.tap(j, now);
    }
    assert_eq!(last, TapOutcome::Matched { complete: true });
    assert!(game.is_complete());
}

// Dropping a shape on the wrong silhouette changes nothing; the right order completes.
#[test]
fn shape_sort_accepts_only_matching_slots() {
    let mut rng = StdRng::seed_from_u64(3);
    let GameSession::Sort(mut game) = GameSession::start(GameKind::Sort, 0.0, AREA, &mut rng) else {
        panic!("expected sort game");
    };
    assert_eq!(game.drop_shape(Shape::Heart, 0), DropOutcome::Rejected);
    assert_eq!(game.board().pieces().len(), 6);
    let mut last = DropOutcome::Rejected;
    for (slot, shape) in Shape::ALL.into_iter().enumerate() {
        last = game.drop_shape(shape, slot);
    }
    assert_eq!(last, DropOutcome::Completed);
    assert_eq!(game.drop_shape(Shape::Circle, 0), DropOutcome::Rejected);
}

// Ten catches win the fruit game and stop new fruit.
#[test]
fn fruit_catch_is_won_after_goal() {
    let mut rng = StdRng::seed_from_u64(11);
    let GameSession::Fruit(mut game) = GameSession::start(GameKind::Fruit, 0.0, AREA, &mut rng) else {
        panic!("expected fruit game");
    };
    let mut now = 0.0;
    let mut outcome = CatchOutcome::Ignored;
    while !game.is_complete() {
        if let Some(id) = game.fruits().first().map(|f| f.id) {
            outcome = game.tap(id);
        }
        now += SPAWN_INTERVAL_MS;
        game.advance(now, &mut rng);
    }
    assert_eq!(outcome, CatchOutcome::Won { score: CATCH_GOAL });
    let live = game.fruits().len();
    game.advance(now + 5.0 * SPAWN_INTERVAL_MS, &mut rng);
    assert!(game.fruits().len() <= live);
    assert_eq!(game.tap(game.fruits().first().map_or(0, |f| f.id)), CatchOutcome::Ignored);
}

// Number puzzle completes when every tile sits on its own number.
#[test]
fn number_puzzle_completes_in_any_drop_order() {
    let mut rng = StdRng::seed_from_u64(5);
    let GameSession::Puzzle(mut game) = GameSession::start(GameKind::Puzzle, 0.0, AREA, &mut rng) else {
        panic!("expected puzzle game");
    };
    let tray: Vec<u8> = game.board().pieces().to_vec();
    let mut last = DropOutcome::Rejected;
    for n in tray {
        last = game.drop_number(n, usize::from(n) - 1);
    }
    assert_eq!(last, DropOutcome::Completed);
}
