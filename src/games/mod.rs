//! Mini-game engine.
//!
//! Each game is a plain state machine: input methods (`tap`, `drop_*`)
//! return an outcome, and `advance(now)` applies whatever delayed
//! transitions are due. A `GameSession` wraps the active game; starting or
//! restarting always builds a brand-new instance, which is what cancels the
//! previous instance's timers.

pub mod fruit;
pub mod habitat;
pub mod memory;
pub mod puzzle;
pub mod slots;
pub mod sort;
pub mod timer;

use rand::Rng;

use fruit::FruitCatch;
use habitat::HabitatGame;
use memory::MemoryGame;
use puzzle::NumberPuzzle;
use sort::ShapeSort;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Rectangle,
    Star,
    Heart,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Rectangle,
        Shape::Star,
        Shape::Heart,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Rectangle => "rectangle",
            Shape::Star => "star",
            Shape::Heart => "heart",
        }
    }

    pub fn from_key(key: &str) -> Option<Shape> {
        Shape::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn image(self) -> String {
        format!("{}.png", self.key())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKind {
    Memory,
    Sort,
    Fruit,
    Habitat,
    Puzzle,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Memory,
        GameKind::Sort,
        GameKind::Fruit,
        GameKind::Habitat,
        GameKind::Puzzle,
    ];

    /// Key used by the game cards' `data-game` attribute.
    pub fn key(self) -> &'static str {
        match self {
            GameKind::Memory => "memory",
            GameKind::Sort => "sort",
            GameKind::Fruit => "fruit",
            GameKind::Habitat => "habitat",
            GameKind::Puzzle => "puzzle",
        }
    }

    pub fn from_key(key: &str) -> Option<GameKind> {
        GameKind::ALL.into_iter().find(|g| g.key() == key)
    }
}

/// Size of the area fruit falls through, read from the view at start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug)]
pub enum GameSession {
    Memory(MemoryGame),
    Sort(ShapeSort),
    Fruit(FruitCatch),
    Habitat(HabitatGame),
    Puzzle(NumberPuzzle),
}

impl GameSession {
    pub fn start(kind: GameKind, now: f64, area: PlayArea, rng: &mut impl Rng) -> Self {
        log::info!("starting {} game", kind.key());
        match kind {
            GameKind::Memory => GameSession::Memory(MemoryGame::new(rng)),
            GameKind::Sort => GameSession::Sort(ShapeSort::new(rng)),
            GameKind::Fruit => {
                GameSession::Fruit(FruitCatch::new(area.width, area.height, now, rng))
            }
            GameKind::Habitat => GameSession::Habitat(HabitatGame::new(rng)),
            GameKind::Puzzle => GameSession::Puzzle(NumberPuzzle::new(rng)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            GameSession::Memory(_) => GameKind::Memory,
            GameSession::Sort(_) => GameKind::Sort,
            GameSession::Fruit(_) => GameKind::Fruit,
            GameSession::Habitat(_) => GameKind::Habitat,
            GameSession::Puzzle(_) => GameKind::Puzzle,
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            GameSession::Memory(g) => g.is_complete(),
            GameSession::Sort(g) => g.is_complete(),
            GameSession::Fruit(g) => g.is_complete(),
            GameSession::Habitat(g) => g.is_complete(),
            GameSession::Puzzle(g) => g.is_complete(),
        }
    }

    /// Every active game offers a manual restart, whatever its progress.
    pub fn restart_visible(&self) -> bool {
        true
    }

    /// A fresh instance of the same game. The old one, timers included, is
    /// dropped by the caller replacing it.
    pub fn restarted(&self, now: f64, area: PlayArea, rng: &mut impl Rng) -> Self {
        log::info!("restarting {} game", self.kind().key());
        GameSession::start(self.kind(), now, area, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const AREA: PlayArea = PlayArea {
        width: 320.0,
        height: 480.0,
    };

    #[test]
    fn kinds_round_trip() {
        for k in GameKind::ALL {
            assert_eq!(GameKind::from_key(k.key()), Some(k));
        }
        assert_eq!(GameKind::from_key("chess"), None);
    }

    #[test]
    fn shape_keys_and_images() {
        assert_eq!(Shape::from_key("star"), Some(Shape::Star));
        assert_eq!(Shape::Heart.image(), "heart.png");
    }

    #[test]
    fn every_game_starts_incomplete_with_restart_offered() {
        let mut rng = StdRng::seed_from_u64(0);
        for k in GameKind::ALL {
            let s = GameSession::start(k, 0.0, AREA, &mut rng);
            assert_eq!(s.kind(), k);
            assert!(!s.is_complete());
            assert!(s.restart_visible());
        }
    }

    #[test]
    fn restart_drops_pending_fruit_spawner() {
        let mut rng = StdRng::seed_from_u64(0);
        let old = GameSession::start(GameKind::Fruit, 0.0, AREA, &mut rng);
        let mut fresh = old.restarted(500.0, AREA, &mut rng);
        drop(old);
        let GameSession::Fruit(g) = &mut fresh else {
            panic!("expected fruit game");
        };
        // Only the new instance's spawner exists: first spawn at 1500, not 1000.
        assert!(g.advance(1_000.0, &mut rng).spawned.is_empty());
        assert_eq!(g.advance(1_500.0, &mut rng).spawned.len(), 1);
    }

    #[test]
    fn restart_drops_pending_habitat_round() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut old = GameSession::start(GameKind::Habitat, 0.0, AREA, &mut rng);
        let GameSession::Habitat(g) = &mut old else {
            panic!("expected habitat game");
        };
        let keys: Vec<&str> = g.round().iter().map(|p| p.key).collect();
        for (slot, key) in keys.iter().enumerate() {
            g.drop_animal(key, slot, 0.0);
        }
        assert!(g.advancing());

        let mut fresh = old.restarted(100.0, AREA, &mut rng);
        let GameSession::Habitat(g) = &mut fresh else {
            panic!("expected habitat game");
        };
        assert!(!g.advancing());
        // The finished round's deal belonged to the dropped instance.
        assert!(!g.advance(5_000.0, &mut rng));
        assert_eq!(g.rounds_dealt(), 1);
    }
}
