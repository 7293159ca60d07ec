//! Fruit catch: fruit falls from the top, tap it before it leaves the
//! play area. Ten catches win.

use rand::Rng;
use rand::seq::SliceRandom;

use super::timer::Interval;

pub const SPAWN_INTERVAL_MS: f64 = 1000.0;
pub const FALL_TICK_MS: f64 = 20.0;
pub const CATCH_GOAL: u32 = 10;
/// Fruit element size; also the spawn height above the area.
pub const FRUIT_SIZE: f64 = 40.0;
pub const MIN_SPEED: f64 = 2.0;
pub const MAX_SPEED: f64 = 5.0;

pub const FRUIT_EMOJIS: [&str; 6] = ["🍎", "🍌", "🍇", "🍊", "🍓", "🍍"];
pub const FRUIT_COLORS: [&str; 10] = [
    "#E74C3C", "#E67E22", "#F1C40F", "#27AE60", "#3498DB", "#9B59B6", "#FF66CC", "#8E44AD",
    "#1ABC9C", "#F39C12",
];

#[derive(Clone, Debug)]
pub struct Fruit {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    /// Pixels per fall tick.
    pub speed: f64,
    pub emoji: &'static str,
    pub color: &'static str,
    ticker: Interval,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatchOutcome {
    /// No live fruit with that id, or the game is already won.
    Ignored,
    Caught { score: u32 },
    Won { score: u32 },
}

/// What changed during `advance`, for the view to mirror.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FruitFrame {
    pub spawned: Vec<u32>,
    pub missed: Vec<u32>,
}

#[derive(Debug)]
pub struct FruitCatch {
    width: f64,
    height: f64,
    fruits: Vec<Fruit>,
    spawner: Interval,
    score: u32,
    caught: u32,
    next_id: u32,
}

impl FruitCatch {
    /// Start with one fruit already falling; the spawner adds one per second.
    pub fn new(width: f64, height: f64, now: f64, rng: &mut impl Rng) -> Self {
        let mut game = Self {
            width,
            height,
            fruits: Vec::new(),
            spawner: Interval::new(SPAWN_INTERVAL_MS, now),
            score: 0,
            caught: 0,
            next_id: 0,
        };
        game.spawn(now, rng);
        game
    }

    fn spawn(&mut self, at: f64, rng: &mut impl Rng) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let max_x = (self.width - FRUIT_SIZE).max(0.0);
        self.fruits.push(Fruit {
            id,
            x: rng.gen_range(0.0..=max_x),
            y: -FRUIT_SIZE,
            speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
            emoji: FRUIT_EMOJIS.choose(rng).copied().unwrap_or("🍎"),
            color: FRUIT_COLORS.choose(rng).copied().unwrap_or("#E74C3C"),
            ticker: Interval::new(FALL_TICK_MS, at),
        });
        id
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn fruit(&self, id: u32) -> Option<&Fruit> {
        self.fruits.iter().find(|f| f.id == id)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn caught(&self) -> u32 {
        self.caught
    }

    pub fn spawning(&self) -> bool {
        self.spawner.running()
    }

    pub fn is_complete(&self) -> bool {
        self.caught >= CATCH_GOAL
    }

    /// Run spawns and fall ticks up to `now`. Fruit below the bottom edge is
    /// removed as missed, without penalty.
    pub fn advance(&mut self, now: f64, rng: &mut impl Rng) -> FruitFrame {
        let mut frame = FruitFrame::default();
        for at in self.spawner.drain(now) {
            frame.spawned.push(self.spawn(at, rng));
        }
        let height = self.height;
        for fruit in &mut self.fruits {
            let ticks = fruit.ticker.drain(now).len();
            fruit.y += fruit.speed * ticks as f64;
        }
        self.fruits.retain(|f| {
            let gone = f.y > height;
            if gone {
                frame.missed.push(f.id);
            }
            !gone
        });
        frame
    }

    pub fn tap(&mut self, id: u32) -> CatchOutcome {
        if self.is_complete() {
            return CatchOutcome::Ignored;
        }
        let Some(pos) = self.fruits.iter().position(|f| f.id == id) else {
            return CatchOutcome::Ignored;
        };
        self.fruits.remove(pos);
        self.score += 1;
        self.caught += 1;
        if self.is_complete() {
            self.spawner.stop();
            log::info!("fruit catch won with {} catches", self.caught);
            CatchOutcome::Won { score: self.score }
        } else {
            CatchOutcome::Caught { score: self.score }
        }
    }
}
