//! Memory match: twelve face-down cards, six shape pairs.

use rand::Rng;
use rand::seq::SliceRandom;

use super::Shape;
use super::timer::Schedule;

/// Delay before a mismatched pair turns face down again.
pub const FLIP_BACK_MS: f64 = 800.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub shape: Shape,
    pub face: Face,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Board locked, card already face up, or no such card.
    Ignored,
    /// First card of a pair turned over.
    Revealed,
    Matched { complete: bool },
    /// Second card differs; both flip back after `FLIP_BACK_MS`.
    Mismatched,
}

#[derive(Debug)]
pub struct MemoryGame {
    cards: Vec<Card>,
    first: Option<usize>,
    locked: bool,
    pairs_matched: usize,
    flip_back: Schedule<(usize, usize)>,
}

impl MemoryGame {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut shapes: Vec<Shape> = Shape::ALL.iter().chain(Shape::ALL.iter()).copied().collect();
        shapes.shuffle(rng);
        Self::with_layout(&shapes)
    }

    /// Board with cards in the given order, all face down.
    pub fn with_layout(shapes: &[Shape]) -> Self {
        Self {
            cards: shapes
                .iter()
                .map(|&shape| Card {
                    shape,
                    face: Face::Hidden,
                })
                .collect(),
            first: None,
            locked: false,
            pairs_matched: 0,
            flip_back: Schedule::default(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn pairs_matched(&self) -> usize {
        self.pairs_matched
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.pairs_matched * 2 == self.cards.len()
    }

    pub fn tap(&mut self, index: usize, now: f64) -> TapOutcome {
        if self.locked {
            return TapOutcome::Ignored;
        }
        match self.cards.get(index) {
            Some(card) if card.face == Face::Hidden => {}
            _ => return TapOutcome::Ignored,
        }
        self.cards[index].face = Face::Revealed;

        let Some(first) = self.first.take() else {
            self.first = Some(index);
            return TapOutcome::Revealed;
        };

        if self.cards[first].shape == self.cards[index].shape {
            self.cards[first].face = Face::Matched;
            self.cards[index].face = Face::Matched;
            self.pairs_matched += 1;
            let complete = self.is_complete();
            if complete {
                log::info!("memory: all pairs matched");
            }
            TapOutcome::Matched { complete }
        } else {
            self.locked = true;
            self.flip_back.after(now, FLIP_BACK_MS, (first, index));
            TapOutcome::Mismatched
        }
    }

    /// Apply due flip-backs. Returns true when cards changed.
    pub fn advance(&mut self, now: f64) -> bool {
        let due = self.flip_back.due(now);
        for &(a, b) in &due {
            self.cards[a].face = Face::Hidden;
            self.cards[b].face = Face::Hidden;
            self.locked = false;
        }
        !due.is_empty()
    }
}
