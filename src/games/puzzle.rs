//! Number puzzle: drag tiles 1-9 into their numbered slots.

use rand::Rng;
use rand::seq::SliceRandom;

use super::slots::{DropOutcome, SlotBoard};

pub const PUZZLE_SIZE: u8 = 9;

#[derive(Debug)]
pub struct NumberPuzzle {
    board: SlotBoard<u8>,
}

impl NumberPuzzle {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut tray: Vec<u8> = (1..=PUZZLE_SIZE).collect();
        tray.shuffle(rng);
        Self {
            board: SlotBoard::new(1..=PUZZLE_SIZE, tray),
        }
    }

    pub fn board(&self) -> &SlotBoard<u8> {
        &self.board
    }

    pub fn drop_number(&mut self, value: u8, slot: usize) -> DropOutcome {
        let outcome = self.board.drop_piece(&value, slot);
        if outcome == DropOutcome::Completed {
            log::info!("number puzzle complete");
        }
        outcome
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn slots_are_numbered_in_order() {
        let p = NumberPuzzle::new(&mut StdRng::seed_from_u64(1));
        let targets: Vec<u8> = p.board().slots().iter().map(|s| s.target).collect();
        assert_eq!(targets, (1..=9).collect::<Vec<u8>>());
        assert_eq!(p.board().pieces().len(), 9);
    }

    #[test]
    fn solving_in_any_order_completes() {
        let mut p = NumberPuzzle::new(&mut StdRng::seed_from_u64(5));
        let tray = p.board().pieces().to_vec();
        for (n, value) in tray.iter().enumerate() {
            let outcome = p.drop_number(*value, (*value - 1) as usize);
            if n + 1 == tray.len() {
                assert_eq!(outcome, DropOutcome::Completed);
            } else {
                assert_eq!(outcome, DropOutcome::Placed);
            }
        }
        assert!(p.is_complete());
    }

    #[test]
    fn off_by_one_drop_rejected() {
        let mut p = NumberPuzzle::new(&mut StdRng::seed_from_u64(5));
        assert_eq!(p.drop_number(4, 4), DropOutcome::Rejected);
        assert_eq!(p.board().pieces().len(), 9);
    }
}
