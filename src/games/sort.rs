//! Shape sort: drag each shape onto its silhouette.

use rand::Rng;
use rand::seq::SliceRandom;

use super::Shape;
use super::slots::{DropOutcome, SlotBoard};

#[derive(Debug)]
pub struct ShapeSort {
    board: SlotBoard<Shape>,
}

impl ShapeSort {
    /// Silhouettes in fixed order, tray shuffled.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut tray = Shape::ALL.to_vec();
        tray.shuffle(rng);
        Self {
            board: SlotBoard::new(Shape::ALL, tray),
        }
    }

    pub fn board(&self) -> &SlotBoard<Shape> {
        &self.board
    }

    pub fn drop_shape(&mut self, shape: Shape, slot: usize) -> DropOutcome {
        let outcome = self.board.drop_piece(&shape, slot);
        if outcome == DropOutcome::Completed {
            log::info!("shape sort complete");
        }
        outcome
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }
}
