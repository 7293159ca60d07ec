//! Slot board shared by shape-sort, number-puzzle and habitat-match: a row
//! of target slots and a tray of movable pieces, matched by key.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<K> {
    pub target: K,
    pub filled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Wrong slot, filled slot or unknown piece. Nothing changed.
    Rejected,
    /// Piece consumed and slot filled.
    Placed,
    /// Last piece placed.
    Completed,
}

#[derive(Clone, Debug)]
pub struct SlotBoard<K> {
    slots: Vec<Slot<K>>,
    pieces: Vec<K>,
}

impl<K: PartialEq + Clone> SlotBoard<K> {
    pub fn new(targets: impl IntoIterator<Item = K>, pieces: Vec<K>) -> Self {
        Self {
            slots: targets
                .into_iter()
                .map(|target| Slot {
                    target,
                    filled: false,
                })
                .collect(),
            pieces,
        }
    }

    pub fn slots(&self) -> &[Slot<K>] {
        &self.slots
    }

    /// Pieces still in the tray, in tray order.
    pub fn pieces(&self) -> &[K] {
        &self.pieces
    }

    pub fn is_complete(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Drop `piece` on slot `slot`. Only an exact key match is accepted and
    /// a filled slot stays filled for the rest of the game.
    pub fn drop_piece(&mut self, piece: &K, slot: usize) -> DropOutcome {
        let Some(target) = self.slots.get_mut(slot) else {
            return DropOutcome::Rejected;
        };
        if target.filled || target.target != *piece {
            log::debug!("drop rejected on slot {slot}");
            return DropOutcome::Rejected;
        }
        let Some(pos) = self.pieces.iter().position(|p| p == piece) else {
            return DropOutcome::Rejected;
        };
        self.pieces.remove(pos);
        target.filled = true;
        if self.pieces.is_empty() {
            DropOutcome::Completed
        } else {
            DropOutcome::Placed
        }
    }
}
