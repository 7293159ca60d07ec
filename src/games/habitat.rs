//! Habitat match: put each animal in the place it lives. Every round deals
//! three pairs out of eight; a finished round rolls over to a fresh one.

use rand::Rng;
use rand::seq::SliceRandom;

use super::slots::{DropOutcome, SlotBoard};
use super::timer::Schedule;

pub const ROUND_SIZE: usize = 3;
/// Pause on the success message before the next round is dealt.
pub const NEXT_ROUND_DELAY_MS: f64 = 1200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HabitatPair {
    pub key: &'static str,
    pub animal: &'static str,
    pub habitat: &'static str,
}

pub const HABITAT_POOL: [HabitatPair; 8] = [
    HabitatPair { key: "snow", animal: "🐧", habitat: "❄️" },
    HabitatPair { key: "savannah", animal: "🐘", habitat: "🌴" },
    HabitatPair { key: "forest", animal: "🦌", habitat: "🌲" },
    HabitatPair { key: "ocean", animal: "🐬", habitat: "🌊" },
    HabitatPair { key: "farm", animal: "🐔", habitat: "🌾" },
    HabitatPair { key: "desert", animal: "🐫", habitat: "🏜" },
    HabitatPair { key: "jungle", animal: "🦧", habitat: "🌿" },
    HabitatPair { key: "mountain", animal: "🐻", habitat: "🏔️" },
];

pub fn pair(key: &str) -> Option<&'static HabitatPair> {
    HABITAT_POOL.iter().find(|p| p.key == key)
}

#[derive(Debug)]
pub struct HabitatGame {
    round: Vec<HabitatPair>,
    board: SlotBoard<&'static str>,
    next_round: Schedule<()>,
    rounds_dealt: u32,
}

impl HabitatGame {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut game = Self {
            round: Vec::new(),
            board: SlotBoard::new(Vec::new(), Vec::new()),
            next_round: Schedule::default(),
            rounds_dealt: 0,
        };
        game.deal(rng);
        game
    }

    fn deal(&mut self, rng: &mut impl Rng) {
        self.round = HABITAT_POOL.choose_multiple(rng, ROUND_SIZE).copied().collect();
        let keys: Vec<&'static str> = self.round.iter().map(|p| p.key).collect();
        self.board = SlotBoard::new(keys.clone(), keys);
        self.next_round.clear();
        self.rounds_dealt += 1;
    }

    /// Pairs of the current round, in slot order.
    pub fn round(&self) -> &[HabitatPair] {
        &self.round
    }

    pub fn board(&self) -> &SlotBoard<&'static str> {
        &self.board
    }

    pub fn rounds_dealt(&self) -> u32 {
        self.rounds_dealt
    }

    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }

    /// Round finished and waiting for the automatic next deal.
    pub fn advancing(&self) -> bool {
        !self.next_round.is_empty()
    }

    pub fn drop_animal(&mut self, key: &str, slot: usize, now: f64) -> DropOutcome {
        let Some(pair) = pair(key) else {
            return DropOutcome::Rejected;
        };
        let outcome = self.board.drop_piece(&pair.key, slot);
        if outcome == DropOutcome::Completed {
            log::info!("habitat round {} complete", self.rounds_dealt);
            self.next_round.after(now, NEXT_ROUND_DELAY_MS, ());
        }
        outcome
    }

    /// Deal the next round once its delay is up. Returns true on a new deal.
    pub fn advance(&mut self, now: f64, rng: &mut impl Rng) -> bool {
        if self.next_round.due(now).is_empty() {
            return false;
        }
        self.deal(rng);
        true
    }
}
