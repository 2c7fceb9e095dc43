use crate::model::card::Card;
use serde::{Deserialize, Serialize};

/// Table sums at which the cards lying on the table are collected.
///
/// A full 14-card game never puts more than 122 points on the table, so the
/// list stops at 11².
pub const CHECKPOINTS: [u32; 11] = [1, 4, 9, 16, 25, 36, 49, 64, 81, 100, 121];

pub fn is_checkpoint(sum: u32) -> bool {
    CHECKPOINTS.contains(&sum)
}

/// Cards accumulated on the table since the last collection.
///
/// `count` is reset whenever a checkpoint is reached; `sum` keeps running for
/// the whole game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    pub count: u32,
    pub sum: u32,
}

impl Table {
    pub const fn new(count: u32, sum: u32) -> Self {
        Self { count, sum }
    }

    /// Puts a card on the table. Returns the number of tricks the player of
    /// this card collects, if the new sum hits a checkpoint.
    pub fn place(&mut self, card: Card) -> Option<u32> {
        self.count += 1;
        self.sum += card.value() as u32;
        if is_checkpoint(self.sum) {
            let collected = self.count;
            self.count = 0;
            Some(collected)
        } else {
            None
        }
    }
}
