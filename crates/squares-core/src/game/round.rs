use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::score::Tally;
use crate::model::side::Side;
use crate::model::table::Table;
use std::fmt;

/// A two-sided round: both hands, the cards played so far, the table and the
/// tricks each side has collected.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Vec<Card>; 2],
    played: Vec<Card>,
    table: Table,
    tally: Tally,
}

impl RoundState {
    /// Deals `hand_size` cards to each side, alternating from the top of the deck.
    pub fn deal(deck: &Deck, hand_size: usize) -> Self {
        assert!(
            hand_size * 2 <= deck.cards().len(),
            "deck cannot supply two hands of {hand_size}"
        );
        let mut hands = [Vec::with_capacity(hand_size), Vec::with_capacity(hand_size)];
        for (index, card) in deck.cards().iter().take(hand_size * 2).enumerate() {
            hands[index % 2].push(*card);
        }
        Self::from_hands(hands)
    }

    pub fn from_hands(hands: [Vec<Card>; 2]) -> Self {
        Self {
            hands,
            played: Vec::new(),
            table: Table::default(),
            tally: Tally::default(),
        }
    }

    pub fn hand(&self, side: Side) -> &[Card] {
        &self.hands[side.index()]
    }

    pub fn played(&self) -> &[Card] {
        &self.played
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn to_move(&self) -> Side {
        Side::to_move(self.played.len())
    }

    pub fn is_complete(&self) -> bool {
        self.hands[self.to_move().index()].is_empty()
    }

    pub fn play(&mut self, side: Side, card: Card) -> Result<PlayOutcome, PlayError> {
        if self.is_complete() {
            return Err(PlayError::RoundComplete);
        }

        let expected = self.to_move();
        if expected != side {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: side,
            });
        }

        let hand = &mut self.hands[side.index()];
        let Some(index) = hand.iter().position(|held| *held == card) else {
            return Err(PlayError::CardNotInHand(card));
        };
        hand.remove(index);
        self.played.push(card);

        match self.table.place(card) {
            Some(tricks) => {
                self.tally.credit(side, tricks);
                Ok(PlayOutcome::Collected { side, tricks })
            }
            None => Ok(PlayOutcome::Played),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    Collected { side: Side, tricks: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    RoundComplete,
    OutOfTurn { expected: Side, actual: Side },
    CardNotInHand(Card),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::RoundComplete => write!(f, "round already complete"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected side {expected} to play next but got {actual}")
            }
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in the hand"),
        }
    }
}

impl std::error::Error for PlayError {}
