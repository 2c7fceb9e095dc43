use rand::Rng;
use rand::seq::SliceRandom;
use squares_core::model::card::Card;
use squares_core::model::deck::Deck;

/// Number of cards the opponent still holds. When an odd number of cards has
/// been played the opponent is one card ahead of us in the current round.
pub fn opponent_hand_size(hand_len: usize, played_len: usize) -> usize {
    if played_len % 2 == 0 {
        hand_len
    } else {
        hand_len.saturating_sub(1)
    }
}

/// Draws hypothetical opponent hands from the cards we have not seen.
#[derive(Debug, Clone)]
pub struct OpponentSampler {
    unseen: Vec<Card>,
    hand_size: usize,
}

impl OpponentSampler {
    pub fn new(deck: &Deck, hand: &[Card], played: &[Card]) -> Self {
        let unseen = deck.unseen(hand, played);
        let hand_size = opponent_hand_size(hand.len(), played.len()).min(unseen.len());
        Self { unseen, hand_size }
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn unseen(&self) -> &[Card] {
        &self.unseen
    }

    /// Shuffles the unseen pool and returns its first `hand_size` cards.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Card> {
        let (hand, _) = self.unseen.partial_shuffle(rng, self.hand_size);
        hand.to_vec()
    }
}
