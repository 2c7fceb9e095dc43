use crate::search::Outcome;
use squares_core::model::card::Card;
use std::collections::HashMap;

/// Per-card win and loss counts gathered over sampled hands.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    wins: HashMap<Card, u32>,
    losses: HashMap<Card, u32>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a decisive result for `card`, seen from the acting side. Draws
    /// leave the ledger unchanged.
    pub fn record(&mut self, card: Card, outcome: Outcome) {
        match outcome {
            Outcome::Win => *self.wins.entry(card).or_insert(0) += 1,
            Outcome::Loss => *self.losses.entry(card).or_insert(0) += 1,
            Outcome::Draw => {}
        }
    }

    pub fn wins(&self, card: Card) -> u32 {
        self.wins.get(&card).copied().unwrap_or(0)
    }

    pub fn losses(&self, card: Card) -> u32 {
        self.losses.get(&card).copied().unwrap_or(0)
    }

    pub fn net(&self, card: Card) -> i64 {
        self.wins(card) as i64 - self.losses(card) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty() && self.losses.is_empty()
    }

    /// Card with the strictly greatest net score, scanning `hand` in order so
    /// the earliest position wins ties. `None` when nothing was recorded.
    pub fn best(&self, hand: &[Card]) -> Option<(Card, i64)> {
        if self.is_empty() {
            return None;
        }
        let mut best: Option<(Card, i64)> = None;
        for &card in hand {
            let net = self.net(card);
            match best {
                Some((_, best_net)) if net <= best_net => {}
                _ => best = Some((card, net)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::search::Outcome;
    use squares_core::model::card::Card;

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    #[test]
    fn draws_are_not_counted() {
        let mut ledger = Ledger::new();
        ledger.record(card("2C"), Outcome::Draw);
        assert!(ledger.is_empty());
        assert_eq!(ledger.best(&[card("2C")]), None);
    }

    #[test]
    fn net_is_wins_minus_losses() {
        let mut ledger = Ledger::new();
        ledger.record(card("2C"), Outcome::Win);
        ledger.record(card("2C"), Outcome::Win);
        ledger.record(card("2C"), Outcome::Loss);
        assert_eq!(ledger.wins(card("2C")), 2);
        assert_eq!(ledger.losses(card("2C")), 1);
        assert_eq!(ledger.net(card("2C")), 1);
        assert_eq!(ledger.net(card("9H")), 0);
    }

    #[test]
    fn unseen_cards_score_zero_and_can_win() {
        let mut ledger = Ledger::new();
        ledger.record(card("2C"), Outcome::Loss);
        let hand = [card("2C"), card("5D")];
        assert_eq!(ledger.best(&hand), Some((card("5D"), 0)));
    }

    #[test]
    fn ties_go_to_the_earlier_position() {
        let mut ledger = Ledger::new();
        ledger.record(card("5D"), Outcome::Win);
        ledger.record(card("2C"), Outcome::Win);
        let hand = [card("2C"), card("5D")];
        assert_eq!(ledger.best(&hand), Some((card("2C"), 1)));
    }
}
