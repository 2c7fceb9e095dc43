use super::outcome::Outcome;
use squares_core::model::card::Card;
use squares_core::model::score::Tally;
use squares_core::model::side::Side;
use squares_core::model::table::Table;

/// Cards played over a full game, used to bound how far behind a side can be
/// and still catch up.
pub const DEFAULT_DEAL_SIZE: usize = 14;

/// Position explored by the search.
///
/// The state is edited in place while descending and every edit is rolled
/// back on the way up, so one allocation serves a whole search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    hands: [Vec<Card>; 2],
    played: Vec<Card>,
    table: Table,
    tally: Tally,
    deal_size: usize,
}

/// Everything needed to reverse one [`SearchState::apply`].
#[must_use = "a play must be undone to restore the search state"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayUndo {
    side: Side,
    index: usize,
    card: Card,
    table: Table,
    tally: Tally,
}

impl PlayUndo {
    pub fn card(&self) -> Card {
        self.card
    }
}

impl SearchState {
    /// Builds a state from both hands. Panics if any card appears twice
    /// across the hands and the played sequence.
    pub fn new(
        hand_a: Vec<Card>,
        hand_b: Vec<Card>,
        played: Vec<Card>,
        table: Table,
        tally: Tally,
    ) -> Self {
        let state = Self {
            hands: [hand_a, hand_b],
            played,
            table,
            tally,
            deal_size: DEFAULT_DEAL_SIZE,
        };
        state.assert_disjoint();
        state
    }

    /// Places the acting hand on `acting`'s side and the sampled hand on the other.
    pub fn for_acting(
        acting: Side,
        acting_hand: &[Card],
        opponent_hand: Vec<Card>,
        played: &[Card],
        table: Table,
        tally: Tally,
    ) -> Self {
        let (hand_a, hand_b) = match acting {
            Side::A => (acting_hand.to_vec(), opponent_hand),
            Side::B => (opponent_hand, acting_hand.to_vec()),
        };
        Self::new(hand_a, hand_b, played.to_vec(), table, tally)
    }

    pub fn with_deal_size(mut self, deal_size: usize) -> Self {
        self.deal_size = deal_size;
        self
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

    pub fn remaining_cards(&self) -> usize {
        self.deal_size.saturating_sub(self.played.len())
    }

    /// True once the trailing side can no longer close the trick gap.
    pub fn is_decided(&self) -> bool {
        self.tally.gap() as usize > self.remaining_cards()
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_tally(self.tally)
    }

    /// Plays the card at `index` of `side`'s hand and credits `side` if the
    /// table reaches a checkpoint.
    pub fn apply(&mut self, side: Side, index: usize) -> PlayUndo {
        let undo = PlayUndo {
            side,
            index,
            card: self.hands[side.index()][index],
            table: self.table,
            tally: self.tally,
        };
        let card = self.hands[side.index()].remove(index);
        self.played.push(card);
        if let Some(tricks) = self.table.place(card) {
            self.tally.credit(side, tricks);
        }
        undo
    }

    pub fn undo(&mut self, undo: PlayUndo) {
        let card = self.played.pop();
        assert_eq!(card, Some(undo.card), "undo out of order");
        self.hands[undo.side.index()].insert(undo.index, undo.card);
        self.table = undo.table;
        self.tally = undo.tally;
    }

    /// Runs `explore` with the play applied and rolls it back afterwards,
    /// whatever `explore` returns.
    pub fn with_play<R>(
        &mut self,
        side: Side,
        index: usize,
        explore: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let undo = self.apply(side, index);
        let result = explore(self);
        self.undo(undo);
        result
    }

    fn assert_disjoint(&self) {
        let all = self.hands[0]
            .iter()
            .chain(self.hands[1].iter())
            .chain(self.played.iter());
        for (position, card) in all.clone().enumerate() {
            assert!(
                !all.clone().skip(position + 1).any(|other| other == card),
                "{card} appears more than once in the search state"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchState;
    use crate::search::Outcome;
    use squares_core::model::card::Card;
    use squares_core::model::score::Tally;
    use squares_core::model::side::Side;
    use squares_core::model::table::Table;

    fn cards(text: &str) -> Vec<Card> {
        text.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn sample_state() -> SearchState {
        SearchState::new(
            cards("3C 7H AS 5D"),
            cards("2C 3S 9H"),
            cards("4D"),
            Table::new(1, 4),
            Tally::new(2, 1),
        )
    }

    #[test]
    fn apply_then_undo_restores_everything() {
        let mut state = sample_state();
        let before = state.clone();
        for side in Side::LOOP {
            for index in 0..state.hand(side).len() {
                let undo = state.apply(side, index);
                assert_ne!(state, before);
                state.undo(undo);
                assert_eq!(state, before);
            }
        }
    }

    #[test]
    fn nested_plays_unwind_in_order() {
        let mut state = sample_state();
        let before = state.clone();
        let first = state.apply(Side::A, 2);
        let second = state.apply(Side::B, 0);
        let third = state.apply(Side::A, 0);
        assert_eq!(state.played().len(), 4);
        state.undo(third);
        state.undo(second);
        state.undo(first);
        assert_eq!(state, before);
    }

    #[test]
    fn with_play_restores_after_the_closure() {
        let mut state = sample_state();
        let before = state.clone();
        let seen = state.with_play(Side::B, 1, |inner| {
            inner.with_play(Side::A, 3, |deeper| deeper.played().to_vec())
        });
        assert_eq!(seen, cards("4D 3S 5D"));
        assert_eq!(state, before);
    }

    #[test]
    fn checkpoint_credits_the_mover_and_clears_the_count() {
        // Table sum 4 + 5 = 9.
        let mut state = sample_state();
        let undo = state.apply(Side::A, 3);
        assert_eq!(undo.card(), "5D".parse().unwrap());
        assert_eq!(state.table(), Table::new(0, 9));
        assert_eq!(state.tally(), Tally::new(4, 1));
        state.undo(undo);

        let mut state = SearchState::new(
            cards("2C"),
            cards("5D"),
            Vec::new(),
            Table::new(2, 11),
            Tally::default(),
        );
        let undo = state.apply(Side::B, 0);
        assert_eq!(state.table(), Table::new(0, 16));
        assert_eq!(state.tally(), Tally::new(0, 3));
        state.undo(undo);
        assert_eq!(state.table(), Table::new(2, 11));
    }

    #[test]
    fn decided_when_gap_exceeds_remaining_cards() {
        let state = SearchState::new(
            cards("2C"),
            cards("3C"),
            cards("4C 5C 6C 7C"),
            Table::default(),
            Tally::new(0, 5),
        )
        .with_deal_size(8);
        assert_eq!(state.remaining_cards(), 4);
        assert!(state.is_decided());
        assert_eq!(state.outcome(), Outcome::Loss);

        let close = state.clone().with_deal_size(9);
        assert!(!close.is_decided());
    }

    #[test]
    fn acting_hand_lands_on_the_acting_side() {
        let state = SearchState::for_acting(
            Side::B,
            &cards("2C 3C"),
            cards("4C"),
            &cards("5C"),
            Table::default(),
            Tally::default(),
        );
        assert_eq!(state.hand(Side::B), cards("2C 3C"));
        assert_eq!(state.hand(Side::A), cards("4C"));
    }

    #[test]
    #[should_panic(expected = "appears more than once")]
    fn overlapping_cards_fail_fast() {
        let _ = SearchState::new(
            cards("2C 3C"),
            cards("3C"),
            Vec::new(),
            Table::default(),
            Tally::default(),
        );
    }
}
