use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use squares_bot::search::{ALPHA_MIN, BETA_MAX, Outcome, SearchOptions, SearchState, Searcher};
use squares_core::model::card::Card;
use squares_core::model::deck::Deck;
use squares_core::model::score::Tally;
use squares_core::model::side::Side;
use squares_core::model::table::Table;

/// Builds a consistent mid-game position from a seed: both hands, a played
/// prefix whose values make up the table sum, and a small trick tally.
fn random_position(seed: u64) -> (SearchState, Side) {
    let mut rng = StdRng::seed_from_u64(seed);
    let deck = Deck::shuffled(&mut rng);
    let cards = deck.cards();

    let hand_size = rng.gen_range(1..=4);
    let played_len = rng.gen_range(0..=6);
    let mover = Side::to_move(played_len);
    let other_size = if mover == Side::A {
        hand_size
    } else {
        hand_size - 1
    };

    let played: Vec<Card> = cards[..played_len].to_vec();
    let mover_hand: Vec<Card> = cards[played_len..played_len + hand_size].to_vec();
    let other_hand: Vec<Card> =
        cards[played_len + hand_size..played_len + hand_size + other_size].to_vec();

    let sum: u32 = played.iter().map(|c| c.value() as u32).sum();
    let count = rng.gen_range(0..=played_len as u32);
    let tally = Tally::new(rng.gen_range(0..3), rng.gen_range(0..3));
    let deal_size = played_len + hand_size + other_size;

    let (hand_a, hand_b) = match mover {
        Side::A => (mover_hand, other_hand),
        Side::B => (other_hand, mover_hand),
    };
    let state = SearchState::new(hand_a, hand_b, played, Table::new(count, sum), tally)
        .with_deal_size(deal_size);
    (state, mover)
}

fn full_depth(state: &SearchState) -> usize {
    state.hand(Side::A).len() + state.hand(Side::B).len()
}

fn run(state: &mut SearchState, mover: Side, options: SearchOptions) -> (Outcome, u64) {
    let mut searcher = Searcher::new(options);
    let depth = full_depth(state);
    let outcome = searcher.search(state, depth, mover, ALPHA_MIN, BETA_MAX);
    (outcome, searcher.nodes())
}

#[test]
fn pruned_search_matches_plain_minimax() {
    for seed in 0..300 {
        let (mut state, mover) = random_position(seed);
        let (plain, plain_nodes) = run(&mut state, mover, SearchOptions::EXHAUSTIVE);
        let (pruned, pruned_nodes) = run(
            &mut state,
            mover,
            SearchOptions {
                pruning: true,
                rank_memo: false,
            },
        );
        assert_eq!(pruned, plain, "seed {seed}");
        assert!(pruned_nodes <= plain_nodes, "seed {seed}");
    }
}

#[test]
fn rank_memo_matches_plain_minimax() {
    for seed in 0..300 {
        let (mut state, mover) = random_position(seed);
        let (plain, _) = run(&mut state, mover, SearchOptions::EXHAUSTIVE);
        let (memo, _) = run(
            &mut state,
            mover,
            SearchOptions {
                pruning: false,
                rank_memo: true,
            },
        );
        let (both, _) = run(&mut state, mover, SearchOptions::default());
        assert_eq!(memo, plain, "seed {seed}");
        assert_eq!(both, plain, "seed {seed}");
    }
}

#[test]
fn search_restores_the_state_exactly() {
    for seed in 0..100 {
        let (mut state, mover) = random_position(seed);
        let before = state.clone();
        let _ = run(&mut state, mover, SearchOptions::default());
        assert_eq!(state, before, "seed {seed}");
        let _ = run(&mut state, mover, SearchOptions::EXHAUSTIVE);
        assert_eq!(state, before, "seed {seed}");
    }
}

#[test]
fn swapping_suits_within_a_rank_keeps_the_outcome() {
    let mut checked = 0;
    for seed in 0..200 {
        let (mut state, mover) = random_position(seed);
        let expected = run(&mut state, mover, SearchOptions::default()).0;

        let in_use: Vec<Card> = state
            .hand(Side::A)
            .iter()
            .chain(state.hand(Side::B))
            .chain(state.played())
            .copied()
            .collect();
        let Some(&original) = state.hand(mover).first() else {
            continue;
        };
        let Some(&twin) = Deck::standard()
            .cards()
            .iter()
            .find(|card| card.rank == original.rank && !in_use.contains(card))
        else {
            continue;
        };

        let swap = |hand: &[Card]| -> Vec<Card> {
            hand.iter()
                .map(|card| if *card == original { twin } else { *card })
                .collect()
        };
        let mut swapped = SearchState::new(
            swap(state.hand(Side::A)),
            swap(state.hand(Side::B)),
            state.played().to_vec(),
            state.table(),
            state.tally(),
        )
        .with_deal_size(full_depth(&state) + state.played().len());

        assert_eq!(
            run(&mut swapped, mover, SearchOptions::default()).0,
            expected,
            "seed {seed}"
        );
        checked += 1;
    }
    assert!(checked > 100);
}

#[test]
fn hopeless_gap_returns_the_leader_without_expanding() {
    let mut rng = StdRng::seed_from_u64(404);
    let mut cards = Deck::standard().cards().to_vec();
    cards.shuffle(&mut rng);

    let mut behind = SearchState::new(
        cards[..3].to_vec(),
        cards[3..6].to_vec(),
        cards[6..14].to_vec(),
        Table::default(),
        Tally::new(1, 9),
    );
    assert_eq!(behind.remaining_cards(), 6);
    let (outcome, nodes) = run(&mut behind, Side::A, SearchOptions::default());
    assert_eq!(outcome, Outcome::Loss);
    assert_eq!(nodes, 1);

    let mut ahead = SearchState::new(
        cards[..3].to_vec(),
        cards[3..6].to_vec(),
        cards[6..14].to_vec(),
        Table::default(),
        Tally::new(8, 0),
    );
    let (outcome, nodes) = run(&mut ahead, Side::B, SearchOptions::default());
    assert_eq!(outcome, Outcome::Win);
    assert_eq!(nodes, 1);
}
