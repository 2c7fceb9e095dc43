use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use squares_core::game::round::{PlayError, PlayOutcome, RoundState};
use squares_core::game::snapshot::DecisionSnapshot;
use squares_core::model::deck::Deck;
use squares_core::model::side::Side;
use squares_core::model::table::is_checkpoint;

fn seeds(count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(20240917);
    (0..count).map(|_| rng.next_u64()).collect()
}

#[test]
fn random_rounds_keep_table_and_tally_consistent() {
    for seed in seeds(64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        let mut round = RoundState::deal(&deck, 7);
        let mut collected = 0u32;

        while !round.is_complete() {
            let side = round.to_move();
            let card = *round
                .hand(side)
                .choose(&mut rng)
                .expect("mover holds a card");
            let before = round.tally();

            match round.play(side, card).expect("legal play") {
                PlayOutcome::Played => {
                    assert!(!is_checkpoint(round.table().sum));
                    assert_eq!(round.tally(), before);
                }
                PlayOutcome::Collected { side: taker, tricks } => {
                    assert_eq!(taker, side);
                    assert!(is_checkpoint(round.table().sum));
                    assert_eq!(round.table().count, 0);
                    assert_eq!(round.tally().tricks(side), before.tricks(side) + tricks);
                    assert_eq!(
                        round.tally().tricks(side.opponent()),
                        before.tricks(side.opponent())
                    );
                    collected += tricks;
                }
            }

            let played_value: u32 = round.played().iter().map(|c| u32::from(c.value())).sum();
            assert_eq!(round.table().sum, played_value);
            assert_eq!(
                collected + round.table().count,
                round.played().len() as u32
            );
        }

        assert_eq!(round.played().len(), 14);
        let tally = round.tally();
        assert_eq!(tally.a + tally.b, collected);
        assert!(Side::LOOP.iter().all(|side| round.hand(*side).is_empty()));
    }
}

#[test]
fn finished_round_rejects_further_play() {
    let deck = Deck::shuffled_with_seed(3);
    let mut round = RoundState::deal(&deck, 1);
    let first = round.hand(Side::A)[0];
    let second = round.hand(Side::B)[0];
    round.play(Side::A, first).expect("A plays");
    round.play(Side::B, second).expect("B plays");

    assert!(round.is_complete());
    assert_eq!(round.play(Side::A, first), Err(PlayError::RoundComplete));
}

#[test]
fn snapshots_taken_mid_round_survive_json() {
    let deck = Deck::shuffled_with_seed(77);
    let mut round = RoundState::deal(&deck, 7);
    for _ in 0..5 {
        let side = round.to_move();
        let card = round.hand(side)[0];
        round.play(side, card).expect("legal play");
    }

    let snapshot = DecisionSnapshot::capture(&round);
    assert_eq!(snapshot.side(), Side::B);
    assert_eq!(snapshot.hand.len(), 5);

    let json = snapshot.to_json().expect("serialize");
    let decoded = DecisionSnapshot::from_json(&json).expect("deserialize");
    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.table(), round.table());
    assert_eq!(decoded.tally(), round.tally());
}
