use felt_engine::cards::{Card, Rank, Suit};
use felt_engine::errors::EngineError;
use felt_engine::hand::{evaluate, RankClass};

fn card(rank: Rank, suit: Suit) -> Card {
    Card { suit, rank }
}

fn hearts(rank: Rank) -> Card {
    card(rank, Suit::Hearts)
}

#[test]
fn evaluation_is_invariant_to_input_order() {
    let mut cards = vec![
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::King, Suit::Diamonds),
        card(Rank::Nine, Suit::Clubs),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Three, Suit::Spades),
        card(Rank::Two, Suit::Diamonds),
    ];
    let baseline = evaluate(&cards).unwrap();
    cards.reverse();
    assert_eq!(evaluate(&cards).unwrap().score, baseline.score);
    cards.rotate_left(3);
    assert_eq!(evaluate(&cards).unwrap().score, baseline.score);
    cards.swap(0, 4);
    assert_eq!(evaluate(&cards).unwrap().score, baseline.score);
}

#[test]
fn accepts_five_to_seven_cards_only() {
    let five = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::King, Suit::Hearts),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Five, Suit::Clubs),
        card(Rank::Two, Suit::Hearts),
    ];
    assert_eq!(evaluate(&five).unwrap().class, RankClass::HighCard);

    let six = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::King, Suit::Diamonds),
        card(Rank::Nine, Suit::Clubs),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Two, Suit::Diamonds),
    ];
    assert_eq!(evaluate(&six).unwrap().class, RankClass::OnePair);

    assert_eq!(
        evaluate(&five[..4]),
        Err(EngineError::InvalidCardCount(4))
    );
}

#[test]
fn wheel_is_a_five_high_straight() {
    let wheel = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Three, Suit::Diamonds),
        card(Rank::Four, Suit::Clubs),
        card(Rank::Five, Suit::Hearts),
    ];
    let six_high = [
        card(Rank::Two, Suit::Spades),
        card(Rank::Three, Suit::Hearts),
        card(Rank::Four, Suit::Diamonds),
        card(Rank::Five, Suit::Clubs),
        card(Rank::Six, Suit::Hearts),
    ];
    let trips = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::King, Suit::Clubs),
        card(Rank::Queen, Suit::Hearts),
    ];

    let wheel = evaluate(&wheel).unwrap();
    let six_high = evaluate(&six_high).unwrap();
    let trips = evaluate(&trips).unwrap();

    assert_eq!(wheel.class, RankClass::Straight);
    assert!(wheel.score < six_high.score, "wheel loses to 2-3-4-5-6");
    assert!(
        wheel.score > trips.score,
        "any straight beats any non-straight hand"
    );
}

#[test]
fn royal_flush_is_its_own_class_above_straight_flush() {
    let royal = [
        hearts(Rank::Ace),
        hearts(Rank::King),
        hearts(Rank::Queen),
        hearts(Rank::Jack),
        hearts(Rank::Ten),
        card(Rank::Two, Suit::Clubs),
        card(Rank::Three, Suit::Diamonds),
    ];
    let king_high_sf = [
        hearts(Rank::Nine),
        hearts(Rank::King),
        hearts(Rank::Queen),
        hearts(Rank::Jack),
        hearts(Rank::Ten),
        card(Rank::Two, Suit::Clubs),
        card(Rank::Three, Suit::Diamonds),
    ];

    let royal = evaluate(&royal).unwrap();
    let sf = evaluate(&king_high_sf).unwrap();
    assert_eq!(royal.class, RankClass::RoyalFlush);
    assert_eq!(sf.class, RankClass::StraightFlush);
    assert!(royal.score > sf.score);
}

#[test]
fn class_ordering_matches_poker_rankings() {
    let quads = evaluate(&[
        card(Rank::Nine, Suit::Spades),
        card(Rank::Nine, Suit::Hearts),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Nine, Suit::Clubs),
        card(Rank::Two, Suit::Hearts),
    ])
    .unwrap();
    let full_house = evaluate(&[
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::King, Suit::Clubs),
        card(Rank::King, Suit::Hearts),
    ])
    .unwrap();
    let flush = evaluate(&[
        hearts(Rank::Ace),
        hearts(Rank::Jack),
        hearts(Rank::Nine),
        hearts(Rank::Six),
        hearts(Rank::Three),
    ])
    .unwrap();
    let straight = evaluate(&[
        card(Rank::Ace, Suit::Spades),
        card(Rank::King, Suit::Hearts),
        card(Rank::Queen, Suit::Diamonds),
        card(Rank::Jack, Suit::Clubs),
        card(Rank::Ten, Suit::Hearts),
    ])
    .unwrap();

    assert_eq!(quads.class, RankClass::FourOfAKind);
    assert_eq!(full_house.class, RankClass::FullHouse);
    assert_eq!(flush.class, RankClass::Flush);
    assert_eq!(straight.class, RankClass::Straight);
    assert_eq!(quads.compare(&full_house), std::cmp::Ordering::Greater);
    assert!(quads.score > full_house.score);
    assert!(full_house.score > flush.score);
    assert!(flush.score > straight.score);
}

#[test]
fn kickers_break_ties_in_significance_order() {
    let board = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::King, Suit::Diamonds),
        card(Rank::King, Suit::Clubs),
        card(Rank::Four, Suit::Hearts),
    ];
    let mut queen_kicker = board.to_vec();
    queen_kicker.push(card(Rank::Queen, Suit::Spades));
    queen_kicker.push(card(Rank::Two, Suit::Clubs));
    let mut jack_kicker = board.to_vec();
    jack_kicker.push(card(Rank::Jack, Suit::Spades));
    jack_kicker.push(card(Rank::Two, Suit::Diamonds));

    let queen = evaluate(&queen_kicker).unwrap();
    let jack = evaluate(&jack_kicker).unwrap();
    assert_eq!(queen.class, RankClass::TwoPair);
    assert_eq!(jack.class, RankClass::TwoPair);
    assert!(queen.score > jack.score);
}

#[test]
fn equal_scores_always_share_a_rank_class() {
    // The same nine-high straight assembled from different suits and
    // different kicker junk must collide exactly, class included.
    let a = evaluate(&[
        card(Rank::Nine, Suit::Spades),
        card(Rank::Eight, Suit::Hearts),
        card(Rank::Seven, Suit::Diamonds),
        card(Rank::Six, Suit::Clubs),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Two, Suit::Spades),
        card(Rank::Two, Suit::Diamonds),
    ])
    .unwrap();
    let b = evaluate(&[
        card(Rank::Nine, Suit::Clubs),
        card(Rank::Eight, Suit::Diamonds),
        card(Rank::Seven, Suit::Spades),
        card(Rank::Six, Suit::Hearts),
        card(Rank::Five, Suit::Clubs),
        card(Rank::Three, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
    ])
    .unwrap();

    assert_eq!(a.score, b.score);
    assert_eq!(a.class, b.class);
}

#[test]
fn best_five_is_drawn_from_all_seven() {
    let cards = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Ace, Suit::Clubs),
        card(Rank::Queen, Suit::Hearts),
        card(Rank::Jack, Suit::Spades),
        card(Rank::Four, Suit::Diamonds),
    ];
    let strength = evaluate(&cards).unwrap();
    assert_eq!(strength.class, RankClass::OnePair);
    let aces = strength
        .best_five
        .iter()
        .filter(|c| c.rank == Rank::Ace)
        .count();
    assert_eq!(aces, 2, "both aces belong in the best five");
    assert!(
        !strength.best_five.iter().any(|c| c.rank == Rank::Two),
        "the deuce is never part of the best five here"
    );
}

#[test]
fn flush_takes_the_top_five_of_the_suit() {
    let cards = [
        hearts(Rank::Ace),
        hearts(Rank::Ten),
        hearts(Rank::Eight),
        hearts(Rank::Six),
        hearts(Rank::Four),
        hearts(Rank::Two),
        card(Rank::King, Suit::Spades),
    ];
    let strength = evaluate(&cards).unwrap();
    assert_eq!(strength.class, RankClass::Flush);
    assert!(
        !strength.best_five.iter().any(|c| c.rank == Rank::Two),
        "the lowest heart is dropped from a six-card flush"
    );
}

#[test]
fn straight_outranks_a_pair_sharing_the_board() {
    let cards = [
        card(Rank::Ten, Suit::Spades),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Eight, Suit::Clubs),
        card(Rank::Seven, Suit::Hearts),
        card(Rank::Six, Suit::Spades),
        card(Rank::Two, Suit::Diamonds),
    ];
    let strength = evaluate(&cards).unwrap();
    assert_eq!(strength.class, RankClass::Straight);
}
