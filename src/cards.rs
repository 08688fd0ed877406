//! Utilities for creating cards and decks

use std::fmt;

use rand::Rng;

pub const RANKS: u8 = 13;
pub const SUITS: u8 = 4;
pub const DECK_SIZE: usize = RANKS as usize * SUITS as usize;

/// The four French suits, in deck construction order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; SUITS as usize] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }

    fn index(self) -> u8 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }
}

/// Card rank, ordered Ace (1) through King (13).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    /// Returns the rank with the given value, or `None` outside `1..=13`.
    pub fn new(value: u8) -> Option<Rank> {
        (1..=RANKS).contains(&value).then_some(Rank(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// True iff `self` comes immediately after `other` (e.g. 2 after A).
    pub fn follows(self, other: Rank) -> bool {
        self.0 == other.0 + 1
    }

    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=RANKS).map(Rank)
    }

    pub fn label(self) -> &'static str {
        const RANK_STRINGS: [&str; RANKS as usize] =
            ["A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"];
        RANK_STRINGS[(self.0 - 1) as usize]
    }
}

/// Identity of a card within the single 52-card deck.
///
/// Suit and rank never change, and no two cards in a deck share both, so the
/// id is what piles use to locate a card instead of comparing whole values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(u8);

impl CardId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A display position in layout units. The core only ever publishes the
/// position a card should be shown at; smoothing is left to the renderer.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A struct representing a playing card with a rank and a suit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Card {
    suit: Suit,
    rank: Rank,

    /// Whether the card currently shows its face.
    pub face_up: bool,

    /// Where the card should be drawn.
    pub position: Position,
}

impl Card {
    /// Creates a face-down card with no position assigned.
    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card {
            suit,
            rank,
            face_up: false,
            position: Position::default(),
        }
    }

    /// Same as [`Card::new`] but already turned face up.
    pub fn face_up(suit: Suit, rank: Rank) -> Card {
        Card {
            face_up: true,
            ..Card::new(suit, rank)
        }
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn id(&self) -> CardId {
        CardId(self.suit.index() * RANKS + (self.rank.0 - 1))
    }

    pub fn is_red(&self) -> bool {
        self.suit.is_red()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Creates a standard deck of playing cards.
///
/// # Returns
///
/// A vector of the 52 cards, one per suit and rank pair, all face down and
/// ordered by suit then rank.
pub fn new_standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::all().map(move |rank| Card::new(suit, rank)))
        .collect()
}

/// Shuffles `cards` in place with a Fisher-Yates walk.
///
/// For each index `i` from the last down to 1, a `j` is drawn uniformly from
/// `0..=i` and the two positions are swapped, so every permutation is equally
/// likely given a uniform `rng`.
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn standard_deck_has_every_card_once_face_down() {
        let deck = new_standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        let ids: HashSet<CardId> = deck.iter().map(Card::id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
        assert!(deck.iter().all(|c| !c.face_up));
        assert!(deck.iter().all(|c| c.position == Position::default()));
    }

    #[test]
    fn ids_cover_zero_to_fifty_one() {
        let mut ids: Vec<usize> = new_standard_deck().iter().map(|c| c.id().index()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..DECK_SIZE).collect::<Vec<_>>());
    }

    #[test]
    fn red_suits() {
        assert!(Card::new(Suit::Hearts, Rank::ACE).is_red());
        assert!(Card::new(Suit::Diamonds, Rank::KING).is_red());
        assert!(!Card::new(Suit::Clubs, Rank::ACE).is_red());
        assert!(!Card::new(Suit::Spades, Rank::QUEEN).is_red());
    }

    #[test]
    fn rank_bounds_and_succession() {
        assert!(Rank::new(0).is_none());
        assert!(Rank::new(14).is_none());
        assert_eq!(Rank::new(1), Some(Rank::ACE));
        assert!(Rank::KING.follows(Rank::QUEEN));
        assert!(!Rank::QUEEN.follows(Rank::KING));
        assert!(!Rank::KING.follows(Rank::JACK));
    }

    #[test]
    fn display_uses_rank_label_and_suit_symbol() {
        let ten = Card::new(Suit::Hearts, Rank::new(10).unwrap());
        assert_eq!(ten.to_string(), "10♥");
        assert_eq!(Card::new(Suit::Spades, Rank::QUEEN).to_string(), "Q♠");
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut deck = new_standard_deck();
        shuffle(&mut deck, &mut rng);
        let mut ids: Vec<CardId> = deck.iter().map(Card::id).collect();
        ids.sort_unstable();
        let expected: Vec<CardId> = new_standard_deck().iter().map(Card::id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn shuffle_is_reproducible_from_seed() {
        let mut a = new_standard_deck();
        let mut b = new_standard_deck();
        shuffle(&mut a, &mut ChaCha8Rng::seed_from_u64(99));
        shuffle(&mut b, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
