//! Piles of cards and the ids used to address them

use std::fmt;

use crate::cards::{Card, CardId};
use crate::rules;

pub const FOUNDATIONS: usize = 4;
pub const TABLEAU_COLUMNS: usize = 7;
pub const PILE_COUNT: usize = 2 + FOUNDATIONS + TABLEAU_COLUMNS;

/// Names one of the thirteen piles on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

impl PileId {
    /// Every pile, in field order: stock, waste, foundations, tableau.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain((0..FOUNDATIONS).map(PileId::Foundation))
            .chain((0..TABLEAU_COLUMNS).map(PileId::Tableau))
    }

    /// Whether the id names one of the piles on the board.
    pub fn is_valid(self) -> bool {
        match self {
            PileId::Stock | PileId::Waste => true,
            PileId::Foundation(i) => i < FOUNDATIONS,
            PileId::Tableau(i) => i < TABLEAU_COLUMNS,
        }
    }

    /// Position of the pile in the game's field array, or `None` for a
    /// foundation or column past the end of the board.
    pub fn field_index(self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        Some(match self {
            PileId::Stock => 0,
            PileId::Waste => 1,
            PileId::Foundation(i) => 2 + i,
            PileId::Tableau(i) => 2 + FOUNDATIONS + i,
        })
    }

    pub fn from_field_index(index: usize) -> Option<PileId> {
        match index {
            0 => Some(PileId::Stock),
            1 => Some(PileId::Waste),
            i if i < 2 + FOUNDATIONS => Some(PileId::Foundation(i - 2)),
            i if i < PILE_COUNT => Some(PileId::Tableau(i - 2 - FOUNDATIONS)),
            _ => None,
        }
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PileId::Stock => write!(f, "stock"),
            PileId::Waste => write!(f, "waste"),
            PileId::Foundation(i) => write!(f, "foundation {}", i + 1),
            PileId::Tableau(i) => write!(f, "tableau {}", i + 1),
        }
    }
}

/// An ordered stack of cards. The last card is the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Pile {
    id: PileId,
    cards: Vec<Card>,
}

impl Pile {
    pub fn new(id: PileId) -> Pile {
        Pile { id, cards: Vec::new() }
    }

    pub fn with_cards(id: PileId, cards: Vec<Card>) -> Pile {
        Pile { id, cards }
    }

    pub fn id(&self) -> PileId {
        self.id
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.last_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Index of the card with the given identity, if it is in this pile.
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// Removes and returns every card from `index` to the top.
    pub fn split_off(&mut self, index: usize) -> Vec<Card> {
        self.cards.split_off(index.min(self.cards.len()))
    }

    /// Removes the card with the given identity, wherever it sits.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        self.position_of(id).map(|i| self.cards.remove(i))
    }

    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Card> {
        self.cards.iter_mut()
    }

    /// Whether `run` may be placed on this pile. Stock and waste never accept
    /// cards from the player; foundations take one card at a time.
    pub fn can_accept(&self, run: &[Card]) -> bool {
        match self.id {
            PileId::Stock | PileId::Waste => false,
            PileId::Foundation(_) => match run {
                [card] => rules::can_place_on_foundation(card, self),
                _ => false,
            },
            PileId::Tableau(_) => rules::is_valid_table_placement(run, self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn field_indices_round_trip() {
        for (i, id) in PileId::all().enumerate() {
            assert!(id.is_valid());
            assert_eq!(id.field_index(), Some(i));
            assert_eq!(PileId::from_field_index(i), Some(id));
        }
        assert_eq!(PileId::all().count(), PILE_COUNT);
        assert_eq!(PileId::from_field_index(PILE_COUNT), None);
    }

    #[test]
    fn ids_past_the_board_have_no_slot() {
        assert!(!PileId::Foundation(FOUNDATIONS).is_valid());
        assert!(!PileId::Tableau(TABLEAU_COLUMNS).is_valid());
        assert_eq!(PileId::Foundation(FOUNDATIONS).field_index(), None);
        assert_eq!(PileId::Tableau(TABLEAU_COLUMNS).field_index(), None);
    }

    #[test]
    fn split_off_and_lookup_by_identity() {
        let mut pile = Pile::with_cards(
            PileId::Tableau(0),
            vec![
                Card::new(Suit::Clubs, Rank::KING),
                Card::face_up(Suit::Hearts, Rank::QUEEN),
                Card::face_up(Suit::Spades, Rank::JACK),
            ],
        );
        let queen = Card::face_up(Suit::Hearts, Rank::QUEEN);
        assert_eq!(pile.position_of(queen.id()), Some(1));
        let run = pile.split_off(1);
        assert_eq!(run.len(), 2);
        assert_eq!(pile.len(), 1);
        assert_eq!(pile.position_of(queen.id()), None);
    }

    #[test]
    fn remove_card_ignores_orientation() {
        let mut pile = Pile::with_cards(PileId::Waste, vec![Card::face_up(Suit::Hearts, Rank::ACE)]);
        let removed = pile.remove_card(Card::new(Suit::Hearts, Rank::ACE).id());
        assert!(removed.is_some());
        assert!(pile.is_empty());
    }

    #[test]
    fn stock_and_waste_never_accept() {
        let king = [Card::face_up(Suit::Spades, Rank::KING)];
        let ace = [Card::face_up(Suit::Spades, Rank::ACE)];
        assert!(!Pile::new(PileId::Stock).can_accept(&ace));
        assert!(!Pile::new(PileId::Waste).can_accept(&king));
        assert!(Pile::new(PileId::Foundation(0)).can_accept(&ace));
        assert!(Pile::new(PileId::Tableau(0)).can_accept(&king));
    }

    #[test]
    fn foundation_takes_one_card_at_a_time() {
        let run = [
            Card::face_up(Suit::Spades, Rank::ACE),
            Card::face_up(Suit::Spades, Rank::new(2).unwrap()),
        ];
        assert!(!Pile::new(PileId::Foundation(1)).can_accept(&run));
    }
}
