//! Placement legality. Every move the player attempts is checked by exactly
//! one of these predicates; none of them touch game state.

use crate::cards::{Card, Rank};
use crate::pile::Pile;

/// An Ace starts an empty foundation; otherwise the card must be the same
/// suit as the top card and exactly one rank higher.
pub fn can_place_on_foundation(card: &Card, foundation: &Pile) -> bool {
    match foundation.top() {
        None => card.rank() == Rank::ACE,
        Some(top) => card.suit() == top.suit() && card.rank().follows(top.rank()),
    }
}

/// A King starts an empty column; otherwise the card must be the opposite
/// color of the top card and exactly one rank lower.
pub fn can_place_on_tableau(card: &Card, tableau: &Pile) -> bool {
    match tableau.top() {
        None => card.rank() == Rank::KING,
        Some(top) => stacks_on(card, top),
    }
}

/// True iff `cards` is non-empty and each card stacks on the one before it.
pub fn is_valid_sequence(cards: &[Card]) -> bool {
    !cards.is_empty() && cards.windows(2).all(|pair| stacks_on(&pair[1], &pair[0]))
}

/// A run may land on a column if it is a valid sequence and its first card
/// may be placed there.
pub fn is_valid_table_placement(cards: &[Card], target: &Pile) -> bool {
    match cards.first() {
        Some(first) => can_place_on_tableau(first, target) && is_valid_sequence(cards),
        None => false,
    }
}

fn stacks_on(card: &Card, below: &Card) -> bool {
    card.is_red() != below.is_red() && below.rank().follows(card.rank())
}
