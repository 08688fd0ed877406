//! Display positions for every card, in layout units of one card slot.
//!
//! Row 0 holds the stock, waste and foundations; the tableau starts on the row
//! below and fans each column downward. Positions are targets only: a renderer
//! may ease toward them but the game never waits for it.

use crate::cards::Position;
use crate::pile::PileId;

use super::Game;

pub const TABLEAU_TOP: f32 = 1.0;
pub const TABLEAU_FAN: f32 = 0.4;

/// Foundations sit right-aligned over the tableau, leaving a gap after the waste.
const FOUNDATION_LEFT: f32 = 3.0;

/// Where the card at `index` in `pile` belongs.
pub fn slot_position(pile: PileId, index: usize) -> Position {
    match pile {
        PileId::Stock => Position { x: 0.0, y: 0.0 },
        PileId::Waste => Position { x: 1.0, y: 0.0 },
        PileId::Foundation(i) => Position {
            x: FOUNDATION_LEFT + i as f32,
            y: 0.0,
        },
        PileId::Tableau(i) => Position {
            x: i as f32,
            y: TABLEAU_TOP + index as f32 * TABLEAU_FAN,
        },
    }
}

impl Game {
    pub(super) fn relayout(&mut self) {
        for pile in self.field.iter_mut() {
            let id = pile.id();
            for (index, card) in pile.iter_mut().enumerate() {
                card.position = slot_position(id, index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pile::FOUNDATIONS;

    #[test]
    fn foundations_fit_on_the_top_row() {
        let last = slot_position(PileId::Foundation(FOUNDATIONS - 1), 0);
        assert_eq!(last, Position { x: 6.0, y: 0.0 });
    }

    #[test]
    fn tableau_fans_downward() {
        let first = slot_position(PileId::Tableau(2), 0);
        let third = slot_position(PileId::Tableau(2), 2);
        assert_eq!(first.x, third.x);
        assert!(third.y > first.y);
        assert_eq!(first.y, TABLEAU_TOP);
    }

    #[test]
    fn dealt_cards_get_their_slot() {
        let game = Game::new_seeded(3);
        for pile in game.piles() {
            for (index, card) in pile.cards().iter().enumerate() {
                assert_eq!(card.position, slot_position(pile.id(), index));
            }
        }
    }
}
