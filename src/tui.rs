//! Keyboard front end: a cursor over the piles that turns key presses into
//! pointer intents for the game.

use std::time::Duration;

use rand::Rng;
use rusty_klondike::pile::PILE_COUNT;
use rusty_klondike::{Game, Outcome, PileId, Target};

pub struct Tui {
    game: Game,
    highlighted_pile: usize,
    /// How many cards below the top of a tableau column the cursor sits.
    depth: usize,
    high_contrast: bool,
}

impl Tui {
    pub fn new(game: Game, high_contrast: bool) -> Tui {
        Tui {
            game,
            highlighted_pile: PileId::Tableau(0).field_index().unwrap_or(0),
            depth: 0,
            high_contrast,
        }
    }

    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.game.new_game(rng);
        self.depth = 0;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.game.tick(dt);
    }

    pub fn toggle_high_contrast(&mut self) {
        self.high_contrast = !self.high_contrast;
    }

    fn highlighted(&self) -> PileId {
        PileId::from_field_index(self.highlighted_pile).unwrap_or(PileId::Stock)
    }

    pub fn move_cursor_left(&mut self) {
        // this modulo trick avoids negative numbers on the unsigned int
        self.highlighted_pile = (self.highlighted_pile + PILE_COUNT - 1) % PILE_COUNT;
        self.depth = 0;
    }

    pub fn move_cursor_right(&mut self) {
        self.highlighted_pile = (self.highlighted_pile + 1) % PILE_COUNT;
        self.depth = 0;
    }

    /// Reaches one card further into the face-up part of a tableau column.
    pub fn move_cursor_up(&mut self) {
        let pile = self.game.pile(self.highlighted());
        if !matches!(pile.id(), PileId::Tableau(_)) || pile.len() < self.depth + 2 {
            return;
        }
        let next = pile.len() - self.depth - 2;
        if pile.get(next).is_some_and(|c| c.face_up) {
            self.depth += 1;
        }
    }

    pub fn move_cursor_down(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// The card index the cursor points at, if the highlighted pile has one.
    fn highlighted_index(&self) -> Option<usize> {
        let len = self.game.pile(self.highlighted()).len();
        len.checked_sub(1 + self.depth)
    }

    pub fn target(&self) -> Target {
        let pile = self.highlighted();
        match (pile, self.highlighted_index()) {
            (PileId::Tableau(_), Some(index)) => Target::Card { pile, index },
            _ => Target::Pile(pile),
        }
    }

    pub fn press(&mut self) {
        if self.game.handle_pointer_intent(self.target()) == Outcome::Moved {
            self.depth = 0;
        }
        self.clamp_depth();
    }

    pub fn undo(&mut self) {
        self.game.undo();
        self.clamp_depth();
    }

    fn clamp_depth(&mut self) {
        let len = self.game.pile(self.highlighted()).len();
        self.depth = self.depth.min(len.saturating_sub(1));
    }
}

mod print;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_around_the_field() {
        let mut tui = Tui::new(Game::new_seeded(1), false);
        tui.highlighted_pile = 0;
        tui.move_cursor_left();
        assert_eq!(tui.highlighted(), PileId::Tableau(6));
        tui.move_cursor_right();
        assert_eq!(tui.highlighted(), PileId::Stock);
    }

    #[test]
    fn cursor_stops_at_face_down_cards() {
        let mut tui = Tui::new(Game::new_seeded(1), false);
        tui.highlighted_pile = PileId::Tableau(3).field_index().unwrap();
        tui.move_cursor_up();
        assert_eq!(tui.depth, 0);
        assert_eq!(tui.target(), Target::Card { pile: PileId::Tableau(3), index: 3 });
    }

    #[test]
    fn pressing_stock_draws() {
        let mut tui = Tui::new(Game::new_seeded(1), false);
        tui.highlighted_pile = PileId::Stock.field_index().unwrap();
        tui.press();
        assert_eq!(tui.game.pile(PileId::Waste).len(), 1);
        tui.undo();
        assert!(tui.game.pile(PileId::Waste).is_empty());
    }
}
