use std::io::{self, Write};

use crossterm::{cursor, style::{self, Stylize}, terminal, QueueableCommand};

use rusty_klondike::game::layout::slot_position;
use rusty_klondike::cards::Position;
use rusty_klondike::{Card, PileId, Suit};

use super::Tui;
use crate::MIN_TERMINAL_WIDTH;

const TYPICAL_BOARD_HEIGHT: usize = 24;

const CARD_PRINT_WIDTH: usize = 7;
const CARD_PRINT_HEIGHT: usize = 5;
const BOARD_LEFT: usize = 2;
const BOARD_TOP: usize = 1;

const DEFAULT_TERMINAL_HEIGHT: u16 = 24;

/// What occupies a card-sized slot on screen.
#[derive(Copy, Clone)]
enum Face {
    Empty,
    Placeholder(Suit),
    Back,
    Front(Card),
}

impl Tui {
    pub fn print(&self, out: &mut io::Stdout) -> Result<(), io::Error> {
        if !self.game.is_won() {
            self.print_board(out)?;
            self.print_chrome(out)?;
        } else {
            // won
            out.queue(style::SetAttribute(style::Attribute::Dim))?;
            self.print_board(out)?;
            out.queue(style::SetAttribute(style::Attribute::Reset))?;
            self.print_chrome(out)?;
            self.print_win(out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn print_board(&self, out: &mut io::Stdout) -> Result<(), io::Error> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        let rows = board_rows(terminal_height());
        let highlighted = self.highlighted();
        let highlighted_index = self.highlighted_index();
        let selection = self.game.selection();

        for pile in self.game.piles() {
            let id = pile.id();
            let is_highlighted = id == highlighted && !self.game.is_won();
            match id {
                PileId::Tableau(_) => {
                    // Print tableau column card-by-card
                    for (index, card) in pile.cards().iter().enumerate() {
                        let face = if card.face_up { Face::Front(*card) } else { Face::Back };
                        let (x, y) = cell(card.position);
                        self.print_card_at_coord(
                            out,
                            rows,
                            x,
                            y,
                            face,
                            is_highlighted && highlighted_index == Some(index),
                            selection.is_some_and(|s| s.contains(card)),
                        )?;
                    }
                    // If tableau column is empty, print placeholder instead
                    if pile.is_empty() {
                        let (x, y) = slot_cell(id);
                        self.print_card_at_coord(out, rows, x, y, Face::Empty, is_highlighted, false)?;
                    }
                }
                _ => {
                    // Only the top card of the other piles is visible
                    let face = match (id, pile.top()) {
                        (PileId::Stock, Some(_)) => Face::Back,
                        (_, Some(card)) => Face::Front(*card),
                        (PileId::Foundation(i), None) => Face::Placeholder(Suit::ALL[i]),
                        (_, None) => Face::Empty,
                    };
                    let selected = pile
                        .top()
                        .is_some_and(|top| selection.is_some_and(|s| s.contains(top)));
                    let (x, y) = slot_cell(id);
                    self.print_card_at_coord(out, rows, x, y, face, is_highlighted, selected)?;
                }
            }
        }

        Ok(())
    }

    fn print_chrome(&self, out: &mut io::Stdout) -> Result<(), io::Error> {
        let bottom = board_rows(terminal_height());

        // Print title bar
        out.queue(cursor::MoveTo(0, 0))?;
        print!("╭── Rusty Klondike ────────────────────────────────────────╮");
        out.queue(cursor::MoveTo(24, 0))?;
        print!(" Moves: {} ", self.game.move_count());
        out.queue(cursor::MoveTo(38, 0))?;
        print!(" Time: {:.0} s ", self.game.elapsed_time_seconds());

        // Print side bars
        for i in 1..bottom {
            out.queue(cursor::MoveTo(0, i))?;
            print!("│");
            out.queue(cursor::MoveTo(MIN_TERMINAL_WIDTH - 1, i))?;
            print!("│");
        }

        // Print bottom bar
        out.queue(cursor::MoveTo(0, bottom))?;
        print!("╰─ (New: ctrl-n) ─ (Undo: z) ─ (Colors: h) ─ (Quit: ctrl-q) ╯");

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn print_card_at_coord(&self, out: &mut io::Stdout, rows: u16, x: usize, y: usize, face: Face, highlighted: bool, selected: bool) -> Result<(), io::Error> {
        let card_display_str = match face {
            Face::Front(card) if selected => format!("\
                ╭─────╮\n\
                │ {: <3} │\n\
                │     │\n\
                │  △  │\n\
                ╰─────╯\n",
                card.to_string()),
            Face::Front(card) => format!("\
                ╭─────╮\n\
                │ {: <3} │\n\
                │     │\n\
                │     │\n\
                ╰─────╯\n",
                card.to_string()),
            Face::Back => "\
                ╭─────╮\n\
                │░░░░░│\n\
                │░░░░░│\n\
                │░░░░░│\n\
                ╰─────╯\n".to_string(),
            // Print suit-decorated placeholder
            Face::Placeholder(suit) => format!("\
                ╭─────╮\n\
                │     │\n\
                │  {}  │\n\
                │     │\n\
                ╰─────╯\n",
                suit.symbol()),
            Face::Empty => "\
                ╭─────╮\n\
                │     │\n\
                │     │\n\
                │     │\n\
                ╰─────╯\n".to_string(),
        };
        let dim = matches!(face, Face::Empty | Face::Placeholder(_));

        for (d, line) in card_display_str.lines().enumerate() {
            // Don't run into the bottom bar or off the screen
            if y + d >= rows as usize {
                break;
            }
            out.queue(cursor::MoveTo(x as u16, y as u16 + d as u16))?;
            if highlighted {
                out.queue(style::SetAttribute(style::Attribute::Reverse))?;
            } else if dim {
                out.queue(style::SetAttribute(style::Attribute::Dim))?;
            }

            match face {
                Face::Front(card) => print!("{}", line.with(self.suit_color(card.suit()))),
                _ => print!("{}", line),
            }

            if highlighted {
                out.queue(style::SetAttribute(style::Attribute::NoReverse))?;
            } else if dim {
                out.queue(style::SetAttribute(style::Attribute::NormalIntensity))?;
            }
        }
        Ok(())
    }

    fn suit_color(&self, suit: Suit) -> style::Color {
        if self.high_contrast {
            match suit {
                Suit::Hearts => style::Color::DarkRed,
                Suit::Clubs => style::Color::White,
                Suit::Diamonds => style::Color::Magenta,
                Suit::Spades => style::Color::Yellow,
            }
        } else if suit.is_red() {
            style::Color::Red
        } else {
            style::Color::Reset
        }
    }

    fn print_win(&self, out: &mut io::Stdout) -> Result<(), io::Error> {
        let win_message_width = 24;
        let win_message_height = 5;
        let clear_time = format!("│ Clear time: {:>6.0} s │", self.game.elapsed_time_seconds());
        let message = format!(
            "╭──────────────────────╮\n\
             │ You Win!             │\n\
             {}\n\
             │ New Game: ctrl-n     │\n\
             ╰──────────────────────╯",
            clear_time
        );
        self.print_string_at_coord(
            out,
            &message,
            (MIN_TERMINAL_WIDTH as usize / 2 - win_message_width / 2) as u16,
            (TYPICAL_BOARD_HEIGHT / 2 - win_message_height / 2) as u16,
        )?;
        Ok(())
    }

    fn print_string_at_coord(&self, out: &mut io::Stdout, string: &str, x: u16, y: u16) -> Result<(), io::Error> {
        for (i, line) in string.lines().enumerate() {
            out.queue(cursor::MoveTo(x, y + i as u16))?;
            print!("{}", line);
        }
        Ok(())
    }
}

fn terminal_height() -> u16 {
    terminal::size().map_or(DEFAULT_TERMINAL_HEIGHT, |(_, height)| height)
}

/// Rows available to cards: everything above the bottom bar, which sits on
/// the last terminal row.
fn board_rows(term_height: u16) -> u16 {
    term_height.saturating_sub(1)
}

/// Terminal cell of a published layout position.
fn cell(position: Position) -> (usize, usize) {
    let x = position.x * CARD_PRINT_WIDTH as f32;
    let y = position.y * CARD_PRINT_HEIGHT as f32;
    (BOARD_LEFT + x.round() as usize, BOARD_TOP + y.round() as usize)
}

fn slot_cell(pile: PileId) -> (usize, usize) {
    cell(slot_position(pile, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_bar_sits_on_the_last_row() {
        assert_eq!(board_rows(24), 23);
        assert_eq!(board_rows(0), 0);
    }

    #[test]
    fn deep_columns_reach_past_a_short_terminal() {
        // A fully fanned column ends well below a 24-row terminal, so cards
        // must be clipped rather than drawn under the bottom bar.
        let (_, y) = cell(slot_position(PileId::Tableau(6), 18));
        assert!(y + CARD_PRINT_HEIGHT > board_rows(DEFAULT_TERMINAL_HEIGHT) as usize);
    }
}
