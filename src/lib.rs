//! Klondike solitaire rules engine.
//!
//! The engine owns every pile, the player's selection and the undo log, and
//! is driven by discrete pointer intents. It has no notion of rendering: each
//! card carries the position it should be drawn at and the front end decides
//! how to get it there.

pub mod cards;
pub mod error;
pub mod game;
pub mod pile;
pub mod rules;

pub use cards::{Card, Rank, Suit};
pub use error::LayoutError;
pub use game::{Game, Layout, Move, Outcome, Selection, Target};
pub use pile::{Pile, PileId};
