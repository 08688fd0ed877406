use thiserror::Error;

use crate::cards::Card;
use crate::pile::PileId;

/// Reasons an explicit board layout cannot be turned into a game.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("layout holds {0} cards, expected 52")]
    WrongCardCount(usize),

    #[error("{0} appears more than once")]
    DuplicateCard(Card),

    #[error("{0} in the stock is face up")]
    StockCardFaceUp(Card),

    #[error("{0} in the waste is face down")]
    WasteCardFaceDown(Card),

    #[error("{0} on a foundation is face down")]
    FoundationCardFaceDown(Card),

    #[error("{0} is not an ascending single-suit run from the ace")]
    InvalidFoundation(PileId),

    #[error("{0} is not face-down cards under a face-up run")]
    InvalidTableau(PileId),
}
