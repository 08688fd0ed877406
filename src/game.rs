use std::collections::HashSet;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::cards::{new_standard_deck, shuffle, Card, Rank, DECK_SIZE, RANKS};
use crate::error::LayoutError;
use crate::pile::{Pile, PileId, FOUNDATIONS, PILE_COUNT, TABLEAU_COLUMNS};
use crate::rules;

/// A logged, reversible transfer of cards between two piles.
///
/// `cards` holds the moved cards exactly as they were before the move, so
/// undo can put back their orientation along with their membership. A flip
/// is logged with `from == to` and `was_flipped` set.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub from: PileId,
    pub to: PileId,
    pub cards: Vec<Card>,
    pub was_flipped: bool,
}

/// The card or run the player is holding, and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    source: PileId,
    cards: Vec<Card>,
}

impl Selection {
    pub fn source(&self) -> PileId {
        self.source
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.iter().any(|c| c.id() == card.id())
    }
}

/// What a pointer press landed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    /// A pile's slot, whether or not it holds cards.
    Pile(PileId),
    /// The card at `index` within `pile`.
    Card { pile: PileId, index: usize },
    /// Empty table space.
    Nothing,
}

/// How the game responded to an input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Drew,
    Recycled,
    Selected,
    Deselected,
    Moved,
    Flipped,
    Undone,
    /// A move was attempted and failed a placement rule.
    Rejected,
    /// Nothing changed.
    Ignored,
}

/// Starting contents for [`Game::from_layout`].
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; FOUNDATIONS],
    pub tableau: [Vec<Card>; TABLEAU_COLUMNS],
}

#[derive(Clone)]
pub struct Game {
    field: [Pile; PILE_COUNT],
    selection: Option<Selection>,
    history: Vec<Move>,
    elapsed: Duration,
    seed: Option<u64>,
    won: bool,
}

impl Game {
    /// Shuffles a fresh deck with `rng` and deals it.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Game {
        let mut game = Game::empty();
        game.new_game(rng);
        game
    }

    /// Deals a game that can be reproduced from `seed`.
    pub fn new_seeded(seed: u64) -> Game {
        let mut game = Game::new(&mut ChaCha8Rng::seed_from_u64(seed));
        game.seed = Some(seed);
        info!(seed, "seeded deal");
        game
    }

    /// Builds a game from explicit pile contents, checking that every card of
    /// the deck appears exactly once and the piles are in a legal shape.
    pub fn from_layout(layout: Layout) -> Result<Game, LayoutError> {
        let Layout {
            stock,
            waste,
            foundations,
            tableau,
        } = layout;

        let total = stock.len()
            + waste.len()
            + foundations.iter().map(Vec::len).sum::<usize>()
            + tableau.iter().map(Vec::len).sum::<usize>();
        if total != DECK_SIZE {
            return Err(LayoutError::WrongCardCount(total));
        }

        let mut seen = HashSet::with_capacity(DECK_SIZE);
        let all_cards = stock
            .iter()
            .chain(&waste)
            .chain(foundations.iter().flatten())
            .chain(tableau.iter().flatten());
        for card in all_cards {
            if !seen.insert(card.id()) {
                return Err(LayoutError::DuplicateCard(*card));
            }
        }
        if let Some(card) = stock.iter().find(|c| c.face_up) {
            return Err(LayoutError::StockCardFaceUp(*card));
        }
        if let Some(card) = waste.iter().find(|c| !c.face_up) {
            return Err(LayoutError::WasteCardFaceDown(*card));
        }
        if let Some(card) = foundations.iter().flatten().find(|c| !c.face_up) {
            return Err(LayoutError::FoundationCardFaceDown(*card));
        }
        for (i, cards) in foundations.iter().enumerate() {
            if !is_foundation_run(cards) {
                return Err(LayoutError::InvalidFoundation(PileId::Foundation(i)));
            }
        }
        for (i, cards) in tableau.iter().enumerate() {
            if !is_tableau_column(cards) {
                return Err(LayoutError::InvalidTableau(PileId::Tableau(i)));
            }
        }

        let mut game = Game::empty();
        *game.pile_mut(PileId::Stock) = Pile::with_cards(PileId::Stock, stock);
        *game.pile_mut(PileId::Waste) = Pile::with_cards(PileId::Waste, waste);
        for (i, cards) in foundations.into_iter().enumerate() {
            let id = PileId::Foundation(i);
            *game.pile_mut(id) = Pile::with_cards(id, cards);
        }
        for (i, cards) in tableau.into_iter().enumerate() {
            let id = PileId::Tableau(i);
            *game.pile_mut(id) = Pile::with_cards(id, cards);
        }
        game.relayout();
        game.check_win();
        Ok(game)
    }

    fn empty() -> Game {
        Game {
            field: core::array::from_fn(|i| {
                Pile::new(PileId::from_field_index(i).unwrap_or(PileId::Stock))
            }),
            selection: None,
            history: Vec::new(),
            elapsed: Duration::ZERO,
            seed: None,
            won: false,
        }
    }

    /// Clears every pile and the history, then reshuffles and redeals.
    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for pile in self.field.iter_mut() {
            pile.take_all();
        }
        self.selection = None;
        self.history.clear();
        self.elapsed = Duration::ZERO;
        self.seed = None;
        self.won = false;

        let mut deck = new_standard_deck();
        shuffle(&mut deck, rng);

        // Deal deck onto the board. Each pass starts one column further right;
        // column `pass` gets its last card on that pass, dealt face up.
        for pass in 0..TABLEAU_COLUMNS {
            for column in pass..TABLEAU_COLUMNS {
                if let Some(mut card) = deck.pop() {
                    card.face_up = column == pass;
                    self.pile_mut(PileId::Tableau(column)).push(card);
                }
            }
        }
        self.pile_mut(PileId::Stock).extend(deck);

        self.relayout();
        self.debug_assert_conserved();
        info!("new game dealt");
    }

    /// The pile named by `id`, or `None` if no such pile exists.
    pub fn get_pile(&self, id: PileId) -> Option<&Pile> {
        id.field_index().map(|i| &self.field[i])
    }

    /// The pile named by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` names a foundation or column past the end of the board.
    /// Use [`Game::get_pile`] for ids that have not been checked.
    pub fn pile(&self, id: PileId) -> &Pile {
        match self.get_pile(id) {
            Some(pile) => pile,
            None => panic!("no such pile: {id:?}"),
        }
    }

    fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match id.field_index() {
            Some(i) => &mut self.field[i],
            None => panic!("no such pile: {id:?}"),
        }
    }

    /// All piles in field order: stock, waste, foundations, tableau.
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.field.iter()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Advances the game clock. The clock stops once the game is won.
    pub fn tick(&mut self, dt: Duration) {
        if !self.won {
            self.elapsed += dt;
        }
    }

    pub fn elapsed_time_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Applies one player press. Failed placements only clear the selection.
    pub fn handle_pointer_intent(&mut self, target: Target) -> Outcome {
        if self.won {
            return Outcome::Ignored;
        }
        let pile = match target {
            Target::Pile(id) | Target::Card { pile: id, .. } => Some(id),
            Target::Nothing => None,
        };
        if pile.is_some_and(|id| !id.is_valid()) {
            trace!(?target, "no such pile");
            return Outcome::Ignored;
        }
        let outcome = match target {
            Target::Pile(PileId::Stock) | Target::Card { pile: PileId::Stock, .. } => {
                self.click_stock()
            }
            Target::Pile(PileId::Waste) | Target::Card { pile: PileId::Waste, .. } => {
                self.click_waste()
            }
            Target::Pile(id @ PileId::Foundation(_)) | Target::Card { pile: id @ PileId::Foundation(_), .. } => {
                self.click_foundation(id)
            }
            Target::Pile(id @ PileId::Tableau(_)) => match self.pile(id).len() {
                0 => self.click_empty_tableau(id),
                len => self.click_tableau_card(id, len - 1),
            },
            Target::Card { pile: id @ PileId::Tableau(_), index } => {
                self.click_tableau_card(id, index)
            }
            Target::Nothing => self.clear_selection(),
        };

        if matches!(outcome, Outcome::Drew | Outcome::Recycled | Outcome::Moved | Outcome::Flipped) {
            self.after_mutation();
        }
        outcome
    }

    fn click_stock(&mut self) -> Outcome {
        self.selection = None;
        if let Some(card) = self.pile_mut(PileId::Stock).pop() {
            self.history.push(Move {
                from: PileId::Stock,
                to: PileId::Waste,
                cards: vec![card],
                was_flipped: false,
            });
            let mut drawn = card;
            drawn.face_up = true;
            self.pile_mut(PileId::Waste).push(drawn);
            debug!(%card, "drew from stock");
            Outcome::Drew
        } else if !self.pile(PileId::Waste).is_empty() {
            let waste = self.pile_mut(PileId::Waste).take_all();
            debug!(cards = waste.len(), "recycled waste into stock");
            let recycled = waste.iter().rev().map(|&card| {
                let mut card = card;
                card.face_up = false;
                card
            });
            self.pile_mut(PileId::Stock).extend(recycled);
            self.history.push(Move {
                from: PileId::Waste,
                to: PileId::Stock,
                cards: waste,
                was_flipped: false,
            });
            Outcome::Recycled
        } else {
            Outcome::Ignored
        }
    }

    fn click_waste(&mut self) -> Outcome {
        if self.selection.as_ref().is_some_and(|s| s.source == PileId::Waste) {
            return self.clear_selection();
        }
        match self.pile(PileId::Waste).top().copied() {
            Some(top) => {
                self.selection = Some(Selection {
                    source: PileId::Waste,
                    cards: vec![top],
                });
                Outcome::Selected
            }
            None => self.clear_selection(),
        }
    }

    fn click_foundation(&mut self, foundation: PileId) -> Outcome {
        let Some(selection) = self.selection.take() else {
            return Outcome::Ignored;
        };
        if self.pile(foundation).can_accept(&selection.cards) {
            self.transfer(selection.source, foundation, &selection.cards[0])
        } else {
            self.reject(&selection, foundation)
        }
    }

    fn click_empty_tableau(&mut self, column: PileId) -> Outcome {
        let Some(selection) = self.selection.take() else {
            return Outcome::Ignored;
        };
        if self.pile(column).can_accept(&selection.cards) {
            self.transfer(selection.source, column, &selection.cards[0])
        } else {
            self.reject(&selection, column)
        }
    }

    fn click_tableau_card(&mut self, column: PileId, index: usize) -> Outcome {
        let Some(card) = self.pile(column).get(index).copied() else {
            return self.clear_selection();
        };

        if !card.face_up {
            // Only the top card of a column can be turned over.
            if index + 1 != self.pile(column).len() {
                return Outcome::Ignored;
            }
            self.history.push(Move {
                from: column,
                to: column,
                cards: vec![card],
                was_flipped: true,
            });
            if let Some(top) = self.pile_mut(column).top_mut() {
                top.face_up = true;
            }
            debug!(%card, %column, "flipped");
            return Outcome::Flipped;
        }

        match self.selection.take() {
            Some(selection) => {
                let first = &selection.cards[0];
                if selection.source != column && rules::can_place_on_tableau(first, self.pile(column)) {
                    self.transfer(selection.source, column, first)
                } else {
                    self.reject(&selection, column)
                }
            }
            None => {
                let run = &self.pile(column).cards()[index..];
                if rules::is_valid_sequence(run) {
                    let cards = run.to_vec();
                    self.selection = Some(Selection { source: column, cards });
                    Outcome::Selected
                } else {
                    trace!(%column, index, "run is not in sequence");
                    Outcome::Ignored
                }
            }
        }
    }

    fn clear_selection(&mut self) -> Outcome {
        match self.selection.take() {
            Some(_) => Outcome::Deselected,
            None => Outcome::Ignored,
        }
    }

    fn reject(&self, selection: &Selection, target: PileId) -> Outcome {
        trace!(from = %selection.source, to = %target, cards = selection.cards.len(), "move rejected");
        Outcome::Rejected
    }

    /// Moves `first` and every card above it from `from` onto `to`.
    fn transfer(&mut self, from: PileId, to: PileId, first: &Card) -> Outcome {
        let Some(start) = self.pile(from).position_of(first.id()) else {
            return Outcome::Rejected;
        };
        let cards = self.pile_mut(from).split_off(start);
        debug!(%from, %to, cards = cards.len(), first = %cards[0], "moved");
        self.pile_mut(to).extend(cards.iter().copied());
        self.history.push(Move {
            from,
            to,
            cards,
            was_flipped: false,
        });
        Outcome::Moved
    }

    /// Reverses the most recent move. Does nothing when the history is empty
    /// or the game has been won.
    pub fn undo(&mut self) -> Outcome {
        if self.won {
            return Outcome::Ignored;
        }
        let Some(last_move) = self.history.pop() else {
            return Outcome::Ignored;
        };
        self.selection = None;

        let to = self.pile_mut(last_move.to);
        for card in &last_move.cards {
            to.remove_card(card.id());
        }
        let from = self.pile_mut(last_move.from);
        from.extend(last_move.cards.iter().copied());
        if last_move.was_flipped {
            if let Some(top) = from.top_mut() {
                top.face_up = false;
            }
        }
        debug!(from = %last_move.from, to = %last_move.to, cards = last_move.cards.len(), "undid move");

        self.after_mutation();
        Outcome::Undone
    }

    fn after_mutation(&mut self) {
        self.relayout();
        self.debug_assert_conserved();
        self.check_win();
    }

    fn check_win(&mut self) {
        self.won = (0..FOUNDATIONS).all(|i| {
            let foundation = self.pile(PileId::Foundation(i));
            foundation.len() == RANKS as usize && foundation.top().is_some_and(|c| c.rank() == Rank::KING)
        });
        if self.won {
            info!(seconds = self.elapsed.as_secs(), moves = self.history.len(), "game won");
        }
    }

    /// True iff the piles together hold each card of the deck exactly once.
    pub fn is_conserved(&self) -> bool {
        let mut seen = [false; DECK_SIZE];
        let mut count = 0;
        for card in self.field.iter().flat_map(Pile::cards) {
            let slot = &mut seen[card.id().index()];
            if *slot {
                return false;
            }
            *slot = true;
            count += 1;
        }
        count == DECK_SIZE
    }

    fn debug_assert_conserved(&self) {
        debug_assert!(self.is_conserved(), "a card was duplicated or lost");
    }
}

fn is_foundation_run(cards: &[Card]) -> bool {
    let Some(first) = cards.first() else {
        return true;
    };
    first.rank() == Rank::ACE
        && cards
            .windows(2)
            .all(|pair| pair[1].suit() == first.suit() && pair[1].rank().follows(pair[0].rank()))
}

/// Face-down cards, then a face-up run that builds down in alternating colors.
fn is_tableau_column(cards: &[Card]) -> bool {
    let start = cards.iter().position(|c| c.face_up).unwrap_or(cards.len());
    let run = &cards[start..];
    run.iter().all(|c| c.face_up) && (run.is_empty() || rules::is_valid_sequence(run))
}

pub mod layout;
