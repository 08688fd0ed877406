//! Random play against the public API: whatever the player presses, the deck
//! stays whole, the piles stay legal, and one undo reverses one move.

use proptest::prelude::*;

use rusty_klondike::cards::Rank;
use rusty_klondike::pile::{Pile, FOUNDATIONS, TABLEAU_COLUMNS};
use rusty_klondike::rules::is_valid_sequence;
use rusty_klondike::{Game, Move, Outcome, PileId, Target};

#[derive(Debug, Clone)]
enum Action {
    Press(Target),
    Undo,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Press(Target::Pile(PileId::Stock))),
        2 => Just(Action::Press(Target::Pile(PileId::Waste))),
        2 => (0..FOUNDATIONS).prop_map(|i| Action::Press(Target::Pile(PileId::Foundation(i)))),
        2 => (0..TABLEAU_COLUMNS).prop_map(|i| Action::Press(Target::Pile(PileId::Tableau(i)))),
        4 => (0..TABLEAU_COLUMNS, 0..20usize)
            .prop_map(|(i, index)| Action::Press(Target::Card { pile: PileId::Tableau(i), index })),
        1 => Just(Action::Press(Target::Nothing)),
        1 => Just(Action::Undo),
    ]
}

fn snapshot(game: &Game) -> (Vec<Pile>, Vec<Move>) {
    (game.piles().cloned().collect(), game.history().to_vec())
}

fn foundations_are_ascending_runs(game: &Game) -> bool {
    (0..FOUNDATIONS).all(|i| {
        let cards = game.pile(PileId::Foundation(i)).cards();
        cards.first().map_or(true, |first| first.rank() == Rank::ACE)
            && cards
                .windows(2)
                .all(|w| w[0].suit() == w[1].suit() && w[1].rank().follows(w[0].rank()))
    })
}

fn tableau_face_up_suffixes_are_runs(game: &Game) -> bool {
    (0..TABLEAU_COLUMNS).all(|i| {
        let cards = game.pile(PileId::Tableau(i)).cards();
        match cards.iter().position(|c| c.face_up) {
            Some(start) => {
                cards[start..].iter().all(|c| c.face_up) && is_valid_sequence(&cards[start..])
            }
            None => true,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_keeps_the_board_legal(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..300),
    ) {
        let mut game = Game::new_seeded(seed);
        for action in actions {
            let before = game.clone();
            let outcome = match action {
                Action::Press(target) => game.handle_pointer_intent(target),
                Action::Undo => game.undo(),
            };

            prop_assert!(game.is_conserved(), "deck not conserved after {:?}", action);
            prop_assert!(foundations_are_ascending_runs(&game));
            prop_assert!(tableau_face_up_suffixes_are_runs(&game));

            match outcome {
                Outcome::Drew | Outcome::Recycled | Outcome::Moved | Outcome::Flipped => {
                    prop_assert_eq!(game.move_count(), before.move_count() + 1);
                    if !game.is_won() {
                        let mut rewound = game.clone();
                        prop_assert_eq!(rewound.undo(), Outcome::Undone);
                        prop_assert_eq!(snapshot(&rewound), snapshot(&before));
                    }
                }
                Outcome::Undone => {
                    prop_assert_eq!(game.move_count() + 1, before.move_count());
                }
                Outcome::Selected | Outcome::Deselected | Outcome::Rejected | Outcome::Ignored => {
                    prop_assert_eq!(snapshot(&game), snapshot(&before));
                }
            }

            if let Some(selection) = game.selection() {
                let source = game.pile(selection.source()).cards();
                let held = selection.cards();
                prop_assert!(held.len() <= source.len());
                let suffix = &source[source.len() - held.len()..];
                prop_assert!(suffix.iter().zip(held).all(|(a, b)| a.id() == b.id()));
                prop_assert!(is_valid_sequence(held));
            }
        }
    }
}
