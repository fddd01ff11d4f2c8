use super::game::Game;
use crate::card::CardId;
use crate::gems::Gems;
use crate::nobles::NobleId;
use serde::{Deserialize, Serialize};

/// The public face of a match: everything every player may see, with all
/// hidden information (deck order, blind reserves) stripped out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub deck_counts: [usize; 3],
    pub revealed: [Vec<CardId>; 3],
    pub nobles: Vec<NobleId>,
    pub bank: Gems,
}

impl Board {
    pub fn from_game(game: &Game) -> Self {
        Board {
            deck_counts: game.deck_counts(),
            revealed: game.revealed().clone(),
            nobles: game.nobles().iter().map(|n| n.id()).collect(),
            bank: *game.bank().gems(),
        }
    }
}
