use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five gem colors plus the gold wildcard. Gold can stand in
/// for any gem color when paying for a card, but is never takeable with
/// a plain take-tokens action.
#[derive(PartialEq, Copy, Clone, Debug, Eq, Hash, Serialize, Deserialize)]
pub enum Gem {
    Onyx,
    Sapphire,
    Emerald,
    Ruby,
    Diamond,
    Gold,
}

pub const GEM_COUNT: usize = 6;

impl Gem {
    /// Every color, gold last. Iteration order is fixed and matches the
    /// backing array of `Gems`.
    pub const ALL: [Gem; GEM_COUNT] = [
        Gem::Onyx,
        Gem::Sapphire,
        Gem::Emerald,
        Gem::Ruby,
        Gem::Diamond,
        Gem::Gold,
    ];

    /// The five colors a take-tokens action may name.
    pub const COLORS: [Gem; 5] = [
        Gem::Onyx,
        Gem::Sapphire,
        Gem::Emerald,
        Gem::Ruby,
        Gem::Diamond,
    ];

    pub const fn index(self) -> usize {
        match self {
            Gem::Onyx => 0,
            Gem::Sapphire => 1,
            Gem::Emerald => 2,
            Gem::Ruby => 3,
            Gem::Diamond => 4,
            Gem::Gold => 5,
        }
    }

    pub fn is_gold(self) -> bool {
        matches!(self, Gem::Gold)
    }
}

impl fmt::Display for Gem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gem::Onyx => "onyx",
            Gem::Sapphire => "sapphire",
            Gem::Emerald => "emerald",
            Gem::Ruby => "ruby",
            Gem::Diamond => "diamond",
            Gem::Gold => "gold",
        };
        write!(f, "{}", name)
    }
}
