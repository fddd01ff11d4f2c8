use crate::gem::Gem;
use crate::gems::Gems;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A card or noble cost over the five gem colors. Costs never mention
/// gold; gold enters only when a player pays a shortfall.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Cost([i8; 5]);

impl Index<Gem> for Cost {
    type Output = i8;

    fn index(&self, color: Gem) -> &i8 {
        assert!(!color.is_gold(), "gold has no place in a cost");
        &self.0[color.index()]
    }
}

impl IndexMut<Gem> for Cost {
    fn index_mut(&mut self, color: Gem) -> &mut i8 {
        assert!(!color.is_gold(), "gold has no place in a cost");
        &mut self.0[color.index()]
    }
}

impl Cost {
    pub const fn new(counts: [i8; 5]) -> Cost {
        Cost(counts)
    }

    /// The cost that remains after applying permanent card bonuses,
    /// clamped at zero per color.
    pub fn discounted_with(&self, bonuses: &Cost) -> Cost {
        let mut out = [0i8; 5];
        for i in 0..5 {
            out[i] = 0.max(self.0[i] - bonuses.0[i]);
        }
        Cost(out)
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|&n| n as u32).sum()
    }

    /// Widen to a token vector with a zero gold component.
    pub fn to_gems(&self) -> Gems {
        let mut gems = Gems::empty();
        for color in Gem::COLORS {
            gems[color] = self[color];
        }
        gems
    }

    /// True when `bonuses` covers this cost outright, color for color.
    pub fn covered_by(&self, bonuses: &Cost) -> bool {
        Gem::COLORS.iter().all(|&c| bonuses[c] >= self[c])
    }
}

pub type CardId = u8;

/// Tier deck sizes for tiers 1 through 3.
pub const TIER_SIZES: [usize; 3] = [40, 30, 20];

/// An immutable development card. Built once at catalog load and shared
/// read-only across every match.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    tier: u8,
    gem: Gem,
    points: u8,
    cost: Cost,
}

const fn card(id: CardId, tier: u8, gem: Gem, points: u8, cost: [i8; 5]) -> Card {
    Card {
        id,
        tier,
        gem,
        points,
        cost: Cost::new(cost),
    }
}

impl Card {
    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    /// The bonus color this card grants permanently once purchased.
    pub fn gem(&self) -> Gem {
        self.gem
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The full 90-card catalog, indexable by card id. Cost columns are
    /// ordered onyx, sapphire, emerald, ruby, diamond.
    pub const fn catalog() -> [Card; 90] {
        [
            card(0, 1, Gem::Onyx, 0, [0, 1, 1, 1, 1]),
            card(1, 1, Gem::Onyx, 0, [0, 2, 1, 1, 1]),
            card(2, 1, Gem::Onyx, 0, [0, 2, 0, 1, 2]),
            card(3, 1, Gem::Onyx, 0, [1, 0, 1, 3, 0]),
            card(4, 1, Gem::Onyx, 0, [0, 0, 2, 1, 0]),
            card(5, 1, Gem::Onyx, 0, [0, 0, 2, 0, 2]),
            card(6, 1, Gem::Onyx, 0, [0, 0, 3, 0, 0]),
            card(7, 1, Gem::Onyx, 1, [0, 4, 0, 0, 0]),
            card(8, 1, Gem::Sapphire, 0, [1, 0, 1, 1, 1]),
            card(9, 1, Gem::Sapphire, 0, [1, 0, 1, 2, 1]),
            card(10, 1, Gem::Sapphire, 0, [0, 0, 2, 2, 1]),
            card(11, 1, Gem::Sapphire, 0, [0, 1, 3, 1, 0]),
            card(12, 1, Gem::Sapphire, 0, [2, 0, 0, 0, 1]),
            card(13, 1, Gem::Sapphire, 0, [2, 0, 2, 0, 0]),
            card(14, 1, Gem::Sapphire, 0, [3, 0, 0, 0, 0]),
            card(15, 1, Gem::Sapphire, 1, [0, 0, 0, 4, 0]),
            card(16, 1, Gem::Diamond, 0, [1, 1, 1, 1, 0]),
            card(17, 1, Gem::Diamond, 0, [1, 1, 2, 1, 0]),
            card(18, 1, Gem::Diamond, 0, [1, 2, 2, 0, 0]),
            card(19, 1, Gem::Diamond, 0, [1, 1, 0, 0, 3]),
            card(20, 1, Gem::Diamond, 0, [1, 0, 0, 2, 0]),
            card(21, 1, Gem::Diamond, 0, [2, 2, 0, 0, 0]),
            card(22, 1, Gem::Diamond, 0, [0, 3, 0, 0, 0]),
            card(23, 1, Gem::Diamond, 1, [0, 0, 4, 0, 0]),
            card(24, 1, Gem::Emerald, 0, [1, 1, 0, 1, 1]),
            card(25, 1, Gem::Emerald, 0, [2, 1, 0, 1, 1]),
            card(26, 1, Gem::Emerald, 0, [2, 1, 0, 2, 0]),
            card(27, 1, Gem::Emerald, 0, [0, 3, 1, 0, 1]),
            card(28, 1, Gem::Emerald, 0, [0, 1, 0, 0, 2]),
            card(29, 1, Gem::Emerald, 0, [0, 2, 0, 2, 0]),
            card(30, 1, Gem::Emerald, 0, [0, 0, 0, 3, 0]),
            card(31, 1, Gem::Emerald, 1, [4, 0, 0, 0, 0]),
            card(32, 1, Gem::Ruby, 0, [1, 1, 1, 0, 1]),
            card(33, 1, Gem::Ruby, 0, [1, 1, 1, 0, 2]),
            card(34, 1, Gem::Ruby, 0, [2, 0, 1, 0, 2]),
            card(35, 1, Gem::Ruby, 0, [3, 0, 0, 1, 1]),
            card(36, 1, Gem::Ruby, 0, [0, 2, 1, 0, 0]),
            card(37, 1, Gem::Ruby, 0, [0, 0, 0, 2, 2]),
            card(38, 1, Gem::Ruby, 0, [0, 0, 0, 0, 3]),
            card(39, 1, Gem::Ruby, 1, [0, 0, 0, 0, 4]),
            card(40, 2, Gem::Onyx, 1, [0, 2, 2, 0, 3]),
            card(41, 2, Gem::Onyx, 1, [2, 0, 3, 0, 3]),
            card(42, 2, Gem::Onyx, 2, [0, 1, 4, 2, 0]),
            card(43, 2, Gem::Onyx, 2, [0, 0, 5, 3, 0]),
            card(44, 2, Gem::Onyx, 2, [0, 0, 0, 0, 5]),
            card(45, 2, Gem::Onyx, 3, [6, 0, 0, 0, 0]),
            card(46, 2, Gem::Sapphire, 1, [0, 2, 2, 3, 0]),
            card(47, 2, Gem::Sapphire, 1, [3, 2, 3, 0, 0]),
            card(48, 2, Gem::Sapphire, 2, [0, 3, 0, 0, 5]),
            card(49, 2, Gem::Sapphire, 2, [4, 0, 0, 1, 2]),
            card(50, 2, Gem::Sapphire, 2, [0, 5, 0, 0, 0]),
            card(51, 2, Gem::Sapphire, 3, [0, 6, 0, 0, 0]),
            card(52, 2, Gem::Diamond, 1, [2, 0, 3, 2, 0]),
            card(53, 2, Gem::Diamond, 1, [0, 3, 0, 3, 2]),
            card(54, 2, Gem::Diamond, 2, [2, 0, 1, 4, 0]),
            card(55, 2, Gem::Diamond, 2, [3, 0, 0, 5, 0]),
            card(56, 2, Gem::Diamond, 2, [0, 0, 0, 5, 0]),
            card(57, 2, Gem::Diamond, 3, [0, 0, 0, 0, 6]),
            card(58, 2, Gem::Emerald, 1, [0, 0, 2, 3, 3]),
            card(59, 2, Gem::Emerald, 1, [2, 3, 0, 0, 2]),
            card(60, 2, Gem::Emerald, 2, [1, 2, 0, 0, 4]),
            card(61, 2, Gem::Emerald, 2, [0, 5, 3, 0, 0]),
            card(62, 2, Gem::Emerald, 2, [0, 0, 5, 0, 0]),
            card(63, 2, Gem::Emerald, 3, [0, 0, 6, 0, 0]),
            card(64, 2, Gem::Ruby, 1, [3, 0, 0, 2, 2]),
            card(65, 2, Gem::Ruby, 1, [3, 3, 0, 2, 0]),
            card(66, 2, Gem::Ruby, 2, [0, 4, 2, 0, 1]),
            card(67, 2, Gem::Ruby, 2, [5, 0, 0, 0, 3]),
            card(68, 2, Gem::Ruby, 2, [5, 0, 0, 0, 0]),
            card(69, 2, Gem::Ruby, 3, [0, 0, 0, 6, 0]),
            card(70, 3, Gem::Onyx, 3, [0, 3, 5, 3, 3]),
            card(71, 3, Gem::Onyx, 4, [0, 0, 0, 7, 0]),
            card(72, 3, Gem::Onyx, 4, [3, 0, 3, 6, 0]),
            card(73, 3, Gem::Onyx, 5, [3, 0, 0, 7, 0]),
            card(74, 3, Gem::Sapphire, 3, [5, 0, 3, 3, 3]),
            card(75, 3, Gem::Sapphire, 4, [0, 0, 0, 0, 7]),
            card(76, 3, Gem::Sapphire, 4, [3, 3, 0, 0, 6]),
            card(77, 3, Gem::Sapphire, 5, [0, 3, 0, 0, 7]),
            card(78, 3, Gem::Diamond, 3, [3, 3, 3, 5, 0]),
            card(79, 3, Gem::Diamond, 4, [7, 0, 0, 0, 0]),
            card(80, 3, Gem::Diamond, 4, [6, 0, 0, 3, 3]),
            card(81, 3, Gem::Diamond, 5, [7, 0, 0, 0, 3]),
            card(82, 3, Gem::Emerald, 3, [3, 3, 0, 3, 5]),
            card(83, 3, Gem::Emerald, 4, [0, 7, 0, 0, 0]),
            card(84, 3, Gem::Emerald, 4, [0, 6, 3, 0, 3]),
            card(85, 3, Gem::Emerald, 5, [0, 7, 3, 0, 0]),
            card(86, 3, Gem::Ruby, 3, [3, 5, 3, 0, 3]),
            card(87, 3, Gem::Ruby, 4, [0, 0, 7, 0, 0]),
            card(88, 3, Gem::Ruby, 4, [0, 3, 6, 3, 0]),
            card(89, 3, Gem::Ruby, 5, [0, 0, 7, 3, 0]),
        ]
    }

    pub fn all() -> Vec<Card> {
        Card::catalog().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_match_indices() {
        for (i, card) in Card::catalog().iter().enumerate() {
            assert_eq!(card.id() as usize, i);
        }
    }

    #[test]
    fn catalog_tier_sizes() {
        let cards = Card::all();
        for tier in 1..=3u8 {
            let count = cards.iter().filter(|c| c.tier() == tier).count();
            assert_eq!(count, TIER_SIZES[tier as usize - 1]);
        }
    }

    #[test]
    fn discount_clamps_at_zero() {
        let cost = Cost::new([0, 4, 0, 0, 0]);
        let bonuses = Cost::new([2, 6, 0, 0, 0]);
        let discounted = cost.discounted_with(&bonuses);
        assert_eq!(discounted, Cost::default());
        assert!(cost.covered_by(&bonuses));
    }

    #[test]
    fn cost_widens_with_zero_gold() {
        let cost = Cost::new([1, 0, 2, 0, 0]);
        let gems = cost.to_gems();
        assert_eq!(gems[Gem::Onyx], 1);
        assert_eq!(gems[Gem::Emerald], 2);
        assert_eq!(gems[Gem::Gold], 0);
    }
}
