use crate::gem::{Gem, GEM_COUNT};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};

/// A per-color token count, used for the bank, player hands, payments and
/// net take/return deltas alike. Counts are signed so that intermediate
/// deltas may go negative; `legal()` distinguishes a real holding from a
/// delta.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Gems([i8; GEM_COUNT]);

impl Gems {
    pub fn empty() -> Gems {
        Gems([0; GEM_COUNT])
    }

    /// A single token of the given color.
    pub fn one(color: Gem) -> Gems {
        let mut gems = Gems::empty();
        gems[color] = 1;
        gems
    }

    pub fn from_pairs(pairs: &[(Gem, i8)]) -> Gems {
        let mut gems = Gems::empty();
        for &(color, count) in pairs {
            gems[color] += count;
        }
        gems
    }

    /// The bank allocation for a legal player count. Gem piles scale with
    /// the table size, gold is always 5.
    pub fn bank_for(players: usize) -> Gems {
        let per_color = match players {
            2 => 4,
            3 => 5,
            4 => 7,
            n => panic!("no bank allocation for {} players", n),
        };
        let mut gems = Gems([per_color; GEM_COUNT]);
        gems[Gem::Gold] = 5;
        gems
    }

    pub fn total(&self) -> u32 {
        debug_assert!(self.legal(), "totalling an illegal token state: {:?}", self);
        self.0.iter().map(|&n| n as u32).sum()
    }

    /// True when no color has a negative count.
    pub fn legal(&self) -> bool {
        self.0.iter().all(|&n| n >= 0)
    }

    /// True when every count is zero.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Number of gem colors (gold excluded) with at least one token.
    pub fn distinct(&self) -> usize {
        Gem::COLORS.iter().filter(|&&c| self[c] > 0).count()
    }

    /// Colors (gold included) with at least one token.
    pub fn colors_held(&self) -> Vec<Gem> {
        Gem::ALL.into_iter().filter(|&c| self[c] > 0).collect()
    }

    /// True when this holding covers `other` color for color.
    pub fn covers(&self, other: &Gems) -> bool {
        Gem::ALL.into_iter().all(|c| self[c] >= other[c])
    }
}

impl Index<Gem> for Gems {
    type Output = i8;

    fn index(&self, color: Gem) -> &i8 {
        &self.0[color.index()]
    }
}

impl IndexMut<Gem> for Gems {
    fn index_mut(&mut self, color: Gem) -> &mut i8 {
        &mut self.0[color.index()]
    }
}

impl Add for Gems {
    type Output = Gems;

    fn add(mut self, other: Gems) -> Gems {
        self += other;
        self
    }
}

impl Sub for Gems {
    type Output = Gems;

    fn sub(mut self, other: Gems) -> Gems {
        self -= other;
        self
    }
}

impl AddAssign for Gems {
    fn add_assign(&mut self, other: Gems) {
        for i in 0..GEM_COUNT {
            self.0[i] += other.0[i];
        }
    }
}

impl SubAssign for Gems {
    fn sub_assign(&mut self, other: Gems) {
        for i in 0..GEM_COUNT {
            self.0[i] -= other.0[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_allocation_scales_with_player_count() {
        let two = Gems::bank_for(2);
        assert_eq!(two[Gem::Ruby], 4);
        assert_eq!(two[Gem::Gold], 5);
        assert_eq!(two.total(), 25);

        let three = Gems::bank_for(3);
        assert_eq!(three[Gem::Onyx], 5);
        assert_eq!(three[Gem::Gold], 5);

        let four = Gems::bank_for(4);
        assert_eq!(four[Gem::Diamond], 7);
        assert_eq!(four[Gem::Gold], 5);
    }

    #[test]
    fn arithmetic_is_per_color() {
        let a = Gems::from_pairs(&[(Gem::Ruby, 2), (Gem::Gold, 1)]);
        let b = Gems::from_pairs(&[(Gem::Ruby, 1), (Gem::Emerald, 3)]);
        let sum = a + b;
        assert_eq!(sum[Gem::Ruby], 3);
        assert_eq!(sum[Gem::Emerald], 3);
        assert_eq!(sum[Gem::Gold], 1);

        let diff = sum - b;
        assert_eq!(diff, a);
    }

    #[test]
    fn distinct_ignores_gold() {
        let gems = Gems::from_pairs(&[(Gem::Ruby, 1), (Gem::Gold, 4)]);
        assert_eq!(gems.distinct(), 1);
        assert_eq!(gems.colors_held(), vec![Gem::Ruby, Gem::Gold]);
    }

    #[test]
    fn deltas_may_go_negative_but_are_not_legal() {
        let delta = Gems::empty() - Gems::one(Gem::Sapphire);
        assert!(!delta.legal());
        assert!((Gems::one(Gem::Sapphire) + delta).legal());
    }

    #[test]
    fn covers_is_color_for_color() {
        let hand = Gems::from_pairs(&[(Gem::Ruby, 2), (Gem::Onyx, 1)]);
        assert!(hand.covers(&Gems::one(Gem::Ruby)));
        assert!(!hand.covers(&Gems::from_pairs(&[(Gem::Onyx, 2)])));
    }
}
