use crate::card::Cost;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub type NobleId = u8;

/// Every noble is worth the same prestige.
pub const NOBLE_POINTS: u8 = 3;

/// A noble visitor. Requirements are permanent card bonuses, never
/// tokens, so a visit costs the player nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noble {
    id: NobleId,
    requirements: Cost,
}

const fn noble(id: NobleId, requirements: [i8; 5]) -> Noble {
    Noble {
        id,
        requirements: Cost::new(requirements),
    }
}

impl Noble {
    /// The full 10-noble catalog, indexable by noble id. Requirement
    /// columns are ordered onyx, sapphire, emerald, ruby, diamond.
    pub const fn catalog() -> [Noble; 10] {
        [
            noble(0, [0, 0, 4, 4, 0]),
            noble(1, [3, 0, 0, 3, 3]),
            noble(2, [3, 0, 3, 3, 0]),
            noble(3, [0, 4, 0, 0, 4]),
            noble(4, [4, 0, 0, 0, 4]),
            noble(5, [0, 4, 4, 0, 0]),
            noble(6, [0, 3, 3, 3, 0]),
            noble(7, [0, 3, 3, 0, 3]),
            noble(8, [4, 0, 4, 0, 0]),
            noble(9, [3, 3, 0, 0, 3]),
        ]
    }

    pub fn all() -> Vec<Noble> {
        Noble::catalog().to_vec()
    }

    /// Draw the starting noble set for a match: player count + 1, chosen
    /// uniformly without replacement.
    pub fn draw<R: Rng>(players: usize, rng: &mut R) -> Vec<Noble> {
        let mut nobles = Noble::all();
        nobles.shuffle(rng);
        nobles.truncate(players + 1);
        nobles
    }

    pub fn id(&self) -> NobleId {
        self.id
    }

    pub fn points(&self) -> u8 {
        NOBLE_POINTS
    }

    pub fn requirements(&self) -> &Cost {
        &self.requirements
    }

    /// Whether a player's bonus spread satisfies this noble.
    pub fn is_attracted_to(&self, bonuses: &Cost) -> bool {
        self.requirements.covered_by(bonuses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn catalog_ids_match_indices() {
        for (i, noble) in Noble::catalog().iter().enumerate() {
            assert_eq!(noble.id() as usize, i);
        }
    }

    #[test]
    fn draw_count_is_players_plus_one() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Noble::draw(2, &mut rng).len(), 3);
        assert_eq!(Noble::draw(3, &mut rng).len(), 4);
        assert_eq!(Noble::draw(4, &mut rng).len(), 5);
    }

    #[test]
    fn attraction_needs_every_color_covered() {
        let noble = &Noble::catalog()[1];
        let short = Cost::new([3, 0, 0, 3, 2]);
        let exact = Cost::new([3, 0, 0, 3, 3]);
        let over = Cost::new([5, 1, 0, 4, 3]);
        assert!(!noble.is_attracted_to(&short));
        assert!(noble.is_attracted_to(&exact));
        assert!(noble.is_attracted_to(&over));
    }
}
