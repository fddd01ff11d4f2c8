use crate::game_logic::ActionError;
use crate::gem::Gem;
use crate::gems::Gems;
use log::trace;
use serde::{Deserialize, Serialize};

/// The shared token pool of one match. The bank only checks its own
/// legality rules (take shapes and supply); turn order and hand caps are
/// the match's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBank {
    gems: Gems,
}

impl TokenBank {
    pub fn for_players(players: usize) -> TokenBank {
        TokenBank {
            gems: Gems::bank_for(players),
        }
    }

    pub fn gems(&self) -> &Gems {
        &self.gems
    }

    pub fn has_gold(&self) -> bool {
        self.gems[Gem::Gold] > 0
    }

    /// Check a requested take against the two legal shapes and current
    /// supply. Mutates nothing.
    ///
    /// Shapes: exactly two of one color, allowed only while that pile
    /// still holds four or more; or one each of up to three distinct
    /// colors. Gold is never takeable this way.
    pub fn validate_take(&self, take: &Gems) -> Result<(), ActionError> {
        if !take.legal() || take.is_empty() {
            return Err(ActionError::IllegalTokenCombination);
        }
        if take[Gem::Gold] != 0 {
            return Err(ActionError::IllegalTokenCombination);
        }

        let doubles: Vec<Gem> = Gem::COLORS.into_iter().filter(|&c| take[c] >= 2).collect();
        match doubles.as_slice() {
            [] => {
                // 1..=3 distinct colors, one token each
                if take.distinct() > 3 {
                    return Err(ActionError::IllegalTokenCombination);
                }
            }
            [color] => {
                if take[*color] != 2 || take.total() != 2 {
                    return Err(ActionError::IllegalTokenCombination);
                }
                if self.gems[*color] < 4 {
                    return Err(ActionError::InsufficientBankTokens);
                }
            }
            _ => return Err(ActionError::IllegalTokenCombination),
        }

        if !self.gems.covers(take) {
            return Err(ActionError::InsufficientBankTokens);
        }
        Ok(())
    }

    /// Debit the bank. Callers must have validated supply first.
    pub fn withdraw(&mut self, gems: Gems) {
        trace!("bank withdraw: {:?}", gems);
        self.gems -= gems;
        debug_assert!(self.gems.legal(), "bank overdrawn: {:?}", self.gems);
    }

    /// Credit the bank with returned tokens or a card payment.
    pub fn deposit(&mut self, gems: Gems) {
        debug_assert!(gems.legal());
        trace!("bank deposit: {:?}", gems);
        self.gems += gems;
    }

    /// Hand out one gold for a reservation, if any remains. Returns
    /// whether a gold was granted.
    pub fn grant_gold(&mut self) -> bool {
        if self.has_gold() {
            self.gems -= Gems::one(Gem::Gold);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testing strategy:
    ///     validate_take:
    ///         - distinct shape: 1, 2, 3, 4 colors; with/without supply
    ///         - double shape: pile >= 4, pile < 4, double plus extras
    ///         - gold requested, empty request, negative delta
    ///     grant_gold: gold remaining / exhausted

    #[test]
    fn take_three_distinct_is_legal() {
        let bank = TokenBank::for_players(2);
        let take = Gems::from_pairs(&[(Gem::Ruby, 1), (Gem::Onyx, 1), (Gem::Emerald, 1)]);
        assert_eq!(bank.validate_take(&take), Ok(()));
    }

    #[test]
    fn take_four_distinct_is_illegal() {
        let bank = TokenBank::for_players(2);
        let take = Gems::from_pairs(&[
            (Gem::Ruby, 1),
            (Gem::Onyx, 1),
            (Gem::Emerald, 1),
            (Gem::Diamond, 1),
        ]);
        assert_eq!(
            bank.validate_take(&take),
            Err(ActionError::IllegalTokenCombination)
        );
    }

    #[test]
    fn take_two_same_needs_four_in_pile() {
        let mut bank = TokenBank::for_players(2);
        let take = Gems::from_pairs(&[(Gem::Ruby, 2)]);
        assert_eq!(bank.validate_take(&take), Ok(()));

        // Drop the ruby pile to 3 and the same take becomes illegal
        bank.withdraw(Gems::one(Gem::Ruby));
        assert_eq!(
            bank.validate_take(&take),
            Err(ActionError::InsufficientBankTokens)
        );
    }

    #[test]
    fn take_double_plus_extra_is_illegal() {
        let bank = TokenBank::for_players(4);
        let take = Gems::from_pairs(&[(Gem::Ruby, 2), (Gem::Onyx, 1)]);
        assert_eq!(
            bank.validate_take(&take),
            Err(ActionError::IllegalTokenCombination)
        );
    }

    #[test]
    fn gold_is_never_directly_takeable() {
        let bank = TokenBank::for_players(2);
        assert_eq!(
            bank.validate_take(&Gems::one(Gem::Gold)),
            Err(ActionError::IllegalTokenCombination)
        );
    }

    #[test]
    fn empty_take_is_illegal() {
        let bank = TokenBank::for_players(2);
        assert_eq!(
            bank.validate_take(&Gems::empty()),
            Err(ActionError::IllegalTokenCombination)
        );
    }

    #[test]
    fn supply_is_checked_per_color() {
        let mut bank = TokenBank::for_players(2);
        bank.withdraw(Gems::from_pairs(&[(Gem::Sapphire, 4)]));
        assert_eq!(
            bank.validate_take(&Gems::one(Gem::Sapphire)),
            Err(ActionError::InsufficientBankTokens)
        );
    }

    #[test]
    fn gold_grant_runs_dry() {
        let mut bank = TokenBank::for_players(2);
        for _ in 0..5 {
            assert!(bank.grant_gold());
        }
        assert!(!bank.grant_gold());
        assert!(!bank.has_gold());
    }
}
