use crate::card::{Card, CardId, Cost};
use crate::game_logic::{ActionError, RESERVE_CAP, RESERVE_LIMIT};
use crate::gem::Gem;
use crate::gems::Gems;
use serde::{Deserialize, Serialize};

/// What every opponent is allowed to know about a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublicInfo {
    pub points: u8,
    pub num_reserved: usize,
    pub bonuses: Cost,
    pub gems: Gems,
}

/// Per-player bookkeeping for one match: tokens held, permanent bonuses,
/// reserved and purchased cards, prestige, and the acted-this-turn flag.
/// Ledgers are created at game start and never destroyed mid-game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerLedger {
    gems: Gems,
    bonuses: Cost,
    points: u8,
    noble_points: u8,
    reserved: Vec<CardId>,
    blind_reserved: Vec<CardId>,
    purchased: Vec<CardId>,
    lifetime_reserved: usize,
    acted: bool,
}

impl PlayerLedger {
    pub fn new() -> PlayerLedger {
        PlayerLedger {
            gems: Gems::empty(),
            bonuses: Cost::default(),
            points: 0,
            noble_points: 0,
            reserved: Vec::new(),
            blind_reserved: Vec::new(),
            purchased: Vec::new(),
            lifetime_reserved: 0,
            acted: false,
        }
    }

    pub fn gems(&self) -> &Gems {
        &self.gems
    }

    pub fn bonuses(&self) -> &Cost {
        &self.bonuses
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    pub fn noble_points(&self) -> u8 {
        self.noble_points
    }

    pub fn purchased(&self) -> &[CardId] {
        &self.purchased
    }

    pub fn num_purchased(&self) -> usize {
        self.purchased.len()
    }

    /// Every card currently reserved, blind or not.
    pub fn reserved(&self) -> &[CardId] {
        &self.reserved
    }

    /// Reserved cards all opponents know about (taken face up).
    pub fn public_reserved(&self) -> Vec<CardId> {
        self.reserved
            .iter()
            .copied()
            .filter(|id| !self.blind_reserved.contains(id))
            .collect()
    }

    pub fn num_reserved(&self) -> usize {
        self.reserved.len()
    }

    pub fn lifetime_reserved(&self) -> usize {
        self.lifetime_reserved
    }

    pub fn has_reserved(&self, card: CardId) -> bool {
        self.reserved.contains(&card)
    }

    pub fn has_acted(&self) -> bool {
        self.acted
    }

    pub fn mark_acted(&mut self) {
        self.acted = true;
    }

    pub fn clear_acted(&mut self) {
        self.acted = false;
    }

    pub fn to_public(&self) -> PlayerPublicInfo {
        PlayerPublicInfo {
            points: self.points,
            num_reserved: self.reserved.len(),
            bonuses: self.bonuses,
            gems: self.gems,
        }
    }

    /// Both reservation caps: 3 held at once, 5 over the whole match.
    pub fn check_can_reserve(&self) -> Result<(), ActionError> {
        if self.reserved.len() >= RESERVE_CAP {
            return Err(ActionError::ReserveCapReached);
        }
        if self.lifetime_reserved >= RESERVE_LIMIT {
            return Err(ActionError::ReserveLimitReached);
        }
        Ok(())
    }

    pub fn reserve(&mut self, card: CardId, blind: bool) {
        debug_assert!(self.check_can_reserve().is_ok());
        self.reserved.push(card);
        if blind {
            self.blind_reserved.push(card);
        }
        self.lifetime_reserved += 1;
    }

    pub fn add_gems(&mut self, gems: Gems) {
        debug_assert!(gems.legal());
        self.gems += gems;
    }

    pub fn remove_gems(&mut self, gems: Gems) {
        self.gems -= gems;
        debug_assert!(self.gems.legal(), "player hand overdrawn: {:?}", self.gems);
    }

    /// The canonical payment for a card from this ledger: after bonuses,
    /// every color is paid from colored tokens first and gold covers only
    /// the per-color shortfall. Fails when even all held gold cannot
    /// close the gap.
    pub fn payment_for(&self, card: &Card) -> Result<Gems, ActionError> {
        let owed = card.cost().discounted_with(&self.bonuses);
        let mut payment = Gems::empty();
        let mut gold_needed = 0i8;
        for color in Gem::COLORS {
            let from_hand = owed[color].min(self.gems[color]);
            payment[color] = from_hand;
            gold_needed += owed[color] - from_hand;
        }
        if gold_needed > self.gems[Gem::Gold] {
            return Err(ActionError::NotEnoughTokens);
        }
        payment[Gem::Gold] = gold_needed;
        Ok(payment)
    }

    /// Settle a purchase: debit the payment, bank the card, credit its
    /// bonus and prestige. The card leaves the reserve if it was there.
    pub fn purchase(&mut self, card: &Card, payment: &Gems) {
        debug_assert!(payment.legal());
        self.remove_gems(*payment);
        self.bonuses[card.gem()] += 1;
        self.points += card.points();
        self.purchased.push(card.id());
        self.reserved.retain(|&id| id != card.id());
        self.blind_reserved.retain(|&id| id != card.id());
    }

    pub fn visit_noble(&mut self, points: u8) {
        self.points += points;
        self.noble_points += points;
    }
}

impl Default for PlayerLedger {
    fn default() -> Self {
        PlayerLedger::new()
    }
}
