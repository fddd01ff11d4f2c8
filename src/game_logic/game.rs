use crate::bank::TokenBank;
use crate::card::{Card, CardId};
use crate::gem::Gem;
use crate::gems::Gems;
use crate::nobles::Noble;
use crate::player::PlayerLedger;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use log::{debug, info};

use std::sync::Arc;

use super::*;

/// One running match. Composes the bank, the tiered decks and their
/// revealed windows, the noble set, the turn pointer and every player
/// ledger, and owns all cross-entity validation.
///
/// All operations are synchronous call-and-return; the caller (the
/// transport layer) must serialize actions per match. Every validation
/// failure leaves the state untouched: checks fully precede mutation.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<PlayerLedger>,
    bank: TokenBank,
    decks: [Vec<Card>; 3],
    revealed: [Vec<CardId>; 3],
    nobles: Vec<Noble>,
    current: Seat,
    status: Status,
    card_lookup: Arc<Vec<Card>>,
    history: GameHistory,
    rng: StdRng,
}

impl Game {
    /// Start a match with a fresh entropy seed.
    pub fn new(players: usize, card_lookup: Arc<Vec<Card>>) -> Result<Game, ActionError> {
        Game::with_rng(players, card_lookup, StdRng::from_entropy())
    }

    /// Start a match with a fixed seed, for reproducible games.
    pub fn with_seed(
        players: usize,
        card_lookup: Arc<Vec<Card>>,
        seed: u64,
    ) -> Result<Game, ActionError> {
        Game::with_rng(players, card_lookup, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        players: usize,
        card_lookup: Arc<Vec<Card>>,
        mut rng: StdRng,
    ) -> Result<Game, ActionError> {
        if !(2..=4).contains(&players) {
            return Err(ActionError::WrongPlayerCount);
        }

        let mut decks: [Vec<Card>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for card in card_lookup.iter() {
            decks[card.tier() as usize - 1].push(*card);
        }
        for deck in decks.iter_mut() {
            deck.shuffle(&mut rng);
        }

        let mut revealed: [Vec<CardId>; 3] = Default::default();
        for (tier, deck) in decks.iter_mut().enumerate() {
            let take = WINDOW_SIZE.min(deck.len());
            revealed[tier] = deck.drain(deck.len() - take..).map(|c| c.id()).collect();
        }

        let nobles = Noble::draw(players, &mut rng);

        info!("match started with {} players", players);
        let game = Game {
            players: (0..players).map(|_| PlayerLedger::new()).collect(),
            bank: TokenBank::for_players(players),
            decks,
            revealed,
            nobles,
            current: 0,
            status: Status::InProgress,
            card_lookup,
            history: GameHistory::new(),
            rng,
        };
        debug_assert!(game.cards_unique());
        Ok(game)
    }

    pub fn players(&self) -> &[PlayerLedger] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Result<&PlayerLedger, ActionError> {
        self.players.get(seat).ok_or(ActionError::UnknownPlayer)
    }

    pub fn bank(&self) -> &TokenBank {
        &self.bank
    }

    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    pub fn revealed(&self) -> &[Vec<CardId>; 3] {
        &self.revealed
    }

    pub fn deck_counts(&self) -> [usize; 3] {
        [self.decks[0].len(), self.decks[1].len(), self.decks[2].len()]
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn card_lookup(&self) -> Arc<Vec<Card>> {
        self.card_lookup.clone()
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Ended
    }

    /// Apply one validated player action. On success the returned
    /// announcements describe every resulting state change, in order, for
    /// the transport to broadcast. On failure nothing has changed and the
    /// error goes back to the requester alone.
    pub fn apply(&mut self, seat: Seat, action: Action) -> Result<Vec<Announcement>, ActionError> {
        if self.status == Status::Ended {
            return Err(ActionError::GameOver);
        }
        if seat >= self.players.len() {
            return Err(ActionError::UnknownPlayer);
        }
        debug!("seat {} requested {:?}", seat, action);

        let announcements = match action.clone() {
            Action::TakeTokens { take, give_back } => self.take_tokens(seat, take, give_back)?,
            Action::ReserveFromDeck { tier } => self.reserve_from_deck(seat, tier)?,
            Action::ReserveFromTable { card } => self.reserve_from_table(seat, card)?,
            Action::BuyRevealed { card } => self.buy_revealed(seat, card)?,
            Action::BuyReserved { card } => self.buy_reserved(seat, card)?,
            Action::Pass => self.pass(seat)?,
            Action::EndTurn => self.end_turn(seat)?,
        };

        self.history.record(seat, action);
        debug_assert!(self.tokens_conserved(), "token conservation violated");
        debug_assert!(self.cards_unique(), "card uniqueness violated");
        Ok(announcements)
    }

    /// Common gate for every turn action except `EndTurn`: the seat must
    /// hold the turn and must not have acted yet.
    fn check_may_act(&self, seat: Seat) -> Result<(), ActionError> {
        if seat != self.current {
            return Err(ActionError::NotYourTurn);
        }
        if self.players[seat].has_acted() {
            return Err(ActionError::AlreadyActed);
        }
        Ok(())
    }

    fn take_tokens(
        &mut self,
        seat: Seat,
        take: Gems,
        give_back: Gems,
    ) -> Result<Vec<Announcement>, ActionError> {
        self.check_may_act(seat)?;
        self.bank.validate_take(&take)?;
        if !give_back.legal() {
            return Err(ActionError::IllegalReturn);
        }

        let player = &self.players[seat];
        let after_take = *player.gems() + take;
        if !after_take.covers(&give_back) {
            return Err(ActionError::IllegalReturn);
        }
        if after_take.total() > HAND_CAP {
            // The give-back must land the hand exactly on the cap
            if after_take.total() - give_back.total() != HAND_CAP {
                return Err(ActionError::HandCapExceeded);
            }
        } else if !give_back.is_empty() {
            // No overflow, nothing to give back
            return Err(ActionError::IllegalReturn);
        }

        self.bank.withdraw(take);
        self.bank.deposit(give_back);
        let player = &mut self.players[seat];
        player.add_gems(take);
        player.remove_gems(give_back);
        player.mark_acted();

        Ok(vec![Announcement::TokensChanged {
            seat,
            delta: take - give_back,
        }])
    }

    fn reserve_from_deck(&mut self, seat: Seat, tier: u8) -> Result<Vec<Announcement>, ActionError> {
        self.check_may_act(seat)?;
        if !(1..=3).contains(&tier) {
            return Err(ActionError::UnknownTier);
        }
        self.players[seat].check_can_reserve()?;
        let deck = &mut self.decks[tier as usize - 1];
        if deck.is_empty() {
            return Err(ActionError::DeckEmpty);
        }

        let card = deck.pop().expect("deck checked non-empty");
        let with_gold = self.grant_gold_to(seat);
        let player = &mut self.players[seat];
        player.reserve(card.id(), true);
        player.mark_acted();

        Ok(vec![Announcement::CardReservedBlind {
            seat,
            tier,
            with_gold,
        }])
    }

    fn reserve_from_table(
        &mut self,
        seat: Seat,
        card: CardId,
    ) -> Result<Vec<Announcement>, ActionError> {
        self.check_may_act(seat)?;
        self.lookup(card)?;
        self.players[seat].check_can_reserve()?;
        let tier = self.revealed_tier_of(card).ok_or(ActionError::CardNotRevealed)?;

        self.remove_revealed(tier, card);
        let replacement = self.refill_window(tier);
        let with_gold = self.grant_gold_to(seat);
        let player = &mut self.players[seat];
        player.reserve(card, false);
        player.mark_acted();

        let mut announcements = vec![Announcement::CardReserved {
            seat,
            card,
            with_gold,
        }];
        announcements.extend(replacement);
        Ok(announcements)
    }

    fn buy_revealed(&mut self, seat: Seat, card: CardId) -> Result<Vec<Announcement>, ActionError> {
        self.check_may_act(seat)?;
        let card = *self.lookup(card)?;
        let tier = self
            .revealed_tier_of(card.id())
            .ok_or(ActionError::CardNotRevealed)?;
        let payment = self.players[seat].payment_for(&card)?;

        self.remove_revealed(tier, card.id());
        let replacement = self.refill_window(tier);
        self.settle_purchase(seat, &card, payment);

        let mut announcements = vec![Announcement::CardPurchased {
            seat,
            card: card.id(),
            payment,
        }];
        announcements.extend(replacement);
        Ok(announcements)
    }

    fn buy_reserved(&mut self, seat: Seat, card: CardId) -> Result<Vec<Announcement>, ActionError> {
        self.check_may_act(seat)?;
        let card = *self.lookup(card)?;
        if !self.players[seat].has_reserved(card.id()) {
            return Err(ActionError::CardNotReserved);
        }
        let payment = self.players[seat].payment_for(&card)?;

        self.settle_purchase(seat, &card, payment);

        Ok(vec![Announcement::CardPurchased {
            seat,
            card: card.id(),
            payment,
        }])
    }

    fn pass(&mut self, seat: Seat) -> Result<Vec<Announcement>, ActionError> {
        self.check_may_act(seat)?;
        if self.any_action_available(seat) {
            return Err(ActionError::PassRefused);
        }
        self.players[seat].mark_acted();
        Ok(vec![Announcement::Passed { seat }])
    }

    fn end_turn(&mut self, seat: Seat) -> Result<Vec<Announcement>, ActionError> {
        if seat != self.current {
            return Err(ActionError::NotYourTurn);
        }
        if !self.players[seat].has_acted() {
            return Err(ActionError::TurnNotTaken);
        }

        let mut announcements = Vec::new();

        // At most one noble visit per turn; ties break to the lowest id
        let visiting = self
            .nobles
            .iter()
            .filter(|n| n.is_attracted_to(self.players[seat].bonuses()))
            .min_by_key(|n| n.id())
            .map(|n| (n.id(), n.points()));
        if let Some((noble_id, points)) = visiting {
            self.players[seat].visit_noble(points);
            self.nobles.retain(|n| n.id() != noble_id);
            info!("noble {} visits seat {}", noble_id, seat);
            announcements.push(Announcement::NobleVisited {
                seat,
                noble: noble_id,
            });
        }

        // The threshold is evaluated here, not at purchase time
        if self.status == Status::InProgress && self.players[seat].points() >= WINNING_POINTS {
            self.status = Status::FinalRound { closer: seat };
            info!("seat {} triggered the final round", seat);
            announcements.push(Announcement::FinalRoundStarted { leader: seat });
        }

        self.players[seat].clear_acted();
        let next = (seat + 1) % self.players.len();
        self.current = next;
        announcements.push(Announcement::TurnEnded { seat, next });

        if let Status::FinalRound { closer } = self.status {
            if next == closer {
                self.status = Status::Ended;
                let rankings = self.rankings();
                info!("match over: {:?}", rankings);
                announcements.push(Announcement::GameEnded { rankings });
            }
        }

        Ok(announcements)
    }

    /// End-game ranking: points descending, then fewer purchased cards,
    /// then seat order as a last resort.
    pub fn rankings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| Standing {
                seat,
                points: p.points(),
                cards_purchased: p.num_purchased(),
            })
            .collect();
        standings.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(a.cards_purchased.cmp(&b.cards_purchased))
                .then(a.seat.cmp(&b.seat))
        });
        standings
    }

    /// Re-derive whether any non-pass action is open to this seat, using
    /// the same legality rules as the direct actions.
    pub fn any_action_available(&self, seat: Seat) -> bool {
        let player = &self.players[seat];

        // Taking a single token of any color is the weakest legal take
        if Gem::COLORS
            .iter()
            .any(|&c| self.bank.validate_take(&Gems::one(c)).is_ok())
        {
            return true;
        }

        if player.check_can_reserve().is_ok() {
            let any_deck = self.decks.iter().any(|d| !d.is_empty());
            let any_revealed = self.revealed.iter().any(|w| !w.is_empty());
            if any_deck || any_revealed {
                return true;
            }
        }

        self.revealed
            .iter()
            .flatten()
            .chain(player.reserved().iter())
            .any(|&id| {
                let card = &self.card_lookup[id as usize];
                player.payment_for(card).is_ok()
            })
    }

    fn lookup(&self, card: CardId) -> Result<&Card, ActionError> {
        self.card_lookup
            .get(card as usize)
            .ok_or(ActionError::UnknownCard)
    }

    /// Which tier's window currently shows this card, if any.
    fn revealed_tier_of(&self, card: CardId) -> Option<usize> {
        self.revealed.iter().position(|w| w.contains(&card))
    }

    fn remove_revealed(&mut self, tier: usize, card: CardId) {
        let window = &mut self.revealed[tier];
        let index = window
            .iter()
            .position(|&id| id == card)
            .expect("card checked revealed");
        window.remove(index);
    }

    /// Draw exactly one replacement into a window after a card was taken.
    /// An exhausted deck just leaves the window short.
    fn refill_window(&mut self, tier: usize) -> Option<Announcement> {
        let card = self.decks[tier].pop()?;
        self.revealed[tier].push(card.id());
        Some(Announcement::CardRevealed {
            tier: tier as u8 + 1,
            card: card.id(),
        })
    }

    /// Reservation gold grant: only while the bank has gold and the hand
    /// has room, so the hand cap stays intact without a discard step.
    fn grant_gold_to(&mut self, seat: Seat) -> bool {
        if self.players[seat].gems().total() >= HAND_CAP {
            return false;
        }
        if self.bank.grant_gold() {
            self.players[seat].add_gems(Gems::one(Gem::Gold));
            true
        } else {
            false
        }
    }

    fn settle_purchase(&mut self, seat: Seat, card: &Card, payment: Gems) {
        self.players[seat].purchase(card, &payment);
        self.bank.deposit(payment);
        self.players[seat].mark_acted();
    }

    /// Invariant: bank plus all hands equals the starting allocation.
    fn tokens_conserved(&self) -> bool {
        let held = self
            .players
            .iter()
            .fold(Gems::empty(), |acc, p| acc + *p.gems());
        *self.bank.gems() + held == Gems::bank_for(self.players.len())
    }

    /// Invariant: every catalog card id lives in exactly one place.
    fn cards_unique(&self) -> bool {
        let mut seen = vec![0u8; self.card_lookup.len()];
        for deck in &self.decks {
            for card in deck {
                seen[card.id() as usize] += 1;
            }
        }
        for id in self.revealed.iter().flatten() {
            seen[*id as usize] += 1;
        }
        for player in &self.players {
            for id in player.reserved() {
                seen[*id as usize] += 1;
            }
            for id in player.purchased() {
                seen[*id as usize] += 1;
            }
        }
        seen.iter().all(|&count| count == 1)
    }
}
