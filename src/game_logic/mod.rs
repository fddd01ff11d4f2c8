use crate::card::CardId;
use crate::gems::Gems;
use crate::nobles::NobleId;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

pub mod board;
pub mod game;
pub mod history;

pub use self::board::*;
pub use self::game::*;
pub use self::history::*;

/// A player's stable identity within a match: the seat index assigned in
/// join order. Seats never move or disappear mid-game, so they double as
/// turn-order positions.
pub type Seat = usize;

/// Points required to trigger the final round.
pub const WINNING_POINTS: u8 = 15;

/// Maximum tokens a player may hold at the end of an action.
pub const HAND_CAP: u32 = 10;

/// Cards a player may hold reserved at once.
pub const RESERVE_CAP: usize = 3;

/// Cards a player may reserve in total over a whole match.
pub const RESERVE_LIMIT: usize = 5;

/// Revealed face-up slots per tier.
pub const WINDOW_SIZE: usize = 4;

/// One player action per turn. Tiers are 1-based to match the printed
/// cards; token deltas are non-negative per color on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Take tokens from the bank, optionally returning others in the same
    /// action to stay within the hand cap.
    TakeTokens { take: Gems, give_back: Gems },
    /// Reserve blind from the top of a tier's deck.
    ReserveFromDeck { tier: u8 },
    /// Reserve a face-up card from a revealed window.
    ReserveFromTable { card: CardId },
    /// Buy a face-up card from a revealed window.
    BuyRevealed { card: CardId },
    /// Buy a card out of the acting player's own reserve.
    BuyReserved { card: CardId },
    /// Forfeit the turn; legal only when no other action is possible.
    Pass,
    /// Close out the turn after acting.
    EndTurn,
}

/// A state-change announcement for the transport to broadcast to the
/// room. Every accepted action yields at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Announcement {
    GameStarted { board: Board },
    /// Net bank-relative change for one player (positive = taken).
    TokensChanged { seat: Seat, delta: Gems },
    CardReserved { seat: Seat, card: CardId, with_gold: bool },
    /// A blind reservation announces the tier, not the card.
    CardReservedBlind { seat: Seat, tier: u8, with_gold: bool },
    CardPurchased { seat: Seat, card: CardId, payment: Gems },
    /// A replacement drawn into a revealed window.
    CardRevealed { tier: u8, card: CardId },
    NobleVisited { seat: Seat, noble: NobleId },
    Passed { seat: Seat },
    TurnEnded { seat: Seat, next: Seat },
    FinalRoundStarted { leader: Seat },
    GameEnded { rankings: Vec<Standing> },
}

/// One row of the end-game ranking, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub seat: Seat,
    pub points: u8,
    pub cards_purchased: usize,
}

/// Where a match is in its lifecycle. The waiting-for-players stage
/// lives in `Room`; a `Game` exists only once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    /// Someone crossed the point threshold; play continues until the
    /// turn pointer returns to `closer`, so every seat gets equal turns.
    FinalRound { closer: Seat },
    Ended,
}

/// A recoverable validation failure, reported only to the requester.
/// The match state is untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ActionError {
    #[display(fmt = "it is not your turn")]
    NotYourTurn,
    #[display(fmt = "you have already acted this turn")]
    AlreadyActed,
    #[display(fmt = "you must act before ending your turn")]
    TurnNotTaken,
    #[display(fmt = "you cannot pass while another action is available")]
    PassRefused,
    #[display(fmt = "that is not a legal token combination")]
    IllegalTokenCombination,
    #[display(fmt = "the bank cannot supply those tokens")]
    InsufficientBankTokens,
    #[display(fmt = "you cannot hold more than 10 tokens")]
    HandCapExceeded,
    #[display(fmt = "you cannot return tokens you do not hold")]
    IllegalReturn,
    #[display(fmt = "you cannot afford that card")]
    NotEnoughTokens,
    #[display(fmt = "you cannot hold more than 3 reserved cards")]
    ReserveCapReached,
    #[display(fmt = "you cannot reserve more than 5 cards per game")]
    ReserveLimitReached,
    #[display(fmt = "that deck is empty")]
    DeckEmpty,
    #[display(fmt = "no such tier")]
    UnknownTier,
    #[display(fmt = "no such card")]
    UnknownCard,
    #[display(fmt = "that card is not face up on the table")]
    CardNotRevealed,
    #[display(fmt = "that card is not in your reserve")]
    CardNotReserved,
    #[display(fmt = "no such player in this room")]
    UnknownPlayer,
    #[display(fmt = "no such room")]
    UnknownRoom,
    #[display(fmt = "that room id is taken")]
    RoomExists,
    #[display(fmt = "the game has already started")]
    AlreadyStarted,
    #[display(fmt = "the game has not started yet")]
    NotStarted,
    #[display(fmt = "the game is over")]
    GameOver,
    #[display(fmt = "a game needs 2 to 4 players")]
    WrongPlayerCount,
    #[display(fmt = "only the room owner can start the game")]
    NotRoomOwner,
    #[display(fmt = "the room is full")]
    RoomFull,
}
