use crate::card::Card;
use crate::game_logic::{Action, ActionError, Announcement, Board, Game, Seat};
use log::info;
use std::sync::Arc;

pub type RoomId = u64;
pub type PlayerId = u64;

/// Most players a room will seat.
pub const MAX_PLAYERS: usize = 4;

/// A lobby and its match. A room starts in the waiting-for-players
/// stage; once the owner starts the game the member list is frozen and
/// every member's seat is their join-order index.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    owner: PlayerId,
    members: Vec<PlayerId>,
    game: Option<Game>,
    card_lookup: Arc<Vec<Card>>,
}

impl Room {
    /// Open a room; the owner takes the first seat.
    pub fn new(id: RoomId, owner: PlayerId, card_lookup: Arc<Vec<Card>>) -> Room {
        Room {
            id,
            owner,
            members: vec![owner],
            game: None,
            card_lookup,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.members.contains(&player)
    }

    pub fn is_started(&self) -> bool {
        self.game.is_some()
    }

    /// Join the lobby. Joining twice just returns the existing seat.
    pub fn join(&mut self, player: PlayerId) -> Result<Seat, ActionError> {
        if let Some(seat) = self.members.iter().position(|&m| m == player) {
            return Ok(seat);
        }
        if self.game.is_some() {
            return Err(ActionError::AlreadyStarted);
        }
        if self.members.len() >= MAX_PLAYERS {
            return Err(ActionError::RoomFull);
        }
        self.members.push(player);
        info!("player {} joined room {}", player, self.id);
        Ok(self.members.len() - 1)
    }

    pub fn seat_of(&self, player: PlayerId) -> Result<Seat, ActionError> {
        self.members
            .iter()
            .position(|&m| m == player)
            .ok_or(ActionError::UnknownPlayer)
    }

    /// The owner starts the match, freezing the member list. Seeded
    /// variant for reproducible games.
    pub fn start(&mut self, requester: PlayerId) -> Result<Vec<Announcement>, ActionError> {
        self.start_with(requester, None)
    }

    pub fn start_seeded(
        &mut self,
        requester: PlayerId,
        seed: u64,
    ) -> Result<Vec<Announcement>, ActionError> {
        self.start_with(requester, Some(seed))
    }

    fn start_with(
        &mut self,
        requester: PlayerId,
        seed: Option<u64>,
    ) -> Result<Vec<Announcement>, ActionError> {
        if !self.contains(requester) {
            return Err(ActionError::UnknownPlayer);
        }
        if requester != self.owner {
            return Err(ActionError::NotRoomOwner);
        }
        if self.game.is_some() {
            return Err(ActionError::AlreadyStarted);
        }
        let game = match seed {
            Some(seed) => Game::with_seed(self.members.len(), self.card_lookup.clone(), seed)?,
            None => Game::new(self.members.len(), self.card_lookup.clone())?,
        };
        let board = Board::from_game(&game);
        self.game = Some(game);
        info!("room {} started its game", self.id);
        Ok(vec![Announcement::GameStarted { board }])
    }

    pub fn game(&self) -> Result<&Game, ActionError> {
        self.game.as_ref().ok_or(ActionError::NotStarted)
    }

    pub fn game_mut(&mut self) -> Result<&mut Game, ActionError> {
        self.game.as_mut().ok_or(ActionError::NotStarted)
    }

    /// Route one player action into the match, translating the stable
    /// player id to their seat.
    pub fn handle(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<Vec<Announcement>, ActionError> {
        let seat = self.seat_of(player)?;
        self.game_mut()?.apply(seat, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testing strategy:
    ///     join: fresh, duplicate, full room, after start
    ///     start: non-member, non-owner, double start, 1-player room
    ///     handle: before start, unknown player, seat mapping

    fn room() -> Room {
        Room::new(7, 100, Arc::new(Card::all()))
    }

    #[test]
    fn owner_holds_the_first_seat() {
        let mut room = room();
        assert_eq!(room.seat_of(100), Ok(0));
        assert_eq!(room.join(101), Ok(1));
        assert_eq!(room.join(102), Ok(2));
        // Rejoining is idempotent
        assert_eq!(room.join(101), Ok(1));
        assert_eq!(room.members(), &[100, 101, 102]);
    }

    #[test]
    fn a_fifth_player_is_turned_away() {
        let mut room = room();
        for player in 101..104 {
            room.join(player).unwrap();
        }
        assert_eq!(room.join(104), Err(ActionError::RoomFull));
    }

    #[test]
    fn only_the_owner_starts() {
        let mut room = room();
        room.join(101).unwrap();
        assert_eq!(room.start(101), Err(ActionError::NotRoomOwner));
        assert_eq!(room.start(999), Err(ActionError::UnknownPlayer));
        assert!(room.start(100).is_ok());
    }

    #[test]
    fn starting_needs_at_least_two_players() {
        let mut room = room();
        assert_eq!(room.start(100), Err(ActionError::WrongPlayerCount));
        assert!(!room.is_started());
    }

    #[test]
    fn starting_twice_is_rejected() {
        let mut room = room();
        room.join(101).unwrap();
        room.start_seeded(100, 1).unwrap();
        assert_eq!(room.start(100), Err(ActionError::AlreadyStarted));
    }

    #[test]
    fn the_lobby_freezes_at_start() {
        let mut room = room();
        room.join(101).unwrap();
        room.start_seeded(100, 1).unwrap();
        assert_eq!(room.join(102), Err(ActionError::AlreadyStarted));
    }

    #[test]
    fn start_announces_the_board() {
        let mut room = room();
        room.join(101).unwrap();
        let announcements = room.start_seeded(100, 1).unwrap();
        match &announcements[..] {
            [Announcement::GameStarted { board }] => {
                assert_eq!(board.deck_counts, [36, 26, 16]);
                assert_eq!(board.nobles.len(), 3);
            }
            other => panic!("unexpected announcements: {:?}", other),
        }
    }

    #[test]
    fn actions_before_start_are_rejected() {
        let mut room = room();
        assert_eq!(
            room.handle(100, Action::EndTurn),
            Err(ActionError::NotStarted)
        );
    }

    #[test]
    fn handle_maps_player_ids_to_seats() {
        let mut room = room();
        room.join(101).unwrap();
        room.start_seeded(100, 1).unwrap();

        // Player 101 sits at seat 1; it is seat 0's turn
        assert_eq!(
            room.handle(101, Action::ReserveFromDeck { tier: 1 }),
            Err(ActionError::NotYourTurn)
        );
        assert_eq!(
            room.handle(999, Action::EndTurn),
            Err(ActionError::UnknownPlayer)
        );
        assert!(room.handle(100, Action::ReserveFromDeck { tier: 1 }).is_ok());
    }
}
