use crate::game_logic::{Action, ActionError, Announcement, Board, Seat};
use crate::player::PlayerPublicInfo;
use crate::room::{PlayerId, RoomId};
use crate::JSONable;
use serde::{Deserialize, Serialize};

/// What the transport layer hands the engine: one already-framed player
/// command aimed at one room. Payload validation beyond JSON shape is
/// the engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub room: RoomId,
    pub player: PlayerId,
    pub command: Command,
}

/// Lobby commands plus every in-game action, one tag per action type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    StartGame,
    Play(Action),
}

/// What the engine hands back: announcements for the transport to
/// broadcast to the whole room, or a rejection for the requester alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineResponse {
    Announce(Vec<Announcement>),
    Rejected { reason: String },
}

impl From<Result<Vec<Announcement>, ActionError>> for EngineResponse {
    fn from(result: Result<Vec<Announcement>, ActionError>) -> Self {
        match result {
            Ok(announcements) => EngineResponse::Announce(announcements),
            Err(error) => EngineResponse::Rejected {
                reason: error.to_string(),
            },
        }
    }
}

/// Everything one client may see of a running match: the public board,
/// every player's public info, and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub board: Board,
    pub players: Vec<PlayerPublicInfo>,
    pub current_seat: Seat,
}

impl RoomView {
    pub fn from_game(game: &crate::game_logic::Game) -> RoomView {
        RoomView {
            board: Board::from_game(game),
            players: game.players().iter().map(|p| p.to_public()).collect(),
            current_seat: game.current_seat(),
        }
    }
}

impl JSONable for ActionRequest {}
impl JSONable for EngineResponse {}
impl JSONable for RoomView {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gems::Gems;

    #[test]
    fn requests_round_trip_through_json() {
        let request = ActionRequest {
            room: 1,
            player: 100,
            command: Command::Play(Action::TakeTokens {
                take: Gems::one(crate::gem::Gem::Ruby),
                give_back: Gems::empty(),
            }),
        };
        let json = request.to_json();
        assert_eq!(ActionRequest::from_json(&json), request);
    }

    #[test]
    fn rejections_carry_the_display_message() {
        let response: EngineResponse = Err(ActionError::NotYourTurn).into();
        assert_eq!(
            response,
            EngineResponse::Rejected {
                reason: "it is not your turn".to_string()
            }
        );
    }
}
