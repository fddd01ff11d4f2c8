use crate::card::Card;
use crate::game_logic::{Action, ActionError, Announcement};
use crate::room::{PlayerId, Room, RoomId};
use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

/// The engine-side registry the transport talks to: the load-once card
/// catalog, shared read-only by every match, and the live rooms.
///
/// Rooms are disjoint state; the `DashMap` entry guard keeps each room
/// single-writer while separate rooms proceed in parallel. The engine
/// holds no lock across calls.
pub struct Registry {
    card_lookup: Arc<Vec<Card>>,
    rooms: DashMap<RoomId, Room>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            card_lookup: Arc::new(Card::all()),
            rooms: DashMap::new(),
        }
    }

    /// The whole catalog, indexable by card id.
    pub fn all_cards(&self) -> Arc<Vec<Card>> {
        self.card_lookup.clone()
    }

    pub fn cards_of_tier(&self, tier: u8) -> Vec<Card> {
        self.card_lookup
            .iter()
            .filter(|c| c.tier() == tier)
            .copied()
            .collect()
    }

    /// Open a room owned by `owner`. Reusing a live room id fails.
    pub fn create_room(&self, id: RoomId, owner: PlayerId) -> Result<(), ActionError> {
        let mut created = false;
        self.rooms.entry(id).or_insert_with(|| {
            created = true;
            Room::new(id, owner, self.card_lookup.clone())
        });
        if created {
            debug!("room {} created by player {}", id, owner);
            Ok(())
        } else {
            Err(ActionError::RoomExists)
        }
    }

    pub fn join_room(&self, id: RoomId, player: PlayerId) -> Result<usize, ActionError> {
        let mut room = self.rooms.get_mut(&id).ok_or(ActionError::UnknownRoom)?;
        room.join(player)
    }

    /// The room a player currently sits in, if any.
    pub fn room_with_player(&self, player: PlayerId) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|entry| entry.contains(player))
            .map(|entry| entry.id())
    }

    pub fn start_game(
        &self,
        id: RoomId,
        requester: PlayerId,
    ) -> Result<Vec<Announcement>, ActionError> {
        let mut room = self.rooms.get_mut(&id).ok_or(ActionError::UnknownRoom)?;
        room.start(requester)
    }

    /// Route one in-game action to its room. The entry guard serializes
    /// all actions against that match.
    pub fn handle(
        &self,
        id: RoomId,
        player: PlayerId,
        action: Action,
    ) -> Result<Vec<Announcement>, ActionError> {
        let mut room = self.rooms.get_mut(&id).ok_or(ActionError::UnknownRoom)?;
        room.handle(player, action)
    }

    /// Read access for snapshots and queries.
    pub fn with_room<T>(
        &self,
        id: RoomId,
        f: impl FnOnce(&Room) -> T,
    ) -> Result<T, ActionError> {
        let room = self.rooms.get(&id).ok_or(ActionError::UnknownRoom)?;
        Ok(f(&room))
    }

    /// Drop a finished (or abandoned) room.
    pub fn remove_room(&self, id: RoomId) -> bool {
        self.rooms.remove(&id).is_some()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_shared_and_complete() {
        let registry = Registry::new();
        assert_eq!(registry.all_cards().len(), 90);
        assert_eq!(registry.cards_of_tier(1).len(), 40);
        assert_eq!(registry.cards_of_tier(2).len(), 30);
        assert_eq!(registry.cards_of_tier(3).len(), 20);
    }

    #[test]
    fn duplicate_room_ids_are_rejected() {
        let registry = Registry::new();
        registry.create_room(1, 100).unwrap();
        assert!(registry.create_room(1, 200).is_err());
    }

    #[test]
    fn membership_queries_find_the_room() {
        let registry = Registry::new();
        registry.create_room(1, 100).unwrap();
        registry.create_room(2, 200).unwrap();
        registry.join_room(2, 201).unwrap();

        assert_eq!(registry.room_with_player(201), Some(2));
        assert_eq!(registry.room_with_player(100), Some(1));
        assert_eq!(registry.room_with_player(999), None);
    }

    #[test]
    fn actions_route_to_the_right_match() {
        let registry = Registry::new();
        registry.create_room(1, 100).unwrap();
        registry.join_room(1, 101).unwrap();
        registry.start_game(1, 100).unwrap();

        assert!(registry
            .handle(1, 100, Action::ReserveFromDeck { tier: 1 })
            .is_ok());
        assert_eq!(
            registry.handle(2, 100, Action::EndTurn),
            Err(ActionError::UnknownRoom)
        );
    }

    #[test]
    fn finished_rooms_can_be_removed() {
        let registry = Registry::new();
        registry.create_room(1, 100).unwrap();
        assert!(registry.remove_room(1));
        assert!(!registry.remove_room(1));
        assert_eq!(registry.room_with_player(100), None);
    }
}
