//! Shared application state: the room registry and the store handle.
//!
//! The registry maps room name to its actor address. The accept path and
//! the reaper are the only writers; once a room is registered, its state is
//! exclusive to its actor.

use std::sync::Arc;

use actix::Addr;
use dashmap::DashMap;

use crate::config::Pacing;
use crate::domain::Room;
use crate::infra::RoomStore;
use crate::ws::room::RoomActor;

#[derive(Clone)]
pub struct AppState {
    rooms: Arc<DashMap<String, Addr<RoomActor>>>,
    store: Arc<RoomStore>,
    pacing: Pacing,
}

impl AppState {
    pub fn new(store: RoomStore, pacing: Pacing) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            store: Arc::new(store),
            pacing,
        }
    }

    pub fn store(&self) -> Arc<RoomStore> {
        self.store.clone()
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn room(&self, name: &str) -> Option<Addr<RoomActor>> {
        self.rooms.get(name).map(|entry| entry.value().clone())
    }

    pub fn room_names(&self) -> Vec<String> {
        self.rooms.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Start an actor for `room` and register it.
    pub fn spawn_room(&self, room: Room) -> Addr<RoomActor> {
        use actix::Actor;
        let name = room.name.clone();
        let addr = RoomActor::new(room, self.clone()).start();
        self.rooms.insert(name, addr.clone());
        addr
    }

    pub fn remove_room(&self, name: &str) {
        self.rooms.remove(name);
    }
}
