//! Durable room storage.
//!
//! The entire authoritative state is one JSON document keyed
//! `euchre-rooms`, mapping room name to the full `Room` (hands included).
//! Every committed mutation rewrites the document via temp-file + rename;
//! a sidecar lock file (fs4 advisory lock) keeps concurrent processes from
//! interleaving writes, and an in-process mutex serializes callers.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::Room;
use crate::error::AppError;

pub const STORE_KEY: &str = "euchre-rooms";
const STORE_FILE: &str = "euchre-rooms.json";
const LOCK_FILE: &str = "euchre-rooms.lock";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(rename = "euchre-rooms")]
    rooms: HashMap<String, Room>,
}

#[derive(Debug)]
pub struct RoomStore {
    path: PathBuf,
    lock_path: PathBuf,
    guard: Mutex<()>,
}

impl RoomStore {
    pub fn open(dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(STORE_FILE),
            lock_path: dir.join(LOCK_FILE),
            guard: Mutex::new(()),
        })
    }

    fn file_lock(&self) -> Result<File, AppError> {
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        lock.lock_exclusive()?;
        Ok(lock)
    }

    fn read_document(&self) -> Result<StoreDocument, AppError> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(StoreDocument::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_document(&self, doc: &StoreDocument) -> Result<(), AppError> {
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(serde_json::to_string(doc)?.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Load every persisted room, marking all non-bot players disconnected:
    /// nobody has a live socket after a cold start.
    pub fn load_all(&self) -> Result<HashMap<String, Room>, AppError> {
        let _guard = self.guard.lock();
        let lock = self.file_lock()?;
        let mut doc = self.read_document()?;
        FileExt::unlock(&lock)?;

        for room in doc.rooms.values_mut() {
            for player in room.players.iter_mut() {
                if !player.is_bot {
                    player.connected = false;
                }
            }
        }
        info!(rooms = doc.rooms.len(), "room store loaded");
        Ok(doc.rooms)
    }

    /// Overwrite one room's record.
    pub fn persist(&self, room: &Room) -> Result<(), AppError> {
        let _guard = self.guard.lock();
        let lock = self.file_lock()?;
        let mut doc = self.read_document()?;
        doc.rooms.insert(room.name.clone(), room.clone());
        let result = self.write_document(&doc);
        FileExt::unlock(&lock)?;
        result
    }

    /// Drop a room's record (creator delete or TTL reap).
    pub fn remove(&self, name: &str) -> Result<(), AppError> {
        let _guard = self.guard.lock();
        let lock = self.file_lock()?;
        let mut doc = self.read_document()?;
        if doc.rooms.remove(name).is_none() {
            warn!(room = name, "removed a room that was not persisted");
        }
        let result = self.write_document(&doc);
        FileExt::unlock(&lock)?;
        result
    }
}
