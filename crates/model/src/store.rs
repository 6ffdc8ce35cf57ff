//! Persistence seam for game entities.
//!
//! The build components only ever load-by-id and save whole entities; the
//! actual record store behind the trait is someone else's problem. An
//! in-memory implementation is provided for in-process use and tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use uuid::Uuid;

use crate::Game;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("game not found: {0}")]
    NotFound(Uuid),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Abstract key-value store of game entities.
pub trait GameStore: Send + Sync {
    /// Loads a fresh copy of the game.
    fn load(&self, id: Uuid) -> Pin<Box<dyn Future<Output = Result<Game, StoreError>> + Send + '_>>;

    /// Persists the game, replacing the stored copy.
    fn save(&self, game: &Game) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>>;

    /// Removes the game record.
    fn delete(&self, id: Uuid) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>>;
}

/// Mutex-guarded in-memory game store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<Uuid, Game>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Inserts a game directly, returning its id.
    pub fn insert(&self, game: Game) -> Uuid {
        let id = game.id;
        self.games.lock().unwrap().insert(id, game);
        id
    }

    pub fn len(&self) -> usize {
        self.games.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.lock().unwrap().is_empty()
    }
}

impl GameStore for MemoryStore {
    fn load(&self, id: Uuid) -> Pin<Box<dyn Future<Output = Result<Game, StoreError>> + Send + '_>> {
        Box::pin(async move {
            self.games
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(StoreError::NotFound(id))
        })
    }

    fn save(&self, game: &Game) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        let game = game.clone();
        Box::pin(async move {
            self.games.lock().unwrap().insert(game.id, game);
            Ok(())
        })
    }

    fn delete(&self, id: Uuid) -> Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + '_>> {
        Box::pin(async move {
            self.games.lock().unwrap().remove(&id);
            Ok(())
        })
    }
}
