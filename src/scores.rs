//! High-score persistence for the arcade cabinet.
//!
//! One JSON object in ~/.coin-op/scores.json holds every game's best result
//! under string keys carried over from the original web release (the key
//! names are a compatibility surface and must not change). Values are plain
//! JSON; a missing or unparseable value reads back as absent, never an error.
//!
//! Games never touch storage directly. The event loop owns a [`ScoreStore`]
//! and writes through on terminal transitions; tests swap in a [`MemoryStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Minesweeper best completion times, `{easy, medium, hard}` in seconds.
pub const KEY_MINESWEEPER_BEST_TIMES: &str = "minesweeper_high_scores";
/// Last minesweeper difficulty the player picked.
pub const KEY_MINESWEEPER_PREFERRED_DIFFICULTY: &str = "minesweeper_preferred_difficulty";
pub const KEY_FLAPPY_HIGH_SCORE: &str = "flappyBirdHighScore";
pub const KEY_TETRIS_HIGH_SCORE: &str = "tetris-high-score";
pub const KEY_PLATFORMER_HIGH_SCORE: &str = "supermario_high_score";
/// Portal-wide best, written by Snake.
pub const KEY_PORTAL_HIGH_SCORE: &str = "gameHighScore";

const SCORES_FILE: &str = "scores.json";

/// String-keyed JSON value storage. `get_value` returning `None` covers both
/// a missing key and a value that failed to parse upstream.
pub trait ScoreStore {
    fn get_value(&self, key: &str) -> Option<Value>;
    fn set_value(&mut self, key: &str, value: Value) -> io::Result<()>;
}

/// Typed read. Absent key or wrong shape both come back as `None`.
pub fn get<T: DeserializeOwned>(store: &dyn ScoreStore, key: &str) -> Option<T> {
    store
        .get_value(key)
        .and_then(|v| serde_json::from_value(v).ok())
}

/// Typed write-through.
pub fn set<T: Serialize>(store: &mut dyn ScoreStore, key: &str, data: &T) -> io::Result<()> {
    let value = serde_json::to_value(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    store.set_value(key, value)
}

/// Get the ~/.coin-op/ directory path, creating it if needed.
pub fn store_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".coin-op");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// File-backed store. The whole map is read once at startup and rewritten on
/// every set, mirroring the write-through behavior of the original release.
pub struct FileStore {
    path: PathBuf,
    values: serde_json::Map<String, Value>,
}

impl FileStore {
    /// Open the default score file. Fails fast only if the save directory
    /// cannot be created; a corrupt or missing file becomes an empty map.
    pub fn open() -> io::Result<Self> {
        Self::open_file(SCORES_FILE)
    }

    /// Open a named file in ~/.coin-op/. Used by tests to avoid clobbering
    /// real scores.
    pub fn open_file(filename: &str) -> io::Result<Self> {
        let path = store_dir()?.join(filename);
        let values = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => serde_json::Map::new(),
        };
        Ok(Self { path, values })
    }

    fn save(&self) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

impl ScoreStore for FileStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> io::Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// In-memory store for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) -> io::Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        set(&mut store, KEY_TETRIS_HIGH_SCORE, &1200u32).unwrap();
        assert_eq!(get::<u32>(&store, KEY_TETRIS_HIGH_SCORE), Some(1200));
    }

    #[test]
    fn test_missing_key_reads_none() {
        let store = MemoryStore::new();
        assert_eq!(get::<u32>(&store, KEY_FLAPPY_HIGH_SCORE), None);
    }

    #[test]
    fn test_wrong_shape_reads_none() {
        let mut store = MemoryStore::new();
        store
            .set_value(KEY_PORTAL_HIGH_SCORE, Value::String("corrupt".into()))
            .unwrap();
        assert_eq!(get::<u32>(&store, KEY_PORTAL_HIGH_SCORE), None);
    }

    #[test]
    fn test_store_dir_exists() {
        let dir = store_dir().expect("store_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with(".coin-op"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let mut store = FileStore::open_file("scores_unit_test.json").unwrap();
        set(&mut store, "test_key", &99u32).unwrap();

        let reopened = FileStore::open_file("scores_unit_test.json").unwrap();
        assert_eq!(get::<u32>(&reopened, "test_key"), Some(99));

        // Cleanup
        fs::remove_file(&reopened.path).ok();
    }

    #[test]
    fn test_file_store_corrupt_file_becomes_empty() {
        let path = store_dir().unwrap().join("scores_corrupt_test.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open_file("scores_corrupt_test.json").unwrap();
        assert_eq!(get::<u32>(&store, "anything"), None);

        fs::remove_file(&path).ok();
    }
}
