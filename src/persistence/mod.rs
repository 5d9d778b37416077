//! Save/load of the two craft positions
//!
//! The save record is a fixed 32-byte layout with no version tag:
//! player one x, y then player two x, y, each a little-endian f64.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::DVec2;

use crate::platform::PersistenceStore;

/// Size of the on-disk record
pub const SAVE_RECORD_LEN: usize = 32;

/// Both craft positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveData {
    pub player_one: DVec2,
    pub player_two: DVec2,
}

impl SaveData {
    pub fn to_bytes(&self) -> [u8; SAVE_RECORD_LEN] {
        let mut out = [0u8; SAVE_RECORD_LEN];
        let fields = [
            self.player_one.x,
            self.player_one.y,
            self.player_two.x,
            self.player_two.y,
        ];
        for (chunk, value) in out.chunks_exact_mut(8).zip(fields) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        if bytes.len() < SAVE_RECORD_LEN {
            return Err(PersistenceError::Truncated {
                expected: SAVE_RECORD_LEN,
                actual: bytes.len(),
            });
        }
        let mut fields = [0f64; 4];
        for (field, chunk) in fields.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            *field = f64::from_le_bytes(raw);
        }
        Ok(Self {
            player_one: DVec2::new(fields[0], fields[1]),
            player_two: DVec2::new(fields[2], fields[3]),
        })
    }
}

/// Errors from save files and config files
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Truncated { expected: usize, actual: usize },
    Json(serde_json::Error),
    /// Nothing has been saved yet
    Empty,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Truncated { expected, actual } => {
                write!(f, "save record truncated: got {actual} bytes, need {expected}")
            }
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::Empty => write!(f, "no saved game"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Save slot backed by a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceStore for FileStore {
    fn save(&mut self, data: &SaveData) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, data.to_bytes())?;
        log::info!("Saved positions to {}", self.path.display());
        Ok(())
    }

    fn load(&mut self) -> Result<SaveData, PersistenceError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::Empty);
            }
            Err(err) => return Err(err.into()),
        };
        let data = SaveData::from_bytes(&bytes)?;
        log::info!("Loaded positions from {}", self.path.display());
        Ok(data)
    }
}

/// In-memory save slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw record as it would sit on disk
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl PersistenceStore for MemoryStore {
    fn save(&mut self, data: &SaveData) -> Result<(), PersistenceError> {
        self.bytes = Some(data.to_bytes().to_vec());
        Ok(())
    }

    fn load(&mut self) -> Result<SaveData, PersistenceError> {
        let bytes = self.bytes.as_deref().ok_or(PersistenceError::Empty)?;
        SaveData::from_bytes(bytes)
    }
}
