//! The one persisted field: science spent on research.
//!
//! Everything else the controller holds is recomputed at start-up.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed scenario state: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioState {
    pub science_spent: i64,
}

/// Read a scenario file. A missing file is a fresh career.
pub fn load(path: impl AsRef<Path>) -> Result<ScenarioState, PersistError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no scenario state, starting fresh");
            Ok(ScenarioState::default())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn save(path: impl AsRef<Path>, state: &ScenarioState) -> Result<(), PersistError> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(state)?;
    fs::write(path, text)?;
    tracing::debug!(path = %path.display(), science_spent = state.science_spent, "scenario state saved");
    Ok(())
}
