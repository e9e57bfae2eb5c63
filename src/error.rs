//! Boundary errors. The controller itself never fails; these come from
//! loading settings, reading/writing the scenario file and installing the
//! log subscriber.

use thiserror::Error;

use crate::logging::LoggingError;
use crate::persist::PersistError;
use crate::settings::SettingsError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
