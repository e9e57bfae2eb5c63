//! Subscriber setup for binaries and demos. The library itself only emits
//! `tracing` events under the `funding_floor` target.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, ParseError};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log directive '{directive}': {source}")]
    InvalidDirective {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("A global subscriber is already installed")]
    AlreadyInstalled,
}

/// Install a fmt subscriber. `RUST_LOG` wins over `default_directive`
/// (e.g. `"funding_floor=debug"`).
pub fn init(default_directive: &str) -> Result<(), LoggingError> {
    let directive: Directive = default_directive
        .parse()
        .map_err(|source| LoggingError::InvalidDirective {
            directive: default_directive.to_string(),
            source,
        })?;

    let filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}
