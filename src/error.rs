//! Errors raised while validating or loading generation parameters.
//!
//! Generation itself never fails: unplaceable rooms are dropped and a map that
//! cannot be fully connected is reported through `Map::connected`.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable generation parameters
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("area goal must be a fraction between 0 and 1, got {0}")]
    GoalOutOfRange(f64),

    #[error("minimum room size must be at least 1")]
    ZeroMinSize,

    #[error("minimum room size {min} exceeds maximum room size {max}")]
    SizeRange { min: u32, max: u32 },

    #[error("could not read parameters file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse parameters file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
