use std::io;
use std::path::Path;

use tracing::info;

use crate::model::RateDocument;

#[derive(Debug)]
pub enum SeedError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "reading rates file: {e}"),
            SeedError::Parse(e) => write!(f, "parsing rates file: {e}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<io::Error> for SeedError {
    fn from(e: io::Error) -> Self {
        SeedError::Io(e)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(e: serde_json::Error) -> Self {
        SeedError::Parse(e)
    }
}

/// Read the seed rates document. Happens once, before the store exists; a bad
/// seed is a startup error, not something to limp past.
pub fn load(path: &Path) -> Result<RateDocument, SeedError> {
    info!("reading rates from {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    let doc: RateDocument = serde_json::from_str(&raw)?;
    Ok(doc)
}
