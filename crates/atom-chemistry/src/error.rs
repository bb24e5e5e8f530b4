use crate::configuration::MalformedToken;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading the periodic table or resolving an element
#[derive(Debug)]
pub enum ChemistryError {
    /// No record carries the requested name
    ElementNotFound { name: String },
    /// A record's electron configuration contains an unparseable token
    MalformedToken {
        element: String,
        source: MalformedToken,
    },
    /// A record violates a basic invariant (atomic number, mass)
    InvalidRecord { element: String, reason: String },
    /// The dataset document is not valid JSON for the expected shape
    Dataset(serde_json::Error),
    /// The dataset file could not be read
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
}

impl fmt::Display for ChemistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChemistryError::ElementNotFound { name } => {
                write!(f, "element '{}' not found in the periodic table", name)
            }
            ChemistryError::MalformedToken { element, source } => {
                write!(f, "invalid electron configuration for {}: {}", element, source)
            }
            ChemistryError::InvalidRecord { element, reason } => {
                write!(f, "invalid record for {}: {}", element, reason)
            }
            ChemistryError::Dataset(error) => {
                write!(f, "failed to parse periodic table dataset: {}", error)
            }
            ChemistryError::Io { path, error } => {
                write!(
                    f,
                    "failed to read periodic table '{}': {}",
                    path.display(),
                    error
                )
            }
        }
    }
}

impl std::error::Error for ChemistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChemistryError::MalformedToken { source, .. } => Some(source),
            ChemistryError::Dataset(error) => Some(error),
            ChemistryError::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ChemistryError {
    fn from(error: serde_json::Error) -> Self {
        ChemistryError::Dataset(error)
    }
}
