use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// Entity-level failures inside a region batch are caught by the assembler
/// and converted into placeholder exception entities; region- and page-level
/// failures propagate to the caller. `NavigationUnavailable` is never
/// surfaced by the navigation provider itself; it triggers the static
/// fallback instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum VitrineError {
    /// No concrete model type or schema could be determined for a node.
    /// Fatal for the node or subtree being assembled.
    #[error("Model type resolution failed: {0}")]
    Resolution(String),
    /// A required structured payload (binary or external content) was absent
    /// where the resolved model type demands it.
    #[error("Model hydration failed: {0}")]
    Hydration(String),
    /// A resolved region definition does not satisfy the single-name-argument
    /// factory contract. Indicates a misconfigured type registry.
    #[error("Region factory contract violation: {0}")]
    ConstructorShape(String),
    /// The dynamic navigation source could not produce a taxonomy tree.
    #[error("Dynamic navigation source unavailable: {0}")]
    NavigationUnavailable(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("File system error: {0}")]
    Io(String),
}

impl From<JsonError> for VitrineError {
    fn from(src: JsonError) -> VitrineError {
        VitrineError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<toml::de::Error> for VitrineError {
    fn from(src: toml::de::Error) -> VitrineError {
        VitrineError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for VitrineError {
    fn from(src: toml::ser::Error) -> VitrineError {
        VitrineError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<io::Error> for VitrineError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => VitrineError::NotFound(format!("{x}")),
            _ => VitrineError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
