use thiserror::Error;

use crate::table::{AdviseCookie, DocumentCookie};

#[derive(Debug, Error)]
/// Errors reported by a [`DocumentHost`](crate::DocumentHost).
pub enum HostError {
    #[error("document is no longer open")]
    /// The document was closed between resolution and use.
    DocumentClosed,

    #[error("no view is available for the document")]
    /// The document has no view to read or restore state from.
    NoView,

    #[error("document is read-only")]
    /// The host refused to replace the document text.
    ReadOnly,

    #[error("host error: {0}")]
    /// Any other host-specific failure.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by the in-memory [`DocumentTable`](crate::DocumentTable).
pub enum TableError {
    #[error("a document with moniker '{0}' is already open")]
    /// A document with this moniker already exists.
    MonikerAlreadyOpen(String),

    #[error("unknown document cookie {0:?}")]
    /// A document cookie was not found.
    DocumentNotFound(DocumentCookie),

    #[error("unknown advise cookie {0:?}")]
    /// A subscription cookie was not found.
    SubscriberNotFound(AdviseCookie),

    #[error("save of {0:?} was cancelled by a subscriber")]
    /// A lifecycle subscriber cancelled the save.
    SaveCancelled(DocumentCookie),
}

#[derive(Debug, Error)]
/// Errors produced while loading a [`GuardConfig`](crate::GuardConfig).
pub enum ConfigError {
    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    /// The configuration is not valid JSON or has unknown fields.
    Json(#[from] serde_json::Error),
}
