use std::path::PathBuf;

use thiserror::Error;

/// Caller-side misuse of the session engine. State is left untouched
/// whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no committed word to retreat into")]
    EmptyCommitStack,
    #[error("session has not finished yet")]
    NotFinished,
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("word corpus is empty")]
    Empty,
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse bundled word list: {0}")]
    Parse(#[from] serde_json::Error),
}
