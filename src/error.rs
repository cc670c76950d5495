use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    NotFound(#[from] NotFound),
}

impl Error {
    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// What a view lookup was keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Chain,
    Hotel,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chain => write!(f, "Chain"),
            Self::Hotel => write!(f, "Hotel"),
        }
    }
}

/// A chain or hotel code with no matching data. Returned as a plain value
/// from view lookups; callers map it to their own not-found page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} not found: {code}")]
pub struct NotFound {
    pub kind: LookupKind,
    pub code: String,
}

impl NotFound {
    pub fn chain(code: impl Into<String>) -> Self {
        Self {
            kind: LookupKind::Chain,
            code: code.into(),
        }
    }

    pub fn hotel(code: impl Into<String>) -> Self {
        Self {
            kind: LookupKind::Hotel,
            code: code.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
