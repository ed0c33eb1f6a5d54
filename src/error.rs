use std::fmt;

/// Typed error for digimaturity library operations.
#[derive(Debug)]
pub enum MaturityError {
    /// Definition tree violates the questionnaire structure rules
    Definition(String),
    /// Computed results are internally inconsistent (missing gap entry etc.)
    InvalidState(String),
    /// Parsing errors (definition or answer JSON)
    Parse(String),
    /// IO errors (file read/write)
    Io(std::io::Error),
}

impl fmt::Display for MaturityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaturityError::Definition(msg) => write!(f, "definition error: {}", msg),
            MaturityError::InvalidState(msg) => write!(f, "invalid state: {}", msg),
            MaturityError::Parse(msg) => write!(f, "parse error: {}", msg),
            MaturityError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for MaturityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MaturityError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MaturityError {
    fn from(err: std::io::Error) -> Self {
        MaturityError::Io(err)
    }
}

impl From<serde_json::Error> for MaturityError {
    fn from(err: serde_json::Error) -> Self {
        MaturityError::Parse(err.to_string())
    }
}
