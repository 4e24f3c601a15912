use thiserror::Error;

/// Error type for template parsing.
///
/// Every variant carries the 1-based line where the problem starts so
/// frontends can point at the offending tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: tag is not closed, expected `%}}`")]
    UnclosedTag { line: usize },

    #[error("line {line}: output is not closed, expected `}}}}`")]
    UnclosedOutput { line: usize },

    #[error("line {line}: block `{name}` is never closed")]
    UnclosedBlock { name: String, line: usize },

    #[error("line {line}: unexpected `{name}`")]
    UnexpectedTag { name: String, line: usize },

    /// Only raised when strict tag checking is enabled.
    #[error("line {line}: unknown tag `{name}`")]
    UnknownTag { name: String, line: usize },

    #[error("line {line}: tag has no name")]
    MissingTagName { line: usize },

    #[error("line {line}: invalid assign: {reason}")]
    InvalidAssign { line: usize, reason: String },

    #[error("line {line}: invalid expression `{expression}`: {reason}")]
    InvalidExpression { line: usize, expression: String, reason: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnclosedTag { line }
            | ParseError::UnclosedOutput { line }
            | ParseError::UnclosedBlock { line, .. }
            | ParseError::UnexpectedTag { line, .. }
            | ParseError::UnknownTag { line, .. }
            | ParseError::MissingTagName { line }
            | ParseError::InvalidAssign { line, .. }
            | ParseError::InvalidExpression { line, .. } => *line,
        }
    }
}

/// Convenience result type for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for analyzer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported config format `{0}`; expected .yaml, .yml or .json")]
    UnsupportedFormat(String),

    #[error("Unknown conditional tag `{0}`; supported: if, unless, case")]
    UnknownConditionalTag(String),
}
