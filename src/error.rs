use crate::value::Value;

/// A result whose error is [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while building or invoking a lambda.
///
/// Errors are never caught by the engine: whatever a wrapped function raises
/// reaches the outermost caller unchanged.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The constructor was given something that is neither text nor a
    /// function.
    #[error("invalid function for lambda: expected text or a function, found {0}")]
    Construction(&'static str),
    /// The expression text could not be parsed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A negative arity was requested.
    #[error("arity must not be negative, found {0}")]
    Arity(i64),
    /// A value was used in a way its type does not support.
    #[error("type error: {0}")]
    Type(String),
    /// A value raised by a native function.
    #[error("uncaught {0}")]
    Thrown(Value),
}

impl Error {
    /// Create a type error.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }
}

/// A malformed expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at {offset}: {message}")]
pub struct SyntaxError {
    /// Byte offset into the expression text.
    pub offset: usize,
    /// What went wrong.
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self { offset, message: message.into() }
    }
}
