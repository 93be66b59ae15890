use std::collections::HashMap;

/// The main error type for anteroom operations
///
/// Nothing in this enum is expected to reach the host application's UI: the
/// storage adapter and the coordinator absorb failures at their boundaries
/// and degrade to sentinels (`None`, `false`). The enum exists so backends
/// and configuration can report failures precisely before that absorption
/// happens.
#[derive(Debug, thiserror::Error)]
pub enum AnteroomError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Error context for additional error information
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Additional error details
    pub details: Option<String>,
    /// Contextual key-value pairs
    pub context: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details = Some(detail.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Error with attached context
///
/// This type allows attaching context to an AnteroomError while still
/// being usable as an AnteroomError via the `Into` trait.
#[derive(Debug)]
pub struct ErrorWithContext {
    error: AnteroomError,
    context: ErrorContext,
}

impl ErrorWithContext {
    /// Create a new error with context
    pub fn new(error: AnteroomError, context: ErrorContext) -> Self {
        Self { error, context }
    }

    /// Get a reference to the underlying error
    pub fn error(&self) -> &AnteroomError {
        &self.error
    }

    /// Get a reference to the context
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }
}

impl std::fmt::Display for ErrorWithContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(ref details) = self.context.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorWithContext {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<ErrorWithContext> for AnteroomError {
    fn from(err: ErrorWithContext) -> Self {
        err.error
    }
}

impl AnteroomError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Add context to this error, returning an ErrorWithContext
    pub fn with_context(self, context: ErrorContext) -> ErrorWithContext {
        ErrorWithContext::new(self, context)
    }
}

/// Result type alias for anteroom operations
pub type Result<T> = std::result::Result<T, AnteroomError>;

// Common error type conversions

impl From<serde_json::Error> for AnteroomError {
    fn from(err: serde_json::Error) -> Self {
        AnteroomError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AnteroomError {
    fn from(err: std::io::Error) -> Self {
        AnteroomError::Storage(err.to_string())
    }
}
