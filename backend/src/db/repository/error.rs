//! Error types for session store operations.
//!
//! Every error carries an [`ErrorContext`] naming the operation, the source
//! (file path, column) and the offending row when one is known, so a failed
//! startup load points straight at the bad cell.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "load_sessions")
    pub operation: Option<String>,
    /// The data source involved, usually a file path
    pub source: Option<String>,
    /// Column name if applicable
    pub column: Option<String>,
    /// 1-based data row (header excluded) if applicable
    pub row: Option<u64>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_row(mut self, row: u64) -> Self {
        self.row = Some(row);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref source) = self.source {
            parts.push(format!("source={}", source));
        }
        if let Some(ref column) = self.column {
            parts.push(format!("column={}", column));
        }
        if let Some(row) = self.row {
            parts.push(format!("row={}", row));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The data file could not be opened or read.
    #[error("I/O error: {message} {context}")]
    IoError {
        message: String,
        context: ErrorContext,
    },

    /// The file is readable but its header lacks a required column.
    #[error("Schema error: {message} {context}")]
    SchemaError {
        message: String,
        context: ErrorContext,
    },

    /// A cell could not be coerced to its column type.
    #[error("Parse error: {message} {context}")]
    ParseError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn io(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::IoError {
            message: message.into(),
            context,
        }
    }

    pub fn schema(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::SchemaError {
            message: message.into(),
            context,
        }
    }

    pub fn parse(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ParseError {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::IoError { context, .. }
            | Self::SchemaError { context, .. }
            | Self::ParseError { context, .. }
            | Self::ConfigurationError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::IoError { context, .. }
            | Self::SchemaError { context, .. }
            | Self::ParseError { context, .. }
            | Self::ConfigurationError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}
