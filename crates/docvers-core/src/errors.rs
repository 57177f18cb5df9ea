use thiserror::Error;

/// Result type alias using DocversError
pub type Result<T> = std::result::Result<T, DocversError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input decoding
    /// Document bytes are not a valid entity tree
    InvalidDocument,
    /// Options file could not be decoded or holds contradictory values
    InvalidOptions,
    /// A required input (file, field) is absent
    MissingField,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::InvalidOptions => "ERR_INVALID_OPTIONS",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context so that the engine
/// and CLI layers can report failures uniformly.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    version: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            version: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add version name context
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the version context, if any
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(version) = &self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Concrete failures at the decoding and I/O edges of docvers
///
/// The merge, lifecycle, sequencing and changelog operations themselves never
/// fail: absent content is treated as "not present" and incomplete version
/// information becomes a [`crate::model::DocumentWarning`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocversError {
    /// The input could not be decoded as an entity tree
    #[error("Invalid document {path}: {reason}")]
    InvalidDocument { path: String, reason: String },

    /// The options file could not be decoded
    #[error("Invalid options {path}: {reason}")]
    InvalidOptions { path: String, reason: String },

    /// A versioned content listing lacks a required field
    #[error("Missing field `{field}` in {context}")]
    MissingField { field: String, context: String },

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error (JSON/TOML encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A version record's content is not an entity list
    #[error("Invalid content for version {version} in {context}: {reason}")]
    InvalidVersionContent {
        version: String,
        context: String,
        reason: String,
    },
}

impl From<DocversError> for ExError {
    fn from(err: DocversError) -> Self {
        match err {
            DocversError::InvalidDocument { path, reason } => {
                ExError::new(ExErrorKind::InvalidDocument)
                    .with_path(path)
                    .with_message(reason)
            }
            DocversError::InvalidOptions { path, reason } => {
                ExError::new(ExErrorKind::InvalidOptions)
                    .with_path(path)
                    .with_message(reason)
            }
            DocversError::MissingField { field, context } => {
                ExError::new(ExErrorKind::MissingField)
                    .with_message(format!("`{}` is absent in {}", field, context))
            }
            DocversError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),
            DocversError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            DocversError::InvalidVersionContent {
                version,
                context,
                reason,
            } => ExError::new(ExErrorKind::InvalidDocument)
                .with_version(version)
                .with_path(context)
                .with_message(reason),
        }
    }
}

impl From<serde_json::Error> for DocversError {
    fn from(err: serde_json::Error) -> Self {
        DocversError::Serialization {
            message: err.to_string(),
        }
    }
}
