use std::fmt;

/// Error returned by [`MemoryStore`](crate::MemoryStore).
///
/// The stamping layer never produces errors of its own; this type belongs to
/// the bundled in-memory engine and reaches callers through
/// [`StampingStore`](crate::StampingStore) unchanged.
///
/// # Examples
///
/// ```
/// use user_stamp::{StoreError, StoreErrorKind};
///
/// let error = StoreError::with_message(StoreErrorKind::NotFound, "users id=4");
/// assert_eq!(error.kind(), StoreErrorKind::NotFound);
/// assert_eq!(error.to_string(), "store error (row not found): users id=4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    kind: StoreErrorKind,
    message: Option<String>,
}

impl StoreError {
    /// Creates a new store error with the specified kind.
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a new store error with a custom message.
    pub fn with_message(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(msg) = &self.message {
            write!(f, "store error ({}): {}", self.kind, msg)
        } else {
            write!(f, "store error ({})", self.kind)
        }
    }
}

impl std::error::Error for StoreError {}

/// Kind of store error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The row to update does not exist
    NotFound,
    /// A row with the same key already exists
    Duplicate,
    /// The row has no value for the key column
    MissingKey,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "row not found"),
            Self::Duplicate => write!(f, "duplicate key"),
            Self::MissingKey => write!(f, "missing key"),
        }
    }
}
