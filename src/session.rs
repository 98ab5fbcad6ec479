use std::sync::{PoisonError, RwLock};

use crate::Value;

/// Per-session state that owns the acting user's identifier.
///
/// Each request or session is expected to hold its own `Session`; records
/// reach it through [`Record::session`](crate::Record::session). The id
/// is optional: while it is unset, stamping writes `NULL`.
///
/// # Examples
///
/// ```
/// use user_stamp::{Session, Value};
///
/// let session = Session::with_current_user_id(7);
/// assert_eq!(session.current_user_id(), Some(Value::Int(7)));
///
/// session.clear_current_user_id();
/// assert_eq!(session.current_user_id(), None);
/// ```
#[derive(Debug, Default)]
pub struct Session {
    current_user_id: RwLock<Option<Value>>,
}

impl Session {
    /// Creates a session with no acting user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session acting as the given user.
    pub fn with_current_user_id(user_id: impl Into<Value>) -> Self {
        Self {
            current_user_id: RwLock::new(Some(user_id.into())),
        }
    }

    /// Returns the acting user's id, if one is set.
    pub fn current_user_id(&self) -> Option<Value> {
        self.current_user_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switches the acting user.
    pub fn set_current_user_id(&self, user_id: impl Into<Value>) {
        *self
            .current_user_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(user_id.into());
    }

    /// Unsets the acting user.
    pub fn clear_current_user_id(&self) {
        *self
            .current_user_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}
