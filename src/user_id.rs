use std::fmt;

use crate::{Record, Value};

/// Resolves the acting user's id for a record about to be written.
///
/// This is the single customization point of the stamping layer. `E` is the
/// error type of the wrapped store, so a failing lookup aborts the write with
/// an error the caller already handles.
pub trait UserIdSource<R: ?Sized, E> {
    /// Returns the acting user's id, or `None` if there is none.
    fn current_user_id(&self, record: &R) -> Result<Option<Value>, E>;
}

/// Reads the id from the record's [`Session`](crate::Session).
///
/// This is the default source used by [`StampingStore`](crate::StampingStore).
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionUserId;

impl<R: Record + ?Sized, E> UserIdSource<R, E> for SessionUserId {
    fn current_user_id(&self, record: &R) -> Result<Option<Value>, E> {
        Ok(record.session().current_user_id())
    }
}

/// A [`UserIdSource`] backed by a closure. Created by [`user_id_fn`].
#[derive(Clone, Copy)]
pub struct UserIdFn<F>(F);

impl<F> fmt::Debug for UserIdFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserIdFn")
    }
}

impl<R: ?Sized, E, F> UserIdSource<R, E> for UserIdFn<F>
where
    F: Fn(&R) -> Result<Option<Value>, E>,
{
    fn current_user_id(&self, record: &R) -> Result<Option<Value>, E> {
        (self.0)(record)
    }
}

/// Wraps a closure as a [`UserIdSource`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use user_stamp::{user_id_fn, RecordType, Row, Session, StoreError, UserIdSource, Value};
///
/// let source = user_id_fn(|_: &Row| Ok::<_, StoreError>(Some(Value::from("batch-job"))));
///
/// let row = Row::new(Arc::new(RecordType::new("jobs")), Arc::new(Session::new()));
/// assert_eq!(source.current_user_id(&row).unwrap(), Some(Value::from("batch-job")));
/// ```
pub fn user_id_fn<F>(f: F) -> UserIdFn<F> {
    UserIdFn(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordType, Row, Session, StoreError, StoreErrorKind};
    use std::sync::Arc;

    fn row(session: Session) -> Row {
        Row::new(Arc::new(RecordType::new("things")), Arc::new(session))
    }

    #[test]
    fn session_source_reads_session() {
        let row = row(Session::with_current_user_id(7));
        let id: Result<_, StoreError> = SessionUserId.current_user_id(&row);
        assert_eq!(id.unwrap(), Some(Value::Int(7)));
    }

    #[test]
    fn session_source_returns_none_without_user() {
        let row = row(Session::new());
        let id: Result<_, StoreError> = SessionUserId.current_user_id(&row);
        assert_eq!(id.unwrap(), None);
    }

    #[test]
    fn closure_source_can_fail() {
        let row = row(Session::new());
        let source = user_id_fn(|_: &Row| -> Result<Option<Value>, StoreError> {
            Err(StoreError::new(StoreErrorKind::NotFound))
        });
        let err = source.current_user_id(&row).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
    }
}
