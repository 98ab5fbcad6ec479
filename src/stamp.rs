//! The stamping interceptor.
//!
//! [`stamp_insert`] and [`stamp_update`] hold the per-column decisions.
//! [`StampingStore`] runs them in front of a wrapped [`Store`] and then
//! delegates the write.

use crate::{Record, SessionUserId, StampPolicy, Store, UserIdSource, Value};

/// Fills create-stamped columns that have no value yet.
///
/// Columns already holding a non-`NULL` value are left untouched. A missing
/// user id is written as `NULL`. Returns the columns that were written, in
/// policy order.
pub fn stamp_insert<R>(
    policy: &StampPolicy,
    record: &mut R,
    user_id: Option<&Value>,
) -> Vec<String>
where
    R: Record + ?Sized,
{
    let value = user_id.cloned().unwrap_or_default();
    let mut stamped = Vec::new();

    for target in policy.on_create() {
        if record.has_value(target.column()) {
            tracing::trace!(
                target: "user_stamp",
                column = target.column(),
                "explicit value kept on insert"
            );
            continue;
        }
        tracing::debug!(
            target: "user_stamp",
            column = target.column(),
            accessor = target.target(),
            user_id = %value,
            "stamping on insert"
        );
        record.set_column(target, value.clone());
        stamped.push(target.column().to_string());
    }

    stamped
}

/// Writes the user id into update-stamped columns the caller did not change.
///
/// Only the dirty set decides: a column the caller modified keeps the
/// caller's value, every other listed column is overwritten, even one
/// already holding a value. Returns the columns that were written.
pub fn stamp_update<R>(
    policy: &StampPolicy,
    record: &mut R,
    user_id: Option<&Value>,
) -> Vec<String>
where
    R: Record + ?Sized,
{
    let value = user_id.cloned().unwrap_or_default();
    let dirty = record.dirty_columns();
    let mut stamped = Vec::new();

    for target in policy.on_update() {
        if dirty.contains(target.column()) {
            tracing::trace!(
                target: "user_stamp",
                column = target.column(),
                "caller change kept on update"
            );
            continue;
        }
        tracing::debug!(
            target: "user_stamp",
            column = target.column(),
            accessor = target.target(),
            user_id = %value,
            "stamping on update"
        );
        record.set_column(target, value.clone());
        stamped.push(target.column().to_string());
    }

    stamped
}

/// A [`Store`] decorator that stamps the acting user before each write.
///
/// Insert and update first resolve the user id through the configured
/// [`UserIdSource`], stamp the record according to the current
/// [`StampPolicy`] of the record's own type, then delegate to the wrapped store. The wrapped store's
/// output and errors are returned unchanged.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use user_stamp::{ColumnInfo, MemoryStore, RecordType, Row, Session, StampingStore, Store, Value};
///
/// let posts = Arc::new(RecordType::new("posts"));
/// posts.add_columns([
///     ColumnInfo::new("id"),
///     ColumnInfo::new("u_created").store_user_on_create(),
///     ColumnInfo::new("u_updated").store_user_on_create().store_user_on_update(),
/// ]);
///
/// let mut store = StampingStore::new(MemoryStore::new("id"));
/// let session = Arc::new(Session::with_current_user_id(7));
///
/// let mut post = Row::new(Arc::clone(&posts), Arc::clone(&session));
/// post.set("id", 1);
/// store.insert(&mut post).unwrap();
///
/// assert_eq!(post.get("u_created"), Some(&Value::Int(7)));
/// assert_eq!(post.get("u_updated"), Some(&Value::Int(7)));
/// ```
#[derive(Debug)]
pub struct StampingStore<S, U = SessionUserId> {
    inner: S,
    user_ids: U,
}

impl<S> StampingStore<S> {
    /// Wraps `inner`, reading the acting user from each record's session.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            user_ids: SessionUserId,
        }
    }
}

impl<S, U> StampingStore<S, U> {
    /// Replaces the user id source.
    pub fn with_user_id_source<V>(self, user_ids: V) -> StampingStore<S, V> {
        StampingStore {
            inner: self.inner,
            user_ids,
        }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the wrapped store mutably.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Inserts a record not yet in storage, updates it otherwise.
    ///
    /// # Errors
    ///
    /// Returns whatever the user id source or the wrapped store returns.
    pub fn save<R>(
        &mut self,
        record: &mut R,
    ) -> Result<<S as Store<R>>::Output, <S as Store<R>>::Error>
    where
        R: Record,
        S: Store<R>,
        U: UserIdSource<R, <S as Store<R>>::Error>,
    {
        if record.in_storage() {
            self.update(record)
        } else {
            self.insert(record)
        }
    }
}

impl<R, S, U> Store<R> for StampingStore<S, U>
where
    R: Record,
    S: Store<R>,
    U: UserIdSource<R, S::Error>,
{
    type Output = S::Output;
    type Error = S::Error;

    fn insert(&mut self, record: &mut R) -> Result<S::Output, S::Error> {
        let user_id = self.user_ids.current_user_id(record)?;
        let policy = record.record_type().policy();
        let stamped = stamp_insert(&policy, record, user_id.as_ref());
        tracing::debug!(
            target: "user_stamp",
            record_type = %record.record_type().name(),
            stamped = ?stamped,
            "insert"
        );
        self.inner.insert(record)
    }

    fn update(&mut self, record: &mut R) -> Result<S::Output, S::Error> {
        let user_id = self.user_ids.current_user_id(record)?;
        let policy = record.record_type().policy();
        let stamped = stamp_update(&policy, record, user_id.as_ref());
        tracing::debug!(
            target: "user_stamp",
            record_type = %record.record_type().name(),
            stamped = ?stamped,
            "update"
        );
        self.inner.update(record)
    }
}
