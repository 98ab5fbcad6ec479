use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Record, RecordType, Row, Session, StoreError, StoreErrorKind, Value};

/// The write side of a persistence engine.
///
/// [`StampingStore`](crate::StampingStore) implements this trait by wrapping
/// another implementation, so stamping composes with any engine that
/// exposes insert and update this way.
pub trait Store<R: Record> {
    /// What a successful write returns.
    type Output;
    /// Error raised by the engine.
    type Error;

    /// Persists a new record.
    fn insert(&mut self, record: &mut R) -> Result<Self::Output, Self::Error>;

    /// Persists the dirty columns of a stored record.
    fn update(&mut self, record: &mut R) -> Result<Self::Output, Self::Error>;
}

/// An in-memory table keyed by a single column.
///
/// Inserts store every column of the row; updates store only its dirty
/// columns. Both clear the row's dirty set and return the row key.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use user_stamp::{ColumnInfo, MemoryStore, RecordType, Row, Session, Store, Value};
///
/// let users = Arc::new(RecordType::new("users"));
/// users.add_columns([ColumnInfo::new("id"), ColumnInfo::new("name")]);
///
/// let mut store = MemoryStore::new("id");
/// let mut row = Row::new(Arc::clone(&users), Arc::new(Session::new()));
/// row.set("id", 1).set("name", "alice");
///
/// let key = store.insert(&mut row).unwrap();
/// assert_eq!(key, Value::Int(1));
/// assert_eq!(store.get(&key).unwrap()["name"], Value::from("alice"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    key_column: String,
    rows: BTreeMap<Value, BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Creates an empty table keyed by `key_column`.
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Returns the stored columns for a key.
    pub fn get(&self, key: &Value) -> Option<&BTreeMap<String, Value>> {
        self.rows.get(key)
    }

    /// Loads a stored row as a clean [`Row`].
    pub fn fetch(
        &self,
        record_type: Arc<RecordType>,
        session: Arc<Session>,
        key: &Value,
    ) -> Option<Row> {
        self.rows
            .get(key)
            .map(|values| Row::from_storage(record_type, session, values.clone()))
    }

    /// Returns the number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn key_of(&self, row: &Row) -> Result<Value, StoreError> {
        match row.get(&self.key_column) {
            Some(key) if !key.is_null() => Ok(key.clone()),
            _ => Err(StoreError::with_message(
                StoreErrorKind::MissingKey,
                format!("{}.{}", row.record_type().name(), self.key_column),
            )),
        }
    }
}

impl Store<Row> for MemoryStore {
    type Output = Value;
    type Error = StoreError;

    fn insert(&mut self, row: &mut Row) -> Result<Value, StoreError> {
        let key = self.key_of(row)?;
        if self.rows.contains_key(&key) {
            return Err(StoreError::with_message(
                StoreErrorKind::Duplicate,
                format!("{} {}={}", row.record_type().name(), self.key_column, key),
            ));
        }

        self.rows.insert(key.clone(), row.values().clone());
        row.mark_persisted();
        Ok(key)
    }

    fn update(&mut self, row: &mut Row) -> Result<Value, StoreError> {
        let key = self.key_of(row)?;
        let stored = self.rows.get_mut(&key).ok_or_else(|| {
            StoreError::with_message(
                StoreErrorKind::NotFound,
                format!("{} {}={}", row.record_type().name(), self.key_column, key),
            )
        })?;

        stored.extend(row.dirty_values());
        row.mark_persisted();
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnInfo;

    fn setup() -> (Arc<RecordType>, Arc<Session>) {
        let rt = RecordType::new("things");
        rt.add_columns([ColumnInfo::new("id"), ColumnInfo::new("name")]);
        (Arc::new(rt), Arc::new(Session::new()))
    }

    #[test]
    fn insert_requires_key() {
        let (rt, session) = setup();
        let mut store = MemoryStore::new("id");
        let mut row = Row::new(rt, session);
        row.set("name", "x");

        let err = store.insert(&mut row).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::MissingKey);
        assert!(!row.in_storage());
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let (rt, session) = setup();
        let mut store = MemoryStore::new("id");
        let mut first = Row::new(Arc::clone(&rt), Arc::clone(&session));
        first.set("id", 1);
        store.insert(&mut first).unwrap();

        let mut second = Row::new(rt, session);
        second.set("id", 1);
        let err = store.insert(&mut second).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::Duplicate);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_writes_only_dirty_columns() {
        let (rt, session) = setup();
        let mut store = MemoryStore::new("id");
        let mut row = Row::new(Arc::clone(&rt), Arc::clone(&session));
        row.set("id", 1).set("name", "before");
        store.insert(&mut row).unwrap();
        assert!(row.in_storage());
        assert!(row.dirty_columns().is_empty());

        let mut loaded = store.fetch(rt, session, &Value::Int(1)).unwrap();
        loaded.set("name", "after");
        store.update(&mut loaded).unwrap();

        let stored = store.get(&Value::Int(1)).unwrap();
        assert_eq!(stored["name"], Value::from("after"));
        assert!(loaded.dirty_columns().is_empty());
    }

    #[test]
    fn update_of_missing_row_fails() {
        let (rt, session) = setup();
        let mut store = MemoryStore::new("id");
        let mut row = Row::from_storage(
            rt,
            session,
            BTreeMap::from([("id".to_string(), Value::Int(9))]),
        );
        row.set("name", "ghost");

        let err = store.update(&mut row).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::NotFound);
        assert!(row.is_dirty("name"));
    }
}
