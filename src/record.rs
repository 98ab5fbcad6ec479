use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::{RecordType, Session, StampTarget, Value};

/// An in-memory record instance as seen by the stamping layer.
///
/// Persistence engines implement this for their row type. The stamping layer
/// only reads values, writes through accessors and inspects the dirty set.
pub trait Record {
    /// Returns the record's own type, whose policy drives stamping.
    fn record_type(&self) -> &RecordType;

    /// Returns the current value of a column, if it has one.
    fn get_column(&self, column: &str) -> Option<&Value>;

    /// Writes a value to a stamp target and marks its column dirty.
    ///
    /// Engines with generated setters dispatch on [`StampTarget::target`];
    /// the column written is always [`StampTarget::column`].
    fn set_column(&mut self, target: &StampTarget, value: Value);

    /// Returns the columns modified since the record was loaded or created.
    fn dirty_columns(&self) -> BTreeSet<String>;

    /// Returns `true` once the record has been persisted.
    fn in_storage(&self) -> bool;

    /// Returns the session the record belongs to.
    fn session(&self) -> &Session;

    /// Returns `true` if the column holds a non-`NULL` value.
    fn has_value(&self, column: &str) -> bool {
        self.get_column(column).is_some_and(|v| !v.is_null())
    }
}

/// A generic row backed by a column map.
///
/// `Row` is the record type used by [`MemoryStore`](crate::MemoryStore). It
/// tracks dirty columns and writes stamp targets straight to their column.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use user_stamp::{ColumnInfo, Record, RecordType, Row, Session, Value};
///
/// let users = Arc::new(RecordType::new("users"));
/// users.add_columns([ColumnInfo::new("id"), ColumnInfo::new("name")]);
///
/// let mut row = Row::new(users, Arc::new(Session::new()));
/// row.set("name", "alice");
///
/// assert_eq!(row.get("name"), Some(&Value::from("alice")));
/// assert!(row.is_dirty("name"));
/// assert!(!row.in_storage());
/// ```
#[derive(Debug, Clone)]
pub struct Row {
    record_type: Arc<RecordType>,
    session: Arc<Session>,
    values: BTreeMap<String, Value>,
    dirty: BTreeSet<String>,
    in_storage: bool,
}

impl Row {
    /// Creates a new, unsaved row.
    pub fn new(record_type: Arc<RecordType>, session: Arc<Session>) -> Self {
        Self {
            record_type,
            session,
            values: BTreeMap::new(),
            dirty: BTreeSet::new(),
            in_storage: false,
        }
    }

    /// Creates a clean row holding values loaded from storage.
    pub fn from_storage(
        record_type: Arc<RecordType>,
        session: Arc<Session>,
        values: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            record_type,
            session,
            values,
            dirty: BTreeSet::new(),
            in_storage: true,
        }
    }

    /// Returns the row's record type.
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    /// Returns a column's value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Sets a column by column name and marks it dirty.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        self.values.insert(column.clone(), value.into());
        self.dirty.insert(column);
        self
    }

    /// Returns `true` if the column was modified since load.
    pub fn is_dirty(&self, column: &str) -> bool {
        self.dirty.contains(column)
    }

    /// Returns all column values.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Returns the values of the dirty columns.
    pub fn dirty_values(&self) -> BTreeMap<String, Value> {
        self.dirty
            .iter()
            .map(|c| (c.clone(), self.values.get(c).cloned().unwrap_or_default()))
            .collect()
    }

    /// Clears the dirty set and flags the row as stored.
    pub(crate) fn mark_persisted(&mut self) {
        self.dirty.clear();
        self.in_storage = true;
    }
}

impl Record for Row {
    fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    fn get_column(&self, column: &str) -> Option<&Value> {
        self.get(column)
    }

    fn set_column(&mut self, target: &StampTarget, value: Value) {
        self.set(target.column(), value);
    }

    fn dirty_columns(&self) -> BTreeSet<String> {
        self.dirty.clone()
    }

    fn in_storage(&self) -> bool {
        self.in_storage
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
