use std::collections::BTreeMap;

use crate::Value;

/// Metadata key marking a column to receive the acting user on insert.
pub const STORE_USER_ON_CREATE: &str = "store_user_on_create";

/// Metadata key marking a column to receive the acting user on update.
pub const STORE_USER_ON_UPDATE: &str = "store_user_on_update";

/// Declared metadata for a single column.
///
/// Besides its name, a column carries an optional data type, an optional
/// accessor name (the setter used to write it), and an open metadata map.
/// The stamping flags live in that map under [`STORE_USER_ON_CREATE`] and
/// [`STORE_USER_ON_UPDATE`]; a missing key reads as `false`.
///
/// # Examples
///
/// ```
/// use user_stamp::ColumnInfo;
///
/// let col = ColumnInfo::new("u_updated")
///     .with_data_type("integer")
///     .with_accessor("updated_by")
///     .store_user_on_create()
///     .store_user_on_update();
///
/// assert!(col.stores_user_on_create());
/// assert!(col.stores_user_on_update());
/// assert_eq!(col.write_target(), "updated_by");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    name: String,
    data_type: Option<String>,
    accessor: Option<String>,
    meta: BTreeMap<String, Value>,
}

impl ColumnInfo {
    /// Creates column metadata with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            accessor: None,
            meta: BTreeMap::new(),
        }
    }

    /// Sets the column's data type.
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Sets the accessor used to write this column.
    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    /// Sets an arbitrary metadata entry, replacing any previous value.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Flags the column to receive the current user id on insert.
    pub fn store_user_on_create(self) -> Self {
        self.with_meta(STORE_USER_ON_CREATE, true)
    }

    /// Flags the column to receive the current user id on update.
    pub fn store_user_on_update(self) -> Self {
        self.with_meta(STORE_USER_ON_UPDATE, true)
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared data type, if any.
    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    /// Returns the configured accessor, if any.
    pub fn accessor(&self) -> Option<&str> {
        self.accessor.as_deref()
    }

    /// Returns the name writes should go through: the accessor if one is
    /// configured, otherwise the column name.
    pub fn write_target(&self) -> &str {
        self.accessor.as_deref().unwrap_or(&self.name)
    }

    /// Looks up a raw metadata entry.
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// Reads a metadata entry as a flag. Missing entries are `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.meta.get(key).is_some_and(Value::is_truthy)
    }

    /// Whether the column is stamped on insert.
    pub fn stores_user_on_create(&self) -> bool {
        self.flag(STORE_USER_ON_CREATE)
    }

    /// Whether the column is stamped on update.
    pub fn stores_user_on_update(&self) -> bool {
        self.flag(STORE_USER_ON_UPDATE)
    }
}
