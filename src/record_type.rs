use std::sync::{Arc, PoisonError, RwLock};

use crate::{ColumnInfo, StampPolicy};

/// Columns and the policy derived from them, replaced together.
#[derive(Debug, Default)]
struct Declared {
    columns: Vec<ColumnInfo>,
    policy: Arc<StampPolicy>,
}

/// Descriptor for one persistent entity type (a table mapping).
///
/// Holds the declared columns and the cached [`StampPolicy`] derived from
/// them. Every declaration change reclassifies the complete column set and
/// swaps in a new policy; a reader holding an earlier snapshot from
/// [`RecordType::policy`] keeps seeing that snapshot unchanged.
///
/// # Examples
///
/// ```
/// use user_stamp::{ColumnInfo, RecordType};
///
/// let users = RecordType::new("users");
/// users.add_columns([
///     ColumnInfo::new("id"),
///     ColumnInfo::new("u_created").store_user_on_create(),
/// ]);
/// users.add_columns([ColumnInfo::new("u_updated").store_user_on_update()]);
///
/// let policy = users.policy();
/// assert_eq!(policy.create_columns().collect::<Vec<_>>(), ["u_created"]);
/// assert_eq!(policy.update_columns().collect::<Vec<_>>(), ["u_updated"]);
/// ```
#[derive(Debug)]
pub struct RecordType {
    name: String,
    declared: RwLock<Arc<Declared>>,
}

impl RecordType {
    /// Creates a record type with no columns and an empty policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: RwLock::new(Arc::new(Declared::default())),
        }
    }

    /// Returns the record type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares columns and recomputes the stamp policy.
    ///
    /// A column whose name is already declared has its metadata replaced
    /// and keeps its original position.
    pub fn add_columns<I>(&self, columns: I)
    where
        I: IntoIterator<Item = ColumnInfo>,
    {
        self.redeclare(|current| {
            for info in columns {
                match current.iter_mut().find(|c| c.name() == info.name()) {
                    Some(existing) => *existing = info,
                    None => current.push(info),
                }
            }
        });
    }

    /// Removes the named columns and recomputes the stamp policy.
    ///
    /// Names that are not declared are ignored.
    pub fn remove_columns<'a, I>(&self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        self.redeclare(|current| current.retain(|c| !names.iter().any(|n| *n == c.name())));
    }

    /// Returns the current stamp policy snapshot.
    pub fn policy(&self) -> Arc<StampPolicy> {
        Arc::clone(&self.snapshot().policy)
    }

    /// Returns a copy of the declared columns in declaration order.
    pub fn columns(&self) -> Vec<ColumnInfo> {
        self.snapshot().columns.clone()
    }

    /// Looks up a column's metadata by name.
    pub fn column_info(&self, name: &str) -> Option<ColumnInfo> {
        self.snapshot()
            .columns
            .iter()
            .find(|c| c.name() == name)
            .cloned()
    }

    /// Returns `true` if a column with this name is declared.
    pub fn has_column(&self, name: &str) -> bool {
        self.snapshot().columns.iter().any(|c| c.name() == name)
    }

    fn snapshot(&self) -> Arc<Declared> {
        let guard = self.declared.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    fn redeclare(&self, edit: impl FnOnce(&mut Vec<ColumnInfo>)) {
        let mut guard = self.declared.write().unwrap_or_else(PoisonError::into_inner);
        let mut columns = guard.columns.clone();
        edit(&mut columns);

        let policy = Arc::new(StampPolicy::classify(&columns));
        tracing::debug!(
            target: "user_stamp",
            record_type = %self.name,
            columns = columns.len(),
            on_create = policy.on_create().len(),
            on_update = policy.on_update().len(),
            "stamp policy recomputed"
        );

        *guard = Arc::new(Declared { columns, policy });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::STORE_USER_ON_CREATE;

    #[test]
    fn new_type_has_empty_policy() {
        let rt = RecordType::new("things");
        assert_eq!(rt.name(), "things");
        assert!(rt.policy().is_empty());
        assert!(rt.columns().is_empty());
    }

    #[test]
    fn batches_accumulate_into_one_policy() {
        let rt = RecordType::new("things");
        rt.add_columns([ColumnInfo::new("a_by").store_user_on_create()]);
        rt.add_columns([ColumnInfo::new("b_by").store_user_on_create()]);

        assert_eq!(
            rt.policy().create_columns().collect::<Vec<_>>(),
            ["a_by", "b_by"]
        );
    }

    #[test]
    fn redeclaring_a_column_replaces_not_merges() {
        let rt = RecordType::new("things");
        rt.add_columns([
            ColumnInfo::new("x_by").store_user_on_create(),
            ColumnInfo::new("y_by").store_user_on_create(),
        ]);
        rt.add_columns([ColumnInfo::new("x_by").store_user_on_update()]);

        let policy = rt.policy();
        assert_eq!(policy.create_columns().collect::<Vec<_>>(), ["y_by"]);
        assert_eq!(policy.update_columns().collect::<Vec<_>>(), ["x_by"]);
        // position is kept
        assert_eq!(rt.columns()[0].name(), "x_by");
    }

    #[test]
    fn removing_columns_drops_them_from_policy() {
        let rt = RecordType::new("things");
        rt.add_columns([
            ColumnInfo::new("x_by").store_user_on_create(),
            ColumnInfo::new("y_by").store_user_on_create(),
        ]);
        rt.remove_columns(["x_by", "missing"]);

        assert!(!rt.has_column("x_by"));
        assert_eq!(rt.policy().create_columns().collect::<Vec<_>>(), ["y_by"]);
    }

    #[test]
    fn old_snapshot_survives_redeclaration() {
        let rt = RecordType::new("things");
        rt.add_columns([ColumnInfo::new("x_by").with_meta(STORE_USER_ON_CREATE, true)]);
        let before = rt.policy();

        rt.add_columns([ColumnInfo::new("x_by")]);

        assert_eq!(before.create_columns().collect::<Vec<_>>(), ["x_by"]);
        assert!(rt.policy().is_empty());
    }

    #[test]
    fn column_info_looks_up_by_name() {
        let rt = RecordType::new("things");
        rt.add_columns([
            ColumnInfo::new("u_created").with_accessor("creator"),
            ColumnInfo::new("name"),
        ]);

        let info = rt.column_info("u_created").unwrap();
        assert_eq!(info.accessor(), Some("creator"));
        assert!(rt.column_info("creator").is_none());
        assert!(rt.column_info("nope").is_none());
    }
}
