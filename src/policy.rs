use crate::ColumnInfo;

/// A column that receives the acting user, with its write target resolved.
///
/// The target is the column's accessor when one is configured and the column
/// name otherwise. It is fixed when the policy is built so stamping never
/// has to look the accessor up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampTarget {
    column: String,
    target: String,
}

impl StampTarget {
    fn from_column(info: &ColumnInfo) -> Self {
        Self {
            column: info.name().to_string(),
            target: info.write_target().to_string(),
        }
    }

    /// Returns the column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the accessor the value is written through.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Which columns of a record type are stamped on insert and on update.
///
/// Built by [`StampPolicy::classify`] from the complete column set of a
/// record type. Both lists keep column declaration order and are
/// independent: a column may appear in either, both or neither.
///
/// # Examples
///
/// ```
/// use user_stamp::{ColumnInfo, StampPolicy};
///
/// let columns = vec![
///     ColumnInfo::new("id"),
///     ColumnInfo::new("u_created").store_user_on_create(),
///     ColumnInfo::new("u_updated")
///         .store_user_on_create()
///         .store_user_on_update(),
/// ];
///
/// let policy = StampPolicy::classify(&columns);
/// assert_eq!(policy.create_columns().collect::<Vec<_>>(), ["u_created", "u_updated"]);
/// assert_eq!(policy.update_columns().collect::<Vec<_>>(), ["u_updated"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StampPolicy {
    on_create: Vec<StampTarget>,
    on_update: Vec<StampTarget>,
}

impl StampPolicy {
    /// Partitions a column set into the create and update stamp lists.
    ///
    /// Never fails; columns without flags are ignored.
    pub fn classify<'a, I>(columns: I) -> Self
    where
        I: IntoIterator<Item = &'a ColumnInfo>,
    {
        let mut policy = Self::default();
        for info in columns {
            if info.stores_user_on_create() {
                policy.on_create.push(StampTarget::from_column(info));
            }
            if info.stores_user_on_update() {
                policy.on_update.push(StampTarget::from_column(info));
            }
        }
        policy
    }

    /// Columns stamped on insert, in declaration order.
    pub fn on_create(&self) -> &[StampTarget] {
        &self.on_create
    }

    /// Columns stamped on update, in declaration order.
    pub fn on_update(&self) -> &[StampTarget] {
        &self.on_update
    }

    /// Names of the columns stamped on insert.
    pub fn create_columns(&self) -> impl Iterator<Item = &str> {
        self.on_create.iter().map(StampTarget::column)
    }

    /// Names of the columns stamped on update.
    pub fn update_columns(&self) -> impl Iterator<Item = &str> {
        self.on_update.iter().map(StampTarget::column)
    }

    /// Returns `true` if no column is stamped at all.
    pub fn is_empty(&self) -> bool {
        self.on_create.is_empty() && self.on_update.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{STORE_USER_ON_CREATE, STORE_USER_ON_UPDATE};

    #[test]
    fn no_flags_yields_empty_policy() {
        let columns = [ColumnInfo::new("id"), ColumnInfo::new("name")];
        let policy = StampPolicy::classify(&columns);
        assert!(policy.is_empty());
        assert_eq!(policy, StampPolicy::default());
    }

    #[test]
    fn lists_keep_declaration_order() {
        let columns = [
            ColumnInfo::new("z_by").store_user_on_update(),
            ColumnInfo::new("a_by").store_user_on_update(),
            ColumnInfo::new("m_by")
                .store_user_on_update()
                .store_user_on_create(),
        ];
        let policy = StampPolicy::classify(&columns);
        assert_eq!(
            policy.update_columns().collect::<Vec<_>>(),
            ["z_by", "a_by", "m_by"]
        );
        assert_eq!(policy.create_columns().collect::<Vec<_>>(), ["m_by"]);
    }

    #[test]
    fn targets_resolve_accessor_once() {
        let columns = [ColumnInfo::new("u_created")
            .with_accessor("creator")
            .store_user_on_create()];
        let policy = StampPolicy::classify(&columns);
        let target = &policy.on_create()[0];
        assert_eq!(target.column(), "u_created");
        assert_eq!(target.target(), "creator");
    }

    #[test]
    fn falsy_flag_values_are_excluded() {
        let columns = [
            ColumnInfo::new("a").with_meta(STORE_USER_ON_CREATE, 0),
            ColumnInfo::new("b").with_meta(STORE_USER_ON_UPDATE, ""),
            ColumnInfo::new("c").with_meta(STORE_USER_ON_UPDATE, "1"),
        ];
        let policy = StampPolicy::classify(&columns);
        assert_eq!(policy.create_columns().count(), 0);
        assert_eq!(policy.update_columns().collect::<Vec<_>>(), ["c"]);
    }
}
