//! Automatic acting-user stamping for persisted records.
//!
//! Columns declared with `store_user_on_create` or `store_user_on_update`
//! receive the current user's id whenever a record is inserted or updated,
//! without every call site having to assign them.
//!
//! # Core Types
//!
//! - [`ColumnInfo`]: Column metadata, including the two stamping flags
//! - [`RecordType`]: A table mapping that caches its [`StampPolicy`]
//! - [`StampingStore`]: Decorator over a [`Store`] that stamps before writing
//! - [`UserIdSource`]: Hook resolving the acting user for a record
//! - [`Row`], [`MemoryStore`], [`Session`]: In-memory engine collaborators
//!
//! # Stamping rules
//!
//! On insert, a create-stamped column is filled only if it has no value yet.
//! On update, an update-stamped column is filled unless the caller already
//! changed it (it is in the record's dirty set).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use user_stamp::{ColumnInfo, MemoryStore, RecordType, Row, Session, StampingStore, Value};
//!
//! let posts = Arc::new(RecordType::new("posts"));
//! posts.add_columns([
//!     ColumnInfo::new("id"),
//!     ColumnInfo::new("name"),
//!     ColumnInfo::new("u_created").store_user_on_create(),
//!     ColumnInfo::new("u_updated")
//!         .store_user_on_create()
//!         .store_user_on_update(),
//! ]);
//!
//! let mut store = StampingStore::new(MemoryStore::new("id"));
//! let session = Arc::new(Session::with_current_user_id(7));
//!
//! let mut post = Row::new(Arc::clone(&posts), Arc::clone(&session));
//! post.set("id", 1);
//! store.save(&mut post).expect("insert succeeds");
//!
//! session.set_current_user_id(9);
//! post.set("name", "x");
//! store.save(&mut post).expect("update succeeds");
//!
//! assert_eq!(post.get("u_created"), Some(&Value::Int(7)));
//! assert_eq!(post.get("u_updated"), Some(&Value::Int(9)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod column;
mod error;
mod policy;
mod record;
mod record_type;
mod session;
pub mod stamp;
mod store;
mod user_id;
mod value;

pub use column::{ColumnInfo, STORE_USER_ON_CREATE, STORE_USER_ON_UPDATE};
pub use error::{StoreError, StoreErrorKind};
pub use policy::{StampPolicy, StampTarget};
pub use record::{Record, Row};
pub use record_type::RecordType;
pub use session::Session;
pub use stamp::{stamp_insert, stamp_update, StampingStore};
pub use store::{MemoryStore, Store};
pub use user_id::{user_id_fn, SessionUserId, UserIdFn, UserIdSource};
pub use value::Value;
