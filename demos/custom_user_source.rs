//! Overriding where the acting user comes from.
//!
//! The default source reads the record's session. This example swaps in a
//! closure that falls back to a service account and refuses to write when
//! a row is marked as locked.
//!
//! Run with: `cargo run --example custom_user_source`

use std::sync::Arc;

use user_stamp::{
    user_id_fn, ColumnInfo, MemoryStore, Record, RecordType, Row, Session, StampingStore, Store,
    StoreError, StoreErrorKind, Value,
};

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Custom User Source Example ===\n");

    let jobs = Arc::new(RecordType::new("jobs"));
    jobs.add_columns([
        ColumnInfo::new("id"),
        ColumnInfo::new("locked"),
        ColumnInfo::new("u_updated")
            .with_accessor("touched_by")
            .store_user_on_create()
            .store_user_on_update(),
    ]);

    let source = user_id_fn(|row: &Row| {
        if row.get("locked").is_some_and(Value::is_truthy) {
            return Err(StoreError::with_message(
                StoreErrorKind::NotFound,
                "row is locked",
            ));
        }
        Ok(row
            .session()
            .current_user_id()
            .or_else(|| Some(Value::from("service-account"))))
    });

    let mut store =
        StampingStore::new(MemoryStore::new("id")).with_user_id_source(source);

    // Scenario 1: no session user, falls back to the service account
    let mut job = Row::new(Arc::clone(&jobs), Arc::new(Session::new()));
    job.set("id", 1);
    match store.insert(&mut job) {
        Ok(key) => println!("✓ Inserted job {} touched_by={:?}", key, job.get("u_updated")),
        Err(e) => println!("✗ Insert failed: {}", e),
    }

    // Scenario 2: a locked row aborts before the store is reached
    let mut locked = Row::new(Arc::clone(&jobs), Arc::new(Session::with_current_user_id(5)));
    locked.set("id", 2).set("locked", true);
    match store.insert(&mut locked) {
        Ok(key) => println!("✓ Inserted job {}", key),
        Err(e) => println!("✗ Insert refused: {}", e),
    }

    println!("\nStored rows: {}", store.inner().len());
}
