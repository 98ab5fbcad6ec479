//! Created-by / updated-by stamping over the in-memory store.
//!
//! This example shows:
//! 1. Declaring stamped columns on a record type
//! 2. Inserting a row as one user
//! 3. Updating it as another user
//! 4. Keeping an explicitly provided creator
//!
//! Run with: `cargo run --example basic_stamping`

use std::sync::Arc;

use user_stamp::{ColumnInfo, MemoryStore, RecordType, Row, Session, StampingStore, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Basic Stamping Example ===\n");

    let posts = Arc::new(RecordType::new("posts"));
    posts.add_columns([
        ColumnInfo::new("id").with_data_type("integer"),
        ColumnInfo::new("title").with_data_type("varchar"),
        ColumnInfo::new("u_created")
            .with_data_type("integer")
            .store_user_on_create(),
        ColumnInfo::new("u_updated")
            .with_data_type("integer")
            .store_user_on_create()
            .store_user_on_update(),
    ]);

    let policy = posts.policy();
    println!(
        "Policy: on_create={:?} on_update={:?}\n",
        policy.create_columns().collect::<Vec<_>>(),
        policy.update_columns().collect::<Vec<_>>()
    );

    let mut store = StampingStore::new(MemoryStore::new("id"));
    let session = Arc::new(Session::with_current_user_id(7));

    // Scenario 1: insert as user 7
    println!("--- Scenario 1: Insert ---");
    let mut post = Row::new(Arc::clone(&posts), Arc::clone(&session));
    post.set("id", 1).set("title", "hello");
    store.save(&mut post)?;
    print_row(&store, 1);

    // Scenario 2: update as user 9
    println!("\n--- Scenario 2: Update ---");
    session.set_current_user_id(9);
    post.set("title", "hello, again");
    store.save(&mut post)?;
    print_row(&store, 1);

    // Scenario 3: an explicit creator survives insert
    println!("\n--- Scenario 3: Explicit creator ---");
    let mut imported = Row::new(Arc::clone(&posts), Arc::clone(&session));
    imported.set("id", 2).set("title", "imported").set("u_created", 3);
    store.save(&mut imported)?;
    print_row(&store, 2);

    Ok(())
}

fn print_row(store: &StampingStore<MemoryStore>, id: i64) {
    if let Some(row) = store.inner().get(&Value::Int(id)) {
        for (column, value) in row {
            println!("  {} = {}", column, value);
        }
    }
}
