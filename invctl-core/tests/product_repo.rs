use std::path::{Path, PathBuf};

use invctl_core::{Database, InventoryError, Product, ProductRepo};
use tempfile::TempDir;

fn schema_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations/001_initial_schema.sql")
}

async fn fresh_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut db = Database::with_migration_script(schema_path());
    db.initialize(dir.path().join("inventory.db"))
        .await
        .expect("initialize failed");
    (dir, db)
}

fn product(sku: &str, name: &str) -> Product {
    Product {
        description: format!("{name} description"),
        price: 4.5,
        quantity: 10,
        min_quantity: 3,
        ..Product::new(sku, name)
    }
}

#[tokio::test]
async fn widget_scenario_gets_first_id() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut widget = Product {
        sku: "A100".to_string(),
        name: "Widget".to_string(),
        price: 9.99,
        quantity: 5,
        min_quantity: 2,
        ..Product::default()
    };
    repo.save(&mut widget).await.unwrap();
    assert_eq!(widget.id, 1);

    let loaded = repo.get_by_sku("A100").await.unwrap().expect("stored");
    assert_eq!(loaded, widget);
    assert_eq!(loaded.id, 1);
    assert_eq!(loaded.price, 9.99);
}

#[tokio::test]
async fn save_then_load_by_id() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut gadget = product("G-1", "Gadget");
    repo.save(&mut gadget).await.unwrap();
    assert_ne!(gadget.id, 0);

    let loaded = repo.get_by_id(gadget.id).await.unwrap();
    assert_eq!(loaded, Some(gadget));
}

#[tokio::test]
async fn update_modifies_existing_row() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut bolt = product("B-1", "Bolt");
    repo.save(&mut bolt).await.unwrap();
    let id = bolt.id;
    let before = repo.count().await.unwrap();

    bolt.quantity = 99;
    bolt.name = "Hex bolt".to_string();
    repo.save(&mut bolt).await.unwrap();

    assert_eq!(bolt.id, id);
    assert_eq!(repo.count().await.unwrap(), before);
    let loaded = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded.quantity, 99);
    assert_eq!(loaded.name, "Hex bolt");
}

#[tokio::test]
async fn update_refreshes_updated_at() {
    let (_dir, mut db) = fresh_db().await;
    let conn = db.connection().unwrap();

    let mut pin = product("P-1", "Pin");
    ProductRepo::new(&mut *conn).save(&mut pin).await.unwrap();

    sqlx::query("UPDATE products SET updated_at = '2000-01-01 00:00:00' WHERE id = ?")
        .bind(pin.id)
        .execute(&mut *conn)
        .await
        .unwrap();

    pin.quantity = 1;
    ProductRepo::new(&mut *conn).save(&mut pin).await.unwrap();

    let updated_at: String = sqlx::query_scalar("SELECT updated_at FROM products WHERE id = ?")
        .bind(pin.id)
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_ne!(updated_at, "2000-01-01 00:00:00");
}

#[tokio::test]
async fn update_to_taken_sku_is_duplicate() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut first = product("A-1", "First");
    let mut second = product("B-1", "Second");
    repo.save(&mut first).await.unwrap();
    repo.save(&mut second).await.unwrap();

    second.sku = "A-1".to_string();
    let err = repo.save(&mut second).await.unwrap_err();
    match err {
        InventoryError::DuplicateSku { sku } => assert_eq!(sku, "A-1"),
        other => panic!("unexpected error: {other:?}"),
    }

    let stored = repo.get_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(stored.sku, "B-1");
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut ghost = product("X-1", "Ghost");
    ghost.id = 77;
    let err = repo.save(&mut ghost).await.unwrap_err();
    assert!(matches!(err, InventoryError::NotFound { id: 77 }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn remove_then_load_returns_none() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut nut = product("N-1", "Nut");
    repo.save(&mut nut).await.unwrap();
    let old_id = nut.id;

    assert!(repo.remove(&mut nut).await.unwrap());
    assert_eq!(nut.id, 0);
    assert_eq!(repo.get_by_id(old_id).await.unwrap(), None);

    // Same value can be inserted again and gets a fresh id
    repo.save(&mut nut).await.unwrap();
    assert_ne!(nut.id, 0);
    assert_ne!(nut.id, old_id);
}

#[tokio::test]
async fn remove_unsaved_is_noop() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut draft = product("D-1", "Draft");
    assert!(!draft.is_persisted());
    assert!(!repo.remove(&mut draft).await.unwrap());
}

#[tokio::test]
async fn remove_missing_row_keeps_id() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut stale = product("S-1", "Stale");
    stale.id = 12;
    assert!(!repo.remove(&mut stale).await.unwrap());
    assert_eq!(stale.id, 12);
}

#[tokio::test]
async fn invalid_product_is_not_written() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut bad = product("", "Nameless SKU");
    let err = repo.save(&mut bad).await.unwrap_err();
    assert!(matches!(err, InventoryError::Validation(_)));
    assert_eq!(bad.id, 0);
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_sku_surfaces_constraint() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    let mut first = product("DUP", "First");
    repo.save(&mut first).await.unwrap();

    let mut second = product("DUP", "Second");
    let err = repo.save(&mut second).await.unwrap_err();
    match err {
        InventoryError::DuplicateSku { sku } => assert_eq!(sku, "DUP"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(second.id, 0);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn list_is_ordered_by_name() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    for (sku, name) in [("C", "Cog"), ("A", "Axle"), ("B", "Bearing")] {
        repo.save(&mut product(sku, name)).await.unwrap();
    }

    let names: Vec<_> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Axle", "Bearing", "Cog"]);
}

#[tokio::test]
async fn empty_database_lists_nothing() {
    let (_dir, mut db) = fresh_db().await;
    let mut repo = ProductRepo::new(db.connection().unwrap());

    assert!(repo.list().await.unwrap().is_empty());
    assert_eq!(repo.get_by_sku("nope").await.unwrap(), None);
    assert_eq!(repo.get_by_id(1).await.unwrap(), None);
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.db");

    let mut db = Database::with_migration_script(schema_path());
    db.initialize(&path).await.unwrap();
    let mut crate_item = product("K-1", "Crate");
    ProductRepo::new(db.connection().unwrap())
        .save(&mut crate_item)
        .await
        .unwrap();
    db.close().await.unwrap();

    let mut db = Database::with_migration_script(schema_path());
    db.initialize(&path).await.unwrap();
    let loaded = ProductRepo::new(db.connection().unwrap())
        .get_by_sku("K-1")
        .await
        .unwrap();
    assert_eq!(loaded, Some(crate_item));
}

#[tokio::test]
async fn null_description_reads_as_empty() {
    let (_dir, mut db) = fresh_db().await;
    let conn = db.connection().unwrap();
    sqlx::query("INSERT INTO products (sku, name, price) VALUES ('RAW', 'Raw row', 1.0)")
        .execute(&mut *conn)
        .await
        .unwrap();

    let loaded = ProductRepo::new(conn)
        .get_by_sku("RAW")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.description, "");
    assert_eq!(loaded.quantity, 0);
}
