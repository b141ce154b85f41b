/// Database test utilities with a shared pool
///
/// Tests that touch PostgreSQL are `#[ignore]`d; run them with
/// `TEST_DATABASE_URL` set and `--ignored`.
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, Pool};
use restaurant_catalog_lib::shared::Database;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

type PgPool = Pool<ConnectionManager<PgConnection>>;

static DB: OnceLock<Arc<Database>> = OnceLock::new();

/// Get or create the shared test database, migrated to the latest schema
pub fn get_test_db() -> Arc<Database> {
    DB.get_or_init(|| {
        dotenvy::dotenv().ok();
        let test_db_url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set in .env for tests");

        let manager = ConnectionManager::<PgConnection>::new(test_db_url);
        let pool: PgPool = r2d2::Pool::builder()
            .max_size(5)
            .build(manager)
            .expect("Failed to create test database pool");

        let database = Database::from_pool(pool);
        database
            .run_migrations()
            .expect("Failed to run migrations on test database");
        Arc::new(database)
    })
    .clone()
}

/// Empty both tables - use at the start of each test
pub fn clean_test_db() {
    let db = get_test_db();
    let mut conn = db.get_connection().expect("Failed to get DB connection");

    diesel::sql_query("TRUNCATE TABLE ratings, restaurants")
        .execute(&mut conn)
        .expect("Failed to clean tables");
}

static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that share the database
pub fn acquire_test_lock() -> MutexGuard<'static, ()> {
    // Recover from a poisoned lock left by a failed test
    match TEST_LOCK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
