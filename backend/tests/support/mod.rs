//! Embedded PostgreSQL helpers shared by the Diesel adapter suites.
//!
//! Each suite gets a fresh temporary database on the process-wide cluster,
//! migrated with the same embedded migrations the server applies at startup.
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;

use tripadapt::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// A migrated temporary database with a small pool and its own runtime.
pub struct PgContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub database_url: String,
    _database: TemporaryDatabase,
}

pub fn setup_pg_context() -> Result<PgContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| err.to_string())?;
    let database_url = database.url().to_string();
    run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(PgContext {
        runtime,
        pool,
        database_url,
        _database: database,
    })
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Run a `SELECT count(*) AS count ...` statement on a fresh connection.
pub fn count_rows(database_url: &str, sql: &str) -> i64 {
    let mut conn = PgConnection::establish(database_url).expect("connect for row count");
    diesel::sql_query(sql)
        .get_result::<RowCount>(&mut conn)
        .expect("row count query")
        .count
}
