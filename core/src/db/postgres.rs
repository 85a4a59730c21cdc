// Bookshelf
// Copyright 2026 The Bookshelf Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Common utilities to interact with a PostgreSQL database.

use crate::db::{Db, DbError, DbResult, Executor};
use async_trait::async_trait;
use log::{info, warn};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, Postgres};
use std::str::FromStr;
use std::time::Duration;

/// Maximum amount of time to wait for a pooled connection before declaring the database
/// unavailable.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::Database(e) => match e.code().as_deref() {
            Some("23505") /* unique_violation */ => DbError::AlreadyExists,
            Some("53300") /* too_many_connections */ => DbError::Unavailable(e.to_string()),
            Some("57P01") /* admin_shutdown */ => DbError::Unavailable(e.to_string()),
            Some(code) if code.starts_with("08") /* connection_exception */ => {
                DbError::Unavailable(e.to_string())
            }
            Some(code) => DbError::BackendError(format!("pgsql error {}: {}", code, e)),
            None => DbError::BackendError(e.to_string()),
        },
        sqlx::Error::Io(e) => DbError::Unavailable(e.to_string()),
        sqlx::Error::PoolClosed => DbError::Unavailable("Connection pool is closed".to_owned()),
        sqlx::Error::PoolTimedOut => DbError::Unavailable("Connection pool timed out".to_owned()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e => DbError::BackendError(e.to_string()),
    }
}

/// A typed executor for PostgreSQL.
pub type PostgresExecutor = PoolConnection<Postgres>;

/// Shareable connection pool to a PostgreSQL database.
pub struct PostgresDb {
    /// Shared PostgreSQL connection pool.  This is a cloneable type that all concurrent requests
    /// can use concurrently.
    pool: PgPool,
}

impl Drop for PostgresDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

impl PostgresDb {
    /// Connects to the database at `uri` using the default pool settings.
    pub async fn connect(uri: &str) -> DbResult<Self> {
        Self::connect_with(uri, PgPoolOptions::new()).await
    }

    /// Connects to the database at `uri` with custom `pool_options`.
    ///
    /// One connection is opened before returning so that an unreachable server or bad credentials
    /// are reported right away.
    pub async fn connect_with(uri: &str, pool_options: PgPoolOptions) -> DbResult<Self> {
        let options = PgConnectOptions::from_str(uri).map_err(map_sqlx_error)?;
        let pool = pool_options
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        info!("Connected to PostgreSQL database");
        Ok(Self { pool })
    }

    /// Returns an executor of the specific type used by this database.
    pub async fn typed_ex(&self) -> DbResult<PostgresExecutor> {
        self.pool.acquire().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Db for PostgresDb {
    async fn ex(&self) -> DbResult<Executor> {
        Ok(Executor::Postgres(self.typed_ex().await?))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
///
/// The `schema` may contain multiple statements separated by semicolons.
pub async fn run_schema(ex: &mut PostgresExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(&mut **ex).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the PostgreSQL connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;
    use std::env;

    /// Creates a new connection to the test database identified by `PGSQL_TEST_URI`.
    ///
    /// This sets up the database to use the `pg_temp` schema by default so that any tables
    /// created during the test are deleted at disconnection time.  Note that for this to work,
    /// the connection pool must maintain a single connection open at all times, but not more.
    ///
    /// Given that this is for testing purposes only, any errors will panic.
    pub async fn setup() -> PostgresDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let uri = env::var("PGSQL_TEST_URI").expect("PGSQL_TEST_URI must be set");
        let pool_options = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        let db = PostgresDb::connect_with(&uri, pool_options).await.unwrap();

        let mut ex = db.typed_ex().await.unwrap();
        sqlx::query("SET search_path TO pg_temp").execute(&mut *ex).await.unwrap();
        db
    }
}
