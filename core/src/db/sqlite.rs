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

//! Common utilities to interact with an SQLite database.

use crate::db::{Db, DbError, DbResult, Executor};
use async_trait::async_trait;
use log::info;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::Database(e) if e.is_unique_violation() => DbError::AlreadyExists,
        sqlx::Error::Io(e) => DbError::Unavailable(e.to_string()),
        sqlx::Error::PoolClosed => DbError::Unavailable("Connection pool is closed".to_owned()),
        sqlx::Error::PoolTimedOut => DbError::Unavailable("Connection pool timed out".to_owned()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Returns true if `uri` names an in-memory database.
fn is_in_memory(uri: &str) -> bool {
    uri.contains(":memory:") || uri.contains("mode=memory")
}

/// A typed executor for SQLite.
pub type SqliteExecutor = PoolConnection<Sqlite>;

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent requests can
    /// use concurrently.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Opens the database at `uri`, creating the backing file if it does not exist yet.
    ///
    /// In-memory databases vanish when their last connection closes, so the pool for them keeps
    /// one connection open at all times.
    pub async fn connect(uri: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(uri)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let mut pool_options = SqlitePoolOptions::new();
        if is_in_memory(uri) {
            pool_options = pool_options.min_connections(1).idle_timeout(None).max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await.map_err(map_sqlx_error)?;
        info!("Connected to SQLite database {}", uri);
        Ok(Self { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The in-memory database only lives for as long as a connection to it is open, so the pool
    /// holds exactly one connection and never recycles it.
    pub async fn connect_in_memory() -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(":memory:")
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self { pool })
    }

    /// Returns an executor of the specific type used by this database.
    pub async fn typed_ex(&self) -> DbResult<SqliteExecutor> {
        self.pool.acquire().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        Ok(Executor::Sqlite(self.typed_ex().await?))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
///
/// The `schema` may contain multiple statements separated by semicolons.
pub async fn run_schema(ex: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(&mut **ex).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes the test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        SqliteDb::connect_in_memory().await.unwrap()
    }
}
