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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use bookshelf_core::db::sqlite::{self, SqliteDb};
use bookshelf_core::db::{Db, Executor};
use std::sync::Arc;

/// Syntactic sugar to build valid book contents.
pub(crate) fn book_details(title: &str, author: &str, summary: &str) -> BookDetails {
    BookDetails::new(
        Title::new(title).unwrap(),
        Author::new(author).unwrap(),
        Summary::new(summary).unwrap(),
    )
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<SqliteDb>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver backed by an in-memory database with the schema in place.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Obtains an executor to talk to the database directly.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a book directly in the database, bypassing the driver.
    pub(crate) async fn create_book(&self, title: &str, author: &str, summary: &str) -> Book {
        db::create_book(&mut self.ex().await, book_details(title, author, summary)).await.unwrap()
    }

    /// Closes the database so that further accesses fail.
    pub(crate) async fn close(&self) {
        self.db.close().await;
    }

    /// Removes the books table so that further accesses fail with unexpected errors.
    pub(crate) async fn drop_table(&self) {
        let mut ex = self.db.typed_ex().await.unwrap();
        sqlite::run_schema(&mut ex, "DROP TABLE books").await.unwrap();
    }
}
