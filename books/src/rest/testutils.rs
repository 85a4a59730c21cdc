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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use bookshelf_core::db::sqlite::{self, SqliteDb};
use bookshelf_core::db::{Db, DbError};
use serde_json::{Value, json};
use std::sync::Arc;

/// A summary that is long enough to pass validation.
pub(crate) const SUMMARY: &str = "A story long enough to be a valid summary.";

/// Builds a JSON payload for a book.
pub(crate) fn book_json(title: &str, author: &str, summary: &str) -> Value {
    json!({"title": title, "author": author, "summary": summary})
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<SqliteDb>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app backed by an in-memory database with the schema in place.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Returns a copy of the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates a book directly in the database.
    pub(crate) async fn create_book(&self, title: &str, author: &str, summary: &str) -> Book {
        let details = BookDetails::new(
            Title::new(title).unwrap(),
            Author::new(author).unwrap(),
            Summary::new(summary).unwrap(),
        );
        db::create_book(&mut self.db.ex().await.unwrap(), details).await.unwrap()
    }

    /// Gets the book identified by `id` directly from the database, if it exists.
    pub(crate) async fn get_book(&self, id: &BookId) -> Option<Book> {
        match db::get_book(&mut self.db.ex().await.unwrap(), id).await {
            Ok(book) => Some(book),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Unexpected database error: {:?}", e),
        }
    }

    /// Gets all books directly from the database.
    pub(crate) async fn get_books(&self) -> Vec<Book> {
        db::get_books(&mut self.db.ex().await.unwrap()).await.unwrap()
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
