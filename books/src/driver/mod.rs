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

//! Business logic for the service.

use crate::model::Title;
use bookshelf_core::db::{Db, DbError};
use bookshelf_core::driver::DriverError;
use std::sync::Arc;

mod book;
mod books;
#[cfg(test)]
pub(crate) mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver issue a single storage call each, so it's incorrect
/// for the caller to combine two separate calls.  For this reason, these operations consume the
/// driver in an attempt to minimize the possibility of executing two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

/// Converts a database error `e` raised while accessing a single book into a driver error with a
/// message suitable for clients.
fn book_error(e: DbError, title: Option<&Title>) -> DriverError {
    match (e, title) {
        (DbError::NotFound, _) => DriverError::NotFound("Book not found".to_owned()),
        (DbError::AlreadyExists, Some(title)) => DriverError::AlreadyExists(format!(
            "A book titled '{}' already exists",
            title.as_str()
        )),
        (e, _) => DriverError::from(e),
    }
}
