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

//! Operations on the collection of books.

use crate::db;
use crate::driver::{Driver, book_error};
use crate::model::*;
use bookshelf_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Creates a new book with the given `details`.
    pub(crate) async fn create_book(self, details: BookDetails) -> DriverResult<Book> {
        let title = details.title().clone();
        let book = db::create_book(&mut self.db.ex().await?, details)
            .await
            .map_err(|e| book_error(e, Some(&title)))?;
        info!("Created book {}", book.id().as_str());
        Ok(book)
    }

    /// Gets all books in insertion order.
    pub(crate) async fn get_books(self) -> DriverResult<Vec<Book>> {
        let books = db::get_books(&mut self.db.ex().await?).await?;
        Ok(books)
    }
}
