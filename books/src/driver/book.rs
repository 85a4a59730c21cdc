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

//! Operations on one book.

use crate::db;
use crate::driver::{Driver, book_error};
use crate::model::*;
use bookshelf_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Deletes the book identified by `id`, returning its last contents.
    pub(crate) async fn delete_book(self, id: &BookId) -> DriverResult<Book> {
        let book =
            db::delete_book(&mut self.db.ex().await?, id).await.map_err(|e| book_error(e, None))?;
        info!("Deleted book {}", id.as_str());
        Ok(book)
    }

    /// Gets the book identified by `id`.
    pub(crate) async fn get_book(self, id: &BookId) -> DriverResult<Book> {
        let book =
            db::get_book(&mut self.db.ex().await?, id).await.map_err(|e| book_error(e, None))?;
        Ok(book)
    }

    /// Replaces the contents of the book identified by `id` with `details`.
    pub(crate) async fn update_book(self, id: &BookId, details: BookDetails) -> DriverResult<Book> {
        let title = details.title().clone();
        let book = db::update_book(&mut self.db.ex().await?, id, details)
            .await
            .map_err(|e| book_error(e, Some(&title)))?;
        info!("Updated book {}", id.as_str());
        Ok(book)
    }
}
