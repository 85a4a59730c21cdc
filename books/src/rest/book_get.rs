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

//! API to get one book.

use crate::driver::Driver;
use crate::model::Book;
use crate::validation::validate_id;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bookshelf_core::rest::{Envelope, RestError, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    path: Result<Path<String>, PathRejection>,
) -> RestResult<Envelope<Book>> {
    let Path(id) = path?;
    let id = validate_id(id).map_err(RestError::ValidationError)?;

    let book = driver.get_book(&id).await?;

    Ok(Envelope::with_data(StatusCode::OK, "Book retrieved successfully", book))
}
