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

//! API to create a book.

use crate::driver::Driver;
use crate::model::Book;
use crate::validation::validate_book;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use bookshelf_core::rest::{Envelope, RestError, RestResult};
use serde_json::Value;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    payload: Result<Json<Value>, JsonRejection>,
) -> RestResult<Envelope<Book>> {
    let Json(payload) = payload?;
    let details = validate_book(&payload).map_err(RestError::ValidationError)?;

    let book = driver.create_book(details).await?;

    Ok(Envelope::with_data(StatusCode::CREATED, "Book details saved successfully", book))
}
