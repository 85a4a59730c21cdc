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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use axum::http::StatusCode;
use bookshelf_core::rest::Envelope;

mod book_delete;
mod book_get;
mod book_post;
mod book_put;
mod books_get;
#[cfg(test)]
mod testutils;

/// Answers requests that do not match any route.
async fn fallback() -> Envelope<()> {
    Envelope::without_data(StatusCode::NOT_FOUND, "Route not found")
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{delete, get, post, put};
    Router::new()
        .route("/addBookDetails", post(book_post::handler))
        .route("/allBooks", get(books_get::handler))
        .route("/Book/:id", get(book_get::handler))
        .route("/DeleteBook/:id", delete(book_delete::handler))
        .route("/editBook/:id", put(book_put::handler))
        .fallback(fallback)
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use axum::http;
    use bookshelf_core::rest::testutils::*;

    #[tokio::test]
    async fn test_unknown_route() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::GET, "/books"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_message("Route not found")
            .await;
    }

    #[tokio::test]
    async fn test_missing_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::GET, "/Book/"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_message("Route not found")
            .await;
    }
}
