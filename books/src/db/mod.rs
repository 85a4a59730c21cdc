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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
#[cfg(feature = "postgres")]
use bookshelf_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use bookshelf_core::db::sqlite;
use bookshelf_core::db::{DbError, DbResult, Executor};
use futures::TryStreamExt;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

#[cfg(test)]
mod tests;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Book {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(postgres::map_sqlx_error)?;
        let summary: String = row.try_get("summary").map_err(postgres::map_sqlx_error)?;

        let details =
            BookDetails::new(Title::new(title)?, Author::new(author)?, Summary::new(summary)?);
        Ok(Book::new(BookId::new(id)?, details))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(sqlite::map_sqlx_error)?;
        let summary: String = row.try_get("summary").map_err(sqlite::map_sqlx_error)?;

        let details =
            BookDetails::new(Title::new(title)?, Author::new(author)?, Summary::new(summary)?);
        Ok(Book::new(BookId::new(id)?, details))
    }
}

/// Creates a new book with the given `details` and a freshly-generated identifier.
///
/// Fails with `AlreadyExists` if another book has the same title.
pub(crate) async fn create_book(ex: &mut Executor, details: BookDetails) -> DbResult<Book> {
    let id = BookId::generate();

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO books (id, title, author, summary) VALUES ($1, $2, $3, $4)";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(details.title().as_str())
                .bind(details.author().as_str())
                .bind(details.summary().as_str())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO books (id, title, author, summary) VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(details.title().as_str())
                .bind(details.author().as_str())
                .bind(details.summary().as_str())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(Book::new(id, details))
}

/// Gets all books in insertion order.
pub(crate) async fn get_books(ex: &mut Executor) -> DbResult<Vec<Book>> {
    let mut books = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, title, author, summary FROM books ORDER BY seq";
            let mut rows = sqlx::query(query_str).fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, title, author, summary FROM books ORDER BY seq";
            let mut rows = sqlx::query(query_str).fetch(&mut **ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(books)
}

/// Gets the book identified by `id`.
pub(crate) async fn get_book(ex: &mut Executor, id: &BookId) -> DbResult<Book> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, title, author, summary FROM books WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, title, author, summary FROM books WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the book identified by `id` and returns its last contents.
pub(crate) async fn delete_book(ex: &mut Executor, id: &BookId) -> DbResult<Book> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM books WHERE id = $1 RETURNING id, title, author, summary";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_optional(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.ok_or(DbError::NotFound).and_then(Book::try_from)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM books WHERE id = ? RETURNING id, title, author, summary";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_optional(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.ok_or(DbError::NotFound).and_then(Book::try_from)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces the contents of the book identified by `id` with `details` and returns the updated
/// record.
///
/// Fails with `NotFound` if the book does not exist, in which case nothing is created, and with
/// `AlreadyExists` if the new title belongs to another book.
pub(crate) async fn update_book(
    ex: &mut Executor,
    id: &BookId,
    details: BookDetails,
) -> DbResult<Book> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE books SET title = $1, author = $2, summary = $3
                WHERE id = $4
                RETURNING id, title, author, summary";
            let row = sqlx::query(query_str)
                .bind(details.title().as_str())
                .bind(details.author().as_str())
                .bind(details.summary().as_str())
                .bind(id.as_str())
                .fetch_optional(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.ok_or(DbError::NotFound).and_then(Book::try_from)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE books SET title = ?, author = ?, summary = ?
                WHERE id = ?
                RETURNING id, title, author, summary";
            let row = sqlx::query(query_str)
                .bind(details.title().as_str())
                .bind(details.author().as_str())
                .bind(details.summary().as_str())
                .bind(id.as_str())
                .fetch_optional(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.ok_or(DbError::NotFound).and_then(Book::try_from)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
