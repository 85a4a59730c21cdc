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

//! Database tests shared by all implementations.

use crate::db::*;
use bookshelf_core::db::{Db, DbError, Executor};

/// Syntactic sugar to build valid book contents.
fn details(title: &str, author: &str, summary: &str) -> BookDetails {
    BookDetails::new(
        Title::new(title).unwrap(),
        Author::new(author).unwrap(),
        Summary::new(summary).unwrap(),
    )
}

/// Inserts a book with the given raw values, bypassing all validation.
async fn insert_raw(ex: &mut Executor, id: &str, title: &str, author: &str, summary: &str) {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO books (id, title, author, summary) VALUES ($1, $2, $3, $4)";
            sqlx::query(query_str)
                .bind(id)
                .bind(title)
                .bind(author)
                .bind(summary)
                .execute(&mut **ex)
                .await
                .unwrap();
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO books (id, title, author, summary) VALUES (?, ?, ?, ?)";
            sqlx::query(query_str)
                .bind(id)
                .bind(title)
                .bind(author)
                .bind(summary)
                .execute(&mut **ex)
                .await
                .unwrap();
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

async fn test_create_and_get(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let book = create_book(
        &mut ex,
        details("Dune", "Frank Herbert", "A desert planet and its precious spice."),
    )
    .await
    .unwrap();
    assert_eq!("Dune", book.title().as_str());
    assert_eq!("Frank Herbert", book.author().as_str());
    assert_eq!("A desert planet and its precious spice.", book.summary().as_str());

    assert_eq!(book, get_book(&mut ex, book.id()).await.unwrap());
}

async fn test_create_assigns_unique_ids(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let summary = "Twenty characters at least.";
    let book1 = create_book(&mut ex, details("First", "Someone", summary)).await.unwrap();
    let book2 = create_book(&mut ex, details("Second", "Someone", summary)).await.unwrap();
    assert_ne!(book1.id(), book2.id());
}

async fn test_create_duplicate_title(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let original = details("Dune", "Frank Herbert", "The original summary of the book.");
    let first = create_book(&mut ex, original).await.unwrap();

    let duplicate = details("Dune", "Someone Else", "A different summary for the book.");
    assert_eq!(DbError::AlreadyExists, create_book(&mut ex, duplicate).await.unwrap_err());

    assert_eq!(vec![first], get_books(&mut ex).await.unwrap());
}

async fn test_get_books_empty(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_books(&mut ex).await.unwrap().is_empty());
}

async fn test_get_books_in_insertion_order(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let summary = "Twenty characters at least.";
    let mut exp_books = vec![];
    for title in ["Charlie", "Alpha", "Bravo"] {
        exp_books.push(create_book(&mut ex, details(title, "Someone", summary)).await.unwrap());
    }

    assert_eq!(exp_books, get_books(&mut ex).await.unwrap());
}

async fn test_get_book_not_found(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let summary = "Twenty characters at least.";
    create_book(&mut ex, details("Present", "Someone", summary)).await.unwrap();

    let id = BookId::new("not-a-uuid").unwrap();
    assert_eq!(DbError::NotFound, get_book(&mut ex, &id).await.unwrap_err());
    let id = BookId::generate();
    assert_eq!(DbError::NotFound, get_book(&mut ex, &id).await.unwrap_err());
}

async fn test_delete_book(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let summary = "Twenty characters at least.";
    let book1 = create_book(&mut ex, details("First", "Someone", summary)).await.unwrap();
    let book2 = create_book(&mut ex, details("Second", "Someone", summary)).await.unwrap();

    assert_eq!(book1, delete_book(&mut ex, book1.id()).await.unwrap());
    assert_eq!(DbError::NotFound, get_book(&mut ex, book1.id()).await.unwrap_err());
    assert_eq!(vec![book2], get_books(&mut ex).await.unwrap());

    assert_eq!(DbError::NotFound, delete_book(&mut ex, book1.id()).await.unwrap_err());
}

async fn test_update_book(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let book = create_book(&mut ex, details("Old title", "Old author", "The old summary text."))
        .await
        .unwrap();

    let new_details = details("New title", "New author", "The new summary text.");
    let updated = update_book(&mut ex, book.id(), new_details).await.unwrap();
    assert_eq!(book.id(), updated.id());
    assert_eq!("New title", updated.title().as_str());
    assert_eq!("New author", updated.author().as_str());
    assert_eq!("The new summary text.", updated.summary().as_str());

    assert_eq!(updated, get_book(&mut ex, book.id()).await.unwrap());
}

async fn test_update_book_keeps_own_title(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let book =
        create_book(&mut ex, details("Same", "Someone", "The old summary text.")).await.unwrap();
    let new_details = details("Same", "Someone", "A newer summary of it.");
    let updated = update_book(&mut ex, book.id(), new_details).await.unwrap();
    assert_eq!("A newer summary of it.", updated.summary().as_str());
}

async fn test_update_book_not_found(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let id = BookId::generate();
    assert_eq!(
        DbError::NotFound,
        update_book(&mut ex, &id, details("Title", "Author", "Twenty characters at least."))
            .await
            .unwrap_err()
    );
    assert!(get_books(&mut ex).await.unwrap().is_empty());
}

async fn test_update_book_duplicate_title(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let summary = "Twenty characters at least.";
    let book1 = create_book(&mut ex, details("First", "Someone", summary)).await.unwrap();
    let book2 = create_book(&mut ex, details("Second", "Someone", summary)).await.unwrap();

    assert_eq!(
        DbError::AlreadyExists,
        update_book(&mut ex, book2.id(), details("First", "Other", summary)).await.unwrap_err()
    );
    assert_eq!(vec![book1, book2], get_books(&mut ex).await.unwrap());
}

async fn test_corrupted_row(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    insert_raw(&mut ex, "the-id", "Title", "Author", "too short").await;

    let id = BookId::new("the-id").unwrap();
    match get_book(&mut ex, &id).await {
        Err(DbError::DataIntegrityError(msg)) => assert!(msg.contains("Summary")),
        e => panic!("Must have failed with DataIntegrityError but got: {:?}", e),
    }
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta])? ) => {
        bookshelf_core::db::testutils::generate_tests!(
            $( #[$extra], )?
            $setup,
            $crate::db::tests,
            test_create_and_get,
            test_create_assigns_unique_ids,
            test_create_duplicate_title,
            test_get_books_empty,
            test_get_books_in_insertion_order,
            test_get_book_not_found,
            test_delete_book,
            test_update_book,
            test_update_book_keeps_own_title,
            test_update_book_not_found,
            test_update_book_duplicate_title,
            test_corrupted_row
        );
    }
];

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use bookshelf_core::db::postgres::testutils;

    /// Connects to the test PostgreSQL database and initializes the schema.
    async fn setup() -> Box<dyn Db + Send + Sync> {
        let db = testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Box::new(db)
    }

    generate_db_tests!(
        setup().await,
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

mod sqlite {
    use super::*;
    use bookshelf_core::db::sqlite::testutils;

    /// Opens an in-memory SQLite database and initializes the schema.
    async fn setup() -> Box<dyn Db + Send + Sync> {
        let db = testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Box::new(db)
    }

    generate_db_tests!(setup().await);
}
