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

//! High-level data types.

use bookshelf_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Minimum length of a summary, in UTF-16 code units.
pub(crate) const SUMMARY_MIN_LENGTH: usize = 20;

/// Maximum length of a summary, in UTF-16 code units.
pub(crate) const SUMMARY_MAX_LENGTH: usize = 1000;

/// Generates a `Deserialize` implementation for a string newtype that goes through its validating
/// `new` constructor.
macro_rules! deserialize_via_new [
    ( $t:ty ) => {
        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                <$t>::new(raw).map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    }
];

/// Opaque identifier of a book, assigned by the storage layer at creation time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct BookId(String);

impl BookId {
    /// Creates a book identifier from an untrusted string `s`.
    ///
    /// Identifiers are not format-validated: anything that is not empty can be looked up.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Book id cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Generates a new random identifier.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

deserialize_via_new!(BookId);

/// Title of a book.  Titles are unique across the collection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Title(String);

impl Title {
    /// Creates a title from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Title cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the title.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

deserialize_via_new!(Title);

/// Name of the author of a book.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Author(String);

impl Author {
    /// Creates an author from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Author cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the author.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

deserialize_via_new!(Author);

/// Short description of the contents of a book.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Summary(String);

impl Summary {
    /// Creates a summary from an untrusted string `s`, making sure its length is within bounds.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        let length = s.encode_utf16().count();
        if length < SUMMARY_MIN_LENGTH {
            return Err(ModelError(format!(
                "Summary must be at least {} characters long",
                SUMMARY_MIN_LENGTH
            )));
        }
        if length > SUMMARY_MAX_LENGTH {
            return Err(ModelError(format!(
                "Summary must be at most {} characters long",
                SUMMARY_MAX_LENGTH
            )));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the summary.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

deserialize_via_new!(Summary);

/// The user-provided contents of a book record.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct BookDetails {
    /// The book's title.
    title: Title,

    /// The book's author.
    author: Author,

    /// The book's summary.
    summary: Summary,
}

/// A persisted book record.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Book {
    /// Identifier assigned by storage.
    id: BookId,

    /// The book's title.
    title: Title,

    /// The book's author.
    author: Author,

    /// The book's summary.
    summary: Summary,
}

impl Book {
    /// Creates a book record from its identifier `id` and its contents.
    pub(crate) fn new(id: BookId, details: BookDetails) -> Self {
        let BookDetails { title, author, summary } = details;
        Self { id, title, author, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{Token, assert_de_tokens_error, assert_tokens};

    #[test]
    fn test_book_id_ok() {
        assert_eq!("abc", BookId::new("abc").unwrap().as_str());
        assert_eq!("not-a-uuid at all", BookId::new("not-a-uuid at all").unwrap().as_str());
    }

    #[test]
    fn test_book_id_error() {
        assert_eq!(ModelError("Book id cannot be empty".to_owned()), BookId::new("").unwrap_err());
    }

    #[test]
    fn test_book_id_generate() {
        let id1 = BookId::generate();
        let id2 = BookId::generate();
        assert_ne!(id1, id2);
        assert_eq!(36, id1.as_str().len());
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_title_and_author() {
        assert_eq!("Dune", Title::new("Dune").unwrap().as_str());
        assert_eq!(ModelError("Title cannot be empty".to_owned()), Title::new("").unwrap_err());

        assert_eq!("Frank Herbert", Author::new("Frank Herbert").unwrap().as_str());
        assert_eq!(ModelError("Author cannot be empty".to_owned()), Author::new("").unwrap_err());
    }

    #[test]
    fn test_summary_bounds() {
        assert!(Summary::new("x".repeat(SUMMARY_MIN_LENGTH - 1)).is_err());
        assert!(Summary::new("x".repeat(SUMMARY_MIN_LENGTH)).is_ok());
        assert!(Summary::new("x".repeat(SUMMARY_MAX_LENGTH)).is_ok());
        assert!(Summary::new("x".repeat(SUMMARY_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_summary_counts_utf16_units() {
        // Each of these characters takes two bytes in UTF-8 and one UTF-16 code unit.
        let summary = "\u{00e9}".repeat(SUMMARY_MAX_LENGTH);
        assert_eq!(SUMMARY_MAX_LENGTH * 2, summary.len());
        assert!(Summary::new(summary).is_ok());

        // Each of these characters takes two UTF-16 code units.
        assert!(Summary::new("\u{1f4d6}".repeat(SUMMARY_MIN_LENGTH / 2)).is_ok());
        assert!(Summary::new("\u{1f4d6}".repeat(SUMMARY_MIN_LENGTH / 2 - 1)).is_err());
        assert!(Summary::new("\u{1f4d6}".repeat(SUMMARY_MAX_LENGTH / 2)).is_ok());
        assert!(Summary::new("\u{1f4d6}".repeat(SUMMARY_MAX_LENGTH / 2 + 1)).is_err());
    }

    #[test]
    fn test_title_ser_de_ok() {
        assert_tokens(&Title::new("Dune").unwrap(), &[Token::Str("Dune")]);
    }

    #[test]
    fn test_summary_de_error() {
        assert_de_tokens_error::<Summary>(
            &[Token::Str("too short")],
            "Summary must be at least 20 characters long",
        );
    }

    #[test]
    fn test_book_ser_de() {
        let book = Book::new(
            BookId::new("the-id").unwrap(),
            BookDetails::new(
                Title::new("Dune").unwrap(),
                Author::new("Frank Herbert").unwrap(),
                Summary::new("A desert planet and its spice.").unwrap(),
            ),
        );
        assert_tokens(
            &book,
            &[
                Token::Struct { name: "Book", len: 4 },
                Token::Str("id"),
                Token::Str("the-id"),
                Token::Str("title"),
                Token::Str("Dune"),
                Token::Str("author"),
                Token::Str("Frank Herbert"),
                Token::Str("summary"),
                Token::Str("A desert planet and its spice."),
                Token::StructEnd,
            ],
        );
    }
}
