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

//! Validation of untrusted request payloads into model types.
//!
//! Validation reports every problem it finds instead of stopping at the first one so that clients
//! can fix their requests in a single round trip.

use crate::model::*;
use bookshelf_core::model::{ModelError, Violation, ViolationKind};
use serde_json::{Map, Value};

/// Names of the fields accepted in a book payload, in reporting order.
const BOOK_FIELDS: [&str; 3] = ["title", "author", "summary"];

/// Converts a `ModelError` raised while building `field` into a list of violations.
fn model_violation(field: &'static str) -> impl FnOnce(ModelError) -> Vec<Violation> {
    move |e| vec![Violation::new(field, ViolationKind::Malformed, e.to_string())]
}

/// Extracts the non-empty string `field` from `object`, recording any problems in `violations`.
fn text_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'a str> {
    match object.get(field) {
        None => {
            violations.push(Violation::new(
                field,
                ViolationKind::Required,
                format!("\"{}\" is required", field),
            ));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(Violation::new(
                field,
                ViolationKind::Empty,
                format!("\"{}\" is not allowed to be empty", field),
            ));
            None
        }
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            violations.push(Violation::new(
                field,
                ViolationKind::Type,
                format!("\"{}\" must be a string", field),
            ));
            None
        }
    }
}

/// Validates the contents of a book `payload` as received from a client.
pub(crate) fn validate_book(payload: &Value) -> Result<BookDetails, Vec<Violation>> {
    let object = match payload.as_object() {
        Some(object) => object,
        None => {
            return Err(vec![Violation::new(
                "body",
                ViolationKind::Type,
                "\"value\" must be of type object",
            )]);
        }
    };

    let mut violations = vec![];

    let title = text_field(object, "title", &mut violations);
    let author = text_field(object, "author", &mut violations);
    let summary = text_field(object, "summary", &mut violations).and_then(|summary| {
        let length = summary.encode_utf16().count();
        if length < SUMMARY_MIN_LENGTH {
            violations.push(Violation::new(
                "summary",
                ViolationKind::TooShort,
                format!(
                    "\"summary\" length must be at least {} characters long",
                    SUMMARY_MIN_LENGTH
                ),
            ));
            None
        } else if length > SUMMARY_MAX_LENGTH {
            violations.push(Violation::new(
                "summary",
                ViolationKind::TooLong,
                format!(
                    "\"summary\" length must be less than or equal to {} characters long",
                    SUMMARY_MAX_LENGTH
                ),
            ));
            None
        } else {
            Some(summary)
        }
    });

    let mut unknown = object
        .keys()
        .filter(|key| !BOOK_FIELDS.contains(&key.as_str()))
        .collect::<Vec<&String>>();
    unknown.sort();
    for key in unknown {
        violations.push(Violation::new(
            key.as_str(),
            ViolationKind::Unknown,
            format!("\"{}\" is not allowed", key),
        ));
    }

    let (Some(title), Some(author), Some(summary)) = (title, author, summary) else {
        return Err(violations);
    };
    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(BookDetails::new(
        Title::new(title).map_err(model_violation("title"))?,
        Author::new(author).map_err(model_violation("author"))?,
        Summary::new(summary).map_err(model_violation("summary"))?,
    ))
}

/// Validates a book identifier `id` taken from a request path.
pub(crate) fn validate_id(id: String) -> Result<BookId, Vec<Violation>> {
    if id.is_empty() {
        return Err(vec![Violation::new(
            "id",
            ViolationKind::Empty,
            "\"id\" is not allowed to be empty",
        )]);
    }
    BookId::new(id).map_err(model_violation("id"))
}
