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

//! Generic data types shared by all services.

use serde::{Deserialize, Serialize};

/// Error raised when constructing a model type from invalid data.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Category of a field-level validation failure.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A string field was present but empty.
    Empty,

    /// The payload could not be parsed at all.
    Malformed,

    /// A mandatory field was absent.
    Required,

    /// A string field is longer than allowed.
    TooLong,

    /// A string field is shorter than allowed.
    TooShort,

    /// A field has the wrong JSON type.
    Type,

    /// The payload carries a field that is not part of the schema.
    Unknown,
}

/// A single field-level validation failure, as reported to clients.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Violation {
    /// Name of the offending field, or `body` when the problem is with the payload as a whole.
    pub field: String,

    /// Category of the failure.
    pub kind: ViolationKind,

    /// Human-readable description of the failure.
    pub message: String,
}

impl Violation {
    /// Creates a new violation for `field`.
    pub fn new<F, M>(field: F, kind: ViolationKind, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Self { field: field.into(), kind, message: message.into() }
    }
}
