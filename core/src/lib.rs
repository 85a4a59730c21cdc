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

//! Shared plumbing for resource services.
//!
//! Services built on top of this crate follow a layered architecture and should structure their
//! code to have these modules as well:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the service.
//!     Types that wrap untrusted input validate it at construction time and report failures as
//!     `ModelError`s.
//!
//! 1.  `db`: The persistence layer.  Services write free functions that take an `Executor` and
//!     issue one query per supported backend.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type holding the
//!     injected `Db` and any other in-memory state.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `axum::Router` whose state is the `Driver`
//!     and whose handlers answer with an `Envelope`.
//!
//! 1.  `main`: The launcher.  Its sole purpose is to gather configuration data from environment
//!     variables, open the database and call the service's `serve` function.
//!
//! Every layer has its own result and error types, such as `DbResult` and `DbError`.  Errors float
//! to the top of the app using the `?` operator and are translated to HTTP status codes once
//! returned from the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
