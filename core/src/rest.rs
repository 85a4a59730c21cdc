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

//! Generic code for REST handlers.
//!
//! All services should implement an `app` function in this module that returns the `Router` for the
//! application.
//!
//! Every API should be put in its own `.rs` file, using a name like `<entity>_<method>.rs`.  This
//! may seem overkill, but putting every API in its own file makes it easy to ensure all the
//! integration tests for the given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API should define a `route` method that
//! returns the HTTP method and the API path under test.  All integration tests within the module
//! then rely on `route` to obtain this information, ensuring that they all test the desired API.
//!
//! Every response, successful or not, is wrapped in an `Envelope` so that clients can always rely
//! on finding the `status` and `message` fields in the body.

use crate::driver::DriverError;
use crate::model::{Violation, ViolationKind};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error};
use serde::{Deserialize, Serialize};

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RestError {
    /// Indicates that the request would clash with an existing entity.
    #[error("{0}")]
    Conflict(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Indicates that the backing storage cannot serve the request right now.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Catch-all error type for all unexpected errors.
    #[error("{0}")]
    Unknown(String),

    /// Indicates that the contents of the request did not pass validation.
    #[error("Invalid input")]
    ValidationError(Vec<Violation>),
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::AlreadyExists(_) => RestError::Conflict(e.to_string()),
            DriverError::BackendError(_) => RestError::Unknown(e.to_string()),
            DriverError::NotFound(_) => RestError::NotFound(e.to_string()),
            DriverError::Unavailable(msg) => RestError::StorageUnavailable(msg),
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(e: JsonRejection) -> Self {
        RestError::ValidationError(vec![Violation::new(
            "body",
            ViolationKind::Malformed,
            e.body_text(),
        )])
    }
}

impl From<PathRejection> for RestError {
    fn from(e: PathRejection) -> Self {
        RestError::ValidationError(vec![Violation::new(
            "path",
            ViolationKind::Malformed,
            e.body_text(),
        )])
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match self {
            RestError::Conflict(message) => {
                debug!("Request rejected with conflict: {}", message);
                Envelope::<()>::without_data(StatusCode::CONFLICT, message).into_response()
            }
            RestError::NotFound(message) => {
                debug!("Request rejected with not found: {}", message);
                Envelope::<()>::without_data(StatusCode::NOT_FOUND, message).into_response()
            }
            RestError::StorageUnavailable(detail) => {
                error!("Storage unavailable: {}", detail);
                Envelope::with_data(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Storage unavailable",
                    ErrorDetail { error: detail },
                )
                .into_response()
            }
            RestError::Unknown(detail) => {
                error!("Internal server error: {}", detail);
                Envelope::with_data(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    ErrorDetail { error: detail },
                )
                .into_response()
            }
            RestError::ValidationError(violations) => {
                debug!("Request rejected with {} violation(s)", violations.len());
                Envelope::with_data(StatusCode::BAD_REQUEST, "Invalid input", violations)
                    .into_response()
            }
        }
    }
}

/// Result type for this module.
pub type RestResult<T> = Result<T, RestError>;

/// Uniform wrapper for the body of every response.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// Copy of the HTTP status code of the response.
    pub status: u16,

    /// Human-readable summary of the outcome.
    pub message: String,

    /// Payload of the response, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Creates an envelope for a response with `status` that carries `data`.
    pub fn with_data<M: Into<String>>(status: StatusCode, message: M, data: T) -> Self {
        Self { status: status.as_u16(), message: message.into(), data: Some(data) }
    }

    /// Creates an envelope for a response with `status` that only carries a `message`.
    pub fn without_data<M: Into<String>>(status: StatusCode, message: M) -> Self {
        Self { status: status.as_u16(), message: message.into(), data: None }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Details attached to server-side failures.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct ErrorDetail {
    /// Description of the underlying failure.
    pub error: String,
}

/// Common test code for the REST server.
#[cfg(feature = "testutils")]
pub mod testutils {
    use super::*;
    use axum::Router;
    use axum::http::{self, HeaderName, HeaderValue};
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    /// Maximum body size for testing purposes.
    const MAX_BODY_SIZE: usize = 1024 * 1024;

    /// Builder for a single request to the API server.
    #[must_use]
    pub struct OneShotBuilder {
        /// The router for the app being tested.
        app: Router,

        /// Builder for the request that will be sent to the app.
        builder: http::request::Builder,
    }

    impl OneShotBuilder {
        /// Creates a new request against a given `method`/`uri` pair served by an `app` router.
        pub fn new<U: AsRef<str>>(app: Router, (method, uri): (http::Method, U)) -> Self {
            let builder = http::Request::builder().method(method).uri(uri.as_ref());
            Self { app, builder }
        }

        /// Sets the header `name` to `value` in the outgoing request.
        pub fn with_header<K, V>(mut self, name: K, value: V) -> Self
        where
            HeaderName: TryFrom<K>,
            <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
            HeaderValue: TryFrom<V>,
            <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
        {
            self.builder = self.builder.header(name, value);
            self
        }

        /// Finishes building the request and sends it with an empty payload.
        pub async fn send_empty(self) -> ResponseChecker {
            let request = self.builder.body(axum::body::Body::empty()).unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a text payload.
        pub async fn send_text<T: Into<String>>(self, text: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
                .body(axum::body::Body::from(text.into()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Finishes building the request and sends it with a JSON payload.
        pub async fn send_json<T: Serialize>(self, request: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(axum::body::Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }
    }

    /// Validator for the outcome of a request sent by a `OneShotBuilder`.
    #[must_use]
    pub struct ResponseChecker {
        /// Actual response that we received from the app.
        response: Response,

        /// Expected HTTP status code in the response above.
        exp_status: StatusCode,
    }

    impl From<Response> for ResponseChecker {
        fn from(response: Response) -> Self {
            Self { response, exp_status: StatusCode::OK }
        }
    }

    impl ResponseChecker {
        /// Sets the expected exit HTTP status to `status`.
        pub fn expect_status(mut self, status: StatusCode) -> Self {
            self.exp_status = status;
            self
        }

        /// Performs common validation operations on the response.
        pub fn verify(&self) {
            assert_eq!(self.exp_status, self.response.status());
        }

        /// Finishes checking the response and expects it to contain a well-formed `Envelope`
        /// whose `status` matches the HTTP status.
        pub async fn expect_envelope<T: DeserializeOwned>(self) -> Envelope<T> {
            self.verify();

            let exp_status = self.exp_status;
            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            let envelope: Envelope<T> = match serde_json::from_slice(&body) {
                Ok(envelope) => envelope,
                Err(e) => {
                    let body = String::from_utf8(body.to_vec()).unwrap();
                    panic!("Invalid envelope due to {}; content was {}", e, body);
                }
            };
            assert_eq!(exp_status.as_u16(), envelope.status);
            envelope
        }

        /// Finishes checking the response and expects it to carry `exp_message` and a payload of
        /// type `T`, which is returned.
        pub async fn expect_data<T: DeserializeOwned>(self, exp_message: &str) -> T {
            let envelope = self.expect_envelope::<T>().await;
            assert_eq!(exp_message, envelope.message);
            match envelope.data {
                Some(data) => data,
                None => panic!("Envelope has no data"),
            }
        }

        /// Finishes checking the response and expects it to carry a message that matches `exp_re`
        /// and no payload.
        pub async fn expect_message(self, exp_re: &str) {
            let envelope = self.expect_envelope::<serde_json::Value>().await;
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(
                re.is_match(&envelope.message),
                "Message '{}' does not match re '{}'",
                envelope.message,
                exp_re
            );
            assert!(envelope.data.is_none(), "Unexpected data in {:?}", envelope);
        }

        /// Finishes checking the response and expects it to describe a server-side failure whose
        /// detail matches `exp_re`.
        pub async fn expect_error(self, exp_re: &str) {
            let envelope = self.expect_envelope::<ErrorDetail>().await;
            let detail = match envelope.data {
                Some(detail) => detail,
                None => panic!("Error envelope '{}' has no detail", envelope.message),
            };
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(
                re.is_match(&detail.error),
                "Error detail '{}' does not match re '{}'",
                detail.error,
                exp_re
            );
        }

        /// Finishes checking the response and expects it to be a validation failure, returning
        /// the reported violations.
        pub async fn expect_violations(self) -> Vec<Violation> {
            assert_eq!(StatusCode::BAD_REQUEST, self.exp_status, "Use expect_status first");
            let violations = self.expect_data::<Vec<Violation>>("Invalid input").await;
            assert!(!violations.is_empty(), "Validation failures must report violations");
            violations
        }

        /// Finishes checking the response and returns the body of the response as UTF-8.
        pub async fn take_body_as_text(self) -> String {
            self.verify();

            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            String::from_utf8(body.to_vec()).unwrap()
        }
    }

    /// Generates a test to verify that an API that expects JSON fails when it gets something else.
    #[macro_export]
    macro_rules! test_payload_must_be_json {
        ( $app:expr, $route:expr ) => {
            #[tokio::test]
            async fn test_payload_must_be_json() {
                let violations = $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_violations()
                    .await;
                assert_eq!(1, violations.len());
                assert_eq!("body", violations[0].field);
                assert_eq!($crate::model::ViolationKind::Malformed, violations[0].kind);
                assert!(violations[0].message.contains("Content-Type"));

                let violations = $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    .with_header(axum::http::header::CONTENT_TYPE, "application/json")
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_violations()
                    .await;
                assert_eq!(1, violations.len());
                assert_eq!("body", violations[0].field);
                assert_eq!($crate::model::ViolationKind::Malformed, violations[0].kind);
                assert!(violations[0].message.contains("expected ident"));
            }
        };
    }

    pub use test_payload_must_be_json;
}
