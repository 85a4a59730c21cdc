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

//! REST service to manage a collection of book records.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf_core::db::Db;
use bookshelf_core::env::get_optional_var;
use derive_getters::Getters;
use log::info;
#[cfg(not(unix))]
use log::warn;
use std::error::Error;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

pub mod db;
pub(crate) mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;
pub(crate) mod validation;

/// Port to listen on when `PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

/// Names of the environment variables that may hold the database URI, in order of preference.
const DATABASE_URI_VARS: [&str; 2] = ["DATABASE_URI", "MONGODB_URI"];

/// Configuration of the service, as read from the environment.
#[derive(Debug, Getters, PartialEq)]
pub struct ServiceOptions {
    /// TCP port to listen on.
    port: u16,

    /// URI of the database to connect to.
    database_uri: String,
}

impl ServiceOptions {
    /// Creates a new set of options from environment variables.
    ///
    /// `PORT` is optional and defaults to 3000.  The database URI is required and is read from
    /// `DATABASE_URI` or, if that is not set, from `MONGODB_URI`.
    pub fn from_env() -> Result<Self, String> {
        let port = get_optional_var::<u16>("PORT")?.unwrap_or(DEFAULT_PORT);

        let mut database_uri = None;
        for name in DATABASE_URI_VARS {
            database_uri = get_optional_var::<String>(name)?;
            if database_uri.is_some() {
                break;
            }
        }
        let database_uri = database_uri.ok_or_else(|| {
            format!("Required environment variable {} not present", DATABASE_URI_VARS.join(" or "))
        })?;

        Ok(Self { port, database_uri })
    }
}

/// Loads environment variables from the dotenv file at `path`.
///
/// Variables already present in the environment take precedence over the file's contents.
/// Returns false if the file does not exist.
pub fn load_env_file(path: &Path) -> Result<bool, String> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(format!("Cannot load environment from {}: {}", path.display(), e)),
    }
}

/// Installs handlers for the signals that ask the process to terminate and returns a future that
/// completes once any of them arrives.
#[cfg(unix)]
fn termination_signal() -> io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("Received SIGINT; draining in-flight requests"),
            _ = terminate.recv() => info!("Received SIGTERM; draining in-flight requests"),
        }
    })
}

/// Returns a future that completes once the process is asked to terminate.
#[cfg(not(unix))]
fn termination_signal() -> io::Result<impl Future<Output = ()>> {
    Ok(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received termination request; draining in-flight requests"),
            Err(e) => {
                warn!("Cannot listen for termination requests: {}", e);
                futures::future::pending::<()>().await;
            }
        }
    })
}

/// Instantiates all resources to serve the application on `bind_addr` using `db` for persistence.
///
/// Returns once the server has been asked to shut down and all in-flight requests are done.
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db);
    let app = app(driver);

    let shutdown = termination_signal()?;
    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("Server stopped");
    Ok(())
}
