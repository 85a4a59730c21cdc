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

//! Entry point to the book service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use bookshelf_books::db::init_schema;
use bookshelf_books::{ServiceOptions, load_env_file, serve};
use bookshelf_core::db::{self, Db};
use log::{error, info};
use std::error::Error;
use std::net::Ipv4Addr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

/// Name of the optional file with environment variable overrides.
const ENV_FILE: &str = ".env";

/// Connects to the database, prepares its schema and serves requests until terminated.
///
/// `env_file_loaded` is the outcome of loading `ENV_FILE`, which happens before logging is set up.
async fn run(env_file_loaded: Result<bool, String>) -> Result<(), Box<dyn Error>> {
    if env_file_loaded? {
        info!("Loaded environment from {}", ENV_FILE);
    }
    let options = ServiceOptions::from_env()?;

    let db: Arc<dyn Db + Send + Sync> = Arc::from(db::connect(options.database_uri()).await?);
    init_schema(&mut db.ex().await?).await?;
    info!("Database ready");

    let result = serve((Ipv4Addr::UNSPECIFIED, *options.port()), db.clone()).await;
    db.close().await;
    result
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_file_loaded = load_env_file(Path::new(ENV_FILE));
    env_logger::init();

    match run(env_file_loaded).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
