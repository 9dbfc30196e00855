/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate gphotos;

use anyhow::Result;
use dotenvy::dotenv;
use gphotos::uploader::AlbumUploader;
use gphotos::v1::{Client, Creds};
use std::path::Path;
use std::time::Duration;

// Mirrors the folder tree given on the command line into albums:
//   GPHOTOS_ACCESS_TOKEN=... cargo run --example album_uploader -- /path/to/photos
//
// The access token is an OAuth2 bearer token with the photos library scopes,
// obtained via an OAuth2 flow external to this.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let root = std::env::args_os()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: album_uploader <root folder>"))?;
    let access_token = std::env::var("GPHOTOS_ACCESS_TOKEN")?;

    // Give slow uploads room while still bounding a hung call
    let client = Client::with_timeout(
        Creds::from_access_token(&access_token),
        Duration::from_secs(300),
    )?;

    let report = AlbumUploader::new(client).run(Path::new(&root)).await?;

    println!(
        "{} images uploaded, {} albums created",
        report.uploaded, report.albums_created
    );
    for failure in &report.failures {
        eprintln!("{failure}");
    }
    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
