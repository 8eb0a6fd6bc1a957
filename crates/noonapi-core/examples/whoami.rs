//! Log in with partner credentials and print the authenticated identity.
//!
//! ```sh
//! NOON_CREDENTIALS=~/noon_credentials_sensitive.json RUST_LOG=debug \
//!     cargo run -p noonapi-core --example whoami
//! ```

use std::io;

use anyhow::{Context, Result};
use noonapi_core::{Session, SessionConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when neither the argument nor `NOON_CREDENTIALS` names a file
const DEFAULT_CREDENTIALS_PATH: &str = "noon_credentials_sensitive.json";

fn init_tracing() {
    // RUST_LOG controls the level, e.g. RUST_LOG=noonapi_core=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let credentials_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NOON_CREDENTIALS").ok())
        .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string());

    info!(path = %credentials_path, "Creating noon session");

    let session = Session::new(&credentials_path, SessionConfig::default())
        .await
        .context("Failed to create noon session")?;

    let me = session.auth().whoami().await.context("whoami failed")?;
    println!("whoami: {}", serde_json::to_string_pretty(&me)?);

    Ok(())
}
