//! Server configuration loaded from environment variables.
//!
//! Everything has a default so the server starts with zero configuration
//! for local development.

use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind the HTTP server to.
    /// Env: `KEEPSAKE_HOST`
    /// Default: `0.0.0.0`
    pub host: String,

    /// Port for the HTTP server.
    /// Env: `KEEPSAKE_PORT`
    /// Default: `3000`
    pub port: u16,

    /// Path to the SQLite database file.
    /// Env: `KEEPSAKE_DB_PATH`
    /// Default: `keepsake.db`
    pub db_path: PathBuf,

    /// Directory where uploaded photo binaries are stored.
    /// Env: `KEEPSAKE_UPLOAD_DIR`
    /// Default: `./uploads`
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("KEEPSAKE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("KEEPSAKE_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()?;
        let db_path =
            PathBuf::from(std::env::var("KEEPSAKE_DB_PATH").unwrap_or_else(|_| "keepsake.db".into()));
        let upload_dir =
            PathBuf::from(std::env::var("KEEPSAKE_UPLOAD_DIR").unwrap_or_else(|_| "./uploads".into()));

        Ok(Self {
            host,
            port,
            db_path,
            upload_dir,
        })
    }
}
