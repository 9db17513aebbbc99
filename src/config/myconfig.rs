use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub run_migrations: bool,
    pub google_credentials_json: String,
    pub google_drive_folder_id: String,
    pub upload_dir: PathBuf,
    pub upload_timeout_secs: u64,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;

        // The whole service-account JSON document lives in the variable;
        // nothing credential-shaped is ever written to disk or logged.
        let google_credentials_json = std::env::var("GOOGLE_CREDENTIALS_JSON")
            .context("Missing environment variable: GOOGLE_CREDENTIALS_JSON")?;
        let google_drive_folder_id = std::env::var("GOOGLE_DRIVE_FOLDER_ID")
            .context("Missing environment variable: GOOGLE_DRIVE_FOLDER_ID")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let upload_dir = match std::env::var("UPLOAD_DIR") {
            Ok(dir) => PathBuf::from(dir),
            // Hosted sandboxes only allow writes under /tmp.
            Err(_) if std::env::var("WEBSITE_INSTANCE_ID").is_ok() => {
                PathBuf::from("/tmp/uploads")
            }
            Err(_) => PathBuf::from("./uploads"),
        };

        let upload_timeout_secs = match std::env::var("UPLOAD_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("UPLOAD_TIMEOUT_SECS must be a valid u64 integer")?,
            Err(_) => DEFAULT_UPLOAD_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url,
            port,
            run_migrations,
            google_credentials_json,
            google_drive_folder_id,
            upload_dir,
            upload_timeout_secs,
        })
    }
}
