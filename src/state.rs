use crate::{
    abstract_trait::upload::DynUploadRelay,
    config::{Config, ConnectionPool},
    di::{DependenciesInject, DependenciesInjectDeps},
    storage::{GoogleDriveRelay, ServiceAccountKey, TempStore},
};
use anyhow::{Context, Result};
use std::{fmt, sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub temp: TempStore,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("temp", &self.temp)
            .finish()
    }
}

impl AppState {
    /// Wires the whole dependency graph. The credential is parsed and the
    /// signing key validated here, so a bad `GOOGLE_CREDENTIALS_JSON`
    /// aborts startup instead of failing the first upload.
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let key = ServiceAccountKey::from_json(&config.google_credentials_json)
            .context("Failed to parse GOOGLE_CREDENTIALS_JSON")?;

        let relay: DynUploadRelay = Arc::new(
            GoogleDriveRelay::new(
                key,
                config.google_drive_folder_id.clone(),
                Duration::from_secs(config.upload_timeout_secs),
            )
            .context("Failed to initialize upload relay")?,
        );

        let temp = TempStore::new(config.upload_dir.clone())
            .await
            .context("Failed to prepare upload directory")?;

        let deps = DependenciesInjectDeps {
            pool,
            relay,
            temp: temp.clone(),
        };

        let di_container = DependenciesInject::new(deps);

        Ok(Self { di_container, temp })
    }
}
