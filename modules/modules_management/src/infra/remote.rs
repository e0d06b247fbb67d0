use std::io;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::config::UpdaterConfig;
use crate::domain::{ModuleUpdater, UpdatedModules};

/// Errors raised while building a [`RemoteModuleUpdater`].
#[derive(Debug, thiserror::Error)]
pub enum RemoteUpdaterError {
    #[error("updater.base_url is not configured")]
    MissingBaseUrl,
    #[error("updater.base_url cannot be used as a base: {0}")]
    InvalidBaseUrl(Url),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`ModuleUpdater`] that delegates to a module update service over HTTP.
///
/// Routes, relative to the base URL:
/// - `POST update` with `{"jahiaOnly": bool, "fixedFlag": bool, "filters": [..] | null}`,
///   answered by a JSON array of module names
/// - `GET installed`, `GET updates`: JSON arrays of strings
/// - `GET last-update`: a JSON string or `null`
#[derive(Clone, Debug)]
pub struct RemoteModuleUpdater {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePayload<'a> {
    jahia_only: bool,
    fixed_flag: bool,
    filters: Option<&'a [String]>,
}

impl RemoteModuleUpdater {
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, RemoteUpdaterError> {
        if base_url.cannot_be_a_base() {
            return Err(RemoteUpdaterError::InvalidBaseUrl(base_url));
        }
        // join() replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(cfg: &UpdaterConfig) -> Result<Self, RemoteUpdaterError> {
        let base_url = cfg
            .base_url
            .clone()
            .ok_or(RemoteUpdaterError::MissingBaseUrl)?;
        Self::new(base_url, Duration::from_secs(cfg.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn route(&self, name: &str) -> io::Result<Url> {
        self.base_url
            .join(name)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    async fn read<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> io::Result<T> {
        let response = request.send().await.map_err(to_io_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(io::Error::other(format!(
                "module update service returned {}",
                status
            )));
        }

        response.json().await.map_err(to_io_error)
    }
}

fn to_io_error(e: reqwest::Error) -> io::Error {
    let kind = if e.is_timeout() {
        io::ErrorKind::TimedOut
    } else if e.is_connect() {
        io::ErrorKind::ConnectionRefused
    } else if e.is_decode() {
        io::ErrorKind::InvalidData
    } else {
        io::ErrorKind::Other
    };
    io::Error::new(kind, e)
}

#[async_trait]
impl ModuleUpdater for RemoteModuleUpdater {
    #[instrument(
        name = "modules_management.remote.update_modules",
        skip(self, filters)
    )]
    async fn update_modules(
        &self,
        jahia_only: bool,
        fixed_flag: bool,
        filters: Option<Vec<String>>,
    ) -> io::Result<UpdatedModules> {
        let payload = UpdatePayload {
            jahia_only,
            fixed_flag,
            filters: filters.as_deref(),
        };

        let url = self.route("update")?;
        let updated: UpdatedModules = self.read(self.client.post(url).json(&payload)).await?;
        debug!(base_url = %self.base_url, count = updated.len(), "Remote updater answered");
        Ok(updated)
    }

    #[instrument(name = "modules_management.remote.installed_modules", skip(self))]
    async fn installed_modules(&self) -> io::Result<Vec<String>> {
        let url = self.route("installed")?;
        self.read(self.client.get(url)).await
    }

    #[instrument(name = "modules_management.remote.available_updates", skip(self))]
    async fn available_updates(&self) -> io::Result<Vec<String>> {
        let url = self.route("updates")?;
        self.read(self.client.get(url)).await
    }

    #[instrument(name = "modules_management.remote.last_update_time", skip(self))]
    async fn last_update_time(&self) -> io::Result<Option<String>> {
        let url = self.route("last-update")?;
        self.read(self.client.get(url)).await
    }
}
