use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};
use thiserror::Error;

use super::model::{Dataset, ErrorBody, Health, HistoryResponse, UploadResponse};

/// Base URL used when neither `--api-url` nor `EQUIPMENT_API_URL` is given.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

// ---------------------------------------------------------------------------
// EquipmentApi – the calls the UI depends on
// ---------------------------------------------------------------------------

/// Backend operations used by the controller.
///
/// Every call is a single blocking HTTP request: no retry, no caching.
/// Implementations are shared with worker threads, hence `Send + Sync`.
pub trait EquipmentApi: Send + Sync + 'static {
    /// `POST /upload/` with the file as multipart field `file`.
    fn upload_csv(&self, path: &Path) -> Result<Dataset, ApiError>;

    /// `GET /datasets/{id}/`
    fn get_dataset(&self, id: u64) -> Result<Dataset, ApiError>;

    /// `GET /history/`
    fn get_history(&self) -> Result<Vec<Dataset>, ApiError>;

    /// `GET /datasets/{id}/pdf/`, raw PDF bytes.
    fn download_pdf(&self, id: u64) -> Result<Vec<u8>, ApiError>;

    /// `GET /health/`
    fn health(&self) -> Result<Health, ApiError>;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when talking to the equipment backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx answer. `message` is the backend's own text when it sent one.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Cannot read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// e.g. "http://localhost:8000/api", without trailing slash
    pub base_url: String,
    /// `None` leaves requests without a deadline.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

// ---------------------------------------------------------------------------
// ApiClient – reqwest implementation
// ---------------------------------------------------------------------------

pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.config.base_url, path)
    }
}

impl EquipmentApi for ApiClient {
    fn upload_csv(&self, path: &Path) -> Result<Dataset, ApiError> {
        // Form::file picks the file name and mime type; the multipart
        // boundary header is left to reqwest.
        let form = multipart::Form::new()
            .file("file", path)
            .map_err(|source| ApiError::File {
                path: path.to_path_buf(),
                source,
            })?;

        let url = self.url("upload/");
        log::debug!("POST {url} ({})", path.display());
        let response = self.client.post(&url).multipart(form).send()?;
        let body: UploadResponse = ensure_success(response)?.json()?;

        if let Some(message) = &body.message {
            log::info!("{message}: dataset {}", body.data.id);
        }
        Ok(body.data)
    }

    fn get_dataset(&self, id: u64) -> Result<Dataset, ApiError> {
        let url = self.url(&format!("datasets/{id}/"));
        log::debug!("GET {url}");
        let response = self.client.get(&url).send()?;
        Ok(ensure_success(response)?.json()?)
    }

    fn get_history(&self) -> Result<Vec<Dataset>, ApiError> {
        let url = self.url("history/");
        log::debug!("GET {url}");
        let response = self.client.get(&url).send()?;
        let history: HistoryResponse = ensure_success(response)?.json()?;
        Ok(history.into_datasets())
    }

    fn download_pdf(&self, id: u64) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("datasets/{id}/pdf/"));
        log::debug!("GET {url}");
        let response = self.client.get(&url).send()?;
        let bytes = ensure_success(response)?.bytes()?;
        if !bytes.starts_with(b"%PDF") {
            log::warn!("Report for dataset {id} does not look like a PDF");
        }
        Ok(bytes.to_vec())
    }

    fn health(&self) -> Result<Health, ApiError> {
        let url = self.url("health/");
        log::debug!("GET {url}");
        let response = self.client.get(&url).send()?;
        Ok(ensure_success(response)?.json()?)
    }
}

// -- helpers --

/// Join `base` and a relative API path with exactly one slash between them.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pass 2xx responses through, turn everything else into [`ApiError::Server`].
fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let message = server_message(status.as_u16(), &body);
    log::warn!("Backend answered {status}: {message}");
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

/// The backend's error text if the body carries one, else a generic line.
pub fn server_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("server responded with {status}"))
}
