use std::path::{Path, PathBuf};

use crate::api::{Dataset, Health};

// ---------------------------------------------------------------------------
// View and notifications
// ---------------------------------------------------------------------------

/// Which screen the central panel shows. Derived from the state, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Upload,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A modal message the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title: title.to_string(), message: message.into() }
    }

    pub fn warning(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, title: title.to_string(), message: message.into() }
    }

    pub fn error(title: &str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title: title.to_string(), message: message.into() }
    }
}

/// Result of the last health probe.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendStatus {
    Unknown,
    Healthy(Health),
    Unreachable(String),
}

/// PDF bytes received from the backend, waiting for a save location.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReport {
    pub dataset_id: u64,
    pub bytes: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Clone)]
pub struct AppState {
    /// CSV chosen for upload (None until the user picks one).
    pub selected_file: Option<PathBuf>,

    /// Dataset returned by the backend. Its presence selects the dashboard.
    pub dataset: Option<Dataset>,

    /// Whether an upload is in flight.
    pub loading: bool,

    /// Whether a PDF request is in flight.
    pub pdf_pending: bool,

    /// Recent uploads as reported by the backend, newest first.
    pub history: Vec<Dataset>,

    pub backend: BackendStatus,

    /// Modal notification currently shown.
    pub notice: Option<Notice>,

    /// Non-blocking status line (background refresh failures).
    pub status_message: Option<String>,

    pub pending_report: Option<PendingReport>,

    /// Bumped whenever the screen is taken over by the user (reset, new
    /// upload). History opens issued under an older value are discarded.
    pub generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_file: None,
            dataset: None,
            loading: false,
            pdf_pending: false,
            history: Vec::new(),
            backend: BackendStatus::Unknown,
            notice: None,
            status_message: None,
            pending_report: None,
            generation: 0,
        }
    }
}

impl AppState {
    pub fn view(&self) -> View {
        match self.dataset {
            Some(_) => View::Dashboard,
            None => View::Upload,
        }
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
    }

    /// Display name of the selected file.
    pub fn selected_file_name(&self) -> Option<String> {
        self.selected_file.as_deref().map(file_name)
    }

    /// Validate and mark an upload as started. Returns the file to send, or
    /// `None` when no request must be issued.
    pub fn begin_upload(&mut self) -> Option<PathBuf> {
        if self.loading {
            return None;
        }
        let Some(path) = self.selected_file.clone() else {
            self.notify(Notice::warning("No file", "Please select a file"));
            return None;
        };
        self.loading = true;
        self.generation += 1;
        Some(path)
    }

    /// Ingest the dataset of a finished upload and switch to the dashboard.
    pub fn upload_succeeded(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.loading = false;
        self.status_message = None;
        self.notify(Notice::info("Success", "Upload successful!"));
    }

    /// Keep the upload form, tell the user why it failed.
    pub fn upload_failed(&mut self, reason: &str) {
        self.loading = false;
        self.notify(Notice::error("Upload failed", format!("Upload failed: {reason}")));
    }

    /// Show a dataset opened from the history list.
    pub fn show_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Back to the upload form with nothing retained.
    pub fn reset(&mut self) {
        self.dataset = None;
        self.selected_file = None;
        self.pending_report = None;
        self.generation += 1;
    }

    /// Id of the dataset whose report may be requested, marking the request
    /// as in flight.
    pub fn begin_pdf(&mut self) -> Option<u64> {
        if self.pdf_pending {
            return None;
        }
        let id = self.dataset.as_ref()?.id;
        self.pdf_pending = true;
        Some(id)
    }

    pub fn pdf_received(&mut self, dataset_id: u64, bytes: Vec<u8>) {
        self.pdf_pending = false;
        self.pending_report = Some(PendingReport { dataset_id, bytes });
    }

    pub fn pdf_failed(&mut self, reason: &str) {
        self.pdf_pending = false;
        self.notify(Notice::error("Download failed", format!("Failed to download PDF: {reason}")));
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
