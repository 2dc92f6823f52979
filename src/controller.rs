use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use eframe::egui;

use crate::api::{ApiError, Dataset, EquipmentApi, Health};
use crate::state::{AppState, BackendStatus, Notice};

// ---------------------------------------------------------------------------
// Events sent back from worker threads
// ---------------------------------------------------------------------------

/// Outcome of one backend request.
#[derive(Debug)]
pub enum ApiEvent {
    Uploaded(Result<Dataset, ApiError>),
    /// `generation` is the state's generation when the open was issued.
    Opened {
        generation: u64,
        result: Result<Dataset, ApiError>,
    },
    History(Result<Vec<Dataset>, ApiError>),
    Report {
        dataset_id: u64,
        result: Result<Vec<u8>, ApiError>,
    },
    Health(Result<Health, ApiError>),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the view state and runs backend calls off the UI thread.
///
/// Each request gets its own worker thread; results come back over a
/// channel and are applied in [`Controller::poll`], so `state` is only
/// mutated on the UI thread.
pub struct Controller<A: EquipmentApi> {
    pub state: AppState,
    api: Arc<A>,
    sender: Sender<ApiEvent>,
    receiver: Receiver<ApiEvent>,
    repaint: Option<egui::Context>,
}

impl<A: EquipmentApi> Controller<A> {
    pub fn new(api: A) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            state: AppState::default(),
            api: Arc::new(api),
            sender,
            receiver,
            repaint: None,
        }
    }

    /// Wake the UI whenever a request completes.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn select_file(&mut self, path: PathBuf) {
        log::info!("Selected {}", path.display());
        self.state.select_file(path);
    }

    /// Upload the selected CSV. Without a selection only a notice is raised.
    pub fn request_upload(&mut self) {
        let Some(path) = self.state.begin_upload() else {
            return;
        };
        log::info!("Uploading {}", path.display());
        self.spawn(move |api| ApiEvent::Uploaded(api.upload_csv(&path)));
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Fetch the PDF report of the dataset on screen.
    pub fn request_pdf(&mut self) {
        let Some(dataset_id) = self.state.begin_pdf() else {
            return;
        };
        log::info!("Requesting report for dataset {dataset_id}");
        self.spawn(move |api| ApiEvent::Report {
            dataset_id,
            result: api.download_pdf(dataset_id),
        });
    }

    pub fn refresh_history(&mut self) {
        self.spawn(|api| ApiEvent::History(api.get_history()));
    }

    /// Load a past dataset onto the dashboard. Ignored while an upload runs.
    pub fn open_from_history(&mut self, id: u64) {
        if self.state.loading {
            log::debug!("Upload in flight, not opening dataset {id}");
            return;
        }
        log::info!("Opening dataset {id}");
        let generation = self.state.generation;
        self.spawn(move |api| ApiEvent::Opened {
            generation,
            result: api.get_dataset(id),
        });
    }

    pub fn check_health(&mut self) {
        self.spawn(|api| ApiEvent::Health(api.health()));
    }

    /// Apply every completed request. Call once per frame.
    pub fn poll(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Uploaded(Ok(dataset)) => {
                log::info!(
                    "Upload analysed: dataset {} ({} rows)",
                    dataset.id,
                    dataset.total_count
                );
                self.state.upload_succeeded(dataset);
                self.refresh_history();
            }
            ApiEvent::Uploaded(Err(e)) => {
                log::error!("Upload failed: {e}");
                self.state.upload_failed(&e.to_string());
            }
            ApiEvent::Opened { generation, .. } if generation != self.state.generation => {
                log::debug!("Discarding dataset opened before a reset or upload");
            }
            ApiEvent::Opened { result: Ok(dataset), .. } => {
                log::info!("Loaded dataset {}", dataset.id);
                self.state.show_dataset(dataset);
            }
            ApiEvent::Opened { result: Err(e), .. } => {
                log::error!("Failed to open dataset: {e}");
                self.state
                    .notify(Notice::error("Error", format!("Failed to open dataset: {e}")));
            }
            ApiEvent::History(Ok(history)) => {
                log::info!("History: {} datasets", history.len());
                self.state.history = history;
                self.state.status_message = None;
            }
            ApiEvent::History(Err(e)) => {
                log::warn!("Failed to fetch history: {e}");
                self.state.status_message = Some(format!("History unavailable: {e}"));
            }
            ApiEvent::Report { dataset_id, result } => match result {
                Ok(bytes) => {
                    log::info!("Received report for dataset {dataset_id} ({} bytes)", bytes.len());
                    self.state.pdf_received(dataset_id, bytes);
                }
                Err(e) => {
                    log::error!("Failed to download PDF for dataset {dataset_id}: {e}");
                    self.state.pdf_failed(&e.to_string());
                }
            },
            ApiEvent::Health(Ok(health)) => {
                self.state.backend = BackendStatus::Healthy(health);
            }
            ApiEvent::Health(Err(e)) => {
                log::warn!("Backend health check failed: {e}");
                self.state.backend = BackendStatus::Unreachable(e.to_string());
            }
        }
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&A) -> ApiEvent + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        let repaint = self.repaint.clone();

        std::thread::spawn(move || {
            let event = job(api.as_ref());
            if sender.send(event).is_err() {
                log::debug!("UI gone, dropping backend result");
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Block until the next request completes and apply it.
    #[cfg(test)]
    fn wait_for_event(&mut self) {
        let event = self
            .receiver
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("no backend event within 5s");
        self.apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::Averages;
    use crate::api::EquipmentRecord;
    use crate::state::{NoticeLevel, View};
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn sample_dataset(id: u64) -> Dataset {
        Dataset {
            id,
            filename: "plant.csv".into(),
            upload_date: Some("2024-05-01T10:00:00Z".into()),
            total_count: 1,
            type_distribution: BTreeMap::from([("Pump".to_string(), 1)]),
            averages: Averages {
                flowrate: Some(12.345),
                pressure: Some(2.1),
                temperature: Some(300.0),
            },
            equipment_list: vec![EquipmentRecord {
                id: 1,
                name: "Pump A".into(),
                equipment_type: "Pump".into(),
                flowrate: 12.345,
                pressure: 2.1,
                temperature: 300.0,
            }],
        }
    }

    /// In-memory backend counting the requests it receives.
    #[derive(Default)]
    struct FakeApi {
        upload_error: Option<String>,
        pdf_error: Option<String>,
        uploads: AtomicUsize,
        history_calls: AtomicUsize,
        history_error: Mutex<Option<String>>,
        opens: AtomicUsize,
        uploaded_paths: Mutex<Vec<PathBuf>>,
    }

    fn server_error(message: &str) -> ApiError {
        ApiError::Server {
            status: 400,
            message: message.to_string(),
        }
    }

    impl EquipmentApi for FakeApi {
        fn upload_csv(&self, path: &Path) -> Result<Dataset, ApiError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            self.uploaded_paths.lock().unwrap().push(path.to_path_buf());
            match &self.upload_error {
                Some(msg) => Err(server_error(msg)),
                None => Ok(sample_dataset(1)),
            }
        }

        fn get_dataset(&self, id: u64) -> Result<Dataset, ApiError> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            if id == 404 {
                return Err(ApiError::Server {
                    status: 404,
                    message: "Not found".into(),
                });
            }
            Ok(sample_dataset(id))
        }

        fn get_history(&self) -> Result<Vec<Dataset>, ApiError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(msg) = self.history_error.lock().unwrap().as_deref() {
                return Err(server_error(msg));
            }
            Ok(vec![sample_dataset(2), sample_dataset(1)])
        }

        fn download_pdf(&self, _id: u64) -> Result<Vec<u8>, ApiError> {
            match &self.pdf_error {
                Some(msg) => Err(server_error(msg)),
                None => Ok(b"%PDF-1.4".to_vec()),
            }
        }

        fn health(&self) -> Result<Health, ApiError> {
            Ok(Health {
                status: "healthy".into(),
                datasets: Some(2),
            })
        }
    }

    fn uploads(controller: &Controller<FakeApi>) -> usize {
        controller.api.uploads.load(Ordering::SeqCst)
    }

    #[test]
    fn test_upload_without_file_issues_no_request() {
        let mut controller = Controller::new(FakeApi::default());
        controller.request_upload();
        controller.poll();

        assert_eq!(uploads(&controller), 0);
        assert!(!controller.state.loading);
        assert_eq!(controller.state.view(), View::Upload);
        assert_eq!(
            controller.state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Please select a file")
        );
    }

    #[test]
    fn test_successful_upload_shows_dashboard() {
        let mut controller = Controller::new(FakeApi::default());
        controller.select_file(PathBuf::from("plant.csv"));
        controller.request_upload();
        assert!(controller.state.loading);

        controller.wait_for_event();

        assert_eq!(uploads(&controller), 1);
        assert_eq!(controller.state.view(), View::Dashboard);
        assert!(!controller.state.loading);
        assert_eq!(controller.state.dataset.as_ref().map(|d| d.id), Some(1));
        assert_eq!(
            controller.api.uploaded_paths.lock().unwrap().as_slice(),
            &[PathBuf::from("plant.csv")]
        );
    }

    #[test]
    fn test_successful_upload_refreshes_history() {
        let mut controller = Controller::new(FakeApi::default());
        controller.select_file(PathBuf::from("plant.csv"));
        controller.request_upload();
        controller.wait_for_event();
        controller.wait_for_event();

        assert_eq!(controller.api.history_calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state.history.len(), 2);
    }

    #[test]
    fn test_failed_upload_stays_on_upload_form() {
        let mut controller = Controller::new(FakeApi {
            upload_error: Some("File must be CSV format".into()),
            ..FakeApi::default()
        });
        controller.select_file(PathBuf::from("plant.txt"));
        controller.request_upload();
        controller.wait_for_event();

        assert_eq!(controller.state.view(), View::Upload);
        assert!(!controller.state.loading);
        let notice = controller.state.notice.clone().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Upload failed: File must be CSV format");
    }

    #[test]
    fn test_second_upload_while_loading_is_ignored() {
        let mut controller = Controller::new(FakeApi::default());
        controller.select_file(PathBuf::from("plant.csv"));
        controller.request_upload();
        controller.request_upload();
        controller.wait_for_event();

        assert_eq!(uploads(&controller), 1);
    }

    #[test]
    fn test_reset_returns_to_upload() {
        let mut controller = Controller::new(FakeApi::default());
        controller.select_file(PathBuf::from("plant.csv"));
        controller.request_upload();
        controller.wait_for_event();

        controller.reset();
        assert_eq!(controller.state.view(), View::Upload);
        assert!(controller.state.dataset.is_none());
        assert!(controller.state.selected_file.is_none());
    }

    #[test]
    fn test_pdf_success_queues_report() {
        let mut controller = Controller::new(FakeApi::default());
        controller.state.show_dataset(sample_dataset(8));
        controller.request_pdf();
        controller.wait_for_event();

        let report = controller.state.pending_report.clone().unwrap();
        assert_eq!(report.dataset_id, 8);
        assert_eq!(report.bytes, b"%PDF-1.4");
        assert!(!controller.state.pdf_pending);
    }

    #[test]
    fn test_pdf_failure_keeps_dashboard() {
        let mut controller = Controller::new(FakeApi {
            pdf_error: Some("Dataset not found".into()),
            ..FakeApi::default()
        });
        controller.state.show_dataset(sample_dataset(8));
        controller.request_pdf();
        controller.wait_for_event();

        assert_eq!(controller.state.view(), View::Dashboard);
        assert_eq!(controller.state.dataset.as_ref().map(|d| d.id), Some(8));
        assert!(controller.state.pending_report.is_none());
        assert_eq!(
            controller.state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Failed to download PDF: Dataset not found")
        );
    }

    #[test]
    fn test_open_from_history() {
        let mut controller = Controller::new(FakeApi::default());
        controller.open_from_history(3);
        controller.wait_for_event();
        assert_eq!(controller.state.view(), View::Dashboard);
        assert_eq!(controller.state.dataset.as_ref().map(|d| d.id), Some(3));

        controller.reset();
        controller.open_from_history(404);
        controller.wait_for_event();
        assert_eq!(controller.state.view(), View::Upload);
        assert_eq!(
            controller.state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Failed to open dataset: Not found")
        );
    }

    #[test]
    fn test_open_answered_after_reset_is_discarded() {
        let mut controller = Controller::new(FakeApi::default());
        controller.state.show_dataset(sample_dataset(1));
        controller.open_from_history(3);
        controller.reset();
        controller.wait_for_event();

        assert_eq!(controller.state.view(), View::Upload);
        assert!(controller.state.dataset.is_none());
    }

    #[test]
    fn test_open_answered_after_upload_started_is_discarded() {
        let mut controller = Controller::new(FakeApi::default());
        controller.open_from_history(3);
        controller.select_file(PathBuf::from("plant.csv"));
        controller.request_upload();

        // Opened and Uploaded may arrive in either order.
        controller.wait_for_event();
        if controller.state.loading {
            assert_eq!(controller.state.view(), View::Upload);
        }
        controller.wait_for_event();

        assert!(!controller.state.loading);
        assert_eq!(controller.state.view(), View::Dashboard);
        assert_eq!(controller.state.dataset.as_ref().map(|d| d.id), Some(1));
    }

    #[test]
    fn test_open_while_uploading_is_ignored() {
        let mut controller = Controller::new(FakeApi {
            upload_error: Some("File must be CSV format".into()),
            ..FakeApi::default()
        });
        controller.select_file(PathBuf::from("plant.csv"));
        controller.request_upload();
        controller.open_from_history(3);
        controller.wait_for_event();

        assert_eq!(controller.api.opens.load(Ordering::SeqCst), 0);
        assert_eq!(controller.state.view(), View::Upload);
    }

    #[test]
    fn test_history_error_clears_after_successful_refresh() {
        let api = FakeApi::default();
        *api.history_error.lock().unwrap() = Some("Database unavailable".into());
        let mut controller = Controller::new(api);

        controller.refresh_history();
        controller.wait_for_event();
        assert_eq!(
            controller.state.status_message.as_deref(),
            Some("History unavailable: Database unavailable")
        );
        assert!(controller.state.history.is_empty());

        *controller.api.history_error.lock().unwrap() = None;
        controller.refresh_history();
        controller.wait_for_event();
        assert!(controller.state.status_message.is_none());
        assert_eq!(controller.state.history.len(), 2);
    }

    #[test]
    fn test_health_check_updates_backend_status() {
        let mut controller = Controller::new(FakeApi::default());
        controller.check_health();
        controller.wait_for_event();
        assert!(matches!(
            controller.state.backend,
            BackendStatus::Healthy(Health { datasets: Some(2), .. })
        ));
    }
}
