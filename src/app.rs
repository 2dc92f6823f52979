use eframe::egui;

use crate::api::ApiClient;
use crate::controller::Controller;
use crate::report;
use crate::state::{Notice, View};
use crate::ui::{dashboard, panels, Action};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EquipmentApp {
    pub controller: Controller<ApiClient>,
    api_url: String,
}

impl EquipmentApp {
    pub fn new(cc: &eframe::CreationContext<'_>, api: ApiClient, api_url: String) -> Self {
        let mut controller = Controller::new(api).with_repaint(cc.egui_ctx.clone());
        controller.check_health();
        controller.refresh_history();
        Self { controller, api_url }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::SelectFile(path) => self.controller.select_file(path),
            Action::Upload => self.controller.request_upload(),
            Action::Reset => self.controller.reset(),
            Action::DownloadPdf => self.controller.request_pdf(),
            Action::RefreshHistory => self.controller.refresh_history(),
            Action::OpenDataset(id) => self.controller.open_from_history(id),
            Action::CheckHealth => self.controller.check_health(),
            Action::DismissNotice => self.controller.state.dismiss_notice(),
        }
    }

    /// Ask for a destination for a freshly downloaded report and write it.
    fn save_pending_report(&mut self) {
        let Some(pending) = self.controller.state.pending_report.take() else {
            return;
        };
        let Some(path) = report::choose_destination(pending.dataset_id) else {
            log::info!("Saving report {} cancelled", pending.dataset_id);
            return;
        };
        let notice = match report::save_report(&path, &pending.bytes) {
            Ok(()) => Notice::info("Success", "PDF downloaded!"),
            Err(e) => {
                log::error!("Failed to save report: {e:#}");
                Notice::error("Download failed", format!("Failed to save PDF: {e:#}"))
            }
        };
        self.controller.state.notify(notice);
    }
}

impl eframe::App for EquipmentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();
        self.save_pending_report();

        let state = &self.controller.state;
        let mut actions = Vec::new();

        // ---- Drag-and-drop onto the upload form ----
        if state.view() == View::Upload && !state.loading {
            let dropped = ctx.input(|i| {
                i.raw
                    .dropped_files
                    .iter()
                    .find_map(|f| f.path.clone())
            });
            if let Some(path) = dropped {
                actions.push(Action::SelectFile(path));
            }
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state, &self.api_url, &mut actions);
        });

        // ---- Right side panel: recent uploads ----
        egui::SidePanel::right("history_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::history_panel(ui, state, &mut actions);
            });

        // ---- Central panel: upload form or dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| match &state.dataset {
            None => panels::upload_form(ui, state, &mut actions),
            Some(dataset) => dashboard::dashboard(ui, state, dataset, &mut actions),
        });

        if let Some(notice) = &state.notice {
            panels::notice_modal(ctx, notice, &mut actions);
        }

        for action in actions {
            self.dispatch(action);
        }
    }
}
