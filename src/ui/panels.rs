use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::Action;
use crate::state::{AppState, BackendStatus, Notice, NoticeLevel, View};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, api_url: &str, actions: &mut Vec<Action>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_pick = state.view() == View::Upload && !state.loading;
            if ui
                .add_enabled(can_pick, egui::Button::new("Select CSV…"))
                .clicked()
            {
                if let Some(path) = open_file_dialog() {
                    actions.push(Action::SelectFile(path));
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Upload New File"))
                .clicked()
            {
                actions.push(Action::Reset);
                ui.close_menu();
            }
        });

        ui.menu_button("Backend", |ui: &mut Ui| {
            if ui.button("Check health").clicked() {
                actions.push(Action::CheckHealth);
                ui.close_menu();
            }
            if ui.button("Refresh history").clicked() {
                actions.push(Action::RefreshHistory);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new(api_url).weak());

        ui.separator();
        match &state.backend {
            BackendStatus::Unknown => {
                ui.label("backend: checking…");
            }
            BackendStatus::Healthy(health) => {
                let text = match health.datasets {
                    Some(n) => format!("backend: {} ({n} datasets)", health.status),
                    None => format!("backend: {}", health.status),
                };
                ui.label(RichText::new(text).color(Color32::DARK_GREEN));
            }
            BackendStatus::Unreachable(reason) => {
                ui.label(RichText::new("backend: unreachable").color(Color32::RED))
                    .on_hover_text(reason);
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Right side panel – recent uploads
// ---------------------------------------------------------------------------

/// Render the list of the backend's most recent datasets.
pub fn history_panel(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Recent uploads");
        if ui.small_button("⟳").on_hover_text("Refresh").clicked() {
            actions.push(Action::RefreshHistory);
        }
    });
    ui.separator();

    if state.history.is_empty() {
        ui.label("No uploads yet.");
        return;
    }

    let current = state.dataset.as_ref().map(|d| d.id);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for ds in &state.history {
                ui.group(|ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.strong(&ds.filename);
                    if let Some(date) = &ds.upload_date {
                        ui.label(RichText::new(date).small().weak());
                    }
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label(format!("{} items", ds.total_count));
                        let is_current = current == Some(ds.id);
                        let can_open = !is_current && !state.loading;
                        if ui
                            .add_enabled(can_open, egui::Button::new("Open").small())
                            .clicked()
                        {
                            actions.push(Action::OpenDataset(ds.id));
                        }
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Upload form (central panel when no dataset is loaded)
// ---------------------------------------------------------------------------

pub fn upload_form(ui: &mut Ui, state: &AppState, actions: &mut Vec<Action>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(24.0);
        ui.heading("🧪 Chemical Equipment Visualizer");
        ui.label("Upload and analyze your equipment data");
        ui.add_space(24.0);

        ui.heading("Upload CSV File");
        ui.add_space(8.0);

        if ui
            .add_enabled(
                !state.loading,
                egui::Button::new(RichText::new("📁  Click to select CSV file").size(18.0))
                    .min_size(egui::vec2(320.0, 80.0)),
            )
            .clicked()
        {
            if let Some(path) = open_file_dialog() {
                actions.push(Action::SelectFile(path));
            }
        }
        ui.label(RichText::new("…or drop a file onto the window").weak());

        ui.add_space(12.0);
        match state.selected_file_name() {
            Some(name) => ui.label(format!("Selected: {name}")),
            None => ui.label("No file selected"),
        };
        ui.add_space(12.0);

        let label = if state.loading {
            "Uploading..."
        } else {
            "🚀 Upload and Analyze"
        };
        ui.horizontal(|ui: &mut Ui| {
            // keep the button centred when the spinner is hidden
            ui.add_space((ui.available_width() - 200.0).max(0.0) / 2.0);
            if ui
                .add_enabled(!state.loading, egui::Button::new(label).min_size(egui::vec2(180.0, 32.0)))
                .clicked()
            {
                actions.push(Action::Upload);
            }
            if state.loading {
                ui.spinner();
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Modal notice
// ---------------------------------------------------------------------------

/// Blocking notification: nothing else is clickable until it is dismissed.
pub fn notice_modal(ctx: &egui::Context, notice: &Notice, actions: &mut Vec<Action>) {
    let color = match notice.level {
        NoticeLevel::Info => Color32::DARK_GREEN,
        NoticeLevel::Warning => Color32::from_rgb(0xc0, 0x80, 0x00),
        NoticeLevel::Error => Color32::RED,
    };

    let response = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui: &mut Ui| {
        ui.set_max_width(360.0);
        ui.heading(RichText::new(&notice.title).color(color));
        ui.add_space(6.0);
        ui.label(&notice.message);
        ui.add_space(10.0);
        ui.vertical_centered(|ui: &mut Ui| ui.button("OK").clicked()).inner
    });

    if response.inner || response.should_close() {
        actions.push(Action::DismissNotice);
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select CSV")
        .add_filter("CSV Files", &["csv"])
        .pick_file()
}
