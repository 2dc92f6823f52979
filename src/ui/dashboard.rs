use eframe::egui::{self, Color32, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use super::charts;
use super::Action;
use crate::api::Dataset;
use crate::color::INDIGO;
use crate::format::{summary_cards, table_row, TABLE_HEADERS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard (central panel when a dataset is loaded)
// ---------------------------------------------------------------------------

/// Render title, actions, summary cards, charts and the equipment table.
pub fn dashboard(ui: &mut Ui, state: &AppState, dataset: &Dataset, actions: &mut Vec<Action>) {
    ui.heading(format!("Dashboard - {}", dataset.filename));
    ui.add_space(6.0);

    ui.horizontal(|ui: &mut Ui| {
        let label = if state.pdf_pending {
            "Preparing PDF…"
        } else {
            "📄 Download PDF Report"
        };
        if ui
            .add_enabled(!state.pdf_pending, egui::Button::new(label))
            .clicked()
        {
            actions.push(Action::DownloadPdf);
        }
        if state.pdf_pending {
            ui.spinner();
        }
        if ui.button("📂 Upload New File").clicked() {
            actions.push(Action::Reset);
        }
    });
    ui.add_space(10.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            summary_row(ui, dataset);
            ui.add_space(12.0);

            ui.columns(2, |cols| {
                charts::type_distribution_pie(&mut cols[0], dataset);
                charts::averages_bar_chart(&mut cols[1], dataset);
            });
            ui.add_space(12.0);

            ui.heading("Equipment Details");
            equipment_table(ui, dataset);
        });
}

// -- summary cards --

fn summary_row(ui: &mut Ui, dataset: &Dataset) {
    let cards = summary_cards(dataset);
    ui.columns(cards.len(), |cols| {
        for (ui, card) in cols.iter_mut().zip(cards.iter()) {
            egui::Frame::group(ui.style())
                .fill(INDIGO)
                .corner_radius(10.0)
                .inner_margin(12.0)
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(card.title).color(Color32::WHITE));
                    ui.label(
                        RichText::new(&card.value)
                            .size(24.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
        }
    });
}

// -- table --

fn equipment_table(ui: &mut Ui, dataset: &Dataset) {
    if dataset.equipment_list.is_empty() {
        ui.label("No equipment rows.");
        return;
    }

    let rows: Vec<[String; 5]> = dataset.equipment_list.iter().map(table_row).collect();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(100.0))
        .columns(Column::auto().at_least(90.0), 3)
        .header(22.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
