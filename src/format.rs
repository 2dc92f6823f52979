use crate::api::{Dataset, EquipmentRecord};

// ---------------------------------------------------------------------------
// Number formatting shared by cards, table and charts
// ---------------------------------------------------------------------------

/// Fixed two-decimal rendering used everywhere a measurement is shown.
pub fn fixed2(value: f64) -> String {
    format!("{value:.2}")
}

/// Like [`fixed2`], a missing value renders as `0.00`.
pub fn fixed2_or_zero(value: Option<f64>) -> String {
    fixed2(value.unwrap_or(0.0))
}

/// Column headers of the equipment table.
pub const TABLE_HEADERS: [&str; 5] = ["Name", "Type", "Flowrate", "Pressure", "Temperature"];

/// Cells of one table row, in [`TABLE_HEADERS`] order.
pub fn table_row(record: &EquipmentRecord) -> [String; 5] {
    [
        record.name.clone(),
        record.equipment_type.clone(),
        fixed2(record.flowrate),
        fixed2(record.pressure),
        fixed2(record.temperature),
    ]
}

/// One summary card: title and rendered value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

pub fn summary_cards(dataset: &Dataset) -> [SummaryCard; 4] {
    let avg = &dataset.averages;
    [
        SummaryCard {
            title: "Total Equipment",
            value: dataset.total_count.to_string(),
        },
        SummaryCard {
            title: "Avg Flowrate",
            value: fixed2_or_zero(avg.flowrate),
        },
        SummaryCard {
            title: "Avg Pressure",
            value: fixed2_or_zero(avg.pressure),
        },
        SummaryCard {
            title: "Avg Temperature",
            value: fixed2_or_zero(avg.temperature),
        },
    ]
}

/// Bar chart input: (label, value) for each averaged parameter.
pub fn average_bars(dataset: &Dataset) -> [(&'static str, f64); 3] {
    let avg = &dataset.averages;
    [
        ("Flowrate", avg.flowrate.unwrap_or(0.0)),
        ("Pressure", avg.pressure.unwrap_or(0.0)),
        ("Temperature", avg.temperature.unwrap_or(0.0)),
    ]
}
