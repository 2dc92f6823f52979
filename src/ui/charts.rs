use std::collections::BTreeMap;
use std::f32::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::api::Dataset;
use crate::color::series_colors;
use crate::format::{average_bars, fixed2};

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// One wedge of the type-distribution pie, angles in radians from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: u64,
    pub fraction: f32,
    pub start: f32,
    pub end: f32,
}

/// Split the full circle proportionally to the counts. Zero counts get no
/// wedge; an all-zero distribution yields no slices.
pub fn pie_slices(distribution: &BTreeMap<String, u64>) -> Vec<Slice> {
    let total: u64 = distribution.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = 0.0f32;
    distribution
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(label, &count)| {
            let fraction = count as f32 / total as f32;
            let start = angle;
            angle += fraction * TAU;
            Slice {
                label: label.clone(),
                count,
                fraction,
                start,
                end: angle,
            }
        })
        .collect()
}

/// Percentage label as drawn on a wedge, e.g. `33.3%`.
pub fn percent_label(fraction: f32) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn point_on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    // 0 rad at the top, clockwise
    Pos2::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the equipment type distribution as a pie with a legend.
pub fn type_distribution_pie(ui: &mut Ui, dataset: &Dataset) {
    ui.strong("Equipment Type Distribution");

    let slices = pie_slices(&dataset.type_distribution);
    if slices.is_empty() {
        ui.label("No equipment types reported.");
        return;
    }
    let colors = series_colors(slices.len());

    let size = ui.available_width().min(260.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = size * 0.45;

    for (slice, &color) in slices.iter().zip(&colors) {
        // Each wedge is drawn as a fan of thin convex segments.
        let steps = ((slice.end - slice.start) / TAU * 64.0).ceil().max(1.0) as usize;
        let step = (slice.end - slice.start) / steps as f32;
        for i in 0..steps {
            let a0 = slice.start + step * i as f32;
            let a1 = a0 + step;
            painter.add(Shape::convex_polygon(
                vec![
                    center,
                    point_on_circle(center, radius, a0),
                    point_on_circle(center, radius, a1),
                ],
                color,
                Stroke::NONE,
            ));
        }
    }

    for slice in &slices {
        let mid = (slice.start + slice.end) / 2.0;
        painter.text(
            point_on_circle(center, radius * 0.65, mid),
            Align2::CENTER_CENTER,
            percent_label(slice.fraction),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (slice, &color) in slices.iter().zip(&colors) {
            ui.label(RichText::new("■").color(color));
            ui.label(format!("{} ({})", slice.label, slice.count));
        }
    });
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Render the three averaged parameters as a bar chart.
pub fn averages_bar_chart(ui: &mut Ui, dataset: &Dataset) {
    ui.strong("Average Parameters");

    let entries = average_bars(dataset);
    let colors = series_colors(entries.len());
    let labels: Vec<&'static str> = entries.iter().map(|(label, _)| *label).collect();

    let bars: Vec<Bar> = entries
        .iter()
        .zip(&colors)
        .enumerate()
        .map(|(i, ((label, value), &color))| {
            Bar::new(i as f64, *value)
                .name(format!("{label}: {}", fixed2(*value)))
                .fill(color)
                .width(0.6)
        })
        .collect();

    Plot::new("averages_bar_chart")
        .legend(Legend::default())
        .height(260.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).map(|l| l.to_string()).unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Average Values"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_pie_slices_cover_full_circle() {
        let slices = pie_slices(&distribution(&[("Pump", 2), ("Valve", 1), ("Reactor", 1)]));
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].start, 0.0);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!((slices[2].end - TAU).abs() < 1e-5);

        let pump = slices.iter().find(|s| s.label == "Pump").unwrap();
        assert!((pump.fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pie_slices_skip_zero_counts() {
        let slices = pie_slices(&distribution(&[("Pump", 3), ("Valve", 0)]));
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "Pump");
        assert!((slices[0].end - TAU).abs() < 1e-5);
    }

    #[test]
    fn test_pie_slices_empty() {
        assert!(pie_slices(&BTreeMap::new()).is_empty());
        assert!(pie_slices(&distribution(&[("Pump", 0)])).is_empty());
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(1.0 / 3.0), "33.3%");
        assert_eq!(percent_label(0.5), "50.0%");
    }

    #[test]
    fn test_point_on_circle_starts_at_top() {
        let p = point_on_circle(Pos2::new(10.0, 10.0), 5.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 5.0).abs() < 1e-5);
    }
}
