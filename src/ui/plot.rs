use eframe::egui::{self, Color32, RichText, Sense, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{self, AreaTile};
use crate::color;
use crate::error::ChartRenderError;
use crate::pipeline::{ChoroplethModel, DatasetPanel, PieModel};

const CHART_HEIGHT: f32 = 280.0;
const PIE_HEIGHT: f32 = 380.0;
const MAP_HEIGHT: f32 = 480.0;

pub const IRELAND_LINE: Color32 = Color32::from_rgb(255, 165, 0);
pub const WORLD_LINE: Color32 = Color32::from_rgb(0, 128, 0);
pub const IRELAND_POINTS: Color32 = Color32::from_rgb(31, 119, 180);
pub const WORLD_POINTS: Color32 = Color32::from_rgb(214, 39, 40);

/// Shown instead of a chart that has nothing to draw.
fn placeholder(ui: &mut Ui, height: f32, err: &ChartRenderError) {
    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak(err.to_string());
        });
    });
}

// ---------------------------------------------------------------------------
// Bar chart: mean value per year
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, id: &str, panel: &DatasetPanel<'_>) {
    let points = match chart::year_series(&panel.yearly) {
        Ok(points) => points,
        Err(e) => return placeholder(ui, CHART_HEIGHT, &e),
    };

    let colors = color::generate_palette(points.len());
    let bars: Vec<Bar> = points
        .iter()
        .zip(colors)
        .map(|(&[year, value], fill)| {
            Bar::new(year, value)
                .width(0.6)
                .name(format!("{year:.0}"))
                .fill(fill)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Total Value")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(panel.kind.to_string()));
        });
}

// ---------------------------------------------------------------------------
// Line chart: value trend per year
// ---------------------------------------------------------------------------

pub fn line_chart(ui: &mut Ui, id: &str, panel: &DatasetPanel<'_>, label: &str, color: Color32) {
    let points = match chart::year_series(&panel.yearly) {
        Ok(points) => points,
        Err(e) => return placeholder(ui, CHART_HEIGHT, &e),
    };

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Value")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(label)
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(Points::new(points).name(label).color(color).radius(4.0));
        });
}

// ---------------------------------------------------------------------------
// Pie chart: area share of the routed view
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, pie: &PieModel) {
    let slices = match chart::pie_slices(&pie.totals) {
        Ok(slices) => slices,
        Err(e) => return placeholder(ui, PIE_HEIGHT, &e),
    };
    ui.weak(format!("Source: {} filtered view", pie.source));

    let colors = color::generate_palette(slices.len());

    Plot::new("pie_chart")
        .height(PIE_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (slice, fill) in slices.iter().zip(colors) {
                for part in slice.convex_parts(1.0, 128) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(part))
                            .name(&slice.label)
                            .fill_color(fill)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }
                let [px, py] = slice.label_anchor(0.6);
                plot_ui.text(Text::new(
                    PlotPoint::new(px, py),
                    RichText::new(slice.percent_label()).color(Color32::BLACK),
                ));
                let [lx, ly] = slice.label_anchor(1.15);
                plot_ui.text(Text::new(PlotPoint::new(lx, ly), slice.label.as_str()));
            }
        });
}

// ---------------------------------------------------------------------------
// Choropleth: areas shaded by normalized import/export total
// ---------------------------------------------------------------------------

pub fn choropleth(ui: &mut Ui, model: &ChoroplethModel) {
    let columns = ((model.totals.len() as f64 * 2.0).sqrt().ceil() as usize).max(1);
    let tiles = match chart::area_tiles(&model.totals, columns) {
        Ok(tiles) => tiles,
        Err(e) => return placeholder(ui, MAP_HEIGHT, &e),
    };

    Plot::new("choropleth")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for tile in &tiles {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(tile_outline(tile)))
                        .name(&tile.area)
                        .fill_color(color::sequential(tile.intensity))
                        .stroke(Stroke::new(0.5, Color32::BLACK)),
                );
                let (cx, cy) = tile_center(tile);
                let text_color = if tile.intensity > 0.6 {
                    Color32::BLACK
                } else {
                    Color32::WHITE
                };
                plot_ui.text(Text::new(
                    PlotPoint::new(cx, cy + 0.12),
                    RichText::new(&tile.area).color(text_color).small(),
                ));
                plot_ui.text(Text::new(
                    PlotPoint::new(cx, cy - 0.15),
                    RichText::new(format!("{:.1}", tile.value))
                        .color(text_color)
                        .small(),
                ));
            }
        });

    color_bar(ui, model);
}

const TILE_SIZE: f64 = 0.95;

fn tile_center(tile: &AreaTile) -> (f64, f64) {
    (tile.column as f64 + 0.5, -(tile.row as f64) - 0.5)
}

fn tile_outline(tile: &AreaTile) -> Vec<[f64; 2]> {
    let (cx, cy) = tile_center(tile);
    let h = TILE_SIZE / 2.0;
    vec![
        [cx - h, cy - h],
        [cx + h, cy - h],
        [cx + h, cy + h],
        [cx - h, cy + h],
    ]
}

/// Horizontal legend for the sequential scale.
fn color_bar(ui: &mut Ui, model: &ChoroplethModel) {
    let (min, max) = chart::value_range(&model.totals);
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Total Value ({:.0} USD)", model.factor));
        ui.label(format!("{min:.1}"));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(200.0, 14.0), Sense::hover());
        let steps = 50;
        let step_width = rect.width() / steps as f32;
        for i in 0..steps {
            let x0 = rect.left() + step_width * i as f32;
            let cell = egui::Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + step_width + 0.5, rect.bottom()),
            );
            let t = i as f64 / (steps - 1) as f64;
            ui.painter().rect_filled(cell, 0.0, color::sequential(t));
        }
        ui.label(format!("{max:.1}"));
    });
}

// ---------------------------------------------------------------------------
// Scatter: Year vs Value, both datasets overlaid
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, ireland: &DatasetPanel<'_>, world: &DatasetPanel<'_>) {
    let ireland_points = chart::scatter_points(&ireland.view);
    let world_points = chart::scatter_points(&world.view);
    if ireland_points.is_empty() && world_points.is_empty() {
        return placeholder(ui, CHART_HEIGHT, &ChartRenderError::NoData);
    }

    Plot::new("scatter_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Value")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (points, kind, base) in [
                (ireland_points, ireland.kind, IRELAND_POINTS),
                (world_points, world.kind, WORLD_POINTS),
            ] {
                plot_ui.points(
                    Points::new(points)
                        .name(kind.to_string())
                        .color(color::with_alpha(base, 0.6))
                        .radius(3.5),
                );
            }
        });
}
