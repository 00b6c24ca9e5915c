use eframe::egui::Ui;

use super::{plot, tables};
use crate::pipeline::{DatasetPanel, RenderModel};

// ---------------------------------------------------------------------------
// Central page
// ---------------------------------------------------------------------------

/// Render every section of the dashboard in its fixed order.
pub fn dashboard(ui: &mut Ui, model: &RenderModel<'_>) {
    ui.heading("Import/Export Dashboard");
    ui.add_space(6.0);

    // ---- Data previews ----
    ui.columns(2, |cols| {
        let rows = model.preview_rows;
        preview(&mut cols[0], "Ireland Dataset", "preview_ireland", &model.ireland, rows);
        preview(&mut cols[1], "Worldwide Dataset", "preview_world", &model.world, rows);
    });
    ui.separator();

    // ---- Descriptive statistics ----
    ui.heading("Descriptive Statistics");
    ui.columns(2, |cols| {
        cols[0].strong("Ireland Dataset:");
        tables::statistics_table(&mut cols[0], "stats_ireland", &model.ireland.stats);
        cols[1].strong("Worldwide Dataset:");
        tables::statistics_table(&mut cols[1], "stats_world", &model.world.stats);
    });
    ui.separator();

    // ---- Bar charts ----
    ui.columns(2, |cols| {
        cols[0].heading("Total Import/Export Values: Ireland");
        plot::bar_chart(&mut cols[0], "bar_ireland", &model.ireland);
        cols[1].heading("Total Import/Export Values: World");
        plot::bar_chart(&mut cols[1], "bar_world", &model.world);
    });
    ui.separator();

    // ---- Line charts ----
    ui.columns(2, |cols| {
        cols[0].heading("Import Value Trend: Ireland");
        plot::line_chart(
            &mut cols[0],
            "line_ireland",
            &model.ireland,
            "Ireland Import",
            plot::IRELAND_LINE,
        );
        cols[1].heading("Import Value Trend: Worldwide");
        plot::line_chart(
            &mut cols[1],
            "line_world",
            &model.world,
            "World Import",
            plot::WORLD_LINE,
        );
    });
    ui.separator();

    // ---- Pie chart ----
    let domain = model.pie.domain.as_deref().unwrap_or("-");
    ui.heading(format!("Import/Export Distribution by Area for {domain}"));
    plot::pie_chart(ui, &model.pie);
    ui.separator();

    // ---- Choropleth ----
    ui.heading("Choropleth Map");
    ui.label("Worldwide Import/Export Distribution by Area");
    plot::choropleth(ui, &model.choropleth);
    ui.separator();

    // ---- Scatter ----
    ui.heading("Import/Export Scatter Plot");
    plot::scatter_plot(ui, &model.ireland, &model.world);
}

fn preview(ui: &mut Ui, title: &str, id: &str, panel: &DatasetPanel<'_>, rows: usize) {
    ui.heading(title);
    ui.weak(format!("{} of {} rows match", panel.view.len(), panel.total_rows));
    tables::preview_table(ui, id, panel.view.head(rows));
}
