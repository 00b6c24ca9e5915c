use std::collections::BTreeSet;
use std::fmt::Display;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::DatasetKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select Filters");
    ui.separator();

    let AppState {
        ireland,
        world,
        selection,
        ..
    } = state;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multiselect(
                ui,
                "years_ireland",
                "Select years (Ireland)",
                &ireland.years,
                &mut selection.ireland.years,
            );
            multiselect(
                ui,
                "years_world",
                "Select years (World)",
                &world.years,
                &mut selection.world.years,
            );
            multiselect(
                ui,
                "domains_ireland",
                "Select domain (Ireland)",
                &ireland.domains,
                &mut selection.ireland.domains,
            );
            multiselect(
                ui,
                "domains_world",
                "Select domain (World)",
                &world.domains,
                &mut selection.world.domains,
            );
            multiselect(
                ui,
                "areas_ireland",
                "Select area (Ireland)",
                &ireland.areas,
                &mut selection.ireland.areas,
            );
            multiselect(
                ui,
                "areas_world",
                "Select area (World)",
                &world.areas,
                &mut selection.world.areas,
            );

            ui.separator();

            // ---- Pie chart domain (Ireland domains only) ----
            ui.strong("Select Domain for Pie Chart");
            let current = selection.pie_domain.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("pie_domain")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for domain in &ireland.domains {
                        if ui.selectable_label(current == *domain, domain).clicked() {
                            selection.pie_domain = Some(domain.clone());
                        }
                    }
                });
        });
}

/// Collapsible checkbox list with All/None buttons. The header shows how many
/// of the options are selected.
fn multiselect<T>(ui: &mut Ui, id: &str, title: &str, options: &[T], selected: &mut BTreeSet<T>)
where
    T: Ord + Clone + Display,
{
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(options.iter().cloned());
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            for val in options {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val.to_string()).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            for kind in DatasetKind::ALL {
                if ui.button(format!("Open {kind} dataset…")).clicked() {
                    open_file_dialog(state, kind);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        for kind in DatasetKind::ALL {
            let ds = state.dataset(kind);
            let text = if ds.is_empty() {
                RichText::new(format!("{kind}: no rows")).weak()
            } else {
                RichText::new(format!("{kind}: {} rows", ds.len()))
            };
            ui.label(text)
                .on_hover_text(ds.source.display().to_string());
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Replace one of the datasets from a picked file. On failure the current
/// table stays and the error goes to the status line.
pub fn open_file_dialog(state: &mut AppState, kind: DatasetKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {kind} trade data"))
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path, kind) {
            Ok(dataset) => state.replace_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {kind} dataset: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
