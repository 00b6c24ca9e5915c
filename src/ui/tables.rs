use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::Statistics;
use crate::data::model::{Record, COL_AREA, COL_DOMAIN, COL_ELEMENT, COL_VALUE, COL_YEAR};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

/// Render the first rows of a filtered view.
pub fn preview_table(ui: &mut Ui, id: &str, rows: &[&Record]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto())
            .columns(Column::auto().at_least(50.0), 5)
            .header(HEADER_HEIGHT, |mut header| {
                for title in ["", COL_YEAR, COL_DOMAIN, COL_AREA, COL_ELEMENT, COL_VALUE] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (i, record) in rows.iter().enumerate() {
                    body.row(ROW_HEIGHT, |mut row| {
                        let cells = [
                            i.to_string(),
                            record.year.to_string(),
                            record.domain.clone(),
                            record.area.clone(),
                            record.element.clone(),
                            format_number(record.value),
                        ];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
    if rows.is_empty() {
        ui.weak("No rows match the current filters.");
    }
}

/// Render the `describe()` table: one row per statistic, one column per
/// numeric field.
pub fn statistics_table(ui: &mut Ui, id: &str, stats: &Statistics) {
    let columns = stats.columns();
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(50.0))
            .columns(Column::auto().at_least(90.0), columns.len())
            .header(HEADER_HEIGHT, |mut header| {
                header.col(|_ui| {});
                for (name, _) in &columns {
                    header.col(|ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|mut body| {
                let labels = columns[0].1.rows().map(|(label, _)| label);
                for (row_idx, label) in labels.into_iter().enumerate() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.strong(label);
                        });
                        for (_, col) in &columns {
                            let value = col.rows()[row_idx].1;
                            row.col(|ui| {
                                ui.label(format_number(value));
                            });
                        }
                    });
                }
            });
    });
}

/// Six significant decimals at most, `NaN` for missing values.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(2020.0), "2020");
        assert_eq!(format_number(1.25), "1.25");
        assert_eq!(format_number(1.2909944487358056), "1.290994");
        assert_eq!(format_number(-0.5), "-0.5");
    }
}
