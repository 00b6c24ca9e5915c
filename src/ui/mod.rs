//! egui rendering: sidebar and top bar (`panels`), the dashboard page
//! (`dashboard`) and its tables and charts.

pub mod dashboard;
pub mod panels;
pub mod plot;
pub mod tables;
