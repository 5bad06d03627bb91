//! Cost comparison table per (vehicle, route) pair

use eframe::egui::{self, Color32, RichText, Ui};

use flotte_app::app::FleetService;
use flotte_app::export::export_to_excel;
use flotte_types::Error;

/// Panel rendering the diesel vs. electric comparison
pub struct AnalysisPanel {
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

fn format_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

impl AnalysisPanel {
    pub fn new() -> Self {
        Self {
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, service: &FleetService) {
        ui.heading("Routenanalyse");
        ui.add_space(8.0);

        let analyses = match service.analyze() {
            Ok(analyses) => analyses,
            Err(Error::NoData) => {
                ui.label(
                    RichText::new("Es sind keine Fahrzeug- oder Routendaten verfügbar.")
                        .color(Color32::YELLOW),
                );
                return;
            }
            Err(e) => {
                ui.label(RichText::new(format!("Analyse fehlgeschlagen: {}", e))
                    .color(Color32::LIGHT_RED));
                return;
            }
        };

        if analyses.is_empty() {
            ui.label(RichText::new("Keine Routen gefunden.").color(Color32::GRAY));
            return;
        }

        ui.horizontal(|ui| {
            if ui.button("Als Excel exportieren...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Excel", &["xlsx"])
                    .set_file_name("kostenvergleich.xlsx")
                    .save_file()
                {
                    match export_to_excel(&analyses, service.params(), &path) {
                        Ok(()) => {
                            self.status_message =
                                Some((format!("Bericht geschrieben: {}", path.display()), false));
                        }
                        Err(e) => {
                            self.status_message =
                                Some((format!("Export fehlgeschlagen: {}", e), true));
                        }
                    }
                }
            }

            if let Some((ref message, is_error)) = self.status_message {
                let color = if is_error {
                    Color32::LIGHT_RED
                } else {
                    Color32::LIGHT_GREEN
                };
                ui.label(RichText::new(message).color(color));
            }
        });

        ui.add_space(8.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, analysis) in analyses.iter().enumerate() {
                ui.label(RichText::new(format!("Fahrzeug: {}", analysis.vehicle.name)).strong());
                ui.label(format!(
                    "Route: {} km, Beladung {} t, Verbrauch {} /100km",
                    analysis.route.distance_km,
                    analysis.route.load_t,
                    analysis.route.consumption_per_100km
                ));
                ui.add_space(5.0);

                egui::Grid::new(format!("opex_grid_{}", index))
                    .num_columns(4)
                    .spacing([10.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Parameter").strong());
                        ui.label(RichText::new("E-Lkw").strong());
                        ui.label(RichText::new("Diesel-Lkw").strong());
                        ui.label(RichText::new("Einheit").strong());
                        ui.end_row();

                        for row in analysis.costs.rows(service.params()) {
                            ui.label(&row.label);
                            ui.label(format_opt(row.electric));
                            ui.label(format_opt(row.diesel));
                            ui.label(&row.unit);
                            ui.end_row();
                        }
                    });

                ui.add_space(12.0);
            }
        });
    }
}
