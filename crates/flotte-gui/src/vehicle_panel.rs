//! Vehicle entry form and list

use eframe::egui::{self, Color32, RichText, Ui};

use flotte_app::app::FleetService;
use flotte_domain::model::VehicleData;

/// Panel for registering and listing fleet vehicles
pub struct VehiclePanel {
    /// New vehicle form fields
    new_name: String,
    new_gross_weight: String,
    new_max_payload: String,
    new_purchase_price: String,
    new_residual_value: String,
    new_lifetime: String,
    new_insurance: String,
    new_tax: String,
    new_maintenance: String,
    new_toll: String,
    new_annual_mileage: String,
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

fn parse_or_zero(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().replace(',', ".");
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse().ok()
}

impl VehiclePanel {
    pub fn new() -> Self {
        Self {
            new_name: String::new(),
            new_gross_weight: String::new(),
            new_max_payload: String::new(),
            new_purchase_price: String::new(),
            new_residual_value: String::new(),
            new_lifetime: String::new(),
            new_insurance: String::new(),
            new_tax: String::new(),
            new_maintenance: String::new(),
            new_toll: String::new(),
            new_annual_mileage: String::new(),
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, service: &mut FleetService) {
        ui.heading("Fahrzeugdaten");
        ui.add_space(8.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.render_add_form(ui, service);

            if let Some((ref message, is_error)) = self.status_message {
                ui.add_space(5.0);
                let color = if is_error {
                    Color32::LIGHT_RED
                } else {
                    Color32::LIGHT_GREEN
                };
                ui.label(RichText::new(message).color(color));
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            self.render_vehicle_list(ui, service);
        });
    }

    fn render_add_form(&mut self, ui: &mut Ui, service: &mut FleetService) {
        ui.label(RichText::new("Neues Fahrzeug eingeben").strong());
        ui.add_space(5.0);

        egui::Grid::new("add_vehicle_form")
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.label("Fahrzeug Name:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_name)
                        .hint_text("z.B. MAN TGX 18.470")
                        .desired_width(200.0),
                );
                ui.end_row();

                let number_fields = [
                    ("Zulässiges Gesamtgewicht [t]:", &mut self.new_gross_weight),
                    ("Maximale Zuladung [t]:", &mut self.new_max_payload),
                    ("Kaufpreis [EUR]:", &mut self.new_purchase_price),
                    ("Prognostizierter Restwert [EUR]:", &mut self.new_residual_value),
                    ("Geplante Laufzeit [km oder Jahre]:", &mut self.new_lifetime),
                    ("Versicherungskosten [EUR/Jahr]:", &mut self.new_insurance),
                    ("Kraftfahrzeugsteuer [EUR/Jahr]:", &mut self.new_tax),
                    ("Wartungskosten [EUR/Jahr]:", &mut self.new_maintenance),
                    ("Mautkosten [EUR/Jahr]:", &mut self.new_toll),
                ];
                for (label, field) in number_fields {
                    ui.label(label);
                    ui.add(
                        egui::TextEdit::singleline(field)
                            .hint_text("0")
                            .desired_width(100.0),
                    );
                    ui.end_row();
                }

                ui.label("Jährliche Fahrleistung [km]:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_annual_mileage)
                        .hint_text("Standard: 100000")
                        .desired_width(100.0),
                );
                ui.end_row();
            });

        ui.add_space(8.0);

        let can_add = !self.new_name.trim().is_empty();
        if ui
            .add_enabled(can_add, egui::Button::new("Fahrzeugdaten speichern"))
            .clicked()
        {
            self.add_vehicle(service);
        }
    }

    fn add_vehicle(&mut self, service: &mut FleetService) {
        let parsed = [
            ("Zulässiges Gesamtgewicht", parse_or_zero(&self.new_gross_weight)),
            ("Maximale Zuladung", parse_or_zero(&self.new_max_payload)),
            ("Kaufpreis", parse_or_zero(&self.new_purchase_price)),
            ("Prognostizierter Restwert", parse_or_zero(&self.new_residual_value)),
            ("Geplante Laufzeit", parse_or_zero(&self.new_lifetime)),
            ("Versicherungskosten", parse_or_zero(&self.new_insurance)),
            ("Kraftfahrzeugsteuer", parse_or_zero(&self.new_tax)),
            ("Wartungskosten", parse_or_zero(&self.new_maintenance)),
            ("Mautkosten", parse_or_zero(&self.new_toll)),
        ];
        for (label, value) in &parsed {
            if value.is_none() {
                self.status_message = Some((format!("Ungültige Zahl: {label}"), true));
                return;
            }
        }
        let values: Vec<f64> = parsed.iter().map(|(_, v)| v.unwrap_or(0.0)).collect();

        let annual_mileage = match self.new_annual_mileage.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(v) if v > 0.0 => Some(v),
                _ => {
                    self.status_message =
                        Some(("Ungültige Zahl: Jährliche Fahrleistung".to_string(), true));
                    return;
                }
            },
        };

        let outcome = service.register_vehicle(VehicleData {
            name: self.new_name.trim().to_string(),
            gross_weight_t: values[0],
            max_payload_t: values[1],
            purchase_price_eur: values[2],
            residual_value_eur: values[3],
            planned_lifetime: values[4],
            insurance_cost_eur: values[5],
            vehicle_tax_eur: values[6],
            maintenance_cost_eur: values[7],
            toll_cost_eur: values[8],
            annual_mileage_km: annual_mileage,
        });

        if outcome.persisted {
            self.status_message =
                Some(("Fahrzeugdaten erfolgreich gespeichert".to_string(), false));
        } else {
            // Kept in the session; the durable write failed
            let message = outcome
                .message
                .unwrap_or_else(|| "Speichern fehlgeschlagen".to_string());
            self.status_message = Some((message, true));
        }

        self.new_name.clear();
        self.new_gross_weight.clear();
        self.new_max_payload.clear();
        self.new_purchase_price.clear();
        self.new_residual_value.clear();
        self.new_lifetime.clear();
        self.new_insurance.clear();
        self.new_tax.clear();
        self.new_maintenance.clear();
        self.new_toll.clear();
        self.new_annual_mileage.clear();
    }

    fn render_vehicle_list(&mut self, ui: &mut Ui, service: &mut FleetService) {
        ui.label(RichText::new("Registrierte Fahrzeuge").strong());
        ui.add_space(5.0);

        let vehicles = service.vehicles();

        if vehicles.is_empty() {
            ui.label(
                RichText::new("Keine Fahrzeuge vorhanden")
                    .italics()
                    .color(Color32::GRAY),
            );
            return;
        }

        ui.label(format!("{} Fahrzeuge registriert", vehicles.len()));
        ui.add_space(5.0);

        // Collect the id to delete to avoid borrow issues
        let mut to_delete: Option<String> = None;

        egui::Grid::new("vehicle_list")
            .num_columns(6)
            .spacing([10.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label(RichText::new("Name").strong());
                ui.label(RichText::new("zGG [t]").strong());
                ui.label(RichText::new("Zuladung [t]").strong());
                ui.label(RichText::new("Wartung [EUR/a]").strong());
                ui.label(RichText::new("ID").strong());
                ui.label("");
                ui.end_row();

                for vehicle in &vehicles {
                    ui.label(&vehicle.name);
                    ui.label(format!("{:.1}", vehicle.gross_weight_t));
                    ui.label(format!("{:.1}", vehicle.max_payload_t));
                    ui.label(format!("{:.2}", vehicle.maintenance_cost_eur));
                    let short_id: String = vehicle.id.chars().take(8).collect();
                    ui.label(RichText::new(short_id).color(Color32::GRAY));
                    if ui.small_button("✕").clicked() {
                        to_delete = Some(vehicle.id.clone());
                    }
                    ui.end_row();
                }
            });

        if let Some(id) = to_delete {
            match service.remove_vehicle(&id) {
                Ok(true) => {
                    self.status_message = Some(("Fahrzeug gelöscht".to_string(), false));
                }
                Ok(false) => {
                    self.status_message = Some(("Fahrzeug nicht gefunden".to_string(), true));
                }
                Err(e) => {
                    self.status_message = Some((format!("Löschen fehlgeschlagen: {}", e), true));
                }
            }
        }
    }
}
