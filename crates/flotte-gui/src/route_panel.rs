//! Route entry form and list

use eframe::egui::{self, Color32, RichText, Ui};

use flotte_app::app::FleetService;
use flotte_domain::model::Route;

/// Panel for registering and listing routes
pub struct RoutePanel {
    /// Selected vehicle for the new route
    selected_vehicle_id: Option<String>,
    /// New route form fields
    new_distance: String,
    new_load: String,
    new_consumption: String,
    new_shift_times: String,
    new_depot_idle: String,
    new_depot_location: String,
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl RoutePanel {
    pub fn new() -> Self {
        Self {
            selected_vehicle_id: None,
            new_distance: String::new(),
            new_load: String::new(),
            new_consumption: String::new(),
            new_shift_times: String::new(),
            new_depot_idle: String::new(),
            new_depot_location: String::new(),
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, service: &mut FleetService) {
        ui.heading("Routendaten");
        ui.add_space(8.0);

        let vehicles = service.vehicles();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if vehicles.is_empty() {
                ui.label(
                    RichText::new(
                        "Keine Fahrzeuge vorhanden. Bitte zuerst ein Fahrzeug hinzufügen.",
                    )
                    .color(Color32::YELLOW),
                );
            } else {
                self.render_add_form(ui, service, &vehicles);
            }

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

            self.render_route_list(ui, service);
        });
    }

    fn render_add_form(
        &mut self,
        ui: &mut Ui,
        service: &mut FleetService,
        vehicles: &[flotte_domain::model::Vehicle],
    ) {
        ui.label(RichText::new("Neue Route eingeben").strong());
        ui.add_space(5.0);

        // Drop the selection if the vehicle was deleted meanwhile
        if let Some(ref selected) = self.selected_vehicle_id {
            if !vehicles.iter().any(|v| &v.id == selected) {
                self.selected_vehicle_id = None;
            }
        }

        let selected_label = self
            .selected_vehicle_id
            .as_ref()
            .and_then(|id| vehicles.iter().find(|v| &v.id == id))
            .map(|v| v.name.clone())
            .unwrap_or_else(|| "Bitte wählen".to_string());

        egui::ComboBox::from_label("Fahrzeug")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for vehicle in vehicles {
                    ui.selectable_value(
                        &mut self.selected_vehicle_id,
                        Some(vehicle.id.clone()),
                        &vehicle.name,
                    );
                }
            });

        ui.add_space(5.0);

        egui::Grid::new("add_route_form")
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.label("Strecke [km]:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_distance)
                        .hint_text("z.B. 350")
                        .desired_width(100.0),
                );
                ui.end_row();

                ui.label("Beladung [t]:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_load)
                        .hint_text("z.B. 18")
                        .desired_width(100.0),
                );
                ui.end_row();

                ui.label("Verbrauch [kWh bzw. l / 100 km]:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_consumption)
                        .hint_text("z.B. 30")
                        .desired_width(100.0),
                );
                ui.end_row();

                ui.label("Schichtzeiten:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_shift_times)
                        .hint_text("z.B. 06:00-14:00")
                        .desired_width(200.0),
                );
                ui.end_row();

                ui.label("Standzeiten am Depot [h]:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_depot_idle)
                        .hint_text("optional")
                        .desired_width(100.0),
                );
                ui.end_row();

                ui.label("Depot Standort:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.new_depot_location)
                        .hint_text("optional")
                        .desired_width(200.0),
                );
                ui.end_row();
            });

        ui.add_space(8.0);

        let can_add = self.selected_vehicle_id.is_some();
        if ui
            .add_enabled(can_add, egui::Button::new("Routendaten speichern"))
            .clicked()
        {
            self.add_route(service);
        }
    }

    fn add_route(&mut self, service: &mut FleetService) {
        let vehicle_id = match self.selected_vehicle_id {
            Some(ref id) => id.clone(),
            None => {
                self.status_message = Some(("Bitte ein Fahrzeug wählen".to_string(), true));
                return;
            }
        };

        let numbers: Option<Vec<f64>> = [&self.new_distance, &self.new_load, &self.new_consumption]
            .iter()
            .map(|raw| {
                let trimmed = raw.trim().replace(',', ".");
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse().ok()
                }
            })
            .collect();
        let numbers = match numbers {
            Some(values) => values,
            None => {
                self.status_message =
                    Some(("Ungültige Zahl in den Routendaten".to_string(), true));
                return;
            }
        };

        let depot_idle = match self.new_depot_idle.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    self.status_message = Some(("Ungültige Zahl: Standzeiten".to_string(), true));
                    return;
                }
            },
        };

        let mut route = Route::new(vehicle_id, numbers[0], numbers[1], numbers[2]);
        if !self.new_shift_times.trim().is_empty() {
            route.shift_times = Some(self.new_shift_times.trim().to_string());
        }
        route.depot_idle_hours = depot_idle;
        if !self.new_depot_location.trim().is_empty() {
            route.depot_location = Some(self.new_depot_location.trim().to_string());
        }

        match service.register_route(route) {
            Ok(outcome) if outcome.persisted => {
                self.status_message =
                    Some(("Routendaten erfolgreich gespeichert".to_string(), false));
            }
            Ok(outcome) => {
                let message = outcome
                    .message
                    .unwrap_or_else(|| "Speichern fehlgeschlagen".to_string());
                self.status_message = Some((message, true));
            }
            Err(e) => {
                self.status_message = Some((format!("Route nicht gespeichert: {}", e), true));
                return;
            }
        }

        self.new_distance.clear();
        self.new_load.clear();
        self.new_consumption.clear();
        self.new_shift_times.clear();
        self.new_depot_idle.clear();
        self.new_depot_location.clear();
    }

    fn render_route_list(&mut self, ui: &mut Ui, service: &FleetService) {
        ui.label(RichText::new("Erfasste Routen").strong());
        ui.add_space(5.0);

        let routes = service.routes(None);

        if routes.is_empty() {
            ui.label(
                RichText::new("Keine Routen vorhanden")
                    .italics()
                    .color(Color32::GRAY),
            );
            return;
        }

        egui::Grid::new("route_list")
            .num_columns(5)
            .spacing([10.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label(RichText::new("Fahrzeug").strong());
                ui.label(RichText::new("Strecke [km]").strong());
                ui.label(RichText::new("Beladung [t]").strong());
                ui.label(RichText::new("Verbrauch").strong());
                ui.label(RichText::new("Depot").strong());
                ui.end_row();

                for route in &routes {
                    let name = service
                        .find_vehicle(&route.vehicle_id)
                        .map(|v| v.name)
                        .unwrap_or_else(|| route.vehicle_id.clone());
                    ui.label(name);
                    ui.label(format!("{:.1}", route.distance_km));
                    ui.label(format!("{:.1}", route.load_t));
                    ui.label(format!("{:.1}", route.consumption_per_100km));
                    ui.label(route.depot_location.as_deref().unwrap_or("-"));
                    ui.end_row();
                }
            });
    }
}
