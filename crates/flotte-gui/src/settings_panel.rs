//! Settings panel for backend and cost parameters

use eframe::egui::{self, Color32, RichText, Ui};

use flotte_app::app::FleetService;
use flotte_app::config::Config;
use flotte_domain::service::CostParameters;
use flotte_types::StorageBackend;

/// Panel editing the configuration
pub struct SettingsPanel {
    backend: StorageBackend,
    diesel_price: String,
    depot_price: String,
    public_price: String,
    depot_share: String,
    toll_rate: String,
    tolled_share: String,
    labour_rate: String,
    highway_speed: String,
    maintenance_reduction: String,
    default_mileage: String,
    /// Status message
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl SettingsPanel {
    pub fn new(config: &Config) -> Self {
        let costs = &config.costs;
        Self {
            backend: config.backend,
            diesel_price: costs.diesel_price_eur_per_l.to_string(),
            depot_price: costs.depot_electricity_eur_per_kwh.to_string(),
            public_price: costs.public_electricity_eur_per_kwh.to_string(),
            depot_share: costs.depot_charging_share.to_string(),
            toll_rate: costs.toll_eur_per_km.to_string(),
            tolled_share: costs.tolled_distance_share.to_string(),
            labour_rate: costs.labour_eur_per_h.to_string(),
            highway_speed: costs.average_highway_speed_kmh.to_string(),
            maintenance_reduction: costs.electric_maintenance_reduction.to_string(),
            default_mileage: costs.default_annual_mileage_km.to_string(),
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &mut Config, service: &mut FleetService) {
        ui.heading("Einstellungen");
        ui.add_space(8.0);

        ui.label(RichText::new("Speicher").strong());
        ui.add_space(5.0);

        egui::ComboBox::from_label("Backend")
            .selected_text(self.backend.to_string())
            .show_ui(ui, |ui| {
                for backend in [
                    StorageBackend::Memory,
                    StorageBackend::Json,
                    StorageBackend::Sqlite,
                ] {
                    ui.selectable_value(&mut self.backend, backend, backend.to_string());
                }
            });
        if self.backend != config.backend {
            ui.label(
                RichText::new("Wird nach einem Neustart wirksam").color(Color32::YELLOW),
            );
        }

        ui.add_space(12.0);
        ui.label(RichText::new("Kostenparameter").strong());
        ui.add_space(5.0);

        egui::Grid::new("cost_parameters")
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                let fields = [
                    ("Dieselpreis [€/l]:", &mut self.diesel_price),
                    ("Strompreis Depot-Laden [€/kWh]:", &mut self.depot_price),
                    ("Strompreis öffentlich [€/kWh]:", &mut self.public_price),
                    ("Anteil Depot-Ladevorgang [0..1]:", &mut self.depot_share),
                    ("Mautsatz [€/km]:", &mut self.toll_rate),
                    ("Mautpflichtiger Streckenanteil [0..1]:", &mut self.tolled_share),
                    ("Fahrerlohn [€/h]:", &mut self.labour_rate),
                    ("Durchschnittsgeschwindigkeit [km/h]:", &mut self.highway_speed),
                    ("Wartungs-Reduktion E-Lkw [0..1]:", &mut self.maintenance_reduction),
                    ("Standard-Fahrleistung [km/Jahr]:", &mut self.default_mileage),
                ];
                for (label, field) in fields {
                    ui.label(label);
                    ui.add(egui::TextEdit::singleline(field).desired_width(100.0));
                    ui.end_row();
                }
            });

        ui.add_space(8.0);

        if ui.button("Speichern").clicked() {
            self.save(config, service);
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
    }

    fn save(&mut self, config: &mut Config, service: &mut FleetService) {
        let parsed = [
            &self.diesel_price,
            &self.depot_price,
            &self.public_price,
            &self.depot_share,
            &self.toll_rate,
            &self.tolled_share,
            &self.labour_rate,
            &self.highway_speed,
            &self.maintenance_reduction,
            &self.default_mileage,
        ]
        .iter()
        .map(|raw| raw.trim().replace(',', ".").parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>();

        let values = match parsed {
            Some(values) => values,
            None => {
                self.status_message =
                    Some(("Ungültige Zahl in den Kostenparametern".to_string(), true));
                return;
            }
        };

        let params = CostParameters {
            diesel_price_eur_per_l: values[0],
            depot_electricity_eur_per_kwh: values[1],
            public_electricity_eur_per_kwh: values[2],
            depot_charging_share: values[3],
            toll_eur_per_km: values[4],
            tolled_distance_share: values[5],
            labour_eur_per_h: values[6],
            average_highway_speed_kmh: values[7],
            electric_maintenance_reduction: values[8],
            default_annual_mileage_km: values[9],
        };

        if let Err(e) = params.validate() {
            self.status_message = Some((e.to_string(), true));
            return;
        }

        config.backend = self.backend;
        config.costs = params.clone();
        service.set_params(params);

        match config.save() {
            Ok(()) => {
                self.status_message = Some(("Einstellungen gespeichert".to_string(), false));
            }
            Err(e) => {
                self.status_message =
                    Some((format!("Speichern fehlgeschlagen: {}", e), true));
            }
        }
    }
}
