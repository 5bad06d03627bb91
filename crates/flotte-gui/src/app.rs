//! Main application structure with tab navigation

use eframe::egui;

use flotte_app::app::FleetService;
use flotte_app::config::Config;
use flotte_app::repository::open_fleet_store;
use flotte_infra::MemoryFleetStore;

use crate::analysis_panel::AnalysisPanel;
use crate::route_panel::RoutePanel;
use crate::settings_panel::SettingsPanel;
use crate::vehicle_panel::VehiclePanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Vehicles,
    Routes,
    Analysis,
    Settings,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Vehicles => "Fahrzeuge",
            Tab::Routes => "Routen",
            Tab::Analysis => "Auswertung",
            Tab::Settings => "Einstellungen",
        }
    }
}

/// Main application state
pub struct FlottenApp {
    /// Currently selected tab
    current_tab: Tab,
    /// Vehicle panel state
    vehicle_panel: VehiclePanel,
    /// Route panel state
    route_panel: RoutePanel,
    /// Analysis panel state
    analysis_panel: AnalysisPanel,
    /// Settings panel state
    settings_panel: SettingsPanel,
    /// Application configuration
    config: Config,
    /// Fleet use cases over the configured store
    service: FleetService,
}

impl FlottenApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Faster tooltips and animations for form-heavy use
        let mut style = (*cc.egui_ctx.style()).clone();
        style.interaction.tooltip_delay = 0.5;
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_default();

        // Fall back to the session store if the configured one cannot open
        let store = open_fleet_store(&config).unwrap_or_else(|e| {
            log::warn!("configured store not available, using session store: {}", e);
            Box::new(MemoryFleetStore::new())
        });
        let service = FleetService::new(store, config.costs.clone());

        let settings_panel = SettingsPanel::new(&config);

        Self {
            current_tab: Tab::default(),
            vehicle_panel: VehiclePanel::new(),
            route_panel: RoutePanel::new(),
            analysis_panel: AnalysisPanel::new(),
            settings_panel,
            config,
            service,
        }
    }

    /// Render the tab bar
    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            for tab in [Tab::Vehicles, Tab::Routes, Tab::Analysis, Tab::Settings] {
                let selected = self.current_tab == tab;
                if ui.selectable_label(selected, tab.label()).clicked() {
                    self.current_tab = tab;
                }
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for FlottenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Vehicles => {
                self.vehicle_panel.ui(ui, &mut self.service);
            }
            Tab::Routes => {
                self.route_panel.ui(ui, &mut self.service);
            }
            Tab::Analysis => {
                self.analysis_panel.ui(ui, &self.service);
            }
            Tab::Settings => {
                self.settings_panel.ui(ui, &mut self.config, &mut self.service);
            }
        });
    }
}
