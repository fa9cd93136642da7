//! SitePlan Map Annotator.
//!
//! Interaktives Annotations- und Routing-Widget auf einer Web-Mercator-
//! Karte: Markup-Overlays zeichnen und stylen, Adressen suchen, Routen
//! berechnen und die Sicht als Dokument exportieren.

use eframe::egui;
use siteplan_map_annotator::providers::google::GoogleProviders;
use siteplan_map_annotator::providers::offline::OfflineProviders;
use siteplan_map_annotator::providers::{ProviderSet, ThreadedPort};
use siteplan_map_annotator::{ui, AnnotatorOptions, AppController, AppIntent, AppState};

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!(
            "SitePlan Map Annotator v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("SitePlan Map Annotator"),
            ..Default::default()
        };

        eframe::run_native(
            "SitePlan Map Annotator",
            options,
            Box::new(|_cc| Ok(Box::new(AnnotatorApp::new()))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct AnnotatorApp {
    state: AppState,
    controller: AppController,
    viewport_input: ui::ViewportInput,
    options_dialog_open: bool,
    options_draft: AnnotatorOptions,
}

impl AnnotatorApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = AnnotatorOptions::config_path();
        let annotator_options = AnnotatorOptions::load_from_file(&config_path);

        // Mit API-Schlüssel gegen den Provider, sonst Offline-Demo
        let providers: ProviderSet = match annotator_options.effective_api_key() {
            Some(api_key) => {
                log::info!("Google-Provider aktiv");
                ProviderSet {
                    geocoding: Box::new(GoogleProviders::new(api_key.clone())),
                    routing: Box::new(GoogleProviders::new(api_key.clone())),
                    geolocation: Box::new(GoogleProviders::new(api_key.clone())),
                    snapshot: Box::new(GoogleProviders::new(api_key)),
                }
            }
            None => {
                log::info!("Kein API-Schlüssel gesetzt, Offline-Demo aktiv");
                OfflineProviders::provider_set()
            }
        };
        let port = ThreadedPort::spawn(providers);

        let options_draft = annotator_options.clone();
        Self {
            state: AppState::with_options(Box::new(port), annotator_options),
            controller: AppController::new(),
            viewport_input: ui::ViewportInput::new(),
            options_dialog_open: false,
            options_draft,
        }
    }

    fn collect_ui_events(&mut self, ctx: &egui::Context, now_ms: f64) -> Vec<AppIntent> {
        let mut events = Vec::new();

        events.extend(ui::render_status_bar(ctx, &self.state));
        events.extend(self.render_toolbar_with_options(ctx));
        events.extend(ui::render_side_panel(ctx, &self.state, now_ms));
        events.extend(ui::show_options_dialog(
            ctx,
            &mut self.options_dialog_open,
            &mut self.options_draft,
        ));
        // Viewport zuletzt: CentralPanel füllt den Rest
        events.extend(ui::render_viewport(
            ctx,
            &self.state,
            &mut self.viewport_input,
        ));

        events
    }

    fn render_toolbar_with_options(&mut self, ctx: &egui::Context) -> Vec<AppIntent> {
        let events = ui::render_toolbar(ctx, &self.state);

        egui::TopBottomPanel::top("options_row")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.small_button("Options…").clicked() {
                        self.options_draft = self.state.options.clone();
                        self.options_dialog_open = true;
                    }
                });
            });

        events
    }

    fn process_events(&mut self, events: Vec<AppIntent>) {
        for intent in events {
            if let Err(e) = self.controller.handle_intent(&mut self.state, intent) {
                log::error!("Intent-Verarbeitung fehlgeschlagen: {e:#}");
                self.state.set_status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;

        // Provider-Antworten als Intents einspeisen
        let mut events: Vec<AppIntent> = self
            .state
            .port
            .poll()
            .into_iter()
            .map(|response| AppIntent::ProviderCompleted { response })
            .collect();

        // Debounce-Uhr tickt mit jedem Frame
        events.push(AppIntent::TickElapsed { now_ms });
        events.extend(self.collect_ui_events(ctx, now_ms));

        self.process_events(events);

        // Laufender Debounce oder offene Anfragen brauchen weitere Frames
        if self.state.resolver.pending_suggest.is_some() || self.state.route.pending.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
