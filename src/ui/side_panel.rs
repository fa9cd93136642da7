//! Seitenpanel: Adress-Suche, Routenplaner und Export-Abschnitt.
//!
//! Textfelder werden pro Frame mit dem Zustand abgeglichen; jede
//! Änderung geht als Intent zurück, das Panel selbst mutiert nichts.

use crate::app::{AppIntent, AppState};
use crate::providers::TravelMode;

use super::dialogs;

/// Rendert das Seitenpanel und gibt erzeugte Events zurück.
pub fn render_side_panel(ctx: &egui::Context, state: &AppState, now_ms: f64) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::SidePanel::left("side_panel")
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            address_search(ui, state, now_ms, &mut events);
            ui.separator();
            route_planner(ui, state, &mut events);
            ui.separator();
            export_section(ui, state, &mut events);
        });

    events
}

fn address_search(ui: &mut egui::Ui, state: &AppState, now_ms: f64, events: &mut Vec<AppIntent>) {
    ui.heading("Search");

    let mut input = state.resolver.input.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut input)
            .hint_text("Address or place")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        events.push(AppIntent::AddressInputEdited {
            text: input.clone(),
            now_ms,
        });
    }
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        events.push(AppIntent::AddressSubmitted { text: input });
    }

    // Vorschlagsliste unter dem Feld, Reihenfolge wie vom Provider
    for (index, suggestion) in state.resolver.suggestions.iter().enumerate() {
        if ui
            .selectable_label(false, &suggestion.display)
            .clicked()
        {
            events.push(AppIntent::SuggestionAccepted { index });
        }
    }
}

fn route_planner(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    ui.heading("Route");

    let mut origin = state.route.origin_input.clone();
    if ui
        .add(
            egui::TextEdit::singleline(&mut origin)
                .hint_text("Origin")
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        events.push(AppIntent::RouteOriginEdited { text: origin });
    }

    let mut destination = state.route.destination_input.clone();
    if ui
        .add(
            egui::TextEdit::singleline(&mut destination)
                .hint_text("Destination")
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        events.push(AppIntent::RouteDestinationEdited { text: destination });
    }

    let mut mode = state.route.travel_mode;
    egui::ComboBox::from_id_salt("travel_mode")
        .selected_text(mode.label())
        .show_ui(ui, |ui| {
            for candidate in TravelMode::ALL {
                ui.selectable_value(&mut mode, candidate, candidate.label());
            }
        });
    if mode != state.route.travel_mode {
        events.push(AppIntent::TravelModeChanged { mode });
    }

    ui.horizontal(|ui| {
        if ui.button("Calculate").clicked() {
            events.push(AppIntent::ComputeRouteRequested);
        }
        if ui.button("⇅ Swap").clicked() {
            events.push(AppIntent::SwapEndpointsRequested);
        }
    });
    ui.horizontal(|ui| {
        if ui.button("My location").clicked() {
            events.push(AppIntent::UseCurrentLocationRequested);
        }
        let has_route = state.route.computed.is_some()
            || !state.route.origin_input.is_empty()
            || !state.route.destination_input.is_empty();
        if ui.add_enabled(has_route, egui::Button::new("Clear")).clicked() {
            events.push(AppIntent::ClearRouteRequested);
        }
    });

    if state.route.pending.is_some() {
        ui.label("Calculating…");
    }

    if let Some(route) = &state.route.computed {
        ui.add_space(4.0);
        ui.label(format!("{} → {}", route.origin, route.destination));
        ui.label(format!(
            "{} · {} ({})",
            route.distance,
            route.duration,
            route.travel_mode.label()
        ));
        ui.hyperlink_to("Open in Google Maps", &route.provider_deep_link);
    }
}

fn export_section(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppIntent>) {
    let Some(artifact) = &state.export.artifact else {
        return;
    };

    ui.heading("Export");
    ui.label(&artifact.suggested_filename);
    ui.horizontal(|ui| {
        if ui.button("Save…").clicked() {
            if let Some(path) = dialogs::pick_export_save_path(&artifact.suggested_filename) {
                events.push(AppIntent::ExportSavePathSelected { path });
            }
        }
        if ui.button("Discard").clicked() {
            events.push(AppIntent::ExportDiscarded);
        }
    });
}
