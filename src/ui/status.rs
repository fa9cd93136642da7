//! Status-Bar am unteren Bildschirmrand.

use crate::app::{AppIntent, AppState};

/// Rendert die Status-Bar und gibt erzeugte Events zurück.
pub fn render_status_bar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!(
                "Center: {} | Zoom: {:.0}",
                state.scene.center().display(),
                state.scene.zoom()
            ));

            ui.separator();

            if state.overlays.is_empty() {
                ui.label("No annotations");
            } else {
                let counts: Vec<String> = state
                    .overlays
                    .counts_by_kind()
                    .into_iter()
                    .map(|(kind, n)| format!("{n} {}", kind.label()))
                    .collect();
                ui.label(counts.join(" | "));
            }

            ui.separator();
            ui.label(format!("Tool: {}", state.editor.active_tool.label()));

            if let Some(address) = &state.view.address_label {
                ui.separator();
                ui.label(address);
            }

            if let Some(message) = &state.ui.status_message {
                ui.separator();
                ui.label(egui::RichText::new(message).strong());
                if ui.small_button("✕").clicked() {
                    events.push(AppIntent::StatusDismissed);
                }
            }
        });
    });

    events
}
