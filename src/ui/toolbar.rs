//! Toolbar für Werkzeugauswahl, Stil, Zoom und Kartentyp.

use crate::app::{AppIntent, AppState, MarkupTool};
use crate::providers::MapType;

/// Rendert die Toolbar und gibt erzeugte Events zurück.
pub fn render_toolbar(ctx: &egui::Context, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let active = state.editor.active_tool;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Tool:");
            ui.separator();

            for (index, tool) in MarkupTool::ALL.into_iter().enumerate() {
                let label = format!("{} ({})", tool.label(), index + 1);
                if ui
                    .add(egui::Button::new(label).selected(active == tool))
                    .clicked()
                {
                    events.push(AppIntent::SetMarkupToolRequested { tool });
                }
            }

            ui.separator();
            events.extend(style_controls(ui, state));

            ui.separator();
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                events.push(AppIntent::ZoomOutRequested);
            }
            ui.label(format!("{:.0}", state.scene.zoom()));
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                events.push(AppIntent::ZoomInRequested);
            }

            ui.separator();
            let mut map_type = state.view.map_type;
            egui::ComboBox::from_id_salt("map_type")
                .selected_text(map_type.label())
                .show_ui(ui, |ui| {
                    for candidate in MapType::ALL {
                        ui.selectable_value(&mut map_type, candidate, candidate.label());
                    }
                });
            if map_type != state.view.map_type {
                events.push(AppIntent::MapTypeChanged { map_type });
            }

            ui.separator();
            if ui
                .add_enabled(!state.overlays.is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                events.push(AppIntent::ClearAllOverlaysRequested);
            }

            if ui.button("Export…").clicked() {
                events.push(AppIntent::ExportRequested);
            }
        });
    });

    events
}

/// Stil-Regler: Strich- und Füllfarbe, Strichstärke.
///
/// Änderungen gelten für neue Overlays und das aktuell selektierte.
fn style_controls(ui: &mut egui::Ui, state: &AppState) -> Vec<AppIntent> {
    let mut events = Vec::new();
    let current = *state.overlays.active_style();
    let mut style = current;

    ui.label("Stroke:");
    let mut stroke = style.stroke_color;
    if ui.color_edit_button_rgba_unmultiplied(&mut stroke).changed() {
        style.stroke_color = stroke;
    }

    ui.label("Fill:");
    let mut fill = style.fill_color;
    if ui.color_edit_button_rgba_unmultiplied(&mut fill).changed() {
        style.fill_color = fill;
    }

    ui.add(
        egui::DragValue::new(&mut style.stroke_weight_px)
            .range(0.5..=12.0)
            .speed(0.1)
            .suffix(" px"),
    );

    if style != current {
        events.push(AppIntent::ActiveStyleChanged { style });
    }

    events
}
