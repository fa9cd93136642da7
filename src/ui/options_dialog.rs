//! Optionen-Dialog: bearbeitet einen Entwurf, Apply übernimmt ihn.

use crate::app::AppIntent;
use crate::shared::AnnotatorOptions;

/// Zeigt den Optionen-Dialog. Der Entwurf lebt beim Aufrufer; erst
/// "Apply" erzeugt den Intent mit den neuen Optionen.
pub fn show_options_dialog(
    ctx: &egui::Context,
    open: &mut bool,
    draft: &mut AnnotatorOptions,
) -> Vec<AppIntent> {
    let mut events = Vec::new();
    if !*open {
        return events;
    }

    let mut keep_open = true;
    egui::Window::new("Options")
        .open(&mut keep_open)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("options_grid").num_columns(2).show(ui, |ui| {
                ui.label("Stroke color");
                ui.color_edit_button_rgba_unmultiplied(&mut draft.stroke_color);
                ui.end_row();

                ui.label("Fill color");
                ui.color_edit_button_rgba_unmultiplied(&mut draft.fill_color);
                ui.end_row();

                ui.label("Stroke weight");
                ui.add(
                    egui::DragValue::new(&mut draft.stroke_weight_px)
                        .range(0.5..=12.0)
                        .speed(0.1)
                        .suffix(" px"),
                );
                ui.end_row();

                ui.label("Highlight color");
                ui.color_edit_button_rgba_unmultiplied(&mut draft.highlight_stroke_color);
                ui.end_row();

                ui.label("Route color");
                ui.color_edit_button_rgba_unmultiplied(&mut draft.route_stroke_color);
                ui.end_row();

                ui.label("Suggest debounce");
                ui.add(
                    egui::DragValue::new(&mut draft.suggest_debounce_ms)
                        .range(50..=2000)
                        .suffix(" ms"),
                );
                ui.end_row();

                ui.label("Suggest min. length");
                ui.add(egui::DragValue::new(&mut draft.suggest_min_len).range(1..=10));
                ui.end_row();

                ui.label("Max. suggestions");
                ui.add(egui::DragValue::new(&mut draft.suggest_max).range(1..=20));
                ui.end_row();
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    events.push(AppIntent::OptionsChanged {
                        options: draft.clone(),
                    });
                }
                if ui.button("Reset").clicked() {
                    *draft = AnnotatorOptions::default();
                }
            });
        });

    *open = keep_open;
    events
}
