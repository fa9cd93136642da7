//! Keyboard-Shortcuts für den Viewport.
//!
//! Verarbeitet globale Tastenkombinationen und mappt sie auf `AppIntent`s.
//! Hat ein Textfeld den Fokus, bleiben alle Shortcuts aus.

use crate::app::{AppIntent, MarkupTool};

/// Verarbeitet Keyboard-Shortcuts und gibt AppIntents zurück.
///
/// `drawing_in_progress` unterdrückt Escape: der Viewport bricht dann
/// zuerst die laufende Zeichengeste ab.
pub fn collect_keyboard_intents(
    ui: &egui::Ui,
    has_selection: bool,
    active_tool: MarkupTool,
    drawing_in_progress: bool,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    // Textfeld mit Fokus: Delete/Backspace usw. gehören dem Widget
    if ui.ctx().wants_keyboard_input() {
        return events;
    }

    let (key_del, key_backspace, key_escape, key_plus, key_minus) = ui.input(|i| {
        (
            i.key_pressed(egui::Key::Delete),
            i.key_pressed(egui::Key::Backspace),
            i.key_pressed(egui::Key::Escape),
            i.key_pressed(egui::Key::Plus),
            i.key_pressed(egui::Key::Minus),
        )
    });

    if (key_del || key_backspace) && has_selection {
        events.push(AppIntent::DeleteSelectedRequested);
    }

    if key_escape && !drawing_in_progress {
        if has_selection {
            events.push(AppIntent::ClearSelectionRequested);
        } else if active_tool != MarkupTool::Select {
            // Zurück zum Select-Werkzeug
            events.push(AppIntent::SetMarkupToolRequested {
                tool: MarkupTool::Select,
            });
        }
    }

    if key_plus {
        events.push(AppIntent::ZoomInRequested);
    }
    if key_minus {
        events.push(AppIntent::ZoomOutRequested);
    }

    // Ziffern 1-7: direkte Werkzeugwahl
    let tool_keys = [
        (egui::Key::Num1, MarkupTool::Select),
        (egui::Key::Num2, MarkupTool::Marker),
        (egui::Key::Num3, MarkupTool::Line),
        (egui::Key::Num4, MarkupTool::Arrow),
        (egui::Key::Num5, MarkupTool::Rectangle),
        (egui::Key::Num6, MarkupTool::Circle),
        (egui::Key::Num7, MarkupTool::Polygon),
    ];
    for (key, tool) in tool_keys {
        if ui.input(|i| i.key_pressed(key)) {
            events.push(AppIntent::SetMarkupToolRequested { tool });
        }
    }

    events
}
