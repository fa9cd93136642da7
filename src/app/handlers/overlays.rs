//! Handler für Markup-Werkzeuge, Overlay-Lebenszyklus und Selektion.

use crate::app::state::MarkupTool;
use crate::app::AppState;
use crate::core::surface::{GeometryKind, MapSurface, OverlayGeometry, OverlayHandle, OverlayStyle};
use crate::providers::ProviderRequest;

/// Aktiviert ein Markup-Werkzeug und setzt den nativen Zeichenmodus.
pub fn set_markup_tool(state: &mut AppState, tool: MarkupTool) {
    state.editor.active_tool = tool;
    state.scene.set_drawing_mode(tool.drawing_mode());
    log::info!("Markup-Werkzeug: {}", tool.label());
}

/// Nimmt eine abgeschlossene Zeichengeste als Overlay in den Store auf.
///
/// Marker bekommen sofort ein Koordinaten-Label; die Adresse folgt
/// asynchron per Reverse-Geocoding. One-Shot-Werkzeuge fallen danach
/// auf das Select-Werkzeug zurück.
pub fn complete_drawing(state: &mut AppState, geometry: OverlayGeometry) {
    let kind = geometry.kind();
    let anchor = geometry.anchor();

    let style = *state.overlays.active_style();
    let handle = state.scene.add_overlay(geometry, &style);
    let tool = state.editor.active_tool;
    state
        .overlays
        .on_overlay_completed(&mut state.scene, handle, kind, tool);

    if kind == GeometryKind::Marker {
        state.view.address_label = Some(anchor.display());
        state.resolver.reverse_seq += 1;
        state.port.submit(ProviderRequest::ReverseGeocode {
            seq: state.resolver.reverse_seq,
            coordinate: anchor,
        });
    }

    if tool.one_shot() {
        set_markup_tool(state, MarkupTool::Select);
    }
}

/// Selektiert das Overlay hinter einem angeklickten Handle.
pub fn select_by_handle(state: &mut AppState, handle: OverlayHandle) {
    match state.overlays.id_for_handle(handle) {
        Some(id) => state.overlays.select(&mut state.scene, id),
        None => log::debug!("Klick auf unbekanntem Handle {handle:?} ignoriert"),
    }
}

/// Setzt den geteilten aktiven Stil (gilt für neue Overlays und das
/// aktuell selektierte).
pub fn set_active_style(state: &mut AppState, style: OverlayStyle) {
    state.overlays.set_active_style(&mut state.scene, style);
}

/// Löscht das selektierte Overlay (No-Op ohne Selektion).
pub fn delete_selected(state: &mut AppState) {
    state.overlays.delete_selected(&mut state.scene);
}

/// Hebt die Selektion auf.
pub fn clear_selection(state: &mut AppState) {
    state.overlays.clear_selection(&mut state.scene);
}

/// Entfernt alle Markup-Overlays.
pub fn clear_all(state: &mut AppState) {
    state.overlays.clear_all(&mut state.scene);
}
