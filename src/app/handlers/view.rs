//! Handler für Kamera, Kartentyp, Status und Optionen.

use crate::app::AppState;
use crate::core::surface::MapSurface;
use crate::core::LatLng;
use crate::providers::MapType;
use crate::shared::options::ZOOM_STEP;
use crate::shared::AnnotatorOptions;

pub fn zoom_in(state: &mut AppState) {
    let zoom = state.scene.zoom();
    state.scene.set_zoom(zoom + ZOOM_STEP);
}

pub fn zoom_out(state: &mut AppState) {
    let zoom = state.scene.zoom();
    state.scene.set_zoom(zoom - ZOOM_STEP);
}

pub fn set_map_type(state: &mut AppState, map_type: MapType) {
    state.view.map_type = map_type;
    log::info!("Kartentyp: {}", map_type.label());
}

pub fn set_viewport_size(state: &mut AppState, size: [f32; 2]) {
    state.scene.set_viewport_size(size);
}

pub fn pan(state: &mut AppState, center: LatLng) {
    state.scene.pan_to(center);
}

pub fn dismiss_status(state: &mut AppState) {
    state.ui.status_message = None;
}

/// Übernimmt geänderte Optionen sofort und persistiert sie.
///
/// Der aktive Stil und die Hervorhebungsfarbe wirken direkt auf der
/// Karte; ein Speicherfehler wird gemeldet, blockiert aber nichts.
pub fn apply_options(state: &mut AppState, options: AnnotatorOptions) {
    state
        .overlays
        .set_highlight_stroke(&mut state.scene, options.highlight_stroke_color);
    state
        .overlays
        .set_active_style(&mut state.scene, options.default_style());
    state.options = options;

    let path = AnnotatorOptions::config_path();
    if let Err(e) = state.options.save_to_file(&path) {
        log::warn!("Optionen konnten nicht gespeichert werden: {e:#}");
        state.set_status("Options could not be saved");
    } else {
        log::info!("Optionen gespeichert: {}", path.display());
    }
}
