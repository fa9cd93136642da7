//! Integrationstests für den Overlay-Lebenszyklus:
//! - One-Shot-Verhalten des Marker-Werkzeugs
//! - Selektion, Restyling und Löschen
//! - Listener-Buchführung auf der Kartenoberfläche

use siteplan_map_annotator::providers::offline::OfflineProviders;
use siteplan_map_annotator::providers::ImmediatePort;
use siteplan_map_annotator::{
    AppController, AppIntent, AppState, DrawingMode, LatLng, LatLngBounds, MapSurface, MarkupTool,
    OverlayGeometry, OverlayStyle,
};

fn new_state() -> AppState {
    AppState::new(Box::new(ImmediatePort::new(OfflineProviders::provider_set())))
}

/// Speist alle wartenden Provider-Antworten als Intents ein.
fn pump(controller: &mut AppController, state: &mut AppState) {
    loop {
        let responses = state.port.poll();
        if responses.is_empty() {
            return;
        }
        for response in responses {
            controller
                .handle_intent(state, AppIntent::ProviderCompleted { response })
                .expect("Provider-Antwort darf nicht fehlschlagen");
        }
    }
}

fn draw(controller: &mut AppController, state: &mut AppState, tool: MarkupTool, geometry: OverlayGeometry) {
    controller
        .handle_intent(state, AppIntent::SetMarkupToolRequested { tool })
        .unwrap();
    controller
        .handle_intent(state, AppIntent::OverlayDrawingCompleted { geometry })
        .unwrap();
}

fn sample_rect(offset: f64) -> OverlayGeometry {
    OverlayGeometry::Rectangle {
        bounds: LatLngBounds {
            south: 47.0 + offset,
            west: 8.0 + offset,
            north: 47.1 + offset,
            east: 8.1 + offset,
        },
    }
}

// ─── Werkzeugtabelle ─────────────────────────────────────────────────────────

#[test]
fn test_marker_werkzeug_faellt_nach_einem_pin_auf_select_zurueck() {
    let mut controller = AppController::new();
    let mut state = new_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetMarkupToolRequested {
                tool: MarkupTool::Marker,
            },
        )
        .unwrap();
    assert_eq!(state.scene.drawing_mode(), Some(DrawingMode::Marker));

    controller
        .handle_intent(
            &mut state,
            AppIntent::OverlayDrawingCompleted {
                geometry: OverlayGeometry::Marker {
                    position: LatLng::new(47.3675, 8.5392),
                    label: None,
                },
            },
        )
        .unwrap();

    assert_eq!(state.editor.active_tool, MarkupTool::Select);
    assert_eq!(state.scene.drawing_mode(), None);
    assert_eq!(state.overlays.len(), 1);
}

#[test]
fn test_linien_werkzeug_bleibt_nach_abschluss_aktiv() {
    let mut controller = AppController::new();
    let mut state = new_state();

    draw(
        &mut controller,
        &mut state,
        MarkupTool::Line,
        OverlayGeometry::Polyline {
            path: vec![LatLng::new(47.0, 8.0), LatLng::new(47.1, 8.1)],
        },
    );

    assert_eq!(state.editor.active_tool, MarkupTool::Line);
    assert_eq!(state.scene.drawing_mode(), Some(DrawingMode::Polyline));
    assert_eq!(state.overlays.len(), 1);
}

#[test]
fn test_pfeil_werkzeug_markiert_polyline_als_arrow() {
    let mut controller = AppController::new();
    let mut state = new_state();

    draw(
        &mut controller,
        &mut state,
        MarkupTool::Arrow,
        OverlayGeometry::Polyline {
            path: vec![LatLng::new(47.0, 8.0), LatLng::new(47.1, 8.1)],
        },
    );
    draw(
        &mut controller,
        &mut state,
        MarkupTool::Line,
        OverlayGeometry::Polyline {
            path: vec![LatLng::new(47.2, 8.2), LatLng::new(47.3, 8.3)],
        },
    );

    let flags: Vec<bool> = state.overlays.records().map(|r| r.is_arrow).collect();
    assert_eq!(flags, vec![true, false]);
}

// ─── Reverse-Geocoding nach Marker-Platzierung ───────────────────────────────

#[test]
fn test_marker_setzt_koordinaten_label_und_dann_adresse() {
    let mut controller = AppController::new();
    let mut state = new_state();

    let position = LatLng::new(47.3675, 8.5392);
    draw(
        &mut controller,
        &mut state,
        MarkupTool::Marker,
        OverlayGeometry::Marker {
            position,
            label: None,
        },
    );

    // Vor der Provider-Antwort steht die Koordinate im Label
    assert_eq!(state.view.address_label.as_deref(), Some(position.display().as_str()));

    pump(&mut controller, &mut state);
    assert_eq!(
        state.view.address_label.as_deref(),
        Some("Bahnhofstrasse 1, 8001 Zürich")
    );
}

#[test]
fn test_marker_ohne_nahe_adresse_behaelt_koordinaten_label() {
    let mut controller = AppController::new();
    let mut state = new_state();

    let position = LatLng::new(0.0, 0.0);
    draw(
        &mut controller,
        &mut state,
        MarkupTool::Marker,
        OverlayGeometry::Marker {
            position,
            label: None,
        },
    );
    pump(&mut controller, &mut state);

    assert_eq!(state.view.address_label, Some(position.display()));
}

// ─── Selektion & Stil ────────────────────────────────────────────────────────

#[test]
fn test_stilaenderung_trifft_nur_das_selektierte_overlay() {
    let mut controller = AppController::new();
    let mut state = new_state();

    draw(&mut controller, &mut state, MarkupTool::Rectangle, sample_rect(0.0));
    draw(&mut controller, &mut state, MarkupTool::Rectangle, sample_rect(1.0));

    let handles: Vec<_> = state.overlays.records().map(|r| r.handle).collect();
    let original_style = *state.overlays.active_style();

    controller
        .handle_intent(&mut state, AppIntent::OverlayClicked { handle: handles[0] })
        .unwrap();
    assert!(state.overlays.selected_id().is_some());

    let new_style = OverlayStyle {
        stroke_color: [0.0, 0.8, 0.2, 1.0],
        ..original_style
    };
    controller
        .handle_intent(&mut state, AppIntent::ActiveStyleChanged { style: new_style })
        .unwrap();

    let styles: Vec<OverlayStyle> = state.overlays.records().map(|r| r.style).collect();
    assert_eq!(styles[0], new_style);
    assert_eq!(styles[1], original_style, "fertige Form bleibt unberührt");

    // Nach Aufheben der Selektion trägt das Drawable den neuen Stil
    controller
        .handle_intent(&mut state, AppIntent::ClearSelectionRequested)
        .unwrap();
    let scene_styles: Vec<OverlayStyle> =
        state.scene.overlays().map(|(_, o)| o.style).collect();
    assert_eq!(scene_styles[0], new_style);
}

#[test]
fn test_klick_selektiert_nur_ein_overlay() {
    let mut controller = AppController::new();
    let mut state = new_state();

    draw(&mut controller, &mut state, MarkupTool::Rectangle, sample_rect(0.0));
    draw(&mut controller, &mut state, MarkupTool::Rectangle, sample_rect(1.0));

    let handles: Vec<_> = state.overlays.records().map(|r| r.handle).collect();
    controller
        .handle_intent(&mut state, AppIntent::OverlayClicked { handle: handles[0] })
        .unwrap();
    let first = state.overlays.selected_id();
    controller
        .handle_intent(&mut state, AppIntent::OverlayClicked { handle: handles[1] })
        .unwrap();

    assert_ne!(state.overlays.selected_id(), first);
    assert!(state.overlays.selected_id().is_some());
}

// ─── Löschen ─────────────────────────────────────────────────────────────────

#[test]
fn test_delete_ist_idempotent_und_raeumt_listener_ab() {
    let mut controller = AppController::new();
    let mut state = new_state();

    draw(&mut controller, &mut state, MarkupTool::Rectangle, sample_rect(0.0));
    let handle = state.overlays.records().next().unwrap().handle;
    assert_eq!(state.scene.live_listener_count(), 1);

    controller
        .handle_intent(&mut state, AppIntent::OverlayClicked { handle })
        .unwrap();
    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .unwrap();

    assert_eq!(state.overlays.len(), 0);
    assert_eq!(state.scene.live_overlay_count(), 0);
    assert_eq!(state.scene.live_listener_count(), 0);
    assert_eq!(state.overlays.selected_id(), None);

    // Zweites Delete ohne Selektion ist ein stiller No-Op
    controller
        .handle_intent(&mut state, AppIntent::DeleteSelectedRequested)
        .unwrap();
    assert_eq!(state.overlays.len(), 0);
}

#[test]
fn test_clear_all_entfernt_drawables_und_listener() {
    let mut controller = AppController::new();
    let mut state = new_state();

    for i in 0..4 {
        draw(
            &mut controller,
            &mut state,
            MarkupTool::Rectangle,
            sample_rect(i as f64 * 0.5),
        );
    }
    assert_eq!(state.scene.live_overlay_count(), 4);

    controller
        .handle_intent(&mut state, AppIntent::ClearAllOverlaysRequested)
        .unwrap();

    assert_eq!(state.overlays.len(), 0);
    assert_eq!(state.scene.live_overlay_count(), 0);
    assert_eq!(state.scene.live_listener_count(), 0);
}
