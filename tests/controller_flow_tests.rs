//! Integrationstests für Ansicht und Optionen:
//! - Zoom-Stufen und Klemmen an den Grenzen
//! - Kartentyp, Pan, Viewport-Größe
//! - Optionsübernahme und Statusnachrichten

use siteplan_map_annotator::providers::offline::OfflineProviders;
use siteplan_map_annotator::providers::ImmediatePort;
use siteplan_map_annotator::shared::options::{ZOOM_MAX, ZOOM_MIN};
use siteplan_map_annotator::{
    AppController, AppIntent, AppState, LatLng, MapType, MarkupTool, OverlayGeometry,
};

fn new_state() -> AppState {
    AppState::new(Box::new(ImmediatePort::new(OfflineProviders::provider_set())))
}

#[test]
fn test_zoom_klemmt_an_den_grenzen() {
    let mut controller = AppController::new();
    let mut state = new_state();

    for _ in 0..50 {
        controller
            .handle_intent(&mut state, AppIntent::ZoomInRequested)
            .unwrap();
    }
    assert_eq!(state.scene.zoom(), ZOOM_MAX);

    for _ in 0..50 {
        controller
            .handle_intent(&mut state, AppIntent::ZoomOutRequested)
            .unwrap();
    }
    assert_eq!(state.scene.zoom(), ZOOM_MIN);
}

#[test]
fn test_pan_und_viewport_groesse() {
    let mut controller = AppController::new();
    let mut state = new_state();

    let target = LatLng::new(40.712776, -74.005974);
    controller
        .handle_intent(&mut state, AppIntent::CameraPanned { center: target })
        .unwrap();
    assert_eq!(state.scene.center(), target);

    controller
        .handle_intent(
            &mut state,
            AppIntent::ViewportResized {
                size: [1920.0, 1080.0],
            },
        )
        .unwrap();
    assert_eq!(state.scene.viewport_size(), [1920.0, 1080.0]);
}

#[test]
fn test_kartentyp_wechsel() {
    let mut controller = AppController::new();
    let mut state = new_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::MapTypeChanged {
                map_type: MapType::Satellite,
            },
        )
        .unwrap();
    assert_eq!(state.view.map_type, MapType::Satellite);
}

#[test]
fn test_status_laesst_sich_wegklicken() {
    let mut controller = AppController::new();
    let mut state = new_state();

    // Fehlschlag erzeugt eine Statusnachricht
    controller
        .handle_intent(
            &mut state,
            AppIntent::AddressSubmitted {
                text: "Nowhere Particular".into(),
            },
        )
        .unwrap();
    let responses = state.port.poll();
    for response in responses {
        controller
            .handle_intent(&mut state, AppIntent::ProviderCompleted { response })
            .unwrap();
    }
    assert!(state.ui.status_message.is_some());

    controller
        .handle_intent(&mut state, AppIntent::StatusDismissed)
        .unwrap();
    assert!(state.ui.status_message.is_none());
}

#[test]
fn test_optionsaenderung_wirkt_auf_neue_overlays() {
    let mut controller = AppController::new();
    let mut state = new_state();

    let mut options = state.options.clone();
    options.stroke_color = [0.1, 0.6, 0.3, 1.0];
    options.stroke_weight_px = 5.0;
    controller
        .handle_intent(&mut state, AppIntent::OptionsChanged { options })
        .unwrap();

    assert_eq!(state.overlays.active_style().stroke_color, [0.1, 0.6, 0.3, 1.0]);

    controller
        .handle_intent(
            &mut state,
            AppIntent::SetMarkupToolRequested {
                tool: MarkupTool::Line,
            },
        )
        .unwrap();
    controller
        .handle_intent(
            &mut state,
            AppIntent::OverlayDrawingCompleted {
                geometry: OverlayGeometry::Polyline {
                    path: vec![LatLng::new(47.0, 8.0), LatLng::new(47.1, 8.1)],
                },
            },
        )
        .unwrap();

    let record = state.overlays.records().next().unwrap();
    assert_eq!(record.style.stroke_weight_px, 5.0);
}
