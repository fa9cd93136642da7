//! Integrationstests für den Karten-Export:
//! - Dokumentkomposition mit und ohne Route
//! - Text-Fallback bei Snapshot-Ausfall
//! - Speichern, Verwerfen und Staleness

use std::io::{Cursor, Read};

use siteplan_map_annotator::providers::offline::OfflineProviders;
use siteplan_map_annotator::providers::{ImmediatePort, ProviderSet};
use siteplan_map_annotator::{
    AppController, AppIntent, AppState, LatLng, MarkupTool, OverlayGeometry,
};

fn new_state() -> AppState {
    AppState::new(Box::new(ImmediatePort::new(OfflineProviders::provider_set())))
}

/// State mit simuliertem Snapshot-Dienst-Ausfall.
fn new_state_failing_snapshot() -> AppState {
    let providers = ProviderSet {
        geocoding: Box::new(OfflineProviders::new()),
        routing: Box::new(OfflineProviders::new()),
        geolocation: Box::new(OfflineProviders::new()),
        snapshot: Box::new(OfflineProviders {
            fail_snapshot: true,
            ..Default::default()
        }),
    };
    AppState::new(Box::new(ImmediatePort::new(providers)))
}

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

fn archive_names(bytes: &[u8]) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

fn read_summary(bytes: &[u8]) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut entry = zip.by_name("summary.txt").unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    text
}

fn add_marker(controller: &mut AppController, state: &mut AppState) {
    controller
        .handle_intent(
            state,
            AppIntent::SetMarkupToolRequested {
                tool: MarkupTool::Marker,
            },
        )
        .unwrap();
    controller
        .handle_intent(
            state,
            AppIntent::OverlayDrawingCompleted {
                geometry: OverlayGeometry::Marker {
                    position: LatLng::new(47.3675, 8.5392),
                    label: None,
                },
            },
        )
        .unwrap();
    pump(controller, state);
}

fn export(controller: &mut AppController, state: &mut AppState) {
    controller
        .handle_intent(state, AppIntent::ExportRequested)
        .unwrap();
    pump(controller, state);
}

// ─── Komposition ─────────────────────────────────────────────────────────────

#[test]
fn test_export_enthaelt_bildseite_und_zusammenfassung() {
    let mut controller = AppController::new();
    let mut state = new_state();
    add_marker(&mut controller, &mut state);

    export(&mut controller, &mut state);

    let artifact = state.export.artifact.as_ref().expect("Artefakt fertig");
    assert_eq!(archive_names(&artifact.bytes), vec!["map.png", "summary.txt"]);
    assert!(artifact.suggested_filename.starts_with("map-export-"));

    let summary = read_summary(&artifact.bytes);
    assert!(summary.contains("1 x Marker"));
    assert!(!summary.contains("Route:"), "ohne Route keine Routen-Zeilen");

    let status = state.ui.status_message.as_deref().unwrap();
    assert!(status.contains("Export ready"));
}

#[test]
fn test_export_mit_route_traegt_routen_zeilen() {
    let mut controller = AppController::new();
    let mut state = new_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::RouteOriginEdited {
                text: "Denver Union".into(),
            },
        )
        .unwrap();
    controller
        .handle_intent(
            &mut state,
            AppIntent::RouteDestinationEdited {
                text: "Denver International".into(),
            },
        )
        .unwrap();
    controller
        .handle_intent(&mut state, AppIntent::ComputeRouteRequested)
        .unwrap();
    pump(&mut controller, &mut state);
    assert!(state.route.computed.is_some());

    export(&mut controller, &mut state);

    let summary = read_summary(&state.export.artifact.as_ref().unwrap().bytes);
    assert!(summary.contains("From: Denver Union Station, Denver, CO"));
    assert!(summary.contains("To: Denver International Airport, Denver, CO"));
    assert!(summary.contains("https://www.google.com/maps/dir/"));
}

#[test]
fn test_snapshot_ausfall_degradiert_zum_textdokument() {
    let mut controller = AppController::new();
    let mut state = new_state_failing_snapshot();
    add_marker(&mut controller, &mut state);

    export(&mut controller, &mut state);

    let artifact = state.export.artifact.as_ref().expect("Fallback-Artefakt");
    assert_eq!(archive_names(&artifact.bytes), vec!["summary.txt"]);
    let summary = read_summary(&artifact.bytes);
    assert!(summary.contains("Map image unavailable"));
    assert!(summary.contains("1 x Marker"), "Inhalt bleibt erhalten");
}

// ─── Speichern & Verwerfen ───────────────────────────────────────────────────

#[test]
fn test_artefakt_wird_an_den_gewaehlten_pfad_geschrieben() {
    let mut controller = AppController::new();
    let mut state = new_state();
    export(&mut controller, &mut state);

    let bytes = state.export.artifact.as_ref().unwrap().bytes.clone();
    let path = std::env::temp_dir().join("map-export-write-test.zip");
    controller
        .handle_intent(
            &mut state,
            AppIntent::ExportSavePathSelected {
                path: path.to_string_lossy().to_string(),
            },
        )
        .unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, bytes);
    assert!(state.export.artifact.is_none(), "Artefakt ist verbraucht");
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_verwerfen_raeumt_das_artefakt_ab() {
    let mut controller = AppController::new();
    let mut state = new_state();
    export(&mut controller, &mut state);
    assert!(state.export.artifact.is_some());

    controller
        .handle_intent(&mut state, AppIntent::ExportDiscarded)
        .unwrap();
    assert!(state.export.artifact.is_none());
}

// ─── Staleness ───────────────────────────────────────────────────────────────

#[test]
fn test_nur_der_letzte_snapshot_wird_komponiert() {
    let mut controller = AppController::new();
    let mut state = new_state();

    controller
        .handle_intent(&mut state, AppIntent::ExportRequested)
        .unwrap();
    let stale = state.port.poll();
    controller
        .handle_intent(&mut state, AppIntent::ExportRequested)
        .unwrap();
    let fresh = state.port.poll();

    // Veraltete Antwort zuerst: darf kein Artefakt erzeugen
    for response in stale {
        controller
            .handle_intent(&mut state, AppIntent::ProviderCompleted { response })
            .unwrap();
    }
    assert!(state.export.artifact.is_none());

    for response in fresh {
        controller
            .handle_intent(&mut state, AppIntent::ProviderCompleted { response })
            .unwrap();
    }
    assert!(state.export.artifact.is_some());
}
