//! Handler für den Karten-Export.
//!
//! Export läuft zweistufig über den Provider-Port: Snapshot anfragen,
//! bei Eintreffen das Dokument komponieren. Das fertige Artefakt wartet
//! im Zustand auf Speichern oder Verwerfen.

use anyhow::{Context, Result};

use crate::app::AppState;
use crate::export::{compose_document, ExportSummary, RouteSummaryLines};
use crate::providers::{ProviderRequest, SnapshotRequest};
use crate::shared::options::SNAPSHOT_SIZE_PX;

/// Stößt die Komposition an: Snapshot der aktuellen Sicht anfragen.
pub fn compose(state: &mut AppState) {
    state.export.seq += 1;

    // Mit Route: Pfad plus Endpunkt-Marker. Ohne: ein Marker im Zentrum.
    let mut markers = Vec::new();
    let mut encoded_path = None;
    match &state.route.computed {
        Some(route) => {
            markers.push(('A', route.origin_coordinate));
            markers.push(('B', route.destination_coordinate));
            encoded_path = Some(route.encoded_path.clone());
        }
        None => markers.push(('C', state.scene.center())),
    }

    let request = SnapshotRequest {
        center: state.scene.center(),
        zoom: state.scene.zoom().round() as u8,
        size_px: SNAPSHOT_SIZE_PX,
        map_type: state.view.map_type,
        markers,
        encoded_path,
    };
    state.port.submit(ProviderRequest::Snapshot {
        seq: state.export.seq,
        request,
    });
    state.set_status("Preparing export...");
}

/// Komponiert das Dokument aus der eingetroffenen Snapshot-Antwort.
///
/// Ein Snapshot-Fehler degradiert zum reinen Text-Dokument; nur das
/// Komponieren selbst kann den Export scheitern lassen.
pub fn apply_snapshot(
    state: &mut AppState,
    seq: u64,
    result: Result<Vec<u8>, String>,
) -> Result<()> {
    if seq != state.export.seq {
        log::debug!("Veralteter Snapshot verworfen (seq {seq})");
        return Ok(());
    }

    let summary = ExportSummary {
        center: state.scene.center(),
        zoom: state.scene.zoom(),
        map_type: state.view.map_type,
        address_label: state.view.address_label.clone(),
        overlay_counts: state.overlays.counts_by_kind(),
        route: state.route.computed.as_ref().map(|route| RouteSummaryLines {
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            travel_mode: route.travel_mode,
            distance: route.distance.clone(),
            duration: route.duration.clone(),
            deep_link: route.provider_deep_link.clone(),
        }),
    };

    let artifact = compose_document(&summary, result).context("Export komponieren")?;
    state.set_status(format!("Export ready: {}", artifact.suggested_filename));
    state.export.artifact = Some(artifact);
    Ok(())
}

/// Schreibt das wartende Artefakt an den gewählten Pfad.
pub fn write_artifact(state: &mut AppState, path: String) -> Result<()> {
    let Some(artifact) = state.export.artifact.take() else {
        log::warn!("Kein Export-Artefakt zum Speichern vorhanden");
        return Ok(());
    };

    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("Export nach {path} schreiben"))?;
    state.set_status(format!("Export saved to {path}"));
    Ok(())
}

/// Verwirft das wartende Artefakt (Dialog abgebrochen).
pub fn discard(state: &mut AppState) {
    if state.export.artifact.take().is_some() {
        log::info!("Export-Artefakt verworfen");
    }
}
