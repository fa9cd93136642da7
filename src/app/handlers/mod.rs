//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion;
//! Provider-Antworten verzweigen hier nach Antwort-Variante.

pub mod export;
pub mod overlays;
pub mod resolver;
pub mod route;
pub mod view;

use crate::providers::{GeocodePurpose, ProviderResponse};

use super::AppState;

/// Arbeitet eine Provider-Antwort in den Zustand ein.
///
/// Jede Antwort trägt die Sequenznummer ihres logischen Anfragestroms;
/// der zuständige Handler verwirft veraltete Antworten selbst.
pub fn apply_provider_response(
    state: &mut AppState,
    response: ProviderResponse,
) -> anyhow::Result<()> {
    match response {
        ProviderResponse::Suggestions { seq, result } => {
            resolver::apply_suggestions(state, seq, result)
        }
        ProviderResponse::ForwardGeocoded {
            seq,
            query,
            purpose: GeocodePurpose::Recenter,
            result,
        } => resolver::apply_recenter_geocoded(state, seq, &query, result),
        ProviderResponse::ForwardGeocoded {
            seq,
            query,
            purpose,
            result,
        } => route::apply_endpoint_geocoded(state, seq, &query, purpose, result),
        ProviderResponse::ReferenceGeocoded { seq, result } => {
            resolver::apply_reference_geocoded(state, seq, result)
        }
        ProviderResponse::ReverseGeocoded {
            seq,
            coordinate,
            result,
        } => resolver::apply_reverse_geocoded(state, seq, coordinate, result),
        ProviderResponse::Routed { seq, mode, result } => {
            route::apply_routed(state, seq, mode, result)
        }
        ProviderResponse::PositionAcquired { seq, result } => {
            route::apply_position(state, seq, result)
        }
        ProviderResponse::SnapshotTaken { seq, result } => {
            export::apply_snapshot(state, seq, result)?
        }
    }

    Ok(())
}
