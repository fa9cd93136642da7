//! Handler für die Adress-Suche: Debounce, Vorschläge, Geokodierung.

use crate::app::state::PendingSuggest;
use crate::app::AppState;
use crate::core::surface::MapSurface;
use crate::core::LatLng;
use crate::providers::{GeocodePurpose, GeocodeResult, ProviderRequest, Suggestion};

/// Übernimmt den editierten Suchtext und zieht den Debounce neu auf.
///
/// Jeder Tastendruck ersetzt den laufenden Timer; unter der
/// Mindestlänge wird er gestoppt und die Vorschlagsliste geleert.
pub fn edit_input(state: &mut AppState, text: String, now_ms: f64) {
    state.resolver.suggestions.clear();
    // Eine noch ausstehende Antwort passt nicht mehr zur Eingabe
    state.resolver.suggest_seq += 1;

    if text.trim().len() >= state.options.suggest_min_len {
        state.resolver.pending_suggest = Some(PendingSuggest {
            input: text.clone(),
            due_ms: now_ms + state.options.suggest_debounce_ms as f64,
        });
    } else {
        state.resolver.pending_suggest = None;
    }
    state.resolver.input = text;
}

/// Schickt die fällige Autocomplete-Anfrage ab.
pub fn pump_debounce(state: &mut AppState, now_ms: f64) {
    let Some(pending) = state.resolver.pending_suggest.take() else {
        return;
    };
    if now_ms < pending.due_ms {
        // Noch nicht fällig, Timer weiterlaufen lassen
        state.resolver.pending_suggest = Some(pending);
        return;
    }

    state.resolver.suggest_seq += 1;
    state.port.submit(ProviderRequest::Suggest {
        seq: state.resolver.suggest_seq,
        input: pending.input,
    });
}

/// Geokodiert den abgeschickten Suchtext vorwärts (Karte zentrieren).
///
/// Ein laufender Debounce wird verworfen; die Vorschlagsliste schließt.
pub fn submit_query(state: &mut AppState, text: String) {
    state.resolver.pending_suggest = None;
    state.resolver.suggestions.clear();
    state.resolver.suggest_seq += 1;
    state.resolver.input = text.clone();

    state.resolver.forward_seq += 1;
    state.port.submit(ProviderRequest::ForwardGeocode {
        seq: state.resolver.forward_seq,
        query: text,
        purpose: GeocodePurpose::Recenter,
    });
}

/// Nimmt einen Vorschlag an: Referenz-Pfad wenn der Provider eine
/// Platzreferenz mitgeliefert hat, sonst Freitext-Geokodierung.
pub fn accept_suggestion(state: &mut AppState, index: usize) {
    let Some(suggestion) = state.resolver.suggestions.get(index).cloned() else {
        return;
    };
    state.resolver.pending_suggest = None;
    state.resolver.suggestions.clear();
    state.resolver.suggest_seq += 1;
    state.resolver.input = suggestion.display.clone();

    state.resolver.forward_seq += 1;
    let seq = state.resolver.forward_seq;
    match suggestion.place_ref {
        Some(place_ref) => state
            .port
            .submit(ProviderRequest::ReferenceGeocode { seq, place_ref }),
        None => state.port.submit(ProviderRequest::ForwardGeocode {
            seq,
            query: suggestion.display,
            purpose: GeocodePurpose::Recenter,
        }),
    }
}

/// Übernimmt eingetroffene Vorschläge, sofern sie zum zuletzt
/// abgeschickten Strom gehören.
pub fn apply_suggestions(state: &mut AppState, seq: u64, result: Result<Vec<Suggestion>, String>) {
    if seq != state.resolver.suggest_seq {
        log::debug!(
            "Veraltete Vorschläge verworfen (seq {seq}, aktuell {})",
            state.resolver.suggest_seq
        );
        return;
    }

    match result {
        Ok(mut suggestions) => {
            suggestions.truncate(state.options.suggest_max);
            state.resolver.suggestions = suggestions;
        }
        Err(e) => {
            state.resolver.suggestions.clear();
            log::warn!("Autocomplete fehlgeschlagen: {e}");
        }
    }
}

/// Ergebnis einer Vorwärts-Geokodierung für die Adresssuche.
pub fn apply_recenter_geocoded(
    state: &mut AppState,
    seq: u64,
    query: &str,
    result: Result<GeocodeResult, String>,
) {
    if seq != state.resolver.forward_seq {
        log::debug!("Veraltete Geokodierung für \"{query}\" verworfen");
        return;
    }
    apply_recenter_result(state, result);
}

/// Ergebnis einer Referenz-Geokodierung (angenommener Vorschlag).
pub fn apply_reference_geocoded(
    state: &mut AppState,
    seq: u64,
    result: Result<GeocodeResult, String>,
) {
    if seq != state.resolver.forward_seq {
        log::debug!("Veraltete Referenz-Geokodierung verworfen");
        return;
    }
    apply_recenter_result(state, result);
}

fn apply_recenter_result(state: &mut AppState, result: Result<GeocodeResult, String>) {
    match result {
        Ok(found) => {
            state.scene.pan_to(found.coordinate);
            state.resolver.input = found.formatted_address.clone();
            state.view.address_label = Some(found.formatted_address.clone());
            state.set_status(format!("Centered on {}", found.formatted_address));
        }
        Err(e) => state.set_status(format!("Address lookup failed: {e}")),
    }
}

/// Ergebnis des Reverse-Geocodings nach einer Marker-Platzierung.
///
/// Ohne Treffer bleibt das zuvor gesetzte Koordinaten-Label stehen.
pub fn apply_reverse_geocoded(
    state: &mut AppState,
    seq: u64,
    coordinate: LatLng,
    result: Result<Option<String>, String>,
) {
    if seq != state.resolver.reverse_seq {
        log::debug!("Veraltetes Reverse-Geocoding verworfen");
        return;
    }

    match result {
        Ok(Some(address)) => state.view.address_label = Some(address),
        Ok(None) => {
            log::debug!("Keine Adresse nahe {} gefunden", coordinate.display());
        }
        Err(e) => log::warn!("Reverse-Geocoding fehlgeschlagen: {e}"),
    }
}
