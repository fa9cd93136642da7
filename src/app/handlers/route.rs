//! Handler für den Routenplaner.
//!
//! Eine Berechnung läuft zweistufig: erst beide Endpunkte zu
//! Koordinaten auflösen (Direkteingabe "lat, lng" sofort, sonst
//! Vorwärts-Geokodierung), dann die Route anfragen. Die bestehende
//! Route wird erst nach bestätigtem Erfolg der neuen abgeräumt.

use crate::app::state::{EndpointState, PendingRoute, RenderedRoute, RouteState};
use crate::app::AppState;
use crate::core::geo::LatLngBounds;
use crate::core::surface::{MapSurface, OverlayGeometry, OverlayStyle};
use crate::core::{polyline, LatLng};
use crate::providers::google::directions_deep_link;
use crate::providers::{GeocodePurpose, GeocodeResult, ProviderRequest, RouteSummary, TravelMode};

pub fn set_origin(state: &mut AppState, text: String) {
    state.route.origin_input = text;
}

pub fn set_destination(state: &mut AppState, text: String) {
    state.route.destination_input = text;
}

/// Wechselt die Fortbewegungsart. Löst bewusst keine Neuberechnung aus;
/// die nächste Berechnung verwendet den neuen Wert.
pub fn set_travel_mode(state: &mut AppState, mode: TravelMode) {
    state.route.travel_mode = mode;
}

/// Startet eine Routenberechnung für die aktuellen Eingaben.
pub fn compute_route(state: &mut AppState) {
    let origin_input = state.route.origin_input.trim().to_string();
    let destination_input = state.route.destination_input.trim().to_string();
    if origin_input.is_empty() || destination_input.is_empty() {
        state.set_status("Enter both origin and destination");
        return;
    }

    state.route.route_seq += 1;
    let seq = state.route.route_seq;
    let mode = state.route.travel_mode;

    let origin = resolve_endpoint(state, seq, &origin_input, GeocodePurpose::RouteOrigin);
    let destination = resolve_endpoint(
        state,
        seq,
        &destination_input,
        GeocodePurpose::RouteDestination,
    );
    state.route.pending = Some(PendingRoute {
        seq,
        mode,
        origin,
        destination,
    });
    log::info!("Routenberechnung {seq} gestartet ({})", mode.label());

    maybe_request_route(state);
}

/// Direkteingabe "lat, lng" löst sofort auf, sonst geht eine
/// Vorwärts-Geokodierung mit der Sequenznummer der Berechnung raus.
fn resolve_endpoint(
    state: &mut AppState,
    seq: u64,
    text: &str,
    purpose: GeocodePurpose,
) -> EndpointState {
    match LatLng::parse(text) {
        Some(coordinate) => EndpointState::Resolved {
            display: coordinate.display(),
            coordinate,
        },
        None => {
            state.port.submit(ProviderRequest::ForwardGeocode {
                seq,
                query: text.to_string(),
                purpose,
            });
            EndpointState::Resolving(text.to_string())
        }
    }
}

/// Fragt die Route an, sobald beide Endpunkte aufgelöst sind.
fn maybe_request_route(state: &mut AppState) {
    let Some(pending) = &state.route.pending else {
        return;
    };
    let (
        EndpointState::Resolved {
            coordinate: origin, ..
        },
        EndpointState::Resolved {
            coordinate: destination,
            ..
        },
    ) = (&pending.origin, &pending.destination)
    else {
        return;
    };

    state.port.submit(ProviderRequest::Route {
        seq: pending.seq,
        origin: *origin,
        destination: *destination,
        mode: pending.mode,
    });
}

/// Tauscht Start und Ziel; sind beide gesetzt, wird neu berechnet.
pub fn swap_endpoints(state: &mut AppState) {
    std::mem::swap(
        &mut state.route.origin_input,
        &mut state.route.destination_input,
    );
    if !state.route.origin_input.trim().is_empty()
        && !state.route.destination_input.trim().is_empty()
    {
        compute_route(state);
    }
}

/// Fragt die aktuelle Position an (wird als Start übernommen).
pub fn use_current_location(state: &mut AppState) {
    state.route.geolocate_seq += 1;
    state.port.submit(ProviderRequest::CurrentPosition {
        seq: state.route.geolocate_seq,
    });
}

/// Räumt Route, Rendering und Eingaben ab.
pub fn clear_route(state: &mut AppState) {
    teardown_rendered(state);
    state.route.computed = None;
    state.route.pending = None;
    state.route.origin_input.clear();
    state.route.destination_input.clear();
    log::info!("Route zurückgesetzt");
}

fn teardown_rendered(state: &mut AppState) {
    if let Some(rendered) = state.route.rendered.take() {
        state.scene.remove_overlay(rendered.path);
        state.scene.remove_overlay(rendered.origin_marker);
        state.scene.remove_overlay(rendered.destination_marker);
    }
}

/// Ergebnis der Endpunkt-Geokodierung einer laufenden Berechnung.
///
/// Bei Fehlern bricht nur die laufende Berechnung ab; eine bereits
/// angezeigte Route bleibt stehen.
pub fn apply_endpoint_geocoded(
    state: &mut AppState,
    seq: u64,
    query: &str,
    purpose: GeocodePurpose,
    result: Result<GeocodeResult, String>,
) {
    let Some(pending) = &mut state.route.pending else {
        return;
    };
    if seq != pending.seq {
        log::debug!("Veraltete Endpunkt-Geokodierung für \"{query}\" verworfen");
        return;
    }

    let found = match result {
        Ok(found) => found,
        Err(e) => {
            state.route.pending = None;
            state.set_status(format!("Could not resolve \"{query}\": {e}"));
            return;
        }
    };

    let resolved = EndpointState::Resolved {
        display: found.formatted_address.clone(),
        coordinate: found.coordinate,
    };
    match purpose {
        GeocodePurpose::RouteOrigin => {
            pending.origin = resolved;
            state.route.origin_input = found.formatted_address;
        }
        GeocodePurpose::RouteDestination => {
            pending.destination = resolved;
            state.route.destination_input = found.formatted_address;
        }
        GeocodePurpose::Recenter => unreachable!("Recenter läuft über den Resolver"),
    }

    maybe_request_route(state);
}

/// Ergebnis der Routenanfrage: rendern und zusammenfassen, oder die
/// bestehende Route unangetastet lassen.
pub fn apply_routed(
    state: &mut AppState,
    seq: u64,
    mode: TravelMode,
    result: Result<RouteSummary, String>,
) {
    let Some(pending) = state.route.pending.take() else {
        return;
    };
    if seq != pending.seq {
        log::debug!("Veraltete Routenantwort verworfen (seq {seq})");
        state.route.pending = Some(pending);
        return;
    }

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            state.set_status(format!("Route failed: {e}"));
            return;
        }
    };

    let path = polyline::decode(&summary.encoded_path);
    if path.len() < 2 {
        state.set_status("Route failed: empty geometry");
        return;
    }

    let (EndpointState::Resolved {
        display: origin_display,
        coordinate: origin_coordinate,
    }, EndpointState::Resolved {
        display: destination_display,
        coordinate: destination_coordinate,
    }) = (pending.origin, pending.destination)
    else {
        log::warn!("Routenantwort ohne aufgelöste Endpunkte verworfen");
        return;
    };

    // Erst jetzt ist der Erfolg bestätigt: alte Route abräumen
    teardown_rendered(state);

    let route_style = OverlayStyle {
        stroke_color: state.options.route_stroke_color,
        fill_color: state.options.route_stroke_color,
        stroke_weight_px: state.options.route_stroke_weight_px,
    };
    let path_handle = state.scene.add_overlay(
        OverlayGeometry::Polyline { path: path.clone() },
        &route_style,
    );
    let origin_marker = state.scene.add_overlay(
        OverlayGeometry::Marker {
            position: origin_coordinate,
            label: Some("A".into()),
        },
        &route_style,
    );
    let destination_marker = state.scene.add_overlay(
        OverlayGeometry::Marker {
            position: destination_coordinate,
            label: Some("B".into()),
        },
        &route_style,
    );
    state.route.rendered = Some(RenderedRoute {
        path: path_handle,
        origin_marker,
        destination_marker,
    });

    if let Some(bounds) = LatLngBounds::from_points(&path) {
        state
            .scene
            .fit_bounds(bounds, state.options.fit_bounds_padding_px);
    }

    let deep_link = directions_deep_link(&origin_display, &destination_display, mode);
    state.set_status(format!("{} in {}", summary.distance, summary.duration));
    state.route.computed = Some(RouteState {
        origin: origin_display,
        destination: destination_display,
        origin_coordinate,
        destination_coordinate,
        travel_mode: mode,
        distance: summary.distance,
        duration: summary.duration,
        encoded_path: summary.encoded_path,
        provider_deep_link: deep_link,
    });
}

/// Ergebnis der Geolokations-Anfrage: Koordinate wird Startpunkt.
/// Ist bereits ein Ziel gesetzt, wird direkt neu berechnet.
pub fn apply_position(state: &mut AppState, seq: u64, result: Result<LatLng, String>) {
    if seq != state.route.geolocate_seq {
        log::debug!("Veraltete Positionsantwort verworfen");
        return;
    }

    match result {
        Ok(coordinate) => {
            state.route.origin_input = coordinate.display();
            state.set_status("Using current location as origin");
            if !state.route.destination_input.trim().is_empty() {
                compute_route(state);
            }
        }
        Err(e) => state.set_status(format!("Geolocation failed: {e}")),
    }
}
