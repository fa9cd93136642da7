//! Provider-Port: asynchrone Anfrage/Antwort-Schleuse.
//!
//! Jeder logische Anfragestrom trägt eine monoton steigende
//! Sequenznummer; die Handler wenden ausschließlich die Antwort zur
//! zuletzt ausgegebenen Nummer an. [`ThreadedPort`] führt die blockenden
//! Provider-Aufrufe auf einem Worker-Thread aus (Muster des
//! Update-Checkers: blockierender HTTP-Call abseits des UI-Threads,
//! Ergebnis per Kanal zurück). [`ImmediatePort`] beantwortet Anfragen
//! synchron für Tests.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::core::geo::LatLng;

use super::types::{
    GeocodeResult, ProviderSet, RouteSummary, SnapshotRequest, Suggestion, TravelMode,
};

/// Zweck einer Vorwärts-Geokodierung (bestimmt den Antwort-Pfad).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodePurpose {
    /// Adresssuche: Karte zentrieren, Adresslabel setzen.
    Recenter,
    /// Routen-Startpunkt auflösen.
    RouteOrigin,
    /// Routen-Zielpunkt auflösen.
    RouteDestination,
}

/// Anfrage an die Provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderRequest {
    Suggest {
        seq: u64,
        input: String,
    },
    ForwardGeocode {
        seq: u64,
        query: String,
        purpose: GeocodePurpose,
    },
    ReferenceGeocode {
        seq: u64,
        place_ref: String,
    },
    ReverseGeocode {
        seq: u64,
        coordinate: LatLng,
    },
    Route {
        seq: u64,
        origin: LatLng,
        destination: LatLng,
        mode: TravelMode,
    },
    CurrentPosition {
        seq: u64,
    },
    Snapshot {
        seq: u64,
        request: SnapshotRequest,
    },
}

/// Antwort eines Providers, zurück auf dem UI-Thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    Suggestions {
        seq: u64,
        result: Result<Vec<Suggestion>, String>,
    },
    ForwardGeocoded {
        seq: u64,
        query: String,
        purpose: GeocodePurpose,
        result: Result<GeocodeResult, String>,
    },
    ReferenceGeocoded {
        seq: u64,
        result: Result<GeocodeResult, String>,
    },
    ReverseGeocoded {
        seq: u64,
        coordinate: LatLng,
        result: Result<Option<String>, String>,
    },
    Routed {
        seq: u64,
        mode: TravelMode,
        result: Result<RouteSummary, String>,
    },
    PositionAcquired {
        seq: u64,
        result: Result<LatLng, String>,
    },
    SnapshotTaken {
        seq: u64,
        result: Result<Vec<u8>, String>,
    },
}

/// Schleuse zwischen Zustandsmaschine und Providern.
pub trait ProviderPort {
    /// Reiht eine Anfrage ein. Nie blockierend.
    fn submit(&mut self, request: ProviderRequest);
    /// Holt alle inzwischen eingetroffenen Antworten ab.
    fn poll(&mut self) -> Vec<ProviderResponse>;
}

/// Führt eine Anfrage synchron gegen die Provider aus.
pub fn dispatch(providers: &ProviderSet, request: ProviderRequest) -> ProviderResponse {
    match request {
        ProviderRequest::Suggest { seq, input } => ProviderResponse::Suggestions {
            seq,
            result: providers.geocoding.autocomplete(&input),
        },
        ProviderRequest::ForwardGeocode {
            seq,
            query,
            purpose,
        } => {
            let result = providers.geocoding.forward(&query);
            ProviderResponse::ForwardGeocoded {
                seq,
                query,
                purpose,
                result,
            }
        }
        ProviderRequest::ReferenceGeocode { seq, place_ref } => {
            ProviderResponse::ReferenceGeocoded {
                seq,
                result: providers.geocoding.by_reference(&place_ref),
            }
        }
        ProviderRequest::ReverseGeocode { seq, coordinate } => ProviderResponse::ReverseGeocoded {
            seq,
            coordinate,
            result: providers.geocoding.reverse(coordinate),
        },
        ProviderRequest::Route {
            seq,
            origin,
            destination,
            mode,
        } => ProviderResponse::Routed {
            seq,
            mode,
            result: providers.routing.route(origin, destination, mode),
        },
        ProviderRequest::CurrentPosition { seq } => ProviderResponse::PositionAcquired {
            seq,
            result: providers.geolocation.current_position(),
        },
        ProviderRequest::Snapshot { seq, request } => ProviderResponse::SnapshotTaken {
            seq,
            result: providers.snapshot.snapshot(&request),
        },
    }
}

/// Port mit Worker-Thread für blockierende Provider-Aufrufe.
///
/// Beim Drop schließt der Anfragekanal; der Worker beendet sich beim
/// nächsten `recv`-Fehler von selbst.
pub struct ThreadedPort {
    request_tx: Sender<ProviderRequest>,
    response_rx: Receiver<ProviderResponse>,
}

impl ThreadedPort {
    pub fn spawn(providers: ProviderSet) -> Self {
        let (request_tx, request_rx) = std::sync::mpsc::channel::<ProviderRequest>();
        let (response_tx, response_rx) = std::sync::mpsc::channel::<ProviderResponse>();

        std::thread::Builder::new()
            .name("provider-worker".into())
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    let response = dispatch(&providers, request);
                    if response_tx.send(response).is_err() {
                        break;
                    }
                }
                log::debug!("Provider-Worker beendet");
            })
            .expect("Provider-Worker-Thread konnte nicht gestartet werden");

        Self {
            request_tx,
            response_rx,
        }
    }
}

impl ProviderPort for ThreadedPort {
    fn submit(&mut self, request: ProviderRequest) {
        if self.request_tx.send(request).is_err() {
            log::warn!("Provider-Worker nicht mehr erreichbar, Anfrage verworfen");
        }
    }

    fn poll(&mut self) -> Vec<ProviderResponse> {
        let mut responses = Vec::new();
        loop {
            match self.response_rx.try_recv() {
                Ok(response) => responses.push(response),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        responses
    }
}

/// Synchroner Port für Tests: Antworten werden beim `submit` berechnet
/// und beim nächsten `poll` in Einreihungs-Reihenfolge geliefert. Tests
/// können die gelieferten Antworten in beliebiger Reihenfolge wieder
/// einspeisen, um Out-of-Order-Vervollständigung zu simulieren.
pub struct ImmediatePort {
    providers: ProviderSet,
    queue: Vec<ProviderResponse>,
    submitted: Vec<ProviderRequest>,
}

impl ImmediatePort {
    pub fn new(providers: ProviderSet) -> Self {
        Self {
            providers,
            queue: Vec::new(),
            submitted: Vec::new(),
        }
    }

    /// Alle bisher eingereihten Anfragen (Prüfpfad für Debounce-Tests).
    pub fn submitted(&self) -> &[ProviderRequest] {
        &self.submitted
    }
}

impl ProviderPort for ImmediatePort {
    fn submit(&mut self, request: ProviderRequest) {
        self.submitted.push(request.clone());
        self.queue.push(dispatch(&self.providers, request));
    }

    fn poll(&mut self) -> Vec<ProviderResponse> {
        std::mem::take(&mut self.queue)
    }
}
