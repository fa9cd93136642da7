//! Typen und Traits der externen Provider-Schnittstellen.
//!
//! Fehler überqueren diese Grenze als `String`, weil sie durchweg zu
//! Statusmeldungen werden und als Events kopierbar sein müssen.

use crate::core::geo::LatLng;

/// Ergebnis einer Vorwärts- oder Referenz-Geokodierung.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub coordinate: LatLng,
    pub formatted_address: String,
}

/// Autocomplete-Kandidat: Anzeige-Text plus optionale stabile
/// Provider-Referenz. Kandidaten ohne Referenz (z.B. aus rohem
/// Koordinaten-Text synthetisiert) werden beim Annehmen vorwärts
/// geokodiert.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub place_ref: Option<String>,
    pub display: String,
}

/// Fortbewegungsart der Routenberechnung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Bicycling,
        TravelMode::Transit,
    ];

    /// Parameterwert der Provider-APIs.
    pub fn provider_param(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelMode::Driving => "Driving",
            TravelMode::Walking => "Walking",
            TravelMode::Bicycling => "Bicycling",
            TravelMode::Transit => "Transit",
        }
    }
}

/// Routen-Antwort des Routing-Providers. Distanz/Dauer sind bereits
/// formatierte Strings und werden lokal nicht neu berechnet.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub distance: String,
    pub duration: String,
    pub encoded_path: String,
}

/// Kartentyp für Rendering und Static-Map-Snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapType {
    #[default]
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

impl MapType {
    pub const ALL: [MapType; 4] = [
        MapType::Roadmap,
        MapType::Satellite,
        MapType::Hybrid,
        MapType::Terrain,
    ];

    pub fn provider_param(&self) -> &'static str {
        match self {
            MapType::Roadmap => "roadmap",
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Terrain => "terrain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MapType::Roadmap => "Roadmap",
            MapType::Satellite => "Satellite",
            MapType::Hybrid => "Hybrid",
            MapType::Terrain => "Terrain",
        }
    }
}

/// Anfrage für einen Static-Map-Snapshot des aktuellen Viewports.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRequest {
    pub center: LatLng,
    pub zoom: u8,
    pub size_px: (u32, u32),
    pub map_type: MapType,
    /// Beschriftete Marker (Label, Position), z.B. ("A", Start).
    pub markers: Vec<(char, LatLng)>,
    /// Encoded-Polyline des Routenpfads, falls eine Route gerendert ist.
    pub encoded_path: Option<String>,
}

/// Geocoding-Provider: vorwärts, rückwärts, Autocomplete, Referenz.
pub trait GeocodingProvider: Send {
    fn forward(&self, query: &str) -> Result<GeocodeResult, String>;
    /// Auflösung über eine stabile Provider-Referenz; darf keinen
    /// Freitext-Geocode auslösen.
    fn by_reference(&self, place_ref: &str) -> Result<GeocodeResult, String>;
    /// `Ok(None)` = Provider kennt keine Adresse für die Koordinate.
    fn reverse(&self, coordinate: LatLng) -> Result<Option<String>, String>;
    fn autocomplete(&self, input: &str) -> Result<Vec<Suggestion>, String>;
}

/// Routing-Provider: Punkt-zu-Punkt-Route.
pub trait RoutingProvider: Send {
    fn route(
        &self,
        origin: LatLng,
        destination: LatLng,
        mode: TravelMode,
    ) -> Result<RouteSummary, String>;
}

/// Geolokations-Quelle der Plattform.
pub trait GeolocationSource: Send {
    fn current_position(&self) -> Result<LatLng, String>;
}

/// Static-Map-Snapshot-Dienst. Liefert Bildbytes (PNG oder JPEG).
pub trait SnapshotProvider: Send {
    fn snapshot(&self, request: &SnapshotRequest) -> Result<Vec<u8>, String>;
}

/// Bündel aller Provider-Implementierungen für den Worker.
pub struct ProviderSet {
    pub geocoding: Box<dyn GeocodingProvider>,
    pub routing: Box<dyn RoutingProvider>,
    pub geolocation: Box<dyn GeolocationSource>,
    pub snapshot: Box<dyn SnapshotProvider>,
}
