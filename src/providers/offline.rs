//! Offline-Provider: deterministische Fixtures für Tests und den
//! Demo-Betrieb ohne API-Schlüssel.
//!
//! Jede Interaktion bleibt damit ohne Netzwerk ausprobierbar; die
//! Ergebnisse sind stabil genug, dass Integrationstests darauf
//! Eigenschaften prüfen können.

use std::io::Cursor;

use crate::core::geo::LatLng;
use crate::core::polyline;

use super::types::{
    GeocodeResult, GeocodingProvider, GeolocationSource, RouteSummary, RoutingProvider,
    SnapshotProvider, SnapshotRequest, Suggestion, TravelMode,
};

/// Bekannte Adressen des Offline-Katalogs: (Referenz, Anzeige, Koordinate).
const FIXTURES: &[(&str, &str, LatLng)] = &[
    (
        "fx-main-123",
        "123 Main St, Springfield",
        LatLng::new(39.781721, -89.650148),
    ),
    (
        "fx-oak-456",
        "456 Oak Ave, Springfield",
        LatLng::new(39.798999, -89.644001),
    ),
    (
        "fx-denver-union",
        "Denver Union Station, Denver, CO",
        LatLng::new(39.752998, -105.000200),
    ),
    (
        "fx-denver-dia",
        "Denver International Airport, Denver, CO",
        LatLng::new(39.856096, -104.673738),
    ),
    (
        "fx-zrh-bahnhofstr",
        "Bahnhofstrasse 1, 8001 Zürich",
        LatLng::new(47.367500, 8.539200),
    ),
    (
        "fx-zrh-hb",
        "Hauptbahnhof, 8001 Zürich",
        LatLng::new(47.377900, 8.540300),
    ),
];

/// Maximaler Abstand, bis zu dem Reverse-Geocoding eine Fixture-Adresse
/// zuordnet (Meter).
const REVERSE_MATCH_M: f64 = 500.0;

/// Offline-Implementierung aller Provider-Traits.
pub struct OfflineProviders {
    /// Position für die Geolokations-Quelle (`None` = "nicht verfügbar").
    pub position: Option<LatLng>,
    /// Simuliert einen Snapshot-Dienst-Ausfall (Export-Fallback-Tests).
    pub fail_snapshot: bool,
}

impl Default for OfflineProviders {
    fn default() -> Self {
        Self {
            position: Some(LatLng::new(47.377900, 8.540300)),
            fail_snapshot: false,
        }
    }
}

impl OfflineProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kompletter [`ProviderSet`] aus Offline-Providern.
    pub fn provider_set() -> super::types::ProviderSet {
        super::types::ProviderSet {
            geocoding: Box::new(Self::new()),
            routing: Box::new(Self::new()),
            geolocation: Box::new(Self::new()),
            snapshot: Box::new(Self::new()),
        }
    }

    fn find_by_text(query: &str) -> Option<&'static (&'static str, &'static str, LatLng)> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        FIXTURES
            .iter()
            .find(|(_, display, _)| display.to_lowercase().contains(&needle))
    }
}

impl GeocodingProvider for OfflineProviders {
    fn forward(&self, query: &str) -> Result<GeocodeResult, String> {
        match Self::find_by_text(query) {
            Some((_, display, coordinate)) => Ok(GeocodeResult {
                coordinate: *coordinate,
                formatted_address: (*display).to_string(),
            }),
            None => Err(format!("No results for \"{}\"", query.trim())),
        }
    }

    fn by_reference(&self, place_ref: &str) -> Result<GeocodeResult, String> {
        FIXTURES
            .iter()
            .find(|(r, _, _)| *r == place_ref)
            .map(|(_, display, coordinate)| GeocodeResult {
                coordinate: *coordinate,
                formatted_address: (*display).to_string(),
            })
            .ok_or_else(|| "Place reference could not be resolved".to_string())
    }

    fn reverse(&self, coordinate: LatLng) -> Result<Option<String>, String> {
        let nearest = FIXTURES
            .iter()
            .map(|(_, display, c)| (*display, coordinate.distance_m(c)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        Ok(nearest
            .filter(|(_, d)| *d <= REVERSE_MATCH_M)
            .map(|(display, _)| display.to_string()))
    }

    fn autocomplete(&self, input: &str) -> Result<Vec<Suggestion>, String> {
        let needle = input.trim().to_lowercase();
        Ok(FIXTURES
            .iter()
            .filter(|(_, display, _)| display.to_lowercase().contains(&needle))
            .map(|(place_ref, display, _)| Suggestion {
                place_ref: Some((*place_ref).to_string()),
                display: (*display).to_string(),
            })
            .collect())
    }
}

impl RoutingProvider for OfflineProviders {
    fn route(
        &self,
        origin: LatLng,
        destination: LatLng,
        mode: TravelMode,
    ) -> Result<RouteSummary, String> {
        let distance_m = origin.distance_m(&destination);
        if distance_m < 1.0 {
            return Err("No route found".into());
        }

        let speed_kmh = match mode {
            TravelMode::Driving => 50.0,
            TravelMode::Walking => 5.0,
            TravelMode::Bicycling => 15.0,
            TravelMode::Transit => 30.0,
        };
        let minutes = (distance_m / 1000.0 / speed_kmh * 60.0).ceil().max(1.0);

        Ok(RouteSummary {
            distance: format!("{:.1} km", distance_m / 1000.0),
            duration: format!("{minutes:.0} mins"),
            encoded_path: polyline::encode(&[origin, destination]),
        })
    }
}

impl GeolocationSource for OfflineProviders {
    fn current_position(&self) -> Result<LatLng, String> {
        self.position
            .ok_or_else(|| "Geolocation is not available".to_string())
    }
}

impl SnapshotProvider for OfflineProviders {
    fn snapshot(&self, request: &SnapshotRequest) -> Result<Vec<u8>, String> {
        if self.fail_snapshot {
            return Err("Snapshot service unavailable".into());
        }

        // Einfarbiger Platzhalter in der angefragten Größe
        let (w, h) = request.size_px;
        let image = image::RgbaImage::from_pixel(w.max(1), h.max(1), image::Rgba([232, 236, 241, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| format!("Placeholder snapshot failed: {e}"))?;
        Ok(bytes)
    }
}
