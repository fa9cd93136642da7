//! Google-Maps-Web-APIs als Provider-Implementierung.
//!
//! Konsumiert Geocoding-, Places-Autocomplete-, Directions-,
//! Geolocation- und Static-Maps-Endpunkte über blockendes HTTP (ureq);
//! die Aufrufe laufen ausschließlich auf dem Port-Worker-Thread.

use std::io::Read;
use std::time::Duration;

use serde_json::Value;

use crate::core::geo::LatLng;

use super::types::{
    GeocodeResult, GeocodingProvider, GeolocationSource, RouteSummary, RoutingProvider,
    SnapshotProvider, SnapshotRequest, Suggestion, TravelMode,
};

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const AUTOCOMPLETE_URL: &str = "https://maps.googleapis.com/maps/api/place/autocomplete/json";
const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";
const GEOLOCATION_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximale Snapshot-Größe (Schutz gegen fehlgeleitete Antworten).
const SNAPSHOT_MAX_BYTES: u64 = 8 * 1024 * 1024;

/// Provider-Verbund über die Google-Maps-Web-APIs.
pub struct GoogleProviders {
    agent: ureq::Agent,
    api_key: String,
}

impl GoogleProviders {
    pub fn new(api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(HTTP_TIMEOUT)
            .user_agent("siteplan-map-annotator")
            .build();
        Self { agent, api_key }
    }

    fn get_json(&self, url: &str) -> Result<Value, String> {
        self.agent
            .get(url)
            .call()
            .map_err(|e| format!("Provider request failed: {e}"))?
            .into_json::<Value>()
            .map_err(|e| format!("Provider response was not valid JSON: {e}"))
    }

    /// Prüft das `status`-Feld der Antwort; `ZERO_RESULTS` ist kein
    /// Fehler, sondern eine leere Antwort.
    fn check_status(payload: &Value) -> Result<bool, String> {
        match payload["status"].as_str() {
            Some("OK") => Ok(true),
            Some("ZERO_RESULTS") => Ok(false),
            Some(status) => {
                let detail = payload["error_message"].as_str().unwrap_or("");
                Err(format!("Provider status {status} {detail}").trim().to_string())
            }
            None => Err("Provider response missing status field".into()),
        }
    }

    fn parse_geocode(payload: &Value) -> Result<GeocodeResult, String> {
        let result = payload["results"]
            .get(0)
            .ok_or_else(|| "Provider returned no geocoding results".to_string())?;
        let location = &result["geometry"]["location"];
        let (Some(lat), Some(lng)) = (location["lat"].as_f64(), location["lng"].as_f64()) else {
            return Err("Geocoding result missing coordinates".into());
        };
        let formatted_address = result["formatted_address"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        Ok(GeocodeResult {
            coordinate: LatLng::new(lat, lng),
            formatted_address,
        })
    }
}

impl GeocodingProvider for GoogleProviders {
    fn forward(&self, query: &str) -> Result<GeocodeResult, String> {
        let url = format!(
            "{GEOCODE_URL}?address={}&key={}",
            urlencoding::encode(query),
            self.api_key
        );
        let payload = self.get_json(&url)?;
        if !Self::check_status(&payload)? {
            return Err(format!("No results for \"{query}\""));
        }
        Self::parse_geocode(&payload)
    }

    fn by_reference(&self, place_ref: &str) -> Result<GeocodeResult, String> {
        // place_id-Geocoding, kein erneuter Freitext-Geocode
        let url = format!(
            "{GEOCODE_URL}?place_id={}&key={}",
            urlencoding::encode(place_ref),
            self.api_key
        );
        let payload = self.get_json(&url)?;
        if !Self::check_status(&payload)? {
            return Err("Place reference could not be resolved".into());
        }
        Self::parse_geocode(&payload)
    }

    fn reverse(&self, coordinate: LatLng) -> Result<Option<String>, String> {
        let url = format!(
            "{GEOCODE_URL}?latlng={:.6},{:.6}&key={}",
            coordinate.lat, coordinate.lng, self.api_key
        );
        let payload = self.get_json(&url)?;
        if !Self::check_status(&payload)? {
            return Ok(None);
        }
        Ok(payload["results"][0]["formatted_address"]
            .as_str()
            .map(str::to_string))
    }

    fn autocomplete(&self, input: &str) -> Result<Vec<Suggestion>, String> {
        let url = format!(
            "{AUTOCOMPLETE_URL}?input={}&key={}",
            urlencoding::encode(input),
            self.api_key
        );
        let payload = self.get_json(&url)?;
        if !Self::check_status(&payload)? {
            return Ok(Vec::new());
        }
        let predictions = payload["predictions"].as_array().cloned().unwrap_or_default();
        // Kein Cap: die Obergrenze aus den Optionen zieht der Handler
        Ok(predictions
            .iter()
            .filter_map(|p| {
                let display = p["description"].as_str()?.to_string();
                let place_ref = p["place_id"].as_str().map(str::to_string);
                Some(Suggestion { place_ref, display })
            })
            .collect())
    }
}

impl RoutingProvider for GoogleProviders {
    fn route(
        &self,
        origin: LatLng,
        destination: LatLng,
        mode: TravelMode,
    ) -> Result<RouteSummary, String> {
        let url = format!(
            "{DIRECTIONS_URL}?origin={:.6},{:.6}&destination={:.6},{:.6}&mode={}&key={}",
            origin.lat,
            origin.lng,
            destination.lat,
            destination.lng,
            mode.provider_param(),
            self.api_key
        );
        let payload = self.get_json(&url)?;
        if !Self::check_status(&payload)? {
            return Err("No route found".into());
        }

        let route = payload["routes"]
            .get(0)
            .ok_or_else(|| "Provider returned no routes".to_string())?;
        let leg = route["legs"]
            .get(0)
            .ok_or_else(|| "Route has no legs".to_string())?;
        let encoded_path = route["overview_polyline"]["points"]
            .as_str()
            .ok_or_else(|| "Route has no overview polyline".to_string())?
            .to_string();

        Ok(RouteSummary {
            distance: leg["distance"]["text"].as_str().unwrap_or("?").to_string(),
            duration: leg["duration"]["text"].as_str().unwrap_or("?").to_string(),
            encoded_path,
        })
    }
}

impl GeolocationSource for GoogleProviders {
    fn current_position(&self) -> Result<LatLng, String> {
        let url = format!("{GEOLOCATION_URL}?key={}", self.api_key);
        let payload = self
            .agent
            .post(&url)
            .send_json(serde_json::json!({}))
            .map_err(|e| format!("Geolocation request failed: {e}"))?
            .into_json::<Value>()
            .map_err(|e| format!("Geolocation response was not valid JSON: {e}"))?;

        let location = &payload["location"];
        match (location["lat"].as_f64(), location["lng"].as_f64()) {
            (Some(lat), Some(lng)) => Ok(LatLng::new(lat, lng)),
            _ => Err("Geolocation response missing coordinates".into()),
        }
    }
}

impl SnapshotProvider for GoogleProviders {
    fn snapshot(&self, request: &SnapshotRequest) -> Result<Vec<u8>, String> {
        let mut url = format!(
            "{STATIC_MAP_URL}?center={:.6},{:.6}&zoom={}&size={}x{}&maptype={}&key={}",
            request.center.lat,
            request.center.lng,
            request.zoom,
            request.size_px.0,
            request.size_px.1,
            request.map_type.provider_param(),
            self.api_key
        );
        for (label, position) in &request.markers {
            url.push_str(&format!(
                "&markers=label:{label}%7C{:.6},{:.6}",
                position.lat, position.lng
            ));
        }
        if let Some(path) = &request.encoded_path {
            url.push_str(&format!("&path=enc:{}", urlencoding::encode(path)));
        }

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| format!("Snapshot request failed: {e}"))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(SNAPSHOT_MAX_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| format!("Snapshot download failed: {e}"))?;
        Ok(bytes)
    }
}

/// Deep-Link, der dieselbe Route in der Karten-App des Providers öffnet.
/// Reine String-Konstruktion, kein Netzwerkaufruf.
pub fn directions_deep_link(origin: &str, destination: &str, mode: TravelMode) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={}&destination={}&travelmode={}",
        urlencoding::encode(origin),
        urlencoding::encode(destination),
        mode.provider_param()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_link_enkodiert_endpunkte() {
        let link = directions_deep_link("123 Main St", "456 Oak Ave", TravelMode::Walking);
        assert_eq!(
            link,
            "https://www.google.com/maps/dir/?api=1&origin=123%20Main%20St&destination=456%20Oak%20Ave&travelmode=walking"
        );
    }

    #[test]
    fn parse_geocode_liest_erstes_resultat() {
        let payload: Value = serde_json::from_str(
            r#"{
                "status": "OK",
                "results": [{
                    "formatted_address": "Bahnhofstrasse 1, 8001 Zürich",
                    "geometry": { "location": { "lat": 47.3675, "lng": 8.5392 } }
                }]
            }"#,
        )
        .unwrap();
        assert!(GoogleProviders::check_status(&payload).unwrap());
        let result = GoogleProviders::parse_geocode(&payload).unwrap();
        assert_eq!(result.formatted_address, "Bahnhofstrasse 1, 8001 Zürich");
        assert!((result.coordinate.lat - 47.3675).abs() < 1e-9);
    }

    #[test]
    fn check_status_zero_results_ist_kein_fehler() {
        let payload: Value =
            serde_json::from_str(r#"{ "status": "ZERO_RESULTS", "results": [] }"#).unwrap();
        assert!(!GoogleProviders::check_status(&payload).unwrap());
    }

    #[test]
    fn check_status_fehlerstatus_mit_detail() {
        let payload: Value = serde_json::from_str(
            r#"{ "status": "REQUEST_DENIED", "error_message": "key invalid" }"#,
        )
        .unwrap();
        let err = GoogleProviders::check_status(&payload).unwrap_err();
        assert!(err.contains("REQUEST_DENIED"));
        assert!(err.contains("key invalid"));
    }
}
