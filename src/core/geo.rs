//! Geo-Primitive: Koordinaten, Bounds und Web-Mercator-Projektion.

use serde::{Deserialize, Serialize};

/// Erdradius in Metern (WGS84, sphärische Näherung).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;
/// Kachelgröße der Mercator-Weltkarte in Pixeln bei Zoom 0.
pub const TILE_SIZE_PX: f64 = 256.0;

/// Geografische Koordinate (Breite/Länge in Grad).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Erstellt eine Koordinate ohne Bereichsprüfung.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Anzeige-String mit 6 Nachkommastellen ("47.376887, 8.541694").
    pub fn display(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }

    /// Parst Freitext der Form "lat, lng" (Komma oder Leerzeichen getrennt).
    /// Gibt `None` zurück wenn der Text keine gültige Koordinate ist.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let lat: f64 = parts.next()?.parse().ok()?;
        let lng: f64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    /// Großkreis-Distanz in Metern (Haversine).
    pub fn distance_m(&self, other: &LatLng) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

/// Achsenparalleles Bounds-Rechteck in Grad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    /// Erstellt Bounds aus einem einzelnen Punkt (Null-Ausdehnung).
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    /// Erstellt Bounds über alle Punkte. `None` bei leerer Eingabe.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::from_point(*first);
        for p in rest {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// Erweitert die Bounds um einen Punkt.
    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    /// Mittelpunkt der Bounds.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

/// Projiziert eine Koordinate auf Welt-Pixel im Web-Mercator bei `zoom`.
pub fn project(p: LatLng, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE_PX * 2f64.powf(zoom);
    let x = (p.lng + 180.0) / 360.0 * scale;
    let lat_rad = p.lat.to_radians().clamp(-1.484_422, 1.484_422);
    let y = (1.0 - ((lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI)) / 2.0 * scale;
    (x, y)
}

/// Umkehrung von [`project`]: Welt-Pixel zurück in eine Koordinate.
pub fn unproject(x: f64, y: f64, zoom: f64) -> LatLng {
    let scale = TILE_SIZE_PX * 2f64.powf(zoom);
    let lng = x / scale * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / scale);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Meter pro Bildschirm-Pixel am gegebenen Breitengrad und Zoom.
pub fn meters_per_pixel(lat: f64, zoom: f64) -> f64 {
    156_543.033_92 * lat.to_radians().cos() / 2f64.powf(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_akzeptiert_lat_lng_mit_komma() {
        let p = LatLng::parse("47.3769, 8.5417").unwrap();
        assert_relative_eq!(p.lat, 47.3769);
        assert_relative_eq!(p.lng, 8.5417);
    }

    #[test]
    fn parse_akzeptiert_lat_lng_mit_leerzeichen() {
        let p = LatLng::parse("47.37 8.54").unwrap();
        assert_relative_eq!(p.lat, 47.37);
        assert_relative_eq!(p.lng, 8.54);
    }

    #[test]
    fn parse_lehnt_ungueltige_eingaben_ab() {
        assert!(LatLng::parse("123 Main St").is_none());
        assert!(LatLng::parse("91.0, 0.0").is_none());
        assert!(LatLng::parse("0.0, 181.0").is_none());
        assert!(LatLng::parse("1.0, 2.0, 3.0").is_none());
        assert!(LatLng::parse("").is_none());
    }

    #[test]
    fn display_roundtrip_durch_parse() {
        let p = LatLng::new(-33.865143, 151.2099);
        let back = LatLng::parse(&p.display()).unwrap();
        assert_relative_eq!(back.lat, p.lat, epsilon = 1e-6);
        assert_relative_eq!(back.lng, p.lng, epsilon = 1e-6);
    }

    #[test]
    fn project_unproject_roundtrip() {
        let p = LatLng::new(40.712776, -74.005974);
        let (x, y) = project(p, 12.0);
        let back = unproject(x, y, 12.0);
        assert_relative_eq!(back.lat, p.lat, epsilon = 1e-9);
        assert_relative_eq!(back.lng, p.lng, epsilon = 1e-9);
    }

    #[test]
    fn distance_newyork_london_plausibel() {
        let ny = LatLng::new(40.7128, -74.0060);
        let london = LatLng::new(51.5074, -0.1278);
        let d = ny.distance_m(&london);
        assert!((5_500_000.0..5_700_000.0).contains(&d), "d = {d}");
    }

    #[test]
    fn bounds_extend_und_center() {
        let mut b = LatLngBounds::from_point(LatLng::new(10.0, 20.0));
        b.extend(LatLng::new(12.0, 18.0));
        assert_relative_eq!(b.south, 10.0);
        assert_relative_eq!(b.north, 12.0);
        assert_relative_eq!(b.west, 18.0);
        assert_relative_eq!(b.east, 20.0);
        let c = b.center();
        assert_relative_eq!(c.lat, 11.0);
        assert_relative_eq!(c.lng, 19.0);
    }
}
