//! Encoded-Polyline-Codec (Präzision 1e-5, Vorzeichen-Zickzack, Base64-Offset 63).
//!
//! Der Routing-Provider liefert Routen-Geometrie als kompakten String;
//! zum Rendern wird in Koordinaten dekodiert, für Static-Map-Anfragen
//! wieder enkodiert.

use super::geo::LatLng;

const PRECISION: f64 = 1e5;

/// Dekodiert einen Polyline-String in eine Koordinatenfolge.
/// Abgeschnittene oder korrupte Eingaben liefern die bis dahin
/// dekodierten Punkte (nie einen Panic).
pub fn decode(encoded: &str) -> Vec<LatLng> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0usize;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while index < bytes.len() {
        let Some((d_lat, next)) = decode_value(bytes, index) else {
            break;
        };
        let Some((d_lng, next)) = decode_value(bytes, next) else {
            break;
        };
        index = next;
        lat += d_lat;
        lng += d_lng;
        points.push(LatLng::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    points
}

/// Enkodiert eine Koordinatenfolge als Polyline-String.
pub fn encode(points: &[LatLng]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for p in points {
        let lat = (p.lat * PRECISION).round() as i64;
        let lng = (p.lng * PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Liest einen varint-kodierten Delta-Wert ab `index`. `None` wenn der
/// Stream mitten in einem Wert endet oder ein Byte außerhalb des
/// gültigen Bereichs liegt.
fn decode_value(bytes: &[u8], mut index: usize) -> Option<(i64, usize)> {
    let mut result = 0i64;
    let mut shift = 0u32;

    loop {
        let byte = *bytes.get(index)?;
        if !(63..=126).contains(&byte) {
            return None;
        }
        index += 1;
        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk & 0x20 == 0 {
            break;
        }
    }

    // Zickzack: niedrigstes Bit trägt das Vorzeichen
    let value = if result & 1 != 0 { !(result >> 1) } else { result >> 1 };
    Some((value, index))
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 } as u64;

    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}
