//! Export der aktuellen Karte als ZIP-Dokument.
//!
//! Das Dokument enthält zwei Seiten: das Karten-Snapshot als PNG und
//! eine Textzusammenfassung (Sicht, Overlays, Route). Scheitert der
//! Snapshot-Dienst, entsteht ein reines Text-Dokument statt gar keinem
//! Export.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use chrono::Local;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::geo::LatLng;
use crate::core::surface::GeometryKind;
use crate::providers::{MapType, TravelMode};

/// Fertig komponiertes Export-Dokument, wartet auf Speichern oder Verwerfen.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub suggested_filename: String,
}

/// Eingaben für die Textzusammenfassung, von der App-Struktur entkoppelt.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub center: LatLng,
    pub zoom: f64,
    pub map_type: MapType,
    pub address_label: Option<String>,
    pub overlay_counts: Vec<(GeometryKind, usize)>,
    pub route: Option<RouteSummaryLines>,
}

/// Routen-Anteil der Zusammenfassung, nur bei berechneter Route vorhanden.
#[derive(Debug, Clone)]
pub struct RouteSummaryLines {
    pub origin: String,
    pub destination: String,
    pub travel_mode: TravelMode,
    pub distance: String,
    pub duration: String,
    pub deep_link: String,
}

impl ExportSummary {
    /// Zeilen der Textseite `summary.txt`.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Map export summary".to_string(),
            format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
            String::new(),
            format!("Center: {}", self.center.display()),
            format!("Zoom: {:.0}", self.zoom),
            format!("Map type: {}", self.map_type.label()),
        ];
        if let Some(address) = &self.address_label {
            lines.push(format!("Address: {address}"));
        }

        lines.push(String::new());
        if self.overlay_counts.is_empty() {
            lines.push("Annotations: none".to_string());
        } else {
            lines.push("Annotations:".to_string());
            for (kind, count) in &self.overlay_counts {
                lines.push(format!("  {} x {}", count, kind.label()));
            }
        }

        if let Some(route) = &self.route {
            lines.push(String::new());
            lines.push("Route:".to_string());
            lines.push(format!("  From: {}", route.origin));
            lines.push(format!("  To: {}", route.destination));
            lines.push(format!("  Mode: {}", route.travel_mode.label()));
            lines.push(format!(
                "  {} in {}",
                route.distance, route.duration
            ));
            lines.push(format!("  Link: {}", route.deep_link));
        }

        lines
    }
}

/// Dateiname mit lokalem Zeitstempel, z. B. `map-export-20260830-142501.zip`.
pub fn suggested_filename() -> String {
    format!("map-export-{}.zip", Local::now().format("%Y%m%d-%H%M%S"))
}

/// Komponiert das Export-ZIP aus Snapshot und Zusammenfassung.
///
/// `snapshot` ist das Ergebnis des Snapshot-Dienstes; bei `Err` fehlt
/// die PNG-Seite und die Textseite vermerkt den Ausfall.
pub fn compose_document(
    summary: &ExportSummary,
    snapshot: Result<Vec<u8>, String>,
) -> Result<ExportArtifact> {
    let mut lines = summary.lines();

    let png_page = match snapshot {
        Ok(bytes) => Some(normalize_png(&bytes)?),
        Err(reason) => {
            lines.push(String::new());
            lines.push(format!("Map image unavailable: {reason}"));
            None
        }
    };

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    if let Some(png) = png_page {
        writer
            .start_file("map.png", options)
            .context("ZIP-Eintrag map.png anlegen")?;
        writer.write_all(&png).context("map.png schreiben")?;
    }

    writer
        .start_file("summary.txt", options)
        .context("ZIP-Eintrag summary.txt anlegen")?;
    writer
        .write_all(lines.join("\n").as_bytes())
        .context("summary.txt schreiben")?;

    let cursor = writer.finish().context("ZIP abschließen")?;
    Ok(ExportArtifact {
        bytes: cursor.into_inner(),
        suggested_filename: suggested_filename(),
    })
}

/// Dekodiert das Snapshot-Bild und kodiert es einheitlich als PNG.
///
/// Der Dienst darf JPEG liefern; die Dokumentseite ist immer PNG.
fn normalize_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let image = image::load_from_memory(bytes).context("Snapshot-Bild dekodieren")?;
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("Snapshot als PNG kodieren")?;
    Ok(out)
}
