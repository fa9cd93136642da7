//! Zentrale Konfiguration für den SitePlan Map Annotator.
//!
//! `AnnotatorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::geo::LatLng;
use crate::core::surface::OverlayStyle;

// ── Kamera ──────────────────────────────────────────────────────────

/// Minimaler Zoom (Weltansicht).
pub const ZOOM_MIN: f64 = 2.0;
/// Maximaler Zoom (Hausnummern-Ebene).
pub const ZOOM_MAX: f64 = 21.0;
/// Zoom-Schritt bei Menü-Buttons / Shortcuts.
pub const ZOOM_STEP: f64 = 1.0;
/// Standard-Kartenzentrum (Zürich).
pub const INITIAL_CENTER: LatLng = LatLng::new(47.3769, 8.5417);
/// Standard-Zoom beim Start.
pub const INITIAL_ZOOM: f64 = 13.0;

// ── Markup-Stil ─────────────────────────────────────────────────────

/// Standard-Strichfarbe neuer Overlays (RGBA: Rot).
pub const STROKE_COLOR_DEFAULT: [f32; 4] = [0.89, 0.13, 0.13, 1.0];
/// Standard-Füllfarbe neuer Overlays (RGBA: Rot, transparent).
pub const FILL_COLOR_DEFAULT: [f32; 4] = [0.89, 0.13, 0.13, 0.25];
/// Standard-Strichstärke in Pixeln.
pub const STROKE_WEIGHT_DEFAULT_PX: f32 = 2.0;
/// Strichfarbe der Selektions-Hervorhebung (RGBA: Blau).
pub const HIGHLIGHT_STROKE_COLOR: [f32; 4] = [0.15, 0.45, 1.0, 1.0];

// ── Route-Rendering ─────────────────────────────────────────────────

/// Strichfarbe des Routenpfads (RGBA: Indigo).
pub const ROUTE_STROKE_COLOR: [f32; 4] = [0.25, 0.32, 0.9, 0.9];
/// Strichstärke des Routenpfads in Pixeln.
pub const ROUTE_STROKE_WEIGHT_PX: f32 = 4.0;
/// Rand beim Einpassen der Routen-Bounds, in Pixeln.
pub const FIT_BOUNDS_PADDING_PX: f32 = 48.0;

// ── Adress-Suche ────────────────────────────────────────────────────

/// Debounce-Intervall der Autocomplete-Anfragen in Millisekunden.
pub const SUGGEST_DEBOUNCE_MS: u64 = 250;
/// Minimale (getrimmte) Eingabelänge für Autocomplete.
pub const SUGGEST_MIN_LEN: usize = 3;
/// Obergrenze angezeigter Vorschläge.
pub const SUGGEST_MAX: usize = 6;

// ── Export ──────────────────────────────────────────────────────────

/// Kantenlänge des Static-Map-Snapshots in Pixeln.
pub const SNAPSHOT_SIZE_PX: (u32, u32) = (640, 640);

/// Umgebungsvariable, die den Provider-API-Schlüssel übersteuert.
pub const API_KEY_ENV: &str = "SITEPLAN_MAPS_API_KEY";

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `siteplan_map_annotator.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorOptions {
    // ── Markup ──────────────────────────────────────────────────
    /// Standard-Strichfarbe neuer Overlays (RGBA)
    pub stroke_color: [f32; 4],
    /// Standard-Füllfarbe neuer Overlays (RGBA)
    pub fill_color: [f32; 4],
    /// Standard-Strichstärke in Pixeln
    pub stroke_weight_px: f32,
    /// Strichfarbe der Selektions-Hervorhebung
    pub highlight_stroke_color: [f32; 4],

    // ── Route ───────────────────────────────────────────────────
    /// Strichfarbe des Routenpfads
    pub route_stroke_color: [f32; 4],
    /// Strichstärke des Routenpfads in Pixeln
    pub route_stroke_weight_px: f32,
    /// Rand beim Einpassen der Routen-Bounds in Pixeln
    pub fit_bounds_padding_px: f32,

    // ── Suche ───────────────────────────────────────────────────
    /// Debounce-Intervall der Autocomplete-Anfragen in Millisekunden
    pub suggest_debounce_ms: u64,
    /// Minimale Eingabelänge für Autocomplete
    pub suggest_min_len: usize,
    /// Obergrenze angezeigter Vorschläge
    pub suggest_max: usize,

    // ── Kamera ──────────────────────────────────────────────────
    /// Kartenzentrum beim Start
    pub initial_center: LatLng,
    /// Zoom beim Start
    pub initial_zoom: f64,

    // ── Provider ────────────────────────────────────────────────
    /// API-Schlüssel des Mapping-Providers (leer = Offline-Demo)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for AnnotatorOptions {
    fn default() -> Self {
        Self {
            stroke_color: STROKE_COLOR_DEFAULT,
            fill_color: FILL_COLOR_DEFAULT,
            stroke_weight_px: STROKE_WEIGHT_DEFAULT_PX,
            highlight_stroke_color: HIGHLIGHT_STROKE_COLOR,

            route_stroke_color: ROUTE_STROKE_COLOR,
            route_stroke_weight_px: ROUTE_STROKE_WEIGHT_PX,
            fit_bounds_padding_px: FIT_BOUNDS_PADDING_PX,

            suggest_debounce_ms: SUGGEST_DEBOUNCE_MS,
            suggest_min_len: SUGGEST_MIN_LEN,
            suggest_max: SUGGEST_MAX,

            initial_center: INITIAL_CENTER,
            initial_zoom: INITIAL_ZOOM,

            api_key: None,
        }
    }
}

impl AnnotatorOptions {
    /// Standard-Stil für neue Overlays aus den Optionen.
    pub fn default_style(&self) -> OverlayStyle {
        OverlayStyle {
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            stroke_weight_px: self.stroke_weight_px,
        }
    }

    /// Effektiver API-Schlüssel: Umgebungsvariable schlägt Optionsdatei.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert die Optionen als TOML.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad der Optionsdatei neben der Binary (Fallback: Arbeitsverzeichnis).
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("siteplan_map_annotator.toml")
    }
}
