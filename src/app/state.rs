//! Application State — zentrale Datenhaltung.

use crate::core::surface::{DrawingMode, OverlayHandle, SceneSurface};
use crate::core::{LatLng, OverlayStore};
use crate::export::ExportArtifact;
use crate::providers::{MapType, ProviderPort, Suggestion, TravelMode};
use crate::shared::AnnotatorOptions;

/// Aktives Markup-Werkzeug.
///
/// One-Shot-Semantik ist eine Eigenschaft der Werkzeugtabelle
/// ([`MarkupTool::one_shot`]), kein Sonderfall im Handler — ein
/// künftiges One-Shot-Werkzeug braucht keine neue Verzweigung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupTool {
    /// Standard: Overlays selektieren, Karte verschieben
    #[default]
    Select,
    /// Einzelnen Pin setzen (One-Shot)
    Marker,
    /// Linienzug zeichnen
    Line,
    /// Linienzug mit Pfeilspitze zeichnen
    Arrow,
    /// Rechteck aufziehen
    Rectangle,
    /// Kreis aufziehen
    Circle,
    /// Polygon zeichnen
    Polygon,
}

impl MarkupTool {
    pub const ALL: [MarkupTool; 7] = [
        MarkupTool::Select,
        MarkupTool::Marker,
        MarkupTool::Line,
        MarkupTool::Arrow,
        MarkupTool::Rectangle,
        MarkupTool::Circle,
        MarkupTool::Polygon,
    ];

    /// Nativer Zeichenmodus der Kartenoberfläche.
    /// Linie und Pfeil teilen sich den Polyline-Modus; der Unterschied
    /// wird erst beim Abschluss als `is_arrow` festgehalten.
    pub fn drawing_mode(&self) -> Option<DrawingMode> {
        match self {
            MarkupTool::Select => None,
            MarkupTool::Marker => Some(DrawingMode::Marker),
            MarkupTool::Line | MarkupTool::Arrow => Some(DrawingMode::Polyline),
            MarkupTool::Rectangle => Some(DrawingMode::Rectangle),
            MarkupTool::Circle => Some(DrawingMode::Circle),
            MarkupTool::Polygon => Some(DrawingMode::Polygon),
        }
    }

    /// Kehrt nach einem abgeschlossenen Zeichnen zum Select-Werkzeug
    /// zurück (ein Pin ist eine Einzelaktion, kein Modus).
    pub fn one_shot(&self) -> bool {
        matches!(self, MarkupTool::Marker)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkupTool::Select => "Select",
            MarkupTool::Marker => "Marker",
            MarkupTool::Line => "Line",
            MarkupTool::Arrow => "Arrow",
            MarkupTool::Rectangle => "Rectangle",
            MarkupTool::Circle => "Circle",
            MarkupTool::Polygon => "Polygon",
        }
    }
}

/// Zustand des aktuellen Markup-Werkzeugs.
#[derive(Default)]
pub struct EditorToolState {
    /// Aktives Werkzeug
    pub active_tool: MarkupTool,
}

/// Ausstehende Autocomplete-Anfrage (Debounce läuft).
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSuggest {
    /// Eingabetext zum Zeitpunkt des letzten Tastendrucks
    pub input: String,
    /// Fälligkeitszeitpunkt in Millisekunden (monotone UI-Uhr)
    pub due_ms: f64,
}

/// Zustand der Adress-Suche (transient pro Eingabe).
#[derive(Default)]
pub struct ResolverState {
    /// Roher Eingabetext des Suchfelds
    pub input: String,
    /// Begrenzte Vorschlagsliste (≤ `suggest_max`)
    pub suggestions: Vec<Suggestion>,
    /// Laufender Debounce, `None` = kein Timer aktiv
    pub pending_suggest: Option<PendingSuggest>,
    /// Sequenznummern der logischen Anfrageströme
    pub suggest_seq: u64,
    pub forward_seq: u64,
    pub reverse_seq: u64,
}

/// Berechnete Route (einzelner aktueller Wert, keine Historie).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
    pub origin: String,
    pub destination: String,
    pub origin_coordinate: LatLng,
    pub destination_coordinate: LatLng,
    pub travel_mode: TravelMode,
    /// Formatierte Provider-Strings, lokal nicht neu berechnet
    pub distance: String,
    pub duration: String,
    pub encoded_path: String,
    pub provider_deep_link: String,
}

/// Native Handles der gerenderten Route (Pfad + Endpunkt-Marker).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedRoute {
    pub path: OverlayHandle,
    pub origin_marker: OverlayHandle,
    pub destination_marker: OverlayHandle,
}

/// Auflösungszustand eines Routen-Endpunkts.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointState {
    /// Vorwärts-Geokodierung läuft
    Resolving(String),
    /// Koordinate steht fest (mit Anzeige-Text)
    Resolved { display: String, coordinate: LatLng },
}

/// Laufende Routenberechnung: erst beide Endpunkte auflösen, dann die
/// Route anfragen. Die alte Route wird erst nach bestätigtem Erfolg
/// abgeräumt.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRoute {
    pub seq: u64,
    pub mode: TravelMode,
    pub origin: EndpointState,
    pub destination: EndpointState,
}

/// Zustand des Routenplaners.
#[derive(Default)]
pub struct RoutePlannerState {
    /// Eingabefelder (Freitext oder "lat, lng")
    pub origin_input: String,
    pub destination_input: String,
    /// Gewählte Fortbewegungsart; Wechsel löst keine Neuberechnung aus
    pub travel_mode: TravelMode,
    /// Aktuell berechnete Route
    pub computed: Option<RouteState>,
    /// Native Handles der gerenderten Route
    pub rendered: Option<RenderedRoute>,
    /// Laufende Berechnung
    pub pending: Option<PendingRoute>,
    /// Sequenznummern (Route und Geolokation)
    pub route_seq: u64,
    pub geolocate_seq: u64,
}

/// View-bezogener Zustand (Kamera liegt auf der [`SceneSurface`]).
#[derive(Default)]
pub struct ViewState {
    /// Kartentyp für Rendering und Snapshots
    pub map_type: MapType,
    /// Menschenlesbares Label der zuletzt aufgelösten Position
    pub address_label: Option<String>,
}

/// Laufender Export (Snapshot angefragt, Artefakt fertig).
#[derive(Default)]
pub struct ExportState {
    pub seq: u64,
    /// Komponiertes Artefakt, bereit zum Speichern
    pub artifact: Option<ExportArtifact>,
}

/// UI-bezogener Zustand.
#[derive(Default)]
pub struct UiState {
    /// Temporäre, wegklickbare Statusnachricht
    pub status_message: Option<String>,
}

/// Hauptzustand der Anwendung.
pub struct AppState {
    /// Kartenoberfläche (Drawables, Zeichenmodus, Kamera)
    pub scene: SceneSurface,
    /// Provider-Schleuse (Anfragen raus, Antworten rein)
    pub port: Box<dyn ProviderPort>,
    /// Autoritative Markup-Overlays
    pub overlays: OverlayStore,
    /// Werkzeug-Zustand
    pub editor: EditorToolState,
    /// Adress-Suche
    pub resolver: ResolverState,
    /// Routenplaner
    pub route: RoutePlannerState,
    /// View-Zustand
    pub view: ViewState,
    /// Export-Zustand
    pub export: ExportState,
    /// UI-Zustand
    pub ui: UiState,
    /// Laufzeit-Optionen
    pub options: AnnotatorOptions,
}

impl AppState {
    /// Erstellt einen App-State mit Standard-Optionen.
    pub fn new(port: Box<dyn ProviderPort>) -> Self {
        Self::with_options(port, AnnotatorOptions::default())
    }

    pub fn with_options(port: Box<dyn ProviderPort>, options: AnnotatorOptions) -> Self {
        let scene = SceneSurface::new(options.initial_center, options.initial_zoom);
        let overlays = OverlayStore::new(options.default_style(), options.highlight_stroke_color);
        Self {
            scene,
            port,
            overlays,
            editor: EditorToolState::default(),
            resolver: ResolverState::default(),
            route: RoutePlannerState::default(),
            view: ViewState::default(),
            export: ExportState::default(),
            ui: UiState::default(),
            options,
        }
    }

    /// Setzt eine Statusnachricht (ersetzt eine bestehende).
    pub fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("Status: {message}");
        self.ui.status_message = Some(message);
    }
}
