//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.

use super::state::MarkupTool;
use crate::core::surface::{OverlayGeometry, OverlayHandle, OverlayStyle};
use crate::core::LatLng;
use crate::providers::{MapType, ProviderResponse, TravelMode};
use crate::shared::AnnotatorOptions;

/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    // ── Werkzeuge & Overlays ────────────────────────────────────
    /// Markup-Werkzeug wechseln
    SetMarkupToolRequested { tool: MarkupTool },
    /// Zeichengeste abgeschlossen (Geometrie steht fest)
    OverlayDrawingCompleted { geometry: OverlayGeometry },
    /// Abonniertes Overlay wurde angeklickt
    OverlayClicked { handle: OverlayHandle },
    /// Stil-Regler geändert (gilt für neue + selektiertes Overlay)
    ActiveStyleChanged { style: OverlayStyle },
    /// Selektiertes Overlay löschen (Delete/Backspace, Kontextmenü)
    DeleteSelectedRequested,
    /// Selektion aufheben (Escape)
    ClearSelectionRequested,
    /// Alle Overlays entfernen
    ClearAllOverlaysRequested,

    // ── Adress-Suche ────────────────────────────────────────────
    /// Suchfeld editiert (startet/ersetzt den Debounce)
    AddressInputEdited { text: String, now_ms: f64 },
    /// Suche abgeschickt (Enter)
    AddressSubmitted { text: String },
    /// Vorschlag angenommen (Index in der aktuellen Liste)
    SuggestionAccepted { index: usize },
    /// Frame-Tick der monotonen UI-Uhr (treibt den Debounce)
    TickElapsed { now_ms: f64 },

    // ── Routenplaner ────────────────────────────────────────────
    /// Startfeld editiert
    RouteOriginEdited { text: String },
    /// Zielfeld editiert
    RouteDestinationEdited { text: String },
    /// Fortbewegungsart gewechselt (keine Neuberechnung)
    TravelModeChanged { mode: TravelMode },
    /// Route berechnen
    ComputeRouteRequested,
    /// Start und Ziel tauschen (berechnet neu wenn beide gesetzt)
    SwapEndpointsRequested,
    /// Aktuelle Position als Start verwenden
    UseCurrentLocationRequested,
    /// Route und Eingaben zurücksetzen
    ClearRouteRequested,

    // ── Ansicht ─────────────────────────────────────────────────
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Kartentyp wechseln
    MapTypeChanged { map_type: MapType },
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
    /// Karte auf neues Zentrum verschieben (aus Drag berechnet)
    CameraPanned { center: LatLng },

    // ── Export ──────────────────────────────────────────────────
    /// Export anstoßen (Snapshot anfragen, dann komponieren)
    ExportRequested,
    /// Speicherpfad für das Artefakt gewählt
    ExportSavePathSelected { path: String },
    /// Artefakt verworfen (Dialog abgebrochen)
    ExportDiscarded,

    // ── Sonstiges ───────────────────────────────────────────────
    /// Statusnachricht weggeklickt
    StatusDismissed,
    /// Optionen geändert (sofortige Anwendung + Speichern)
    OptionsChanged { options: AnnotatorOptions },
    /// Provider-Antwort eingetroffen
    ProviderCompleted { response: ProviderResponse },
}

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    // ── Werkzeuge & Overlays ────────────────────────────────────
    /// Markup-Werkzeug wechseln (setzt den nativen Zeichenmodus)
    SetMarkupTool { tool: MarkupTool },
    /// Drawable erzeugen und in den Overlay-Store aufnehmen
    CompleteOverlayDrawing { geometry: OverlayGeometry },
    /// Overlay über sein Handle selektieren
    SelectOverlayByHandle { handle: OverlayHandle },
    /// Geteilten aktiven Stil setzen
    SetActiveStyle { style: OverlayStyle },
    /// Selektiertes Overlay löschen
    DeleteSelectedOverlay,
    /// Selektion aufheben
    ClearSelection,
    /// Alle Overlays entfernen
    ClearAllOverlays,

    // ── Adress-Suche ────────────────────────────────────────────
    /// Eingabe übernehmen, Vorschläge leeren, Debounce neu aufziehen
    EditAddressInput { text: String, now_ms: f64 },
    /// Freitext vorwärts geokodieren (Karte zentrieren)
    SubmitAddressQuery { text: String },
    /// Vorschlag annehmen (Referenz- oder Freitext-Pfad)
    AcceptSuggestion { index: usize },
    /// Fällige Debounce-Anfragen abschicken
    PumpDebounce { now_ms: f64 },

    // ── Routenplaner ────────────────────────────────────────────
    SetRouteOrigin { text: String },
    SetRouteDestination { text: String },
    SetTravelMode { mode: TravelMode },
    ComputeRoute,
    SwapEndpoints,
    UseCurrentLocation,
    ClearRoute,

    // ── Ansicht ─────────────────────────────────────────────────
    ZoomIn,
    ZoomOut,
    SetMapType { map_type: MapType },
    SetViewportSize { size: [f32; 2] },
    PanCamera { center: LatLng },

    // ── Export ──────────────────────────────────────────────────
    /// Snapshot anfragen und Komposition vorbereiten
    ComposeExport,
    /// Artefakt-Bytes an den gewählten Pfad schreiben
    WriteExportArtifact { path: String },
    /// Artefakt verwerfen
    DiscardExportArtifact,

    // ── Sonstiges ───────────────────────────────────────────────
    DismissStatus,
    /// Optionen anwenden und speichern
    ApplyOptions { options: AnnotatorOptions },
    /// Provider-Antwort in den Zustand einarbeiten
    ApplyProviderResponse { response: ProviderResponse },
}
