//! Kartenoberfläche: Drawable-Verwaltung, Zeichenmodus, Kamera.
//!
//! [`MapSurface`] ist die Schnittstelle zum Mapping-Provider (Overlays
//! erzeugen/entfernen/umstylen, Klick-Listener, Pan/Fit). [`SceneSurface`]
//! ist die konkrete Retained-Scene-Implementierung, die der egui-Viewport
//! rendert und auf der die Tests ihre Invarianten prüfen.

use indexmap::IndexMap;

use super::geo::{self, LatLng, LatLngBounds};

/// Exklusive Referenz auf ein Drawable der Kartenoberfläche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Abonnement-Handle eines Klick-Listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Nativer Zeichenmodus der Kartenoberfläche.
/// Linie und Pfeil teilen sich den Polyline-Modus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingMode {
    Marker,
    Polyline,
    Rectangle,
    Circle,
    Polygon,
}

/// Geometrie-Art eines Overlays (Tag des [`OverlayGeometry`]-Varianten-Typs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Marker,
    Polyline,
    Rectangle,
    Circle,
    Polygon,
}

impl GeometryKind {
    pub fn label(&self) -> &'static str {
        match self {
            GeometryKind::Marker => "Marker",
            GeometryKind::Polyline => "Polyline",
            GeometryKind::Rectangle => "Rectangle",
            GeometryKind::Circle => "Circle",
            GeometryKind::Polygon => "Polygon",
        }
    }
}

/// Geometrie eines Drawables.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayGeometry {
    Marker {
        position: LatLng,
        label: Option<String>,
    },
    Polyline {
        path: Vec<LatLng>,
    },
    Rectangle {
        bounds: LatLngBounds,
    },
    Circle {
        center: LatLng,
        radius_m: f64,
    },
    Polygon {
        ring: Vec<LatLng>,
    },
}

impl OverlayGeometry {
    /// Geometrie-Art als Tag.
    pub fn kind(&self) -> GeometryKind {
        match self {
            OverlayGeometry::Marker { .. } => GeometryKind::Marker,
            OverlayGeometry::Polyline { .. } => GeometryKind::Polyline,
            OverlayGeometry::Rectangle { .. } => GeometryKind::Rectangle,
            OverlayGeometry::Circle { .. } => GeometryKind::Circle,
            OverlayGeometry::Polygon { .. } => GeometryKind::Polygon,
        }
    }

    /// Ankerpunkt der Geometrie (für Reverse-Geocoding und Labels).
    pub fn anchor(&self) -> LatLng {
        match self {
            OverlayGeometry::Marker { position, .. } => *position,
            OverlayGeometry::Polyline { path } => path.first().copied().unwrap_or(LatLng::new(0.0, 0.0)),
            OverlayGeometry::Rectangle { bounds } => bounds.center(),
            OverlayGeometry::Circle { center, .. } => *center,
            OverlayGeometry::Polygon { ring } => ring.first().copied().unwrap_or(LatLng::new(0.0, 0.0)),
        }
    }
}

/// Darstellungsstil eines Overlays (RGBA-Farben, Strichstärke in Pixeln).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub stroke_color: [f32; 4],
    pub fill_color: [f32; 4],
    pub stroke_weight_px: f32,
}

/// Schnittstelle zur Kartenoberfläche des Mapping-Providers.
///
/// Der Overlay-Store ist der einzige Mutator der Markup-Overlays;
/// Routen-Rendering verwaltet seine eigenen Handles über dieselbe
/// Schnittstelle. Operationen auf bereits entfernten Handles sind
/// stille No-Ops.
pub trait MapSurface {
    /// Setzt den nativen Zeichenmodus (`None` = Selektionsmodus).
    fn set_drawing_mode(&mut self, mode: Option<DrawingMode>);
    /// Erzeugt ein Drawable und gibt dessen Handle zurück.
    fn add_overlay(&mut self, geometry: OverlayGeometry, style: &OverlayStyle) -> OverlayHandle;
    /// Wendet einen Stil auf ein bestehendes Drawable an.
    fn apply_style(&mut self, handle: OverlayHandle, style: &OverlayStyle);
    /// Entfernt ein Drawable (inklusive aller Listener-Zuordnungen).
    fn remove_overlay(&mut self, handle: OverlayHandle);
    /// Abonniert Klick-Ereignisse eines Drawables.
    /// `None` wenn das Handle nicht (mehr) existiert.
    fn subscribe_click(&mut self, handle: OverlayHandle) -> Option<ListenerHandle>;
    /// Entfernt ein Klick-Abonnement. Idempotent.
    fn unsubscribe(&mut self, listener: ListenerHandle);
    /// Zentriert die Karte auf eine Koordinate.
    fn pan_to(&mut self, center: LatLng);
    /// Passt Kamera so an, dass die Bounds mit Rand sichtbar sind.
    fn fit_bounds(&mut self, bounds: LatLngBounds, padding_px: f32);
    /// Anzahl der aktuell lebenden Drawables.
    fn live_overlay_count(&self) -> usize;
}

/// Ein Drawable in der Retained-Scene.
#[derive(Debug, Clone)]
pub struct SceneOverlay {
    pub geometry: OverlayGeometry,
    pub style: OverlayStyle,
}

/// Retained-Scene-Implementierung von [`MapSurface`].
pub struct SceneSurface {
    overlays: IndexMap<OverlayHandle, SceneOverlay>,
    listeners: IndexMap<ListenerHandle, OverlayHandle>,
    next_handle: u64,
    next_listener: u64,
    drawing_mode: Option<DrawingMode>,
    center: LatLng,
    zoom: f64,
    viewport_size: [f32; 2],
}

impl SceneSurface {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            overlays: IndexMap::new(),
            listeners: IndexMap::new(),
            next_handle: 1,
            next_listener: 1,
            drawing_mode: None,
            center,
            zoom,
            viewport_size: [1280.0, 720.0],
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(crate::shared::options::ZOOM_MIN, crate::shared::options::ZOOM_MAX);
    }

    pub fn drawing_mode(&self) -> Option<DrawingMode> {
        self.drawing_mode
    }

    pub fn viewport_size(&self) -> [f32; 2] {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: [f32; 2]) {
        self.viewport_size = size;
    }

    /// Drawables in Einfüge-Reihenfolge (Z-Order von unten nach oben).
    pub fn overlays(&self) -> impl Iterator<Item = (OverlayHandle, &SceneOverlay)> {
        self.overlays.iter().map(|(h, o)| (*h, o))
    }

    /// Geometrie eines Drawables, falls es noch lebt.
    pub fn geometry(&self, handle: OverlayHandle) -> Option<&OverlayGeometry> {
        self.overlays.get(&handle).map(|o| &o.geometry)
    }

    /// Ob für das Drawable ein Klick-Listener abonniert ist.
    pub fn is_clickable(&self, handle: OverlayHandle) -> bool {
        self.listeners.values().any(|h| *h == handle)
    }

    /// Anzahl der aktiven Klick-Abonnements (für Leak-Prüfungen in Tests).
    pub fn live_listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl MapSurface for SceneSurface {
    fn set_drawing_mode(&mut self, mode: Option<DrawingMode>) {
        self.drawing_mode = mode;
    }

    fn add_overlay(&mut self, geometry: OverlayGeometry, style: &OverlayStyle) -> OverlayHandle {
        let handle = OverlayHandle(self.next_handle);
        self.next_handle += 1;
        self.overlays.insert(
            handle,
            SceneOverlay {
                geometry,
                style: *style,
            },
        );
        handle
    }

    fn apply_style(&mut self, handle: OverlayHandle, style: &OverlayStyle) {
        match self.overlays.get_mut(&handle) {
            Some(overlay) => overlay.style = *style,
            None => log::debug!("apply_style auf entferntem Handle {handle:?} ignoriert"),
        }
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        if self.overlays.shift_remove(&handle).is_none() {
            log::debug!("remove_overlay auf entferntem Handle {handle:?} ignoriert");
        }
        self.listeners.retain(|_, h| *h != handle);
    }

    fn subscribe_click(&mut self, handle: OverlayHandle) -> Option<ListenerHandle> {
        if !self.overlays.contains_key(&handle) {
            return None;
        }
        let listener = ListenerHandle(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(listener, handle);
        Some(listener)
    }

    fn unsubscribe(&mut self, listener: ListenerHandle) {
        self.listeners.shift_remove(&listener);
    }

    fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, padding_px: f32) {
        self.center = bounds.center();

        let [vw, vh] = self.viewport_size;
        let usable_w = (vw - 2.0 * padding_px).max(32.0) as f64;
        let usable_h = (vh - 2.0 * padding_px).max(32.0) as f64;

        // Größten Zoom suchen, bei dem die Bounds in den nutzbaren Bereich passen
        let (x0, y0) = geo::project(LatLng::new(bounds.north, bounds.west), 0.0);
        let (x1, y1) = geo::project(LatLng::new(bounds.south, bounds.east), 0.0);
        let span_x = (x1 - x0).abs().max(1e-9);
        let span_y = (y1 - y0).abs().max(1e-9);

        let zoom_x = (usable_w / span_x).log2();
        let zoom_y = (usable_h / span_y).log2();
        self.set_zoom(zoom_x.min(zoom_y));
    }

    fn live_overlay_count(&self) -> usize {
        self.overlays.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> OverlayStyle {
        OverlayStyle {
            stroke_color: [1.0, 0.0, 0.0, 1.0],
            fill_color: [1.0, 0.0, 0.0, 0.3],
            stroke_weight_px: 2.0,
        }
    }

    #[test]
    fn remove_overlay_ist_idempotent() {
        let mut scene = SceneSurface::new(LatLng::new(0.0, 0.0), 10.0);
        let h = scene.add_overlay(
            OverlayGeometry::Marker {
                position: LatLng::new(1.0, 2.0),
                label: None,
            },
            &style(),
        );
        assert_eq!(scene.live_overlay_count(), 1);
        scene.remove_overlay(h);
        scene.remove_overlay(h);
        assert_eq!(scene.live_overlay_count(), 0);
    }

    #[test]
    fn remove_overlay_raeumt_listener_auf() {
        let mut scene = SceneSurface::new(LatLng::new(0.0, 0.0), 10.0);
        let h = scene.add_overlay(
            OverlayGeometry::Marker {
                position: LatLng::new(1.0, 2.0),
                label: None,
            },
            &style(),
        );
        let l = scene.subscribe_click(h).unwrap();
        assert!(scene.is_clickable(h));
        scene.remove_overlay(h);
        assert_eq!(scene.live_listener_count(), 0);
        // Doppeltes Unsubscribe bleibt ein No-Op
        scene.unsubscribe(l);
        scene.unsubscribe(l);
    }

    #[test]
    fn subscribe_auf_totem_handle_liefert_none() {
        let mut scene = SceneSurface::new(LatLng::new(0.0, 0.0), 10.0);
        assert!(scene.subscribe_click(OverlayHandle(99)).is_none());
    }

    #[test]
    fn fit_bounds_zentriert_und_begrenzt_zoom() {
        let mut scene = SceneSurface::new(LatLng::new(0.0, 0.0), 10.0);
        scene.set_viewport_size([800.0, 600.0]);
        let bounds = LatLngBounds {
            south: 47.0,
            west: 8.0,
            north: 48.0,
            east: 9.0,
        };
        scene.fit_bounds(bounds, 48.0);
        let c = scene.center();
        assert!((c.lat - 47.5).abs() < 1e-9);
        assert!((c.lng - 8.5).abs() < 1e-9);
        assert!(scene.zoom() >= crate::shared::options::ZOOM_MIN);
        assert!(scene.zoom() <= crate::shared::options::ZOOM_MAX);
    }
}
