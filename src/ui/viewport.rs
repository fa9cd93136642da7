//! Karten-Viewport: rendert die Szene in Web-Mercator und übersetzt
//! Maus-Gesten in `AppIntent`s.
//!
//! Die Gesten-Zwischenzustände (angefangene Polylinie, aufgezogenes
//! Rechteck, Pan) leben in [`ViewportInput`] beim Aufrufer; der
//! App-Zustand sieht erst die fertige Geometrie.

use crate::app::{AppIntent, AppState};
use crate::core::geo::{self, LatLng, LatLngBounds};
use crate::core::surface::{DrawingMode, OverlayGeometry, OverlayHandle, OverlayStyle};
use crate::providers::MapType;

/// Mindest-Drag in Pixeln, unter der ein Rechteck/Kreis verworfen wird.
const MIN_DRAG_PX: f32 = 4.0;
/// Klick-Toleranz beim Hit-Testing in Pixeln.
const HIT_TOLERANCE_PX: f32 = 8.0;
/// Marker-Radius in Pixeln.
const MARKER_RADIUS_PX: f32 = 6.0;

/// Gesten-Zwischenzustand des Viewports.
#[derive(Default)]
pub struct ViewportInput {
    /// Punkte einer angefangenen Polylinie/eines Polygons
    pending_points: Vec<LatLng>,
    /// Startkoordinate eines Rechteck-/Kreis-Drags
    drag_origin: Option<LatLng>,
    /// Pan läuft (unterdrückt den Klick beim Loslassen)
    panning: bool,
}

impl ViewportInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ob gerade eine Zeichengeste läuft (steuert die Escape-Behandlung).
    pub fn drawing_in_progress(&self) -> bool {
        !self.pending_points.is_empty() || self.drag_origin.is_some()
    }

    fn cancel(&mut self) {
        self.pending_points.clear();
        self.drag_origin = None;
    }
}

/// Bildschirm↔Koordinaten-Umrechnung für einen Frame.
struct Projector {
    rect: egui::Rect,
    zoom: f64,
    center_world: (f64, f64),
}

impl Projector {
    fn new(rect: egui::Rect, center: LatLng, zoom: f64) -> Self {
        Self {
            rect,
            zoom,
            center_world: geo::project(center, zoom),
        }
    }

    fn to_screen(&self, p: LatLng) -> egui::Pos2 {
        let (x, y) = geo::project(p, self.zoom);
        egui::pos2(
            self.rect.center().x + (x - self.center_world.0) as f32,
            self.rect.center().y + (y - self.center_world.1) as f32,
        )
    }

    fn to_latlng(&self, pos: egui::Pos2) -> LatLng {
        let x = self.center_world.0 + (pos.x - self.rect.center().x) as f64;
        let y = self.center_world.1 + (pos.y - self.rect.center().y) as f64;
        geo::unproject(x, y, self.zoom)
    }
}

/// Rendert den Viewport und gibt erzeugte Events zurück.
pub fn render_viewport(
    ctx: &egui::Context,
    state: &AppState,
    input: &mut ViewportInput,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

            let size = [rect.width(), rect.height()];
            if size != state.scene.viewport_size() {
                events.push(AppIntent::ViewportResized { size });
            }

            let projector = Projector::new(rect, state.scene.center(), state.scene.zoom());
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, background_color(state.view.map_type));

            for (handle, overlay) in state.scene.overlays() {
                let is_arrow = state
                    .overlays
                    .records()
                    .any(|r| r.handle == handle && r.is_arrow);
                paint_overlay(&painter, &projector, &overlay.geometry, &overlay.style, is_arrow);
            }

            paint_pending(&painter, &projector, state, input, response.hover_pos());

            events.extend(handle_pointer(ui, &response, &projector, state, input));
            events.extend(super::keyboard::collect_keyboard_intents(
                ui,
                state.overlays.selected_id().is_some(),
                state.editor.active_tool,
                input.drawing_in_progress(),
            ));
        });

    events
}

fn background_color(map_type: MapType) -> egui::Color32 {
    match map_type {
        MapType::Roadmap => egui::Color32::from_rgb(232, 236, 241),
        MapType::Satellite => egui::Color32::from_rgb(24, 30, 38),
        MapType::Hybrid => egui::Color32::from_rgb(40, 48, 58),
        MapType::Terrain => egui::Color32::from_rgb(222, 232, 214),
    }
}

fn to_color32(c: [f32; 4]) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (c[0] * 255.0) as u8,
        (c[1] * 255.0) as u8,
        (c[2] * 255.0) as u8,
        (c[3] * 255.0) as u8,
    )
}

fn paint_overlay(
    painter: &egui::Painter,
    projector: &Projector,
    geometry: &OverlayGeometry,
    style: &OverlayStyle,
    is_arrow: bool,
) {
    let stroke = egui::Stroke::new(style.stroke_weight_px, to_color32(style.stroke_color));
    let fill = to_color32(style.fill_color);

    match geometry {
        OverlayGeometry::Marker { position, label } => {
            let pos = projector.to_screen(*position);
            painter.circle(pos, MARKER_RADIUS_PX, fill, stroke);
            if let Some(label) = label {
                painter.text(
                    pos + egui::vec2(0.0, -(MARKER_RADIUS_PX + 4.0)),
                    egui::Align2::CENTER_BOTTOM,
                    label,
                    egui::FontId::proportional(12.0),
                    stroke.color,
                );
            }
        }
        OverlayGeometry::Polyline { path } => {
            let points: Vec<egui::Pos2> = path.iter().map(|p| projector.to_screen(*p)).collect();
            if points.len() >= 2 {
                if is_arrow {
                    paint_arrowhead(painter, &points, stroke);
                }
                painter.add(egui::Shape::line(points, stroke));
            }
        }
        OverlayGeometry::Rectangle { bounds } => {
            let rect = egui::Rect::from_two_pos(
                projector.to_screen(LatLng::new(bounds.north, bounds.west)),
                projector.to_screen(LatLng::new(bounds.south, bounds.east)),
            );
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
        }
        OverlayGeometry::Circle { center, radius_m } => {
            let pos = projector.to_screen(*center);
            let radius_px =
                (radius_m / geo::meters_per_pixel(center.lat, projector.zoom)) as f32;
            painter.circle(pos, radius_px, fill, stroke);
        }
        OverlayGeometry::Polygon { ring } => {
            let points: Vec<egui::Pos2> = ring.iter().map(|p| projector.to_screen(*p)).collect();
            if points.len() >= 3 {
                painter.add(egui::Shape::convex_polygon(points, fill, stroke));
            }
        }
    }
}

/// Pfeilspitze am letzten Segment: zwei kurze Schenkel gegen die
/// Laufrichtung.
fn paint_arrowhead(painter: &egui::Painter, points: &[egui::Pos2], stroke: egui::Stroke) {
    let (Some(&tip), Some(&prev)) = (points.last(), points.get(points.len().wrapping_sub(2)))
    else {
        return;
    };
    let dir = (tip - prev).normalized();
    if !dir.x.is_finite() || !dir.y.is_finite() {
        return;
    }
    let length = 12.0 + stroke.width * 2.0;
    let left = egui::vec2(-dir.x + dir.y * 0.6, -dir.y - dir.x * 0.6).normalized() * length;
    let right = egui::vec2(-dir.x - dir.y * 0.6, -dir.y + dir.x * 0.6).normalized() * length;
    painter.line_segment([tip, tip + left], stroke);
    painter.line_segment([tip, tip + right], stroke);
}

/// Vorschau der laufenden Zeichengeste, halbtransparent im aktiven Stil.
fn paint_pending(
    painter: &egui::Painter,
    projector: &Projector,
    state: &AppState,
    input: &ViewportInput,
    hover: Option<egui::Pos2>,
) {
    let style = state.overlays.active_style();
    let mut color = to_color32(style.stroke_color);
    color = color.gamma_multiply(0.7);
    let stroke = egui::Stroke::new(style.stroke_weight_px, color);

    if !input.pending_points.is_empty() {
        let mut points: Vec<egui::Pos2> = input
            .pending_points
            .iter()
            .map(|p| projector.to_screen(*p))
            .collect();
        if let Some(hover) = hover {
            points.push(hover);
        }
        for &p in &points {
            painter.circle_filled(p, 2.5, color);
        }
        if points.len() >= 2 {
            painter.add(egui::Shape::line(points, stroke));
        }
    }

    if let (Some(origin), Some(hover)) = (input.drag_origin, hover) {
        let start = projector.to_screen(origin);
        match state.scene.drawing_mode() {
            Some(DrawingMode::Rectangle) => {
                let rect = egui::Rect::from_two_pos(start, hover);
                painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
            }
            Some(DrawingMode::Circle) => {
                painter.circle_stroke(start, (hover - start).length(), stroke);
            }
            _ => {}
        }
    }
}

/// Übersetzt Maus-Gesten nach Zeichenmodus in Intents.
fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    projector: &Projector,
    state: &AppState,
    input: &mut ViewportInput,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    // Escape/Enter steuern nur die laufende Geste
    if input.drawing_in_progress() {
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            input.cancel();
            return events;
        }
        if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            events.extend(finish_path(state, input));
            return events;
        }
    }

    match state.scene.drawing_mode() {
        None => events.extend(select_and_pan(response, projector, state, input)),
        Some(DrawingMode::Marker) => {
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    events.push(AppIntent::OverlayDrawingCompleted {
                        geometry: OverlayGeometry::Marker {
                            position: projector.to_latlng(pos),
                            label: None,
                        },
                    });
                }
            }
        }
        Some(DrawingMode::Polyline) | Some(DrawingMode::Polygon) => {
            if response.double_clicked() {
                events.extend(finish_path(state, input));
            } else if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    input.pending_points.push(projector.to_latlng(pos));
                }
            }
        }
        Some(DrawingMode::Rectangle) | Some(DrawingMode::Circle) => {
            events.extend(drag_shape(response, projector, state, input));
        }
    }

    events
}

/// Schließt eine Polylinien-/Polygon-Geste ab, wenn genug Punkte da sind.
fn finish_path(state: &AppState, input: &mut ViewportInput) -> Vec<AppIntent> {
    let points = std::mem::take(&mut input.pending_points);
    let geometry = match state.scene.drawing_mode() {
        Some(DrawingMode::Polyline) if points.len() >= 2 => {
            Some(OverlayGeometry::Polyline { path: points })
        }
        Some(DrawingMode::Polygon) if points.len() >= 3 => {
            Some(OverlayGeometry::Polygon { ring: points })
        }
        _ => None,
    };
    geometry
        .map(|geometry| vec![AppIntent::OverlayDrawingCompleted { geometry }])
        .unwrap_or_default()
}

/// Rechteck/Kreis per Drag aufziehen.
fn drag_shape(
    response: &egui::Response,
    projector: &Projector,
    state: &AppState,
    input: &mut ViewportInput,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            input.drag_origin = Some(projector.to_latlng(pos));
        }
    }

    if response.drag_stopped() {
        let (Some(origin), Some(pos)) = (input.drag_origin.take(), response.interact_pointer_pos())
        else {
            return events;
        };
        let start = projector.to_screen(origin);
        if (pos - start).length() < MIN_DRAG_PX {
            return events;
        }

        let end = projector.to_latlng(pos);
        let geometry = match state.scene.drawing_mode() {
            Some(DrawingMode::Rectangle) => {
                let mut bounds = LatLngBounds::from_point(origin);
                bounds.extend(end);
                OverlayGeometry::Rectangle { bounds }
            }
            Some(DrawingMode::Circle) => OverlayGeometry::Circle {
                center: origin,
                radius_m: origin.distance_m(&end),
            },
            _ => return events,
        };
        events.push(AppIntent::OverlayDrawingCompleted { geometry });
    }

    events
}

/// Selektionsmodus: Klick trifft Overlays, Drag verschiebt die Karte.
fn select_and_pan(
    response: &egui::Response,
    projector: &Projector,
    state: &AppState,
    input: &mut ViewportInput,
) -> Vec<AppIntent> {
    let mut events = Vec::new();

    if response.dragged() {
        input.panning = true;
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            let x = projector.center_world.0 - delta.x as f64;
            let y = projector.center_world.1 - delta.y as f64;
            events.push(AppIntent::CameraPanned {
                center: geo::unproject(x, y, projector.zoom),
            });
        }
        return events;
    }

    if response.clicked() && !input.panning {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(handle) = hit_test(projector, state, pos) {
                events.push(AppIntent::OverlayClicked { handle });
            } else if state.overlays.selected_id().is_some() {
                // Klick ins Leere hebt die Selektion auf
                events.push(AppIntent::ClearSelectionRequested);
            }
        }
    }
    if response.drag_stopped() || response.clicked() {
        input.panning = false;
    }

    events
}

/// Oberstes klickbares Overlay unter dem Zeiger.
fn hit_test(projector: &Projector, state: &AppState, pos: egui::Pos2) -> Option<OverlayHandle> {
    let overlays: Vec<_> = state.scene.overlays().collect();
    overlays
        .into_iter()
        .rev()
        .filter(|(handle, _)| state.scene.is_clickable(*handle))
        .find(|(_, overlay)| hits_geometry(projector, &overlay.geometry, pos))
        .map(|(handle, _)| handle)
}

fn hits_geometry(projector: &Projector, geometry: &OverlayGeometry, pos: egui::Pos2) -> bool {
    match geometry {
        OverlayGeometry::Marker { position, .. } => {
            (projector.to_screen(*position) - pos).length() <= MARKER_RADIUS_PX + HIT_TOLERANCE_PX
        }
        OverlayGeometry::Polyline { path } => {
            let points: Vec<egui::Pos2> = path.iter().map(|p| projector.to_screen(*p)).collect();
            points
                .windows(2)
                .any(|seg| dist_to_segment(pos, seg[0], seg[1]) <= HIT_TOLERANCE_PX)
        }
        OverlayGeometry::Rectangle { bounds } => {
            let rect = egui::Rect::from_two_pos(
                projector.to_screen(LatLng::new(bounds.north, bounds.west)),
                projector.to_screen(LatLng::new(bounds.south, bounds.east)),
            );
            rect.expand(HIT_TOLERANCE_PX).contains(pos)
        }
        OverlayGeometry::Circle { center, radius_m } => {
            let screen_center = projector.to_screen(*center);
            let radius_px = (radius_m / geo::meters_per_pixel(center.lat, projector.zoom)) as f32;
            (screen_center - pos).length() <= radius_px + HIT_TOLERANCE_PX
        }
        OverlayGeometry::Polygon { ring } => {
            let points: Vec<egui::Pos2> = ring.iter().map(|p| projector.to_screen(*p)).collect();
            point_in_polygon(pos, &points)
        }
    }
}

fn dist_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

/// Ray-Casting-Test für beliebige (auch konkave) Polygone.
fn point_in_polygon(p: egui::Pos2, ring: &[egui::Pos2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn projector() -> Projector {
        Projector::new(
            egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0)),
            LatLng::new(47.3769, 8.5417),
            13.0,
        )
    }

    #[test]
    fn screen_roundtrip_durch_to_latlng() {
        let projector = projector();
        let pos = egui::pos2(200.0, 150.0);
        let back = projector.to_screen(projector.to_latlng(pos));
        assert!((back - pos).length() < 0.01);
    }

    #[test]
    fn zentrum_liegt_in_der_viewport_mitte() {
        let projector = projector();
        let center = projector.to_screen(LatLng::new(47.3769, 8.5417));
        assert!((center - egui::pos2(400.0, 300.0)).length() < 0.01);
    }

    #[test]
    fn dist_to_segment_klemmt_auf_endpunkte() {
        let a = egui::pos2(0.0, 0.0);
        let b = egui::pos2(10.0, 0.0);
        assert_eq!(dist_to_segment(egui::pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(dist_to_segment(egui::pos2(-4.0, 0.0), a, b), 4.0);
    }

    #[test]
    fn point_in_polygon_erkennt_konkave_formen() {
        // Pfeilförmiges konkaves Polygon
        let ring = [
            egui::pos2(0.0, 0.0),
            egui::pos2(10.0, 0.0),
            egui::pos2(5.0, 4.0),
            egui::pos2(10.0, 8.0),
            egui::pos2(0.0, 8.0),
        ];
        assert!(point_in_polygon(egui::pos2(2.0, 4.0), &ring));
        assert!(!point_in_polygon(egui::pos2(8.0, 4.0), &ring));
        assert!(!point_in_polygon(egui::pos2(12.0, 4.0), &ring));
    }
}
