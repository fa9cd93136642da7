//! Overlay-Store: autoritative Menge aller Markup-Overlays.
//!
//! Einziger Mutator der nativen Markup-Drawables. Selektion wird
//! out-of-band als `Option<OverlayId>` geführt, nicht als Flag pro
//! Record — Deselektion des vorherigen Overlays bleibt damit trivial
//! und es kann nie zwei hervorgehobene Overlays geben.

use indexmap::IndexMap;

use super::surface::{GeometryKind, ListenerHandle, MapSurface, OverlayHandle, OverlayStyle};
use crate::app::state::MarkupTool;

/// Opaker, sessioneindeutiger Bezeichner eines Overlay-Records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Ein Markup-Overlay mit Stil, Handle und Listener-Abonnements.
#[derive(Debug, Clone)]
pub struct OverlayRecord {
    pub id: OverlayId,
    pub kind: GeometryKind,
    /// Nur bei Polyline aus dem Pfeil-Werkzeug gesetzt (beeinflusst
    /// Rendering, nicht Geometrie).
    pub is_arrow: bool,
    pub style: OverlayStyle,
    pub handle: OverlayHandle,
    pub listeners: Vec<ListenerHandle>,
}

/// Autoritative Overlay-Sammlung mit aktivem Stil und Einfachselektion.
pub struct OverlayStore {
    records: IndexMap<OverlayId, OverlayRecord>,
    selected: Option<OverlayId>,
    next_id: u64,
    /// Geteilter veränderlicher Stil für neu erstellte Overlays.
    /// Leser gehen immer über [`OverlayStore::active_style`], nie über
    /// einen beim Listener-Anhängen kopierten Wert.
    active_style: OverlayStyle,
    highlight_stroke: [f32; 4],
}

impl OverlayStore {
    pub fn new(active_style: OverlayStyle, highlight_stroke: [f32; 4]) -> Self {
        Self {
            records: IndexMap::new(),
            selected: None,
            next_id: 1,
            active_style,
            highlight_stroke,
        }
    }

    /// Aktueller geteilter Stil (Getter-Indirektion, siehe Feld-Doku).
    pub fn active_style(&self) -> &OverlayStyle {
        &self.active_style
    }

    pub fn selected_id(&self) -> Option<OverlayId> {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &OverlayRecord> {
        self.records.values()
    }

    /// Record-ID zum nativen Handle (Klick-Zuordnung).
    pub fn id_for_handle(&self, handle: OverlayHandle) -> Option<OverlayId> {
        self.records
            .values()
            .find(|r| r.handle == handle)
            .map(|r| r.id)
    }

    /// Hervorhebungsstil: abweichende Strichfarbe, Strichstärke +1.
    fn highlight_style(&self) -> OverlayStyle {
        OverlayStyle {
            stroke_color: self.highlight_stroke,
            fill_color: self.active_style.fill_color,
            stroke_weight_px: self.active_style.stroke_weight_px + 1.0,
        }
    }

    /// Übernimmt eine geänderte Hervorhebungsfarbe (Optionen-Dialog).
    /// Ein aktuell selektiertes Overlay wird sofort neu hervorgehoben.
    pub fn set_highlight_stroke(&mut self, surface: &mut dyn MapSurface, stroke: [f32; 4]) {
        self.highlight_stroke = stroke;
        if let Some(id) = self.selected {
            let highlight = self.highlight_style();
            if let Some(record) = self.records.get(&id) {
                surface.apply_style(record.handle, &highlight);
            }
        }
    }

    /// Setzt den Stil für alle *künftig* erstellten Overlays und wendet
    /// ihn sofort auf das aktuell selektierte Overlay an (und nur auf
    /// dieses — fertige Formen bleiben unberührt). Die Hervorhebung des
    /// selektierten Overlays wird aus dem neuen Stil neu abgeleitet.
    pub fn set_active_style(&mut self, surface: &mut dyn MapSurface, style: OverlayStyle) {
        self.active_style = style;

        if let Some(id) = self.selected {
            let highlight = self.highlight_style();
            if let Some(record) = self.records.get_mut(&id) {
                record.style = style;
                surface.apply_style(record.handle, &highlight);
            }
        }
    }

    /// Nimmt ein fertig gezeichnetes Drawable in den Store auf.
    ///
    /// Wendet den aktiven Stil an, setzt `is_arrow` genau dann wenn das
    /// Werkzeug "Arrow" war und die Geometrie eine Polyline ist, und
    /// abonniert den Klick-Listener für die Selektion.
    pub fn on_overlay_completed(
        &mut self,
        surface: &mut dyn MapSurface,
        handle: OverlayHandle,
        kind: GeometryKind,
        tool: MarkupTool,
    ) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;

        let style = self.active_style;
        surface.apply_style(handle, &style);

        let listeners: Vec<ListenerHandle> = surface.subscribe_click(handle).into_iter().collect();

        let record = OverlayRecord {
            id,
            kind,
            is_arrow: tool == MarkupTool::Arrow && kind == GeometryKind::Polyline,
            style,
            handle,
            listeners,
        };
        log::info!(
            "Overlay {:?} erstellt: {} (arrow: {})",
            id,
            kind.label(),
            record.is_arrow
        );
        self.records.insert(id, record);
        id
    }

    /// Selektiert ein Overlay. Einziger Codepfad, der Hervorhebung
    /// mutiert: zuerst wird das bisher selektierte Overlay auf den
    /// geteilten aktiven Stil zurückgestylt, dann das neue hervorgehoben.
    pub fn select(&mut self, surface: &mut dyn MapSurface, id: OverlayId) {
        if self.selected == Some(id) {
            return;
        }
        if !self.records.contains_key(&id) {
            log::debug!("Selektion auf unbekanntem Overlay {id:?} ignoriert");
            return;
        }

        self.unhighlight_selected(surface);

        let highlight = self.highlight_style();
        if let Some(record) = self.records.get(&id) {
            surface.apply_style(record.handle, &highlight);
        }
        self.selected = Some(id);
    }

    /// Hebt die Selektion auf und stellt den aktiven Stil wieder her.
    pub fn clear_selection(&mut self, surface: &mut dyn MapSurface) {
        self.unhighlight_selected(surface);
        self.selected = None;
    }

    fn unhighlight_selected(&mut self, surface: &mut dyn MapSurface) {
        if let Some(prev) = self.selected.take() {
            let style = self.active_style;
            if let Some(record) = self.records.get_mut(&prev) {
                record.style = style;
                surface.apply_style(record.handle, &style);
            }
        }
    }

    /// Löscht das selektierte Overlay: Listener lösen, Drawable
    /// entfernen, Record austragen, Selektionszeiger zurücksetzen.
    /// Ohne Selektion (auch beim zweiten Aufruf in Folge) ein No-Op.
    pub fn delete_selected(&mut self, surface: &mut dyn MapSurface) {
        let Some(id) = self.selected.take() else {
            log::debug!("delete_selected ohne Selektion: No-Op");
            return;
        };

        if let Some(record) = self.records.shift_remove(&id) {
            for listener in record.listeners {
                surface.unsubscribe(listener);
            }
            surface.remove_overlay(record.handle);
            log::info!("Overlay {:?} gelöscht", id);
        }
    }

    /// Entfernt alle Overlays mit demselben Teardown wie `delete_selected`.
    pub fn clear_all(&mut self, surface: &mut dyn MapSurface) {
        let count = self.records.len();
        for (_, record) in self.records.drain(..) {
            for listener in record.listeners {
                surface.unsubscribe(listener);
            }
            surface.remove_overlay(record.handle);
        }
        self.selected = None;
        if count > 0 {
            log::info!("Alle {count} Overlays entfernt");
        }
    }

    /// Anzahl der Overlays je Geometrie-Art (für die Export-Zusammenfassung).
    pub fn counts_by_kind(&self) -> Vec<(GeometryKind, usize)> {
        let kinds = [
            GeometryKind::Marker,
            GeometryKind::Polyline,
            GeometryKind::Rectangle,
            GeometryKind::Circle,
            GeometryKind::Polygon,
        ];
        kinds
            .into_iter()
            .filter_map(|kind| {
                let n = self.records.values().filter(|r| r.kind == kind).count();
                (n > 0).then_some((kind, n))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
