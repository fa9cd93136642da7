use super::*;
use crate::core::geo::LatLng;
use crate::core::surface::{OverlayGeometry, SceneSurface};

fn base_style() -> OverlayStyle {
    OverlayStyle {
        stroke_color: [1.0, 0.0, 0.0, 1.0],
        fill_color: [1.0, 0.0, 0.0, 0.3],
        stroke_weight_px: 2.0,
    }
}

fn store() -> OverlayStore {
    OverlayStore::new(base_style(), [0.1, 0.4, 1.0, 1.0])
}

fn scene() -> SceneSurface {
    SceneSurface::new(LatLng::new(47.0, 8.0), 12.0)
}

fn add_marker(store: &mut OverlayStore, scene: &mut SceneSurface) -> OverlayId {
    let handle = scene.add_overlay(
        OverlayGeometry::Marker {
            position: LatLng::new(47.0, 8.0),
            label: None,
        },
        store.active_style(),
    );
    store.on_overlay_completed(scene, handle, GeometryKind::Marker, MarkupTool::Marker)
}

fn add_polyline(store: &mut OverlayStore, scene: &mut SceneSurface, tool: MarkupTool) -> OverlayId {
    let handle = scene.add_overlay(
        OverlayGeometry::Polyline {
            path: vec![LatLng::new(47.0, 8.0), LatLng::new(47.1, 8.1)],
        },
        store.active_style(),
    );
    store.on_overlay_completed(scene, handle, GeometryKind::Polyline, tool)
}

#[test]
fn lebende_handles_entsprechen_records() {
    let mut store = store();
    let mut scene = scene();

    add_marker(&mut store, &mut scene);
    add_polyline(&mut store, &mut scene, MarkupTool::Line);
    assert_eq!(scene.live_overlay_count(), store.len());

    let id = add_marker(&mut store, &mut scene);
    store.select(&mut scene, id);
    store.delete_selected(&mut scene);
    assert_eq!(scene.live_overlay_count(), store.len());

    store.clear_all(&mut scene);
    assert_eq!(scene.live_overlay_count(), 0);
    assert_eq!(store.len(), 0);
    assert_eq!(scene.live_listener_count(), 0);
}

#[test]
fn arrow_flag_nur_bei_pfeil_werkzeug_und_polyline() {
    let mut store = store();
    let mut scene = scene();

    let line = add_polyline(&mut store, &mut scene, MarkupTool::Line);
    let arrow = add_polyline(&mut store, &mut scene, MarkupTool::Arrow);
    let marker = add_marker(&mut store, &mut scene);

    let record = |id| store.records().find(|r| r.id == id).unwrap();
    assert!(!record(line).is_arrow);
    assert!(record(arrow).is_arrow);
    assert!(!record(marker).is_arrow);
}

#[test]
fn hoechstens_ein_overlay_hervorgehoben() {
    let mut store = store();
    let mut scene = scene();

    let a = add_marker(&mut store, &mut scene);
    let b = add_marker(&mut store, &mut scene);

    store.select(&mut scene, a);
    store.select(&mut scene, b);
    assert_eq!(store.selected_id(), Some(b));

    let style_of = |scene: &SceneSurface, store: &OverlayStore, id: OverlayId| {
        let handle = store.records().find(|r| r.id == id).unwrap().handle;
        scene
            .overlays()
            .find(|(h, _)| *h == handle)
            .map(|(_, o)| o.style)
            .unwrap()
    };

    // A wurde auf den geteilten aktiven Stil zurückgestylt
    assert_eq!(style_of(&scene, &store, a), base_style());
    // B trägt die Hervorhebung: Strichstärke +1
    let b_style = style_of(&scene, &store, b);
    assert_eq!(b_style.stroke_weight_px, base_style().stroke_weight_px + 1.0);
    assert_ne!(b_style.stroke_color, base_style().stroke_color);
}

#[test]
fn delete_selected_zweimal_ist_noop() {
    let mut store = store();
    let mut scene = scene();

    let id = add_marker(&mut store, &mut scene);
    store.select(&mut scene, id);

    store.delete_selected(&mut scene);
    assert_eq!(store.len(), 0);
    assert_eq!(store.selected_id(), None);

    // Zweiter Aufruf ohne neue Selektion: kein Fehler, keine Änderung
    store.delete_selected(&mut scene);
    assert_eq!(store.len(), 0);
    assert_eq!(scene.live_overlay_count(), 0);
}

#[test]
fn set_active_style_trifft_nur_selektiertes_overlay() {
    let mut store = store();
    let mut scene = scene();

    let a = add_marker(&mut store, &mut scene);
    let b = add_marker(&mut store, &mut scene);
    store.select(&mut scene, b);

    let new_style = OverlayStyle {
        stroke_color: [0.0, 1.0, 0.0, 1.0],
        fill_color: [0.0, 1.0, 0.0, 0.2],
        stroke_weight_px: 5.0,
    };
    store.set_active_style(&mut scene, new_style);

    let record = |id| store.records().find(|r| r.id == id).unwrap();
    // A behält den alten Stil, B übernimmt den neuen
    assert_eq!(record(a).style, base_style());
    assert_eq!(record(b).style, new_style);
    assert_eq!(*store.active_style(), new_style);
}

#[test]
fn clear_selection_stellt_aktiven_stil_wieder_her() {
    let mut store = store();
    let mut scene = scene();

    let id = add_marker(&mut store, &mut scene);
    store.select(&mut scene, id);
    store.clear_selection(&mut scene);

    assert_eq!(store.selected_id(), None);
    let handle = store.records().next().unwrap().handle;
    let style = scene
        .overlays()
        .find(|(h, _)| *h == handle)
        .map(|(_, o)| o.style)
        .unwrap();
    assert_eq!(style, base_style());
}

#[test]
fn counts_by_kind_ueberspringt_leere_arten() {
    let mut store = store();
    let mut scene = scene();

    add_marker(&mut store, &mut scene);
    add_marker(&mut store, &mut scene);
    add_polyline(&mut store, &mut scene, MarkupTool::Line);

    let counts = store.counts_by_kind();
    assert_eq!(
        counts,
        vec![(GeometryKind::Marker, 2), (GeometryKind::Polyline, 1)]
    );
}
