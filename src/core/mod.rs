//! Domänenmodell: Geo-Primitive, Polyline-Codec, Kartenoberfläche,
//! Overlay-Store.

pub mod geo;
pub mod overlay_store;
pub mod polyline;
pub mod surface;

pub use geo::{LatLng, LatLngBounds};
pub use overlay_store::{OverlayId, OverlayRecord, OverlayStore};
pub use surface::{
    DrawingMode, GeometryKind, ListenerHandle, MapSurface, OverlayGeometry, OverlayHandle,
    OverlayStyle, SceneSurface,
};
