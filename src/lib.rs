//! SitePlan Map Annotator Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod export;
pub mod providers;
pub mod shared;
pub mod ui;

pub use app::{AppCommand, AppController, AppIntent, AppState, MarkupTool, UiState, ViewState};
pub use core::{
    DrawingMode, GeometryKind, LatLng, LatLngBounds, MapSurface, OverlayGeometry, OverlayHandle,
    OverlayId, OverlayStore, OverlayStyle, SceneSurface,
};
pub use providers::{
    GeocodingProvider, GeolocationSource, MapType, ProviderPort, ProviderSet, RoutingProvider,
    SnapshotProvider, TravelMode,
};
pub use shared::AnnotatorOptions;
