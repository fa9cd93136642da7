//! Application-Layer: Controller, State, Events und Handler.

pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
/// Application State und Controller
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Szene, Overlays,
/// Suche, Route, Export).
pub mod state;

pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use state::{
    AppState, EditorToolState, EndpointState, MarkupTool, ResolverState, RoutePlannerState,
    RouteState, UiState, ViewState,
};
