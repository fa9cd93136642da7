//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert UI-Intents und Commands auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = super::intent_mapping::map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        use super::handlers;

        match command {
            // === Werkzeuge & Overlays ===
            AppCommand::SetMarkupTool { tool } => handlers::overlays::set_markup_tool(state, tool),
            AppCommand::CompleteOverlayDrawing { geometry } => {
                handlers::overlays::complete_drawing(state, geometry)
            }
            AppCommand::SelectOverlayByHandle { handle } => {
                handlers::overlays::select_by_handle(state, handle)
            }
            AppCommand::SetActiveStyle { style } => {
                handlers::overlays::set_active_style(state, style)
            }
            AppCommand::DeleteSelectedOverlay => handlers::overlays::delete_selected(state),
            AppCommand::ClearSelection => handlers::overlays::clear_selection(state),
            AppCommand::ClearAllOverlays => handlers::overlays::clear_all(state),

            // === Adress-Suche ===
            AppCommand::EditAddressInput { text, now_ms } => {
                handlers::resolver::edit_input(state, text, now_ms)
            }
            AppCommand::SubmitAddressQuery { text } => {
                handlers::resolver::submit_query(state, text)
            }
            AppCommand::AcceptSuggestion { index } => {
                handlers::resolver::accept_suggestion(state, index)
            }
            AppCommand::PumpDebounce { now_ms } => handlers::resolver::pump_debounce(state, now_ms),

            // === Routenplaner ===
            AppCommand::SetRouteOrigin { text } => handlers::route::set_origin(state, text),
            AppCommand::SetRouteDestination { text } => {
                handlers::route::set_destination(state, text)
            }
            AppCommand::SetTravelMode { mode } => handlers::route::set_travel_mode(state, mode),
            AppCommand::ComputeRoute => handlers::route::compute_route(state),
            AppCommand::SwapEndpoints => handlers::route::swap_endpoints(state),
            AppCommand::UseCurrentLocation => handlers::route::use_current_location(state),
            AppCommand::ClearRoute => handlers::route::clear_route(state),

            // === Ansicht ===
            AppCommand::ZoomIn => handlers::view::zoom_in(state),
            AppCommand::ZoomOut => handlers::view::zoom_out(state),
            AppCommand::SetMapType { map_type } => handlers::view::set_map_type(state, map_type),
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::PanCamera { center } => handlers::view::pan(state, center),

            // === Export ===
            AppCommand::ComposeExport => handlers::export::compose(state),
            AppCommand::WriteExportArtifact { path } => {
                handlers::export::write_artifact(state, path)?
            }
            AppCommand::DiscardExportArtifact => handlers::export::discard(state),

            // === Sonstiges ===
            AppCommand::DismissStatus => handlers::view::dismiss_status(state),
            AppCommand::ApplyOptions { options } => handlers::view::apply_options(state, options),
            AppCommand::ApplyProviderResponse { response } => {
                handlers::apply_provider_response(state, response)?
            }
        }

        Ok(())
    }
}
