//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::SetMarkupToolRequested { tool } => vec![AppCommand::SetMarkupTool { tool }],
        AppIntent::OverlayDrawingCompleted { geometry } => {
            vec![AppCommand::CompleteOverlayDrawing { geometry }]
        }
        AppIntent::OverlayClicked { handle } => vec![AppCommand::SelectOverlayByHandle { handle }],
        AppIntent::ActiveStyleChanged { style } => vec![AppCommand::SetActiveStyle { style }],
        AppIntent::DeleteSelectedRequested => vec![AppCommand::DeleteSelectedOverlay],
        AppIntent::ClearSelectionRequested => vec![AppCommand::ClearSelection],
        AppIntent::ClearAllOverlaysRequested => vec![AppCommand::ClearAllOverlays],

        AppIntent::AddressInputEdited { text, now_ms } => {
            vec![AppCommand::EditAddressInput { text, now_ms }]
        }
        AppIntent::AddressSubmitted { text } => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![AppCommand::SubmitAddressQuery {
                    text: trimmed.to_string(),
                }]
            }
        }
        AppIntent::SuggestionAccepted { index } => {
            if index < state.resolver.suggestions.len() {
                vec![AppCommand::AcceptSuggestion { index }]
            } else {
                Vec::new()
            }
        }
        AppIntent::TickElapsed { now_ms } => {
            // Nur mappen wenn tatsächlich ein Debounce fällig ist
            match &state.resolver.pending_suggest {
                Some(pending) if now_ms >= pending.due_ms => {
                    vec![AppCommand::PumpDebounce { now_ms }]
                }
                _ => Vec::new(),
            }
        }

        AppIntent::RouteOriginEdited { text } => vec![AppCommand::SetRouteOrigin { text }],
        AppIntent::RouteDestinationEdited { text } => {
            vec![AppCommand::SetRouteDestination { text }]
        }
        AppIntent::TravelModeChanged { mode } => vec![AppCommand::SetTravelMode { mode }],
        AppIntent::ComputeRouteRequested => vec![AppCommand::ComputeRoute],
        AppIntent::SwapEndpointsRequested => vec![AppCommand::SwapEndpoints],
        AppIntent::UseCurrentLocationRequested => vec![AppCommand::UseCurrentLocation],
        AppIntent::ClearRouteRequested => vec![AppCommand::ClearRoute],

        AppIntent::ZoomInRequested => vec![AppCommand::ZoomIn],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomOut],
        AppIntent::MapTypeChanged { map_type } => vec![AppCommand::SetMapType { map_type }],
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::CameraPanned { center } => vec![AppCommand::PanCamera { center }],

        AppIntent::ExportRequested => vec![AppCommand::ComposeExport],
        AppIntent::ExportSavePathSelected { path } => {
            vec![AppCommand::WriteExportArtifact { path }]
        }
        AppIntent::ExportDiscarded => vec![AppCommand::DiscardExportArtifact],

        AppIntent::StatusDismissed => vec![AppCommand::DismissStatus],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ProviderCompleted { response } => {
            vec![AppCommand::ApplyProviderResponse { response }]
        }
    }
}

#[cfg(test)]
mod tests;
