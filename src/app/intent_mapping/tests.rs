use super::map_intent_to_commands;
use crate::app::state::{MarkupTool, PendingSuggest};
use crate::app::{AppCommand, AppIntent, AppState};
use crate::providers::offline::OfflineProviders;
use crate::providers::{ImmediatePort, Suggestion};

fn test_state() -> AppState {
    AppState::new(Box::new(ImmediatePort::new(OfflineProviders::provider_set())))
}

#[test]
fn set_tool_requested_maps_to_set_tool() {
    let state = test_state();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::SetMarkupToolRequested {
            tool: MarkupTool::Rectangle,
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(
        commands[0],
        AppCommand::SetMarkupTool {
            tool: MarkupTool::Rectangle
        }
    ));
}

#[test]
fn leere_adresseingabe_erzeugt_keine_commands() {
    let state = test_state();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::AddressSubmitted {
            text: "   ".into(),
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn tick_ohne_faelligen_debounce_erzeugt_keine_commands() {
    let mut state = test_state();
    state.resolver.pending_suggest = Some(PendingSuggest {
        input: "Denv".into(),
        due_ms: 1000.0,
    });

    let commands = map_intent_to_commands(&state, AppIntent::TickElapsed { now_ms: 900.0 });
    assert!(commands.is_empty());

    let commands = map_intent_to_commands(&state, AppIntent::TickElapsed { now_ms: 1000.0 });
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::PumpDebounce { .. }));
}

#[test]
fn suggestion_index_ausserhalb_der_liste_wird_verworfen() {
    let mut state = test_state();
    state.resolver.suggestions = vec![Suggestion {
        place_ref: None,
        display: "123 Main St".into(),
    }];

    let commands = map_intent_to_commands(&state, AppIntent::SuggestionAccepted { index: 5 });
    assert!(commands.is_empty());

    let commands = map_intent_to_commands(&state, AppIntent::SuggestionAccepted { index: 0 });
    assert!(matches!(
        commands[0],
        AppCommand::AcceptSuggestion { index: 0 }
    ));
}
