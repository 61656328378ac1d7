//! Tests for the AppState reducer.

use super::*;

fn store() -> RecordStore {
    RecordStore::builtin()
}

fn rid(s: &str) -> RecordId {
    RecordId::new(s).unwrap()
}

fn type_query(state: AppState, text: &str, store: &RecordStore) -> AppState {
    state.apply_all(text.chars().map(Action::InsertChar), store)
}

fn results_with_query(query: &str, store: &RecordStore) -> AppState {
    let state = type_query(AppState::default(), query, store);
    state.apply(Action::Submit, store)
}

fn selected_id(state: &AppState) -> Option<&str> {
    state.selected().map(|id| id.as_str())
}

// ===== Initial state =====

#[test]
fn initial_state_is_search_flow_empty_unselected() {
    let state = AppState::default();
    assert_eq!(state.screen(), Screen::Search);
    assert_eq!(state.active_tab(), ViewTab::Flow);
    assert_eq!(state.query(), "");
    assert!(state.selected().is_none());
    assert!(!state.help_visible());
    assert_eq!(state.query_policy(), QueryResetPolicy::Keep);
}

// ===== Screen transitions =====

#[test]
fn submit_moves_search_to_results() {
    let store = store();
    let state = AppState::default().apply(Action::Submit, &store);
    assert_eq!(state.screen(), Screen::Results);
}

#[test]
fn submit_on_results_is_noop() {
    let store = store();
    let state = results_with_query("msa", &store);
    let again = state.clone().apply(Action::Submit, &store);
    assert_eq!(again, state);
}

#[test]
fn back_moves_results_to_search() {
    let store = store();
    let state = results_with_query("", &store).apply(Action::Back, &store);
    assert_eq!(state.screen(), Screen::Search);
}

#[test]
fn back_on_search_is_noop() {
    let store = store();
    let state = AppState::default();
    assert_eq!(state.clone().apply(Action::Back, &store), state);
}

// ===== Query retention and reset policy =====

#[test]
fn back_keeps_query_by_default() {
    let store = store();
    let state = results_with_query("Woolworths", &store).apply(Action::Back, &store);
    assert_eq!(state.query(), "Woolworths");
    assert!(!state.is_query_stale());
}

#[test]
fn typing_after_back_appends_under_keep_policy() {
    let store = store();
    let state = results_with_query("Wool", &store).apply(Action::Back, &store);
    let state = type_query(state, "worths", &store);
    assert_eq!(state.query(), "Woolworths");
}

#[test]
fn back_clears_query_under_clear_on_back_policy() {
    let store = store();
    let state = type_query(AppState::new(QueryResetPolicy::ClearOnBack), "MSA", &store)
        .apply(Action::Submit, &store)
        .apply(Action::Back, &store);
    assert_eq!(state.query(), "");
}

#[test]
fn first_char_replaces_query_under_replace_on_type_policy() {
    let store = store();
    let state = type_query(AppState::new(QueryResetPolicy::ReplaceOnType), "MSA", &store)
        .apply(Action::Submit, &store)
        .apply(Action::Back, &store);
    assert_eq!(state.query(), "MSA", "query still shown after back");
    assert!(state.is_query_stale());

    let state = type_query(state, "Hilton", &store);
    assert_eq!(state.query(), "Hilton");
    assert!(!state.is_query_stale());
}

#[test]
fn resubmitting_stale_query_keeps_it() {
    let store = store();
    let state = type_query(AppState::new(QueryResetPolicy::ReplaceOnType), "MSA", &store)
        .apply(Action::Submit, &store)
        .apply(Action::Back, &store)
        .apply(Action::Submit, &store);
    assert_eq!(state.query(), "MSA");
    assert!(!state.is_query_stale());
}

#[test]
fn query_survives_tab_switches_and_detail_toggle() {
    let store = store();
    let state = results_with_query("woolworths", &store).apply_all(
        [
            Action::SetTab(ViewTab::Graph),
            Action::Select(Some(rid("f5"))),
            Action::SetTab(ViewTab::List),
            Action::CloseDetail,
        ],
        &store,
    );
    assert_eq!(state.query(), "woolworths");
}

#[test]
fn query_edits_ignored_on_results_screen() {
    let store = store();
    let state = results_with_query("msa", &store);
    let after = state.clone().apply_all(
        [Action::InsertChar('x'), Action::Backspace, Action::ClearQuery],
        &store,
    );
    assert_eq!(after.query(), "msa");
}

#[test]
fn clear_query_empties_text() {
    let store = store();
    let state = type_query(AppState::default(), "abc", &store).apply(Action::ClearQuery, &store);
    assert_eq!(state.query(), "");
}

// ===== Tabs =====

#[test]
fn tabs_switch_freely_on_results() {
    let store = store();
    let state = results_with_query("", &store);
    let state = state.apply(Action::SetTab(ViewTab::List), &store);
    assert_eq!(state.active_tab(), ViewTab::List);
    let state = state.apply(Action::NextTab, &store);
    assert_eq!(state.active_tab(), ViewTab::Flow);
    let state = state.apply(Action::PrevTab, &store);
    assert_eq!(state.active_tab(), ViewTab::List);
}

#[test]
fn tab_switch_does_not_change_filtered_records() {
    let store = store();
    let state = results_with_query("Woolworths", &store);
    let before: Vec<&str> = state.filtered(&store).iter().map(|r| r.id.as_str()).collect();
    let state = state.apply(Action::SetTab(ViewTab::Graph), &store);
    let after: Vec<&str> = state.filtered(&store).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(before, after);
    assert_eq!(after, vec!["f5", "f6"]);
}

#[test]
fn tab_switch_ignored_on_search_screen() {
    let store = store();
    let state = AppState::default().apply(Action::SetTab(ViewTab::Graph), &store);
    assert_eq!(state.active_tab(), ViewTab::Flow);
}

// ===== Selection =====

#[test]
fn selection_survives_tab_switch() {
    let store = store();
    let state = results_with_query("", &store)
        .apply(Action::Select(Some(rid("f4"))), &store)
        .apply(Action::SetTab(ViewTab::Graph), &store)
        .apply(Action::SetTab(ViewTab::List), &store);
    assert_eq!(selected_id(&state), Some("f4"));
}

#[test]
fn close_clears_selection_on_every_tab() {
    let store = store();
    for tab in ViewTab::ALL {
        let state = results_with_query("", &store)
            .apply(Action::SetTab(tab), &store)
            .apply(Action::Select(Some(rid("f1"))), &store)
            .apply(Action::CloseDetail, &store);
        assert!(state.selected().is_none(), "tab {}", tab);
    }
}

#[test]
fn select_none_clears_selection() {
    let store = store();
    let state = results_with_query("", &store)
        .apply(Action::Select(Some(rid("f1"))), &store)
        .apply(Action::Select(None), &store);
    assert!(state.selected().is_none());
}

#[test]
fn new_selection_replaces_previous() {
    let store = store();
    let state = results_with_query("", &store)
        .apply(Action::Select(Some(rid("f1"))), &store)
        .apply(Action::Select(Some(rid("f6"))), &store);
    assert_eq!(selected_id(&state), Some("f6"));
}

#[test]
fn selecting_unknown_record_is_noop() {
    let store = store();
    let state = results_with_query("", &store).apply(Action::Select(Some(rid("f1"))), &store);
    let after = state.clone().apply(Action::Select(Some(rid("f404"))), &store);
    assert_eq!(after, state);
}

#[test]
fn select_processor_node_selects_f3() {
    let store = store();
    let state = results_with_query("", &store)
        .apply(Action::SetTab(ViewTab::Graph), &store)
        .apply(Action::SelectNode("Processor".to_string()), &store);
    assert_eq!(selected_id(&state), Some("f3"));
    assert_eq!(state.selected_record(&store).unwrap().stage, "Processor");
}

#[test]
fn select_unknown_node_leaves_selection_unchanged() {
    let store = store();
    let state = results_with_query("", &store).apply(Action::Select(Some(rid("f2"))), &store);
    let after = state
        .clone()
        .apply(Action::SelectNode("Warehouse".to_string()), &store);
    assert_eq!(selected_id(&after), Some("f2"));
    assert_eq!(after, state);
}

#[test]
fn select_node_on_empty_store_is_noop() {
    let empty = RecordStore::empty();
    let state = AppState::default()
        .apply(Action::Submit, &empty)
        .apply(Action::SelectNode("Processor".to_string()), &empty);
    assert!(state.selected().is_none());
}

#[test]
fn selection_kept_when_filter_hides_record() {
    let store = store();
    let state = type_query(AppState::default(), "", &store)
        .apply(Action::Submit, &store)
        .apply(Action::Select(Some(rid("f1"))), &store)
        .apply(Action::Back, &store);
    let state = type_query(state, "Woolworths", &store).apply(Action::Submit, &store);
    assert_eq!(selected_id(&state), Some("f1"));
}

// ===== Cursor / activation =====

#[test]
fn cursor_moves_within_filtered_records() {
    let store = store();
    let state = results_with_query("Woolworths", &store);
    assert_eq!(state.cursor(), 0);
    let state = state.apply_all([Action::CursorDown, Action::CursorDown], &store);
    assert_eq!(state.cursor(), 1, "cursor saturates at last filtered record");
    let state = state.apply(Action::CursorUp, &store);
    assert_eq!(state.cursor(), 0);
}

#[test]
fn cursor_end_and_home() {
    let store = store();
    let state = results_with_query("", &store).apply(Action::CursorEnd, &store);
    assert_eq!(state.cursor(), 5);
    let state = state.apply(Action::CursorHome, &store);
    assert_eq!(state.cursor(), 0);
}

#[test]
fn cursor_to_is_clamped() {
    let store = store();
    let state = results_with_query("MSA", &store).apply(Action::CursorTo(10), &store);
    assert_eq!(state.cursor(), 0);
}

#[test]
fn activate_on_flow_selects_highlighted_filtered_record() {
    let store = store();
    let state = results_with_query("Woolworths", &store)
        .apply(Action::CursorDown, &store)
        .apply(Action::ActivateCursor, &store);
    assert_eq!(selected_id(&state), Some("f6"));
}

#[test]
fn activate_on_graph_selects_linked_record() {
    let store = store();
    let state = results_with_query("", &store)
        .apply(Action::SetTab(ViewTab::Graph), &store)
        .apply(Action::CursorTo(2), &store)
        .apply(Action::ActivateCursor, &store);
    assert_eq!(selected_id(&state), Some("f3"));
}

#[test]
fn graph_cursor_ranges_over_all_nodes_regardless_of_query() {
    let store = store();
    let state = results_with_query("MSA", &store)
        .apply(Action::SetTab(ViewTab::Graph), &store)
        .apply(Action::CursorEnd, &store);
    assert_eq!(state.cursor(), 5);
}

#[test]
fn activate_with_no_results_is_noop() {
    let store = store();
    let state = results_with_query("no such thing", &store).apply(Action::ActivateCursor, &store);
    assert!(state.selected().is_none());
}

#[test]
fn tab_switch_resets_cursor() {
    let store = store();
    let state = results_with_query("", &store)
        .apply(Action::CursorEnd, &store)
        .apply(Action::SetTab(ViewTab::List), &store);
    assert_eq!(state.cursor(), 0);
}

// ===== Help / misc =====

#[test]
fn toggle_help_flips_visibility() {
    let store = store();
    let state = AppState::default().apply(Action::ToggleHelp, &store);
    assert!(state.help_visible());
    let state = state.apply(Action::ToggleHelp, &store);
    assert!(!state.help_visible());
}

#[test]
fn reducer_is_deterministic() {
    let store = store();
    let actions = vec![
        Action::InsertChar('w'),
        Action::Submit,
        Action::SetTab(ViewTab::List),
        Action::CursorDown,
        Action::ActivateCursor,
        Action::Back,
    ];
    let a = AppState::default().apply_all(actions.clone(), &store);
    let b = AppState::default().apply_all(actions, &store);
    assert_eq!(a, b);
}

#[test]
fn initial_builders_set_query_tab_and_screen() {
    let state = AppState::default()
        .with_query("MSA")
        .with_tab(ViewTab::List)
        .on_results();
    assert_eq!(state.query(), "MSA");
    assert_eq!(state.active_tab(), ViewTab::List);
    assert_eq!(state.screen(), Screen::Results);
}

#[test]
fn query_policy_parses_from_str() {
    assert_eq!("keep".parse::<QueryResetPolicy>(), Ok(QueryResetPolicy::Keep));
    assert_eq!("clear-on-back".parse::<QueryResetPolicy>(), Ok(QueryResetPolicy::ClearOnBack));
    assert_eq!(
        "replace-on-type".parse::<QueryResetPolicy>(),
        Ok(QueryResetPolicy::ReplaceOnType));
    assert!("reset".parse::<QueryResetPolicy>().is_err());
}
