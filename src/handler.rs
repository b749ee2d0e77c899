use crate::{
    app::{App, PopupState, SearchResultsState},
    event::Action,
    search::{SearchFilter, SearchFilters, SearchQuery},
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Handles a crossterm event and returns an optional Action.
pub fn handle_event(app: &mut App, event: Event) -> Option<Action> {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            return handle_key_press(key, app);
        }
    } else if let Event::Mouse(mouse) = event {
        return handle_mouse_events(mouse, app);
    }
    None
}

/// Handles key press events.
fn handle_key_press(key_event: KeyEvent, app: &mut App) -> Option<Action> {
    // Text entry in the search popup must win over global shortcuts
    let typing_in_search = matches!(app.popup_state, PopupState::Search { .. });

    if !typing_in_search {
        match key_event.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('r') => return Some(Action::RefreshData),
            KeyCode::Char('n') => return Some(Action::OpenClusterSelector),
            KeyCode::Char('f') | KeyCode::Char('/') => return Some(Action::OpenSearchPopup),
            KeyCode::Char('?') => return Some(Action::OpenHelpPopup),
            KeyCode::Char(' ') => return Some(Action::ToggleLiveUpdates),
            _ => {}
        }
    }

    let viewing_details = app.show_block_details
        || app.show_transaction_details
        || app.viewing_search_result_details;
    if viewing_details && key_event.code == KeyCode::Esc {
        return Some(Action::CloseDetailsOrPopup);
    }

    if app.popup_state != PopupState::None {
        handle_popup_keys(key_event, app)
    } else if viewing_details {
        handle_detail_view_keys(key_event)
    } else {
        handle_main_view_keys(key_event, app)
    }
}

/// Handles key events when the cluster selection popup is active.
fn handle_cluster_selector_keys(key_event: KeyEvent, app: &mut App) -> Option<Action> {
    if let PopupState::ClusterSelect {
        selected_index,
        available_clusters,
    } = &mut app.popup_state
    {
        let num_options = available_clusters.len();
        match key_event.code {
            KeyCode::Esc => Some(Action::ClearPopup),
            KeyCode::Up => {
                let new_index = selected_index.saturating_sub(1);
                Some(Action::SelectClusterOption(new_index))
            }
            KeyCode::Down => {
                let new_index = (*selected_index + 1) % num_options;
                Some(Action::SelectClusterOption(new_index))
            }
            KeyCode::Enter => {
                let cluster = available_clusters.get(*selected_index)?.clone();
                Some(Action::SwitchToCluster(cluster))
            }
            _ => None,
        }
    } else {
        None
    }
}

/// Handles key events when the search popup is active.
fn handle_search_keys(
    key_event: KeyEvent,
    query: &str,
    filter: SearchFilter,
) -> Option<Action> {
    match key_event.code {
        KeyCode::Esc => Some(Action::ClearPopup),
        KeyCode::Char(c) => Some(Action::SearchInput(c)),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Tab => Some(Action::SearchSwitchFilter),
        KeyCode::Enter => Some(Action::PerformSearch(SearchQuery::new(
            query,
            SearchFilters::of_type(filter),
        ))),
        _ => None,
    }
}

/// Handles key events when the search results popup is active.
fn handle_search_results_keys(
    key_event: KeyEvent,
    _state: &SearchResultsState,
) -> Option<Action> {
    match key_event.code {
        KeyCode::Esc => Some(Action::ClearPopup),
        KeyCode::Up => Some(Action::SearchResultSelectPrev),
        KeyCode::Down => Some(Action::SearchResultSelectNext),
        KeyCode::Enter => Some(Action::SearchResultShowSelected),
        _ => None,
    }
}

/// Handles key events in a detail view (no popup active).
fn handle_detail_view_keys(key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
        KeyCode::Char('c') => Some(Action::CopySelectedId),
        KeyCode::Char('o') => Some(Action::OpenInWebExplorer),
        _ => None,
    }
}

/// Handles key events when the main view is active (no popups or details).
fn handle_main_view_keys(key_event: KeyEvent, _app: &mut App) -> Option<Action> {
    match key_event.code {
        KeyCode::Up => Some(Action::MoveSelectionUp),
        KeyCode::Down => Some(Action::MoveSelectionDown),
        KeyCode::PageUp => Some(Action::ScrollPageUp),
        KeyCode::PageDown => Some(Action::ScrollPageDown),
        KeyCode::Enter => Some(Action::ShowDetails),
        KeyCode::Tab => Some(Action::SwitchFocus),
        KeyCode::Char('c') => Some(Action::CopySelectedId),
        KeyCode::Char('o') => Some(Action::OpenInWebExplorer),
        _ => None,
    }
}

/// Handles mouse events.
fn handle_mouse_events(mouse_event: MouseEvent, _app: &mut App) -> Option<Action> {
    match mouse_event.kind {
        MouseEventKind::ScrollDown => Some(Action::HandleScrollDown),
        MouseEventKind::ScrollUp => Some(Action::HandleScrollUp),
        _ => None,
    }
}

pub fn handle_popup_keys(key_event: KeyEvent, app: &mut App) -> Option<Action> {
    match &app.popup_state {
        PopupState::ClusterSelect { .. } => handle_cluster_selector_keys(key_event, app),
        PopupState::Search { query, filter } => {
            let (query, filter) = (query.clone(), *filter);
            handle_search_keys(key_event, &query, filter)
        }
        PopupState::SearchResults(state) => {
            let state = state.clone();
            handle_search_results_keys(key_event, &state)
        }
        PopupState::Message(_) | PopupState::Help => {
            if key_event.code == KeyCode::Esc || key_event.code == KeyCode::Enter {
                Some(Action::ClearPopup)
            } else {
                None
            }
        }
        PopupState::None => None,
    }
}
