//! UI rendering module for the lazysol TUI.
//!
//! This module provides the main rendering entry point and orchestrates
//! rendering of all UI components: header, panels, popups, and detail
//! overlays.
//!
//! # Module Structure
//!
//! - `panels` - Main content panels (blocks, transactions, details)
//! - `popups` - Modal dialogs (cluster selector, search, messages, help)
//! - `layout` - Layout calculations
//! - `header` - Header bar rendering
//! - `footer` - Footer bar rendering
//! - `helpers` - Shared helpers for styled blocks

pub mod footer;
pub mod header;
pub mod helpers;
pub mod layout;
pub mod panels;
pub mod popups;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{App, PopupState};
use crate::constants::{FOOTER_HEIGHT, HEADER_HEIGHT};

// ============================================================================
// Main Render Entry Point
// ============================================================================

/// Main render function that orchestrates all UI rendering.
///
/// 1. Main layout (header, content, footer)
/// 2. Popup overlays based on current popup state
/// 3. Detail views when viewing specific items
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    header::render_header(frame, chunks[0], app);
    render_main_content(app, frame, chunks[1]);
    footer::render(frame, chunks[2], app);

    // Detail views render below popups so a message can sit on top
    if app.popup_state == PopupState::None {
        panels::details::render(app, frame, size);
    }

    render_popups(app, frame, size);
}

// ============================================================================
// Internal Rendering Functions
// ============================================================================

/// Render the main content area (blocks and transactions panels)
fn render_main_content(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let panel_layout = layout::calculate_panel_layout(area);
    panels::render_blocks(app, frame, panel_layout.left);
    panels::render_transactions(app, frame, panel_layout.right);
}

/// Render popup overlays based on current popup state
fn render_popups(app: &App, frame: &mut Frame, area: ratatui::layout::Rect) {
    match &app.popup_state {
        PopupState::ClusterSelect {
            available_clusters,
            selected_index,
        } => {
            popups::network::render(
                frame,
                area,
                available_clusters,
                *selected_index,
                &app.settings.selected_cluster,
            );
        }
        PopupState::Search { query, filter } => {
            popups::search::render(frame, area, query, *filter);
        }
        PopupState::Message(message) => {
            popups::message::render(frame, area, message);
        }
        PopupState::SearchResults(results) => {
            popups::search_results::render(frame, area, results);
        }
        PopupState::Help => {
            popups::help::render(frame, area);
        }
        PopupState::None => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
