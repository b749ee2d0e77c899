//! Layout calculations for the lazysol TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

// ============================================================================
// Layout Structs
// ============================================================================

/// Left/right panel layout for the main content area.
#[derive(Debug, Clone, Copy)]
pub struct PanelLayout {
    /// Left panel (blocks)
    pub left: Rect,
    /// Right panel (transactions)
    pub right: Rect,
}

// ============================================================================
// Layout Functions
// ============================================================================

/// Calculate the two-panel layout for blocks and transactions.
#[must_use]
pub fn calculate_panel_layout(area: Rect) -> PanelLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    PanelLayout {
        left: chunks[0],
        right: chunks[1],
    }
}

/// Calculate a centered popup area within a parent area.
///
/// # Arguments
/// * `parent` - The parent area to center within
/// * `width` - Desired popup width in columns
/// * `height` - Desired popup height in rows
#[must_use]
pub fn centered_popup_area(parent: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(parent.width.saturating_sub(4));
    let popup_height = height.min(parent.height.saturating_sub(4));

    let popup_x = parent.x + (parent.width.saturating_sub(popup_width)) / 2;
    let popup_y = parent.y + (parent.height.saturating_sub(popup_height)) / 2;

    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_panel_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_panel_layout(area);

        assert_eq!(layout.left.width, 50);
        assert_eq!(layout.right.width, 50);
        assert_eq!(layout.left.height, layout.right.height);
    }

    #[test]
    fn test_centered_popup_area() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_popup_area(parent, 40, 20);

        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
    }

    #[test]
    fn test_centered_popup_area_clamped() {
        let parent = Rect::new(0, 0, 30, 20);
        let popup = centered_popup_area(parent, 100, 50);

        assert!(popup.width <= parent.width - 4);
        assert!(popup.height <= parent.height - 4);
    }
}
