//! Cluster selection popup rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::domain::Cluster;
use crate::theme::{MUTED_COLOR, SELECTED_STYLE, SUCCESS_COLOR};
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

/// Renders the cluster selection popup.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    clusters: &[Cluster],
    selected_index: usize,
    current: &Cluster,
) {
    let height = (clusters.len() as u16).saturating_add(6).min(16);
    let popup_area = centered_popup_area(area, 56, height);

    let popup_block = create_popup_block("Select Cluster");
    frame.render_widget(Clear, popup_area);
    let inner = popup_block.inner(popup_area);
    frame.render_widget(popup_block, popup_area);

    let items: Vec<ListItem> = clusters
        .iter()
        .map(|cluster| {
            let marker = if cluster == current { "● " } else { "  " };
            let style = if cluster == current {
                Style::default().fg(SUCCESS_COLOR)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(SUCCESS_COLOR)),
                Span::styled(cluster.as_str().to_string(), style),
                Span::styled(
                    format!("  {}", cluster.rpc_url()),
                    Style::default().fg(MUTED_COLOR),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(SELECTED_STYLE.add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    let list_area = Rect::new(
        inner.x + 1,
        inner.y + 1,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(3),
    );
    frame.render_stateful_widget(list, list_area, &mut list_state);

    let hint = Paragraph::new("Up/Down: Select  Enter: Switch  Esc: Cancel")
        .style(Style::default().fg(MUTED_COLOR))
        .alignment(Alignment::Center);
    let hint_area = Rect::new(
        popup_area.x,
        popup_area.y + popup_area.height.saturating_sub(2),
        popup_area.width,
        1,
    );
    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_cluster_popup_lists_builtin_clusters() {
        let clusters = Cluster::builtin();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render(frame, frame.area(), &clusters, 1, &Cluster::MainnetBeta);
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(content.contains("Mainnet Beta"));
        assert!(content.contains("Devnet"));
        assert!(content.contains("Localnet"));
    }
}
