//! Output pane rendering

use super::utils::{clamp_scroll, display_char, pane_block, visible_height};
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the program output produced up to the current snapshot
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Output ", is_focused);

    let lines = snapshot.map(Snapshot::output_lines).unwrap_or_default();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), visible);

    let items: Vec<ListItem> = lines
        .iter()
        .skip(*scroll_offset)
        .take(visible)
        .map(|line| {
            let text: String = line.chars().map(display_char).collect();
            ListItem::new(text).style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
