//! Tape pane rendering
//!
//! Cells are laid out in rows of [`CELLS_PER_ROW`] as two-digit hex values,
//! prefixed with the index of the first cell in the row. The cell under the
//! data pointer is highlighted and its row is kept on screen. A header line
//! shows the pointer, the operation count and the loop-return stack.

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

pub const CELLS_PER_ROW: usize = 8;

/// Scroll state for the tape pane
pub struct TapeScrollState {
    pub offset: usize,
    /// Pointer row seen on the previous render, for auto-follow
    pub prev_pointer_row: usize,
}

impl TapeScrollState {
    pub fn new() -> Self {
        TapeScrollState {
            offset: 0,
            prev_pointer_row: 0,
        }
    }
}

impl Default for TapeScrollState {
    fn default() -> Self {
        Self::new()
    }
}

fn header_line(snapshot: &Snapshot, max_operations: u64) -> Line<'static> {
    let loops = snapshot
        .loop_stack
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Line::from(vec![
        Span::styled("ptr ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            snapshot.data_pointer.to_string(),
            Style::default().fg(DEFAULT_THEME.pointer_op),
        ),
        Span::styled("  ops ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("{}/{}", snapshot.operations, max_operations),
            Style::default().fg(DEFAULT_THEME.fg),
        ),
        Span::styled("  loops [", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(loops, Style::default().fg(DEFAULT_THEME.loop_op)),
        Span::styled("]", Style::default().fg(DEFAULT_THEME.comment)),
    ])
}

fn cell_row(snapshot: &Snapshot, row: usize) -> Line<'static> {
    let start = row * CELLS_PER_ROW;
    let end = (start + CELLS_PER_ROW).min(snapshot.cells.len());

    let mut spans = vec![Span::styled(
        format!("{:05} ", start),
        Style::default().fg(DEFAULT_THEME.comment),
    )];
    for index in start..end {
        let value = snapshot.cells[index];
        let style = if index == snapshot.data_pointer {
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else if value == 0 {
            Style::default().fg(DEFAULT_THEME.comment)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::styled(format!("{:02x}", value), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    max_operations: u64,
    is_focused: bool,
    scroll_state: &mut TapeScrollState,
) {
    let block = pane_block(" Tape ", is_focused);

    let Some(snapshot) = snapshot else {
        let paragraph = Paragraph::new("(no state recorded)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let total_rows = snapshot.cells.len().div_ceil(CELLS_PER_ROW);
    // Header takes one row
    let visible = visible_height(area).saturating_sub(1).max(1);

    // Follow the pointer only when it changes row, so manual scrolling sticks
    let pointer_row = snapshot.data_pointer / CELLS_PER_ROW;
    if pointer_row != scroll_state.prev_pointer_row {
        if pointer_row < scroll_state.offset {
            scroll_state.offset = pointer_row;
        } else if pointer_row >= scroll_state.offset + visible {
            scroll_state.offset = pointer_row + 1 - visible;
        }
        scroll_state.prev_pointer_row = pointer_row;
    }
    clamp_scroll(&mut scroll_state.offset, total_rows, visible);

    let mut items = vec![ListItem::new(header_line(snapshot, max_operations))];
    items.extend(
        (scroll_state.offset..total_rows)
            .take(visible)
            .map(|row| ListItem::new(cell_row(snapshot, row))),
    );

    frame.render_widget(List::new(items).block(block), area);
}
