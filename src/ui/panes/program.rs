//! Program pane rendering
//!
//! Shows the program text with line numbers, colors instruction symbols by
//! kind, greys out everything else, and highlights the character under the
//! instruction pointer. When the run faulted at a known position and the
//! cursor is on the last snapshot, that character is highlighted in red
//! instead.

use super::utils::{display_char, pane_block, visible_height};
use crate::interpreter::instruction::Instruction;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Scroll state for the program pane
pub struct ProgramScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to; `None` until first render
    pub target_line_row: Option<usize>,
}

impl ProgramScrollState {
    pub fn new() -> Self {
        ProgramScrollState {
            offset: 0,
            target_line_row: None,
        }
    }
}

impl Default for ProgramScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// One program line with the instruction index of its first character
struct ProgramLine {
    start: usize,
    chars: Vec<char>,
}

/// Split the program on newlines, keeping instruction indices
fn split_lines(program: &str) -> Vec<ProgramLine> {
    let mut lines = vec![ProgramLine {
        start: 0,
        chars: Vec::new(),
    }];
    for (index, c) in program.chars().enumerate() {
        if c == '\n' {
            lines.push(ProgramLine {
                start: index + 1,
                chars: Vec::new(),
            });
        } else if let Some(line) = lines.last_mut() {
            line.chars.push(c);
        }
    }
    lines
}

/// Zero-based line holding instruction `position`
fn line_of(lines: &[ProgramLine], position: usize) -> usize {
    lines
        .iter()
        .rposition(|line| line.start <= position)
        .unwrap_or(0)
}

fn symbol_style(c: char) -> Style {
    match Instruction::from_char(c) {
        Some(Instruction::Right | Instruction::Left) => Style::default().fg(DEFAULT_THEME.pointer_op),
        Some(Instruction::Increment | Instruction::Decrement) => {
            Style::default().fg(DEFAULT_THEME.cell_op)
        }
        Some(Instruction::Output) => Style::default()
            .fg(DEFAULT_THEME.output_op)
            .add_modifier(Modifier::BOLD),
        Some(Instruction::LoopOpen | Instruction::LoopClose) => Style::default()
            .fg(DEFAULT_THEME.loop_op)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Render the program pane
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    program: &str,
    instruction_pointer: usize,
    error_position: Option<usize>,
    is_focused: bool,
    scroll_state: &mut ProgramScrollState,
) {
    let block = pane_block(" Program ", is_focused);
    let lines = split_lines(program);
    let highlight = error_position.unwrap_or(instruction_pointer);
    let current_line = line_of(&lines, highlight);

    let visible = visible_height(area);
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible / 2)
        .min(visible.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    scroll_state.offset = current_line.saturating_sub(target_row);
    if lines.len() > visible {
        scroll_state.offset = scroll_state.offset.min(lines.len() - visible);
    } else {
        scroll_state.offset = 0;
    }

    let cursor_style = if error_position.is_some() {
        Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.secondary)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible)
        .map(|(idx, line)| {
            let is_current = idx == current_line;
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            for (offset, &c) in line.chars.iter().enumerate() {
                let style = if line.start + offset == highlight {
                    cursor_style
                } else if is_current {
                    symbol_style(c).bg(DEFAULT_THEME.current_line_bg)
                } else {
                    symbol_style(c)
                };
                spans.push(Span::styled(display_char(c).to_string(), style));
            }

            // Past the last character: show the halt position as a blank cursor
            if is_current && highlight == line.start + line.chars.len() {
                spans.push(Span::styled(" ", cursor_style));
            }

            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_track_instruction_indices() {
        let lines = split_lines("++\n>.\n\n[");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].start, 3);
        assert_eq!(lines[1].chars, vec!['>', '.']);
        assert_eq!(lines[3].start, 7);
    }

    #[test]
    fn line_of_maps_positions() {
        let lines = split_lines("++\n>.");
        assert_eq!(line_of(&lines, 0), 0);
        assert_eq!(line_of(&lines, 2), 0);
        assert_eq!(line_of(&lines, 3), 1);
        assert_eq!(line_of(&lines, 5), 1);
    }
}
