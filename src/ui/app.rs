//! Main TUI application state and logic

use super::panes::{
    render_output_pane, render_program_pane, render_status_bar, render_tape_pane,
    ProgramScrollState, TapeScrollState,
};
use crate::interpreter::history::History;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Interval between steps in auto-play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(250);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Tape,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (program -> output -> tape)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Program,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Tape,
            FocusedPane::Output => FocusedPane::Program,
            FocusedPane::Tape => FocusedPane::Output,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded run being browsed
    pub history: History,

    /// Operation ceiling the run was recorded with
    pub max_operations: u64,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub program_scroll: ProgramScrollState,
    pub tape_scroll: TapeScrollState,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over a recorded history
    pub fn new(history: History, max_operations: u64) -> Self {
        let status_message = match history.outcome() {
            Ok(_) => String::from("Ready!"),
            Err(e) => format!("Run ends with: {}", e),
        };

        App {
            history,
            max_operations,
            focused_pane: FocusedPane::Program,
            program_scroll: ProgramScrollState::new(),
            tape_scroll: TapeScrollState::new(),
            output_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.history.step_forward() {
                    self.status_message = "Playing...".to_string();
                    self.output_scroll = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = self.end_message();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Fault position to highlight, only once the cursor reaches the fault
    fn error_position(&self) -> Option<usize> {
        if !self.history.is_at_end() {
            return None;
        }
        self.history.outcome().as_ref().err().and_then(|e| e.position())
    }

    fn end_message(&self) -> String {
        match self.history.outcome() {
            Ok(_) => "Playback complete".to_string(),
            Err(e) => format!("Fault: {}", e),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Left column: Program (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let snapshot = self.history.current();
        let instruction_pointer = snapshot.map(|s| s.instruction_pointer).unwrap_or(0);
        let error_position = self.error_position();

        render_program_pane(
            frame,
            left_rows[0],
            self.history.program(),
            instruction_pointer,
            error_position,
            self.focused_pane == FocusedPane::Program,
            &mut self.program_scroll,
        );

        render_output_pane(
            frame,
            left_rows[1],
            snapshot,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        render_tape_pane(
            frame,
            columns[1],
            snapshot,
            self.max_operations,
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.history.position(),
            self.history.len().max(1),
            self.history.outcome().is_err(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let stepped = (0..n).take_while(|_| self.history.step_forward()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.output_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Program => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.program_scroll.target_line_row {
                        self.program_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll.offset = self.tape_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Program => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.program_scroll.target_line_row {
                        self.program_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => {
                    self.tape_scroll.offset = self.tape_scroll.offset.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.history.jump_to_end();
                self.status_message = self.end_message();
                self.output_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.history.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
                self.output_scroll = 0;
            }
            _ => {}
        }
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        if self.history.step_forward() {
            self.status_message = "Stepped forward".to_string();
            // Auto-scroll output to bottom
            self.output_scroll = usize::MAX;
        } else {
            self.status_message = format!("Cannot step forward: {}", self.end_message());
        }
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        if self.history.step_backward() {
            self.status_message = "Stepped backward".to_string();
            self.output_scroll = usize::MAX;
        } else {
            self.status_message = "Cannot step backward: at start".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::engine::ExecConfig;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(program: &str) -> App {
        let config = ExecConfig::default();
        let history = History::record(program, &config, usize::MAX).unwrap();
        App::new(history, config.max_operations)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn focus_cycles_through_all_panes() {
        let mut focus = FocusedPane::Program;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, FocusedPane::Program);
        assert_eq!(FocusedPane::Program.next().prev(), FocusedPane::Program);
    }

    #[test]
    fn keys_move_through_history() {
        let mut app = app("+++.");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.history.position(), 3);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.history.position(), 2);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.history.position(), 4);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.history.position(), 0);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn fault_is_highlighted_only_at_the_end() {
        let mut app = app("+<");
        assert_eq!(app.error_position(), None);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.error_position(), Some(1));
        assert!(app.status_message.starts_with("Fault:"));
    }

    #[test]
    fn renders_into_a_test_backend() {
        let mut app = app("++[>+<-]>.");
        press(&mut app, KeyCode::Enter);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
    }
}
