use crate::app::SearchState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Single-line title input. Enter or F5 fires the search.
pub struct SearchBar<'a> {
    input: &'a str,
    state: SearchState,
}

impl<'a> SearchBar<'a> {
    pub fn new(input: &'a str, state: SearchState) -> Self {
        Self { input, state }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.state {
            SearchState::Searching => " Search (fetching...) ",
            _ => " Search a movie (Enter / F5) ",
        };

        let border_style = if self.state == SearchState::Searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let line = Line::from(vec![
            Span::styled(self.input, Style::default().fg(Color::White)),
            Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
