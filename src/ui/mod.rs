pub mod widgets;

use crate::app::{App, LayoutMode};
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::Stdout;
use widgets::movie::MoviePane;
use widgets::search::SearchBar;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

pub fn draw(frame: &mut Frame, app: &App) {
    match app.layout {
        LayoutMode::SearchFirst => draw_search_first(frame, app),
        LayoutMode::Results => draw_results(frame, app),
    }

    if let Some(ref notice) = app.notice {
        let area = frame.area();
        let line = Rect {
            x: area.x,
            y: area.bottom().saturating_sub(1),
            width: area.width,
            height: 1,
        };
        let banner = Paragraph::new(notice.text.as_str())
            .style(Style::default().fg(Color::Black).bg(Color::Yellow));
        frame.render_widget(banner, line);
    }
}

/// Before the first search: the bar sits roughly a third of the way down,
/// nothing else on screen.
fn draw_search_first(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(36),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(frame.area());

    SearchBar::new(&app.input, app.state).render(frame, centered(chunks[1], 60));
}

/// After the first trigger: the bar moves to the top and the result pane
/// takes the remainder.
fn draw_results(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(frame.area());

    SearchBar::new(&app.input, app.state).render(frame, centered(chunks[0], 60));
    MoviePane::new(app.plan.as_ref(), app.state, app.scroll).render(frame, chunks[1]);
}

/// Narrows `area` to at most `max_width` columns, keeping it centered.
fn centered(area: Rect, max_width: u16) -> Rect {
    if area.width <= max_width {
        return area;
    }
    let margin = (area.width - max_width) / 2;
    Rect {
        x: area.x + margin,
        width: max_width,
        ..area
    }
}
