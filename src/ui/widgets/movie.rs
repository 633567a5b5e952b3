use crate::app::SearchState;
use crate::render::RenderPlan;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const LABEL_STYLE: Style = Style::new().fg(Color::DarkGray);
const VALUE_STYLE: Style = Style::new().fg(Color::White);

/// Result pane: poster reference on the left, details on the right.
pub struct MoviePane<'a> {
    plan: Option<&'a RenderPlan>,
    state: SearchState,
    scroll: u16,
}

impl<'a> MoviePane<'a> {
    pub fn new(plan: Option<&'a RenderPlan>, state: SearchState, scroll: u16) -> Self {
        Self {
            plan,
            state,
            scroll,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Movie ").borders(Borders::ALL);

        let Some(plan) = self.plan else {
            let placeholder = if self.state == SearchState::Searching {
                "Fetching movie data..."
            } else {
                "No movie yet. Type a title above and press Enter."
            };
            frame.render_widget(Paragraph::new(placeholder).block(block), area);
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(20)])
            .split(inner);

        self.render_poster(frame, columns[0], plan);
        self.render_details(frame, columns[1], plan);
    }

    /// The terminal cannot paint the image itself, so the poster cell shows
    /// the reference the downstream surface would load.
    fn render_poster(&self, frame: &mut Frame, area: Rect, plan: &RenderPlan) {
        let block = Block::default().title(" Poster ").borders(Borders::ALL);
        let paragraph = Paragraph::new(plan.poster_url.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_details(&self, frame: &mut Frame, area: Rect, plan: &RenderPlan) {
        let width = area.width.saturating_sub(1).max(20) as usize;

        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(Span::styled(
            plan.title.as_str(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(genre_chip_row(plan));
        lines.push(Line::from(""));

        for wrapped in textwrap::wrap(&plan.plot, width) {
            lines.push(Line::from(Span::styled(
                wrapped.into_owned(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));

        let details = &plan.details;
        lines.push(detail_row("Director: ", &details.director));
        lines.push(detail_row("Writers: ", &details.writers));
        lines.push(detail_row("Starring: ", &details.actors));
        lines.push(detail_row("Box-office Collection: ", &details.box_office));
        lines.push(detail_row("Released on: ", &details.released));
        lines.push(detail_row("Runtime: ", &details.runtime));
        lines.push(detail_row(
            "IMDb Rating: ",
            &format!("{} ({} votes)", details.imdb_rating, details.imdb_votes),
        ));
        lines.push(Line::from(""));

        lines.extend(rating_tab_rows(plan));

        let paragraph = Paragraph::new(lines).scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

fn detail_row<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, LABEL_STYLE),
        Span::styled(value.to_string(), VALUE_STYLE),
    ])
}

/// One highlighted chip per genre, in provider order.
fn genre_chip_row(plan: &RenderPlan) -> Line<'_> {
    let mut spans = Vec::new();
    for chip in &plan.genres {
        spans.push(Span::styled(
            format!(" {} ", chip.label),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Two lines per rating block: the logo reference, then the score. Tabs
/// appear side by side in provider order; no tabs when there are no ratings.
fn rating_tab_rows(plan: &RenderPlan) -> Vec<Line<'_>> {
    if plan.ratings.is_empty() {
        return Vec::new();
    }

    let mut logos = Vec::new();
    let mut scores = Vec::new();
    for tab in &plan.ratings {
        logos.push(Span::styled(
            format!("[{}]", tab.logo),
            Style::default().fg(Color::Cyan),
        ));
        logos.push(Span::raw("  "));

        scores.push(Span::styled("Rating: ", LABEL_STYLE));
        scores.push(Span::styled(tab.score.as_str(), VALUE_STYLE));
        scores.push(Span::raw("  "));
    }

    vec![Line::from(logos), Line::from(scores)]
}
