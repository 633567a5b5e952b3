use crate::lookup::{LookupResponse, MovieLookup, SearchQuery};
use crate::render::{build_render_plan, RenderPlan};
use crate::ui;
use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{debug, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub const EMPTY_QUERY_PROMPT: &str = "Please enter a movie name to search.";
pub const GENERIC_FAILURE_PROMPT: &str =
    "An error occurred while fetching movie data. Please try again later.";

/// How long a notice stays on screen before it expires on its own.
const NOTICE_TTL: Duration = Duration::from_secs(6);

/// Where the search flow currently is. `Rendered` and `ErrorShown` both
/// accept the next trigger; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Rendered,
    ErrorShown,
}

/// Page arrangement: search bar centered before the first search, pinned to
/// the top with the result pane below it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    SearchFirst,
    Results,
}

/// A transient, non-modal message shown to the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    shown_at: Instant,
}

impl Notice {
    fn new(text: String) -> Self {
        Self {
            text,
            shown_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTICE_TTL
    }
}

/// Result of one spawned lookup, tagged with the search it belongs to.
struct SearchOutcome {
    seq: u64,
    result: Result<LookupResponse>,
}

pub struct App {
    lookup: Arc<dyn MovieLookup>,
    pub input: String,
    pub layout: LayoutMode,
    pub state: SearchState,
    pub plan: Option<RenderPlan>,
    pub notice: Option<Notice>,
    pub scroll: u16,
    should_quit: bool,
    /// Monotonic per-search counter. Outcomes carrying an older value lost
    /// the race to a newer search and are dropped (last-write-wins).
    search_seq: u64,
    outcome_tx: mpsc::UnboundedSender<SearchOutcome>,
    outcome_rx: Option<mpsc::UnboundedReceiver<SearchOutcome>>,
}

impl App {
    pub fn new(lookup: Arc<dyn MovieLookup>, initial_query: Option<String>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            lookup,
            input: initial_query.unwrap_or_default(),
            layout: LayoutMode::SearchFirst,
            state: SearchState::Idle,
            plan: None,
            notice: None,
            scroll: 0,
            should_quit: false,
            search_seq: 0,
            outcome_tx,
            outcome_rx: Some(outcome_rx),
        }
    }

    pub async fn run(&mut self, terminal: &mut ui::Tui) -> Result<()> {
        let mut outcome_rx = self
            .outcome_rx
            .take()
            .context("app event loop started twice")?;
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_millis(250));

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => self.on_key(key),
                        Some(Ok(_)) => {}
                        Some(Err(err)) => return Err(err.into()),
                        None => break,
                    }
                }
                Some(outcome) = outcome_rx.recv() => {
                    self.handle_outcome(outcome);
                }
                _ = tick.tick() => {
                    self.expire_notice();
                }
            }
        }

        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.should_quit = true,
            // Enter and F5 are equivalent triggers for the same flow.
            KeyCode::Enter | KeyCode::F(5) => self.on_search_triggered(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    /// Entry point for both activation gestures. Validates locally, shifts
    /// the layout, then hands the query to a spawned lookup task.
    pub fn on_search_triggered(&mut self) {
        // The layout shifts on every trigger, before validation, matching
        // the page transition of the upstream widget.
        self.layout = LayoutMode::Results;

        let Some(query) = SearchQuery::parse(&self.input) else {
            self.push_notice(EMPTY_QUERY_PROMPT.to_string());
            return;
        };

        self.search_seq += 1;
        let seq = self.search_seq;
        self.state = SearchState::Searching;

        let lookup = Arc::clone(&self.lookup);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = lookup.resolve(&query).await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(SearchOutcome { seq, result });
        });
    }

    fn handle_outcome(&mut self, outcome: SearchOutcome) {
        if outcome.seq != self.search_seq {
            debug!(
                "dropping stale search outcome ({} != {})",
                outcome.seq, self.search_seq
            );
            return;
        }

        match outcome.result {
            Ok(LookupResponse::Found(record)) => {
                self.plan = Some(build_render_plan(&record));
                self.scroll = 0;
                self.notice = None;
                self.state = SearchState::Rendered;
            }
            Ok(LookupResponse::NotFound(message)) => {
                // Prior content and the results layout stay as they are.
                self.push_notice(format!("Error: {}", message));
                self.state = SearchState::ErrorShown;
            }
            Ok(LookupResponse::TransportError { status, message }) => {
                warn!("lookup transport failure: {} {}", status, message);
                self.push_notice(GENERIC_FAILURE_PROMPT.to_string());
                self.state = SearchState::ErrorShown;
            }
            Err(err) => {
                warn!("lookup failed: {:#}", err);
                self.push_notice(GENERIC_FAILURE_PROMPT.to_string());
                self.state = SearchState::ErrorShown;
            }
        }
    }

    fn push_notice(&mut self, text: String) {
        self.notice = Some(Notice::new(text));
    }

    fn expire_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{MovieRecord, RatingEntry};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLookup {
        calls: AtomicUsize,
        response: LookupResponse,
    }

    impl CountingLookup {
        fn new(response: LookupResponse) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
            })
        }
    }

    #[async_trait]
    impl MovieLookup for CountingLookup {
        async fn resolve(&self, _query: &SearchQuery) -> Result<LookupResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn sample_record() -> MovieRecord {
        MovieRecord {
            title: "Alien".to_string(),
            plot: "The crew of a commercial spacecraft encounters a deadly lifeform.".to_string(),
            director: "Ridley Scott".to_string(),
            writers: "Dan O'Bannon, Ronald Shusett".to_string(),
            actors: "Sigourney Weaver, Tom Skerritt".to_string(),
            box_office: "$81,900,459".to_string(),
            released: "22 Jun 1979".to_string(),
            runtime: "117 min".to_string(),
            poster_url: "https://m.media-amazon.com/images/alien.jpg".to_string(),
            genres: vec!["Horror".to_string(), "Sci-Fi".to_string()],
            ratings: vec![RatingEntry {
                source: "Internet Movie Database".to_string(),
                score: "8.5".to_string(),
            }],
            imdb_rating: "8.5".to_string(),
            imdb_votes: "950,000".to_string(),
        }
    }

    async fn next_outcome(app: &mut App) -> SearchOutcome {
        app.outcome_rx
            .as_mut()
            .unwrap()
            .recv()
            .await
            .expect("expected a search outcome")
    }

    #[tokio::test]
    async fn test_whitespace_query_never_issues_a_lookup() {
        let lookup = CountingLookup::new(LookupResponse::NotFound("unused".to_string()));
        let mut app = App::new(lookup.clone(), Some("   ".to_string()));

        app.on_search_triggered();
        tokio::task::yield_now().await;

        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
        assert_eq!(app.notice.as_ref().unwrap().text, EMPTY_QUERY_PROMPT);
        assert_ne!(app.state, SearchState::Searching);
    }

    #[tokio::test]
    async fn test_found_outcome_replaces_plan() {
        let lookup = CountingLookup::new(LookupResponse::Found(sample_record()));
        let mut app = App::new(lookup.clone(), Some("Alien".to_string()));

        app.on_search_triggered();
        assert_eq!(app.state, SearchState::Searching);
        assert_eq!(app.layout, LayoutMode::Results);

        let outcome = next_outcome(&mut app).await;
        app.handle_outcome(outcome);

        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.state, SearchState::Rendered);
        assert_eq!(app.plan.as_ref().unwrap().title, "Alien");
        assert!(app.notice.is_none());
    }

    #[tokio::test]
    async fn test_not_found_surfaces_provider_message_and_keeps_plan() {
        let lookup = CountingLookup::new(LookupResponse::Found(sample_record()));
        let mut app = App::new(lookup, Some("Alien".to_string()));
        app.on_search_triggered();
        let outcome = next_outcome(&mut app).await;
        app.handle_outcome(outcome);

        let lookup = CountingLookup::new(LookupResponse::NotFound("Movie not found!".to_string()));
        app.lookup = lookup;
        app.input = "Aliennnn".to_string();
        app.on_search_triggered();
        let outcome = next_outcome(&mut app).await;
        app.handle_outcome(outcome);

        assert_eq!(app.state, SearchState::ErrorShown);
        assert_eq!(app.notice.as_ref().unwrap().text, "Error: Movie not found!");
        // The previously rendered movie is left in place.
        assert_eq!(app.plan.as_ref().unwrap().title, "Alien");
        assert_eq!(app.layout, LayoutMode::Results);
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_generic_prompt() {
        let lookup = CountingLookup::new(LookupResponse::TransportError {
            status: 404,
            message: "Not Found".to_string(),
        });
        let mut app = App::new(lookup, Some("Alien".to_string()));

        app.on_search_triggered();
        let outcome = next_outcome(&mut app).await;
        app.handle_outcome(outcome);

        assert_eq!(app.state, SearchState::ErrorShown);
        assert_eq!(app.notice.as_ref().unwrap().text, GENERIC_FAILURE_PROMPT);
    }

    #[tokio::test]
    async fn test_stale_outcome_is_dropped() {
        let lookup = CountingLookup::new(LookupResponse::Found(sample_record()));
        let mut app = App::new(lookup, Some("Alien".to_string()));

        app.on_search_triggered();
        let stale = next_outcome(&mut app).await;

        // A second trigger supersedes the first before its outcome lands.
        app.on_search_triggered();
        let fresh = next_outcome(&mut app).await;

        app.handle_outcome(stale);
        assert_eq!(app.state, SearchState::Searching);
        assert!(app.plan.is_none());

        app.handle_outcome(fresh);
        assert_eq!(app.state, SearchState::Rendered);
    }

    #[tokio::test]
    async fn test_lookup_error_surfaces_generic_prompt() {
        struct FailingLookup;

        #[async_trait]
        impl MovieLookup for FailingLookup {
            async fn resolve(&self, _query: &SearchQuery) -> Result<LookupResponse> {
                anyhow::bail!("connection reset by peer")
            }
        }

        let mut app = App::new(Arc::new(FailingLookup), Some("Alien".to_string()));
        app.on_search_triggered();
        let outcome = next_outcome(&mut app).await;
        app.handle_outcome(outcome);

        assert_eq!(app.state, SearchState::ErrorShown);
        assert_eq!(app.notice.as_ref().unwrap().text, GENERIC_FAILURE_PROMPT);
    }
}
