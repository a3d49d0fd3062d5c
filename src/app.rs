use chrono::Utc;

use crate::config::{Config, Direction};
use crate::generator::SentenceGenerator;
use crate::lexicon::store::LexiconStore;
use crate::session::card::Token;
use crate::session::grade::Grade;
use crate::session::queue::PracticeQueue;
use crate::session::summary::SessionSummary;
use crate::store::json_store::JsonStore;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Practice,
    Help,
}

/// The settings a learner can change from inside the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Preferences {
    direction: Direction,
    show_readings: bool,
    session_size: usize,
}

impl Preferences {
    fn of(config: &Config) -> Self {
        Self {
            direction: config.direction,
            show_readings: config.show_readings,
            session_size: config.session_size,
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub lexicon: LexiconStore,
    pub queue: PracticeQueue,
    pub selected_token: usize,
    pub status: Option<String>,
    pub last_summary: Option<SessionSummary>,
    pub should_quit: bool,
    store: Option<JsonStore>,
    generator: SentenceGenerator,
    baseline: Preferences,
}

impl App {
    /// Builds the app and its first session. `store` is `None` when the data
    /// directory is unavailable; the app then runs without persistence.
    pub fn new(config: Config, store: Option<JsonStore>) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using default");
            Theme::default()
        });
        let theme: &'static Theme = Box::leak(Box::new(theme));

        let lexicon = match &store {
            Some(store) => LexiconStore::hydrate(store),
            None => LexiconStore::default(),
        };
        let last_summary = store
            .as_ref()
            .and_then(|s| s.load_sessions().ok())
            .and_then(|h| h.latest().cloned());

        let generator = match config.seed {
            Some(seed) => SentenceGenerator::seeded(config.generator_options(), seed),
            None => SentenceGenerator::from_entropy(config.generator_options()),
        };

        let baseline = Preferences::of(&config);
        let mut app = Self {
            screen: AppScreen::Practice,
            config,
            theme,
            lexicon,
            queue: PracticeQueue::new(),
            selected_token: 0,
            status: None,
            last_summary,
            should_quit: false,
            store,
            generator,
            baseline,
        };
        app.start_session();
        app
    }

    /// Replace the queue with a freshly generated session. The outgoing
    /// session is summarized first.
    pub fn start_session(&mut self) {
        self.finish_session();
        self.generator.set_options(self.config.generator_options());

        let cards = self
            .generator
            .generate(self.lexicon.lexicon(), self.config.session_size);
        self.status = if cards.is_empty() {
            Some("No cards could be generated from this lexicon".to_string())
        } else if cards.len() < self.config.session_size {
            Some(format!(
                "Generated {} of {} cards",
                cards.len(),
                self.config.session_size
            ))
        } else {
            None
        };
        tracing::debug!(cards = cards.len(), "session started");

        self.queue.inject(cards);
        self.selected_token = 0;
    }

    fn finish_session(&mut self) {
        let Some(summary) =
            SessionSummary::from_queue(&self.queue, self.config.difficulty, Utc::now())
        else {
            return;
        };
        if let Some(store) = &self.store
            && let Err(e) = store.append_session(summary.clone())
        {
            tracing::warn!(error = %e, "failed to save session summary");
        }
        self.last_summary = Some(summary);
    }

    pub fn flip(&mut self) {
        self.queue.flip();
    }

    pub fn grade(&mut self, grade: Grade) {
        self.queue.grade(grade);
        self.selected_token = 0;
    }

    pub fn advance(&mut self) {
        self.queue.advance();
        self.selected_token = 0;
    }

    pub fn select_next_token(&mut self) {
        let len = self.token_count();
        if len > 0 {
            self.selected_token = (self.selected_token + 1) % len;
        }
    }

    pub fn select_prev_token(&mut self) {
        let len = self.token_count();
        if len > 0 {
            self.selected_token = (self.selected_token + len - 1) % len;
        }
    }

    fn token_count(&self) -> usize {
        self.queue.current().map_or(0, |card| card.tokens.len())
    }

    pub fn selected(&self) -> Option<&Token> {
        self.queue
            .current()
            .and_then(|card| card.tokens.get(self.selected_token))
    }

    pub fn mark_selected_unknown(&mut self) {
        let Some(id) = self.selected().map(|t| t.id.clone()) else {
            return;
        };
        self.queue.mark_unknown(&id);
    }

    pub fn toggle_direction(&mut self) {
        self.config.direction = self.config.direction.toggled();
    }

    pub fn toggle_readings(&mut self) {
        self.config.show_readings = !self.config.show_readings;
    }

    /// Takes effect on the next regenerated session.
    pub fn step_session_size(&mut self, grow: bool) {
        self.config.step_session_size(grow);
        self.status = Some(format!(
            "Session size {} (press r to regenerate)",
            self.config.session_size
        ));
    }

    pub fn toggle_help(&mut self) {
        self.screen = match self.screen {
            AppScreen::Help => AppScreen::Practice,
            AppScreen::Practice => AppScreen::Help,
        };
    }

    /// Summarize the session and persist interactive preferences. CLI
    /// overrides of this run are not written back.
    pub fn quit(&mut self) {
        self.finish_session();
        self.persist_preferences();
        self.should_quit = true;
    }

    fn persist_preferences(&self) {
        if self.store.is_none() {
            return;
        }
        let mut saved = Config::load().unwrap_or_default();
        if !self.apply_preferences(&mut saved) {
            return;
        }
        if let Err(e) = saved.save() {
            tracing::warn!(error = %e, "failed to save preferences");
        }
    }

    /// Copy onto `saved` only the preferences changed since startup, so
    /// values that came from CLI flags stay out of the config file.
    fn apply_preferences(&self, saved: &mut Config) -> bool {
        let current = Preferences::of(&self.config);
        let mut changed = false;
        if current.direction != self.baseline.direction {
            saved.direction = current.direction;
            changed = true;
        }
        if current.show_readings != self.baseline.show_readings {
            saved.show_readings = current.show_readings;
            changed = true;
        }
        if current.session_size != self.baseline.session_size {
            saved.session_size = current.session_size;
            changed = true;
        }
        changed
    }
}
