use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing_subscriber::EnvFilter;

use jpdrills::app::{App, AppScreen};
use jpdrills::config::Config;
use jpdrills::event::{AppEvent, EventHandler};
use jpdrills::generator::SentenceGenerator;
use jpdrills::generator::frame::Difficulty;
use jpdrills::lexicon::Category;
use jpdrills::lexicon::store::LexiconStore;
use jpdrills::session::grade::Grade;
use jpdrills::store::json_store::{self, JsonStore};
use jpdrills::ui::components::lexicon_summary::LexiconSummary;
use jpdrills::ui::components::practice_card::PracticeCard;
use jpdrills::ui::components::session_bar::SessionBar;
use jpdrills::ui::layout::{AppLayout, centered_rect, pack_hint_lines};

#[derive(Parser)]
#[command(name = "jpdrills", version, about = "Generated Japanese sentence drills in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a practice session (default)
    Practice(PracticeArgs),
    /// Import a deck export (CSV with note_id, term, reading, translation, status, ...)
    Import { csv: PathBuf },
    /// Print generated cards without starting the TUI
    Generate {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Print cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show category counts of the active lexicon
    Lexicon,
    /// Drop the imported lexicon and return to the built-in one
    Clear,
}

#[derive(Args, Default)]
struct PracticeArgs {
    #[arg(short, long, help = "Sentences per session (5-100)")]
    count: Option<usize>,
    #[arg(long, help = "Seed for a reproducible session")]
    seed: Option<u64>,
    #[arg(short, long, help = "beginner, intermediate or advanced")]
    difficulty: Option<Difficulty>,
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = init_logging() {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid config, using defaults");
        Config::default()
    });

    match cli.command.unwrap_or(Command::Practice(PracticeArgs::default())) {
        Command::Practice(args) => run_practice(config, args),
        Command::Import { csv } => run_import(&csv),
        Command::Generate {
            count,
            seed,
            difficulty,
            json,
        } => run_generate(config, count, seed, difficulty, json),
        Command::Lexicon => run_lexicon(),
        Command::Clear => run_clear(),
    }
}

/// The TUI owns stdout, so logs go to `<data_dir>/jpdrills/jpdrills.log`.
fn init_logging() -> Result<()> {
    let dir = json_store::data_dir();
    fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("jpdrills.log"))?;
    let filter = EnvFilter::try_from_env("JPDRILLS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_store() -> Result<JsonStore> {
    JsonStore::new().context("opening data directory")
}

fn run_import(csv: &Path) -> Result<()> {
    let store = open_store()?;
    let mut lexicon = LexiconStore::hydrate(&store);
    let summary = lexicon.import_csv(&store, csv)?;
    println!(
        "Imported {} rows from {} ({} still new, {} skipped)",
        summary.total_rows,
        csv.display(),
        summary.excluded_new,
        summary.uncategorized + summary.malformed
    );
    print_counts(&lexicon);
    Ok(())
}

fn run_lexicon() -> Result<()> {
    let store = open_store()?;
    let lexicon = LexiconStore::hydrate(&store);
    match lexicon.snapshot() {
        Some(snapshot) => println!(
            "Imported {} from {}",
            snapshot.imported_at.format("%Y-%m-%d %H:%M"),
            snapshot.source.as_deref().unwrap_or("unknown source")
        ),
        None => println!("Using the built-in lexicon"),
    }
    print_counts(&lexicon);
    Ok(())
}

fn run_clear() -> Result<()> {
    let store = open_store()?;
    let mut lexicon = LexiconStore::hydrate(&store);
    if lexicon.clear(&store)? {
        println!("Imported lexicon removed");
    } else {
        println!("Nothing to clear");
    }
    Ok(())
}

fn print_counts(lexicon: &LexiconStore) {
    let counts = lexicon.counts();
    for category in Category::ALL {
        println!("  {:<8} {}", category.plural_label(), counts.get(category));
    }
}

fn run_generate(
    mut config: Config,
    count: usize,
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    json: bool,
) -> Result<()> {
    if let Some(difficulty) = difficulty {
        config.difficulty = difficulty;
    }
    let lexicon = match open_store() {
        Ok(store) => LexiconStore::hydrate(&store),
        Err(e) => {
            tracing::warn!(error = %e, "no data directory, using built-in lexicon");
            LexiconStore::default()
        }
    };
    let mut generator = match seed.or(config.seed) {
        Some(seed) => SentenceGenerator::seeded(config.generator_options(), seed),
        None => SentenceGenerator::from_entropy(config.generator_options()),
    };
    let cards = generator.generate(lexicon.lexicon(), count);

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        for card in &cards {
            let tokens: Vec<&str> = card.tokens.iter().map(|t| t.surface.as_str()).collect();
            println!("{}\n  {}\n", tokens.join(" "), card.target);
        }
    }
    if cards.len() < count {
        eprintln!("generated {} of {count} cards", cards.len());
    }
    Ok(())
}

fn run_practice(mut config: Config, args: PracticeArgs) -> Result<()> {
    if let Some(count) = args.count {
        config.session_size = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    config.validate();

    let store = match open_store() {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "running without persistence");
            None
        }
    };
    let mut app = App::new(config, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        bail!("{err:?}");
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.screen == AppScreen::Help {
        match key.code {
            KeyCode::Char('q') => app.quit(),
            _ => app.toggle_help(),
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char(' ') => app.flip(),
        KeyCode::Char(ch @ '1'..='4') => {
            if let Some(grade) = Grade::from_key(ch) {
                app.grade(grade);
            }
        }
        KeyCode::Char('n') | KeyCode::Enter => app.advance(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next_token(),
        KeyCode::Left | KeyCode::Char('h') => app.select_prev_token(),
        KeyCode::Char('u') => app.mark_selected_unknown(),
        KeyCode::Char('r') => app.start_session(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.step_session_size(true),
        KeyCode::Char('-') => app.step_session_size(false),
        KeyCode::Char('d') => app.toggle_direction(),
        KeyCode::Char('f') => app.toggle_readings(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

const KEY_HINTS: &[&str] = &[
    "[Space] flip",
    "[1-4] grade",
    "[n] next",
    "[←→] token",
    "[u] unknown",
    "[r] new session",
    "[+/-] size",
    "[d] direction",
    "[f] readings",
    "[?] help",
    "[q] quit",
];

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hint_lines = pack_hint_lines(KEY_HINTS, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16);

    frame.render_widget(
        SessionBar::new(app.queue.stats(), &app.config, app.status.as_deref(), app.theme),
        layout.header,
    );

    frame.render_widget(
        PracticeCard::new(app.queue.current(), app.theme)
            .position(app.queue.cursor(), app.queue.len())
            .revealed(app.queue.revealed())
            .direction(app.config.direction)
            .show_readings(app.config.show_readings)
            .selected(app.selected_token)
            .unknown(app.queue.current_unknown()),
        layout.main,
    );

    if let Some(sidebar) = layout.sidebar {
        frame.render_widget(
            LexiconSummary::new(&app.lexicon, app.last_summary.as_ref(), app.theme),
            sidebar,
        );
    }

    let footer: Vec<Line> = hint_lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer), layout.footer);

    if app.screen == AppScreen::Help {
        render_help(frame, app);
    }
}

fn render_help(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let popup = centered_rect(52, 16, frame.area());
    let lines: Vec<Line> = [
        ("Space", "show / hide the answer"),
        ("1 2 3 4", "very hard, okay, good, easy"),
        ("n / Enter", "next card without grading"),
        ("← → / h l", "select a token"),
        ("u", "mark the selected token unknown"),
        ("r", "generate a new session"),
        ("+ / -", "session size (next session)"),
        ("d", "switch JP → EN / EN → JP"),
        ("f", "toggle readings"),
        ("q / Esc", "quit"),
    ]
    .into_iter()
    .map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {key:<11}"), Style::default().fg(colors.accent())),
            Span::styled(action, Style::default().fg(colors.fg())),
        ])
    })
    .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys ")
                .border_style(Style::default().fg(colors.border_focused()))
                .style(Style::default().bg(colors.bg())),
        ),
        popup,
    );
}
