use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::Level;

use wpmx::app::{App, AppScreen};
use wpmx::config::Config;
use wpmx::event::{self, AppEvent, EventHandler};
use wpmx::generator::dictionary::Corpus;
use wpmx::session::Phase;
use wpmx::store::json_store::JsonStore;
use wpmx::store::schema::DURATIONS;
use wpmx::ui::components::dashboard::Dashboard;
use wpmx::ui::components::typing_area::TypingArea;
use wpmx::ui::layout::{GameLayout, centered_rect};

#[derive(Parser)]
#[command(name = "wpmx", version, about = "Timed terminal typing test")]
struct Cli {
    #[arg(short, long, value_parser = parse_duration, help = "Skip the menu and start a session of 15, 30 or 60 seconds")]
    duration: Option<u32>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Newline-separated word list to draw words from")]
    words: Option<PathBuf>,
}

fn parse_duration(raw: &str) -> Result<u32, String> {
    let secs: u32 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number of seconds"))?;
    if DURATIONS.contains(&secs) {
        Ok(secs)
    } else {
        Err(format!("duration must be one of {DURATIONS:?}"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(words) = cli.words {
        config.word_list = Some(words.to_string_lossy().to_string());
    }

    if let Err(err) = init_logging(config.log_level()) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    if let Some(err) = config_err {
        tracing::warn!(path = %Config::config_path().display(), %err, "bad config file, using defaults");
    }

    // An unusable corpus is fatal, and must surface before the terminal is taken over.
    let corpus = load_corpus(&config)?;

    let store = match JsonStore::new() {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!(%err, "data directory unavailable, history will not be saved");
            None
        }
    };

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut app = App::new(config, corpus, store);
    if let Some(duration) = cli.duration {
        app.start_session(duration);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(%err, "exiting after error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Stdout belongs to the TUI, so logs go to a file next to the history.
fn init_logging(level: Level) -> Result<()> {
    let dir = JsonStore::default_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    let log_path = dir.join("wpmx.log");
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn load_corpus(config: &Config) -> Result<Corpus> {
    let corpus = match config.word_list {
        Some(ref path) => Corpus::from_file(Path::new(path))
            .with_context(|| format!("loading word list {path}"))?,
        None => Corpus::embedded().context("loading bundled word list")?,
    };
    tracing::info!(words = corpus.len(), "word corpus loaded");
    Ok(corpus)
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
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Game => handle_game_key(app, key),
        AppScreen::Results => handle_results_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Left | KeyCode::Char('h') => {
            app.menu.prev();
            app.refresh_menu_best();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.menu.next();
            app.refresh_menu_best();
        }
        KeyCode::Enter => app.start_selected(),
        _ => {}
    }
}

fn handle_game_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Tab => app.restart(),
        _ => {
            if let Some(keystroke) = event::keystroke(&key) {
                app.type_key(keystroke);
            }
        }
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => app.restart(),
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg)), area);

    match app.screen {
        AppScreen::Menu => frame.render_widget(&app.menu, centered_rect(60, 60, area)),
        AppScreen::Game => render_game(frame, app),
        AppScreen::Results => render_results(frame, app),
    }
}

fn render_game(frame: &mut ratatui::Frame, app: &App) {
    let Some(ref session) = app.session else {
        return;
    };
    let colors = &app.theme.colors;
    let layout = GameLayout::new(frame.area());
    let header_style = Style::default().fg(colors.accent).add_modifier(Modifier::BOLD);

    let live_wpm = if session.phase() == Phase::Running {
        session.live_metrics().wpm
    } else {
        0
    };
    let header_row = Rect::new(layout.header.x, layout.header.y, layout.header.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(format!("{}s", session.time_left()), header_style)),
        header_row,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(format!("{live_wpm} wpm"), header_style))
            .alignment(Alignment::Right),
        header_row,
    );

    frame.render_widget(TypingArea::new(session.snapshot(), colors), layout.words);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [Tab] Restart  [Esc] Menu  [Ctrl+C] Quit ",
        Style::default().fg(colors.pending),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_results(frame: &mut ratatui::Frame, app: &App) {
    if let Some(ref result) = app.last_result {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Dashboard::new(result, app.last_best, app.theme), area);
    }
}
