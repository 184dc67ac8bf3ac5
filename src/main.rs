use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dailychess::app::{App, PuzzleInput};
use dailychess::cli::{Cli, Command};
use dailychess::clock::{Clock, FixedClock, SystemClock};
use dailychess::config::{self, Config, LOG_FILE};
use dailychess::engine::{FeedbackTimer, PuzzleEngine};
use dailychess::oracle::ChessOracle;
use dailychess::progress::levels::{badges, current_level, next_level};
use dailychess::progress::{JsonFileStore, MemoryStore, ProgressStore};
use dailychess::puzzle::{Catalog, PuzzleDefinition};
use dailychess::telemetry::init_tracing;
use dailychess::ui::draw_ui;
use dailychess::{Error, Result};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::data_dir().ok();
    if let Some(dir) = &data_dir {
        init_tracing(&dir.join(LOG_FILE));
    }

    let config = Config::load_or_default(cli.config.as_deref());
    let catalog_path = cli.catalog.clone().or_else(|| config.catalog_path.clone());
    let catalog = Catalog::load_or_builtin(catalog_path.as_deref());
    let store = open_store(&config, data_dir);

    match cli.command() {
        Command::Play { date, puzzle } => {
            let clock: Box<dyn Clock> = match date {
                Some(date) => Box::new(FixedClock(date)),
                None => Box::new(SystemClock),
            };
            let puzzle = select_puzzle(&catalog, puzzle.as_deref(), clock.as_ref())?;
            let engine = PuzzleEngine::start(puzzle, Box::new(ChessOracle::new()), store, clock)
                .with_default_promotion(config.default_promotion);
            let app = App::new(engine, FeedbackTimer::new(config.feedback_duration()));
            run_tui(app)?;
        }
        Command::Stats => print_stats(store.as_ref(), &SystemClock),
        Command::List => print_catalog(&catalog, store.as_ref()),
    }
    Ok(())
}

/// Progress file under the data directory, or in memory when there is no home.
fn open_store(config: &Config, data_dir: Option<PathBuf>) -> Box<dyn ProgressStore> {
    let path = match data_dir {
        Some(dir) => Some(config.stats_path(&dir)),
        None if config.stats_file.is_absolute() => Some(config.stats_file.clone()),
        None => None,
    };
    match path {
        Some(path) => {
            info!(target: "dailychess", path = %path.display(), "Using progress file");
            Box::new(JsonFileStore::new(path))
        }
        None => {
            warn!(target: "dailychess", "No home directory, progress will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn select_puzzle(
    catalog: &Catalog,
    id: Option<&str>,
    clock: &dyn Clock,
) -> Result<PuzzleDefinition> {
    match id {
        Some(id) => catalog.by_id(id).cloned(),
        None => {
            let today = clock.today();
            catalog
                .for_date(today)
                .cloned()
                .ok_or_else(|| Error::PuzzleNotFound {
                    key: today.to_string(),
                })
        }
    }
}

fn print_stats(store: &dyn ProgressStore, clock: &dyn Clock) {
    let record = store.load().decayed(clock.today());
    let level = current_level(record.total_solved);

    println!("Streak:       {}", record.streak);
    println!("Total solved: {}", record.total_solved);
    match record.last_solved_date {
        Some(date) => println!("Last solved:  {}", date),
        None => println!("Last solved:  never"),
    }
    println!("Level:        {} {}", level.icon, level.name);
    if let Some(next) = next_level(record.total_solved) {
        println!(
            "Next level:   {} ({} more)",
            next.name,
            next.min_total - record.total_solved
        );
    }
    println!();
    println!("Badges:");
    for badge in badges(&record) {
        let mark = if badge.unlocked { "x" } else { " " };
        println!(
            "  [{}] {} {:<16} {}/{}  {}",
            mark,
            badge.id.icon(),
            badge.id.name(),
            badge.progress,
            badge.target,
            badge.id.description()
        );
    }
}

fn print_catalog(catalog: &Catalog, store: &dyn ProgressStore) {
    let record = store.load();
    for puzzle in catalog.puzzles() {
        let date = puzzle
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());
        let mark = if record.has_solved(&puzzle.id) {
            "\u{2713}"
        } else {
            " "
        };
        println!(
            "{} {}  {:<20} {}",
            mark, date, puzzle.id, puzzle.description
        );
    }
}

fn map_key(code: KeyCode) -> PuzzleInput {
    match code {
        KeyCode::Up => PuzzleInput::Up,
        KeyCode::Down => PuzzleInput::Down,
        KeyCode::Left => PuzzleInput::Left,
        KeyCode::Right => PuzzleInput::Right,
        KeyCode::Enter | KeyCode::Char(' ') => PuzzleInput::Select,
        KeyCode::Esc => PuzzleInput::Cancel,
        KeyCode::Char('h') | KeyCode::Char('H') => PuzzleInput::Hint,
        KeyCode::Char('s') | KeyCode::Char('S') => PuzzleInput::Reveal,
        KeyCode::Char('r') | KeyCode::Char('R') => PuzzleInput::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') => PuzzleInput::Quit,
        _ => PuzzleInput::Other,
    }
}

fn run_tui(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    app.process_input(map_key(key_event.code), Instant::now());
                }
            }
        }
    }
    Ok(())
}
