use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Stdout},
    path::PathBuf,
};

use typecraft::{
    app::{App, AppSettings, Control},
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    levels::Campaign,
    logging,
    runtime::{AppEvent, AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    ui::theme::ThemeMode,
    words::WordList,
};

/// terminal typing practice and typing battle
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Timed typing practice over random words, and a five-level typing battle against the villain king."
)]
pub struct Cli {
    /// screen to open first
    #[clap(short = 'm', long, value_enum, default_value_t = StartMode::Menu)]
    mode: StartMode,

    /// length of the practice countdown in seconds
    #[clap(short = 's', long = "seconds", value_parser = clap::value_parser!(u64).range(1..))]
    practice_secs: Option<u64>,

    /// custom practice prompt instead of random words
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// JSON word list: {"name": "...", "words": [...]}
    #[clap(long)]
    words_file: Option<PathBuf>,

    /// fewest words in a random prompt
    #[clap(long)]
    min_words: Option<usize>,

    /// most words in a random prompt
    #[clap(long)]
    max_words: Option<usize>,

    /// knight to fight with (1-3)
    #[clap(short = 'k', long, value_parser = clap::value_parser!(u8).range(1..=3))]
    knight: Option<u8>,

    /// color theme
    #[clap(short = 't', long, value_enum)]
    theme: Option<ThemeMode>,

    /// debug-level logging to the log file
    #[clap(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StartMode {
    Menu,
    Practice,
    Battle,
}

impl Cli {
    /// CLI flags win over the stored config for this run
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(secs) = self.practice_secs {
            cfg.practice_secs = secs;
        }
        if let Some(path) = &self.words_file {
            cfg.words_file = Some(path.clone());
        }
        if let Some(min) = self.min_words {
            cfg.min_words = min;
        }
        if let Some(max) = self.max_words {
            cfg.max_words = max;
        }
        if let Some(knight) = self.knight {
            cfg.knight = knight;
        }
        if let Some(theme) = self.theme {
            cfg.theme = theme;
        }
        cfg
    }

    fn to_settings(&self, cfg: &Config) -> typecraft::Result<AppSettings> {
        if self.prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(typecraft::Error::EmptyPrompt);
        }
        let words = match &cfg.words_file {
            Some(path) => WordList::from_path(path)?,
            None => WordList::builtin()?,
        };
        Ok(AppSettings {
            practice_secs: cfg.practice_secs()?,
            word_range: cfg.word_range()?,
            pass_rule: cfg.pass_rule(),
            knight_idx: cfg.knight_index(),
            theme: cfg.theme,
            custom_prompt: self.prompt.clone(),
            words,
        })
    }
}

/// Raw mode and the alternate screen for as long as this lives
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = AppDirs::log_path() {
        // Logging is best effort; the game runs without it.
        let _ = logging::init_file_logging(&log_path, cli.verbose);
    }

    let store = FileConfigStore::new();
    let cfg = cli.apply_to(store.load());
    let settings = match cli.to_settings(&cfg) {
        Ok(settings) => settings,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, err.to_string()).exit();
        }
    };

    let mut app = App::new(settings, Campaign::builtin()?, SystemClock::shared());
    match cli.mode {
        StartMode::Menu => {}
        StartMode::Practice => app.open_practice(),
        StartMode::Battle => app.open_battle(),
    }
    tracing::info!(mode = %cli.mode, "typecraft started");

    {
        let mut guard = TerminalGuard::acquire()?;
        let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
        run(&mut guard.terminal, &mut app, &runner)?;
    }

    let saved = Config {
        knight: (app.knight_index() + 1) as u8,
        theme: app.theme,
        ..store.load()
    };
    if let Err(err) = store.save(&saved) {
        tracing::warn!(%err, "could not save config");
    }

    Ok(())
}

fn run<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> io::Result<()> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            AppEvent::Tick(elapsed) => app.on_tick(elapsed),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    return Ok(());
                }
            }
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;
    use std::time::Duration;
    use typecraft::{app::Screen, runtime::TestEventSource};

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typecraft"]);

        assert_eq!(cli.mode, StartMode::Menu);
        assert_eq!(cli.practice_secs, None);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.knight, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "typecraft", "-m", "battle", "-s", "30", "-p", "hello", "-k", "2", "--theme", "light",
        ]);

        assert_eq!(cli.mode, StartMode::Battle);
        assert_eq!(cli.practice_secs, Some(30));
        assert_eq!(cli.prompt, Some("hello".to_string()));
        assert_eq!(cli.knight, Some(2));
        assert_eq!(cli.theme, Some(ThemeMode::Light));
    }

    #[test]
    fn test_cli_rejects_unknown_knight() {
        assert!(Cli::try_parse_from(["typecraft", "-k", "4"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["typecraft", "-s", "15", "--min-words", "3", "--max-words", "4"]);
        let cfg = cli.apply_to(Config {
            knight: 2,
            ..Config::default()
        });

        assert_eq!(cfg.practice_secs, 15);
        assert_eq!(cfg.min_words, 3);
        assert_eq!(cfg.max_words, 4);
        assert_eq!(cfg.knight, 2);
    }

    #[test]
    fn test_settings_reject_bad_word_range() {
        let cli = Cli::parse_from(["typecraft", "--min-words", "9", "--max-words", "2"]);
        let cfg = cli.apply_to(Config::default());
        assert!(cli.to_settings(&cfg).is_err());
    }

    #[test]
    fn test_settings_reject_zero_practice_time() {
        assert!(Cli::try_parse_from(["typecraft", "-s", "0"]).is_err());

        let cli = Cli::parse_from(["typecraft"]);
        let cfg = Config {
            practice_secs: 0,
            ..Config::default()
        };
        assert!(matches!(
            cli.to_settings(&cfg),
            Err(typecraft::Error::ZeroPracticeTime)
        ));
    }

    #[test]
    fn test_settings_reject_blank_prompt() {
        for prompt in ["", "   "] {
            let cli = Cli::parse_from(["typecraft", "-p", prompt]);
            let cfg = cli.apply_to(Config::default());
            assert!(matches!(
                cli.to_settings(&cfg),
                Err(typecraft::Error::EmptyPrompt)
            ));
        }
    }

    #[test]
    fn test_settings_from_defaults() {
        let cli = Cli::parse_from(["typecraft", "-p", "custom"]);
        let settings = cli.to_settings(&cli.apply_to(Config::default())).unwrap();

        assert_eq!(settings.practice_secs, 60);
        assert_eq!(settings.custom_prompt.as_deref(), Some("custom"));
        assert!(!settings.words.is_empty());
    }

    #[test]
    fn test_run_loop_quits_on_esc_from_menu() {
        let cli = Cli::parse_from(["typecraft", "-p", "hi"]);
        let settings = cli.to_settings(&cli.apply_to(Config::default())).unwrap();
        let mut app = App::new(settings, Campaign::builtin().unwrap(), SystemClock::shared());

        let (tx, rx) = mpsc::channel();
        for code in [KeyCode::Char('p'), KeyCode::Char('h'), KeyCode::Char('i')] {
            tx.send(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
                .unwrap();
        }
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();

        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(5)),
        );
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        run(&mut terminal, &mut app, &runner).unwrap();
        assert!(matches!(app.screen, Screen::Menu));
    }
}
