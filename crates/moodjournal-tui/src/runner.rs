// TUI event loop and terminal management
use crate::{App, InputMode, TranslationRequest};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use moodjournal_core::{translate_quote, Language, Quote, QuoteFetcher, Translator};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Everything that can wake the event loop
#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    QuoteLoaded {
        token: u64,
        result: moodjournal_core::Result<Quote>,
    },
    Translated {
        token: u64,
        quote: Quote,
    },
    /// The terminal stopped delivering input
    InputLost(String),
}

/// Background work requested by a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(u64),
    Translate(TranslationRequest),
}

/// The services background tasks talk to
#[derive(Clone)]
pub struct Services {
    pub fetcher: Arc<QuoteFetcher>,
    pub translator: Arc<dyn Translator>,
}

pub async fn run_tui(app: App, services: Services, tick_rate: Duration) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let cancelled = Arc::new(AtomicBool::new(false));

    let result = run_in_terminal(app, &services, tick_rate, cancelled.clone()).await;

    // Restore terminal on every exit path, setup failures included
    cancelled.store(true, Ordering::Relaxed);
    finish(result, restore_terminal)
}

async fn run_in_terminal(
    mut app: App,
    services: &Services,
    tick_rate: Duration,
    cancelled: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_input_thread(tx.clone(), cancelled);

    event_loop(&mut terminal, &mut app, services, tx, rx, tick_rate).await
}

fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

/// Run `restore` whatever `result` is; the run's own error wins over a restore error
fn finish<T>(
    result: anyhow::Result<T>,
    restore: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<T> {
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    services: &Services,
    tx: mpsc::UnboundedSender<AppEvent>,
    mut rx: mpsc::UnboundedReceiver<AppEvent>,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(tick_rate);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // First quote on startup
    let token = app.begin_fetch();
    execute_command(Command::Fetch(token), services, &tx);

    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        tokio::select! {
            Some(event) = rx.recv() => {
                if let Some(command) = handle_event(app, event) {
                    execute_command(command, services, &tx);
                }
            }
            _ = ticker.tick(), if app.confetti.is_active() => {
                app.tick(tick_rate);
            }
            else => break,
        }

        if app.should_quit {
            info!("Quitting");
            break;
        }
    }

    Ok(())
}

/// Apply one event to the state; may ask for background work
pub fn handle_event(app: &mut App, event: AppEvent) -> Option<Command> {
    match event {
        AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => handle_key(app, key),
        AppEvent::Input(Event::Resize(width, height)) => {
            app.set_viewport(width, height);
            None
        }
        AppEvent::Input(_) => None,
        AppEvent::QuoteLoaded { token, result } => {
            app.complete_fetch(token, result).map(Command::Translate)
        }
        AppEvent::Translated { token, quote } => {
            app.complete_translation(token, quote);
            None
        }
        AppEvent::InputLost(reason) => {
            warn!("Terminal input lost: {}", reason);
            app.quit();
            None
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return None;
    }

    match app.input_mode {
        InputMode::LanguagePicker => match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                app.next_language();
                None
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                app.previous_language();
                None
            }
            KeyCode::Enter => app.confirm_language_picker().map(Command::Translate),
            KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('q') => {
                app.close_language_picker();
                None
            }
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                app.quit();
                None
            }
            KeyCode::Char('n') | KeyCode::Char(' ') => {
                app.clear_messages();
                Some(Command::Fetch(app.begin_fetch()))
            }
            KeyCode::Char('f') => {
                app.save_favorite();
                None
            }
            KeyCode::Char('l') => {
                app.open_language_picker();
                None
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                let language = Language::ALL[index];
                if language == app.language {
                    None
                } else {
                    app.set_language(language).map(Command::Translate)
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.next_favorite();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.previous_favorite();
                None
            }
            _ => None,
        },
    }
}

/// Spawn the task behind a command; its result comes back as an AppEvent
fn execute_command(command: Command, services: &Services, tx: &mpsc::UnboundedSender<AppEvent>) {
    let tx = tx.clone();
    match command {
        Command::Fetch(token) => {
            let fetcher = services.fetcher.clone();
            tokio::spawn(async move {
                let result = fetcher.next_quote().await;
                // Receiver gone means we're shutting down
                let _ = tx.send(AppEvent::QuoteLoaded { token, result });
            });
        }
        Command::Translate(request) => {
            let translator = services.translator.clone();
            tokio::spawn(async move {
                debug!("Translation #{} into {}", request.token, request.target.code());
                let quote = translate_quote(translator.as_ref(), &request.source, request.target).await;
                let _ = tx.send(AppEvent::Translated {
                    token: request.token,
                    quote,
                });
            });
        }
    }
}

/// Consecutive input errors tolerated before the input thread gives up
const MAX_INPUT_ERRORS: u32 = 10;
const INPUT_ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Backoff for repeated terminal read failures
#[derive(Debug, Default)]
struct InputErrors {
    consecutive: u32,
}

impl InputErrors {
    /// How long to wait before polling again, or `None` once it is hopeless
    fn record(&mut self) -> Option<Duration> {
        self.consecutive += 1;
        if self.consecutive >= MAX_INPUT_ERRORS {
            None
        } else {
            Some(INPUT_ERROR_BACKOFF * self.consecutive)
        }
    }

    fn reset(&mut self) {
        self.consecutive = 0;
    }
}

/// Read terminal events on a plain thread and forward them to the loop
fn spawn_input_thread(tx: mpsc::UnboundedSender<AppEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        let mut errors = InputErrors::default();

        while !cancelled.load(Ordering::Relaxed) {
            // Poll with a timeout so the cancel flag is noticed promptly
            let result = event::poll(Duration::from_millis(50)).and_then(|ready| {
                if ready {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            });

            match result {
                Ok(Some(ev)) => {
                    errors.reset();
                    if tx.send(AppEvent::Input(ev)).is_err() {
                        break;
                    }
                }
                Ok(None) => errors.reset(),
                Err(e) => match errors.record() {
                    Some(backoff) => {
                        debug!("Input error, retrying in {:?}: {}", backoff, e);
                        std::thread::sleep(backoff);
                    }
                    None => {
                        let _ = tx.send(AppEvent::InputLost(e.to_string()));
                        break;
                    }
                },
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn displaying(quote: Quote) -> App {
        let mut app = App::default().with_confetti(false);
        let Some(Command::Fetch(token)) = handle_event(&mut app, press(KeyCode::Char('n'))) else {
            panic!("expected a fetch");
        };
        handle_event(&mut app, AppEvent::QuoteLoaded { token, result: Ok(quote) });
        app
    }

    #[test]
    fn test_new_quote_key_starts_fetch() {
        let mut app = App::default();
        let command = handle_event(&mut app, press(KeyCode::Char('n')));
        assert_eq!(command, Some(Command::Fetch(1)));
        assert!(app.is_loading());
    }

    #[test]
    fn test_number_key_switches_language_and_translates() {
        let mut app = displaying(Quote::new("Hello", "A"));

        let command = handle_event(&mut app, press(KeyCode::Char('3')));
        let Some(Command::Translate(request)) = command else {
            panic!("expected a translation");
        };
        assert_eq!(request.target, Language::Fr);
        assert_eq!(app.labels.title, "Journal d'Humeur");

        handle_event(
            &mut app,
            AppEvent::Translated {
                token: request.token,
                quote: Quote::new("Bonjour", "A"),
            },
        );
        assert_eq!(app.quote, Some(Quote::new("Bonjour", "A")));
    }

    #[test]
    fn test_same_language_key_is_noop() {
        let mut app = displaying(Quote::new("Hello", "A"));
        assert_eq!(handle_event(&mut app, press(KeyCode::Char('1'))), None);
    }

    #[test]
    fn test_favorite_key() {
        let mut app = displaying(Quote::new("Hello", "A"));
        handle_event(&mut app, press(KeyCode::Char('f')));
        handle_event(&mut app, press(KeyCode::Char('f')));
        assert_eq!(app.favorites.len(), 1);
    }

    #[test]
    fn test_picker_keys() {
        let mut app = displaying(Quote::new("Hello", "A"));
        handle_event(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.input_mode, InputMode::LanguagePicker);

        // 'q' closes the picker instead of quitting
        handle_event(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);

        handle_event(&mut app, press(KeyCode::Char('l')));
        handle_event(&mut app, press(KeyCode::Down));
        let command = handle_event(&mut app, press(KeyCode::Enter));
        assert!(matches!(command, Some(Command::Translate(r)) if r.target == Language::Es));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        handle_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::default();
        handle_event(
            &mut app,
            AppEvent::Input(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut app = App::default();
        handle_event(&mut app, AppEvent::Input(Event::Resize(120, 40)));
        let token = app.begin_fetch();
        app.complete_fetch(token, Ok(Quote::new("Hi", "A")));
        assert!(app
            .confetti
            .particles()
            .iter()
            .all(|p| (p.x - 60.0).abs() < 1e-3));
    }

    #[test]
    fn test_lost_input_quits() {
        let mut app = App::default();
        let command = handle_event(&mut app, AppEvent::InputLost("tty closed".into()));
        assert_eq!(command, None);
        assert!(app.should_quit);
    }

    #[test]
    fn test_input_errors_back_off_then_give_up() {
        let mut errors = InputErrors::default();
        assert_eq!(errors.record(), Some(INPUT_ERROR_BACKOFF));
        assert_eq!(errors.record(), Some(INPUT_ERROR_BACKOFF * 2));

        errors.reset();
        let backoffs: Vec<_> = (0..MAX_INPUT_ERRORS).map(|_| errors.record()).collect();
        assert!(backoffs[..backoffs.len() - 1].iter().all(Option::is_some));
        assert_eq!(backoffs.last(), Some(&None));
    }

    #[test]
    fn test_finish_restores_after_failed_setup() {
        let mut restored = false;
        let result: anyhow::Result<()> = finish(Err(anyhow::anyhow!("no tty")), || {
            restored = true;
            Ok(())
        });

        assert!(restored);
        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }

    #[test]
    fn test_finish_reports_restore_failure() {
        let result = finish(Ok(7), || Err(anyhow::anyhow!("restore failed")));
        assert!(result.is_err());

        assert_eq!(finish(Ok(7), || Ok(())).unwrap(), 7);
    }

    #[test]
    fn test_late_quote_after_newer_request_is_ignored() {
        let mut app = App::default().with_confetti(false);
        let Some(Command::Fetch(old)) = handle_event(&mut app, press(KeyCode::Char('n'))) else {
            panic!("expected a fetch");
        };
        let Some(Command::Fetch(new)) = handle_event(&mut app, press(KeyCode::Char('n'))) else {
            panic!("expected a fetch");
        };

        handle_event(&mut app, AppEvent::QuoteLoaded { token: new, result: Ok(Quote::new("new", "A")) });
        handle_event(&mut app, AppEvent::QuoteLoaded { token: old, result: Ok(Quote::new("old", "A")) });
        assert_eq!(app.quote, Some(Quote::new("new", "A")));
    }
}
