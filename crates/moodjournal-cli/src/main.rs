use anyhow::Context;
use clap::Parser;
use moodjournal_core::{
    colorize,
    providers::{GoogleTranslator, TypeFitSource},
    translate_quote, Config, Language, Palette, Quote, QuoteFetcher, Translator,
};
use moodjournal_tui::{App, Services};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "moodjournal")]
#[command(version, about = "Random quotes, colored by mood, in six languages", long_about = None)]
struct Cli {
    /// Language to show the journal in (en, es, fr, de, hi, zh)
    #[arg(long, global = true, env = "MOODJOURNAL_LANG")]
    lang: Option<Language>,

    /// CORS relay prefix; pass an empty string to call the services directly
    #[arg(long, global = true, env = "MOODJOURNAL_RELAY")]
    relay: Option<String>,

    /// Skip the confetti animation
    #[arg(long, global = true)]
    no_confetti: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, env = "MOODJOURNAL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch one quote, print it and exit
    Quote {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the supported languages
    Languages,
    /// Print the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

/// What `moodjournal quote --json` prints
#[derive(Serialize)]
struct QuoteReport {
    quote: Quote,
    language: Language,
    palette: Palette,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it logs to a file instead of stderr
    let filter = default_log_filter(&cli);
    let _log_guard = if cli.command.is_none() {
        init_file_logging(filter)
    } else {
        init_stderr_logging(filter);
        None
    };

    let config = load_config(&cli)?;

    match cli.command {
        None => run_interactive(config).await,
        Some(Commands::Quote { json }) => print_quote(&config, json).await,
        Some(Commands::Languages) => {
            for language in Language::ALL {
                println!("{}  {}", language.code(), language.name());
            }
            Ok(())
        }
        Some(Commands::Config { write }) => {
            print!("{}", toml::to_string_pretty(&config)?);
            if write {
                let path = match &cli.config {
                    Some(path) => {
                        config.save_to(path)?;
                        path.clone()
                    }
                    None => config.save()?,
                };
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}

/// File, then env and flags on top
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    if let Some(language) = cli.lang {
        config.ui.language = language;
    }
    if let Some(relay) = &cli.relay {
        config.endpoints.relay_url = relay.clone();
    }
    if cli.no_confetti {
        config.ui.confetti = false;
    }

    tracing::debug!(?config, "Effective configuration");
    Ok(config)
}

fn build_services(config: &Config) -> anyhow::Result<Services> {
    let source = TypeFitSource::new(&config.endpoints)?;
    let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(&config.endpoints)?);

    Ok(Services {
        fetcher: Arc::new(QuoteFetcher::new(Box::new(source))),
        translator,
    })
}

async fn run_interactive(config: Config) -> anyhow::Result<()> {
    tracing::info!(language = config.ui.language.code(), "Starting mood journal");

    let services = build_services(&config)?;
    let app = App::new(config.ui.language).with_confetti(config.ui.confetti);

    moodjournal_tui::run_tui(app, services, Duration::from_millis(config.ui.tick_ms.max(10))).await
}

async fn print_quote(config: &Config, json: bool) -> anyhow::Result<()> {
    let services = build_services(config)?;
    let language = config.ui.language;

    let quote = services.fetcher.next_quote().await.context("fetching a quote")?;
    let palette = colorize(&quote.content, &mut rand::rng());
    let quote = translate_quote(services.translator.as_ref(), &quote, language).await;

    if json {
        let report = QuoteReport {
            quote,
            language,
            palette,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", quote);
        println!(
            "mood: {}  background: {}  card: {}",
            palette.mood, palette.background, palette.card
        );
    }

    Ok(())
}

/// One-shot commands print to stdout, so stderr only gets warnings by default
fn default_log_filter(cli: &Cli) -> &'static str {
    if cli.command.is_none() {
        "moodjournal=info"
    } else {
        "moodjournal=warn"
    }
}

fn init_stderr_logging(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Log to `<data dir>/moodjournal/logs/moodjournal.log`; no logging if that fails
fn init_file_logging(filter: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::data_local_dir()?.join("moodjournal").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "moodjournal.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    tracing::info!(log_dir = %log_dir.display(), "Logging initialized");
    Some(guard)
}
