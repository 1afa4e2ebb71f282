// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod catalog;
mod errors;
mod file_utils;
mod language_utils;
mod providers;
mod translation;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

impl From<app_config::LogLevel> for LevelFilter {
    fn from(level: app_config::LogLevel) -> Self {
        match level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate gettext catalogs using the DeepSeek API (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for yaptwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Locale directory to scan for .po catalogs
    #[arg(value_name = "LOCALE_PATH", default_value = "locale")]
    locale_path: PathBuf,

    /// Translate a single .po file instead of scanning the locale tree
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Simulation mode: report what would be translated without any changes
    #[arg(short, long)]
    dry_run: bool,

    /// Number of entries to process per batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// DeepSeek API key (falls back to the DEEPSEEK_API_KEY environment variable)
    #[arg(short, long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Source language code (e.g. 'es')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// YAPTwAI - Yet Another PO Translator with AI
///
/// Batch-translates gettext .po localization catalogs with the DeepSeek API,
/// preserving embedded HTML markup through placeholder segmentation.
#[derive(Parser, Debug)]
#[command(name = "yaptwai")]
#[command(author = "YAPTwAI Team")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered gettext catalog translation tool")]
#[command(long_about = "YAPTwAI selects the catalog entries that need work (untranslated, fuzzy or
stale), translates them in batches against the DeepSeek API, and writes the
catalog back once at the end of the run.

EXAMPLES:
    yaptwai --dry-run                      # Simulate a run over ./locale (recommended first)
    yaptwai                                # Translate every .po file under ./locale
    yaptwai path/to/locale                 # Translate a specific locale tree
    yaptwai -f locale/en/LC_MESSAGES/django.po   # Translate a single catalog
    yaptwai -b 20                          # Larger batches
    yaptwai --api-key sk-xxxxx             # Explicit credential
    yaptwai completions bash > yaptwai.bash      # Generate bash completions

CONFIGURATION:
    The API key is taken from --api-key or the DEEPSEEK_API_KEY environment
    variable (a .env file is honored). An optional conf.json can override
    model, endpoint, temperature and timeouts; CLI flags win over the file.
    The target language of each catalog is derived from its path (the
    locale/<lang>/ segment).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Locale directory to scan for .po catalogs
    #[arg(value_name = "LOCALE_PATH", default_value = "locale")]
    locale_path: PathBuf,

    /// Translate a single .po file instead of scanning the locale tree
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Simulation mode: report what would be translated without any changes
    #[arg(short, long)]
    dry_run: bool,

    /// Number of entries to process per batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// DeepSeek API key (falls back to the DEEPSEEK_API_KEY environment variable)
    #[arg(short, long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Source language code (e.g. 'es')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a .env file before clap resolves env-backed arguments
    dotenv::dotenv().ok();

    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yaptwai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args
            let translate_args = TranslateArgs {
                locale_path: cli.locale_path,
                file: cli.file,
                dry_run: cli.dry_run,
                batch_size: cli.batch_size,
                api_key: cli.api_key,
                source_language: cli.source_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.into());
    }

    // Load configuration if a config file exists, otherwise use defaults
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        config
    } else {
        Config::default()
    };

    // Override config with CLI options if provided
    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }

    if let Some(batch_size) = options.batch_size {
        config.batch_size = batch_size;
    }

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding; a missing
    // credential or invalid setting is fatal and exits non-zero
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.clone().into());
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    if options.dry_run {
        warn!("Dry-run mode: no remote calls, no catalog changes");
    }

    // Run over a single file or the whole locale tree
    let summary = if let Some(file) = &options.file {
        controller.run_file(file, options.dry_run).await?
    } else {
        controller.run_tree(&options.locale_path, options.dry_run).await?
    };

    info!("Finished: {}", summary);

    if summary.errored > 0 {
        // Failed entries stay eligible; a later run will retry them
        warn!(
            "{} entries could not be translated and were left unchanged",
            summary.errored
        );
    }

    Ok(())
}
