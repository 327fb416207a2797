// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ytcap::app_config::{self, Config};
use ytcap::file_utils::FileManager;
use ytcap::language_utils;
use ytcap::{AppError, CaptionTrack, Formatter, TrackList, TranscriptClient, TranscriptError};

/// Number of translation languages shown in track details
const SAMPLE_TRANSLATION_LANGUAGES: usize = 5;

/// CLI Wrapper for Formatter to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Text,
    Json,
    Srt,
    Vtt,
}

impl From<CliFormat> for Formatter {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Text => Formatter::PlainText,
            CliFormat::Json => Formatter::Json,
            CliFormat::Srt => Formatter::Srt,
            CliFormat::Vtt => Formatter::WebVtt,
        }
    }
}

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the caption tracks available for a video
    List {
        /// Video identifier (e.g. dQw4w9WgXcQ)
        #[arg(value_name = "VIDEO_ID")]
        video_id: String,
    },

    /// Show the metadata of the selected caption track
    Info(SelectArgs),

    /// Fetch a caption track and print or save it
    Fetch(FetchArgs),

    /// Generate shell completions for ytcap
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Video identifier (e.g. dQw4w9WgXcQ)
    #[arg(value_name = "VIDEO_ID")]
    video_id: String,

    /// Preferred language codes, tried in order (repeatable)
    #[arg(short, long = "language", value_name = "CODE")]
    languages: Vec<String>,

    /// Only consider manually created tracks
    #[arg(long, conflicts_with = "generated")]
    manual: bool,

    /// Only consider auto-generated tracks
    #[arg(long)]
    generated: bool,
}

#[derive(Args, Debug)]
struct FetchArgs {
    #[command(flatten)]
    select: SelectArgs,

    /// Translate the selected track to this language code
    #[arg(short, long, value_name = "CODE")]
    translate: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    /// Write the result to <DIR>/<VIDEO_ID>.<LANG>.<EXT> instead of stdout
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// ytcap - YouTube caption track client
///
/// Lists, translates and fetches the caption tracks of YouTube videos and
/// renders them as plain text, JSON, SRT or WebVTT.
#[derive(Parser, Debug)]
#[command(name = "ytcap")]
#[command(version)]
#[command(about = "YouTube caption track client")]
#[command(long_about = "ytcap lists, translates and fetches the caption tracks of YouTube videos.

EXAMPLES:
    ytcap list dQw4w9WgXcQ                          # List available tracks
    ytcap info dQw4w9WgXcQ -l en                    # Show metadata of the English track
    ytcap fetch dQw4w9WgXcQ -l en -l de             # Print English, falling back to German
    ytcap fetch dQw4w9WgXcQ --generated -l en       # Only auto-generated tracks
    ytcap fetch dQw4w9WgXcQ -l en -t ja --format srt -o subs/
    ytcap completions bash > ytcap.bash             # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
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

    // @initializes: Global logger, filtering through log::max_level
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "ytcap", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;
    let client = TranscriptClient::with_config(&config)?;

    match cli.command {
        Commands::List { video_id } => run_list(&client, &video_id).await?,
        Commands::Info(args) => run_info(&client, &config, &args).await?,
        Commands::Fetch(args) => run_fetch(&client, &config, &args).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load or create the configuration, then apply the log level
fn load_config(config_path: &str, cli_log_level: Option<CliLogLevel>) -> Result<Config, AppError> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(level) = cli_log_level {
        config.log_level = level.into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    Ok(config)
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

async fn list_with_spinner(client: &TranscriptClient, video_id: &str) -> Result<TrackList, TranscriptError> {
    let progress = spinner(format!("Listing caption tracks for {}", video_id));
    let result = client.list_tracks(video_id).await;
    progress.finish_and_clear();
    result
}

async fn run_list(client: &TranscriptClient, video_id: &str) -> Result<(), AppError> {
    let tracks = list_with_spinner(client, video_id).await?;

    println!("Available transcripts for {}:", tracks.video_id());
    for track in &tracks {
        let translations = if track.is_translatable() {
            format!(" - {} translation languages", track.translation_targets().len())
        } else {
            String::new()
        };
        println!(
            "  - {} ({}) - {}{}",
            track.language_name(), track.language_code(), track.kind_label(), translations
        );
    }

    Ok(())
}

/// Select a track from the list following the command line filters
fn select_track(tracks: &TrackList, args: &SelectArgs, config: &Config) -> Result<CaptionTrack, AppError> {
    let languages: &[String] = if args.languages.is_empty() {
        &config.preferred_languages
    } else {
        &args.languages
    };

    let selected = if args.manual {
        tracks.select_manual_any(languages)
    } else if args.generated {
        tracks.select_generated_any(languages)
    } else {
        tracks.select(languages)
    };

    match selected {
        Ok(track) => {
            debug!("Selected track: {}", track);
            Ok(track.clone())
        }
        Err(err) => {
            for track in tracks {
                if languages.iter().any(|code| language_utils::language_codes_match(code, track.language_code())) {
                    warn!(
                        "Track {} ({}) names the same language; request it with -l {}",
                        track.language_code(), track.kind_label(), track.language_code()
                    );
                }
            }
            Err(err.into())
        }
    }
}

async fn run_info(client: &TranscriptClient, config: &Config, args: &SelectArgs) -> Result<(), AppError> {
    let tracks = list_with_spinner(client, &args.video_id).await?;
    let track = select_track(&tracks, args, config)?;

    println!("Video ID: {}", track.video_id());
    println!("Language: {}", track.language_name());
    println!("Language Code: {}", track.language_code());
    println!("Is Generated: {}", track.is_generated());
    println!("Is Translatable: {}", track.is_translatable());
    println!("API URL: {}", track.source_locator());
    println!("Available translation languages: {}", track.translation_targets().len());

    if !track.translation_targets().is_empty() {
        let sample: Vec<&str> = track.translation_targets()
            .iter()
            .take(SAMPLE_TRANSLATION_LANGUAGES)
            .map(|t| t.code.as_str())
            .collect();
        println!("Sample translation languages: {}", sample.join(", "));
    }

    let progress = spinner(format!("Fetching {} track", track.language_code()));
    let fragments = client.fetch(&track).await;
    progress.finish_and_clear();
    let fragments = fragments?;

    println!("Total fragments: {}", fragments.len());
    if let Some(first) = fragments.first() {
        println!();
        println!("First fragment details:");
        println!("  Text: {}", first.text);
        println!("  Start time: {}s", first.start);
        match first.duration {
            Some(duration) => println!("  Duration: {}s", duration),
            None => println!("  Duration: unknown"),
        }
    }

    Ok(())
}

async fn run_fetch(client: &TranscriptClient, config: &Config, args: &FetchArgs) -> Result<(), AppError> {
    let video_id = &args.select.video_id;
    let tracks = list_with_spinner(client, video_id).await?;
    let selected = select_track(&tracks, &args.select, config)?;

    let track = match &args.translate {
        Some(code) => {
            let translated = client.translate(&selected, code)?;
            info!("Translating {} to {}", selected.language_name(), translated.language_name());
            translated
        }
        None => selected,
    };

    let progress = spinner(format!("Fetching {} track", track.language_code()));
    let fragments = client.fetch(&track).await;
    progress.finish_and_clear();
    let fragments = fragments?;
    info!("Retrieved transcript with {} fragments", fragments.len());

    let format: Formatter = args.format.map(Formatter::from).unwrap_or(config.output_format);
    let output = format.format(&fragments)?;

    match &args.output_dir {
        Some(dir) => {
            let path = FileManager::output_path(dir, video_id, track.language_code(), format);
            FileManager::write_output(&path, &output, args.force_overwrite)?;
            info!("Success: {:?}", path);
        }
        None => println!("{}", output),
    }

    Ok(())
}
