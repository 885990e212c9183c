//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const LOCAL_CONFIG_BASENAME: &str = "quaderno";
const DEFAULT_ROUTE: &str = "/";

/// Command-line arguments for the quaderno binary.
#[derive(Debug, Parser)]
#[command(name = "quaderno", version, about = "Posts backend admin console", long_about = None)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "QUADERNO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive admin screens.
    Console(ConsoleArgs),
    /// One-shot post operations for automation.
    Posts(PostsArgs),
}

#[derive(Debug, Args)]
pub struct ConsoleArgs {
    /// Screen to open: `/` (landing) or `/list-post`.
    #[arg(long, default_value = DEFAULT_ROUTE, value_name = "PATH")]
    pub route: String,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Debug, Args)]
pub struct PostsArgs {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Debug, Args, Default, Clone)]
pub struct Overrides {
    /// Backend base URL, e.g. <http://localhost:8080>.
    #[arg(long = "backend", env = "QUADERNO_BACKEND_URL", value_name = "URL")]
    pub backend_url: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long = "log-level", env = "QUADERNO_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log output format: `compact` or `json`.
    #[arg(long = "log-format", env = "QUADERNO_LOG_FORMAT", value_name = "FORMAT")]
    pub log_format: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PostsCmd {
    /// List the full collection.
    List,
    /// Server-side title substring search.
    Search { keyword: String },
    /// Create a post, validated against the current collection first.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, value_name = "URL")]
        image: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
        /// Create unpublished instead of the default published.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        unpublished: bool,
    },
    /// Full-record update; omitted fields keep their current values.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_name = "URL")]
        image: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
    },
    /// Set the published flag, or negate the current one when omitted.
    SetStatus {
        #[arg(long)]
        id: i64,
        #[arg(long, value_parser = BoolishValueParser::new(), value_name = "BOOL")]
        status: Option<bool>,
    },
    /// Delete a post.
    Delete { id: i64 },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("QUADERNO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match &cli.command {
        Command::Console(args) => raw.apply_overrides(&args.overrides),
        Command::Posts(args) => raw.apply_overrides(&args.overrides),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    backend: RawBackendSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBackendSettings {
    url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    format: Option<String>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = overrides.backend_url.as_ref() {
            self.backend.url = Some(url.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(format) = overrides.log_format.as_ref() {
            self.logging.format = Some(format.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { backend, logging } = raw;

        let backend = build_backend_settings(backend)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self { backend, logging })
    }
}

fn build_backend_settings(backend: RawBackendSettings) -> Result<BackendSettings, LoadError> {
    let url = backend.url.ok_or_else(|| {
        LoadError::invalid(
            "backend.url",
            "backend base URL is required (use --backend or QUADERNO_BACKEND_URL)",
        )
    })?;
    let base_url = Url::parse(&url)
        .map_err(|err| LoadError::invalid("backend.url", format!("failed to parse: {err}")))?;
    Ok(BackendSettings { base_url })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = match logging.format.as_deref() {
        Some("json") => LogFormat::Json,
        Some("compact") | None => LogFormat::Compact,
        Some(other) => {
            return Err(LoadError::invalid(
                "logging.format",
                format!("unrecognized format `{other}`, expected `compact` or `json`"),
            ));
        }
    };

    Ok(LoggingSettings { level, format })
}
