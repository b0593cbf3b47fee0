use anyhow::{Context, Result};
use botdesk_core::logging::{DiagnosticsConfig, init_diagnostics};
use botdesk_core::{Config, Conversation, DisplayMode};
use botdesk_logs::{Channel, Dispatch, LoggerConfig, Loggers};
use botdesk_ui::ConversationView;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "botdesk.toml";

/// Botdesk - conversation transcripts and structured logs for the bot admin console
#[derive(Parser, Debug)]
#[command(name = "botdesk")]
#[command(about = "Render conversation transcripts and emit structured application/audit logs", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to botdesk.toml (default: ./botdesk.toml when present)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a conversation tracker as a transcript
    Transcript {
        /// Conversation JSON file (`-` for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Display mode (default: the config's viewer mode)
        #[arg(short, long, value_name = "MODE")]
        mode: Option<DisplayMode>,

        /// Print the reconstructed turns as JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit one structured log record
    Log {
        #[arg(value_enum)]
        channel: ChannelArg,

        /// Record as a JSON object (`-` for stdin)
        #[arg(value_name = "JSON")]
        record: String,
    },
    /// Show the effective logger configuration
    Config {
        /// Write an example config file instead
        #[arg(long)]
        init: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChannelArg {
    Application,
    Audit,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Application => Channel::Application,
            ChannelArg::Audit => Channel::Audit,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    if let Commands::Config { init: true } = cli.command {
        return cmd_init_config(&config_path);
    }

    let explicit = cli.config.is_some();
    let (config, logger_config) = load_config(&config_path, explicit)?;

    let mut diagnostics = DiagnosticsConfig::from(config.diagnostics.clone());
    if cli.verbose {
        diagnostics = diagnostics.with_level("debug");
    }
    init_diagnostics(Some(diagnostics)).context("Failed to initialise diagnostics")?;

    match cli.command {
        Commands::Transcript { file, mode, json } => {
            let mode = mode.unwrap_or(config.viewer.mode);
            println!("{}", render_transcript(&file, mode, json)?);
        }
        Commands::Log { channel, record } => {
            let loggers = Loggers::from_config(&logger_config).context("Failed to set up loggers")?;
            let record = read_arg(&record)?;
            if emit_log(&loggers, channel.into(), &record)? == Dispatch::Filtered {
                eprintln!("{} record is below the channel's minimum level", "Skipped:".yellow().bold());
            }
        }
        Commands::Config { .. } => print!("{}", render_config(&logger_config)?),
    }

    Ok(())
}

/// Viewer and logger configuration.
///
/// An explicitly named file must exist; the default file is optional. Logger
/// environment variables are applied on top in both cases.
fn load_config(path: &Path, explicit: bool) -> Result<(Config, LoggerConfig)> {
    if !path.exists() {
        if explicit {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let logger = LoggerConfig::from_env().context("Invalid logger environment")?;
        return Ok((Config::default(), logger));
    }

    let config = Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let logger = LoggerConfig::from_file(path)
        .and_then(LoggerConfig::overlay_env)
        .map_err(|e| anyhow::anyhow!("Failed to load logger config: {}", e))?;
    Ok((config, logger))
}

fn cmd_init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    std::fs::write(path, Config::example()).context("Failed to create config")?;
    println!("{} Created config at {}", "Success:".green().bold(), path.display());
    Ok(())
}

/// A command-line argument, or stdin when it is `-`.
fn read_arg(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
    Ok(buf)
}

fn load_conversation(file: &Path) -> Result<Conversation> {
    if file == Path::new("-") {
        return Ok(Conversation::from_json_str(&read_arg("-")?)?);
    }
    Conversation::from_file(file).with_context(|| format!("Failed to read conversation from {}", file.display()))
}

fn render_transcript(file: &Path, mode: DisplayMode, json: bool) -> Result<String> {
    let conversation = load_conversation(file)?;
    let view = ConversationView::new(&conversation, mode);

    if json {
        serde_json::to_string_pretty(view.turns()).context("Failed to serialize turns")
    } else {
        Ok(view.render())
    }
}

fn emit_log(loggers: &Loggers, channel: Channel, record: &str) -> Result<Dispatch> {
    let value: serde_json::Value =
        serde_json::from_str(record).with_context(|| format!("Record for the {} channel is not valid JSON", channel))?;
    Ok(loggers.log_json(channel, value)?)
}

#[derive(Serialize)]
struct LoggingDocument<'a> {
    logging: &'a LoggerConfig,
}

fn render_config(config: &LoggerConfig) -> Result<String> {
    toml::to_string_pretty(&LoggingDocument { logging: config }).context("Failed to render configuration")
}
