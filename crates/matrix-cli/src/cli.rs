//! CLI argument definitions for the Matrix verification client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use matrix_model::AnalysisKind;

#[derive(Parser)]
#[command(
    name = "matrix",
    version,
    about = "Matrix - check media and news for deepfakes and misinformation",
    long_about = "Submit images, videos, audio, text or news links to a Matrix \
                  verification backend and read the analysis in the terminal.\n\n\
                  Also lists trusted news sources and plays the spot-the-fake game."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: platform config dir).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the verification API.
    #[arg(long = "api-url", env = "MATRIX_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Base URL of the game API (defaults to the API URL).
    #[arg(long = "game-url", env = "MATRIX_GAME_URL", value_name = "URL", global = true)]
    pub game_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow submitted text, URLs and file names in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit input for analysis and print the result.
    Analyze(AnalyzeArgs),

    /// List trusted news sources by priority.
    Sources(SourcesArgs),

    /// Play the spot-the-fake game.
    #[command(subcommand)]
    Game(GameCommand),

    /// Show the effective configuration.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Analysis to run.
    #[arg(value_enum)]
    pub kind: KindArg,

    /// File path for media kinds, the text itself (or `-` for stdin) for
    /// `text`, or the article link for `url`.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Declared media type of the file (default: guessed from the extension).
    #[arg(long = "media-type", value_name = "TYPE")]
    pub media_type: Option<String>,

    /// Print the normalized result as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Write the knowledge-graph image of a text fact-check to this PNG file.
    #[arg(long = "graph-out", value_name = "PATH")]
    pub graph_out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Deepfake detection on an image.
    DeepfakeImage,
    /// Frame-by-frame deepfake detection on a video.
    DeepfakeVideo,
    /// Deepfake detection on an audio clip.
    DeepfakeAudio,
    /// NLP fact-check of a statement or article text.
    Text,
    /// Fact-check of the article behind a news link.
    Url,
    /// Find where an image appears on the web.
    ReverseSearch,
}

impl From<KindArg> for AnalysisKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::DeepfakeImage => AnalysisKind::DeepfakeImage,
            KindArg::DeepfakeVideo => AnalysisKind::DeepfakeVideo,
            KindArg::DeepfakeAudio => AnalysisKind::DeepfakeAudio,
            KindArg::Text => AnalysisKind::TextFactCheck,
            KindArg::Url => AnalysisKind::UrlFactCheck,
            KindArg::ReverseSearch => AnalysisKind::ReverseImageSearch,
        }
    }
}

#[derive(Parser)]
pub struct SourcesArgs {
    /// Sources JSON file (overrides `sources_file` from the config).
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Number of sources to list.
    #[arg(long = "top", default_value_t = matrix_sources::DEFAULT_TOP)]
    pub top: usize,

    /// Print the sources as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum GameCommand {
    /// Fetch a pair of items; one of them may be fake.
    Pair,

    /// Vote for the item you think is fake.
    Vote {
        /// Pair identifier from `game pair`.
        pair_id: String,
        /// Index of the item you picked (0-based).
        choice: usize,
    },

    /// Reveal which item was fake.
    Answer {
        /// Pair identifier from `game pair`.
        pair_id: String,
        /// Your pick, to be told whether it was right.
        #[arg(long = "choice")]
        choice: Option<usize>,
    },
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Print only the config file path.
    #[arg(long = "path")]
    pub path: bool,

    /// Write the effective configuration to the config file.
    #[arg(long = "save", conflicts_with = "path")]
    pub save: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
