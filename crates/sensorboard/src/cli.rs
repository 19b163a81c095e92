//! Clap derive structures for the `sensorboard` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! crate-internal imports so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sensorboard -- browse and record IoT sensor readings
#[derive(Debug, Parser)]
#[command(
    name = "sensorboard",
    version,
    about = "Browse and record IoT sensor readings from the command line",
    long_about = "A terminal dashboard for a sensor-reading service.\n\n\
        Requests go to an ordered list of candidate API endpoints (for example\n\
        a local backend first, then a Cloud Run deployment); the first one that\n\
        answers wins.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Endpoint profile to use
    #[arg(long, short = 'p', env = "SENSORBOARD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Candidate API base URL, tried in the order given (overrides profile)
    #[arg(
        long = "api-url",
        short = 'a',
        env = "SENSORBOARD_API_URL",
        value_delimiter = ',',
        global = true
    )]
    pub api_urls: Vec<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "SENSORBOARD_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Per-attempt request timeout in seconds, for every endpoint
    #[arg(long, env = "SENSORBOARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe the API and show which endpoint answered
    Health,

    /// List sites that have readings
    Sites,

    /// List sensor types recorded for a site
    #[command(alias = "types")]
    SensorTypes(SensorTypesArgs),

    /// Query, chart and record readings
    #[command(alias = "r")]
    Readings(ReadingsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SENSOR TYPES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SensorTypesArgs {
    /// Site to list sensor types for
    #[arg(long, short = 's')]
    pub site: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  READINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReadingsArgs {
    #[command(subcommand)]
    pub command: ReadingsCommand,
}

/// Site / sensor type / limit selection shared by list and chart.
#[derive(Debug, Args)]
pub struct ReadingFilterArgs {
    /// Site to query
    #[arg(long, short = 's')]
    pub site: String,

    /// Sensor type to query
    #[arg(long, short = 't')]
    pub sensor_type: String,

    /// Max readings to fetch (1-100) [default: from profile, else 20]
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum ReadingsCommand {
    /// List the latest readings
    #[command(alias = "ls")]
    List(ReadingFilterArgs),

    /// Chart the latest readings over time
    Chart {
        #[command(flatten)]
        filter: ReadingFilterArgs,

        /// Bar width in columns
        #[arg(long, default_value = "40")]
        width: usize,
    },

    /// Record a new reading
    Create {
        /// Site the sensor belongs to
        #[arg(long, short = 's')]
        site: String,

        /// Sensor type (e.g. temperature)
        #[arg(long, short = 't')]
        sensor_type: String,

        /// Sensor identifier
        #[arg(long, short = 'i')]
        sensor_id: String,

        /// Measured value
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
