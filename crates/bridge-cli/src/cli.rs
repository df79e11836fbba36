//! CLI argument definitions for the semantic bridge.

use std::path::PathBuf;

use bridge_model::{InterventionContext, KsiAction, KsiStatus, Taxonomy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "semantic-bridge",
    version,
    about = "Map ICF codes across KSI, BBIC, IBIC, KVÅ and SHANARRI, and analyze free-text answers",
    long_about = "Confidence-scored translation between child-welfare and education taxonomies.\n\n\
                  Free-text survey answers are turned into ICF suggestions with keyword and\n\
                  pattern rules, clustered into themes and summarized per wellbeing domain."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow free-text answers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Config file (default: ./semantic-bridge.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Reference dataset directory (default: embedded dataset).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map one code between two taxonomies.
    Map(MapArgs),

    /// Map one ICF code to KSI, BBIC, IBIC and KVÅ at once.
    MapAll {
        #[arg(value_name = "ICF_CODE")]
        code: String,
    },

    /// Build a three-axis KSI code from an ICF code.
    Generate(GenerateArgs),

    /// List the ICF codes of a BBIC dimension.
    ReverseBbic {
        #[arg(value_name = "DIMENSION")]
        dimension: String,
    },

    /// Propose KSI interventions for ICF codes.
    Interventions(InterventionArgs),

    /// Suggest ICF codes for one free-text answer.
    Analyze(AnalyzeArgs),

    /// Cluster a batch of answers (one per line) into themes.
    Batch(BatchArgs),

    /// Summarize the answers of one wellbeing domain (JSON array of answers).
    Summary(SummaryArgs),

    /// Analyze a survey (JSON) into ICF codes and KSI interventions.
    Survey(SurveyArgs),

    /// Show a curated ICF core set, or list the conditions.
    CoreSet {
        #[arg(value_name = "CONDITION")]
        condition: Option<String>,
    },

    /// Search ICF and KSI codes by code or name.
    Search(SearchArgs),

    /// Show the documented confidence of each mapping category.
    Stats,

    /// Report on the reference dataset.
    Doctor,
}

#[derive(Args)]
pub struct MapArgs {
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Source taxonomy.
    #[arg(long = "from", default_value = "ICF")]
    pub from: Taxonomy,

    /// Target taxonomy.
    #[arg(long = "to")]
    pub to: Taxonomy,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[arg(value_name = "ICF_CODE")]
    pub icf_code: String,

    /// KSI action (axis 2), e.g. PM.
    #[arg(long = "action")]
    pub action: KsiAction,

    /// KSI status (axis 3): 1-4 or planned, ongoing, completed, discontinued.
    #[arg(long = "status", default_value = "1")]
    pub status: KsiStatus,
}

#[derive(Args)]
pub struct InterventionArgs {
    #[arg(value_name = "ICF_CODE", required = true)]
    pub codes: Vec<String>,

    #[arg(long = "context", default_value = "school")]
    pub context: InterventionContext,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Wellbeing context for relevance boosting (utvecklas, trygghet, ma_bra).
    #[arg(long = "context")]
    pub context: Option<String>,

    #[arg(long = "min-confidence", value_name = "0-1")]
    pub min_confidence: Option<f64>,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Text file with one answer per line; blank lines are skipped.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[arg(long = "min-frequency")]
    pub min_frequency: Option<usize>,

    #[arg(long = "min-confidence", value_name = "0-1")]
    pub min_confidence: Option<f64>,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// JSON array of `{question_id, response}` answers.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[arg(long = "domain")]
    pub domain: String,
}

#[derive(Args)]
pub struct SurveyArgs {
    /// JSON survey with `freetext_responses`.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Restrict to a taxonomy (ICF or KSI); repeatable.
    #[arg(long = "system")]
    pub systems: Vec<Taxonomy>,
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
