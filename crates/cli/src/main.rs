mod cmd;
mod completions;
mod logging;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::engine::ArgValueCompleter;
use clap_complete::env::CompleteEnv;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "skb",
    version,
    about = "Resolve widget date ranges, check variable inheritance and build API queries"
)]
pub struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print the resolved settings
    Doctor,

    /// Resolve a date-range selector into start and end periods
    Range(RangeArgs),

    /// Compare two dashboard variable schemas
    Diff(DiffArgs),

    /// Check a widget's inherit bindings against a variable schema
    Validate(ValidateArgs),

    /// Apply a variable schema change to a widget
    Reconcile(ReconcileArgs),

    /// Translate raw console queries into an API query
    Query(QueryArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

/// Output format for data commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Quiet,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Shorthand for --output quiet
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// DAILY, MONTHLY or YEARLY
    #[arg(
        long,
        short = 'g',
        default_value = "MONTHLY",
        add = ArgValueCompleter::new(completions::complete_granularities)
    )]
    pub granularity: String,

    /// Anchor (base) date, YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub anchor: Option<String>,

    /// Preset key, e.g. auto, lastQuarter, lastSevenDays
    #[arg(long, group = "selector", add = ArgValueCompleter::new(completions::complete_presets))]
    pub preset: Option<String>,

    /// Fixed range: START END as (partial) dates
    #[arg(long, num_args = 2, value_names = ["START", "END"], group = "selector")]
    pub fixed: Option<Vec<String>>,

    /// Relative units of the anchor's month or year: START END
    #[arg(long, num_args = 2, value_names = ["START", "END"], group = "selector")]
    pub relative: Option<Vec<u32>>,

    /// Offsets from the anchor period: START_OP START END_OP END
    #[arg(
        long,
        num_args = 4,
        value_names = ["START_OP", "START", "END_OP", "END"],
        allow_hyphen_values = true,
        group = "selector"
    )]
    pub advanced: Option<Vec<String>>,

    /// Read a stored date-range field value (JSON or YAML) instead
    #[arg(long, group = "selector")]
    pub field: Option<PathBuf>,

    /// Emit raw YYYY-MM-DD bounds
    #[arg(long)]
    pub preview: bool,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Variable schema before the change
    pub before: PathBuf,

    /// Variable schema after the change
    pub after: PathBuf,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Widget record (inherit options, visible properties, option values)
    #[arg(long)]
    pub widget: PathBuf,

    /// Widget config (defaults and options schema)
    #[arg(long = "config-file")]
    pub config_file: PathBuf,

    /// Dashboard variable schema
    #[arg(long)]
    pub variables: PathBuf,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Widget record
    #[arg(long)]
    pub widget: PathBuf,

    /// Widget config
    #[arg(long = "config-file")]
    pub config_file: PathBuf,

    /// Variable schema the widget was last checked against
    #[arg(long)]
    pub before: PathBuf,

    /// Current variable schema
    #[arg(long)]
    pub after: PathBuf,

    /// Write the updated widget record here
    #[arg(long = "write")]
    pub write: Option<PathBuf>,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Raw queries such as '["aws","provider","="]'
    pub raw: Vec<String>,

    /// Or-filters, same raw form; key and operator are required
    #[arg(long = "or")]
    pub or: Vec<String>,

    /// IANA timezone for datetime filters; defaults to the profile's
    #[arg(long)]
    pub timezone: Option<String>,

    #[command(flatten)]
    pub format: FormatArgs,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

fn main() {
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Range(args) => cmd::range::run(config, profile, args),
        Commands::Diff(args) => cmd::diff::run(config, profile, args),
        Commands::Validate(args) => cmd::validate::run(config, profile, args),
        Commands::Reconcile(args) => cmd::reconcile::run(config, profile, args),
        Commands::Query(args) => cmd::query::run(config, profile, args),
        Commands::Completions(args) => cmd::completions::run(args),
    }
}
