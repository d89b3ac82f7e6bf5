use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roadwatch")]
#[command(about = "Road condition survey analytics and repair prioritization", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Selection flags shared by `report` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Segment table to read (defaults to the configured data path)
    pub path: Option<PathBuf>,

    /// Roughness conditions to keep, comma separated ("all" for every condition)
    #[arg(long = "condition", value_delimiter = ',')]
    pub conditions: Option<Vec<String>>,

    /// Lowest IRI to keep (m/km, inclusive)
    #[arg(long = "iri-min", allow_negative_numbers = true)]
    pub iri_min: Option<f64>,

    /// Highest IRI to keep (m/km, inclusive)
    #[arg(long = "iri-max", allow_negative_numbers = true)]
    pub iri_max: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the survey and print the condition report
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colors and box drawing
        #[arg(long)]
        plain: bool,
    },

    /// Filter the survey and write the selected rows as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a roadwatch configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl OutputFormat {
    /// Parse a configured format name
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Markdown => Self::Markdown,
            OutputFormat::Terminal => Self::Terminal,
        }
    }
}
