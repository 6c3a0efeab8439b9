use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perfmap")]
#[command(about = "Employee performance analytics and what-if scenario simulator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a what-if scenario simulation
    Simulate {
        /// Preset scenario to start from (training-boost, workload-reduction,
        /// engagement-initiative, wellness-program, combined-optimization)
        #[arg(long)]
        preset: Option<String>,

        /// Satisfaction change in percent
        #[arg(long, allow_negative_numbers = true)]
        satisfaction: Option<f64>,

        /// Training hours change in percent
        #[arg(long, allow_negative_numbers = true)]
        training: Option<f64>,

        /// Work hours change in percent
        #[arg(long = "work-hours", allow_negative_numbers = true)]
        work_hours: Option<f64>,

        /// Overtime change in percent
        #[arg(long, allow_negative_numbers = true)]
        overtime: Option<f64>,

        /// Sick days change in percent
        #[arg(long = "sick-days", allow_negative_numbers = true)]
        sick_days: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize an employee dataset (CSV or JSON)
    Analyze {
        /// Dataset file to summarize
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Request a prediction from the remote model service
    Predict {
        /// JSON file holding one employee feature record
        #[arg(short, long)]
        input: PathBuf,

        /// Base URL of the prediction service
        #[arg(long, env = "PERFMAP_API_URL")]
        url: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check remote model service health
    Health {
        /// Base URL of the prediction service
        #[arg(long, env = "PERFMAP_API_URL")]
        url: Option<String>,
    },

    /// Fetch model feature importances
    Importance {
        /// Base URL of the prediction service
        #[arg(long, env = "PERFMAP_API_URL")]
        url: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
