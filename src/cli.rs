use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docdrift")]
#[command(about = "Docstring drift checker for Python type hints", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check docstrings against signatures under a path
    Check {
        /// File or directory to check
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagnostic codes to silence (e.g. DOC008,DOC016)
        #[arg(long = "disable", value_delimiter = ',')]
        disable: Option<Vec<String>>,

        /// Check files sequentially instead of in parallel
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads; 0 means all available cores
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List every diagnostic code with its rationale
    Rules,

    /// Write a default .docdrift.toml to the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
