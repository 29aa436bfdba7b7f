//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use html_upsert::config::CONFIG_FILE;
use std::path::PathBuf;

/// Upsert titles, favicons, meta tags, styles and scripts into HTML templates
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the loader over HTML templates
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Validate configuration and print the resolved template options
    #[command(visible_alias = "c")]
    Check {
        /// Template params (JSON) merged over `[template]`
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        params: Option<PathBuf>,
    },
}

impl Commands {
    pub fn params(&self) -> Option<&PathBuf> {
        match self {
            Self::Render { args } => args.params.as_ref(),
            Self::Check { params } => params.as_ref(),
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Template files
    #[arg(value_name = "INPUT", required = true, value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Output directory. A single input without it is printed to stdout
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Template params (JSON) merged over `[template]`
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub params: Option<PathBuf>,

    /// Render even when other loaders are chained
    #[arg(short, long)]
    pub force: bool,
}
