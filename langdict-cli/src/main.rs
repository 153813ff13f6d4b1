mod convert;
mod view;

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use langdict::IdentityMode;
use langdict_cli::{Config, Overrides};
use tracing_subscriber::EnvFilter;

use crate::convert::{AnalysisMode, run_analysis_command};
use crate::view::run_view_command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Takes a translation table and returns an XML file formatted for use as a Custom Dictionary with CXone Expert.",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Options shared by every subcommand.
#[derive(ClapArgs, Debug)]
struct CommonArgs {
    /// CSV or XLSX file with language code, key and value columns. Defaults to
    /// the most recently modified file in the source folder.
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// CSV of region descriptions and language codes.
    #[arg(short, long)]
    allowed: Option<PathBuf>,

    /// The first row of the source is a header.
    #[arg(long, alias = "headerExists")]
    header_exists: bool,

    /// Skip the language code check.
    #[arg(long, alias = "bypassLangCheck")]
    bypass_lang_check: bool,

    /// Worksheet to read from a workbook.
    #[arg(long)]
    sheet: Option<String>,

    /// Configuration file (defaults to langdict.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print debugging information.
    #[arg(short, long)]
    verbose: bool,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a translation table into dictionary XML, reporting problems.
    Convert {
        #[command(flatten)]
        common: CommonArgs,

        /// Where to write the dictionary XML
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where to write rows with invalid language codes
        #[arg(long)]
        errors: Option<PathBuf>,

        /// Where to write duplicate rows
        #[arg(long)]
        duplicates: Option<PathBuf>,
    },

    /// Report invalid language codes and duplicate keys without writing XML.
    Check {
        #[command(flatten)]
        common: CommonArgs,

        /// Where to write rows with invalid language codes
        #[arg(long)]
        errors: Option<PathBuf>,

        /// Where to write duplicate rows
        #[arg(long)]
        duplicates: Option<PathBuf>,

        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the terms of each language group.
    View {
        #[command(flatten)]
        common: CommonArgs,

        /// Only show this language code
        #[arg(short, long)]
        lang: Option<String>,

        /// Also count distinct terms under this identity mode (key, key-value, full)
        #[arg(long)]
        identity: Option<IdentityMode>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(common: &CommonArgs, overrides: Overrides) -> Config {
    let mut config = Config::load(common.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    config.apply_overrides(overrides);
    config
}

fn common_overrides(common: &CommonArgs) -> Overrides {
    Overrides {
        allowed: common.allowed.clone(),
        header_exists: common.header_exists,
        bypass_lang_check: common.bypass_lang_check,
        sheet: common.sheet.clone(),
        ..Overrides::default()
    }
}

fn main() {
    let args = Args::parse();

    match args.commands {
        Commands::Convert {
            common,
            output,
            errors,
            duplicates,
        } => {
            init_tracing(common.verbose);
            let overrides = Overrides {
                output,
                error_report: errors,
                duplicate_report: duplicates,
                ..common_overrides(&common)
            };
            let config = load_config(&common, overrides);
            run_analysis_command(
                &config,
                common.source,
                AnalysisMode::Convert,
                common.verbose,
            );
        }
        Commands::Check {
            common,
            errors,
            duplicates,
            json,
        } => {
            init_tracing(common.verbose);
            let overrides = Overrides {
                error_report: errors,
                duplicate_report: duplicates,
                ..common_overrides(&common)
            };
            let config = load_config(&common, overrides);
            let mode = if json {
                AnalysisMode::CheckJson
            } else {
                AnalysisMode::Check
            };
            run_analysis_command(&config, common.source, mode, common.verbose);
        }
        Commands::View {
            common,
            lang,
            identity,
        } => {
            init_tracing(common.verbose);
            let config = load_config(&common, common_overrides(&common));
            run_view_command(&config, common.source, lang, identity);
        }
    }
}
