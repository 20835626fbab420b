use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exception_gateway::config::loader::load_config;
use exception_gateway::config::validation::validate_exceptions;
use exception_gateway::{Dialect, MatcherSet, PLUGIN_NAME};

#[derive(Parser)]
#[command(name = "exceptions-cli")]
#[command(about = "Inspect the exception bypass configuration offline", long_about = None)]
struct Cli {
    /// Gateway TOML configuration holding the plugin section.
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,

    /// Override the configured template dialect.
    #[arg(short, long)]
    dialect: Option<Dialect>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each exception template with its compiled expression
    Compile,
    /// Report whether each path would bypass validation
    Check {
        /// Request paths to test
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli.config)?;
    let validated = validate_exceptions(&config.extra_config, PLUGIN_NAME)?;

    for issue in &validated.skipped {
        eprintln!("warning: skipping {}", issue);
    }

    let dialect = cli.dialect.unwrap_or(validated.config.dialect);
    let (matchers, errors) = MatcherSet::compile(dialect, &validated.config.exceptions);
    for error in &errors {
        eprintln!("warning: skipping {}", error);
    }

    match cli.command {
        Commands::Compile => {
            println!("dialect: {}", dialect);
            for matcher in &matchers {
                let note = if matcher.is_literal() { "  (literal)" } else { "" };
                println!("{}\t{}{}", matcher.template(), matcher.expression(), note);
            }
        }
        Commands::Check { paths } => {
            for path in &paths {
                match matchers.first_match(path) {
                    Some(matcher) => println!("{}\tbypass\t{}", path, matcher.template()),
                    None => println!("{}\tvalidate", path),
                }
            }
        }
    }

    Ok(())
}
