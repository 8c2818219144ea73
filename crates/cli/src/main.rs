use crate::{env::EnvManager, error::CliError};
use clap::Parser;
use commands::Commands;
use filter_syntax::printer;
use predicate_engine::{FilterCompiler, PredicateCompiler};
use std::io::{self, BufWriter, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod input;
mod output;

#[derive(Parser)]
#[command(name = "sieve", version = "0.1.0", about = "Compile and apply record filters")]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Load SIEVE_* settings from this .env file in addition to the environment"
    )]
    env_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut env = EnvManager::new();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }

    match cli.command {
        Commands::Check { filter, schema } => {
            let compiler = PredicateCompiler::new(env.compile_settings()?);
            let node = input::load_filter(&filter)?;
            let schema = input::load_schema(&schema)?;

            let predicate = compiler.compile(&node, &schema)?;
            info!(
                "Filter {} compiles against schema '{}' ({} node(s))",
                filter,
                predicate.schema_name(),
                predicate.node_count()
            );
        }
        Commands::Run {
            filter,
            schema,
            records,
            count,
        } => {
            let compiler = PredicateCompiler::new(env.compile_settings()?);
            let node = input::load_filter(&filter)?;
            let schema = input::load_schema(&schema)?;
            let predicate = compiler.compile(&node, &schema)?;

            let source = input::open_records(records.as_deref())?;
            let mut out = BufWriter::new(io::stdout().lock());
            output::filter_records(source, &mut out, &predicate, &schema, count)?;
            out.flush()?;
        }
        Commands::Print { filter } => {
            let node = input::load_filter(&filter)?;
            print!("{}", printer::print(&node, 0));
        }
    }

    Ok(())
}
