mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Cartrule discount-predicate toolchain.
#[derive(Parser)]
#[command(name = "cartrule", version, about = "Cart discount predicate engine")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a predicate and print its expression tree
    Parse {
        /// The predicate string
        predicate: String,
    },

    /// Evaluate a predicate against a line-item context
    Eval {
        /// The predicate string
        predicate: String,
        /// Path to the context JSON file
        #[arg(long)]
        context: PathBuf,
        /// Print a pass/fail-annotated trace of every sub-evaluation
        #[arg(long)]
        trace: bool,
        /// Render the trace without ANSI colors (for piping)
        #[arg(long)]
        plain: bool,
        /// Coerce bare true/false literals to 1/0 in comparisons
        #[arg(long)]
        coerce_bool_literals: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { predicate } => commands::parse::cmd_parse(&predicate, cli.output),
        Commands::Eval {
            predicate,
            context,
            trace,
            plain,
            coerce_bool_literals,
        } => commands::eval::cmd_eval(
            &predicate,
            &context,
            trace,
            plain,
            coerce_bool_literals,
            cli.output,
        ),
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
