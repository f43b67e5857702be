mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::{cmd_check, cmd_convert, cmd_rules, ConvertArgs};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Convert JSON documents into typed values described by type descriptors.
#[derive(Parser)]
#[command(name = "jsont", version, about = "Typed conversion of JSON documents")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log conversion details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document against a type descriptor
    Convert {
        /// Path to the JSON document ("-" reads stdin)
        input: PathBuf,
        /// Path to the type descriptor document
        #[arg(long = "type")]
        descriptor: PathBuf,
        /// Path to a TOML file with conversion options
        #[arg(long)]
        config: Option<PathBuf>,
        /// Reject undeclared keys in every record
        #[arg(long)]
        strict: bool,
        /// Maximum nesting depth (0 disables the bound)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Parse and validate a type descriptor document
    Check {
        /// Path to the type descriptor document
        descriptor: PathBuf,
    },

    /// List conversion rules in dispatch order
    Rules,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            input,
            descriptor,
            config,
            strict,
            max_depth,
        } => {
            let args = ConvertArgs {
                input: &input,
                descriptor: &descriptor,
                config: config.as_deref(),
                strict,
                max_depth,
            };
            cmd_convert(&args, cli.output, cli.quiet);
        }
        Commands::Check { descriptor } => {
            cmd_check(&descriptor, cli.output, cli.quiet);
        }
        Commands::Rules => {
            cmd_rules(cli.output);
        }
    }
}

/// `RUST_LOG` wins when set; otherwise warnings only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}

/// Read and parse a JSON file, or stdin when `path` is `-`. Exits on failure.
pub(crate) fn read_json(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        if let Err(e) = std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf) {
            report_error(&format!("error reading stdin: {}", e), output, quiet);
            process::exit(1);
        }
        buf
    } else {
        match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                let msg = format!("error reading file '{}': {}", path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }
    };

    match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
