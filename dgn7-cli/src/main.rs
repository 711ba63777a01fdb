mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::OutputFormat;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "dgn7")]
#[command(about = "DGN7 - Inspect and extract text from DGN v7 design files", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the file signature without decoding the element stream
    Check {
        /// Design file to check
        #[arg(short, long)]
        input: String,
    },

    /// Decode the stream and report the element-type inventory
    Inspect {
        /// Design file to inspect
        #[arg(short, long)]
        input: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Decode the stream and emit the extracted text
    Extract {
        /// Design file to read
        #[arg(short, long)]
        input: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Separator placed between text fragments
        #[arg(long, default_value = "\n")]
        separator: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Check { input } => commands::check::execute(&input),

        Commands::Inspect { input, format } => commands::inspect::execute(&input, format),

        Commands::Extract {
            input,
            output,
            separator,
            format,
        } => commands::extract::execute(&input, output.as_deref(), &separator, format),
    }
}
