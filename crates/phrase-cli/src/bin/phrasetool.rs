use clap::{Parser, Subcommand};

use phrase_cli::commands::{config_ops, suggest_ops};
use phrase_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "phrasetool", about = "Multi-word completion diagnostics")]
struct Cli {
    /// Log engine debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print completions for a partially typed input
    Suggest {
        /// Term list file (one term per line, best first)
        terms_file: String,
        /// Input text to complete
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Maximum candidates per word lookup
        #[arg(long)]
        max_results: Option<usize>,
        /// Settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
    },
    /// Show tokens, match tree and paths for an input
    Explain {
        /// Term list file (one term per line, best first)
        terms_file: String,
        /// Input text to explain
        text: String,
        /// Settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
    },
    /// Complete every line of a file and record results to JSONL
    Batch {
        /// Term list file (one term per line, best first)
        terms_file: String,
        /// Input file (one input per line)
        input_file: String,
        /// Output JSONL file
        output_file: String,
        /// Settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Settings TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Suggest {
            terms_file,
            text,
            json,
            max_results,
            settings,
        } => suggest_ops::suggest(&terms_file, &text, json, max_results, settings.as_deref()),
        Command::Explain {
            terms_file,
            text,
            settings,
        } => suggest_ops::explain(&terms_file, &text, settings.as_deref()),
        Command::Batch {
            terms_file,
            input_file,
            output_file,
            settings,
        } => suggest_ops::batch(&terms_file, &input_file, &output_file, settings.as_deref()),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
