use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autodocs::cli::commands::generate::{self, GenerateOptions};

#[derive(Parser)]
#[command(name = "autodocs")]
#[command(
    version,
    about = "Multi-persona AI documentation generator for source archives and repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation for a zip archive, repository or directory
    Generate {
        #[arg(long, help = "Zip archive to document", conflicts_with_all = ["repo", "path"])]
        zip: Option<PathBuf>,
        #[arg(long, help = "Git repository URL to clone and document", conflicts_with = "path")]
        repo: Option<String>,
        #[arg(long, help = "Local directory to document (default: current directory)")]
        path: Option<PathBuf>,
        #[arg(long, short, help = "Output directory for reports")]
        output: Option<PathBuf>,
        #[arg(long, help = "LLM provider (openai, ollama)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, help = "Files documented at once")]
        concurrency: Option<usize>,
        #[arg(long, help = "Also export a PDF report")]
        pdf: bool,
        #[arg(long = "dry-run", help = "List files and summaries only, no LLM calls")]
        dry_run: bool,
    },

    /// Render an existing markdown report to PDF
    #[command(name = "export-pdf")]
    ExportPdf {
        #[arg(long, short, help = "Markdown report (default: <output_dir>/<markdown_file>)")]
        input: Option<PathBuf>,
        #[arg(long, short, help = "Output directory")]
        output: Option<PathBuf>,
    },

    /// List supported languages and extensions
    Languages,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mautodocs encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            zip,
            repo,
            path,
            output,
            provider,
            model,
            concurrency,
            pdf,
            dry_run,
        } => {
            generate::run(GenerateOptions {
                source: generate::select_source(zip, repo, path)?,
                output,
                provider,
                model,
                concurrency,
                pdf,
                dry_run,
                quiet: cli.quiet,
            })?;
        }
        Commands::ExportPdf { input, output } => {
            autodocs::cli::commands::export::run(input, output)?;
        }
        Commands::Languages => {
            autodocs::cli::commands::languages::run();
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                autodocs::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                autodocs::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                autodocs::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
