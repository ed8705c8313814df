use anyhow::Context;
use clap::{Parser, Subcommand};
use specflow_cli::cmd::{self, config::ConfigSubcommand, session::Session};
use specflow_cli::config_path::resolve_config;
use specflow_core::config::Config;
use specflow_core::types::DocumentKind;
use std::io::{BufReader, IsTerminal};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "specflow",
    about = "Spec-driven development: turn a feature description into requirements, design and tasks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: nearest .specflow.yaml)
    #[arg(long, global = true, env = "SPECFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a specification from a prompt and print it
    Generate {
        #[arg(required = true)]
        prompt: Vec<String>,

        /// Print only one document: requirements, design or tasks
        #[arg(long)]
        doc: Option<DocumentKind>,
    },

    /// Start an interactive (or scripted) session
    Session {
        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// List configured tool servers
    Servers,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Session { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_path = resolve_config(cli.config.as_deref(), &cwd);

    if let Err(e) = run(cli.command, &config_path, cli.json) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config_path: &Path, json: bool) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Generate { prompt, doc } => cmd::generate::run(
            load_config(config_path)?,
            &prompt.join(" "),
            doc,
            &mut out,
            json,
        ),
        Commands::Session { script } => {
            let mut session = Session::new(load_config(config_path)?, json);
            match script {
                Some(path) => {
                    let file = std::fs::File::open(&path)
                        .with_context(|| format!("cannot open {}", path.display()))?;
                    session.run(BufReader::new(file), &mut out, false)
                }
                None => {
                    let stdin = std::io::stdin();
                    let interactive = stdin.is_terminal();
                    if interactive {
                        tracing::info!("type 'help' for commands, 'quit' to leave");
                    }
                    session.run(stdin.lock(), &mut out, interactive)
                }
            }
        }
        Commands::Servers => cmd::servers::run(&load_config(config_path)?, &mut out, json),
        Commands::Config { subcommand } => cmd::config::run(config_path, subcommand, &mut out, json),
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config =
        Config::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    config
        .ensure_valid()
        .with_context(|| format!("failed to load {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
