use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use specflow_core::config::{Config, WarnLevel};
use std::io::Write;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(
    path: &Path,
    subcmd: ConfigSubcommand,
    out: &mut dyn Write,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(path, out, json),
        ConfigSubcommand::Validate => validate(path, out, json),
        ConfigSubcommand::Init { force } => init(path, force, out),
    }
}

fn show(path: &Path, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    let config = Config::load(path).context("failed to load config")?;

    if json {
        return print_json(out, &config);
    }

    writeln!(out, "# {}", path.display())?;
    write!(out, "{}", serde_yaml::to_string(&config)?)?;
    Ok(())
}

fn validate(path: &Path, out: &mut dyn Write, json: bool) -> anyhow::Result<()> {
    let config = Config::load(path).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        print_json(out, &serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        writeln!(out, "Config is valid. No warnings.")?;
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            writeln!(out, "[{prefix}] {}", w.message)?;
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}

fn init(path: &Path, force: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Config::default()
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}
