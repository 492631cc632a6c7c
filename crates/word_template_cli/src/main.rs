//! word-template - fill variables in Word templates from the command line

mod cli;
mod values;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use values::Values;
use word_template::TemplateDocument;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::Names { template, json } => list_names(&template, json),
        Commands::Fill {
            template,
            output,
            values,
            set,
            set_file,
            strict,
        } => {
            let values = collect_values(values.as_deref(), set, set_file)?;
            fill(&template, &output, &values, strict)
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn open_template(path: &Path) -> Result<TemplateDocument> {
    TemplateDocument::open(path).with_context(|| format!("Failed to load template {}", path.display()))
}

fn list_names(template: &Path, json: bool) -> Result<()> {
    let names = open_template(template)?.variable_names();

    if json {
        println!("{}", serde_json::to_string(&names)?);
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}

/// Merge the values file with `--set` then `--set-file` pairs
fn collect_values(
    file: Option<&Path>,
    set: Vec<(String, String)>,
    set_file: Vec<(String, PathBuf)>,
) -> Result<Values> {
    let mut values = match file {
        Some(path) => Values::from_path(path)?,
        None => Values::new(),
    };

    for (name, value) in set {
        values.set(name, value);
    }
    for (name, path) in set_file {
        values.set_from_file(name, &path)?;
    }
    Ok(values)
}

fn fill(template: &Path, output: &Path, values: &Values, strict: bool) -> Result<()> {
    let mut doc = open_template(template)?;
    let names = doc.variable_names();

    if strict {
        values.ensure_complete(&names)?;
    } else {
        for name in names.iter().filter(|name| values.get(name).is_none()) {
            tracing::warn!("No value for variable {}", name);
        }
    }

    if values.is_empty() {
        tracing::warn!("No values given, the output will be a copy of the template");
    }

    tracing::debug!("Applying {} value(s) to {}", values.len(), template.display());
    doc.set_variables(values.iter());

    doc.save(template, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!("Wrote {}", output.display());
    Ok(())
}
