//! CLI command handlers

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chart_credentials::config::{self, ConfigLoader, paths};
use chart_credentials::secret::{KubeSecretStore, SecretStore};
use chart_credentials::kube as cluster;
use chart_credentials::{StatusNotes, bootstrap};

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Chart identity (e.g., "redis", "mongodb")
    #[arg(long)]
    chart: String,

    /// File holding the release notes, or "-" for stdin
    #[arg(long)]
    notes_file: PathBuf,

    /// Do not contact the cluster; secret references resolve to nothing
    #[arg(long)]
    offline: bool,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value, or print the whole configuration
    Get {
        /// Configuration key (e.g., "defaultNamespace")
        key: Option<String>,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Extract credentials and print them as JSON
pub async fn handle_extract(args: ExtractArgs) -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;

    let store: Option<Arc<dyn SecretStore>> = if args.offline {
        None
    } else {
        Some(Arc::new(KubeSecretStore::new(cluster::create_client().await?)))
    };

    let registry = bootstrap(&config, store);
    let extractor = registry.lookup(&args.chart)?;

    let notes = read_notes(&args.notes_file)?;
    tracing::debug!(
        "Extracting credentials for chart '{}' from {} line(s)",
        args.chart,
        notes.len()
    );

    let credentials = extractor
        .extract_credentials(Some(&notes))
        .await
        .with_context(|| format!("Failed to extract credentials for chart '{}'", args.chart))?;

    let json =
        serde_json::to_string_pretty(&credentials).context("Failed to serialize credentials")?;
    println!("{}", json);
    Ok(())
}

fn read_notes(path: &Path) -> Result<StatusNotes> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read notes from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read notes file: {}", path.display()))?
    };
    Ok(StatusNotes::from_text(&text))
}

/// List registered chart identities
pub fn handle_charts() -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let registry = bootstrap(&config, None);
    for chart in registry.charts() {
        println!("{}", chart);
    }
    Ok(())
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                println!("{}", config::get_config_value(&config, &key)?);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => {
            let config = ConfigLoader::validate()?;
            println!(
                "Configuration is valid (default namespace: {})",
                config.default_namespace
            );
        }
    }

    Ok(())
}
