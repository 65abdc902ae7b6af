//! servicegen CLI entrypoint
//! Loads a service model, renders the requested files and writes them out.
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use servicegen::core::Config;
use servicegen::{Renderer, Response, ServiceModel};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "servicegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate files from a service model
    Generate {
        /// Service model file (JSON or YAML)
        #[arg(long)]
        model: PathBuf,
        /// Run configuration file (TOML, YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory to write generated files into
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Files to generate (defaults to every available file)
        files: Vec<String>,
    },
    /// List the file names that can be generated
    ListFiles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            model,
            config,
            output_dir,
            files,
        } => {
            let config = match config {
                Some(path) => Config::from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => Config::default(),
            };
            let config = config.merge_cli(output_dir, files);

            let response = generate(&model, &config).await?;
            if response.has_errors() {
                for message in &response.errors {
                    eprintln!("{message}");
                }
                std::process::exit(1);
            }
        }
        Commands::ListFiles => {
            let renderer =
                Renderer::new(ServiceModel::default()).context("Failed to load templates")?;
            for name in renderer.available_files() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

async fn generate(model_path: &Path, config: &Config) -> anyhow::Result<Response> {
    let model = ServiceModel::from_file(model_path)
        .await
        .with_context(|| format!("Failed to load service model {}", model_path.display()))?
        .filter_methods(&config.include_operations, &config.exclude_operations);
    info!(service = %model.name, methods = model.methods.len(), "Loaded service model");

    let renderer = Renderer::new(model).context("Failed to load templates")?;
    let files: Vec<String> = if config.files.is_empty() {
        renderer.available_files().into_iter().map(String::from).collect()
    } else {
        config.files.clone()
    };

    let mut response = Response::new();
    if let Err(e) = renderer.generate(&mut response, &files) {
        error!(error = %e, errors = response.errors.len(), "Generation finished with errors");
    }

    let output_dir = config.output_dir();
    for file in &response.files {
        let path = output_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        tokio::fs::write(&path, &file.data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote file");
    }

    Ok(response)
}
