//! BioScan - butterfly species identification CLI tool.
//!
//! Classifies butterfly photographs with an ONNX model and enriches the
//! prediction with conservation status, habitat location and an
//! encyclopedia summary.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod enrichment;
pub mod error;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod resources;

use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command, SpeciesAction};
use config::{
    Config, OutputFormat, config_file_path, load_config_file, save_config, validate_config,
    validate_model_config,
};
use enrichment::{EnrichmentResolver, WikipediaClient};
use output::json::{EventType, write_event};
use output::{SpeciesReport, text};
use pipeline::{BatchOptions, analyze_batch, collect_input_files};
use resources::{ReferenceTables, ResourceStore, read_species_index};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for bioscan CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    let config_path = match &cli.analyze.config {
        Some(path) => path.clone(),
        None => config_file_path()?,
    };
    // `config` subcommands must work before the file exists.
    let must_exist =
        cli.analyze.config.is_some() && !matches!(cli.command, Some(Command::Config { .. }));
    let mut config = load_config(&config_path, must_exist)?;
    apply_overrides(&mut config, &cli.analyze);
    validate_config(&config)?;

    if let Some(command) = cli.command {
        return handle_command(command, &cli.analyze, &config, &config_path);
    }

    if cli.inputs.is_empty() {
        cli::help::print_smart_help(&config);
        return Ok(());
    }

    analyze_files(&cli.inputs, &cli.analyze, config)
}

/// Load the configuration file. An explicitly named file must exist.
fn load_config(path: &Path, explicit: bool) -> Result<Config> {
    if explicit && !path.exists() {
        return Err(Error::ConfigRead {
            path: path.to_path_buf(),
            source: std::io::ErrorKind::NotFound.into(),
        });
    }
    load_config_file(path)
}

/// Apply command-line overrides on top of the file configuration.
fn apply_overrides(config: &mut Config, args: &AnalyzeArgs) {
    if let Some(path) = &args.model_path {
        config.model.path.clone_from(path);
    }
    if let Some(path) = &args.labels_path {
        config.model.labels.clone_from(path);
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if args.offline {
        config.encyclopedia.enabled = false;
    }
}

/// Analyze input images and print one report per image.
fn analyze_files(inputs: &[PathBuf], args: &AnalyzeArgs, config: Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidImageFiles);
    }
    info!("Found {} image(s) to analyze", files.len());

    validate_model_config(&config.model)?;

    let format = config.output.format;
    let client = build_client(&config)?;
    let store = ResourceStore::new(config);
    let resources = store.load()?;
    let resolver = EnrichmentResolver::new(resources.tables(), client.as_ref());

    let runtime = build_runtime()?;
    let options = BatchOptions {
        format,
        fail_fast: args.fail_fast,
        progress: !args.quiet && !args.no_progress && format == OutputFormat::Text,
    };
    let mut stdout = std::io::stdout().lock();
    let result = runtime.block_on(analyze_batch(
        &files,
        &resources,
        &resolver,
        options,
        &mut stdout,
    ));

    info!(
        "Complete: {} image(s) in {:.2}s",
        files.len(),
        total_start.elapsed().as_secs_f64()
    );
    result.map(|_| ())
}

/// Encyclopedia client, unless lookups are disabled.
fn build_client(config: &Config) -> Result<Option<WikipediaClient>> {
    if config.encyclopedia.enabled {
        WikipediaClient::from_config(&config.encyclopedia).map(Some)
    } else {
        info!("Encyclopedia lookups disabled");
        Ok(None)
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create async runtime: {e}"),
        })
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is suppressed by default.
    // Use -v to see ORT warnings, -vv for info, -vvv for full trace.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Reports go to stdout; keep logs on stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(
    command: Command,
    args: &AnalyzeArgs,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config, config_path),
        Command::Species { action } => match action {
            SpeciesAction::List => list_species(config),
            SpeciesAction::Info { name } => lookup_species(&name, true, config),
        },
        Command::Lookup { name } => lookup_species(&name, args.offline, config),
    }
}

fn handle_config_command(
    action: cli::ConfigAction,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            if config_path.exists() {
                println!(
                    "Configuration file already exists: {}",
                    config_path.display()
                );
            } else {
                save_config(&Config::default(), config_path)?;
                println!("Created configuration file: {}", config_path.display());
                println!("\nNext steps:");
                println!("  Set [model] path and labels, then run: bioscan <image>");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let rendered =
                toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

/// Print the species index, one `id<TAB>name` per line.
fn list_species(config: &Config) -> Result<()> {
    let species = read_species_index(&config.model.labels, &config.model.label_column)?;
    let mut stdout = std::io::stdout().lock();
    for (id, name) in species.iter() {
        writeln!(stdout, "{id}\t{name}")?;
    }
    stdout.flush()?;
    Ok(())
}

/// Enrich a species name without an image.
fn lookup_species(name: &str, offline: bool, config: &Config) -> Result<()> {
    let tables = ReferenceTables::load(&config.tables)?;

    let in_index = if config.model.labels.exists() {
        read_species_index(&config.model.labels, &config.model.label_column)
            .map(|index| index.name_to_id(name).is_some())
            .inspect_err(|e| warn!("Species index unavailable: {}", e))
            .ok()
    } else {
        None
    };

    let client = if offline {
        None
    } else {
        build_client(config)?
    };
    let resolver = EnrichmentResolver::new(&tables, client.as_ref());
    let enrichment = build_runtime()?.block_on(resolver.resolve(name));

    let report = SpeciesReport {
        species: name.to_string(),
        in_index,
        enrichment,
    };

    let mut stdout = std::io::stdout().lock();
    match config.output.format {
        OutputFormat::Text => text::write_species(&mut stdout, &report)?,
        OutputFormat::Json => write_event(&mut stdout, EventType::SpeciesInfo, &report)?,
    }
    stdout.flush()?;
    Ok(())
}
