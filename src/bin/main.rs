use clap::Parser;
use crossterm::style::Stylize;
use gsg_core::persistence::write_graph_source;
use gsg_core::{GeneratorConfig, GraphSourceGenerator, GsgError, NodeCollection};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "./data/gsg.json";

#[derive(Debug, Parser)]
#[command(
    name = "gsg",
    version,
    about = "Generate graph source nodes from labels and abbreviations"
)]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides the abbreviation table path from the config.
    #[arg(long)]
    abbreviations: Option<PathBuf>,

    /// Overrides the graph source output path from the config.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Salt as text, at most 8 bytes.
    #[arg(long)]
    salt: Option<String>,

    /// Extra node to build, as TYPE=VALUE. Repeatable.
    #[arg(long = "entity", value_parser = parse_entity)]
    entities: Vec<(String, String)>,

    /// Print the terms and vocabulary extracted from TEXT.
    #[arg(long)]
    parse: Vec<String>,

    /// Worker threads for vocabulary seeding.
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

fn parse_entity(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((node_type, value)) if !node_type.trim().is_empty() && !value.is_empty() => {
            Ok((node_type.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected TYPE=VALUE, got `{raw}`")),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_fatal() => {
            eprintln!("{} {}", "fatal:".red().bold(), e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GsgError> {
    let mut config = GeneratorConfig::load(&cli.config)?;
    if let Some(path) = cli.abbreviations {
        config.abbreviation_path = path;
    }
    if let Some(path) = cli.output {
        config.graph_source_path = path;
    }
    if let Some(salt) = cli.salt {
        config.salt = salt.into_bytes();
    }

    let generator = GraphSourceGenerator::from_config(config)?;

    for text in &cli.parse {
        let parsed = generator.parse_input(text);
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    }

    let mut nodes = NodeCollection::new();
    let seeded = if cli.workers > 1 {
        generator.seed_vocabulary_nodes_parallel(&mut nodes, cli.workers)
    } else {
        generator.seed_vocabulary_nodes(&mut nodes).len()
    };

    let mut built = 0;
    for (node_type, value) in &cli.entities {
        if generator.add_node(&mut nodes, value, node_type) {
            built += 1;
        } else {
            tracing::warn!(%node_type, %value, "entity already present, skipped");
        }
    }

    let output = generator.config().graph_source_path.clone();
    write_graph_source(&nodes, &output)?;

    print_summary(&generator, &nodes, seeded, built, &output);
    Ok(())
}

fn print_summary(
    generator: &GraphSourceGenerator,
    nodes: &NodeCollection,
    seeded: usize,
    built: usize,
    output: &std::path::Path,
) {
    let sizes = nodes.bucket_sizes();
    let used = sizes.iter().filter(|&&n| n > 0).count();
    let largest = sizes.iter().copied().max().unwrap_or(0);

    println!("{}", "Graph source generated".green().bold());
    println!("---------------------------------------------------------------");
    println!("  abbreviations : {}", generator.abbreviations().len());
    println!("  vocabulary    : {}", seeded.to_string().cyan());
    println!("  entities      : {}", built.to_string().cyan());
    println!("  total nodes   : {}", nodes.len().to_string().bold());
    println!("  buckets used  : {used}/256 (largest {largest})");
    println!("  written to    : {}", output.display().to_string().yellow());
}
