use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use mtx_server::{MtxServer, ServerConfig};
use mtx_store::{IngestConfig, TableDocument};
use mtx_types::{MergeSpec, Table};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Merge(args) => cmd_merge(args),
        Command::Show(args) => cmd_show(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            ServerConfig::from_toml(&raw)?
        }
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = args.tables_root {
        config.tables_root = Some(root);
    }

    println!(
        "MTX server on {} (tables: {})",
        config.bind_addr.to_string().bold(),
        config
            .tables_root
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "in-memory".into())
            .cyan()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(MtxServer::new(config)?.serve())?;
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let config = IngestConfig::default();
    let destination = read_table(&args.destination, &config)?;
    let source = read_table(&args.source, &config)?;

    let spec = MergeSpec::new(args.how, &args.left_on, &args.right_on, args.dup_policy);
    let merged = mtx_merge::merge(&destination, &source, &spec)?;
    let document = TableDocument::from_table(&merged);
    let rendered = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!(
                "{} Merged {} rows × {} columns into {}",
                "✓".green().bold(),
                merged.n_rows().to_string().bold(),
                merged.n_columns().to_string().bold(),
                path.display()
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let table = read_table(&args.table, &IngestConfig::unlimited())?;
    println!(
        "{} ({} rows)",
        args.table.display().to_string().bold(),
        table.n_rows()
    );
    for column in table.columns() {
        let nulls = column.values().iter().filter(|v| v.is_null()).count();
        println!(
            "  {} {} {}",
            column.name().yellow(),
            column.ty().to_string().cyan(),
            if nulls > 0 {
                format!("({nulls} null)").dimmed().to_string()
            } else {
                String::new()
            }
        );
    }
    Ok(())
}

fn read_table(path: &Path, config: &IngestConfig) -> anyhow::Result<Table> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read table {}", path.display()))?;
    let document: TableDocument = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a table document", path.display()))?;
    Ok(document.ingest(config)?)
}
