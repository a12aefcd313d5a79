use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use mtx_types::{DupPolicy, JoinKind};

#[derive(Parser)]
#[command(
    name = "mtx",
    about = "MTX — workflow matrix service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the MTX HTTP server
    Serve(ServeArgs),
    /// Merge two table documents and print or write the result
    Merge(MergeArgs),
    /// Summarize a table document: columns, types, row count
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Override the table store root (default: in-memory)
    #[arg(long)]
    pub tables_root: Option<PathBuf>,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Destination table document (JSON)
    pub destination: PathBuf,
    /// Source table document (JSON)
    pub source: PathBuf,
    /// Join semantics
    #[arg(long, default_value = "inner")]
    pub how: JoinKind,
    /// Join key column in the destination table
    #[arg(long)]
    pub left_on: String,
    /// Join key column in the source table
    #[arg(long)]
    pub right_on: String,
    /// Collision policy for non-key column names
    #[arg(long, default_value = "rename")]
    pub dup_policy: DupPolicy,
    /// Write the merged document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Table document (JSON)
    pub table: PathBuf,
}
