use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "roomsync",
    about = "roomsync: room-model and positioning artifact sync server",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve(ServeArgs),
    /// Print the fingerprint a client sends for a file
    Hash(HashArgs),
    /// List, create, or delete projects in a data root
    Project(ProjectArgs),
    /// Store an artifact, inferring its kind from the file extension
    Upload(UploadArgs),
    /// Show the artifacts a project holds
    Status(StatusArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub data_root: Option<PathBuf>,
    /// Require `Authorization: Bearer <TOKEN>` for writes
    #[arg(long)]
    pub auth_token: Option<String>,
}

#[derive(Args)]
pub struct HashArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DataRootArgs {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub action: ProjectAction,
    #[command(flatten)]
    pub root: DataRootArgs,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    List,
    Create { name: String },
    Delete { name: String },
}

#[derive(Args)]
pub struct UploadArgs {
    pub project: String,
    pub file: PathBuf,
    #[command(flatten)]
    pub root: DataRootArgs,
}

#[derive(Args)]
pub struct StatusArgs {
    pub project: String,
    #[command(flatten)]
    pub root: DataRootArgs,
}
