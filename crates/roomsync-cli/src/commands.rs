use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use colored::Colorize;
use roomsync_crypto::ContentHasher;
use roomsync_server::{RoomSyncServer, ServerConfig};
use roomsync_store::FsProjectStore;
use roomsync_sync::{file_extension, FetchOutcome, SyncHandler, UploadReceipt};
use roomsync_types::{ArtifactKind, Fingerprint};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Hash(args) => cmd_hash(args, format),
        Command::Project(args) => cmd_project(args, format),
        Command::Upload(args) => cmd_upload(args, format),
        Command::Status(args) => cmd_status(args, format),
    }
}

fn local_sync(root: &DataRootArgs) -> SyncHandler {
    SyncHandler::new(Arc::new(FsProjectStore::new(root.data_root.clone())))
}

fn server_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = &args.data_root {
        config.data_root = root.clone();
    }
    if let Some(token) = &args.auth_token {
        config.auth_token = Some(token.clone());
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(&args)?;
    println!(
        "roomsync server on {} (data root: {})",
        config.bind_addr.to_string().bold(),
        config.data_root.display()
    );
    let gated = config.auth_token.is_some();
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    tracing::info!(gated, "starting server");
    runtime.block_on(RoomSyncServer::new(config).serve())?;
    tracing::info!("server shut down");
    Ok(())
}

fn cmd_hash(args: HashArgs, format: OutputFormat) -> anyhow::Result<()> {
    let fingerprint = ContentHasher::ARTIFACT.fingerprint_file(&args.file)?;
    match format {
        OutputFormat::Text => println!("{}  {}", fingerprint, args.file.display()),
        OutputFormat::Json => println!(
            "{}",
            json!({ "file": args.file.display().to_string(), "fingerprint": fingerprint })
        ),
    }
    Ok(())
}

fn cmd_project(args: ProjectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let sync = local_sync(&args.root);
    match args.action {
        ProjectAction::List => {
            let names = sync.list_projects()?;
            match format {
                OutputFormat::Text if names.is_empty() => println!("No projects."),
                OutputFormat::Text => names.iter().for_each(|n| println!("{n}")),
                OutputFormat::Json => println!("{}", serde_json::to_string(&names)?),
            }
        }
        ProjectAction::Create { name } => {
            sync.create_project(&name)?;
            println!("{} Created project {}", "✓".green().bold(), name.yellow());
        }
        ProjectAction::Delete { name } => {
            sync.remove_project(&name)?;
            println!("{} Deleted project {}", "✓".green().bold(), name.yellow());
        }
    }
    Ok(())
}

/// Read `file` and store it under `project`, choosing the artifact kind
/// from the file's extension.
fn upload_file(sync: &SyncHandler, project: &str, file: &Path) -> anyhow::Result<UploadReceipt> {
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", file.display()))?;
    let kind = ArtifactKind::from_extension(file_extension(filename))
        .ok_or_else(|| anyhow!("{filename}: expected a .mef or .xml file"))?;
    let data = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    Ok(sync.upload(project, kind, filename, &data)?)
}

fn cmd_upload(args: UploadArgs, format: OutputFormat) -> anyhow::Result<()> {
    let sync = local_sync(&args.root);
    let receipt = upload_file(&sync, &args.project, &args.file)?;
    match format {
        OutputFormat::Text => {
            println!(
                "{} Stored {} for {}",
                "✓".green().bold(),
                receipt.kind.to_string().cyan(),
                receipt.project.yellow()
            );
            println!("  Size: {} bytes", receipt.size);
            println!("  Fingerprint: {}", receipt.fingerprint.to_string().dimmed());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&receipt)?),
    }
    Ok(())
}

struct ArtifactStatus {
    kind: ArtifactKind,
    size: usize,
    fingerprint: Fingerprint,
}

fn project_status(sync: &SyncHandler, project: &str) -> anyhow::Result<Vec<ArtifactStatus>> {
    let mut entries = Vec::new();
    for kind in sync.store().artifact_kinds(project)? {
        // An empty token is never current, so the artifact is always transferred.
        if let FetchOutcome::Transfer(t) = sync.fetch(project, kind, "")? {
            entries.push(ArtifactStatus {
                kind,
                size: t.data.len(),
                fingerprint: t.fingerprint,
            });
        }
    }
    Ok(entries)
}

fn cmd_status(args: StatusArgs, format: OutputFormat) -> anyhow::Result<()> {
    let sync = local_sync(&args.root);
    let entries = project_status(&sync, &args.project)?;
    match format {
        OutputFormat::Text => {
            println!("Project {}", args.project.yellow().bold());
            if entries.is_empty() {
                println!("  No artifacts.");
            }
            for e in &entries {
                println!(
                    "  {:<12} {:>10} bytes  {}",
                    e.kind.to_string(),
                    e.size,
                    e.fingerprint.short_hex().dimmed()
                );
            }
        }
        OutputFormat::Json => {
            let artifacts: Vec<_> = entries
                .iter()
                .map(|e| json!({ "kind": e.kind, "size": e.size, "fingerprint": e.fingerprint }))
                .collect();
            println!("{}", json!({ "project": args.project, "artifacts": artifacts }));
        }
    }
    Ok(())
}
