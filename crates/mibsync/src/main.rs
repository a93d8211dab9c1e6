//! CLI entry point for mibsync.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mibsync::config::SyncConfig;
use mibsync::emit::render_listing;
use mibsync::parser::parse_file;
use mibsync::sync::{apply_plan, plan_sync};
use mibsync::walk::find_alert_files;

#[derive(Parser)]
#[command(name = "mibsync")]
#[command(about = "Append alert-derived traps to the Nutanix SNMP MIB")]
struct Cli {
    /// MIB file to update in place (overrides config).
    #[arg(short, long)]
    mib: Option<PathBuf>,

    /// Directory searched recursively for alert files (overrides config).
    #[arg(short, long)]
    alerts: Option<PathBuf>,

    /// Alert file to load; repeatable. Disables the directory search.
    #[arg(long = "alert-file")]
    alert_files: Vec<PathBuf>,

    /// Attribute to register as an object-type; repeatable (overrides config).
    #[arg(long = "attribute")]
    attributes: Vec<String>,

    /// Print the definitions already in the MIB and exit.
    #[arg(long)]
    list: bool,

    /// Print the managed section instead of rewriting the MIB.
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    json_logs: bool,

    /// Config file prefix (default: mibsync).
    #[arg(short, long, default_value = "mibsync")]
    config: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    check_flags(&cli)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let config = resolve_config(&cli)?;

    if cli.list {
        let registry = parse_file(Path::new(&config.mib_path))?;
        print!("{}", render_listing(&registry));
        return Ok(());
    }

    let alert_files = if cli.alert_files.is_empty() {
        find_alert_files(Path::new(&config.alert_dir), &config.alert_extension)?
    } else {
        cli.alert_files.clone()
    };

    let plan = plan_sync(&config, &alert_files)?;

    if cli.dry_run {
        print!("{}", plan.rendered());
        return Ok(());
    }

    let summary = apply_plan(&config, plan)?;
    if !summary.spliced {
        return Ok(());
    }

    tracing::info!(
        mib = %config.mib_path,
        existing_objects = summary.existing_objects,
        existing_traps = summary.existing_traps,
        objects_added = summary.objects_added,
        traps_added = summary.traps_added,
        "MIB updated"
    );

    Ok(())
}

fn check_flags(cli: &Cli) -> anyhow::Result<()> {
    if cli.list && cli.dry_run {
        anyhow::bail!("--list and --dry-run cannot be combined");
    }
    if cli.list && (!cli.alert_files.is_empty() || !cli.attributes.is_empty()) {
        anyhow::bail!("--list does not take --alert-file or --attribute");
    }
    if !cli.alert_files.is_empty() && cli.alerts.is_some() {
        anyhow::bail!("Specify either --alerts (directory search) or --alert-file, not both");
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<SyncConfig> {
    let mut config = SyncConfig::load(&cli.config)?;

    if let Some(mib) = &cli.mib {
        config.mib_path = path_string(mib)?;
    }
    if let Some(alerts) = &cli.alerts {
        config.alert_dir = path_string(alerts)?;
    }
    if !cli.attributes.is_empty() {
        config.attributes = cli.attributes.clone();
    }

    Ok(config)
}

fn path_string(path: &Path) -> anyhow::Result<String> {
    path.to_str()
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("Path is not valid UTF-8: {}", path.display()))
}
