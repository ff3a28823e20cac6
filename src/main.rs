mod cli;

use plugin_registrar::config::Config;
use plugin_registrar::plugin::local::copy_dir_recursive;
use plugin_registrar::plugin::{LocalLibraryInstaller, LocalPackage, PluginInstaller};
use plugin_registrar::registry::RegistryStore;
use plugin_registrar::utils::paths::{absolute_path, get_logs_dir};

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use registrar_interface::Package;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

type Installer = PluginInstaller<LocalLibraryInstaller>;

/// Initialize file-based logging.
///
/// Logs are written to <data dir>/plugin-registrar/logs/plugreg.log, rolling
/// daily. Falls back to stderr when the logs directory is unavailable.
///
/// Log level can be controlled with RUST_LOG env var (default: info).
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let logs_dir = match get_logs_dir() {
        Ok(dir) => dir,
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            return None;
        }
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Could not create logs directory: {}", e);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "plugreg.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Guard must be kept alive for the duration of the command
    let _log_guard = init_logging();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let install_root =
        absolute_path(cli.install_root.as_deref().unwrap_or(config.install_root.as_path()))?;
    tracing::debug!("Using install root {:?}", install_root);

    let store = RegistryStore::with_file(&install_root, &config.registry_file);
    let mut installer = PluginInstaller::new(LocalLibraryInstaller::new(&install_root), store)
        .with_plugin_type(config.plugin_type.as_str());

    match cli.command {
        Commands::Install { path } => handle_install(&mut installer, &path),
        Commands::Update { path } => handle_update(&mut installer, &path),
        Commands::Uninstall { name } => handle_uninstall(&mut installer, &name),
        Commands::List => handle_list(&installer),
        Commands::Show { name } => handle_show(&installer, &name),
    }
}

fn load_plugin_package(installer: &Installer, path: &Path) -> Result<LocalPackage> {
    let package = LocalPackage::load(&absolute_path(path)?)?;

    if !installer.supports(package.package_type()) {
        bail!(
            "Package '{}' has type '{}', which is not a plugin type handled here.",
            package.pretty_name(),
            package.package_type()
        );
    }

    Ok(package)
}

fn handle_install(installer: &mut Installer, path: &Path) -> Result<()> {
    let package = load_plugin_package(installer, path)?;
    installer.install(&package)?;

    println!(
        "Installed {} v{}",
        package.pretty_name(),
        package.pretty_version()
    );
    Ok(())
}

fn handle_update(installer: &mut Installer, path: &Path) -> Result<()> {
    let target = load_plugin_package(installer, path)?;

    let installed_dir = installer.library().package_dir(target.pretty_name())?;
    if !installed_dir.is_dir() {
        bail!(
            "Package '{}' is not installed. Use install instead.",
            target.pretty_name()
        );
    }
    if installed_dir.canonicalize()? == target.source_dir().canonicalize()? {
        bail!("Cannot update a package from its own installed directory");
    }

    // The installed copy is replaced during the update; keep a snapshot so a
    // rollback can put it back.
    let snapshot = tempdir().context("Failed to create temp directory")?;
    let snapshot_dir = snapshot.path().join("package");
    copy_dir_recursive(&installed_dir, &snapshot_dir)
        .with_context(|| format!("Failed to snapshot {:?}", installed_dir))?;
    let initial = LocalPackage::load(&snapshot_dir)?;

    installer.update(&initial, &target)?;

    println!(
        "Updated {} from v{} to v{}",
        target.pretty_name(),
        initial.pretty_version(),
        target.pretty_version()
    );
    Ok(())
}

fn handle_uninstall(installer: &mut Installer, name: &str) -> Result<()> {
    let installed_dir = installer.library().package_dir(name)?;

    if !installed_dir.is_dir() {
        // Drop a stale registry entry, if any
        if installer.unregister_plugin(&name.to_lowercase())?.is_some() {
            println!("Removed stale registry entry for {}", name);
        } else {
            println!("Package '{}' is not installed", name);
        }
        return Ok(());
    }

    let package = LocalPackage::load(&installed_dir)?;
    installer.uninstall(&package)?;

    println!("Uninstalled {}", package.pretty_name());
    Ok(())
}

fn handle_list(installer: &Installer) -> Result<()> {
    let plugins = installer.plugins()?;

    if plugins.is_empty() {
        println!("No plugins registered.");
        return Ok(());
    }

    for (key, plugin) in &plugins {
        println!("{}  {} v{}  {}", key, plugin.name, plugin.version, plugin.title);
    }
    Ok(())
}

fn handle_show(installer: &Installer, name: &str) -> Result<()> {
    let plugins = installer.plugins()?;

    let Some(plugin) = plugins.get(&name.to_lowercase()) else {
        bail!("Plugin '{}' is not registered", name);
    };

    println!("{}", serde_json::to_string_pretty(plugin)?);
    Ok(())
}
