use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plugreg")]
#[command(about = "Install plugin packages and keep the plugin registry in sync", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./plugreg.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the install root from the config
    #[arg(long, global = true)]
    pub install_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a plugin package from a local directory
    Install {
        /// Directory containing package.toml
        path: PathBuf,
    },
    /// Replace an installed plugin package with a new version
    Update {
        /// Directory containing the new package.toml
        path: PathBuf,
    },
    /// Uninstall a plugin package
    Uninstall {
        /// Package name in vendor/name form
        name: String,
    },
    /// List registered plugins
    List,
    /// Show the registry entry for one package
    Show {
        /// Package name in vendor/name form
        name: String,
    },
}
